// src/output.rs

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use tracing::info;

use crate::cli::{Args, OutputFormat};
use crate::constants::{DATETIME_FORMAT, RESULTS_DIR};
use crate::extract::Table;

/// Hands the finished table to the selected writer.
pub fn control_output(table: &Table, args: &Args) -> Result<()> {
    match args.output {
        OutputFormat::Plain => {
            plain(table);
            Ok(())
        }
        OutputFormat::Pretty => {
            pretty(table);
            Ok(())
        }
        OutputFormat::File => {
            fs::create_dir_all(RESULTS_DIR)
                .with_context(|| format!("creating results dir {RESULTS_DIR}"))?;
            let timestamp = Local::now().format(DATETIME_FORMAT);
            let path =
                PathBuf::from(RESULTS_DIR).join(format!("{}_{timestamp}.csv", args.mode.as_str()));
            write_csv(table, &path)?;
            info!(path = %path.display(), "results written");
            Ok(())
        }
    }
}

fn plain(table: &Table) {
    for row in table {
        println!("{}", row.join("\t"));
    }
}

fn pretty(table: &Table) {
    let Some(header) = table.first() else { return };
    let mut widths = vec![0usize; header.len()];
    for row in table {
        for (i, field) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(field.chars().count());
            }
        }
    }
    for (i, row) in table.iter().enumerate() {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(field, width)| format!("{field:<width$}"))
            .collect();
        println!("{}", line.join(" | "));
        if i == 0 {
            let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
            println!("{}", rule.join("-+-"));
        }
    }
}

pub(crate) fn write_csv(table: &Table, path: &Path) -> Result<()> {
    let mut out = String::new();
    for row in table {
        let fields: Vec<String> = row.iter().map(|f| csv_field(f)).collect();
        out.push_str(&fields.join(","));
        out.push('\n');
    }
    fs::write(path, out).with_context(|| format!("writing results to {}", path.display()))
}

fn csv_field(field: &str) -> String {
    if field.contains(|c| matches!(c, ',' | '"' | '\n')) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn table() -> Table {
        vec![
            vec!["Status".to_string(), "Count".to_string()],
            vec!["Final, sort of".to_string(), "2".to_string()],
            vec!["Total".to_string(), "2".to_string()],
        ]
    }

    #[test]
    fn csv_fields_with_commas_are_quoted() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn csv_file_holds_one_line_per_row() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("pep.csv");
        write_csv(&table(), &path)?;
        let written = fs::read_to_string(&path)?;
        assert_eq!(written, "Status,Count\n\"Final, sort of\",2\nTotal,2\n");
        Ok(())
    }
}
