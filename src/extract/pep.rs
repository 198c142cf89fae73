// src/extract/pep.rs

use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use tracing::info;
use url::Url;

use super::Table;
use crate::error::ScrapeError;
use crate::fetch::Session;
use crate::html::{find_tag, flat_text, require_attr, text_of};

static ROWS: Lazy<Selector> = Lazy::new(|| Selector::parse("tr").expect("valid selector"));
static CELLS: Lazy<Selector> = Lazy::new(|| Selector::parse("td").expect("valid selector"));
static STATUS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"Active|Draft|Final|Provisional|Rejected|Superseded|Withdrawn|Deferred|April Fool!|Accepted",
    )
    .expect("valid regex")
});

/// Index status code → full status name. "April Fool!" has no code, so a
/// coded index row pointing at such a PEP always logs a mismatch.
fn expected_status(code: char) -> Option<&'static str> {
    match code {
        'A' => Some("Accepted"),
        'D' => Some("Deferred"),
        'F' => Some("Final"),
        'P' => Some("Provisional"),
        'R' => Some("Rejected"),
        'S' => Some("Superseded"),
        'W' => Some("Withdrawn"),
        _ => None,
    }
}

/// First recognizable status name in the detail page's metadata text.
fn detail_status(dl_text: &str) -> Option<String> {
    STATUS.find(dl_text).map(|m| m.as_str().to_string())
}

/// Diagnostic cross-check between the index code and the detail-page status.
/// Returns the mismatch description to log, or `None` when they agree.
fn status_mismatch(code: Option<char>, status: Option<&str>) -> Option<String> {
    match code {
        Some(code) => {
            let expected = expected_status(code);
            if expected == status {
                None
            } else {
                Some(format!(
                    "status in card: {}, expected: {}",
                    status.unwrap_or("Unknown"),
                    expected.unwrap_or("unknown index code"),
                ))
            }
        }
        None => {
            if matches!(status, Some("Active") | Some("Draft")) {
                None
            } else {
                Some(format!(
                    "status in card: {}, expected one of: Active, Draft",
                    status.unwrap_or("Unknown"),
                ))
            }
        }
    }
}

/// Walks every PEP in the numerical index, cross-checks its status against
/// the detail page, and tallies per-status counts in first-seen order. Ends
/// with a ("Total", N) row. Mismatches are logged, never fatal.
pub async fn pep(session: &Session, pep_url: &Url) -> Result<Table> {
    let body = session.get_text(pep_url).await?;
    let entries: Vec<(Option<char>, Url)> = {
        let doc = Html::parse_document(&body);
        let index = find_tag(doc.root_element(), "section#numerical-index")?;
        let mut entries = Vec::new();
        for row in index.select(&ROWS) {
            let mut cells = row.select(&CELLS);
            // header rows carry th cells only
            let Some(first) = cells.next() else { continue };
            let text = text_of(first);
            let code = if text.chars().count() == 2 {
                text.chars().nth(1)
            } else {
                None
            };
            let second = cells.next().ok_or_else(|| {
                ScrapeError::NothingFound("index row without a PEP link cell".to_string())
            })?;
            let anchor = find_tag(second, "a")?;
            entries.push((code, pep_url.join(require_attr(anchor, "href")?)?));
        }
        entries
    };

    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut pep_count = 0usize;
    let total = entries.len();
    for (i, (code, link)) in entries.iter().enumerate() {
        info!(current = i + 1, total, pep = %link, "checking PEP status");
        let body = session.get_text(link).await?;
        let status = {
            let doc = Html::parse_document(&body);
            let dl = find_tag(doc.root_element(), "dl.rfc2822.field-list.simple")?;
            detail_status(&flat_text(dl))
        };
        if let Some(note) = status_mismatch(*code, status.as_deref()) {
            info!(pep = %link, "status mismatch: {note}");
        }
        pep_count += 1;
        let key = status.unwrap_or_else(|| "Unknown".to_string());
        match counts.iter_mut().find(|(name, _)| *name == key) {
            Some((_, n)) => *n += 1,
            None => counts.push((key, 1)),
        }
    }

    let mut results: Table = vec![vec!["Status".to_string(), "Count".to_string()]];
    for (status, count) in counts {
        results.push(vec![status, count.to_string()]);
    }
    results.push(vec!["Total".to_string(), pep_count.to_string()]);
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn matching_code_and_status_is_not_a_mismatch() {
        assert_eq!(status_mismatch(Some('A'), Some("Accepted")), None);
        assert_eq!(status_mismatch(Some('F'), Some("Final")), None);
    }

    #[test]
    fn diverging_code_and_status_names_both_values() {
        let note = status_mismatch(Some('A'), Some("Rejected")).unwrap();
        assert!(note.contains("Rejected"));
        assert!(note.contains("Accepted"));
    }

    #[test]
    fn missing_code_expects_active_or_draft() {
        assert_eq!(status_mismatch(None, Some("Active")), None);
        assert_eq!(status_mismatch(None, Some("Draft")), None);
        let note = status_mismatch(None, Some("Final")).unwrap();
        assert!(note.contains("Final"));
        assert!(note.contains("Active, Draft"));
    }

    #[test]
    fn unknown_index_code_is_always_a_mismatch() {
        let note = status_mismatch(Some('X'), Some("Final")).unwrap();
        assert!(note.contains("unknown index code"));
    }

    #[test]
    fn status_is_the_first_match_in_the_text() {
        assert_eq!(
            detail_status("Author: Guido  Status: Final  Type: Process").as_deref(),
            Some("Final")
        );
        assert_eq!(detail_status("no status here"), None);
        assert_eq!(
            detail_status("Status: April Fool!").as_deref(),
            Some("April Fool!")
        );
    }

    const INDEX: &str = r#"
        <html><body>
          <section id="numerical-index">
            <table>
              <thead><tr><th></th><th>PEP</th><th>Title</th></tr></thead>
              <tbody>
                <tr><td>PF</td><td><a href="pep-0001/">1</a></td><td>PEP Purpose</td></tr>
                <tr><td>P</td><td><a href="pep-0002/">2</a></td><td>Procedure</td></tr>
                <tr><td>PA</td><td><a href="pep-0003/">3</a></td><td>Handling</td></tr>
              </tbody>
            </table>
          </section>
        </body></html>"#;

    fn detail(status: &str) -> String {
        format!(
            r#"<html><body>
                 <dl class="rfc2822 field-list simple">
                   <dt>Author</dt><dd>someone</dd>
                   <dt>Status</dt><dd>{status}</dd>
                 </dl>
               </body></html>"#
        )
    }

    async fn serve(server: &MockServer, route: &str, body: String) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn tally_ends_with_a_total_matching_the_row_count() -> Result<()> {
        let server = MockServer::start().await;
        serve(&server, "/", INDEX.to_string()).await;
        serve(&server, "/pep-0001/", detail("Final")).await;
        serve(&server, "/pep-0002/", detail("Draft")).await;
        serve(&server, "/pep-0003/", detail("Final")).await;

        let session = Session::new(None)?;
        let base = Url::parse(&format!("{}/", server.uri()))?;
        let table = pep(&session, &base).await?;

        assert_eq!(table[0], vec!["Status", "Count"]);
        // first-seen order: Final before Draft
        assert_eq!(table[1], vec!["Final", "2"]);
        assert_eq!(table[2], vec!["Draft", "1"]);
        let last = table.last().unwrap();
        assert_eq!(last[0], "Total");
        assert_eq!(last[1], "3");

        let sum: usize = table[1..table.len() - 1]
            .iter()
            .map(|row| row[1].parse::<usize>().unwrap())
            .sum();
        assert_eq!(sum.to_string(), last[1]);
        Ok(())
    }

    #[tokio::test]
    async fn missing_index_section_aborts() -> Result<()> {
        let server = MockServer::start().await;
        serve(&server, "/", "<html><body></body></html>".to_string()).await;

        let session = Session::new(None)?;
        let base = Url::parse(&format!("{}/", server.uri()))?;
        assert!(pep(&session, &base).await.is_err());
        Ok(())
    }
}
