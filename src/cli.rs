// src/cli.rs

use std::env;

use anyhow::{anyhow, bail, Result};

const HELP: &str = "\
pydocscraper - Python docs and PEP index scraper

USAGE:
    pydocscraper <MODE> [OPTIONS]

MODES:
    whats-new          articles from the \"What's New in Python\" index
    latest-versions    Python versions and statuses from the docs sidebar
    download           fetch the pdf-a4.zip documentation archive
    pep                tally PEP statuses and cross-check the index codes

OPTIONS:
    -c, --clear-cache        wipe the page cache before running
    -o, --output <FORMAT>    pretty | file (default: plain rows to stdout)
    -h, --help               show this help
";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    WhatsNew,
    LatestVersions,
    Download,
    Pep,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::WhatsNew => "whats-new",
            Mode::LatestVersions => "latest-versions",
            Mode::Download => "download",
            Mode::Pep => "pep",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Plain,
    Pretty,
    File,
}

#[derive(Debug)]
pub struct Args {
    pub mode: Mode,
    pub clear_cache: bool,
    pub output: OutputFormat,
}

pub fn parse() -> Result<Args> {
    parse_from(env::args().skip(1))
}

pub fn parse_from<I>(args: I) -> Result<Args>
where
    I: IntoIterator<Item = String>,
{
    let mut mode = None;
    let mut clear_cache = false;
    let mut output = OutputFormat::Plain;

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                eprintln!("{HELP}");
                std::process::exit(0);
            }
            "-c" | "--clear-cache" => clear_cache = true,
            "-o" | "--output" => {
                let value = args.next().ok_or_else(|| anyhow!("missing value for --output"))?;
                output = match value.as_str() {
                    "pretty" => OutputFormat::Pretty,
                    "file" => OutputFormat::File,
                    other => bail!("unknown output format: {other}"),
                };
            }
            "whats-new" if mode.is_none() => mode = Some(Mode::WhatsNew),
            "latest-versions" if mode.is_none() => mode = Some(Mode::LatestVersions),
            "download" if mode.is_none() => mode = Some(Mode::Download),
            "pep" if mode.is_none() => mode = Some(Mode::Pep),
            other => bail!("unknown argument: {other}"),
        }
    }

    let mode = mode.ok_or_else(|| anyhow!("missing mode; try --help"))?;
    Ok(Args {
        mode,
        clear_cache,
        output,
    })
}
