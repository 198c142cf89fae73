use anyhow::Result;
use pydocscraper::{
    cli::{self, Mode},
    constants::{CACHE_DIR, DOWNLOADS_DIR, DOWNLOADS_URL, MAIN_DOC_URL, PEP_URL, WHATS_NEW_URL},
    extract,
    fetch::Session,
    output,
};
use std::path::Path;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};
use url::Url;

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();
    info!("startup");

    // ─── 2) parse args, build the session ────────────────────────────
    let args = cli::parse()?;
    info!(?args, "arguments");

    let session = Session::new(Some(Path::new(CACHE_DIR)))?;
    if args.clear_cache {
        info!("clearing page cache");
        session.clear_cache()?;
    }

    // ─── 3) dispatch the mode ────────────────────────────────────────
    match args.mode {
        Mode::WhatsNew => {
            let table = extract::whats_new(&session, &Url::parse(WHATS_NEW_URL)?).await?;
            output::control_output(&table, &args)?;
        }
        Mode::LatestVersions => {
            let table = extract::latest_versions(&session, &Url::parse(MAIN_DOC_URL)?).await?;
            output::control_output(&table, &args)?;
        }
        Mode::Download => {
            extract::download(
                &session,
                &Url::parse(DOWNLOADS_URL)?,
                Path::new(DOWNLOADS_DIR),
            )
            .await?;
        }
        Mode::Pep => {
            let table = extract::pep(&session, &Url::parse(PEP_URL)?).await?;
            output::control_output(&table, &args)?;
        }
    }

    info!("done");
    Ok(())
}
