mod env;
mod icons;
mod theme;
mod utils;

use anyhow::{Ok, Result};
use tracing::info;

use crate::env::Env;
use crate::utils::setup_logger;

/// Downloads every Material icon asset listed by the fonts metadata service into
/// `raw-icons/<theme>/<icon>.xml`.
///
/// Runs strictly one request at a time and stops at the first failure; files written
/// before the failure are left in place.
#[tokio::main]
async fn main() -> Result<()> {
    setup_logger()?;
    let env = Env::prepare()?;

    let output_root = env.icons.default_output_root();
    let client = reqwest::Client::new();

    let summary = env.icons.fetch_icons(&client, &output_root).await?;
    info!(
        families = summary.families,
        written = summary.written,
        root = %output_root.display(),
        "Finished downloading icons"
    );

    Ok(())
}
