use std::{fs, path::Path};

use anyhow::{Context, Ok, Result};

pub trait CreateDirIfNotExists {
    fn create_if_not_exists(&self) -> Result<()>;
}

impl CreateDirIfNotExists for Path {
    fn create_if_not_exists(&self) -> Result<()> {
        if !self.exists() {
            fs::create_dir_all(self)
                .context(format!("Couldn't create directory {}", self.display()))?
        }
        Ok(())
    }
}

/// INFO-level fmt logger without timestamps; same setup in both binaries.
pub fn setup_logger() -> Result<()> {
    use tracing::Level;
    use tracing_subscriber::{
        filter::LevelFilter, fmt::layer, layer::SubscriberExt, util::SubscriberInitExt, Registry,
    };

    Registry::default()
        .with(LevelFilter::from(Level::INFO))
        .with(layer().with_ansi(true).with_target(false).without_time())
        .try_init()?;

    Ok(())
}
