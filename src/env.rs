use std::path::{Path, PathBuf};

use anyhow::{Ok, Result};
use serde::{Deserialize, Serialize};

use crate::icons::{DownloadSummary, FamilyMetadata, IconFetcher};

#[derive(Serialize, Deserialize)]
pub struct Env {
    pub icons: EnvIcons,
}

#[derive(Serialize, Deserialize, Clone)]
pub struct EnvIcons {
    pub metadata_url: String,
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    #[serde(default = "default_asset")]
    pub asset: String,
    #[serde(default = "default_scheme")]
    pub scheme: String,
}

fn default_output_dir() -> String {
    "raw-icons".into()
}

fn default_asset() -> String {
    "24px.xml".into()
}

fn default_scheme() -> String {
    "http".into()
}

impl Env {
    pub fn prepare() -> Result<Self> {
        let env_raw = include_str!("../assets/constants.json");
        let env: Env = serde_json::from_str(env_raw)?;
        Ok(env)
    }
}

impl EnvIcons {
    /// Output root next to the package sources, e.g. `<crate>/raw-icons`.
    pub fn default_output_root(&self) -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join(&self.output_dir)
    }

    pub async fn fetch_metadata(&self, client: &reqwest::Client) -> Result<FamilyMetadata> {
        FamilyMetadata::fetch(client, &self.metadata_url).await
    }

    pub async fn fetch_icons(
        &self,
        client: &reqwest::Client,
        output_root: &Path,
    ) -> Result<DownloadSummary> {
        IconFetcher::new(client, self, output_root).run().await
    }
}
