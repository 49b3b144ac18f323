use std::{
    fmt, fs,
    path::{Component, Path, PathBuf},
};

use anyhow::{bail, Context, Ok, Result};
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::env::EnvIcons;
use crate::theme::{normalize_family, Theme};
use crate::utils::CreateDirIfNotExists;

/// First line of every metadata response, guards against cross-site script inclusion.
const XSSI_PREFIX: &str = ")]}'";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum IconVersion {
    Number(u64),
    Text(String),
}

impl fmt::Display for IconVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IconVersion::Number(n) => write!(f, "{n}"),
            IconVersion::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct IconRecord {
    pub name: String,
    pub version: IconVersion,
    #[serde(default)]
    pub unsupported_families: Vec<String>,
}

impl IconRecord {
    pub fn supports(&self, family: &str) -> bool {
        !self.unsupported_families.iter().any(|it| it == family)
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct FamilyMetadata {
    pub asset_url_pattern: String,
    pub host: String,
    pub families: Vec<String>,
    pub icons: Vec<IconRecord>,
}

impl FamilyMetadata {
    pub async fn fetch(client: &Client, url: &str) -> Result<Self> {
        let metadata_raw = client
            .get(url)
            .send()
            .await
            .context(format!("Failed to GET icon metadata from {url}"))?
            .error_for_status()?
            .text()
            .await
            .context("Failed to read icon metadata body")?;

        Self::parse(&metadata_raw)
    }

    /// Strips the XSSI prefix line and parses the rest as JSON.
    pub fn parse(raw: &str) -> Result<Self> {
        let (prefix, body) = raw
            .split_once('\n')
            .context("Icon metadata is missing the XSSI prefix line")?;
        if prefix.trim_end_matches('\r') != XSSI_PREFIX {
            bail!("Icon metadata starts with unexpected line {prefix:?}");
        }

        let metadata: Self =
            serde_json::from_str(body).context("Couldn't parse icon metadata document")?;

        Ok(metadata)
    }

    pub fn asset_url(&self, family: &str, icon: &IconRecord, asset: &str, scheme: &str) -> String {
        let path = self
            .asset_url_pattern
            .replace("{family}", family)
            .replace("{icon}", &icon.name)
            .replace("{version}", &icon.version.to_string())
            .replace("{asset}", asset);

        format!("{scheme}://{}{path}", self.host)
    }

    /// Resolves every declared family into its theme and asset URLs, in document order.
    /// Fails on the first family without a known theme.
    pub fn resolve(&self, asset: &str, scheme: &str) -> Result<Vec<ResolvedFamily>> {
        self.families
            .iter()
            .map(|family| {
                let normalized = normalize_family(family);
                let theme = Theme::from_family(&normalized)
                    .context(format!("Couldn't resolve icons for family '{family}'"))?;
                let icons = self
                    .icons
                    .iter()
                    .filter(|icon| icon.supports(family))
                    .map(|icon| {
                        (
                            icon.name.clone(),
                            self.asset_url(&normalized, icon, asset, scheme),
                        )
                    })
                    .collect();

                Ok(ResolvedFamily {
                    family: family.clone(),
                    theme,
                    icons,
                })
            })
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct ResolvedFamily {
    pub family: String,
    pub theme: Theme,
    /// (icon name, asset url)
    pub icons: Vec<(String, String)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DownloadTarget {
    pub name: String,
    pub url: String,
    pub theme: Theme,
}

impl DownloadTarget {
    /// `<output_root>/<theme>/<name>.xml`. The name must be a single plain path
    /// component so the file lands inside the theme directory.
    pub fn destination(&self, output_root: &Path) -> Result<PathBuf> {
        let name = &self.name;
        let mut components = Path::new(name).components();
        let is_plain = matches!(components.next(), Some(Component::Normal(_)))
            && components.next().is_none()
            && !name.contains(['/', '\\']);
        if !is_plain {
            bail!("Refusing to write icon with unsafe name {name:?}");
        }

        Ok(output_root
            .join(self.theme.dir_name())
            .join(format!("{name}.xml")))
    }
}

pub trait ToDownloadTargets {
    fn to_download_targets(&self) -> Vec<DownloadTarget>;
}

impl ToDownloadTargets for [ResolvedFamily] {
    fn to_download_targets(&self) -> Vec<DownloadTarget> {
        self.iter()
            .flat_map(|family| {
                family.icons.iter().map(|(name, url)| DownloadTarget {
                    name: name.clone(),
                    url: url.clone(),
                    theme: family.theme,
                })
            })
            .collect()
    }
}

pub struct IconDownloader;

impl IconDownloader {
    /// Writes the asset to `<output_root>/<theme>/<name>.xml`, replacing any previous copy.
    pub async fn download(
        client: &Client,
        target: &DownloadTarget,
        output_root: &Path,
    ) -> Result<PathBuf> {
        let icon_name = &target.name;
        let destination = target.destination(output_root)?;
        let res = client
            .get(&target.url)
            .send()
            .await
            .context(format!("Failed to GET icon '{icon_name}'"))?
            .error_for_status()
            .context(format!("Server rejected request for icon '{icon_name}'"))?;

        let bytes = res
            .bytes()
            .await
            .context(format!("Error while downloading icon {icon_name}"))?;

        output_root
            .join(target.theme.dir_name())
            .create_if_not_exists()?;
        fs::write(&destination, &bytes).context(format!(
            "Error while saving icon {icon_name} to {}",
            destination.display()
        ))?;

        Ok(destination)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DownloadSummary {
    pub families: usize,
    pub written: usize,
}

/// Fetch metadata, resolve targets, download each one in order.
pub struct IconFetcher<'a> {
    client: &'a Client,
    env: &'a EnvIcons,
    output_root: &'a Path,
}

impl<'a> IconFetcher<'a> {
    pub fn new(client: &'a Client, env: &'a EnvIcons, output_root: &'a Path) -> Self {
        Self {
            client,
            env,
            output_root,
        }
    }

    pub async fn run(&self) -> Result<DownloadSummary> {
        let metadata = self.env.fetch_metadata(self.client).await?;
        info!(
            families = metadata.families.len(),
            icons = metadata.icons.len(),
            "Fetched icon metadata"
        );

        let families = metadata.resolve(&self.env.asset, &self.env.scheme)?;
        for family in families.iter() {
            info!(
                family = %family.family,
                theme = %family.theme,
                icons = family.icons.len(),
                "Resolved icon family"
            );
        }

        let targets = families.to_download_targets();
        let pb = ProgressBar::new(targets.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{msg}\n{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({eta})",
                )?
                .progress_chars("#>-"),
        );

        for target in targets.iter() {
            let written = IconDownloader::download(self.client, target, self.output_root).await?;
            pb.suspend(|| info!(url = %target.url, path = %written.display(), "Wrote icon"));
            pb.set_message(format!("Wrote {}", written.display()));
            pb.inc(1);
        }

        pb.finish_with_message(format!(
            "Downloaded {} icons to {}",
            targets.len(),
            self.output_root.display()
        ));

        Ok(DownloadSummary {
            families: families.len(),
            written: targets.len(),
        })
    }
}
