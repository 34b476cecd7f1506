use anyhow::{bail, Context, Result};
use serde::Deserialize;
use url::Url;

pub const PLACEHOLDER_URL: &str = "https://your-project.supabase.co";
pub const PLACEHOLDER_KEY: &str = "your-anon-key";

/// Where the external branch/personnel tables live.
///
/// Defaults are placeholders; [`DirectoryConfig::warnings`] reports them so
/// startup can fall back to the built-in sample directory.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DirectoryConfig {
    pub directory_url: String,
    pub directory_key: String,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            directory_url: PLACEHOLDER_URL.into(),
            directory_key: PLACEHOLDER_KEY.into(),
        }
    }
}

impl DirectoryConfig {
    pub fn new(directory_url: impl Into<String>, directory_key: impl Into<String>) -> Self {
        Self {
            directory_url: directory_url.into(),
            directory_key: directory_key.into(),
        }
    }

    pub fn warnings(&self) -> Vec<&'static str> {
        let mut warnings = Vec::new();

        let url = self.directory_url.trim();
        if url.is_empty() || url == PLACEHOLDER_URL {
            warnings.push("missing or placeholder directory URL; set DIRECTORY_URL");
        } else if self.base_url().is_err() {
            warnings.push("directory URL is not a valid http(s) URL");
        }

        let key = self.directory_key.trim();
        if key.is_empty() || key == PLACEHOLDER_KEY {
            warnings.push("missing or placeholder directory key; set DIRECTORY_KEY");
        }

        warnings
    }

    pub fn is_configured(&self) -> bool {
        self.warnings().is_empty()
    }

    /// Parsed directory URL, always ending in `/` so table paths join below it.
    pub fn base_url(&self) -> Result<Url> {
        let raw = self.directory_url.trim();
        let mut url = Url::parse(raw).with_context(|| format!("invalid directory url '{raw}'"))?;
        if !matches!(url.scheme(), "http" | "https") {
            bail!("directory url must use http or https, got '{}'", url.scheme());
        }
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }
}
