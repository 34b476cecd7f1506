use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use shared::domain::{Branch, Person};
use tracing::{info, warn};

pub mod config;
mod rest;

pub use config::DirectoryConfig;
pub use rest::RestDirectory;

/// Read-only source of branches and personnel.
#[async_trait]
pub trait Directory: Send + Sync {
    async fn branches(&self) -> Result<Vec<Branch>>;
    async fn personnel(&self) -> Result<Vec<Person>>;

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }

    /// Short name of the backing source, for logs.
    fn kind(&self) -> &'static str;
}

/// Fixed in-memory directory.
#[derive(Debug, Clone, Default)]
pub struct StaticDirectory {
    branches: Vec<Branch>,
    personnel: Vec<Person>,
}

impl StaticDirectory {
    pub fn new(branches: Vec<Branch>, personnel: Vec<Person>) -> Self {
        Self {
            branches,
            personnel,
        }
    }

    /// Sample data served when no external directory is configured.
    pub fn sample() -> Self {
        Self::new(
            vec![
                Branch::new(1, "SSP BRANCH"),
                Branch::new(2, "S1 BRANCH"),
                Branch::new(3, "S2 BRANCH"),
                Branch::new(4, "S3 BRANCH"),
                Branch::new(5, "S4 BRANCH"),
                Branch::new(6, "OCHQ"),
            ],
            vec![
                Person::new(1, "3SG SIVA", "SSP BRANCH"),
                Person::new(2, "CPL DARREN", "SSP BRANCH"),
                Person::new(3, "REC NICHOLAS", "SSP BRANCH"),
            ],
        )
    }
}

#[async_trait]
impl Directory for StaticDirectory {
    async fn branches(&self) -> Result<Vec<Branch>> {
        Ok(self.branches.clone())
    }

    async fn personnel(&self) -> Result<Vec<Person>> {
        Ok(self.personnel.clone())
    }

    fn kind(&self) -> &'static str {
        "static"
    }
}

/// Picks the directory for `config`: the external REST source when fully
/// configured, otherwise the sample directory after logging what is missing.
pub fn connect(config: &DirectoryConfig) -> Result<Arc<dyn Directory>> {
    let warnings = config.warnings();
    if warnings.is_empty() {
        let directory = RestDirectory::new(config)?;
        info!(url = %config.directory_url.trim(), "using external personnel directory");
        return Ok(Arc::new(directory));
    }

    for warning in warnings {
        warn!("{warning}");
    }
    warn!("falling back to built-in sample directory");
    Ok(Arc::new(StaticDirectory::sample()))
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
