use std::sync::Arc;

use directory::Directory;
use shared::{
    domain::{sort_branches_by_name, sort_personnel_by_name, Branch, Person},
    error::{ApiError, ErrorCode},
};
use tracing::error;

#[derive(Clone)]
pub struct ApiContext {
    pub directory: Arc<dyn Directory>,
}

impl ApiContext {
    pub fn new(directory: Arc<dyn Directory>) -> Self {
        Self { directory }
    }
}

pub fn branches_route() -> &'static str {
    "/api/branches"
}

pub fn personnel_route() -> &'static str {
    "/api/personnel"
}

/// All branches, sorted by name.
pub async fn list_branches(ctx: &ApiContext) -> Result<Vec<Branch>, ApiError> {
    let mut branches = ctx
        .directory
        .branches()
        .await
        .map_err(|err| upstream("failed to fetch branches", err))?;
    sort_branches_by_name(&mut branches);
    Ok(branches)
}

/// All personnel across branches, sorted by name.
pub async fn list_personnel(ctx: &ApiContext) -> Result<Vec<Person>, ApiError> {
    let mut personnel = ctx
        .directory
        .personnel()
        .await
        .map_err(|err| upstream("failed to fetch personnel", err))?;
    sort_personnel_by_name(&mut personnel);
    Ok(personnel)
}

pub async fn check_health(ctx: &ApiContext) -> Result<(), ApiError> {
    ctx.directory.health_check().await.map_err(|err| {
        error!(kind = ctx.directory.kind(), error = %err, "directory health check failed");
        ApiError::new(ErrorCode::Unavailable, format!("directory unavailable: {err}"))
    })
}

fn upstream(context: &str, err: anyhow::Error) -> ApiError {
    error!(error = %err, "{context}");
    ApiError::new(ErrorCode::Upstream, format!("{context}: {err}"))
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
