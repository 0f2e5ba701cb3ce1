use crate::domain::{
    error::ApiError,
    models::{CreateRequest, CreatedLink, StatsSnapshot},
};

/// Remote operations the dashboard depends on.
pub trait LinksApi {
    async fn create(&self, request: &CreateRequest) -> Result<CreatedLink, ApiError>;

    async fn delete(&self, code: &str) -> Result<(), ApiError>;

    async fn fetch_stats(&self) -> Result<StatsSnapshot, ApiError>;
}
