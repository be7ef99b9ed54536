use crate::domain::lead::LeadPayload;
use crate::domain::model::{Partner, PartnerPage, SearchRequest};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiStatus {
    Online,
    Offline,
}

impl ApiStatus {
    /// Badge text shown next to the result list.
    pub fn label(&self) -> &'static str {
        match self {
            ApiStatus::Online => "Live Data",
            ApiStatus::Offline => "Demo Mode",
        }
    }
}

/// Remote partner directory. `HttpPartnerApi` is the production implementation;
/// tests substitute in-memory doubles.
#[async_trait]
pub trait PartnerApi: Send + Sync {
    async fn list_partners(&self, request: &SearchRequest) -> Result<PartnerPage>;
    async fn get_partner(&self, id: &str) -> Result<Partner>;
    async fn create_lead(&self, lead: &LeadPayload) -> Result<()>;
    async fn health_check(&self) -> ApiStatus;
}

pub trait ConfigProvider: Send + Sync {
    fn api_base(&self) -> &str;
    fn timeout(&self) -> Duration;
    fn user_agent(&self) -> &str;
    fn default_limit(&self) -> u32;
}
