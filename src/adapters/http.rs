use crate::domain::lead::LeadPayload;
use crate::domain::model::{ApiEnvelope, Partner, PartnerData, PartnerPage, PartnersData, SearchRequest};
use crate::domain::ports::{ApiStatus, ConfigProvider, PartnerApi};
use crate::utils::error::{ClientError, Result};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

/// `PartnerApi` over the Pixisphere REST endpoints.
#[derive(Debug, Clone)]
pub struct HttpPartnerApi {
    client: Client,
    base_url: String,
}

impl HttpPartnerApi {
    pub fn new(client: Client, base_url: &str) -> Result<Self> {
        // 先驗證格式，之後直接以字串拼接路徑
        Url::parse(base_url)?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent())
            .build()?;
        Self::new(client, config.api_base())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(Url::parse(&format!("{}/{}", self.base_url, path))?)
    }

    /// Reads the envelope, turning non-2xx statuses and `success: false` into
    /// `ApiError`. `fallback` is the message used when the server gave none.
    async fn read_envelope<T: DeserializeOwned>(response: Response, fallback: &str) -> Result<T> {
        let status = response.status();
        tracing::debug!("API response status: {}", status);
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ClientError::ApiError {
                status: status.as_u16(),
                message: server_message(&body)
                    .or_else(|| status.canonical_reason().map(str::to_string))
                    .unwrap_or_else(|| fallback.to_string()),
            });
        }

        let envelope: ApiEnvelope<T> = serde_json::from_str(&body)?;
        match envelope {
            ApiEnvelope {
                success: true,
                data: Some(data),
                ..
            } => Ok(data),
            ApiEnvelope { message, .. } => Err(ClientError::ApiError {
                status: status.as_u16(),
                message: message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| fallback.to_string()),
            }),
        }
    }
}

fn server_message(body: &str) -> Option<String> {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()?
        .get("message")?
        .as_str()
        .filter(|m| !m.trim().is_empty())
        .map(str::to_string)
}

#[async_trait]
impl PartnerApi for HttpPartnerApi {
    async fn list_partners(&self, request: &SearchRequest) -> Result<PartnerPage> {
        let url = self.endpoint("partners")?;
        tracing::debug!("Making API request to: {}", url);

        let response = self
            .client
            .get(url)
            .query(&request.to_query_pairs())
            .send()
            .await?;
        let data: PartnersData = Self::read_envelope(response, "No search results found").await?;

        Ok(PartnerPage {
            partners: data.partners,
            pagination: data.pagination,
        })
    }

    async fn get_partner(&self, id: &str) -> Result<Partner> {
        let mut url = self.endpoint("partners")?;
        url.path_segments_mut()
            .map_err(|_| ClientError::ConfigError {
                message: format!("API base URL cannot be a base: {}", self.base_url),
            })?
            .push(id);
        tracing::debug!("Making API request to: {}", url);

        let response = self.client.get(url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound { id: id.to_string() });
        }

        let data: PartnerData = Self::read_envelope(response, "Partner not found").await?;
        data.partner
            .ok_or_else(|| ClientError::NotFound { id: id.to_string() })
    }

    async fn create_lead(&self, lead: &LeadPayload) -> Result<()> {
        let url = self.endpoint("leads")?;
        tracing::debug!("Posting lead to: {}", url);

        let response = self.client.post(url).json(lead).send().await?;
        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(ClientError::ApiError {
            status: status.as_u16(),
            message: server_message(&body).unwrap_or_else(|| "Failed to create lead".to_string()),
        })
    }

    async fn health_check(&self) -> ApiStatus {
        let request = SearchRequest {
            limit: 1,
            ..SearchRequest::default()
        };
        match self.list_partners(&request).await {
            Ok(_) => ApiStatus::Online,
            Err(e) => {
                tracing::warn!("API health check failed: {}", e);
                ApiStatus::Offline
            }
        }
    }
}
