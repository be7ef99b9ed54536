use crate::domain::model::{Pagination, Partner, PartnerPage, SearchRequest};
use crate::domain::ports::PartnerApi;
use crate::utils::error::{ClientError, Result};

/// Lifecycle of the partner listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FetchState {
    #[default]
    Idle,
    Loading,
    Success {
        partners: Vec<Partner>,
        pagination: Option<Pagination>,
    },
    Error {
        message: String,
    },
}

impl FetchState {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn partners(&self) -> &[Partner] {
        match self {
            FetchState::Success { partners, .. } => partners,
            _ => &[],
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            FetchState::Error { message } => Some(message),
            _ => None,
        }
    }
}

/// Handle for one issued request. Only the most recently issued ticket may
/// update the state.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchTicket {
    seq: u64,
    request: SearchRequest,
}

impl FetchTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn request(&self) -> &SearchRequest {
        &self.request
    }
}

/// Issues listing requests and tracks `Idle → Loading → Success | Error`.
///
/// Overlapping requests are gated by sequence number: a response that arrives
/// after a newer request was issued is dropped, whatever order the network
/// delivers them in. There is no automatic retry; [`FetchOrchestrator::retry`]
/// re-issues the last request on demand.
pub struct FetchOrchestrator<A: PartnerApi> {
    api: A,
    state: FetchState,
    latest_seq: u64,
    last_request: Option<SearchRequest>,
    last_error: Option<ClientError>,
}

impl<A: PartnerApi> FetchOrchestrator<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: FetchState::Idle,
            latest_seq: 0,
            last_request: None,
            last_error: None,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn state(&self) -> &FetchState {
        &self.state
    }

    pub fn last_request(&self) -> Option<&SearchRequest> {
        self.last_request.as_ref()
    }

    /// Error behind the current `Error` state, if not taken yet.
    pub fn take_error(&mut self) -> Option<ClientError> {
        self.last_error.take()
    }

    /// Marks a new request as in flight and supersedes any earlier ticket.
    pub fn begin(&mut self, request: SearchRequest) -> FetchTicket {
        self.latest_seq += 1;
        self.last_error = None;
        self.state = FetchState::Loading;
        self.last_request = Some(request.clone());
        tracing::debug!("Fetch #{} started: {:?}", self.latest_seq, request);
        FetchTicket {
            seq: self.latest_seq,
            request,
        }
    }

    /// Applies the outcome of `ticket`. Returns `false` when the ticket was
    /// superseded and the outcome was discarded.
    pub fn complete(&mut self, ticket: &FetchTicket, outcome: Result<PartnerPage>) -> bool {
        if ticket.seq != self.latest_seq {
            tracing::debug!(
                "Dropping stale response #{} (latest is #{})",
                ticket.seq,
                self.latest_seq
            );
            return false;
        }

        self.state = match outcome {
            Ok(page) => {
                tracing::info!("Loaded {} partners", page.partners.len());
                FetchState::Success {
                    partners: page.partners,
                    pagination: page.pagination,
                }
            }
            Err(e) => {
                tracing::warn!(
                    "Partner search failed: {} (Category: {:?})",
                    e,
                    e.category()
                );
                let message = e.user_friendly_message();
                self.last_error = Some(e);
                FetchState::Error { message }
            }
        };
        true
    }

    /// Issues `request` and waits for it.
    pub async fn fetch(&mut self, request: SearchRequest) -> &FetchState {
        let ticket = self.begin(request);
        let outcome = self.api.list_partners(ticket.request()).await;
        self.complete(&ticket, outcome);
        &self.state
    }

    /// The "Try Again" action. `None` when nothing was requested yet.
    pub async fn retry(&mut self) -> Option<&FetchState> {
        let request = self.last_request.clone()?;
        tracing::info!("Retrying last partner search");
        Some(self.fetch(request).await)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domain::lead::LeadPayload;
    use crate::domain::ports::ApiStatus;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    /// Replays scripted listing outcomes in order and records every request.
    #[derive(Clone, Default)]
    pub(crate) struct ScriptedApi {
        outcomes: Arc<Mutex<VecDeque<Result<PartnerPage>>>>,
        pub(crate) requests: Arc<Mutex<Vec<SearchRequest>>>,
        pub(crate) leads: Arc<Mutex<Vec<LeadPayload>>>,
    }

    impl ScriptedApi {
        pub(crate) fn push(&self, outcome: Result<PartnerPage>) {
            self.outcomes.lock().unwrap().push_back(outcome);
        }
    }

    #[async_trait]
    impl PartnerApi for ScriptedApi {
        async fn list_partners(&self, request: &SearchRequest) -> Result<PartnerPage> {
            self.requests.lock().unwrap().push(request.clone());
            self.outcomes
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(PartnerPage::default()))
        }

        async fn get_partner(&self, id: &str) -> Result<Partner> {
            Err(ClientError::NotFound { id: id.to_string() })
        }

        async fn create_lead(&self, lead: &LeadPayload) -> Result<()> {
            self.leads.lock().unwrap().push(lead.clone());
            Ok(())
        }

        async fn health_check(&self) -> ApiStatus {
            ApiStatus::Online
        }
    }

    pub(crate) fn page_of(ids: &[&str]) -> PartnerPage {
        let partners = ids
            .iter()
            .map(|id| serde_json::from_value(serde_json::json!({ "_id": id })).unwrap())
            .collect();
        PartnerPage {
            partners,
            pagination: None,
        }
    }

    fn server_error() -> ClientError {
        ClientError::ApiError {
            status: 500,
            message: "Internal Server Error".to_string(),
        }
    }

    #[test]
    fn test_success_then_error_clears_list() {
        let api = ScriptedApi::default();
        api.push(Ok(page_of(&["a", "b"])));
        api.push(Err(server_error()));
        let mut orchestrator = FetchOrchestrator::new(api);
        assert_eq!(orchestrator.state(), &FetchState::Idle);

        let state = tokio_test::block_on(orchestrator.fetch(SearchRequest::default()));
        assert_eq!(state.partners().len(), 2);

        let state = tokio_test::block_on(orchestrator.fetch(SearchRequest::default()));
        assert!(state.partners().is_empty());
        assert_eq!(state.error_message(), Some("Server Error: Internal Server Error"));
    }

    #[test]
    fn test_stale_response_is_dropped() {
        let mut orchestrator = FetchOrchestrator::new(ScriptedApi::default());

        let slow = orchestrator.begin(SearchRequest {
            location: Some("Delhi".to_string()),
            ..SearchRequest::default()
        });
        let fast = orchestrator.begin(SearchRequest {
            location: Some("Pune".to_string()),
            ..SearchRequest::default()
        });
        assert!(orchestrator.state().is_loading());

        assert!(orchestrator.complete(&fast, Ok(page_of(&["pune-1"]))));
        assert!(!orchestrator.complete(&slow, Ok(page_of(&["delhi-1", "delhi-2"]))));

        assert_eq!(orchestrator.state().partners().len(), 1);
        assert_eq!(orchestrator.state().partners()[0].id, "pune-1");
    }

    #[test]
    fn test_stale_error_does_not_clobber_newer_success() {
        let mut orchestrator = FetchOrchestrator::new(ScriptedApi::default());
        let first = orchestrator.begin(SearchRequest::default());
        let second = orchestrator.begin(SearchRequest::default());

        orchestrator.complete(&second, Ok(page_of(&["x"])));
        orchestrator.complete(&first, Err(server_error()));
        assert_eq!(orchestrator.state().error_message(), None);
        assert!(orchestrator.take_error().is_none());
    }

    #[test]
    fn test_failed_fetch_keeps_underlying_error() {
        let api = ScriptedApi::default();
        api.push(Err(server_error()));
        let mut orchestrator = FetchOrchestrator::new(api);

        tokio_test::block_on(orchestrator.fetch(SearchRequest::default()));
        assert!(matches!(
            orchestrator.take_error(),
            Some(ClientError::ApiError { status: 500, .. })
        ));
        assert!(orchestrator.take_error().is_none());
        assert!(orchestrator.state().error_message().is_some());

        orchestrator.begin(SearchRequest::default());
        assert!(orchestrator.take_error().is_none());
    }

    #[test]
    fn test_retry_reissues_last_request() {
        let api = ScriptedApi::default();
        api.push(Err(server_error()));
        api.push(Ok(page_of(&["a"])));
        let mut orchestrator = FetchOrchestrator::new(api.clone());

        assert!(tokio_test::block_on(orchestrator.retry()).is_none());

        let request = SearchRequest {
            specialization: Some("wedding_photography".to_string()),
            ..SearchRequest::default()
        };
        tokio_test::block_on(orchestrator.fetch(request.clone()));
        let state = tokio_test::block_on(orchestrator.retry()).unwrap();
        assert_eq!(state.partners().len(), 1);

        let requests = api.requests.lock().unwrap();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[1], request);
    }
}
