use crate::core::filter::ResultTab;
use crate::core::orchestrator::{FetchOrchestrator, FetchState};
use crate::core::profile::ProfileView;
use crate::core::store::{Change, FilterStore};
use crate::core::view_model::CardViewModel;
use crate::domain::model::Pagination;
use crate::domain::normalize::NormalizedPartner;
use crate::domain::ports::PartnerApi;
use crate::utils::error::Result;

/// Controller for the search results page. Owns the filter store and the
/// fetch orchestrator and keeps the store's list in step with fetch results.
pub struct SearchPage<A: PartnerApi> {
    store: FilterStore,
    orchestrator: FetchOrchestrator<A>,
}

impl<A: PartnerApi> SearchPage<A> {
    pub fn new(api: A, store: FilterStore) -> Self {
        Self {
            store,
            orchestrator: FetchOrchestrator::new(api),
        }
    }

    pub fn store(&self) -> &FilterStore {
        &self.store
    }

    pub fn state(&self) -> &FetchState {
        self.orchestrator.state()
    }

    pub fn pagination(&self) -> Option<&Pagination> {
        match self.orchestrator.state() {
            FetchState::Success { pagination, .. } => pagination.as_ref(),
            _ => None,
        }
    }

    /// Fetches the listing for the current query and swaps it into the store.
    /// A failed fetch leaves the page empty with the error on [`Self::state`].
    pub async fn load(&mut self) -> &FetchState {
        let request = self.store.search_request();
        self.orchestrator.fetch(request).await;
        self.sync_from_fetch();
        self.orchestrator.state()
    }

    /// [`Self::load`] with a failed fetch returned as the underlying error.
    /// The page is left in the same state either way.
    pub async fn load_or_error(&mut self) -> Result<()> {
        self.load().await;
        match self.orchestrator.take_error() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Re-issues the last request ("Try Again").
    pub async fn retry(&mut self) -> &FetchState {
        if self.orchestrator.retry().await.is_none() {
            return self.load().await;
        }
        self.sync_from_fetch();
        self.orchestrator.state()
    }

    /// Applies `update` to the store and fetches again when it touched a
    /// server-side parameter.
    pub async fn update(&mut self, update: impl FnOnce(&mut FilterStore) -> Change) -> Change {
        let change = update(&mut self.store);
        if change == Change::NeedsFetch {
            self.load().await;
        }
        change
    }

    pub fn cards(&self, tab: ResultTab) -> Vec<CardViewModel> {
        self.store.cards(tab)
    }

    /// Header line above the results.
    pub fn summary(&self) -> String {
        if self.orchestrator.state().is_loading() {
            "Loading...".to_string()
        } else {
            format!("{} results found", self.store.visible_count())
        }
    }

    /// Profile for a partner, fetched individually.
    pub async fn profile(&self, id: &str) -> Result<ProfileView> {
        let partner = self.orchestrator.api().get_partner(id).await?;
        Ok(ProfileView::from(&NormalizedPartner::from(partner)))
    }

    fn sync_from_fetch(&mut self) {
        match self.orchestrator.state() {
            FetchState::Success { partners, .. } => {
                self.store.replace_partners(partners.clone());
            }
            FetchState::Error { .. } => self.store.clear_partners(),
            FetchState::Idle | FetchState::Loading => {}
        }
    }
}
