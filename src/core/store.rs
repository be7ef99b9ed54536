use crate::core::filter::{dedup_by_id, visible_indices, FilterState, ResultTab};
use crate::core::query::PageQuery;
use crate::core::view_model::{to_card, CardViewModel};
use crate::domain::model::{
    Partner, PartnerType, SearchRequest, SortOrder, DEFAULT_LIMIT, DEFAULT_PAGE, DEFAULT_SORT_BY,
};
use crate::domain::normalize::NormalizedPartner;

/// What an update changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    /// Only client-side narrowing changed; the held list was re-filtered.
    Refiltered,
    /// A parameter the API filters on changed; the caller should fetch again.
    NeedsFetch,
}

/// Owns the search page state: the query (server-side parameters plus client
/// filters), the current partner list and the derived visible subset.
///
/// Every setter is synchronous and last-write-wins. After each one the query
/// string and the visible list are already up to date.
#[derive(Debug, Clone)]
pub struct FilterStore {
    query: PageQuery,
    page: u32,
    limit: u32,
    partners: Vec<NormalizedPartner>,
    visible: Vec<usize>,
    query_string: String,
}

impl Default for FilterStore {
    fn default() -> Self {
        Self::new(PageQuery::default())
    }
}

impl FilterStore {
    pub fn new(query: PageQuery) -> Self {
        let query_string = query.to_query_string();
        Self {
            query,
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            partners: Vec::new(),
            visible: Vec::new(),
            query_string,
        }
    }

    /// Restores state from a URL query string.
    pub fn from_query_string(query: &str) -> Self {
        Self::new(PageQuery::parse(query))
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit.max(1);
        self
    }

    pub fn query(&self) -> &PageQuery {
        &self.query
    }

    pub fn filters(&self) -> &FilterState {
        &self.query.filters
    }

    pub fn query_string(&self) -> &str {
        &self.query_string
    }

    pub fn search_request(&self) -> SearchRequest {
        self.query.to_search_request(self.page, self.limit)
    }

    pub fn partners(&self) -> &[NormalizedPartner] {
        &self.partners
    }

    pub fn visible(&self) -> impl Iterator<Item = &NormalizedPartner> + '_ {
        self.visible.iter().map(|&i| &self.partners[i])
    }

    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    /// Cards for the visible partners on `tab`, in list order.
    pub fn cards(&self, tab: ResultTab) -> Vec<CardViewModel> {
        self.visible()
            .filter(|p| tab.includes(p))
            .map(to_card)
            .collect()
    }

    pub fn set_budget_percent(&mut self, percent: u8) -> Change {
        self.update_filters(|f| f.with_budget_percent(percent))
    }

    pub fn set_min_rating(&mut self, rating: f64) -> Change {
        self.update_filters(|f| f.with_min_rating(rating))
    }

    pub fn toggle_partner_type(&mut self, partner_type: PartnerType) -> Change {
        self.update_filters(|f| f.toggle_partner_type(partner_type))
    }

    pub fn set_partner_types(&mut self, types: impl IntoIterator<Item = PartnerType>) -> Change {
        let types: Vec<PartnerType> = types.into_iter().collect();
        self.update_filters(|f| f.with_partner_types(types))
    }

    pub fn set_location(&mut self, location: Option<String>) -> Change {
        self.query.location = blank_to_none(location);
        self.server_side_changed()
    }

    pub fn set_specialization(&mut self, specialization: Option<String>) -> Change {
        self.query.specialization = blank_to_none(specialization);
        self.server_side_changed()
    }

    pub fn set_price_range(&mut self, min_price: Option<u64>, max_price: Option<u64>) -> Change {
        self.query.min_price = min_price;
        self.query.max_price = max_price;
        self.server_side_changed()
    }

    /// A blank `sort_by` falls back to the default sort field.
    pub fn set_sort(&mut self, sort_by: impl Into<String>, sort_order: SortOrder) -> Change {
        self.query.sort_by =
            blank_to_none(Some(sort_by.into())).unwrap_or_else(|| DEFAULT_SORT_BY.to_string());
        self.query.sort_order = sort_order;
        self.server_side_changed()
    }

    pub fn set_page(&mut self, page: u32) -> Change {
        self.page = page.max(1);
        Change::NeedsFetch
    }

    /// Back to the page defaults: no filters, best rated first.
    pub fn clear(&mut self) -> Change {
        self.query = PageQuery::default();
        self.page = DEFAULT_PAGE;
        self.server_side_changed()
    }

    /// Swaps in a freshly fetched list. The previous list is discarded, never
    /// merged, and duplicates by id are dropped.
    pub fn replace_partners(&mut self, partners: Vec<Partner>) {
        self.partners = dedup_by_id(partners)
            .into_iter()
            .map(NormalizedPartner::from)
            .collect();
        self.refilter();
    }

    pub fn clear_partners(&mut self) {
        self.partners.clear();
        self.visible.clear();
    }

    fn update_filters(&mut self, update: impl FnOnce(FilterState) -> FilterState) -> Change {
        let current = std::mem::take(&mut self.query.filters);
        self.query.filters = update(current);
        self.query_string = self.query.to_query_string();
        self.refilter();
        Change::Refiltered
    }

    fn server_side_changed(&mut self) -> Change {
        self.query_string = self.query.to_query_string();
        self.refilter();
        Change::NeedsFetch
    }

    fn refilter(&mut self) {
        self.visible = visible_indices(&self.partners, &self.query.filters);
        tracing::debug!(
            "{} of {} partners visible (query: '{}')",
            self.visible.len(),
            self.partners.len(),
            self.query_string
        );
    }
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
