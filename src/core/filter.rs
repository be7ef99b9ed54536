use crate::domain::model::{Partner, PartnerType};
use crate::domain::normalize::NormalizedPartner;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

/// Price at the left end of the budget slider.
pub const BUDGET_FLOOR: f64 = 10_000.0;
/// Price at the right end of the budget slider.
pub const BUDGET_CEILING: f64 = 1_000_000.0;
pub const MAX_BUDGET_PERCENT: u8 = 100;
pub const MAX_RATING: f64 = 5.0;

/// Client-side criteria applied to an already fetched partner list.
///
/// Fields are private so that every value stays inside its domain: the budget
/// slider in `0..=100`, the rating in `[0, 5]`. Updates are pure and return a
/// new state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    budget_percent: u8,
    min_rating: f64,
    partner_types: BTreeSet<PartnerType>,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            budget_percent: MAX_BUDGET_PERCENT,
            min_rating: 0.0,
            partner_types: BTreeSet::new(),
        }
    }
}

impl FilterState {
    pub fn budget_percent(&self) -> u8 {
        self.budget_percent
    }

    pub fn min_rating(&self) -> f64 {
        self.min_rating
    }

    pub fn partner_types(&self) -> &BTreeSet<PartnerType> {
        &self.partner_types
    }

    pub fn is_default(&self) -> bool {
        *self == FilterState::default()
    }

    pub fn with_budget_percent(mut self, percent: u8) -> Self {
        self.budget_percent = percent.min(MAX_BUDGET_PERCENT);
        self
    }

    pub fn with_min_rating(mut self, rating: f64) -> Self {
        self.min_rating = if rating.is_finite() {
            rating.clamp(0.0, MAX_RATING)
        } else {
            0.0
        };
        self
    }

    pub fn with_partner_types<I>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = PartnerType>,
    {
        self.partner_types = types.into_iter().collect();
        self
    }

    /// Adds the type if absent, removes it otherwise.
    pub fn toggle_partner_type(mut self, partner_type: PartnerType) -> Self {
        if !self.partner_types.remove(&partner_type) {
            self.partner_types.insert(partner_type);
        }
        self
    }

    /// Highest headline price the current slider position allows, interpolated
    /// linearly between [`BUDGET_FLOOR`] and [`BUDGET_CEILING`].
    pub fn max_allowed_price(&self) -> f64 {
        BUDGET_FLOOR + (f64::from(self.budget_percent) / 100.0) * (BUDGET_CEILING - BUDGET_FLOOR)
    }

    /// Predicate deciding whether `partner` stays visible.
    ///
    /// Rating is "at least N stars". A missing rating, or a rating of exactly
    /// zero (unrated), never excludes. Partners without services are
    /// "contact for pricing" and pass the budget check.
    pub fn matches(&self, partner: &NormalizedPartner) -> bool {
        if let Some(rating) = partner.avg_rating.filter(|r| *r > 0.0) {
            if rating < self.min_rating {
                return false;
            }
        }

        if !self.partner_types.is_empty() {
            // 未知或缺少類型的夥伴不屬於任何已選類型
            match partner.partner_type {
                Some(partner_type) if self.partner_types.contains(&partner_type) => {}
                _ => return false,
            }
        }

        if let Some(price) = partner.headline_price() {
            if price > self.max_allowed_price() {
                return false;
            }
        }

        true
    }
}

/// Which slice of the results is shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultTab {
    #[default]
    All,
    Photographers,
    Studios,
}

impl ResultTab {
    pub fn includes(&self, partner: &NormalizedPartner) -> bool {
        match self {
            ResultTab::All => true,
            ResultTab::Photographers => !partner.is_studio(),
            ResultTab::Studios => partner.is_studio(),
        }
    }
}

impl std::str::FromStr for ResultTab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(ResultTab::All),
            "photographers" => Ok(ResultTab::Photographers),
            "studios" => Ok(ResultTab::Studios),
            other => Err(format!(
                "unknown tab '{}', expected all, photographers or studios",
                other
            )),
        }
    }
}

/// Drops later records whose `id` was already seen, keeping first-seen order.
/// Records with an empty id are dropped too.
pub fn dedup_by_id(partners: Vec<Partner>) -> Vec<Partner> {
    let mut seen = HashSet::new();
    partners
        .into_iter()
        .filter(|p| !p.id.is_empty() && seen.insert(p.id.clone()))
        .collect()
}

/// Positions in `partners` that pass `state`.
pub fn visible_indices(partners: &[NormalizedPartner], state: &FilterState) -> Vec<usize> {
    partners
        .iter()
        .enumerate()
        .filter(|(_, p)| state.matches(p))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn normalized(value: serde_json::Value) -> NormalizedPartner {
        NormalizedPartner::from(serde_json::from_value::<Partner>(value).unwrap())
    }

    fn stellar() -> NormalizedPartner {
        normalized(json!({
            "_id": "1",
            "companyName": "Stellar Photography Studio",
            "partnerType": "studio",
            "avgRating": 4.9,
            "servingLocations": ["Mumbai", "Pune"],
            "services": [{"name": "Wedding - Basic", "basePrice": 75000, "priceUnit": "per_day"}]
        }))
    }

    #[test]
    fn test_studio_passes_matching_filters() {
        let state = FilterState::default()
            .with_min_rating(4.5)
            .with_partner_types([PartnerType::Studio])
            .with_budget_percent(100);
        assert!(state.matches(&stellar()));
    }

    #[test]
    fn test_type_mismatch_excludes() {
        let state = FilterState::default().with_partner_types([PartnerType::Solo]);
        assert!(!state.matches(&stellar()));
    }

    #[test]
    fn test_untyped_partner_fails_any_type_filter() {
        let missing = normalized(json!({"_id": "m"}));
        let agency = normalized(json!({"_id": "g", "partnerType": "agency"}));
        let solo_only = FilterState::default().with_partner_types([PartnerType::Solo]);
        assert!(!solo_only.matches(&missing));
        assert!(!solo_only.matches(&agency));

        let every_type = FilterState::default().with_partner_types(PartnerType::ALL);
        assert!(!every_type.matches(&agency));

        assert!(FilterState::default().matches(&missing));
        assert!(FilterState::default().matches(&agency));
        assert!(ResultTab::Photographers.includes(&agency));
    }

    #[test]
    fn test_empty_type_set_accepts_every_type() {
        let state = FilterState::default();
        for partner_type in PartnerType::ALL {
            let p = normalized(json!({"_id": "t", "partnerType": partner_type.as_str()}));
            assert!(state.matches(&p), "{} should pass", partner_type);
        }
    }

    #[test]
    fn test_rating_is_lower_bound() {
        let p = normalized(json!({"_id": "r", "avgRating": 3.9}));
        assert!(FilterState::default().with_min_rating(3.5).matches(&p));
        assert!(!FilterState::default().with_min_rating(4.0).matches(&p));
    }

    #[test]
    fn test_unrated_partner_ignores_rating_filter() {
        let missing = normalized(json!({"_id": "a"}));
        let zero = normalized(json!({"_id": "b", "avgRating": 0}));
        let state = FilterState::default().with_min_rating(5.0);
        assert!(state.matches(&missing));
        assert!(state.matches(&zero));
    }

    #[test]
    fn test_budget_interpolation() {
        assert_eq!(FilterState::default().with_budget_percent(0).max_allowed_price(), 10_000.0);
        assert_eq!(FilterState::default().with_budget_percent(50).max_allowed_price(), 505_000.0);
        assert_eq!(FilterState::default().max_allowed_price(), 1_000_000.0);

        let state = FilterState::default().with_budget_percent(6);
        // 10_000 + 0.06 * 990_000 = 69_400
        assert!(!state.matches(&stellar()));
        assert!(FilterState::default().with_budget_percent(7).matches(&stellar()));
    }

    #[test]
    fn test_partner_without_services_survives_any_budget() {
        let p = normalized(json!({"_id": "c", "services": []}));
        assert!(FilterState::default().with_budget_percent(0).matches(&p));
    }

    #[test]
    fn test_updates_clamp_to_domain() {
        let state = FilterState::default()
            .with_budget_percent(250)
            .with_min_rating(9.0);
        assert_eq!(state.budget_percent(), 100);
        assert_eq!(state.min_rating(), 5.0);
        assert_eq!(FilterState::default().with_min_rating(-1.0).min_rating(), 0.0);
        assert_eq!(FilterState::default().with_min_rating(f64::NAN).min_rating(), 0.0);
    }

    #[test]
    fn test_toggle_partner_type() {
        let state = FilterState::default().toggle_partner_type(PartnerType::Firm);
        assert!(state.partner_types().contains(&PartnerType::Firm));
        let state = state.toggle_partner_type(PartnerType::Firm);
        assert!(state.is_default());
    }

    #[test]
    fn test_dedup_keeps_first_occurrence_in_order() {
        let list: Vec<Partner> = serde_json::from_value(json!([
            {"_id": "b", "companyName": "first b"},
            {"_id": "a"},
            {"_id": "b", "companyName": "second b"},
            {"_id": ""},
            {"_id": "c"},
            {"_id": "a"}
        ]))
        .unwrap();

        let unique = dedup_by_id(list);
        let ids: Vec<&str> = unique.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
        assert_eq!(unique[0].display_name.as_deref(), Some("first b"));
    }

    #[test]
    fn test_tabs_split_studios() {
        let solo = normalized(json!({"_id": "s", "partnerType": "solo"}));
        assert!(ResultTab::Photographers.includes(&solo));
        assert!(!ResultTab::Studios.includes(&solo));
        assert!(ResultTab::Studios.includes(&stellar()));
        assert!(ResultTab::All.includes(&stellar()));
    }
}
