use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Partner kind as reported by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartnerType {
    Studio,
    Solo,
    Firm,
    Partnership,
}

impl PartnerType {
    pub const ALL: [PartnerType; 4] = [
        PartnerType::Studio,
        PartnerType::Solo,
        PartnerType::Firm,
        PartnerType::Partnership,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PartnerType::Studio => "studio",
            PartnerType::Solo => "solo",
            PartnerType::Firm => "firm",
            PartnerType::Partnership => "partnership",
        }
    }
}

impl FromStr for PartnerType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        PartnerType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| {
                format!(
                    "unknown partner type '{}', expected one of: studio, solo, firm, partnership",
                    s
                )
            })
    }
}

/// Reads `partnerType` case-insensitively. A value outside the known set is
/// kept as absent so type filters can reject it.
fn lenient_partner_type<'de, D>(deserializer: D) -> Result<Option<PartnerType>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|value| match value.parse() {
        Ok(partner_type) => Some(partner_type),
        Err(e) => {
            tracing::debug!("Unrecognized partnerType: {}", e);
            None
        }
    }))
}

impl fmt::Display for PartnerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub base_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_unit: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectStats {
    pub total: u32,
    pub completed: u32,
    pub ongoing: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerUser {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub profile_pic: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerLocation {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
    #[serde(default)]
    pub pin_codes_served: Option<Vec<String>>,
}

/// Partner record exactly as the API returns it. Every field beyond `_id` may be
/// missing or null; see [`crate::domain::normalize`] for the defaulted form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Partner {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "companyName", default)]
    pub display_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_partner_type")]
    pub partner_type: Option<PartnerType>,
    #[serde(default)]
    pub avg_rating: Option<f64>,
    #[serde(default)]
    pub total_reviews: Option<u32>,
    #[serde(default)]
    pub specializations: Option<Vec<String>>,
    #[serde(default)]
    pub serving_locations: Option<Vec<String>>,
    #[serde(default)]
    pub partner_locations: Option<Vec<PartnerLocation>>,
    #[serde(default)]
    pub services: Option<Vec<Service>>,
    #[serde(default)]
    pub portfolio: Option<Vec<String>>,
    #[serde(default)]
    pub banner: Option<String>,
    #[serde(default)]
    pub experience_years: Option<u32>,
    #[serde(default)]
    pub verified: Option<bool>,
    #[serde(default)]
    pub project_stats: Option<ProjectStats>,
    #[serde(default)]
    pub user: Option<PartnerUser>,
    #[serde(default)]
    pub social_links: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub completion_rate: Option<f64>,
    #[serde(default)]
    pub has_location_pricing: Option<bool>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_items: u64,
    pub items_per_page: u32,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

/// `{ success, data, message }` wrapper used by every endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PartnersData {
    #[serde(default)]
    pub partners: Vec<Partner>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PartnerData {
    pub partner: Option<Partner>,
}

/// One page of listing results.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartnerPage {
    pub partners: Vec<Partner>,
    pub pagination: Option<Pagination>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(format!("unknown sort order '{}', expected asc or desc", other)),
        }
    }
}

pub const DEFAULT_SORT_BY: &str = "avgRating";
pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 20;

/// Parameters of one `GET /partners` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub location: Option<String>,
    pub specialization: Option<String>,
    pub partner_type: Option<PartnerType>,
    pub min_rating: Option<f64>,
    pub min_price: Option<u64>,
    pub max_price: Option<u64>,
    pub page: u32,
    pub limit: u32,
    pub sort_by: String,
    pub sort_order: SortOrder,
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self {
            location: None,
            specialization: None,
            partner_type: None,
            min_rating: None,
            min_price: None,
            max_price: None,
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            sort_by: DEFAULT_SORT_BY.to_string(),
            sort_order: SortOrder::Desc,
        }
    }
}

impl SearchRequest {
    /// Query pairs in the order the listing endpoint documents them; unset
    /// optional parameters are left out.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(location) = non_blank(&self.location) {
            pairs.push(("location", location.to_string()));
        }
        if let Some(specialization) = non_blank(&self.specialization) {
            pairs.push(("specialization", specialization.to_string()));
        }
        if let Some(partner_type) = self.partner_type {
            pairs.push(("partnerType", partner_type.to_string()));
        }
        if let Some(min_rating) = self.min_rating {
            pairs.push(("minRating", min_rating.to_string()));
        }
        if let Some(min_price) = self.min_price {
            pairs.push(("minPrice", min_price.to_string()));
        }
        if let Some(max_price) = self.max_price {
            pairs.push(("maxPrice", max_price.to_string()));
        }
        pairs.push(("page", self.page.to_string()));
        pairs.push(("limit", self.limit.to_string()));
        pairs.push(("sortBy", self.sort_by.clone()));
        pairs.push(("sortOrder", self.sort_order.as_str().to_string()));
        pairs
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partner_type_is_case_insensitive() {
        assert_eq!("Studio".parse::<PartnerType>(), Ok(PartnerType::Studio));
        assert_eq!(" FIRM ".parse::<PartnerType>(), Ok(PartnerType::Firm));
        assert!("agency".parse::<PartnerType>().is_err());
    }

    #[test]
    fn test_partner_deserializes_sparse_record() {
        let partner: Partner = serde_json::from_value(serde_json::json!({
            "_id": "p-1",
            "companyName": "Lens Lab",
            "partnerType": "STUDIO",
            "specializations": null,
            "services": [{"name": "Basic", "basePrice": 15000, "priceUnit": "per_day"}]
        }))
        .unwrap();

        assert_eq!(partner.id, "p-1");
        assert_eq!(partner.partner_type, Some(PartnerType::Studio));
        assert_eq!(partner.specializations, None);
        assert_eq!(partner.services.unwrap()[0].base_price, 15000.0);
    }

    #[test]
    fn test_unknown_partner_type_reads_as_absent() {
        let partner: Partner =
            serde_json::from_value(serde_json::json!({"_id": "p-2", "partnerType": "agency"}))
                .unwrap();
        assert_eq!(partner.partner_type, None);

        let partner: Partner =
            serde_json::from_value(serde_json::json!({"_id": "p-3", "partnerType": null}))
                .unwrap();
        assert_eq!(partner.partner_type, None);
    }

    #[test]
    fn test_search_request_query_pairs_skip_unset() {
        let request = SearchRequest {
            location: Some("Mumbai".to_string()),
            specialization: Some("  ".to_string()),
            ..SearchRequest::default()
        };
        let keys: Vec<&str> = request.to_query_pairs().iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec!["location", "page", "limit", "sortBy", "sortOrder"]);
    }
}
