//! Search page state ⇄ URL query string.
//!
//! The query string is the only place the page persists its state. Keys:
//! `location`, `specialization`, `partnerType` (comma-joined), `minRating`,
//! `minPrice`, `maxPrice`, `budget` (slider percent), `sortBy`, `sortOrder`.
//! Values equal to their defaults are not written.

use crate::core::filter::FilterState;
use crate::domain::model::{PartnerType, SearchRequest, SortOrder, DEFAULT_SORT_BY};
use serde::Serialize;
use url::form_urlencoded;

/// Built through [`PageQuery::parse`] or the store setters, never deserialized,
/// so the filter clamping always applies.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    pub location: Option<String>,
    pub specialization: Option<String>,
    pub min_price: Option<u64>,
    pub max_price: Option<u64>,
    pub sort_by: String,
    pub sort_order: SortOrder,
    pub filters: FilterState,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            location: None,
            specialization: None,
            min_price: None,
            max_price: None,
            sort_by: DEFAULT_SORT_BY.to_string(),
            sort_order: SortOrder::Desc,
            filters: FilterState::default(),
        }
    }
}

impl PageQuery {
    pub fn to_query_string(&self) -> String {
        let mut out = form_urlencoded::Serializer::new(String::new());

        if let Some(location) = &self.location {
            out.append_pair("location", location);
        }
        if let Some(specialization) = &self.specialization {
            out.append_pair("specialization", specialization);
        }
        if !self.filters.partner_types().is_empty() {
            let joined = self
                .filters
                .partner_types()
                .iter()
                .map(PartnerType::as_str)
                .collect::<Vec<_>>()
                .join(",");
            out.append_pair("partnerType", &joined);
        }
        if self.filters.min_rating() > 0.0 {
            out.append_pair("minRating", &self.filters.min_rating().to_string());
        }
        if let Some(min_price) = self.min_price {
            out.append_pair("minPrice", &min_price.to_string());
        }
        if let Some(max_price) = self.max_price {
            out.append_pair("maxPrice", &max_price.to_string());
        }
        if self.filters.budget_percent() != FilterState::default().budget_percent() {
            out.append_pair("budget", &self.filters.budget_percent().to_string());
        }
        if self.sort_by != DEFAULT_SORT_BY {
            out.append_pair("sortBy", &self.sort_by);
        }
        if self.sort_order != SortOrder::default() {
            out.append_pair("sortOrder", self.sort_order.as_str());
        }

        out.finish()
    }

    /// Parses a query string, with or without the leading `?`. Unknown keys are
    /// ignored; malformed values keep their default and are logged.
    pub fn parse(query: &str) -> Self {
        let mut page = PageQuery::default();
        let mut filters = FilterState::default();

        for (key, value) in form_urlencoded::parse(query.trim_start_matches('?').as_bytes()) {
            let value = value.trim();
            if value.is_empty() {
                continue;
            }

            match &*key {
                "location" => page.location = Some(value.to_string()),
                "specialization" => page.specialization = Some(value.to_string()),
                "partnerType" => {
                    let types: Vec<PartnerType> = value
                        .split(',')
                        .filter(|t| !t.trim().is_empty())
                        .filter_map(|t| match t.parse::<PartnerType>() {
                            Ok(partner_type) => Some(partner_type),
                            Err(e) => {
                                tracing::warn!("Ignoring partnerType value: {}", e);
                                None
                            }
                        })
                        .collect();
                    filters = filters.with_partner_types(types);
                }
                "minRating" => match value.parse::<f64>() {
                    Ok(rating) => filters = filters.with_min_rating(rating),
                    Err(_) => tracing::warn!("Ignoring malformed minRating '{}'", value),
                },
                "minPrice" => page.min_price = parse_amount("minPrice", value),
                "maxPrice" => page.max_price = parse_amount("maxPrice", value),
                "budget" => match value.parse::<u8>() {
                    Ok(percent) => filters = filters.with_budget_percent(percent),
                    Err(_) => tracing::warn!("Ignoring malformed budget '{}'", value),
                },
                "sortBy" => page.sort_by = value.to_string(),
                "sortOrder" => match value.parse() {
                    Ok(order) => page.sort_order = order,
                    Err(e) => tracing::warn!("Ignoring sortOrder: {}", e),
                },
                other => tracing::debug!("Ignoring unknown query key '{}'", other),
            }
        }

        page.filters = filters;
        page
    }

    /// Listing request for these parameters. Rating and type narrowing stay
    /// client-side and are not forwarded.
    pub fn to_search_request(&self, page: u32, limit: u32) -> SearchRequest {
        SearchRequest {
            location: self.location.clone(),
            specialization: self.specialization.clone(),
            min_price: self.min_price,
            max_price: self.max_price,
            page,
            limit,
            sort_by: self.sort_by.clone(),
            sort_order: self.sort_order,
            ..SearchRequest::default()
        }
    }
}

fn parse_amount(key: &str, value: &str) -> Option<u64> {
    match value.parse::<u64>() {
        Ok(amount) => Some(amount),
        Err(_) => {
            tracing::warn!("Ignoring malformed {} '{}'", key, value);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_query_is_empty() {
        assert_eq!(PageQuery::default().to_query_string(), "");
        assert_eq!(PageQuery::parse(""), PageQuery::default());
    }

    #[test]
    fn test_round_trip() {
        let query = PageQuery {
            location: Some("Navi Mumbai".to_string()),
            specialization: Some("wedding_photography".to_string()),
            min_price: Some(5000),
            max_price: Some(200000),
            sort_by: "createdAt".to_string(),
            sort_order: SortOrder::Asc,
            filters: FilterState::default()
                .with_min_rating(4.5)
                .with_budget_percent(40)
                .with_partner_types([PartnerType::Studio, PartnerType::Firm]),
        };

        let encoded = query.to_query_string();
        assert_eq!(
            encoded,
            "location=Navi+Mumbai&specialization=wedding_photography&partnerType=studio%2Cfirm\
             &minRating=4.5&minPrice=5000&maxPrice=200000&budget=40&sortBy=createdAt&sortOrder=asc"
        );
        assert_eq!(PageQuery::parse(&encoded), query);
    }

    #[test]
    fn test_parse_tolerates_noise() {
        let query = PageQuery::parse("?partnerType=Studio,agency&minRating=abc&budget=300&foo=bar&location=");
        assert_eq!(
            query.filters.partner_types().iter().copied().collect::<Vec<_>>(),
            vec![PartnerType::Studio]
        );
        assert_eq!(query.filters.min_rating(), 0.0);
        assert_eq!(query.filters.budget_percent(), 100);
        assert_eq!(query.location, None);
    }

    #[test]
    fn test_out_of_range_values_clamp_on_parse() {
        let query = PageQuery::parse("budget=180&minRating=7");
        assert_eq!(query.filters.budget_percent(), 100);
        assert_eq!(query.filters.min_rating(), 5.0);
        assert_eq!(query.to_query_string(), "minRating=5");
    }

    #[test]
    fn test_search_request_keeps_server_side_params() {
        let query = PageQuery::parse("location=Pune&minRating=4&partnerType=solo&maxPrice=90000");
        let request = query.to_search_request(2, 10);
        assert_eq!(request.location.as_deref(), Some("Pune"));
        assert_eq!(request.max_price, Some(90000));
        assert_eq!(request.partner_type, None);
        assert_eq!(request.min_rating, None);
        assert_eq!(request.page, 2);
        assert_eq!(request.limit, 10);
    }
}
