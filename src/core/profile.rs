use crate::domain::model::{Coordinates, PartnerType, ProjectStats};
use crate::domain::normalize::{NormalizedPartner, PLACEHOLDER_IMAGE};
use crate::core::view_model::{group_digits, title_case, CURRENCY_SYMBOL};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileLocation {
    pub id: String,
    pub city: String,
    pub state: String,
    pub coordinates: Coordinates,
    pub pin_codes_served: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileService {
    pub name: String,
    pub description: String,
    /// e.g. `₹75,000 per day`
    pub price: String,
}

/// Everything the partner profile page shows, fully defaulted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileView {
    pub id: String,
    pub company_name: String,
    pub partner_type: PartnerType,
    pub specializations: Vec<String>,
    pub portfolio: Vec<String>,
    pub experience_years: u32,
    pub serving_locations: Vec<String>,
    pub avg_rating: f64,
    pub total_reviews: u32,
    pub verified: bool,
    pub project_stats: ProjectStats,
    pub partner_locations: Vec<ProfileLocation>,
    pub social_links: BTreeMap<String, String>,
    pub username: String,
    pub profile_pic: Option<String>,
    pub services: Vec<ProfileService>,
    pub completion_rate: f64,
    pub has_location_pricing: bool,
    pub member_since: Option<DateTime<Utc>>,
}

/// `per_day` → `per day`.
pub fn price_unit_label(unit: &str) -> String {
    unit.replace('_', " ")
}

impl From<&NormalizedPartner> for ProfileView {
    fn from(partner: &NormalizedPartner) -> Self {
        let portfolio = if partner.portfolio.is_empty() {
            vec![partner
                .banner
                .clone()
                .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string())]
        } else {
            partner.portfolio.clone()
        };

        let partner_locations = partner
            .partner_locations
            .iter()
            .enumerate()
            .map(|(idx, loc)| ProfileLocation {
                id: loc
                    .id
                    .clone()
                    .unwrap_or_else(|| format!("{}-loc-{}", partner.id, idx)),
                city: loc.city.clone().unwrap_or_default(),
                state: loc.state.clone().unwrap_or_default(),
                coordinates: loc.coordinates.unwrap_or_default(),
                pin_codes_served: loc.pin_codes_served.clone().unwrap_or_default(),
            })
            .collect();

        let services = partner
            .services
            .iter()
            .map(|s| {
                let mut price = format!("{}{}", CURRENCY_SYMBOL, group_digits(s.base_price));
                if let Some(unit) = s.price_unit.as_deref().filter(|u| !u.is_empty()) {
                    price.push(' ');
                    price.push_str(&price_unit_label(unit));
                }
                ProfileService {
                    name: s.name.clone(),
                    description: s.description.clone(),
                    price,
                }
            })
            .collect();

        let member_since = partner.created_at.as_deref().and_then(|raw| {
            DateTime::parse_from_rfc3339(raw)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|e| tracing::debug!("Unparseable createdAt '{}': {}", raw, e))
                .ok()
        });

        Self {
            id: partner.id.clone(),
            company_name: partner.name.clone(),
            partner_type: partner.display_type(),
            specializations: partner.specializations.iter().map(|s| title_case(s)).collect(),
            portfolio,
            experience_years: partner.experience_years,
            serving_locations: partner.serving_locations.clone(),
            avg_rating: partner.avg_rating.unwrap_or(0.0),
            total_reviews: partner.total_reviews,
            verified: partner.verified,
            project_stats: partner.project_stats,
            partner_locations,
            social_links: partner.social_links.clone(),
            username: partner.username.clone(),
            profile_pic: partner.profile_pic.clone(),
            services,
            completion_rate: partner.completion_rate,
            has_location_pricing: partner.has_location_pricing,
            member_since,
        }
    }
}
