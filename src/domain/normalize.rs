//! Resolves every optional [`Partner`] field to its display default once, so the
//! filter, card and profile code can read plain values.

use crate::domain::model::{
    Partner, PartnerLocation, PartnerType, PartnerUser, ProjectStats, Service,
};
use std::collections::BTreeMap;

pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";
pub const UNKNOWN_PARTNER_NAME: &str = "Unknown";

#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedPartner {
    pub id: String,
    pub name: String,
    /// `None` when the API sent no type or one outside the known set.
    pub partner_type: Option<PartnerType>,
    /// Clamped to `[0, 5]`; `None` when the API sent nothing usable.
    pub avg_rating: Option<f64>,
    pub total_reviews: u32,
    pub specializations: Vec<String>,
    pub serving_locations: Vec<String>,
    pub partner_locations: Vec<PartnerLocation>,
    pub services: Vec<Service>,
    pub portfolio: Vec<String>,
    pub banner: Option<String>,
    pub profile_pic: Option<String>,
    pub username: String,
    pub experience_years: u32,
    pub verified: bool,
    pub project_stats: ProjectStats,
    pub social_links: BTreeMap<String, String>,
    pub completion_rate: f64,
    pub has_location_pricing: bool,
    pub created_at: Option<String>,
}

impl NormalizedPartner {
    /// `basePrice` of the first service.
    pub fn headline_price(&self) -> Option<f64> {
        self.services.first().map(|s| s.base_price)
    }

    pub fn is_studio(&self) -> bool {
        self.partner_type == Some(PartnerType::Studio)
    }

    /// Type shown on cards and profiles; untyped partners read as solo.
    pub fn display_type(&self) -> PartnerType {
        self.partner_type.unwrap_or(PartnerType::Solo)
    }

    pub fn first_portfolio_image(&self) -> Option<&str> {
        self.portfolio.first().map(String::as_str)
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn present_all(values: Option<Vec<String>>) -> Vec<String> {
    values
        .unwrap_or_default()
        .into_iter()
        .filter(|v| !v.trim().is_empty())
        .collect()
}

impl From<Partner> for NormalizedPartner {
    fn from(partner: Partner) -> Self {
        let user = partner.user.unwrap_or_default();
        let PartnerUser {
            username,
            profile_pic,
        } = user;

        let services = partner
            .services
            .unwrap_or_default()
            .into_iter()
            .map(|mut s| {
                // 負數或非數字價格視為 0
                if !s.base_price.is_finite() || s.base_price < 0.0 {
                    s.base_price = 0.0;
                }
                s
            })
            .collect();

        Self {
            id: partner.id,
            name: present(partner.display_name).unwrap_or_else(|| UNKNOWN_PARTNER_NAME.to_string()),
            partner_type: partner.partner_type,
            avg_rating: partner
                .avg_rating
                .filter(|r| r.is_finite())
                .map(|r| r.clamp(0.0, 5.0)),
            total_reviews: partner.total_reviews.unwrap_or(0),
            specializations: present_all(partner.specializations),
            serving_locations: present_all(partner.serving_locations),
            partner_locations: partner.partner_locations.unwrap_or_default(),
            services,
            portfolio: present_all(partner.portfolio),
            banner: present(partner.banner),
            profile_pic: present(profile_pic),
            username: username.unwrap_or_default(),
            experience_years: partner.experience_years.unwrap_or(0),
            verified: partner.verified.unwrap_or(false),
            project_stats: partner.project_stats.unwrap_or_default(),
            social_links: partner.social_links.unwrap_or_default(),
            completion_rate: partner.completion_rate.unwrap_or(0.0),
            has_location_pricing: partner.has_location_pricing.unwrap_or(false),
            created_at: present(partner.created_at),
        }
    }
}
