use crate::domain::normalize::{NormalizedPartner, PLACEHOLDER_IMAGE};
use serde::Serialize;

pub const FAVORITE_RATING: f64 = 4.5;
pub const DEFAULT_RATING_LABEL: &str = "4.0";
pub const CONTACT_FOR_PRICING: &str = "Contact for pricing";
pub const CURRENCY_SYMBOL: &str = "₹";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotographerCard {
    pub id: String,
    pub name: String,
    pub image: String,
    pub price: String,
    pub location: String,
    pub specialty: String,
    pub experience: String,
    pub rating: String,
    pub is_favorite: bool,
    pub verified: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudioCard {
    pub id: String,
    pub name: String,
    pub image: String,
    pub rating: String,
    pub location: String,
    pub specialties: Vec<String>,
    pub photographer_count: u32,
    pub is_favorite: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CardViewModel {
    Photographer(PhotographerCard),
    Studio(StudioCard),
}

impl CardViewModel {
    pub fn id(&self) -> &str {
        match self {
            CardViewModel::Photographer(card) => &card.id,
            CardViewModel::Studio(card) => &card.id,
        }
    }

    pub fn is_favorite(&self) -> bool {
        match self {
            CardViewModel::Photographer(card) => card.is_favorite,
            CardViewModel::Studio(card) => card.is_favorite,
        }
    }
}

/// Studios become [`StudioCard`]s, every other partner type a [`PhotographerCard`].
pub fn to_card(partner: &NormalizedPartner) -> CardViewModel {
    if partner.is_studio() {
        CardViewModel::Studio(to_studio_card(partner))
    } else {
        CardViewModel::Photographer(to_photographer_card(partner))
    }
}

pub fn to_photographer_card(partner: &NormalizedPartner) -> PhotographerCard {
    let image = partner
        .profile_pic
        .as_deref()
        .or(partner.banner.as_deref())
        .or(partner.first_portfolio_image())
        .unwrap_or(PLACEHOLDER_IMAGE);

    PhotographerCard {
        id: partner.id.clone(),
        name: partner.name.clone(),
        image: image.to_string(),
        price: priced(partner)
            .map(|p| format!("{}{}", CURRENCY_SYMBOL, group_digits(p)))
            .unwrap_or_else(|| CONTACT_FOR_PRICING.to_string()),
        location: partner
            .serving_locations
            .first()
            .cloned()
            .unwrap_or_else(|| "Location not specified".to_string()),
        specialty: partner
            .specializations
            .first()
            .map(|s| title_case(s))
            .unwrap_or_else(|| "Photography".to_string()),
        experience: format!("{} years", partner.experience_years),
        rating: rating_label(partner.avg_rating),
        is_favorite: is_favorite(partner.avg_rating),
        verified: partner.verified,
    }
}

pub fn to_studio_card(partner: &NormalizedPartner) -> StudioCard {
    let image = partner
        .banner
        .as_deref()
        .or(partner.first_portfolio_image())
        .unwrap_or(PLACEHOLDER_IMAGE);

    let location = if partner.serving_locations.is_empty() {
        "Multiple locations".to_string()
    } else {
        partner.serving_locations.join(", ")
    };

    StudioCard {
        id: partner.id.clone(),
        name: partner.name.clone(),
        image: image.to_string(),
        rating: rating_label(partner.avg_rating),
        location,
        specialties: partner.specializations.iter().map(|s| title_case(s)).collect(),
        photographer_count: partner.project_stats.total,
        is_favorite: is_favorite(partner.avg_rating),
        price: partner.headline_price().map(group_digits),
    }
}

/// Headline price for the photographer card; zero reads as "ask for a quote".
fn priced(partner: &NormalizedPartner) -> Option<f64> {
    partner.headline_price().filter(|p| *p > 0.0)
}

pub fn rating_label(rating: Option<f64>) -> String {
    rating
        .map(|r| format!("{:.1}", r))
        .unwrap_or_else(|| DEFAULT_RATING_LABEL.to_string())
}

pub fn is_favorite(rating: Option<f64>) -> bool {
    rating.is_some_and(|r| r >= FAVORITE_RATING)
}

/// `wedding_photography` → `Wedding Photography`.
pub fn title_case(tag: &str) -> String {
    tag.replace('_', " ")
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Rounds to a whole amount and groups digits the en-IN way: the last three
/// digits, then pairs (`1,25,000`).
pub fn group_digits(amount: f64) -> String {
    let whole = amount.max(0.0).round() as u64;
    let digits = whole.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}
