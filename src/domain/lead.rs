use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Matches a user-supplied option against the catalog, ignoring case and
/// treating `-`/`_` as spaces so `pre-wedding_photography` finds
/// "Pre-Wedding Photography" as well.
fn lookup<T: Copy>(catalog: &[T], label: impl Fn(&T) -> &'static str, input: &str) -> Option<T> {
    let canon = |s: &str| {
        s.trim()
            .chars()
            .map(|c| if c == '_' || c == '-' { ' ' } else { c.to_ascii_lowercase() })
            .collect::<String>()
    };
    let wanted = canon(input);
    catalog.iter().copied().find(|item| canon(label(item)) == wanted)
}

macro_rules! catalog_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $label:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $label)] $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                lookup(Self::ALL, $name::as_str, s).ok_or_else(|| {
                    let known: Vec<&str> = Self::ALL.iter().map($name::as_str).collect();
                    format!("unknown value '{}', expected one of: {}", s, known.join(", "))
                })
            }
        }
    };
}

catalog_enum! {
    /// Kinds of shoot a client can request.
    ServiceType {
        Wedding => "Wedding Photography",
        PreWedding => "Pre-Wedding Photography",
        Engagement => "Engagement Photography",
        Portrait => "Portrait Photography",
        Event => "Event Photography",
        Corporate => "Corporate Photography",
        Product => "Product Photography",
        Fashion => "Fashion Photography",
    }
}

catalog_enum! {
    ContactMethod {
        WhatsApp => "whatsapp",
        Phone => "phone",
        Email => "email",
        Instagram => "instagram",
    }
}

catalog_enum! {
    /// Where the client heard about the marketplace.
    LeadSource {
        Website => "website",
        Instagram => "instagram",
        Facebook => "facebook",
        Referral => "referral",
        Google => "google",
        Advertisement => "advertisement",
    }
}

catalog_enum! {
    Priority {
        Low => "low",
        Medium => "medium",
        High => "high",
    }
}

impl Default for LeadSource {
    fn default() -> Self {
        LeadSource::Website
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadStatus {
    #[default]
    New,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    pub min: u64,
    pub max: u64,
    pub currency: String,
}

/// Body of `POST /leads`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadPayload {
    pub message: String,
    pub contact_method: ContactMethod,
    pub service_type: ServiceType,
    /// ISO-8601, millisecond precision, UTC.
    pub event_date: String,
    pub budget: Budget,
    pub location: String,
    pub priority: Priority,
    pub source: LeadSource,
    pub status: LeadStatus,
}
