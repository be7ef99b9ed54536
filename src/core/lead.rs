use crate::domain::lead::{
    Budget, ContactMethod, LeadPayload, LeadSource, LeadStatus, Priority, ServiceType,
};
use crate::domain::ports::PartnerApi;
use crate::utils::error::{ClientError, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use std::collections::BTreeMap;

pub const DEFAULT_CURRENCY: &str = "INR";

/// Raw lead-form input. Budgets stay strings until validation, the way the
/// user typed them.
#[derive(Debug, Clone, PartialEq)]
pub struct LeadForm {
    pub message: String,
    pub contact_method: Option<ContactMethod>,
    pub service_type: Option<ServiceType>,
    pub event_date: Option<DateTime<Utc>>,
    pub budget_min: String,
    pub budget_max: String,
    pub currency: String,
    pub location: String,
    pub priority: Priority,
    pub source: LeadSource,
}

impl Default for LeadForm {
    fn default() -> Self {
        Self {
            message: String::new(),
            contact_method: None,
            service_type: None,
            event_date: None,
            budget_min: String::new(),
            budget_max: String::new(),
            currency: DEFAULT_CURRENCY.to_string(),
            location: String::new(),
            priority: Priority::default(),
            source: LeadSource::default(),
        }
    }
}

fn parse_budget(raw: &str) -> std::result::Result<Option<f64>, ()> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(Some(v)),
        _ => Err(()),
    }
}

impl LeadForm {
    /// Checks every field and builds the request body. On failure the error
    /// carries one message per offending field, keyed by its JSON name.
    pub fn validate(&self) -> Result<LeadPayload> {
        let mut errors: BTreeMap<String, String> = BTreeMap::new();
        let mut fail = |field: &str, message: &str| {
            errors.insert(field.to_string(), message.to_string());
        };

        if self.service_type.is_none() {
            fail("serviceType", "Service type is required");
        }
        if self.event_date.is_none() {
            fail("eventDate", "Event date is required");
        }
        if self.location.trim().is_empty() {
            fail("location", "Location is required");
        }

        let min = parse_budget(&self.budget_min);
        let max = parse_budget(&self.budget_max);
        match min {
            Ok(None) => fail("budgetMin", "Minimum budget is required"),
            Err(()) => fail("budgetMin", "Minimum budget must be a number"),
            Ok(Some(_)) => {}
        }
        match max {
            Ok(None) => fail("budgetMax", "Maximum budget is required"),
            Err(()) => fail("budgetMax", "Maximum budget must be a number"),
            Ok(Some(_)) => {}
        }
        if let (Ok(Some(lo)), Ok(Some(hi))) = (min, max) {
            if lo >= hi {
                fail("budgetMax", "Maximum budget must be greater than minimum");
            }
        }

        if self.contact_method.is_none() {
            fail("contactMethod", "Contact method is required");
        }
        if self.message.trim().is_empty() {
            fail("message", "Message is required");
        }

        match (self.service_type, self.contact_method, self.event_date, min, max) {
            (Some(service_type), Some(contact_method), Some(event_date), Ok(Some(lo)), Ok(Some(hi)))
                if errors.is_empty() =>
            {
                Ok(LeadPayload {
                    message: self.message.clone(),
                    contact_method,
                    service_type,
                    event_date: event_date.to_rfc3339_opts(SecondsFormat::Millis, true),
                    budget: Budget {
                        min: lo.trunc() as u64,
                        max: hi.trunc() as u64,
                        currency: if self.currency.trim().is_empty() {
                            DEFAULT_CURRENCY.to_string()
                        } else {
                            self.currency.trim().to_string()
                        },
                    },
                    location: self.location.clone(),
                    priority: self.priority,
                    source: self.source,
                    status: LeadStatus::New,
                })
            }
            _ => Err(ClientError::ValidationError { errors }),
        }
    }

    /// Validates, then posts. Nothing reaches the network when validation fails.
    pub async fn submit<A: PartnerApi + ?Sized>(&self, api: &A) -> Result<LeadPayload> {
        let payload = self.validate().inspect_err(|e| {
            tracing::debug!("Lead form rejected: {}", e);
        })?;
        api.create_lead(&payload).await?;
        tracing::info!(
            "Lead submitted: {} in {} ({} {}-{})",
            payload.service_type,
            payload.location,
            payload.budget.currency,
            payload.budget.min,
            payload.budget.max
        );
        Ok(payload)
    }
}
