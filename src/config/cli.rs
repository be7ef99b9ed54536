use crate::config::ClientSettings;
use crate::core::filter::ResultTab;
use crate::core::lead::LeadForm;
use crate::core::store::FilterStore;
use crate::domain::lead::{ContactMethod, LeadSource, Priority, ServiceType};
use crate::domain::model::{PartnerType, SortOrder};
use crate::utils::error::{ClientError, Result};
use chrono::{NaiveDate, TimeZone, Utc};
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "pixisphere")]
#[command(about = "Search Pixisphere photographers and studios, view profiles and send leads")]
pub struct CliConfig {
    /// Partner directory API base URL (overrides the config file and PIXISPHERE_API_BASE)
    #[arg(long, global = true)]
    pub api_base: Option<String>,

    /// HTTP timeout in seconds
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    /// TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List partners matching the filters as JSON cards
    Search(SearchArgs),
    /// Show one partner profile
    Profile {
        /// Partner id
        id: String,
    },
    /// Validate and submit a lead
    Lead(LeadArgs),
    /// Check whether the API is reachable
    Status,
}

#[derive(Debug, Clone, Args)]
pub struct SearchArgs {
    /// Start from a search page query string, e.g. "location=Pune&minRating=4"
    #[arg(long)]
    pub query: Option<String>,

    #[arg(long)]
    pub location: Option<String>,

    #[arg(long)]
    pub specialization: Option<String>,

    /// Budget slider position, 0-100
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub budget: Option<u8>,

    /// Minimum star rating, 0-5
    #[arg(long)]
    pub min_rating: Option<f64>,

    /// Partner type to keep; repeat for several
    #[arg(long = "type")]
    pub partner_types: Vec<PartnerType>,

    #[arg(long)]
    pub min_price: Option<u64>,

    #[arg(long)]
    pub max_price: Option<u64>,

    #[arg(long)]
    pub sort_by: Option<String>,

    #[arg(long)]
    pub sort_order: Option<SortOrder>,

    #[arg(long, default_value = "1")]
    pub page: u32,

    #[arg(long)]
    pub limit: Option<u32>,

    /// all, photographers or studios
    #[arg(long, default_value = "all")]
    pub tab: ResultTab,
}

#[derive(Debug, Clone, Args)]
pub struct LeadArgs {
    #[arg(long)]
    pub service_type: Option<ServiceType>,

    /// Event date, YYYY-MM-DD
    #[arg(long)]
    pub event_date: Option<NaiveDate>,

    #[arg(long, default_value = "")]
    pub location: String,

    #[arg(long, default_value = "")]
    pub budget_min: String,

    #[arg(long, default_value = "")]
    pub budget_max: String,

    #[arg(long)]
    pub currency: Option<String>,

    #[arg(long)]
    pub contact_method: Option<ContactMethod>,

    #[arg(long, default_value = "")]
    pub message: String,

    #[arg(long)]
    pub priority: Option<Priority>,

    #[arg(long)]
    pub source: Option<LeadSource>,

    /// Validate and print the payload without sending it
    #[arg(long)]
    pub dry_run: bool,
}

impl CliConfig {
    /// Defaults, then `--config`, then the environment, then flags.
    pub fn resolve_settings(&self) -> Result<ClientSettings> {
        let settings = match &self.config {
            Some(path) => ClientSettings::from_file(path)?,
            None => ClientSettings::default(),
        };
        let mut settings = settings.with_env_overrides();

        if let Some(base) = &self.api_base {
            settings.api_base = base.clone();
        }
        if let Some(timeout) = self.timeout_secs {
            settings.timeout_secs = timeout;
        }
        Ok(settings)
    }
}

impl SearchArgs {
    /// Builds the page state: query string first, explicit flags on top.
    pub fn to_store(&self, settings: &ClientSettings) -> FilterStore {
        let mut store = match &self.query {
            Some(query) => FilterStore::from_query_string(query),
            None => {
                let mut store = FilterStore::default();
                store.set_sort(settings.sort_by.clone(), settings.sort_order);
                store
            }
        }
        .with_limit(self.limit.unwrap_or(settings.default_limit));

        if self.location.is_some() {
            store.set_location(self.location.clone());
        }
        if self.specialization.is_some() {
            store.set_specialization(self.specialization.clone());
        }
        if self.min_price.is_some() || self.max_price.is_some() {
            store.set_price_range(self.min_price, self.max_price);
        }
        if self.sort_by.is_some() || self.sort_order.is_some() {
            let sort_by = self
                .sort_by
                .clone()
                .unwrap_or_else(|| store.query().sort_by.clone());
            let sort_order = self.sort_order.unwrap_or(store.query().sort_order);
            store.set_sort(sort_by, sort_order);
        }
        if let Some(budget) = self.budget {
            store.set_budget_percent(budget);
        }
        if let Some(rating) = self.min_rating {
            store.set_min_rating(rating);
        }
        if !self.partner_types.is_empty() {
            store.set_partner_types(self.partner_types.iter().copied());
        }
        store.set_page(self.page);
        store
    }
}

impl LeadArgs {
    pub fn to_form(&self, settings: &ClientSettings) -> Result<LeadForm> {
        let event_date = match self.event_date {
            Some(date) => {
                let midnight = date.and_hms_opt(0, 0, 0).ok_or_else(|| ClientError::ConfigError {
                    message: format!("Invalid event date: {}", date),
                })?;
                Some(Utc.from_utc_datetime(&midnight))
            }
            None => None,
        };

        Ok(LeadForm {
            message: self.message.clone(),
            contact_method: self.contact_method,
            service_type: self.service_type,
            event_date,
            budget_min: self.budget_min.clone(),
            budget_max: self.budget_max.clone(),
            currency: self.currency.clone().unwrap_or_else(|| settings.currency.clone()),
            location: self.location.clone(),
            priority: self.priority.unwrap_or(settings.priority),
            source: self.source.unwrap_or(settings.source),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_flags_layer_over_query() {
        let cli = CliConfig::parse_from([
            "pixisphere",
            "search",
            "--query",
            "location=Pune&minRating=3",
            "--min-rating",
            "4.5",
            "--type",
            "Studio",
            "--tab",
            "studios",
        ]);
        let Command::Search(args) = cli.command else {
            panic!("expected search");
        };
        assert_eq!(args.tab, ResultTab::Studios);

        let store = args.to_store(&ClientSettings::default());
        assert_eq!(store.query().location.as_deref(), Some("Pune"));
        assert_eq!(store.filters().min_rating(), 4.5);
        assert_eq!(store.query_string(), "location=Pune&partnerType=studio&minRating=4.5");
    }

    #[test]
    fn test_budget_out_of_range_is_rejected() {
        let parsed = CliConfig::try_parse_from(["pixisphere", "search", "--budget", "150"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_lead_args_to_form() {
        let cli = CliConfig::parse_from([
            "pixisphere",
            "lead",
            "--service-type",
            "portrait photography",
            "--event-date",
            "2026-11-20",
            "--location",
            "Kochi",
            "--budget-min",
            "10000",
            "--budget-max",
            "15000",
            "--contact-method",
            "email",
            "--message",
            "Family portraits",
        ]);
        let Command::Lead(args) = cli.command else {
            panic!("expected lead");
        };
        let payload = args
            .to_form(&ClientSettings::default())
            .unwrap()
            .validate()
            .unwrap();
        assert_eq!(payload.event_date, "2026-11-20T00:00:00.000Z");
        assert_eq!(payload.service_type, ServiceType::Portrait);
        assert_eq!(payload.budget.currency, "INR");
    }

    #[test]
    fn test_flag_overrides_api_base() {
        let cli = CliConfig::parse_from(["pixisphere", "--api-base", "http://127.0.0.1:9000", "status"]);
        let settings = cli.resolve_settings().unwrap();
        assert_eq!(settings.api_base, "http://127.0.0.1:9000");
    }
}
