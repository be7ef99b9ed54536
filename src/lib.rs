pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::HttpPartnerApi;
pub use config::ClientSettings;
pub use crate::core::filter::{FilterState, ResultTab};
pub use crate::core::lead::LeadForm;
pub use crate::core::orchestrator::{FetchOrchestrator, FetchState};
pub use crate::core::page::SearchPage;
pub use crate::core::query::PageQuery;
pub use crate::core::store::{Change, FilterStore};
pub use crate::core::view_model::CardViewModel;
pub use domain::model::{Partner, PartnerType, SearchRequest};
pub use domain::ports::{ApiStatus, PartnerApi};
pub use utils::error::{ClientError, Result};
