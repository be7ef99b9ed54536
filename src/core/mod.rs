pub mod filter;
pub mod lead;
pub mod orchestrator;
pub mod page;
pub mod profile;
pub mod query;
pub mod store;
pub mod view_model;

pub use crate::domain::model::{Partner, PartnerPage, PartnerType, SearchRequest};
pub use crate::domain::ports::{ApiStatus, ConfigProvider, PartnerApi};
pub use crate::utils::error::Result;
