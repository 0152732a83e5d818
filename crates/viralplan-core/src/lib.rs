//! Shared data contracts, configuration and the campaign planner for viralplan.

pub mod app_config;
pub mod campaign;
pub mod candidates;
pub mod config;
pub mod planner;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use campaign::{CampaignBrief, CampaignPlan, PlanItem, DEFAULT_INFLUENCER_COUNT};
pub use candidates::{Candidate, CandidateFilters};
pub use config::{load_app_config, load_app_config_from_env};
pub use planner::plan_campaign;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    #[error("invalid campaign brief: {0}")]
    InvalidBrief(String),
}
