use serde::{Deserialize, Serialize};

use crate::candidates::CandidateFilters;
use crate::CoreError;

/// Selection cap used when a brief does not name one.
pub const DEFAULT_INFLUENCER_COUNT: usize = 50;

fn default_influencer_count() -> usize {
    DEFAULT_INFLUENCER_COUNT
}

/// A campaign request: what the brand wants and what it can spend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignBrief {
    /// Free-text campaign goal. Carried for the caller; the planner ignores it.
    pub objective: String,
    #[serde(default)]
    pub target_country: Option<String>,
    #[serde(default)]
    pub target_language: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub platform: Option<String>,
    /// Hard ceiling on the summed `cost_per_post` of the selection.
    pub budget: f64,
    #[serde(default = "default_influencer_count")]
    pub desired_influencer_count: usize,
}

impl CampaignBrief {
    /// Check the numeric fields before planning.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidBrief`] if `budget` is negative or not
    /// finite, or if `desired_influencer_count` is zero.
    pub fn validate(&self) -> Result<(), CoreError> {
        if !self.budget.is_finite() || self.budget < 0.0 {
            return Err(CoreError::InvalidBrief(format!(
                "budget must be a non-negative amount, got {}",
                self.budget
            )));
        }
        if self.desired_influencer_count == 0 {
            return Err(CoreError::InvalidBrief(
                "desired_influencer_count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// The categorical filters the candidate source must apply for this brief.
    ///
    /// Only a missing or empty value leaves a field unfiltered; anything else,
    /// whitespace included, is compared verbatim.
    #[must_use]
    pub fn filters(&self) -> CandidateFilters {
        let clean = |v: &Option<String>| v.clone().filter(|s| !s.is_empty());
        CandidateFilters {
            country: clean(&self.target_country),
            language: clean(&self.target_language),
            category: clean(&self.category),
            platform: clean(&self.platform),
        }
    }
}

/// One selected influencer, annotated with what it costs and returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanItem {
    pub influencer_id: i64,
    pub handle: String,
    pub platform: String,
    pub estimated_cost: f64,
    pub expected_views: f64,
    pub virality_score: f64,
}

/// Planner output. `influencers` is in selection order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CampaignPlan {
    pub influencers: Vec<PlanItem>,
    pub total_cost: f64,
    pub total_expected_views: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brief(budget: f64, count: usize) -> CampaignBrief {
        CampaignBrief {
            objective: "launch".to_string(),
            target_country: None,
            target_language: None,
            category: None,
            platform: None,
            budget,
            desired_influencer_count: count,
        }
    }

    #[test]
    fn desired_count_defaults_to_fifty() {
        let b: CampaignBrief =
            serde_json::from_str(r#"{"objective": "reach", "budget": 1000}"#).expect("brief");
        assert_eq!(b.desired_influencer_count, DEFAULT_INFLUENCER_COUNT);
        assert!(b.platform.is_none());
    }

    #[test]
    fn validate_accepts_zero_budget() {
        assert!(brief(0.0, 1).validate().is_ok());
    }

    #[test]
    fn validate_rejects_negative_budget() {
        assert!(matches!(
            brief(-1.0, 5).validate(),
            Err(CoreError::InvalidBrief(_))
        ));
    }

    #[test]
    fn validate_rejects_non_finite_budget() {
        assert!(brief(f64::NAN, 5).validate().is_err());
        assert!(brief(f64::INFINITY, 5).validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_count() {
        assert!(matches!(
            brief(100.0, 0).validate(),
            Err(CoreError::InvalidBrief(_))
        ));
    }

    #[test]
    fn filters_ignore_only_empty_values() {
        let b = CampaignBrief {
            target_country: Some(String::new()),
            target_language: Some("  ".to_string()),
            platform: Some(" tiktok ".to_string()),
            ..brief(10.0, 1)
        };
        let filters = b.filters();
        assert!(filters.country.is_none());
        assert!(filters.category.is_none());
        assert_eq!(filters.language.as_deref(), Some("  "));
        assert_eq!(filters.platform.as_deref(), Some(" tiktok "));
    }

    #[test]
    fn plan_serializes_with_expected_field_names() {
        let plan = CampaignPlan {
            influencers: vec![PlanItem {
                influencer_id: 1,
                handle: "@a".to_string(),
                platform: "instagram".to_string(),
                estimated_cost: 10.0,
                expected_views: 100.0,
                virality_score: 3.5,
            }],
            total_cost: 10.0,
            total_expected_views: 100.0,
        };
        let json = serde_json::to_value(&plan).expect("serialize");
        assert_eq!(json["influencers"][0]["estimated_cost"], 10.0);
        assert_eq!(json["total_expected_views"], 100.0);
    }
}
