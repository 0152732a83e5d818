use serde::{Deserialize, Serialize};

/// An influencer as the planner sees it: one fully materialized row of the
/// recommendations view.
///
/// Candidates are handed to [`crate::plan_campaign`] already sorted by
/// `virality_score` descending; nothing in this crate re-sorts them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub influencer_id: i64,
    pub handle: String,
    pub platform: String,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    /// Free-text style label, e.g. `"storytelling vlogs"`. Informational only.
    #[serde(default)]
    pub content_style: Option<String>,
    /// Price of a single sponsored post. Absent is treated as free.
    #[serde(default)]
    pub cost_per_post: Option<f64>,
    /// Fallback reach metric when `recent_avg_views` is unknown.
    #[serde(default)]
    pub follower_count: Option<i64>,
    /// Mean views over the trailing 90 days; the preferred reach metric.
    #[serde(default)]
    pub recent_avg_views: Option<f64>,
    #[serde(default)]
    pub virality_score: Option<f64>,
}

impl Candidate {
    /// Cost charged against the campaign budget, `0.0` when unpriced.
    #[must_use]
    pub fn cost(&self) -> f64 {
        self.cost_per_post.unwrap_or(0.0)
    }

    /// Expected views per post.
    ///
    /// Uses `recent_avg_views`, then `follower_count`, then `0.0`. A recorded
    /// zero counts as missing data and falls through to the next metric.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn expected_views(&self) -> f64 {
        if let Some(views) = self.recent_avg_views.filter(|v| *v != 0.0) {
            return views;
        }

        self.follower_count
            .filter(|f| *f != 0)
            .map_or(0.0, |f| f as f64)
    }

    #[must_use]
    pub fn virality(&self) -> f64 {
        self.virality_score.unwrap_or(0.0)
    }
}

/// Exact-match categorical filters taken from a campaign brief.
///
/// Every `Some` field must equal the candidate's value; `None` passes
/// everything. The db candidate query applies the same predicates in SQL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateFilters {
    pub country: Option<String>,
    pub language: Option<String>,
    pub category: Option<String>,
    pub platform: Option<String>,
}

impl CandidateFilters {
    #[must_use]
    pub fn matches(&self, candidate: &Candidate) -> bool {
        field_matches(self.country.as_deref(), candidate.country.as_deref())
            && field_matches(self.language.as_deref(), candidate.language.as_deref())
            && field_matches(self.category.as_deref(), candidate.category.as_deref())
            && field_matches(self.platform.as_deref(), Some(candidate.platform.as_str()))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.country.is_none()
            && self.language.is_none()
            && self.category.is_none()
            && self.platform.is_none()
    }
}

fn field_matches(wanted: Option<&str>, actual: Option<&str>) -> bool {
    match wanted {
        None => true,
        Some(w) => actual == Some(w),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate() -> Candidate {
        Candidate {
            influencer_id: 7,
            handle: "@music0007".to_string(),
            platform: "tiktok".to_string(),
            country: Some("MX".to_string()),
            language: Some("es".to_string()),
            category: Some("music".to_string()),
            content_style: Some("high energy dance".to_string()),
            cost_per_post: Some(1_250.5),
            follower_count: Some(500_000),
            recent_avg_views: Some(42_000.0),
            virality_score: Some(88.1),
        }
    }

    #[test]
    fn expected_views_prefers_recent_avg_views() {
        assert!((candidate().expected_views() - 42_000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn expected_views_falls_back_to_followers() {
        let c = Candidate {
            recent_avg_views: None,
            ..candidate()
        };
        assert!((c.expected_views() - 500_000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn expected_views_treats_zero_views_as_missing() {
        let c = Candidate {
            recent_avg_views: Some(0.0),
            ..candidate()
        };
        assert!((c.expected_views() - 500_000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn expected_views_defaults_to_zero() {
        let c = Candidate {
            recent_avg_views: None,
            follower_count: None,
            ..candidate()
        };
        assert!(c.expected_views().abs() < f64::EPSILON);
    }

    #[test]
    fn missing_cost_and_score_default_to_zero() {
        let c = Candidate {
            cost_per_post: None,
            virality_score: None,
            ..candidate()
        };
        assert!(c.cost().abs() < f64::EPSILON);
        assert!(c.virality().abs() < f64::EPSILON);
    }

    #[test]
    fn empty_filters_match_everything() {
        let filters = CandidateFilters::default();
        assert!(filters.is_empty());
        assert!(filters.matches(&candidate()));
    }

    #[test]
    fn each_filter_is_exact_match() {
        let c = candidate();

        let platform = CandidateFilters {
            platform: Some("tiktok".to_string()),
            ..CandidateFilters::default()
        };
        assert!(platform.matches(&c));

        let wrong_case = CandidateFilters {
            platform: Some("TikTok".to_string()),
            ..CandidateFilters::default()
        };
        assert!(!wrong_case.matches(&c));

        let all = CandidateFilters {
            country: Some("MX".to_string()),
            language: Some("es".to_string()),
            category: Some("music".to_string()),
            platform: Some("tiktok".to_string()),
        };
        assert!(all.matches(&c));

        let one_off = CandidateFilters {
            language: Some("en".to_string()),
            ..all
        };
        assert!(!one_off.matches(&c));
    }

    #[test]
    fn set_filter_rejects_candidate_with_missing_attribute() {
        let c = Candidate {
            country: None,
            ..candidate()
        };
        let filters = CandidateFilters {
            country: Some("MX".to_string()),
            ..CandidateFilters::default()
        };
        assert!(!filters.matches(&c));
    }

    #[test]
    fn deserializes_with_optional_fields_absent() {
        let c: Candidate = serde_json::from_str(
            r#"{"influencer_id": 3, "handle": "@x", "platform": "youtube"}"#,
        )
        .expect("minimal candidate");
        assert_eq!(c.influencer_id, 3);
        assert!(c.cost_per_post.is_none());
        assert!(c.virality_score.is_none());
    }
}
