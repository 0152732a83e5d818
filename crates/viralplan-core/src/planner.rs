//! Greedy budget-constrained campaign selection.

use crate::campaign::{CampaignBrief, CampaignPlan, PlanItem};
use crate::candidates::Candidate;

/// Select influencers for a campaign brief.
///
/// `candidates` must already be filtered for the brief and sorted by
/// `virality_score` descending. Candidates are walked once in that order:
///
/// - once `desired_influencer_count` are selected, iteration stops;
/// - a candidate whose cost would push the running total over `budget` is
///   skipped and the walk continues, so a cheaper, lower-scored candidate can
///   still be taken;
/// - otherwise the candidate is accepted.
///
/// This is a greedy heuristic, not an optimal knapsack: earlier skips are never
/// revisited. `total_cost <= budget` and
/// `influencers.len() <= desired_influencer_count` hold for every result.
pub fn plan_campaign<I>(brief: &CampaignBrief, candidates: I) -> CampaignPlan
where
    I: IntoIterator<Item = Candidate>,
{
    let mut plan = CampaignPlan::default();

    for candidate in candidates {
        if plan.influencers.len() >= brief.desired_influencer_count {
            break;
        }

        let cost = candidate.cost();
        if plan.total_cost + cost > brief.budget {
            continue;
        }

        let expected_views = candidate.expected_views();
        let virality_score = candidate.virality();

        plan.total_cost += cost;
        plan.total_expected_views += expected_views;
        plan.influencers.push(PlanItem {
            influencer_id: candidate.influencer_id,
            handle: candidate.handle,
            platform: candidate.platform,
            estimated_cost: cost,
            expected_views,
            virality_score,
        });
    }

    plan
}

#[cfg(test)]
#[path = "planner_test.rs"]
mod tests;
