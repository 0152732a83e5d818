use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::*;
use crate::CandidateFilters;

fn brief(budget: f64, count: usize) -> CampaignBrief {
    CampaignBrief {
        objective: "test campaign".to_string(),
        target_country: None,
        target_language: None,
        category: None,
        platform: None,
        budget,
        desired_influencer_count: count,
    }
}

fn candidate(id: i64, score: f64, cost: f64) -> Candidate {
    Candidate {
        influencer_id: id,
        handle: format!("@creator{id:04}"),
        platform: "tiktok".to_string(),
        country: Some("US".to_string()),
        language: Some("en".to_string()),
        category: Some("music".to_string()),
        content_style: None,
        cost_per_post: Some(cost),
        follower_count: Some(10_000),
        recent_avg_views: Some(1_000.0),
        virality_score: Some(score),
    }
}

fn ids(plan: &CampaignPlan) -> Vec<i64> {
    plan.influencers.iter().map(|i| i.influencer_id).collect()
}

#[test]
fn empty_candidates_yield_empty_plan() {
    let plan = plan_campaign(&brief(10_000.0, 10), Vec::new());
    assert!(plan.influencers.is_empty());
    assert!(plan.total_cost.abs() < f64::EPSILON);
    assert!(plan.total_expected_views.abs() < f64::EPSILON);
}

#[test]
fn skips_unaffordable_candidate_and_keeps_going() {
    let candidates = vec![
        candidate(1, 90.0, 1_000.0),
        candidate(2, 80.0, 1.0),
        candidate(3, 70.0, 1.0),
    ];

    let plan = plan_campaign(&brief(2.0, 2), candidates);

    assert_eq!(ids(&plan), vec![2, 3]);
    assert!((plan.total_cost - 2.0).abs() < f64::EPSILON);
}

#[test]
fn count_cap_stops_even_when_cheap_candidates_remain() {
    let candidates = vec![
        candidate(1, 90.0, 10.0),
        candidate(2, 80.0, 10.0),
        candidate(3, 70.0, 0.0),
        candidate(4, 60.0, 0.0),
    ];

    let plan = plan_campaign(&brief(1_000.0, 2), candidates);

    assert_eq!(ids(&plan), vec![1, 2]);
    assert!((plan.total_cost - 20.0).abs() < f64::EPSILON);
}

#[test]
fn candidate_exactly_filling_budget_is_accepted() {
    let plan = plan_campaign(
        &brief(100.0, 5),
        vec![candidate(1, 9.0, 60.0), candidate(2, 8.0, 40.0)],
    );
    assert_eq!(ids(&plan), vec![1, 2]);
    assert!((plan.total_cost - 100.0).abs() < f64::EPSILON);
}

#[test]
fn zero_budget_only_takes_free_candidates() {
    let mut free = candidate(2, 50.0, 0.0);
    free.cost_per_post = None;

    let plan = plan_campaign(&brief(0.0, 5), vec![candidate(1, 90.0, 5.0), free]);

    assert_eq!(ids(&plan), vec![2]);
    assert!(plan.total_cost.abs() < f64::EPSILON);
    assert!(plan.influencers[0].estimated_cost.abs() < f64::EPSILON);
}

#[test]
fn follower_count_is_used_when_recent_views_absent() {
    let mut c = candidate(1, 10.0, 5.0);
    c.recent_avg_views = None;
    c.follower_count = Some(500_000);

    let plan = plan_campaign(&brief(100.0, 5), vec![c]);

    assert!((plan.influencers[0].expected_views - 500_000.0).abs() < f64::EPSILON);
    assert!((plan.total_expected_views - 500_000.0).abs() < f64::EPSILON);
}

#[test]
fn missing_metrics_and_score_become_zero() {
    let mut c = candidate(1, 0.0, 5.0);
    c.recent_avg_views = None;
    c.follower_count = None;
    c.virality_score = None;

    let plan = plan_campaign(&brief(100.0, 5), vec![c]);

    let item = &plan.influencers[0];
    assert!(item.expected_views.abs() < f64::EPSILON);
    assert!(item.virality_score.abs() < f64::EPSILON);
}

#[test]
fn items_carry_candidate_identity() {
    let plan = plan_campaign(&brief(100.0, 5), vec![candidate(42, 77.5, 12.5)]);
    let item = &plan.influencers[0];
    assert_eq!(item.influencer_id, 42);
    assert_eq!(item.handle, "@creator0042");
    assert_eq!(item.platform, "tiktok");
    assert!((item.estimated_cost - 12.5).abs() < f64::EPSILON);
    assert!((item.virality_score - 77.5).abs() < f64::EPSILON);
}

#[test]
fn selection_order_follows_input_order() {
    let candidates = vec![
        candidate(5, 99.0, 30.0),
        candidate(3, 95.0, 80.0),
        candidate(9, 90.0, 30.0),
        candidate(1, 10.0, 30.0),
    ];

    let plan = plan_campaign(&brief(100.0, 10), candidates);

    assert_eq!(ids(&plan), vec![5, 9, 1]);
}

#[test]
fn platform_filter_applied_by_source_holds_in_plan() {
    let mut pool = Vec::new();
    for id in 1..=30 {
        let mut c = candidate(id, f64::from(100 - i32::try_from(id).unwrap()), 10.0);
        c.platform = match id % 3 {
            0 => "tiktok",
            1 => "instagram",
            _ => "youtube",
        }
        .to_string();
        pool.push(c);
    }

    let b = CampaignBrief {
        platform: Some("tiktok".to_string()),
        ..brief(1_000.0, 50)
    };
    let filters: CandidateFilters = b.filters();
    let plan = plan_campaign(&b, pool.into_iter().filter(|c| filters.matches(c)));

    assert_eq!(plan.influencers.len(), 10);
    assert!(plan.influencers.iter().all(|i| i.platform == "tiktok"));
}

#[test]
fn whitespace_platform_filter_is_compared_verbatim() {
    let mut pool = vec![candidate(1, 9.0, 10.0), candidate(2, 8.0, 10.0)];
    pool[1].platform = "instagram".to_string();

    for wanted in ["  ", " tiktok "] {
        let b = CampaignBrief {
            platform: Some(wanted.to_string()),
            ..brief(1_000.0, 10)
        };
        let filters = b.filters();
        let plan = plan_campaign(&b, pool.iter().cloned().filter(|c| filters.matches(c)));

        assert!(
            plan.influencers.iter().all(|i| i.platform == wanted),
            "platform filter {wanted:?} selected {:?}",
            plan.influencers.iter().map(|i| &i.platform).collect::<Vec<_>>()
        );
        assert!(plan.influencers.is_empty());
    }
}

#[test]
fn randomized_inputs_respect_budget_and_count() {
    let mut rng = StdRng::seed_from_u64(0x5EED);

    for _ in 0..500 {
        let n = rng.random_range(0..60);
        let mut candidates: Vec<Candidate> = (0..n)
            .map(|id| {
                let mut c = candidate(id, rng.random_range(0.0..100.0), rng.random_range(0.0..5_000.0));
                if rng.random_bool(0.1) {
                    c.cost_per_post = None;
                }
                c
            })
            .collect();
        candidates.sort_by(|a, b| b.virality().total_cmp(&a.virality()));

        let budget = rng.random_range(0.0..20_000.0);
        let count = rng.random_range(1..20);
        let plan = plan_campaign(&brief(budget, count), candidates.clone());

        assert!(plan.total_cost <= budget, "{} > {budget}", plan.total_cost);
        assert!(plan.influencers.len() <= count);

        let summed: f64 = plan.influencers.iter().map(|i| i.estimated_cost).sum();
        assert!((summed - plan.total_cost).abs() < 1e-6);

        // Selected items keep their relative input order.
        let positions: Vec<usize> = plan
            .influencers
            .iter()
            .map(|item| {
                candidates
                    .iter()
                    .position(|c| c.influencer_id == item.influencer_id)
                    .expect("selected id comes from input")
            })
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }
}
