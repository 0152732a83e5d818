use std::path::{Path, PathBuf};

use clap::Args;
use viralplan_core::{plan_campaign, AppConfig, CampaignBrief, Candidate, DEFAULT_INFLUENCER_COUNT};

#[derive(Debug, Args)]
pub struct PlanArgs {
    /// Total spend ceiling
    #[arg(long)]
    pub budget: f64,
    /// Maximum number of influencers to select
    #[arg(long, default_value_t = DEFAULT_INFLUENCER_COUNT)]
    pub count: usize,
    /// Exact-match country filter (e.g., US)
    #[arg(long)]
    pub country: Option<String>,
    /// Exact-match language filter (e.g., en)
    #[arg(long)]
    pub language: Option<String>,
    /// Exact-match content category filter
    #[arg(long)]
    pub category: Option<String>,
    /// Exact-match platform filter (e.g., tiktok)
    #[arg(long)]
    pub platform: Option<String>,
    /// Free-text campaign goal, echoed into logs
    #[arg(long, default_value = "awareness")]
    pub objective: String,
    /// Plan over candidates from a JSON file instead of the database
    #[arg(long)]
    pub candidates_file: Option<PathBuf>,
}

impl PlanArgs {
    pub(crate) fn to_brief(&self) -> CampaignBrief {
        CampaignBrief {
            objective: self.objective.clone(),
            target_country: self.country.clone(),
            target_language: self.language.clone(),
            category: self.category.clone(),
            platform: self.platform.clone(),
            budget: self.budget,
            desired_influencer_count: self.count,
        }
    }
}

/// Plan a campaign and print the plan as pretty JSON.
///
/// # Errors
///
/// Returns an error if the brief is invalid or the candidate source fails.
pub(crate) async fn run_plan(config: &AppConfig, args: &PlanArgs) -> anyhow::Result<()> {
    let brief = args.to_brief();
    brief.validate()?;

    let candidates = match &args.candidates_file {
        Some(path) => candidates_from_file(path, &brief)?,
        None => {
            let pool = crate::connect(config).await?;
            viralplan_db::list_candidates(&pool, &brief.filters()).await?
        }
    };
    let candidate_count = candidates.len();

    let plan = plan_campaign(&brief, candidates);
    tracing::info!(
        objective = %brief.objective,
        candidates = candidate_count,
        selected = plan.influencers.len(),
        total_cost = plan.total_cost,
        "campaign planned"
    );

    println!("{}", serde_json::to_string_pretty(&plan)?);
    Ok(())
}

/// Reads a JSON array of candidates and puts it in planner order.
///
/// Applies the brief's filters and sorts by virality score descending; the
/// sort is stable, so equal scores keep file order.
fn candidates_from_file(path: &Path, brief: &CampaignBrief) -> anyhow::Result<Vec<Candidate>> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))?;
    let candidates: Vec<Candidate> = serde_json::from_str(&raw)?;
    Ok(rank_candidates(candidates, brief))
}

pub(crate) fn rank_candidates(candidates: Vec<Candidate>, brief: &CampaignBrief) -> Vec<Candidate> {
    let filters = brief.filters();
    let mut ranked: Vec<Candidate> = candidates
        .into_iter()
        .filter(|c| filters.matches(c))
        .collect();
    ranked.sort_by(|a, b| b.virality().total_cmp(&a.virality()));
    ranked
}
