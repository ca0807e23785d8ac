//! Saved-simulation history: record construction, titles, tags, and the
//! filter / search / sort view over a user's records.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use secondyou_common::{ProfileInput, SavedSimulation, SimulationResult};

/// Default page size for history listings.
pub const DEFAULT_HISTORY_LIMIT: usize = 20;
/// Upper bound a caller may request.
pub const MAX_HISTORY_LIMIT: usize = 100;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryFilter {
    #[default]
    All,
    Favorites,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistorySort {
    #[default]
    Newest,
    Oldest,
    /// Favorites first, newest first within each group.
    Favorites,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryQuery {
    #[serde(default)]
    pub filter: HistoryFilter,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub sort: HistorySort,
    #[serde(default)]
    pub limit: Option<usize>,
}

impl HistoryQuery {
    pub fn effective_limit(&self) -> usize {
        self.limit
            .unwrap_or(DEFAULT_HISTORY_LIMIT)
            .clamp(1, MAX_HISTORY_LIMIT)
    }
}

/// Build a new history record for `user_id` from a finished simulation.
pub fn new_saved_simulation(
    user_id: &str,
    profile: &ProfileInput,
    result: &SimulationResult,
    now: DateTime<Utc>,
) -> SavedSimulation {
    SavedSimulation {
        id: Uuid::new_v4(),
        user_id: user_id.to_string(),
        title: generate_title(profile, now),
        description: profile.alternate_path.clone(),
        original_data: profile.clone(),
        alternate_path: result.alternate_path.clone(),
        current_path: result.current_path.clone(),
        metadata: result.metadata.clone(),
        is_favorite: false,
        tags: generate_tags(profile),
        created_at: now,
        updated_at: now,
    }
}

pub fn generate_title(profile: &ProfileInput, created_at: DateTime<Utc>) -> String {
    format!(
        "Life Path Simulation - {} in {} ({})",
        profile.profession,
        profile.location,
        created_at.format("%-m/%-d/%Y")
    )
}

/// Profession, location, an age bracket, then theme tags keyed off words in
/// the alternate decision.
pub fn generate_tags(profile: &ProfileInput) -> Vec<String> {
    const THEMES: &[(&[&str], &str)] = &[
        (&["career", "job"], "career-change"),
        (&["move", "relocate"], "relocation"),
        (&["start", "business"], "entrepreneurship"),
        (&["school", "study"], "education"),
        (&["travel"], "travel"),
        (&["relationship", "marriage"], "relationships"),
    ];

    let mut tags = vec![profile.profession.clone(), profile.location.clone()];

    tags.push(
        match profile.age {
            0..=24 => "young-adult",
            25..=34 => "early-career",
            35..=44 => "mid-career",
            _ => "experienced",
        }
        .to_string(),
    );

    let decision = profile.alternate_path.to_lowercase();
    for (words, tag) in THEMES {
        if words.iter().any(|w| decision.contains(w)) {
            tags.push(tag.to_string());
        }
    }

    tags
}

/// Case-insensitive match over title, description, tags, profession and location.
pub fn matches_search(sim: &SavedSimulation, term: &str) -> bool {
    let needle = term.to_lowercase();
    let hit = |s: &str| s.to_lowercase().contains(&needle);

    hit(sim.title.as_str())
        || hit(sim.description.as_str())
        || sim.tags.iter().any(|t| hit(t.as_str()))
        || hit(sim.original_data.profession.as_str())
        || hit(sim.original_data.location.as_str())
}

/// Filter, search, sort and truncate a user's records.
pub fn apply_query(mut sims: Vec<SavedSimulation>, query: &HistoryQuery) -> Vec<SavedSimulation> {
    if query.filter == HistoryFilter::Favorites {
        sims.retain(|s| s.is_favorite);
    }

    if let Some(term) = query.search.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        sims.retain(|s| matches_search(s, term));
    }

    match query.sort {
        HistorySort::Newest => sims.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        HistorySort::Oldest => sims.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        HistorySort::Favorites => sims.sort_by(|a, b| {
            b.is_favorite
                .cmp(&a.is_favorite)
                .then_with(|| b.created_at.cmp(&a.created_at))
        }),
    }

    sims.truncate(query.effective_limit());
    sims
}
