use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// --- Profile ---

/// A validated, sanitized profile. Only produced by the validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileInput {
    pub age: u8,
    pub location: String,
    pub profession: String,
    pub traits: String,
    pub alternate_path: String,
}

/// The request body exactly as received. Every field is an arbitrary JSON
/// value so the validator can apply its own presence and type rules.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProfile {
    #[serde(default)]
    pub age: Option<serde_json::Value>,
    #[serde(default)]
    pub location: Option<serde_json::Value>,
    #[serde(default)]
    pub profession: Option<serde_json::Value>,
    #[serde(default)]
    pub traits: Option<serde_json::Value>,
    #[serde(default)]
    pub alternate_path: Option<serde_json::Value>,
}

// --- Narrative ---

/// Which of the two simulated trajectories a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathKind {
    Alternate,
    Current,
}

impl std::fmt::Display for PathKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathKind::Alternate => write!(f, "alternate path"),
            PathKind::Current => write!(f, "current path"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathNarrative {
    pub year1: String,
    pub year3: String,
    pub year10: String,
    pub future_message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationMetadata {
    pub generated_at: DateTime<Utc>,
    pub user_age: u8,
    pub alternate_decision: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    pub alternate_path: PathNarrative,
    pub current_path: PathNarrative,
    pub metadata: SimulationMetadata,
}

// --- History ---

/// A simulation the user chose to keep, with the profile that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedSimulation {
    pub id: Uuid,
    pub user_id: String,
    pub title: String,
    pub description: String,
    pub original_data: ProfileInput,
    pub alternate_path: PathNarrative,
    pub current_path: PathNarrative,
    pub metadata: SimulationMetadata,
    pub is_favorite: bool,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
