use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::recommendation::domain::CandidatePerfume;

/// Identifier wrapper for the owner of a collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

/// Identifier wrapper for a shelf entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PerfumeId(pub String);

/// A perfume as entered by its owner, with notes split by pyramid position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Perfume {
    pub name: String,
    pub brand: String,
    #[serde(default)]
    pub notes_top: Vec<String>,
    #[serde(default)]
    pub notes_middle: Vec<String>,
    #[serde(default)]
    pub notes_base: Vec<String>,
    pub family: String,
    pub mood: String,
    #[serde(default)]
    pub usage_contexts: Option<Vec<String>>,
}

impl Perfume {
    /// Flattens the note pyramid into the single sequence the engine scores.
    /// Position carries no weight and repeated notes are kept.
    pub fn flattened_notes(&self) -> Vec<String> {
        let mut notes =
            Vec::with_capacity(self.notes_top.len() + self.notes_middle.len() + self.notes_base.len());
        notes.extend(self.notes_top.iter().cloned());
        notes.extend(self.notes_middle.iter().cloned());
        notes.extend(self.notes_base.iter().cloned());
        notes
    }

    /// Builds the engine-facing view of this perfume.
    pub fn candidate(&self) -> CandidatePerfume {
        CandidatePerfume {
            notes: self.flattened_notes(),
            family: self.family.clone(),
            mood: self.mood.clone(),
            usage_contexts: self.usage_contexts.clone(),
        }
    }
}

/// Repository record pairing a perfume with its owner and timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerfumeRecord {
    pub id: PerfumeId,
    pub user_id: UserId,
    pub perfume: Perfume,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
