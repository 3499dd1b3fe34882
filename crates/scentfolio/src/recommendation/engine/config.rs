use serde::{Deserialize, Serialize};

/// Rule weights for the scoring pass. `Default` is the v1 ruleset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Added once per preferred-note match.
    pub preferred_note_bonus: i32,
    /// Subtracted once per disliked-note match. Deliberately heavier than
    /// the preferred bonus so one bad note outweighs one good one.
    pub disliked_note_penalty: i32,
    /// Flat bonus when any declared usage context overlaps the profile.
    pub usage_context_bonus: i32,
    /// Flat bonus when the candidate family is inferred from preferred notes.
    pub family_match_bonus: i32,
    /// Scores at or above this produce a recommend verdict.
    pub recommend_threshold: i32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            preferred_note_bonus: 20,
            disliked_note_penalty: 30,
            usage_context_bonus: 10,
            family_match_bonus: 15,
            recommend_threshold: 50,
        }
    }
}
