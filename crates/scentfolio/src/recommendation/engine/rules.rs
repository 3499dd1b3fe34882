use super::config::ScoringConfig;
use super::taxonomy;
use crate::recommendation::domain::{CandidatePerfume, PreferenceProfile};

/// Runs rules 1 through 5 in order. Every rule contributes independently;
/// there is no early exit, and a rule that fires appends exactly one reason.
pub(crate) fn apply_rules(
    profile: &PreferenceProfile,
    candidate: &CandidatePerfume,
    config: &ScoringConfig,
) -> (i32, Vec<String>) {
    let mut score = 0;
    let mut reasons = Vec::new();

    // Rule 1: preferred-note bonus, scaled per matching note.
    let preferred = count_matches(&candidate.notes, &profile.preferred_notes) as i32;
    if preferred > 0 {
        let points = preferred * config.preferred_note_bonus;
        score += points;
        reasons.push(format!(
            "{preferred} preferred notes matched (+{points} points)"
        ));
    }

    // Rule 2: disliked-note penalty, scaled per matching note.
    let disliked = count_matches(&candidate.notes, &profile.disliked_notes) as i32;
    if disliked > 0 {
        let points = -disliked * config.disliked_note_penalty;
        score += points;
        reasons.push(format!(
            "{disliked} disliked notes matched ({points} points)"
        ));
    }

    // Rule 3: flat bonus when any declared usage context overlaps the
    // profile. Not scaled by the number of overlapping tags.
    if let Some(contexts) = &candidate.usage_contexts {
        let overlap: Vec<&str> = contexts
            .iter()
            .filter(|context| profile.usage_contexts.contains(*context))
            .map(String::as_str)
            .collect();
        if !overlap.is_empty() {
            score += config.usage_context_bonus;
            reasons.push(format!(
                "usage context matched ({}) (+{} points)",
                overlap.join(", "),
                config.usage_context_bonus
            ));
        }
    }

    // Rule 4: flat bonus when the candidate family is one the preferred
    // notes point at.
    let preferred_families = taxonomy::infer_preferred_families(&profile.preferred_notes);
    if preferred_families
        .iter()
        .any(|family| family.to_lowercase() == candidate.family.to_lowercase())
    {
        score += config.family_match_bonus;
        reasons.push(format!(
            "family matched ({}) (+{} points)",
            candidate.family, config.family_match_bonus
        ));
    }

    // Rule 5: mood pairing.
    if let Some((points, reason)) = mood_affinity(profile, candidate) {
        score += points;
        reasons.push(reason);
    }

    (score, reasons)
}

/// Counts candidate labels that appear in the reference list, comparing
/// case-insensitively on exact string equality. Duplicates in the candidate
/// sequence each count.
pub(crate) fn count_matches(candidates: &[String], reference: &[String]) -> usize {
    let reference: Vec<String> = reference.iter().map(|label| label.to_lowercase()).collect();
    candidates
        .iter()
        .filter(|label| reference.contains(&label.to_lowercase()))
        .count()
}

/// Rule 5 placeholder. Mood pairing (e.g. Professional with Woody) carries
/// no weights yet; future mood rules land here without reordering rules 1-4.
fn mood_affinity(
    _profile: &PreferenceProfile,
    _candidate: &CandidatePerfume,
) -> Option<(i32, String)> {
    None
}
