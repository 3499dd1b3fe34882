use crate::infra::{InMemoryCollectionRepository, InMemoryRecommendationRepository};
use chrono::{DateTime, Utc};
use clap::Args;
use scentfolio::collection::import::CsvCollectionImporter;
use scentfolio::collection::{Perfume, UserId};
use scentfolio::error::AppError;
use scentfolio::recommendation::{
    PreferenceProfile, RecommendationEngine, RecommendationService, ScoringConfig, ScoringResult,
    RULE_VERSION,
};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Optional CSV collection export to hydrate the shelf instead of the
    /// built-in samples.
    #[arg(long)]
    pub(crate) collection: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// CSV collection export to score
    pub(crate) collection: PathBuf,
    /// Preferred notes, comma separated
    #[arg(long, value_delimiter = ',')]
    pub(crate) preferred: Vec<String>,
    /// Disliked notes, comma separated
    #[arg(long, value_delimiter = ',')]
    pub(crate) disliked: Vec<String>,
    /// Usage contexts, comma separated
    #[arg(long, value_delimiter = ',')]
    pub(crate) contexts: Vec<String>,
    /// Emit the report as JSON instead of plain text
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { collection } = args;

    println!("Scentfolio demo");

    let store = Arc::new(InMemoryCollectionRepository::default());
    let results = Arc::new(InMemoryRecommendationRepository::default());
    let service = Arc::new(RecommendationService::new(
        store,
        results,
        ScoringConfig::default(),
    ));

    let owner = UserId("demo-user".to_string());
    let profile = demo_profile();
    println!(
        "Preferences: likes {} | dislikes {} | worn {}",
        profile.preferred_notes.join(", "),
        profile.disliked_notes.join(", "),
        profile.usage_contexts.join(", ")
    );
    if let Err(err) = service.save_preferences(&owner, profile) {
        println!("  Preferences rejected: {}", err);
        return Ok(());
    }

    let stored = match collection {
        Some(path) => {
            let perfumes = CsvCollectionImporter::from_path(&path)?;
            println!("Shelf: {} perfumes imported from {}", perfumes.len(), path.display());
            let mut stored = Vec::with_capacity(perfumes.len());
            for perfume in perfumes {
                match service.add_perfume(&owner, perfume) {
                    Ok(record) => stored.push(record),
                    Err(err) => {
                        println!("  Shelf entry rejected: {}", err);
                        return Ok(());
                    }
                }
            }
            stored
        }
        None => {
            let mut stored = Vec::new();
            for perfume in demo_shelf() {
                match service.add_perfume(&owner, perfume) {
                    Ok(record) => stored.push(record),
                    Err(err) => {
                        println!("  Shelf entry rejected: {}", err);
                        return Ok(());
                    }
                }
            }
            println!("Shelf: {} built-in samples", stored.len());
            stored
        }
    };

    let generated = match service.generate(&owner) {
        Ok(rows) => rows,
        Err(err) => {
            println!("  Generation unavailable: {}", err);
            return Ok(());
        }
    };

    println!("\nScoring run (ruleset {})", RULE_VERSION);
    for row in &generated {
        let name = stored
            .iter()
            .find(|record| record.id == row.perfume_id)
            .map(|record| record.perfume.name.as_str())
            .unwrap_or("unknown");
        println!("- {} -> {} (score {})", name, row.verdict.label(), row.score);
        for reason in row.reasons.iter().skip(1) {
            println!("    {}", reason);
        }
    }

    if let Some(row) = generated.first() {
        match serde_json::to_string_pretty(&row.view()) {
            Ok(json) => println!("\nStored result payload:\n{}", json),
            Err(err) => println!("\nStored result payload unavailable: {}", err),
        }
    }

    Ok(())
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs {
        collection,
        preferred,
        disliked,
        contexts,
        json,
    } = args;

    let perfumes = CsvCollectionImporter::from_path(&collection)?;
    let profile = PreferenceProfile {
        preferred_notes: preferred,
        disliked_notes: disliked,
        usage_contexts: contexts,
    };
    let engine = RecommendationEngine::new(ScoringConfig::default());

    let entries: Vec<ScoreEntry> = perfumes
        .iter()
        .map(|perfume| {
            let result = engine.score(&profile, &perfume.candidate());
            ScoreEntry {
                name: perfume.name.clone(),
                brand: perfume.brand.clone(),
                result,
            }
        })
        .collect();

    if json {
        let report = ScoreReport {
            rule_version: RULE_VERSION,
            generated_at: Utc::now(),
            entries,
        };
        match serde_json::to_string_pretty(&report) {
            Ok(payload) => println!("{}", payload),
            Err(err) => println!("Report unavailable: {}", err),
        }
        return Ok(());
    }

    println!("Scoring {} perfumes (ruleset {})", entries.len(), RULE_VERSION);
    for entry in &entries {
        println!(
            "- {} ({}) -> {} (score {})",
            entry.name,
            entry.brand,
            entry.result.verdict.label(),
            entry.result.score
        );
        for reason in entry.result.reasons.iter().skip(1) {
            println!("    {}", reason);
        }
    }

    Ok(())
}

#[derive(Debug, Serialize)]
struct ScoreEntry {
    name: String,
    brand: String,
    #[serde(flatten)]
    result: ScoringResult,
}

#[derive(Debug, Serialize)]
struct ScoreReport {
    rule_version: &'static str,
    generated_at: DateTime<Utc>,
    entries: Vec<ScoreEntry>,
}

fn demo_profile() -> PreferenceProfile {
    PreferenceProfile {
        preferred_notes: vec![
            "Citrus".to_string(),
            "Bergamot".to_string(),
            "Mint".to_string(),
        ],
        disliked_notes: vec!["Patchouli".to_string(), "Oud".to_string()],
        usage_contexts: vec!["daily".to_string(), "work".to_string()],
    }
}

fn demo_shelf() -> Vec<Perfume> {
    vec![
        Perfume {
            name: "Aqua Vite".to_string(),
            brand: "Maison Demo".to_string(),
            notes_top: vec!["Citrus".to_string(), "Bergamot".to_string()],
            notes_middle: vec!["Mint".to_string()],
            notes_base: vec!["Cedar".to_string()],
            family: "Fresh".to_string(),
            mood: "Clean".to_string(),
            usage_contexts: Some(vec!["daily".to_string(), "work".to_string()]),
        },
        Perfume {
            name: "Nightfall".to_string(),
            brand: "Maison Demo".to_string(),
            notes_top: vec!["Oud".to_string()],
            notes_middle: vec!["Patchouli".to_string()],
            notes_base: vec!["Sandalwood".to_string()],
            family: "Woody".to_string(),
            mood: "Intense".to_string(),
            usage_contexts: Some(vec!["evening".to_string()]),
        },
        Perfume {
            name: "Bloom".to_string(),
            brand: "Maison Demo".to_string(),
            notes_top: vec!["Rose".to_string()],
            notes_middle: vec!["Jasmine".to_string()],
            notes_base: vec!["Vanilla".to_string()],
            family: "Floral".to_string(),
            mood: "Romantic".to_string(),
            usage_contexts: Some(vec!["date".to_string()]),
        },
    ]
}
