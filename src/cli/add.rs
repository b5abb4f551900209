//! CLI `add` command — photograph a plant and start tracking it.

use anyhow::Result;
use chrono::Utc;
use std::path::Path;

use crate::advisor::{self, FALLBACK_INITIAL_REPORT};
use crate::config::VerdantConfig;
use crate::garden::tracker::Garden;
use crate::garden::types::SpeciesInfo;

/// Add a plant: identify it from the photo, get a first assessment, and
/// store both alongside the new roster entry.
///
/// AI failures never block the add. If identification fails the plant is
/// saved with the unknown-species fallback and the assessment is skipped;
/// if only the assessment fails its canned text is used instead.
pub async fn add(config: &VerdantConfig, name: &str, photo_path: &Path) -> Result<()> {
    anyhow::ensure!(!name.trim().is_empty(), "plant name must not be empty");

    let photo = super::load_photo(photo_path)?;
    let garden = Garden::open(&config.resolved_data_dir())?;
    let advisor = advisor::create_advisor(&config.advisor)?;

    let spinner = super::advice_spinner("Analyzing your plant...");
    let (species_info, initial_report) = match advisor.identify_species(&photo).await {
        Ok(species) => match advisor.initial_assessment(name, &photo).await {
            Ok(report) => (species, report),
            Err(e) => {
                tracing::warn!(error = %e, "initial assessment failed, using fallback text");
                (species, FALLBACK_INITIAL_REPORT.to_string())
            }
        },
        Err(e) => {
            tracing::warn!(error = %e, "species identification failed, adding without AI analysis");
            (SpeciesInfo::unknown(), FALLBACK_INITIAL_REPORT.to_string())
        }
    };
    spinner.finish_and_clear();

    let plant = garden.add_plant(name, &photo.base64, Some(species_info), &initial_report, Utc::now())?;

    println!("Added {}!", plant.name);
    println!("{}", "=".repeat(40));
    println!("  Id:             {}", plant.id);
    println!("  Species:        {}", plant.species_label());
    if let Some(ref info) = plant.species_info {
        println!("  Scientific:     {}", info.scientific_name);
        println!("  Care summary:   {}", info.basic_care_summary);
    }
    println!();
    println!("First assessment:");
    println!("  {initial_report}");
    println!();
    println!(
        "Next watering reminder: {}",
        plant.next_reminder.format("%Y-%m-%d")
    );

    Ok(())
}
