//! CLI `checkin` command — record a watering visit with a fresh photo.

use anyhow::Result;
use chrono::Utc;
use std::path::Path;

use crate::advisor::{self, CheckInAdvice, FALLBACK_PROGRESS_REPORT, FALLBACK_PROGRESS_TIPS};
use crate::config::VerdantConfig;
use crate::garden::tracker::Garden;
use crate::garden::types::reminder_after;

/// Check in on a plant: analyze the new photo, append a journal entry, and
/// push the watering reminder another week out.
pub async fn checkin(config: &VerdantConfig, selector: &str, photo_path: &Path) -> Result<()> {
    let garden = Garden::open(&config.resolved_data_dir())?;
    let plant = super::resolve_plant(&garden, selector)?;
    let photo = super::load_photo(photo_path)?;
    let advisor = advisor::create_advisor(&config.advisor)?;

    let spinner = super::advice_spinner("Checking on your plant...");
    let advice = match advisor.progress_check(&plant.name, &photo).await {
        Ok(advice) => advice,
        Err(e) => {
            tracing::warn!(error = %e, "progress analysis failed, using fallback text");
            CheckInAdvice {
                report: FALLBACK_PROGRESS_REPORT.to_string(),
                tips: FALLBACK_PROGRESS_TIPS.to_string(),
            }
        }
    };
    spinner.finish_and_clear();

    let Some(check_in) = garden.add_check_in(
        &plant.id,
        &photo.base64,
        &advice.report,
        &advice.tips,
        Utc::now(),
    )?
    else {
        anyhow::bail!("no plant found matching '{selector}'");
    };

    println!("Check-in recorded for {}", plant.name);
    println!("{}", "=".repeat(40));
    println!("Progress report:");
    println!("  {}", check_in.report);
    println!();
    println!("Care tip:");
    println!("  {}", check_in.tips);
    println!();
    println!(
        "Next watering reminder: {}",
        reminder_after(check_in.date).format("%Y-%m-%d")
    );

    Ok(())
}
