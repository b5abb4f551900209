//! CLI `show` command — full details and history for a single plant.

use anyhow::Result;
use chrono::Utc;

use crate::config::VerdantConfig;
use crate::garden::tracker::Garden;
use crate::garden::types::CheckInType;

/// Show one plant's card and its journal, most recent entry first.
pub fn show(config: &VerdantConfig, selector: &str) -> Result<()> {
    let garden = Garden::open(&config.resolved_data_dir())?;
    let plant = super::resolve_plant(&garden, selector)?;
    let mut journal = garden.check_ins(&plant.id);
    journal.reverse();

    println!("Plant: {}", plant.name);
    println!("{}", "=".repeat(50));
    println!("  Id:             {}", plant.id);
    println!("  Species:        {}", plant.species_label());
    if let Some(ref info) = plant.species_info {
        println!("  Scientific:     {}", info.scientific_name);
        println!("  Care summary:   {}", info.basic_care_summary);
    }
    println!(
        "  Last check-in:  {}",
        plant.last_check_in.format("%Y-%m-%d %H:%M")
    );
    println!(
        "  Next reminder:  {}",
        plant.next_reminder.format("%Y-%m-%d")
    );
    if plant.is_due(Utc::now()) {
        println!("  Time to water and check-in!");
    }

    println!();
    println!("Progress History ({} entries)", journal.len());
    for entry in &journal {
        println!();
        println!(
            "  {} [{}]",
            entry.date.format("%Y-%m-%d %H:%M"),
            entry.check_in_type
        );
        println!("    Report: {}", entry.report);
        if entry.check_in_type == CheckInType::Progress {
            println!("    Care tip: {}", entry.tips);
        }
        // base64 stores 4 chars per 3 raw bytes
        println!("    Photo: ~{} KB", entry.image_base64.len() * 3 / 4 / 1024);
    }

    Ok(())
}
