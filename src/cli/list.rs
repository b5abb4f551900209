use anyhow::Result;
use chrono::Utc;

use crate::config::VerdantConfig;
use crate::garden::tracker::Garden;

/// List every plant with its reminder status.
pub fn list(config: &VerdantConfig) -> Result<()> {
    let garden = Garden::open(&config.resolved_data_dir())?;
    let plants = garden.plants();

    if plants.is_empty() {
        println!("No plants yet.");
        println!("Add your first one with: verdant add --name <name> --photo <file>");
        return Ok(());
    }

    let now = Utc::now();
    println!("Your Garden ({} plant(s))\n", plants.len());
    for plant in &plants {
        println!("  {} [{}]", plant.name, plant.species_label());
        println!("    id:             {}", plant.id);
        println!(
            "    last check-in:  {}",
            plant.last_check_in.format("%Y-%m-%d")
        );
        println!(
            "    next reminder:  {}",
            plant.next_reminder.format("%Y-%m-%d")
        );
        if plant.is_due(now) {
            println!("    Time to water and check-in!");
        }
        println!();
    }

    Ok(())
}
