use anyhow::Result;
use chrono::Utc;

use crate::config::VerdantConfig;
use crate::garden::stats::garden_stats;
use crate::garden::tracker::Garden;

/// Display garden statistics in the terminal.
pub fn stats(config: &VerdantConfig) -> Result<()> {
    let garden = Garden::open(&config.resolved_data_dir())?;
    let response = garden_stats(&garden, Utc::now());

    println!("Garden Statistics");
    println!("{}", "=".repeat(40));
    println!("  Plants:              {}", response.total_plants);
    println!("  Due for a check-in:  {}", response.due_plants);
    println!();

    println!("Check-ins:");
    println!("  {:<12} {}", "total", response.total_check_ins);
    println!("  {:<12} {}", "initial", response.initial_check_ins);
    println!("  {:<12} {}", "progress", response.progress_check_ins);
    println!();

    if let Some(next) = response.next_reminder {
        println!("Next reminder:         {}", next.format("%Y-%m-%d"));
    }
    if let Some(last) = response.last_activity {
        println!("Last activity:         {}", last.format("%Y-%m-%d %H:%M"));
    }

    Ok(())
}
