use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::garden::tracker::Garden;
use crate::garden::types::CheckInType;

/// Snapshot of the whole garden at one instant.
#[derive(Debug, Serialize)]
pub struct GardenStats {
    pub total_plants: u64,
    /// Plants whose reminder has arrived as of the snapshot instant.
    pub due_plants: u64,
    pub total_check_ins: u64,
    pub initial_check_ins: u64,
    pub progress_check_ins: u64,
    /// Earliest upcoming (or overdue) reminder across the roster.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_reminder: Option<DateTime<Utc>>,
    /// Most recent check-in anywhere in the garden.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_activity: Option<DateTime<Utc>>,
}

/// Compute garden statistics as of `now`.
pub fn garden_stats(garden: &Garden, now: DateTime<Utc>) -> GardenStats {
    let plants = garden.plants();

    let due_plants = plants.iter().filter(|p| p.is_due(now)).count() as u64;
    let next_reminder = plants.iter().map(|p| p.next_reminder).min();
    let last_activity = plants.iter().map(|p| p.last_check_in).max();

    let mut total_check_ins = 0;
    let mut initial_check_ins = 0;
    let mut progress_check_ins = 0;
    for plant in &plants {
        for check_in in garden.check_ins(&plant.id) {
            total_check_ins += 1;
            match check_in.check_in_type {
                CheckInType::Initial => initial_check_ins += 1,
                CheckInType::Progress => progress_check_ins += 1,
            }
        }
    }

    GardenStats {
        total_plants: plants.len() as u64,
        due_plants,
        total_check_ins,
        initial_check_ins,
        progress_check_ins,
        next_reminder,
        last_activity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use tempfile::TempDir;

    fn test_garden() -> (TempDir, Garden) {
        let dir = TempDir::new().unwrap();
        let garden = Garden::open(dir.path()).unwrap();
        (dir, garden)
    }

    fn ts(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    #[test]
    fn test_empty_garden_stats() {
        let (_dir, garden) = test_garden();
        let stats = garden_stats(&garden, ts("2026-03-01T00:00:00Z"));

        assert_eq!(stats.total_plants, 0);
        assert_eq!(stats.due_plants, 0);
        assert_eq!(stats.total_check_ins, 0);
        assert!(stats.next_reminder.is_none());
        assert!(stats.last_activity.is_none());
    }

    #[test]
    fn test_stats_counts_by_check_in_type() {
        let (_dir, garden) = test_garden();
        let now = ts("2026-03-01T00:00:00Z");
        let fern = garden.add_plant("Fernie", "YQ==", None, "hi", now).unwrap();
        garden.add_plant("Spike", "Yg==", None, "hi", now).unwrap();
        garden
            .add_check_in(&fern.id, "Yw==", "r", "t", now + Duration::days(2))
            .unwrap();

        let stats = garden_stats(&garden, now);
        assert_eq!(stats.total_plants, 2);
        assert_eq!(stats.total_check_ins, 3);
        assert_eq!(stats.initial_check_ins, 2);
        assert_eq!(stats.progress_check_ins, 1);
    }

    #[test]
    fn test_stats_due_count_includes_boundary() {
        let (_dir, garden) = test_garden();
        let t0 = ts("2026-03-01T00:00:00Z");
        garden.add_plant("Fernie", "YQ==", None, "hi", t0).unwrap();
        garden
            .add_plant("Spike", "Yg==", None, "hi", t0 + Duration::days(2))
            .unwrap();

        // Exactly seven days after the first plant's check-in
        let stats = garden_stats(&garden, t0 + Duration::days(7));
        assert_eq!(stats.due_plants, 1);

        let stats = garden_stats(&garden, t0 + Duration::days(10));
        assert_eq!(stats.due_plants, 2);
    }

    #[test]
    fn test_stats_reminder_and_activity_extremes() {
        let (_dir, garden) = test_garden();
        let t0 = ts("2026-03-01T00:00:00Z");
        let t1 = ts("2026-03-05T00:00:00Z");
        garden.add_plant("Fernie", "YQ==", None, "hi", t0).unwrap();
        garden.add_plant("Spike", "Yg==", None, "hi", t1).unwrap();

        let stats = garden_stats(&garden, t0);
        assert_eq!(stats.next_reminder, Some(t0 + Duration::days(7)));
        assert_eq!(stats.last_activity, Some(t1));
    }
}
