//! Write path — roster and journal updates over the persistence layer.
//!
//! [`Garden`] owns the [`Store`] and mediates every read and write. The
//! roster lives in a single document; each plant's journal lives in its own
//! document keyed by plant id, so listing plants never loads photo payloads.
//! [`Garden::add_plant`] and [`Garden::add_check_in`] are the only write
//! entry points, and both keep the reminder invariant: `next_reminder` is
//! always exactly seven days after `last_check_in`.

use anyhow::Result;
use chrono::{DateTime, Utc};
use std::path::Path;

use crate::garden::types::{reminder_after, CheckIn, CheckInType, Plant, SpeciesInfo};
use crate::garden::{check_ins_key, PLANTS_KEY};
use crate::store::Store;

/// Tips text stamped onto every plant's first journal entry.
pub const INITIAL_CHECK_IN_TIPS: &str = "Initial assessment completed";

/// The plant collection and its journals, backed by one data directory.
#[derive(Debug)]
pub struct Garden {
    store: Store,
}

impl Garden {
    /// Open (or create) the garden rooted at `data_dir`.
    pub fn open(data_dir: &Path) -> Result<Self> {
        let store = Store::open(data_dir)?;
        Ok(Self { store })
    }

    /// Every plant in the roster, in insertion order.
    pub fn plants(&self) -> Vec<Plant> {
        self.store.load(PLANTS_KEY, Vec::new())
    }

    /// Look up one plant by id.
    pub fn find_plant(&self, plant_id: &str) -> Option<Plant> {
        self.plants().into_iter().find(|p| p.id == plant_id)
    }

    /// One plant's journal, oldest first. Empty for an unknown id.
    pub fn check_ins(&self, plant_id: &str) -> Vec<CheckIn> {
        self.store.load(&check_ins_key(plant_id), Vec::new())
    }

    /// Create a plant together with its initial journal entry.
    ///
    /// The new plant's reminder clock starts at `now`. The journal document
    /// is written before the roster, so a failure between the two writes can
    /// only leave an unreferenced journal, never a plant without its initial
    /// entry.
    pub fn add_plant(
        &self,
        name: &str,
        photo_base64: &str,
        species_info: Option<SpeciesInfo>,
        initial_report: &str,
        now: DateTime<Utc>,
    ) -> Result<Plant> {
        let plant = Plant {
            id: uuid::Uuid::now_v7().to_string(),
            name: name.to_string(),
            species_info,
            last_check_in: now,
            next_reminder: reminder_after(now),
        };

        let check_in = CheckIn {
            id: uuid::Uuid::now_v7().to_string(),
            plant_id: plant.id.clone(),
            date: now,
            image_base64: photo_base64.to_string(),
            report: initial_report.to_string(),
            tips: INITIAL_CHECK_IN_TIPS.to_string(),
            check_in_type: CheckInType::Initial,
        };

        // 1. Journal document for the new plant
        self.store
            .save(&check_ins_key(&plant.id), &vec![check_in])?;

        // 2. Roster
        let mut plants = self.plants();
        plants.push(plant.clone());
        self.store.save(PLANTS_KEY, &plants)?;

        tracing::info!(id = %plant.id, name = %plant.name, "plant added");
        Ok(plant)
    }

    /// Append a progress entry to a plant's journal and reset its reminder.
    ///
    /// Returns `Ok(None)` without touching storage when `plant_id` matches
    /// nothing in the roster.
    pub fn add_check_in(
        &self,
        plant_id: &str,
        photo_base64: &str,
        report: &str,
        tips: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<CheckIn>> {
        let mut plants = self.plants();
        let Some(plant) = plants.iter_mut().find(|p| p.id == plant_id) else {
            tracing::warn!(id = %plant_id, "check-in for unknown plant, ignoring");
            return Ok(None);
        };

        let check_in = CheckIn {
            id: uuid::Uuid::now_v7().to_string(),
            plant_id: plant_id.to_string(),
            date: now,
            image_base64: photo_base64.to_string(),
            report: report.to_string(),
            tips: tips.to_string(),
            check_in_type: CheckInType::Progress,
        };

        // 1. Append to the journal
        let mut journal = self.check_ins(plant_id);
        journal.push(check_in.clone());
        self.store.save(&check_ins_key(plant_id), &journal)?;

        // 2. Reset the reminder clock
        plant.last_check_in = now;
        plant.next_reminder = reminder_after(now);
        let name = plant.name.clone();
        self.store.save(PLANTS_KEY, &plants)?;

        tracing::info!(id = %plant_id, name = %name, "check-in recorded");
        Ok(Some(check_in))
    }
}
