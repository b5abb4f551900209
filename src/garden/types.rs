//! Core plant and check-in type definitions.
//!
//! Defines [`Plant`] (a roster entry with its reminder schedule),
//! [`SpeciesInfo`] (AI identification data), [`CheckIn`] (one photographic
//! journal entry), and [`CheckInType`]. Records serialize with camelCase
//! field names and RFC 3339 timestamps so documents written by earlier
//! versions of the journal load unchanged.

#![allow(dead_code)]

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Days between a check-in and the next watering reminder.
pub const REMINDER_INTERVAL_DAYS: i64 = 7;

/// The reminder timestamp derived from a check-in at `checked_in_at`.
///
/// Invariant: a plant's `next_reminder` is always exactly this far past its
/// `last_check_in`.
pub fn reminder_after(checked_in_at: DateTime<Utc>) -> DateTime<Utc> {
    checked_in_at + Duration::days(REMINDER_INTERVAL_DAYS)
}

/// The two kinds of journal entry a plant can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckInType {
    /// The assessment created together with the plant itself — exactly one per plant.
    Initial,
    /// Every later photographic update.
    Progress,
}

impl CheckInType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Initial => "initial",
            Self::Progress => "progress",
        }
    }
}

impl std::fmt::Display for CheckInType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CheckInType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "initial" => Ok(Self::Initial),
            "progress" => Ok(Self::Progress),
            _ => Err(format!("unknown check-in type: {s}")),
        }
    }
}

/// Structured species identification for a plant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeciesInfo {
    /// Common name (e.g. `"Boston Fern"`).
    pub species_name: String,
    /// Scientific name (e.g. `"Nephrolepis exaltata"`).
    pub scientific_name: String,
    /// One- or two-sentence care summary.
    pub basic_care_summary: String,
}

impl SpeciesInfo {
    /// Fixed fallback used whenever identification is unavailable.
    pub fn unknown() -> Self {
        Self {
            species_name: "Unknown Species".to_string(),
            scientific_name: "Unknown".to_string(),
            basic_care_summary: "Water regularly and provide adequate light.".to_string(),
        }
    }
}

/// A roster entry. The check-in history lives under its own storage key,
/// looked up by plant id, so the roster stays small enough to load for a
/// summary listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plant {
    /// UUID v7 (time-sortable), generated at creation, immutable.
    pub id: String,
    /// User-supplied nickname. Non-empty by caller contract.
    pub name: String,
    /// Species identification; `None` renders as the unknown-species fallback.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub species_info: Option<SpeciesInfo>,
    /// Timestamp of the most recent check-in (creation time until then).
    pub last_check_in: DateTime<Utc>,
    /// Always exactly [`REMINDER_INTERVAL_DAYS`] after `last_check_in`.
    pub next_reminder: DateTime<Utc>,
}

impl Plant {
    /// `true` once `now` has reached the reminder; the boundary instant
    /// itself counts as due.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        now >= self.next_reminder
    }

    /// Common species name for display, with the unknown-species fallback.
    pub fn species_label(&self) -> &str {
        self.species_info
            .as_ref()
            .map(|s| s.species_name.as_str())
            .unwrap_or("Species Unknown")
    }
}

/// One journal entry, matching the persisted check-in document layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckIn {
    /// UUID v7 primary identifier.
    pub id: String,
    /// Lookup key back to the owning plant — not an ownership pointer.
    /// Defaults to empty for documents written before the field existed.
    #[serde(default)]
    pub plant_id: String,
    /// Set at creation, immutable.
    pub date: DateTime<Utc>,
    /// Encoded photo payload.
    pub image_base64: String,
    /// Narrative progress report (AI-generated or fallback text).
    pub report: String,
    /// Care advice; a fixed placeholder on the initial entry.
    pub tips: String,
    pub check_in_type: CheckInType,
}
