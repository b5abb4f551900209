pub mod stats;
pub mod tracker;
pub mod types;

/// Storage key holding the plant roster document.
pub const PLANTS_KEY: &str = "plants";

/// Storage key for one plant's check-in journal.
///
/// Key names are shared with the journal's earlier browser-storage format,
/// so an exported data directory keeps the same document names.
pub fn check_ins_key(plant_id: &str) -> String {
    format!("checkIns_{plant_id}")
}
