//! Plant care companion — track your plants locally, with AI-assisted check-ins.
//!
//! Verdant keeps a small garden journal on disk: every plant you register gets
//! a species identification and care summary from a multimodal model, and every
//! photo check-in gets a progress report plus a care tip. Seven days after each
//! check-in the plant becomes due for attention again.
//!
//! # Architecture
//!
//! - **Storage**: one JSON document per string key under the data directory —
//!   the plant roster under one key, each plant's check-in history under its own
//! - **Domain**: [`garden::tracker::Garden`], an explicit state object owning
//!   the roster; all clock inputs are passed in, so every operation is
//!   deterministic
//! - **Advice**: [`advisor::PlantAdvisor`] implementations — Gemini's
//!   `generateContent` API with bounded-backoff retries, or a fixed-text
//!   offline mode when no API key is configured
//!
//! # Modules
//!
//! - [`config`] — Configuration loading from TOML files and environment variables
//! - [`store`] — Key/value persistence: JSON files, atomic writes, corrupt-read recovery
//! - [`garden`] — Core domain: plants, check-ins, reminders, and statistics
//! - [`advisor`] — Species identification and progress reports via external AI

pub mod advisor;
pub mod config;
pub mod garden;
pub mod store;
