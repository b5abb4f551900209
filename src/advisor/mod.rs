//! AI plant advice pipeline.
//!
//! Provides the [`PlantAdvisor`] trait with two implementations: a Gemini
//! vision client and an offline fallback that answers with canned text. The
//! advisor is created via [`create_advisor`] from configuration. Callers are
//! expected to degrade to the fallback constants when a call fails, so a dead
//! network never blocks a plant from being saved.

pub mod gemini;
pub mod retry;

use anyhow::Result;
use async_trait::async_trait;

use crate::config::AdvisorConfig;
use crate::garden::types::SpeciesInfo;

/// Report text used when an initial assessment is unavailable.
pub const FALLBACK_INITIAL_REPORT: &str =
    "Plant added successfully! Start tracking its progress with regular check-ins.";

/// Report text used when a progress analysis is unavailable.
pub const FALLBACK_PROGRESS_REPORT: &str = "Check-in completed successfully!";

/// Tips text used when a progress analysis is unavailable.
pub const FALLBACK_PROGRESS_TIPS: &str = "Continue with regular watering and care.";

/// A photo ready to send to a vision model.
#[derive(Debug, Clone)]
pub struct PhotoPayload {
    /// Base64-encoded image bytes, no data-URL prefix.
    pub base64: String,
    /// MIME type of the encoded image (e.g. `"image/jpeg"`).
    pub mime_type: String,
}

/// Advice produced for one progress check-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckInAdvice {
    /// Narrative condition report.
    pub report: String,
    /// Actionable care tip.
    pub tips: String,
}

/// Trait for plant identification and care advice.
#[async_trait]
pub trait PlantAdvisor: Send + Sync {
    /// Identify the species shown in `photo`.
    async fn identify_species(&self, photo: &PhotoPayload) -> Result<SpeciesInfo>;

    /// First-impression report for a newly added plant called `name`.
    async fn initial_assessment(&self, name: &str, photo: &PhotoPayload) -> Result<String>;

    /// Condition report and care tip for an existing plant called `name`.
    async fn progress_check(&self, name: &str, photo: &PhotoPayload) -> Result<CheckInAdvice>;
}

/// Advisor that answers instantly with the canned fallback text.
///
/// Used when no API key is configured, and handy in tests.
pub struct OfflineAdvisor;

#[async_trait]
impl PlantAdvisor for OfflineAdvisor {
    async fn identify_species(&self, _photo: &PhotoPayload) -> Result<SpeciesInfo> {
        Ok(SpeciesInfo::unknown())
    }

    async fn initial_assessment(&self, _name: &str, _photo: &PhotoPayload) -> Result<String> {
        Ok(FALLBACK_INITIAL_REPORT.to_string())
    }

    async fn progress_check(&self, _name: &str, _photo: &PhotoPayload) -> Result<CheckInAdvice> {
        Ok(CheckInAdvice {
            report: FALLBACK_PROGRESS_REPORT.to_string(),
            tips: FALLBACK_PROGRESS_TIPS.to_string(),
        })
    }
}

/// Create an advisor from config.
///
/// `"gemini"` needs an API key (config file, `VERDANT_API_KEY`, or
/// `GEMINI_API_KEY`); without one it degrades to the offline advisor rather
/// than failing. `"offline"` selects the canned-text advisor directly.
pub fn create_advisor(config: &AdvisorConfig) -> Result<Box<dyn PlantAdvisor>> {
    match config.provider.as_str() {
        "gemini" => {
            if config.api_key.is_empty() {
                tracing::warn!("no Gemini API key configured, using offline advice");
                Ok(Box::new(OfflineAdvisor))
            } else {
                Ok(Box::new(gemini::GeminiAdvisor::new(config)))
            }
        }
        "offline" => Ok(Box::new(OfflineAdvisor)),
        other => anyhow::bail!("unknown advisor provider: {other}. Supported: gemini, offline"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn photo() -> PhotoPayload {
        PhotoPayload {
            base64: "aGk=".to_string(),
            mime_type: "image/jpeg".to_string(),
        }
    }

    fn advisor_config(provider: &str, api_key: &str) -> AdvisorConfig {
        AdvisorConfig {
            provider: provider.to_string(),
            api_key: api_key.to_string(),
            ..AdvisorConfig::default()
        }
    }

    #[tokio::test]
    async fn test_offline_advisor_answers_with_fallbacks() {
        let advisor = OfflineAdvisor;

        let species = advisor.identify_species(&photo()).await.unwrap();
        assert_eq!(species, SpeciesInfo::unknown());

        let report = advisor.initial_assessment("Fernie", &photo()).await.unwrap();
        assert_eq!(report, FALLBACK_INITIAL_REPORT);

        let advice = advisor.progress_check("Fernie", &photo()).await.unwrap();
        assert_eq!(advice.report, FALLBACK_PROGRESS_REPORT);
        assert_eq!(advice.tips, FALLBACK_PROGRESS_TIPS);
    }

    #[test]
    fn test_create_advisor_without_key_degrades_to_offline() {
        // Should not error; the factory swaps in the offline advisor
        assert!(create_advisor(&advisor_config("gemini", "")).is_ok());
    }

    #[test]
    fn test_create_advisor_unknown_provider_fails() {
        let err = create_advisor(&advisor_config("oracle", "k")).err().unwrap();
        assert!(err.to_string().contains("unknown advisor provider"));
    }

    #[test]
    fn test_create_advisor_offline_and_gemini() {
        assert!(create_advisor(&advisor_config("offline", "")).is_ok());
        assert!(create_advisor(&advisor_config("gemini", "secret")).is_ok());
    }
}
