//! Gemini vision client for species identification and care advice.
//!
//! Speaks the `generateContent` REST API with inline photo data. Species
//! identification requests structured JSON output through a response schema;
//! assessment and progress calls come back as free text. Every call runs
//! under the configured [`RetryPolicy`].

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::advisor::retry::RetryPolicy;
use crate::advisor::{CheckInAdvice, PhotoPayload, PlantAdvisor};
use crate::config::AdvisorConfig;
use crate::garden::types::SpeciesInfo;

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

const SPECIES_USER_PROMPT: &str =
    "Identify this plant species. Provide the common name, scientific name, and basic care summary.";
const SPECIES_SYSTEM_PROMPT: &str =
    "You are an expert botanist. Identify the plant and provide care information.";
const INITIAL_SYSTEM_PROMPT: &str =
    "You are a friendly plant care coach. Give encouraging advice.";
const PROGRESS_SYSTEM_PROMPT: &str =
    "You are a plant care coach. Analyze the plant and give friendly advice.";

/// Tip used when the model's reply has nothing usable after the tip marker.
const MISSING_TIP_FALLBACK: &str = "Continue with good care!";

/// Advisor backed by the Gemini `generateContent` endpoint.
pub struct GeminiAdvisor {
    client: reqwest::Client,
    api_key: String,
    model: String,
    retry: RetryPolicy,
}

impl GeminiAdvisor {
    pub fn new(config: &AdvisorConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            retry: RetryPolicy::new(
                config.max_attempts,
                Duration::from_millis(config.base_delay_ms),
                config.backoff_multiplier,
            ),
        }
    }

    /// Send one prompt-plus-photo request and return the reply text.
    async fn generate(
        &self,
        user_prompt: &str,
        photo: &PhotoPayload,
        system_prompt: &str,
        response_schema: Option<serde_json::Value>,
    ) -> Result<String> {
        let request = build_request(user_prompt, photo, system_prompt, response_schema);
        let url = format!(
            "{API_BASE}/{}:generateContent?key={}",
            self.model, self.api_key
        );

        self.retry.run(|| self.call_once(&url, &request)).await
    }

    async fn call_once(&self, url: &str, request: &GenerateContentRequest) -> Result<String> {
        let response = self
            .client
            .post(url)
            .json(request)
            .send()
            .await
            .context("Gemini request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Gemini API error: {} - {}", status.as_u16(), body);
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .context("Gemini response was not valid JSON")?;
        extract_text(body)
    }
}

#[async_trait]
impl PlantAdvisor for GeminiAdvisor {
    async fn identify_species(&self, photo: &PhotoPayload) -> Result<SpeciesInfo> {
        let text = self
            .generate(
                SPECIES_USER_PROMPT,
                photo,
                SPECIES_SYSTEM_PROMPT,
                Some(species_response_schema()),
            )
            .await?;
        serde_json::from_str(&text).context("species reply did not match the requested schema")
    }

    async fn initial_assessment(&self, name: &str, photo: &PhotoPayload) -> Result<String> {
        let prompt = format!("This is my plant named {name}. Give an initial assessment and care tip.");
        self.generate(&prompt, photo, INITIAL_SYSTEM_PROMPT, None)
            .await
    }

    async fn progress_check(&self, name: &str, photo: &PhotoPayload) -> Result<CheckInAdvice> {
        let prompt = format!("Analyze my {name} plant's condition and provide a care tip.");
        let raw = self
            .generate(&prompt, photo, PROGRESS_SYSTEM_PROMPT, None)
            .await?;
        Ok(split_care_advice(&raw))
    }
}

/// JSON schema (Gemini dialect, uppercase type names) for species replies.
fn species_response_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "OBJECT",
        "properties": {
            "speciesName": { "type": "STRING" },
            "scientificName": { "type": "STRING" },
            "basicCareSummary": { "type": "STRING" }
        },
        "required": ["speciesName", "scientificName", "basicCareSummary"]
    })
}

fn build_request(
    user_prompt: &str,
    photo: &PhotoPayload,
    system_prompt: &str,
    response_schema: Option<serde_json::Value>,
) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            role: "user".to_string(),
            parts: vec![
                Part::Text(user_prompt.to_string()),
                Part::InlineData(InlineData {
                    mime_type: photo.mime_type.clone(),
                    data: photo.base64.clone(),
                }),
            ],
        }],
        system_instruction: SystemInstruction {
            parts: vec![Part::Text(system_prompt.to_string())],
        },
        generation_config: response_schema.map(|schema| GenerationConfig {
            response_mime_type: "application/json".to_string(),
            response_schema: schema,
        }),
    }
}

/// Pull the reply text out of the first candidate.
fn extract_text(response: GenerateContentResponse) -> Result<String> {
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().next())
        .and_then(|p| p.text)
        .filter(|t| !t.is_empty())
        .context("API response was missing expected content.")
}

/// Split a free-text reply into report and tip at the first tip marker.
///
/// Recognizes `"Care Tip:"` and `"Tip:"` case-insensitively; the earlier
/// occurrence wins. A reply with no marker, or nothing usable on one side of
/// it, falls back to the whole text and a canned tip respectively.
fn split_care_advice(raw: &str) -> CheckInAdvice {
    let (before, after) = match find_tip_marker(raw) {
        Some((start, len)) => (&raw[..start], Some(&raw[start + len..])),
        None => (raw, None),
    };

    let report = match before.trim() {
        "" => raw.to_string(),
        trimmed => trimmed.to_string(),
    };
    let tips = match after.map(str::trim) {
        Some(t) if !t.is_empty() => t.to_string(),
        _ => MISSING_TIP_FALLBACK.to_string(),
    };

    CheckInAdvice { report, tips }
}

/// Byte offset and length of the leftmost tip marker, if any.
fn find_tip_marker(raw: &str) -> Option<(usize, usize)> {
    ["Care Tip:", "Tip:"]
        .iter()
        .filter_map(|marker| find_ignore_ascii_case(raw, marker).map(|pos| (pos, marker.len())))
        .min_by_key(|&(pos, _)| pos)
}

fn find_ignore_ascii_case(haystack: &str, needle: &str) -> Option<usize> {
    let haystack = haystack.as_bytes();
    let needle = needle.as_bytes();
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    (0..=haystack.len() - needle.len())
        .find(|&i| haystack[i..i + needle.len()].eq_ignore_ascii_case(needle))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    system_instruction: SystemInstruction,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

/// One message part on the wire: `{"text": ...}` or `{"inlineData": {...}}`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
enum Part {
    Text(String),
    InlineData(InlineData),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
struct SystemInstruction {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn photo() -> PhotoPayload {
        PhotoPayload {
            base64: "cGhvdG8=".to_string(),
            mime_type: "image/jpeg".to_string(),
        }
    }

    fn parse_response(json: &str) -> GenerateContentResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_request_wire_layout() {
        let request = build_request("look at this", &photo(), "be nice", None);
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "look at this");
        assert_eq!(
            json["contents"][0]["parts"][1]["inlineData"]["mimeType"],
            "image/jpeg"
        );
        assert_eq!(
            json["contents"][0]["parts"][1]["inlineData"]["data"],
            "cGhvdG8="
        );
        assert_eq!(json["systemInstruction"]["parts"][0]["text"], "be nice");
        assert!(json.get("generationConfig").is_none());
    }

    #[test]
    fn test_request_with_schema_sets_generation_config() {
        let request = build_request("identify", &photo(), "expert", Some(species_response_schema()));
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(
            json["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(json["generationConfig"]["responseSchema"]["type"], "OBJECT");
    }

    #[test]
    fn test_species_schema_requires_all_fields() {
        let schema = species_response_schema();
        let required = schema["required"].as_array().unwrap();
        assert_eq!(required.len(), 3);
        for key in ["speciesName", "scientificName", "basicCareSummary"] {
            assert!(required.contains(&serde_json::json!(key)));
            assert_eq!(schema["properties"][key]["type"], "STRING");
        }
    }

    #[test]
    fn test_extract_text_from_first_candidate() {
        let response = parse_response(
            r#"{"candidates": [{"content": {"parts": [{"text": "Looking healthy!"}]}}]}"#,
        );
        assert_eq!(extract_text(response).unwrap(), "Looking healthy!");
    }

    #[test]
    fn test_extract_text_missing_content_errors() {
        for body in [
            r#"{}"#,
            r#"{"candidates": []}"#,
            r#"{"candidates": [{"content": {"parts": []}}]}"#,
            r#"{"candidates": [{"content": {"parts": [{"text": ""}]}}]}"#,
        ] {
            let err = extract_text(parse_response(body)).unwrap_err();
            assert_eq!(err.to_string(), "API response was missing expected content.");
        }
    }

    #[test]
    fn test_split_on_care_tip_marker() {
        let advice = split_care_advice("Your fern looks great. Care Tip: mist the leaves daily.");
        assert_eq!(advice.report, "Your fern looks great.");
        assert_eq!(advice.tips, "mist the leaves daily.");
    }

    #[test]
    fn test_split_marker_is_case_insensitive() {
        let advice = split_care_advice("Healthy growth. TIP: rotate weekly.");
        assert_eq!(advice.report, "Healthy growth.");
        assert_eq!(advice.tips, "rotate weekly.");
    }

    #[test]
    fn test_split_prefers_earlier_marker() {
        // "Care Tip:" starts before the "Tip:" embedded inside it
        let advice = split_care_advice("Good color. Care Tip: water less.");
        assert_eq!(advice.report, "Good color.");
        assert_eq!(advice.tips, "water less.");
    }

    #[test]
    fn test_split_without_marker_uses_fallback_tip() {
        let advice = split_care_advice("Everything looks fine.");
        assert_eq!(advice.report, "Everything looks fine.");
        assert_eq!(advice.tips, MISSING_TIP_FALLBACK);
    }

    #[test]
    fn test_split_with_leading_marker_keeps_whole_text_as_report() {
        let advice = split_care_advice("Care Tip: give it more light.");
        assert_eq!(advice.report, "Care Tip: give it more light.");
        assert_eq!(advice.tips, "give it more light.");
    }

    #[test]
    fn test_split_with_trailing_marker_uses_fallback_tip() {
        let advice = split_care_advice("Doing well. Tip:   ");
        assert_eq!(advice.report, "Doing well.");
        assert_eq!(advice.tips, MISSING_TIP_FALLBACK);
    }

    #[test]
    fn test_species_reply_parses_into_species_info() {
        let text = r#"{"speciesName": "Boston Fern", "scientificName": "Nephrolepis exaltata", "basicCareSummary": "Keep soil moist."}"#;
        let info: SpeciesInfo = serde_json::from_str(text).unwrap();
        assert_eq!(info.species_name, "Boston Fern");
        assert_eq!(info.scientific_name, "Nephrolepis exaltata");
    }
}
