//! Batch scenario-image generation.
//!
//! A prompt-generation step turns the scenario narrative into a set of
//! distinct text-to-image prompts, then each prompt is submitted to the
//! Imagen predict endpoint concurrently. Individual failures are dropped
//! with a warning; only the all-failed case is an error.

use futures::future::join_all;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use flashpoint_core::media::GeneratedImage;

use crate::error::{GatewayError, Result};
use crate::gemini::{BASE_URL, GeminiClient, map_http_error, parse_retry_after};
use crate::prompts::render_image_prompts_prompt;

const MIN_IMAGE_COUNT: usize = 1;
const MAX_IMAGE_COUNT: usize = 7;
const IMAGE_STYLE_PREFIX: &str = "Action shot, dramatic lighting, photorealistic";

/// Generates a visual-narrative image set for a scenario.
#[derive(Clone)]
pub struct ScenarioImagesAgent {
    prompt_client: GeminiClient,
    http: Client,
    api_key: String,
    image_model: String,
}

#[derive(Deserialize)]
struct ImagePromptsResponse {
    prompts: Vec<String>,
}

#[derive(Serialize)]
struct PredictRequest {
    instances: Vec<PredictInstance>,
    parameters: PredictParameters,
}

#[derive(Serialize)]
struct PredictInstance {
    prompt: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PredictParameters {
    sample_count: u32,
}

#[derive(Deserialize)]
struct PredictResponse {
    #[serde(default)]
    predictions: Vec<Prediction>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Prediction {
    #[serde(default)]
    bytes_base64_encoded: Option<String>,
    #[serde(default)]
    mime_type: Option<String>,
}

impl ScenarioImagesAgent {
    pub fn new(
        prompt_client: GeminiClient,
        api_key: impl Into<String>,
        image_model: impl Into<String>,
    ) -> Self {
        Self {
            prompt_client,
            http: Client::new(),
            api_key: api_key.into(),
            image_model: image_model.into(),
        }
    }

    /// Generates up to `image_count` images (clamped to 1..=7).
    ///
    /// # Errors
    ///
    /// `AllGenerationsFailed` when every per-prompt generation failed while
    /// at least one was requested; prompt-step failures propagate as usual.
    pub async fn generate(
        &self,
        scenario_description: &str,
        image_count: usize,
    ) -> Result<Vec<GeneratedImage>> {
        let image_count = image_count.clamp(MIN_IMAGE_COUNT, MAX_IMAGE_COUNT);
        let prompt = render_image_prompts_prompt(scenario_description, image_count)?;
        let response: ImagePromptsResponse = self.prompt_client.generate_json(&prompt).await?;

        let mut image_prompts: Vec<String> = response
            .prompts
            .into_iter()
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect();
        if image_prompts.is_empty() {
            return Err(GatewayError::MalformedOutput(
                "prompt generation produced no image prompts".to_string(),
            ));
        }
        image_prompts.truncate(image_count);
        let requested = image_prompts.len();

        let generations = join_all(
            image_prompts
                .into_iter()
                .map(|p| async move { self.generate_image(p).await }),
        )
        .await;

        let images: Vec<GeneratedImage> = generations
            .into_iter()
            .filter_map(|generation| match generation {
                Ok(image) => Some(image),
                Err(error) => {
                    tracing::warn!(%error, "image generation failed, dropping prompt");
                    None
                }
            })
            .collect();

        if images.is_empty() {
            return Err(GatewayError::AllGenerationsFailed { requested });
        }
        Ok(images)
    }

    async fn generate_image(&self, prompt: String) -> Result<GeneratedImage> {
        let url = format!(
            "{BASE_URL}/models/{model}:predict?key={api_key}",
            model = self.image_model,
            api_key = self.api_key
        );
        let body = PredictRequest {
            instances: vec![PredictInstance {
                prompt: format!("{IMAGE_STYLE_PREFIX}: {prompt}"),
            }],
            parameters: PredictParameters { sample_count: 1 },
        };

        let response = self
            .http
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|err| GatewayError::Process {
                status_code: None,
                message: format!("image generation request failed: {err}"),
                is_retryable: err.is_connect() || err.is_timeout(),
                retry_after: None,
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let retry_after = parse_retry_after(response.headers().get("retry-after"));
            let body_text = response.text().await.unwrap_or_default();
            return Err(map_http_error(status, body_text, retry_after));
        }

        let parsed: PredictResponse = response.json().await.map_err(|err| {
            GatewayError::MalformedOutput(format!("failed to parse predict response: {err}"))
        })?;

        let url = extract_image_data_uri(parsed)?;
        Ok(GeneratedImage { prompt, url })
    }
}

fn extract_image_data_uri(response: PredictResponse) -> Result<String> {
    let prediction = response
        .predictions
        .into_iter()
        .find(|prediction| prediction.bytes_base64_encoded.is_some())
        .ok_or_else(|| {
            GatewayError::MalformedOutput("predict response contained no image data".to_string())
        })?;

    let mime_type = prediction
        .mime_type
        .unwrap_or_else(|| "image/png".to_string());
    // The API already returns base64; only the data-URI wrapper is ours.
    let data = prediction
        .bytes_base64_encoded
        .unwrap_or_default();
    Ok(format!("data:{mime_type};base64,{data}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_image_data_uri_wraps_payload() {
        let raw = r#"{
            "predictions": [
                { "bytesBase64Encoded": "QUJD", "mimeType": "image/png" }
            ]
        }"#;
        let response: PredictResponse = serde_json::from_str(raw).unwrap();
        let uri = extract_image_data_uri(response).unwrap();
        assert_eq!(uri, "data:image/png;base64,QUJD");
    }

    #[test]
    fn test_extract_image_data_uri_defaults_mime_type() {
        let raw = r#"{"predictions": [ { "bytesBase64Encoded": "QUJD" } ]}"#;
        let response: PredictResponse = serde_json::from_str(raw).unwrap();
        let uri = extract_image_data_uri(response).unwrap();
        assert!(uri.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn test_extract_image_data_uri_empty_predictions() {
        let response: PredictResponse = serde_json::from_str(r#"{"predictions": []}"#).unwrap();
        let err = extract_image_data_uri(response).unwrap_err();
        assert!(matches!(err, GatewayError::MalformedOutput(_)));
    }
}
