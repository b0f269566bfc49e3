//! Outcome-video synthesis.
//!
//! Two-step sub-protocol: a director prompt turns (scenario, choice) into a
//! single cinematic text-to-video prompt, then a Veo long-running job is
//! submitted and polled until it reports done or error. The finished video
//! is downloaded and packaged as a `data:video/mp4;base64,...` URI so the
//! caller holds a self-contained playable reference.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use flashpoint_core::media::OutcomeVideo;

use crate::error::{GatewayError, Result};
use crate::gemini::{BASE_URL, GeminiClient, map_http_error, parse_retry_after};
use crate::prompts::render_video_prompt;

/// Generates a short video of a decision's immediate consequence.
#[derive(Clone)]
pub struct OutcomeVideoAgent {
    prompt_client: GeminiClient,
    http: Client,
    api_key: String,
    video_model: String,
    poll_interval: Duration,
}

#[derive(Deserialize)]
struct VideoPromptResponse {
    prompt: String,
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
    aspect_ratio: String,
    duration_seconds: u32,
}

#[derive(Deserialize)]
struct OperationHandle {
    name: String,
}

#[derive(Deserialize)]
struct OperationStatus {
    #[serde(default)]
    done: bool,
    #[serde(default)]
    error: Option<OperationError>,
    #[serde(default)]
    response: Option<OperationResponse>,
}

#[derive(Deserialize)]
struct OperationError {
    #[serde(default)]
    message: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct OperationResponse {
    #[serde(default)]
    generate_video_response: Option<GenerateVideoResponse>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateVideoResponse {
    #[serde(default)]
    generated_samples: Vec<GeneratedSample>,
}

#[derive(Deserialize)]
struct GeneratedSample {
    #[serde(default)]
    video: Option<VideoRef>,
}

#[derive(Deserialize)]
struct VideoRef {
    #[serde(default)]
    uri: Option<String>,
}

impl OutcomeVideoAgent {
    pub fn new(
        prompt_client: GeminiClient,
        api_key: impl Into<String>,
        video_model: impl Into<String>,
        poll_interval: Duration,
    ) -> Self {
        Self {
            prompt_client,
            http: Client::new(),
            api_key: api_key.into(),
            video_model: video_model.into(),
            poll_interval,
        }
    }

    /// Generates the outcome video for a chosen action.
    ///
    /// Blocks (asynchronously) until the remote job reaches a terminal
    /// status; there is no cancellation once the job is submitted.
    pub async fn generate(
        &self,
        scenario_description: &str,
        user_choice: &str,
    ) -> Result<OutcomeVideo> {
        let director_prompt = render_video_prompt(scenario_description, user_choice)?;
        let outcome_prompt = self
            .prompt_client
            .generate_json::<VideoPromptResponse>(&director_prompt)
            .await?
            .prompt;
        tracing::info!(prompt = %outcome_prompt, "submitting outcome video generation");

        let operation = self.submit_job(&outcome_prompt).await?;
        let video_uri = self.poll_until_done(&operation.name).await?;
        let video_url = self.download_as_data_uri(&video_uri).await?;

        Ok(OutcomeVideo {
            video_url,
            outcome_prompt,
        })
    }

    async fn submit_job(&self, prompt: &str) -> Result<OperationHandle> {
        let url = format!(
            "{BASE_URL}/models/{model}:predictLongRunning?key={api_key}",
            model = self.video_model,
            api_key = self.api_key
        );
        let body = PredictRequest {
            instances: vec![PredictInstance {
                prompt: prompt.to_string(),
            }],
            parameters: PredictParameters {
                aspect_ratio: "16:9".to_string(),
                duration_seconds: 5,
            },
        };

        let response = self
            .http
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|err| GatewayError::Process {
                status_code: None,
                message: format!("video job submission failed: {err}"),
                is_retryable: err.is_connect() || err.is_timeout(),
                retry_after: None,
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let retry_after = parse_retry_after(response.headers().get("retry-after"));
            let body_text = response.text().await.unwrap_or_default();
            return Err(map_http_error(status, body_text, retry_after));
        }

        response.json().await.map_err(|err| {
            GatewayError::MalformedOutput(format!("failed to parse operation handle: {err}"))
        })
    }

    async fn poll_until_done(&self, operation_name: &str) -> Result<String> {
        let url = format!(
            "{BASE_URL}/{operation_name}?key={api_key}",
            api_key = self.api_key
        );

        loop {
            let response = self
                .http
                .get(url.as_str())
                .send()
                .await
                .map_err(|err| {
                    GatewayError::process(None, format!("operation poll failed: {err}"), true)
                })?;

            if !response.status().is_success() {
                let http_status = response.status();
                let body_text = response.text().await.unwrap_or_default();
                return Err(map_http_error(http_status, body_text, None));
            }

            let status: OperationStatus = response.json().await.map_err(|err| {
                GatewayError::MalformedOutput(format!("failed to parse operation status: {err}"))
            })?;

            if !status.done {
                tracing::info!(operation = operation_name, "video generation in progress");
                tokio::time::sleep(self.poll_interval).await;
                continue;
            }

            if let Some(error) = status.error {
                let message = error
                    .message
                    .unwrap_or_else(|| "remote job reported an unspecified error".to_string());
                return Err(GatewayError::ExecutionFailed(format!(
                    "video generation failed: {message}"
                )));
            }

            return extract_video_uri(status.response);
        }
    }

    async fn download_as_data_uri(&self, uri: &str) -> Result<String> {
        let response = self
            .http
            .get(uri)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|err| {
                GatewayError::process(None, format!("video download failed: {err}"), true)
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response.text().await.unwrap_or_default();
            return Err(map_http_error(status, body_text, None));
        }

        let bytes = response.bytes().await.map_err(|err| {
            GatewayError::process(None, format!("video download truncated: {err}"), true)
        })?;

        Ok(format!(
            "data:video/mp4;base64,{}",
            BASE64_STANDARD.encode(&bytes)
        ))
    }
}

fn extract_video_uri(response: Option<OperationResponse>) -> Result<String> {
    response
        .and_then(|r| r.generate_video_response)
        .and_then(|r| r.generated_samples.into_iter().next())
        .and_then(|sample| sample.video)
        .and_then(|video| video.uri)
        .ok_or_else(|| {
            GatewayError::MalformedOutput(
                "operation completed without a generated video".to_string(),
            )
        })
}
