//! Display media registry and generated-media result records.
//!
//! Scenarios reference display media by id; the registry is read-only
//! injected configuration, like the scenario fixtures themselves.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::{FlashpointError, Result};

/// A static display asset referenced by scenarios via `media_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaAsset {
    /// Unique asset identifier
    pub id: String,
    /// Human-readable description (used as alt text by presentations)
    pub description: String,
    /// Display URL
    pub url: String,
    /// Short content hint (e.g. "burning warehouse")
    pub hint: String,
}

/// A playable media reference produced for a decision outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeVideo {
    /// Playable reference, `data:video/mp4;base64,...` or a remote URL.
    pub video_url: String,
    /// The generation prompt that produced the video.
    pub outcome_prompt: String,
}

/// A single generated scenario illustration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedImage {
    /// The text-to-image prompt that produced this image.
    pub prompt: String,
    /// `data:image/...;base64,...` data URI.
    pub url: String,
}

static BUILTIN_MEDIA: Lazy<Vec<MediaAsset>> = Lazy::new(|| {
    fn asset(id: &str, description: &str, hint: &str) -> MediaAsset {
        MediaAsset {
            id: id.to_string(),
            description: description.to_string(),
            url: format!("https://media.flashpoint-sim.dev/{id}.png"),
            hint: hint.to_string(),
        }
    }

    vec![
        asset(
            "scenario-fire-initial",
            "A warehouse fire seen from the street, smoke pouring from the roof",
            "burning warehouse",
        ),
        asset(
            "scenario-fire-outcome-1",
            "Firefighters advancing a hose line through the loading dock",
            "hose line advance",
        ),
        asset(
            "scenario-fire-outcome-2",
            "Crews holding a defensive perimeter as the roof vents",
            "defensive perimeter",
        ),
        asset(
            "scenario-fire-outcome-3",
            "An evacuation column moving away from the structure",
            "evacuation column",
        ),
        asset(
            "scenario-flood-initial",
            "A flooded residential street with water at door height",
            "flooded street",
        ),
        asset(
            "scenario-flood-outcome-1",
            "A rescue boat working house to house along the flooded block",
            "boat rescue",
        ),
        asset(
            "scenario-flood-outcome-2",
            "Residents gathered on a rooftop awaiting pickup",
            "rooftop shelter",
        ),
        asset(
            "scenario-hazmat-initial",
            "An overturned tanker leaking onto a highway shoulder",
            "tanker spill",
        ),
        asset(
            "scenario-hazmat-outcome-1",
            "A decontamination corridor set up uphill and upwind",
            "decon corridor",
        ),
        asset(
            "scenario-hazmat-outcome-2",
            "Traffic backed up behind a hastily placed cordon",
            "traffic cordon",
        ),
        asset(
            "scenario-pileup-initial",
            "A multi-vehicle collision in fog on a motorway",
            "motorway pileup",
        ),
        asset(
            "scenario-pileup-outcome-1",
            "Triage tarps laid out on the closed carriageway",
            "triage area",
        ),
        asset(
            "scenario-pileup-outcome-2",
            "Responders moving between wrecked vehicles",
            "vehicle search",
        ),
    ]
});

/// Returns the built-in media registry.
pub fn builtin_media() -> &'static [MediaAsset] {
    &BUILTIN_MEDIA
}

/// Looks up a media asset by id.
///
/// # Errors
///
/// Returns a `NotFound` error for unknown ids; an unknown id means the
/// scenario fixtures and the registry have drifted apart.
pub fn find_media(id: &str) -> Result<&'static MediaAsset> {
    BUILTIN_MEDIA
        .iter()
        .find(|asset| asset.id == id)
        .ok_or_else(|| FlashpointError::not_found("media asset", id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_media_has_unique_ids() {
        let mut ids = std::collections::HashSet::new();
        for asset in builtin_media() {
            assert!(
                ids.insert(asset.id.clone()),
                "media ids must be unique, found duplicate: {}",
                asset.id
            );
        }
    }

    #[test]
    fn test_find_media_known_id() {
        let asset = find_media("scenario-fire-initial").unwrap();
        assert_eq!(asset.hint, "burning warehouse");
    }

    #[test]
    fn test_find_media_unknown_id() {
        let err = find_media("no-such-asset").unwrap_err();
        assert!(err.is_not_found());
    }
}
