use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Emotion category recognised by the service.
///
/// The default (`happy`) is what the admin picker starts on.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Angry,
    Disgust,
    Fear,
    #[default]
    Happy,
    Sad,
    Neutral,
    Surprise,
}

impl Emotion {
    /// All labels in canonical order (the order the classifier emits them).
    pub const ALL: [Emotion; 7] = [
        Emotion::Angry,
        Emotion::Disgust,
        Emotion::Fear,
        Emotion::Happy,
        Emotion::Sad,
        Emotion::Neutral,
        Emotion::Surprise,
    ];

    /// Wire label.
    pub fn as_str(self) -> &'static str {
        match self {
            Emotion::Angry => "angry",
            Emotion::Disgust => "disgust",
            Emotion::Fear => "fear",
            Emotion::Happy => "happy",
            Emotion::Sad => "sad",
            Emotion::Neutral => "neutral",
            Emotion::Surprise => "surprise",
        }
    }

    /// Position in [`Emotion::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not one of the seven labels.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown emotion label: {0}")]
pub struct ParseEmotionError(pub String);

impl FromStr for Emotion {
    type Err = ParseEmotionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Emotion::ALL
            .into_iter()
            .find(|e| e.as_str() == s)
            .ok_or_else(|| ParseEmotionError(s.to_string()))
    }
}

/// Successful response of `POST /upload`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionResult {
    pub emotion: Emotion,
    /// Keyed by wire label. Values are in `[0, 1]` and conventionally sum to 1.
    #[serde(default)]
    pub probabilities: HashMap<String, f64>,
    pub face_image: String,
    /// Absent when the service does not segment the person.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub human_mask_image: Option<String>,
    pub processed_image: String,
}

impl DetectionResult {
    /// Probability for `emotion`; a missing label counts as 0.
    pub fn probability(&self, emotion: Emotion) -> f64 {
        self.probabilities
            .get(emotion.as_str())
            .copied()
            .unwrap_or(0.0)
    }
}
