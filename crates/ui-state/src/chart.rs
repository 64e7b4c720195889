//! Bar chart projection of a detection result.
//!
//! Pure: builds a fresh [`ChartSeries`] from a borrowed
//! [`DetectionResult`]. Colors come from a static table, never from data.

use moodlens_protocol::{DetectionResult, Emotion};
use serde::Serialize;

/// Chart title shown above the bars.
pub const CHART_TITLE: &str = "Emotion probabilities";

/// Fixed y axis range.
pub const Y_AXIS: (f64, f64) = (0.0, 1.0);

/// 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `#RRGGBB` notation.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Fill and border color of one bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BarStyle {
    pub fill: Rgb,
    pub border: Rgb,
}

/// Bar styles indexed by [`Emotion::index`].
const STYLES: [BarStyle; 7] = [
    // angry
    BarStyle {
        fill: Rgb::new(0xF4, 0x43, 0x36),
        border: Rgb::new(0xD3, 0x2F, 0x2F),
    },
    // disgust
    BarStyle {
        fill: Rgb::new(0x8B, 0xC3, 0x4A),
        border: Rgb::new(0x68, 0x9F, 0x38),
    },
    // fear
    BarStyle {
        fill: Rgb::new(0xFF, 0x98, 0x00),
        border: Rgb::new(0xF5, 0x7C, 0x00),
    },
    // happy
    BarStyle {
        fill: Rgb::new(0x4C, 0xAF, 0x50),
        border: Rgb::new(0x38, 0x8E, 0x3C),
    },
    // sad
    BarStyle {
        fill: Rgb::new(0x21, 0x96, 0xF3),
        border: Rgb::new(0x19, 0x76, 0xD2),
    },
    // neutral
    BarStyle {
        fill: Rgb::new(0x9E, 0x9E, 0x9E),
        border: Rgb::new(0x61, 0x61, 0x61),
    },
    // surprise
    BarStyle {
        fill: Rgb::new(0xE9, 0x1E, 0x63),
        border: Rgb::new(0xC2, 0x18, 0x5B),
    },
];

/// Bar style for `emotion`.
pub fn style_for(emotion: Emotion) -> BarStyle {
    STYLES[emotion.index()]
}

/// Caption for `emotion`.
pub fn display_name(emotion: Emotion) -> &'static str {
    match emotion {
        Emotion::Angry => "Angry",
        Emotion::Disgust => "Disgust",
        Emotion::Fear => "Fear",
        Emotion::Happy => "Happy",
        Emotion::Sad => "Sad",
        Emotion::Neutral => "Neutral",
        Emotion::Surprise => "Surprise",
    }
}

/// One bar of the chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartBar {
    pub emotion: Emotion,
    pub label: &'static str,
    pub value: f64,
    pub style: BarStyle,
}

/// Seven bars in canonical emotion order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub title: &'static str,
    pub y_range: (f64, f64),
    pub bars: Vec<ChartBar>,
}

impl ChartSeries {
    /// Projects `result` into a chart series.
    ///
    /// Missing or non-finite probabilities become 0; values are clamped to
    /// the y axis range.
    pub fn project(result: &DetectionResult) -> Self {
        let bars = Emotion::ALL
            .into_iter()
            .map(|emotion| {
                let raw = result.probability(emotion);
                let value = if raw.is_finite() {
                    raw.clamp(Y_AXIS.0, Y_AXIS.1)
                } else {
                    0.0
                };
                ChartBar {
                    emotion,
                    label: display_name(emotion),
                    value,
                    style: style_for(emotion),
                }
            })
            .collect();

        Self {
            title: CHART_TITLE,
            y_range: Y_AXIS,
            bars,
        }
    }

    /// Value of the bar for `emotion`.
    pub fn value(&self, emotion: Emotion) -> f64 {
        self.bars
            .iter()
            .find(|b| b.emotion == emotion)
            .map(|b| b.value)
            .unwrap_or(0.0)
    }

    /// Tallest bar; ties resolve to the earlier label.
    pub fn dominant(&self) -> Option<&ChartBar> {
        self.bars.iter().fold(None, |best: Option<&ChartBar>, bar| match best {
            Some(b) if b.value >= bar.value => Some(b),
            _ => Some(bar),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn result_with(probs: &[(&str, f64)]) -> DetectionResult {
        DetectionResult {
            emotion: Emotion::Happy,
            probabilities: probs
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect::<HashMap<_, _>>(),
            face_image: String::new(),
            human_mask_image: None,
            processed_image: String::new(),
        }
    }

    #[test]
    fn bars_follow_canonical_order() {
        let series = ChartSeries::project(&result_with(&[]));
        let order: Vec<Emotion> = series.bars.iter().map(|b| b.emotion).collect();
        assert_eq!(order, Emotion::ALL.to_vec());
        assert_eq!(series.y_range, (0.0, 1.0));
    }

    #[test]
    fn probabilities_become_bar_values() {
        let series = ChartSeries::project(&result_with(&[("happy", 0.9), ("sad", 0.1)]));
        assert_eq!(series.value(Emotion::Happy), 0.9);
        assert_eq!(series.value(Emotion::Sad), 0.1);
        assert_eq!(series.value(Emotion::Angry), 0.0);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let series = ChartSeries::project(&result_with(&[
            ("fear", 1.4),
            ("angry", -0.2),
            ("neutral", f64::NAN),
        ]));
        assert_eq!(series.value(Emotion::Fear), 1.0);
        assert_eq!(series.value(Emotion::Angry), 0.0);
        assert_eq!(series.value(Emotion::Neutral), 0.0);
    }

    #[test]
    fn projection_leaves_result_untouched() {
        let result = result_with(&[("happy", 0.9), ("joy", 0.5)]);
        let before = result.clone();
        let _ = ChartSeries::project(&result);
        assert_eq!(result, before);
    }

    #[test]
    fn colors_come_from_static_table() {
        assert_eq!(style_for(Emotion::Angry).fill.to_hex(), "#F44336");
        assert_eq!(style_for(Emotion::Happy).border.to_hex(), "#388E3C");
        assert_eq!(style_for(Emotion::Surprise).fill.to_hex(), "#E91E63");

        let a = ChartSeries::project(&result_with(&[("sad", 0.2)]));
        let b = ChartSeries::project(&result_with(&[("sad", 0.8)]));
        assert_eq!(a.bars[4].style, b.bars[4].style);
    }

    #[test]
    fn dominant_picks_tallest_bar() {
        let series = ChartSeries::project(&result_with(&[("sad", 0.6), ("happy", 0.3)]));
        assert_eq!(series.dominant().unwrap().emotion, Emotion::Sad);

        let tied = ChartSeries::project(&result_with(&[]));
        assert_eq!(tied.dominant().unwrap().emotion, Emotion::Angry);
    }

    #[test]
    fn series_serializes_for_shells() {
        let series = ChartSeries::project(&result_with(&[("happy", 0.9)]));
        let v = serde_json::to_value(&series).unwrap();
        assert_eq!(v["bars"][3]["emotion"], "happy");
        assert_eq!(v["bars"][3]["label"], "Happy");
    }
}
