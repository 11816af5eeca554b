//! Score → color banding
//!
//! Scores fall into five half-open bands, checked from the top down:
//!
//! | Score     | Band          | Fill      |
//! |-----------|---------------|-----------|
//! | ≥ 3.5     | Darkest green | `#003F0B` |
//! | ≥ 2.5     | Hard green    | `#199741` |
//! | ≥ 1.5     | Normal green  | `#A6D96A` |
//! | ≥ 0.5     | Yellow        | `#F9F8A6` |
//! | otherwise | White         | `#FFFFFF` |
//!
//! The lower bound of each band is inclusive. Negative scores and `NaN` fall
//! through to white.

use serde::Serialize;
use std::fmt;

/// A CSS hex color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Color(&'static str);

impl Color {
    pub const fn hex(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Fill for Experience cells, which are never banded.
pub const NEUTRAL_FILL: Color = Color("#E8F5EE");
pub const TEXT_DARK: Color = Color("#000");
pub const TEXT_LIGHT: Color = Color("#fff");

/// Below this score cell text is dark, at or above it light.
pub const LIGHT_TEXT_THRESHOLD: f64 = 2.0;

/// Performance band, ordered from lightest to darkest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Band {
    White,
    Yellow,
    NormalGreen,
    HardGreen,
    DarkestGreen,
}

impl Band {
    /// Bands with their inclusive lower bounds, darkest first.
    const THRESHOLDS: [(f64, Band); 4] = [
        (3.5, Band::DarkestGreen),
        (2.5, Band::HardGreen),
        (1.5, Band::NormalGreen),
        (0.5, Band::Yellow),
    ];

    pub fn for_score(score: f64) -> Band {
        Self::THRESHOLDS
            .iter()
            .find(|(min, _)| score >= *min)
            .map(|(_, band)| *band)
            .unwrap_or(Band::White)
    }

    pub const fn color(self) -> Color {
        match self {
            Band::DarkestGreen => Color("#003F0B"),
            Band::HardGreen => Color("#199741"),
            Band::NormalGreen => Color("#A6D96A"),
            Band::Yellow => Color("#F9F8A6"),
            Band::White => Color("#FFFFFF"),
        }
    }

    pub const fn all() -> [Band; 5] {
        [
            Band::White,
            Band::Yellow,
            Band::NormalGreen,
            Band::HardGreen,
            Band::DarkestGreen,
        ]
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Band::DarkestGreen => write!(f, "darkest green"),
            Band::HardGreen => write!(f, "hard green"),
            Band::NormalGreen => write!(f, "normal green"),
            Band::Yellow => write!(f, "yellow"),
            Band::White => write!(f, "white"),
        }
    }
}

/// Fill color for a skill score.
pub fn color_for(score: f64) -> Color {
    Band::for_score(score).color()
}

/// Text color that stays readable on top of a skill cell's fill.
pub fn text_color_for(score: f64) -> Color {
    if score < LIGHT_TEXT_THRESHOLD {
        TEXT_DARK
    } else {
        TEXT_LIGHT
    }
}
