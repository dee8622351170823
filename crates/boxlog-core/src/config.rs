//! Immutable engine configuration.
//!
//! Built once at startup and shared read-only (`Arc<EngineConfig>`) by the
//! logger and every writer it hands out. Nothing in here changes after
//! construction.

use std::collections::BTreeMap;

use crossterm::style::Color;
use serde::Deserialize;

use crate::error::{BoxlogError, BoxlogResult};
use crate::level::Level;

/// Content width of the default engine.
pub const DEFAULT_WIDTH: usize = 75;

/// Content width of the compact engine.
pub const COMPACT_WIDTH: usize = 55;

/// Width of the label column, not counting its leading space.
pub const DEFAULT_LABEL_WIDTH: usize = 9;

/// Widest content column the frame will draw.
pub const MAX_WIDTH: usize = 500;

/// Widest label column the frame will draw.
pub const MAX_LABEL_WIDTH: usize = 64;

/// Slice size for remote payloads; a small margin under Telegram's 4096.
pub const DEFAULT_CHUNK_CEILING: usize = 4090;

/// Optional behaviors that differ between deployments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Features {
    /// Forward `send` records to the remote sink
    pub remote: bool,
    /// Append carried context as a trailing field
    pub context: bool,
}

impl Default for Features {
    fn default() -> Self {
        Self {
            remote: true,
            context: true,
        }
    }
}

/// Per-level color overrides on top of [`Level::default_color`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Palette {
    overrides: BTreeMap<Level, Color>,
}

impl Palette {
    pub fn with(mut self, level: Level, color: Color) -> Self {
        self.overrides.insert(level, color);
        self
    }

    pub fn color(&self, level: Level) -> Color {
        self.overrides
            .get(&level)
            .copied()
            .unwrap_or_else(|| level.default_color())
    }
}

/// Rendering and dispatch parameters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Characters of content per row (cell is `width + 2` with margins)
    pub width: usize,

    /// Characters reserved for the label text
    pub label_width: usize,

    /// Emit ANSI colors
    pub color: bool,

    /// Prefix every console line with a local timestamp
    pub timestamps: bool,

    /// Maximum characters per remote message
    pub chunk_ceiling: usize,

    pub features: Features,

    pub palette: Palette,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            label_width: DEFAULT_LABEL_WIDTH,
            color: true,
            timestamps: true,
            chunk_ceiling: DEFAULT_CHUNK_CEILING,
            features: Features::default(),
            palette: Palette::default(),
        }
    }
}

impl EngineConfig {
    /// The narrow variant: 55 columns, no remote delivery, no carried context.
    pub fn compact() -> Self {
        Self {
            width: COMPACT_WIDTH,
            features: Features {
                remote: false,
                context: false,
            },
            ..Self::default()
        }
    }

    /// Set the content width.
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Disable ANSI colors and timestamps, giving byte-stable output.
    pub fn plain(mut self) -> Self {
        self.color = false;
        self.timestamps = false;
        self
    }

    /// Parse a JSON configuration; missing keys keep their defaults.
    pub fn from_json(json: &str) -> BoxlogResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the frame cannot draw at a fixed width.
    pub fn validate(&self) -> BoxlogResult<()> {
        if self.width == 0 {
            return Err(BoxlogError::Config("width must be positive".into()));
        }
        if self.width > MAX_WIDTH {
            return Err(BoxlogError::Config(format!(
                "width {} exceeds the maximum of {}",
                self.width, MAX_WIDTH
            )));
        }
        let longest = Level::longest_label();
        if self.label_width < longest {
            return Err(BoxlogError::Config(format!(
                "label_width {} is narrower than the longest label ({})",
                self.label_width, longest
            )));
        }
        if self.label_width > MAX_LABEL_WIDTH {
            return Err(BoxlogError::Config(format!(
                "label_width {} exceeds the maximum of {}",
                self.label_width, MAX_LABEL_WIDTH
            )));
        }
        if self.chunk_ceiling == 0 {
            return Err(BoxlogError::Config("chunk_ceiling must be positive".into()));
        }
        Ok(())
    }
}
