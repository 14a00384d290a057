//! Configuration settings

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{FormatError, Result};
use crate::sanitize::DEFAULT_SEPARATOR_MIN_RUN;

/// Default input ceiling: 2 MiB of policy text
pub const DEFAULT_MAX_INPUT_BYTES: usize = 2 * 1024 * 1024;

/// Notice printed in every document header block
pub const DEFAULT_CONFIDENTIALITY_NOTICE: &str = "CONFIDENTIAL — Internal Use Only";

/// Top-level settings structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    /// Input size limits
    pub limits: LimitSettings,
    /// Line classifier thresholds
    pub classifier: ClassifierSettings,
    /// Document chrome shared by both renderers
    pub document: DocumentSettings,
    /// PDF renderer settings
    pub pdf: PdfSettings,
}

impl Settings {
    /// Parse settings from a TOML string
    pub fn from_toml_str(toml_str: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Load settings from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content).map_err(|e| FormatError::Config {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }
}

/// Input size limits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitSettings {
    /// Largest accepted body text, in bytes
    pub max_input_bytes: usize,
}

impl Default for LimitSettings {
    fn default() -> Self {
        Self {
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
        }
    }
}

/// Line classifier thresholds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierSettings {
    /// A field line must be shorter than this many characters
    pub field_max_chars: usize,
    /// A value line must be shorter than this many characters
    pub value_max_chars: usize,
    /// Separator runs at least this long are removed
    pub separator_min_run: usize,
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        Self {
            field_max_chars: 80,
            value_max_chars: 200,
            separator_min_run: DEFAULT_SEPARATOR_MIN_RUN,
        }
    }
}

/// Document chrome shared by both renderers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentSettings {
    /// Notice shown under the title
    pub confidentiality_notice: String,
}

impl Default for DocumentSettings {
    fn default() -> Self {
        Self {
            confidentiality_notice: DEFAULT_CONFIDENTIALITY_NOTICE.to_string(),
        }
    }
}

/// PDF renderer settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfSettings {
    /// Compress content streams
    pub compress: bool,
    /// Left, right and top page margin in millimetres
    pub margin_mm: f32,
    /// Height reserved at the page bottom for the footer, in millimetres
    pub footer_band_mm: f32,
}

impl Default for PdfSettings {
    fn default() -> Self {
        Self {
            compress: true,
            margin_mm: 20.0,
            footer_band_mm: 20.0,
        }
    }
}
