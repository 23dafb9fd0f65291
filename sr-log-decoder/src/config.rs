//! Decoder configuration types
//!
//! The container layout is fixed, so the only tunables concern how channel
//! names from the metadata are accepted.

use crate::types::LENGTH_NAME_MAX;
use serde::{Deserialize, Serialize};

/// Configuration for the decoder library
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Maximum channel name length in characters (default: 20, 0 = no limit)
    #[serde(default = "default_name_length_max")]
    pub name_length_max: usize,

    /// Fail the decode on an overlong name instead of truncating it
    #[serde(default)]
    pub reject_long_names: bool,
}

fn default_name_length_max() -> usize {
    LENGTH_NAME_MAX
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            name_length_max: default_name_length_max(),
            reject_long_names: false,
        }
    }
}

impl DecoderConfig {
    /// Create a new decoder configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the maximum channel name length (0 = no limit)
    pub fn with_name_length_max(mut self, max: usize) -> Self {
        self.name_length_max = max;
        self
    }

    /// Builder method: reject overlong channel names
    pub fn with_reject_long_names(mut self, enabled: bool) -> Self {
        self.reject_long_names = enabled;
        self
    }
}
