//! Decoder configuration.

use serde::{Deserialize, Serialize};

/// Tuning knobs for [`EvmErrorDecoder`](crate::EvmErrorDecoder) and
/// [`EvmClassifier`](crate::EvmClassifier).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecoderConfig {
    /// How many `error` wrappers deep to look for `data`: 1 probes only
    /// `data`, 5 probes up to `error.error.error.error.data`.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    /// Classify node messages such as "insufficient funds" or "nonce too low".
    #[serde(default = "bool_true")]
    pub classify_messages: bool,
}

fn default_max_depth() -> usize { 5 }
fn bool_true() -> bool { true }

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            classify_messages: true,
        }
    }
}

impl DecoderConfig {
    /// Parse a JSON config; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
