//! `EvmErrorDecoder` — the top-level decode entrypoint.
//!
//! Decode priority:
//! 1. Standard classification (reason string, panic, node message) → `Standard`
//! 2. No interfaces supplied                                      → `Standard` unknown
//! 3. No hex payload along `data`, `error.data`, ...              → `Standard` unknown
//! 4. Selector not declared by any interface                      → `Standard` unknown
//! 5. Selector resolved                                           → `Custom` with decoded args

use std::sync::Arc;

use revertkit_core::selector::SELECTOR_LEN;
use revertkit_core::{DecodeError, ErrorRecord, FailureClassifier, Interface};
use serde_json::{json, Value};
use tracing::debug;

use crate::args::decode_args;
use crate::classify::EvmClassifier;
use crate::config::DecoderConfig;
use crate::payload::locate_payload;
use crate::resolver::resolve;

/// EVM failure decoder.
///
/// # Usage
/// ```rust,no_run
/// use revertkit_core::Interface;
/// use revertkit_evm::EvmErrorDecoder;
///
/// let vault = Interface::parse("Vault", ["error Paused()"]).unwrap();
/// let decoder = EvmErrorDecoder::new();
/// let record = decoder.decode_hex("0x9e87fac8", [&vault]).unwrap();
/// println!("{record}");
/// ```
pub struct EvmErrorDecoder {
    classifier: Arc<dyn FailureClassifier>,
    config: DecoderConfig,
}

impl EvmErrorDecoder {
    /// Create a decoder with the default [`EvmClassifier`] and configuration.
    pub fn new() -> Self {
        Self::with_config(DecoderConfig::default())
    }

    /// Create a decoder whose default classifier shares `config`.
    pub fn with_config(config: DecoderConfig) -> Self {
        Self {
            classifier: Arc::new(EvmClassifier::new(config.clone())),
            config,
        }
    }

    /// Replace the standard classifier (for testing or non-EVM-node sources).
    pub fn with_classifier(mut self, classifier: Arc<dyn FailureClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Decode a raw failure object against `interfaces`, searched in order.
    ///
    /// Only an undecodable parameter of a resolved fragment is an error; an
    /// unknown selector or missing payload yields an `UNKNOWN_ERROR` record.
    pub fn decode<'a, I>(&self, failure: &Value, interfaces: I) -> Result<ErrorRecord<'a>, DecodeError>
    where
        I: IntoIterator<Item = &'a Interface>,
    {
        let classification = self.classifier.classify(failure);
        if !classification.is_unknown() {
            return Ok(ErrorRecord::standard(classification.code, classification.context));
        }
        let fallback = || ErrorRecord::standard(classification.code, classification.context.clone());

        let mut interfaces = interfaces.into_iter().peekable();
        if interfaces.peek().is_none() {
            return Ok(fallback());
        }

        let Some(payload) = locate_payload(failure, self.config.max_depth) else {
            debug!(max_depth = self.config.max_depth, "no revert payload in failure object");
            return Ok(fallback());
        };
        let Some((selector, data)) = payload.split_first_chunk::<SELECTOR_LEN>() else {
            debug!(len = payload.len(), "revert payload shorter than a selector");
            return Ok(fallback());
        };
        let Some(resolved) = resolve(interfaces, *selector) else {
            debug!(selector = %hex::encode(selector), "selector not declared by any interface");
            return Ok(fallback());
        };

        let args = decode_args(resolved.fragment, data)?;
        debug!(error = resolved.signature, args = args.len(), "decoded custom error");
        Ok(ErrorRecord::custom(resolved.interface, resolved.fragment, args))
    }

    /// Decode bare revert data (hex, with or without `0x`).
    pub fn decode_hex<'a, I>(&self, hex_str: &str, interfaces: I) -> Result<ErrorRecord<'a>, DecodeError>
    where
        I: IntoIterator<Item = &'a Interface>,
    {
        self.decode(&json!({ "data": hex_str }), interfaces)
    }
}

impl Default for EvmErrorDecoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode with a default [`EvmErrorDecoder`].
pub fn decode<'a, I>(failure: &Value, interfaces: I) -> Result<ErrorRecord<'a>, DecodeError>
where
    I: IntoIterator<Item = &'a Interface>,
{
    EvmErrorDecoder::new().decode(failure, interfaces)
}
