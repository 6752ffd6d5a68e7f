//! The default standard-failure classifier for EVM nodes.
//!
//! Classification order:
//! 1. `Error(string)` payload → `CALL_EXCEPTION` with the reason
//! 2. `Panic(uint256)` payload → `CALL_EXCEPTION` with the panic meaning
//! 3. Any other selector in the payload → `UNKNOWN_ERROR`, left for custom
//!    error resolution
//! 4. Well-known node / wallet messages (insufficient funds, nonce, ...)
//! 5. Fallback → `UNKNOWN_ERROR`, context = outermost message

use revertkit_core::selector::SELECTOR_LEN;
use revertkit_core::{Classification, ErrorCode, FailureClassifier};
use serde_json::Value;
use tracing::debug;

use crate::builtin::{decode_builtin, panic_meaning};
use crate::config::DecoderConfig;
use crate::payload::{collect_messages, locate_payload};

/// Classifies failures by payload shape, then by message text.
#[derive(Debug, Clone, Default)]
pub struct EvmClassifier {
    config: DecoderConfig,
}

impl EvmClassifier {
    pub fn new(config: DecoderConfig) -> Self {
        Self { config }
    }
}

impl FailureClassifier for EvmClassifier {
    fn classify(&self, failure: &Value) -> Classification {
        let payload = locate_payload(failure, self.config.max_depth);
        if let Some(builtin) = payload.as_deref().and_then(decode_builtin) {
            return Classification::new(ErrorCode::CallException, builtin.context());
        }

        let messages = collect_messages(failure, self.config.max_depth);
        // A payload with any other selector is a custom error; wrapper
        // messages must not shadow it.
        let has_custom_selector = payload.is_some_and(|p| p.len() >= SELECTOR_LEN);
        if has_custom_selector {
            debug!("custom selector present, skipping message classification");
        } else if self.config.classify_messages {
            if let Some(c) = messages.iter().find_map(|m| classify_message(m)) {
                debug!(code = %c.code, "classified from message");
                return c;
            }
        }
        Classification::unknown(messages.first().copied().unwrap_or_default())
    }
}

/// Recognise a node or wallet error message.
pub fn classify_message(message: &str) -> Option<Classification> {
    let lower = message.to_ascii_lowercase();

    if let Some(reason) = quoted_after(message, &lower, "reverted with reason string '") {
        return Some(Classification::new(ErrorCode::CallException, reason));
    }
    if let Some(pos) = lower.find("reverted with panic code ") {
        let rest = &lower[pos + "reverted with panic code ".len()..];
        let digits: String = rest
            .trim_start_matches("0x")
            .chars()
            .take_while(char::is_ascii_hexdigit)
            .collect();
        if let Ok(code) = u64::from_str_radix(&digits, 16) {
            let context = format!("panic 0x{code:02x}: {}", panic_meaning(code));
            return Some(Classification::new(ErrorCode::CallException, context));
        }
    }

    let code = if lower.contains("insufficient funds") {
        ErrorCode::InsufficientFunds
    } else if lower.contains("nonce too low") || lower.contains("nonce has already been used") {
        ErrorCode::NonceExpired
    } else if lower.contains("replacement transaction underpriced")
        || lower.contains("transaction underpriced")
    {
        ErrorCode::ReplacementUnderpriced
    } else if lower.contains("out of gas") || lower.contains("gas required exceeds allowance") {
        ErrorCode::OutOfGas
    } else if lower.contains("user rejected") || lower.contains("user denied") {
        ErrorCode::ActionRejected
    } else {
        return None;
    };
    Some(Classification::new(code, message))
}

/// Text between `marker` and the last `'` in `original`. `lower` is the
/// lower-cased copy used to find the marker.
fn quoted_after<'m>(original: &'m str, lower: &str, marker: &str) -> Option<&'m str> {
    let start = lower.find(marker)? + marker.len();
    let end = original.rfind('\'')?;
    (end >= start).then(|| &original[start..end])
}
