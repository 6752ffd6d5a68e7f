//! Decode errors and the standard-failure classifier seam.

use serde_json::Value;
use thiserror::Error;

use crate::types::ErrorCode;

/// Errors that abort a decode attempt.
///
/// An unknown selector or a missing payload is not an error: the decoder
/// returns an `UNKNOWN_ERROR` record instead.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("unsupported type `{ty}` for parameter `{param}`")]
    UnsupportedType { ty: String, param: String },

    #[error("payload too short: no word {index} for parameter `{param}`")]
    MissingWord { index: usize, param: String },
}

impl DecodeError {
    /// Attach the parameter position and label to an error raised while
    /// decoding a lone word, where neither is known.
    pub fn at_param(self, index: usize, param: &str) -> Self {
        match self {
            Self::UnsupportedType { ty, .. } => Self::UnsupportedType {
                ty,
                param: param.to_string(),
            },
            Self::MissingWord { .. } => Self::MissingWord {
                index,
                param: param.to_string(),
            },
        }
    }
}

/// Output of a [`FailureClassifier`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub code: ErrorCode,
    pub context: String,
}

impl Classification {
    pub fn new(code: ErrorCode, context: impl Into<String>) -> Self {
        Self {
            code,
            context: context.into(),
        }
    }

    pub fn unknown(context: impl Into<String>) -> Self {
        Self::new(ErrorCode::UnknownError, context)
    }

    pub fn is_unknown(&self) -> bool {
        self.code == ErrorCode::UnknownError
    }
}

/// Recognises standard failure shapes (revert strings, panics, node
/// messages) in a raw failure object.
///
/// Implementations must be `Send + Sync`; closures of the right shape
/// implement the trait directly.
pub trait FailureClassifier: Send + Sync {
    fn classify(&self, failure: &Value) -> Classification;
}

impl<F> FailureClassifier for F
where
    F: Fn(&Value) -> Classification + Send + Sync,
{
    fn classify(&self, failure: &Value) -> Classification {
        self(failure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn closures_are_classifiers() {
        let always_funds = |_: &Value| Classification::new(ErrorCode::InsufficientFunds, "");
        let c = always_funds.classify(&json!({}));
        assert_eq!(c.code, ErrorCode::InsufficientFunds);
        assert!(!c.is_unknown());
        assert!(Classification::unknown("x").is_unknown());
    }

    #[test]
    fn error_messages() {
        let err = DecodeError::UnsupportedType { ty: "uint256[]".into(), param: "ids".into() };
        assert_eq!(err.to_string(), "unsupported type `uint256[]` for parameter `ids`");
        let err = DecodeError::MissingWord { index: 1, param: "required".into() };
        assert_eq!(err.to_string(), "payload too short: no word 1 for parameter `required`");
    }

    #[test]
    fn at_param_fills_position() {
        let err = DecodeError::UnsupportedType { ty: "bytes[]".into(), param: String::new() }.at_param(2, "blobs");
        assert!(matches!(err, DecodeError::UnsupportedType { ref ty, ref param } if ty == "bytes[]" && param == "blobs"));
        let err = DecodeError::MissingWord { index: 0, param: String::new() }.at_param(3, "#3");
        assert!(matches!(err, DecodeError::MissingWord { index: 3, ref param } if param == "#3"));
    }
}
