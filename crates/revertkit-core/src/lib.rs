//! revertkit-core — foundation types for the revertkit failure decoder.
//!
//! This crate defines:
//! - [`Interface`] / [`ErrorFragment`] — caller-supplied error ABIs
//! - [`selector`] — 4-byte selector derivation
//! - [`ArgValue`] / [`ArgumentMap`] — decoded custom error arguments
//! - [`ErrorRecord`] / [`Criteria`] — the decode result and its matcher
//! - [`FailureClassifier`] — the standard-failure classifier trait

pub mod decoder;
pub mod interface;
pub mod record;
pub mod selector;
pub mod types;

pub use decoder::{Classification, DecodeError, FailureClassifier};
pub use interface::{ErrorFragment, Interface, InterfaceError, Param, ParamType};
pub use record::{CustomError, Criteria, ErrorRecord};
pub use selector::{encode_selector, selector, selector_hex, Selector};
pub use types::{ArgKey, ArgValue, ArgumentMap, ErrorCode};
