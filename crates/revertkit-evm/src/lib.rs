//! revertkit-evm — decode nested EVM failure objects into error records.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use revertkit_core::{Criteria, Interface};
//! use revertkit_evm::EvmErrorDecoder;
//!
//! let bank = Interface::parse(
//!     "Bank",
//!     ["error InsufficientBalance(uint256 available, uint256 required)"],
//! ).unwrap();
//!
//! let failure = serde_json::json!({
//!     "message": "Internal JSON-RPC error.",
//!     "error": { "data": "0xcf479181\
//!         0000000000000000000000000000000000000000000000000000000000000064\
//!         0000000000000000000000000000000000000000000000000000000000000032" },
//! });
//!
//! let record = EvmErrorDecoder::new().decode(&failure, [&bank]).unwrap();
//! assert_eq!(record.name(), Some("InsufficientBalance"));
//! assert!(record.matches(&Criteria::new().arg("required", 50u64)));
//! ```

pub mod args;
pub mod builtin;
pub mod classify;
pub mod config;
pub mod decoder;
pub mod payload;
pub mod resolver;
pub mod word;

pub use classify::EvmClassifier;
pub use config::DecoderConfig;
pub use decoder::{decode, EvmErrorDecoder};
pub use resolver::{resolve, Resolved};
