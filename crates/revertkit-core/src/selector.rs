//! Error selector derivation.
//!
//! `selector = keccak256("ErrorName(type1,type2,...)")[..4]`, the same
//! derivation solc uses, so selectors computed here compare directly with
//! the leading bytes of real revert payloads.

use tiny_keccak::{Hasher, Keccak};

/// A 4-byte error selector.
pub type Selector = [u8; 4];

/// Length of a selector in bytes.
pub const SELECTOR_LEN: usize = 4;

/// Compute the selector of a canonical signature string.
pub fn selector(signature: &str) -> Selector {
    let mut k = Keccak::v256();
    k.update(signature.as_bytes());
    let mut out = [0u8; 32];
    k.finalize(&mut out);
    [out[0], out[1], out[2], out[3]]
}

/// Compute the selector of `signature` as `0x`-prefixed lowercase hex.
pub fn selector_hex(signature: &str) -> String {
    encode_selector(selector(signature))
}

/// Render a selector as `0x`-prefixed lowercase hex.
pub fn encode_selector(selector: Selector) -> String {
    format!("0x{}", hex::encode(selector))
}
