//! Failures the compiler emits on its own: `Error(string)` reason strings
//! from `require`/`revert`, and `Panic(uint256)` codes from checked
//! arithmetic, `assert` and friends.
//!
//! Panic codes:
//! <https://docs.soliditylang.org/en/latest/control-structures.html#panic-via-assert-and-error-via-require>

use alloy_core::dyn_abi::{DynSolType, DynSolValue};
use alloy_primitives::U256;

/// `keccak256("Error(string)")[..4]`
pub const ERROR_STRING_SELECTOR: [u8; 4] = [0x08, 0xc3, 0x79, 0xa0];

/// `keccak256("Panic(uint256)")[..4]`
pub const PANIC_SELECTOR: [u8; 4] = [0x4e, 0x48, 0x7b, 0x71];

/// A decoded built-in failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuiltinFailure {
    Reason(String),
    Panic { code: u64, meaning: &'static str },
}

impl BuiltinFailure {
    /// Context string for a standard record.
    pub fn context(&self) -> String {
        match self {
            Self::Reason(reason) => reason.clone(),
            Self::Panic { code, meaning } => format!("panic 0x{code:02x}: {meaning}"),
        }
    }
}

/// Decode `data` as `Error(string)` or `Panic(uint256)`.
///
/// `None` for any other selector, or when the body does not ABI-decode.
pub fn decode_builtin(data: &[u8]) -> Option<BuiltinFailure> {
    let (selector, body) = data.split_first_chunk::<4>()?;
    match *selector {
        ERROR_STRING_SELECTOR => match DynSolType::String.abi_decode(body) {
            Ok(DynSolValue::String(reason)) => Some(BuiltinFailure::Reason(reason)),
            _ => None,
        },
        PANIC_SELECTOR => match DynSolType::Uint(256).abi_decode(body) {
            Ok(DynSolValue::Uint(v, _)) => {
                let code = if v > U256::from(u64::MAX) { u64::MAX } else { v.to::<u64>() };
                Some(BuiltinFailure::Panic { code, meaning: panic_meaning(code) })
            }
            _ => None,
        },
        _ => None,
    }
}

/// Map a Solidity panic code to a human-readable description.
pub fn panic_meaning(code: u64) -> &'static str {
    match code {
        0x00 => "generic compiler-inserted panic",
        0x01 => "assert() called with false condition",
        0x11 => "arithmetic overflow or underflow",
        0x12 => "division or modulo by zero",
        0x21 => "invalid enum value",
        0x22 => "corrupted storage byte array",
        0x31 => ".pop() on empty array",
        0x32 => "out-of-bounds array access",
        0x41 => "too much memory allocated (out of memory)",
        0x51 => "called zero-initialized internal function pointer",
        _ => "unknown panic code",
    }
}
