//! Decode a single 32-byte ABI word.
//!
//! Every supported parameter occupies exactly one word. Dynamic types
//! (`bytes`, `string`) are not followed through their offset; the word is
//! surfaced as raw hex.

use alloy_primitives::{Address, I256, U256};
use revertkit_core::{ArgValue, DecodeError, ParamType};
use tracing::trace;

/// Size of an ABI word in bytes.
pub const WORD_SIZE: usize = 32;

/// Decode `word` as a value of type `ty`.
///
/// Errors carry no parameter label; [`DecodeError::at_param`] adds one.
pub fn decode_word(ty: &ParamType, word: &[u8]) -> Result<ArgValue, DecodeError> {
    let word: [u8; WORD_SIZE] = word.try_into().map_err(|_| DecodeError::MissingWord {
        index: 0,
        param: String::new(),
    })?;

    let value = match ty {
        ParamType::Uint(_) => ArgValue::Uint(U256::from_be_bytes(word)),
        ParamType::Int(bits) => ArgValue::Int(sign_extend(U256::from_be_bytes(word), *bits)),
        ParamType::Address => ArgValue::Address(Address::from_slice(&word[WORD_SIZE - 20..])),
        // Only the last hex digit is inspected.
        ParamType::Bool => ArgValue::Bool(word[WORD_SIZE - 1] & 0x0f == 1),
        ParamType::FixedBytes(_) | ParamType::Bytes | ParamType::String => {
            ArgValue::Text(format!("0x{}", hex::encode(word)))
        }
        ParamType::Unsupported(tag) => {
            return Err(DecodeError::UnsupportedType {
                ty: tag.clone(),
                param: String::new(),
            });
        }
    };
    trace!(ty = %ty, value = %value, "decoded word");
    Ok(value)
}

/// Two's-complement reinterpretation of the low `bits` bits of `raw`.
fn sign_extend(raw: U256, bits: usize) -> I256 {
    if bits == 0 || bits >= 256 {
        return I256::from_raw(raw);
    }
    let mask = (U256::from(1u8) << bits) - U256::from(1u8);
    let value = raw & mask;
    if value.bit(bits - 1) {
        I256::from_raw(value | !mask)
    } else {
        I256::from_raw(value)
    }
}
