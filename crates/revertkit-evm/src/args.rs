//! Decode a custom error's arguments into a triple-keyed [`ArgumentMap`].

use revertkit_core::{ArgumentMap, DecodeError, ErrorFragment};
use tracing::debug;

use crate::word::{decode_word, WORD_SIZE};

/// Decode `data` (the payload after the selector) against `fragment`.
///
/// Parameter `i` is read from the word at byte offset `i * 32`. Any failure
/// aborts the whole decode; a partially filled map is never returned.
/// Trailing bytes beyond the last parameter are ignored.
pub fn decode_args(fragment: &ErrorFragment, data: &[u8]) -> Result<ArgumentMap, DecodeError> {
    let mut args = ArgumentMap::new();
    for (index, param) in fragment.params().iter().enumerate() {
        let start = index * WORD_SIZE;
        let word = data.get(start..start + WORD_SIZE).ok_or_else(|| DecodeError::MissingWord {
            index,
            param: param_label(param.name(), index),
        })?;
        let value = decode_word(param.ty(), word).map_err(|e| {
            let e = e.at_param(index, &param_label(param.name(), index));
            debug!(error = fragment.signature(), "argument decode failed: {e}");
            e
        })?;
        args.insert_arg(index, param.name(), value);
    }
    Ok(args)
}

fn param_label(name: &str, index: usize) -> String {
    if name.is_empty() {
        format!("#{index}")
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use revertkit_core::{ArgValue, ErrorFragment};

    fn words(values: &[u64]) -> Vec<u8> {
        let mut out = Vec::new();
        for v in values {
            out.extend_from_slice(&[0u8; 24]);
            out.extend_from_slice(&v.to_be_bytes());
        }
        out
    }

    #[test]
    fn decodes_each_param_under_three_keys() {
        let f = ErrorFragment::parse("error InsufficientBalance(uint256 available, uint256 required)").unwrap();
        let args = decode_args(&f, &words(&[100, 50])).unwrap();

        assert_eq!(args.len(), 6);
        for (index, name, expected) in [(0usize, "available", 100u64), (1, "required", 50)] {
            let expected = ArgValue::from(expected);
            assert_eq!(args.named(name), Some(&expected));
            assert_eq!(args.at(index), Some(&expected));
            assert_eq!(args.named(&index.to_string()), Some(&expected));
        }
    }

    #[test]
    fn zero_params_yield_empty_map() {
        let f = ErrorFragment::parse("error Paused()").unwrap();
        assert!(decode_args(&f, &[]).unwrap().is_empty());
    }

    #[test]
    fn unsupported_type_aborts_whole_map() {
        let f = ErrorFragment::parse("error Batch(uint256 count, uint256[] ids)").unwrap();
        let err = decode_args(&f, &words(&[1, 2])).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::UnsupportedType { ref ty, ref param } if ty == "uint256[]" && param == "ids"
        ));
    }

    #[test]
    fn missing_word_is_reported() {
        let f = ErrorFragment::parse("error Pair(uint256, uint256)").unwrap();
        let err = decode_args(&f, &words(&[1])).unwrap_err();
        assert!(matches!(err, DecodeError::MissingWord { index: 1, ref param } if param == "#1"));
    }

    #[test]
    fn trailing_bytes_ignored() {
        let f = ErrorFragment::parse("error One(uint256 x)").unwrap();
        let args = decode_args(&f, &words(&[7, 8, 9])).unwrap();
        assert_eq!(args.series(), vec![ArgValue::from(7u64)]);
    }
}
