//! Core types: classification codes, decoded argument values and the
//! triple-keyed argument map.

use std::collections::BTreeMap;
use std::fmt;

use alloy_primitives::{Address, I256, U256};
use serde::{Deserialize, Serialize, Serializer};

// ─── ErrorCode ────────────────────────────────────────────────────────────────

/// Classification of a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Reverted with a reason string or a panic code.
    CallException,
    /// The sender cannot cover value + gas.
    InsufficientFunds,
    /// The nonce was already used.
    NonceExpired,
    /// A replacement transaction did not bump the fee enough.
    ReplacementUnderpriced,
    /// Execution ran out of gas, or gas estimation exceeded the allowance.
    OutOfGas,
    /// The user rejected the request in their wallet.
    ActionRejected,
    /// A custom error resolved against a caller-supplied interface.
    CustomError,
    /// Nothing recognisable.
    UnknownError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CallException => "CALL_EXCEPTION",
            Self::InsufficientFunds => "INSUFFICIENT_FUNDS",
            Self::NonceExpired => "NONCE_EXPIRED",
            Self::ReplacementUnderpriced => "REPLACEMENT_UNDERPRICED",
            Self::OutOfGas => "OUT_OF_GAS",
            Self::ActionRejected => "ACTION_REJECTED",
            Self::CustomError => "CUSTOM_ERROR",
            Self::UnknownError => "UNKNOWN_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── ArgValue ─────────────────────────────────────────────────────────────────

/// A decoded custom error argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgValue {
    Uint(U256),
    Int(I256),
    /// Rendered EIP-55 checksummed.
    Address(Address),
    Bool(bool),
    /// Uninterpreted text. `bytes`, `bytesN` and `string` words decode to
    /// their raw `0x`-prefixed hex.
    Text(String),
}

impl ArgValue {
    /// `(negative, magnitude)` for integers and numeric text
    /// (decimal, optionally signed, or `0x` hex).
    fn numeric(&self) -> Option<(bool, U256)> {
        let (negative, magnitude) = match self {
            Self::Uint(v) => (false, *v),
            Self::Int(v) => (v.is_negative(), v.unsigned_abs()),
            Self::Text(s) => parse_numeric(s)?,
            Self::Address(_) | Self::Bool(_) => return None,
        };
        Some((negative && !magnitude.is_zero(), magnitude))
    }

    /// Whether this stored value satisfies `expected`.
    ///
    /// Integers compare numerically whatever the representation of
    /// `expected`; an address also equals its checksummed string; anything
    /// else compares strictly.
    pub fn matches(&self, expected: &ArgValue) -> bool {
        match self {
            Self::Uint(_) | Self::Int(_) => match (self.numeric(), expected.numeric()) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            },
            Self::Address(addr) => match expected {
                Self::Address(other) => addr == other,
                Self::Text(s) => *s == addr.to_checksum(None),
                _ => false,
            },
            _ => self == expected,
        }
    }

    pub fn as_uint(&self) -> Option<U256> {
        match self {
            Self::Uint(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<I256> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_address(&self) -> Option<Address> {
        match self {
            Self::Address(a) => Some(*a),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

fn parse_numeric(s: &str) -> Option<(bool, U256)> {
    let s = s.trim();
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };
    let magnitude = match digits.strip_prefix("0x").or_else(|| digits.strip_prefix("0X")) {
        Some(hex) => U256::from_str_radix(hex, 16).ok()?,
        None if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) => {
            U256::from_str_radix(digits, 10).ok()?
        }
        None => return None,
    };
    Some((negative, magnitude))
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uint(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Address(a) => f.write_str(&a.to_checksum(None)),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl Serialize for ArgValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Bool(b) => serializer.serialize_bool(*b),
            other => serializer.collect_str(other),
        }
    }
}

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {$(
        impl From<$t> for ArgValue {
            fn from(v: $t) -> Self {
                Self::Uint(U256::from(v))
            }
        }
    )*};
}

macro_rules! impl_from_signed {
    ($($t:ty),*) => {$(
        impl From<$t> for ArgValue {
            fn from(v: $t) -> Self {
                let magnitude = I256::from_raw(U256::from(v.unsigned_abs()));
                Self::Int(if v < 0 { -magnitude } else { magnitude })
            }
        }
    )*};
}

impl_from_unsigned!(u8, u16, u32, u64, u128, usize);
impl_from_signed!(i8, i16, i32, i64, i128);

impl From<U256> for ArgValue {
    fn from(v: U256) -> Self {
        Self::Uint(v)
    }
}

impl From<I256> for ArgValue {
    fn from(v: I256) -> Self {
        Self::Int(v)
    }
}

impl From<Address> for ArgValue {
    fn from(a: Address) -> Self {
        Self::Address(a)
    }
}

impl From<bool> for ArgValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<&str> for ArgValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

// ─── ArgKey ───────────────────────────────────────────────────────────────────

/// A key into an [`ArgumentMap`]: a position or a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ArgKey {
    Index(usize),
    Name(String),
}

impl ArgKey {
    /// Integer keys, and string keys made only of ASCII digits.
    pub fn is_numeric(&self) -> bool {
        match self {
            Self::Index(_) => true,
            Self::Name(s) => !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()),
        }
    }
}

impl From<usize> for ArgKey {
    fn from(i: usize) -> Self {
        Self::Index(i)
    }
}

impl From<&str> for ArgKey {
    fn from(s: &str) -> Self {
        Self::Name(s.to_string())
    }
}

impl From<String> for ArgKey {
    fn from(s: String) -> Self {
        Self::Name(s)
    }
}

impl fmt::Display for ArgKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(i) => write!(f, "{i}"),
            Self::Name(s) => f.write_str(s),
        }
    }
}

// ─── ArgumentMap ──────────────────────────────────────────────────────────────

/// Decoded arguments keyed three ways: parameter name, integer index and
/// stringified index.
///
/// Insertion order is preserved. Inserting an existing key overwrites its
/// value in place, so a parameter named like another parameter's index
/// shadows it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgumentMap {
    entries: Vec<(ArgKey, ArgValue)>,
}

impl ArgumentMap {
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn insert(&mut self, key: ArgKey, value: ArgValue) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Store the argument at `index` under `name` (skipped when empty),
    /// `index` and `"index"`.
    pub fn insert_arg(&mut self, index: usize, name: &str, value: ArgValue) {
        if !name.is_empty() {
            self.insert(ArgKey::Name(name.to_string()), value.clone());
        }
        self.insert(ArgKey::Index(index), value.clone());
        self.insert(ArgKey::Name(index.to_string()), value);
    }

    pub fn get(&self, key: &ArgKey) -> Option<&ArgValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Look up the parameter at `index`.
    pub fn at(&self, index: usize) -> Option<&ArgValue> {
        self.get(&ArgKey::Index(index))
    }

    /// Look up a string key (parameter name or stringified index).
    pub fn named(&self, name: &str) -> Option<&ArgValue> {
        self.entries
            .iter()
            .find(|(k, _)| matches!(k, ArgKey::Name(n) if n == name))
            .map(|(_, v)| v)
    }

    /// Values under integer keys, in index order.
    pub fn series(&self) -> Vec<ArgValue> {
        let mut indexed: Vec<(usize, &ArgValue)> = self
            .entries
            .iter()
            .filter_map(|(k, v)| match k {
                ArgKey::Index(i) => Some((*i, v)),
                ArgKey::Name(_) => None,
            })
            .collect();
        indexed.sort_by_key(|(i, _)| *i);
        indexed.into_iter().map(|(_, v)| v.clone()).collect()
    }

    /// Values under non-numeric keys, i.e. by parameter name.
    pub fn hash(&self) -> BTreeMap<String, ArgValue> {
        self.entries
            .iter()
            .filter(|(k, _)| !k.is_numeric())
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ArgKey, &ArgValue)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_code_serializes_screaming_snake() {
        let json = serde_json::to_string(&ErrorCode::InsufficientFunds).unwrap();
        assert_eq!(json, "\"INSUFFICIENT_FUNDS\"");
        assert_eq!(ErrorCode::UnknownError.to_string(), "UNKNOWN_ERROR");
        let back: ErrorCode = serde_json::from_str("\"CALL_EXCEPTION\"").unwrap();
        assert_eq!(back, ErrorCode::CallException);
    }

    #[test]
    fn integers_match_any_representation() {
        let stored = ArgValue::Uint(U256::from(100u64));
        assert!(stored.matches(&ArgValue::from(100u64)));
        assert!(stored.matches(&ArgValue::from(100i32)));
        assert!(stored.matches(&ArgValue::from("100")));
        assert!(stored.matches(&ArgValue::from("0x64")));
        assert!(!stored.matches(&ArgValue::from(101u64)));
        assert!(!stored.matches(&ArgValue::from("-100")));
        assert!(!stored.matches(&ArgValue::Bool(true)));

        let negative = ArgValue::from(-5i64);
        assert!(negative.matches(&ArgValue::from("-5")));
        assert!(!negative.matches(&ArgValue::from(5u64)));
    }

    #[test]
    fn address_matches_checksummed_text() {
        let addr: Address = "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045".parse().unwrap();
        let stored = ArgValue::Address(addr);
        assert!(stored.matches(&ArgValue::Address(addr)));
        assert!(stored.matches(&ArgValue::from("0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045")));
        assert!(!stored.matches(&ArgValue::from("0xd8da6bf26964af9d7eed9e03e53415d37aa96045")));
        assert_eq!(stored.to_string(), "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045");
    }

    #[test]
    fn typed_accessors() {
        let addr = Address::repeat_byte(0x11);
        assert_eq!(ArgValue::from(7u8).as_uint(), Some(U256::from(7u8)));
        assert_eq!(ArgValue::from(-7i16).as_int().map(|v| v.to_string()).as_deref(), Some("-7"));
        assert_eq!(ArgValue::Address(addr).as_address(), Some(addr));
        assert_eq!(ArgValue::Bool(true).as_bool(), Some(true));
        assert_eq!(ArgValue::from(7u8).as_int(), None);
        assert_eq!(ArgValue::from("7").as_uint(), None);
        assert_eq!(ArgValue::Bool(false).as_address(), None);
    }

    #[test]
    fn text_matches_strictly() {
        let stored = ArgValue::from("0xabcd");
        assert!(stored.matches(&ArgValue::from("0xabcd")));
        assert!(!stored.matches(&ArgValue::from("0xABCD")));
    }

    #[test]
    fn argument_map_triple_keys() {
        let mut args = ArgumentMap::new();
        args.insert_arg(0, "available", ArgValue::from(100u64));
        args.insert_arg(1, "required", ArgValue::from(50u64));

        assert_eq!(args.len(), 6);
        assert_eq!(args.named("available"), Some(&ArgValue::from(100u64)));
        assert_eq!(args.at(0), Some(&ArgValue::from(100u64)));
        assert_eq!(args.named("0"), Some(&ArgValue::from(100u64)));
        assert_eq!(args.get(&ArgKey::from(1usize)), Some(&ArgValue::from(50u64)));

        assert_eq!(args.series(), vec![ArgValue::from(100u64), ArgValue::from(50u64)]);
        let hash = args.hash();
        assert_eq!(hash.len(), 2);
        assert_eq!(hash["required"], ArgValue::from(50u64));
    }

    #[test]
    fn argument_map_name_collision_overwrites_in_place() {
        let mut args = ArgumentMap::new();
        // A parameter literally named "1" collides with the next index key.
        args.insert_arg(0, "1", ArgValue::from(7u64));
        args.insert_arg(1, "x", ArgValue::from(8u64));

        assert_eq!(args.len(), 5);
        assert_eq!(args.named("1"), Some(&ArgValue::from(8u64)));
        assert_eq!(args.series(), vec![ArgValue::from(7u64), ArgValue::from(8u64)]);
        assert_eq!(args.hash().keys().collect::<Vec<_>>(), vec!["x"]);
    }

    #[test]
    fn unnamed_params_only_get_index_keys() {
        let mut args = ArgumentMap::new();
        args.insert_arg(0, "", ArgValue::Bool(true));
        assert_eq!(args.len(), 2);
        assert!(args.hash().is_empty());
    }
}
