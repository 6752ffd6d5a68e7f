//! Caller-supplied error ABIs.
//!
//! An [`Interface`] is a named, ordered collection of [`ErrorFragment`]s.
//! Fragments are built once — parameter types are parsed into [`ParamType`]
//! and the selector is hashed at construction — and are read-only afterwards.

use std::fmt;

use alloy_json_abi::{AbiItem, Error as AlloyError, JsonAbi};
use thiserror::Error;

use crate::selector::{selector, Selector};

/// Errors raised while building an interface.
#[derive(Debug, Error)]
pub enum InterfaceError {
    #[error("invalid error signature `{signature}`: {reason}")]
    InvalidSignature { signature: String, reason: String },

    #[error("invalid ABI JSON: {0}")]
    InvalidAbi(#[from] serde_json::Error),
}

// ─── ParamType ────────────────────────────────────────────────────────────────

/// The declared type of an error parameter.
///
/// Only types that occupy exactly one 32-byte word are decodable; everything
/// else is kept as [`ParamType::Unsupported`] so that an interface carrying
/// such errors still loads, and the failure surfaces when one is decoded.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParamType {
    /// `uintN`, width in bits.
    Uint(usize),
    /// `intN`, width in bits.
    Int(usize),
    Address,
    Bool,
    /// `bytesN`, width in bytes.
    FixedBytes(usize),
    Bytes,
    String,
    /// Arrays, tuples, functions and anything unrecognised.
    Unsupported(String),
}

impl ParamType {
    /// Parse a Solidity type tag. Never fails; unknown tags become
    /// [`ParamType::Unsupported`].
    pub fn parse(tag: &str) -> Self {
        let tag = tag.trim();
        match tag {
            "address" => return Self::Address,
            "bool" | "boolean" => return Self::Bool,
            "string" => return Self::String,
            "bytes" => return Self::Bytes,
            "uint" => return Self::Uint(256),
            "int" => return Self::Int(256),
            _ => {}
        }
        if let Some(bits) = tag.strip_prefix("uint").and_then(int_width) {
            return Self::Uint(bits);
        }
        if let Some(bits) = tag.strip_prefix("int").and_then(int_width) {
            return Self::Int(bits);
        }
        if let Some(size) = tag.strip_prefix("bytes").and_then(|n| n.parse::<usize>().ok()) {
            if (1..=32).contains(&size) {
                return Self::FixedBytes(size);
            }
        }
        Self::Unsupported(tag.to_string())
    }

    /// The canonical spelling used in signatures (`uint` → `uint256`).
    pub fn canonical(&self) -> String {
        match self {
            Self::Uint(bits) => format!("uint{bits}"),
            Self::Int(bits) => format!("int{bits}"),
            Self::Address => "address".into(),
            Self::Bool => "bool".into(),
            Self::FixedBytes(size) => format!("bytes{size}"),
            Self::Bytes => "bytes".into(),
            Self::String => "string".into(),
            Self::Unsupported(tag) => tag.clone(),
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Unsupported(_))
    }
}

fn int_width(digits: &str) -> Option<usize> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let bits: usize = digits.parse().ok()?;
    (bits > 0 && bits <= 256 && bits % 8 == 0).then_some(bits)
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}

// ─── Param ────────────────────────────────────────────────────────────────────

/// A single error parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    name: String,
    ty: ParamType,
}

impl Param {
    /// `ty` is a Solidity type tag; `name` may be empty for unnamed params.
    pub fn new(ty: &str, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ParamType::parse(ty),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> &ParamType {
        &self.ty
    }
}

// ─── ErrorFragment ────────────────────────────────────────────────────────────

/// A parsed error declaration: name plus ordered, typed parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorFragment {
    name: String,
    params: Vec<Param>,
    signature: String,
    selector: Selector,
}

impl ErrorFragment {
    pub fn new(name: impl Into<String>, params: Vec<Param>) -> Self {
        let name = name.into();
        let types: Vec<String> = params.iter().map(|p| p.ty.canonical()).collect();
        let signature = format!("{}({})", name, types.join(","));
        let selector = selector(&signature);
        Self {
            name,
            params,
            signature,
            selector,
        }
    }

    /// Parse a human-readable declaration.
    ///
    /// Accepts `error Foo(uint256 a, address b)`, `Foo(uint256,address)` and
    /// a trailing `;`. Parameter names are optional.
    pub fn parse(declaration: &str) -> Result<Self, InterfaceError> {
        let invalid = |reason: &str| InterfaceError::InvalidSignature {
            signature: declaration.to_string(),
            reason: reason.to_string(),
        };

        let decl = declaration.trim().trim_end_matches(';').trim_end();
        let decl = decl.strip_prefix("error ").unwrap_or(decl).trim_start();

        let open = decl.find('(').ok_or_else(|| invalid("missing `(`"))?;
        let body = decl[open + 1..]
            .strip_suffix(')')
            .ok_or_else(|| invalid("missing closing `)`"))?;
        let name = decl[..open].trim();
        if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$') {
            return Err(invalid("invalid error name"));
        }

        let mut params = Vec::new();
        for raw in split_top_level(body) {
            let raw = raw.trim();
            if raw.is_empty() {
                if body.trim().is_empty() {
                    break;
                }
                return Err(invalid("empty parameter"));
            }
            params.push(parse_param(raw));
        }
        Ok(Self::new(name, params))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// Canonical signature, e.g. `InsufficientBalance(uint256,uint256)`.
    pub fn signature(&self) -> &str {
        &self.signature
    }

    pub fn selector(&self) -> Selector {
        self.selector
    }
}

impl fmt::Display for ErrorFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error {}(", self.name)?;
        for (i, p) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", p.ty)?;
            if !p.name.is_empty() {
                write!(f, " {}", p.name)?;
            }
        }
        f.write_str(")")
    }
}

/// Split on commas that are not nested inside parentheses.
fn split_top_level(body: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in body.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&body[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&body[start..]);
    parts
}

/// `uint256 amount`, `address`, `(uint256,bool) pair`.
fn parse_param(raw: &str) -> Param {
    // Tuple types may contain spaces; the name is whatever follows the
    // closing parenthesis (plus any array suffix).
    let (ty, rest) = match raw.rfind(')') {
        Some(close) if raw.starts_with('(') => {
            let tail = &raw[close + 1..];
            let suffix_len = tail
                .find(|c: char| c.is_whitespace())
                .unwrap_or(tail.len());
            (&raw[..close + 1 + suffix_len], &tail[suffix_len..])
        }
        _ => match raw.find(char::is_whitespace) {
            Some(split) => (&raw[..split], &raw[split..]),
            None => (raw, ""),
        },
    };
    let ty: String = ty.split_whitespace().collect();
    // Skip data-location and `indexed` modifiers.
    let name = rest
        .split_whitespace()
        .filter(|w| !matches!(*w, "memory" | "calldata" | "storage" | "indexed"))
        .last()
        .unwrap_or("");
    Param::new(&ty, name)
}

// ─── Interface ────────────────────────────────────────────────────────────────

/// A named collection of error fragments in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Interface {
    name: String,
    errors: Vec<ErrorFragment>,
}

impl Interface {
    /// Create an empty interface.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            errors: Vec::new(),
        }
    }

    /// Builder-style [`Interface::push`].
    pub fn with_error(mut self, fragment: ErrorFragment) -> Self {
        self.push(fragment);
        self
    }

    /// Append a fragment. Declaration order is resolution order.
    pub fn push(&mut self, fragment: ErrorFragment) {
        self.errors.push(fragment);
    }

    /// Build from human-readable declarations, one per item.
    pub fn parse<I, S>(name: impl Into<String>, declarations: I) -> Result<Self, InterfaceError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut iface = Self::new(name);
        for decl in declarations {
            iface.push(ErrorFragment::parse(decl.as_ref())?);
        }
        Ok(iface)
    }

    /// Build from a Solidity JSON ABI array, keeping `"type": "error"`
    /// entries in the order they appear. Other entries are ignored.
    pub fn from_abi_json(name: impl Into<String>, json: &str) -> Result<Self, InterfaceError> {
        let items: Vec<AbiItem<'_>> = serde_json::from_str(json)?;
        let mut iface = Self::new(name);
        for item in &items {
            if let AbiItem::Error(err) = item {
                iface.push(fragment_from_alloy(err));
            }
        }
        Ok(iface)
    }

    /// Build from an already-parsed alloy [`JsonAbi`]. Fragments follow the
    /// ABI's own iteration order (sorted by error name).
    pub fn from_json_abi(name: impl Into<String>, abi: &JsonAbi) -> Self {
        let mut iface = Self::new(name);
        for err in abi.errors() {
            iface.push(fragment_from_alloy(err));
        }
        iface
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn errors(&self) -> &[ErrorFragment] {
        &self.errors
    }

    /// First fragment declared with `name`.
    pub fn error(&self, name: &str) -> Option<&ErrorFragment> {
        self.errors.iter().find(|f| f.name == name)
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Convert an alloy error item, expanding tuples into their selector form.
fn fragment_from_alloy(err: &AlloyError) -> ErrorFragment {
    let params = err
        .inputs
        .iter()
        .map(|p| Param::new(&p.selector_type(), p.name.clone()))
        .collect();
    ErrorFragment::new(err.name.clone(), params)
}
