//! The decode result and its structured matcher.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};

use crate::interface::{ErrorFragment, Interface};
use crate::selector::encode_selector;
use crate::types::{ArgKey, ArgValue, ArgumentMap, ErrorCode};

static NO_ARGS: ArgumentMap = ArgumentMap::new();

/// Context string carried by every custom record.
pub const CUSTOM_ERROR_CONTEXT: &str = "custom error";

/// A custom error resolved against a caller-supplied interface.
#[derive(Debug, Clone)]
pub struct CustomError<'a> {
    pub interface: Option<&'a Interface>,
    pub signature: &'a str,
    pub fragment: &'a ErrorFragment,
    pub args: ArgumentMap,
}

/// A decoded failure: either a recognised standard failure or a custom
/// error matched by selector.
#[derive(Debug, Clone)]
pub enum ErrorRecord<'a> {
    Standard { code: ErrorCode, context: String },
    Custom(CustomError<'a>),
}

impl<'a> ErrorRecord<'a> {
    pub fn standard(code: ErrorCode, context: impl Into<String>) -> Self {
        Self::Standard {
            code,
            context: context.into(),
        }
    }

    /// A standard record classified [`ErrorCode::UnknownError`].
    pub fn unknown(context: impl Into<String>) -> Self {
        Self::standard(ErrorCode::UnknownError, context)
    }

    pub fn custom(
        interface: Option<&'a Interface>,
        fragment: &'a ErrorFragment,
        args: ArgumentMap,
    ) -> Self {
        Self::Custom(CustomError {
            interface,
            signature: fragment.signature(),
            fragment,
            args,
        })
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, Self::Custom(_))
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Standard { code, .. } => *code,
            Self::Custom(_) => ErrorCode::CustomError,
        }
    }

    pub fn context(&self) -> &str {
        match self {
            Self::Standard { context, .. } => context,
            Self::Custom(_) => CUSTOM_ERROR_CONTEXT,
        }
    }

    /// The interface the error was resolved in.
    pub fn interface(&self) -> Option<&'a Interface> {
        match self {
            Self::Custom(c) => c.interface,
            Self::Standard { .. } => None,
        }
    }

    /// The custom error's name; `None` for standard records.
    pub fn name(&self) -> Option<&'a str> {
        self.fragment().map(ErrorFragment::name)
    }

    pub fn signature(&self) -> Option<&'a str> {
        match self {
            Self::Custom(c) => Some(c.signature),
            Self::Standard { .. } => None,
        }
    }

    pub fn fragment(&self) -> Option<&'a ErrorFragment> {
        match self {
            Self::Custom(c) => Some(c.fragment),
            Self::Standard { .. } => None,
        }
    }

    /// Decoded arguments; empty for standard records.
    pub fn args(&self) -> &ArgumentMap {
        match self {
            Self::Custom(c) => &c.args,
            Self::Standard { .. } => &NO_ARGS,
        }
    }

    /// Arguments in declaration order.
    pub fn arg_series(&self) -> Vec<ArgValue> {
        self.args().series()
    }

    /// Arguments by parameter name.
    pub fn arg_hash(&self) -> BTreeMap<String, ArgValue> {
        self.args().hash()
    }

    /// Whether every criterion set in `criteria` holds for this record.
    pub fn matches(&self, criteria: &Criteria) -> bool {
        if criteria.code.is_some_and(|code| code != self.code()) {
            return false;
        }
        if criteria.context.as_deref().is_some_and(|ctx| ctx != self.context()) {
            return false;
        }
        if criteria.name.is_some() && criteria.name.as_deref() != self.name() {
            return false;
        }
        if criteria.signature.is_some() && criteria.signature.as_deref() != self.signature() {
            return false;
        }
        if criteria.interface.is_some()
            && criteria.interface.as_deref() != self.interface().map(Interface::name)
        {
            return false;
        }
        let args = self.args();
        criteria
            .args
            .iter()
            .all(|(key, expected)| args.get(key).is_some_and(|stored| stored.matches(expected)))
    }
}

impl fmt::Display for ErrorRecord<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standard { code, context } if context.is_empty() => write!(f, "{code}"),
            Self::Standard { code, context } => write!(f, "{code}: {context}"),
            Self::Custom(c) => {
                write!(f, "{}(", c.fragment.name())?;
                for (i, param) in c.fragment.params().iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    let value = c.args.at(i).map(ToString::to_string).unwrap_or_default();
                    if param.name().is_empty() {
                        write!(f, "{value}")?;
                    } else {
                        write!(f, "{}={value}", param.name())?;
                    }
                }
                f.write_str(")")
            }
        }
    }
}

#[derive(Serialize)]
struct RecordView<'r> {
    code: ErrorCode,
    context: &'r str,
    #[serde(skip_serializing_if = "Option::is_none")]
    interface: Option<&'r str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'r str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    signature: Option<&'r str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    selector: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    args: Vec<ArgValue>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    named: BTreeMap<String, ArgValue>,
}

impl Serialize for ErrorRecord<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        RecordView {
            code: self.code(),
            context: self.context(),
            interface: self.interface().map(Interface::name),
            name: self.name(),
            signature: self.signature(),
            selector: self.fragment().map(|f| encode_selector(f.selector())),
            args: self.arg_series(),
            named: self.arg_hash(),
        }
        .serialize(serializer)
    }
}

// ─── Criteria ─────────────────────────────────────────────────────────────────

/// A partial description of an [`ErrorRecord`]. Unset fields impose no
/// constraint; an empty `Criteria` matches every record.
#[derive(Debug, Clone, Default)]
pub struct Criteria {
    code: Option<ErrorCode>,
    context: Option<String>,
    name: Option<String>,
    signature: Option<String>,
    interface: Option<String>,
    args: Vec<(ArgKey, ArgValue)>,
}

impl Criteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    pub fn context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn signature(mut self, signature: impl Into<String>) -> Self {
        self.signature = Some(signature.into());
        self
    }

    /// Require the record to come from the interface called `name`.
    pub fn interface(mut self, name: impl Into<String>) -> Self {
        self.interface = Some(name.into());
        self
    }

    /// Require the argument under `key` to equal `value`.
    pub fn arg(mut self, key: impl Into<ArgKey>, value: impl Into<ArgValue>) -> Self {
        self.args.push((key.into(), value.into()));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interface::{ErrorFragment, Interface};
    use alloy_primitives::U256;

    fn bank() -> Interface {
        Interface::parse(
            "Bank",
            ["error InsufficientBalance(uint256 available, uint256 required)"],
        )
        .unwrap()
    }

    fn record(iface: &Interface) -> ErrorRecord<'_> {
        let fragment = &iface.errors()[0];
        let mut args = ArgumentMap::new();
        args.insert_arg(0, "available", ArgValue::from(100u64));
        args.insert_arg(1, "required", ArgValue::from(50u64));
        ErrorRecord::custom(Some(iface), fragment, args)
    }

    #[test]
    fn custom_accessors() {
        let iface = bank();
        let r = record(&iface);
        assert!(r.is_custom());
        assert_eq!(r.code(), ErrorCode::CustomError);
        assert_eq!(r.context(), "custom error");
        assert_eq!(r.name(), Some("InsufficientBalance"));
        assert_eq!(r.signature(), Some("InsufficientBalance(uint256,uint256)"));
        assert_eq!(r.interface().map(Interface::name), Some("Bank"));
        assert_eq!(r.arg_series(), vec![ArgValue::from(100u64), ArgValue::from(50u64)]);
        assert_eq!(r.arg_hash()["available"], ArgValue::from(100u64));
        assert_eq!(r.to_string(), "InsufficientBalance(available=100, required=50)");
    }

    #[test]
    fn standard_accessors() {
        let r = ErrorRecord::standard(ErrorCode::InsufficientFunds, "insufficient funds for gas");
        assert!(!r.is_custom());
        assert_eq!(r.name(), None);
        assert!(r.interface().is_none());
        assert!(r.args().is_empty());
        assert!(r.arg_series().is_empty());
        assert_eq!(r.to_string(), "INSUFFICIENT_FUNDS: insufficient funds for gas");
        assert_eq!(ErrorRecord::unknown("").to_string(), "UNKNOWN_ERROR");
    }

    #[test]
    fn empty_criteria_matches_everything() {
        let iface = bank();
        assert!(record(&iface).matches(&Criteria::new()));
        assert!(ErrorRecord::unknown("x").matches(&Criteria::new()));
    }

    #[test]
    fn criteria_on_fields() {
        let iface = bank();
        let r = record(&iface);
        assert!(r.matches(&Criteria::new().code(ErrorCode::CustomError).name("InsufficientBalance")));
        assert!(r.matches(&Criteria::new().interface("Bank")));
        assert!(!r.matches(&Criteria::new().interface("Vault")));
        assert!(!r.matches(&Criteria::new().name("Other")));
        assert!(!r.matches(&Criteria::new().code(ErrorCode::UnknownError)));

        let standard = ErrorRecord::standard(ErrorCode::CallException, "Not enough tokens");
        assert!(standard.matches(&Criteria::new().code(ErrorCode::CallException).context("Not enough tokens")));
        assert!(!standard.matches(&Criteria::new().name("InsufficientBalance")));
    }

    #[test]
    fn criteria_on_args_compare_numerically() {
        let iface = bank();
        let r = record(&iface);
        assert!(r.matches(&Criteria::new().arg(0usize, 100u64)));
        assert!(r.matches(&Criteria::new().arg(0usize, U256::from(100u64))));
        assert!(r.matches(&Criteria::new().arg("0", "0x64")));
        assert!(r.matches(&Criteria::new().arg("required", 50i64).arg(0usize, "100")));
        assert!(!r.matches(&Criteria::new().arg(0usize, 50u64)));
        assert!(!r.matches(&Criteria::new().arg("missing", 1u64)));
        assert!(!r.matches(&Criteria::new().arg(2usize, 1u64)));
    }

    #[test]
    fn record_without_interface() {
        let fragment = ErrorFragment::parse("error Paused()").unwrap();
        let r = ErrorRecord::custom(None, &fragment, ArgumentMap::new());
        assert_eq!(r.name(), Some("Paused"));
        assert!(r.interface().is_none());
        assert!(!r.matches(&Criteria::new().interface("Bank")));
        assert_eq!(r.to_string(), "Paused()");
    }

    #[test]
    fn serializes_summary() {
        let iface = bank();
        let json = serde_json::to_value(record(&iface)).unwrap();
        assert_eq!(json["code"], "CUSTOM_ERROR");
        assert_eq!(json["interface"], "Bank");
        assert_eq!(json["selector"], "0xcf479181");
        assert_eq!(json["args"], serde_json::json!(["100", "50"]));
        assert_eq!(json["named"]["required"], "50");

        let json = serde_json::to_value(ErrorRecord::unknown("boom")).unwrap();
        assert_eq!(json, serde_json::json!({"code": "UNKNOWN_ERROR", "context": "boom"}));
    }
}
