//! Locate revert data inside nested failure objects.
//!
//! Providers wrap the node's error in one or more `error` objects, so the
//! payload may sit at `data`, `error.data`, `error.error.data`, and so on.

use serde_json::Value;
use tracing::trace;

/// The failure object and each nested `error` object, outermost first,
/// at most `max_depth` levels.
pub fn nesting_chain(failure: &Value, max_depth: usize) -> impl Iterator<Item = &Value> {
    std::iter::successors(Some(failure), |level| level.get("error")).take(max_depth)
}

/// First non-empty hex `data` string along the nesting chain, decoded.
///
/// Returns `None` when no level carries usable data.
pub fn locate_payload(failure: &Value, max_depth: usize) -> Option<Vec<u8>> {
    nesting_chain(failure, max_depth)
        .filter_map(|level| level.get("data").and_then(Value::as_str))
        .find_map(parse_hex_payload)
}

/// Decode a `0x`-prefixed (or bare) hex string; `None` if empty or not hex.
pub fn parse_hex_payload(s: &str) -> Option<Vec<u8>> {
    let stripped = s.trim();
    let stripped = stripped.strip_prefix("0x").unwrap_or(stripped);
    if stripped.is_empty() {
        return None;
    }
    match hex::decode(stripped) {
        Ok(bytes) => Some(bytes),
        Err(e) => {
            trace!(data = s, error = %e, "ignoring non-hex data field");
            None
        }
    }
}

/// Human-readable messages along the nesting chain, outermost first:
/// `message`, `reason` and `data.message` string fields.
pub fn collect_messages(failure: &Value, max_depth: usize) -> Vec<&str> {
    let mut out = Vec::new();
    for level in nesting_chain(failure, max_depth) {
        for candidate in [
            level.get("message"),
            level.get("reason"),
            level.get("data").and_then(|d| d.get("message")),
        ] {
            if let Some(msg) = candidate.and_then(Value::as_str) {
                if !msg.is_empty() {
                    out.push(msg);
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn direct_data() {
        let f = json!({ "data": "0xdeadbeef" });
        assert_eq!(locate_payload(&f, 5), Some(vec![0xde, 0xad, 0xbe, 0xef]));
    }

    #[test]
    fn nested_data_first_non_empty_wins() {
        let f = json!({
            "data": "0x",
            "error": { "data": { "message": "object, not hex" },
                "error": { "data": "0x01020304", "error": { "data": "0xffffffff" } } }
        });
        assert_eq!(locate_payload(&f, 5), Some(vec![1, 2, 3, 4]));
    }

    #[test]
    fn respects_max_depth() {
        let f = json!({ "error": { "error": { "error": { "error": { "data": "0xaabbccdd" } } } } });
        assert_eq!(locate_payload(&f, 5), Some(vec![0xaa, 0xbb, 0xcc, 0xdd]));
        assert_eq!(locate_payload(&f, 4), None);

        let deeper = json!({ "error": { "error": { "error": { "error": { "error": { "data": "0x01" } } } } } });
        assert_eq!(locate_payload(&deeper, 5), None);
    }

    #[test]
    fn no_usable_payload() {
        assert_eq!(locate_payload(&json!({}), 5), None);
        assert_eq!(locate_payload(&json!("just a string"), 5), None);
        assert_eq!(locate_payload(&json!({ "data": "not hex" }), 5), None);
        assert_eq!(locate_payload(&json!({ "data": 42 }), 5), None);
    }

    #[test]
    fn messages_outermost_first() {
        let f = json!({
            "message": "Internal JSON-RPC error.",
            "error": { "reason": "insufficient funds", "data": { "message": "inner" } }
        });
        assert_eq!(
            collect_messages(&f, 5),
            vec!["Internal JSON-RPC error.", "insufficient funds", "inner"]
        );
    }
}
