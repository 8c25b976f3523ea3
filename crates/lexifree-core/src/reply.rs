use serde_json::Value;

use crate::error::ReplyError;

/// How a structured reply was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyParse {
    Strict,
    /// Pulled out of surrounding prose by bracket scanning.
    Recovered,
}

/// Parse a model reply that should be pure JSON.
///
/// Falls back to the legacy bracket scan when the strict parse fails: the
/// widest `{...}` span, or the widest `[...]` span if a `[` opens first.
pub fn parse_structured(reply: &str) -> Result<(Value, ReplyParse), ReplyError> {
    if let Ok(value) = serde_json::from_str::<Value>(reply.trim()) {
        return Ok((value, ReplyParse::Strict));
    }

    let span = bracket_span(reply).ok_or(ReplyError::NoStructure)?;

    let value = serde_json::from_str::<Value>(span)?;
    tracing::warn!(
        "unstructured recovery used for reply of {} chars",
        reply.len()
    );
    Ok((value, ReplyParse::Recovered))
}

fn bracket_span(reply: &str) -> Option<&str> {
    let object = reply.find('{').zip(reply.rfind('}'));
    let list = reply.find('[').zip(reply.rfind(']'));

    let (start, end) = match (object, list) {
        (Some(o), Some(l)) if l.0 < o.0 => l,
        (Some(o), _) => o,
        (None, Some(l)) => l,
        (None, None) => return None,
    };

    (start < end).then(|| &reply[start..=end])
}

/// Parse a reply and require a JSON object.
pub fn parse_object(reply: &str) -> Option<serde_json::Map<String, Value>> {
    match parse_structured(reply) {
        Ok((Value::Object(map), _)) => Some(map),
        Ok(_) => None,
        Err(e) => {
            tracing::debug!("reply is not an object: {}", e);
            None
        }
    }
}

/// Parse a reply and require a JSON list.
pub fn parse_list(reply: &str) -> Option<Vec<Value>> {
    match parse_structured(reply) {
        Ok((Value::Array(items), _)) => Some(items),
        Ok(_) => None,
        Err(e) => {
            tracing::debug!("reply is not a list: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strict_json_is_preferred() {
        let (value, how) = parse_structured(r#"  {"is_derived": false}  "#).unwrap();
        assert_eq!(how, ReplyParse::Strict);
        assert_eq!(value["is_derived"], Value::Bool(false));
    }

    #[test]
    fn test_fenced_object_is_recovered() {
        let reply = "```json\n{\"word\": \"cat\", \"definitions\": [{\"definition\": \"a feline\"}]}\n```";
        let (value, how) = parse_structured(reply).unwrap();
        assert_eq!(how, ReplyParse::Recovered);
        assert_eq!(value["word"], "cat");
    }

    #[test]
    fn test_list_opening_first_wins() {
        let reply = "Here you go: [{\"is_poetic\": false}, {\"is_poetic\": true}] done";
        let items = parse_list(reply).unwrap();
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_prose_is_rejected() {
        assert!(matches!(
            parse_structured("An error occurred: timeout"),
            Err(ReplyError::NoStructure)
        ));
        assert!(parse_object("[1, 2]").is_none());
        assert!(parse_list("{\"a\": 1}").is_none());
    }
}
