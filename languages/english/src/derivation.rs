use lexifree_core::prompt::render;
use lexifree_core::reply::parse_object;
use serde_json::Value;

use crate::prompts::DERIVED_CHECK;
use crate::session::Session;

/// Whether a word is a direct inflection of another word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Derivation {
    NotDerived,
    Derived(String),
}

pub async fn check_if_derived(session: &mut Session<'_>, word: &str) -> Derivation {
    let prompt = render(DERIVED_CHECK, &[("WORD", word)]);
    let reply = session.ask(&prompt, true).await;
    interpret(word, &reply)
}

fn interpret(word: &str, reply: &str) -> Derivation {
    let Some(data) = parse_object(reply) else {
        tracing::warn!("derivation check for \"{}\" was unreadable, treating as not derived", word);
        return Derivation::NotDerived;
    };

    if !matches!(data.get("is_derived"), Some(Value::Bool(true))) {
        return Derivation::NotDerived;
    }

    let root = match data.get("root_word") {
        Some(Value::String(root)) => root.trim(),
        _ => {
            tracing::warn!("\"{}\" was called derived without a root word", word);
            return Derivation::NotDerived;
        }
    };

    // A word reported as derived from itself would redirect forever.
    if root.is_empty() || root == word {
        tracing::debug!("ignoring self-derivation of \"{}\"", word);
        return Derivation::NotDerived;
    }

    Derivation::Derived(root.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_word_is_returned_for_derived_words() {
        let got = interpret("running", r#"{"is_derived": true, "root_word": "run"}"#);
        assert_eq!(got, Derivation::Derived("run".to_string()));
    }

    #[test]
    fn test_self_derivation_is_not_derived() {
        let got = interpret("running", r#"{"is_derived": true, "root_word": "running"}"#);
        assert_eq!(got, Derivation::NotDerived);
    }

    #[test]
    fn test_root_is_ignored_when_not_derived() {
        let got = interpret("phone", r#"{"is_derived": false, "root_word": "phon"}"#);
        assert_eq!(got, Derivation::NotDerived);
    }

    #[test]
    fn test_unreadable_reply_is_not_derived() {
        assert_eq!(interpret("cats", "An error occurred: timeout"), Derivation::NotDerived);
        assert_eq!(interpret("cats", r#"{"is_derived": true}"#), Derivation::NotDerived);
    }
}
