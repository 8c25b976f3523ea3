//! LLM judge deciding whether one definition matches any of a list.

use std::sync::{Arc, Mutex};

use lexifree_core::prompt::render;
use lexifree_core::{CostAccumulator, RateTable};
use lexifree_llm::Completer;

const CHECK_DEFN: &str = r#"
Here are the official definitions for a particular word:

$GIVEN_DEFNS$

And here is an student's definition: "$DEFN$"

Does the student's definition fit one of the official definitions above?
If yes, answer with the number of the matching definition.
If no, answer with the word no.
Answer only with a number or the word no; no other words or marks at all.
"#;

const STRICT_SUFFIX: &str = r#"
Be sure to only answer with either a number (of the matching definition) or
with the word "no".
"#;

const MAX_TRIES: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Match(usize),
    NoMatch,
    /// Neither "no" nor a number after every try. Carries the last reply.
    Irregular(String),
}

pub struct DefinitionMatcher {
    completer: Arc<dyn Completer>,
    spent: Mutex<CostAccumulator>,
}

impl DefinitionMatcher {
    pub fn new(completer: Arc<dyn Completer>, rates: RateTable) -> Self {
        Self {
            completer,
            spent: Mutex::new(CostAccumulator::new(rates)),
        }
    }

    /// Does `candidate` fit one of `references`?
    pub async fn is_defn_good(&self, candidate: &str, references: &[String]) -> Verdict {
        let numbered = references
            .iter()
            .enumerate()
            .map(|(i, defn)| format!("{i}. {defn}"))
            .collect::<Vec<_>>()
            .join("\n");
        let base = render(CHECK_DEFN, &[("GIVEN_DEFNS", &numbered), ("DEFN", candidate)]);

        let mut last_reply = String::new();
        for attempt in 0..MAX_TRIES {
            let prompt = if attempt == 0 {
                base.clone()
            } else {
                format!("{base}{STRICT_SUFFIX}")
            };

            last_reply = match self.completer.complete(&prompt, false).await {
                Ok(completion) => {
                    if let Ok(mut spent) = self.spent.lock() {
                        spent.charge(completion.usage);
                    }
                    completion.text
                }
                Err(e) => format!("An error occurred: {e}"),
            };

            if let Some(verdict) = read_verdict(&last_reply) {
                return verdict;
            }
            tracing::debug!("unusable matcher reply on try {}: {:?}", attempt + 1, last_reply);
        }

        Verdict::Irregular(last_reply)
    }

    /// Dollars spent on matcher calls so far.
    pub fn spent(&self) -> f64 {
        self.spent.lock().map(|s| s.total()).unwrap_or(0.0)
    }
}

fn read_verdict(reply: &str) -> Option<Verdict> {
    let reply = reply.trim();
    if reply.eq_ignore_ascii_case("no") {
        return Some(Verdict::NoMatch);
    }
    if !reply.is_empty() && reply.chars().all(|c| c.is_ascii_digit()) {
        return reply.parse().ok().map(Verdict::Match);
    }
    None
}

#[cfg(test)]
mod tests {
    use lexifree_llm::ScriptedCompleter;

    use super::*;

    fn refs(defs: &[&str]) -> Vec<String> {
        defs.iter().map(|d| d.to_string()).collect()
    }

    #[test]
    fn test_only_no_or_digits_are_verdicts() {
        assert_eq!(read_verdict("No"), Some(Verdict::NoMatch));
        assert_eq!(read_verdict(" 0\n"), Some(Verdict::Match(0)));
        assert_eq!(read_verdict("12"), Some(Verdict::Match(12)));
        assert_eq!(read_verdict("1."), None);
        assert_eq!(read_verdict("no match"), None);
        assert_eq!(read_verdict(""), None);
    }

    #[tokio::test]
    async fn test_references_are_numbered_from_zero() {
        let completer = Arc::new(ScriptedCompleter::new().on("official definitions", "1"));
        let matcher = DefinitionMatcher::new(completer.clone(), RateTable::default());

        let verdict = matcher
            .is_defn_good("a feline", &refs(&["a dog", "a small cat"]))
            .await;

        assert_eq!(verdict, Verdict::Match(1));
        let prompt = &completer.prompts()[0];
        assert!(prompt.contains("0. a dog\n1. a small cat"));
        assert!(prompt.contains("\"a feline\""));
        assert!(!prompt.contains("Be sure to only answer"));
    }

    #[tokio::test]
    async fn test_second_try_adds_strict_suffix() {
        let completer = Arc::new(
            ScriptedCompleter::new().on_sequence("official definitions", &["Yes, number 0.", "0"]),
        );
        let matcher = DefinitionMatcher::new(completer.clone(), RateTable::default());

        let verdict = matcher.is_defn_good("a feline", &refs(&["a cat"])).await;

        assert_eq!(verdict, Verdict::Match(0));
        assert_eq!(completer.calls_matching("Be sure to only answer"), 1);
        assert!(matcher.spent() > 0.0);
    }

    #[tokio::test]
    async fn test_two_bad_replies_are_irregular() {
        let completer = Arc::new(
            ScriptedCompleter::new().on_sequence("official definitions", &["maybe", "perhaps"]),
        );
        let matcher = DefinitionMatcher::new(completer.clone(), RateTable::default());

        let verdict = matcher.is_defn_good("a feline", &refs(&["a cat"])).await;

        assert_eq!(verdict, Verdict::Irregular("perhaps".to_string()));
        assert_eq!(completer.prompts().len(), 2);
    }
}
