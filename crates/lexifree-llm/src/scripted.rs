//! Offline completer that answers from a script of prompt fragments.

use std::sync::Mutex;

use async_trait::async_trait;
use lexifree_types::Usage;

use crate::{CompleteError, Completer, Completion, ProviderMetadata};

struct Rule {
    needle: String,
    replies: Vec<Result<String, String>>,
    served: usize,
}

/// Replies to any prompt containing a registered fragment. The first
/// matching rule wins; a rule with several replies hands them out in order
/// and then repeats the last one.
pub struct ScriptedCompleter {
    rules: Mutex<Vec<Rule>>,
    prompts: Mutex<Vec<String>>,
    usage: Usage,
}

impl ScriptedCompleter {
    pub fn new() -> Self {
        Self {
            rules: Mutex::new(Vec::new()),
            prompts: Mutex::new(Vec::new()),
            usage: Usage {
                prompt_tokens: 100,
                completion_tokens: 10,
            },
        }
    }

    pub fn on(self, needle: &str, reply: &str) -> Self {
        self.push(needle, vec![Ok(reply.to_string())])
    }

    pub fn on_sequence(self, needle: &str, replies: &[&str]) -> Self {
        self.push(needle, replies.iter().map(|r| Ok(r.to_string())).collect())
    }

    pub fn failing_on(self, needle: &str, message: &str) -> Self {
        self.push(needle, vec![Err(message.to_string())])
    }

    pub fn with_usage(mut self, usage: Usage) -> Self {
        self.usage = usage;
        self
    }

    /// Every prompt received so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .map(|p| p.clone())
            .unwrap_or_default()
    }

    pub fn calls_matching(&self, needle: &str) -> usize {
        self.prompts().iter().filter(|p| p.contains(needle)).count()
    }

    fn push(self, needle: &str, replies: Vec<Result<String, String>>) -> Self {
        if let Ok(mut rules) = self.rules.lock() {
            rules.push(Rule {
                needle: needle.to_string(),
                replies,
                served: 0,
            });
        }
        self
    }
}

impl Default for ScriptedCompleter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Completer for ScriptedCompleter {
    async fn complete(&self, prompt: &str, _structured: bool) -> Result<Completion, CompleteError> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }

        let reply = {
            let mut rules = self
                .rules
                .lock()
                .map_err(|_| CompleteError::ApiError("script poisoned".to_string()))?;

            let rule = rules
                .iter_mut()
                .find(|r| prompt.contains(&r.needle))
                .ok_or_else(|| CompleteError::ApiError("no scripted reply".to_string()))?;

            let idx = rule.served.min(rule.replies.len().saturating_sub(1));
            rule.served += 1;
            rule.replies
                .get(idx)
                .cloned()
                .unwrap_or_else(|| Err("empty script".to_string()))
        };

        match reply {
            Ok(text) => Ok(Completion {
                text,
                usage: self.usage,
            }),
            Err(message) => Err(CompleteError::ApiError(message)),
        }
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "scripted".to_string(),
            model: "scripted".to_string(),
            requires_api_key: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sequence_repeats_last_reply() {
        let completer = ScriptedCompleter::new().on_sequence("match", &["maybe", "2"]);

        let first = completer.complete("does it match?", false).await.unwrap();
        let second = completer.complete("does it match?", false).await.unwrap();
        let third = completer.complete("does it match?", false).await.unwrap();

        assert_eq!(first.text, "maybe");
        assert_eq!(second.text, "2");
        assert_eq!(third.text, "2");
        assert_eq!(completer.calls_matching("match"), 3);
    }

    #[tokio::test]
    async fn test_unscripted_prompt_is_an_error() {
        let completer = ScriptedCompleter::new().failing_on("boom", "down");
        assert!(completer.complete("boom", false).await.is_err());
        assert!(completer.complete("other", false).await.is_err());
    }
}
