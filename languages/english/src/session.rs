use lexifree_core::{CostAccumulator, RateTable};
use lexifree_llm::Completer;

/// Prefix of the text that stands in for a failed completion.
pub const LLM_ERROR_PREFIX: &str = "An error occurred: ";

/// Completion calls made on behalf of one log record.
///
/// Failures never escape: they come back as sentinel text, which the
/// structured parsers downstream reject.
pub struct Session<'a> {
    completer: &'a dyn Completer,
    cost: CostAccumulator,
}

impl<'a> Session<'a> {
    pub fn new(completer: &'a dyn Completer, rates: RateTable) -> Self {
        Self {
            completer,
            cost: CostAccumulator::new(rates),
        }
    }

    pub async fn ask(&mut self, prompt: &str, structured: bool) -> String {
        match self.completer.complete(prompt, structured).await {
            Ok(completion) => {
                self.cost.charge(completion.usage);
                completion.text
            }
            Err(e) => {
                tracing::warn!("completion failed: {}", e);
                format!("{LLM_ERROR_PREFIX}{e}")
            }
        }
    }

    /// Dollars spent since the last take.
    pub fn take_cost(&mut self) -> f64 {
        self.cost.take()
    }

    pub fn calls(&self) -> u32 {
        self.cost.calls()
    }
}

pub fn is_error_sentinel(reply: &str) -> bool {
    reply.starts_with(LLM_ERROR_PREFIX)
}
