use lexifree_types::Usage;

/// USD price per prompt and completion token.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateTable {
    pub prompt_per_token: f64,
    pub completion_per_token: f64,
}

impl RateTable {
    pub fn per_million(prompt: f64, completion: f64) -> Self {
        Self {
            prompt_per_token: prompt / 1e6,
            completion_per_token: completion / 1e6,
        }
    }

    pub fn cost(&self, usage: Usage) -> f64 {
        usage.prompt_tokens as f64 * self.prompt_per_token
            + usage.completion_tokens as f64 * self.completion_per_token
    }
}

impl Default for RateTable {
    fn default() -> Self {
        Self::per_million(2.5, 10.0)
    }
}

/// Running dollar total for the calls behind one log record.
#[derive(Debug, Clone)]
pub struct CostAccumulator {
    rates: RateTable,
    total: f64,
    calls: u32,
}

impl CostAccumulator {
    pub fn new(rates: RateTable) -> Self {
        Self {
            rates,
            total: 0.0,
            calls: 0,
        }
    }

    pub fn charge(&mut self, usage: Usage) {
        self.total += self.rates.cost(usage);
        self.calls += 1;
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn calls(&self) -> u32 {
        self.calls
    }

    /// Hand back the total and restart from zero.
    pub fn take(&mut self) -> f64 {
        self.calls = 0;
        std::mem::take(&mut self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cost_uses_both_rates() {
        let rates = RateTable::per_million(2.5, 10.0);
        let cost = rates.cost(Usage {
            prompt_tokens: 1_000_000,
            completion_tokens: 100_000,
        });
        assert!((cost - 3.5).abs() < 1e-9);
    }

    #[test]
    fn test_accumulator_take_resets() {
        let mut acc = CostAccumulator::new(RateTable::per_million(1.0, 1.0));
        acc.charge(Usage {
            prompt_tokens: 500_000,
            completion_tokens: 500_000,
        });
        acc.charge(Usage {
            prompt_tokens: 1_000_000,
            completion_tokens: 0,
        });
        assert_eq!(acc.calls(), 2);
        assert!((acc.take() - 2.0).abs() < 1e-9);
        assert_eq!(acc.total(), 0.0);
        assert_eq!(acc.calls(), 0);
    }
}
