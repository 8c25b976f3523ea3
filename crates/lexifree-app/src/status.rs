use lexifree_types::{Resolution, WordEntry};

/// Progress of a batch run, owned by the log writer.
#[derive(Clone, Debug, Default)]
pub struct BatchStatus {
    pub total: usize,
    pub done: usize,
    pub resolved: usize,
    pub failed: usize,
    pub cycles: usize,
    pub records: usize,
    pub cost: f64,
    pub last_word: String,
}

impl BatchStatus {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Default::default()
        }
    }

    pub fn record_written(&mut self, record: &WordEntry) {
        self.records += 1;
        self.cost += record.cost;
    }

    pub fn word_done(&mut self, word: &str, resolution: &Resolution) {
        self.done += 1;
        match resolution {
            Resolution::Resolved(_) => self.resolved += 1,
            Resolution::Failed { .. } => self.failed += 1,
            Resolution::Cycle(_) => self.cycles += 1,
        }
        self.last_word = word.to_string();
    }
}
