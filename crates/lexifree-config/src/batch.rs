use serde::{Deserialize, Serialize};

use crate::env_or;

fn default_workers() -> usize {
    200
}

fn default_channel_capacity() -> usize {
    256
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct BatchConfig {
    /// Words built at the same time
    #[serde(default = "default_workers")]
    pub workers: usize,
    /// Records buffered ahead of the log writer
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            channel_capacity: default_channel_capacity(),
        }
    }
}

impl BatchConfig {
    pub fn new() -> Self {
        Self {
            workers: env_or("LEXIFREE_BUILD_WORKERS", default_workers()).max(1),
            channel_capacity: default_channel_capacity(),
        }
    }
}
