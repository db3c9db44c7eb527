use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Configuration values offered with configurable remote commands.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct CommandsConfig {
    /// Preferred skip intervals, in seconds.
    #[serde(default = "default_skip_intervals")]
    pub skip_intervals: Vec<f32>,

    /// Playback rates offered for rate changes.
    #[serde(default = "default_playback_rates")]
    pub playback_rates: Vec<f32>,
}

fn default_skip_intervals() -> Vec<f32> {
    vec![15.0]
}

fn default_playback_rates() -> Vec<f32> {
    vec![0.5, 1.0, 1.5, 2.0]
}

impl Default for CommandsConfig {
    fn default() -> Self {
        Self {
            skip_intervals: default_skip_intervals(),
            playback_rates: default_playback_rates(),
        }
    }
}
