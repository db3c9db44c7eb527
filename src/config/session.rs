use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::services::now_playing::{CategoryOption, CategoryOptions, SessionCategory, SessionMode};

/// Audio session configuration applied by `initialize_audio_session`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq)]
pub struct SessionConfig {
    /// Session category.
    #[serde(default)]
    pub category: SessionCategory,

    /// Session mode.
    #[serde(default)]
    pub mode: SessionMode,

    /// Category options, combined into one set.
    #[serde(default)]
    pub options: Vec<CategoryOption>,
}

impl SessionConfig {
    /// The configured options as platform flags
    pub fn category_options(&self) -> CategoryOptions {
        self.options.iter().copied().collect()
    }
}
