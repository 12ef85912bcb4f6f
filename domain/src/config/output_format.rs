//! Output format value object

use serde::{Deserialize, Serialize};

/// How a finished conversation is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Every turn of the transcript (default)
    #[default]
    Full,
    /// Status line plus the last message of each participant
    Summary,
    /// JSON document
    Json,
}
