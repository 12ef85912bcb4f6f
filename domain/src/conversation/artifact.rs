//! Code artifacts embedded in message content
//!
//! Participants post code inside Markdown fences:
//!
//! ````text
//! ```python
//! # filename: bank_account.py
//! class BankAccount: ...
//! ```
//! ````
//!
//! Only languages the local executor can run are extracted. A fence without a
//! language tag is treated as Python.

use serde::{Deserialize, Serialize};

/// Languages a code artifact can be executed with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactLanguage {
    Python,
    Shell,
}

impl ArtifactLanguage {
    /// Map a fence info string to a runnable language
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_lowercase().as_str() {
            "" | "python" | "py" | "python3" => Some(Self::Python),
            "sh" | "bash" | "shell" | "console" => Some(Self::Shell),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Python => "py",
            Self::Shell => "sh",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Python => "python",
            Self::Shell => "shell",
        }
    }
}

/// A runnable block of code found in a turn (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeArtifact {
    language: ArtifactLanguage,
    source: String,
    file_name: Option<String>,
}

impl CodeArtifact {
    pub fn new(language: ArtifactLanguage, source: impl Into<String>) -> Self {
        let source = source.into();
        let file_name = filename_hint(&source);
        Self {
            language,
            source,
            file_name,
        }
    }

    pub fn language(&self) -> ArtifactLanguage {
        self.language
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// File name requested by a `# filename: <name>` first line
    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }
}

/// Extract every runnable fenced block from `content`, in order
///
/// Blocks with an unsupported language tag, empty blocks and an unterminated
/// trailing fence are skipped.
pub fn extract_artifacts(content: &str) -> Vec<CodeArtifact> {
    let mut artifacts = Vec::new();
    let mut open: Option<(Option<ArtifactLanguage>, Vec<&str>)> = None;

    for line in content.lines() {
        let trimmed = line.trim_start();
        match open.take() {
            None => {
                if let Some(tag) = trimmed.strip_prefix("```") {
                    open = Some((ArtifactLanguage::from_tag(tag), Vec::new()));
                }
            }
            Some((language, mut body)) => {
                if trimmed.trim_end() == "```" {
                    let source = body.join("\n");
                    if let Some(language) = language
                        && !source.trim().is_empty()
                    {
                        artifacts.push(CodeArtifact::new(language, source));
                    }
                } else {
                    body.push(line);
                    open = Some((language, body));
                }
            }
        }
    }

    artifacts
}

/// Read a `# filename: x.py` hint from the first line of a block
fn filename_hint(source: &str) -> Option<String> {
    let first = source.lines().next()?.trim();
    let rest = first.strip_prefix('#')?.trim_start();
    let name = rest.strip_prefix("filename:")?.trim();
    let valid = !name.is_empty()
        && !name.contains("..")
        && !name.starts_with('/')
        && !name.contains('\\')
        && !name.contains(char::is_whitespace);
    valid.then(|| name.to_string())
}
