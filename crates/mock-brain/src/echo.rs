//! Echo backend - answers with the guest's own question.

use concierge_core::{async_trait, CompletionBackend, CompletionError};

const QUESTION_MARKER: &str = "User asked:\n";

/// A backend that echoes the question found in the prompt.
///
/// Useful for exercising the full message flow without a hosted model.
#[derive(Debug, Clone, Default)]
pub struct EchoBackend {
    prefix: Option<String>,
}

impl EchoBackend {
    /// Create a new EchoBackend with no prefix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new EchoBackend with a custom prefix.
    ///
    /// # Example
    ///
    /// ```rust
    /// use mock_brain::EchoBackend;
    ///
    /// let backend = EchoBackend::with_prefix("Echo: ");
    /// // Will respond with "Echo: <question>"
    /// ```
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
        }
    }
}

/// The guest question embedded in an assembled prompt, or the whole prompt.
fn question(prompt: &str) -> &str {
    match prompt.find(QUESTION_MARKER) {
        Some(start) => {
            let rest = &prompt[start + QUESTION_MARKER.len()..];
            rest.split("\n\n").next().unwrap_or(rest)
        }
        None => prompt,
    }
}

#[async_trait]
impl CompletionBackend for EchoBackend {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let question = question(prompt);
        Ok(match &self.prefix {
            Some(prefix) => format!("{}{}", prefix, question),
            None => question.to_string(),
        })
    }

    fn name(&self) -> &str {
        "EchoBackend"
    }
}
