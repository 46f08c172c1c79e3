//! Scripted backend - replays a fixed sequence of results.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use concierge_core::{async_trait, CompletionBackend, CompletionError};

/// One scripted backend response.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Succeed with this text.
    Reply(String),
    /// Report a rate limit advising this delay.
    RateLimited(Duration),
    /// Fail with a non-retryable error.
    Fail(String),
}

impl Step {
    fn into_result(self) -> Result<String, CompletionError> {
        match self {
            Step::Reply(text) => Ok(text),
            Step::RateLimited(retry_after) => Err(CompletionError::RateLimited { retry_after }),
            Step::Fail(message) => Err(CompletionError::Other(message)),
        }
    }
}

/// A backend that answers from a script and counts its calls.
///
/// Once the script runs out, the `then` step repeats forever (a generic
/// failure unless set).
#[derive(Debug)]
pub struct ScriptedBackend {
    script: Mutex<VecDeque<Step>>,
    then: Step,
    calls: AtomicU32,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedBackend {
    /// Create a backend from an ordered script.
    pub fn new(script: Vec<Step>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            then: Step::Fail("script exhausted".to_string()),
            calls: AtomicU32::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// A backend that always gives the same answer.
    pub fn always(step: Step) -> Self {
        Self::new(Vec::new()).then(step)
    }

    /// Set the step repeated after the script runs out.
    pub fn then(mut self, step: Step) -> Self {
        self.then = step;
        self
    }

    /// Number of `complete` calls made so far.
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    /// Every prompt received, in order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .map(|prompts| prompts.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl CompletionBackend for ScriptedBackend {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }

        let next = self
            .script
            .lock()
            .ok()
            .and_then(|mut script| script.pop_front());
        next.unwrap_or_else(|| self.then.clone()).into_result()
    }

    fn name(&self) -> &str {
        "ScriptedBackend"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_script_then_repeat() {
        let backend = ScriptedBackend::new(vec![
            Step::RateLimited(Duration::from_secs(2)),
            Step::Reply("ok".to_string()),
        ])
        .then(Step::Fail("down".to_string()));

        assert!(backend.complete("a").await.unwrap_err().is_rate_limited());
        assert_eq!(backend.complete("b").await.unwrap(), "ok");
        assert!(!backend.complete("c").await.unwrap_err().is_rate_limited());
        assert!(!backend.complete("d").await.unwrap_err().is_rate_limited());

        assert_eq!(backend.calls(), 4);
        assert_eq!(backend.prompts(), vec!["a", "b", "c", "d"]);
    }

    #[tokio::test]
    async fn test_always() {
        let backend = ScriptedBackend::always(Step::Reply("same".to_string()));
        for _ in 0..3 {
            assert_eq!(backend.complete("x").await.unwrap(), "same");
        }
        assert_eq!(backend.calls(), 3);
    }
}
