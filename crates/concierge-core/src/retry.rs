//! Bounded retry policy for completion calls.
//!
//! The policy is an explicit state machine: `Attempting(n)` for
//! `n = 0..=max_retries`, ending in `Succeeded` or `Exhausted`. Only
//! rate-limit errors are retried, after sleeping for exactly the delay the
//! backend advised. Any other error ends the machine immediately.

use std::time::Duration;

use tracing::{debug, warn};

use crate::error::CompletionError;
use crate::trait_def::{CompletionBackend, Sleeper};

/// Retries allowed after the initial attempt.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// A state of the retry machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryState {
    /// About to make attempt `n` (0 is the initial call).
    Attempting(u32),
    /// A call succeeded.
    Succeeded,
    /// No more attempts will be made.
    Exhausted,
}

/// How a retried call ended.
#[derive(Debug)]
pub enum RetryOutcome {
    /// The backend produced text.
    Succeeded {
        /// Generated text.
        text: String,
        /// Total backend calls made.
        attempts: u32,
    },
    /// The machine gave up.
    Exhausted {
        /// Total backend calls made.
        attempts: u32,
        /// The error from the last call.
        last_error: CompletionError,
    },
}

impl RetryOutcome {
    /// Total backend calls made.
    pub fn attempts(&self) -> u32 {
        match self {
            RetryOutcome::Succeeded { attempts, .. } | RetryOutcome::Exhausted { attempts, .. } => {
                *attempts
            }
        }
    }
}

/// The bounded retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_retries: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RETRIES)
    }
}

impl RetryPolicy {
    /// Create a policy allowing `max_retries` retries after the first call.
    pub fn new(max_retries: u32) -> Self {
        Self { max_retries }
    }

    /// Retries allowed after the first call.
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Compute the next state after a call made in `Attempting(attempt)`.
    ///
    /// Returns the advisory delay to sleep before entering the next state,
    /// if any.
    pub fn transition(
        &self,
        attempt: u32,
        result: &Result<String, CompletionError>,
    ) -> (RetryState, Option<Duration>) {
        match result {
            Ok(_) => (RetryState::Succeeded, None),
            Err(CompletionError::RateLimited { retry_after }) => {
                let next = if attempt < self.max_retries {
                    RetryState::Attempting(attempt + 1)
                } else {
                    RetryState::Exhausted
                };
                (next, Some(*retry_after))
            }
            Err(CompletionError::Other(_)) => (RetryState::Exhausted, None),
        }
    }

    /// Drive `backend` through the state machine.
    pub async fn run(
        &self,
        backend: &dyn CompletionBackend,
        prompt: &str,
        sleeper: &dyn Sleeper,
    ) -> RetryOutcome {
        let mut attempt = 0;

        loop {
            debug!("{} attempt {}", backend.name(), attempt + 1);
            let result = backend.complete(prompt).await;
            let (next, delay) = self.transition(attempt, &result);

            if let Some(delay) = delay {
                warn!(
                    "{} rate limited on attempt {}, waiting {:?}",
                    backend.name(),
                    attempt + 1,
                    delay
                );
                sleeper.sleep(delay).await;
            }

            match next {
                RetryState::Attempting(n) => attempt = n,
                RetryState::Succeeded | RetryState::Exhausted => {
                    return match result {
                        Ok(text) => RetryOutcome::Succeeded {
                            text,
                            attempts: attempt + 1,
                        },
                        Err(last_error) => RetryOutcome::Exhausted {
                            attempts: attempt + 1,
                            last_error,
                        },
                    };
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transition_success() {
        let policy = RetryPolicy::default();
        let (next, delay) = policy.transition(0, &Ok("hi".to_string()));
        assert_eq!(next, RetryState::Succeeded);
        assert!(delay.is_none());
    }

    #[test]
    fn test_transition_rate_limited_advances_until_bound() {
        let policy = RetryPolicy::default();
        let limited = Err(CompletionError::RateLimited {
            retry_after: Duration::from_secs(7),
        });

        for n in 0..3 {
            let (next, delay) = policy.transition(n, &limited);
            assert_eq!(next, RetryState::Attempting(n + 1));
            assert_eq!(delay, Some(Duration::from_secs(7)));
        }

        let (next, delay) = policy.transition(3, &limited);
        assert_eq!(next, RetryState::Exhausted);
        assert_eq!(delay, Some(Duration::from_secs(7)));
    }

    #[test]
    fn test_transition_other_error_is_terminal() {
        let policy = RetryPolicy::default();
        let (next, delay) =
            policy.transition(0, &Err(CompletionError::Other("bad request".to_string())));
        assert_eq!(next, RetryState::Exhausted);
        assert!(delay.is_none());
    }

    #[test]
    fn test_zero_retries() {
        let policy = RetryPolicy::new(0);
        let limited = Err(CompletionError::RateLimited {
            retry_after: Duration::from_secs(1),
        });
        assert_eq!(policy.transition(0, &limited).0, RetryState::Exhausted);
    }
}
