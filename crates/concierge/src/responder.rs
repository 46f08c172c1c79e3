//! Grounded reply generation.

use std::sync::Arc;

use concierge_core::{
    render_history, CompletionBackend, ConversationStore, ConversationTurn, GroundingContext,
    PromptTemplate, ReplyKind, ResortProfile, RetryOutcome, RetryPolicy, Sleeper, TokioSleeper,
};
use tracing::{debug, info, warn};

use crate::replies::FALLBACK_REPLY;

/// A reply produced by the generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    /// Text to send.
    pub text: String,
    /// `Ai` for a model reply, `Fallback` otherwise.
    pub kind: ReplyKind,
    /// Backend calls made.
    pub attempts: u32,
}

impl Generated {
    /// Whether the fixed fallback was used.
    pub fn is_fallback(&self) -> bool {
        self.kind == ReplyKind::Fallback
    }
}

/// Builds grounded prompts and calls the backend under the retry policy.
///
/// Never fails: an exhausted or non-retryable backend yields the fixed
/// fallback sentence.
pub struct ResponseGenerator {
    backend: Arc<dyn CompletionBackend>,
    context: GroundingContext,
    template: PromptTemplate,
    store: Arc<ConversationStore>,
    policy: RetryPolicy,
    sleeper: Arc<dyn Sleeper>,
}

impl ResponseGenerator {
    /// Create a generator with the default template, policy and tokio sleeper.
    pub fn new(
        backend: Arc<dyn CompletionBackend>,
        context: GroundingContext,
        store: Arc<ConversationStore>,
    ) -> Self {
        let template = PromptTemplate::for_resort(&ResortProfile::default());
        info!(
            "ResponseGenerator using {} (prompt fingerprint {})",
            backend.name(),
            template.fingerprint()
        );
        Self {
            backend,
            context,
            template,
            store,
            policy: RetryPolicy::default(),
            sleeper: Arc::new(TokioSleeper),
        }
    }

    /// Use a different prompt template.
    pub fn with_template(mut self, template: PromptTemplate) -> Self {
        info!("Prompt template fingerprint: {}", template.fingerprint());
        self.template = template;
        self
    }

    /// Use a different retry policy.
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Use a different sleeper for advisory delays.
    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    /// The conversation store this generator writes to.
    pub fn store(&self) -> &Arc<ConversationStore> {
        &self.store
    }

    /// Generate a reply for `sender`.
    ///
    /// The user turn is recorded before the backend is called, and the reply
    /// (model text or fallback) is recorded as the assistant turn.
    pub async fn generate(&self, sender: &str, user_message: &str) -> Generated {
        let context = self.context.fetch().await;

        self.store
            .append(sender, ConversationTurn::user(user_message))
            .await;
        let history = render_history(&self.store.get(sender).await);

        let prompt = self.template.assemble(&context, &history, user_message);
        debug!("Assembled prompt for {} ({} chars)", sender, prompt.chars().count());

        let generated = match self
            .policy
            .run(self.backend.as_ref(), &prompt, self.sleeper.as_ref())
            .await
        {
            RetryOutcome::Succeeded { text, attempts } => Generated {
                text,
                kind: ReplyKind::Ai,
                attempts,
            },
            RetryOutcome::Exhausted {
                attempts,
                last_error,
            } => {
                warn!(
                    "No reply for {} after {} attempt(s): {}",
                    sender, attempts, last_error
                );
                Generated {
                    text: FALLBACK_REPLY.to_string(),
                    kind: ReplyKind::Fallback,
                    attempts,
                }
            }
        };

        self.store
            .append(sender, ConversationTurn::assistant(&generated.text))
            .await;
        generated
    }
}
