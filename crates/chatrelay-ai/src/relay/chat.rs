use std::sync::Arc;

use tokio::time::{Duration, Instant};

use super::command::{CommandParse, clamp_latency};
use super::config::RelayConfig;
use super::conversation::ConversationStore;
use super::pacing::{Cooldown, CooldownState, POST_COOLDOWN_LATENCY_SECS, pace};
use super::replies;
use crate::error::{AiError, FailureKind};
use crate::llm::{CompletionRequest, LlmClient, Message, Role};

/// Reply handed back to the caller of [`ChatRelay::ask`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub text: String,
    /// `false` when `text` is a canned throttle, command or error message.
    pub success: bool,
}

impl Answer {
    fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            success: true,
        }
    }

    fn failure(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            success: false,
        }
    }

    pub fn into_parts(self) -> (String, bool) {
        (self.text, self.success)
    }
}

/// Session-keyed chat proxy in front of a completion API.
///
/// One relay serves one caller at a time: `ask` takes `&mut self`, and the
/// cooldown and latency settings are shared across all sessions.
pub struct ChatRelay {
    llm: Arc<dyn LlmClient>,
    conversations: ConversationStore,
    cooldown: Cooldown,
    minimal_latency_secs: u64,
    temperature: f32,
}

impl ChatRelay {
    pub fn new(llm: Arc<dyn LlmClient>, config: RelayConfig) -> Self {
        let minimal_latency_secs = clamp_latency(config.minimal_latency_secs);
        tracing::info!(
            provider = llm.provider(),
            model = llm.model(),
            minimal_latency_secs,
            "Chat relay initialized"
        );
        Self {
            llm,
            conversations: ConversationStore::new(config.system_prompt),
            cooldown: Cooldown::default(),
            minimal_latency_secs,
            temperature: config.temperature,
        }
    }

    pub fn minimal_latency_secs(&self) -> u64 {
        self.minimal_latency_secs
    }

    pub fn is_cooling_down(&self) -> bool {
        self.cooldown.check(Instant::now()) == CooldownState::Active
    }

    pub fn history(&self, session_id: &str) -> Option<&[Message]> {
        self.conversations.history(session_id)
    }

    pub fn conversations(&self) -> &ConversationStore {
        &self.conversations
    }

    /// Answer `question` within the conversation identified by `session_id`.
    ///
    /// Never fails: remote errors, throttling and command results all come
    /// back as an [`Answer`] with `success` set accordingly.
    pub async fn ask(&mut self, session_id: &str, question: &str) -> Answer {
        self.conversations.record(session_id, question, Role::User);

        let mut floor_secs = self.minimal_latency_secs;
        match self.cooldown.check(Instant::now()) {
            CooldownState::Active => {
                tracing::debug!(session = session_id, "Cooling down, remote call skipped");
                return Answer::failure(replies::TOO_FREQUENT);
            }
            CooldownState::Expired => {
                self.cooldown.clear();
                floor_secs = floor_secs.max(POST_COOLDOWN_LATENCY_SECS);
                tracing::info!("Cooldown over, resuming remote calls");
            }
            CooldownState::Idle => {}
        }

        match CommandParse::parse(question) {
            CommandParse::NotCommand => {}
            CommandParse::SetDelay(secs) => {
                self.minimal_latency_secs = secs;
                tracing::info!(minimal_latency_secs = secs, "Minimal latency updated");
                return Answer::success(replies::delay_updated(secs));
            }
            CommandParse::Unknown { name, param } => {
                tracing::warn!(command = %name, param = %param, "Unsupported command");
                return Answer::failure(replies::COMMAND_FORMAT_ERROR);
            }
            CommandParse::Malformed => return Answer::failure(replies::COMMAND_FORMAT_ERROR),
        }

        let messages = self
            .conversations
            .history(session_id)
            .map(<[Message]>::to_vec)
            .unwrap_or_default();
        tracing::debug!(
            session = session_id,
            messages = messages.len(),
            "Forwarding question"
        );

        let request = CompletionRequest::new(messages).with_temperature(self.temperature);
        let started = Instant::now();
        let result = self.llm.complete(request).await.and_then(|response| {
            response
                .content
                .ok_or_else(|| AiError::InvalidFormat("completion has no content".to_string()))
        });

        match result {
            Ok(content) => {
                let reply = replies::normalize_reply(&content);
                self.conversations
                    .record(session_id, reply.clone(), Role::Assistant);
                pace(started, Duration::from_secs(floor_secs)).await;
                Answer::success(reply)
            }
            Err(err) => self.translate_failure(&err),
        }
    }

    fn translate_failure(&mut self, err: &AiError) -> Answer {
        let kind = err.kind();
        tracing::warn!(error = %err, kind = ?kind, "Completion failed");

        let text = match kind {
            FailureKind::Authentication => replies::AUTH_FAILED.to_string(),
            FailureKind::Connection => replies::CONNECTION_FAILED.to_string(),
            FailureKind::RateLimited => {
                self.cooldown.trip(Instant::now());
                replies::TOO_FREQUENT.to_string()
            }
            FailureKind::Api => format!(
                "{}{}",
                replies::API_ERROR_PREFIX,
                err.api_message().unwrap_or_default()
            ),
            FailureKind::Other => {
                tracing::error!(error = %err, "Unclassified completion failure");
                replies::UNDER_MAINTENANCE.to_string()
            }
        };
        Answer::failure(text)
    }
}
