//! Chat Use Case

use std::sync::Arc;

use platform::client::ClientKey;
use resilience::{GateRequest, Served};
use serde::Serialize;
use serde_json::Value;

use super::config::AdvisorConfig;
use super::{AdvisorGate, generate_text};
use crate::domain::models::ChatTurn;
use crate::domain::prompts;
use crate::domain::upstream::TextGenerator;
use crate::error::{AdvisorError, AdvisorResult};

pub const OPERATION: &str = "chat";

/// Input DTO for chat; also the cache fingerprint payload
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatInput {
    pub history: Vec<ChatTurn>,
    pub new_message: String,
    pub system_instruction: Option<String>,
}

/// Next assistant reply in a conversation. No fallback: a canned reply
/// would read as the assistant's answer.
pub struct ChatUseCase<T>
where
    T: TextGenerator + Send + Sync,
{
    gate: Arc<AdvisorGate>,
    text: Arc<T>,
    config: Arc<AdvisorConfig>,
}

impl<T> ChatUseCase<T>
where
    T: TextGenerator + Send + Sync,
{
    pub fn new(gate: Arc<AdvisorGate>, text: Arc<T>, config: Arc<AdvisorConfig>) -> Self {
        Self { gate, text, config }
    }

    pub async fn execute(&self, client: &ClientKey, input: ChatInput) -> AdvisorResult<Served<Value>> {
        self.validate(&input)?;

        let prompt = prompts::chat(
            &input.history,
            &input.new_message,
            input.system_instruction.as_deref(),
        );
        let request = GateRequest::new(client, OPERATION, &input, self.config.chat_ttl);

        let outcome = self
            .gate
            .run(request, || generate_text(Arc::clone(&self.text), prompt.clone()))
            .await;

        Ok(outcome.into_result()?)
    }

    fn validate(&self, input: &ChatInput) -> AdvisorResult<()> {
        let limits = &self.config.limits;
        if input.new_message.trim().is_empty() {
            return Err(AdvisorError::invalid("newMessage must not be empty"));
        }
        if input.history.len() > limits.max_chat_turns {
            return Err(AdvisorError::too_large(format!(
                "history may hold at most {} turns",
                limits.max_chat_turns
            )));
        }
        let too_long = |chars: usize| chars > limits.max_message_chars;
        if too_long(input.new_message.chars().count())
            || input.history.iter().any(|turn| too_long(turn.char_count()))
            || input
                .system_instruction
                .as_deref()
                .is_some_and(|s| too_long(s.chars().count()))
        {
            return Err(AdvisorError::too_large(format!(
                "messages are limited to {} characters",
                limits.max_message_chars
            )));
        }
        Ok(())
    }
}
