//! Per-topic conversation engine
//!
//! A `Conversation` owns one transcript: a leading system turn followed by
//! alternating user/assistant turns. Every remote call goes through
//! [`Conversation::exchange`], which is also the only place the transcript
//! grows and the only place `connected` changes.
//!
//! A failed exchange leaves its user turn in the transcript with no reply
//! and marks the conversation disconnected. Follow-ups are refused until
//! the topic is reset with a fresh causes request.

mod prompts;

#[cfg(test)]
mod proptests;

pub use prompts::{causes_prompt, FollowUp, SYSTEM_PREAMBLE};

use crate::llm::{LlmError, LlmRequest, LlmService, Turn};
use std::sync::Arc;
use thiserror::Error;

/// Why an exchange produced no reply
#[derive(Debug, Error)]
pub enum ExchangeError {
    #[error("LLM connection is not configured")]
    NotConfigured,
    #[error("conversation is disconnected; request causes again")]
    Disconnected,
    #[error(transparent)]
    Llm(#[from] LlmError),
}

pub struct Conversation {
    topic: String,
    transcript: Vec<Turn>,
    connected: bool,
    service: Option<Arc<dyn LlmService>>,
}

impl Conversation {
    /// Start a conversation about `topic`.
    ///
    /// With `service == None` the conversation is unconfigured: it still
    /// exists and has a transcript, but every exchange fails.
    pub fn new(topic: impl Into<String>, service: Option<Arc<dyn LlmService>>) -> Self {
        Self {
            topic: topic.into(),
            transcript: vec![Turn::system(SYSTEM_PREAMBLE)],
            connected: false,
            service,
        }
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn transcript(&self) -> &[Turn] {
        &self.transcript
    }

    /// Whether the most recent exchange succeeded
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn is_configured(&self) -> bool {
        self.service.is_some()
    }

    /// Ask what causes the topic. Returns the model's answer, or `None`
    /// if the exchange failed.
    pub async fn request_causes(&mut self) -> Option<String> {
        let question = causes_prompt(&self.topic);
        self.exchange(question).await.ok()
    }

    pub async fn elaborate(&mut self) -> Option<String> {
        self.follow_up(FollowUp::Elaborate).await.ok()
    }

    pub async fn explain_simpler(&mut self) -> Option<String> {
        self.follow_up(FollowUp::ExplainSimpler).await.ok()
    }

    pub async fn challenge(&mut self) -> Option<String> {
        self.follow_up(FollowUp::Challenge).await.ok()
    }

    pub async fn inverse_form(&mut self) -> Option<String> {
        self.follow_up(FollowUp::InverseForm).await.ok()
    }

    /// Ask a follow-up question. Refused without contacting the remote
    /// endpoint unless the previous exchange succeeded.
    pub async fn follow_up(&mut self, kind: FollowUp) -> Result<String, ExchangeError> {
        if !self.connected {
            tracing::debug!(topic = %self.topic, follow_up = kind.name(), "Follow-up refused: not connected");
            return Err(ExchangeError::Disconnected);
        }
        let question = kind.prompt(&self.topic);
        self.exchange(question).await
    }

    /// One round trip: append the user turn, send the whole transcript,
    /// append the reply.
    async fn exchange(&mut self, text: String) -> Result<String, ExchangeError> {
        let Some(service) = self.service.clone() else {
            self.connected = false;
            tracing::error!(topic = %self.topic, "No LLM configuration; exchange not attempted");
            return Err(ExchangeError::NotConfigured);
        };

        self.transcript.push(Turn::user(text));
        let request = LlmRequest {
            messages: self.transcript.clone(),
        };

        match service.complete(&request).await {
            Ok(response) => {
                self.transcript.push(Turn::assistant(response.text.clone()));
                self.connected = true;
                Ok(response.text)
            }
            Err(e) => {
                // The user turn stays; nothing answers it.
                self.connected = false;
                tracing::error!(
                    topic = %self.topic,
                    turns = self.transcript.len(),
                    error = %e,
                    "Failed to connect to LLM"
                );
                Err(e.into())
            }
        }
    }
}
