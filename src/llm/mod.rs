//! The model boundary: transcript entries and the opaque completion call.
//!
//! The conversation loop treats the language model as a single function from
//! a transcript to its next entry. [`OpenAiChatModel`] is the production
//! implementation; tests substitute scripted stubs.

pub mod openai;

pub use openai::OpenAiChatModel;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Transcript entries
// ---------------------------------------------------------------------------

/// Speaker of a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One `{role, content}` entry in the conversation transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

// ---------------------------------------------------------------------------
// Completion boundary
// ---------------------------------------------------------------------------

/// Errors from the completion boundary.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Transport-level failure, including timeouts and non-success statuses.
    /// Retryable from the caller's point of view.
    #[error("model transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The endpoint answered but not in the expected shape.
    #[error("malformed model response: {0}")]
    MalformedResponse(String),
}

/// An opaque conversation-completion function.
///
/// Implementations receive the full transcript and return the next entry,
/// normally with [`Role::Assistant`].
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn complete(&self, transcript: &[Message]) -> Result<Message, ModelError>;
}
