//! The conversation loop.
//!
//! Owns the linear, append-only transcript, injects the oracle's interface
//! document and protocol instructions into the system preamble, completes
//! turns through an opaque [`ChatModel`], and runs the bounded capability
//! negotiation that lets one human turn trigger at most
//! [`DEFAULT_MAX_INTERACTIONS`] sequential capability calls before control
//! returns to the human.

use std::io::{self, BufRead, Write};

use thiserror::Error;

use crate::llm::{ChatModel, Message, ModelError};
use crate::oracle::{find_embedded, CallRequest, Oracle, REQUEST_END, REQUEST_START};

/// Maximum capability round-trips within one human turn.
pub const DEFAULT_MAX_INTERACTIONS: usize = 3;

/// Errors that abort a conversation turn.
///
/// Dispatch failures are deliberately not represented here: they are rendered
/// into the transcript as System entries so the model can self-correct.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("terminal i/o failed: {0}")]
    Io(#[from] io::Error),
}

/// A single linear conversation over an oracle and an opaque model.
pub struct Chat<M> {
    model: M,
    oracle: Oracle,
    transcript: Vec<Message>,
    max_interactions: usize,
}

impl<M: ChatModel> Chat<M> {
    /// Create a chat seeded with the protocol preamble and a greeting primer.
    pub fn new(model: M, oracle: Oracle) -> Self {
        let mut chat = Self {
            model,
            oracle,
            transcript: Vec::new(),
            max_interactions: DEFAULT_MAX_INTERACTIONS,
        };
        let instructions = chat.instructions();
        chat.transcript.push(Message::system(instructions));
        chat.transcript.push(Message::user("Hello, who are you?"));
        chat.transcript.push(Message::assistant(
            "Hello, I'm an AI assistant here to help you. I can complete tasks \
             such as doing math or posting public updates. How can I help you today?",
        ));
        chat
    }

    /// Override the negotiation depth bound.
    pub fn with_max_interactions(mut self, max_interactions: usize) -> Self {
        self.max_interactions = max_interactions;
        self
    }

    /// The transcript so far.
    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    /// Run the blocking terminal loop until stdin closes.
    pub async fn run(&mut self) -> Result<(), ChatError> {
        let stdin = io::stdin();
        loop {
            print!("Human: ");
            io::stdout().flush()?;

            let mut line = String::new();
            if stdin.lock().read_line(&mut line)? == 0 {
                return Ok(());
            }

            let reply = self.turn(line.trim_end()).await?;
            println!("AI: {}", reply);
        }
    }

    /// Run one human turn: append the input, complete, negotiate, and return
    /// the final Assistant content.
    pub async fn turn(&mut self, input: &str) -> Result<String, ChatError> {
        self.transcript.push(Message::user(input));
        self.complete_once().await?;
        self.negotiate().await?;
        Ok(self.last_content().to_string())
    }

    /// Capability negotiation: resolve embedded requests in the latest entry,
    /// at most `max_interactions` times.
    ///
    /// Stops unconditionally once the bound is exhausted, even if the latest
    /// entry still embeds a request; the partial Assistant content is
    /// surfaced as-is. This is the sole backpressure against a model that
    /// keeps requesting forever.
    async fn negotiate(&mut self) -> Result<(), ChatError> {
        let mut interaction = 1;
        while interaction <= self.max_interactions {
            let payload = match find_embedded(self.last_content()) {
                Some(payload) => payload.to_string(),
                None => return Ok(()),
            };

            let request = match CallRequest::from_json(&payload) {
                Ok(request) => request,
                Err(err) => {
                    // Policy: a malformed payload is treated as if no request
                    // were present. Logged, never fatal to the turn.
                    tracing::warn!(%err, "ignoring malformed capability request");
                    return Ok(());
                }
            };

            let feedback = match self.oracle.dispatch(&request) {
                Ok(result) => result,
                Err(err) => {
                    tracing::warn!(%err, "capability dispatch failed");
                    format!("The request could not be completed: {}", err)
                }
            };

            self.transcript.push(Message::system(feedback));
            self.complete_once().await?;
            interaction += 1;
        }
        Ok(())
    }

    async fn complete_once(&mut self) -> Result<(), ChatError> {
        let reply = self.model.complete(&self.transcript).await?;
        self.transcript.push(reply);
        Ok(())
    }

    fn last_content(&self) -> &str {
        self.transcript
            .last()
            .map(|m| m.content.as_str())
            .unwrap_or_default()
    }

    /// The fixed protocol instructions plus the oracle's interface document,
    /// injected verbatim as the first System entry.
    fn instructions(&self) -> String {
        let template = CallRequest::new(
            "<module_name>",
            "<api_name>",
            vec![
                "<list of string values to provide to the capability, in the order they were declared in the specification>"
                    .to_string(),
            ],
        )
        .to_json();

        format!(
            "You are a virtual assistant that helps users with their questions by relying on \
             capabilities that can be invoked via the System. When the user asks a question, \
             you should determine whether you need to invoke a capability to properly answer \
             it. If so, you will gather the capability parameters by interacting with the \
             user, and then ask the System to run the request for you. When you are ready to \
             ask for a request, you should specify it using the following syntax:\n\n\
             {start}{template}{end}\n\n\
             Replace the placeholders with the necessary values the user provides during the \
             interaction, and do not use placeholders. The System will run the capability for \
             you, and it will then provide the result which you may use to formulate your \
             answer. You should not respond with code, but rather provide an answer directly.\n\n\
             None of the capabilities provided need any credentials. You should use them \
             whenever possible, and DO NOT ask the user for confirmation to use them.\n\n\
             The following capabilities are available to you:\n\n{interface}",
            start = REQUEST_START,
            template = template,
            end = REQUEST_END,
            interface = self.oracle.interface_document(),
        )
    }
}
