//! AI chat passthrough: forwards a prompt to the backend's route planner.

#[cfg(test)]
#[path = "ai_test.rs"]
mod ai_test;

use reqwest::Method;

use crate::error::ApiError;
use crate::net::api::ApiClient;
use crate::net::types::{ChatReply, ChatRequest};
use crate::session::Session;

pub const CHAT_PATH: &str = "/api/ai/chat";
pub const CHAT_FAILED_MESSAGE: &str = "Failed to reach the AI assistant.";
pub const EMPTY_MESSAGE: &str = "Message is empty.";
pub const MESSAGE_TOO_LONG: &str = "Message is too long.";

/// Longest message the backend accepts, in characters.
pub const MAX_MESSAGE_CHARS: usize = 4000;

fn validate_message(message: &str) -> Result<(), ApiError> {
    if message.trim().is_empty() {
        return Err(ApiError::validation(EMPTY_MESSAGE));
    }
    if message.chars().count() > MAX_MESSAGE_CHARS {
        return Err(ApiError::validation(MESSAGE_TOO_LONG));
    }
    Ok(())
}

/// Send `message` to the assistant and return its reply.
///
/// The message is forwarded as typed; only blank and oversized input is
/// rejected locally.
///
/// # Errors
///
/// [`ApiError::Validation`] for blank or oversized input (nothing is sent),
/// [`ApiError::Unauthenticated`] without a token, otherwise the shared
/// request errors.
pub async fn chat(client: &ApiClient, session: &Session, message: &str) -> Result<ChatReply, ApiError> {
    validate_message(message)?;
    let request = client
        .authed(session, Method::POST, CHAT_PATH)?
        .json(&ChatRequest { message });
    client.send_json(request, CHAT_FAILED_MESSAGE).await
}
