// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! HTTP handlers for the portfolio API.
//!
//! Both endpoints run the same linear pipeline: derive the client id, check
//! the endpoint's rate limit, parse the body, validate, respond. The chat
//! endpoint finishes by streaming the canned reply instead of a JSON
//! envelope. Unexpected faults are caught at the handler boundary and
//! mapped to a generic 500 payload; no internal detail reaches the caller.

use crate::config::Config;
use crate::limiter::{RateLimitResult, RateLimiter};
use crate::stream::{word_chunks, CANNED_REPLY, CHUNK_DELAY};
use crate::validator::{ContactValidation, SubmissionValidator};
use axum::{
    body::Body,
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use futures::StreamExt;
use serde::{Deserialize, Deserializer, Serialize};
use std::convert::Infallible;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Shared application state, injected into every handler.
pub struct AppState {
    pub contact_limiter: RateLimiter,
    pub chat_limiter: RateLimiter,
    pub validator: SubmissionValidator,
    pub config: Config,
}

/// Contact form submission body.
#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub honeypot: Option<String>,
}

/// Chat request body.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    pub message: Option<String>,
}

/// Contact endpoint response envelope.
#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl ContactResponse {
    fn sent() -> Self {
        Self {
            success: true,
            message: Some("Message sent successfully".to_string()),
            errors: None,
        }
    }

    fn rejected(message: &str) -> Self {
        Self {
            success: false,
            message: Some(message.to_string()),
            errors: None,
        }
    }

    fn errors(errors: Vec<String>) -> Self {
        Self {
            success: false,
            message: None,
            errors: Some(errors),
        }
    }
}

/// Chat endpoint error envelope.
#[derive(Debug, Serialize)]
pub struct ChatErrorResponse {
    pub error: String,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "portfolio-api",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `POST /api/contact`: contact form submission.
pub async fn contact(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Result<Json<ContactRequest>, JsonRejection>,
) -> Response {
    match contact_inner(state, &headers, payload).await {
        Ok(response) => response,
        Err(err) => {
            error!(error = %err, "Contact handler failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ContactResponse::errors(vec![
                    "An unexpected error occurred".to_string(),
                ])),
            )
                .into_response()
        }
    }
}

async fn contact_inner(
    state: Arc<AppState>,
    headers: &HeaderMap,
    payload: Result<Json<ContactRequest>, JsonRejection>,
) -> anyhow::Result<Response> {
    let client = client_id(headers);

    if let RateLimitResult::Limited { retry_after } = state.contact_limiter.check(&client).await {
        return Ok((
            StatusCode::TOO_MANY_REQUESTS,
            [(header::RETRY_AFTER, retry_after.as_secs().to_string())],
            Json(ContactResponse::rejected("Too many requests")),
        )
            .into_response());
    }

    let Json(req) = match payload {
        Ok(json) => json,
        Err(rejection) => {
            debug!(client_id = %client, error = %rejection, "Malformed contact body");
            return Ok((
                StatusCode::BAD_REQUEST,
                Json(ContactResponse::errors(vec![
                    "Invalid request body".to_string(),
                ])),
            )
                .into_response());
        }
    };

    match state.validator.validate_contact(
        req.name.as_deref(),
        req.email.as_deref(),
        req.message.as_deref(),
        req.honeypot.as_deref(),
    ) {
        ContactValidation::Invalid(errors) => {
            info!(client_id = %client, count = errors.len(), "Contact validation failed");
            Ok((
                StatusCode::BAD_REQUEST,
                Json(ContactResponse::errors(
                    errors.iter().map(ToString::to_string).collect(),
                )),
            )
                .into_response())
        }
        ContactValidation::Honeypot => {
            // Bots get the same success response as everyone else.
            info!(client_id = %client, "Honeypot tripped, submission discarded");
            Ok(Json(ContactResponse::sent()).into_response())
        }
        ContactValidation::Valid(submission) => {
            // Stands in for the delivery collaborator (mail/persistence is
            // out of scope); nothing is stored.
            info!(
                client_id = %client,
                name = %submission.name,
                email = %submission.email,
                "Contact form submission received"
            );
            Ok(Json(ContactResponse::sent()).into_response())
        }
    }
}

/// `POST /api/chat`: chat stub streaming the canned reply.
pub async fn chat(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Response {
    match chat_inner(state, &headers, payload).await {
        Ok(response) => response,
        Err(err) => {
            error!(error = %err, "Chat handler failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ChatErrorResponse {
                    error: "Failed to process chat message".to_string(),
                }),
            )
                .into_response()
        }
    }
}

async fn chat_inner(
    state: Arc<AppState>,
    headers: &HeaderMap,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> anyhow::Result<Response> {
    let client = client_id(headers);

    if let RateLimitResult::Limited { retry_after } = state.chat_limiter.check(&client).await {
        return Ok((
            StatusCode::TOO_MANY_REQUESTS,
            [(header::RETRY_AFTER, retry_after.as_secs().to_string())],
            Json(ChatErrorResponse {
                error: "Too many requests. Please try again later.".to_string(),
            }),
        )
            .into_response());
    }

    let Json(req) = match payload {
        Ok(json) => json,
        Err(rejection) => {
            debug!(client_id = %client, error = %rejection, "Malformed chat body");
            return Ok((
                StatusCode::BAD_REQUEST,
                Json(ChatErrorResponse {
                    error: "Invalid request body".to_string(),
                }),
            )
                .into_response());
        }
    };

    let message = match state.validator.validate_chat(req.message.as_deref()) {
        Ok(message) => message,
        Err(err) => {
            return Ok((
                StatusCode::BAD_REQUEST,
                Json(ChatErrorResponse {
                    error: err.to_string(),
                }),
            )
                .into_response());
        }
    };

    debug!(client_id = %client, chars = message.chars().count(), "Streaming canned reply");

    // Chunked framing is applied by the HTTP layer for streaming bodies.
    let chunks = word_chunks(CANNED_REPLY, CHUNK_DELAY).map(Ok::<_, Infallible>);
    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
        .header(header::CACHE_CONTROL, "no-cache")
        .body(Body::from_stream(chunks))?;
    Ok(response)
}

/// Derive the rate-limit client id from the forwarded-address header.
///
/// Only the first comma-separated token is used; clients without the header
/// all share the `"unknown"` bucket.
fn client_id(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .map(|value| value.split(',').next().unwrap_or(value).trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Deserialize a JSON value as a string, mapping any non-string value to
/// `None` so it surfaces as the field's "required" violation rather than a
/// body parse failure.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        serde_json::Value::String(s) => Some(s),
        _ => None,
    }))
}
