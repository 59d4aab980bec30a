// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Portfolio ingress API
//!
//! This crate provides the request-level core behind a personal portfolio
//! site's API endpoints:
//!
//! - Per-client sliding-window rate limiting (5/min contact, 20/min chat)
//! - Contact form validation and HTML tag stripping
//! - Honeypot bot trapping (silent success)
//! - Chat stub streaming a canned reply word-by-word
//!
//! Pages, styling, and the static project/skill data live in the frontend;
//! this service only owns the pieces with runtime logic.

pub mod config;
pub mod handlers;
pub mod limiter;
pub mod stream;
pub mod validator;

pub use config::Config;
pub use limiter::{RateLimitResult, RateLimiter};
pub use validator::{ContactValidation, SubmissionValidator};
