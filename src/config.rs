// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Configuration for the portfolio ingress API.
//!
//! Defaults match the limits enforced by the portfolio frontend: 5 contact
//! submissions and 20 chat messages per client per minute.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the portfolio API service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server bind address (default: 0.0.0.0:8080)
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Rate limiting for the contact endpoint
    #[serde(default = "default_contact_rate")]
    pub contact_rate: RateLimitConfig,

    /// Rate limiting for the chat endpoint
    #[serde(default = "default_chat_rate")]
    pub chat_rate: RateLimitConfig,

    /// Validation limits for submitted fields
    #[serde(default)]
    pub validation: ValidationConfig,
}

/// Sliding-window rate limit parameters for one endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Maximum admitted requests per client within the window
    pub max_requests: u32,

    /// Window length in milliseconds (default: 60000)
    #[serde(default = "default_window_ms")]
    pub window_ms: u64,
}

/// Length ceilings for validated fields, in characters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Maximum contact name length (default: 100)
    #[serde(default = "default_max_name_chars")]
    pub max_name_chars: usize,

    /// Maximum contact message length (default: 2000)
    #[serde(default = "default_max_message_chars")]
    pub max_message_chars: usize,

    /// Maximum chat message length (default: 500)
    #[serde(default = "default_max_chat_chars")]
    pub max_chat_chars: usize,
}

// Default value functions
fn default_bind_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_contact_rate() -> RateLimitConfig {
    RateLimitConfig {
        max_requests: 5,
        window_ms: default_window_ms(),
    }
}

fn default_chat_rate() -> RateLimitConfig {
    RateLimitConfig {
        max_requests: 20,
        window_ms: default_window_ms(),
    }
}

fn default_window_ms() -> u64 {
    60_000
}

fn default_max_name_chars() -> usize {
    100
}

fn default_max_message_chars() -> usize {
    2000
}

fn default_max_chat_chars() -> usize {
    500
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            contact_rate: default_contact_rate(),
            chat_rate: default_chat_rate(),
            validation: ValidationConfig::default(),
        }
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_name_chars: default_max_name_chars(),
            max_message_chars: default_max_message_chars(),
            max_chat_chars: default_max_chat_chars(),
        }
    }
}

impl RateLimitConfig {
    /// Get the window duration
    pub fn window_duration(&self) -> Duration {
        Duration::from_millis(self.window_ms)
    }
}
