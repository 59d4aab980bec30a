// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: Apache-2.0

//! Abuse patterns for flood simulation.

use super::generators::PayloadKind;

/// Flood pattern configuration.
#[derive(Debug, Clone)]
pub struct FloodConfig {
    /// Total number of requests to send
    pub total_requests: usize,
    /// Number of unique client identifiers to simulate
    pub unique_clients: usize,
    /// What each request carries
    pub payload: PayloadKind,
    /// Whether the clients present a forwarded-for header
    pub headerless: bool,
}

impl Default for FloodConfig {
    fn default() -> Self {
        Self {
            total_requests: 50,
            unique_clients: 1,
            payload: PayloadKind::Clean,
            headerless: false,
        }
    }
}

/// Predefined abuse patterns.
impl FloodConfig {
    /// Single client hammering the endpoint.
    pub fn single_client_flood() -> Self {
        Self {
            total_requests: 50,
            unique_clients: 1,
            ..Default::default()
        }
    }

    /// Many clients, each sending more than its share.
    pub fn distributed_flood() -> Self {
        Self {
            total_requests: 400,
            unique_clients: 40,
            ..Default::default()
        }
    }

    /// Bot swarm with the honeypot field filled.
    pub fn bot_swarm() -> Self {
        Self {
            total_requests: 30,
            unique_clients: 10,
            payload: PayloadKind::Honeypot,
            ..Default::default()
        }
    }

    /// Valid submissions smuggling HTML markup.
    pub fn tag_injection() -> Self {
        Self {
            total_requests: 20,
            unique_clients: 10,
            payload: PayloadKind::TagInjection,
            ..Default::default()
        }
    }

    /// Message bodies past the length ceiling.
    pub fn oversized_payloads() -> Self {
        Self {
            total_requests: 20,
            unique_clients: 10,
            payload: PayloadKind::Oversized,
            ..Default::default()
        }
    }

    /// Requests with no fields at all.
    pub fn missing_fields() -> Self {
        Self {
            total_requests: 20,
            unique_clients: 10,
            payload: PayloadKind::MissingFields,
            ..Default::default()
        }
    }

    /// A crowd of distinct users behind a proxy that drops the
    /// forwarded-for header: they all collapse into the "unknown" bucket.
    pub fn headerless_crowd() -> Self {
        Self {
            total_requests: 30,
            unique_clients: 30,
            headerless: true,
            ..Default::default()
        }
    }

    /// Traffic that stays within the window allowance.
    pub fn within_allowance(max_requests: u32) -> Self {
        Self {
            total_requests: max_requests as usize,
            unique_clients: 1,
            ..Default::default()
        }
    }
}

/// Expected outcomes for a flood pattern.
pub struct FloodExpectations {
    /// Upper bound on submissions that may reach delivery
    pub max_delivered: usize,
    /// Description of expected behavior
    pub description: &'static str,
}

impl FloodConfig {
    /// Get expected outcomes given the endpoint's per-window allowance.
    pub fn expectations(&self, max_requests: u32) -> FloodExpectations {
        match self.payload {
            PayloadKind::Honeypot => FloodExpectations {
                max_delivered: 0,
                description: "Every admitted request is trapped by the honeypot",
            },
            PayloadKind::Oversized | PayloadKind::MissingFields => FloodExpectations {
                max_delivered: 0,
                description: "Every admitted request fails field validation",
            },
            PayloadKind::Clean | PayloadKind::TagInjection => {
                let buckets = if self.headerless { 1 } else { self.unique_clients };
                FloodExpectations {
                    max_delivered: self
                        .total_requests
                        .min(buckets * max_requests as usize),
                    description: "Deliveries are capped by the per-client window",
                }
            }
        }
    }
}
