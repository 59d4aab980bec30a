// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: Apache-2.0

//! Test harness for portfolio API abuse simulation.
//!
//! This module provides utilities for simulating abusive traffic patterns
//! (floods, bot swarms, markup injection) against the rate limiter and
//! validator to validate the ingress controls.

pub mod attacks;
