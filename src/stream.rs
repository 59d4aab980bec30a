// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Word-by-word streaming of the canned chat reply.
//!
//! The chat endpoint has no backend yet; it streams a fixed sentence one
//! word at a time with a fixed delay between chunks to simulate a live
//! assistant. The emitter is a pull-based stream: the delay runs between
//! emissions, and dropping the consumer drops the in-flight sleep, so a
//! disconnected client stops the emission immediately.

use axum::body::Bytes;
use futures::stream::{self, Stream};
use std::time::Duration;

/// Fixed reply streamed by the chat stub.
pub const CANNED_REPLY: &str =
    "Thanks for your message! I'm the portfolio assistant. This chat feature is coming soon - stay tuned!";

/// Pause between successive chunks.
pub const CHUNK_DELAY: Duration = Duration::from_millis(80);

/// Split `reply` into word chunks, pacing them `delay` apart.
///
/// The first chunk is the first word verbatim; every later chunk is a single
/// leading space followed by the next word, so concatenating all chunks
/// reproduces `reply` exactly. The stream is finite and not restartable.
pub fn word_chunks(reply: &'static str, delay: Duration) -> impl Stream<Item = Bytes> {
    stream::unfold((reply.split(' '), true), move |(mut words, first)| async move {
        let word = words.next()?;
        if !first {
            tokio::time::sleep(delay).await;
        }
        let chunk = if first {
            Bytes::from_static(word.as_bytes())
        } else {
            Bytes::from(format!(" {word}"))
        };
        Some((chunk, (words, false)))
    })
}
