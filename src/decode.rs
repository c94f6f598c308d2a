//! Tracking of in-flight image/video decodes.
//!
//! The browser decodes uploads asynchronously and reports back whenever it
//! finishes, which may be after the user has cleared the canvas or replaced the
//! file. Every decode is therefore tagged with a [`DecodeToken`] when it
//! starts; completions whose token is no longer pending are dropped instead of
//! inserting media. `cancel_all` (used by clear) advances a generation counter
//! so tokens issued before it can never match again.

#[cfg(test)]
#[path = "decode_test.rs"]
mod decode_test;

use std::collections::HashMap;

use crate::media::MediaKind;

/// Identifies one asynchronous decode request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DecodeToken {
    id: u64,
    generation: u64,
}

impl DecodeToken {
    #[must_use]
    pub fn id(self) -> u64 {
        self.id
    }
}

/// Pending decode requests keyed by token.
#[derive(Debug, Default)]
pub struct DecodeTracker {
    next_id: u64,
    generation: u64,
    pending: HashMap<DecodeToken, MediaKind>,
}

impl DecodeTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a decode of `kind` if `mime` belongs to it.
    ///
    /// Returns `None` for unsupported types; the caller drops the file.
    pub fn begin(&mut self, kind: MediaKind, mime: &str) -> Option<DecodeToken> {
        if !kind.accepts_mime(mime) {
            tracing::debug!(?kind, mime, "unsupported media type ignored");
            return None;
        }
        self.next_id += 1;
        let token = DecodeToken { id: self.next_id, generation: self.generation };
        self.pending.insert(token, kind);
        tracing::debug!(id = token.id, ?kind, "decode started");
        Some(token)
    }

    /// Resolve a completed decode. Returns its kind, or `None` when the token
    /// is stale, cancelled, or already resolved.
    pub fn finish(&mut self, token: DecodeToken) -> Option<MediaKind> {
        if token.generation != self.generation {
            tracing::warn!(id = token.id, "stale decode completion dropped");
            return None;
        }
        let kind = self.pending.remove(&token);
        if kind.is_none() {
            tracing::warn!(id = token.id, "unknown decode completion dropped");
        }
        kind
    }

    /// Cancel one pending decode. Returns whether it was pending.
    pub fn cancel(&mut self, token: DecodeToken) -> bool {
        self.pending.remove(&token).is_some()
    }

    /// Cancel every pending decode, including ones not yet reported.
    pub fn cancel_all(&mut self) {
        if !self.pending.is_empty() {
            tracing::debug!(count = self.pending.len(), "pending decodes cancelled");
        }
        self.pending.clear();
        self.generation += 1;
    }

    #[must_use]
    pub fn is_pending(&self, token: DecodeToken) -> bool {
        self.pending.contains_key(&token)
    }

    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}
