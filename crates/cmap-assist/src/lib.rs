//! Scripted mapping assistant.
//!
//! Replies are chosen by keyword triggers from a fixed intent table and may
//! carry a [`MatchSuggestion`](cmap_model::MatchSuggestion) the caller can
//! apply. No language model is involved.

#![deny(unsafe_code)]

mod responder;

pub use responder::{Assistant, ChatContext, Reply, confirmation, greeting, respond};
