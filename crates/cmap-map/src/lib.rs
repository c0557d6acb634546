//! Column-to-caption matching.
//!
//! Keyword heuristics score each profiled column against the user's
//! captions. The resulting suggestions can be resolved into a collision-free
//! [`Mapping`](cmap_model::Mapping) and tracked in a [`MappingState`].

#![deny(unsafe_code)]

mod matcher;
mod presets;
mod resolve;
mod rules;
mod state;
mod status;

pub use matcher::{
    ConfidenceLevel, DEFAULT_MIN_CONFIDENCE, Matcher, RuleMatch, by_strength, rank, suggest,
};
pub use presets::{CaptionPreset, QUICK_CAPTIONS};
pub use resolve::{ConflictPolicy, Resolution, apply, resolve};
pub use rules::{evidence_rank, normalize_text};
pub use state::MappingState;
pub use status::{MappingStatus, column_preview};
