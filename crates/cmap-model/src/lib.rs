//! Value types shared by the caption mapping crates.
//!
//! Everything here is plain caller-owned data: a parsed [`Grid`], the
//! [`Column`] profiles derived from it, the user's [`CaptionSet`], the
//! current [`Mapping`], and the ephemeral [`MatchSuggestion`]s produced by
//! the matcher.

pub mod caption;
pub mod column;
pub mod error;
pub mod grid;
pub mod mapping;

pub use caption::CaptionSet;
pub use column::{Column, InferredType};
pub use error::{MappingError, Result};
pub use grid::Grid;
pub use mapping::{Mapping, MatchSuggestion};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggestion_serializes() {
        let suggestion = MatchSuggestion {
            column_index: 2,
            column_name: "email_address".to_string(),
            target_field: "Email".to_string(),
            confidence: 0.95,
            reasoning: "email".to_string(),
        };
        let json = serde_json::to_value(&suggestion).unwrap();
        assert_eq!(json["column_index"], 2);
        assert_eq!(json["target_field"], "Email");
        assert_eq!(json["reasoning"], "email");
    }

    #[test]
    fn column_type_serializes_lowercase() {
        let column = Column {
            name: "Age".to_string(),
            index: 0,
            sample_values: vec!["30".to_string()],
            inferred_type: InferredType::Number,
        };
        let json = serde_json::to_value(&column).unwrap();
        assert_eq!(json["inferred_type"], "number");
    }
}
