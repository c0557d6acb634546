//! Mapping state for interactive sessions.
//!
//! [`MappingState`] bundles the profiled columns, the caption list, the
//! accepted mapping and the current suggestions. Suggestions are recomputed
//! whenever the caption list changes.

use cmap_model::{CaptionSet, Column, Mapping, MappingError, MatchSuggestion, Result};

use crate::matcher::Matcher;
use crate::resolve::{ConflictPolicy, Resolution, apply};
use crate::status::MappingStatus;

#[derive(Debug, Clone)]
pub struct MappingState {
    columns: Vec<Column>,
    captions: CaptionSet,
    mapping: Mapping,
    suggestions: Vec<MatchSuggestion>,
    matcher: Matcher,
}

impl MappingState {
    pub fn new(columns: Vec<Column>, captions: CaptionSet, matcher: Matcher) -> Self {
        let mut state = Self {
            columns,
            captions,
            mapping: Mapping::new(),
            suggestions: Vec::new(),
            matcher,
        };
        state.refresh_suggestions();
        state
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn captions(&self) -> &CaptionSet {
        &self.captions
    }

    pub fn mapping(&self) -> &Mapping {
        &self.mapping
    }

    /// Current suggestions, ranked.
    pub fn suggestions(&self) -> &[MatchSuggestion] {
        &self.suggestions
    }

    pub fn suggestion_for(&self, column: &str) -> Option<&MatchSuggestion> {
        self.suggestions.iter().find(|s| s.column_name == column)
    }

    pub fn status(&self) -> MappingStatus {
        MappingStatus::of(&self.columns, &self.mapping)
    }

    /// Adds a caption and recomputes suggestions.
    pub fn add_caption(&mut self, raw: &str) -> bool {
        let added = self.captions.insert(raw);
        if added {
            self.refresh_suggestions();
        }
        added
    }

    /// Removes a caption along with any assignment that used it.
    pub fn remove_caption(&mut self, index: usize) -> Option<String> {
        let removed = self.captions.remove(index)?;
        self.drop_assignments_to(&removed);
        self.refresh_suggestions();
        Some(removed)
    }

    /// Renames a caption. Assignments to the old text are dropped.
    pub fn rename_caption(&mut self, index: usize, raw: &str) -> bool {
        let Some(old) = self.captions.as_slice().get(index).cloned() else {
            return false;
        };
        if !self.captions.rename(index, raw) {
            return false;
        }
        if old != raw.trim() {
            self.drop_assignments_to(&old);
        }
        self.refresh_suggestions();
        true
    }

    /// Applies the current suggestion for `column`.
    ///
    /// Returns `Ok(false)` when the column has no suggestion.
    pub fn accept_suggestion(&mut self, column: &str) -> Result<bool> {
        let Some(suggestion) = self.suggestion_for(column).cloned() else {
            return Ok(false);
        };
        self.mapping
            .assign(&suggestion.column_name, &suggestion.target_field)?;
        Ok(true)
    }

    /// Maps a column onto a caption chosen by the user.
    pub fn accept_manual(&mut self, column: &str, caption: &str) -> Result<()> {
        if !self.columns.iter().any(|c| c.name == column) {
            return Err(MappingError::ColumnNotFound(column.to_string()));
        }
        if !self.captions.contains(caption) {
            return Err(MappingError::CaptionNotFound(caption.to_string()));
        }
        self.mapping.assign(column, caption)
    }

    /// Removes the assignment for `column`, returning its caption.
    pub fn unmap(&mut self, column: &str) -> Option<String> {
        self.mapping.unassign(column)
    }

    /// Resolves the current suggestions into the mapping.
    pub fn auto_map(&mut self, policy: ConflictPolicy) -> Resolution {
        let resolution = apply(&mut self.mapping, &self.suggestions, policy);
        tracing::info!(
            applied = resolution.applied.len(),
            rejected = resolution.rejected.len(),
            %policy,
            "auto-mapped suggestions"
        );
        resolution
    }

    pub fn clear(&mut self) {
        self.mapping.clear();
    }

    fn refresh_suggestions(&mut self) {
        self.suggestions = self
            .matcher
            .suggest(&self.columns, self.captions.as_slice());
    }

    fn drop_assignments_to(&mut self, caption: &str) {
        if let Some(column) = self.mapping.column_for(caption).map(str::to_string) {
            self.mapping.unassign(&column);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmap_model::InferredType;

    fn state() -> MappingState {
        let columns = vec![
            Column {
                name: "first_name".to_string(),
                index: 0,
                sample_values: vec!["Ann".to_string()],
                inferred_type: InferredType::Text,
            },
            Column {
                name: "work_email".to_string(),
                index: 1,
                sample_values: vec!["ann@example.com".to_string()],
                inferred_type: InferredType::Email,
            },
        ];
        let captions: CaptionSet = ["Forename", "Email"].into_iter().collect();
        MappingState::new(columns, captions, Matcher::default())
    }

    #[test]
    fn test_auto_map_completes() {
        let mut state = state();
        assert_eq!(state.suggestions().len(), 2);

        let resolution = state.auto_map(ConflictPolicy::default());
        assert_eq!(resolution.applied.len(), 2);
        assert!(state.status().is_complete());
        assert_eq!(state.mapping().target_of("work_email"), Some("Email"));
    }

    #[test]
    fn test_accept_and_unmap() {
        let mut state = state();
        assert!(state.accept_suggestion("first_name").unwrap());
        assert!(!state.accept_suggestion("missing").unwrap());
        assert_eq!(state.status().message(), "1/2 columns mapped");
        assert_eq!(state.unmap("first_name").as_deref(), Some("Forename"));
        assert_eq!(state.status().message(), "No mappings created");
    }

    #[test]
    fn test_accept_manual_validates() {
        let mut state = state();
        assert_eq!(
            state.accept_manual("nope", "Email"),
            Err(MappingError::ColumnNotFound("nope".to_string()))
        );
        assert_eq!(
            state.accept_manual("first_name", "Phone"),
            Err(MappingError::CaptionNotFound("Phone".to_string()))
        );
        state.accept_manual("first_name", "Email").unwrap();
        assert!(state.accept_manual("work_email", "Email").is_err());
    }

    #[test]
    fn test_caption_edits_update_state() {
        let mut state = state();
        state.accept_manual("work_email", "Email").unwrap();

        assert!(state.rename_caption(1, "Email Address"));
        assert!(state.mapping().is_empty());
        assert_eq!(
            state.suggestion_for("work_email").map(|s| s.target_field.as_str()),
            Some("Email Address")
        );

        state.accept_manual("first_name", "Forename").unwrap();
        assert_eq!(state.remove_caption(0).as_deref(), Some("Forename"));
        assert!(state.mapping().is_empty());
        assert!(state.suggestion_for("first_name").is_none());

        assert!(state.add_caption("First"));
        assert!(!state.add_caption(" First "));
        assert!(state.suggestion_for("first_name").is_some());
    }
}
