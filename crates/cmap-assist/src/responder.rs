//! Scripted replies for the mapping assistant.
//!
//! The responder lowercases the utterance and walks an ordered intent
//! table. The first intent whose trigger words occur in the utterance
//! produces the reply; when none match, column and caption mentions are
//! checked instead.

use std::time::Duration;

use cmap_map::{Matcher, by_strength};
use cmap_model::{Column, Mapping, MatchSuggestion};
use serde::{Deserialize, Serialize};

/// Fallback confidence for the "map" intent when no rule fires.
const SUGGEST_CONFIDENCE: f32 = 0.85;
/// Confidence when both a column and a caption are named.
const MENTION_PAIR_CONFIDENCE: f32 = 0.95;
/// Confidence when only a column is named.
const MENTION_COLUMN_CONFIDENCE: f32 = 0.75;

const HELP_TEXT: &str = "I can help you map your CSV columns to your desired table captions. \
    I'll analyze the column names and suggest the best matches. You can ask me to 'map columns', \
    'suggest mappings', or tell me about specific columns you'd like to map.";

const GENERIC_TEXT: &str = "I'm here to help map your CSV columns to table captions. \
    You can ask me to suggest mappings, or tell me about specific columns you'd like to map!";

/// Snapshot of a mapping session the responder reads from.
#[derive(Debug, Clone, Copy)]
pub struct ChatContext<'a> {
    pub columns: &'a [Column],
    pub captions: &'a [String],
    pub mapping: &'a Mapping,
}

impl<'a> ChatContext<'a> {
    pub fn new(columns: &'a [Column], captions: &'a [String], mapping: &'a Mapping) -> Self {
        Self {
            columns,
            captions,
            mapping,
        }
    }

    fn unmapped_columns(&self) -> Vec<&'a Column> {
        self.columns
            .iter()
            .filter(|c| !self.mapping.is_column_mapped(&c.name))
            .collect()
    }

    fn available_captions(&self) -> Vec<&'a str> {
        self.mapping.available_captions(self.captions)
    }

    fn mapped_count(&self) -> usize {
        self.columns
            .iter()
            .filter(|c| self.mapping.is_column_mapped(&c.name))
            .count()
    }
}

/// An assistant message, optionally carrying a mapping offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reply {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<MatchSuggestion>,
}

impl Reply {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            suggestion: None,
        }
    }

    fn offer(text: String, suggestion: MatchSuggestion) -> Self {
        Self {
            text,
            suggestion: Some(suggestion),
        }
    }
}

struct Intent {
    name: &'static str,
    triggers: &'static [&'static str],
    handle: fn(&ChatContext<'_>) -> Reply,
}

const INTENTS: &[Intent] = &[
    Intent {
        name: "suggest",
        triggers: &["map", "connect", "match"],
        handle: suggest_mapping,
    },
    Intent {
        name: "help",
        triggers: &["help", "how"],
        handle: |_| Reply::text(HELP_TEXT),
    },
    Intent {
        name: "remove",
        triggers: &["remove", "delete", "unmap"],
        handle: list_removable,
    },
    Intent {
        name: "status",
        triggers: &["status", "progress"],
        handle: progress,
    },
];

/// Produces the assistant's reply to one user message.
///
/// Pure function of the utterance and the snapshot; nothing is mutated.
pub fn respond(utterance: &str, context: &ChatContext<'_>) -> Reply {
    let lower = utterance.to_lowercase();
    for intent in INTENTS {
        if intent.triggers.iter().any(|t| lower.contains(t)) {
            tracing::debug!(intent = intent.name, "matched intent");
            return (intent.handle)(context);
        }
    }
    tracing::debug!(intent = "mention", "matched intent");
    mentions(&lower, context)
}

/// Welcome message, or `None` when no columns are loaded.
pub fn greeting<S: AsRef<str>, T: AsRef<str>>(columns: &[S], captions: &[T]) -> Option<String> {
    if columns.is_empty() {
        return None;
    }
    let names = columns
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(", ");
    Some(format!(
        "Hello! I can see you have {} columns in your CSV: {names}. I'm ready to help you map \
         these to your {} captions. What would you like me to help you with?",
        columns.len(),
        captions.len()
    ))
}

/// Acknowledges an applied mapping.
pub fn confirmation(column: &str, caption: &str) -> String {
    format!("Perfect! I've mapped \"{column}\" to \"{caption}\".")
}

fn suggest_mapping(context: &ChatContext<'_>) -> Reply {
    let unmapped = context.unmapped_columns();
    let available = context.available_captions();

    if unmapped.is_empty() {
        return Reply::text(
            "All CSV columns have been mapped! Is there anything you'd like to adjust?",
        );
    }
    if available.is_empty() {
        return Reply::text(
            "All your captions have been used. You may need to add more captions or review \
             existing mappings.",
        );
    }

    let suggestion = best_matcher_hit(&unmapped, &available).unwrap_or_else(|| {
        let column = unmapped[0];
        offer(column, closest_caption(&column.name, &available), SUGGEST_CONFIDENCE)
    });
    let text = format!(
        "I suggest mapping \"{}\" to \"{}\". They seem semantically similar. Would you like me \
         to apply this mapping?",
        suggestion.column_name, suggestion.target_field
    );
    Reply::offer(text, suggestion)
}

fn list_removable(context: &ChatContext<'_>) -> Reply {
    if context.mapping.is_empty() {
        return Reply::text("There are no mappings to remove at the moment.");
    }
    let mapped = context.mapping.mapped_columns().collect::<Vec<_>>().join(", ");
    Reply::text(format!(
        "I can help you remove mappings. Currently mapped columns: {mapped}. Which one would you \
         like to unmap?"
    ))
}

fn progress(context: &ChatContext<'_>) -> Reply {
    let total = context.columns.len();
    let mapped = context.mapped_count();
    Reply::text(format!(
        "Progress: {mapped}/{total} columns mapped. {} columns still need mapping.",
        total - mapped
    ))
}

fn mentions(lower: &str, context: &ChatContext<'_>) -> Reply {
    let mentioned = |name: &str| !name.is_empty() && lower.contains(&name.to_lowercase());
    let column = context.columns.iter().find(|c| mentioned(&c.name));
    let caption = context.captions.iter().find(|c| mentioned(c));

    match (column, caption) {
        (Some(column), Some(caption)) => {
            let text = format!(
                "I understand you want to map \"{}\" to \"{caption}\". That's a good match! \
                 Should I apply this mapping?",
                column.name
            );
            Reply::offer(text, offer(column, caption, MENTION_PAIR_CONFIDENCE))
        }
        (Some(column), None) => {
            let available = context.available_captions();
            if available.is_empty() {
                return Reply::text(format!(
                    "I found the \"{}\" column, but all captions are already mapped. You might \
                     need to add more captions.",
                    column.name
                ));
            }
            let target = Matcher::default()
                .best_for(column, &available)
                .map(|s| s.target_field)
                .unwrap_or_else(|| closest_caption(&column.name, &available).to_string());
            let text = format!(
                "For the \"{}\" column, I suggest mapping it to \"{target}\". Does this make sense?",
                column.name
            );
            Reply::offer(text, offer(column, &target, MENTION_COLUMN_CONFIDENCE))
        }
        _ => Reply::text(GENERIC_TEXT),
    }
}

/// Strongest matcher suggestion, ties to the earlier column.
fn best_matcher_hit(unmapped: &[&Column], available: &[&str]) -> Option<MatchSuggestion> {
    let matcher = Matcher::default();
    let mut best: Option<MatchSuggestion> = None;
    for column in unmapped {
        let Some(found) = matcher.best_for(column, available) else {
            continue;
        };
        if best
            .as_ref()
            .is_none_or(|b| by_strength(&found, b).is_lt())
        {
            best = Some(found);
        }
    }
    best
}

/// First caption containing or contained in the column name, else the first.
fn closest_caption<'c>(column: &str, available: &[&'c str]) -> &'c str {
    let column = column.to_lowercase();
    available
        .iter()
        .copied()
        .find(|caption| {
            let caption = caption.to_lowercase();
            caption.contains(&column) || column.contains(&caption)
        })
        .unwrap_or(available[0])
}

fn offer(column: &Column, caption: &str, confidence: f32) -> MatchSuggestion {
    MatchSuggestion {
        column_index: column.index,
        column_name: column.name.clone(),
        target_field: caption.to_string(),
        confidence,
        reasoning: "assistant".to_string(),
    }
}

/// Responder with a cosmetic typing pause.
#[derive(Debug, Clone, Copy, Default)]
pub struct Assistant {
    typing_delay: Duration,
}

impl Assistant {
    pub fn new(typing_delay: Duration) -> Self {
        Self { typing_delay }
    }

    pub fn typing_delay(&self) -> Duration {
        self.typing_delay
    }

    /// Waits for the typing delay, then calls [`respond`].
    pub fn reply(&self, utterance: &str, context: &ChatContext<'_>) -> Reply {
        if !self.typing_delay.is_zero() {
            std::thread::sleep(self.typing_delay);
        }
        respond(utterance, context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmap_model::InferredType;

    fn column(index: usize, name: &str, samples: &[&str]) -> Column {
        Column {
            name: name.to_string(),
            index,
            sample_values: samples.iter().map(|s| (*s).to_string()).collect(),
            inferred_type: InferredType::Text,
        }
    }

    fn captions(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_intent_order() {
        let columns = vec![column(0, "qty", &["4"])];
        let caps = captions(&["Quantity"]);
        let mapping = Mapping::new();
        let ctx = ChatContext::new(&columns, &caps, &mapping);

        // "map" wins over "help" because it is checked first.
        assert!(respond("help me map", &ctx).suggestion.is_some());
        assert_eq!(respond("HOW does this work", &ctx).text, HELP_TEXT);
        assert_eq!(respond("hello", &ctx).text, GENERIC_TEXT);
    }

    #[test]
    fn test_closest_caption_fallback() {
        let columns = vec![column(0, "zz", &["A very long description value"])];
        let caps = captions(&["Total", "zz top"]);
        let mapping = Mapping::new();
        let ctx = ChatContext::new(&columns, &caps, &mapping);

        let suggestion = respond("connect", &ctx).suggestion.unwrap();
        assert_eq!(suggestion.target_field, "zz top");
        assert_eq!(suggestion.confidence, SUGGEST_CONFIDENCE);
    }

    #[test]
    fn test_matcher_hit_preferred() {
        let columns = vec![
            column(0, "qty", &["4"]),
            column(1, "surname", &["Smith"]),
        ];
        let caps = captions(&["Quantity", "Last Name"]);
        let mapping = Mapping::new();
        let ctx = ChatContext::new(&columns, &caps, &mapping);

        let suggestion = respond("match something", &ctx).suggestion.unwrap();
        assert_eq!(suggestion.column_name, "surname");
        assert_eq!(suggestion.target_field, "Last Name");
        assert_eq!(suggestion.confidence, 0.9);
    }

    #[test]
    fn test_matcher_hit_prefers_name_evidence() {
        // Both columns score 0.9, but only first_name matches by name.
        let columns = vec![column(0, "ref", &["R1"]), column(1, "first_name", &["Ann"])];
        let caps = captions(&["Forename(s) *"]);
        let mapping = Mapping::new();
        let ctx = ChatContext::new(&columns, &caps, &mapping);

        let suggestion = respond("map", &ctx).suggestion.unwrap();
        assert_eq!(suggestion.column_name, "first_name");
        assert_eq!(suggestion.reasoning, "forename");
    }

    #[test]
    fn test_assistant_reply_matches_respond() {
        let columns = vec![column(0, "qty", &["4"])];
        let caps = captions(&["Quantity"]);
        let mapping = Mapping::new();
        let ctx = ChatContext::new(&columns, &caps, &mapping);

        let assistant = Assistant::new(Duration::from_millis(1));
        assert_eq!(assistant.reply("status", &ctx), respond("status", &ctx));
        assert!(Assistant::default().typing_delay().is_zero());
    }

    #[test]
    fn test_greeting_needs_columns() {
        assert_eq!(greeting::<&str, &str>(&[], &["A"]), None);
        assert_eq!(
            confirmation("mail", "Email"),
            "Perfect! I've mapped \"mail\" to \"Email\"."
        );
    }
}
