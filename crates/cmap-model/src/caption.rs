//! User-defined target captions.

use serde::{Deserialize, Serialize};

/// Ordered, duplicate-free list of captions.
///
/// Captions are trimmed on the way in. Empty and already-present captions are
/// ignored rather than rejected, so callers can feed raw user input directly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CaptionSet {
    captions: Vec<String>,
}

impl CaptionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a caption. Returns `false` if it was empty or already present.
    pub fn insert(&mut self, raw: &str) -> bool {
        let caption = raw.trim();
        if caption.is_empty() || self.contains(caption) {
            return false;
        }
        self.captions.push(caption.to_string());
        true
    }

    /// Removes the caption at `index`, returning it.
    pub fn remove(&mut self, index: usize) -> Option<String> {
        (index < self.captions.len()).then(|| self.captions.remove(index))
    }

    /// Replaces the caption at `index`.
    ///
    /// Returns `false` when the index is out of range, the new value is empty,
    /// or another caption already has that text.
    pub fn rename(&mut self, index: usize, raw: &str) -> bool {
        let caption = raw.trim();
        if caption.is_empty() || index >= self.captions.len() {
            return false;
        }
        let clash = self
            .captions
            .iter()
            .enumerate()
            .any(|(i, existing)| i != index && existing == caption);
        if clash {
            return false;
        }
        self.captions[index] = caption.to_string();
        true
    }

    pub fn contains(&self, caption: &str) -> bool {
        self.captions.iter().any(|c| c == caption)
    }

    pub fn position(&self, caption: &str) -> Option<usize> {
        self.captions.iter().position(|c| c == caption)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.captions.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.captions
    }

    pub fn len(&self) -> usize {
        self.captions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.captions.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for CaptionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<S: AsRef<str>> Extend<S> for CaptionSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for caption in iter {
            self.insert(caption.as_ref());
        }
    }
}
