//! Line-oriented chat session over a mapping state.

use std::io::{self, BufRead, Write};

use cmap_assist::{Assistant, ChatContext, Reply, confirmation, greeting};
use cmap_map::{MappingState, QUICK_CAPTIONS};
use cmap_model::MatchSuggestion;

/// What the loop should do after a line is handled.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Print the text and keep reading.
    Say(String),
    /// Stop the loop.
    Quit,
}

/// A chat over one loaded file.
///
/// Plain messages go to the assistant. `apply`, `add <caption>`,
/// `unmap <column>`, `quit` and `exit` are handled locally.
pub struct ChatSession {
    state: MappingState,
    assistant: Assistant,
    pending: Option<MatchSuggestion>,
}

impl ChatSession {
    pub fn new(state: MappingState, assistant: Assistant) -> Self {
        Self {
            state,
            assistant,
            pending: None,
        }
    }

    pub fn state(&self) -> &MappingState {
        &self.state
    }

    /// The suggestion `apply` would accept.
    pub fn pending(&self) -> Option<&MatchSuggestion> {
        self.pending.as_ref()
    }

    pub fn greeting(&self) -> Option<String> {
        greeting(&self.state.column_names(), self.state.captions().as_slice())
    }

    /// Quick captions not in the caption list yet.
    pub fn quick_captions(&self) -> Vec<&'static str> {
        let current = self.state.captions().as_slice();
        QUICK_CAPTIONS
            .iter()
            .copied()
            .filter(|quick| !current.iter().any(|c| c == quick))
            .collect()
    }

    pub fn handle(&mut self, line: &str) -> Step {
        let line = line.trim();
        let lower = line.to_lowercase();
        match lower.as_str() {
            "" => Step::Say(String::new()),
            "quit" | "exit" => Step::Quit,
            "apply" => Step::Say(self.apply_pending()),
            _ => {
                if let Some(caption) = command_argument(line, "add") {
                    Step::Say(self.add_caption(caption))
                } else if let Some(column) = command_argument(line, "unmap") {
                    Step::Say(self.unmap(column))
                } else {
                    Step::Say(self.ask(line))
                }
            }
        }
    }

    fn ask(&mut self, line: &str) -> String {
        let context = ChatContext::new(
            self.state.columns(),
            self.state.captions().as_slice(),
            self.state.mapping(),
        );
        let Reply { text, suggestion } = self.assistant.reply(line, &context);
        if suggestion.is_some() {
            self.pending = suggestion;
        }
        text
    }

    fn apply_pending(&mut self) -> String {
        let Some(suggestion) = self.pending.take() else {
            return "There is no suggestion to apply yet.".to_string();
        };
        match self
            .state
            .accept_manual(&suggestion.column_name, &suggestion.target_field)
        {
            Ok(()) => {
                tracing::info!(
                    column = %suggestion.column_name,
                    caption = %suggestion.target_field,
                    "applied mapping"
                );
                confirmation(&suggestion.column_name, &suggestion.target_field)
            }
            Err(error) => format!("Could not apply that mapping: {error}."),
        }
    }

    fn add_caption(&mut self, caption: &str) -> String {
        if self.state.add_caption(caption) {
            format!("Added the caption \"{caption}\".")
        } else {
            format!("\"{caption}\" is already a caption.")
        }
    }

    fn unmap(&mut self, column: &str) -> String {
        match self.state.unmap(column) {
            Some(caption) => format!("Removed the mapping from \"{column}\" to \"{caption}\"."),
            None => format!("\"{column}\" is not mapped."),
        }
    }
}

/// Text after `command` and whitespace, matched case-insensitively.
fn command_argument<'l>(line: &'l str, command: &str) -> Option<&'l str> {
    let (head, rest) = line.split_once(char::is_whitespace)?;
    head.eq_ignore_ascii_case(command).then(|| rest.trim())
}

/// Runs the session until `quit`, `exit` or end of input.
pub fn run<R: BufRead, W: Write>(
    session: &mut ChatSession,
    input: R,
    mut output: W,
) -> io::Result<()> {
    if let Some(text) = session.greeting() {
        writeln!(output, "assistant> {text}")?;
    }
    for line in input.lines() {
        let line = line?;
        match session.handle(&line) {
            Step::Quit => break,
            Step::Say(text) if text.is_empty() => {}
            Step::Say(text) => writeln!(output, "assistant> {text}")?,
        }
        output.flush()?;
    }
    writeln!(output, "{}", session.state().status())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmap_ingest::{parse, profile};
    use cmap_map::Matcher;

    fn session() -> ChatSession {
        let grid = parse("first_name,work_email\nAnn,ann@example.com\n", ',');
        let columns = profile(&grid, true);
        let captions = ["Forename", "Email"].into_iter().collect();
        ChatSession::new(
            MappingState::new(columns, captions, Matcher::default()),
            Assistant::default(),
        )
    }

    #[test]
    fn apply_uses_last_offer() {
        let mut session = session();
        assert_eq!(
            session.handle("apply"),
            Step::Say("There is no suggestion to apply yet.".to_string())
        );

        let Step::Say(offer) = session.handle("please map something") else {
            panic!("expected a reply");
        };
        assert!(offer.contains("work_email"));
        assert_eq!(session.pending().unwrap().target_field, "Email");

        assert_eq!(
            session.handle("APPLY"),
            Step::Say("Perfect! I've mapped \"work_email\" to \"Email\".".to_string())
        );
        assert!(session.pending().is_none());
        assert_eq!(session.state().status().message(), "1/2 columns mapped");
    }

    #[test]
    fn unmap_and_quit() {
        let mut session = session();
        session.handle("map");
        session.handle("apply");
        assert_eq!(
            session.handle("unmap work_email"),
            Step::Say("Removed the mapping from \"work_email\" to \"Email\".".to_string())
        );
        assert_eq!(
            session.handle("unmap work_email"),
            Step::Say("\"work_email\" is not mapped.".to_string())
        );
        assert_eq!(session.handle(" exit "), Step::Quit);
    }

    #[test]
    fn add_offers_quick_captions() {
        let mut session = session();
        assert_eq!(session.quick_captions(), ["Name", "Phone", "Address", "Date", "Amount"]);

        assert_eq!(
            session.handle("add Phone"),
            Step::Say("Added the caption \"Phone\".".to_string())
        );
        assert_eq!(
            session.handle("ADD Email"),
            Step::Say("\"Email\" is already a caption.".to_string())
        );
        assert_eq!(session.quick_captions(), ["Name", "Address", "Date", "Amount"]);
        assert_eq!(session.state().captions().len(), 3);
    }

    #[test]
    fn run_writes_transcript() {
        let mut session = session();
        let input = b"status\nquit\nstatus\n";
        let mut output = Vec::new();
        run(&mut session, &input[..], &mut output).unwrap();

        let transcript = String::from_utf8(output).unwrap();
        assert!(transcript.starts_with("assistant> Hello! I can see you have 2 columns"));
        assert_eq!(transcript.matches("Progress: 0/2").count(), 1);
        assert!(transcript.ends_with("No mappings created\n"));
    }
}
