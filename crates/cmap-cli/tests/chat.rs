use std::io::Write;

use cmap_assist::Assistant;
use cmap_cli::chat::{ChatSession, run};
use cmap_ingest::{Delimiter, UploadOptions, profile, read_upload};
use cmap_map::{MappingState, Matcher};

fn temp_csv(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn chat_session_transcript() {
    let file = temp_csv("ref,first_name,surname,email\nA1,Ann,Smith,ann@example.com\n");
    let upload = read_upload(file.path(), &UploadOptions::default()).unwrap();
    let columns = profile(&upload.parse(Delimiter::Comma), true);
    let captions = ["Forename", "Surname", "Email"].into_iter().collect();
    let mut session = ChatSession::new(
        MappingState::new(columns, captions, Matcher::default()),
        Assistant::default(),
    );

    let input = "map\napply\nmap\napply\nstatus\nunmap email\nquit\n";
    let mut output = Vec::new();
    run(&mut session, input.as_bytes(), &mut output).unwrap();

    let transcript = String::from_utf8(output).unwrap();
    insta::assert_snapshot!(transcript, @r#"
    assistant> Hello! I can see you have 4 columns in your CSV: ref, first_name, surname, email. I'm ready to help you map these to your 3 captions. What would you like me to help you with?
    assistant> I suggest mapping "surname" to "Surname". They seem semantically similar. Would you like me to apply this mapping?
    assistant> Perfect! I've mapped "surname" to "Surname".
    assistant> I suggest mapping "email" to "Email". They seem semantically similar. Would you like me to apply this mapping?
    assistant> Perfect! I've mapped "email" to "Email".
    assistant> Progress: 2/4 columns mapped. 2 columns still need mapping.
    assistant> Removed the mapping from "email" to "Email".
    1/4 columns mapped
    "#);
    assert_eq!(session.state().mapping().target_of("surname"), Some("Surname"));
}

#[test]
fn chat_rejects_taken_caption() {
    let file = temp_csv("given,first\nAnn,Bo\n");
    let upload = read_upload(file.path(), &UploadOptions::default()).unwrap();
    let columns = profile(&upload.parse(Delimiter::Comma), true);
    let captions = ["Forename"].into_iter().collect();
    let mut session = ChatSession::new(
        MappingState::new(columns, captions, Matcher::default()),
        Assistant::default(),
    );

    // Both columns are named in turn; the second offer targets a used caption.
    let input = "given Forename\napply\nfirst Forename\napply\n";
    let mut output = Vec::new();
    run(&mut session, input.as_bytes(), &mut output).unwrap();

    let transcript = String::from_utf8(output).unwrap();
    assert!(transcript.contains("Perfect! I've mapped \"given\" to \"Forename\"."));
    assert!(transcript.contains("Could not apply that mapping: caption 'Forename' already mapped from 'given'."));
    assert!(transcript.ends_with("1/2 columns mapped\n"));
}
