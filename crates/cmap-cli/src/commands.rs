use std::io;

use anyhow::{Context, Result, anyhow, bail};
use serde::Serialize;
use tracing::{info, info_span};

use cmap_assist::Assistant;
use cmap_cli::chat::{ChatSession, run};
use cmap_cli::output::{columns_table, mapping_table, suggestions_table};
use cmap_cli::settings::Settings;
use cmap_ingest::{DemoDataset, Delimiter, profile, read_upload};
use cmap_map::{
    CaptionPreset, ConflictPolicy, MappingState, MappingStatus, Matcher, Resolution, apply,
};
use cmap_model::{CaptionSet, Column, Grid, Mapping, MatchSuggestion};

use crate::cli::{CaptionArgs, ChatArgs, DemoArgs, InputArgs, ProfileArgs, SuggestArgs};

/// Most captions taken from a preset detected on upload.
const DETECTED_CAPTION_LIMIT: usize = 6;

/// A parsed and profiled input file.
struct Loaded {
    grid: Grid,
    columns: Vec<Column>,
    has_header: bool,
}

fn load(input: &InputArgs, settings: &Settings) -> Result<Loaded> {
    let upload = read_upload(&input.file, &settings.input.upload_options())
        .with_context(|| format!("load {}", input.file.display()))?;
    let delimiter: Delimiter = input
        .delimiter
        .map_or(settings.input.delimiter, Into::into);
    let has_header = settings.input.has_header && !input.no_header;

    let grid = upload.parse(delimiter);
    let columns = profile(&grid, has_header);
    info!(
        file = %upload.file_name,
        rows = grid.len(),
        columns = columns.len(),
        %delimiter,
        "profiled upload"
    );
    Ok(Loaded {
        grid,
        columns,
        has_header,
    })
}

/// Captions from the preset, then explicit `-c` values, then settings.
///
/// With nothing given at all the preset is detected from the column names
/// and trimmed to one caption per column, at most six.
fn captions_for(args: &CaptionArgs, columns: &[Column], settings: &Settings) -> Result<CaptionSet> {
    let names: Vec<&str> = columns.iter().map(|c| c.name.as_str()).collect();
    let mut captions = CaptionSet::new();

    if let Some(name) = &args.preset {
        let preset = if name.eq_ignore_ascii_case("auto") {
            CaptionPreset::detect(&names)
        } else {
            CaptionPreset::from_name(name).ok_or_else(|| anyhow!("unknown preset: {name}"))?
        };
        info!(%preset, "using caption preset");
        captions.extend(preset.captions());
    }
    captions.extend(&args.captions);

    if captions.is_empty() {
        captions.extend(&settings.captions);
    }
    if captions.is_empty() {
        let preset = CaptionPreset::detect(&names);
        let take = columns.len().min(DETECTED_CAPTION_LIMIT);
        info!(%preset, captions = take, "no captions given, using detected preset");
        captions.extend(preset.captions().iter().take(take));
    }
    Ok(captions)
}

pub fn run_profile(args: &ProfileArgs, settings: &Settings) -> Result<()> {
    let loaded = load(&args.input, settings)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&loaded.columns)?);
    } else {
        println!("{}", columns_table(&loaded.columns));
    }
    Ok(())
}

/// Everything `suggest --json` prints.
#[derive(Serialize)]
struct SuggestReport<'a> {
    columns: &'a [Column],
    captions: &'a CaptionSet,
    suggestions: &'a [MatchSuggestion],
    policy: ConflictPolicy,
    resolution: &'a Resolution,
    mapping: &'a Mapping,
    status: MappingStatus,
    message: String,
}

pub fn run_suggest(args: &SuggestArgs, settings: &Settings) -> Result<()> {
    let loaded = load(&args.input, settings)?;
    let captions = captions_for(&args.captions, &loaded.columns, settings)?;
    let min_confidence = args
        .min_confidence
        .unwrap_or(settings.matching.min_confidence);
    if !(0.0..=1.0).contains(&min_confidence) {
        bail!("--min-confidence must be between 0 and 1, got {min_confidence}");
    }
    let policy = args.policy.map_or(settings.matching.policy, Into::into);

    let suggestions = Matcher::new(min_confidence).suggest(&loaded.columns, captions.as_slice());
    let mut mapping = Mapping::new();
    let resolution = apply(&mut mapping, &suggestions, policy);
    let status = MappingStatus::of(&loaded.columns, &mapping);

    if args.json {
        let report = SuggestReport {
            columns: &loaded.columns,
            captions: &captions,
            suggestions: &suggestions,
            policy,
            resolution: &resolution,
            mapping: &mapping,
            status,
            message: status.message(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if suggestions.is_empty() {
        println!("No suggestions above {min_confidence}.");
    } else {
        println!("{}", suggestions_table(&suggestions, &resolution));
    }
    println!(
        "{}",
        mapping_table(&loaded.columns, &mapping, &loaded.grid, loaded.has_header)
    );
    println!("{status}");
    Ok(())
}

pub fn run_chat(args: &ChatArgs, settings: &Settings) -> Result<()> {
    let loaded = load(&args.input, settings)?;
    let captions = captions_for(&args.captions, &loaded.columns, settings)?;
    let state = MappingState::new(loaded.columns, captions, settings.matching.matcher());
    let assistant = Assistant::new(settings.chat.typing_delay());
    let mut session = ChatSession::new(state, assistant);

    println!(
        "Type a message, `apply` to accept the last suggestion, `add <caption>`, \
         `unmap <column>`, or `quit`."
    );
    let quick = session.quick_captions();
    if !quick.is_empty() {
        println!("Quick captions: {}", quick.join(", "));
    }
    run(&mut session, io::stdin().lock(), io::stdout().lock()).context("chat session")?;
    Ok(())
}

pub fn run_demo(args: &DemoArgs, settings: &Settings) -> Result<()> {
    let datasets = match &args.dataset {
        Some(name) => vec![
            DemoDataset::from_name(name).ok_or_else(|| anyhow!("unknown dataset: {name}"))?,
        ],
        None => DemoDataset::ALL.to_vec(),
    };
    let matcher = settings.matching.matcher();

    for dataset in datasets {
        let span = info_span!("demo", dataset = %dataset);
        let _guard = span.enter();

        let grid = dataset.grid();
        let columns = profile(&grid, true);
        let names: Vec<&str> = columns.iter().map(|c| c.name.as_str()).collect();
        let preset = CaptionPreset::detect(&names);

        let suggestions = matcher.suggest(&columns, preset.captions());
        let mut mapping = Mapping::new();
        let resolution = apply(&mut mapping, &suggestions, settings.matching.policy);

        println!("{} (captions: {preset})", dataset.file_name());
        println!("{}", columns_table(&columns));
        println!("{}", suggestions_table(&suggestions, &resolution));
        println!("{}", MappingStatus::of(&columns, &mapping));
        println!();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmap_model::InferredType;

    fn columns(names: &[&str]) -> Vec<Column> {
        names
            .iter()
            .enumerate()
            .map(|(index, name)| Column {
                name: (*name).to_string(),
                index,
                sample_values: Vec::new(),
                inferred_type: InferredType::Text,
            })
            .collect()
    }

    fn no_captions() -> CaptionArgs {
        CaptionArgs {
            captions: Vec::new(),
            preset: None,
        }
    }

    #[test]
    fn detected_preset_is_trimmed_to_column_count() {
        let columns = columns(&["customer_id", "full_name"]);
        let captions = captions_for(&no_captions(), &columns, &Settings::default()).unwrap();
        assert_eq!(captions.as_slice(), ["Customer Name", "Email Address"]);
    }

    #[test]
    fn detected_preset_caps_at_six() {
        let columns = columns(&["a", "b", "c", "d", "e", "f", "g", "h"]);
        let captions = captions_for(&no_captions(), &columns, &Settings::default()).unwrap();
        assert_eq!(captions.len(), 6);
        assert_eq!(captions.as_slice()[0], "Name");
    }

    #[test]
    fn named_preset_keeps_every_caption() {
        let args = CaptionArgs {
            captions: vec!["Notes".to_string()],
            preset: Some("products".to_string()),
        };
        let captions = captions_for(&args, &columns(&["x"]), &Settings::default()).unwrap();
        assert_eq!(captions.len(), 6);
        assert_eq!(captions.as_slice()[5], "Notes");
    }
}
