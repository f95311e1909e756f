use clap::{Args, Subcommand};
use serde::{Deserialize, Serialize};

use deckhand::cast::play::PlayOutput;
use deckhand::cast::{self, Cast, EventCode};
use deckhand::defaults;
use deckhand::log_status;

use super::{expand_path, read_json_spec_to_string, CmdResult};

#[derive(Args)]
pub struct CastArgs {
    #[command(subcommand)]
    pub(crate) command: CastCommand,
}

#[derive(Subcommand)]
pub(crate) enum CastCommand {
    /// Compose a cast from a JSON step script
    Compose {
        /// JSON script (positional, supports @file and - for stdin)
        spec: Option<String>,

        /// Explicit JSON script (takes precedence over positional)
        #[arg(long, value_name = "JSON")]
        json: Option<String>,

        /// Write the cast to this file instead of stdout
        #[arg(long, value_name = "FILE")]
        out: Option<String>,
    },
    /// Summarize a cast file
    Inspect {
        /// Cast file path
        file: String,

        /// Treat the stream as header-less
        #[arg(long)]
        no_header: bool,
    },
    /// Dump the decoded event log
    Events {
        /// Cast file path
        file: String,

        /// Treat the stream as header-less
        #[arg(long)]
        no_header: bool,
    },
    /// Concatenate two casts, shifting the second past the first
    Append {
        /// Base cast file
        base: String,

        /// Cast file to append
        extra: String,

        /// Write the combined cast to this file instead of stdout
        #[arg(long, value_name = "FILE")]
        out: Option<String>,
    },
    /// Play a cast file in the terminal (requires a TTY)
    Play {
        /// Cast file path
        file: String,
    },
}

/// Whether this invocation prints raw cast text instead of the JSON envelope.
pub fn is_raw_cast(args: &CastArgs) -> bool {
    matches!(
        args.command,
        CastCommand::Compose { out: None, .. } | CastCommand::Append { out: None, .. }
    )
}

pub fn is_interactive(args: &CastArgs) -> bool {
    matches!(args.command, CastCommand::Play { .. })
}

// ============================================================================
// Compose script
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct ComposeScript {
    width: Option<u16>,
    height: Option<u16>,
    keystroke_delay_ms: Option<u64>,
    /// Stamp the header with the current time
    #[serde(default)]
    timestamp: bool,
    #[serde(default)]
    steps: Vec<Step>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
enum Step {
    /// Simulated human typing, one output event per character
    Type { text: String },
    /// Press Enter
    Enter,
    /// Verbatim terminal output at the current clock
    Output { text: String },
    /// A raw input event
    Input { text: String },
    /// Advance the clock
    Wait { ms: u64 },
    /// A named marker
    Marker { label: String },
    /// A terminal resize
    Resize { width: u16, height: u16 },
}

fn build_cast(script: ComposeScript) -> Cast {
    let config = defaults::load_defaults().cast;

    let mut cast = Cast::new()
        .with_size(
            script.width.unwrap_or(config.width),
            script.height.unwrap_or(config.height),
        )
        .with_keystroke_delay_ms(script.keystroke_delay_ms.unwrap_or(config.keystroke_delay_ms));
    if script.timestamp {
        cast = cast.with_timestamp_now();
    }

    for step in script.steps {
        match step {
            Step::Type { text } => {
                cast.keystrokes(&text);
            }
            Step::Enter => {
                cast.enter();
            }
            Step::Output { text } => {
                cast.print(text);
            }
            Step::Input { text } => {
                cast.input(text);
            }
            Step::Wait { ms } => {
                cast.pause(ms);
            }
            Step::Marker { label } => {
                cast.marker(label);
            }
            Step::Resize { width, height } => {
                cast.resize(width, height);
            }
        }
    }

    cast
}

fn parse_script(spec: Option<&str>, json: Option<&str>) -> deckhand::Result<ComposeScript> {
    let spec = json.or(spec).ok_or_else(|| {
        deckhand::Error::validation_missing_argument(vec!["spec".to_string()])
    })?;
    let raw = read_json_spec_to_string(spec)?;
    serde_json::from_str(&raw).map_err(|e| {
        deckhand::Error::validation_invalid_json(e, Some("parse compose script".to_string()))
    })
}

fn load_cast(file: &str, no_header: bool) -> deckhand::Result<Cast> {
    let path = expand_path(file);
    let contents = deckhand::io::read_to_string(&path)?;
    cast::decode(&contents, !no_header)
}

// ============================================================================
// Outputs
// ============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComposeOutput {
    pub path: String,
    pub width: u16,
    pub height: u16,
    pub events: usize,
    pub duration_ms: u64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventCounts {
    pub output: usize,
    pub input: usize,
    pub marker: usize,
    pub resize: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectOutput {
    pub file: String,
    pub version: u32,
    pub width: u16,
    pub height: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    pub events: usize,
    pub duration_ms: u64,
    pub monotonic: bool,
    pub counts: EventCounts,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventsOutput {
    pub file: String,
    pub events: Vec<cast::Event>,
}

#[derive(Serialize)]
#[serde(untagged)]
pub enum CastOutput {
    Compose(ComposeOutput),
    Inspect(InspectOutput),
    Events(EventsOutput),
    Play(PlayOutput),
}

fn count(cast: &Cast, code: EventCode) -> usize {
    cast.events.iter().filter(|e| e.code == code).count()
}

fn inspect(file: String, cast: &Cast) -> InspectOutput {
    InspectOutput {
        file,
        version: cast.header.version,
        width: cast.header.width,
        height: cast.header.height,
        timestamp: cast.header.timestamp,
        events: cast.events.len(),
        duration_ms: cast.duration_ms(),
        monotonic: cast.is_monotonic(),
        counts: EventCounts {
            output: count(cast, EventCode::Output),
            input: count(cast, EventCode::Input),
            marker: count(cast, EventCode::Marker),
            resize: count(cast, EventCode::Resize),
        },
    }
}

// ============================================================================
// Entry points
// ============================================================================

/// Raw mode: compose/append without --out print the cast text itself.
pub fn run_raw(args: CastArgs) -> deckhand::Result<(String, i32)> {
    match args.command {
        CastCommand::Compose { spec, json, out: None } => {
            let script = parse_script(spec.as_deref(), json.as_deref())?;
            let cast = build_cast(script);
            Ok((cast::encode(&cast)?, 0))
        }
        CastCommand::Append { base, extra, out: None } => {
            let mut combined = load_cast(&base, false)?;
            let extra = load_cast(&extra, false)?;
            combined.append(&extra);
            Ok((cast::encode(&combined)?, 0))
        }
        _ => Err(deckhand::Error::validation_invalid_argument(
            "output_mode",
            "Command does not support raw output",
            None,
            None,
        )),
    }
}

pub fn run(args: CastArgs, _global: &crate::commands::GlobalArgs) -> CmdResult<CastOutput> {
    match args.command {
        CastCommand::Compose { spec, json, out } => {
            let out = out.ok_or_else(|| {
                deckhand::Error::validation_missing_argument(vec!["out".to_string()])
            })?;
            let script = parse_script(spec.as_deref(), json.as_deref())?;
            let cast = build_cast(script);
            let path = expand_path(&out);
            deckhand::io::write(&path, &cast::encode(&cast)?)?;
            log_status!("cast", "Composed {} events ({}ms)", cast.events.len(), cast.duration_ms());

            let output = ComposeOutput {
                path: path.display().to_string(),
                width: cast.header.width,
                height: cast.header.height,
                events: cast.events.len(),
                duration_ms: cast.duration_ms(),
            };
            Ok((CastOutput::Compose(output), 0))
        }
        CastCommand::Inspect { file, no_header } => {
            let cast = load_cast(&file, no_header)?;
            Ok((CastOutput::Inspect(inspect(file, &cast)), 0))
        }
        CastCommand::Events { file, no_header } => {
            let cast = load_cast(&file, no_header)?;
            let output = EventsOutput {
                file,
                events: cast.events,
            };
            Ok((CastOutput::Events(output), 0))
        }
        CastCommand::Append { base, extra, out } => {
            let out = out.ok_or_else(|| {
                deckhand::Error::validation_missing_argument(vec!["out".to_string()])
            })?;
            let mut combined = load_cast(&base, false)?;
            let extra_cast = load_cast(&extra, false)?;
            combined.append(&extra_cast);
            let path = expand_path(&out);
            deckhand::io::write(&path, &cast::encode(&combined)?)?;

            let output = ComposeOutput {
                path: path.display().to_string(),
                width: combined.header.width,
                height: combined.header.height,
                events: combined.events.len(),
                duration_ms: combined.duration_ms(),
            };
            Ok((CastOutput::Compose(output), 0))
        }
        CastCommand::Play { file } => {
            // Validate before handing the file to the player
            let path = expand_path(&file);
            let contents = deckhand::io::read_to_string(&path)?;
            cast::decode(&contents, true)?;

            let player = defaults::load_defaults().play.player;
            let output = deckhand::cast::play::play_file(&player, &path)?;
            let exit_code = output.exit_code;
            Ok((CastOutput::Play(output), exit_code))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_steps_drive_the_builder() {
        let script: ComposeScript = serde_json::from_str(
            r#"{
                "width": 100,
                "height": 30,
                "keystrokeDelayMs": 50,
                "steps": [
                    {"type": "wait", "ms": 1000},
                    {"type": "type", "text": "ls"},
                    {"type": "enter"},
                    {"type": "output", "text": "total 0\r\n"},
                    {"type": "marker", "label": "listing"}
                ]
            }"#,
        )
        .unwrap();

        let cast = build_cast(script);
        assert_eq!(cast.header.width, 100);
        assert_eq!(cast.header.height, 30);
        // 2 keystrokes + enter + output + marker
        assert_eq!(cast.events.len(), 5);
        assert_eq!(cast.duration_ms(), 1000 + 2 * 50 + 50);
        assert!(cast.is_monotonic());
    }

    #[test]
    fn unknown_step_type_is_rejected() {
        let result: Result<ComposeScript, _> =
            serde_json::from_str(r#"{"steps": [{"type": "explode"}]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn compose_without_spec_is_a_validation_error() {
        let err = parse_script(None, None).unwrap_err();
        assert_eq!(err.code, deckhand::ErrorCode::ValidationMissingArgument);
    }
}
