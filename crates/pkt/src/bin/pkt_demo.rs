#![forbid(unsafe_code)]

//! Packet terminal demo: compose a message field by field, confirm it, then
//! take commands at the prompt until `bye` or end of input.

use std::env;
use std::io::{Read, Write};
use std::process::ExitCode;

use pkt::Color;
use pkt::prelude::*;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_TEXT: &str = "\
pkt-demo: packet terminal editor demo

USAGE:
    pkt-demo [OPTIONS]

OPTIONS:
    --json-logs      Log as JSON lines (needs the tracing-json feature)
    --help, -h       Show this help message
    --version, -V    Show version

COMMANDS:
    list             Show queued messages
    send             Compose another message
    help             Show the command list
    bye              Quit

ENVIRONMENT VARIABLES:
    PKT_PROMPT       Override the command prompt
    PKT_LOG          Log filter directive, e.g. pkt_edit=debug";

const COMMAND_HELP: &str = "usage: list | send | help | bye";

const PRIORITIES: [&str; 3] = ["ROUTINE", "PRIORITY", "IMMEDIATE"];

/// Parsed command-line options.
#[derive(Default)]
struct Opts {
    json_logs: bool,
}

enum Parsed {
    Run(Opts),
    Exit(ExitCode),
}

fn parse_args() -> Parsed {
    let mut opts = Opts::default();
    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--json-logs" => opts.json_logs = true,
            "--help" | "-h" => {
                println!("{HELP_TEXT}");
                return Parsed::Exit(ExitCode::SUCCESS);
            }
            "--version" | "-V" => {
                println!("pkt-demo {VERSION}");
                return Parsed::Exit(ExitCode::SUCCESS);
            }
            other => {
                eprintln!("Unknown argument: {other}");
                eprintln!("Run with --help for usage information.");
                return Parsed::Exit(ExitCode::from(2));
            }
        }
    }
    Parsed::Run(opts)
}

fn init_logging(opts: &Opts) {
    #[cfg(feature = "tracing-json")]
    {
        pkt::core::logging::init_subscriber(opts.json_logs);
    }
    #[cfg(not(feature = "tracing-json"))]
    {
        if opts.json_logs {
            eprintln!("pkt-demo was built without the tracing-json feature; logging is off");
        }
    }
}

fn require_callsign(value: &str) -> Option<String> {
    let call = value.trim();
    if call.is_empty() {
        return Some("a destination call sign is required".to_owned());
    }
    if !call.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-') {
        return Some(format!("{call} is not a call sign (letters, digits and '-' only)"));
    }
    None
}

/// A message being composed.
struct Draft {
    fields: [SimpleField; 4],
}

impl Draft {
    fn new() -> Self {
        Self {
            fields: [
                SimpleField::new("To", "")
                    .with_width(10)
                    .with_hint("call sign")
                    .with_validator(require_callsign)
                    .with_help("The call sign of the station the message is for."),
                SimpleField::new("Subject", "").with_help("One line describing the message."),
                SimpleField::new("Priority", PRIORITIES[0])
                    .with_choices(PRIORITIES)
                    .with_help("Use the arrow keys to pick a precedence."),
                SimpleField::new("Body", "")
                    .multiline()
                    .with_help("The message text. Press Enter three times at the end to finish."),
            ],
        }
    }

    fn label_width(&self) -> usize {
        self.fields.iter().map(|f| f.label().len()).max().unwrap_or(0)
    }

    fn summary(&self) -> String {
        let [to, subject, priority, _] = &self.fields;
        format!("{:<10} {:<10} {}", to.get(), priority.get(), subject.get())
    }
}

/// Walk the draft's fields until the user leaves the last one or presses
/// ESC.
fn compose<R: Read, W: Write>(term: &mut Terminal<R, W>, draft: &mut Draft) -> Result<()> {
    let editor = FieldEditor::new(draft.label_width());
    FieldEditor::start(term)?;
    let mut index = 0;
    while index < draft.fields.len() {
        match editor.edit_validated(term, &mut draft.fields[index])? {
            EditResult::Next => index += 1,
            EditResult::Previous => index = index.saturating_sub(1),
            EditResult::Done | EditResult::Eof => break,
        }
    }
    Ok(())
}

fn send<R: Read, W: Write>(term: &mut Terminal<R, W>, queue: &mut Vec<String>) -> Result<()> {
    let mut draft = Draft::new();
    if !term.info().interactive() {
        // Piped input is the body of a message to the default destination.
        let [to, .., body] = &mut draft.fields;
        to.apply("ALL");
        FieldEditor::new(0).edit(term, body)?;
        queue.push(draft.summary());
        return Ok(());
    }
    compose(term, &mut draft)?;
    let editor = FieldEditor::new(draft.label_width());
    if editor.confirm(term, "Send this message?", true)? {
        queue.push(draft.summary());
        term.status(&format!("Message {} queued", queue.len()))?;
    } else {
        term.status("Message discarded")?;
    }
    Ok(())
}

fn list<R, W: Write>(term: &mut Terminal<R, W>, queue: &[String]) -> Result<()> {
    term.clear_status()?;
    if queue.is_empty() {
        term.print(Color::INHERIT, "No messages queued\n")?;
        return Ok(());
    }
    for (n, line) in queue.iter().enumerate() {
        term.print(Color::INHERIT, &format!("{:>3} {line}\n", n + 1))?;
    }
    Ok(())
}

fn run(opts: &Opts) -> Result<()> {
    init_logging(opts);
    let mut term = Terminal::stdio_with_config(EditorConfig::from_env());
    let mut queue = Vec::new();
    let mut reader = CommandLineReader::new();

    send(&mut term, &mut queue)?;
    loop {
        let line = match reader.read_command(&mut term) {
            Ok(line) => line,
            Err(pkt::EditError::InputClosed) => break,
            Err(err) => return Err(err.into()),
        };
        match line.trim().to_ascii_lowercase().as_str() {
            "" => {}
            "list" | "l" => list(&mut term, &queue)?,
            "send" | "s" => send(&mut term, &mut queue)?,
            "help" | "?" => term.error(COMMAND_HELP)?,
            "bye" | "b" | "quit" | "q" => break,
            other => term.error(&format!("unknown command {other:?}; try help"))?,
        }
    }
    term.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    let opts = match parse_args() {
        Parsed::Run(opts) => opts,
        Parsed::Exit(code) => return code,
    };
    match run(&opts) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) if err.is_user_exit() => ExitCode::from(130),
        Err(err) => {
            eprintln!("pkt-demo: {err}");
            ExitCode::FAILURE
        }
    }
}
