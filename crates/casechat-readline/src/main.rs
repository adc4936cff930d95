use std::borrow::Cow::{self, Borrowed, Owned};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use casechat_application::ChatController;
use casechat_core::ask::AskClient;
use casechat_core::markdown::MarkdownRenderer;
use casechat_core::view::MessageId;
use casechat_infrastructure::ConfigService;
use casechat_infrastructure::config_service::apply_overrides;
use casechat_interaction::{CommonMarkRenderer, HttpAskClient};

mod terminal_view;

use terminal_view::TerminalView;

const COMMANDS: &[&str] = &["/cite", "/example", "/help", "/history", "/reset", "/sources"];

#[derive(Parser, Debug)]
#[command(name = "casechat")]
#[command(about = "Terminal chat for the case-law question answering assistant", long_about = None)]
struct Args {
    /// Config file to read instead of ~/.config/casechat/config.toml
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Full URL of the backend's /ask endpoint
    #[arg(long, value_name = "URL")]
    endpoint: Option<String>,
}

/// A slash command typed at the prompt.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Reset,
    History,
    /// Sources of a message, or of the latest one.
    Sources(Option<u64>),
    /// Inline marker `[number]` of a message.
    Cite { message: u64, number: usize },
    /// 1-based example prompt.
    Example(usize),
    Help,
    Usage(&'static str),
    Unknown(String),
}

fn parse_command(line: &str) -> Command {
    let mut parts = line.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let args: Vec<&str> = parts.collect();

    match (name, args.as_slice()) {
        ("/reset", []) => Command::Reset,
        ("/history", []) => Command::History,
        ("/help", []) => Command::Help,
        ("/sources", []) => Command::Sources(None),
        ("/sources", [message]) => match message.trim_start_matches('#').parse::<u64>() {
            Ok(id) => Command::Sources(Some(id)),
            Err(_) => Command::Usage("/sources [message]"),
        },
        ("/cite", [message, number]) => {
            match (
                message.trim_start_matches('#').parse::<u64>(),
                number.parse::<usize>(),
            ) {
                (Ok(message), Ok(number)) if number > 0 => Command::Cite { message, number },
                _ => Command::Usage("/cite <message> <n>"),
            }
        }
        ("/cite", _) => Command::Usage("/cite <message> <n>"),
        ("/example", [number]) => match number.parse::<usize>() {
            Ok(number) if number > 0 => Command::Example(number),
            _ => Command::Usage("/example <n>"),
        },
        ("/example", _) => Command::Usage("/example <n>"),
        ("/sources", _) => Command::Usage("/sources [message]"),
        _ => Command::Unknown(name.to_string()),
    }
}

/// Rustyline helper: completes command names and `/example` numbers, hints
/// the rest of a command name and colors the command word.
#[derive(Clone)]
struct CliHelper {
    example_prompts: Vec<String>,
}

impl CliHelper {
    fn new(example_prompts: Vec<String>) -> Self {
        Self { example_prompts }
    }

    /// Completion start offset and candidates for the text before the cursor.
    fn candidates(&self, line: &str) -> (usize, Vec<Pair>) {
        if let Some(arg) = line.strip_prefix("/example ") {
            let typed = arg.trim_start();
            let start = line.len() - typed.len();
            let pairs = self
                .example_prompts
                .iter()
                .enumerate()
                .map(|(i, prompt)| ((i + 1).to_string(), prompt))
                .filter(|(number, _)| number.starts_with(typed))
                .map(|(number, prompt)| Pair {
                    display: format!("{number}  {prompt}"),
                    replacement: number,
                })
                .collect();
            return (start, pairs);
        }

        if !line.starts_with('/') || line.contains(' ') {
            return (0, Vec::new());
        }
        let pairs = COMMANDS
            .iter()
            .filter(|cmd| cmd.starts_with(line))
            .map(|cmd| Pair {
                display: cmd.to_string(),
                replacement: cmd.to_string(),
            })
            .collect();
        (0, pairs)
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        Ok(self.candidates(&line[..pos]))
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if !line.starts_with('/') {
            return Borrowed(line);
        }
        match line.split_once(' ') {
            Some((command, rest)) => Owned(format!("{} {}", command.bright_cyan(), rest)),
            None => Owned(line.bright_cyan().to_string()),
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];
        if !line.starts_with('/') || line.contains(' ') {
            return None;
        }
        COMMANDS
            .iter()
            .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
            .map(|cmd| cmd[line.len()..].to_string())
    }
}

impl Validator for CliHelper {}

fn print_help() {
    println!("{}", "Type a question to ask it. Commands:".bright_black());
    println!("  {}  start a new conversation", "/reset".bright_cyan());
    println!("  {}  list the questions asked so far", "/history".bright_cyan());
    println!(
        "  {}  show the sources of an answer (default: latest)",
        "/sources [message]".bright_cyan()
    );
    println!("  {}  show source [n] of an answer", "/cite <message> <n>".bright_cyan());
    println!("  {}  ask example prompt n", "/example <n>".bright_cyan());
    println!("  {}  leave", "quit".bright_cyan());
}

async fn run_command(controller: &mut ChatController<TerminalView>, command: Command) {
    match command {
        Command::Reset => controller.reset(),
        Command::History => controller.view().print_history(),
        Command::Sources(message) => {
            let Some(id) = message.map(MessageId).or_else(|| controller.latest_message_id()) else {
                println!("{}", "No answers yet.".bright_black());
                return;
            };
            if !controller.on_show_sources(id) {
                println!("{}", format!("No message #{}", id).yellow());
            }
        }
        Command::Cite { message, number } => {
            if !controller.on_citation_clicked(MessageId(message), number - 1) {
                println!("{}", format!("No source [{}] on message #{}", number, message).yellow());
            }
        }
        Command::Example(number) => {
            if !controller.send_example_prompt(number - 1).await {
                println!("{}", format!("No example prompt {}", number).yellow());
            }
        }
        Command::Help => print_help(),
        Command::Usage(usage) => println!("{}", format!("Usage: {}", usage).yellow()),
        Command::Unknown(name) => {
            println!("{}", format!("Unknown command {}. Type /help.", name).bright_black())
        }
    }
}

fn init_tracing() -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("casechat=info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// Entry point for the casechat REPL.
///
/// Loads the configuration, wires the HTTP client and Markdown renderer into
/// a [`ChatController`] over a [`TerminalView`], then reads questions and
/// commands until `quit` or end of input.
#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing()?;

    // ===== Configuration =====
    let config_service = match &args.config {
        Some(path) => ConfigService::with_path(path),
        None => ConfigService::new(),
    };
    let config = apply_overrides(config_service.get_config()?, args.endpoint);
    tracing::info!("[casechat] Using endpoint {}", config.endpoint);

    // ===== Controller =====
    let client: Arc<dyn AskClient> = Arc::new(HttpAskClient::from_config(&config));
    let markdown: Arc<dyn MarkdownRenderer> = Arc::new(CommonMarkRenderer::new());
    let mut controller = ChatController::new(TerminalView::new(), client, markdown, config);

    // ===== REPL Setup =====
    let mut rl = Editor::new()?;
    rl.set_helper(Some(CliHelper::new(controller.config().example_prompts.clone())));

    println!("{}", "=== casechat ===".bright_magenta().bold());
    println!("{}", "Type a question, '/help' for commands, or 'quit' to exit.".bright_black());
    println!();
    controller.start();

    // ===== Main REPL Loop =====
    loop {
        let initial = controller.view().input().to_string();
        let readline = rl.readline_with_initial(">> ", (&initial, ""));

        match readline {
            Ok(line) => {
                let trimmed = line.trim();

                if trimmed == "quit" || trimmed == "exit" {
                    println!("{}", "Goodbye!".bright_green());
                    break;
                }

                if trimmed.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(&line);

                if trimmed.starts_with('/') {
                    run_command(&mut controller, parse_command(trimmed)).await;
                    continue;
                }

                controller.on_input_changed(trimmed);
                controller.send(trimmed).await;
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    Ok(())
}
