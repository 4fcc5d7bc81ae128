//! spellbinder CLI: a rule-based magical chatbot.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;

use spellbinder::data::Catalogs;
use spellbinder::engine::Responder;
use spellbinder::session::DialogueSession;

#[derive(Parser)]
#[command(name = "spellbinder", version, about = "Rule-based conversational responder")]
struct Cli {
    /// Directory containing the CSV catalogs.
    #[arg(long, global = true, default_value = "data")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive chat session on stdin/stdout.
    Chat {
        /// Seed the random source for reproducible quiz/movie picks.
        #[arg(long)]
        seed: Option<u64>,

        /// Write the conversation transcript as JSON on exit.
        #[arg(long)]
        transcript: Option<PathBuf>,
    },

    /// Show catalog and pool sizes.
    Info,
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let catalogs = Catalogs::load_dir(&cli.data_dir)?;

    match cli.command {
        Commands::Chat { seed, transcript } => {
            let mut responder = match seed {
                Some(seed) => Responder::with_rng(
                    catalogs.commands,
                    catalogs.phrases,
                    catalogs.trivia,
                    catalogs.riddles,
                    Box::new(StdRng::seed_from_u64(seed)),
                ),
                None => Responder::new(
                    catalogs.commands,
                    catalogs.phrases,
                    catalogs.trivia,
                    catalogs.riddles,
                ),
            };
            chat_loop(&mut responder, transcript.as_deref())?;
        }

        Commands::Info => {
            println!("commands: {}", catalogs.commands.len());
            println!("phrases:  {}", catalogs.phrases.len());
            println!("trivia:   {}", catalogs.trivia.len());
            println!("riddles:  {}", catalogs.riddles.len());
        }
    }

    Ok(())
}

fn chat_loop(responder: &mut Responder, transcript_path: Option<&std::path::Path>) -> Result<()> {
    let mut session = DialogueSession::new();
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();

    println!("SpellBinder awaits. Enter a spell or question (Ctrl-D to leave).");
    loop {
        print!("you> ");
        stdout.flush().into_diagnostic()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).into_diagnostic()? == 0 {
            break; // EOF
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match responder.handle_message(&mut session, line) {
            Ok(reply) => println!("spellbinder> {reply}"),
            Err(err) => eprintln!("spellbinder> {err}"),
        }
    }

    if let Some(path) = transcript_path {
        let json = serde_json::to_string_pretty(session.transcript()).into_diagnostic()?;
        std::fs::write(path, json).into_diagnostic()?;
        println!("transcript written to {}", path.display());
    }

    Ok(())
}
