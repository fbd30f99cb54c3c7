mod debug_report;

use clap::{Parser, Subcommand};
use std::io::{self, IsTerminal};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vyakarana::sandhi::JunctionContext;
use vyakarana::{Options, decline_with, derive_derivative_with, derive_inflection_with};

/// Step-by-step Paninian derivations.
#[derive(Parser, Debug)]
#[command(name = "vyakarana")]
#[command(version)]
struct Cli {
    /// Force ANSI color output.
    #[arg(long, global = true, conflicts_with = "no_color")]
    color: bool,

    /// Disable ANSI color output.
    #[arg(long, global = true)]
    no_color: bool,

    /// Keep pada-final voiced stops (skip 8.4.56).
    #[arg(long, global = true, env = "VYAKARANA_NO_DEVOICING")]
    no_devoicing: bool,

    /// Passes one registry phase may take.
    #[arg(long, global = true, default_value_t = 20)]
    max_passes: usize,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Inflect a stem for one case and number.
    Inflect {
        stem: String,
        /// 1-7, 8 for the vocative.
        case: u8,
        /// 1 singular, 2 dual, 3 plural.
        number: u8,
    },
    /// Print all 24 forms of a stem.
    Decline { stem: String },
    /// Derive root + krt suffix, e.g. `कृ तृच्`.
    Derive { root: String, suffix: String },
    /// List the members of a pratyahara, e.g. `अच्`.
    Pratyahara { name: String },
    /// Join two words.
    Join {
        left: String,
        right: String,
        /// The left word is a dual (1.1.11).
        #[arg(long)]
        dual: bool,
        /// The left word is an indeclinable (1.1.14, 1.1.15).
        #[arg(long)]
        indeclinable: bool,
    },
    /// Find the stems and cells that produce a form.
    Analyze { form: String },
}

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let color = if cli.color {
        true
    } else if cli.no_color {
        false
    } else {
        io::stdout().is_terminal()
    };
    let options = Options { final_devoicing: !cli.no_devoicing, max_passes: cli.max_passes };

    let outcome = match &cli.command {
        Command::Inflect { stem, case, number } => {
            derive_inflection_with(stem, *case, *number, &options).map(|d| debug_report::print_derivation(&d, color))
        }
        Command::Derive { root, suffix } => {
            derive_derivative_with(root, suffix, &options).map(|d| debug_report::print_derivation(&d, color))
        }
        Command::Decline { stem } => {
            decline_with(stem, &options).map(|cells| debug_report::print_table(stem, &cells, color))
        }
        Command::Pratyahara { name } => {
            vyakarana::resolve_pratyahara(name).map(|set| debug_report::print_pratyahara(name, &set, color))
        }
        Command::Join { left, right, dual, indeclinable } => {
            let mut ctx = JunctionContext::empty();
            ctx.set(JunctionContext::DUAL_LEFT, *dual);
            ctx.set(JunctionContext::INDECLINABLE_LEFT, *indeclinable);
            println!("{}", vyakarana::join_words_with(left, right, ctx));
            Ok(())
        }
        Command::Analyze { form } => {
            debug_report::print_analyses(form, &vyakarana::reverse_lookup(form), color);
            Ok(())
        }
    };

    if let Err(err) = outcome {
        eprintln!("error: {err}");
        let code = match err {
            vyakarana::Error::MalformedInput(_) | vyakarana::Error::UnknownSuffixAddress { .. } => 2,
            _ => 1,
        };
        std::process::exit(code);
    }
}
