//! Main entry point for the picture-rank tool
//!
//! Ranks the pictures of a directory by asking which of two is better,
//! keeping Elo ratings in a JSON file next to the pictures.

use anyhow::Result;
use clap::{Parser, Subcommand};
use picture_rank::config::{AppConfig, ConfigOverrides};
use picture_rank::prompt::{parse_command, PromptCommand, HELP};
use picture_rank::rating::leaderboard::render_line;
use picture_rank::rating::JsonFileStorage;
use picture_rank::{Choice, RankingError, RankingSession, Standing};
use rand::rngs::ThreadRng;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::{error, info};

type PictureSession = RankingSession<JsonFileStorage, ThreadRng>;

/// Picture Rank - sort pictures by comparing them two at a time
#[derive(Parser)]
#[command(
    name = "picture-rank",
    version,
    about = "Rank pictures by pairwise comparison",
    long_about = "Picture Rank shows two pictures of a directory at a time and asks which one \
                 is better. Every answer updates Elo ratings, which are kept in a JSON file \
                 inside the directory between sessions."
)]
struct Args {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// K-factor override
    #[arg(long, value_name = "K", help = "Override the Elo K-factor")]
    k_factor: Option<f64>,

    /// Default rating override
    #[arg(long, value_name = "RATING", help = "Override the rating of new pictures")]
    default_rating: Option<f64>,

    /// Ratings file override
    #[arg(
        long,
        value_name = "NAME",
        help = "Override the ratings file name inside the directory"
    )]
    ratings_file: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare pictures interactively
    Compare {
        /// Directory containing the pictures
        directory: PathBuf,
        /// Save after every N answers (0 saves only on quit)
        #[arg(long, value_name = "N")]
        autosave_every: Option<u64>,
    },
    /// Print the current ranking
    Best {
        /// Directory containing the pictures
        directory: PathBuf,
        /// Number of pictures to show (all if omitted)
        #[arg(short, long, value_name = "N")]
        top: Option<usize>,
    },
    /// List tracked pictures and whether their rating was restored
    List {
        /// Directory containing the pictures
        directory: PathBuf,
    },
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Load configuration from file or environment, merge CLI arguments and validate
fn load_config(args: &Args) -> Result<AppConfig> {
    let autosave_every = match &args.command {
        Commands::Compare { autosave_every, .. } => *autosave_every,
        _ => None,
    };
    let overrides = ConfigOverrides {
        log_level: args.log_level.clone(),
        k_factor: args.k_factor,
        default_rating: args.default_rating,
        ratings_file: args.ratings_file.clone(),
        autosave_every,
    };

    AppConfig::load(args.config.as_deref(), &overrides)
}

fn print_standings(standings: &[Standing]) {
    for standing in standings {
        println!("{:>4}. {}", standing.position, render_line(standing));
    }
}

fn print_pair(session: &PictureSession) {
    if let Some((first, second)) = session.current_pair() {
        println!();
        println!("  [1] {}", first);
        println!("  [2] {}", second);
    }
}

/// Interactive comparison loop; returns when the user quits or input ends
fn run_compare(mut session: PictureSession) -> Result<()> {
    if let Err(e) = session.next_pair() {
        if let Some(RankingError::InsufficientItems { count }) = e.downcast_ref::<RankingError>() {
            println!("Nothing to compare: {} picture(s) found", count);
            return Ok(());
        }
        return Err(e);
    }

    println!("Which picture is better? Type h for help.");
    print_pair(&session);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(message) => {
                println!("{}", message);
                continue;
            }
        };

        match command {
            PromptCommand::Choose(choice) => {
                let update = match session.record(choice) {
                    Ok(update) => update,
                    Err(e) => {
                        // The outcome is applied even when the autosave fails
                        println!("{:#}", e);
                        print_pair(&session);
                        continue;
                    }
                };
                if let Some(update) = update {
                    let winner = match choice {
                        Choice::First => Some(&update.first),
                        Choice::Second => Some(&update.second),
                        Choice::Draw => None,
                    };
                    match winner {
                        Some(change) => println!(
                            "{} gains {:.1} ({:.0} -> {:.0})",
                            change.item_id,
                            change.delta(),
                            change.old_rating,
                            change.new_rating
                        ),
                        None => println!("Draw"),
                    }
                }
                print_pair(&session);
            }
            PromptCommand::ReplaceFirst(item_id) => {
                if let Some((_, second)) = session.current_pair().cloned() {
                    match session.show_pair(&item_id, &second) {
                        Ok(()) => print_pair(&session),
                        Err(e) => println!("{}", e),
                    }
                }
            }
            PromptCommand::ReplaceSecond(item_id) => {
                if let Some((first, _)) = session.current_pair().cloned() {
                    match session.show_pair(&first, &item_id) {
                        Ok(()) => print_pair(&session),
                        Err(e) => println!("{}", e),
                    }
                }
            }
            PromptCommand::Top(limit) => print_standings(&session.leaderboard(limit)),
            PromptCommand::Save => match session.save() {
                Ok(()) => println!("Saved"),
                Err(e) => println!("{:#}", e),
            },
            PromptCommand::Help => println!("{}", HELP),
            PromptCommand::Quit => break,
        }
    }

    session.close()?;
    println!("Ratings saved");
    Ok(())
}

fn run(args: &Args, config: &AppConfig) -> Result<()> {
    match &args.command {
        Commands::Compare { directory, .. } => {
            info!("Ranking pictures in {}", directory.display());
            run_compare(RankingSession::open(directory, config)?)
        }
        Commands::Best { directory, top } => {
            let session = RankingSession::open(directory, config)?;
            print_standings(&session.leaderboard(*top));
            Ok(())
        }
        Commands::List { directory } => {
            let session = RankingSession::open(directory, config)?;
            for (item_id, entry) in session.store().iter() {
                let source = if session.is_restored(item_id) {
                    "restored"
                } else {
                    "new"
                };
                println!("{:>8.1}  {:<8}  {}", entry.rating, source, item_id);
            }
            Ok(())
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(&args, &config) {
        error!("{:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
