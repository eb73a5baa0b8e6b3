//! launchpad CLI: command-line entry point for the launchpad chat mock-up

use clap::{Parser, Subcommand, ValueEnum};
use launchpad_engine::{Config, Deployment, Message, OfferState, Session, TimerEvent};
use std::error::Error;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Chat-driven project launcher with a simulated deployment preview
#[derive(Parser)]
#[command(name = "launchpad")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file to load
    #[arg(long, global = true, default_value = DEFAULT_CONFIG)]
    config: PathBuf,

    /// Write logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the TUI (default when no command specified)
    Tui,

    /// Write the default config file
    Init {
        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },

    /// Play the scripted conversation for a prompt without a terminal UI
    Replay {
        /// The user message to send
        prompt: String,

        /// How to answer the deployment offer
        #[arg(long, value_enum, default_value_t = Answer::Yes)]
        answer: Answer,

        /// Speed-up factor applied to every delay
        #[arg(long, default_value_t = 1.0)]
        speed: f64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Answer {
    Yes,
    No,
}

const DEFAULT_CONFIG: &str = ".launchpad/config.json";

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        None | Some(Commands::Tui) => cmd_tui(&cli.config, cli.log_file.as_deref()),
        Some(Commands::Init { force }) => cmd_init(&cli.config, force),
        Some(Commands::Replay {
            prompt,
            answer,
            speed,
        }) => cmd_replay(&cli.config, cli.log_file.as_deref(), &prompt, answer, speed),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Install the tracing subscriber.
///
/// Logs go to `log_file` when given, otherwise to stderr if `stderr` is set.
/// With neither, logging stays off.
fn init_logging(log_file: Option<&Path>, stderr: bool) -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if let Some(path) = log_file {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .init();
    } else if stderr {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
    Ok(())
}

fn cmd_tui(config_path: &Path, log_file: Option<&Path>) -> Result<(), Box<dyn Error>> {
    // The alternate screen owns stdout and stderr, so only log to a file.
    init_logging(log_file, false)?;
    let config = Config::load_or_default(config_path)?;
    info!(config = %config_path.display(), "starting tui");

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(launchpad_tui::run_tui(config))
}

fn cmd_init(config_path: &Path, force: bool) -> Result<(), Box<dyn Error>> {
    if config_path.exists() && !force {
        println!(
            "Config already exists at {} (use --force to overwrite)",
            config_path.display()
        );
        return Ok(());
    }

    Config::default().save(config_path)?;
    println!("Created {}", config_path.display());
    Ok(())
}

fn cmd_replay(
    config_path: &Path,
    log_file: Option<&Path>,
    prompt: &str,
    answer: Answer,
    speed: f64,
) -> Result<(), Box<dyn Error>> {
    init_logging(log_file, true)?;
    let config = scaled(Config::load_or_default(config_path)?, speed)?;

    let rt = tokio::runtime::Runtime::new()?;
    let transcript = rt.block_on(replay(config, prompt, answer))?;
    for line in transcript {
        println!("{line}");
    }
    Ok(())
}

/// Divide every delay in `config` by `speed`.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn scaled(mut config: Config, speed: f64) -> Result<Config, Box<dyn Error>> {
    if !speed.is_finite() || speed <= 0.0 {
        return Err(format!("speed must be a positive number, got {speed}").into());
    }

    let scale = |ms: u64| ((ms as f64 / speed).round() as u64).max(1);
    config.ack_delay_ms = scale(config.ack_delay_ms);
    config.offer_delay_ms = scale(config.offer_delay_ms);
    config.step_duration_ms = scale(config.step_duration_ms);
    Ok(config)
}

/// Drive a session through one user turn and the answer to its offer.
///
/// Returns the transcript: one line per appended message, loader step and
/// the final preview address.
async fn replay(config: Config, prompt: &str, answer: Answer) -> Result<Vec<String>, Box<dyn Error>> {
    let mut session = Session::new(config);
    if !session.submit(prompt) {
        return Err("prompt is blank".into());
    }

    let mut transcript = Transcript::default();
    transcript.record(&session);

    while let Some(event) = session.next_timer().await {
        session.apply(event);
        transcript.record(&session);

        if matches!(event, TimerEvent::AssistantOffer { .. }) {
            let Some(offer) = session.controller().latest_open_offer() else {
                continue;
            };
            match answer {
                Answer::Yes => session.confirm_build(offer),
                Answer::No => session.decline_offer(offer),
            }
            transcript.record(&session);
            if answer == Answer::No {
                break;
            }
        }

        if session.controller().deployment() == Deployment::Deployed {
            break;
        }
    }

    session.dispose();
    Ok(transcript.lines)
}

/// Collects what changed in a session since the last call to `record`.
#[derive(Default)]
struct Transcript {
    lines: Vec<String>,
    messages: usize,
    step: Option<usize>,
    deployed: bool,
}

impl Transcript {
    fn record(&mut self, session: &Session) {
        let controller = session.controller();

        for (index, message) in controller.messages().iter().enumerate().skip(self.messages) {
            let open = controller
                .offer_state(index)
                .is_some_and(OfferState::is_open);
            self.lines.push(format_message(message, open));
        }
        self.messages = controller.messages().len();

        match controller.deployment() {
            Deployment::Idle => {}
            Deployment::Building => {
                let loader = controller.loader();
                if let Some(current) = loader.current() {
                    if self.step != Some(current) {
                        self.step = Some(current);
                        self.lines.push(format!(
                            "[{}/{}] {}",
                            current + 1,
                            loader.steps().len(),
                            loader.steps()[current].text
                        ));
                    }
                }
            }
            Deployment::Deployed => {
                if !self.deployed {
                    self.deployed = true;
                    self.lines
                        .push(format!("deployed: {}", controller.config().preview_url));
                }
            }
        }
    }
}

fn format_message(message: &Message, open: bool) -> String {
    let marker = if message.is_user { ">" } else { "<" };
    let actions = if message.show_buttons && open { " [Yes/No]" } else { "" };
    format!("{marker} {}{actions}", message.content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use tempfile::TempDir;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults_to_tui() {
        let cli = Cli::parse_from(["launchpad"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.config, PathBuf::from(DEFAULT_CONFIG));
        assert!(cli.log_file.is_none());
    }

    #[test]
    fn test_replay_arguments() {
        let cli = Cli::parse_from([
            "launchpad",
            "replay",
            "Build me a blog",
            "--answer",
            "no",
            "--speed",
            "10",
        ]);
        match cli.command {
            Some(Commands::Replay {
                prompt,
                answer,
                speed,
            }) => {
                assert_eq!(prompt, "Build me a blog");
                assert_eq!(answer, Answer::No);
                assert!((speed - 10.0).abs() < f64::EPSILON);
            }
            _ => panic!("expected replay"),
        }
    }

    #[test]
    fn test_scaled_divides_delays() {
        let config = scaled(Config::default(), 4.0).unwrap();
        assert_eq!(config.ack_delay_ms, 250);
        assert_eq!(config.offer_delay_ms, 250);
        assert_eq!(config.step_duration_ms, 500);

        assert!(scaled(Config::default(), 0.0).is_err());
        assert!(scaled(Config::default(), f64::NAN).is_err());
    }

    #[test]
    fn test_init_writes_config_once() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".launchpad").join("config.json");

        cmd_init(&path, false).unwrap();
        assert_eq!(Config::load(&path).unwrap(), Config::default());

        std::fs::write(&path, "{\"ack_delay_ms\": 5}").unwrap();
        cmd_init(&path, false).unwrap();
        assert_eq!(Config::load(&path).unwrap().ack_delay_ms, 5);

        cmd_init(&path, true).unwrap();
        assert_eq!(Config::load(&path).unwrap().ack_delay_ms, 1000);
    }

    #[tokio::test(start_paused = true)]
    async fn test_replay_yes_runs_to_deployment() {
        let lines = replay(Config::default(), "Build me a blog", Answer::Yes)
            .await
            .unwrap();

        assert_eq!(lines[0], "> Build me a blog");
        assert_eq!(
            lines[1],
            "< Thank you for your message! I'll help you with that."
        );
        assert!(lines[2].ends_with("[Yes/No]"));
        assert_eq!(lines[3], "[1/7] Gathering Project Requirements");
        assert_eq!(lines[9], "[7/7] Creating Visualisation");
        assert_eq!(lines[10], "deployed: https://example.com");
        assert_eq!(lines.len(), 11);
    }

    #[tokio::test(start_paused = true)]
    async fn test_replay_no_declines() {
        let lines = replay(Config::default(), "hi", Answer::No).await.unwrap();
        assert_eq!(lines.len(), 4);
        assert_eq!(
            lines[3],
            "< No problem. Let me know whenever you're ready to deploy."
        );
    }

    #[tokio::test]
    async fn test_replay_rejects_blank_prompt() {
        assert!(replay(Config::default(), "   ", Answer::Yes).await.is_err());
    }
}
