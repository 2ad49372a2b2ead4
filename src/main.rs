use ai_interview::capture::{CaptureScript, SimulatedCaptureSource, TrackKind};
use ai_interview::catalog::{default_questions, fixture_interviews, InterviewCatalog};
use ai_interview::session::{format_clock, Event, Guard, InterviewSession, Phase, SessionError};
use ai_interview::{create_router, AppState, Config, QuestionBank};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "ai-interview", version, about = "AI interview sessions")]
struct Cli {
    /// Config file path (extension optional)
    #[arg(long, default_value = "config/ai-interview")]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve the interview HTTP API
    Serve,
    /// Take an interview in the terminal
    Run {
        /// Interview id from the catalog
        #[arg(long, default_value = "1")]
        interview: String,

        /// Deny the first camera/microphone request
        #[arg(long)]
        deny_first: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = match cli.command {
        Command::Serve => "info",
        Command::Run { .. } => "warn",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    let cfg = Config::load(&cli.config)?;

    match cli.command {
        Command::Serve => serve(&cfg).await,
        Command::Run {
            interview,
            deny_first,
        } => run_console(&cfg, &interview, deny_first).await,
    }
}

fn question_bank(cfg: &Config) -> QuestionBank {
    QuestionBank::with_limit(
        default_questions(),
        cfg.interview.question_limit,
        cfg.interview.text_questions,
    )
}

async fn serve(cfg: &Config) -> Result<()> {
    info!("{} v{}", cfg.service.name, env!("CARGO_PKG_VERSION"));

    let state = AppState::new(
        InterviewCatalog::new(fixture_interviews()),
        question_bank(cfg),
        cfg.interview.session_config(),
    );

    let addr = format!("{}:{}", cfg.service.http.bind, cfg.service.http.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("HTTP server listening on {}", addr);

    axum::serve(listener, create_router(state))
        .await
        .context("HTTP server failed")
}

async fn run_console(cfg: &Config, interview_id: &str, deny_first: bool) -> Result<()> {
    let catalog = InterviewCatalog::new(fixture_interviews());
    let interview = match catalog.find(interview_id) {
        Ok(interview) => interview,
        Err(e) => {
            println!("{}", e);
            return Ok(());
        }
    };

    let mut session = InterviewSession::new(
        interview,
        Arc::new(question_bank(cfg)),
        cfg.interview.session_config(),
    );
    let script = if deny_first {
        CaptureScript::deny_first(1)
    } else {
        CaptureScript::grant()
    };
    let mut source = SimulatedCaptureSource::new(script);

    let overview = session.state().overview();
    println!("AI Interview: {} at {}", interview.job_title, interview.company);
    println!(
        "  1. {} text questions\n  2. {} video questions\n  About {} minutes in total.",
        overview.text_questions, overview.video_questions, overview.estimated_minutes
    );
    println!("Press Enter to start.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while !session.phase().is_terminal() {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read stdin")? else {
                    break;
                };
                handle_input(&mut session, &mut source, line).await;
            }
            Some(event) = session.next_event() => {
                let kind = EventKind::of(&event);
                if session.dispatch(event).is_applied() {
                    render(&session, kind);
                }
            }
        }
    }

    match session.take_completion() {
        Some(completion) => {
            println!("\nInterview complete, {} answers recorded.", completion.answers.len());
            println!("Results: {}", completion.results_path);
        }
        None => println!("\nInterview left before completion."),
    }

    Ok(())
}

async fn handle_input(session: &mut InterviewSession, source: &mut SimulatedCaptureSource, line: String) {
    let result = match session.phase() {
        Phase::Intro => session.command(Event::Start),
        Phase::TextPhase => session.command(Event::Submit { text: line }),
        Phase::VideoPermission => session.request_capture(source).await,
        Phase::VideoPhase => match line.trim() {
            "" => session.command(Event::Advance),
            "/video" => session.command(Event::ToggleTrack(TrackKind::Video)),
            "/mic" => session.command(Event::ToggleTrack(TrackKind::Audio)),
            text => session.command(Event::Caption {
                text: text.to_string(),
            }),
        },
        Phase::Completed | Phase::Abandoned => Ok(()),
    };

    match result {
        Ok(()) => {
            if session.phase() == Phase::VideoPermission {
                println!("\nVideo interview: camera and microphone access is needed. Press Enter to allow.");
            }
        }
        Err(SessionError::Rejected(Guard::StillSpeaking)) => {
            println!("Please wait for the question to finish.")
        }
        Err(SessionError::Rejected(Guard::EmptyAnswer)) => println!("Please type an answer."),
        Err(SessionError::PermissionDenied(_)) => {
            if let Some(notice) = session.state().notice() {
                println!("{}", notice);
            }
            println!("Press Enter to try again.");
        }
        Err(e) => println!("{}", e),
    }
}

#[derive(Debug, Clone, Copy)]
enum EventKind {
    Reveal,
    RevealDone,
    Tick,
    Other,
}

impl EventKind {
    fn of(event: &Event) -> Self {
        match event {
            Event::RevealProgress { .. } => EventKind::Reveal,
            Event::RevealFinished { .. } => EventKind::RevealDone,
            Event::Tick { .. } => EventKind::Tick,
            _ => EventKind::Other,
        }
    }
}

fn render(session: &InterviewSession, kind: EventKind) {
    let state = session.state();

    match kind {
        EventKind::Reveal => {
            if state.transcript().chars().count() == 1 {
                if let Some(progress) = state.progress() {
                    println!("\n[{}]", progress.label());
                }
            }
            print!("\rInterviewer: {}", state.transcript());
            std::io::stdout().flush().ok();
        }
        EventKind::RevealDone => match state.phase() {
            Phase::TextPhase => println!("\nType your answer and press Enter:"),
            Phase::VideoPhase => println!(
                "\nSpeak (type captions), Enter for next question, /video or /mic to toggle. {} left",
                state.remaining_secs().map(format_clock).unwrap_or_default()
            ),
            _ => println!(),
        },
        EventKind::Tick => {
            if let Some(remaining) = state.remaining_secs() {
                if remaining % 30 == 0 || remaining <= 10 {
                    println!("  {} left", format_clock(remaining));
                }
            }
        }
        EventKind::Other => {}
    }
}
