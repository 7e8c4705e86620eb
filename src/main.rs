//! prospect-sim CLI
//!
//! Usage:
//!   prospect-sim --rating 1850 --focus price        # Interactive call
//!   prospect-sim --toughness 9 --seed 42             # Reproducible prospect
//!   prospect-sim --resume snapshots/session_x_t4.json
//!   prospect-sim --serve                             # HTTP API server
//!   prospect-sim --json                              # JSON directives

use clap::Parser;
use colored::Colorize;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use prospect_sim::core::{
    build_profile, load_and_validate_snapshot, new_session_id, run_server, save_snapshot,
    CallSession, TurnParser,
};
use prospect_sim::types::{ObjectionKind, PersonaRequest, TurnDirective};
use prospect_sim::{EngineConfig, EngineError, VERSION};

#[derive(Parser, Debug)]
#[command(
    name = "prospect-sim",
    version = VERSION,
    about = "Simulated sales prospect for call practice",
    long_about = "prospect-sim drives a simulated prospect whose mood, objections and\n\
                  willingness to close evolve turn by turn.\n\n\
                  Each line you type is one representative turn:\n  \
                  interrupts activeListening t=12 poor\n\n\
                  Triggers:\n  \
                  activeListening interrupts provesROI ignoresObjection mirrorsDISC\n  \
                  pushesPriceEarly handlesObjectionGracefully poorDiscovery\n  \
                  asksOpenQuestion attemptsClose\n\n\
                  Type 'cancel' to end the call or 'quit' to leave it resumable."
)]
struct Args {
    /// Skill rating (overrides --toughness)
    #[arg(short, long, allow_hyphen_values = true)]
    rating: Option<i64>,

    /// Toughness hint 1-10
    #[arg(short, long)]
    toughness: Option<u8>,

    /// Seed for every random draw
    #[arg(long)]
    seed: Option<u64>,

    /// Objection the prospect leads with
    #[arg(short, long, default_value = "price")]
    focus: String,

    /// Resume from a snapshot file
    #[arg(long)]
    resume: Option<PathBuf>,

    /// Run as HTTP API server
    #[arg(short, long)]
    serve: bool,

    /// Server address (default from config: 127.0.0.1:3000)
    #[arg(long)]
    addr: Option<String>,

    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory for snapshots
    #[arg(long)]
    snapshot_dir: Option<String>,

    /// Save a snapshot after every turn
    #[arg(long)]
    save: bool,

    /// Consecutive poor turns before the prospect hangs up
    #[arg(long)]
    frustration_threshold: Option<u32>,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Log as JSON lines
    #[arg(long)]
    log_json: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let config = match resolve_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(2);
        }
    };
    init_tracing(&config);
    if args.no_color {
        colored::control::set_override(false);
    }

    let result = if args.serve {
        run_serve(config).await
    } else {
        run_interactive(&args, &config).map_err(|e| e.to_string())
    };

    if let Err(e) = result {
        eprintln!("{}", format!("error: {}", e).red());
        std::process::exit(1);
    }
}

/// Config file first, then flag overrides
fn resolve_config(args: &Args) -> Result<EngineConfig, EngineError> {
    let mut config = match &args.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    if let Some(threshold) = args.frustration_threshold {
        config.frustration_threshold = threshold;
    }
    if args.seed.is_some() {
        config.default_seed = args.seed;
    }
    if let Some(dir) = &args.snapshot_dir {
        config.snapshot_dir = dir.clone();
    }
    if let Some(addr) = &args.addr {
        config.addr = addr.clone();
    }
    config.autosave |= args.save;
    config.log_json |= args.log_json;
    config.validate()?;
    Ok(config)
}

fn init_tracing(config: &EngineConfig) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("prospect_sim={}", config.log_level).into()
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);
    let fmt_layer = if config.log_json {
        tracing_subscriber::fmt::layer().json().with_writer(io::stderr).boxed()
    } else {
        tracing_subscriber::fmt::layer().with_writer(io::stderr).boxed()
    };
    subscriber.with(fmt_layer).init();
}

/// New session from flags, or a restored one from --resume
fn open_session(args: &Args, config: &EngineConfig) -> Result<CallSession, EngineError> {
    if let Some(path) = &args.resume {
        let envelope = load_and_validate_snapshot(path)?;
        return CallSession::restore(envelope.profile, config, &envelope.snapshot);
    }

    let focus = ObjectionKind::parse(&args.focus).ok_or_else(|| {
        EngineError::configuration(format!("unknown objection focus '{}'", args.focus))
    })?;
    let mut request = PersonaRequest::new(focus);
    request.difficulty_rating = args.rating;
    if let Some(hint) = args.toughness {
        request.toughness_hint = hint;
    }
    let profile = build_profile(&request, config.default_seed)?;
    CallSession::new(new_session_id(), profile, config)
}

/// Run an interactive call
fn run_interactive(args: &Args, config: &EngineConfig) -> Result<(), EngineError> {
    let mut session = open_session(args, config)?;
    let parser = TurnParser::new();

    if !args.json {
        print_header(&session);
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        if !args.json {
            print!("{}", format_prompt(&session));
            let _ = stdout.flush();
        }

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(_) => break,
        }

        let line = line.trim();
        if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
            if !args.json {
                println!("\nCall paused at turn {}.", session.turn_index());
            }
            save_if_enabled(&session, config, args.json);
            break;
        }

        let directive = if line.eq_ignore_ascii_case("cancel") {
            session.cancel()?
        } else {
            let input = match parser.parse(line) {
                Ok(input) => input,
                Err(e) => {
                    eprintln!("{}", e.to_string().yellow());
                    continue;
                }
            };
            match session.process_turn(&input) {
                Ok(directive) => directive,
                Err(e) => {
                    eprintln!("{}", e.to_string().red());
                    break;
                }
            }
        };

        print_directive(&directive, args);
        save_if_enabled(&session, config, args.json);

        if directive.session_terminal {
            break;
        }
    }
    Ok(())
}

fn save_if_enabled(session: &CallSession, config: &EngineConfig, quiet: bool) {
    if !config.autosave {
        return;
    }
    match save_snapshot(session.profile(), &session.snapshot(), &config.snapshot_dir) {
        Ok(path) if !quiet => println!("{}", format!("  snapshot saved: {}", path).cyan()),
        Ok(_) => {}
        Err(reason) => eprintln!("{}", format!("  snapshot save failed: {}", reason).red()),
    }
}

/// Print header
fn print_header(session: &CallSession) {
    let profile = session.profile();
    let brief = session.persona_brief();
    let objections: Vec<&str> = profile.objections.iter().map(|o| o.name()).collect();
    let tactics: Vec<String> = brief.tactics.iter().map(|t| format!("{:?}", t)).collect();
    let traits = &brief.traits;

    println!("{}", "========================================".bold());
    println!("{}", format!("  prospect-sim v{}", VERSION).bold());
    println!("{}", "========================================".bold());
    println!("  Session:    {}", session.id());
    println!("  Tier:       {} {} (rating {}, toughness {})", profile.tier, brief.label, profile.difficulty_rating, brief.toughness);
    println!("  DISC:       {} ({:?}-led, small talk {:.2}, pace {:+.2})", profile.disc, traits.dominant, traits.small_talk, traits.pace_weight);
    println!("  Style:      {:?} decider, {:?} on push-back", traits.primary_decision_style(), traits.primary_pushback());
    println!("  Tactics:    {}", if tactics.is_empty() { "-".to_string() } else { tactics.join(", ") });
    println!("  Objections: {}", objections.join(", "));
    println!("  Patience:   {}s", session.patience_remaining());
    println!("  Seed:       {}", profile.seed);
    println!();
}

/// Format prompt
fn format_prompt(session: &CallSession) -> String {
    let top = session.emotions().top_two();
    let gate = session.gate().state();
    format!("[t{} | {}/{} | {} | {}s] > ", session.turn_index(), top[0], top[1], gate, session.patience_remaining())
        .dimmed()
        .to_string()
}

fn print_directive(directive: &TurnDirective, args: &Args) {
    if args.json {
        match serde_json::to_string(directive) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("cannot serialize directive: {}", e),
        }
    } else if args.no_color {
        println!("{}", directive.to_parseable_string());
    } else {
        println!("{}", directive.to_terminal_string());
        if let Some(marker) = &directive.termination_marker {
            println!("  {} {}", marker.bold(), directive.reason.description());
        }
    }
}

/// Run HTTP API server
async fn run_serve(config: EngineConfig) -> Result<(), String> {
    println!();
    println!("{}", format!("  prospect-sim API server v{}", VERSION).bold());
    println!();
    run_server(config).await.map_err(|e| format!("server error: {}", e))
}
