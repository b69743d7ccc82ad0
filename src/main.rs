//! Travel router — console entry point.
//!
//! Startup sequence:
//!   1. Load .env (if present)
//!   2. Load config
//!   3. Resolve effective log level (CLI `-v` flags > env > config)
//!   4. Init logger once
//!   5. Build the responder and the checkpointer
//!   6. Resume the conversation thread
//!   7. Spawn Ctrl-C → shutdown signal watcher
//!   8. Run the console until shutdown or EOF

use tokio::io::BufReader;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing::level_filters::LevelFilter;

use travel_router::config;
use travel_router::error::AppError;
use travel_router::llm::providers;
use travel_router::logger;
use travel_router::subsystems::agents::TravelAgent;
use travel_router::subsystems::comms::ConsoleSession;
use travel_router::subsystems::memory;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), AppError> {
    // Load .env if present — ignore errors (file is optional).
    let _ = dotenvy::dotenv();

    let args = parse_cli_args();

    let mut config = config::load(args.config_path.as_deref())?;

    if let Some(thread_id) = args.thread_id {
        config.memory.thread_id = thread_id;
    } else if args.new_thread {
        config.memory.thread_id = uuid::Uuid::new_v4().to_string();
    }

    let effective_log_level = args.log_level.unwrap_or(config.log_level);
    logger::init(effective_log_level, args.log_level.is_some())?;

    info!(
        bot_name = %config.bot_name,
        work_dir = %config.work_dir.display(),
        provider = %config.llm.provider,
        thread_id = %config.memory.thread_id,
        "config loaded"
    );

    let provider = providers::build(&config.llm, config.llm_api_key.clone())?;
    info!(provider = provider.name(), "responder ready");
    let agent = TravelAgent::new(provider);

    let checkpointer = memory::open_checkpointer(&config);
    let thread_id = config.memory.thread_id.clone();
    let state = memory::resume(checkpointer.as_ref(), &thread_id)?;

    let shutdown = CancellationToken::new();
    let ctrlc_token = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("ctrl-c received — initiating shutdown");
            ctrlc_token.cancel();
        }
    });

    println!("─────────────────────────────────");
    println!(" {}  thread: {thread_id}  (Ctrl-C to quit)", config.bot_name);
    println!("─────────────────────────────────");

    let mut session = ConsoleSession::new(&agent, checkpointer.as_ref(), thread_id, state);
    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();
    session.run(stdin, &mut stdout, shutdown).await?;

    info!(
        messages = session.state().messages().len(),
        preferences = %session.state().preferences().summarize(),
        "conversation saved"
    );
    Ok(())
}

struct CliArgs {
    log_level: Option<LevelFilter>,
    config_path: Option<String>,
    thread_id: Option<String>,
    new_thread: bool,
}

fn parse_cli_args() -> CliArgs {
    let mut verbosity = 0u8;
    let mut config_path = None;
    let mut thread_id = None;
    let mut new_thread = false;

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        if arg == "--" {
            break;
        }

        match arg.as_str() {
            "-h" | "--help" => {
                println!("Usage: travel-router [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -h, --help                 Print help");
                println!("  -f, --config <PATH>        Path to configuration file (default: config/default.toml)");
                println!("  -t, --thread <ID>          Conversation thread to resume");
                println!("  -n, --new-thread           Start a fresh thread with a random id");
                println!("  -v, -vv, -vvv, -vvvv       Increase logging verbosity");
                std::process::exit(0);
            }
            "-f" | "--config" => match iter.next() {
                Some(path) => config_path = Some(path),
                None => {
                    eprintln!("error: -f/--config requires a path argument");
                    std::process::exit(1);
                }
            },
            "-t" | "--thread" => match iter.next() {
                Some(id) => thread_id = Some(id),
                None => {
                    eprintln!("error: -t/--thread requires an id argument");
                    std::process::exit(1);
                }
            },
            "-n" | "--new-thread" => new_thread = true,
            "--verbose" => verbosity = verbosity.saturating_add(1),
            a => {
                if let Some(count) = v_flag_count(a) {
                    verbosity = verbosity.saturating_add(count);
                }
            }
        }
    }

    CliArgs { log_level: verbosity_level(verbosity), config_path, thread_id, new_thread }
}

/// Number of `v`s in a `-v…` flag, clamped to `u8::MAX`.
fn v_flag_count(arg: &str) -> Option<u8> {
    let vs = arg.strip_prefix('-')?;
    if vs.is_empty() || !vs.chars().all(|c| c == 'v') {
        return None;
    }
    Some(u8::try_from(vs.len()).unwrap_or(u8::MAX))
}

//   -v      → warn
//   -vv     → info
//   -vvv    → debug  (routing decisions, handler choice)
//   -vvvv+  → trace  (full LLM payloads)
fn verbosity_level(verbosity: u8) -> Option<LevelFilter> {
    match verbosity {
        0 => None,
        1 => Some(LevelFilter::WARN),
        2 => Some(LevelFilter::INFO),
        3 => Some(LevelFilter::DEBUG),
        _ => Some(LevelFilter::TRACE),
    }
}
