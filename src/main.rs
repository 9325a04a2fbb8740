use anyhow::Context;
use clap::{Parser, Subcommand};
use seatx::{ApiState, AppConfig, PartitionConfig, Registration, RestApi, StorageManager, TextPresenter, Workflow};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Event registration and interest-based table planner
#[derive(Parser, Debug)]
#[command(name = "seatx")]
#[command(about = "Register attendees and seat them by shared interests", long_about = None)]
struct Args {
    /// Path to a TOML config file
    #[arg(long, env = "SEATX_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Path to the data directory (overrides the config file)
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    /// Log level
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Register a participant
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        /// Interest label; repeat 3 to 5 times
        #[arg(long = "interest", required = true)]
        interests: Vec<String>,
    },
    /// List registered participants
    List,
    /// Assign registered participants to tables
    Assign {
        /// Number of tables (defaults to one per four participants)
        #[arg(short, long)]
        tables: Option<usize>,
        /// Maximum participants per table
        #[arg(short, long)]
        capacity: Option<usize>,
        /// Clustering seed (overrides the config file)
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Start the HTTP API
    Serve {
        /// HTTP API port (overrides the config file)
        #[arg(long)]
        http_port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut config = AppConfig::load(args.config.as_deref())?;
    if let Some(dir) = args.data_dir {
        config.storage.data_dir = dir;
    }
    let vocabulary = config.vocabulary();

    info!("SeatX v{}", env!("CARGO_PKG_VERSION"));
    info!("Data directory: {:?}", config.storage.data_dir);

    let storage = Arc::new(
        StorageManager::new(&config.storage, vocabulary.clone())
            .context("failed to open data directory")?,
    );

    match args.command {
        Command::Register { name, email, interests } => {
            let participant = storage.register(&Registration::new(name, email, interests))?;
            let labels: Vec<&str> = vocabulary.selected_labels(&participant.interests).collect();
            println!("Registro confirmado");
            println!("Nombre: {}", participant.name);
            println!("Email: {}", participant.email);
            println!("Intereses: {}", labels.join(", "));
        }
        Command::List => {
            let participants = storage.participants()?;
            print!("{}", TextPresenter::new(&vocabulary).participants(&participants));
        }
        Command::Assign { tables, capacity, seed } => {
            let participants = storage.participants()?;
            let suggested = PartitionConfig::suggested(participants.len());
            let mut workflow = Workflow::configuring(participants.len());

            let mut run = config.partition_config(
                tables.unwrap_or(suggested.tables),
                capacity.unwrap_or(suggested.capacity),
            );
            if let Some(seed) = seed {
                run.seed = seed;
            }

            workflow.assign_with(&vocabulary, run, &participants, |result| {
                storage.save_assignment(result)
            })?;
            if let Some(result) = workflow.result() {
                print!("{}", TextPresenter::new(&vocabulary).result(result));
                println!();
                println!("Asignación guardada en {}", storage.assignments_path().display());
            }
        }
        Command::Serve { http_port } => {
            let port = http_port.unwrap_or(config.server.http_port);
            let defaults = config.partition_config(0, 0);
            let state = Arc::new(ApiState::new(storage.clone(), defaults));

            let http_handle = std::thread::spawn(move || {
                info!("Starting HTTP server on port {}", port);
                let sys = actix_web::rt::System::new();
                sys.block_on(async {
                    if let Err(e) = RestApi::start(state, port).await {
                        tracing::error!("HTTP server error: {}", e);
                    }
                })
            });

            info!("SeatX started successfully");
            info!("HTTP API: http://localhost:{}/", port);

            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    info!("Shutdown signal received");
                }
                _ = tokio::task::spawn_blocking(move || {
                    http_handle.join().ok();
                }) => {
                    info!("HTTP server stopped");
                }
            }

            info!("Shutting down...");
        }
    }

    Ok(())
}
