use clap::{Parser, ValueEnum};
use log::info;
use server::network::{self, SharedStore};
use server::store::{FileStore, MemoryStore};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StoreKind {
    /// Keep games in process memory
    Memory,
    /// Keep one JSON file per game in --data-dir
    File,
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Server IP address to bind to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Server port to listen on
    #[arg(short, long, default_value = "3000")]
    port: u16,

    /// Storage backend for game records
    #[arg(long, value_enum, default_value = "memory")]
    store: StoreKind,

    /// Directory used by the file store
    #[arg(long, default_value = "./data")]
    data_dir: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    if std::env::var("RUST_LOG").is_err() {
        eprintln!("Set RUST_LOG=info for detailed logging");
    }

    let args = Args::parse();

    let store: SharedStore = match args.store {
        StoreKind::Memory => Arc::new(MemoryStore::new()),
        StoreKind::File => Arc::new(FileStore::open(&args.data_dir).await?),
    };
    info!("Using {:?} store", args.store);

    let address = format!("{}:{}", args.host, args.port);

    tokio::select! {
        result = network::serve(&address, store) => result?,
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down");
        }
    }

    Ok(())
}
