use clap::Parser;
use client::{ClientError, GameClient};
use log::info;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Server base URL
    #[arg(short = 's', long, default_value = "http://127.0.0.1:3000")]
    server: String,

    /// Resume an existing game instead of starting a new one
    #[arg(short = 'g', long)]
    game: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    if std::env::var("RUST_LOG").is_err() {
        eprintln!("Set RUST_LOG=info for detailed logging");
    }

    let args = Args::parse();

    let mut game = match args.game {
        Some(id) => GameClient::resume(&args.server, id),
        None => GameClient::new(&args.server),
    };
    info!("Playing against {}", args.server);
    println!("Guess three different digits between 0 and 4, e.g. 012. Type 'quit' to stop.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let guess = line.trim();
        if guess.is_empty() {
            continue;
        }
        if guess.eq_ignore_ascii_case("quit") {
            break;
        }

        match game.guess(guess).await {
            Ok(result) => {
                println!("{} bulls, {} cows", result.bulls, result.cows);
                if result.solved {
                    println!(
                        "Solved in {} guesses! (game {})",
                        result.guesses, result.game_id
                    );
                    break;
                }
            }
            Err(ClientError::Rejected { message, .. }) => println!("{}", message),
            Err(e) => return Err(e.into()),
        }
    }

    if let Some(id) = game.game_id() {
        info!("Game id: {}", id);
    }

    Ok(())
}
