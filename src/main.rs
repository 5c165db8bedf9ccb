use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use clap::Parser;
use env_logger::Env;
use log::{error, warn};
use quiz_web::protocol::{SigningKey, MAX_QUESTIONS};
use quiz_web::{QuizConfig, QuizServer, DEFAULT_PORT, DEFAULT_QUESTIONS_PATH};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// CSV (or .json) file to load the questions from
    #[arg(short, long, default_value = DEFAULT_QUESTIONS_PATH)]
    questions: PathBuf,

    /// Address to bind to
    #[arg(long, default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    host: IpAddr,

    /// Port to listen on
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Questions per quiz (at most 50)
    #[arg(short = 'n', long, default_value_t = MAX_QUESTIONS)]
    sample_size: usize,

    /// Secret for tagging hidden answer fields; tampered questions are not scored
    #[arg(long)]
    signing_key: Option<String>,
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let requested = args.sample_size;
    let mut config = QuizConfig::new(args.questions)
        .with_addr(SocketAddr::new(args.host, args.port))
        .with_sample_size(args.sample_size);
    if let Some(secret) = args.signing_key {
        config = config.with_signing_key(SigningKey::new(secret));
    }

    let result = match QuizServer::new(config) {
        Ok(server) => {
            let sample_size = server.config().sample_size;
            if sample_size < requested {
                warn!("Sample size {} capped at {}", requested, sample_size);
            }
            server.run().await
        }
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        error!("{}", e);
        std::process::exit(1);
    }
}
