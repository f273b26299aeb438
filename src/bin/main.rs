use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "moviedex-server")]
#[command(about = "Movie catalog proxy for the TMDB API", long_about = None)]
struct Args {
    #[arg(short, long, default_value = "moviedex-server.yaml")]
    config: String,

    #[arg(short, long)]
    debug: bool,
}

/// Filter used when RUST_LOG is not set; `--debug` drops the level to debug.
fn default_filter(debug: bool) -> &'static str {
    if debug {
        "moviedex_rs=debug,tower_http=debug"
    } else {
        "moviedex_rs=info,tower_http=info"
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(args.debug).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = moviedex_rs::run(&args.config, args.debug).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
