use std::{net::SocketAddr, path::PathBuf};

use clap::{Parser, Subcommand};
use tracing::{Level, info};

use transport_catalogue::{
    build_catalogue,
    input::{Document, Format},
    report, server,
};

#[derive(Parser)]
#[command(version, about = "Bus route statistics over an in-memory transport catalogue")]
struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load a request document and print answers to its stat requests
    Query {
        /// Read from this file instead of stdin
        #[arg(short, long)]
        input: Option<PathBuf>,

        #[arg(short, long, value_enum, default_value_t = Format::Auto)]
        format: Format,
    },
    /// Load a request document and serve the query API over HTTP
    Serve {
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long, value_enum, default_value_t = Format::Auto)]
        format: Format,

        #[arg(long, default_value = "127.0.0.1:3000")]
        addr: SocketAddr,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Query { input, format } => {
            let now = std::time::Instant::now();
            let document = Document::read(input.as_ref(), format)?;
            let catalogue = build_catalogue(&document)?;
            info!(
                stops = catalogue.stop_count(),
                buses = catalogue.bus_count(),
                "catalogue built in {:?}",
                now.elapsed()
            );

            println!("{}", report::answer(&catalogue, &document)?);
        }
        Command::Serve {
            input,
            format,
            addr,
        } => {
            let document = Document::read(Some(&input), format)?;
            let catalogue = build_catalogue(&document)?;
            server::serve(catalogue, addr).await?;
        }
    }

    Ok(())
}
