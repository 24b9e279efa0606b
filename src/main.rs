//! eth-clients CLI entry point
//!
//! Reads node and network descriptions as JSON and prints one artifact to
//! stdout. Logs go to stderr so the output can be redirected into a file.

use std::{fs, path::Path};

use clap::{Parser, Subcommand};
use eth_clients::{
    extra_data::decode_clique, new_client, spec::ClientKind, version::{version_string, BuildInfo},
    ImageConfig, NetworkConfig, NodeSpec,
};
use eyre::{bail, Context};
use serde::de::DeserializeOwned;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "eth-clients", version = version_string(), about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the client command line, one argument per line.
    Args {
        #[arg(long)]
        node: String,
        /// Defaults to mainnet when omitted.
        #[arg(long)]
        network: Option<String>,
    },
    /// Print the genesis document of a private network.
    Genesis {
        #[arg(long)]
        client: ClientKind,
        #[arg(long)]
        network: String,
    },
    /// Print the static-nodes file of a node.
    StaticNodes {
        #[arg(long)]
        node: String,
    },
    /// Print the container image a node runs.
    Image {
        #[arg(long)]
        node: String,
    },
    /// Print the signers encoded in Clique `extraData`.
    Signers {
        #[arg(long)]
        extra_data: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(Cli::parse()) {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> eyre::Result<()> {
    let build = BuildInfo::current();
    info!(
        target: "eth_clients::cli",
        version = build.version,
        commit = build.commit.unwrap_or("unknown"),
        "Starting {}",
        build.name
    );

    match cli.command {
        Command::Args { node, network } => {
            let node: NodeSpec = read_json(&node)?;
            let network = match network {
                Some(path) => read_json(&path)?,
                None => NetworkConfig::default(),
            };
            network.validate().wrap_err("Invalid network config")?;

            let adapter = node.client.adapter();
            info!(
                target: "eth_clients::cli",
                client = %node.client,
                private = network.is_private(),
                "Generating arguments"
            );
            for arg in adapter.args(&node, &network) {
                println!("{arg}");
            }
        }
        Command::Genesis { client, network } => {
            let network: NetworkConfig = read_json(&network)?;
            network.validate().wrap_err("Invalid network config")?;
            let Some(genesis) = &network.genesis else {
                bail!("network {:?} is public and has no genesis to generate", network.network);
            };

            let adapter = new_client(client.as_str())?;
            let document = adapter
                .genesis(genesis)
                .wrap_err_with(|| format!("Failed to build {client} genesis"))?;
            println!("{document}");
        }
        Command::StaticNodes { node } => {
            let node: NodeSpec = read_json(&node)?;
            println!("{}", node.client.adapter().encode_static_nodes(&node.static_nodes));
        }
        Command::Image { node } => {
            let mut node: NodeSpec = read_json(&node)?;
            ImageConfig::from_env().resolve(&mut node);
            println!("{}", node.client.adapter().image(&node));
        }
        Command::Signers { extra_data } => {
            for signer in decode_clique(&extra_data).wrap_err("Invalid Clique extraData")? {
                println!("{}", signer.to_checksum(None));
            }
        }
    }

    Ok(())
}

fn read_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> eyre::Result<T> {
    let path = path.as_ref();
    let raw =
        fs::read_to_string(path).wrap_err_with(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).wrap_err_with(|| format!("Failed to parse {}", path.display()))
}
