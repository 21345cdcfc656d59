//! Command line and environment configuration.
//!
//! Every flag falls back to a `MERGINGTON_*` environment variable, and a
//! `.env` file in the working directory is loaded before parsing.

use clap::builder::BoolishValueParser;
use clap::{Args as ClapArgs, Parser, Subcommand};
use mergington_core::state::DEFAULT_DB_PATH;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

#[derive(Parser, Clone, Debug)]
#[command(
    author,
    version,
    about = "Mergington High School activity signup service",
    args_conflicts_with_subcommands = true
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<CliCommand>,
    /// Serve flags used when no subcommand is given
    #[command(flatten)]
    pub serve: ServeArgs,
}

impl Args {
    /// The subcommand to run, `serve` when none was given
    pub fn into_command(self) -> CliCommand {
        self.command.unwrap_or(CliCommand::Serve(self.serve))
    }
}

#[derive(Subcommand, Clone, Debug)]
pub enum CliCommand {
    /// Start the API server (default)
    Serve(ServeArgs),
    /// Load the sample activities into the catalog
    Seed(SeedArgs),
}

#[derive(ClapArgs, Clone, Debug)]
pub struct ServeArgs {
    /// Address to bind
    #[arg(long, env = "MERGINGTON_HOST", default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    pub host: IpAddr,
    /// Port to listen on
    #[arg(short, long, env = "MERGINGTON_PORT", default_value_t = 8000)]
    pub port: u16,
    /// Catalog database file
    #[arg(long, env = "MERGINGTON_DB_PATH", default_value = DEFAULT_DB_PATH)]
    pub db: PathBuf,
    /// Skip seeding an empty catalog on startup. The env var accepts 1/0, yes/no, true/false.
    #[arg(long, env = "MERGINGTON_NO_SEED", value_parser = BoolishValueParser::new())]
    pub no_seed: bool,
}

impl ServeArgs {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[derive(ClapArgs, Clone, Debug)]
pub struct SeedArgs {
    /// Catalog database file
    #[arg(long, env = "MERGINGTON_DB_PATH", default_value = DEFAULT_DB_PATH)]
    pub db: PathBuf,
    /// Keep existing data and only seed an empty catalog
    #[arg(long)]
    pub if_empty: bool,
}
