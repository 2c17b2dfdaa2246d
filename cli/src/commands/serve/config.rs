//! # Serve Command Configuration
//!
//! File: cli/src/commands/serve/config.rs
//!
//! Host and port come from the `[server]` section of the configuration unless
//! given on the command line. CORS is on unless `--no-cors` is passed.
//!
use crate::core::config::ServerSection;
use clap::Parser;
use std::net::IpAddr;
use tracing::debug;

#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Port to listen on. The next free port is used if it is taken.
    #[arg(long, short)]
    pub port: Option<u16>,

    /// Address to bind to.
    #[arg(long)]
    pub host: Option<IpAddr>,

    /// Disable the permissive CORS layer.
    #[arg(long)]
    pub no_cors: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub enable_cors: bool,
}

impl ServerConfig {
    pub fn resolve(args: &ServeArgs, section: &ServerSection) -> Self {
        let resolved = Self {
            host: args.host.unwrap_or(section.host),
            port: args.port.unwrap_or(section.port),
            enable_cors: !args.no_cors,
        };
        debug!("Resolved server config from {:?} and {:?}", args, section);
        resolved
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        let section = ServerSection::default();
        Self {
            host: section.host,
            port: section.port,
            enable_cors: true,
        }
    }
}
