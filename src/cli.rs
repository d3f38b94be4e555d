use crate::core::types::ProxyScrapeQuery;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "proxyscrape")]
#[command(version = concat!("Ver:", env!("CARGO_PKG_VERSION")))]
#[command(about = "Fetch, rank and live-test proxies from the ProxyScrape free proxy list")]
pub struct Cli {
    /// Path to a TOML config file (defaults to the platform config dir)
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Write a default config file and exit
    #[arg(long = "init-config")]
    pub init_config: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the proxy list
    List {
        #[command(flatten)]
        filters: QueryArgs,
        /// Print the raw response as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the best live proxies, ranked by uptime then latency
    Best {
        #[command(flatten)]
        filters: QueryArgs,
        /// Number of proxies to return
        #[arg(short = 'n', long, default_value_t = crate::core::ranking::DEFAULT_BEST_COUNT)]
        count: usize,
        /// Live-test each returned proxy
        #[arg(long)]
        check: bool,
    },
    /// Live-test a single proxy, e.g. `socks5://1.2.3.4:1080`
    Check {
        proxy: String,
    },
}

#[derive(Args, Debug, Default, Clone)]
pub struct QueryArgs {
    /// Protocol filter (repeatable or comma separated)
    #[arg(short = 'p', long = "protocol", value_delimiter = ',')]
    pub protocol: Vec<String>,
    /// Country code filter (repeatable or comma separated)
    #[arg(short = 'C', long = "country", value_delimiter = ',')]
    pub country: Vec<String>,
    /// Anonymity filter: transparent, anonymous, elite
    #[arg(short = 'a', long = "anonymity", value_delimiter = ',')]
    pub anonymity: Vec<String>,
    /// Only proxies with (true) or without (false) SSL support
    #[arg(long)]
    pub ssl: Option<bool>,
    #[arg(long)]
    pub limit: Option<u32>,
    #[arg(long)]
    pub skip: Option<u32>,
    /// Maximum proxy timeout in milliseconds
    #[arg(long)]
    pub timeout: Option<u32>,
}

impl QueryArgs {
    pub fn to_query(&self) -> ProxyScrapeQuery {
        ProxyScrapeQuery {
            protocol: self.protocol.clone(),
            country: self.country.clone(),
            ssl: self.ssl,
            anonymity: self.anonymity.clone(),
            limit: self.limit,
            skip: self.skip,
            timeout: self.timeout,
        }
    }
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
