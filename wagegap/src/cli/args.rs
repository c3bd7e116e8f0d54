//! CLI argument definitions

use clap::Parser;
use std::net::{IpAddr, SocketAddr};

use crate::config::{DashboardConfig, DEFAULT_PORT};
use crate::domain::MissingPolicy;
use crate::ingest::{DataSource, DEFAULT_DATA_URL, DEFAULT_ENCODING};

#[derive(Parser, Debug)]
#[command(
    name = "wagegap",
    about = "Serve the GSS gender wage gap dashboard",
    after_help = "\
EXAMPLES:
    wagegap                                  Fetch the GSS 2018 extract, serve on 127.0.0.1:8050
    wagegap --port 9000 --debug              Debug logging, pretty JSON responses
    wagegap --data-url ./gss2018.csv         Serve from a local copy of the dataset"
)]
pub struct Args {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1")]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Debug logging and pretty-printed JSON responses
    #[arg(long)]
    pub debug: bool,

    /// Dataset location: an http(s) URL or a local file path
    #[arg(long, value_name = "URL|PATH", default_value = DEFAULT_DATA_URL)]
    pub data_url: String,

    /// Text encoding of the dataset
    #[arg(long, default_value = DEFAULT_ENCODING)]
    pub encoding: String,

    /// Count rows missing a selected field under a "missing" category instead of dropping them
    #[arg(long)]
    pub missing_as_category: bool,

    /// Suppress non-essential output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    #[must_use]
    pub fn into_config(self) -> DashboardConfig {
        DashboardConfig {
            source: DataSource::parse(&self.data_url),
            encoding: self.encoding,
            listen: SocketAddr::new(self.host, self.port),
            missing_policy: if self.missing_as_category {
                MissingPolicy::Category
            } else {
                MissingPolicy::Drop
            },
            debug: self.debug,
            quiet: self.quiet,
        }
    }
}
