//! Runtime configuration for the dashboard.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use crate::domain::MissingPolicy;
use crate::ingest::{DataSource, DEFAULT_ENCODING};

pub const DEFAULT_PORT: u16 = 8050;

/// Everything the library needs to load the data and serve the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    pub source: DataSource,
    /// WHATWG encoding label of the dataset.
    pub encoding: String,
    pub listen: SocketAddr,
    pub missing_policy: MissingPolicy,
    /// Debug logging and pretty-printed JSON responses.
    pub debug: bool,
    pub quiet: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            source: DataSource::default(),
            encoding: DEFAULT_ENCODING.to_string(),
            listen: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), DEFAULT_PORT),
            missing_policy: MissingPolicy::Drop,
            debug: false,
            quiet: false,
        }
    }
}
