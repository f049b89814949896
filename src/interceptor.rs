//! The hosts-table resolution interceptor.
//!
//! Looks up each requested hostname in the table and, on a hit, attaches a
//! resolved endpoint to the request before handing it on. The walk never
//! stops here: downstream handlers still see the request.

use crate::builder::{self, BuildEnv};
use crate::chain::{DnsRequest, ResolutionChain, ResolutionHandler};
use crate::table::HostsTable;
use std::net::SocketAddr;
use tracing::{debug, error, info, warn};

/// Registration priority for the interceptor. Runs early, before other
/// DNS-affecting handlers, without claiming to be first.
pub const HOSTS_HANDLER_PRIORITY: i32 = -10;

/// Resolution handler backed by an immutable [`HostsTable`].
pub struct HostsInterceptor {
    hosts: HostsTable,
}

impl HostsInterceptor {
    /// Creates an interceptor owning `hosts`.
    pub fn new(hosts: HostsTable) -> Self {
        Self { hosts }
    }

    /// Number of hostnames this interceptor answers for.
    pub fn host_count(&self) -> usize {
        self.hosts.len()
    }
}

impl ResolutionHandler for HostsInterceptor {
    fn on_resolution_request(&self, request: &mut DnsRequest) {
        if let Some(address) = self.hosts.lookup(request.host()) {
            debug!(host = %request.host(), address = %address, "Host resolved from hosts table");
            let port = request.port();
            request.set_response(SocketAddr::new(address, port));
        }
    }
}

/// Runs one build pass and, if it produces a usable table, registers a
/// [`HostsInterceptor`] on the chain.
///
/// Returns whether an interceptor was registered. Every failure path is
/// accompanied by a diagnostic log line: the capability flag being off, a
/// fatal build error, or an empty table (already warned by the builder)
/// all leave the chain untouched.
pub async fn install(chain: &mut ResolutionChain, env: &mut BuildEnv<'_>) -> bool {
    if !chain.hostnames_available() {
        warn!("Hostname-level interception is unavailable; hosts table disabled");
        return false;
    }

    let table = match builder::build(env).await {
        Ok(Some(table)) => table,
        Ok(None) => return false,
        Err(e) => {
            error!(error = %e, "Failed to build hosts table");
            return false;
        }
    };

    let hosts = table.len();
    chain.register(HOSTS_HANDLER_PRIORITY, Box::new(HostsInterceptor::new(table)));
    info!(hosts, "Loaded hosts table");

    true
}
