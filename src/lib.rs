//! # Hosts Intercept Library
//!
//! This crate resolves DNS lookups made inside a proxy against a
//! locally-maintained hosts table, optionally refreshed from a remote mirror
//! on a bounded schedule.
//!
//! ## Modules
//!
//! - [`builder`]: The once-per-start build pass (freshness policy, mirror and
//!   cache fallback, override-file merge)
//! - [`chain`]: The proxy's DNS-resolution hook point
//! - [`config`]: Settings store (mirror URL, refresh interval, timestamp)
//! - [`error`]: Error types and handling
//! - [`files`]: Named text files in the data directory
//! - [`interceptor`]: The hosts-table resolution handler
//! - [`logging`]: Logging setup
//! - [`mirror`]: HTTP transport for the mirror
//! - [`table`]: Hosts-file parsing and lookup
//!
//! ## Example
//!
//! ```ignore
//! use hosts_intercept::{builder::BuildEnv, chain::ResolutionChain, interceptor};
//!
//! let mut chain = ResolutionChain::new(proxy.hostnames_available());
//! let mut env = BuildEnv { config: &mut config, files: &files, fetcher: &fetcher, clock: &clock };
//! if interceptor::install(&mut chain, &mut env).await {
//!     // chain now short-circuits lookups for hosts in the table
//! }
//! ```
//!
//! ## Source precedence
//!
//! Mirror (or cached mirror) entries are parsed first and the local override
//! file second, so for a duplicated hostname the local entry always wins.

pub mod builder;
pub mod chain;
pub mod config;
pub mod error;
pub mod files;
pub mod interceptor;
pub mod logging;
pub mod mirror;
pub mod table;

pub use builder::{build, BuildEnv, Clock, SystemClock};
pub use chain::{DnsRequest, ResolutionChain, ResolutionHandler};
pub use config::{ConfigStore, MirrorInterval, Settings, YamlConfigStore};
pub use error::{HostsError, Result};
pub use files::{DirStore, FileStore};
pub use interceptor::{install, HostsInterceptor, HOSTS_HANDLER_PRIORITY};
pub use mirror::{FetchError, HttpMirrorFetcher, MirrorFetcher};
pub use table::HostsTable;
