//! The proxy's DNS-resolution hook point.
//!
//! Handlers are held in a plain ordered list and invoked synchronously in
//! ascending priority order. The chain is open: every handler sees every
//! request, even after an earlier handler has attached a response, and a
//! handler that sets a response does not stop the walk. Well-behaved
//! handlers leave an existing response alone; the chain does not police
//! that.

use std::net::SocketAddr;

/// An in-flight DNS lookup, intercepted before it reaches the real resolver.
#[derive(Debug, Clone)]
pub struct DnsRequest {
    host: String,
    port: u16,
    response: Option<SocketAddr>,
}

impl DnsRequest {
    /// Creates a request for `host` on `port`, with no response attached.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            response: None,
        }
    }

    /// The requested hostname, as presented by the client.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// The requested port.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// The resolved endpoint, if a handler has attached one.
    pub fn response(&self) -> Option<SocketAddr> {
        self.response
    }

    /// Attaches a resolved endpoint, suppressing the real DNS lookup.
    pub fn set_response(&mut self, address: SocketAddr) {
        self.response = Some(address);
    }
}

/// A handler attached to the resolution chain.
pub trait ResolutionHandler: Send + Sync {
    /// Inspects and possibly mutates a resolution request.
    fn on_resolution_request(&self, request: &mut DnsRequest);
}

/// Ordered list of resolution handlers.
pub struct ResolutionChain {
    handlers: Vec<(i32, Box<dyn ResolutionHandler>)>,
    hostnames_available: bool,
}

impl ResolutionChain {
    /// Creates an empty chain.
    ///
    /// `hostnames_available` reflects whether the host runtime resolves at a
    /// layer where hostnames are still visible; when false, hostname-level
    /// handlers must not be registered at all.
    pub fn new(hostnames_available: bool) -> Self {
        Self {
            handlers: Vec::new(),
            hostnames_available,
        }
    }

    /// Whether hostname-level interception is available.
    pub fn hostnames_available(&self) -> bool {
        self.hostnames_available
    }

    /// Registers a handler. Lower priorities run earlier; handlers with
    /// equal priority run in registration order.
    pub fn register(&mut self, priority: i32, handler: Box<dyn ResolutionHandler>) {
        self.handlers.push((priority, handler));
        self.handlers.sort_by_key(|(priority, _)| *priority);
    }

    /// Runs a request through every handler in order.
    pub fn resolve(&self, request: &mut DnsRequest) {
        for (_, handler) in &self.handlers {
            handler.on_resolution_request(request);
        }
    }

    /// Number of registered handlers.
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }
}
