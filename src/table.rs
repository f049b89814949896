//! Hosts table parsing and lookup.
//!
//! A table maps lowercase hostnames to concrete IP addresses. Addresses are
//! resolved once, while the table is parsed; lookups never touch the
//! resolver again.

use std::collections::HashMap;
use std::net::{IpAddr, ToSocketAddrs};
use tracing::warn;

/// Immutable hostname-to-address mapping.
///
/// Built once per proxy start and handed to the interceptor as a read-only
/// snapshot, so concurrent lookups need no locking.
#[derive(Debug, Clone, Default)]
pub struct HostsTable {
    entries: HashMap<String, IpAddr>,
}

impl HostsTable {
    /// Parses hosts-file text into a table.
    ///
    /// Each non-blank, non-`#` line must be `<hostname> <ip-or-host>`
    /// separated by whitespace. Malformed lines and entries whose address
    /// neither parses as an IP literal nor resolves through the platform
    /// resolver are skipped with a warning. Later entries overwrite earlier
    /// ones with the same hostname.
    pub fn parse(raw: &str) -> Self {
        let mut entries = HashMap::new();

        for line in raw.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.len() != 2 {
                warn!(line = %line, "Malformed hosts line");
                continue;
            }

            match resolve_address(tokens[1]) {
                Some(address) => {
                    entries.insert(tokens[0].to_lowercase(), address);
                }
                None => {
                    warn!(host = tokens[0], address = tokens[1], "Unresolvable address in hosts line");
                }
            }
        }

        Self { entries }
    }

    /// Looks up a hostname, case-insensitively.
    pub fn lookup(&self, host: &str) -> Option<IpAddr> {
        self.entries.get(&host.to_lowercase()).copied()
    }

    /// Number of entries in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Resolves an address token to a concrete IP.
///
/// IP literals parse directly; anything else goes through the platform
/// resolver and the first returned address wins.
fn resolve_address(token: &str) -> Option<IpAddr> {
    if let Ok(ip) = token.parse::<IpAddr>() {
        return Some(ip);
    }

    (token, 0)
        .to_socket_addrs()
        .ok()?
        .next()
        .map(|addr| addr.ip())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    #[test]
    fn test_parse_well_formed_lines() {
        let table = HostsTable::parse("example.com 192.168.1.1\napi.example.com 10.0.0.2\n");

        assert_eq!(table.len(), 2);
        assert_eq!(
            table.lookup("example.com"),
            Some(IpAddr::V4(Ipv4Addr::new(192, 168, 1, 1)))
        );
        assert_eq!(
            table.lookup("api.example.com"),
            Some(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 2)))
        );
    }

    #[test]
    fn test_hostname_stored_lowercase() {
        let table = HostsTable::parse("Example.COM 192.168.1.1");

        assert!(table.lookup("example.com").is_some());
        assert!(table.lookup("EXAMPLE.com").is_some());
    }

    #[test]
    fn test_blank_lines_and_comments_skipped() {
        let raw = "\n   \n# comment line\n  # indented comment\nexample.com 192.168.1.1\n";
        let table = HostsTable::parse(raw);

        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_malformed_line_skipped_without_aborting() {
        let raw = "only-one-token\nexample.com 192.168.1.1\na b c\n";
        let table = HostsTable::parse(raw);

        assert_eq!(table.len(), 1);
        assert!(table.lookup("example.com").is_some());
    }

    #[test]
    fn test_unresolvable_address_skipped() {
        let raw = "bad.example.com 999.999.999.999\nexample.com 192.168.1.1\nworse.example.com nothing.invalid\n";
        let table = HostsTable::parse(raw);

        assert_eq!(table.len(), 1);
        assert!(table.lookup("bad.example.com").is_none());
        assert!(table.lookup("worse.example.com").is_none());
    }

    #[test]
    fn test_later_entry_wins() {
        let raw = "example.com 192.168.1.1\nexample.com 10.0.0.9\n";
        let table = HostsTable::parse(raw);

        assert_eq!(table.len(), 1);
        assert_eq!(
            table.lookup("example.com"),
            Some(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 9)))
        );
    }

    #[test]
    fn test_ipv6_literal() {
        let table = HostsTable::parse("example.com ::1");

        assert_eq!(table.lookup("example.com"), Some("::1".parse().unwrap()));
    }

    #[test]
    fn test_whitespace_runs_between_tokens() {
        let table = HostsTable::parse("example.com \t  192.168.1.1");

        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_empty_input_gives_empty_table() {
        let table = HostsTable::parse("");
        assert!(table.is_empty());
    }
}
