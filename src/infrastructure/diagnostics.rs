use std::{fmt, net::IpAddr, time::Duration};

use sqlx::{postgres::PgConnectOptions, ConnectOptions, Connection};
use tokio::net::lookup_host;

use crate::db::connection_string::DatabaseUrl;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DnsOutcome {
    V4(IpAddr),
    /// Only an IPv6 address was found; some hosted databases are IPv6-only.
    V6Only(IpAddr),
    Failed(String),
}

impl fmt::Display for DnsOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DnsOutcome::V4(ip) => write!(f, "IPv4: {ip}"),
            DnsOutcome::V6Only(ip) => write!(f, "IPv6: {ip} (IPv4 not available)"),
            DnsOutcome::Failed(msg) => write!(f, "DNS resolution failed: {msg}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Dns,
    Refused,
    Timeout,
    Authentication,
    Other,
}

impl FailureKind {
    pub fn classify(message: &str) -> Self {
        let lower = message.to_lowercase();

        if lower.contains("failed to lookup address")
            || lower.contains("name or service not known")
            || lower.contains("getaddrinfo")
            || lower.contains("no such host")
        {
            FailureKind::Dns
        } else if lower.contains("connection refused") {
            FailureKind::Refused
        } else if lower.contains("timed out") || lower.contains("timeout") {
            FailureKind::Timeout
        } else if lower.contains("password") || lower.contains("authentication") {
            FailureKind::Authentication
        } else {
            FailureKind::Other
        }
    }

    pub fn hints(&self) -> &'static [&'static str] {
        match self {
            FailureKind::Dns => &[
                "Check your internet connection",
                "Verify the host name in the connection string",
                "Check whether the host only publishes an IPv6 address",
            ],
            FailureKind::Refused => &[
                "Verify the port (5432 direct, 6543 pooler)",
                "Check that the database server is running",
                "Check firewall settings",
            ],
            FailureKind::Timeout => &[
                "Check your network connection",
                "Verify that a firewall or VPN is not blocking the connection",
            ],
            FailureKind::Authentication => &[
                "Verify the username and password",
                "Percent-encode special characters in the password",
            ],
            FailureKind::Other => &[
                "Read the error message above",
                "Verify the connection string format",
            ],
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FailureKind::Dns => "DNS resolution error",
            FailureKind::Refused => "Connection refused",
            FailureKind::Timeout => "Connection timeout",
            FailureKind::Authentication => "Authentication error",
            FailureKind::Other => "Unknown error",
        };
        write!(f, "{s}")
    }
}

pub async fn resolve_host(host: &str, port: u16) -> DnsOutcome {
    match lookup_host((host, port)).await {
        Ok(addrs) => {
            let addrs: Vec<IpAddr> = addrs.map(|a| a.ip()).collect();
            if let Some(v4) = addrs.iter().find(|ip| ip.is_ipv4()) {
                DnsOutcome::V4(*v4)
            } else if let Some(v6) = addrs.first() {
                DnsOutcome::V6Only(*v6)
            } else {
                DnsOutcome::Failed("no addresses returned".to_string())
            }
        }
        Err(e) => DnsOutcome::Failed(e.to_string()),
    }
}

/// Opens a single connection and runs `SELECT 1`.
pub async fn probe_connection(database_url: &DatabaseUrl, timeout: Duration) -> Result<i32, sqlx::Error> {
    let options: PgConnectOptions = database_url.connect_str().parse()?;
    let options = options.disable_statement_logging();

    let attempt = async {
        let mut conn = options.connect().await?;
        let value: i32 = sqlx::query_scalar("SELECT 1").fetch_one(&mut conn).await?;
        conn.close().await?;
        Ok::<_, sqlx::Error>(value)
    };

    tokio::time::timeout(timeout, attempt)
        .await
        .unwrap_or(Err(sqlx::Error::PoolTimedOut))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_common_driver_failures() {
        assert_eq!(
            FailureKind::classify("error communicating with database: failed to lookup address information: Name or service not known"),
            FailureKind::Dns
        );
        assert_eq!(
            FailureKind::classify("error communicating with database: Connection refused (os error 111)"),
            FailureKind::Refused
        );
        assert_eq!(FailureKind::classify("pool timed out while waiting for an open connection"), FailureKind::Timeout);
        assert_eq!(
            FailureKind::classify("password authentication failed for user \"postgres\""),
            FailureKind::Authentication
        );
        assert_eq!(FailureKind::classify("relation does not exist"), FailureKind::Other);
    }

    #[test]
    fn every_failure_kind_has_hints() {
        for kind in [
            FailureKind::Dns,
            FailureKind::Refused,
            FailureKind::Timeout,
            FailureKind::Authentication,
            FailureKind::Other,
        ] {
            assert!(!kind.hints().is_empty());
        }
    }

    #[tokio::test]
    async fn resolves_loopback_without_network() {
        assert_eq!(resolve_host("127.0.0.1", 5432).await, DnsOutcome::V4("127.0.0.1".parse().unwrap()));
    }
}
