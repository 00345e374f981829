//! System information module
//!
//! Hostname and container IP resolution for the status page and /api/info.

/// Hostname of the machine or container
pub fn hostname() -> String {
    whoami::fallible::hostname().unwrap_or_else(|_| "unknown".to_string())
}

/// Resolve the container's own IP address by looking up its hostname.
///
/// Inside a container the hostname resolves to the container IP. Resolution
/// failure degrades to "unknown" rather than failing the whole page.
pub async fn container_ip(hostname: &str) -> String {
    match tokio::net::lookup_host((hostname, 0)).await {
        Ok(mut addrs) => addrs
            .next()
            .map_or_else(|| "unknown".to_string(), |addr| addr.ip().to_string()),
        Err(_) => "unknown".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hostname_not_empty() {
        assert!(!hostname().is_empty());
    }

    #[tokio::test]
    async fn test_container_ip_resolves_localhost() {
        let ip = container_ip("localhost").await;
        assert_ne!(ip, "unknown");
    }

    #[tokio::test]
    async fn test_container_ip_unresolvable_falls_back() {
        let ip = container_ip("no-such-host.invalid").await;
        assert_eq!(ip, "unknown");
    }
}
