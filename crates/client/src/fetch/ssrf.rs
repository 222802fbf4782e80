//! SSRF (Server-Side Request Forgery) protection.
//!
//! A preview source is user-supplied, so every address the host resolves
//! to is validated as public before the request is issued.

use std::net::IpAddr;

use docview_core::Error;

/// Check if an IP address is private, reserved, or otherwise blocked.
///
/// This covers:
/// - Loopback addresses (127.0.0.0/8, ::1)
/// - RFC 1918 private ranges (10/8, 172.16/12, 192.168/16)
/// - Link-local addresses (169.254/16, fe80::/10)
/// - Multicast addresses (224/4, ff00::/8)
/// - Unspecified addresses (0.0.0.0/8, ::)
/// - IPv6 unique local (fc00::/7)
pub fn is_private_or_reserved(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => {
            v4.is_loopback()
                || v4.is_private()
                || v4.is_link_local()
                || v4.is_multicast()
                || v4.is_broadcast()
                || v4.is_unspecified()
                || v4.octets()[0] == 0
        }
        IpAddr::V6(v6) => {
            v6.is_loopback()
                || v6.is_multicast()
                || v6.is_unspecified()
                || (v6.segments()[0] & 0xfe00) == 0xfc00
                || (v6.segments()[0] & 0xffc0) == 0xfe80
        }
    }
}

/// Resolve a host and validate that every answer is a public address.
///
/// IP-literal hosts are validated directly; names go through the system
/// resolver, and a single private/reserved answer blocks the fetch
/// (DNS-rebinding answers should not slip through on a lucky pick).
pub async fn ensure_public_host(host: &str, port: u16) -> Result<(), Error> {
    if let Ok(ip) = host.parse::<IpAddr>() {
        if is_private_or_reserved(ip) {
            return Err(Error::SsrfBlocked(format!("{ip} is private/reserved")));
        }
        return Ok(());
    }

    let addrs = tokio::net::lookup_host((host, port))
        .await
        .map_err(|e| Error::HttpError(format!("DNS resolution failed for {host}: {e}")))?;

    let mut any = false;
    for addr in addrs {
        any = true;
        if is_private_or_reserved(addr.ip()) {
            return Err(Error::SsrfBlocked(format!("{host} resolves to {} (private/reserved)", addr.ip())));
        }
    }

    if !any {
        return Err(Error::HttpError(format!("DNS resolution returned no addresses for {host}")));
    }

    Ok(())
}
