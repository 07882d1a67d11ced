//! Hostname and IP-literal checks, RFC 1035 flavored.

use std::net::{Ipv4Addr, Ipv6Addr};

use serde::Serialize;

/// See RFC 1035 section 2.3.4.
pub const MAX_DOMAIN_LENGTH: usize = 255;

const MAX_LABEL_LENGTH: usize = 63;

/// Host representations a field can accept. `Ip` covers both versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HostKind {
    Domain,
    Ip,
    Ipv4,
    Ipv6,
}

fn is_hostname(value: &str) -> bool {
    if value.len() > MAX_DOMAIN_LENGTH {
        return false;
    }
    if !value
        .bytes()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || matches!(b, b'.' | b'_' | b'-'))
    {
        return false;
    }

    let labels: Vec<&str> = value.split('.').collect();
    labels.len() > 1
        && labels
            .iter()
            .all(|label| !label.is_empty() && label.len() <= MAX_LABEL_LENGTH)
}

fn is_ipv4(value: &str) -> bool {
    value.parse::<Ipv4Addr>().is_ok()
}

fn is_ipv6(value: &str) -> bool {
    value.parse::<Ipv6Addr>().is_ok()
}

/// True when `value` is acceptable as any of the permitted `kinds`.
#[must_use]
pub fn is_host(value: &str, kinds: &[HostKind]) -> bool {
    let allows = |kind| kinds.contains(&kind);

    if (allows(HostKind::Ip) || allows(HostKind::Ipv4)) && is_ipv4(value) {
        return true;
    }
    if (allows(HostKind::Ip) || allows(HostKind::Ipv6)) && is_ipv6(value) {
        return true;
    }
    allows(HostKind::Domain) && is_hostname(value)
}
