//! Email address check: a local part up to 64 characters, an `@`, and a
//! host acceptable to [`is_host`].

use std::sync::LazyLock;

use regex::Regex;

use crate::formats::host::{HostKind, MAX_DOMAIN_LENGTH, is_host};

const MAX_LOCAL_LENGTH: usize = 64;

/// `<local>@<domain>` at their individual maximums.
pub const MAX_EMAIL_LENGTH: usize = MAX_LOCAL_LENGTH + 1 + MAX_DOMAIN_LENGTH;

// Comments are parenthesized runs at either end of the local part.
static COMMENTS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\([^)]*\))?([^(]*)(\([^)]*\))?$").unwrap());

static DOTTED_ATEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9!#$%&'*+/=?^_`.{|}~-]+$").unwrap());

// Printable ASCII plus latin-1, with backslash and double quote excluded
// separately.
static QUOTED_TEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\x20-\x7e\xa0-\xff]*$").unwrap());

/// True when `value` is a plausible email address whose domain is
/// acceptable as one of `kinds`.
#[must_use]
pub fn is_email(value: &str, kinds: &[HostKind]) -> bool {
    let mut parts = value.splitn(3, '@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };

    if !is_host(domain, kinds) || local.len() > MAX_LOCAL_LENGTH {
        return false;
    }

    let local = match COMMENTS.captures(local) {
        Some(captures) => captures.get(2).map_or("", |m| m.as_str()),
        None => local,
    };

    if let Some(quoted) = local
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    {
        return QUOTED_TEXT.is_match(quoted) && !quoted.contains(['\\', '"']);
    }

    if local.starts_with('.') || local.ends_with('.') || local.contains("..") {
        return false;
    }
    !local.is_empty() && DOTTED_ATEXT.is_match(local)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const DOMAIN: &[HostKind] = &[HostKind::Domain];

    #[rstest]
    #[case("simple@example.com", true)]
    #[case("very.common@example.com", true)]
    #[case("user+tag@example.com", true)]
    #[case("x@example.com", true)]
    #[case("plain-address", false)]
    #[case("a@b@example.com", false)]
    #[case("@example.com", false)]
    #[case("user@localhost", false)]
    fn basics(#[case] value: &str, #[case] valid: bool) {
        assert_eq!(is_email(value, DOMAIN), valid);
    }

    #[rstest]
    #[case(".leading@example.com", false)]
    #[case("trailing.@example.com", false)]
    #[case("double..dot@example.com", false)]
    #[case("one.dot@example.com", true)]
    fn dot_placement(#[case] value: &str, #[case] valid: bool) {
        assert_eq!(is_email(value, DOMAIN), valid);
    }

    #[rstest]
    #[case("\"john doe\"@example.com", true)]
    #[case("\"very..unusual\"@example.com", true)]
    #[case("\"back\\slash\"@example.com", false)]
    fn quoted_locals(#[case] value: &str, #[case] valid: bool) {
        assert_eq!(is_email(value, DOMAIN), valid);
    }

    #[rstest]
    #[case("(comment)user@example.com", true)]
    #[case("user(comment)@example.com", true)]
    fn comments_are_stripped(#[case] value: &str, #[case] valid: bool) {
        assert_eq!(is_email(value, DOMAIN), valid);
    }

    #[test]
    fn local_part_length_limit() {
        let at_limit = format!("{}@example.com", "a".repeat(64));
        assert!(is_email(&at_limit, DOMAIN));
        let over = format!("{}@example.com", "a".repeat(65));
        assert!(!is_email(&over, DOMAIN));
    }

    #[test]
    fn ip_domains_only_when_permitted() {
        assert!(!is_email("user@127.0.0.1", &[HostKind::Ipv6]));
        assert!(is_email("user@127.0.0.1", &[HostKind::Ip]));
    }
}
