//! Centralized validation functions for ouilookup.
//!
//! This module provides unified validation for:
//! - MAC addresses and OUI prefixes (`AA:BB:CC`, `AA-BB-CC`, `AABBCC`)
//! - Country codes
//! - Registry source URLs

use anyhow::{bail, Result};

/// Number of octets in an OUI prefix.
pub const PREFIX_OCTETS: usize = 3;

/// Number of octets in a full MAC-48 address.
pub const MAC_OCTETS: usize = 6;

/// Parse `groups` hex octets, each optionally followed by a single `:` or
/// `-` (but not after the last one). Returns the octets or `None` if the
/// input does not match exactly.
fn parse_octets(input: &str, groups: usize) -> Option<Vec<u8>> {
    if input.is_empty() || !input.is_ascii() {
        return None;
    }

    let bytes = input.as_bytes();
    let mut octets = Vec::with_capacity(groups);
    let mut pos = 0;

    for i in 0..groups {
        let pair = bytes.get(pos..pos + 2)?;
        let hi = (pair[0] as char).to_digit(16)?;
        let lo = (pair[1] as char).to_digit(16)?;
        octets.push((hi * 16 + lo) as u8);
        pos += 2;

        if i + 1 < groups && matches!(bytes.get(pos), Some(b':') | Some(b'-')) {
            pos += 1;
        }
    }

    (pos == bytes.len()).then_some(octets)
}

fn format_octets(octets: &[u8]) -> String {
    octets
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(":")
}

/// Check whether a string is a full MAC address.
///
/// # Examples
/// ```
/// use ouilookup::validation::is_valid_mac;
/// assert!(is_valid_mac("BC:23:92:42:42:42"));
/// assert!(is_valid_mac("bc-23-92-42-42-42"));
/// assert!(is_valid_mac("BC2392424242"));
/// assert!(!is_valid_mac("BC:23:92"));
/// assert!(!is_valid_mac(""));
/// ```
pub fn is_valid_mac(mac: &str) -> bool {
    parse_octets(mac, MAC_OCTETS).is_some()
}

/// Check whether a string is a 24-bit OUI prefix.
///
/// # Examples
/// ```
/// use ouilookup::validation::is_valid_prefix;
/// assert!(is_valid_prefix("00:22:72"));
/// assert!(is_valid_prefix("00-22-72"));
/// assert!(!is_valid_prefix("00:22:7"));
/// assert!(!is_valid_prefix("00:22:72:11"));
/// ```
pub fn is_valid_prefix(prefix: &str) -> bool {
    parse_octets(prefix, PREFIX_OCTETS).is_some()
}

/// Canonical `XX:XX:XX` form of a prefix, or `None` if it is malformed.
///
/// # Examples
/// ```
/// use ouilookup::validation::canonical_prefix;
/// assert_eq!(canonical_prefix("00-22-72").as_deref(), Some("00:22:72"));
/// assert_eq!(canonical_prefix("bc2392").as_deref(), Some("BC:23:92"));
/// assert_eq!(canonical_prefix("nope"), None);
/// ```
pub fn canonical_prefix(prefix: &str) -> Option<String> {
    parse_octets(prefix, PREFIX_OCTETS).map(|o| format_octets(&o))
}

/// Canonical OUI (`XX:XX:XX`) of a full MAC address, or `None` if the
/// address is malformed.
///
/// # Examples
/// ```
/// use ouilookup::validation::mac_oui;
/// assert_eq!(mac_oui("bc-23-92-42-42-42").as_deref(), Some("BC:23:92"));
/// assert_eq!(mac_oui("BC:23:92"), None);
/// ```
pub fn mac_oui(mac: &str) -> Option<String> {
    parse_octets(mac, MAC_OCTETS).map(|o| format_octets(&o[..PREFIX_OCTETS]))
}

/// Uppercased two-character country code, or `None` for anything else.
///
/// # Examples
/// ```
/// use ouilookup::validation::canonical_country_code;
/// assert_eq!(canonical_country_code("de").as_deref(), Some("DE"));
/// assert_eq!(canonical_country_code("DEU"), None);
/// ```
pub fn canonical_country_code(code: &str) -> Option<String> {
    (code.chars().count() == 2).then(|| code.to_uppercase())
}

/// Validate a registry source URL.
///
/// # Errors
/// Returns an error unless the URL uses `http://` or `https://` and has a host part.
///
/// # Examples
/// ```
/// use ouilookup::validation::validate_url;
/// assert!(validate_url("https://standards-oui.ieee.org/oui.txt").is_ok());
/// assert!(validate_url("ftp://example.com/oui.txt").is_err());
/// ```
pub fn validate_url(url: &str) -> Result<()> {
    if url.is_empty() {
        bail!("Source URL cannot be empty");
    }

    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"));

    match rest {
        None => bail!("Source URL must use http:// or https://: {}", url),
        Some(r) if r.is_empty() || r.starts_with('/') => {
            bail!("Source URL has no host: {}", url)
        }
        Some(_) => Ok(()),
    }
}
