use std::net::IpAddr;

/// Validate an IP address (e.g., "192.168.1.1" or "2001:db8::1").
pub fn is_valid_ip(ip: &str) -> bool {
    ip.parse::<IpAddr>().is_ok()
}

/// Validate a network address with optional prefix length
/// (e.g., "10.0.0.0/24", "2001:db8::/48", "10.1.2.3").
pub fn is_valid_cidr(cidr: &str) -> bool {
    let (addr, len) = match cidr.split_once('/') {
        Some((addr, len)) => (addr, Some(len)),
        None => (cidr, None),
    };
    let Ok(addr) = addr.parse::<IpAddr>() else {
        return false;
    };
    let max_len = if addr.is_ipv4() { 32 } else { 128 };
    match len {
        None => true,
        Some(len) => len.parse::<u8>().map(|l| l <= max_len).unwrap_or(false),
    }
}

/// Parse the yes/no style booleans used in seed files.
/// A blank value is false; anything unrecognised is None.
pub fn parse_bool_word(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "0" | "f" | "false" | "n" | "no" | "off" => Some(false),
        "1" | "t" | "true" | "y" | "yes" | "on" => Some(true),
        _ => None,
    }
}
