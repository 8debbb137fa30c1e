//! Ethereum address validation functions.

use sha3::{Digest, Keccak256};

/// Check if a given string is a valid Ethereum address.
///
/// All-lowercase and all-uppercase addresses are accepted as-is; mixed-case
/// addresses must carry a correct EIP-55 checksum.
pub fn is_valid_eth_address(address: &str) -> bool {
    // Must be 42 characters: "0x" + 40 hex digits
    if address.len() != 42 {
        return false;
    }

    // Must start with "0x" or "0X"
    if !address.starts_with("0x") && !address.starts_with("0X") {
        return false;
    }

    let digits = &address[2..];
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return false;
    }

    let has_lower = digits.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = digits.chars().any(|c| c.is_ascii_uppercase());
    if has_lower && has_upper {
        return &to_checksum_address(address)[2..] == digits;
    }
    true
}

/// Returns the EIP-55 checksummed form of a 40-hex-digit address.
pub fn to_checksum_address(address: &str) -> String {
    let lower = address
        .trim_start_matches("0x")
        .trim_start_matches("0X")
        .to_ascii_lowercase();
    let hash = Keccak256::digest(lower.as_bytes());

    let checksummed: String = lower
        .chars()
        .enumerate()
        .map(|(i, c)| {
            let byte = hash[i / 2];
            let nibble = if i % 2 == 0 { byte >> 4 } else { byte & 0x0f };
            if c.is_ascii_alphabetic() && nibble >= 8 {
                c.to_ascii_uppercase()
            } else {
                c
            }
        })
        .collect();
    format!("0x{}", checksummed)
}

/// Shortened form used in headers, e.g. `0x5aAe…BeAed`.
pub fn short_address(address: &str) -> String {
    if address.len() <= 12 {
        return address.to_string();
    }
    match (address.get(..6), address.get(address.len() - 5..)) {
        (Some(head), Some(tail)) => format!("{}…{}", head, tail),
        _ => address.to_string(),
    }
}
