use crate::error::{internal::InternalError, AppError};

/// Parses a u64 value from String
///
/// # Arguments
/// - `value` - The String to attempt to parse into `u64`
///
/// # Returns
/// - `Ok(u64)` - Successfully parsed String to `u64`
/// - `Err(AppError::InternalErr(ParseStringId))` - Failed to parse
///   the string as a u64
pub fn parse_u64_from_string(value: String) -> Result<u64, AppError> {
    let result = value
        .parse::<u64>()
        .map_err(|e| InternalError::ParseStringId { value, source: e })?;

    Ok(result)
}

/// Normalizes a wallet address for identity comparisons.
///
/// Wallet addresses are compared case-insensitively, so `0xABC...` and `0xabc...`
/// refer to the same holder. Surrounding whitespace is dropped.
pub fn normalize_wallet(address: &str) -> String {
    address.trim().to_lowercase()
}

/// Checks that a normalized address is `0x` followed by 40 hex digits.
pub fn is_wallet_address(address: &str) -> bool {
    address
        .strip_prefix("0x")
        .is_some_and(|hex| hex.len() == 40 && hex.bytes().all(|b| b.is_ascii_hexdigit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_mixed_case_wallets() {
        assert_eq!(
            normalize_wallet(" 0xABCdef0000000000000000000000000000000001 "),
            "0xabcdef0000000000000000000000000000000001"
        );
    }

    #[test]
    fn parses_valid_snowflake() {
        assert_eq!(
            parse_u64_from_string("123456789012345678".to_string()).unwrap(),
            123456789012345678
        );
    }

    #[test]
    fn rejects_invalid_snowflake() {
        assert!(parse_u64_from_string("not-a-number".to_string()).is_err());
    }

    #[test]
    fn accepts_only_hex_wallets() {
        assert!(is_wallet_address("0xabcdef0000000000000000000000000000000001"));
        assert!(!is_wallet_address("0xabcdef"));
        assert!(!is_wallet_address("abcdef00000000000000000000000000000000012x"));
        assert!(!is_wallet_address("0x../../owners/v2?limit=1#0000000000000000000"));
        assert!(!is_wallet_address("0xabcdef000000000000000000000000000000000g"));
    }
}
