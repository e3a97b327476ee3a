//! Size-label normalization.

/// Converts a `K`/`M`/`G` suffixed size label to a byte count.
///
/// The suffix is case-insensitive and binary (`1K` = 1024). Anything that
/// is not an unsigned integer followed by one of those suffixes is returned
/// unchanged, as is a product that overflows `u64`.
pub fn convert_to_bytes(label: &str) -> String {
    let upper = label.to_ascii_uppercase();
    let (digits, shift) = match upper.as_bytes().last() {
        Some(b'K') => (&upper[..upper.len() - 1], 10),
        Some(b'M') => (&upper[..upper.len() - 1], 20),
        Some(b'G') => (&upper[..upper.len() - 1], 30),
        _ => return label.to_string(),
    };

    match digits.parse::<u64>() {
        Ok(n) => n
            .checked_mul(1u64 << shift)
            .map(|bytes| bytes.to_string())
            .unwrap_or_else(|| label.to_string()),
        Err(_) => label.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_to_bytes_suffixes() {
        assert_eq!(convert_to_bytes("1K"), "1024");
        assert_eq!(convert_to_bytes("10M"), "10485760");
        assert_eq!(convert_to_bytes("100G"), "107374182400");
        assert_eq!(convert_to_bytes("100m"), "104857600");
        assert_eq!(convert_to_bytes("4k"), "4096");
    }

    #[test]
    fn test_convert_to_bytes_passthrough() {
        for label in ["HotGarbage", "", "KG", "M", "1", "512", "1T", "-"] {
            assert_eq!(convert_to_bytes(label), label);
        }
    }

    #[test]
    fn test_convert_to_bytes_overflow_passthrough() {
        let label = "99999999999999999G";
        assert_eq!(convert_to_bytes(label), label);
    }
}
