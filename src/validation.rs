use regex::Regex;

/// Validate and normalize a CUIT entered by the operator.
///
/// Accepts the number with or without separators ("20-12345678-9",
/// "20 12345678 9", "20123456789") and returns the numeric value used as
/// the registry lookup key. Returns `None` unless the cleaned input is
/// exactly 11 decimal digits.
///
/// No check-digit verification is performed; the registry itself rejects
/// CUITs with a bad verifier digit.
pub fn validate_cuit(raw: &str) -> Option<u64> {
    if raw.trim().is_empty() {
        return None;
    }

    // Strip dashes and whitespace, the separators operators actually type
    let separators = Regex::new(r"[-\s]").unwrap();
    let cleaned = separators.replace_all(raw, "");

    if cleaned.len() != 11 || !cleaned.chars().all(|c| c.is_ascii_digit()) {
        tracing::warn!("❌ Invalid CUIT input (expected 11 digits): {}", raw);
        return None;
    }

    cleaned.parse::<u64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_cuit_accepted() {
        assert_eq!(validate_cuit("20123456789"), Some(20123456789));
        assert_eq!(validate_cuit("27999999990"), Some(27999999990));
    }

    #[test]
    fn test_separators_ignored() {
        assert_eq!(validate_cuit("20-12345678-9"), Some(20123456789));
        assert_eq!(validate_cuit("20 12345678 9"), Some(20123456789));
        assert_eq!(validate_cuit(" 20-12345678-9 "), Some(20123456789));
        assert_eq!(validate_cuit("2-0-1-2-3-4-5-6-7-8-9"), Some(20123456789));
    }

    #[test]
    fn test_formatting_does_not_change_value() {
        assert_eq!(
            validate_cuit("20-12345678-9"),
            validate_cuit("20123456789")
        );
    }

    #[test]
    fn test_wrong_length_rejected() {
        assert_eq!(validate_cuit("2012345678"), None);
        assert_eq!(validate_cuit("201234567890"), None);
        assert_eq!(validate_cuit("20-1234567-8"), None);
        assert_eq!(validate_cuit(""), None);
        assert_eq!(validate_cuit("   "), None);
    }

    #[test]
    fn test_non_digits_rejected() {
        assert_eq!(validate_cuit("20a23456789"), None);
        assert_eq!(validate_cuit("20.12345678.9"), None);
        assert_eq!(validate_cuit("veinte millones"), None);
        assert_eq!(validate_cuit("20_12345678_9"), None);
    }

    #[test]
    fn test_leading_zeros_kept_numeric() {
        assert_eq!(validate_cuit("00000000001"), Some(1));
    }
}
