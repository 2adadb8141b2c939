use sha2::{Digest, Sha256};

/// Hex SHA-256 of the whitespace-collapsed, lower-cased body text. Absent or
/// blank text has no fingerprint.
pub fn fingerprint(text: Option<&str>) -> Option<String> {
    let normalized = normalize_body(text?);
    if normalized.is_empty() {
        return None;
    }

    let mut hasher = Sha256::new();
    hasher.update(normalized.as_bytes());
    Some(format!("{:x}", hasher.finalize()))
}

fn normalize_body(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_and_blank_have_no_fingerprint() {
        assert_eq!(fingerprint(None), None);
        assert_eq!(fingerprint(Some("")), None);
        assert_eq!(fingerprint(Some(" \n\t ")), None);
    }

    #[test]
    fn test_whitespace_and_case_do_not_matter() {
        let a = fingerprint(Some("Same   content\nhere "));
        let b = fingerprint(Some("same content here"));
        assert!(a.is_some());
        assert_eq!(a, b);
    }

    #[test]
    fn test_fixed_length_hex() {
        let hash = fingerprint(Some("abc")).unwrap();
        assert_eq!(hash.len(), 64);
        assert_eq!(
            hash,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_different_text_differs() {
        assert_ne!(fingerprint(Some("same content")), fingerprint(Some("different")));
    }
}
