pub mod product;
pub mod vendor;

/// Trims a string and maps whitespace-only input to `None`. Field comparison
/// and merge decisions treat `""`, `"  "` and `NULL` as the same absent value.
pub fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Normalizes a human-entered supplier name into a stable slug:
/// lowercase alphanumerics with single `_` separators.
pub fn normalize_slug(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    let mut out = String::new();
    let mut last_sep = false;
    for ch in raw.to_lowercase().chars() {
        if ch.is_alphanumeric() {
            out.push(ch);
            last_sep = false;
        } else if ch == '-' || ch == '_' || ch.is_whitespace() {
            if !last_sep {
                out.push('_');
                last_sep = true;
            }
        }
    }
    let out = out.trim_matches('_').to_string();
    if out.is_empty() {
        None
    } else {
        Some(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_empty_maps_blank_to_none() {
        assert_eq!(non_empty(Some("  ")), None);
        assert_eq!(non_empty(Some("")), None);
        assert_eq!(non_empty(None), None);
        assert_eq!(non_empty(Some(" G19 ")), Some("G19"));
    }

    #[test]
    fn normalize_slug_collapses_separators() {
        assert_eq!(
            normalize_slug("Sports South"),
            Some("sports_south".to_string())
        );
        assert_eq!(normalize_slug("  Bill-Hicks & Co. "), Some("bill_hicks_co".to_string()));
        assert_eq!(normalize_slug("--"), None);
    }
}
