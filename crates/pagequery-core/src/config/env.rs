#[must_use]
pub(super) fn read_non_empty_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|raw| raw.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[must_use]
pub(super) fn parse_enabled_default_true(raw: Option<&str>) -> bool {
    !matches!(
        raw.map(|value| value.trim().to_ascii_lowercase())
            .as_deref(),
        Some("off" | "none" | "0" | "false" | "no")
    )
}

/// Comma-separated list; blank items are dropped.
#[must_use]
pub(super) fn parse_list(raw: Option<&str>) -> Vec<String> {
    raw.map(|value| {
        value
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(ToString::to_string)
            .collect()
    })
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::{parse_enabled_default_true, parse_list};

    #[test]
    fn enabled_flags_default_to_true() {
        assert!(parse_enabled_default_true(None));
        assert!(parse_enabled_default_true(Some("on")));
        assert!(parse_enabled_default_true(Some("anything")));
        assert!(!parse_enabled_default_true(Some(" OFF ")));
        assert!(!parse_enabled_default_true(Some("0")));
        assert!(!parse_enabled_default_true(Some("false")));
    }

    #[test]
    fn list_parser_skips_blank_items() {
        assert_eq!(parse_list(None), Vec::<String>::new());
        assert_eq!(
            parse_list(Some(" playground:* , ,wiki:secret ")),
            vec!["playground:*", "wiki:secret"]
        );
    }
}
