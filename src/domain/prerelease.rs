//! Pre-release increment grammar
//!
//! Pre-release identifiers in the wild come in three separator styles:
//! `rc.1` (dot), `rc-1` (dash), and `rc1` (bare). Incrementing preserves
//! whatever style the current identifier already uses; switching to a new
//! base label always resets to `base.1` with the dot separator.

/// Separator between a pre-release base label and its numeric suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Separator {
    Dot,
    Dash,
    None,
}

impl Separator {
    fn as_str(&self) -> &'static str {
        match self {
            Separator::Dot => ".",
            Separator::Dash => "-",
            Separator::None => "",
        }
    }
}

/// Increment a pre-release identifier against a base label
///
/// If `current` is `base` followed by a recognized separator and a run of
/// digits, the number is incremented and the separator preserved:
/// `rc.9 -> rc.10`, `rc-9 -> rc-10`, `rc9 -> rc10`. In every other case
/// (`current == base`, a different base label, or an unrecognized suffix)
/// the cycle restarts at `base.1`.
pub fn increment_pre_release(current: &str, base: &str) -> String {
    match split_suffix(current, base) {
        Some((separator, n)) => format!("{}{}{}", base, separator.as_str(), n + 1),
        None => format!("{}.1", base),
    }
}

/// Extract the base label from a pre-release identifier
///
/// Strips a trailing `.N` suffix when N is numeric (`rc.12 -> rc`),
/// otherwise strips bare trailing digits (`rc12 -> rc`), otherwise returns
/// the identifier unchanged.
pub fn extract_pre_release_base(pre: &str) -> &str {
    if let Some((head, tail)) = pre.rsplit_once('.') {
        if !tail.is_empty() && tail.chars().all(|c| c.is_ascii_digit()) {
            return head;
        }
    }

    let stripped = pre.trim_end_matches(|c: char| c.is_ascii_digit());
    if stripped.len() < pre.len() {
        return stripped;
    }

    pre
}

/// Split `current` into its separator and numeric suffix relative to `base`.
///
/// Returns None when the identifier does not follow the
/// base-separator-digits shape, which callers treat as a fresh cycle.
fn split_suffix(current: &str, base: &str) -> Option<(Separator, u64)> {
    if current == base || base.is_empty() {
        return None;
    }

    let remainder = current.strip_prefix(base)?;

    let (separator, digits) = if let Some(rest) = remainder.strip_prefix('.') {
        (Separator::Dot, rest)
    } else if let Some(rest) = remainder.strip_prefix('-') {
        (Separator::Dash, rest)
    } else {
        (Separator::None, remainder)
    };

    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    digits.parse::<u64>().ok().map(|n| (separator, n))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_increment_dot_separator() {
        assert_eq!(increment_pre_release("rc.9", "rc"), "rc.10");
    }

    #[test]
    fn test_increment_dash_separator() {
        assert_eq!(increment_pre_release("rc-9", "rc"), "rc-10");
    }

    #[test]
    fn test_increment_bare_separator() {
        assert_eq!(increment_pre_release("rc9", "rc"), "rc10");
    }

    #[test]
    fn test_increment_fresh_label_defaults_to_dot() {
        assert_eq!(increment_pre_release("", "rc"), "rc.1");
        assert_eq!(increment_pre_release("rc", "rc"), "rc.1");
    }

    #[test]
    fn test_increment_label_switch_resets_counter() {
        assert_eq!(increment_pre_release("beta.3", "alpha"), "alpha.1");
        assert_eq!(increment_pre_release("rc-7", "beta"), "beta.1");
    }

    #[test]
    fn test_increment_unrecognized_suffix_resets() {
        assert_eq!(increment_pre_release("rc.x", "rc"), "rc.1");
        assert_eq!(increment_pre_release("rc.1.2", "rc"), "rc.1");
        assert_eq!(increment_pre_release("rc.9beta", "rc"), "rc.1");
    }

    #[test]
    fn test_increment_large_numbers() {
        assert_eq!(increment_pre_release("rc.99", "rc"), "rc.100");
        assert_eq!(increment_pre_release("beta999", "beta"), "beta1000");
    }

    #[test]
    fn test_extract_base_dot_number() {
        assert_eq!(extract_pre_release_base("rc.12"), "rc");
        assert_eq!(extract_pre_release_base("alpha.1"), "alpha");
    }

    #[test]
    fn test_extract_base_bare_digits() {
        assert_eq!(extract_pre_release_base("rc12"), "rc");
        assert_eq!(extract_pre_release_base("beta1"), "beta");
    }

    #[test]
    fn test_extract_base_no_trailing_number() {
        assert_eq!(extract_pre_release_base("alpha"), "alpha");
        assert_eq!(extract_pre_release_base("rc.final"), "rc.final");
    }

    #[test]
    fn test_extract_then_increment_is_stable() {
        // The base recovered from an identifier increments that identifier
        let pre = "rc-4";
        let base = extract_pre_release_base(pre);
        assert_eq!(base, "rc-");

        let pre = "rc.4";
        let base = extract_pre_release_base(pre);
        assert_eq!(increment_pre_release(pre, base), "rc.5");
    }
}
