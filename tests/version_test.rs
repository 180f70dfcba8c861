// tests/version_test.rs
//
// End-to-end checks of the version algebra: parse/format round trips, the
// bump operations, and the pre-release increment grammar.

use verbump::domain::{
    extract_pre_release_base, increment_pre_release, BumpKind, BumpLabel, SemanticVersion,
};

#[test]
fn test_parse_format_round_trip_is_stable() {
    let inputs = [
        "1.2.3",
        "v1.2.3",
        "  0.1.0 ",
        "1.2.3-rc.1",
        "1.2.3-rc-1",
        "1.2.3-rc1",
        "1.2.3+build.5",
        "2.0.0-beta.2+exp.sha.5114f85",
    ];

    for input in inputs {
        let once = SemanticVersion::parse(input).unwrap();
        let twice = SemanticVersion::parse(&once.to_string()).unwrap();
        assert_eq!(once, twice, "round trip failed for '{}'", input);
    }
}

#[test]
fn test_major_bump_resets_lower_components() {
    let v = SemanticVersion::new(2, 5, 7);
    assert_eq!(v.bump(BumpLabel::Major), SemanticVersion::new(3, 0, 0));

    // Holds regardless of minor/patch values
    for (minor, patch) in [(0, 0), (99, 1), (3, 1000)] {
        let v = SemanticVersion::new(1, minor, patch);
        assert_eq!(v.bump(BumpLabel::Major), SemanticVersion::new(2, 0, 0));
    }
}

#[test]
fn test_pre_release_increment_preserves_separator() {
    assert_eq!(increment_pre_release("rc.9", "rc"), "rc.10");
    assert_eq!(increment_pre_release("rc-9", "rc"), "rc-10");
    assert_eq!(increment_pre_release("rc9", "rc"), "rc10");
}

#[test]
fn test_pre_release_label_switch_resets_counter() {
    assert_eq!(increment_pre_release("beta.3", "alpha"), "alpha.1");
}

#[test]
fn test_extract_base() {
    assert_eq!(extract_pre_release_base("rc.12"), "rc");
    assert_eq!(extract_pre_release_base("rc12"), "rc");
    assert_eq!(extract_pre_release_base("alpha"), "alpha");
}

#[test]
fn test_auto_bump_promotes_pre_release() {
    let v = SemanticVersion::with_parts(1, 2, 3, "alpha.1", "");
    assert_eq!(v.bump_next(), SemanticVersion::new(1, 2, 3));
}

#[test]
fn test_auto_bump_special_case_is_exact() {
    assert_eq!(
        SemanticVersion::new(0, 9, 0).bump_next(),
        SemanticVersion::new(0, 10, 0)
    );
    assert_eq!(
        SemanticVersion::new(0, 9, 1).bump_next(),
        SemanticVersion::new(0, 9, 2)
    );
}

#[test]
fn test_parse_rejects_malformed_and_oversized_input() {
    for input in ["", "1", "1.2", "1.2.3.4", "x.y.z", "1.2.-3", "1..3"] {
        assert!(
            SemanticVersion::parse(input).is_err(),
            "expected parse failure for '{}'",
            input
        );
    }

    let oversized = format!("1.2.3+{}", "b".repeat(130));
    assert!(SemanticVersion::parse(&oversized).is_err());
}

#[test]
fn test_pre_release_cycle_through_bump_kinds() {
    // Final -> rc.1 -> rc.2 -> released
    let start = SemanticVersion::parse("1.4.0").unwrap();

    let rc1 = BumpKind::Pre(Some("rc".to_string())).plan(&start).unwrap();
    assert_eq!(rc1.to_string(), "1.4.1-rc.1");

    let rc2 = BumpKind::Pre(Some("rc".to_string())).plan(&rc1).unwrap();
    assert_eq!(rc2.to_string(), "1.4.1-rc.2");

    let released = BumpKind::Release.plan(&rc2).unwrap();
    assert_eq!(released.to_string(), "1.4.1");
}
