use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ReelError::configuration("x")
            .to_string()
            .contains("configuration error:")
    );
    assert!(
        ReelError::primitive("x")
            .to_string()
            .contains("primitive error:")
    );
    assert!(
        ReelError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn located_errors_name_the_index() {
    let err = ReelError::transition(3, "too long");
    assert_eq!(
        err.to_string(),
        "configuration error in transition #3: too long"
    );
    assert_eq!(err.site(), Some(ConfigSite::Transition(3)));
    assert!(err.is_configuration());

    let err = ReelError::scene(0, "duration must be > 0");
    assert_eq!(err.site(), Some(ConfigSite::Scene(0)));
}

#[test]
fn out_of_range_reports_budget() {
    let err = ReelError::OutOfRange {
        frame: 900,
        budget: 870,
    };
    assert_eq!(err.to_string(), "frame 900 is out of range [0, 870)");
    assert!(!err.is_configuration());
    assert_eq!(err.site(), None);
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ReelError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
