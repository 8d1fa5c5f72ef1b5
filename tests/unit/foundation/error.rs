use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        FramefitError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        FramefitError::evaluation("x")
            .to_string()
            .contains("evaluation error:")
    );
    assert!(
        FramefitError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = FramefitError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
