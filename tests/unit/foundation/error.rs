use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ReelError::configuration("x")
            .to_string()
            .contains("configuration error:")
    );
    assert!(ReelError::backend("x").to_string().contains("backend error:"));
    assert!(
        ReelError::measurement("x")
            .to_string()
            .contains("measurement error:")
    );
    assert!(ReelError::render("x").to_string().contains("render error:"));
    assert!(
        ReelError::validation("x")
            .to_string()
            .contains("validation error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ReelError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
