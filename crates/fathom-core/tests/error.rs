use fathom_core::FathomError;

#[test]
fn all_error_variants_display() {
    let errors = vec![
        FathomError::Connection("endpoint unreachable".into()),
        FathomError::NotConnected,
        FathomError::Validation("index name is empty".into()),
        FathomError::Remote("mapping conflict".into()),
    ];
    for err in &errors {
        assert!(!err.to_string().is_empty());
    }
}

#[test]
fn remote_message_is_preserved() {
    let err = FathomError::Remote("document missing: msg/tweet/9".into());
    assert!(err.to_string().contains("document missing: msg/tweet/9"));
}

#[test]
fn retryability_split() {
    assert!(FathomError::Connection("down".into()).is_retryable());
    assert!(FathomError::Remote("busy".into()).is_retryable());
    assert!(!FathomError::NotConnected.is_retryable());
    assert!(!FathomError::Validation("bad".into()).is_retryable());
}
