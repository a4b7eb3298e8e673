use netstate_core::errors::{NetStateError, NsError, NsErrorKind};

#[test]
fn test_malformed_address_carries_input() {
    let err = NetStateError::MalformedAddress {
        input: "10.0.0.300".to_string(),
        reason: "invalid IPv4 address syntax".to_string(),
    };

    let ns_err: NsError = err.into();

    assert_eq!(ns_err.kind(), NsErrorKind::MalformedAddress);
    assert_eq!(ns_err.code(), "ERR_MALFORMED_ADDRESS");
    assert_eq!(ns_err.input(), Some("10.0.0.300"));
    assert_eq!(ns_err.op(), Some("canonicalize"));
}

#[test]
fn test_prefix_length_shares_malformed_address_class() {
    let err = NetStateError::PrefixLengthOutOfRange {
        input: "10.0.0.0".to_string(),
        length: 33,
        max: 32,
    };

    let ns_err: NsError = err.into();

    assert_eq!(ns_err.kind(), NsErrorKind::MalformedAddress);
    assert!(ns_err.message().contains("33"));
}

#[test]
fn test_negative_prefix_length_reads_as_out_of_range() {
    let ns_err: NsError = NetStateError::PrefixLengthOutOfRange {
        input: "10.0.0.0".to_string(),
        length: -1,
        max: 32,
    }
    .into();

    assert_eq!(ns_err.message(), "prefix length -1 out of range 0..=32");
}

#[test]
fn test_kind_mismatch_is_contract_violation() {
    let ns_err: NsError = NetStateError::KindMismatch {
        left: "sequence",
        right: "mapping",
    }
    .into();

    assert_eq!(ns_err.kind(), NsErrorKind::ContractViolation);
    assert_eq!(ns_err.code(), "ERR_CONTRACT_VIOLATION");
    assert_eq!(ns_err.op(), Some("compare"));
}

#[test]
fn test_invalid_input_keeps_reason() {
    let ns_err: NsError = NetStateError::InvalidInput {
        reason: "unknown state category 'Routes'".to_string(),
    }
    .into();

    assert_eq!(ns_err.kind(), NsErrorKind::InvalidInput);
    assert!(ns_err.message().contains("Routes"));
}

#[test]
fn test_builder_context_appears_in_display() {
    let err = NsError::new(NsErrorKind::InvalidInput)
        .with_op("load_goals")
        .with_category("NEIGHBORS")
        .with_message("schema_version must be 0");

    let text = err.to_string();
    assert!(text.starts_with("[ERR_INVALID_INPUT] in operation 'load_goals'"));
    assert!(text.contains("(category: NEIGHBORS)"));
}

#[test]
fn test_error_kind_code_mapping() {
    let kinds = vec![
        (NsErrorKind::MalformedAddress, "ERR_MALFORMED_ADDRESS"),
        (NsErrorKind::ContractViolation, "ERR_CONTRACT_VIOLATION"),
        (NsErrorKind::InvalidInput, "ERR_INVALID_INPUT"),
        (NsErrorKind::Io, "ERR_IO"),
        (NsErrorKind::Serialization, "ERR_SERIALIZATION"),
    ];

    for (kind, expected_code) in kinds {
        assert_eq!(kind.code(), expected_code);
    }
}
