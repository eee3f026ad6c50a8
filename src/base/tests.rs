use crate::base::neterror::NetError;

#[test]
fn test_net_error_roundtrip() {
    // Standard Chromium error
    let original = NetError::NameNotResolved;
    let code = original.as_i32();
    assert_eq!(code, -105);
    let converted = NetError::from(code);
    assert!(matches!(converted, NetError::NameNotResolved));

    // Custom error
    let custom = NetError::EngineStopped;
    let custom_code = custom.as_i32();
    assert_eq!(custom_code, -10001);
    let custom_converted = NetError::from(custom_code);
    assert!(matches!(custom_converted, NetError::EngineStopped));
}

#[test]
fn test_unknown_error() {
    let err = NetError::from(-9999);
    assert!(matches!(err, NetError::Unknown(-9999)));
}

#[test]
fn test_detailed_variants_share_codes() {
    let err = NetError::NameNotResolvedFor {
        domain: "ghost.invalid".into(),
        reason: "no such host".into(),
    };
    assert_eq!(err.as_i32(), NetError::NameNotResolved.as_i32());
    assert_eq!(err.to_string(), "Name not resolved for ghost.invalid: no such host");
}

#[test]
fn test_classification() {
    assert!(NetError::NameNotResolved.is_not_found());
    assert!(!NetError::NameResolutionFailed.is_not_found());
    assert!(NetError::Aborted.is_cancelled());
    assert!(!NetError::NameResolutionFailed.is_cancelled());
}

#[test]
fn test_collision_avoidance() {
    // Engine codes must stay clear of the Chromium DNS range (-800 to -899)
    let dns_range = -899..=-800;

    for err in [
        NetError::UnknownService {
            service: "gopher".into(),
        },
        NetError::EngineStopped,
        NetError::WorkerStartFailed {
            reason: "spawn".into(),
        },
    ] {
        let code = err.as_i32();
        assert!(!dns_range.contains(&code));
        // Every engine code maps back to the same variant
        assert_eq!(
            std::mem::discriminant(&NetError::from(code)),
            std::mem::discriminant(&err)
        );
    }
}
