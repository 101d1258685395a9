use std::panic;
use std::thread;

use http::StatusCode;
use modkit_ecode::{
    CodeAllocator, CodeError, ErrorCode, MessageRegistry, common, new_code, registry,
};

#[test]
fn global_registry_is_seeded_with_common_messages() {
    let codes = common();
    assert_eq!(codes.not_found.message(), "resource not found");
    assert_eq!(codes.ok.message(), "ok");
    assert_eq!(
        registry().lookup(codes.conflict.value()).as_deref(),
        Some("resource conflict")
    );
}

#[test]
fn concurrent_first_callers_share_one_registry() {
    let seen: Vec<usize> = thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|_| s.spawn(|| std::ptr::from_ref(MessageRegistry::global()) as usize))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert!(seen.windows(2).all(|w| w[0] == w[1]));
}

#[test]
fn unregistered_code_falls_back_to_its_name() {
    let code = new_code(31_001, "ReportTimeout");
    assert_eq!(code.message(), "ReportTimeout");
    assert_eq!(code.to_string(), "ReportTimeout");
    assert_eq!(code.http_status(), StatusCode::BAD_REQUEST);
}

#[test]
fn global_allocator_rejects_duplicates() {
    let _first = new_code(31_002, "InvoiceNotFound");

    let err = CodeAllocator::global()
        .try_new_code(31_002, "ReceiptNotFound")
        .unwrap_err();
    assert!(err.to_string().contains("31002"));
}

#[test]
#[should_panic(expected = "already exists")]
fn global_fatal_constructor_panics_on_duplicate() {
    let _first = new_code(31_003, "First");
    let _second = new_code(31_003, "Second");
}

#[test]
fn http_layer_can_work_through_the_trait() {
    fn respond(err: &dyn ErrorCode) -> (StatusCode, String) {
        (err.http_status(), err.message())
    }

    let codes = common();
    assert_eq!(
        respond(&codes.unauthorized),
        (StatusCode::UNAUTHORIZED, "authentication required".to_owned())
    );
    assert_eq!(
        respond(&codes.internal_error),
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal server error".to_owned()
        )
    );
}

#[test]
#[should_panic(expected = "code 7 already exists")]
fn declaring_a_reserved_value_fails_at_declaration() {
    let _code = new_code(7, "UserNotFound");
}

#[test]
fn lookups_survive_a_rejected_reserved_value() {
    let err = CodeAllocator::global()
        .try_new_code(7, "UserNotFound")
        .unwrap_err();
    assert_eq!(
        err,
        CodeError::DuplicateCodeValue {
            value: 7,
            name: "UserNotFound"
        }
    );

    let report = new_code(31_004, "ReportMissing");
    for _ in 0..2 {
        let messages = panic::catch_unwind(|| (common().not_found.message(), report.message()));
        assert_eq!(
            messages.ok(),
            Some(("resource not found".to_owned(), "ReportMissing".to_owned()))
        );
    }
}
