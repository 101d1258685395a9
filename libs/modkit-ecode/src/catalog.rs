//! Built-in catalog of common error codes and their default messages.
//!
//! Values `1..=99` are reserved for this catalog. Service-specific codes
//! should be declared above that range.

use std::sync::LazyLock;

use http::StatusCode;

use crate::code::{self, Code, CodeAllocator, CodeDef};
use crate::error::CodeError;
use crate::registry::MessageTable;
use crate::status::OK_CODE_VALUE;

/// Process-wide allocator together with the common codes reserved in it.
struct GlobalCatalog {
    allocator: CodeAllocator,
    common: CommonCodes,
}

static GLOBAL: LazyLock<GlobalCatalog> = LazyLock::new(|| {
    let allocator = CodeAllocator::new();
    let common = CommonCodes::mint(&allocator).unwrap_or_else(|e| code::fatal(&e));
    GlobalCatalog { allocator, common }
});

/// Codes shared by every service.
#[derive(Debug, Clone, Copy)]
pub struct CommonCodes {
    pub ok: Code,
    pub created: Code,
    pub accepted: Code,
    pub bad_request: Code,
    pub unauthorized: Code,
    pub forbidden: Code,
    pub not_found: Code,
    pub conflict: Code,
    pub internal_error: Code,
    pub service_unavailable: Code,
}

impl CommonCodes {
    /// Mint the common codes from `allocator`.
    ///
    /// Either all codes are minted or none are.
    ///
    /// # Errors
    /// Returns [`CodeError::DuplicateCodeValue`] if any reserved value was
    /// already taken in `allocator`.
    pub fn mint(allocator: &CodeAllocator) -> Result<Self, CodeError> {
        let [
            ok,
            created,
            accepted,
            bad_request,
            unauthorized,
            forbidden,
            not_found,
            conflict,
            internal_error,
            service_unavailable,
        ] = allocator.try_new_codes([
            CodeDef::new(i64::from(OK_CODE_VALUE), "OK"),
            CodeDef::new(2, "Created"),
            CodeDef::new(3, "Accepted"),
            CodeDef::new(4, "BadRequest"),
            CodeDef::new(5, "Unauthorized"),
            CodeDef::new(6, "Forbidden"),
            CodeDef::new(7, "NotFound"),
            CodeDef::new(8, "Conflict"),
            CodeDef::new(9, "InternalError").with_status(StatusCode::INTERNAL_SERVER_ERROR),
            CodeDef::new(10, "ServiceUnavailable").with_status(StatusCode::SERVICE_UNAVAILABLE),
        ])?;

        Ok(Self {
            ok,
            created,
            accepted,
            bad_request,
            unauthorized,
            forbidden,
            not_found,
            conflict,
            internal_error,
            service_unavailable,
        })
    }

    /// Default messages for the common codes.
    #[must_use]
    pub fn default_messages(&self) -> MessageTable {
        [
            (self.ok, "ok"),
            (self.created, "resource created"),
            (self.accepted, "request accepted"),
            (self.bad_request, "bad request"),
            (self.unauthorized, "authentication required"),
            (self.forbidden, "access denied"),
            (self.not_found, "resource not found"),
            (self.conflict, "resource conflict"),
            (self.internal_error, "internal server error"),
            (self.service_unavailable, "service temporarily unavailable"),
        ]
        .into_iter()
        .collect()
    }

    /// All common codes in value order.
    #[must_use]
    pub fn all(&self) -> [Code; 10] {
        [
            self.ok,
            self.created,
            self.accepted,
            self.bad_request,
            self.unauthorized,
            self.forbidden,
            self.not_found,
            self.conflict,
            self.internal_error,
            self.service_unavailable,
        ]
    }
}

/// Common codes reserved in the process-wide allocator.
///
/// They are minted when the global allocator is first touched, before any
/// application code can mint through it.
#[must_use]
pub fn common() -> &'static CommonCodes {
    &GLOBAL.common
}

pub(crate) fn global_allocator() -> &'static CodeAllocator {
    &GLOBAL.allocator
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn common_codes_classify_as_expected() {
        let codes = CommonCodes::mint(&CodeAllocator::new()).unwrap();

        let statuses: Vec<_> = codes.all().iter().map(Code::http_status).collect();
        assert_eq!(
            statuses,
            vec![
                StatusCode::OK,
                StatusCode::CREATED,
                StatusCode::ACCEPTED,
                StatusCode::BAD_REQUEST,
                StatusCode::UNAUTHORIZED,
                StatusCode::FORBIDDEN,
                StatusCode::NOT_FOUND,
                StatusCode::CONFLICT,
                StatusCode::INTERNAL_SERVER_ERROR,
                StatusCode::SERVICE_UNAVAILABLE,
            ]
        );
    }

    #[test]
    fn every_common_code_has_a_default_message() {
        let codes = CommonCodes::mint(&CodeAllocator::new()).unwrap();
        let messages = codes.default_messages();

        assert_eq!(messages.len(), codes.all().len());
        assert_eq!(messages.get(codes.not_found.value()), Some("resource not found"));
    }

    #[test]
    fn minting_twice_in_one_allocator_fails() {
        let alloc = CodeAllocator::new();
        CommonCodes::mint(&alloc).unwrap();

        let err = CommonCodes::mint(&alloc).unwrap_err();
        assert_eq!(
            err,
            CodeError::DuplicateCodeValue {
                value: OK_CODE_VALUE,
                name: "OK"
            }
        );
    }

    #[test]
    fn reserved_value_taken_elsewhere_is_reported() {
        let alloc = CodeAllocator::new();
        let _taken = alloc.new_code(7, "OrderNotFound");

        assert!(matches!(
            CommonCodes::mint(&alloc),
            Err(CodeError::DuplicateCodeValue { value: 7, .. })
        ));
        assert_eq!(alloc.len(), 1);
        assert!(!alloc.is_registered(OK_CODE_VALUE));

        // A retry still reports the real conflict
        assert!(matches!(
            CommonCodes::mint(&alloc),
            Err(CodeError::DuplicateCodeValue { value: 7, .. })
        ));
    }

    #[test]
    fn global_allocator_starts_with_common_codes_reserved() {
        assert!(std::ptr::eq(common(), common()));
        for code in common().all() {
            assert!(CodeAllocator::global().is_registered(code.value()));
        }
        assert!(matches!(
            CodeAllocator::global().try_new_code(7, "UserNotFound"),
            Err(CodeError::DuplicateCodeValue { value: 7, .. })
        ));
    }
}
