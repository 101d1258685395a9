//! HTTP status classification derived from a code's symbolic name.
//!
//! The classification is a substring heuristic kept for compatibility with
//! existing catalogs: the first marker contained in the name wins, and names
//! with no marker fall back to `400 Bad Request`. Codes minted with an
//! explicit status (see [`crate::CodeAllocator::new_code_with_status`]) bypass
//! it entirely.

use http::StatusCode;

/// Value of the canonical "OK" code. Always classified as `200 OK`,
/// regardless of its name.
pub const OK_CODE_VALUE: u32 = 1;

/// Name markers in priority order. Matching is case-sensitive.
const NAME_MARKERS: &[(&str, StatusCode)] = &[
    ("OK", StatusCode::OK),
    ("Created", StatusCode::CREATED),
    ("Accepted", StatusCode::ACCEPTED),
    ("BadRequest", StatusCode::BAD_REQUEST),
    ("Unauthorized", StatusCode::UNAUTHORIZED),
    ("Forbidden", StatusCode::FORBIDDEN),
    ("NotFound", StatusCode::NOT_FOUND),
    ("Conflict", StatusCode::CONFLICT),
];

/// Classify a symbolic code name into an HTTP status.
#[must_use]
pub fn classify(name: &str) -> StatusCode {
    NAME_MARKERS
        .iter()
        .find(|(marker, _)| name.contains(marker))
        .map_or(StatusCode::BAD_REQUEST, |&(_, status)| status)
}
