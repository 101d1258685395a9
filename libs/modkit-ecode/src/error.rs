/// Errors raised while minting error codes.
///
/// Both variants are programming errors in the code catalog. The fatal
/// constructors turn them into a panic so the process never starts with an
/// inconsistent catalog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodeError {
    #[error("code must be greater than 0 and fit in u32, got {value}")]
    InvalidCodeValue { value: i64 },

    #[error("code {value} already exists (requested as '{name}')")]
    DuplicateCodeValue { value: u32, name: &'static str },
}
