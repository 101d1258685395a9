//! Error code identities and the allocator that mints them.
//!
//! Codes are declared once at startup and live for the whole process. The
//! allocator keeps a ledger of every value it has handed out so two features
//! can never share a numeric code.

use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::num::NonZeroU32;

use http::StatusCode;
use parking_lot::Mutex;

use crate::catalog;
use crate::error::CodeError;
use crate::registry::MessageRegistry;
use crate::status::{self, OK_CODE_VALUE};

/// Interface exposed to HTTP-facing layers.
///
/// Handlers pick the response status from [`ErrorCode::http_status`] and the
/// body text from [`ErrorCode::message`], without knowing how codes are stored.
pub trait ErrorCode: std::error::Error + Send + Sync {
    /// Numeric code value.
    fn code(&self) -> u32;

    /// Symbolic name, also used as the fallback message.
    fn name(&self) -> &str;

    /// HTTP status to answer with.
    fn http_status(&self) -> StatusCode;

    /// Display message from the active message table.
    fn message(&self) -> String;
}

/// Immutable, process-unique error code.
///
/// Identity is the numeric value: equality, ordering and hashing ignore the
/// name and the explicit status.
#[derive(Debug, Clone, Copy)]
pub struct Code {
    value: NonZeroU32,
    name: &'static str,
    status: Option<StatusCode>,
}

impl Code {
    #[must_use]
    pub fn value(&self) -> u32 {
        self.value.get()
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Status set at creation time, if any.
    #[must_use]
    pub fn explicit_status(&self) -> Option<StatusCode> {
        self.status
    }

    /// HTTP status for this code.
    ///
    /// An explicit status wins. Otherwise the canonical OK code maps to
    /// `200 OK` and every other code is classified by name.
    #[must_use]
    pub fn http_status(&self) -> StatusCode {
        if let Some(status) = self.status {
            return status;
        }
        if self.value() == OK_CODE_VALUE {
            return StatusCode::OK;
        }
        status::classify(self.name)
    }

    /// Message from the process-wide registry, falling back to the name.
    #[must_use]
    pub fn message(&self) -> String {
        MessageRegistry::global().message(self)
    }

    /// Message from the given registry, falling back to the name.
    #[must_use]
    pub fn message_in(&self, registry: &MessageRegistry) -> String {
        registry.message(self)
    }
}

impl PartialEq for Code {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Code {}

impl Hash for Code {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl PartialOrd for Code {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Code {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.value.cmp(&other.value)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl std::error::Error for Code {}

impl ErrorCode for Code {
    fn code(&self) -> u32 {
        self.value()
    }

    fn name(&self) -> &str {
        self.name
    }

    fn http_status(&self) -> StatusCode {
        Code::http_status(self)
    }

    fn message(&self) -> String {
        Code::message(self)
    }
}

/// Definition of one code in a batch passed to [`CodeAllocator::try_new_codes`].
#[derive(Debug, Clone, Copy)]
pub struct CodeDef {
    pub value: i64,
    pub name: &'static str,
    pub status: Option<StatusCode>,
}

impl CodeDef {
    #[must_use]
    pub const fn new(value: i64, name: &'static str) -> Self {
        Self {
            value,
            name,
            status: None,
        }
    }

    #[must_use]
    pub const fn with_status(mut self, status: StatusCode) -> Self {
        self.status = Some(status);
        self
    }
}

/// Mints [`Code`]s and remembers every value handed out.
///
/// The ledger only grows. Most services use the process-wide instance from
/// [`CodeAllocator::global`]; tests and embedded catalogs can own their own.
#[derive(Debug, Default)]
pub struct CodeAllocator {
    registered: Mutex<HashSet<u32>>,
}

impl CodeAllocator {
    /// Create an allocator with an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide allocator.
    ///
    /// The common catalog's values are reserved in it before it is handed
    /// out, so application codes can never claim them.
    #[must_use]
    pub fn global() -> &'static CodeAllocator {
        catalog::global_allocator()
    }

    /// Mint a code, reporting contract violations as errors.
    ///
    /// # Errors
    /// Returns [`CodeError::InvalidCodeValue`] if `value` is not in `1..=u32::MAX`,
    /// and [`CodeError::DuplicateCodeValue`] if `value` was already minted here.
    pub fn try_new_code(&self, value: i64, name: &'static str) -> Result<Code, CodeError> {
        self.mint(value, name, None)
    }

    /// Mint a code carrying an explicit HTTP status.
    ///
    /// # Errors
    /// Same as [`CodeAllocator::try_new_code`].
    pub fn try_new_code_with_status(
        &self,
        value: i64,
        name: &'static str,
        status: StatusCode,
    ) -> Result<Code, CodeError> {
        self.mint(value, name, Some(status))
    }

    /// Mint a code, aborting on contract violations.
    ///
    /// # Panics
    /// Panics if `value` is not positive or was already minted.
    #[must_use]
    pub fn new_code(&self, value: i64, name: &'static str) -> Code {
        self.mint(value, name, None).unwrap_or_else(|e| fatal(&e))
    }

    /// Mint a code carrying an explicit HTTP status, aborting on contract violations.
    ///
    /// # Panics
    /// Panics if `value` is not positive or was already minted.
    #[must_use]
    pub fn new_code_with_status(
        &self,
        value: i64,
        name: &'static str,
        status: StatusCode,
    ) -> Code {
        self.mint(value, name, Some(status))
            .unwrap_or_else(|e| fatal(&e))
    }

    /// Mint a batch of codes, all or nothing.
    ///
    /// Every value is checked against the ledger and the rest of the batch
    /// under one lock; on error the ledger is left unchanged.
    ///
    /// # Errors
    /// Returns [`CodeError::InvalidCodeValue`] for the first value not in
    /// `1..=u32::MAX`, and [`CodeError::DuplicateCodeValue`] for the first value
    /// already minted here or repeated within the batch.
    pub fn try_new_codes<const N: usize>(
        &self,
        defs: [CodeDef; N],
    ) -> Result<[Code; N], CodeError> {
        let mut codes = Vec::with_capacity(N);
        for def in defs {
            codes.push(Code {
                value: positive(def.value)?,
                name: def.name,
                status: def.status,
            });
        }

        let mut registered = self.registered.lock();
        let mut batch = HashSet::with_capacity(N);
        if let Some(dup) = codes
            .iter()
            .find(|c| registered.contains(&c.value()) || !batch.insert(c.value()))
        {
            return Err(CodeError::DuplicateCodeValue {
                value: dup.value(),
                name: dup.name,
            });
        }
        registered.extend(codes.iter().map(Code::value));
        drop(registered);

        tracing::trace!(count = N, "error code batch minted");
        Ok(std::array::from_fn(|i| codes[i]))
    }

    /// Whether `value` has been minted by this allocator.
    #[must_use]
    pub fn is_registered(&self, value: u32) -> bool {
        self.registered.lock().contains(&value)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.registered.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registered.lock().is_empty()
    }

    fn mint(
        &self,
        value: i64,
        name: &'static str,
        status: Option<StatusCode>,
    ) -> Result<Code, CodeError> {
        let nz = positive(value)?;

        if !self.registered.lock().insert(nz.get()) {
            return Err(CodeError::DuplicateCodeValue {
                value: nz.get(),
                name,
            });
        }

        tracing::trace!(code = nz.get(), name, "error code minted");
        Ok(Code {
            value: nz,
            name,
            status,
        })
    }
}

/// Mint a code from the process-wide allocator.
///
/// # Panics
/// Panics if `value` is not positive or was already minted in this process.
#[must_use]
pub fn new_code(value: i64, name: &'static str) -> Code {
    CodeAllocator::global().new_code(value, name)
}

fn positive(value: i64) -> Result<NonZeroU32, CodeError> {
    u32::try_from(value)
        .ok()
        .and_then(NonZeroU32::new)
        .ok_or(CodeError::InvalidCodeValue { value })
}

pub(crate) fn fatal(err: &CodeError) -> ! {
    tracing::error!(error = %err, "invalid error code catalog");
    panic!("{err}");
}
