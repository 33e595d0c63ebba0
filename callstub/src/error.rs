// vim: tw=80
//! Error types

use std::fmt;

use thiserror::Error;

use crate::call::Call;

/// A call that no [`Stub`](crate::Stub) entry was configured to handle
#[derive(Clone, Debug)]
pub struct UnexpectedStubCall {
    call: Call,
    configured: Vec<Call>
}

impl UnexpectedStubCall {
    pub(crate) fn new(call: Call, configured: Vec<Call>) -> Self {
        UnexpectedStubCall{call, configured}
    }

    /// The offending call
    pub fn call(&self) -> &Call {
        &self.call
    }

    /// Every configured pattern, in lookup order
    pub fn configured(&self) -> &[Call] {
        &self.configured
    }

    /// Was the stub completely empty?
    pub fn is_unconfigured(&self) -> bool {
        self.configured.is_empty()
    }
}

impl fmt::Display for UnexpectedStubCall {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.configured.is_empty() {
            return f.write_str("Unexpected call of an unconfigured stub");
        }
        writeln!(f, "Unexpected stub call:")?;
        writeln!(f, "    {}", self.call)?;
        writeln!(f, "The following calls are configured:")?;
        for c in self.configured.iter() {
            writeln!(f, "    {}", c)?;
        }
        Ok(())
    }
}

impl std::error::Error for UnexpectedStubCall {}

/// Errors returned when invoking a stub.
///
/// `E` is the type of the failures a test configures its stubs to raise.
/// Those come back as [`Error::Raised`], distinct from the stub's own
/// complaints.
#[derive(Debug, Error)]
pub enum Error<E> {
    /// A failure the stub was configured to raise
    #[error("{0}")]
    Raised(E),
    /// No configured pattern matched the call
    #[error(transparent)]
    Unexpected(#[from] UnexpectedStubCall),
    /// The matching entry's sequence of results has run out
    #[error("stub sequence exhausted")]
    Exhausted,
}

impl<E> Error<E> {
    /// The configured failure, if that's what this is
    pub fn raised(self) -> Option<E> {
        match self {
            Error::Raised(e) => Some(e),
            _ => None
        }
    }

    pub fn is_unexpected(&self) -> bool {
        matches!(self, Error::Unexpected(_))
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self, Error::Exhausted)
    }
}

/// Errors from configuring a double with [`when`](crate::when)
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ConfigError {
    /// The double already has a side effect that isn't a stub
    #[error("Mock '{0}' already has a side_effect set defined")]
    SideEffectAlreadySet(String),
}
