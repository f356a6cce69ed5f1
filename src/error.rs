use thiserror::Error;

use crate::Signature;

/// Errors surfaced by the configuration, dispatch and verification
/// layers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// The member expression did not name a property or operation.
    #[error("unsupported member expression: {0:?} is not a member name")]
    UnsupportedExpression(String),

    /// No exact or wildcard behavior matched the call.
    #[error("✗ no behavior configured for `{signature}` with arguments [{arguments}]")]
    Unresolved {
        signature: Signature,
        arguments: String,
    },

    /// `Mock::invoke` was given a member expression containing `any()`.
    #[error("cannot invoke `{0}`: a call needs concrete arguments, not `any()`")]
    WildcardInvocation(String),

    /// The matched behavior produces a different output type than the
    /// one requested by the caller.
    #[error("behavior for `{0}` was configured with a different output type")]
    TypeMismatch(Signature),

    #[error("✗ `{source_text}` was called {actual} time(s), expected {expected}\n{configured}")]
    VerificationFailed {
        source_text: String,
        expected: usize,
        actual: usize,
        configured: String,
    },
}
