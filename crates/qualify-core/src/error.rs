use crate::op::Operator;
use qualify_schema::{catalog::CatalogError, types::Type};
use std::fmt;
use thiserror::Error as ThisError;

///
/// TranslateError
///
/// Every failure `lower` or `raise` can report. All variants are local and
/// deterministic; retrying the same call yields the same error.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[remain::sorted]
pub enum TranslateError {
    #[error("tree depth exceeds limit of {limit}")]
    DepthLimitExceeded { limit: usize },

    #[error("operator '{op}' is not legal for attribute '{attribute}' of type {ty}")]
    IllegalOperator {
        attribute: String,
        ty: Type,
        op: Operator,
    },

    #[error("invalid row: {message}")]
    InvalidRow { message: String },

    #[error("encoded tree nests {nesting} levels deep, limit is {limit}")]
    NestingLimitExceeded { nesting: usize, limit: usize },

    #[error("literal {literal} does not match attribute '{attribute}' of type {ty}")]
    TypeMismatch {
        attribute: String,
        ty: Type,
        literal: String,
    },

    #[error("unrecognized expression shape: {message}")]
    UnrecognizedShape { message: String },

    #[error("attribute '{attribute}' does not resolve on class '{class}'")]
    UnresolvedAttribute { class: String, attribute: String },
}

impl TranslateError {
    pub(crate) fn unresolved(class: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::UnresolvedAttribute {
            class: class.into(),
            attribute: attribute.into(),
        }
    }

    pub(crate) fn shape(message: impl Into<String>) -> Self {
        Self::UnrecognizedShape {
            message: message.into(),
        }
    }

    pub(crate) fn invalid_row(message: impl Into<String>) -> Self {
        Self::InvalidRow {
            message: message.into(),
        }
    }

    /// Stable classification of this error.
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::UnresolvedAttribute { .. } => ErrorClass::NotFound,
            Self::IllegalOperator { .. }
            | Self::TypeMismatch { .. }
            | Self::UnrecognizedShape { .. }
            | Self::DepthLimitExceeded { .. }
            | Self::NestingLimitExceeded { .. } => ErrorClass::Unsupported,
            Self::InvalidRow { .. } => ErrorClass::InvariantViolation,
        }
    }
}

// The catalog's own lookup failures surface as unresolved attributes.
impl From<CatalogError> for TranslateError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::UnknownClass { class } => Self::UnresolvedAttribute {
                attribute: String::new(),
                class,
            },
            CatalogError::UnknownAttribute { class, attribute } => {
                Self::UnresolvedAttribute { class, attribute }
            }
        }
    }
}

///
/// ErrorClass
///
/// Coarse classification shared by trace events and callers that only need
/// to know what kind of failure occurred.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ErrorClass {
    NotFound,
    Unsupported,
    InvariantViolation,
}

impl ErrorClass {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Unsupported => "unsupported",
            Self::InvariantViolation => "invariant_violation",
        }
    }
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_offender() {
        let err = TranslateError::IllegalOperator {
            attribute: "active".into(),
            ty: Type::Bool,
            op: Operator::Eq,
        };

        assert_eq!(
            err.to_string(),
            "operator '==' is not legal for attribute 'active' of type Bool"
        );
        assert_eq!(err.class(), ErrorClass::Unsupported);
    }

    #[test]
    fn nesting_limit_is_unsupported() {
        let err = TranslateError::NestingLimitExceeded {
            nesting: 122,
            limit: 120,
        };

        assert_eq!(
            err.to_string(),
            "encoded tree nests 122 levels deep, limit is 120"
        );
        assert_eq!(err.class(), ErrorClass::Unsupported);
    }

    #[test]
    fn catalog_failures_are_unresolved_attributes() {
        let err = TranslateError::from(CatalogError::UnknownAttribute {
            class: "Order".into(),
            attribute: "colour".into(),
        });

        assert_eq!(err, TranslateError::unresolved("Order", "colour"));
        assert_eq!(err.class(), ErrorClass::NotFound);
    }
}
