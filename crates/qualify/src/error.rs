use derive_more::Display;
use qualify_core::{
    error::{ErrorClass, TranslateError},
    serialize::SerializeError,
};
use qualify_schema::{
    build::{BuildError, ConfigError},
    catalog::CatalogError,
};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// Error
/// Public error type with a stable kind + origin taxonomy.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize, ThisError)]
#[error("{message}")]
pub struct Error {
    pub kind: ErrorKind,
    pub origin: ErrorOrigin,
    pub message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            kind,
            origin,
            message: message.into(),
        }
    }
}

impl From<TranslateError> for Error {
    fn from(err: TranslateError) -> Self {
        let kind = match err.class() {
            ErrorClass::NotFound => ErrorKind::NotFound,
            ErrorClass::Unsupported => ErrorKind::Unsupported,
            ErrorClass::InvariantViolation => ErrorKind::InvariantViolation,
        };

        Self::new(kind, ErrorOrigin::Translate, err.to_string())
    }
}

impl From<SerializeError> for Error {
    fn from(err: SerializeError) -> Self {
        Self::new(ErrorKind::Serialize, ErrorOrigin::Serialize, err.to_string())
    }
}

impl From<CatalogError> for Error {
    fn from(err: CatalogError) -> Self {
        Self::new(ErrorKind::NotFound, ErrorOrigin::Catalog, err.to_string())
    }
}

impl From<BuildError> for Error {
    fn from(err: BuildError) -> Self {
        Self::new(ErrorKind::Invalid, ErrorOrigin::Catalog, err.to_string())
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::new(ErrorKind::Invalid, ErrorOrigin::Catalog, err.to_string())
    }
}

///
/// ErrorKind
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
#[remain::sorted]
pub enum ErrorKind {
    Invalid,
    InvariantViolation,
    NotFound,
    Serialize,
    Unsupported,
}

///
/// ErrorOrigin
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
#[remain::sorted]
pub enum ErrorOrigin {
    Catalog,
    Serialize,
    Translate,
}

///
/// TESTS
///
