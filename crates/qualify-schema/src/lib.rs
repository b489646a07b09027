//! Class catalog for qualifications: typed attributes, single-parent class
//! descriptions, and the validated, immutable catalog consumed by the
//! translator as a read-only lookup service.

pub mod build;
pub mod catalog;
pub mod error;
pub mod node;
pub mod types;
pub mod validate;

/// Maximum length for class identifiers.
pub const MAX_CLASS_NAME_LEN: usize = 64;

/// Maximum length for attribute query names.
pub const MAX_ATTRIBUTE_NAME_LEN: usize = 64;

use crate::{build::BuildError, catalog::CatalogError};
use thiserror::Error as ThisError;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        build::{CatalogBuilder, ClassDecl},
        catalog::Catalog,
        err,
        error::ErrorTree,
        node::{Attribute, ClassDescription},
        types::{Cardinality, Type},
    };
    pub use serde::{Deserialize, Serialize};
}

///
/// Error
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    BuildError(#[from] BuildError),

    #[error(transparent)]
    CatalogError(#[from] CatalogError),
}
