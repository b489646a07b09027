//! ## Crate layout
//! - `core`: row trees, expression trees, the translator, persistence,
//!   rendering, and trace sinks.
//! - `schema`: attribute types, class descriptions, and the validated
//!   catalog the translator resolves against.
//! - `error`: one public error type over both crates.
//!
//! The `prelude` module covers what a caller needs to build a catalog,
//! assemble rows, and translate them.

pub use qualify_core as core;
pub use qualify_schema as schema;

pub mod error;

pub use error::{Error, ErrorKind, ErrorOrigin};

use qualify_schema::{build::CatalogConfig, catalog::Catalog};

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build a catalog from its TOML declaration.
pub fn load_catalog(source: &str) -> Result<Catalog, Error> {
    Ok(CatalogConfig::load(source)?)
}

///
/// Prelude
///

pub mod prelude {
    pub use crate::core::{
        error::TranslateError,
        expr::{AttrRef, Expr, OpName, OpNode},
        op::{Operator, Quantifier},
        row::RowNode,
        serialize::{deserialize, serialize},
        translate::{TranslateConfig, Translator, lower, raise},
        value::{Float64, Interval, Literal, Timestamp},
    };
    pub use crate::schema::{
        build::{CatalogBuilder, CatalogConfig, ClassDecl},
        catalog::Catalog,
        node::{Attribute, ClassDescription},
        types::{Cardinality, Type},
    };
    pub use serde::{Deserialize, Serialize};
}
