//! Qualification trees and the translator between them: editor-facing row
//! trees, canonical expression trees, `lower`/`raise`, persistence, and the
//! ergonomics exported via the `prelude`.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod error;
pub mod expr;
pub mod obs;
pub mod op;
pub mod render;
pub mod row;
pub mod serialize;
pub mod translate;
pub mod value;

///
/// Prelude
///
/// Tree vocabulary and the two translation entry points.
///

pub mod prelude {
    pub use crate::{
        error::TranslateError,
        expr::{AttrRef, Expr, OpName, OpNode},
        op::{Operator, Quantifier},
        row::RowNode,
        translate::{TranslateConfig, Translator, lower, raise},
        value::Literal,
    };
}
