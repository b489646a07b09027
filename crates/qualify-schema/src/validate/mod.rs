//! Catalog validation orchestration and shared helpers.

pub mod naming;
pub mod reference;

use crate::{build::ClassDecl, error::ErrorTree};

/// Run full catalog validation in a staged, deterministic order.
pub(crate) fn validate_catalog(decls: &[ClassDecl]) -> Result<(), ErrorTree> {
    let mut errors = ErrorTree::new();

    // Phase 1: per-class naming and attribute shape.
    naming::validate_naming(decls, &mut errors);
    reference::validate_attribute_shapes(decls, &mut errors);

    // Phase 2: catalog-wide invariants that need every class in view.
    reference::validate_parents(decls, &mut errors);
    reference::validate_referenced_classes(decls, &mut errors);
    reference::validate_inherited_names(decls, &mut errors);

    errors.result()
}

/// Identifier rule shared by classes and attributes: ASCII letter or
/// underscore, then letters, digits or underscores.
#[must_use]
pub fn is_identifier(name: &str, max_len: usize) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };

    name.len() <= max_len
        && (first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

///
/// TESTS
///
