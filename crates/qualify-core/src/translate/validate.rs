//! Row-shape checks shared by both translation directions. Lowering runs
//! them on its input rows; raising runs them on every row it rebuilds.

use crate::{
    error::TranslateError,
    op::{ARITHMETIC_LEGAL, Operator, Quantifier},
    row::RowNode,
    translate::path::ResolvedPath,
    value::Literal,
};
use qualify_schema::{node::Attribute, types::Type};

pub(crate) fn check_root(row: &RowNode) -> Result<(), TranslateError> {
    if !row.attribute_path.is_empty() {
        return Err(TranslateError::invalid_row(
            "root row cannot have an attribute path",
        ));
    }
    if !row.quantifier.is_boolean() {
        return Err(TranslateError::invalid_row(format!(
            "root row needs a boolean quantifier, found {}",
            row.quantifier
        )));
    }
    if row.quantifier2.is_some()
        || row.attribute_operator.is_some()
        || row.value.is_some()
        || has_property(row)
    {
        return Err(TranslateError::invalid_row(
            "root row only carries a quantifier and child rows",
        ));
    }

    Ok(())
}

pub(crate) fn check_context(row: &RowNode, class: &str) -> Result<(), TranslateError> {
    if row.qualified_class == class {
        Ok(())
    } else {
        Err(TranslateError::invalid_row(format!(
            "row is qualified on '{}' but evaluated in '{class}'",
            row.qualified_class
        )))
    }
}

pub(crate) fn check_leaf(
    row: &RowNode,
    op: Operator,
    path: &ResolvedPath,
) -> Result<(), TranslateError> {
    let terminal = path.terminal();

    if !row.children.is_empty() {
        return Err(TranslateError::invalid_row(format!(
            "condition on '{}' cannot have child rows",
            terminal.query_name
        )));
    }
    if row.quantifier != Quantifier::All || row.quantifier2.is_some() {
        return Err(TranslateError::invalid_row(format!(
            "condition on '{}' cannot be quantified",
            terminal.query_name
        )));
    }

    let ty = leaf_type(row, terminal)?;
    if !op.is_legal_for(ty) {
        return Err(TranslateError::IllegalOperator {
            attribute: terminal.query_name.clone(),
            ty,
            op,
        });
    }

    match (&row.value, op.is_unary()) {
        (None, true) => Ok(()),
        (Some(value), false) => check_literal(terminal, ty, value),
        (Some(_), true) => Err(TranslateError::invalid_row(format!(
            "operator '{op}' takes no value"
        ))),
        (None, false) => Err(TranslateError::invalid_row(format!(
            "operator '{op}' requires a value"
        ))),
    }
}

pub(crate) fn check_count(
    row: &RowNode,
    op: Operator,
    path: &ResolvedPath,
) -> Result<(), TranslateError> {
    let terminal = path.terminal();

    if !row.children.is_empty() || row.quantifier2.is_some() || has_property(row) {
        return Err(TranslateError::invalid_row(format!(
            "count of '{}' only carries an operator and a value",
            terminal.query_name
        )));
    }
    if !terminal.is_to_many() {
        return Err(TranslateError::invalid_row(format!(
            "count needs a to-many relationship, '{}' is not one",
            terminal.query_name
        )));
    }
    if !ARITHMETIC_LEGAL.contains(&op) {
        return Err(TranslateError::IllegalOperator {
            attribute: terminal.query_name.clone(),
            ty: Type::Int32,
            op,
        });
    }

    match &row.value {
        Some(value) if value.is_count_operand() => Ok(()),
        Some(value) => Err(TranslateError::TypeMismatch {
            attribute: terminal.query_name.clone(),
            ty: Type::Int32,
            literal: value.to_string(),
        }),
        None => Err(TranslateError::invalid_row(format!(
            "count of '{}' requires a value",
            terminal.query_name
        ))),
    }
}

/// Returns the class the group's children are evaluated in.
pub(crate) fn check_group<'p>(
    row: &RowNode,
    path: &'p ResolvedPath,
) -> Result<&'p str, TranslateError> {
    let terminal = path.terminal();

    if !row.quantifier.is_boolean() {
        return Err(TranslateError::invalid_row(format!(
            "group over '{}' needs a boolean quantifier",
            terminal.query_name
        )));
    }
    if row.attribute_operator.is_some() || row.value.is_some() || has_property(row) {
        return Err(TranslateError::invalid_row(format!(
            "group over '{}' cannot carry a comparison",
            terminal.query_name
        )));
    }

    let target = match path.target_class() {
        Some(target) if terminal.is_to_many() => target,
        _ => {
            return Err(TranslateError::invalid_row(format!(
                "group needs a to-many relationship, '{}' is not one",
                terminal.query_name
            )));
        }
    };

    if let Some(quantifier2) = row.quantifier2 {
        if !quantifier2.is_boolean() {
            return Err(TranslateError::invalid_row(format!(
                "inner quantifier over '{}' must be boolean",
                terminal.query_name
            )));
        }
        if path.to_many_segments() < 2 {
            return Err(TranslateError::invalid_row(format!(
                "inner quantifier over '{}' needs a collection inside a collection",
                terminal.query_name
            )));
        }
    }

    Ok(target)
}

// Property-map terminals compare one key, typed by `prop_type`.
fn leaf_type(row: &RowNode, terminal: &Attribute) -> Result<Type, TranslateError> {
    match (terminal.is_property_map(), &row.prop_name, row.prop_type) {
        (true, Some(_), Some(ty)) if ty.is_primitive() => Ok(ty),
        (true, Some(name), Some(ty)) => Err(TranslateError::invalid_row(format!(
            "property '{name}' of '{}' cannot have type {ty}",
            terminal.query_name
        ))),
        (true, _, _) => Err(TranslateError::invalid_row(format!(
            "property map '{}' needs a property name and type",
            terminal.query_name
        ))),
        (false, None, None) => Ok(terminal.ty),
        (false, _, _) => Err(TranslateError::invalid_row(format!(
            "'{}' is not a property map",
            terminal.query_name
        ))),
    }
}

fn check_literal(terminal: &Attribute, ty: Type, value: &Literal) -> Result<(), TranslateError> {
    if value.matches_type(ty) {
        Ok(())
    } else {
        Err(TranslateError::TypeMismatch {
            attribute: terminal.query_name.clone(),
            ty,
            literal: value.to_string(),
        })
    }
}

const fn has_property(row: &RowNode) -> bool {
    row.prop_name.is_some() || row.prop_type.is_some()
}
