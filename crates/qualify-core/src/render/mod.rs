//! Human-readable text for both tree families. Diagnostics only; nothing
//! parses this output back.

use crate::{
    expr::{AttrRef, Expr, OpNode},
    op::Quantifier,
    row::{RowKind, RowNode},
};
use std::fmt::{self, Write as _};

const INDENT: &str = "  ";

impl fmt::Display for AttrRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl fmt::Display for OpNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, operand) in self.operands.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{operand}")?;
        }
        f.write_char(')')
    }
}

/// Prefix form, e.g. `and(==(.(owner, name), "ann"), isnull(tags))`.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Op(node) => write!(f, "{node}"),
            Self::Attr(attr) => write!(f, "{attr}"),
            Self::Literal(value) => write!(f, "{value}"),
        }
    }
}

/// Indented outline, one row per line.
impl fmt::Display for RowNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_row(f, self, 0)
    }
}

fn write_row(f: &mut fmt::Formatter<'_>, row: &RowNode, level: usize) -> fmt::Result {
    for _ in 0..level {
        f.write_str(INDENT)?;
    }

    if row.is_root() {
        write!(f, "{} {}", row.qualified_class, row.quantifier)?;
    } else {
        match row.kind() {
            RowKind::Group => {
                write_quantifiers(f, row.quantifier, row.quantifier2)?;
                f.write_char(' ')?;
                write_path(f, row)?;
            }
            RowKind::Count => {
                f.write_str("count(")?;
                write_path(f, row)?;
                f.write_char(')')?;
                write_comparison(f, row)?;
            }
            RowKind::Leaf => {
                write_path(f, row)?;
                write_comparison(f, row)?;
            }
        }
    }

    for child in &row.children {
        f.write_char('\n')?;
        write_row(f, child, level + 1)?;
    }

    Ok(())
}

fn write_quantifiers(
    f: &mut fmt::Formatter<'_>,
    outer: Quantifier,
    inner: Option<Quantifier>,
) -> fmt::Result {
    match inner {
        Some(inner) => write!(f, "{outer}/{inner}"),
        None => write!(f, "{outer}"),
    }
}

fn write_path(f: &mut fmt::Formatter<'_>, row: &RowNode) -> fmt::Result {
    for (i, attr) in row.attribute_path.iter().enumerate() {
        if i > 0 {
            f.write_char('.')?;
        }
        f.write_str(&attr.label())?;
    }

    if let Some(name) = &row.prop_name {
        write!(f, "[{name:?}]")?;
    }
    if let Some(ty) = row.prop_type {
        write!(f, "<{ty}>")?;
    }

    Ok(())
}

fn write_comparison(f: &mut fmt::Formatter<'_>, row: &RowNode) -> fmt::Result {
    if let Some(op) = row.attribute_operator {
        write!(f, " {op}")?;
    }
    if let Some(value) = &row.value {
        write!(f, " {value}")?;
    }

    Ok(())
}

///
/// TESTS
///
