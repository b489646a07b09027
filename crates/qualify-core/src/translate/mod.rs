//! Module: translate
//! Responsibility: `lower` (row tree to expression tree) and `raise` (the
//! exact inverse on canonical expressions).
//! Does not own: catalog construction or persistence.
//! Boundary: both directions are pure; the catalog is borrowed read-only and
//! tracing never changes a result.

mod lower;
mod path;
mod raise;
mod validate;

#[cfg(test)]
mod tests;

use crate::{
    error::TranslateError,
    expr::{Expr, OpName, OpNode},
    obs::{TraceDirection, TranslateTraceEvent, TranslateTraceSink},
    op::Quantifier,
    row::RowNode,
    serialize::{MAX_NESTING, expr_nesting, row_nesting},
};
use lower::Lowering;
use qualify_schema::catalog::Catalog;
use raise::Raising;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

///
/// TranslateConfig
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct TranslateConfig {
    /// Deepest row nesting either direction accepts.
    pub max_depth: usize,
}

impl TranslateConfig {
    /// Each group level nests six containers in its encoded expression, so
    /// rows below this depth could not be persisted anyway.
    pub const DEFAULT_MAX_DEPTH: usize = MAX_NESTING / 6;

    #[must_use]
    pub const fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }
}

impl Default for TranslateConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_DEPTH)
    }
}

///
/// Translator
///
/// Catalog, limits and an optional trace sink bundled for repeated calls.
/// Holds no mutable state, so one translator can serve many threads.
///

#[derive(Clone, Copy)]
pub struct Translator<'a> {
    catalog: &'a Catalog,
    config: TranslateConfig,
    sink: Option<&'a dyn TranslateTraceSink>,
}

impl<'a> Translator<'a> {
    #[must_use]
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            config: TranslateConfig::default(),
            sink: None,
        }
    }

    #[must_use]
    pub const fn with_config(mut self, config: TranslateConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn with_sink(mut self, sink: &'a dyn TranslateTraceSink) -> Self {
        self.sink = Some(sink);
        self
    }

    #[must_use]
    pub const fn config(&self) -> TranslateConfig {
        self.config
    }

    #[must_use]
    pub const fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    /// Lower a row tree rooted at `root` into its canonical expression.
    pub fn lower(&self, root: &RowNode) -> Result<Expr, TranslateError> {
        let scope = TraceScope::start(self.sink, TraceDirection::Lower);
        debug!(class = %root.qualified_class, "lowering row tree");

        let result = Lowering {
            catalog: self.catalog,
            max_depth: self.config.max_depth,
        }
        .root(root)
        .and_then(|expr| {
            check_nesting(root, &expr)?;
            Ok(expr)
        });

        match &result {
            Ok(expr) => scope.finish(root, expr),
            Err(err) => scope.error(err),
        }

        result
    }

    /// Raise a canonical expression back into rows qualified on `root_class`.
    pub fn raise(&self, expr: &Expr, root_class: &str) -> Result<RowNode, TranslateError> {
        let scope = TraceScope::start(self.sink, TraceDirection::Raise);
        debug!(class = %root_class, "raising expression");

        let result = Raising {
            catalog: self.catalog,
            max_depth: self.config.max_depth,
        }
        .root(expr, root_class)
        .and_then(|row| {
            check_nesting(&row, expr)?;
            Ok(row)
        });

        match &result {
            Ok(row) => scope.finish(row, expr),
            Err(err) => scope.error(err),
        }

        result
    }
}

/// Lower with the default configuration and no trace sink.
pub fn lower(root: &RowNode, catalog: &Catalog) -> Result<Expr, TranslateError> {
    Translator::new(catalog).lower(root)
}

/// Raise with the default configuration and no trace sink.
pub fn raise(expr: &Expr, root_class: &str, catalog: &Catalog) -> Result<RowNode, TranslateError> {
    Translator::new(catalog).raise(expr, root_class)
}

///
/// TraceScope
/// One translation call as seen by the log and the optional sink.
///

struct TraceScope<'a> {
    sink: Option<&'a dyn TranslateTraceSink>,
    direction: TraceDirection,
}

impl<'a> TraceScope<'a> {
    fn start(sink: Option<&'a dyn TranslateTraceSink>, direction: TraceDirection) -> Self {
        if let Some(sink) = sink {
            sink.on_event(TranslateTraceEvent::Start { direction });
        }

        Self { sink, direction }
    }

    fn finish(self, row: &RowNode, expr: &Expr) {
        let rows = count_u64(row.node_count());
        let exprs = count_u64(expr.node_count());
        trace!(direction = ?self.direction, rows, exprs, "translation finished");

        if let Some(sink) = self.sink {
            sink.on_event(TranslateTraceEvent::Finish {
                direction: self.direction,
                rows,
                exprs,
            });
        }
    }

    fn error(self, err: &TranslateError) {
        let class = err.class();
        debug!(direction = ?self.direction, %class, error = %err, "translation failed");

        if let Some(sink) = self.sink {
            sink.on_event(TranslateTraceEvent::Error {
                direction: self.direction,
                class,
            });
        }
    }
}

// Both trees of a successful translation must decode again once persisted.
fn check_nesting(row: &RowNode, expr: &Expr) -> Result<(), TranslateError> {
    let nesting = row_nesting(row).max(expr_nesting(expr));
    if nesting > MAX_NESTING {
        return Err(TranslateError::NestingLimitExceeded {
            nesting,
            limit: MAX_NESTING,
        });
    }

    Ok(())
}

fn count_u64(count: usize) -> u64 {
    u64::try_from(count).unwrap_or(u64::MAX)
}

/// `G(q, operands)`: `and` for all, `or` for any, `not(or)` for none.
/// The none form is fixed, even for zero or one operand.
pub(crate) fn connective(
    quantifier: Quantifier,
    operands: Vec<Expr>,
) -> Result<Expr, TranslateError> {
    match quantifier {
        Quantifier::All => Ok(Expr::and(operands)),
        Quantifier::Any => Ok(Expr::or(operands)),
        Quantifier::None => Ok(Expr::not(Expr::or(operands))),
        Quantifier::Count => Err(TranslateError::invalid_row(
            "count is not a boolean quantifier",
        )),
    }
}

/// Inverse of [`connective`]. `Ok(None)` when `expr` is not a connective;
/// a `not` that does not wrap exactly one `or` is rejected.
pub(crate) fn split_connective(
    expr: &Expr,
) -> Result<Option<(Quantifier, &[Expr])>, TranslateError> {
    let Expr::Op(node) = expr else {
        return Ok(None);
    };

    match node.name {
        OpName::And => Ok(Some((Quantifier::All, node.operands.as_slice()))),
        OpName::Or => Ok(Some((Quantifier::Any, node.operands.as_slice()))),
        OpName::Not => match node.operands.as_slice() {
            [
                Expr::Op(OpNode {
                    name: OpName::Or,
                    operands,
                }),
            ] => Ok(Some((Quantifier::None, operands.as_slice()))),
            _ => Err(TranslateError::shape(format!(
                "not must wrap a single or, found {expr}"
            ))),
        },
        _ => Ok(None),
    }
}
