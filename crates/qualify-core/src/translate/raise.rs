use crate::{
    error::TranslateError,
    expr::{Expr, OpName, OpNode},
    op::{Operator, Quantifier},
    row::RowNode,
    translate::{path, split_connective, validate},
    value::Literal,
};
use qualify_schema::{catalog::Catalog, types::Type};

///
/// Raising
///
/// Expression tree back to the row tree that lowering would have produced
/// it from. Anything outside the canonical shapes is rejected.
///

pub(super) struct Raising<'a> {
    pub(super) catalog: &'a Catalog,
    pub(super) max_depth: usize,
}

impl Raising<'_> {
    pub(super) fn root(&self, expr: &Expr, class: &str) -> Result<RowNode, TranslateError> {
        self.catalog
            .get_class(class)
            .ok_or_else(|| TranslateError::unresolved(class, ""))?;

        let Some((quantifier, operands)) = split_connective(expr)? else {
            return Err(TranslateError::shape(format!(
                "expected and, or or not(or) at the root, found {expr}"
            )));
        };

        let children = self.rows(operands, class, 1).map_err(non_canonical)?;

        Ok(RowNode::root(class, quantifier).with_children(children))
    }

    fn rows(
        &self,
        exprs: &[Expr],
        class: &str,
        depth: usize,
    ) -> Result<Vec<RowNode>, TranslateError> {
        exprs
            .iter()
            .map(|expr| self.row(expr, class, depth))
            .collect()
    }

    fn row(&self, expr: &Expr, class: &str, depth: usize) -> Result<RowNode, TranslateError> {
        if depth > self.max_depth {
            return Err(TranslateError::DepthLimitExceeded {
                limit: self.max_depth,
            });
        }

        let Expr::Op(node) = expr else {
            return Err(TranslateError::shape(format!(
                "expected a condition, found {expr}"
            )));
        };

        match (node.name, node.operands.as_slice()) {
            (OpName::Apply, [chain, body]) => self.group(chain, body, class, depth),
            (
                OpName::Compare(op),
                [
                    Expr::Op(OpNode {
                        name: OpName::CountOf,
                        operands: counted,
                    }),
                    rest @ ..,
                ],
            ) => self.count(op, counted, rest, class),
            (OpName::Compare(op), [target, rest @ ..]) => self.leaf(op, target, rest, class),
            (name, _) if name.is_connective() => Err(TranslateError::shape(format!(
                "group without an attribute path cannot nest here: {expr}"
            ))),
            _ => Err(TranslateError::shape(format!(
                "unexpected '{}' node: {expr}",
                node.name
            ))),
        }
    }

    fn leaf(
        &self,
        op: Operator,
        target: &Expr,
        rest: &[Expr],
        class: &str,
    ) -> Result<RowNode, TranslateError> {
        let (chain, property) = split_map_get(target)?;
        let path = path::resolve_names(self.catalog, class, path::unchain(chain)?)?;

        let mut row = RowNode::leaf_parts(class, path.attributes(), op, operand(rest)?);
        if let Some((name, ty)) = property {
            row = row.with_property(name, ty);
        }
        validate::check_leaf(&row, op, &path)?;

        Ok(row)
    }

    fn count(
        &self,
        op: Operator,
        counted: &[Expr],
        rest: &[Expr],
        class: &str,
    ) -> Result<RowNode, TranslateError> {
        let [chain] = counted else {
            return Err(TranslateError::shape("@count takes exactly one chain"));
        };
        let path = path::resolve_names(self.catalog, class, path::unchain(chain)?)?;

        let row = RowNode {
            quantifier: Quantifier::Count,
            ..RowNode::leaf_parts(class, path.attributes(), op, operand(rest)?)
        };
        validate::check_count(&row, op, &path)?;

        Ok(row)
    }

    fn group(
        &self,
        chain: &Expr,
        body: &Expr,
        class: &str,
        depth: usize,
    ) -> Result<RowNode, TranslateError> {
        let path = path::resolve_names(self.catalog, class, path::unchain(chain)?)?;

        let Some((quantifier, operands)) = split_connective(body)? else {
            return Err(TranslateError::shape(format!(
                "@apply needs and, or or not(or) as its body, found {body}"
            )));
        };

        // Rows below a path group always carry a path of their own, so a
        // lone connective operand can only be the inner quantifier.
        let nested = match operands {
            [inner] => split_connective(inner)?,
            _ => None,
        };
        let (quantifier2, members) = match nested {
            Some((inner, members)) => (Some(inner), members),
            None => (None, operands),
        };

        let mut row = RowNode::group(class, path.attributes(), quantifier);
        row.quantifier2 = quantifier2;
        let target = validate::check_group(&row, &path)?;
        row.children = self.rows(members, target, depth + 1)?;

        Ok(row)
    }
}

// A rebuilt row that breaks a row invariant came from an expression that
// lowering never produces.
fn non_canonical(err: TranslateError) -> TranslateError {
    match err {
        TranslateError::InvalidRow { message } => TranslateError::UnrecognizedShape { message },
        other => other,
    }
}

// `@get<T>(chain, "key")` yields the chain plus the selected property.
fn split_map_get(target: &Expr) -> Result<(&Expr, Option<(String, Type)>), TranslateError> {
    match target {
        Expr::Op(OpNode {
            name: OpName::MapGet(ty),
            operands,
        }) => match operands.as_slice() {
            [chain, Expr::Literal(Literal::Text(key))] => Ok((chain, Some((key.clone(), *ty)))),
            _ => Err(TranslateError::shape(format!(
                "@get takes a chain and a text key, found {target}"
            ))),
        },
        _ => Ok((target, None)),
    }
}

fn operand(rest: &[Expr]) -> Result<Option<Literal>, TranslateError> {
    match rest {
        [] => Ok(None),
        [Expr::Literal(value)] => Ok(Some(value.clone())),
        _ => Err(TranslateError::shape(
            "comparison takes at most one literal operand",
        )),
    }
}
