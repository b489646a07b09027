use crate::{
    error::TranslateError,
    expr::Expr,
    op::Operator,
    row::{RowKind, RowNode},
    translate::{
        connective,
        path::{self, ResolvedPath},
        validate,
    },
};
use qualify_schema::catalog::Catalog;

///
/// Lowering
/// Row tree to expression tree.
///

pub(super) struct Lowering<'a> {
    pub(super) catalog: &'a Catalog,
    pub(super) max_depth: usize,
}

impl Lowering<'_> {
    pub(super) fn root(&self, root: &RowNode) -> Result<Expr, TranslateError> {
        validate::check_root(root)?;
        self.catalog
            .get_class(&root.qualified_class)
            .ok_or_else(|| TranslateError::unresolved(&root.qualified_class, ""))?;

        let operands = self.rows(&root.children, &root.qualified_class, 1)?;

        connective(root.quantifier, operands)
    }

    fn rows(
        &self,
        rows: &[RowNode],
        class: &str,
        depth: usize,
    ) -> Result<Vec<Expr>, TranslateError> {
        rows.iter().map(|row| self.row(row, class, depth)).collect()
    }

    fn row(&self, row: &RowNode, class: &str, depth: usize) -> Result<Expr, TranslateError> {
        if depth > self.max_depth {
            return Err(TranslateError::DepthLimitExceeded {
                limit: self.max_depth,
            });
        }

        validate::check_context(row, class)?;
        let path = path::resolve_row_path(self.catalog, class, &row.attribute_path)?;

        match row.kind() {
            RowKind::Leaf => Self::leaf(row, operator(row)?, &path),
            RowKind::Count => Self::count(row, operator(row)?, &path),
            RowKind::Group => self.group(row, &path, depth),
        }
    }

    // op(nav(P), v), op(nav(P)), or the same over @get<T>(nav(P), "key")
    fn leaf(row: &RowNode, op: Operator, path: &ResolvedPath) -> Result<Expr, TranslateError> {
        validate::check_leaf(row, op, path)?;

        let mut target = path.chain();
        if let (Some(name), Some(ty)) = (&row.prop_name, row.prop_type) {
            target = Expr::map_get(ty, target, name);
        }

        Ok(Expr::compare(op, target, row.value.clone()))
    }

    // op(@count(nav(P)), v)
    fn count(row: &RowNode, op: Operator, path: &ResolvedPath) -> Result<Expr, TranslateError> {
        validate::check_count(row, op, path)?;

        Ok(Expr::compare(
            op,
            Expr::count_of(path.chain()),
            row.value.clone(),
        ))
    }

    // @apply(nav(P), G(q, children)) or @apply(nav(P), G(q, [G(q2, children)]))
    fn group(
        &self,
        row: &RowNode,
        path: &ResolvedPath,
        depth: usize,
    ) -> Result<Expr, TranslateError> {
        let target = validate::check_group(row, path)?;
        let operands = self.rows(&row.children, target, depth + 1)?;

        let body = match row.quantifier2 {
            Some(inner) => connective(row.quantifier, vec![connective(inner, operands)?])?,
            None => connective(row.quantifier, operands)?,
        };

        Ok(Expr::apply(path.chain(), body))
    }
}

fn operator(row: &RowNode) -> Result<Operator, TranslateError> {
    row.attribute_operator
        .ok_or_else(|| TranslateError::invalid_row("row has no operator"))
}
