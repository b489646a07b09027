//! Container nesting of the persisted form, counted the way the CBOR decoder
//! counts it: one level per map or array. Enum variants, structs and `Vec`s
//! each encode as one container; scalars add nothing.
//!
//! Walks use explicit stacks so measuring never recurses on tree depth.

use crate::{expr::Expr, row::RowNode, value::Literal};

/// Deepest nesting of an encoded expression.
pub(crate) fn expr_nesting(expr: &Expr) -> usize {
    let mut deepest = 0;
    let mut stack = vec![(expr, 0)];

    while let Some((expr, above)) = stack.pop() {
        match expr {
            // variant map, node map, operand array
            Expr::Op(node) => {
                let depth = above + 3;
                deepest = deepest.max(depth);
                stack.extend(node.operands.iter().map(|operand| (operand, depth)));
            }
            // variant map, attribute map
            Expr::Attr(_) => deepest = deepest.max(above + 2),
            Expr::Literal(value) => deepest = deepest.max(above + 1 + literal_nesting(value)),
        }
    }

    deepest
}

/// Deepest nesting of an encoded row tree.
pub(crate) fn row_nesting(row: &RowNode) -> usize {
    let mut deepest = 0;
    let mut stack = vec![(row, 0)];

    while let Some((row, above)) = stack.pop() {
        let depth = above + 1;

        // path array holding attribute maps
        let own = row
            .value
            .as_ref()
            .map_or(2, |value| literal_nesting(value).max(2));
        deepest = deepest.max(depth + own);

        // children array, then each child map
        stack.extend(row.children.iter().map(|child| (child, depth + 1)));
    }

    deepest
}

fn literal_nesting(value: &Literal) -> usize {
    let mut deepest = 0;
    let mut stack = vec![(value, 0)];

    while let Some((value, above)) = stack.pop() {
        match value {
            Literal::List(items) => {
                let depth = above + 2;
                deepest = deepest.max(depth);
                stack.extend(items.iter().map(|item| (item, depth)));
            }
            _ => deepest = deepest.max(above + 1),
        }
    }

    deepest
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        op::{Operator, Quantifier},
        serialize::{MAX_NESTING, deserialize, serialize},
    };
    use qualify_schema::{node::Attribute, types::Type};

    #[test]
    fn expression_levels_add_up() {
        let leaf = Expr::compare(Operator::IsTrue, Expr::attr("paid"), None);
        assert_eq!(expr_nesting(&leaf), 5);

        let group = Expr::apply(Expr::attr("orders"), Expr::not(Expr::or(vec![leaf])));
        assert_eq!(expr_nesting(&group), 14);

        let empty = Expr::and(vec![]);
        assert_eq!(expr_nesting(&empty), 3);
    }

    #[test]
    fn nested_lists_count_each_level() {
        let flat = Literal::List(vec!["a".into()]);
        let nested = Literal::List(vec![flat.clone(), Literal::List(vec![])]);

        assert_eq!(literal_nesting(&Literal::Int32(1)), 1);
        assert_eq!(literal_nesting(&flat), 3);
        assert_eq!(literal_nesting(&nested), 5);
    }

    #[test]
    fn row_levels_add_up() {
        let leaf = RowNode::unary(
            "Order",
            vec![Attribute::primitive("paid", Type::Bool)],
            Operator::IsTrue,
        );
        assert_eq!(row_nesting(&leaf), 3);

        let root = RowNode::root("Order", Quantifier::All).with_child(leaf);
        assert_eq!(row_nesting(&root), 5);
    }

    #[test]
    fn trees_at_the_limit_decode() {
        let mut expr = Expr::compare(Operator::IsTrue, Expr::attr("paid"), None);
        while expr_nesting(&expr) + 3 <= MAX_NESTING {
            expr = Expr::and(vec![expr]);
        }

        let bytes = serialize(&expr).expect("serialize");
        assert_eq!(deserialize::<Expr>(&bytes).expect("decodes"), expr);
    }
}
