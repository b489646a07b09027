//! Module: row
//! Responsibility: the editor-facing row tree and its construction helpers.
//! Does not own: shape validation or translation (see `translate`).
//! Boundary: rows are plain values; nothing here consults the catalog.

use crate::{
    op::{Operator, Quantifier},
    value::Literal,
};
use qualify_schema::{node::Attribute, types::Type};
use serde::{Deserialize, Serialize};

///
/// RowKind
///
/// Structural role of a row, derived from its fields.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RowKind {
    /// Quantified group of child rows (the root is always one).
    Group,
    /// `count` of a to-many relationship compared with a literal.
    Count,
    /// Single attribute comparison.
    Leaf,
}

///
/// RowNode
///
/// One row of the editable qualification tree. A row is either a leaf
/// condition (`attribute_operator` set, no children), a count comparison,
/// or a quantified group of child rows. Child paths start from the class
/// reached by the parent's path.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct RowNode {
    pub qualified_class: String,

    #[serde(default)]
    pub quantifier: Quantifier,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantifier2: Option<Quantifier>,

    #[serde(default)]
    pub attribute_path: Vec<Attribute>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute_operator: Option<Operator>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Literal>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prop_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prop_type: Option<Type>,

    #[serde(default)]
    pub children: Vec<Self>,
}

impl RowNode {
    /// Root row for `class`, combining its children with `quantifier`.
    #[must_use]
    pub fn root(class: impl Into<String>, quantifier: Quantifier) -> Self {
        Self {
            qualified_class: class.into(),
            quantifier,
            ..Self::default()
        }
    }

    /// Leaf comparison with a literal operand.
    #[must_use]
    pub fn leaf(
        class: impl Into<String>,
        path: Vec<Attribute>,
        op: Operator,
        value: impl Into<Literal>,
    ) -> Self {
        Self {
            qualified_class: class.into(),
            attribute_path: path,
            attribute_operator: Some(op),
            value: Some(value.into()),
            ..Self::default()
        }
    }

    /// Leaf comparison with a unary operator (null and truth tests).
    #[must_use]
    pub fn unary(class: impl Into<String>, path: Vec<Attribute>, op: Operator) -> Self {
        Self {
            qualified_class: class.into(),
            attribute_path: path,
            attribute_operator: Some(op),
            ..Self::default()
        }
    }

    pub(crate) fn leaf_parts(
        class: impl Into<String>,
        path: Vec<Attribute>,
        op: Operator,
        value: Option<Literal>,
    ) -> Self {
        Self {
            qualified_class: class.into(),
            attribute_path: path,
            attribute_operator: Some(op),
            value,
            ..Self::default()
        }
    }

    /// `count(path) op value`.
    #[must_use]
    pub fn count(
        class: impl Into<String>,
        path: Vec<Attribute>,
        op: Operator,
        value: impl Into<Literal>,
    ) -> Self {
        Self {
            qualified_class: class.into(),
            quantifier: Quantifier::Count,
            attribute_path: path,
            attribute_operator: Some(op),
            value: Some(value.into()),
            ..Self::default()
        }
    }

    /// Quantified group over the to-many relationship at the end of `path`.
    #[must_use]
    pub fn group(class: impl Into<String>, path: Vec<Attribute>, quantifier: Quantifier) -> Self {
        Self {
            qualified_class: class.into(),
            quantifier,
            attribute_path: path,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_quantifier2(mut self, quantifier2: Quantifier) -> Self {
        self.quantifier2 = Some(quantifier2);
        self
    }

    /// Select one key of a property-map terminal attribute.
    #[must_use]
    pub fn with_property(mut self, name: impl Into<String>, ty: Type) -> Self {
        self.prop_name = Some(name.into());
        self.prop_type = Some(ty);
        self
    }

    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = Self>) -> Self {
        self.children.extend(children);
        self
    }

    #[must_use]
    pub fn kind(&self) -> RowKind {
        if self.quantifier == Quantifier::Count {
            RowKind::Count
        } else if self.attribute_operator.is_some() {
            RowKind::Leaf
        } else {
            RowKind::Group
        }
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.attribute_path.is_empty()
    }

    #[must_use]
    pub fn terminal_attribute(&self) -> Option<&Attribute> {
        self.attribute_path.last()
    }

    /// Number of rows in this subtree, including self.
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Self::node_count).sum::<usize>()
    }

    /// Depth of this subtree; a childless row has depth 1.
    #[must_use]
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(Self::depth).max().unwrap_or(0)
    }
}

///
/// TESTS
///
