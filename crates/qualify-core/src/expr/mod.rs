//! Module: expr
//! Responsibility: the canonical expression tree consumed by query engines.
//! Does not own: mapping to or from rows (see `translate`).
//! Boundary: a closed set of node kinds; operations match exhaustively.

use crate::{op::Operator, value::Literal};
use qualify_schema::types::Type;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error as ThisError;

///
/// OpNameParseError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("unknown operator name '{0}'")]
pub struct OpNameParseError(pub String);

///
/// OpName
///
/// Name of an operator node. Connectives and comparisons are boolean;
/// `Navigate`, `CountOf` and `MapGet` produce values; `Apply` evaluates
/// its second operand against each member of the collection named by its
/// first.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum OpName {
    And,
    Or,
    Not,
    Navigate,
    Compare(Operator),
    CountOf,
    MapGet(Type),
    Apply,
}

impl OpName {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::And => "and",
            Self::Or => "or",
            Self::Not => "not",
            Self::Navigate => ".",
            Self::Compare(op) => op.symbol(),
            Self::CountOf => "@count",
            Self::MapGet(_) => "@get",
            Self::Apply => "@apply",
        }
    }

    #[must_use]
    pub const fn is_connective(self) -> bool {
        matches!(self, Self::And | Self::Or | Self::Not)
    }
}

impl fmt::Display for OpName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MapGet(ty) => write!(f, "@get<{ty}>"),
            _ => f.write_str(self.as_str()),
        }
    }
}

impl FromStr for OpName {
    type Err = OpNameParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = match s {
            "and" => Self::And,
            "or" => Self::Or,
            "not" => Self::Not,
            "." => Self::Navigate,
            "@count" => Self::CountOf,
            "@apply" => Self::Apply,
            _ => {
                if let Some(ty) = s
                    .strip_prefix("@get<")
                    .and_then(|rest| rest.strip_suffix('>'))
                {
                    let ty = ty
                        .parse::<Type>()
                        .map_err(|_| OpNameParseError(s.to_string()))?;
                    return Ok(Self::MapGet(ty));
                }

                let op = s
                    .parse::<Operator>()
                    .map_err(|_| OpNameParseError(s.to_string()))?;
                Self::Compare(op)
            }
        };

        Ok(name)
    }
}

///
/// AttrRef
///
/// Attribute reference leaf. The name is resolved against the class the
/// enclosing navigation chain has reached.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct AttrRef {
    pub name: String,
}

impl AttrRef {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

///
/// OpNode
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct OpNode {
    pub name: OpName,
    pub operands: Vec<Expr>,
}

///
/// Expr
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Expr {
    Op(OpNode),
    Attr(AttrRef),
    Literal(Literal),
}

impl Expr {
    #[must_use]
    pub const fn op(name: OpName, operands: Vec<Self>) -> Self {
        Self::Op(OpNode { name, operands })
    }

    #[must_use]
    pub fn attr(name: impl Into<String>) -> Self {
        Self::Attr(AttrRef::new(name))
    }

    #[must_use]
    pub fn literal(value: impl Into<Literal>) -> Self {
        Self::Literal(value.into())
    }

    #[must_use]
    pub const fn and(operands: Vec<Self>) -> Self {
        Self::op(OpName::And, operands)
    }

    #[must_use]
    pub const fn or(operands: Vec<Self>) -> Self {
        Self::op(OpName::Or, operands)
    }

    #[must_use]
    pub fn not(operand: Self) -> Self {
        Self::op(OpName::Not, vec![operand])
    }

    /// `.(base, attr)`: step from `base` into one more attribute.
    #[must_use]
    pub fn navigate(base: Self, attr: impl Into<String>) -> Self {
        Self::op(OpName::Navigate, vec![base, Self::attr(attr)])
    }

    /// Left-nested navigation chain over `names`; `None` when empty.
    #[must_use]
    pub fn chain<I, S>(names: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names = names.into_iter();
        let first = Self::attr(names.next()?);

        Some(names.fold(first, Self::navigate))
    }

    #[must_use]
    pub fn compare(op: Operator, lhs: Self, rhs: Option<Literal>) -> Self {
        let mut operands = vec![lhs];
        operands.extend(rhs.map(Self::Literal));

        Self::op(OpName::Compare(op), operands)
    }

    #[must_use]
    pub fn count_of(chain: Self) -> Self {
        Self::op(OpName::CountOf, vec![chain])
    }

    #[must_use]
    pub fn map_get(ty: Type, chain: Self, key: impl Into<String>) -> Self {
        Self::op(
            OpName::MapGet(ty),
            vec![chain, Self::Literal(Literal::Text(key.into()))],
        )
    }

    #[must_use]
    pub fn apply(chain: Self, body: Self) -> Self {
        Self::op(OpName::Apply, vec![chain, body])
    }

    #[must_use]
    pub const fn as_op(&self) -> Option<&OpNode> {
        match self {
            Self::Op(node) => Some(node),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_attr(&self) -> Option<&AttrRef> {
        match self {
            Self::Attr(attr) => Some(attr),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_literal(&self) -> Option<&Literal> {
        match self {
            Self::Literal(value) => Some(value),
            _ => None,
        }
    }

    /// Operator name, if this is an operator node.
    #[must_use]
    pub fn name(&self) -> Option<OpName> {
        self.as_op().map(|node| node.name)
    }

    /// Number of nodes in this subtree, including self.
    #[must_use]
    pub fn node_count(&self) -> usize {
        match self {
            Self::Op(node) => 1 + node.operands.iter().map(Self::node_count).sum::<usize>(),
            Self::Attr(_) | Self::Literal(_) => 1,
        }
    }
}

///
/// TESTS
///
