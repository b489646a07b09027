mod quantifier;

pub use quantifier::Quantifier;

use qualify_schema::types::Type;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error as ThisError;

///
/// OperatorParseError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("unknown operator symbol '{0}'")]
pub struct OperatorParseError(pub String);

///
/// Operator
///
/// Terminal comparison of a leaf condition. The symbol is the display
/// form; `FromStr` is its exact inverse.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Operator {
    Eq,
    Ne,
    Lt,
    Gt,
    Lte,
    Gte,
    Matches,
    MatchesCi,
    NotMatches,
    NotMatchesCi,
    IsNull,
    IsNotNull,
    IsTrue,
    IsFalse,
}

/// Only legal operators for boolean attributes.
pub const BOOLEAN_LEGAL: &[Operator] = &[Operator::IsTrue, Operator::IsFalse];

pub const ARITHMETIC_LEGAL: &[Operator] = &[
    Operator::Eq,
    Operator::Ne,
    Operator::Lt,
    Operator::Gt,
    Operator::Lte,
    Operator::Gte,
];

pub const STRING_LEGAL: &[Operator] = &[
    Operator::Eq,
    Operator::Ne,
    Operator::Lt,
    Operator::Gt,
    Operator::Lte,
    Operator::Gte,
    Operator::Matches,
    Operator::MatchesCi,
    Operator::NotMatches,
    Operator::NotMatchesCi,
];

pub const DATE_TIME_LEGAL: &[Operator] = &[
    Operator::Eq,
    Operator::Ne,
    Operator::Lt,
    Operator::Gt,
    Operator::Lte,
    Operator::Gte,
    Operator::IsNull,
    Operator::IsNotNull,
];

/// Leaf conditions that stop on a relationship can only test presence.
pub const REFERENCE_LEGAL: &[Operator] = &[Operator::IsNull, Operator::IsNotNull];

impl Operator {
    pub const ALL: [Self; 14] = [
        Self::Eq,
        Self::Ne,
        Self::Lt,
        Self::Gt,
        Self::Lte,
        Self::Gte,
        Self::Matches,
        Self::MatchesCi,
        Self::NotMatches,
        Self::NotMatchesCi,
        Self::IsNull,
        Self::IsNotNull,
        Self::IsTrue,
        Self::IsFalse,
    ];

    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::Lte => "<=",
            Self::Gte => ">=",
            Self::Matches => "matches",
            Self::MatchesCi => "matches[c]",
            Self::NotMatches => "!matches",
            Self::NotMatchesCi => "!matches[c]",
            Self::IsNull => "isnull",
            Self::IsNotNull => "isnotnull",
            Self::IsTrue => "istrue",
            Self::IsFalse => "isfalse",
        }
    }

    /// Unary operators take no literal operand.
    #[must_use]
    pub const fn is_unary(self) -> bool {
        matches!(
            self,
            Self::IsNull | Self::IsNotNull | Self::IsTrue | Self::IsFalse
        )
    }

    /// Legality table for a terminal attribute type. Property maps have no
    /// table of their own; the selected key's type is checked instead.
    #[must_use]
    pub const fn legal_for(ty: Type) -> &'static [Self] {
        match ty {
            Type::Bool => BOOLEAN_LEGAL,
            Type::DateTime => DATE_TIME_LEGAL,
            Type::Float64 | Type::Int16 | Type::Int32 => ARITHMETIC_LEGAL,
            Type::Text => STRING_LEGAL,
            Type::Reference | Type::UserReference => REFERENCE_LEGAL,
            Type::PropertyMap | Type::UserPropertyMap => &[],
        }
    }

    #[must_use]
    pub fn is_legal_for(self, ty: Type) -> bool {
        Self::legal_for(ty).contains(&self)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Operator {
    type Err = OperatorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.symbol() == s)
            .ok_or_else(|| OperatorParseError(s.to_string()))
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn symbols_parse_back_exactly() {
        for op in Operator::ALL {
            assert_eq!(op.symbol().parse::<Operator>(), Ok(op));
        }
    }

    #[test]
    fn symbols_are_unique() {
        let symbols: BTreeSet<_> = Operator::ALL.iter().map(|op| op.symbol()).collect();

        assert_eq!(symbols.len(), Operator::ALL.len());
    }

    #[test]
    fn unknown_symbol_is_rejected() {
        assert_eq!(
            "=~".parse::<Operator>(),
            Err(OperatorParseError("=~".to_string()))
        );
        assert!(" ==".parse::<Operator>().is_err());
    }

    #[test]
    fn string_legal_extends_arithmetic_with_matches() {
        for op in ARITHMETIC_LEGAL {
            assert!(STRING_LEGAL.contains(op));
            assert!(DATE_TIME_LEGAL.contains(op));
        }
        assert!(STRING_LEGAL.contains(&Operator::MatchesCi));
        assert!(!STRING_LEGAL.contains(&Operator::IsNull));
        assert!(DATE_TIME_LEGAL.contains(&Operator::IsNotNull));
        assert!(!DATE_TIME_LEGAL.contains(&Operator::Matches));
    }

    #[test]
    fn booleans_only_take_truth_tests() {
        assert!(Operator::IsTrue.is_legal_for(Type::Bool));
        assert!(Operator::IsFalse.is_legal_for(Type::Bool));
        assert!(!Operator::Eq.is_legal_for(Type::Bool));
        assert!(!Operator::IsNull.is_legal_for(Type::Bool));
    }

    #[test]
    fn property_maps_have_no_table() {
        for op in Operator::ALL {
            assert!(!op.is_legal_for(Type::PropertyMap));
            assert!(!op.is_legal_for(Type::UserPropertyMap));
        }
    }
}
