use crate::prelude::*;
use derive_more::{Display, FromStr};

///
/// Cardinality
///
/// How many values an attribute holds per entity. Only reference-like
/// attributes carry a real cardinality; scalars and property maps are
/// `NotApplicable`.
///

#[derive(
    Clone, Copy, Debug, Default, Deserialize, Display, Eq, FromStr, Hash, PartialEq, Serialize,
)]
pub enum Cardinality {
    #[default]
    NotApplicable,
    ToOne,
    ToMany,
}

impl Cardinality {
    #[must_use]
    pub const fn is_to_many(self) -> bool {
        matches!(self, Self::ToMany)
    }
}

///
/// Type
///
/// Attribute type taxonomy: six primitive kinds plus the structural kinds
/// used for relationships and dynamic property maps.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, FromStr, Hash, PartialEq, Serialize)]
#[remain::sorted]
pub enum Type {
    Bool,
    DateTime,
    Float64,
    Int16,
    Int32,
    PropertyMap,
    Reference,
    Text,
    UserPropertyMap,
    UserReference,
}

impl Type {
    #[must_use]
    pub const fn is_primitive(self) -> bool {
        matches!(
            self,
            Self::Bool | Self::DateTime | Self::Float64 | Self::Int16 | Self::Int32 | Self::Text
        )
    }

    /// Reference-like kinds navigate into another class.
    #[must_use]
    pub const fn is_reference(self) -> bool {
        matches!(self, Self::Reference | Self::UserReference)
    }

    #[must_use]
    pub const fn is_property_map(self) -> bool {
        matches!(self, Self::PropertyMap | Self::UserPropertyMap)
    }

    /// Per-user kinds come in an owned-scope and an all-scope variant.
    #[must_use]
    pub const fn is_per_user(self) -> bool {
        matches!(self, Self::UserPropertyMap | Self::UserReference)
    }

    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Float64 | Self::Int16 | Self::Int32)
    }

    //
    // all
    //

    pub const ALL: [Self; 10] = [
        Self::Bool,
        Self::DateTime,
        Self::Float64,
        Self::Int16,
        Self::Int32,
        Self::PropertyMap,
        Self::Reference,
        Self::Text,
        Self::UserPropertyMap,
        Self::UserReference,
    ];
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_six_kinds_are_primitive() {
        let primitive: Vec<_> = Type::ALL.into_iter().filter(|ty| ty.is_primitive()).collect();

        assert_eq!(
            primitive,
            vec![
                Type::Bool,
                Type::DateTime,
                Type::Float64,
                Type::Int16,
                Type::Int32,
                Type::Text
            ]
        );
    }

    #[test]
    fn structural_kinds_partition() {
        for ty in Type::ALL {
            let buckets = [ty.is_primitive(), ty.is_reference(), ty.is_property_map()];
            assert_eq!(
                buckets.iter().filter(|b| **b).count(),
                1,
                "{ty} must fall in exactly one bucket"
            );
        }
    }

    #[test]
    fn type_names_parse_back() {
        for ty in Type::ALL {
            assert_eq!(ty.to_string().parse::<Type>().ok(), Some(ty));
        }
        assert!("Int64".parse::<Type>().is_err());
    }
}
