use derive_more::Display;
use serde::{Deserialize, Serialize};

///
/// Quantifier
///
/// How a group row combines its children, or how a to-many relationship
/// contributes to truth. `Count` is the odd one out: it reduces the
/// relationship to an integer compared with an `Operator`.
///
/// `None` always lowers to `not(or(..))`, never `not(and(..))`; the raiser
/// only recognises that shape.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
pub enum Quantifier {
    #[display("count")]
    Count,
    #[display("any")]
    Any,
    #[default]
    #[display("all")]
    All,
    #[display("none")]
    None,
}

impl Quantifier {
    pub const ALL: [Self; 4] = [Self::Count, Self::Any, Self::All, Self::None];

    /// Any, All and None quantify child predicates; Count does not.
    #[must_use]
    pub const fn is_boolean(self) -> bool {
        !matches!(self, Self::Count)
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_is_not_boolean() {
        let boolean: Vec<_> = Quantifier::ALL
            .into_iter()
            .filter(|q| q.is_boolean())
            .collect();

        assert_eq!(
            boolean,
            vec![Quantifier::Any, Quantifier::All, Quantifier::None]
        );
    }

    #[test]
    fn default_is_all() {
        assert_eq!(Quantifier::default(), Quantifier::All);
        assert_eq!(Quantifier::None.to_string(), "none");
    }
}
