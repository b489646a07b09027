mod float;
mod time;


pub use float::{Float64, FloatError};
pub use time::{Interval, Timestamp};

use qualify_schema::types::Type;
use serde::{Deserialize, Serialize};
use std::fmt;

///
/// Literal
///
/// Typed constant operand of a comparison. The active variant must be
/// compatible with the type of the attribute it is compared against; see
/// [`Literal::matches_type`].
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Literal {
    Bool(bool),
    Int32(i32),
    Uint32(u32),
    Float64(Float64),
    Text(String),
    DateTime(Timestamp),
    Interval(Interval),
    List(Vec<Self>),
    ClassRef(String),
}

impl Literal {
    /// Short variant name used in diagnostics.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int32(_) => "int32",
            Self::Uint32(_) => "uint32",
            Self::Float64(_) => "float64",
            Self::Text(_) => "text",
            Self::DateTime(_) => "date_time",
            Self::Interval(_) => "interval",
            Self::List(_) => "list",
            Self::ClassRef(_) => "class_ref",
        }
    }

    /// Whether this literal may be compared against an attribute of `ty`.
    ///
    /// Integer literals widen into any numeric type that can hold them;
    /// lists match when every element does. Intervals and class references
    /// never match an attribute directly; they exist for the query engine
    /// and pass through expressions untouched.
    #[must_use]
    pub fn matches_type(&self, ty: Type) -> bool {
        match (self, ty) {
            (Self::List(items), _) => items.iter().all(|item| item.matches_type(ty)),
            (Self::Bool(_), Type::Bool)
            | (Self::Text(_), Type::Text)
            | (Self::DateTime(_), Type::DateTime)
            | (Self::Int32(_), Type::Int32)
            | (Self::Float64(_) | Self::Int32(_) | Self::Uint32(_), Type::Float64) => true,
            (Self::Int32(v), Type::Int16) => i16::try_from(*v).is_ok(),
            (Self::Uint32(v), Type::Int16) => i16::try_from(*v).is_ok(),
            (Self::Uint32(v), Type::Int32) => i32::try_from(*v).is_ok(),
            _ => false,
        }
    }

    /// Count comparisons take a plain integer.
    #[must_use]
    pub const fn is_count_operand(&self) -> bool {
        matches!(self, Self::Int32(_) | Self::Uint32(_))
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int32(v) => write!(f, "{v}"),
            Self::Uint32(v) => write!(f, "{v}u"),
            Self::Float64(v) => write!(f, "{v}"),
            Self::Text(v) => write!(f, "{v:?}"),
            Self::DateTime(v) => write!(f, "@{v}"),
            Self::Interval(v) => write!(f, "{v}"),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::ClassRef(v) => write!(f, "<{v}>"),
        }
    }
}

impl From<bool> for Literal {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for Literal {
    fn from(v: i32) -> Self {
        Self::Int32(v)
    }
}

impl From<u32> for Literal {
    fn from(v: u32) -> Self {
        Self::Uint32(v)
    }
}

impl From<&str> for Literal {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Literal {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<Float64> for Literal {
    fn from(v: Float64) -> Self {
        Self::Float64(v)
    }
}

impl From<Timestamp> for Literal {
    fn from(v: Timestamp) -> Self {
        Self::DateTime(v)
    }
}

impl From<Interval> for Literal {
    fn from(v: Interval) -> Self {
        Self::Interval(v)
    }
}
