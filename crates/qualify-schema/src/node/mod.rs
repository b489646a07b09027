mod attribute;
mod class;

pub use attribute::Attribute;
pub use class::ClassDescription;
