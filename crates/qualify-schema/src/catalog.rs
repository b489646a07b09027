//! Module: catalog
//! Responsibility: read-only class lookup and attribute resolution.
//! Does not own: catalog construction or validation (see `build`).
//! Boundary: the translator only ever sees a `&Catalog`.

use crate::prelude::*;
use std::{collections::BTreeMap, sync::Arc};
use thiserror::Error as ThisError;

///
/// CatalogError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum CatalogError {
    #[error("unknown class '{class}'")]
    UnknownClass { class: String },

    #[error("class '{class}' has no attribute '{attribute}'")]
    UnknownAttribute { class: String, attribute: String },
}

///
/// Catalog
///
/// Immutable set of validated class descriptions. Updating a catalog means
/// building a new one and swapping the `Arc` callers hold; a translation
/// that already borrowed the old catalog keeps seeing it unchanged.
///

#[derive(Clone, Debug, Default)]
pub struct Catalog {
    classes: BTreeMap<String, Arc<ClassDescription>>,
}

impl Catalog {
    /// Only the builder constructs catalogs, after validation.
    pub(crate) const fn from_classes(classes: BTreeMap<String, Arc<ClassDescription>>) -> Self {
        Self { classes }
    }

    #[must_use]
    pub fn get_class(&self, name: &str) -> Option<&ClassDescription> {
        self.classes.get(name).map(AsRef::as_ref)
    }

    /// Resolve `attribute` against `class`, including inherited and
    /// base-qualified names.
    pub fn resolve(&self, class: &str, attribute: &str) -> Result<Attribute, CatalogError> {
        let description = self
            .get_class(class)
            .ok_or_else(|| CatalogError::UnknownClass {
                class: class.to_string(),
            })?;

        description
            .attribute(attribute)
            .ok_or_else(|| CatalogError::UnknownAttribute {
                class: class.to_string(),
                attribute: attribute.to_string(),
            })
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        CatalogBuilder::new()
            .class(ClassDecl::new("Asset").attribute(Attribute::primitive("name", Type::Text)))
            .class(
                ClassDecl::new("Vehicle")
                    .parent("Asset")
                    .attribute(Attribute::primitive("wheels", Type::Int16)),
            )
            .build()
            .expect("valid catalog")
    }

    #[test]
    fn resolve_finds_inherited_attribute() {
        let catalog = catalog();

        assert_eq!(
            catalog.resolve("Vehicle", "name"),
            Ok(Attribute::primitive("name", Type::Text))
        );
    }

    #[test]
    fn resolve_reports_unknown_class_and_attribute() {
        let catalog = catalog();

        assert_eq!(
            catalog.resolve("Truck", "name"),
            Err(CatalogError::UnknownClass {
                class: "Truck".to_string()
            })
        );
        assert_eq!(
            catalog.resolve("Asset", "wheels"),
            Err(CatalogError::UnknownAttribute {
                class: "Asset".to_string(),
                attribute: "wheels".to_string(),
            })
        );
    }

    #[test]
    fn replacement_does_not_touch_existing_handles() {
        let first = Arc::new(catalog());
        let held = Arc::clone(&first);

        let replacement = Arc::new(
            CatalogBuilder::new()
                .class(ClassDecl::new("Asset"))
                .build()
                .expect("valid catalog"),
        );
        let current = replacement;

        assert!(held.resolve("Vehicle", "wheels").is_ok());
        assert!(current.get_class("Vehicle").is_none());
        assert!(held.get_class("Vehicle").is_some_and(|class| class.is_kind_of("Asset")));
    }
}
