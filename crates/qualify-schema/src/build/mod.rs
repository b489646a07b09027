mod config;

pub use config::{CatalogConfig, ConfigError};

use crate::{catalog::Catalog, prelude::*, validate::validate_catalog};
use std::{collections::BTreeMap, sync::Arc};
use thiserror::Error as ThisError;

///
/// BuildError
///

#[derive(Debug, ThisError)]
pub enum BuildError {
    #[error("validation failed: {0}")]
    Validation(ErrorTree),
}

///
/// ClassDecl
///
/// Declarative form of one class, with the parent referenced by name.
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ClassDecl {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,

    #[serde(default)]
    pub attributes: Vec<Attribute>,
}

impl ClassDecl {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    #[must_use]
    pub fn attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }
}

///
/// CatalogBuilder
///

#[derive(Clone, Debug, Default)]
pub struct CatalogBuilder {
    decls: Vec<ClassDecl>,
}

impl CatalogBuilder {
    #[must_use]
    pub const fn new() -> Self {
        Self { decls: Vec::new() }
    }

    #[must_use]
    pub fn class(mut self, decl: ClassDecl) -> Self {
        self.decls.push(decl);
        self
    }

    /// Validate every declaration, then link parents into shared class
    /// descriptions.
    pub fn build(self) -> Result<Catalog, BuildError> {
        validate_catalog(&self.decls).map_err(BuildError::Validation)?;

        let by_name: BTreeMap<&str, &ClassDecl> = self
            .decls
            .iter()
            .map(|decl| (decl.name.as_str(), decl))
            .collect();

        let mut built = BTreeMap::new();
        for decl in &self.decls {
            assemble(&decl.name, &by_name, &mut built);
        }

        Ok(Catalog::from_classes(built))
    }
}

// Build one class after its parent; validation has already ruled out
// missing parents and cycles.
fn assemble(
    name: &str,
    by_name: &BTreeMap<&str, &ClassDecl>,
    built: &mut BTreeMap<String, Arc<ClassDescription>>,
) -> Option<Arc<ClassDescription>> {
    if let Some(class) = built.get(name) {
        return Some(Arc::clone(class));
    }

    let decl = by_name.get(name)?;
    let parent = match &decl.parent {
        Some(parent) => Some(assemble(parent, by_name, built)?),
        None => None,
    };

    let class = Arc::new(ClassDescription::new(
        decl.name.clone(),
        decl.attributes.clone(),
        parent,
    ));
    built.insert(decl.name.clone(), Arc::clone(&class));

    Some(class)
}

///
/// TESTS
///
