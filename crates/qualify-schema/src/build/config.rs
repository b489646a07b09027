use crate::{
    build::{BuildError, CatalogBuilder, ClassDecl},
    catalog::Catalog,
    prelude::*,
};
use thiserror::Error as ThisError;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("catalog config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Build(#[from] BuildError),
}

///
/// CatalogConfig
///
/// TOML catalog declaration, loaded once at startup:
///
/// ```toml
/// [[classes]]
/// name = "Person"
///
/// [[classes.attributes]]
/// query_name = "name"
/// type = "Text"
/// ```
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub classes: Vec<ClassDecl>,
}

impl CatalogConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    #[must_use]
    pub fn into_builder(self) -> CatalogBuilder {
        self.classes
            .into_iter()
            .fold(CatalogBuilder::new(), CatalogBuilder::class)
    }

    /// Parse and build in one step.
    pub fn load(source: &str) -> Result<Catalog, ConfigError> {
        let catalog = Self::from_toml_str(source)?.into_builder().build()?;

        Ok(catalog)
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = r#"
[[classes]]
name = "Person"

[[classes.attributes]]
query_name = "name"
type = "Text"

[[classes]]
name = "Employee"
parent = "Person"

[[classes.attributes]]
query_name = "reports"
type = "Reference"
referenced_class = "Employee"
cardinality = "ToMany"

[[classes.attributes]]
query_name = "myNotes"
display_name = "Notes"
type = "UserPropertyMap"
is_mine = true
"#;

    #[test]
    fn loads_catalog_from_toml() {
        let catalog = CatalogConfig::load(SOURCE).expect("config loads");

        let reports = catalog.resolve("Employee", "reports").expect("reports");
        assert!(reports.is_to_many());
        assert_eq!(reports.referenced_class.as_deref(), Some("Employee"));

        let notes = catalog.resolve("Employee", "myNotes").expect("notes");
        assert_eq!(notes.label(), "My Notes");

        assert!(catalog.resolve("Employee", "name").is_ok());
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let err = CatalogConfig::load("[[classes]\nname = ").expect_err("bad toml");

        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn invalid_catalog_is_build_error() {
        let source = r#"
[[classes]]
name = "Person"

[[classes.attributes]]
query_name = "friends"
type = "Reference"
cardinality = "ToMany"
"#;

        let err = CatalogConfig::load(source).expect_err("missing referenced class");
        assert!(matches!(err, ConfigError::Build(_)));
    }
}
