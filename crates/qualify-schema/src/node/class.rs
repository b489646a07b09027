use crate::prelude::*;
use std::sync::Arc;

///
/// ClassDescription
///
/// One class and its own attributes. The parent is shared, so a catalog
/// can hand out cheap clones of any class without copying its ancestry.
///

#[derive(Clone, Debug)]
pub struct ClassDescription {
    name: String,
    own_attributes: Vec<Attribute>,
    parent: Option<Arc<Self>>,
}

impl ClassDescription {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        own_attributes: Vec<Attribute>,
        parent: Option<Arc<Self>>,
    ) -> Self {
        Self {
            name: name.into(),
            own_attributes,
            parent,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn own_attributes(&self) -> &[Attribute] {
        &self.own_attributes
    }

    #[must_use]
    pub fn parent(&self) -> Option<&Self> {
        self.parent.as_deref()
    }

    /// Self first, then each ancestor up to the root class.
    pub fn lineage(&self) -> impl Iterator<Item = &Self> {
        std::iter::successors(Some(self), |class| class.parent())
    }

    /// Whether this class is `name` or inherits from it.
    #[must_use]
    pub fn is_kind_of(&self, name: &str) -> bool {
        self.lineage().any(|class| class.name == name)
    }

    /// Own attributes followed by every inherited attribute.
    pub fn all_attributes(&self) -> impl Iterator<Item = &Attribute> {
        self.lineage().flat_map(|class| class.own_attributes.iter())
    }

    /// Look up an attribute by query name across the inheritance chain.
    ///
    /// `Base.attr` restricts the search to the lineage starting at the
    /// ancestor named `Base`. The result is a detached copy.
    #[must_use]
    pub fn attribute(&self, query_name: &str) -> Option<Attribute> {
        if let Some(found) = self.find(query_name) {
            return Some(found.clone());
        }

        let (class_name, attr_name) = query_name.split_once('.')?;
        let base = self.lineage().find(|class| class.name == class_name)?;

        base.find(attr_name).cloned()
    }

    fn find(&self, query_name: &str) -> Option<&Attribute> {
        self.all_attributes()
            .find(|attr| attr.query_name == query_name)
    }
}

///
/// TESTS
///
