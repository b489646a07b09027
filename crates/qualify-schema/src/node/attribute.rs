use crate::prelude::*;
use std::hash::{Hash, Hasher};

///
/// Attribute
///
/// One typed field of a class. Identity is `query_name`, `ty`,
/// `cardinality` and the *name* of the referenced class; `display_name` and
/// `is_mine` only change how the attribute is presented.
///
/// NOTE: the referenced class is compared by name only, so two catalogs that
/// each define a different `Person` produce attributes that compare equal.
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Attribute {
    pub query_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(rename = "type")]
    pub ty: Type,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referenced_class: Option<String>,

    #[serde(default)]
    pub cardinality: Cardinality,

    #[serde(default)]
    pub is_mine: bool,
}

impl Attribute {
    /// Scalar attribute of one of the primitive kinds.
    #[must_use]
    pub fn primitive(query_name: impl Into<String>, ty: Type) -> Self {
        Self {
            query_name: query_name.into(),
            display_name: None,
            ty,
            referenced_class: None,
            cardinality: Cardinality::NotApplicable,
            is_mine: false,
        }
    }

    #[must_use]
    pub fn to_one(query_name: impl Into<String>, class: impl Into<String>) -> Self {
        Self::reference(query_name, Type::Reference, class, Cardinality::ToOne)
    }

    #[must_use]
    pub fn to_many(query_name: impl Into<String>, class: impl Into<String>) -> Self {
        Self::reference(query_name, Type::Reference, class, Cardinality::ToMany)
    }

    /// Per-user to-many relationship; `mine` selects the owned-scope variant.
    #[must_use]
    pub fn per_user_to_many(
        query_name: impl Into<String>,
        class: impl Into<String>,
        mine: bool,
    ) -> Self {
        let mut attr = Self::reference(query_name, Type::UserReference, class, Cardinality::ToMany);
        attr.is_mine = mine;

        attr
    }

    #[must_use]
    pub fn property_map(query_name: impl Into<String>) -> Self {
        Self::primitive(query_name, Type::PropertyMap)
    }

    /// Per-user property map; `mine` selects the owned-scope variant.
    #[must_use]
    pub fn per_user_property_map(query_name: impl Into<String>, mine: bool) -> Self {
        let mut attr = Self::primitive(query_name, Type::UserPropertyMap);
        attr.is_mine = mine;

        attr
    }

    fn reference(
        query_name: impl Into<String>,
        ty: Type,
        class: impl Into<String>,
        cardinality: Cardinality,
    ) -> Self {
        Self {
            query_name: query_name.into(),
            display_name: None,
            ty,
            referenced_class: Some(class.into()),
            cardinality,
            is_mine: false,
        }
    }

    #[must_use]
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    #[must_use]
    pub const fn is_reference(&self) -> bool {
        self.ty.is_reference()
    }

    #[must_use]
    pub const fn is_property_map(&self) -> bool {
        self.ty.is_property_map()
    }

    #[must_use]
    pub const fn is_to_many(&self) -> bool {
        self.cardinality.is_to_many()
    }

    /// Human-facing label. Per-user attributes are framed as "My X" for
    /// the owned scope, and "All X" / "Any X" otherwise.
    #[must_use]
    pub fn label(&self) -> String {
        let base = self.display_name.as_deref().unwrap_or(&self.query_name);

        if !self.ty.is_per_user() {
            return base.to_string();
        }

        if self.is_mine {
            format!("My {base}")
        } else if self.is_to_many() {
            format!("Any {base}")
        } else {
            format!("All {base}")
        }
    }
}

impl PartialEq for Attribute {
    fn eq(&self, other: &Self) -> bool {
        self.query_name == other.query_name
            && self.ty == other.ty
            && self.cardinality == other.cardinality
            && self.referenced_class == other.referenced_class
    }
}

impl Eq for Attribute {}

impl Hash for Attribute {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.query_name.hash(state);
        self.ty.hash(state);
        self.cardinality.hash(state);
        self.referenced_class.hash(state);
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_ignores_presentation() {
        let plain = Attribute::to_many("orders", "Order");
        let decorated = plain.clone().with_display_name("Purchase Orders");

        assert_eq!(plain, decorated);
    }

    #[test]
    fn identity_tracks_referenced_class_name() {
        let orders = Attribute::to_many("orders", "Order");
        let invoices = Attribute::to_many("orders", "Invoice");

        assert_ne!(orders, invoices);
    }

    #[test]
    fn identity_tracks_cardinality_and_type() {
        assert_ne!(
            Attribute::to_one("owner", "Person"),
            Attribute::to_many("owner", "Person")
        );
        assert_ne!(
            Attribute::primitive("size", Type::Int16),
            Attribute::primitive("size", Type::Int32)
        );
    }

    #[test]
    fn is_mine_does_not_change_identity() {
        let mut mine = Attribute::per_user_to_many("tags", "Tag", true);
        let all = Attribute::per_user_to_many("tags", "Tag", false);
        assert_eq!(mine, all);

        mine.query_name = "myTags".to_string();
        assert_ne!(mine, all);
    }

    #[test]
    fn declaration_json_uses_wire_names() {
        let json = serde_json::json!({
            "query_name": "owner",
            "type": "Reference",
            "referenced_class": "Person",
            "cardinality": "ToOne",
        });
        let attr: Attribute = serde_json::from_value(json).expect("attribute");

        assert_eq!(attr, Attribute::to_one("owner", "Person"));
        assert!(!attr.is_mine);

        let back = serde_json::to_value(&attr).expect("json");
        assert!(back.get("display_name").is_none());
        assert_eq!(back["type"], "Reference");
    }

    #[test]
    fn per_user_labels_frame_scope() {
        let mine = Attribute::per_user_to_many("myTags", "Tag", true).with_display_name("Tags");
        let any = Attribute::per_user_to_many("tags", "Tag", false).with_display_name("Tags");
        let notes = Attribute::per_user_property_map("notes", false);

        assert_eq!(mine.label(), "My Tags");
        assert_eq!(any.label(), "Any Tags");
        assert_eq!(notes.label(), "All notes");
        assert_eq!(Attribute::primitive("name", Type::Text).label(), "name");
    }
}
