use crate::{build::ClassDecl, prelude::*};
use std::collections::{BTreeMap, BTreeSet};

/// `referenced_class` is set iff the type is reference-like, and cardinality
/// only applies to references.
pub fn validate_attribute_shapes(decls: &[ClassDecl], errs: &mut ErrorTree) {
    for decl in decls {
        for attr in &decl.attributes {
            let route = format!("{}.{}", decl.name, attr.query_name);

            if attr.ty.is_reference() {
                if attr.referenced_class.is_none() {
                    errs.add_for(&route, "reference attribute has no referenced class");
                }
                if attr.cardinality == Cardinality::NotApplicable {
                    errs.add_for(&route, "reference attribute must be ToOne or ToMany");
                }
            } else {
                if attr.referenced_class.is_some() {
                    errs.add_for(
                        &route,
                        format!("{} attribute cannot reference a class", attr.ty),
                    );
                }
                if attr.cardinality != Cardinality::NotApplicable {
                    errs.add_for(
                        &route,
                        format!("{} attribute cannot carry cardinality", attr.ty),
                    );
                }
            }

            if attr.is_mine && !attr.ty.is_per_user() {
                errs.add_for(&route, "only per-user attributes can be owned-scope");
            }
        }
    }
}

/// Parents must exist and the inheritance graph must be acyclic.
pub fn validate_parents(decls: &[ClassDecl], errs: &mut ErrorTree) {
    let parents = parent_map(decls);

    for decl in decls {
        let Some(parent) = &decl.parent else {
            continue;
        };
        if !parents.contains_key(parent.as_str()) {
            errs.add_for(
                &decl.name,
                format!("parent class '{parent}' is not declared"),
            );
            continue;
        }

        let mut seen = BTreeSet::from([decl.name.as_str()]);
        let mut cursor = Some(parent.as_str());
        while let Some(current) = cursor {
            if !seen.insert(current) {
                errs.add_for(&decl.name, "inheritance cycle");
                break;
            }
            cursor = parents.get(current).copied().flatten();
        }
    }
}

/// Every referenced class must be declared in the same catalog.
pub fn validate_referenced_classes(decls: &[ClassDecl], errs: &mut ErrorTree) {
    let names: BTreeSet<&str> = decls.iter().map(|decl| decl.name.as_str()).collect();

    for decl in decls {
        for attr in &decl.attributes {
            if let Some(target) = &attr.referenced_class
                && !names.contains(target.as_str())
            {
                errs.add_for(
                    format!("{}.{}", decl.name, attr.query_name),
                    format!("referenced class '{target}' is not declared"),
                );
            }
        }
    }
}

/// A class may not redeclare an attribute it already inherits.
pub fn validate_inherited_names(decls: &[ClassDecl], errs: &mut ErrorTree) {
    let by_name: BTreeMap<&str, &ClassDecl> =
        decls.iter().map(|decl| (decl.name.as_str(), decl)).collect();

    for decl in decls {
        let mut seen = BTreeSet::from([decl.name.as_str()]);
        let mut cursor = decl.parent.as_deref();

        while let Some(ancestor) = cursor.and_then(|name| by_name.get(name)) {
            if !seen.insert(ancestor.name.as_str()) {
                break;
            }
            for attr in &decl.attributes {
                if ancestor
                    .attributes
                    .iter()
                    .any(|inherited| inherited.query_name == attr.query_name)
                {
                    errs.add_for(
                        &decl.name,
                        format!(
                            "attribute '{}' shadows inherited attribute of '{}'",
                            attr.query_name, ancestor.name
                        ),
                    );
                }
            }
            cursor = ancestor.parent.as_deref();
        }
    }
}

fn parent_map(decls: &[ClassDecl]) -> BTreeMap<&str, Option<&str>> {
    decls
        .iter()
        .map(|decl| (decl.name.as_str(), decl.parent.as_deref()))
        .collect()
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_shapes() {
        let mut bad_ref = Attribute::to_many("orders", "Order");
        bad_ref.referenced_class = None;
        let mut bad_scalar = Attribute::primitive("name", Type::Text);
        bad_scalar.cardinality = Cardinality::ToOne;
        let mut bad_mine = Attribute::to_one("owner", "Person");
        bad_mine.is_mine = true;

        let decls = [ClassDecl::new("Person")
            .attribute(bad_ref)
            .attribute(bad_scalar)
            .attribute(bad_mine)];

        let mut errs = ErrorTree::new();
        validate_attribute_shapes(&decls, &mut errs);

        assert_eq!(errs.len(), 3);
    }

    #[test]
    fn cycles_are_detected() {
        let decls = [
            ClassDecl::new("A").parent("B"),
            ClassDecl::new("B").parent("C"),
            ClassDecl::new("C").parent("A"),
        ];

        let mut errs = ErrorTree::new();
        validate_parents(&decls, &mut errs);

        assert_eq!(errs.len(), 3);
        assert!(errs.to_string().contains("A: inheritance cycle"));
    }

    #[test]
    fn self_reference_is_fine() {
        let decls = [ClassDecl::new("Employee").attribute(Attribute::to_many("reports", "Employee"))];

        let mut errs = ErrorTree::new();
        validate_referenced_classes(&decls, &mut errs);

        assert!(errs.is_empty());
    }

    #[test]
    fn shadowing_is_reported() {
        let decls = [
            ClassDecl::new("Asset").attribute(Attribute::primitive("name", Type::Text)),
            ClassDecl::new("Car")
                .parent("Asset")
                .attribute(Attribute::primitive("name", Type::Text)),
        ];

        let mut errs = ErrorTree::new();
        validate_inherited_names(&decls, &mut errs);

        assert_eq!(
            errs.to_string(),
            "Car: attribute 'name' shadows inherited attribute of 'Asset'"
        );
    }
}
