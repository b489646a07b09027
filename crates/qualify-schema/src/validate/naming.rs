use crate::{
    MAX_ATTRIBUTE_NAME_LEN, MAX_CLASS_NAME_LEN, build::ClassDecl, prelude::*,
    validate::is_identifier,
};
use std::collections::BTreeSet;

/// Class names must be unique identifiers; attribute names must be
/// identifiers unique within their own class.
pub fn validate_naming(decls: &[ClassDecl], errs: &mut ErrorTree) {
    let mut seen = BTreeSet::new();

    for decl in decls {
        if !is_identifier(&decl.name, MAX_CLASS_NAME_LEN) {
            err!(
                errs,
                "invalid class name '{}' (identifier, max {MAX_CLASS_NAME_LEN} chars)",
                decl.name
            );
        }
        if !seen.insert(decl.name.as_str()) {
            err!(errs, "duplicate class name '{}'", decl.name);
        }

        let mut own = BTreeSet::new();
        for attr in &decl.attributes {
            if !is_identifier(&attr.query_name, MAX_ATTRIBUTE_NAME_LEN) {
                errs.add_for(
                    &decl.name,
                    format!(
                        "invalid attribute name '{}' (identifier, max {MAX_ATTRIBUTE_NAME_LEN} chars)",
                        attr.query_name
                    ),
                );
            }
            if !own.insert(attr.query_name.as_str()) {
                errs.add_for(
                    &decl.name,
                    format!("duplicate attribute '{}'", attr.query_name),
                );
            }
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    fn run(decls: &[ClassDecl]) -> ErrorTree {
        let mut errs = ErrorTree::new();
        validate_naming(decls, &mut errs);

        errs
    }

    #[test]
    fn duplicate_classes_and_attributes_are_reported() {
        let decls = [
            ClassDecl::new("Person")
                .attribute(Attribute::primitive("name", Type::Text))
                .attribute(Attribute::primitive("name", Type::Text)),
            ClassDecl::new("Person"),
        ];

        let errs = run(&decls);
        assert_eq!(errs.len(), 2);
        assert!(errs.to_string().contains("duplicate class name 'Person'"));
        assert!(errs.to_string().contains("Person: duplicate attribute 'name'"));
    }

    #[test]
    fn bad_identifiers_are_reported() {
        let decls = [ClassDecl::new("my class").attribute(Attribute::primitive("a.b", Type::Text))];

        assert_eq!(run(&decls).len(), 2);
    }
}
