
use qualify_schema::prelude::*;
use std::sync::LazyLock;

static CATALOG: LazyLock<Catalog> = LazyLock::new(build_catalog);

// Entity <- Customer, Entity <- Order; Item, Tag and List stand alone.
fn build_catalog() -> Catalog {
    CatalogBuilder::new()
        .class(
            ClassDecl::new("Entity")
                .attribute(Attribute::primitive("name", Type::Text))
                .attribute(Attribute::primitive("created", Type::DateTime))
                .attribute(Attribute::to_many("tags", "Tag"))
                .attribute(Attribute::property_map("extra")),
        )
        .class(
            ClassDecl::new("Customer")
                .parent("Entity")
                .attribute(Attribute::primitive("active", Type::Bool))
                .attribute(Attribute::primitive("age", Type::Int16))
                .attribute(Attribute::primitive("balance", Type::Float64))
                .attribute(Attribute::to_many("orders", "Order"))
                .attribute(Attribute::to_one("referrer", "Customer"))
                .attribute(
                    Attribute::per_user_to_many("my_lists", "List", true).with_display_name("Lists"),
                )
                .attribute(
                    Attribute::per_user_to_many("lists", "List", false).with_display_name("Lists"),
                )
                .attribute(Attribute::per_user_property_map("my_notes", true)),
        )
        .class(
            ClassDecl::new("Order")
                .parent("Entity")
                .attribute(Attribute::primitive("total", Type::Int32))
                .attribute(Attribute::primitive("paid", Type::Bool))
                .attribute(Attribute::to_many("items", "Item"))
                .attribute(Attribute::to_one("customer", "Customer")),
        )
        .class(
            ClassDecl::new("Item")
                .attribute(Attribute::primitive("sku", Type::Text))
                .attribute(Attribute::primitive("qty", Type::Int32)),
        )
        .class(ClassDecl::new("Tag").attribute(Attribute::primitive("label", Type::Text)))
        .class(
            ClassDecl::new("List")
                .attribute(Attribute::primitive("title", Type::Text))
                .attribute(Attribute::to_many("members", "Customer")),
        )
        .build()
        .expect("fixture catalog is valid")
}

fn catalog() -> &'static Catalog {
    &CATALOG
}

/// Catalog attributes for `names`, navigating from `class`.
fn path(class: &str, names: &[&str]) -> Vec<Attribute> {
    let mut current = class.to_string();

    names
        .iter()
        .map(|name| {
            let attr = catalog()
                .resolve(&current, name)
                .expect("fixture attribute exists");
            if let Some(next) = &attr.referenced_class {
                current.clone_from(next);
            }
            attr
        })
        .collect()
}

/// Customer root with `levels` nested `any` groups, alternating
/// `Customer.lists` and `List.members`, over one condition.
fn nested_lists(levels: usize) -> crate::row::RowNode {
    use crate::{
        op::{Operator, Quantifier},
        row::RowNode,
    };

    let mut row = if levels % 2 == 0 {
        RowNode::unary("Customer", path("Customer", &["active"]), Operator::IsTrue)
    } else {
        RowNode::leaf("List", path("List", &["title"]), Operator::Eq, "x")
    };

    for level in (0..levels).rev() {
        row = if level % 2 == 0 {
            RowNode::group("Customer", path("Customer", &["lists"]), Quantifier::Any)
        } else {
            RowNode::group("List", path("List", &["members"]), Quantifier::Any)
        }
        .with_child(row);
    }

    RowNode::root("Customer", Quantifier::Any).with_child(row)
}
