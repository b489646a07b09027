use qualify::{ErrorKind, ErrorOrigin, load_catalog, prelude::*};
use std::{sync::Arc, thread};

const CATALOG: &str = r#"
[[classes]]
name = "Asset"

[[classes.attributes]]
query_name = "label"
type = "Text"

[[classes.attributes]]
query_name = "props"
type = "PropertyMap"

[[classes]]
name = "Vehicle"
parent = "Asset"

[[classes.attributes]]
query_name = "wheels"
type = "Int16"

[[classes.attributes]]
query_name = "retired"
type = "Bool"

[[classes.attributes]]
query_name = "trips"
type = "Reference"
referenced_class = "Trip"
cardinality = "ToMany"

[[classes.attributes]]
query_name = "my_drivers"
display_name = "Drivers"
type = "UserReference"
referenced_class = "Driver"
cardinality = "ToMany"
is_mine = true

[[classes]]
name = "Trip"

[[classes.attributes]]
query_name = "distance"
type = "Float64"

[[classes.attributes]]
query_name = "started"
type = "DateTime"

[[classes.attributes]]
query_name = "stops"
type = "Reference"
referenced_class = "Stop"
cardinality = "ToMany"

[[classes]]
name = "Stop"

[[classes.attributes]]
query_name = "city"
type = "Text"

[[classes]]
name = "Driver"

[[classes.attributes]]
query_name = "licensed"
type = "Bool"
"#;

fn catalog() -> Catalog {
    load_catalog(CATALOG).expect("catalog loads")
}

fn attr(catalog: &Catalog, class: &str, name: &str) -> Attribute {
    catalog.resolve(class, name).expect("attribute exists")
}

fn sample(catalog: &Catalog) -> RowNode {
    let trips = attr(catalog, "Vehicle", "trips");
    let stops = attr(catalog, "Trip", "stops");

    RowNode::root("Vehicle", Quantifier::All)
        .with_child(RowNode::leaf(
            "Vehicle",
            vec![attr(catalog, "Vehicle", "label")],
            Operator::Matches,
            "^truck",
        ))
        .with_child(RowNode::unary(
            "Vehicle",
            vec![attr(catalog, "Vehicle", "retired")],
            Operator::IsFalse,
        ))
        .with_child(RowNode::count(
            "Vehicle",
            vec![trips.clone()],
            Operator::Gt,
            10,
        ))
        .with_child(
            RowNode::group("Vehicle", vec![trips, stops], Quantifier::Any)
                .with_quantifier2(Quantifier::None)
                .with_child(RowNode::leaf(
                    "Stop",
                    vec![attr(catalog, "Stop", "city")],
                    Operator::Eq,
                    "Lyon",
                )),
        )
        .with_child(
            RowNode::group(
                "Vehicle",
                vec![attr(catalog, "Vehicle", "my_drivers")],
                Quantifier::All,
            )
            .with_child(RowNode::unary(
                "Driver",
                vec![attr(catalog, "Driver", "licensed")],
                Operator::IsTrue,
            )),
        )
}

#[test]
fn version_is_exported() {
    assert!(!qualify::VERSION.is_empty());
}

#[test]
fn catalog_from_toml_translates_both_ways() {
    let catalog = catalog();
    let row = sample(&catalog);

    let expr = lower(&row, &catalog).expect("lowers");
    assert_eq!(
        expr.to_string(),
        concat!(
            r#"and(matches(label, "^truck"), isfalse(retired), >(@count(trips), 10), "#,
            r#"@apply(.(trips, stops), or(not(or(==(city, "Lyon"))))), "#,
            r#"@apply(my_drivers, and(istrue(licensed))))"#,
        )
    );

    let raised = raise(&expr, "Vehicle", &catalog).expect("raises");
    assert_eq!(raised, row);
    assert_eq!(lower(&raised, &catalog), Ok(expr));
}

#[test]
fn rows_render_with_labels() {
    let catalog = catalog();
    let rendered = sample(&catalog).to_string();

    assert!(rendered.starts_with("Vehicle all\n"));
    assert!(rendered.contains("\n  any/none trips.stops\n    city == \"Lyon\""));
    assert!(rendered.contains("\n  all My Drivers\n"));
}

#[test]
fn persisted_trees_come_back_equal() {
    let catalog = catalog();
    let row = sample(&catalog);
    let expr = lower(&row, &catalog).expect("lowers");

    let row_back: RowNode = deserialize(&serialize(&row).expect("row bytes")).expect("row");
    let expr_back: Expr = deserialize(&serialize(&expr).expect("expr bytes")).expect("expr");

    assert_eq!(row_back, row);
    assert_eq!(expr_back, expr);
}

#[test]
fn errors_map_into_the_public_taxonomy() {
    let catalog = catalog();
    let bad = RowNode::root("Vehicle", Quantifier::All).with_child(RowNode::leaf(
        "Vehicle",
        vec![attr(&catalog, "Vehicle", "retired")],
        Operator::Eq,
        false,
    ));

    let err: qualify::Error = lower(&bad, &catalog).expect_err("illegal").into();
    assert_eq!(err.kind, ErrorKind::Unsupported);
    assert_eq!(err.origin, ErrorOrigin::Translate);

    let shape = Expr::not(Expr::and(vec![]));
    let err: qualify::Error = raise(&shape, "Vehicle", &catalog)
        .expect_err("not(and)")
        .into();
    assert_eq!(err.kind, ErrorKind::Unsupported);

    let err = load_catalog("[[classes]]\nname = \"\"").expect_err("empty class name");
    assert_eq!(err.kind, ErrorKind::Invalid);
    assert_eq!(err.origin, ErrorOrigin::Catalog);
}

#[test]
fn inherited_attributes_navigate() {
    let catalog = catalog();
    let row = RowNode::root("Vehicle", Quantifier::Any).with_child(
        RowNode::leaf(
            "Vehicle",
            vec![attr(&catalog, "Vehicle", "Asset.props")],
            Operator::Lte,
            Float64::try_new(2.5).expect("finite"),
        )
        .with_property("weight", Type::Float64),
    );

    let expr = lower(&row, &catalog).expect("lowers");
    assert_eq!(
        expr.to_string(),
        r#"or(<=(@get<Float64>(props, "weight"), 2.5))"#
    );
    assert_eq!(raise(&expr, "Vehicle", &catalog), Ok(row));
}

#[test]
fn translation_is_safe_across_threads() {
    let catalog = Arc::new(catalog());
    let row = sample(&catalog);
    let expected = lower(&row, &catalog).expect("lowers");

    thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                let translator = Translator::new(&catalog);
                for _ in 0..16 {
                    let expr = translator.lower(&row).expect("lowers");
                    assert_eq!(expr, expected);
                    assert_eq!(translator.raise(&expr, "Vehicle"), Ok(row.clone()));
                }
            });
        }
    });
}

#[test]
fn held_catalog_outlives_its_replacement() {
    let mut current = Arc::new(catalog());
    let row = sample(&current);
    let expr = lower(&row, &current).expect("lowers");

    let held = Arc::clone(&current);
    current = Arc::new(
        CatalogBuilder::new()
            .class(ClassDecl::new("Vehicle"))
            .build()
            .expect("empty vehicle"),
    );

    assert_eq!(raise(&expr, "Vehicle", &held), Ok(row));
    assert!(matches!(
        raise(&expr, "Vehicle", &current),
        Err(TranslateError::UnresolvedAttribute { .. })
    ));
}
