use serde_json::json;

use phpgen::model::{load_model_str, load_model_value, ElementKind, TypeRef, Visibility};

#[test]
fn test_tree_flattening_wires_parents_and_children() {
    let g = load_model_value(json!({
        "root": { "kind": "package", "name": "Project", "children": [
            { "kind": "package", "name": "App", "children": [
                { "id": "foo", "kind": "class", "name": "Foo" }
            ]}
        ]}
    }))
    .expect("valid document");

    let root = g.root();
    assert!(g.element(root).parent.is_none());
    assert_eq!(g.element(root).owned.len(), 1);

    let app = g.element(root).owned[0];
    assert_eq!(g.element(app).name, "App");
    assert_eq!(g.element(app).parent, Some(root));

    let foo = g.element(app).owned[0];
    assert_eq!(g.element(foo).name, "Foo");
    assert!(matches!(g.element(foo).kind, ElementKind::Class { .. }));
}

#[test]
fn test_members_and_edges_resolve() {
    let g = load_model_value(json!({
        "root": { "kind": "package", "name": "Project", "children": [
            { "id": "a", "kind": "class", "name": "A", "attributes": [
                { "name": "next", "type": { "ref": "b" }, "visibility": "protected" },
                { "name": "count", "type": "int" },
                { "name": "tag" }
            ], "operations": [
                { "name": "poll", "parameters": [
                    { "name": "timeout", "type": "int" },
                    { "name": "out", "type": "bool", "direction": "return" }
                ]}
            ]},
            { "id": "b", "kind": "class", "name": "B" },
            { "id": "i", "kind": "interface", "name": "I" }
        ]},
        "generalizations": [ { "source": "a", "target": "b" } ],
        "interfaceRealizations": [ { "source": "a", "target": "i" } ],
        "associations": [
            { "end1": { "reference": "a" },
              "end2": { "reference": "b", "navigable": true, "name": "peer" } }
        ]
    }))
    .expect("valid document");

    let a = g.find_by_name("A").expect("A exists");
    let b = g.find_by_name("B").expect("B exists");
    let i = g.find_by_name("I").expect("I exists");

    let ElementKind::Class { attributes, operations } = &g.element(a).kind else {
        panic!("expected class");
    };
    assert_eq!(attributes[0].ty, TypeRef::Node(b));
    assert_eq!(attributes[0].visibility, Visibility::Protected);
    assert_eq!(attributes[1].ty, TypeRef::Named("int".to_string()));
    assert_eq!(attributes[2].ty, TypeRef::None);

    let op = &operations[0];
    assert_eq!(op.non_return_parameters().count(), 1);
    assert_eq!(
        op.return_parameter().map(|p| p.name.as_str()),
        Some("out")
    );

    assert_eq!(g.super_classes(a), vec![b]);
    assert_eq!(g.super_interfaces(a), vec![i]);
    assert_eq!(g.associations_of(a).len(), 1);
    assert_eq!(g.associations_of(b).len(), 1);
    assert!(g.associations_of(i).is_empty());
}

#[test]
fn test_annotation_type_stereotype_resolves_kind() {
    let g = load_model_value(json!({
        "root": { "kind": "package", "name": "P", "children": [
            { "kind": "class", "name": "M", "stereotype": "annotationType" },
            { "kind": "annotationType", "name": "N" }
        ]}
    }))
    .expect("valid document");
    for name in ["M", "N"] {
        let id = g.find_by_name(name).expect("exists");
        assert!(
            matches!(g.element(id).kind, ElementKind::AnnotationType { .. }),
            "{name} should be an annotation type"
        );
    }
}

#[test]
fn test_duplicate_element_id_is_rejected() {
    let err = load_model_value(json!({
        "root": { "kind": "package", "name": "P", "children": [
            { "id": "x", "kind": "class", "name": "A" },
            { "id": "x", "kind": "class", "name": "B" }
        ]}
    }))
    .expect_err("duplicate id must fail");
    assert!(err.to_string().contains("duplicate element id"));
}

#[test]
fn test_unknown_edge_reference_is_rejected() {
    let err = load_model_value(json!({
        "root": { "kind": "package", "name": "P", "children": [
            { "id": "a", "kind": "class", "name": "A" }
        ]},
        "generalizations": [ { "source": "a", "target": "missing" } ]
    }))
    .expect_err("unknown id must fail");
    assert!(err.to_string().contains("missing"), "got: {err:#}");
}

#[test]
fn test_unknown_type_reference_is_rejected() {
    let err = load_model_value(json!({
        "root": { "kind": "package", "name": "P", "children": [
            { "kind": "class", "name": "A", "attributes": [
                { "name": "x", "type": { "ref": "nowhere" } }
            ]}
        ]}
    }))
    .expect_err("unknown type ref must fail");
    assert!(err.to_string().contains("nowhere"), "got: {err:#}");
}

#[test]
fn test_unknown_kind_is_rejected() {
    let err = load_model_value(json!({
        "root": { "kind": "component", "name": "P" }
    }))
    .expect_err("unknown kind must fail");
    assert!(err.to_string().contains("unknown element kind"));
}

#[test]
fn test_load_from_text() {
    let g = load_model_str(r#"{ "root": { "kind": "package", "name": "P" } }"#)
        .expect("valid document");
    assert_eq!(g.element(g.root()).name, "P");
}

#[test]
fn test_malformed_document_is_rejected() {
    assert!(load_model_str("{ not json").is_err());
    assert!(load_model_str("{}").is_err());
}
