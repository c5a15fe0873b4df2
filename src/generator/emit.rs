//! Per-kind source unit emitters.
//!
//! Every classifier becomes one in-memory buffer: `<?php` header, namespace
//! declaration, a `uses` section anchor, then the kind-specific body. The
//! walker persists the serialized buffer as one file.

use crate::model::{ElementId, ElementKind, ModelGraph};
use crate::writer::CodeWriter;

use super::members::{
    class_modifiers, write_constructor, write_doc, write_member_variable, write_method,
    write_super_methods,
};
use super::names::{namespaces_of, NAMESPACE_SEPARATOR};
use super::options::GenOptions;

/// Build the complete source text for one classifier.
pub fn emit_unit(graph: &ModelGraph, id: ElementId, options: &GenOptions) -> String {
    let mut writer = CodeWriter::new(options.indent_string());
    writer.write_line("<?php");
    writer.write_line("");

    // The file's namespace comes from the top-level unit; nested classifiers
    // inside it resolve types against the same namespace.
    let current_ns = namespaces_of(graph, id);
    if !current_ns.is_empty() {
        writer.write_line(&format!(
            "namespace {}",
            current_ns.join(NAMESPACE_SEPARATOR)
        ));
    }
    writer.write_line("");
    writer.add_section("uses", true);

    write_classifier(&mut writer, graph, &current_ns, id, options);
    writer.into_text()
}

/// Dispatch a classifier to its kind-specific emitter. Packages are not
/// classifiers and emit nothing here.
pub(crate) fn write_classifier(
    writer: &mut CodeWriter,
    graph: &ModelGraph,
    current_ns: &[String],
    id: ElementId,
    options: &GenOptions,
) {
    match &graph.element(id).kind {
        ElementKind::AnnotationType { .. } => {
            write_annotation_type(writer, graph, current_ns, id, options);
        }
        ElementKind::Class { .. } => write_class(writer, graph, current_ns, id, options),
        ElementKind::Interface { .. } => write_interface(writer, graph, current_ns, id, options),
        ElementKind::Enumeration { .. } => write_enum(writer, graph, id, options),
        ElementKind::Package => {}
    }
}

fn is_classifier(graph: &ModelGraph, id: ElementId) -> bool {
    !matches!(graph.element(id).kind, ElementKind::Package)
}

/// Member variables contributed by associations: each end whose opposite
/// end references this classifier and which is marked navigable becomes one
/// member named after the end.
fn write_association_members(
    writer: &mut CodeWriter,
    graph: &ModelGraph,
    id: ElementId,
    options: &GenOptions,
) {
    for association in graph.associations_of(id) {
        if association.end1.reference == id && association.end2.navigable {
            write_member_variable(writer, graph, &association.end2, options);
            writer.write_line("");
        } else if association.end2.reference == id && association.end1.navigable {
            write_member_variable(writer, graph, &association.end1, options);
            writer.write_line("");
        }
    }
}

fn write_class(
    writer: &mut CodeWriter,
    graph: &ModelGraph,
    current_ns: &[String],
    id: ElementId,
    options: &GenOptions,
) {
    let elem = graph.element(id);
    let ElementKind::Class {
        attributes,
        operations,
    } = &elem.kind
    else {
        return;
    };

    write_doc(writer, &elem.documentation, options);

    let mut terms: Vec<String> = Vec::new();
    let mods = class_modifiers(elem);
    if !mods.is_empty() {
        terms.push(mods.join(" "));
    }
    terms.push("class".to_string());
    terms.push(elem.name.clone());

    // Only the first generalization becomes the textual superclass.
    let super_class = graph.super_classes(id).first().copied();
    if let Some(super_id) = super_class {
        terms.push(format!("extends {}", graph.element(super_id).name));
    }

    let interfaces = graph.super_interfaces(id);
    if !interfaces.is_empty() {
        let names: Vec<&str> = interfaces
            .iter()
            .map(|i| graph.element(*i).name.as_str())
            .collect();
        terms.push(format!("implements {}", names.join(", ")));
    }

    writer.write_line(&terms.join(" "));
    writer.write_line("{");
    writer.indent();

    write_constructor(writer, graph, id, options);
    writer.write_line("");

    for attribute in attributes {
        write_member_variable(writer, graph, attribute, options);
        writer.write_line("");
    }
    write_association_members(writer, graph, id, options);

    // Names already written, so later interface declarations of the same
    // method are skipped. Local to this unit.
    let mut implemented: Vec<String> = Vec::new();
    for op in operations {
        if write_method(writer, graph, current_ns, op, options, false, false) {
            writer.write_line("");
            implemented.push(op.name.clone());
        }
    }
    if let Some(super_id) = super_class {
        write_super_methods(
            writer,
            graph,
            current_ns,
            super_id,
            options,
            &mut implemented,
            true,
        );
    }
    for interface in &interfaces {
        write_super_methods(
            writer,
            graph,
            current_ns,
            *interface,
            options,
            &mut implemented,
            false,
        );
    }

    for child in &elem.owned {
        if is_classifier(graph, *child) {
            write_classifier(writer, graph, current_ns, *child, options);
        }
        writer.write_line("");
    }

    writer.outdent();
    writer.pop_line();
    writer.write_line("}");
    writer.write_line("");
}

fn write_interface(
    writer: &mut CodeWriter,
    graph: &ModelGraph,
    current_ns: &[String],
    id: ElementId,
    options: &GenOptions,
) {
    let elem = graph.element(id);
    let ElementKind::Interface {
        attributes,
        operations,
    } = &elem.kind
    else {
        return;
    };

    write_doc(writer, &elem.documentation, options);

    let mut terms: Vec<String> = vec!["interface".to_string(), elem.name.clone()];
    // Interfaces list every generalization, not just the first.
    let supers = graph.super_classes(id);
    if !supers.is_empty() {
        let names: Vec<&str> = supers
            .iter()
            .map(|s| graph.element(*s).name.as_str())
            .collect();
        terms.push(format!("extends {}", names.join(", ")));
    }
    writer.write_line(&terms.join(" "));
    writer.write_line("{");
    writer.write_line("");
    writer.indent();

    for attribute in attributes {
        write_member_variable(writer, graph, attribute, options);
        writer.write_line("");
    }
    write_association_members(writer, graph, id, options);

    for op in operations {
        write_method(writer, graph, current_ns, op, options, true, false);
        writer.write_line("");
    }

    for child in &elem.owned {
        write_classifier(writer, graph, current_ns, *child, options);
        writer.write_line("");
    }

    writer.outdent();
    writer.pop_line();
    writer.write_line("}");
    writer.write_line("");
}

fn write_enum(writer: &mut CodeWriter, graph: &ModelGraph, id: ElementId, options: &GenOptions) {
    let elem = graph.element(id);
    let ElementKind::Enumeration { literals } = &elem.kind else {
        return;
    };

    write_doc(writer, &elem.documentation, options);

    writer.write_line(&format!(
        "class {} extends {NAMESPACE_SEPARATOR}SplEnum",
        elem.name
    ));
    writer.write_line("{");
    writer.indent();

    for (index, literal) in literals.iter().enumerate() {
        if literal.is_empty() {
            continue;
        }
        writer.write_line(&format!("const {literal} = {index}"));
    }

    writer.outdent();
    writer.write_line("}");
    writer.write_line("");
}

fn write_annotation_type(
    writer: &mut CodeWriter,
    graph: &ModelGraph,
    current_ns: &[String],
    id: ElementId,
    options: &GenOptions,
) {
    let elem = graph.element(id);
    let ElementKind::AnnotationType {
        attributes,
        operations,
    } = &elem.kind
    else {
        return;
    };

    write_doc(writer, &elem.documentation, options);

    let mut terms: Vec<String> = Vec::new();
    let mods = class_modifiers(elem);
    if !mods.is_empty() {
        terms.push(mods.join(" "));
    }
    terms.push("@interface".to_string());
    terms.push(elem.name.clone());

    writer.write_line(&terms.join(" "));
    writer.write_line("{");
    writer.write_line("");
    writer.indent();

    for attribute in attributes {
        write_member_variable(writer, graph, attribute, options);
        writer.write_line("");
    }

    for op in operations {
        write_method(writer, graph, current_ns, op, options, true, true);
        writer.write_line("");
    }

    for child in &elem.owned {
        write_classifier(writer, graph, current_ns, *child, options);
        writer.write_line("");
    }

    writer.outdent();
    writer.write_line("}");
}
