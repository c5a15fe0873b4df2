//! Member synthesis: modifiers, doc comments, constructors, member
//! variables, method bodies and inherited-method overrides.

use crate::model::{ElementId, Member, ModelGraph, Modifiers, Operation, Visibility};
use crate::writer::CodeWriter;

use super::names::{doc_type, is_allowed_type_hint, php_type, type_hint};
use super::options::GenOptions;

/// Keyword for a visibility, `None` for package visibility which emits no
/// keyword at all.
pub fn visibility_keyword(visibility: Visibility) -> Option<&'static str> {
    match visibility {
        Visibility::Package => None,
        Visibility::Public => Some("public"),
        Visibility::Protected => Some("protected"),
        Visibility::Private => Some("private"),
    }
}

/// Non-visibility modifiers: `static`, `abstract` and `final` (asserted by
/// either the final-specification or the leaf flag).
pub fn class_modifiers(flags: &impl Modifiers) -> Vec<String> {
    let mut modifiers = Vec::new();
    if flags.is_static() {
        modifiers.push("static".to_string());
    }
    if flags.is_abstract() {
        modifiers.push("abstract".to_string());
    }
    if flags.is_final_specification() || flags.is_leaf() {
        modifiers.push("final".to_string());
    }
    modifiers
}

/// Full modifier list: visibility keyword (when any) merged with the
/// non-visibility modifiers.
pub fn modifiers(flags: &impl Modifiers) -> Vec<String> {
    let mut explicit = Vec::new();
    if let Some(keyword) = visibility_keyword(flags.visibility()) {
        explicit.push(keyword.to_string());
    }
    merge_modifiers(explicit, class_modifiers(flags))
}

/// Merge two modifier lists: tokens of `second` already present in `first`
/// are dropped, then `second` is appended, preserving `first`'s order.
pub fn merge_modifiers(first: Vec<String>, second: Vec<String>) -> Vec<String> {
    let mut merged = first;
    let rest: Vec<String> = second
        .into_iter()
        .filter(|token| !merged.contains(token))
        .collect();
    merged.extend(rest);
    merged
}

/// Write a `/** ... */` doc block, one ` * ` line per text line. Disabled
/// entirely when doc comments are turned off.
pub fn write_doc(writer: &mut CodeWriter, text: &str, options: &GenOptions) {
    if !options.php_doc {
        return;
    }
    writer.write_line("/**");
    for line in text.trim().split('\n') {
        if line.is_empty() {
            writer.write_line(" *");
        } else {
            writer.write_line(&format!(" * {}", line.trim()));
        }
    }
    writer.write_line(" */");
}

/// Write a literal method specification verbatim, line by line.
pub fn write_spec_lines(writer: &mut CodeWriter, text: &str) {
    for line in text.trim().split('\n') {
        writer.write_line(line);
    }
}

/// Synthesize the parameterless empty constructor.
///
/// Emitted only when the classifier declares no operation named after the
/// constructor convention and has no superclass edge; otherwise construction
/// is trusted to be inherited or explicit.
pub fn write_constructor(
    writer: &mut CodeWriter,
    graph: &ModelGraph,
    id: ElementId,
    options: &GenOptions,
) {
    let elem = graph.element(id);
    let has_constructor = graph
        .operations_of(id)
        .iter()
        .any(|op| op.name.contains("__construct"));
    if elem.name.is_empty() || !graph.super_classes(id).is_empty() || has_constructor {
        return;
    }
    write_doc(writer, &elem.documentation, options);
    let mut terms: Vec<&str> = Vec::new();
    if let Some(keyword) = visibility_keyword(elem.visibility) {
        terms.push(keyword);
    }
    terms.push("function __construct()");
    writer.write_line(&terms.join(" "));
    writer.write_line("{");
    writer.write_line("}");
}

/// Write one member variable (attribute or navigable association end).
///
/// Final/leaf members render as named constants: upper-cased name, no
/// visibility keyword, no `$` sigil. Empty names are silently skipped.
pub fn write_member_variable(
    writer: &mut CodeWriter,
    graph: &ModelGraph,
    member: &impl Member,
    options: &GenOptions,
) {
    if member.name().is_empty() {
        return;
    }
    let doc = format!(
        "@var {} {}",
        doc_type(graph, &member.type_ref(), member.multiplicity()),
        member.documentation().trim()
    );
    write_doc(writer, &doc, options);

    let mut terms: Vec<String> = Vec::new();
    if member.is_final_specification() || member.is_leaf() {
        terms.push(format!("const {}", member.name().to_uppercase()));
    } else {
        let mods = modifiers(member);
        if !mods.is_empty() {
            terms.push(mods.join(" "));
        }
        terms.push(format!("${}", member.name()));
    }
    if !member.default_value().is_empty() {
        terms.push(format!("= {}", member.default_value()));
    }
    writer.write_line(&format!("{};", terms.join(" ")));
}

/// Write one method. Returns whether anything was written; only an empty
/// operation name yields `false`.
///
/// Body policy: `skip_body` or an `abstract` modifier emit the signature
/// only; a non-empty specification is emitted verbatim; otherwise a
/// placeholder plus a type-directed default return statement.
pub fn write_method(
    writer: &mut CodeWriter,
    graph: &ModelGraph,
    current_ns: &[String],
    op: &Operation,
    options: &GenOptions,
    skip_body: bool,
    skip_params: bool,
) -> bool {
    if op.name.is_empty() {
        return false;
    }
    let params: Vec<_> = op.non_return_parameters().collect();
    let return_param = op.return_parameter();

    let mut doc = op.documentation.trim().to_string();
    for param in &params {
        doc.push_str(&format!(
            "\n@param {} ${} {}",
            doc_type(graph, &param.ty, &param.multiplicity),
            param.name,
            param.documentation
        ));
    }
    if let Some(ret) = return_param {
        doc.push_str(&format!(
            "\n@return {} {}",
            doc_type(graph, &ret.ty, &ret.multiplicity),
            ret.documentation
        ));
    }
    write_doc(writer, &doc, options);

    let mods = modifiers(op);
    let mut terms: Vec<String> = Vec::new();
    if !mods.is_empty() {
        terms.push(mods.join(" "));
    }
    terms.push("function".to_string());

    let mut param_terms: Vec<String> = Vec::new();
    if !skip_params {
        for param in &params {
            let mut term = format!("${}", param.name);
            let ty = php_type(graph, &param.ty, &param.multiplicity);
            if options.strict_types && is_allowed_type_hint(&ty) {
                term = format!("{} {}", type_hint(graph, current_ns, &param.ty), term);
            }
            if !param.default_value.is_empty() {
                term.push_str(&format!(" = {}", param.default_value));
            }
            param_terms.push(term);
        }
    }
    let mut signature = format!("{}({})", op.name, param_terms.join(", "));
    if options.return_types {
        if let Some(ret) = return_param {
            let hint = type_hint(graph, current_ns, &ret.ty);
            if is_allowed_type_hint(&hint) {
                signature.push_str(&format!(":{hint}"));
            }
        }
    }
    terms.push(signature);

    if skip_body || mods.iter().any(|m| m == "abstract") {
        writer.write_line(&terms.join(" "));
    } else {
        writer.write_line(&terms.join(" "));
        writer.write_line("{");
        writer.indent();
        if op.specification.is_empty() {
            writer.write_line("// TODO: implement here");
            if let Some(ret) = return_param {
                let return_type = php_type(graph, &ret.ty, &ret.multiplicity);
                writer.write_line(default_return_statement(&return_type));
            }
        } else {
            write_spec_lines(writer, &op.specification);
        }
        writer.outdent();
        writer.write_line("}");
    }
    true
}

/// Type-directed default return statement for stub bodies.
fn default_return_statement(return_type: &str) -> &'static str {
    match return_type {
        "boolean" | "bool" => "return false",
        "int" | "long" | "short" | "byte" => "return 0",
        "float" | "double" => "return 0.0",
        "char" => "return '0'",
        "string" => "return \"\"",
        "array" => "return array()",
        _ => "return null",
    }
}

/// Synthesize concrete overrides for the operations of a superclass or a
/// realized interface.
///
/// Interface mode emits every operation not yet in `implemented`;
/// abstract-parent mode (`only_abstract`) emits every abstract operation
/// regardless. Each emitted name is recorded so a later interface sharing
/// the method name is skipped: the first declaration wins.
///
/// Rendering works on a local copy of the operation; the ancestor's own
/// record is never touched.
pub fn write_super_methods(
    writer: &mut CodeWriter,
    graph: &ModelGraph,
    current_ns: &[String],
    ancestor: ElementId,
    options: &GenOptions,
    implemented: &mut Vec<String>,
    only_abstract: bool,
) {
    for op in graph.operations_of(ancestor) {
        let eligible = if only_abstract {
            op.is_abstract
        } else {
            !implemented.contains(&op.name)
        };
        if !eligible {
            continue;
        }
        let mut synthesized = op.clone();
        if only_abstract {
            synthesized.is_abstract = false;
        }
        synthesized.documentation = "@inheritDoc".to_string();
        if write_method(writer, graph, current_ns, &synthesized, options, false, false) {
            writer.write_line("");
            implemented.push(op.name.clone());
        }
    }
}
