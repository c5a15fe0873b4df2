//! Namespace and type-reference resolution.
//!
//! Classifiers live in a nested package hierarchy; their namespace is the
//! ordered sequence of ancestor package names, outermost first, excluding
//! the root model container. Type references render either fully qualified
//! from the root (leading separator) or relative to the referencing unit's
//! own namespace when that namespace is an ancestor of the target's.

use crate::model::{ElementId, ElementKind, ModelGraph, TypeRef};

/// PHP namespace separator.
pub const NAMESPACE_SEPARATOR: &str = "\\";

/// Ancestor package names of `id`, outermost to innermost.
///
/// The walk stops at the first ancestor that is not a package or that has
/// no parent of its own; the parentless ancestor is the root model
/// container and contributes no segment.
pub fn namespaces_of(graph: &ModelGraph, id: ElementId) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = graph.element(id).parent;
    while let Some(parent_id) = current {
        let parent = graph.element(parent_id);
        if !matches!(parent.kind, ElementKind::Package) || parent.parent.is_none() {
            break;
        }
        segments.push(parent.name.clone());
        current = parent.parent;
    }
    segments.reverse();
    segments
}

/// Whether a multiplicity string marks a collection.
pub fn is_collection(multiplicity: &str) -> bool {
    matches!(multiplicity.trim(), "0..*" | "1..*" | "*")
}

/// `void` is the only type that must never be hinted.
pub fn is_allowed_type_hint(ty: &str) -> bool {
    ty != "void"
}

/// Fully qualified type expression for doc comments.
///
/// Node references render absolute (`\Ns\Sub\Name`), free-form names render
/// verbatim, anything unresolved renders as `void`. Collection
/// multiplicities append `[]` to hintable types.
pub fn doc_type(graph: &ModelGraph, ty: &TypeRef, multiplicity: &str) -> String {
    let mut rendered = match ty {
        TypeRef::Node(id) => {
            let target = graph.element(*id);
            if target.name.is_empty() {
                "void".to_string()
            } else {
                let ns = namespaces_of(graph, *id);
                let mut qualified = String::new();
                if !ns.is_empty() {
                    qualified.push_str(NAMESPACE_SEPARATOR);
                    qualified.push_str(&ns.join(NAMESPACE_SEPARATOR));
                }
                qualified.push_str(NAMESPACE_SEPARATOR);
                qualified.push_str(&target.name);
                qualified
            }
        }
        TypeRef::Named(name) if !name.is_empty() => name.clone(),
        TypeRef::Named(_) | TypeRef::None => "void".to_string(),
    };
    if !multiplicity.is_empty() && is_collection(multiplicity) && is_allowed_type_hint(&rendered) {
        rendered.push_str("[]");
    }
    rendered
}

/// Concrete PHP type for signatures and default returns: a collection
/// degrades to `array`, everything else follows [`doc_type`].
pub fn php_type(graph: &ModelGraph, ty: &TypeRef, multiplicity: &str) -> String {
    let rendered = doc_type(graph, ty, multiplicity);
    if !multiplicity.is_empty() && rendered.contains("[]") {
        "array".to_string()
    } else {
        rendered
    }
}

/// Type hint for a reference seen from a unit whose namespace is
/// `current_ns`: relative when `current_ns` is an element-wise prefix of the
/// target's namespace, absolute (leading separator) otherwise.
pub fn type_hint(graph: &ModelGraph, current_ns: &[String], ty: &TypeRef) -> String {
    match ty {
        TypeRef::Node(id) => {
            let target = graph.element(*id);
            if target.name.is_empty() {
                return "void".to_string();
            }
            let target_ns = namespaces_of(graph, *id);
            if seq_eq(current_ns, &intersect(current_ns, &target_ns)) {
                let rest = seq_diff(&target_ns, current_ns);
                if rest.is_empty() {
                    target.name.clone()
                } else {
                    format!(
                        "{}{NAMESPACE_SEPARATOR}{}",
                        rest.join(NAMESPACE_SEPARATOR),
                        target.name
                    )
                }
            } else if target_ns.is_empty() {
                format!("{NAMESPACE_SEPARATOR}{}", target.name)
            } else {
                format!(
                    "{NAMESPACE_SEPARATOR}{}{NAMESPACE_SEPARATOR}{}",
                    target_ns.join(NAMESPACE_SEPARATOR),
                    target.name
                )
            }
        }
        TypeRef::Named(name) if !name.is_empty() => name.clone(),
        TypeRef::Named(_) | TypeRef::None => "void".to_string(),
    }
}

/// Element-wise intersection: `b[i]` for every index where `a[i] == b[i]`,
/// over `a`'s length.
pub fn intersect(a: &[String], b: &[String]) -> Vec<String> {
    a.iter()
        .enumerate()
        .filter(|&(i, seg)| b.get(i) == Some(seg))
        .map(|(_, seg)| seg.clone())
        .collect()
}

/// Element-wise equality of two segment sequences.
pub fn seq_eq(a: &[String], b: &[String]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x == y)
}

/// Segments of `a` that differ from `b` at the same index.
pub fn seq_diff(a: &[String], b: &[String]) -> Vec<String> {
    a.iter()
        .enumerate()
        .filter(|&(i, seg)| b.get(i) != Some(seg))
        .map(|(_, seg)| seg.clone())
        .collect()
}
