//! JSON model document loading.
//!
//! A model document is a nested element tree plus flat edge tables that
//! reference elements by string id:
//!
//! ```json
//! {
//!   "root": {
//!     "id": "m1", "kind": "package", "name": "Model",
//!     "children": [
//!       { "id": "c1", "kind": "class", "name": "Foo",
//!         "attributes": [ { "name": "size", "type": "int" } ],
//!         "operations": [
//!           { "name": "run",
//!             "parameters": [ { "name": "r", "type": "bool", "direction": "return" } ] }
//!         ] }
//!     ]
//!   },
//!   "generalizations": [ { "source": "c1", "target": "c2" } ],
//!   "interfaceRealizations": [ { "source": "c1", "target": "i1" } ],
//!   "associations": [
//!     { "end1": { "reference": "c1" },
//!       "end2": { "reference": "c2", "navigable": true, "name": "other" } }
//!   ]
//! }
//! ```
//!
//! Element ids only need to be present on elements that edges or type
//! references point at. Typed references use `{ "ref": "id" }` in place of
//! a type name string.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{bail, Context};
use serde::Deserialize;

use super::types::{
    Association, AssociationEnd, Attribute, Element, ElementId, ElementKind, Generalization,
    InterfaceRealization, ModelGraph, Operation, TypeRef, UmlParameter, Visibility,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDocument {
    root: RawElement,
    #[serde(default)]
    generalizations: Vec<RawEdge>,
    #[serde(default)]
    interface_realizations: Vec<RawEdge>,
    #[serde(default)]
    associations: Vec<RawAssociation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawElement {
    #[serde(default)]
    id: Option<String>,
    kind: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    visibility: Visibility,
    #[serde(default)]
    is_static: bool,
    #[serde(default)]
    is_abstract: bool,
    #[serde(default)]
    is_leaf: bool,
    #[serde(default)]
    is_final_specification: bool,
    #[serde(default)]
    documentation: String,
    #[serde(default)]
    stereotype: String,
    #[serde(default)]
    attributes: Vec<RawAttribute>,
    #[serde(default)]
    operations: Vec<RawOperation>,
    #[serde(default)]
    literals: Vec<String>,
    #[serde(default)]
    children: Vec<RawElement>,
}

/// Either a free-form type name or a reference to an element id.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawType {
    Name(String),
    Reference {
        #[serde(rename = "ref")]
        target: String,
    },
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAttribute {
    #[serde(default)]
    name: String,
    #[serde(default, rename = "type")]
    ty: Option<RawType>,
    #[serde(default)]
    multiplicity: String,
    #[serde(default)]
    default_value: String,
    #[serde(default)]
    documentation: String,
    #[serde(default)]
    visibility: Visibility,
    #[serde(default)]
    is_static: bool,
    #[serde(default)]
    is_abstract: bool,
    #[serde(default)]
    is_leaf: bool,
    #[serde(default)]
    is_final_specification: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawOperation {
    #[serde(default)]
    name: String,
    #[serde(default)]
    parameters: Vec<RawParameter>,
    #[serde(default)]
    specification: String,
    #[serde(default)]
    documentation: String,
    #[serde(default)]
    visibility: Visibility,
    #[serde(default)]
    is_static: bool,
    #[serde(default)]
    is_abstract: bool,
    #[serde(default)]
    is_leaf: bool,
    #[serde(default)]
    is_final_specification: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawParameter {
    #[serde(default)]
    name: String,
    #[serde(default, rename = "type")]
    ty: Option<RawType>,
    #[serde(default)]
    multiplicity: String,
    #[serde(default)]
    default_value: String,
    #[serde(default)]
    documentation: String,
    /// `"return"` marks the return parameter; anything else is a formal one.
    #[serde(default)]
    direction: String,
}

#[derive(Debug, Deserialize)]
struct RawEdge {
    source: String,
    target: String,
}

#[derive(Debug, Deserialize)]
struct RawAssociation {
    end1: RawEnd,
    end2: RawEnd,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEnd {
    reference: String,
    #[serde(default)]
    navigable: bool,
    #[serde(default)]
    name: String,
    #[serde(default)]
    multiplicity: String,
    #[serde(default)]
    default_value: String,
    #[serde(default)]
    documentation: String,
    #[serde(default)]
    visibility: Visibility,
    #[serde(default)]
    is_static: bool,
    #[serde(default)]
    is_abstract: bool,
    #[serde(default)]
    is_leaf: bool,
    #[serde(default)]
    is_final_specification: bool,
}

/// Load a model document from a JSON file.
pub fn load_model(path: &Path) -> anyhow::Result<ModelGraph> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read model file {path:?}"))?;
    load_model_str(&content)
}

/// Load a model document from JSON text.
pub fn load_model_str(content: &str) -> anyhow::Result<ModelGraph> {
    let doc: RawDocument = serde_json::from_str(content).context("invalid model document")?;
    build_graph(doc)
}

/// Load a model document from an already parsed JSON value.
pub fn load_model_value(value: serde_json::Value) -> anyhow::Result<ModelGraph> {
    let doc: RawDocument = serde_json::from_value(value).context("invalid model document")?;
    build_graph(doc)
}

/// Pre-order index of the raw tree: ids assigned, string ids mapped,
/// parent/children wiring recorded before any member conversion happens.
struct TreeIndex<'a> {
    nodes: Vec<&'a RawElement>,
    parents: Vec<Option<ElementId>>,
    children: Vec<Vec<ElementId>>,
    by_str_id: HashMap<&'a str, ElementId>,
}

impl<'a> TreeIndex<'a> {
    fn collect(&mut self, node: &'a RawElement, parent: Option<ElementId>) -> anyhow::Result<ElementId> {
        let id = ElementId(self.nodes.len());
        self.nodes.push(node);
        self.parents.push(parent);
        self.children.push(Vec::new());
        if let Some(str_id) = node.id.as_deref() {
            if self.by_str_id.insert(str_id, id).is_some() {
                bail!("duplicate element id `{str_id}` in model document");
            }
        }
        for child in &node.children {
            let child_id = self.collect(child, Some(id))?;
            self.children[id.index()].push(child_id);
        }
        Ok(id)
    }

    fn resolve(&self, str_id: &str, what: &str) -> anyhow::Result<ElementId> {
        self.by_str_id
            .get(str_id)
            .copied()
            .with_context(|| format!("{what} references unknown element id `{str_id}`"))
    }

    fn resolve_type(&self, raw: Option<&RawType>) -> anyhow::Result<TypeRef> {
        Ok(match raw {
            None => TypeRef::None,
            Some(RawType::Name(name)) => TypeRef::Named(name.clone()),
            Some(RawType::Reference { target }) => {
                TypeRef::Node(self.resolve(target, "type reference")?)
            }
        })
    }
}

fn build_graph(doc: RawDocument) -> anyhow::Result<ModelGraph> {
    let mut index = TreeIndex {
        nodes: Vec::new(),
        parents: Vec::new(),
        children: Vec::new(),
        by_str_id: HashMap::new(),
    };
    let root = index.collect(&doc.root, None)?;

    let mut elements = Vec::with_capacity(index.nodes.len());
    for (i, raw) in index.nodes.iter().enumerate() {
        elements.push(convert_element(&index, raw, index.parents[i], index.children[i].clone())?);
    }

    let generalizations = doc
        .generalizations
        .iter()
        .map(|e| {
            Ok(Generalization {
                source: index.resolve(&e.source, "generalization")?,
                target: index.resolve(&e.target, "generalization")?,
            })
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let realizations = doc
        .interface_realizations
        .iter()
        .map(|e| {
            Ok(InterfaceRealization {
                source: index.resolve(&e.source, "interface realization")?,
                target: index.resolve(&e.target, "interface realization")?,
            })
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let associations = doc
        .associations
        .iter()
        .map(|a| {
            Ok(Association {
                end1: convert_end(&index, &a.end1)?,
                end2: convert_end(&index, &a.end2)?,
            })
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(ModelGraph {
        elements,
        generalizations,
        realizations,
        associations,
        root,
    })
}

fn convert_element(
    index: &TreeIndex<'_>,
    raw: &RawElement,
    parent: Option<ElementId>,
    owned: Vec<ElementId>,
) -> anyhow::Result<Element> {
    let kind = match raw.kind.as_str() {
        "package" => ElementKind::Package,
        // Modeling tools often export annotation types as classes
        // stereotyped "annotationType"; resolve that into its own kind.
        "class" if raw.stereotype == "annotationType" => ElementKind::AnnotationType {
            attributes: convert_attributes(index, raw)?,
            operations: convert_operations(index, raw)?,
        },
        "class" => ElementKind::Class {
            attributes: convert_attributes(index, raw)?,
            operations: convert_operations(index, raw)?,
        },
        "interface" => ElementKind::Interface {
            attributes: convert_attributes(index, raw)?,
            operations: convert_operations(index, raw)?,
        },
        "enumeration" => ElementKind::Enumeration {
            literals: raw.literals.clone(),
        },
        "annotationType" => ElementKind::AnnotationType {
            attributes: convert_attributes(index, raw)?,
            operations: convert_operations(index, raw)?,
        },
        other => bail!("unknown element kind `{other}` on element `{}`", raw.name),
    };
    Ok(Element {
        name: raw.name.clone(),
        kind,
        visibility: raw.visibility,
        is_static: raw.is_static,
        is_abstract: raw.is_abstract,
        is_leaf: raw.is_leaf,
        is_final_specification: raw.is_final_specification,
        documentation: raw.documentation.clone(),
        stereotype: raw.stereotype.clone(),
        parent,
        owned,
    })
}

fn convert_attributes(index: &TreeIndex<'_>, raw: &RawElement) -> anyhow::Result<Vec<Attribute>> {
    raw.attributes
        .iter()
        .map(|a| {
            Ok(Attribute {
                name: a.name.clone(),
                ty: index.resolve_type(a.ty.as_ref())?,
                multiplicity: a.multiplicity.clone(),
                default_value: a.default_value.clone(),
                documentation: a.documentation.clone(),
                visibility: a.visibility,
                is_static: a.is_static,
                is_abstract: a.is_abstract,
                is_leaf: a.is_leaf,
                is_final_specification: a.is_final_specification,
            })
        })
        .collect()
}

fn convert_operations(index: &TreeIndex<'_>, raw: &RawElement) -> anyhow::Result<Vec<Operation>> {
    raw.operations
        .iter()
        .map(|o| {
            let parameters = o
                .parameters
                .iter()
                .map(|p| {
                    Ok(UmlParameter {
                        name: p.name.clone(),
                        ty: index.resolve_type(p.ty.as_ref())?,
                        multiplicity: p.multiplicity.clone(),
                        default_value: p.default_value.clone(),
                        documentation: p.documentation.clone(),
                        is_return: p.direction == "return",
                    })
                })
                .collect::<anyhow::Result<Vec<_>>>()?;
            Ok(Operation {
                name: o.name.clone(),
                parameters,
                specification: o.specification.clone(),
                documentation: o.documentation.clone(),
                visibility: o.visibility,
                is_static: o.is_static,
                is_abstract: o.is_abstract,
                is_leaf: o.is_leaf,
                is_final_specification: o.is_final_specification,
            })
        })
        .collect()
}

fn convert_end(index: &TreeIndex<'_>, raw: &RawEnd) -> anyhow::Result<AssociationEnd> {
    Ok(AssociationEnd {
        reference: index.resolve(&raw.reference, "association end")?,
        navigable: raw.navigable,
        name: raw.name.clone(),
        multiplicity: raw.multiplicity.clone(),
        default_value: raw.default_value.clone(),
        documentation: raw.documentation.clone(),
        visibility: raw.visibility,
        is_static: raw.is_static,
        is_abstract: raw.is_abstract,
        is_leaf: raw.is_leaf,
        is_final_specification: raw.is_final_specification,
    })
}
