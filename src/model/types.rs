//! Core model entities: elements, classifier members and relationship edges.

use serde::Deserialize;

/// Index of an [`Element`] inside its [`ModelGraph`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(pub(crate) usize);

impl ElementId {
    /// Arena index of this element.
    pub fn index(self) -> usize {
        self.0
    }
}

/// UML visibility of an element or member.
///
/// `Package` visibility intentionally renders as no keyword at all in the
/// generated source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Package,
    #[default]
    Public,
    Protected,
    Private,
}

/// Reference to the type of an attribute, parameter or association end.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TypeRef {
    /// No type declared; resolves to `void`.
    #[default]
    None,
    /// Free-form type name, used verbatim (e.g. `int`, `string`).
    Named(String),
    /// Reference to a classifier in the model graph, qualified through its
    /// package namespace when rendered.
    Node(ElementId),
}

/// A classifier attribute, rendered as a member variable or constant.
#[derive(Debug, Clone, Default)]
pub struct Attribute {
    pub name: String,
    pub ty: TypeRef,
    pub multiplicity: String,
    pub default_value: String,
    pub documentation: String,
    pub visibility: Visibility,
    pub is_static: bool,
    pub is_abstract: bool,
    pub is_leaf: bool,
    pub is_final_specification: bool,
}

/// A single operation parameter. The parameter flagged `is_return` carries
/// the operation's return type; all others are formal parameters.
#[derive(Debug, Clone, Default)]
pub struct UmlParameter {
    pub name: String,
    pub ty: TypeRef,
    pub multiplicity: String,
    pub default_value: String,
    pub documentation: String,
    pub is_return: bool,
}

/// A classifier operation, rendered as a method.
#[derive(Debug, Clone, Default)]
pub struct Operation {
    pub name: String,
    pub parameters: Vec<UmlParameter>,
    /// Literal body text, emitted verbatim when non-empty.
    pub specification: String,
    pub documentation: String,
    pub visibility: Visibility,
    pub is_static: bool,
    pub is_abstract: bool,
    pub is_leaf: bool,
    pub is_final_specification: bool,
}

impl Operation {
    /// Formal (non-return) parameters, in declaration order.
    pub fn non_return_parameters(&self) -> impl Iterator<Item = &UmlParameter> {
        self.parameters.iter().filter(|p| !p.is_return)
    }

    /// The designated return parameter, if any.
    pub fn return_parameter(&self) -> Option<&UmlParameter> {
        self.parameters.iter().find(|p| p.is_return)
    }
}

/// Kind-specific payload of a model element.
///
/// Dispatch on element kind is a closed match over this enum; there is no
/// runtime instance checking anywhere else.
#[derive(Debug, Clone)]
pub enum ElementKind {
    Package,
    Class {
        attributes: Vec<Attribute>,
        operations: Vec<Operation>,
    },
    Interface {
        attributes: Vec<Attribute>,
        operations: Vec<Operation>,
    },
    Enumeration {
        literals: Vec<String>,
    },
    AnnotationType {
        attributes: Vec<Attribute>,
        operations: Vec<Operation>,
    },
}

/// One node of the model: a package or a classifier.
#[derive(Debug, Clone)]
pub struct Element {
    pub name: String,
    pub kind: ElementKind,
    pub visibility: Visibility,
    pub is_static: bool,
    pub is_abstract: bool,
    pub is_leaf: bool,
    pub is_final_specification: bool,
    pub documentation: String,
    /// Free-form stereotype text, informational once kinds are resolved.
    pub stereotype: String,
    /// Owning parent, `None` only for the root model container.
    pub parent: Option<ElementId>,
    /// Owned children, in model order.
    pub owned: Vec<ElementId>,
}

/// Generalization edge: `source` extends `target`.
#[derive(Debug, Clone, Copy)]
pub struct Generalization {
    pub source: ElementId,
    pub target: ElementId,
}

/// Interface realization edge: `source` implements `target`.
#[derive(Debug, Clone, Copy)]
pub struct InterfaceRealization {
    pub source: ElementId,
    pub target: ElementId,
}

/// One endpoint of an association.
#[derive(Debug, Clone)]
pub struct AssociationEnd {
    /// Classifier this end touches.
    pub reference: ElementId,
    /// Whether the opposite classifier can reach this end as a field.
    pub navigable: bool,
    pub name: String,
    pub multiplicity: String,
    pub default_value: String,
    pub documentation: String,
    pub visibility: Visibility,
    pub is_static: bool,
    pub is_abstract: bool,
    pub is_leaf: bool,
    pub is_final_specification: bool,
}

/// A binary association between two classifiers.
#[derive(Debug, Clone)]
pub struct Association {
    pub end1: AssociationEnd,
    pub end2: AssociationEnd,
}

/// The complete, immutable model supplied to a generation run.
#[derive(Debug, Clone)]
pub struct ModelGraph {
    pub(crate) elements: Vec<Element>,
    pub(crate) generalizations: Vec<Generalization>,
    pub(crate) realizations: Vec<InterfaceRealization>,
    pub(crate) associations: Vec<Association>,
    pub(crate) root: ElementId,
}

impl ModelGraph {
    /// The root model container element.
    pub fn root(&self) -> ElementId {
        self.root
    }

    /// Look up an element by id.
    pub fn element(&self, id: ElementId) -> &Element {
        &self.elements[id.0]
    }

    /// Find a classifier or package by name anywhere in the graph.
    pub fn find_by_name(&self, name: &str) -> Option<ElementId> {
        self.elements
            .iter()
            .position(|e| e.name == name)
            .map(ElementId)
    }

    /// Targets of generalization edges whose source is `id`, in edge order.
    pub fn super_classes(&self, id: ElementId) -> Vec<ElementId> {
        self.generalizations
            .iter()
            .filter(|g| g.source == id)
            .map(|g| g.target)
            .collect()
    }

    /// Targets of realization edges whose source is `id`, in edge order.
    pub fn super_interfaces(&self, id: ElementId) -> Vec<ElementId> {
        self.realizations
            .iter()
            .filter(|r| r.source == id)
            .map(|r| r.target)
            .collect()
    }

    /// All associations with either end referencing `id`, in table order.
    pub fn associations_of(&self, id: ElementId) -> Vec<&Association> {
        self.associations
            .iter()
            .filter(|a| a.end1.reference == id || a.end2.reference == id)
            .collect()
    }

    /// Operations declared on a classifier; empty for packages and
    /// enumerations.
    pub fn operations_of(&self, id: ElementId) -> &[Operation] {
        match &self.element(id).kind {
            ElementKind::Class { operations, .. }
            | ElementKind::Interface { operations, .. }
            | ElementKind::AnnotationType { operations, .. } => operations,
            ElementKind::Package | ElementKind::Enumeration { .. } => &[],
        }
    }
}

/// Modifier flags shared by elements and their members.
pub trait Modifiers {
    fn visibility(&self) -> Visibility;
    fn is_static(&self) -> bool;
    fn is_abstract(&self) -> bool;
    fn is_leaf(&self) -> bool;
    fn is_final_specification(&self) -> bool;
}

macro_rules! impl_modifiers {
    ($($ty:ty),+) => {
        $(impl Modifiers for $ty {
            fn visibility(&self) -> Visibility {
                self.visibility
            }
            fn is_static(&self) -> bool {
                self.is_static
            }
            fn is_abstract(&self) -> bool {
                self.is_abstract
            }
            fn is_leaf(&self) -> bool {
                self.is_leaf
            }
            fn is_final_specification(&self) -> bool {
                self.is_final_specification
            }
        })+
    };
}

impl_modifiers!(Element, Attribute, Operation, AssociationEnd);

/// A typed, named member rendered as a variable or constant: attributes and
/// navigable association ends both qualify.
pub trait Member: Modifiers {
    fn name(&self) -> &str;
    fn type_ref(&self) -> TypeRef;
    fn multiplicity(&self) -> &str;
    fn default_value(&self) -> &str;
    fn documentation(&self) -> &str;
}

impl Member for Attribute {
    fn name(&self) -> &str {
        &self.name
    }
    fn type_ref(&self) -> TypeRef {
        self.ty.clone()
    }
    fn multiplicity(&self) -> &str {
        &self.multiplicity
    }
    fn default_value(&self) -> &str {
        &self.default_value
    }
    fn documentation(&self) -> &str {
        &self.documentation
    }
}

impl Member for AssociationEnd {
    fn name(&self) -> &str {
        &self.name
    }
    // Association ends always point at a classifier.
    fn type_ref(&self) -> TypeRef {
        TypeRef::Node(self.reference)
    }
    fn multiplicity(&self) -> &str {
        &self.multiplicity
    }
    fn default_value(&self) -> &str {
        &self.default_value
    }
    fn documentation(&self) -> &str {
        &self.documentation
    }
}
