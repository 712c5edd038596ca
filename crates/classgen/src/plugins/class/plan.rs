//! Emit plan
//!
//! The language-neutral description of one generated class: its parent,
//! its fields (attributes first, then relation-derived fields) and its
//! method stubs. Every emitter renders the same plan, so the mapping from
//! model to members is decided exactly once.

use tracing::{debug, trace};

use super::classifier::RelationIndex;
use super::database::{ClassEntity, DiagramModel};
use crate::core::Visibility;

/// A field of a generated class
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldPlan {
    /// Declared attribute; `ty` is `None` when the line had no type
    Attribute {
        visibility: Visibility,
        name: String,
        ty: Option<String>,
    },
    /// Single reference to the associated class, named after the target role
    Association { name: String, target: String },
    /// Collection of members the class does not own
    Aggregation { name: String, target: String },
    /// Private member owned by the class and created with it
    Composition { name: String, target: String },
}

impl FieldPlan {
    pub fn name(&self) -> &str {
        match self {
            FieldPlan::Attribute { name, .. }
            | FieldPlan::Association { name, .. }
            | FieldPlan::Aggregation { name, .. }
            | FieldPlan::Composition { name, .. } => name,
        }
    }

    /// Declared visibility; relation fields other than compositions have none
    pub fn visibility(&self) -> Option<Visibility> {
        match self {
            FieldPlan::Attribute { visibility, .. } => Some(*visibility),
            FieldPlan::Composition { .. } => Some(Visibility::Private),
            FieldPlan::Association { .. } | FieldPlan::Aggregation { .. } => None,
        }
    }

    /// Relation kind that produced this field, if any
    pub fn relation_name(&self) -> Option<&'static str> {
        match self {
            FieldPlan::Attribute { .. } => None,
            FieldPlan::Association { .. } => Some("Association"),
            FieldPlan::Aggregation { .. } => Some("Aggregation"),
            FieldPlan::Composition { .. } => Some("Composition"),
        }
    }
}

/// A method stub of a generated class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodPlan {
    pub visibility: Visibility,
    pub name: String,
    pub params: String,
    pub return_type: Option<String>,
}

/// Everything an emitter needs to render one class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassPlan {
    pub name: String,
    pub parent: Option<String>,
    pub fields: Vec<FieldPlan>,
    pub methods: Vec<MethodPlan>,
    /// Member lines left out because they could not be parsed
    pub skipped: usize,
}

impl ClassPlan {
    pub fn compositions(&self) -> impl Iterator<Item = &FieldPlan> {
        self.fields
            .iter()
            .filter(|f| matches!(f, FieldPlan::Composition { .. }))
    }

    pub fn has_aggregation(&self) -> bool {
        self.fields
            .iter()
            .any(|f| matches!(f, FieldPlan::Aggregation { .. }))
    }
}

/// Field name used for an aggregation of `target`
pub fn collection_field_name(target: &str) -> String {
    format!("{}s", target.to_lowercase())
}

/// Field name used for a composition of `target`
pub fn member_field_name(target: &str) -> String {
    target.to_lowercase()
}

/// Build one plan per class, in model insertion order
pub fn build_plans(model: &DiagramModel) -> Vec<ClassPlan> {
    let index = RelationIndex::build(model.relations());
    model
        .classes()
        .iter()
        .map(|class| build_class_plan(class, &index))
        .collect()
}

fn build_class_plan(class: &ClassEntity, index: &RelationIndex<'_>) -> ClassPlan {
    let name = class.name();
    let mut skipped = 0;
    let mut fields = Vec::new();

    for attribute in class.attributes() {
        match attribute {
            Ok(attr) => fields.push(FieldPlan::Attribute {
                visibility: attr.visibility,
                name: attr.name,
                ty: attr.ty,
            }),
            Err(error) if error.is_blank() => trace!(class = name, "Blank attribute line"),
            Err(error) => {
                debug!(class = name, %error, "Dropping attribute line");
                skipped += 1;
            }
        }
    }

    for (relation, ends) in index.associations_from(name) {
        let field = if ends.target_role.trim().is_empty() {
            member_field_name(relation.target())
        } else {
            ends.target_role.trim().to_string()
        };
        fields.push(FieldPlan::Association {
            name: field,
            target: relation.target().to_string(),
        });
    }
    for relation in index.aggregations_from(name) {
        fields.push(FieldPlan::Aggregation {
            name: collection_field_name(relation.target()),
            target: relation.target().to_string(),
        });
    }
    for relation in index.compositions_from(name) {
        fields.push(FieldPlan::Composition {
            name: member_field_name(relation.target()),
            target: relation.target().to_string(),
        });
    }

    let mut methods = Vec::new();
    for method in class.methods() {
        match method {
            Ok(m) => methods.push(MethodPlan {
                visibility: m.visibility,
                name: m.name,
                params: m.params,
                return_type: m.return_type,
            }),
            Err(error) if error.is_blank() => trace!(class = name, "Blank method line"),
            Err(error) => {
                debug!(class = name, %error, "Dropping method line");
                skipped += 1;
            }
        }
    }

    ClassPlan {
        name: name.to_string(),
        parent: index.parent_of(name).map(str::to_string),
        fields,
        methods,
        skipped,
    }
}
