//! Class diagram model
//!
//! The in-memory diagram (classes, relations, change notifications), the
//! member-line notation, the relation classifier and the emit plan shared by
//! every code emitter.

mod classifier;
mod database;
pub mod notation;
mod plan;
mod script;

pub use classifier::RelationIndex;
pub use database::{
    lines_from_text, AssociationEnds, ClassEntity, DiagramModel, Relation, RelationKind,
};
pub use notation::{parse_attribute, parse_method, Attribute, Method};
pub use plan::{
    build_plans, collection_field_name, member_field_name, ClassPlan, FieldPlan, MethodPlan,
};
pub use script::{ScriptLoader, Statement};
