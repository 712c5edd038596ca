//! Java emitter

use std::fmt;

use super::emitter::{push_line, relation_note, Emitter};
use crate::core::{GenerateConfig, Language};
use crate::plugins::class::{ClassPlan, FieldPlan};

pub struct JavaEmitter {
    config: GenerateConfig,
}

impl JavaEmitter {
    pub fn new(config: GenerateConfig) -> Self {
        Self { config }
    }

    fn field_line(&self, field: &FieldPlan) -> Option<String> {
        let note = relation_note(&self.config, Language::Java, field.relation_name());
        let line = match field {
            FieldPlan::Attribute {
                visibility,
                name,
                ty: Some(ty),
            } => format!("{} {} {};", visibility.keyword(), ty, name),
            // Java has no untyped field
            FieldPlan::Attribute { ty: None, .. } => return None,
            FieldPlan::Association { name, target } => format!("{} {};", target, name),
            FieldPlan::Aggregation { name, target } => format!("List<{}> {};", target, name),
            FieldPlan::Composition { name, target } => {
                format!("private {} {} = new {}();", target, name, target)
            }
        };
        Some(line + &note)
    }
}

impl Default for JavaEmitter {
    fn default() -> Self {
        Self::new(GenerateConfig::default())
    }
}

impl Emitter for JavaEmitter {
    fn language(&self) -> Language {
        Language::Java
    }

    fn preamble(&self, plans: &[ClassPlan]) -> Option<String> {
        plans
            .iter()
            .any(ClassPlan::has_aggregation)
            .then(|| "import java.util.List;".to_string())
    }

    fn emit_class(&self, plan: &ClassPlan, out: &mut String) -> fmt::Result {
        let header = match &plan.parent {
            Some(parent) => format!("class {} extends {} {{", plan.name, parent),
            None => format!("class {} {{", plan.name),
        };
        push_line(out, &self.config, 0, header)?;

        for line in plan.fields.iter().filter_map(|f| self.field_line(f)) {
            push_line(out, &self.config, 1, line)?;
        }

        for method in &plan.methods {
            let return_type = method.return_type.as_deref().unwrap_or("void");
            push_line(
                out,
                &self.config,
                1,
                format_args!(
                    "{} {} {}({}) {{}}",
                    method.visibility.keyword(),
                    return_type,
                    method.name,
                    method.params
                ),
            )?;
        }

        push_line(out, &self.config, 0, "}")
    }
}
