//! Python emitter
//!
//! Fields live in `__init__` rather than in the class body, so every field
//! becomes an assignment there. A class with neither fields nor methods gets
//! a `pass` body.

use std::fmt;

use super::emitter::{push_line, relation_note, Emitter};
use crate::core::{GenerateConfig, Language};
use crate::plugins::class::{ClassPlan, FieldPlan, MethodPlan};

pub struct PythonEmitter {
    config: GenerateConfig,
}

impl PythonEmitter {
    pub fn new(config: GenerateConfig) -> Self {
        Self { config }
    }

    fn assignment(&self, field: &FieldPlan) -> String {
        let note = relation_note(&self.config, Language::Python, field.relation_name());
        let value = match field {
            FieldPlan::Attribute { .. } | FieldPlan::Association { .. } => "None".to_string(),
            FieldPlan::Aggregation { .. } => "[]".to_string(),
            FieldPlan::Composition { target, .. } => format!("{}()", target),
        };
        format!("self.{} = {}{}", field.name(), value, note)
    }

    fn signature(method: &MethodPlan) -> String {
        let params = method.params.trim();
        let return_type = match method.return_type.as_deref() {
            None | Some("void") => "None",
            Some(ty) => ty,
        };
        if params.is_empty() {
            format!("def {}(self) -> {}:", method.name, return_type)
        } else {
            format!("def {}(self, {}) -> {}:", method.name, params, return_type)
        }
    }
}

impl Default for PythonEmitter {
    fn default() -> Self {
        Self::new(GenerateConfig::default())
    }
}

impl Emitter for PythonEmitter {
    fn language(&self) -> Language {
        Language::Python
    }

    fn emit_class(&self, plan: &ClassPlan, out: &mut String) -> fmt::Result {
        let header = match &plan.parent {
            Some(parent) => format!("class {}({}):", plan.name, parent),
            None => format!("class {}:", plan.name),
        };
        push_line(out, &self.config, 0, header)?;

        let has_constructor = !plan.fields.is_empty();
        if !has_constructor && plan.methods.is_empty() {
            return push_line(out, &self.config, 1, "pass");
        }

        if has_constructor {
            push_line(out, &self.config, 1, "def __init__(self):")?;
            if plan.parent.is_some() {
                push_line(out, &self.config, 2, "super().__init__()")?;
            }
            for field in &plan.fields {
                push_line(out, &self.config, 2, self.assignment(field))?;
            }
        }

        for (index, method) in plan.methods.iter().enumerate() {
            if has_constructor || index > 0 {
                push_line(out, &self.config, 0, "")?;
            }
            push_line(out, &self.config, 1, Self::signature(method))?;
            push_line(out, &self.config, 2, "pass")?;
        }
        Ok(())
    }
}
