//! PHP emitter

use std::fmt;

use super::emitter::{push_line, relation_note, Emitter};
use crate::core::{GenerateConfig, Language};
use crate::plugins::class::{ClassPlan, FieldPlan};

pub struct PhpEmitter {
    config: GenerateConfig,
}

impl PhpEmitter {
    pub fn new(config: GenerateConfig) -> Self {
        Self { config }
    }

    fn field_line(&self, field: &FieldPlan) -> Option<String> {
        let note = relation_note(&self.config, Language::Php, field.relation_name());
        let line = match field {
            FieldPlan::Attribute {
                visibility,
                name,
                ty: Some(_),
            } => format!("{} ${};", visibility.keyword(), name),
            FieldPlan::Attribute { ty: None, .. } => return None,
            FieldPlan::Association { name, .. } => format!("public ${};", name),
            FieldPlan::Aggregation { name, .. } => format!("public array ${} = [];", name),
            FieldPlan::Composition { name, target } => format!("private {} ${};", target, name),
        };
        Some(line + &note)
    }

    /// Compositions are created in the constructor since PHP property
    /// defaults must be constant expressions
    fn emit_constructor(&self, plan: &ClassPlan, out: &mut String) -> fmt::Result {
        let mut owned = plan.compositions().peekable();
        if owned.peek().is_none() {
            return Ok(());
        }

        push_line(out, &self.config, 1, "public function __construct() {")?;
        if plan.parent.is_some() {
            push_line(out, &self.config, 2, "parent::__construct();")?;
        }
        for field in owned {
            if let FieldPlan::Composition { name, target } = field {
                push_line(
                    out,
                    &self.config,
                    2,
                    format_args!("$this->{} = new {}();", name, target),
                )?;
            }
        }
        push_line(out, &self.config, 1, "}")
    }
}

impl Default for PhpEmitter {
    fn default() -> Self {
        Self::new(GenerateConfig::default())
    }
}

impl Emitter for PhpEmitter {
    fn language(&self) -> Language {
        Language::Php
    }

    fn preamble(&self, _plans: &[ClassPlan]) -> Option<String> {
        Some("<?php".to_string())
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

        self.emit_constructor(plan, out)?;

        for method in &plan.methods {
            let return_type = method.return_type.as_deref().unwrap_or("void");
            push_line(
                out,
                &self.config,
                1,
                format_args!(
                    "{} function {}({}): {} {{}}",
                    method.visibility.keyword(),
                    method.name,
                    method.params,
                    return_type
                ),
            )?;
        }

        push_line(out, &self.config, 0, "}")
    }
}
