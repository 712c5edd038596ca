//! Emitter trait for source generation
//!
//! An emitter renders class plans into the source text of one target
//! language. The plan already decides which members a class gets, so an
//! emitter is only concerned with syntax.

use anyhow::Result;
use std::fmt::{self, Write};
use tracing::{debug, span, Level};

use crate::core::{GenerateConfig, Language};
use crate::plugins::class::{build_plans, ClassPlan, DiagramModel};

/// Trait for language emitters
///
/// Implementors provide the per-class rendering; [`Emitter::emit`] handles
/// plan construction, ordering and joining.
pub trait Emitter: Send + Sync {
    /// Target language of this emitter
    fn language(&self) -> Language;

    /// Text placed before the first class, when the language needs one
    fn preamble(&self, _plans: &[ClassPlan]) -> Option<String> {
        None
    }

    /// Render one class block, without a trailing newline
    fn emit_class(&self, plan: &ClassPlan, out: &mut String) -> fmt::Result;

    /// Render the whole model
    ///
    /// Class blocks appear in model insertion order separated by one blank
    /// line, and the text ends with a newline. An empty model yields an empty
    /// string.
    fn emit(&self, model: &DiagramModel) -> Result<String> {
        let emit_span = span!(
            Level::DEBUG,
            "emit",
            language = %self.language(),
            classes = model.class_count()
        );
        let _enter = emit_span.enter();

        let plans = build_plans(model);
        if plans.is_empty() {
            return Ok(String::new());
        }

        let mut blocks = Vec::with_capacity(plans.len() + 1);
        if let Some(preamble) = self.preamble(&plans) {
            blocks.push(preamble);
        }
        for plan in &plans {
            let mut block = String::new();
            self.emit_class(plan, &mut block)?;
            debug!(
                class = %plan.name,
                bytes = block.len(),
                skipped = plan.skipped,
                "Emitted class"
            );
            blocks.push(block);
        }

        let mut output = blocks.join("\n\n");
        output.push('\n');
        Ok(output)
    }
}

/// Append `text` on its own line at the given nesting level
pub fn push_line(
    out: &mut String,
    config: &GenerateConfig,
    level: usize,
    text: impl fmt::Display,
) -> fmt::Result {
    if !out.is_empty() {
        out.push('\n');
    }
    write!(out, "{}{}", config.indent(level), text)
}

/// Trailing relation comment, empty when annotations are off
pub fn relation_note(config: &GenerateConfig, language: Language, kind: Option<&str>) -> String {
    match kind {
        // Python style puts two spaces before an inline comment
        Some(kind) if config.annotate_relations => match language {
            Language::Python => format!("  {} {}", language.comment_prefix(), kind),
            _ => format!(" {} {}", language.comment_prefix(), kind),
        },
        _ => String::new(),
    }
}
