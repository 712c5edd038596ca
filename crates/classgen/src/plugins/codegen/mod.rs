//! Source skeleton generation
//!
//! The [`Generator`] owns one emitter per target language and runs the
//! model through the chosen one.

mod emitter;
mod java;
mod php;
mod python;

pub use emitter::{push_line, relation_note, Emitter};
pub use java::JavaEmitter;
pub use php::PhpEmitter;
pub use python::PythonEmitter;

use anyhow::{anyhow, Result};
use tracing::{debug, info, span, Level};

use crate::core::{GenerateConfig, Language};
use crate::plugins::class::DiagramModel;

/// Runs a model through the registered emitters
pub struct Generator {
    emitters: Vec<Box<dyn Emitter>>,
}

impl Generator {
    /// Create a generator with every supported language registered
    pub fn new(config: GenerateConfig) -> Self {
        let emitters: Vec<Box<dyn Emitter>> = vec![
            Box::new(JavaEmitter::new(config)),
            Box::new(PhpEmitter::new(config)),
            Box::new(PythonEmitter::new(config)),
        ];
        Self { emitters }
    }

    /// Registered languages in generation order
    pub fn languages(&self) -> Vec<Language> {
        self.emitters.iter().map(|e| e.language()).collect()
    }

    pub fn emitter(&self, language: Language) -> Option<&dyn Emitter> {
        self.emitters
            .iter()
            .find(|e| e.language() == language)
            .map(|e| e.as_ref())
    }

    /// Generate the skeleton of every class in one language
    pub fn generate(&self, model: &DiagramModel, language: Language) -> Result<String> {
        let generate_span = span!(
            Level::INFO,
            "generate",
            language = %language,
            classes = model.class_count(),
            relations = model.relation_count()
        );
        let _enter = generate_span.enter();

        let emitter = self
            .emitter(language)
            .ok_or_else(|| anyhow!("No emitter registered for {}", language))?;
        let output = emitter.emit(model)?;

        info!(output_len = output.len(), "Generation completed");
        Ok(output)
    }

    /// Generate the skeleton in every registered language
    pub fn generate_all(&self, model: &DiagramModel) -> Result<Vec<(Language, String)>> {
        self.languages()
            .into_iter()
            .map(|language| {
                let output = self.generate(model, language)?;
                debug!(%language, "Generated");
                Ok((language, output))
            })
            .collect()
    }
}

impl Default for Generator {
    fn default() -> Self {
        Self::new(GenerateConfig::default())
    }
}
