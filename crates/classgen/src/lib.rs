//! Classgen - Generate class skeletons from UML class diagrams
//!
//! A library that keeps an in-memory UML class diagram (classes with member
//! lines, relations between them) and turns it into Java, PHP or Python
//! class skeletons.
//!
//! # Quick Start
//!
//! ```rust
//! use classgen::{generate_script, Language};
//!
//! let script = "class Animal {\n  # name:string\n  + speak():void\n}\nclass Dog\nDog --|> Animal";
//! let java = generate_script(script, Language::Java).unwrap();
//! assert!(java.contains("class Dog extends Animal {"));
//! ```
//!
//! # Advanced Usage
//!
//! Drive the model directly and subscribe to its change notifications:
//!
//! ```rust
//! use classgen::prelude::*;
//!
//! let events = EventLog::new();
//! let mut model = DiagramModel::new();
//! model.subscribe(Box::new(events.clone()));
//!
//! model.add_class("Team", ["+ name:String"], ["+ play():void"]).unwrap();
//! model.add_class("Player", Vec::<String>::new(), Vec::<String>::new()).unwrap();
//! model.add_relation(RelationKind::Aggregation, "Team", "Player").unwrap();
//! assert_eq!(events.len(), 3);
//!
//! let generator = Generator::new(GenerateConfig::default().with_indent_width(2));
//! let python = generator.generate(&model, Language::Python).unwrap();
//! assert!(python.contains("self.players = []"));
//! ```

pub mod core;
pub mod plugins;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use crate::core::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{
        EventLog, GenerateConfig, Language, ModelError, ModelEvent, ModelObserver,
        ModelResult, NotationError, Visibility, VisualHandle,
    };
    pub use crate::plugins::class::{
        AssociationEnds, Attribute, ClassEntity, DiagramModel, Method, Relation, RelationKind,
        ScriptLoader,
    };
    pub use crate::plugins::codegen::{Emitter, Generator, JavaEmitter, PhpEmitter, PythonEmitter};
}

/// Generate skeletons for every class of `model` with default settings
///
/// # Example
/// ```rust
/// use classgen::{generate, Language};
/// use classgen::plugins::class::DiagramModel;
///
/// let mut model = DiagramModel::new();
/// model.add_class("Order", ["- id:int"], Vec::<String>::new()).unwrap();
/// assert_eq!(
///     generate(&model, Language::Java).unwrap(),
///     "class Order {\n    private int id;\n}\n"
/// );
/// ```
pub fn generate(model: &plugins::class::DiagramModel, language: Language) -> anyhow::Result<String> {
    plugins::codegen::Generator::default().generate(model, language)
}

/// Load a diagram script and generate skeletons from it
///
/// Fails on the first script or model error; see
/// [`ScriptLoader`](plugins::class::ScriptLoader) for the format.
pub fn generate_script(script: &str, language: Language) -> anyhow::Result<String> {
    let model = plugins::class::ScriptLoader::new().load(script)?;
    generate(&model, language)
}
