//! WebAssembly bindings for Classgen
//!
//! The browser canvas drives a [`Diagram`] with the same operations its
//! forms perform, then drains the change events to keep its vertices and
//! edges in sync.

use wasm_bindgen::prelude::*;

use crate::core::{EventLog, GenerateConfig, Language, VisualHandle};
use crate::plugins::class::{lines_from_text, AssociationEnds, DiagramModel, RelationKind};
use crate::plugins::codegen::Generator;

/// Initialize WASM module
///
/// Sets up panic hooks and logging for better error messages in the browser.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();

    use crate::core::logging::init_logging;
    let _ = init_logging(Some("info"), None);
}

fn js_error(error: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&error.to_string())
}

/// A diagram model owned by the browser page
#[wasm_bindgen]
pub struct Diagram {
    model: DiagramModel,
    events: EventLog,
    generator: Generator,
}

#[wasm_bindgen]
impl Diagram {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Diagram {
        let events = EventLog::new();
        let mut model = DiagramModel::new();
        model.subscribe(Box::new(events.clone()));
        Diagram {
            model,
            events,
            generator: Generator::new(GenerateConfig::default()),
        }
    }

    /// Add a class from the form's textarea contents, returning its handle id
    pub fn add_class(&mut self, name: &str, attributes: &str, methods: &str) -> Result<u32, JsValue> {
        self.model
            .add_class(name, lines_from_text(attributes), lines_from_text(methods))
            .map(VisualHandle::id)
            .map_err(js_error)
    }

    pub fn update_class(
        &mut self,
        old_name: &str,
        new_name: &str,
        attributes: &str,
        methods: &str,
    ) -> Result<(), JsValue> {
        self.model
            .update_class(
                old_name,
                new_name,
                lines_from_text(attributes),
                lines_from_text(methods),
            )
            .map_err(js_error)
    }

    pub fn delete_class(&mut self, name: &str) -> Result<(), JsValue> {
        self.model.delete_class(name).map(|_| ()).map_err(js_error)
    }

    /// Add a relation by kind name; associations added here carry no roles
    pub fn add_relation(&mut self, kind: &str, source: &str, target: &str) -> Result<u32, JsValue> {
        let kind = match kind.to_lowercase().as_str() {
            "aggregation" => RelationKind::Aggregation,
            "composition" => RelationKind::Composition,
            "generalization" => RelationKind::Generalization,
            "association" => RelationKind::association(AssociationEnds::default()),
            _ => return Err(JsValue::from_str(&format!("Unknown relation kind: {}", kind))),
        };
        self.model
            .add_relation(kind, source, target)
            .map(VisualHandle::id)
            .map_err(js_error)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn add_association(
        &mut self,
        source: &str,
        target: &str,
        source_role: &str,
        source_cardinality: &str,
        target_cardinality: &str,
        target_role: &str,
    ) -> Result<u32, JsValue> {
        let ends = AssociationEnds::new(
            source_role,
            source_cardinality,
            target_cardinality,
            target_role,
        );
        self.model
            .add_relation(RelationKind::association(ends), source, target)
            .map(VisualHandle::id)
            .map_err(js_error)
    }

    /// Remove the relation drawn as `handle`; returns how many were removed
    pub fn delete_relation(&mut self, handle: u32) -> usize {
        self.model.delete_relation(VisualHandle::new(handle))
    }

    /// Generate skeletons in `language` (java, php or python)
    pub fn generate(&self, language: &str) -> Result<String, JsValue> {
        let language: Language = language.parse().map_err(js_error)?;
        self.generator
            .generate(&self.model, language)
            .map_err(js_error)
    }

    /// Drain pending change events as a JSON array
    pub fn take_events(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.events.take()).map_err(js_error)
    }

    pub fn class_count(&self) -> usize {
        self.model.class_count()
    }

    pub fn relation_count(&self) -> usize {
        self.model.relation_count()
    }
}

impl Default for Diagram {
    fn default() -> Self {
        Self::new()
    }
}
