//! Class diagram model
//!
//! `DiagramModel` owns the classes (by name, in insertion order) and the
//! relations between them. Every mutation goes through its methods so a
//! relation can never outlive one of its endpoint classes.

use serde::Serialize;
use std::fmt;
use tracing::{debug, info, trace};

use super::notation::{keyword_to_symbol, parse_attribute, parse_method, symbol_to_keyword};
use super::notation::{Attribute, Method};
use crate::core::{
    ModelError, ModelEvent, ModelObserver, ModelResult, NotationError, VisualHandle,
};

/// Split form text into raw member lines
pub fn lines_from_text(text: &str) -> Vec<String> {
    text.lines().map(|line| line.trim_end().to_string()).collect()
}

/// A class in the diagram
///
/// Member lines are kept exactly as entered so a malformed line can be fixed
/// later; they are parsed on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassEntity {
    name: String,
    attributes: Vec<String>,
    methods: Vec<String>,
    handle: VisualHandle,
}

impl ClassEntity {
    fn new(name: String, attributes: Vec<String>, methods: Vec<String>, handle: VisualHandle) -> Self {
        Self {
            name,
            attributes,
            methods,
            handle,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn handle(&self) -> VisualHandle {
        self.handle
    }

    pub fn attribute_lines(&self) -> &[String] {
        &self.attributes
    }

    pub fn method_lines(&self) -> &[String] {
        &self.methods
    }

    /// Parse every attribute line, in order
    pub fn attributes(&self) -> impl Iterator<Item = Result<Attribute, NotationError>> + '_ {
        self.attributes.iter().map(|line| parse_attribute(line))
    }

    /// Parse every method line, in order
    pub fn methods(&self) -> impl Iterator<Item = Result<Method, NotationError>> + '_ {
        self.methods.iter().map(|line| parse_method(line))
    }

    /// Lines that are neither blank nor parseable
    pub fn malformed_lines(&self) -> Vec<NotationError> {
        let attributes = self.attributes().filter_map(Result::err);
        let methods = self.methods().filter_map(Result::err);
        attributes
            .chain(methods)
            .filter(|error| !error.is_blank())
            .collect()
    }

    /// Text shown inside the class vertex
    ///
    /// `Name`, a `--` separator, the attribute lines, another separator and
    /// the method lines. Visibility keywords are shown as symbols.
    pub fn label(&self) -> String {
        let section = |lines: &[String]| {
            lines
                .iter()
                .map(|line| line.trim())
                .filter(|line| !line.is_empty())
                .map(keyword_to_symbol)
                .collect::<Vec<_>>()
                .join("\n")
        };
        format!(
            "{}\n--\n{}\n--\n{}",
            self.name,
            section(&self.attributes),
            section(&self.methods)
        )
    }

    /// Attribute and method text for an edit form, with keywords spelled out
    pub fn edit_text(&self) -> (String, String) {
        let section = |lines: &[String]| {
            lines
                .iter()
                .map(|line| symbol_to_keyword(line))
                .collect::<Vec<_>>()
                .join("\n")
        };
        (section(&self.attributes), section(&self.methods))
    }
}

/// Role and cardinality decorations of an association
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct AssociationEnds {
    pub source_role: String,
    pub target_role: String,
    pub source_cardinality: String,
    pub target_cardinality: String,
}

impl AssociationEnds {
    pub fn new(
        source_role: impl Into<String>,
        source_cardinality: impl Into<String>,
        target_cardinality: impl Into<String>,
        target_role: impl Into<String>,
    ) -> Self {
        Self {
            source_role: source_role.into(),
            target_role: target_role.into(),
            source_cardinality: source_cardinality.into(),
            target_cardinality: target_cardinality.into(),
        }
    }
}

/// Relation type between two classes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RelationKind {
    Association(AssociationEnds),
    /// Source holds a collection of targets it does not own
    Aggregation,
    /// Source owns a single target
    Composition,
    /// Source inherits target
    Generalization,
}

impl RelationKind {
    pub fn association(ends: AssociationEnds) -> Self {
        RelationKind::Association(ends)
    }

    pub fn name(&self) -> &'static str {
        match self {
            RelationKind::Association(_) => "Association",
            RelationKind::Aggregation => "Aggregation",
            RelationKind::Composition => "Composition",
            RelationKind::Generalization => "Generalization",
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A relation between two classes, referenced by name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Relation {
    kind: RelationKind,
    source: String,
    target: String,
    handle: VisualHandle,
}

impl Relation {
    pub fn kind(&self) -> &RelationKind {
        &self.kind
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn handle(&self) -> VisualHandle {
        self.handle
    }

    pub fn touches(&self, class: &str) -> bool {
        self.source == class || self.target == class
    }

    /// Text shown on the relation edge
    pub fn label(&self) -> String {
        match &self.kind {
            RelationKind::Association(ends) => format!(
                "{} {} - {} {}",
                ends.source_role, ends.source_cardinality, ends.target_cardinality, ends.target_role
            ),
            RelationKind::Aggregation => format!("{} aggregates {}", self.source, self.target),
            RelationKind::Composition => format!("{} contains {}", self.source, self.target),
            RelationKind::Generalization => format!("{} inherits {}", self.source, self.target),
        }
    }
}

/// The structural model behind a class diagram
#[derive(Default)]
pub struct DiagramModel {
    classes: Vec<ClassEntity>,
    relations: Vec<Relation>,
    next_handle: u32,
    observers: Vec<Box<dyn ModelObserver>>,
}

impl DiagramModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a collaborator that receives every completed mutation
    pub fn subscribe(&mut self, observer: Box<dyn ModelObserver>) {
        self.observers.push(observer);
    }

    pub fn classes(&self) -> &[ClassEntity] {
        &self.classes
    }

    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    pub fn relation_count(&self) -> usize {
        self.relations.len()
    }

    pub fn get(&self, name: &str) -> Option<&ClassEntity> {
        self.classes.iter().find(|c| c.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn relation(&self, handle: VisualHandle) -> Option<&Relation> {
        self.relations.iter().find(|r| r.handle == handle)
    }

    /// Relations where `name` is the source or the target
    pub fn relations_of<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Relation> + 'a {
        self.relations.iter().filter(move |r| r.touches(name))
    }

    /// Add a class
    ///
    /// Fails when the trimmed name is empty or already taken.
    pub fn add_class<A, M>(&mut self, name: &str, attributes: A, methods: M) -> ModelResult<VisualHandle>
    where
        A: IntoIterator,
        A::Item: Into<String>,
        M: IntoIterator,
        M::Item: Into<String>,
    {
        let name = name.trim();
        if name.is_empty() {
            return Err(ModelError::EmptyClassName);
        }
        if self.contains(name) {
            return Err(ModelError::duplicate_class(name));
        }

        let handle = self.allocate_handle();
        let entity = ClassEntity::new(
            name.to_string(),
            attributes.into_iter().map(Into::into).collect(),
            methods.into_iter().map(Into::into).collect(),
            handle,
        );
        info!(class = name, %handle, "Class added");

        let event = ModelEvent::ClassAdded {
            name: entity.name.clone(),
            handle,
            label: entity.label(),
        };
        self.classes.push(entity);
        self.notify(&[event]);
        Ok(handle)
    }

    /// Replace a class's members and optionally rename it
    ///
    /// A rename keeps the class's position and rewrites every relation that
    /// names it. Fails when `old_name` is unknown, the new name is empty, or
    /// the new name belongs to another class.
    pub fn update_class<A, M>(
        &mut self,
        old_name: &str,
        new_name: &str,
        attributes: A,
        methods: M,
    ) -> ModelResult<()>
    where
        A: IntoIterator,
        A::Item: Into<String>,
        M: IntoIterator,
        M::Item: Into<String>,
    {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Err(ModelError::EmptyClassName);
        }
        let index = self
            .classes
            .iter()
            .position(|c| c.name == old_name)
            .ok_or_else(|| ModelError::unknown_class(old_name))?;
        let renamed = new_name != old_name;
        if renamed && self.contains(new_name) {
            return Err(ModelError::duplicate_class(new_name));
        }

        let mut events = Vec::new();
        if renamed {
            for relation in self.relations.iter_mut().filter(|r| r.touches(old_name)) {
                if relation.source == old_name {
                    relation.source = new_name.to_string();
                }
                if relation.target == old_name {
                    relation.target = new_name.to_string();
                }
                trace!(relation = %relation.handle, "Relation endpoint renamed");
                events.push(ModelEvent::RelationUpdated {
                    handle: relation.handle,
                    label: relation.label(),
                });
            }
            info!(from = old_name, to = new_name, "Class renamed");
        }

        let entity = &mut self.classes[index];
        entity.name = new_name.to_string();
        entity.attributes = attributes.into_iter().map(Into::into).collect();
        entity.methods = methods.into_iter().map(Into::into).collect();
        debug!(class = new_name, "Class members replaced");

        events.insert(
            0,
            ModelEvent::ClassUpdated {
                old_name: old_name.to_string(),
                name: entity.name.clone(),
                handle: entity.handle,
                label: entity.label(),
            },
        );
        self.notify(&events);
        Ok(())
    }

    /// Remove a class and every relation naming it
    pub fn delete_class(&mut self, name: &str) -> ModelResult<ClassEntity> {
        let index = self
            .classes
            .iter()
            .position(|c| c.name == name)
            .ok_or_else(|| ModelError::unknown_class(name))?;

        let entity = self.classes.remove(index);
        let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.relations)
            .into_iter()
            .partition(|r| r.touches(name));
        self.relations = kept;

        debug!(class = name, count = removed.len(), "Cascaded relation removal");
        info!(class = name, handle = %entity.handle, "Class deleted");

        let mut events: Vec<_> = removed
            .iter()
            .map(|r| ModelEvent::RelationDeleted { handle: r.handle })
            .collect();
        events.push(ModelEvent::ClassDeleted {
            name: entity.name.clone(),
            handle: entity.handle,
        });
        self.notify(&events);
        Ok(entity)
    }

    /// Add a relation between two existing classes
    ///
    /// Rejected when either class is missing, when source and target are the
    /// same class, or when a Generalization would give a class a second
    /// parent or close an inheritance cycle.
    pub fn add_relation(
        &mut self,
        kind: RelationKind,
        source: &str,
        target: &str,
    ) -> ModelResult<VisualHandle> {
        let source = source.trim();
        let target = target.trim();
        let (source_handle, target_handle) = match (self.get(source), self.get(target)) {
            (Some(s), Some(t)) => (s.handle, t.handle),
            _ => return Err(ModelError::missing_endpoints(source, target)),
        };
        if source == target {
            return Err(ModelError::SelfRelation {
                name: source.to_string(),
            });
        }
        if kind == RelationKind::Generalization {
            if let Some(existing) = self.parent_of(source) {
                return Err(ModelError::MultipleParents {
                    child: source.to_string(),
                    existing: existing.to_string(),
                    requested: target.to_string(),
                });
            }
            if self.ancestors(target).any(|ancestor| ancestor == source) {
                return Err(ModelError::InheritanceCycle {
                    child: source.to_string(),
                    parent: target.to_string(),
                });
            }
        }

        let handle = self.allocate_handle();
        let relation = Relation {
            kind,
            source: source.to_string(),
            target: target.to_string(),
            handle,
        };
        info!(kind = relation.kind.name(), source, target, %handle, "Relation added");

        let event = ModelEvent::RelationAdded {
            handle,
            source: source_handle,
            target: target_handle,
            label: relation.label(),
        };
        self.relations.push(relation);
        self.notify(&[event]);
        Ok(handle)
    }

    /// Remove one relation by handle, returning how many were removed
    pub fn delete_relation(&mut self, handle: VisualHandle) -> usize {
        self.delete_relations(|r| r.handle == handle)
    }

    /// Remove every relation matching `predicate`, returning how many were removed
    pub fn delete_relations<F>(&mut self, predicate: F) -> usize
    where
        F: Fn(&Relation) -> bool,
    {
        let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.relations)
            .into_iter()
            .partition(|r| predicate(r));
        self.relations = kept;

        if !removed.is_empty() {
            info!(count = removed.len(), "Relations deleted");
        }
        let events: Vec<_> = removed
            .iter()
            .map(|r| ModelEvent::RelationDeleted { handle: r.handle })
            .collect();
        self.notify(&events);
        removed.len()
    }

    /// Generalization parent recorded for `name`, if any
    pub fn parent_of(&self, name: &str) -> Option<&str> {
        self.relations
            .iter()
            .find(|r| r.kind == RelationKind::Generalization && r.source == name)
            .map(|r| r.target.as_str())
    }

    /// Parent, grandparent and so on, nearest first
    fn ancestors<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        std::iter::successors(self.parent_of(name), move |current| self.parent_of(current))
    }

    /// Remove all classes and relations
    pub fn clear(&mut self) {
        let events: Vec<_> = self
            .relations
            .drain(..)
            .map(|r| ModelEvent::RelationDeleted { handle: r.handle })
            .chain(self.classes.drain(..).map(|c| ModelEvent::ClassDeleted {
                name: c.name,
                handle: c.handle,
            }))
            .collect();
        self.notify(&events);
    }

    fn allocate_handle(&mut self) -> VisualHandle {
        self.next_handle += 1;
        VisualHandle::new(self.next_handle)
    }

    fn notify(&mut self, events: &[ModelEvent]) {
        for observer in &mut self.observers {
            for event in events {
                observer.notify(event);
            }
        }
    }
}

impl fmt::Debug for DiagramModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagramModel")
            .field("classes", &self.classes)
            .field("relations", &self.relations)
            .field("observers", &self.observers.len())
            .finish()
    }
}
