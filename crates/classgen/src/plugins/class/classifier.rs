//! Relation classifier
//!
//! Splits the relation list by kind and folds Generalization edges into a
//! child -> parent lookup. Rebuilt on every generation run.

use std::collections::HashMap;
use tracing::warn;

use super::database::{AssociationEnds, Relation, RelationKind};

/// Relations grouped by kind
#[derive(Debug, Default)]
pub struct RelationIndex<'a> {
    parents: HashMap<&'a str, &'a str>,
    associations: Vec<&'a Relation>,
    aggregations: Vec<&'a Relation>,
    compositions: Vec<&'a Relation>,
}

impl<'a> RelationIndex<'a> {
    pub fn build(relations: &'a [Relation]) -> Self {
        let mut index = Self::default();
        for relation in relations {
            match relation.kind() {
                RelationKind::Generalization => {
                    // The model refuses a second parent, keep the first one seen if it happens
                    if let Some(existing) = index.parents.get(relation.source()) {
                        warn!(
                            child = relation.source(),
                            existing = *existing,
                            ignored = relation.target(),
                            "Class has more than one parent"
                        );
                        continue;
                    }
                    index.parents.insert(relation.source(), relation.target());
                }
                RelationKind::Association(_) => index.associations.push(relation),
                RelationKind::Aggregation => index.aggregations.push(relation),
                RelationKind::Composition => index.compositions.push(relation),
            }
        }
        index
    }

    pub fn parent_of(&self, class: &str) -> Option<&'a str> {
        self.parents.get(class).copied()
    }

    pub fn associations(&self) -> &[&'a Relation] {
        &self.associations
    }

    pub fn aggregations(&self) -> &[&'a Relation] {
        &self.aggregations
    }

    pub fn compositions(&self) -> &[&'a Relation] {
        &self.compositions
    }

    /// Associations whose source is `class`, with their role decorations
    pub fn associations_from<'s>(
        &'s self,
        class: &'s str,
    ) -> impl Iterator<Item = (&'a Relation, &'a AssociationEnds)> + 's {
        from_source(&self.associations, class).filter_map(|r| match r.kind() {
            RelationKind::Association(ends) => Some((r, ends)),
            _ => None,
        })
    }

    pub fn aggregations_from<'s>(&'s self, class: &'s str) -> impl Iterator<Item = &'a Relation> + 's {
        from_source(&self.aggregations, class)
    }

    pub fn compositions_from<'s>(&'s self, class: &'s str) -> impl Iterator<Item = &'a Relation> + 's {
        from_source(&self.compositions, class)
    }
}

fn from_source<'a, 's>(
    relations: &'s [&'a Relation],
    class: &'s str,
) -> impl Iterator<Item = &'a Relation> + 's {
    relations
        .iter()
        .copied()
        .filter(move |r| r.source() == class)
}
