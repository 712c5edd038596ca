//! Property tests for the member notation and model invariants

use classgen::generate;
use classgen::plugins::class::notation::{keyword_to_symbol, symbol_to_keyword};
use classgen::plugins::class::{parse_attribute, parse_method};
use classgen::prelude::*;
use proptest::prelude::*;

fn symbol() -> impl Strategy<Value = char> {
    prop_oneof![Just('+'), Just('-'), Just('#')]
}

fn name() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z0-9_]{0,12}"
}

fn type_name() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9_]{0,10}"
}

fn kind() -> impl Strategy<Value = RelationKind> {
    prop_oneof![
        Just(RelationKind::Aggregation),
        Just(RelationKind::Composition),
        Just(RelationKind::Generalization),
        Just(RelationKind::association(AssociationEnds::new("a", "1", "*", "b"))),
    ]
}

/// A model with `count` classes and whatever relations among them are accepted
fn build_model(count: usize, edges: &[(usize, usize, RelationKind)]) -> DiagramModel {
    let mut model = DiagramModel::new();
    for i in 0..count {
        model
            .add_class(&format!("C{}", i), ["+ id:int"], ["+ run():void"])
            .unwrap();
    }
    for (source, target, kind) in edges {
        let _ = model.add_relation(
            kind.clone(),
            &format!("C{}", source % count),
            &format!("C{}", target % count),
        );
    }
    model
}

proptest! {
    #[test]
    fn attribute_round_trip(v in symbol(), n in name(), t in type_name()) {
        let line = format!("{} {}:{}", v, n, t);
        let attribute = parse_attribute(&line).unwrap();
        prop_assert_eq!(attribute.to_string(), line);
    }

    #[test]
    fn method_round_trip(
        v in symbol(),
        n in name(),
        params in "[a-z ,]{0,16}",
        ret in type_name(),
    ) {
        let line = format!("{} {}({}):{}", v, n, params, ret);
        let method = parse_method(&line).unwrap();
        prop_assert_eq!(&method.params, &params);
        prop_assert_eq!(method.to_string(), line);
    }

    #[test]
    fn visibility_conversion_is_an_involution(v in symbol(), n in name(), t in type_name()) {
        let line = format!("{} {}:{}", v, n, t);
        let keyword = symbol_to_keyword(&line);
        prop_assert_eq!(keyword_to_symbol(&keyword), line.clone());
        prop_assert_eq!(symbol_to_keyword(&keyword), keyword.clone());
        prop_assert_eq!(
            symbol_to_keyword(&keyword_to_symbol(&keyword)),
            keyword
        );
    }

    #[test]
    fn delete_cascades(
        count in 2usize..6,
        edges in prop::collection::vec((0usize..6, 0usize..6, kind()), 0..12),
        victim in 0usize..6,
    ) {
        let mut model = build_model(count, &edges);
        let victim = format!("C{}", victim % count);
        model.delete_class(&victim).unwrap();
        prop_assert!(model.relations().iter().all(|r| !r.touches(&victim)));
        prop_assert!(model
            .relations()
            .iter()
            .all(|r| model.contains(r.source()) && model.contains(r.target())));
    }

    #[test]
    fn relation_to_missing_class_leaves_store_unchanged(
        count in 2usize..6,
        edges in prop::collection::vec((0usize..6, 0usize..6, kind()), 0..12),
        source in 0usize..6,
        kind in kind(),
    ) {
        let mut model = build_model(count, &edges);
        let before = model.relations().to_vec();
        let result = model.add_relation(kind, &format!("C{}", source % count), "Missing");
        let rejected = matches!(result, Err(ModelError::MissingEndpoints { .. }));
        prop_assert!(rejected);
        prop_assert_eq!(model.relations(), &before[..]);
    }

    #[test]
    fn inheritance_chains_end(
        count in 2usize..6,
        edges in prop::collection::vec((0usize..6, 0usize..6, kind()), 0..16),
    ) {
        let model = build_model(count, &edges);
        for class in model.classes() {
            let mut current = class.name();
            let mut steps = 0;
            while let Some(parent) = model.parent_of(current) {
                current = parent;
                steps += 1;
                prop_assert!(steps < count, "cycle through {}", class.name());
            }
        }
    }

    #[test]
    fn generation_is_deterministic(
        count in 1usize..6,
        edges in prop::collection::vec((0usize..6, 0usize..6, kind()), 0..12),
    ) {
        let model = build_model(count, &edges);
        for language in Language::all() {
            prop_assert_eq!(
                generate(&model, language).unwrap(),
                generate(&model, language).unwrap()
            );
        }
    }
}
