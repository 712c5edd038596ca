//! Diagram script reader
//!
//! A small mermaid-flavoured text format that replays the actions a diagram
//! editor would perform: declare classes with their member lines, then
//! connect them.
//!
//! ```text
//! classDiagram
//! class Animal {
//!     # name:string
//!     + speak():void
//! }
//! class Dog
//! Dog --|> Animal
//! Order -- Customer : buyer 1 - 1..* items
//! ```
//!
//! Member lines inside a class body are stored verbatim, minus any trailing
//! `%%` comment. Every class is created before any relation, so relations
//! may name classes declared further down.
//!
//! A cardinality is a bound or a `lower..upper` range, where a bound is a
//! number, `*` or a single letter such as `n`. A lone letter before the `-`
//! reads as a cardinality, not a role.

use anyhow::{Context, Result};
use chumsky::prelude::*;
use tracing::{debug, info, span, trace, Level};

use super::database::{AssociationEnds, DiagramModel, RelationKind};
use crate::core::chumsky_utils::{
    first_error, identifier, inline_whitespace, inline_whitespace_required, mermaid_comment, Extra,
};
use crate::core::ModelError;

/// One action read from a script
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Class {
        name: String,
        attributes: Vec<String>,
        methods: Vec<String>,
        line: usize,
    },
    Relation {
        kind: RelationKind,
        source: String,
        target: String,
        line: usize,
    },
}

impl Statement {
    pub fn line(&self) -> usize {
        match self {
            Statement::Class { line, .. } | Statement::Relation { line, .. } => *line,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Arrow {
    /// `Parent <|-- Child`
    InheritedBy,
    /// `Child --|> Parent`
    Inherits,
    Aggregates,
    Contains,
    Associates,
}

#[derive(Debug, Clone, PartialEq)]
enum LineItem {
    /// `class Name {`
    ClassOpen(String),
    /// `class Name` or `class Name {}`
    ClassDecl(String),
    Relation {
        left: String,
        arrow: Arrow,
        right: String,
        label: Option<String>,
    },
}

/// Reads diagram scripts into a model
pub struct ScriptLoader;

impl ScriptLoader {
    pub fn new() -> Self {
        Self
    }

    /// Parse a script into statements without touching any model
    pub fn parse(&self, input: &str) -> Result<Vec<Statement>, ModelError> {
        let mut statements = Vec::new();
        let mut open: Option<(String, Vec<String>, Vec<String>, usize)> = None;

        for (index, raw) in input.lines().enumerate() {
            let line_no = index + 1;
            let line = raw.trim();
            let code = line.split("%%").next().unwrap_or_default().trim();

            if let Some((name, attributes, methods, start)) = open.as_mut() {
                if code == "}" {
                    statements.push(Statement::Class {
                        name: std::mem::take(name),
                        attributes: std::mem::take(attributes),
                        methods: std::mem::take(methods),
                        line: *start,
                    });
                    open = None;
                } else if code.is_empty() {
                    continue;
                } else if code.contains('(') {
                    trace!(line = line_no, member = code, "Method line");
                    methods.push(code.to_string());
                } else {
                    trace!(line = line_no, member = code, "Attribute line");
                    attributes.push(code.to_string());
                }
                continue;
            }

            if line.is_empty() || is_comment(line) || code.eq_ignore_ascii_case("classdiagram") {
                continue;
            }

            let item = line_parser().parse(line).into_result().map_err(|errors| {
                let (message, column) = first_error(&errors);
                let indent = raw.len() - raw.trim_start().len();
                ModelError::parse_error(message, line_no, column + indent)
            })?;

            match item {
                LineItem::ClassOpen(name) => open = Some((name, Vec::new(), Vec::new(), line_no)),
                LineItem::ClassDecl(name) => statements.push(Statement::Class {
                    name,
                    attributes: Vec::new(),
                    methods: Vec::new(),
                    line: line_no,
                }),
                LineItem::Relation {
                    left,
                    arrow,
                    right,
                    label,
                } => statements.push(relation_statement(left, arrow, right, label, line_no)?),
            }
        }

        if let Some((name, _, _, start)) = open {
            return Err(ModelError::parse_error(
                format!("class '{}' body is never closed", name),
                start,
                1,
            ));
        }
        Ok(statements)
    }

    /// Build a fresh model from a script
    ///
    /// Nothing is returned unless every statement applied cleanly.
    pub fn load(&self, input: &str) -> Result<DiagramModel> {
        let load_span = span!(Level::INFO, "load_script", input_len = input.len());
        let _enter = load_span.enter();

        let statements = self.parse(input)?;
        debug!(statements = statements.len(), "Script parsed");

        let mut model = DiagramModel::new();
        let (classes, relations): (Vec<_>, Vec<_>) = statements
            .into_iter()
            .partition(|s| matches!(s, Statement::Class { .. }));

        for statement in classes.into_iter().chain(relations) {
            let line = statement.line();
            match statement {
                Statement::Class {
                    name,
                    attributes,
                    methods,
                    ..
                } => {
                    model
                        .add_class(&name, attributes, methods)
                        .with_context(|| format!("line {}", line))?;
                }
                Statement::Relation {
                    kind,
                    source,
                    target,
                    ..
                } => {
                    model
                        .add_relation(kind, &source, &target)
                        .with_context(|| format!("line {}", line))?;
                }
            }
        }

        info!(
            classes = model.class_count(),
            relations = model.relation_count(),
            "Script loaded"
        );
        Ok(model)
    }
}

impl Default for ScriptLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn is_comment(line: &str) -> bool {
    mermaid_comment().then_ignore(end()).parse(line).into_result().is_ok()
}

fn relation_statement(
    left: String,
    arrow: Arrow,
    right: String,
    label: Option<String>,
    line: usize,
) -> Result<Statement, ModelError> {
    let (kind, source, target) = match arrow {
        Arrow::InheritedBy => (RelationKind::Generalization, right, left),
        Arrow::Inherits => (RelationKind::Generalization, left, right),
        Arrow::Aggregates => (RelationKind::Aggregation, left, right),
        Arrow::Contains => (RelationKind::Composition, left, right),
        Arrow::Associates => {
            let ends = match label.as_deref() {
                Some(text) => association_ends_parser()
                    .parse(text)
                    .into_result()
                    .map_err(|errors| {
                        let (message, _) = first_error(&errors);
                        ModelError::parse_error(
                            format!("invalid association label '{}': {}", text, message),
                            line,
                            1,
                        )
                    })?,
                None => AssociationEnds::default(),
            };
            (RelationKind::association(ends), left, right)
        }
    };
    if label.is_some() && !matches!(kind, RelationKind::Association(_)) {
        debug!(line, kind = kind.name(), "Ignoring label on non-association relation");
    }
    Ok(Statement::Relation {
        kind,
        source,
        target,
        line,
    })
}

fn line_parser<'src>() -> impl Parser<'src, &'src str, LineItem, Extra<'src>> {
    class_line().or(relation_line())
}

fn class_line<'src>() -> impl Parser<'src, &'src str, LineItem, Extra<'src>> {
    let body = just('{')
        .ignore_then(inline_whitespace())
        .ignore_then(just('}').or_not());

    text::keyword("class")
        .ignore_then(inline_whitespace_required())
        .ignore_then(identifier())
        .then_ignore(inline_whitespace())
        .then(body.or_not())
        .then_ignore(line_end())
        .map(|(name, body)| match body {
            Some(None) => LineItem::ClassOpen(name),
            Some(Some(_)) | None => LineItem::ClassDecl(name),
        })
}

/// Optional trailing `%%` comment, then the end of the line
fn line_end<'src>() -> impl Parser<'src, &'src str, (), Extra<'src>> {
    inline_whitespace()
        .then(mermaid_comment().or_not())
        .then_ignore(end())
        .ignored()
}

fn relation_line<'src>() -> impl Parser<'src, &'src str, LineItem, Extra<'src>> {
    // Longest arrows first so `--` does not shadow the others
    let arrow = choice((
        just("<|--").to(Arrow::InheritedBy),
        just("--|>").to(Arrow::Inherits),
        just("o--").to(Arrow::Aggregates),
        just("*--").to(Arrow::Contains),
        just("-->").to(Arrow::Associates),
        just("--").to(Arrow::Associates),
    ));

    let label = just(':').ignore_then(
        any()
            .and_is(just("%%").not())
            .repeated()
            .to_slice()
            .map(|s: &str| s.trim().to_string()),
    );

    identifier()
        .then_ignore(inline_whitespace())
        .then(arrow)
        .then_ignore(inline_whitespace())
        .then(identifier())
        .then_ignore(inline_whitespace())
        .then(label.or_not())
        .then_ignore(line_end())
        .map(|(((left, arrow), right), label)| LineItem::Relation {
            left,
            arrow,
            right,
            label: label.filter(|s| !s.is_empty()),
        })
}

/// `<sourceRole> <sourceCardinality> - <targetCardinality> <targetRole>`
///
/// Each part is optional.
fn association_ends_parser<'src>() -> impl Parser<'src, &'src str, AssociationEnds, Extra<'src>> {
    let source_end = choice((
        identifier()
            .then_ignore(inline_whitespace_required())
            .then(cardinality())
            .map(|(role, card)| (Some(role), Some(card))),
        cardinality().map(|card| (None, Some(card))),
        identifier().map(|role| (Some(role), None)),
    ))
    .or_not()
    .map(Option::unwrap_or_default);
    let target_end = choice((
        cardinality()
            .then_ignore(inline_whitespace_required())
            .then(identifier())
            .map(|(card, role)| (Some(card), Some(role))),
        cardinality().map(|card| (Some(card), None)),
        identifier().map(|role| (None, Some(role))),
    ))
    .or_not()
    .map(Option::unwrap_or_default);

    inline_whitespace()
        .ignore_then(source_end)
        .then_ignore(inline_whitespace())
        .then_ignore(just('-'))
        .then_ignore(inline_whitespace())
        .then(target_end)
        .then_ignore(inline_whitespace())
        .then_ignore(end())
        .map(
            |((source_role, source_cardinality), (target_cardinality, target_role))| {
                AssociationEnds::new(
                    source_role.unwrap_or_default(),
                    source_cardinality.unwrap_or_default(),
                    target_cardinality.unwrap_or_default(),
                    target_role.unwrap_or_default(),
                )
            },
        )
}

/// `1`, `*`, `n`, `0..1`, `1..*`, `0..n`
fn cardinality<'src>() -> impl Parser<'src, &'src str, String, Extra<'src>> + Clone {
    let letter = any()
        .filter(char::is_ascii_alphabetic)
        .then_ignore(any().filter(|c: &char| c.is_ascii_alphanumeric() || *c == '_').not())
        .ignored();
    let bound = choice((text::digits(10).ignored(), just('*').ignored(), letter));

    bound
        .clone()
        .then(just("..").ignore_then(bound).or_not())
        .to_slice()
        .map(|s: &str| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Vec<Statement> {
        ScriptLoader::new().parse(input).unwrap()
    }

    #[test]
    fn test_parse_class_with_body() {
        let statements = parse("class Animal {\n    # name:string\n    + speak():void\n}");
        assert_eq!(
            statements,
            vec![Statement::Class {
                name: "Animal".to_string(),
                attributes: vec!["# name:string".to_string()],
                methods: vec!["+ speak():void".to_string()],
                line: 1,
            }]
        );
    }

    #[test]
    fn test_parse_simple_classes() {
        let statements = parse("classDiagram\nclass Dog\nclass Cat {}\n%% done");
        assert_eq!(statements.len(), 2);
        assert!(matches!(&statements[1], Statement::Class { name, line: 3, .. } if name == "Cat"));
    }

    #[test]
    fn test_trailing_comments() {
        let statements = parse(
            "classDiagram %% header\nclass Dog %% a dog\nclass Shop { %% open\n}\nDog --|> Animal %% inherits\nOrder -- Customer : 1 - * items %% roles",
        );
        assert_eq!(statements.len(), 4);
        match &statements[3] {
            Statement::Relation {
                kind: RelationKind::Association(ends),
                ..
            } => assert_eq!(ends.target_role, "items"),
            other => panic!("Expected association, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_generalization_both_ways() {
        let statements = parse("Dog --|> Animal\nAnimal <|-- Cat");
        for (statement, child) in statements.iter().zip(["Dog", "Cat"]) {
            match statement {
                Statement::Relation {
                    kind,
                    source,
                    target,
                    ..
                } => {
                    assert_eq!(*kind, RelationKind::Generalization);
                    assert_eq!(source, child);
                    assert_eq!(target, "Animal");
                }
                _ => panic!("Expected relation statement"),
            }
        }
    }

    #[test]
    fn test_parse_aggregation_and_composition() {
        let statements = parse("Team o-- Player\nTeam *-- Coach");
        assert!(matches!(
            &statements[0],
            Statement::Relation { kind: RelationKind::Aggregation, .. }
        ));
        assert!(matches!(
            &statements[1],
            Statement::Relation { kind: RelationKind::Composition, target, .. } if target == "Coach"
        ));
    }

    #[test]
    fn test_parse_association_label() {
        let statements = parse("Order -- Customer : buyer 1 - 1..* items");
        match &statements[0] {
            Statement::Relation {
                kind: RelationKind::Association(ends),
                ..
            } => {
                assert_eq!(ends, &AssociationEnds::new("buyer", "1", "1..*", "items"));
            }
            other => panic!("Expected association, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_association_partial_label() {
        let ends = association_ends_parser().parse("1 - * items").into_result().unwrap();
        assert_eq!(ends, AssociationEnds::new("", "1", "*", "items"));

        let ends = association_ends_parser().parse("owner -").into_result().unwrap();
        assert_eq!(ends.source_role, "owner");
        assert!(ends.target_role.is_empty());
    }

    #[test]
    fn test_parse_letter_cardinalities() {
        let ends = association_ends_parser().parse("1 - n items").into_result().unwrap();
        assert_eq!(ends, AssociationEnds::new("", "1", "n", "items"));

        let ends = association_ends_parser()
            .parse("owner 0..n - m")
            .into_result()
            .unwrap();
        assert_eq!(ends, AssociationEnds::new("owner", "0..n", "m", ""));

        let ends = association_ends_parser().parse("n - items").into_result().unwrap();
        assert_eq!(ends.source_cardinality, "n");
        assert!(ends.source_role.is_empty());
    }

    #[test]
    fn test_body_member_trailing_comments() {
        let statements = parse("class Order { %% open
    + id:int %% key
    + total():double %% sum
    %% note
} %% end");
        assert_eq!(
            statements,
            vec![Statement::Class {
                name: "Order".to_string(),
                attributes: vec!["+ id:int".to_string()],
                methods: vec!["+ total():double".to_string()],
                line: 1,
            }]
        );
    }

    #[test]
    fn test_parse_association_without_label() {
        let statements = parse("Order --> Customer");
        assert!(matches!(
            &statements[0],
            Statement::Relation { kind: RelationKind::Association(ends), .. } if *ends == AssociationEnds::default()
        ));
    }

    #[test]
    fn test_parse_errors_report_position() {
        let error = ScriptLoader::new()
            .parse("class Dog\n  Dog ==> Animal")
            .unwrap_err();
        match error {
            ModelError::ParseError { line, column, .. } => {
                assert_eq!(line, 2);
                assert!(column > 2);
            }
            other => panic!("Expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_unclosed_body() {
        let error = ScriptLoader::new()
            .parse("class Dog {\n + name:string")
            .unwrap_err();
        assert!(error.to_string().contains("never closed"));
    }

    #[test]
    fn test_load_applies_classes_before_relations() {
        let model = ScriptLoader::new()
            .load("Dog --|> Animal\nclass Dog\nclass Animal")
            .unwrap();
        assert_eq!(model.class_count(), 2);
        assert_eq!(model.parent_of("Dog"), Some("Animal"));
    }

    #[test]
    fn test_load_reports_model_errors_with_line() {
        let error = ScriptLoader::new()
            .load("class Dog\nclass Dog")
            .unwrap_err();
        assert!(format!("{:#}", error).contains("line 2"));
        assert!(matches!(
            error.downcast_ref::<ModelError>(),
            Some(ModelError::DuplicateClass { .. })
        ));
    }

    #[test]
    fn test_load_rejects_missing_endpoint() {
        let error = ScriptLoader::new()
            .load("class Team\nTeam o-- Player")
            .unwrap_err();
        assert!(matches!(
            error.downcast_ref::<ModelError>(),
            Some(ModelError::MissingEndpoints { .. })
        ));
    }
}
