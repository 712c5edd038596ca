//! Core type definitions for code generation
//!
//! This module contains the small value types shared by the model and the
//! emitters: target languages, member visibility and generation settings.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Target language for generated skeletons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// `class A extends B { ... }` with typed fields
    #[default]
    Java,
    /// `<?php` classes with `$` properties
    Php,
    /// Constructor-initialised classes with `pass` stubs
    Python,
}

impl Language {
    /// All supported languages in generation order
    pub fn all() -> [Language; 3] {
        [Language::Java, Language::Php, Language::Python]
    }

    /// Get all valid language names
    pub fn variants() -> &'static [&'static str] {
        &["java", "php", "python"]
    }

    pub fn file_extension(&self) -> &'static str {
        match self {
            Language::Java => "java",
            Language::Php => "php",
            Language::Python => "py",
        }
    }

    /// Prefix of a single-line comment in this language
    pub fn comment_prefix(&self) -> &'static str {
        match self {
            Language::Java | Language::Php => "//",
            Language::Python => "#",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::Java => write!(f, "java"),
            Language::Php => write!(f, "php"),
            Language::Python => write!(f, "python"),
        }
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "java" => Ok(Language::Java),
            "php" => Ok(Language::Php),
            "python" | "py" => Ok(Language::Python),
            _ => Err(format!("Unknown language: {}", s)),
        }
    }
}

/// Visibility modifier for class members
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,    // +
    Private,   // -
    Protected, // #
}

impl Visibility {
    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            '+' => Some(Visibility::Public),
            '-' => Some(Visibility::Private),
            '#' => Some(Visibility::Protected),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Visibility::Public => '+',
            Visibility::Private => '-',
            Visibility::Protected => '#',
        }
    }

    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "public" => Some(Visibility::Public),
            "private" => Some(Visibility::Private),
            "protected" => Some(Visibility::Protected),
            _ => None,
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
            Visibility::Protected => "protected",
        }
    }

    pub fn all() -> [Visibility; 3] {
        [Visibility::Public, Visibility::Private, Visibility::Protected]
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Settings shared by every emitter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerateConfig {
    /// Spaces per indentation level
    pub indent_width: usize,
    /// Append a `// Association`-style comment to relation-derived fields
    pub annotate_relations: bool,
}

impl GenerateConfig {
    pub fn new(indent_width: usize, annotate_relations: bool) -> Self {
        Self {
            indent_width,
            annotate_relations,
        }
    }

    pub fn with_indent_width(mut self, indent_width: usize) -> Self {
        self.indent_width = indent_width;
        self
    }

    pub fn with_annotations(mut self, annotate_relations: bool) -> Self {
        self.annotate_relations = annotate_relations;
        self
    }

    /// Leading whitespace for the given nesting level
    pub fn indent(&self, level: usize) -> String {
        " ".repeat(self.indent_width * level)
    }
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self::new(4, true)
    }
}
