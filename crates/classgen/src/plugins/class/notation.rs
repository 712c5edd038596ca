//! Member notation parser
//!
//! One line per member, in the compact notation used on class boxes:
//!
//! ```text
//! + name:string          attribute
//! - add(int a, int b):int  method
//! protected reset()      keyword visibility, no return type
//! ```
//!
//! Parsing is done with chumsky so a bad line is classified with a reason
//! instead of being silently mis-split. Formatting always writes the symbol
//! form, which makes `format(parse(s)) == s` for well-formed lines.

use chumsky::prelude::*;
use serde::Serialize;
use std::fmt;

use crate::core::chumsky_utils::{
    first_error, identifier, inline_whitespace, inline_whitespace_required, rest_trimmed, Extra,
};
use crate::core::{NotationError, Visibility};

/// A parsed attribute line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
    pub visibility: Visibility,
    pub name: String,
    /// `None` when the line has no `:type` part
    pub ty: Option<String>,
}

impl Attribute {
    pub fn new(visibility: Visibility, name: impl Into<String>) -> Self {
        Self {
            visibility,
            name: name.into(),
            ty: None,
        }
    }

    pub fn with_type(mut self, ty: impl Into<String>) -> Self {
        self.ty = Some(ty.into());
        self
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.visibility.symbol(), self.name)?;
        if let Some(ty) = &self.ty {
            write!(f, ":{}", ty)?;
        }
        Ok(())
    }
}

/// A parsed method line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Method {
    pub visibility: Visibility,
    pub name: String,
    /// Text between the parentheses, uninterpreted
    pub params: String,
    pub return_type: Option<String>,
}

impl Method {
    pub fn new(visibility: Visibility, name: impl Into<String>) -> Self {
        Self {
            visibility,
            name: name.into(),
            params: String::new(),
            return_type: None,
        }
    }

    pub fn with_params(mut self, params: impl Into<String>) -> Self {
        self.params = params.into();
        self
    }

    pub fn with_return_type(mut self, return_type: impl Into<String>) -> Self {
        self.return_type = Some(return_type.into());
        self
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}({})",
            self.visibility.symbol(),
            self.name,
            self.params
        )?;
        if let Some(return_type) = &self.return_type {
            write!(f, ":{}", return_type)?;
        }
        Ok(())
    }
}

/// Parse one attribute line
pub fn parse_attribute(line: &str) -> Result<Attribute, NotationError> {
    let line = line.trim();
    if line.is_empty() {
        return Err(NotationError::Blank);
    }
    attribute_parser()
        .parse(line)
        .into_result()
        .map_err(|errors| NotationError::malformed(line, first_error(&errors).0))
}

/// Parse one method line
pub fn parse_method(line: &str) -> Result<Method, NotationError> {
    let line = line.trim();
    if line.is_empty() {
        return Err(NotationError::Blank);
    }
    method_parser()
        .parse(line)
        .into_result()
        .map_err(|errors| NotationError::malformed(line, first_error(&errors).0))
}

/// Replace a leading visibility symbol with its keyword
///
/// Lines without a leading symbol are returned unchanged.
pub fn symbol_to_keyword(line: &str) -> String {
    let mut chars = line.chars();
    let Some(visibility) = chars.next().and_then(Visibility::from_symbol) else {
        return line.to_string();
    };
    let rest = chars.as_str();
    if rest.is_empty() || rest.starts_with(char::is_whitespace) {
        format!("{}{}", visibility.keyword(), rest)
    } else {
        format!("{} {}", visibility.keyword(), rest)
    }
}

/// Replace a leading visibility keyword with its symbol
///
/// The keyword must be a whole word: `publicity:int` is left alone.
pub fn keyword_to_symbol(line: &str) -> String {
    for visibility in Visibility::all() {
        if let Some(rest) = line.strip_prefix(visibility.keyword()) {
            let whole_word = !rest.starts_with(|c: char| c.is_alphanumeric() || c == '_');
            if whole_word {
                return format!("{}{}", visibility.symbol(), rest);
            }
        }
    }
    line.to_string()
}

fn visibility_parser<'src>() -> impl Parser<'src, &'src str, Visibility, Extra<'src>> + Clone {
    let symbol = choice((
        just('+').to(Visibility::Public),
        just('-').to(Visibility::Private),
        just('#').to(Visibility::Protected),
    ))
    .then_ignore(inline_whitespace());

    let keyword = text::ident()
        .try_map(|word: &str, span| {
            Visibility::from_keyword(word)
                .ok_or_else(|| Rich::custom(span, format!("unknown visibility '{}'", word)))
        })
        .then_ignore(inline_whitespace_required());

    symbol.or(keyword)
}

fn attribute_parser<'src>() -> impl Parser<'src, &'src str, Attribute, Extra<'src>> {
    let ty = just(':').ignore_then(rest_trimmed());

    visibility_parser()
        .then(identifier())
        .then_ignore(inline_whitespace())
        .then(ty.or_not())
        .then_ignore(end())
        .map(|((visibility, name), ty)| Attribute {
            visibility,
            name,
            ty: ty.filter(|t| !t.is_empty()),
        })
}

fn method_parser<'src>() -> impl Parser<'src, &'src str, Method, Extra<'src>> {
    let params = none_of(")")
        .repeated()
        .to_slice()
        .map(|s: &str| s.to_string())
        .delimited_by(just('('), just(')'));

    let return_type = just(':').ignore_then(rest_trimmed());

    visibility_parser()
        .then(identifier())
        .then_ignore(inline_whitespace())
        .then(params)
        .then_ignore(inline_whitespace())
        .then(return_type.or_not())
        .then_ignore(end())
        .map(|(((visibility, name), params), return_type)| Method {
            visibility,
            name,
            params,
            return_type: return_type.filter(|t| !t.is_empty()),
        })
}
