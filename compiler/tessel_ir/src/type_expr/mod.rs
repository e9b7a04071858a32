//! Type expressions.
//!
//! Schema files name field types with expressions such as
//! `std.Map<std.String, com.acme.Dog[]>`. Grammar:
//!
//! ```text
//! type := path ('<' type (',' type)* '>')? ('[' ']')*
//! path := ident ('.' ident)*
//! ```
//!
//! Primitive keywords (`int`, `long`, ...) name primitives. A bare name with
//! no package that is not declared falls back to `std.<name>`, so `String`
//! and `List<Integer>` work as shorthands.

use std::ops::Range;

use logos::Logos;

use crate::{GraphError, Prim, TypeGraphBuilder, TypeId};

/// Raw token from logos.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")]
enum RawToken {
    #[regex(r"[A-Za-z_$][A-Za-z0-9_$]*(\.[A-Za-z_$][A-Za-z0-9_$]*)*")]
    Path,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token(",")]
    Comma,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
}

impl RawToken {
    fn describe(self) -> &'static str {
        match self {
            RawToken::Path => "a type name",
            RawToken::Lt => "`<`",
            RawToken::Gt => "`>`",
            RawToken::Comma => "`,`",
            RawToken::LBracket => "`[`",
            RawToken::RBracket => "`]`",
        }
    }
}

/// Errors from parsing or resolving a type expression.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TypeExprError {
    #[error("unexpected character at {0:?}")]
    InvalidCharacter(Range<usize>),
    #[error("expected {expected} at {at:?}")]
    Expected { expected: &'static str, at: Range<usize> },
    #[error("unexpected {found} at {at:?}")]
    Trailing { found: &'static str, at: Range<usize> },
    #[error("unknown type `{0}`")]
    UnknownType(String),
    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Parsed, unresolved type expression.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeExpr {
    pub path: String,
    pub args: Vec<TypeExpr>,
    /// Number of trailing `[]`.
    pub dims: usize,
}

impl TypeExpr {
    /// Parse `source` as a single type expression.
    pub fn parse(source: &str) -> Result<TypeExpr, TypeExprError> {
        let tokens = lex(source)?;
        let mut parser = Parser {
            tokens: &tokens,
            pos: 0,
            end: source.len(),
        };
        let expr = parser.parse_type()?;
        if let Some(&(tok, _, ref span)) = tokens.get(parser.pos) {
            return Err(TypeExprError::Trailing {
                found: tok.describe(),
                at: span.clone(),
            });
        }
        Ok(expr)
    }

    /// Resolve names and intern structural types.
    pub fn resolve(&self, builder: &mut TypeGraphBuilder) -> Result<TypeId, TypeExprError> {
        let base = resolve_name(builder, &self.path)?;
        let args = self
            .args
            .iter()
            .map(|arg| arg.resolve(builder))
            .collect::<Result<Vec<_>, _>>()?;
        let mut id = builder.parameterized(base, &args)?;
        for _ in 0..self.dims {
            id = builder.array(id);
        }
        Ok(id)
    }
}

/// Parse and resolve in one step.
pub fn resolve_type(builder: &mut TypeGraphBuilder, source: &str) -> Result<TypeId, TypeExprError> {
    TypeExpr::parse(source)?.resolve(builder)
}

fn resolve_name(builder: &TypeGraphBuilder, path: &str) -> Result<TypeId, TypeExprError> {
    if let Some(prim) = Prim::from_keyword(path) {
        return Ok(prim.type_id());
    }
    if let Some(id) = builder.lookup(path) {
        return Ok(id);
    }
    if !path.contains('.') {
        if let Some(id) = builder.lookup(&format!("std.{path}")) {
            return Ok(id);
        }
    }
    Err(TypeExprError::UnknownType(path.to_string()))
}

type Lexed<'src> = Vec<(RawToken, &'src str, Range<usize>)>;

fn lex(source: &str) -> Result<Lexed<'_>, TypeExprError> {
    let mut logos = RawToken::lexer(source);
    let mut tokens = Vec::new();
    while let Some(result) = logos.next() {
        match result {
            Ok(raw) => tokens.push((raw, logos.slice(), logos.span())),
            Err(()) => return Err(TypeExprError::InvalidCharacter(logos.span())),
        }
    }
    Ok(tokens)
}

struct Parser<'a, 'src> {
    tokens: &'a [(RawToken, &'src str, Range<usize>)],
    pos: usize,
    end: usize,
}

impl Parser<'_, '_> {
    fn peek(&self) -> Option<RawToken> {
        self.tokens.get(self.pos).map(|t| t.0)
    }

    fn here(&self) -> Range<usize> {
        self.tokens
            .get(self.pos)
            .map_or(self.end..self.end, |t| t.2.clone())
    }

    fn expect(&mut self, kind: RawToken) -> Result<(), TypeExprError> {
        if self.peek() == Some(kind) {
            self.pos += 1;
            Ok(())
        } else {
            Err(TypeExprError::Expected {
                expected: kind.describe(),
                at: self.here(),
            })
        }
    }

    fn parse_type(&mut self) -> Result<TypeExpr, TypeExprError> {
        let path = match self.tokens.get(self.pos) {
            Some(&(RawToken::Path, text, _)) => {
                self.pos += 1;
                text.to_string()
            }
            _ => {
                return Err(TypeExprError::Expected {
                    expected: RawToken::Path.describe(),
                    at: self.here(),
                })
            }
        };

        let mut args = Vec::new();
        if self.peek() == Some(RawToken::Lt) {
            self.pos += 1;
            args.push(self.parse_type()?);
            while self.peek() == Some(RawToken::Comma) {
                self.pos += 1;
                args.push(self.parse_type()?);
            }
            self.expect(RawToken::Gt)?;
        }

        let mut dims = 0;
        while self.peek() == Some(RawToken::LBracket) {
            self.pos += 1;
            self.expect(RawToken::RBracket)?;
            dims += 1;
        }

        Ok(TypeExpr { path, args, dims })
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
