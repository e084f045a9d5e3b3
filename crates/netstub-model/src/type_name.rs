//! Parser for type-name strings used throughout assembly manifests.
//!
//! ```text
//! type     := named suffix*
//! named    := segment ('.' segment)* ('+' segment)* args?
//! args     := '[' type (',' type)* ']'
//! suffix   := '[' ','* ']'   array of rank (commas + 1)
//!           | '&'            by-reference
//!           | '*'            pointer
//! ```
//!
//! Examples: `System.Int32`, ``System.Collections.Generic.List`1[System.String]``,
//! ``Acme.Outer`1+Inner[T]``, `System.Int32[,]`, `T&`.

use crate::error::{ModelError, Result};

/// A parsed, not yet resolved, type reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeName {
    Named { path: String, args: Vec<TypeName> },
    Array { element: Box<TypeName>, rank: u32 },
    ByRef(Box<TypeName>),
    Pointer(Box<TypeName>),
}

impl TypeName {
    pub fn parse(text: &str) -> Result<TypeName> {
        let mut parser = TypeNameParser { text, pos: 0 };
        let ty = parser.parse_type()?;
        parser.skip_whitespace();
        if parser.pos != text.len() {
            return Err(parser.error("unexpected trailing characters"));
        }
        Ok(ty)
    }

    /// A simple name with no namespace, nesting or arguments; candidates
    /// for generic parameter lookup.
    pub fn as_simple_identifier(&self) -> Option<&str> {
        match self {
            TypeName::Named { path, args }
                if args.is_empty() && !path.contains('.') && !path.contains('+') =>
            {
                Some(path)
            }
            _ => None,
        }
    }
}

struct TypeNameParser<'a> {
    text: &'a str,
    pos: usize,
}

impl TypeNameParser<'_> {
    fn peek(&self) -> Option<u8> {
        self.text.as_bytes().get(self.pos).copied()
    }

    /// First non-whitespace byte after the current one.
    fn peek_after_open(&self) -> Option<u8> {
        self.text.as_bytes()[self.pos + 1..]
            .iter()
            .copied()
            .find(|b| !b.is_ascii_whitespace())
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn error(&self, message: &'static str) -> ModelError {
        ModelError::TypeNameSyntax {
            text: self.text.to_string(),
            offset: self.pos,
            message,
        }
    }

    fn expect(&mut self, byte: u8, message: &'static str) -> Result<()> {
        self.skip_whitespace();
        if self.peek() == Some(byte) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.error(message))
        }
    }

    fn parse_type(&mut self) -> Result<TypeName> {
        self.skip_whitespace();
        let path = self.parse_path()?;
        let mut args = Vec::new();
        self.skip_whitespace();
        if self.peek() == Some(b'[') && !matches!(self.peek_after_open(), Some(b']' | b',')) {
            self.pos += 1;
            loop {
                args.push(self.parse_type()?);
                self.skip_whitespace();
                match self.peek() {
                    Some(b',') => self.pos += 1,
                    Some(b']') => {
                        self.pos += 1;
                        break;
                    }
                    _ => return Err(self.error("expected ',' or ']' in generic arguments")),
                }
            }
        }
        let mut ty = TypeName::Named { path, args };

        loop {
            self.skip_whitespace();
            match self.peek() {
                Some(b'[') => {
                    self.pos += 1;
                    let mut rank = 1;
                    loop {
                        self.skip_whitespace();
                        match self.peek() {
                            Some(b',') => {
                                rank += 1;
                                self.pos += 1;
                            }
                            _ => break,
                        }
                    }
                    self.expect(b']', "expected ']' to close array rank")?;
                    ty = TypeName::Array {
                        element: Box::new(ty),
                        rank,
                    };
                }
                Some(b'&') => {
                    self.pos += 1;
                    ty = TypeName::ByRef(Box::new(ty));
                }
                Some(b'*') => {
                    self.pos += 1;
                    ty = TypeName::Pointer(Box::new(ty));
                }
                _ => break,
            }
        }
        Ok(ty)
    }

    fn parse_path(&mut self) -> Result<String> {
        let start = self.pos;
        while let Some(b) = self.peek() {
            if b.is_ascii_alphanumeric() || matches!(b, b'_' | b'.' | b'+' | b'`' | b'<' | b'>') {
                self.pos += 1;
            } else {
                break;
            }
        }
        if self.pos == start {
            return Err(self.error("expected a type name"));
        }
        let path = &self.text[start..self.pos];
        if path.starts_with(['.', '+']) || path.ends_with(['.', '+']) {
            return Err(self.error("empty name segment"));
        }
        Ok(path.to_string())
    }
}
