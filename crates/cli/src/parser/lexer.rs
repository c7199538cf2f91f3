// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Tokenizer for Ruby-flavoured spec files.
//!
//! Only the structure matters to the parser: block openers and closers,
//! string and symbol literals, identifiers, and line breaks. Everything
//! else is carried through as punctuation or operators.

use std::ops::Range;

use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    #[token("do")]
    Do,
    #[token("end")]
    End,
    #[token("def")]
    Def,
    #[token("class")]
    Class,
    #[token("module")]
    Module,
    #[token("begin")]
    Begin,
    #[token("case")]
    Case,
    #[token("if")]
    If,
    #[token("unless")]
    Unless,
    #[token("while")]
    While,
    #[token("until")]
    Until,
    #[token("for")]
    For,

    /// Method names and locals, including `?`/`!` suffixes.
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*[?!]?")]
    Ident,

    /// Instance and class variables.
    #[regex(r"@@?[A-Za-z_][A-Za-z0-9_]*")]
    IVar,

    #[regex(r"\$[A-Za-z0-9_]+")]
    GVar,

    #[regex(r":[A-Za-z_][A-Za-z0-9_]*[?!=]?")]
    Symbol,

    #[regex(r#"'([^'\\]|\\.)*'"#)]
    #[regex(r#""([^"\\]|\\.)*""#)]
    Str,

    #[regex(r"[0-9][0-9_]*(\.[0-9]+)?")]
    Number,

    #[token("\n")]
    Newline,
    #[token(";")]
    Semi,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("|")]
    Pipe,
    #[token(",")]
    Comma,
    #[token(".")]
    #[token("&.", priority = 10)]
    Dot,
    #[token("::")]
    Scope,
    #[token(":")]
    Colon,
    #[token("=", priority = 10)]
    Assign,
    #[token("=>", priority = 10)]
    Rocket,
    #[regex(r"[+\-*/%<>!&^~?=]+")]
    Operator,

    #[regex(r"#[^\n]*", logos::skip)]
    Comment,

    #[regex(r"[ \t\f\r]+", logos::skip)]
    Whitespace,

    /// Bytes the lexer does not recognize (including unterminated quotes).
    Error,
}

impl Token {
    /// Tokens that end a logical line.
    pub fn is_terminator(self) -> bool {
        matches!(self, Token::Newline | Token::Semi)
    }

    /// Tokens after which a line break does not end the statement.
    pub fn continues_line(self) -> bool {
        matches!(
            self,
            Token::Comma
                | Token::Dot
                | Token::Operator
                | Token::Assign
                | Token::Rocket
                | Token::LParen
                | Token::LBracket
                | Token::Pipe
                | Token::Scope
        )
    }

    /// Keywords that open an `end`-terminated block when used as a statement.
    pub fn is_statement_keyword(self) -> bool {
        matches!(
            self,
            Token::If | Token::Unless | Token::While | Token::Until | Token::For
        )
    }

    /// Keywords that always open an `end`-terminated block.
    pub fn is_definition_keyword(self) -> bool {
        matches!(
            self,
            Token::Def | Token::Class | Token::Module | Token::Begin | Token::Case
        )
    }
}

/// A token with its source text, byte span and 1-based line.
#[derive(Debug, Clone)]
pub struct Lexeme<'src> {
    pub token: Token,
    pub text: &'src str,
    pub span: Range<usize>,
    pub line: u32,
}

/// Tokenize the entire input.
pub fn tokenize(source: &str) -> Vec<Lexeme<'_>> {
    let mut lexer = Token::lexer(source);
    let mut lexemes = Vec::new();
    let mut line = 1u32;

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let text = &source[span.clone()];
        let token = result.unwrap_or(Token::Error);
        lexemes.push(Lexeme {
            token,
            text,
            span,
            line,
        });
        line += text.matches('\n').count() as u32;
    }

    lexemes
}

/// Unquote a string literal, leaving other text untouched.
pub fn unquote(text: &str) -> &str {
    let bytes = text.as_bytes();
    if bytes.len() >= 2
        && (bytes[0] == b'\'' || bytes[0] == b'"')
        && bytes[bytes.len() - 1] == bytes[0]
    {
        &text[1..text.len() - 1]
    } else {
        text
    }
}

#[cfg(test)]
#[path = "lexer_tests.rs"]
mod tests;
