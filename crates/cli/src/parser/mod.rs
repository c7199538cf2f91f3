// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Spec file parser.
//!
//! Turns Ruby-flavoured spec source into a [`SpecTree`] of nested
//! `describe`/`context`/example blocks. Only the block DSL is interpreted;
//! everything else is balanced (so `do`/`end`, braces and keyword blocks
//! nest correctly) and kept as opaque statements.

pub mod lexer;
pub mod scope;
pub mod shared;
pub mod tree;

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};
use lexer::{Lexeme, Token};
use shared::{Include, SharedTemplate};

pub use scope::{Resolved, Scope};
pub use tree::{
    Binding, BindingKind, BlockKind, BlockNode, Hook, HookKind, SUBJECT, Span, SpecTree, Statement,
};

/// Matcher names following `.to`, `.not_to` and `.to_not`.
#[allow(clippy::expect_used)]
static MATCHER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\.(?:to|not_to|to_not)\b\s*\(?\s*([a-z_][a-z0-9_]*[?!]?)").expect("valid regex")
});

/// Parse spec source into a block tree.
pub fn parse(source: &str) -> Result<SpecTree> {
    let lexemes = lexer::tokenize(source);

    if let Some(bad) = lexemes
        .iter()
        .find(|l| l.token == Token::Error && (l.text.starts_with('\'') || l.text.starts_with('"')))
    {
        return Err(Error::syntax(bad.line, "unterminated string literal"));
    }

    let last_line = source.lines().count().max(1) as u32;
    let mut parser = Parser {
        source,
        lexemes,
        pos: 0,
        templates: Vec::new(),
    };

    let mut root = BlockNode::new(BlockKind::Suite, "", Span::new(1, last_line));
    parser.parse_body(&mut root, Closer::Eof)?;

    let templates = parser.templates;
    shared::expand(&mut root, &templates);

    Ok(SpecTree { root, templates })
}

/// What ends the block currently being parsed. Lines are where it opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Closer {
    End(u32),
    Brace(u32),
    Paren(u32),
    Bracket(u32),
    Eof,
}

impl Closer {
    fn matches(self, token: Token) -> bool {
        matches!(
            (self, token),
            (Closer::End(_), Token::End)
                | (Closer::Brace(_), Token::RBrace)
                | (Closer::Paren(_), Token::RParen)
                | (Closer::Bracket(_), Token::RBracket)
        )
    }

    fn opened_at(self) -> u32 {
        match self {
            Closer::End(line)
            | Closer::Brace(line)
            | Closer::Paren(line)
            | Closer::Bracket(line) => line,
            Closer::Eof => 0,
        }
    }

    fn describe(self) -> &'static str {
        match self {
            Closer::End(_) => "`end`",
            Closer::Brace(_) => "`}`",
            Closer::Paren(_) => "`)`",
            Closer::Bracket(_) => "`]`",
            Closer::Eof => "end of file",
        }
    }
}

/// DSL call recognized at the start of a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dsl {
    Group(BlockKind),
    Example,
    Let { eager: bool },
    Subject,
    Hook(HookKind),
    Template,
    Include { inline: bool },
}

fn dsl_for(name: &str) -> Option<Dsl> {
    let dsl = match name {
        "describe" | "xdescribe" | "fdescribe" | "feature" => Dsl::Group(BlockKind::Suite),
        "context" | "xcontext" | "fcontext" => Dsl::Group(BlockKind::Context),
        "it" | "specify" | "example" | "scenario" | "its" | "xit" | "fit" | "xspecify"
        | "pending" => Dsl::Example,
        "let" => Dsl::Let { eager: false },
        "let!" => Dsl::Let { eager: true },
        "subject" | "subject!" => Dsl::Subject,
        "before" | "prepend_before" | "append_before" => Dsl::Hook(HookKind::Before),
        "after" | "prepend_after" | "append_after" => Dsl::Hook(HookKind::After),
        "around" => Dsl::Hook(HookKind::Around),
        "shared_examples" | "shared_examples_for" | "shared_context" => Dsl::Template,
        "it_behaves_like" | "it_should_behave_like" => Dsl::Include { inline: false },
        "include_examples" | "include_context" => Dsl::Include { inline: true },
        _ => return None,
    };
    Some(dsl)
}

/// One top-level argument of a DSL call.
#[derive(Debug, Clone)]
struct Arg<'src> {
    first: Token,
    tokens: usize,
    text: &'src str,
}

impl Arg<'_> {
    fn is_string_literal(&self) -> bool {
        self.tokens == 1 && self.first == Token::Str
    }

    /// A string literal whose text is fully known (no `#{}` interpolation).
    fn is_plain_string(&self) -> bool {
        self.is_string_literal() && !(self.text.starts_with('"') && self.text.contains("#{"))
    }

    fn is_symbol(&self) -> bool {
        self.tokens == 1 && self.first == Token::Symbol
    }

    /// Name from a `:symbol` or `'string'` argument.
    fn name(&self) -> Option<String> {
        if self.is_symbol() {
            Some(self.text.trim_start_matches(':').to_string())
        } else if self.is_string_literal() {
            Some(lexer::unquote(self.text).to_string())
        } else {
            None
        }
    }
}

/// A block opened after a DSL call.
#[derive(Debug, Clone)]
struct Opened {
    closer: Closer,
    params: Vec<String>,
}

/// Where a scan stops.
#[derive(Debug, Clone, Copy)]
enum Stop {
    /// At the matching closer, which is consumed.
    Closer(Closer),
    /// At the end of the current logical line.
    Statement,
}

struct Parser<'src> {
    source: &'src str,
    lexemes: Vec<Lexeme<'src>>,
    pos: usize,
    templates: Vec<SharedTemplate>,
}

impl<'src> Parser<'src> {
    fn peek(&self) -> Option<&Lexeme<'src>> {
        self.lexemes.get(self.pos)
    }

    fn peek_token(&self) -> Option<Token> {
        self.peek().map(|l| l.token)
    }

    fn token_at(&self, pos: usize) -> Option<Token> {
        self.lexemes.get(pos).map(|l| l.token)
    }

    fn prev_token(&self) -> Option<Token> {
        self.pos.checked_sub(1).and_then(|p| self.token_at(p))
    }

    fn line(&self) -> u32 {
        self.peek()
            .or_else(|| self.lexemes.last())
            .map(|l| l.line)
            .unwrap_or(1)
    }

    fn skip_terminators(&mut self) {
        while self.peek_token().is_some_and(Token::is_terminator) {
            self.pos += 1;
        }
    }

    /// Parse block-level statements until `closer`; returns the closing line.
    fn parse_body(&mut self, node: &mut BlockNode, closer: Closer) -> Result<u32> {
        loop {
            self.skip_terminators();
            let Some(lex) = self.peek() else {
                return match closer {
                    Closer::Eof => Ok(node.span.end),
                    _ => Err(Error::syntax(
                        closer.opened_at(),
                        format!("block is never closed (expected {})", closer.describe()),
                    )),
                };
            };

            let (token, line) = (lex.token, lex.line);
            if closer.matches(token) {
                self.pos += 1;
                return Ok(line);
            }
            match token {
                Token::End | Token::RBrace | Token::RParen | Token::RBracket => {
                    return Err(Error::syntax(
                        line,
                        format!("unexpected `{}` (expected {})", lex.text, closer.describe()),
                    ));
                }
                _ => self.parse_statement(node)?,
            }
        }
    }

    fn parse_statement(&mut self, node: &mut BlockNode) -> Result<()> {
        match self.dsl_head() {
            Some((dsl, consumed)) => {
                let line = self.line();
                self.pos += consumed;
                self.parse_dsl(node, dsl, line)
            }
            None => match self.block_opener() {
                Some(opener) => self.parse_transparent(node, opener),
                None => {
                    let start = self.pos;
                    self.scan(Stop::Statement)?;
                    if let Some(statement) = self.statement(start, self.pos) {
                        node.setup.push(statement);
                    }
                    Ok(())
                }
            },
        }
    }

    /// Position of the `do`/`{` that a plain call at the cursor passes a block
    /// to, e.g. `%w[a b].each do |x|`. Keyword statements never qualify.
    fn block_opener(&self) -> Option<usize> {
        let mut depth = 0usize;

        for pos in self.pos..self.lexemes.len() {
            let token = self.lexemes[pos].token;
            let prev = pos.checked_sub(1).and_then(|p| self.token_at(p));
            let after_dot = matches!(prev, Some(Token::Dot | Token::Scope));

            match token {
                Token::Do if depth == 0 && !after_dot => return Some(pos),
                Token::LBrace if depth == 0 && self.brace_opens_block(pos) => return Some(pos),
                Token::LParen | Token::LBracket | Token::LBrace => depth += 1,
                Token::RParen | Token::RBracket | Token::RBrace if depth > 0 => depth -= 1,
                Token::End | Token::RParen | Token::RBracket | Token::RBrace => return None,
                t if (t.is_definition_keyword() || t.is_statement_keyword()) && !after_dot => {
                    return None;
                }
                Token::Newline | Token::Semi if depth == 0 => {
                    let continues = prev.is_some_and(Token::continues_line)
                        || self.lexemes[pos + 1..]
                            .iter()
                            .find(|l| !l.token.is_terminator())
                            .is_some_and(|l| l.token == Token::Dot);
                    if !continues {
                        return None;
                    }
                }
                _ => {}
            }
        }
        None
    }

    /// Parse the block of a plain call into `node`, as if its contents were
    /// written there. The call itself is kept as setup.
    fn parse_transparent(&mut self, node: &mut BlockNode, opener: usize) -> Result<()> {
        if let Some(head) = self.statement(self.pos, opener) {
            node.setup.push(head);
        }
        self.pos = opener;
        if let Some(opened) = self.open_block()? {
            self.parse_body(node, opened.closer)?;
        }
        // Calls chained onto the closer (`end.freeze`).
        self.scan(Stop::Statement)?;
        Ok(())
    }

    /// Recognize a DSL call at the cursor: `name ...` or `RSpec.name ...`.
    fn dsl_head(&self) -> Option<(Dsl, usize)> {
        let lex = self.peek()?;
        let (name_pos, consumed) = if lex.token == Token::Ident
            && lex.text == "RSpec"
            && self.token_at(self.pos + 1) == Some(Token::Dot)
        {
            (self.pos + 2, 3)
        } else {
            (self.pos, 1)
        };

        let name = self.lexemes.get(name_pos)?;
        if name.token != Token::Ident {
            return None;
        }
        let dsl = dsl_for(name.text)?;

        // `subject.call`, `it = 1` and friends are not DSL calls.
        match self.token_at(name_pos + 1) {
            Some(Token::Dot | Token::Assign | Token::Operator | Token::Scope) => None,
            _ => Some((dsl, consumed)),
        }
    }

    fn parse_dsl(&mut self, node: &mut BlockNode, dsl: Dsl, line: u32) -> Result<()> {
        let args = self.call_args()?;
        let opened = self.open_block()?;

        match dsl {
            Dsl::Group(kind) => {
                let mut child = BlockNode::new(kind, String::new(), Span::line(line));
                set_title(&mut child, args.first());
                if let Some(opened) = opened {
                    child.span.end = self.parse_body(&mut child, opened.closer)?;
                }
                node.children.push(child);
            }
            Dsl::Example => {
                let mut example = BlockNode::new(BlockKind::Example, String::new(), Span::line(line));
                set_title(&mut example, args.first());
                if let Some(opened) = opened {
                    let (body, end) = self.block_statements(opened.closer)?;
                    example.span.end = end;
                    example.matchers = matchers(&body);
                    example.body = body;
                }
                node.children.push(example);
            }
            Dsl::Let { eager } => {
                let name = args.first().and_then(Arg::name);
                match (name, opened) {
                    (Some(name), Some(opened)) => {
                        let expr = self.block_text(opened.closer)?;
                        let kind = if eager {
                            BindingKind::EagerLet
                        } else {
                            BindingKind::Let
                        };
                        node.declare(Binding {
                            name,
                            expr,
                            kind,
                            line,
                        });
                    }
                    (_, opened) => self.keep_as_setup(node, line, opened)?,
                }
            }
            Dsl::Subject => {
                let Some(opened) = opened else {
                    return Ok(());
                };
                let expr = self.block_text(opened.closer)?;
                let (name, kind) = match args.first().and_then(Arg::name) {
                    Some(name) => (name, BindingKind::NamedSubject),
                    None => (SUBJECT.to_string(), BindingKind::Subject),
                };
                node.declare(Binding {
                    name,
                    expr,
                    kind,
                    line,
                });
            }
            Dsl::Hook(kind) => match opened {
                Some(opened) => {
                    let (body, _) = self.block_statements(opened.closer)?;
                    node.hooks.push(Hook { kind, line, body });
                }
                None => self.keep_as_setup(node, line, None)?,
            },
            Dsl::Template => {
                let name = args.first().map(arg_label).unwrap_or_default();
                if let Some(opened) = opened {
                    let mut body = BlockNode::new(BlockKind::Suite, name.clone(), Span::line(line));
                    body.literal_title = true;
                    body.span.end = self.parse_body(&mut body, opened.closer)?;
                    self.templates.push(SharedTemplate {
                        name,
                        params: opened.params,
                        body,
                    });
                }
            }
            Dsl::Include { inline } => {
                if let Some(opened) = opened {
                    // Customization blocks are balanced but not interpreted.
                    self.scan(Stop::Closer(opened.closer))?;
                }
                match args.split_first() {
                    Some((first, rest)) => node.includes_pending.push((
                        node.children.len(),
                        Include {
                            name: arg_label(first),
                            args: rest.iter().map(|a| a.text.to_string()).collect(),
                            line,
                            inline,
                        },
                    )),
                    None => tracing::debug!("line {}: shared example include without a name", line),
                }
            }
        }
        Ok(())
    }

    /// Record an unrecognized DSL form as plain setup.
    fn keep_as_setup(&mut self, node: &mut BlockNode, line: u32, opened: Option<Opened>) -> Result<()> {
        if let Some(opened) = opened {
            self.scan(Stop::Closer(opened.closer))?;
        }
        node.setup.push(Statement {
            line,
            text: self.line_text(line),
        });
        Ok(())
    }

    /// Collect top-level call arguments up to a block opener or end of line.
    fn call_args(&mut self) -> Result<Vec<Arg<'src>>> {
        let mut args: Vec<Arg<'src>> = Vec::new();
        let mut current: Option<(usize, usize, Token, usize)> = None; // start, end, first, count
        let mut depth: Vec<Closer> = Vec::new();

        let parenthesized = self.peek_token() == Some(Token::LParen) && self.adjacent_to_prev();
        if parenthesized {
            self.pos += 1;
        }
        let mut in_parens = parenthesized;

        let finish = |current: &mut Option<(usize, usize, Token, usize)>, args: &mut Vec<Arg<'src>>, source: &'src str| {
            if let Some((start, end, first, tokens)) = current.take() {
                args.push(Arg {
                    first,
                    tokens,
                    text: source[start..end].trim(),
                });
            }
        };

        while let Some(lex) = self.peek() {
            let (token, line) = (lex.token, lex.line);
            let span = lex.span.clone();

            if depth.is_empty() {
                match token {
                    Token::RParen if in_parens => {
                        self.pos += 1;
                        in_parens = false;
                        finish(&mut current, &mut args, self.source);
                        continue;
                    }
                    Token::Newline | Token::Semi if in_parens => {
                        self.pos += 1;
                        continue;
                    }
                    Token::Newline | Token::Semi => {
                        if self.prev_token().is_some_and(Token::continues_line) {
                            self.pos += 1;
                            continue;
                        }
                        break;
                    }
                    Token::Comma => {
                        finish(&mut current, &mut args, self.source);
                        self.pos += 1;
                        continue;
                    }
                    Token::Do if !in_parens => break,
                    Token::LBrace if !in_parens && self.brace_opens_block(self.pos) => break,
                    Token::End | Token::RBrace | Token::RParen | Token::RBracket => break,
                    _ => {}
                }
            }

            match token {
                Token::LParen => depth.push(Closer::Paren(line)),
                Token::LBracket => depth.push(Closer::Bracket(line)),
                Token::LBrace => depth.push(Closer::Brace(line)),
                Token::RParen | Token::RBracket | Token::RBrace => match depth.pop() {
                    Some(open) if open.matches(token) => {}
                    Some(open) => {
                        return Err(Error::syntax(
                            line,
                            format!("mismatched `{}` (expected {})", lex.text, open.describe()),
                        ));
                    }
                    None => {}
                },
                _ => {}
            }

            match current.as_mut() {
                Some(arg) => {
                    arg.1 = span.end;
                    arg.3 += 1;
                }
                None => current = Some((span.start, span.end, token, 1)),
            }
            self.pos += 1;
        }

        if in_parens {
            return Err(Error::syntax(self.line(), "argument list is never closed"));
        }
        if let Some(open) = depth.last() {
            return Err(Error::syntax(
                open.opened_at(),
                format!("block is never closed (expected {})", open.describe()),
            ));
        }
        finish(&mut current, &mut args, self.source);
        Ok(args)
    }

    /// Whether the cursor token starts immediately after the previous token.
    fn adjacent_to_prev(&self) -> bool {
        match (self.pos.checked_sub(1).and_then(|p| self.lexemes.get(p)), self.peek()) {
            (Some(prev), Some(cur)) => prev.span.end == cur.span.start,
            _ => false,
        }
    }

    /// `{` at `pos` after a call is a block unless it follows a separator
    /// (then it is a hash).
    fn brace_opens_block(&self, pos: usize) -> bool {
        matches!(
            pos.checked_sub(1).and_then(|p| self.token_at(p)),
            Some(
                Token::Ident
                    | Token::RParen
                    | Token::Str
                    | Token::Symbol
                    | Token::RBracket
                    | Token::Number
            )
        )
    }

    /// Consume a `do`/`{` opener and its `|params|`, if present.
    fn open_block(&mut self) -> Result<Option<Opened>> {
        let Some(lex) = self.peek() else {
            return Ok(None);
        };
        let closer = match lex.token {
            Token::Do => Closer::End(lex.line),
            Token::LBrace => Closer::Brace(lex.line),
            _ => return Ok(None),
        };
        self.pos += 1;

        let mut params = Vec::new();
        if self.peek_token() == Some(Token::Pipe) {
            self.pos += 1;
            loop {
                match self.peek() {
                    Some(l) if l.token == Token::Pipe => {
                        self.pos += 1;
                        break;
                    }
                    Some(l) => {
                        if l.token == Token::Ident {
                            params.push(l.text.to_string());
                        }
                        self.pos += 1;
                    }
                    None => {
                        return Err(Error::syntax(
                            closer.opened_at(),
                            "block parameter list is never closed",
                        ));
                    }
                }
            }
        }

        Ok(Some(Opened { closer, params }))
    }

    /// Consume a block and return its body as logical statements plus the closing line.
    fn block_statements(&mut self, closer: Closer) -> Result<(Vec<Statement>, u32)> {
        let start = self.pos;
        let end_line = self.scan(Stop::Closer(closer))?;
        // `self.pos` is one past the closer.
        Ok((self.split_statements(start, self.pos - 1), end_line))
    }

    /// Consume a block and return its inner source text.
    fn block_text(&mut self, closer: Closer) -> Result<String> {
        let start = self.pos;
        self.scan(Stop::Closer(closer))?;
        Ok(self
            .slice(start, self.pos - 1)
            .map(|s| s.trim().to_string())
            .unwrap_or_default())
    }

    /// Advance past balanced tokens until `stop`; returns the last line consumed.
    fn scan(&mut self, stop: Stop) -> Result<u32> {
        let mut stack: Vec<Closer> = Vec::new();
        let mut loop_do_line: Option<u32> = None;

        loop {
            let Some(lex) = self.peek() else {
                return match (stop, stack.last()) {
                    (_, Some(open)) => Err(Error::syntax(
                        open.opened_at(),
                        format!("block is never closed (expected {})", open.describe()),
                    )),
                    (Stop::Closer(closer), None) => Err(Error::syntax(
                        closer.opened_at(),
                        format!("block is never closed (expected {})", closer.describe()),
                    )),
                    (Stop::Statement, None) => Ok(self.line()),
                };
            };
            let (token, line) = (lex.token, lex.line);
            let prev = self.prev_token();
            let after_dot = matches!(prev, Some(Token::Dot | Token::Scope));
            let as_label = self.token_at(self.pos + 1) == Some(Token::Colon)
                && self.lexemes.get(self.pos + 1).map(|l| l.span.start) == Some(lex.span.end);

            match token {
                Token::End | Token::RBrace | Token::RParen | Token::RBracket
                    if !(token == Token::End && after_dot) =>
                {
                    if let Some(open) = stack.last().copied() {
                        if !open.matches(token) {
                            return Err(Error::syntax(
                                line,
                                format!("mismatched `{}` (expected {})", lex.text, open.describe()),
                            ));
                        }
                        stack.pop();
                    } else {
                        return match stop {
                            Stop::Closer(closer) if closer.matches(token) => {
                                self.pos += 1;
                                Ok(line)
                            }
                            // The enclosing block closes on this line.
                            Stop::Statement => Ok(line),
                            Stop::Closer(closer) => Err(Error::syntax(
                                line,
                                format!("unexpected `{}` (expected {})", lex.text, closer.describe()),
                            )),
                        };
                    }
                }
                Token::Newline | Token::Semi if stack.is_empty() => {
                    loop_do_line = None;
                    if let Stop::Statement = stop
                        && !prev.is_some_and(Token::continues_line)
                        && !self.next_line_continues()
                    {
                        return Ok(line);
                    }
                }
                Token::Do if !after_dot => {
                    if loop_do_line == Some(line) {
                        loop_do_line = None;
                    } else {
                        stack.push(Closer::End(line));
                    }
                }
                Token::LBrace => stack.push(Closer::Brace(line)),
                Token::LParen => stack.push(Closer::Paren(line)),
                Token::LBracket => stack.push(Closer::Bracket(line)),
                t if t.is_definition_keyword() && !after_dot && !as_label => {
                    stack.push(Closer::End(line));
                }
                t if t.is_statement_keyword()
                    && !after_dot
                    && !as_label
                    && starts_expression(prev) =>
                {
                    stack.push(Closer::End(line));
                    if matches!(t, Token::While | Token::Until | Token::For) {
                        loop_do_line = Some(line);
                    }
                }
                _ => {}
            }
            self.pos += 1;
        }
    }

    /// Whether the next non-blank line starts with `.` (a chained call).
    fn next_line_continues(&self) -> bool {
        self.lexemes[self.pos + 1..]
            .iter()
            .find(|l| !l.token.is_terminator())
            .is_some_and(|l| l.token == Token::Dot)
    }

    /// Source text spanning lexemes `[from, to)`.
    fn slice(&self, from: usize, to: usize) -> Option<&'src str> {
        if from >= to {
            return None;
        }
        let start = self.lexemes.get(from)?.span.start;
        let end = self.lexemes.get(to - 1)?.span.end;
        Some(&self.source[start..end])
    }

    fn statement(&self, from: usize, to: usize) -> Option<Statement> {
        let text = self.slice(from, to)?.trim();
        if text.is_empty() {
            return None;
        }
        Some(Statement {
            line: self.lexemes.get(from)?.line,
            text: text.to_string(),
        })
    }

    /// Full text of a source line, trimmed.
    fn line_text(&self, line: u32) -> String {
        self.source
            .lines()
            .nth(line.saturating_sub(1) as usize)
            .unwrap_or_default()
            .trim()
            .to_string()
    }

    /// Split lexemes `[from, to)` into logical statements.
    fn split_statements(&self, from: usize, to: usize) -> Vec<Statement> {
        let mut statements = Vec::new();
        let mut depth = 0usize;
        let mut start = from;
        let mut loop_do_line: Option<u32> = None;

        for pos in from..to {
            let lex = &self.lexemes[pos];
            let prev = pos.checked_sub(1).and_then(|p| self.token_at(p));
            let after_dot = matches!(prev, Some(Token::Dot | Token::Scope));
            match lex.token {
                Token::Do if loop_do_line == Some(lex.line) => loop_do_line = None,
                Token::LParen | Token::LBracket | Token::LBrace | Token::Do => depth += 1,
                Token::RParen | Token::RBracket | Token::RBrace => depth = depth.saturating_sub(1),
                Token::End if !after_dot => depth = depth.saturating_sub(1),
                t if t.is_definition_keyword() && !after_dot => depth += 1,
                t if t.is_statement_keyword() && !after_dot && starts_expression(prev) => {
                    depth += 1;
                    if matches!(t, Token::While | Token::Until | Token::For) {
                        loop_do_line = Some(lex.line);
                    }
                }
                Token::Newline | Token::Semi if depth == 0 => {
                    let continues = prev.is_some_and(Token::continues_line)
                        || self.lexemes[pos + 1..to]
                            .iter()
                            .find(|l| !l.token.is_terminator())
                            .is_some_and(|l| l.token == Token::Dot);
                    if !continues {
                        statements.extend(self.statement(start, pos));
                        start = pos + 1;
                    }
                }
                _ => {}
            }
        }
        statements.extend(self.statement(start, to));
        statements
    }
}

/// Whether a keyword after `prev` begins a statement rather than a modifier.
fn starts_expression(prev: Option<Token>) -> bool {
    match prev {
        None => true,
        Some(t) => matches!(
            t,
            Token::Newline
                | Token::Semi
                | Token::Assign
                | Token::LParen
                | Token::LBracket
                | Token::LBrace
                | Token::Comma
                | Token::Operator
                | Token::Rocket
                | Token::Pipe
                | Token::Do
        ),
    }
}

/// Template name from a string, symbol or constant argument.
fn arg_label(arg: &Arg<'_>) -> String {
    arg.name().unwrap_or_else(|| arg.text.to_string())
}

fn set_title(node: &mut BlockNode, arg: Option<&Arg<'_>>) {
    if let Some(arg) = arg {
        node.literal_title = arg.is_plain_string();
        node.title = if arg.is_string_literal() {
            lexer::unquote(arg.text).to_string()
        } else {
            arg.text.to_string()
        };
    }
}

/// Matcher names used across statements, in order of appearance.
fn matchers(body: &[Statement]) -> Vec<String> {
    body.iter()
        .flat_map(|s| {
            MATCHER_PATTERN
                .captures_iter(&s.text)
                .map(|c| c[1].to_string())
                .collect::<Vec<_>>()
        })
        .collect()
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
