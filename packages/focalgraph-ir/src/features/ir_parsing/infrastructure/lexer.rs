//! Line tokenizer for LLVM textual IR
//!
//! Splits one logical instruction line into words, free-standing strings and
//! single punctuation characters. The lexemes come from a logos-generated
//! lexer; every token keeps its byte span, so readers can hand back the exact
//! source slice of whatever they consumed.

use logos::Logos;

use crate::features::ir_parsing::domain::{ParseError, ParseResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Keywords, numbers and sigiled names (`%x`, `@"q"`, `!12`, `#0`, `c"..."`)
    Word,
    /// Free-standing quoted string (`"deopt"`, `".text.startup"`)
    Str,
    Punct(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub start: usize,
    pub end: usize,
}

impl<'a> Token<'a> {
    pub fn is_punct(&self, c: char) -> bool {
        self.kind == TokenKind::Punct(c)
    }

    pub fn is_word(&self) -> bool {
        self.kind == TokenKind::Word
    }
}

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip r";[^\n]*")]
enum Lexeme {
    // quoted names: %"class.std::a", @"f", !"s"
    #[regex(r#"[%@!#]"[^"]*""#)]
    #[regex(r#"c"[^"]*""#)]
    #[regex(r"[%@!#][A-Za-z0-9_.$+\-\u{80}-\u{10FFFF}]*")]
    #[regex(r"[A-Za-z0-9_.$+\-\u{80}-\u{10FFFF}]+")]
    Word,

    #[regex(r#""[^"]*""#)]
    Str,

    #[regex(r#"[^ \t\r\n\f%@!#"A-Za-z0-9_.$+\-\u{80}-\u{10FFFF};]"#)]
    Punct,
}

/// Tokenize a single logical line
pub fn tokenize(line: &str) -> ParseResult<Vec<Token<'_>>> {
    let mut tokens = Vec::new();
    for (lexeme, span) in Lexeme::lexer(line).spanned() {
        let text = &line[span.clone()];
        let kind = match lexeme {
            Ok(Lexeme::Word) => TokenKind::Word,
            Ok(Lexeme::Str) => TokenKind::Str,
            Ok(Lexeme::Punct) => TokenKind::Punct(text.chars().next().unwrap_or_default()),
            // every other character lexes; only an unclosed quote is left
            Err(()) => {
                return Err(ParseError::UnterminatedString {
                    line: line.to_string(),
                })
            }
        };
        tokens.push(Token {
            kind,
            text,
            start: span.start,
            end: span.end,
        });
    }
    Ok(tokens)
}

fn closing_for(text: &str) -> Option<&'static str> {
    match text {
        "(" => Some(")"),
        "[" => Some("]"),
        "{" => Some("}"),
        "<" => Some(">"),
        _ => None,
    }
}

fn is_closing(text: &str) -> bool {
    matches!(text, ")" | "]" | "}" | ">")
}

// ═══════════════════════════════════════════════════════════════════════════
// TokenStream
// ═══════════════════════════════════════════════════════════════════════════

/// Cursor over the tokens of one line
///
/// Readers consume from the front; `position`/`reset` give cheap backtracking
/// for the few places where IR needs a second look (typed vs untyped operands).
#[derive(Debug, Clone)]
pub struct TokenStream<'a> {
    source: &'a str,
    tokens: Vec<Token<'a>>,
    pos: usize,
}

impl<'a> TokenStream<'a> {
    pub fn new(source: &'a str) -> ParseResult<Self> {
        Ok(Self {
            source,
            tokens: tokenize(source)?,
            pos: 0,
        })
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    pub fn is_empty(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn reset(&mut self, mark: usize) {
        self.pos = mark.min(self.tokens.len());
    }

    pub fn peek(&self) -> Option<Token<'a>> {
        self.tokens.get(self.pos).copied()
    }

    pub fn peek_nth(&self, n: usize) -> Option<Token<'a>> {
        self.tokens.get(self.pos + n).copied()
    }

    pub fn peek_text(&self) -> Option<&'a str> {
        self.peek().map(|t| t.text)
    }

    pub fn peek_is(&self, text: &str) -> bool {
        self.peek_text() == Some(text)
    }

    pub fn peek_nth_is(&self, n: usize, text: &str) -> bool {
        self.peek_nth(n).map(|t| t.text) == Some(text)
    }

    pub fn advance(&mut self) -> Option<Token<'a>> {
        let token = self.peek()?;
        self.pos += 1;
        Some(token)
    }

    /// Consume the next token, whatever it is
    pub fn next_token(&mut self, expected: &'static str) -> ParseResult<Token<'a>> {
        self.advance()
            .ok_or(ParseError::UnexpectedEnd { expected })
    }

    /// Consume the next token if its text equals `text`
    pub fn expect(&mut self, text: &str, expected: &'static str) -> ParseResult<Token<'a>> {
        match self.peek() {
            Some(token) if token.text == text => {
                self.pos += 1;
                Ok(token)
            }
            Some(token) => Err(ParseError::unexpected(expected, token.text)),
            None => Err(ParseError::UnexpectedEnd { expected }),
        }
    }

    pub fn eat(&mut self, text: &str) -> bool {
        if self.peek_is(text) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Source text covered by the tokens consumed since `mark`
    pub fn text_since(&self, mark: usize) -> &'a str {
        if mark >= self.pos || mark >= self.tokens.len() {
            return "";
        }
        let start = self.tokens[mark].start;
        let end = self.tokens[self.pos - 1].end;
        &self.source[start..end]
    }

    /// Unconsumed source text
    pub fn remaining_text(&self) -> &'a str {
        match self.peek() {
            Some(token) => self.source[token.start..].trim_end(),
            None => "",
        }
    }

    /// Consume a bracketed group, nested groups included; the stream must sit
    /// on an opening bracket.
    pub fn skip_balanced(&mut self) -> ParseResult<&'a str> {
        let mark = self.pos;
        let open = self.next_token("opening bracket")?;
        let close = match closing_for(open.text) {
            Some(close) if !open.is_word() => close,
            _ => return Err(ParseError::unexpected("opening bracket", open.text)),
        };

        let mut stack = vec![close];
        while let Some(&wanted) = stack.last() {
            let token = self.advance().ok_or_else(|| ParseError::Unbalanced {
                open: open.text.to_string(),
                line: self.source.to_string(),
            })?;
            if !matches!(token.kind, TokenKind::Punct(_)) {
                continue;
            }
            if let Some(nested) = closing_for(token.text) {
                stack.push(nested);
            } else if token.text == wanted {
                stack.pop();
            } else if is_closing(token.text) {
                return Err(ParseError::Unbalanced {
                    open: open.text.to_string(),
                    line: self.source.to_string(),
                });
            }
        }

        Ok(self.text_since(mark))
    }

    /// Error unless every token was consumed
    pub fn finish(&self, context: &'static str) -> ParseResult<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(ParseError::TrailingTokens {
                context,
                remaining: self.remaining_text().to_string(),
            })
        }
    }
}
