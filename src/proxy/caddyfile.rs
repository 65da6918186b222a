//! Caddyfile canonicalization.
//!
//! # Rules
//! - One directive per line, tokens separated by a single space
//! - Indentation is one tab per block level
//! - `{` opens a block only as a standalone token at the end of a line;
//!   `{host}`-style placeholders stay part of their token
//! - `}` at the start of a token closes a block and always sits on its own
//!   line, so `}next.example.com {` is split in two
//! - At most one blank line in a row, none right after `{` or before `}`
//! - Quoted strings and comments are copied verbatim
//! - Heredoc bodies (`<<MARKER` up to the closing `MARKER` line) are copied
//!   verbatim, braces included
//!
//! Unbalanced braces and unterminated quotes are rejected, which keeps a
//! broken document from ever reaching the admin API.

use std::iter::Peekable;
use std::str::Chars;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("unexpected '}}' on line {line} with no open block")]
    UnexpectedClose { line: usize },

    #[error("block opened on line {line} is never closed")]
    UnclosedBlock { line: usize },

    #[error("unterminated quoted string starting on line {line}")]
    UnterminatedQuote { line: usize },

    #[error("heredoc opened on line {line} has no closing marker")]
    UnterminatedHeredoc { line: usize },
}

#[derive(Default)]
struct Formatter {
    out: Vec<String>,
    tokens: Vec<String>,
    token: String,
    depth: usize,
    open_lines: Vec<usize>,
    pending_blank: bool,
    line_emitted: bool,
}

impl Formatter {
    fn at_token_start(&self) -> bool {
        self.token.is_empty()
    }

    fn finish_token(&mut self) {
        if !self.token.is_empty() {
            self.tokens.push(std::mem::take(&mut self.token));
        }
    }

    fn emit(&mut self, text: String) {
        if self.pending_blank && !self.out.is_empty() {
            self.out.push(String::new());
        }
        self.pending_blank = false;
        self.line_emitted = true;
        let mut line = "\t".repeat(self.depth);
        line.push_str(&text);
        self.out.push(line);
    }

    fn flush_line(&mut self) {
        self.finish_token();
        if !self.tokens.is_empty() {
            let text = std::mem::take(&mut self.tokens).join(" ");
            self.emit(text);
        }
    }

    fn end_line(&mut self) {
        self.finish_token();
        if !self.tokens.is_empty() {
            self.flush_line();
        } else if !self.line_emitted {
            let after_open = self.out.last().is_some_and(|l| l.ends_with('{'));
            if !self.out.is_empty() && !after_open {
                self.pending_blank = true;
            }
        }
        self.line_emitted = false;
    }

    fn open(&mut self, line: usize) {
        self.finish_token();
        self.tokens.push("{".to_string());
        self.flush_line();
        self.depth += 1;
        self.open_lines.push(line);
    }

    fn close(&mut self, line: usize) -> Result<(), FormatError> {
        self.flush_line();
        if self.depth == 0 {
            return Err(FormatError::UnexpectedClose { line });
        }
        self.depth -= 1;
        self.open_lines.pop();
        self.pending_blank = false;
        self.emit("}".to_string());
        Ok(())
    }

    fn finish(mut self) -> Result<String, FormatError> {
        self.flush_line();
        if let Some(&line) = self.open_lines.last() {
            return Err(FormatError::UnclosedBlock { line });
        }
        if self.out.is_empty() {
            return Ok(String::new());
        }
        let mut document = self.out.join("\n");
        document.push('\n');
        Ok(document)
    }
}

/// Consume a heredoc whose first `<` was already read.
///
/// Returns the raw text from `<<` through the closing marker, leaving any
/// tokens after the marker on that line in `chars`. Returns `None` when the
/// `<<` is not followed by a marker and a line break.
fn take_heredoc(
    chars: &mut Peekable<Chars<'_>>,
    line: &mut usize,
) -> Result<Option<String>, FormatError> {
    let start_line = *line;
    let marker: String = chars.clone().skip(1).take_while(|&c| c != '\n').collect();
    let valid = !marker.is_empty()
        && marker.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if !valid {
        return Ok(None);
    }

    let mut text = format!("<<{marker}");
    chars.nth(marker.len());

    loop {
        match chars.next() {
            Some('\n') => {
                *line += 1;
                text.push('\n');
            }
            _ => return Err(FormatError::UnterminatedHeredoc { line: start_line }),
        }

        let rest: String = chars.clone().take_while(|&c| c != '\n').collect();
        let body = rest.trim_start_matches([' ', '\t']);
        let closes = body
            .strip_prefix(marker.as_str())
            .is_some_and(|after| after.is_empty() || after.starts_with(char::is_whitespace));
        if closes {
            let consumed = rest.len() - body.len() + marker.len();
            text.extend(chars.by_ref().take(consumed));
            return Ok(Some(text));
        }

        text.push_str(&rest);
        for _ in rest.chars() {
            chars.next();
        }
    }
}

/// Reformat `input` into canonical Caddyfile syntax.
pub fn format(input: &str) -> Result<String, FormatError> {
    let mut fmt = Formatter::default();
    let mut chars = input.chars().peekable();
    let mut line = 1;

    while let Some(ch) = chars.next() {
        match ch {
            '\n' => {
                fmt.end_line();
                line += 1;
            }
            c if c.is_whitespace() => fmt.finish_token(),
            '"' | '`' => {
                let start_line = line;
                fmt.token.push(ch);
                let mut escaped = false;
                let mut closed = false;
                for c in chars.by_ref() {
                    fmt.token.push(c);
                    if c == '\n' {
                        line += 1;
                    }
                    if escaped {
                        escaped = false;
                    } else if c == '\\' && ch == '"' {
                        escaped = true;
                    } else if c == ch {
                        closed = true;
                        break;
                    }
                }
                if !closed {
                    return Err(FormatError::UnterminatedQuote { line: start_line });
                }
            }
            '#' if fmt.at_token_start() => {
                fmt.token.push('#');
                while let Some(&c) = chars.peek() {
                    if c == '\n' {
                        break;
                    }
                    fmt.token.push(c);
                    chars.next();
                }
                let trimmed = fmt.token.trim_end().len();
                fmt.token.truncate(trimmed);
            }
            '<' if fmt.at_token_start() && chars.peek() == Some(&'<') => {
                match take_heredoc(&mut chars, &mut line)? {
                    Some(heredoc) => fmt.token.push_str(&heredoc),
                    None => fmt.token.push('<'),
                }
            }
            '{' if fmt.at_token_start() && chars.peek().map_or(true, |c| c.is_whitespace()) => {
                fmt.open(line);
            }
            '}' if fmt.at_token_start() => fmt.close(line)?,
            c => fmt.token.push(c),
        }
    }

    fmt.finish()
}
