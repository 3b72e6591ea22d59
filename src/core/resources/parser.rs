//! `.strings` table parser.
//!
//! The format is regular, so this is a small state machine over characters:
//! whitespace is skipped between items, `/* ... */` comments accumulate, and
//! each `"key" = "value";` pair takes the accumulated comments with it.

use thiserror::Error;

use super::table::ResourceRecord;
use crate::core::symbols::EMPTY_COMMENT;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("expected `{expected}`, found `{found}`")]
    UnexpectedToken { expected: &'static str, found: char },
    #[error("expected `{expected}`, found end of file")]
    MissingToken { expected: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {cause}")]
pub struct ResourceParseError {
    pub cause: TokenError,
    pub line: usize,
    /// Records completed before the failure.
    pub encountered: Vec<ResourceRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    SkipWhitespace,
    Comment,
    Pair,
}

pub struct StringsParser<'a> {
    input: &'a str,
    pos: usize,
    line: usize,
}

impl<'a> StringsParser<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            line: 1,
        }
    }

    pub fn parse(mut self) -> Result<Vec<ResourceRecord>, ResourceParseError> {
        let mut records = Vec::new();
        let mut comments: Vec<String> = Vec::new();
        let mut state = State::SkipWhitespace;

        loop {
            let step = match state {
                State::SkipWhitespace => {
                    self.skip_whitespace();
                    match self.peek() {
                        None => break,
                        Some('"') => Ok(State::Pair),
                        Some('/') if self.rest().starts_with("/*") => Ok(State::Comment),
                        Some(found) => Err(TokenError::UnexpectedToken {
                            expected: "\"",
                            found,
                        }),
                    }
                }
                State::Comment => self.comment().map(|text| {
                    comments.push(text);
                    State::SkipWhitespace
                }),
                State::Pair => self.pair().map(|(key, value)| {
                    let text = comments.concat();
                    let comment = if text.trim().is_empty() {
                        EMPTY_COMMENT.to_string()
                    } else {
                        format!("/*{}*/", text)
                    };
                    comments.clear();
                    records.push(ResourceRecord {
                        key,
                        value,
                        comment,
                    });
                    State::SkipWhitespace
                }),
            };
            match step {
                Ok(next) => state = next,
                Err(cause) => {
                    return Err(ResourceParseError {
                        cause,
                        line: self.line,
                        encountered: records,
                    });
                }
            }
        }
        Ok(records)
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        if c == '\n' {
            self.line += 1;
        }
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    /// Skip whitespace, then require `token` literally.
    fn expect(&mut self, token: &'static str) -> Result<(), TokenError> {
        self.skip_whitespace();
        if self.rest().starts_with(token) {
            for _ in token.chars() {
                self.bump();
            }
            return Ok(());
        }
        match self.peek() {
            Some(found) => Err(TokenError::UnexpectedToken {
                expected: token,
                found,
            }),
            None => Err(TokenError::MissingToken { expected: token }),
        }
    }

    /// Inner text of a `/* ... */` comment.
    fn comment(&mut self) -> Result<String, TokenError> {
        self.expect("/*")?;
        let start = self.pos;
        loop {
            if self.rest().starts_with("*/") {
                let text = self.input[start..self.pos].to_string();
                self.expect("*/")?;
                return Ok(text);
            }
            if self.bump().is_none() {
                return Err(TokenError::MissingToken { expected: "*/" });
            }
        }
    }

    fn pair(&mut self) -> Result<(String, String), TokenError> {
        let key = self.quoted()?;
        self.expect("=")?;
        let value = self.quoted()?;
        self.expect(";")?;
        Ok((key, value))
    }

    /// A quoted segment; escape sequences are kept verbatim.
    fn quoted(&mut self) -> Result<String, TokenError> {
        self.expect("\"")?;
        let start = self.pos;
        loop {
            match self.peek() {
                None => return Err(TokenError::MissingToken { expected: "\"" }),
                Some('"') => {
                    let text = self.input[start..self.pos].to_string();
                    self.bump();
                    return Ok(text);
                }
                Some('\\') => {
                    self.bump();
                    if self.bump().is_none() {
                        return Err(TokenError::MissingToken { expected: "\"" });
                    }
                }
                Some(_) => {
                    self.bump();
                }
            }
        }
    }
}

/// Parse a `.strings` table.
pub fn parse_strings(input: &str) -> Result<Vec<ResourceRecord>, ResourceParseError> {
    StringsParser::new(input).parse()
}
