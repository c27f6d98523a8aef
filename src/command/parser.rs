//! Line tokenizer for the command shell.
//!
//! Tokens are whitespace-separated; a token opening with `"` runs to the
//! closing quote and may embed spaces (recipient names).

use crate::core::{Date, Result};

pub fn tokenize(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut chars = line.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }
        let mut token = String::new();
        if c == '"' {
            chars.next();
            for c in chars.by_ref() {
                if c == '"' {
                    break;
                }
                token.push(c);
            }
        } else {
            while let Some(&c) = chars.peek() {
                if c.is_whitespace() {
                    break;
                }
                token.push(c);
                chars.next();
            }
        }
        tokens.push(token);
    }
    tokens
}

/// Parses a `d-m-y` token. Shape errors surface as `invalid date`.
pub fn parse_date(token: &str) -> Result<Date> {
    token.parse()
}
