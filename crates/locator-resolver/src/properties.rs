// SPDX-FileCopyrightText: 2026 Locator Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Parser for `.properties` files.
//!
//! Supported syntax:
//! - `key=value`, `key:value`, and `key value` entries;
//! - `#` and `!` comment lines;
//! - a trailing odd run of backslashes continues the entry on the next line,
//!   whose leading whitespace is dropped;
//! - `\t`, `\n`, `\r`, `\f`, `\uXXXX` (with surrogate pairs) and `\<char>`
//!   escapes in keys and values.
//!
//! Later entries replace earlier ones with the same key.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use thiserror::Error;

const WHITESPACE: [char; 3] = [' ', '\t', '\x0c'];

/// A malformed line in a properties file.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("line {line}: {message}")]
pub struct ParseError {
    /// 1-based line where the offending entry starts.
    pub line: usize,
    /// What is wrong with it.
    pub message: String,
}

/// Parsed key/value pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    entries: HashMap<String, String>,
}

impl Properties {
    /// Parse properties from text.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let mut properties = Properties::default();
        let normalized = input.replace("\r\n", "\n");

        let mut logical = String::new();
        let mut start_line = 0;
        let mut continuing = false;

        for (index, natural) in normalized.split(['\n', '\r']).enumerate() {
            let trimmed = natural.trim_start_matches(WHITESPACE);
            if !continuing {
                if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
                    continue;
                }
                start_line = index + 1;
            }

            let (body, continues) = strip_continuation(trimmed);
            logical.push_str(body);
            if continues {
                continuing = true;
                continue;
            }

            continuing = false;
            properties.insert_entry(&logical, start_line)?;
            logical.clear();
        }

        if continuing && !logical.is_empty() {
            properties.insert_entry(&logical, start_line)?;
        }

        Ok(properties)
    }

    /// Read and parse a file. Bytes are decoded as ISO-8859-1, so non-Latin
    /// characters must be written as `\uXXXX` escapes.
    pub fn load(path: &Path) -> Result<Self, PropertiesError> {
        let mut bytes = Vec::new();
        File::open(path)?.read_to_end(&mut bytes)?;
        let text: String = bytes.iter().map(|&b| char::from(b)).collect();
        Ok(Self::parse(&text)?)
    }

    /// Value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Set `key`, replacing any earlier value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all entries in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn insert_entry(&mut self, line: &str, line_number: usize) -> Result<(), ParseError> {
        let (key, value) = split_entry(line);
        let key = unescape(key, line_number)?;
        let value = unescape(value, line_number)?;
        self.entries.insert(key, value);
        Ok(())
    }
}

/// Failure to load a properties file from disk.
#[derive(Debug, Error)]
pub enum PropertiesError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Drop a continuation backslash. Only an odd run of trailing backslashes
/// continues the line; an even run is a sequence of escaped backslashes.
fn strip_continuation(line: &str) -> (&str, bool) {
    let trailing = line.chars().rev().take_while(|&c| c == '\\').count();
    if trailing % 2 == 1 {
        (&line[..line.len() - 1], true)
    } else {
        (line, false)
    }
}

/// Split a logical line into raw (still escaped) key and value.
fn split_entry(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut split = None;

    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => {
                split = Some((i, true));
                break;
            }
            c if WHITESPACE.contains(&c) => {
                split = Some((i, false));
                break;
            }
            _ => {}
        }
    }

    let Some((at, explicit)) = split else {
        return (line, "");
    };

    let key = &line[..at];
    let rest = line[at + 1..].trim_start_matches(WHITESPACE);
    let value = if explicit {
        rest
    } else {
        rest.strip_prefix(['=', ':'])
            .map(|r| r.trim_start_matches(WHITESPACE))
            .unwrap_or(rest)
    };
    (key, value)
}

fn unescape(raw: &str, line: usize) -> Result<String, ParseError> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\x0c'),
            Some('u') => {
                let unit = read_code_unit(&mut chars, line)?;
                if (0xD800..0xDC00).contains(&unit) {
                    let low = match (chars.next(), chars.next()) {
                        (Some('\\'), Some('u')) => read_code_unit(&mut chars, line)?,
                        _ => return Err(malformed(line, "unpaired surrogate in \\uxxxx escape")),
                    };
                    if !(0xDC00..0xE000).contains(&low) {
                        return Err(malformed(line, "unpaired surrogate in \\uxxxx escape"));
                    }
                    let combined = 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
                    out.push(
                        char::from_u32(combined)
                            .ok_or_else(|| malformed(line, "invalid \\uxxxx escape"))?,
                    );
                } else {
                    out.push(
                        char::from_u32(unit)
                            .ok_or_else(|| malformed(line, "unpaired surrogate in \\uxxxx escape"))?,
                    );
                }
            }
            Some(other) => out.push(other),
            None => {}
        }
    }

    Ok(out)
}

fn read_code_unit(chars: &mut std::str::Chars<'_>, line: usize) -> Result<u32, ParseError> {
    let hex: String = chars.by_ref().take(4).collect();
    if hex.len() != 4 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(malformed(line, "malformed \\uxxxx encoding"));
    }
    u32::from_str_radix(&hex, 16).map_err(|_| malformed(line, "malformed \\uxxxx encoding"))
}

fn malformed(line: usize, message: &str) -> ParseError {
    ParseError {
        line,
        message: message.to_string(),
    }
}
