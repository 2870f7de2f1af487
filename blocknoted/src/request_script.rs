//! # Request Script Parser
//!
//! Line-based request scripts for deterministic replay and demos.
//!
//! ## Format
//!
//! Each line is one request:
//! - `create <type> [data]` - Create a block in the script's note
//! - `op <block> <op_name> [data]` - Run an op on a block
//! - `first <block>` - Plain-text preview
//! - `change_type <block> <new_type>` - Convert a block
//! - `get <block>` - Fetch the block record
//! - `types` - List registered type tags
//! - Comments: `# This is a comment`
//!
//! `data` is a JSON object and defaults to `{}`. A `<block>` is `$` for the
//! most recently created block, `$N` for the N-th created block (from 1), or
//! a literal block UUID.
//!
//! ## Example
//!
//! ```text
//! create header {"level": 1}
//! op $ insert_text {"pos": 0, "new_text": "Shopping"}
//! create list {"type": "todo"}
//! op $2 insert_text {"pos": 0, "new_text": "milk"}
//! change_type $1 quote
//! first $1
//! ```

use core_types::BlockId;
use rich_text::DataMap;
use serde_json::Value;
use std::collections::VecDeque;
use thiserror::Error;
use uuid::Uuid;

/// Request script error types
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestScriptError {
    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    #[error("Empty script")]
    EmptyScript,
}

/// Reference to a block from inside a script
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockRef {
    /// Most recently created block
    Last,
    /// N-th created block, counting from 1
    Nth(usize),
    Id(BlockId),
}

/// A single scripted request
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptedRequest {
    Create { block_type: String, data: DataMap },
    Op { block: BlockRef, op_name: String, data: DataMap },
    First { block: BlockRef },
    ChangeType { block: BlockRef, new_type: String },
    Get { block: BlockRef },
    Types,
}

/// Parsed request script
#[derive(Debug, Clone, Default)]
pub struct RequestScript {
    requests: VecDeque<(usize, ScriptedRequest)>,
}

impl RequestScript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a script from text
    pub fn from_text(text: &str) -> Result<Self, RequestScriptError> {
        let mut requests = VecDeque::new();

        for (line_num, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let request = Self::parse_line(line).map_err(|message| {
                RequestScriptError::ParseError {
                    line: line_num + 1,
                    message,
                }
            })?;
            requests.push_back((line_num + 1, request));
        }

        if requests.is_empty() {
            return Err(RequestScriptError::EmptyScript);
        }

        Ok(Self { requests })
    }

    /// Parses a single request line
    fn parse_line(line: &str) -> Result<ScriptedRequest, String> {
        let (cmd, rest) = next_word(line);

        match cmd {
            "create" => {
                let (block_type, rest) = required_word(rest, "block type")?;
                Ok(ScriptedRequest::Create {
                    block_type: block_type.to_string(),
                    data: parse_data(rest)?,
                })
            }
            "op" => {
                let (block, rest) = required_word(rest, "block")?;
                let (op_name, rest) = required_word(rest, "op name")?;
                Ok(ScriptedRequest::Op {
                    block: parse_block_ref(block)?,
                    op_name: op_name.to_string(),
                    data: parse_data(rest)?,
                })
            }
            "first" => Ok(ScriptedRequest::First {
                block: single_block(rest)?,
            }),
            "change_type" => {
                let (block, rest) = required_word(rest, "block")?;
                let (new_type, rest) = required_word(rest, "new type")?;
                no_trailing(rest)?;
                Ok(ScriptedRequest::ChangeType {
                    block: parse_block_ref(block)?,
                    new_type: new_type.to_string(),
                })
            }
            "get" => Ok(ScriptedRequest::Get {
                block: single_block(rest)?,
            }),
            "types" => {
                no_trailing(rest)?;
                Ok(ScriptedRequest::Types)
            }
            other => Err(format!("Unknown request: {}", other)),
        }
    }

    /// Takes the next request with its line number
    pub fn next_request(&mut self) -> Option<(usize, ScriptedRequest)> {
        self.requests.pop_front()
    }

    pub fn remaining(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}

/// Splits off the first whitespace-delimited word
fn next_word(input: &str) -> (&str, &str) {
    let input = input.trim_start();
    match input.find(char::is_whitespace) {
        Some(at) => (&input[..at], input[at..].trim_start()),
        None => (input, ""),
    }
}

fn required_word<'a>(input: &'a str, what: &str) -> Result<(&'a str, &'a str), String> {
    match next_word(input) {
        ("", _) => Err(format!("Missing argument: {}", what)),
        split => Ok(split),
    }
}

fn no_trailing(rest: &str) -> Result<(), String> {
    if rest.trim().is_empty() {
        Ok(())
    } else {
        Err(format!("Unexpected argument: {}", rest.trim()))
    }
}

fn single_block(rest: &str) -> Result<BlockRef, String> {
    let (block, rest) = required_word(rest, "block")?;
    no_trailing(rest)?;
    parse_block_ref(block)
}

fn parse_block_ref(word: &str) -> Result<BlockRef, String> {
    if word == "$" {
        return Ok(BlockRef::Last);
    }
    if let Some(index) = word.strip_prefix('$') {
        return match index.parse::<usize>() {
            Ok(n) if n >= 1 => Ok(BlockRef::Nth(n)),
            _ => Err(format!("Invalid block reference: {}", word)),
        };
    }
    Uuid::parse_str(word)
        .map(|uuid| BlockRef::Id(BlockId::from_uuid(uuid)))
        .map_err(|_| format!("Invalid block id: {}", word))
}

fn parse_data(rest: &str) -> Result<DataMap, String> {
    let rest = rest.trim();
    if rest.is_empty() {
        return Ok(DataMap::new());
    }
    match serde_json::from_str::<Value>(rest) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err("Request data must be a JSON object".to_string()),
        Err(e) => Err(format!("Invalid request data: {}", e)),
    }
}
