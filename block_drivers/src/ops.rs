//! Typed block operations
//!
//! An op arrives as an `op_name` plus a request map. Each kind has a closed
//! enum of the ops it accepts; parsing picks the variant from the name and
//! decodes the request fields, defaulting any that are missing.
//!
//! Drivers check the name against the kind's `NAMES` before looking at the
//! block, and only decode the request once there is a payload to edit.

use block_types::BlockError;
use rich_text::{from_data_map, DataMap, MergeConfig, StyledText};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub const APPLY_STYLE: &str = "apply_style";
pub const INSERT_TEXT: &str = "insert_text";
pub const DELETE_RANGE: &str = "delete_range";
pub const CHANGE_LEVEL: &str = "change_level";
pub const CHANGE_VALUE: &str = "change_value";
pub const CHANGE_TYPE: &str = "change_type";
pub const CHANGE_TEXT: &str = "change_text";
pub const CHANGE_URL: &str = "change_url";
pub const CHANGE_SRC: &str = "change_src";
pub const CHANGE_ALT: &str = "change_alt";
pub const ANALYSE_LANG: &str = "analyse_lang";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplyStyleRequest {
    pub start: i64,
    pub end: i64,
    pub style: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsertTextRequest {
    pub pos: i64,
    pub new_text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeleteRangeRequest {
    pub start: i64,
    pub end: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangeLevelRequest {
    pub new_level: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangeValueRequest {
    pub new_value: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangeListTypeRequest {
    pub new_type: String,
    pub ordered_value: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangeTextRequest {
    pub new_text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangeUrlRequest {
    pub new_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangeSrcRequest {
    pub new_src: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangeAltRequest {
    pub new_alt: String,
}

/// Decodes the request map into `T`
pub fn request<T: DeserializeOwned>(data: &DataMap) -> Result<T, BlockError> {
    Ok(from_data_map(data)?)
}

fn unsupported(op_name: &str) -> BlockError {
    BlockError::UnsupportedType(op_name.to_string())
}

/// Rejects an op name that is not in `names`
pub fn ensure_supported(names: &[&str], op_name: &str) -> Result<(), BlockError> {
    if names.contains(&op_name) {
        Ok(())
    } else {
        Err(unsupported(op_name))
    }
}

/// Edits on a style-run field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextOp {
    ApplyStyle(ApplyStyleRequest),
    InsertText(InsertTextRequest),
    DeleteRange(DeleteRangeRequest),
}

impl TextOp {
    pub const NAMES: &'static [&'static str] = &[APPLY_STYLE, INSERT_TEXT, DELETE_RANGE];

    /// `Ok(None)` when `op_name` is not a text edit
    pub fn try_parse(op_name: &str, data: &DataMap) -> Result<Option<Self>, BlockError> {
        Ok(Some(match op_name {
            APPLY_STYLE => TextOp::ApplyStyle(request(data)?),
            INSERT_TEXT => TextOp::InsertText(request(data)?),
            DELETE_RANGE => TextOp::DeleteRange(request(data)?),
            _ => return Ok(None),
        }))
    }

    pub fn parse(op_name: &str, data: &DataMap) -> Result<Self, BlockError> {
        Self::try_parse(op_name, data)?.ok_or_else(|| unsupported(op_name))
    }

    /// Whether `op_name` edits the style runs
    pub fn is_text_op(op_name: &str) -> bool {
        Self::NAMES.contains(&op_name)
    }

    pub fn apply(&self, text: &mut StyledText, config: &MergeConfig) -> Result<(), BlockError> {
        match self {
            TextOp::ApplyStyle(req) => text.apply_style_with(req.start, req.end, &req.style, config)?,
            TextOp::InsertText(req) => text.insert_text_with(req.pos, &req.new_text, config),
            TextOp::DeleteRange(req) => text.delete_range_with(req.start, req.end, config),
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderOp {
    Text(TextOp),
    ChangeLevel(ChangeLevelRequest),
}

impl HeaderOp {
    pub const NAMES: &'static [&'static str] = &[APPLY_STYLE, INSERT_TEXT, DELETE_RANGE, CHANGE_LEVEL];

    pub fn parse(op_name: &str, data: &DataMap) -> Result<Self, BlockError> {
        if let Some(op) = TextOp::try_parse(op_name, data)? {
            return Ok(HeaderOp::Text(op));
        }
        match op_name {
            CHANGE_LEVEL => Ok(HeaderOp::ChangeLevel(request(data)?)),
            _ => Err(unsupported(op_name)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListOp {
    Text(TextOp),
    ChangeLevel(ChangeLevelRequest),
    ChangeValue(ChangeValueRequest),
    ChangeType(ChangeListTypeRequest),
}

impl ListOp {
    pub const NAMES: &'static [&'static str] = &[
        APPLY_STYLE,
        INSERT_TEXT,
        DELETE_RANGE,
        CHANGE_LEVEL,
        CHANGE_VALUE,
        CHANGE_TYPE,
    ];

    pub fn parse(op_name: &str, data: &DataMap) -> Result<Self, BlockError> {
        if let Some(op) = TextOp::try_parse(op_name, data)? {
            return Ok(ListOp::Text(op));
        }
        match op_name {
            CHANGE_LEVEL => Ok(ListOp::ChangeLevel(request(data)?)),
            CHANGE_VALUE => Ok(ListOp::ChangeValue(request(data)?)),
            CHANGE_TYPE => Ok(ListOp::ChangeType(request(data)?)),
            _ => Err(unsupported(op_name)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeOp {
    ChangeText(ChangeTextRequest),
    AnalyseLang,
}

impl CodeOp {
    pub const NAMES: &'static [&'static str] = &[CHANGE_TEXT, ANALYSE_LANG];

    pub fn parse(op_name: &str, data: &DataMap) -> Result<Self, BlockError> {
        match op_name {
            CHANGE_TEXT => Ok(CodeOp::ChangeText(request(data)?)),
            ANALYSE_LANG => Ok(CodeOp::AnalyseLang),
            _ => Err(unsupported(op_name)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuoteOp {
    ChangeText(ChangeTextRequest),
}

impl QuoteOp {
    pub const NAMES: &'static [&'static str] = &[CHANGE_TEXT];

    pub fn parse(op_name: &str, data: &DataMap) -> Result<Self, BlockError> {
        match op_name {
            CHANGE_TEXT => Ok(QuoteOp::ChangeText(request(data)?)),
            _ => Err(unsupported(op_name)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkOp {
    ChangeText(ChangeTextRequest),
    ChangeUrl(ChangeUrlRequest),
}

impl LinkOp {
    pub const NAMES: &'static [&'static str] = &[CHANGE_TEXT, CHANGE_URL];

    pub fn parse(op_name: &str, data: &DataMap) -> Result<Self, BlockError> {
        match op_name {
            CHANGE_TEXT => Ok(LinkOp::ChangeText(request(data)?)),
            CHANGE_URL => Ok(LinkOp::ChangeUrl(request(data)?)),
            _ => Err(unsupported(op_name)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageOp {
    ChangeSrc(ChangeSrcRequest),
    ChangeAlt(ChangeAltRequest),
}

impl ImageOp {
    pub const NAMES: &'static [&'static str] = &[CHANGE_SRC, CHANGE_ALT];

    pub fn parse(op_name: &str, data: &DataMap) -> Result<Self, BlockError> {
        match op_name {
            CHANGE_SRC => Ok(ImageOp::ChangeSrc(request(data)?)),
            CHANGE_ALT => Ok(ImageOp::ChangeAlt(request(data)?)),
            _ => Err(unsupported(op_name)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOp {
    ChangeSrc(ChangeSrcRequest),
}

impl FileOp {
    pub const NAMES: &'static [&'static str] = &[CHANGE_SRC];

    pub fn parse(op_name: &str, data: &DataMap) -> Result<Self, BlockError> {
        match op_name {
            CHANGE_SRC => Ok(FileOp::ChangeSrc(request(data)?)),
            _ => Err(unsupported(op_name)),
        }
    }
}
