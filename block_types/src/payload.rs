//! The eight block payload variants and their map codecs
//!
//! Every payload converts to and from the transport-neutral [`DataMap`]
//! through its serde form. Decoding is lenient about absence (a missing key
//! takes its zero value) and strict about shape (a present key of the wrong
//! JSON type is a [`BlockError::Decode`]).

use crate::{BlockError, BlockKind, ListKind};
use rich_text::{from_data_map, to_data_map, DataMap, StyledText};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub const TEXT_DATA_KEY: &str = "text_data";
pub const LIST_TYPE_KEY: &str = "type";

/// Header: leveled style-run text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderData {
    #[serde(rename = "text_data", skip_serializing_if = "Option::is_none")]
    pub text: Option<StyledText>,
    #[serde(deserialize_with = "clamped_unsigned")]
    pub level: u64,
}

/// List item: style-run text with an indent level, flavour and value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListData {
    #[serde(rename = "text_data", skip_serializing_if = "Option::is_none")]
    pub text: Option<StyledText>,
    #[serde(deserialize_with = "clamped_unsigned")]
    pub level: u64,
    #[serde(rename = "type")]
    pub kind: ListKind,
    pub value: i64,
}

/// Code: plain text and the detected language name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeData {
    pub text: String,
    pub lang: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteData {
    pub text: String,
}

/// Link: label and target
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkData {
    pub text: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageData {
    pub src: String,
    pub alt: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileData {
    pub src: String,
}

/// Exactly one payload, matching the block's kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockPayload {
    Text(StyledText),
    Header(HeaderData),
    List(ListData),
    Code(CodeData),
    Quote(QuoteData),
    Link(LinkData),
    Image(ImageData),
    File(FileData),
}

impl BlockPayload {
    pub fn kind(&self) -> BlockKind {
        match self {
            BlockPayload::Text(_) => BlockKind::Text,
            BlockPayload::Header(_) => BlockKind::Header,
            BlockPayload::List(_) => BlockKind::List,
            BlockPayload::Code(_) => BlockKind::Code,
            BlockPayload::Quote(_) => BlockKind::Quote,
            BlockPayload::Link(_) => BlockKind::Link,
            BlockPayload::Image(_) => BlockKind::Image,
            BlockPayload::File(_) => BlockKind::File,
        }
    }

    /// Decodes `map` as the payload of a `kind` block
    pub fn from_map(kind: BlockKind, map: &DataMap) -> Result<Self, BlockError> {
        Ok(match kind {
            BlockKind::Text => {
                BlockPayload::Text(StyledText::from_map(map)?.unwrap_or_default())
            }
            BlockKind::Header => BlockPayload::Header(HeaderData::from_map(map)?),
            BlockKind::List => BlockPayload::List(ListData::from_map(map)?),
            BlockKind::Code => BlockPayload::Code(CodeData::from_map(map)?),
            BlockKind::Quote => BlockPayload::Quote(QuoteData::from_map(map)?),
            BlockKind::Link => BlockPayload::Link(LinkData::from_map(map)?),
            BlockKind::Image => BlockPayload::Image(ImageData::from_map(map)?),
            BlockKind::File => BlockPayload::File(FileData::from_map(map)?),
        })
    }

    pub fn to_map(&self) -> DataMap {
        match self {
            BlockPayload::Text(text) => text.to_map(),
            BlockPayload::Header(data) => data.to_map(),
            BlockPayload::List(data) => data.to_map(),
            BlockPayload::Code(data) => data.to_map(),
            BlockPayload::Quote(data) => data.to_map(),
            BlockPayload::Link(data) => data.to_map(),
            BlockPayload::Image(data) => data.to_map(),
            BlockPayload::File(data) => data.to_map(),
        }
    }

    /// Style-run content, for kinds that carry one
    pub fn runs(&self) -> Option<&StyledText> {
        match self {
            BlockPayload::Text(text) => Some(text),
            BlockPayload::Header(data) => data.text.as_ref(),
            BlockPayload::List(data) => data.text.as_ref(),
            _ => None,
        }
    }
}

impl HeaderData {
    pub fn from_map(map: &DataMap) -> Result<Self, BlockError> {
        Ok(from_data_map(map)?)
    }

    pub fn to_map(&self) -> DataMap {
        to_data_map(self)
    }
}

impl CodeData {
    pub fn from_map(map: &DataMap) -> Result<Self, BlockError> {
        Ok(from_data_map(map)?)
    }

    pub fn to_map(&self) -> DataMap {
        to_data_map(self)
    }
}

impl QuoteData {
    pub fn from_map(map: &DataMap) -> Result<Self, BlockError> {
        Ok(from_data_map(map)?)
    }

    pub fn to_map(&self) -> DataMap {
        to_data_map(self)
    }
}

impl LinkData {
    pub fn from_map(map: &DataMap) -> Result<Self, BlockError> {
        Ok(from_data_map(map)?)
    }

    pub fn to_map(&self) -> DataMap {
        to_data_map(self)
    }
}

impl ImageData {
    pub fn from_map(map: &DataMap) -> Result<Self, BlockError> {
        Ok(from_data_map(map)?)
    }

    pub fn to_map(&self) -> DataMap {
        to_data_map(self)
    }
}

impl FileData {
    pub fn from_map(map: &DataMap) -> Result<Self, BlockError> {
        Ok(from_data_map(map)?)
    }

    pub fn to_map(&self) -> DataMap {
        to_data_map(self)
    }
}

impl ListData {
    /// An unknown `type` tag is an unsupported type, not a decode error
    pub fn from_map(map: &DataMap) -> Result<Self, BlockError> {
        if let Some(Value::String(tag)) = map.get(LIST_TYPE_KEY) {
            tag.parse::<ListKind>()?;
        }
        Ok(from_data_map(map)?)
    }

    pub fn to_map(&self) -> DataMap {
        to_data_map(self)
    }
}

/// Unsigned wire fields accept any integer; negatives clamp to zero
fn clamped_unsigned<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Wire {
        Unsigned(u64),
        Signed(i64),
    }

    match Wire::deserialize(deserializer) {
        Ok(Wire::Unsigned(n)) => Ok(n),
        Ok(Wire::Signed(n)) => Ok(n.max(0) as u64),
        Err(_) => Err(serde::de::Error::custom("expected an integer")),
    }
}
