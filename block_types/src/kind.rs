//! Block type tags and conversion targets

use crate::BlockError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Type tag carried by every block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    Text,
    Header,
    List,
    Code,
    Quote,
    Link,
    #[serde(rename = "img")]
    Image,
    File,
}

impl BlockKind {
    pub const ALL: [BlockKind; 8] = [
        BlockKind::Text,
        BlockKind::Header,
        BlockKind::List,
        BlockKind::Code,
        BlockKind::Quote,
        BlockKind::Link,
        BlockKind::Image,
        BlockKind::File,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BlockKind::Text => "text",
            BlockKind::Header => "header",
            BlockKind::List => "list",
            BlockKind::Code => "code",
            BlockKind::Quote => "quote",
            BlockKind::Link => "link",
            BlockKind::Image => "img",
            BlockKind::File => "file",
        }
    }

    /// True for kinds whose content is a style-run sequence
    pub fn has_runs(&self) -> bool {
        matches!(self, BlockKind::Text | BlockKind::Header | BlockKind::List)
    }
}

impl FromStr for BlockKind {
    type Err = BlockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BlockKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| BlockError::UnsupportedType(s.to_string()))
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Flavour of a list item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    Todo,
    #[default]
    Unordered,
    Ordered,
}

impl ListKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListKind::Todo => "todo",
            ListKind::Unordered => "unordered",
            ListKind::Ordered => "ordered",
        }
    }

    /// Clamps a requested item value to what this kind can hold.
    ///
    /// A todo item is either unchecked (0) or checked (1), unordered items
    /// carry no value and ordered items count from 1.
    pub fn clamp_value(&self, requested: i64) -> i64 {
        match self {
            ListKind::Todo => i64::from(requested >= 1),
            ListKind::Unordered => 0,
            ListKind::Ordered => requested.max(1),
        }
    }
}

impl FromStr for ListKind {
    type Err = BlockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "todo" => Ok(ListKind::Todo),
            "unordered" => Ok(ListKind::Unordered),
            "ordered" => Ok(ListKind::Ordered),
            other => Err(BlockError::UnsupportedType(other.to_string())),
        }
    }
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `new_type` value accepted by ChangeType
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConversionTarget {
    Text,
    Header1,
    Header2,
    Header3,
    Todo,
    Unordered,
    Ordered,
    Code,
    Quote,
    Link,
    Image,
    File,
}

impl ConversionTarget {
    pub const ALL: [ConversionTarget; 12] = [
        ConversionTarget::Text,
        ConversionTarget::Header1,
        ConversionTarget::Header2,
        ConversionTarget::Header3,
        ConversionTarget::Todo,
        ConversionTarget::Unordered,
        ConversionTarget::Ordered,
        ConversionTarget::Code,
        ConversionTarget::Quote,
        ConversionTarget::Link,
        ConversionTarget::Image,
        ConversionTarget::File,
    ];

    /// Parses a target tag; unknown tags are `UnsupportedType`
    pub fn parse(tag: &str) -> Result<Self, BlockError> {
        ConversionTarget::ALL
            .into_iter()
            .find(|target| target.as_str() == tag)
            .ok_or_else(|| BlockError::UnsupportedType(tag.to_string()))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConversionTarget::Text => "text",
            ConversionTarget::Header1 => "header_1",
            ConversionTarget::Header2 => "header_2",
            ConversionTarget::Header3 => "header_3",
            ConversionTarget::Todo => "todo",
            ConversionTarget::Unordered => "unordered",
            ConversionTarget::Ordered => "ordered",
            ConversionTarget::Code => "code",
            ConversionTarget::Quote => "quote",
            ConversionTarget::Link => "link",
            ConversionTarget::Image => "img",
            ConversionTarget::File => "file",
        }
    }

    /// Block kind produced by converting to this target
    pub fn kind(&self) -> BlockKind {
        match self {
            ConversionTarget::Text => BlockKind::Text,
            ConversionTarget::Header1 | ConversionTarget::Header2 | ConversionTarget::Header3 => {
                BlockKind::Header
            }
            ConversionTarget::Todo | ConversionTarget::Unordered | ConversionTarget::Ordered => {
                BlockKind::List
            }
            ConversionTarget::Code => BlockKind::Code,
            ConversionTarget::Quote => BlockKind::Quote,
            ConversionTarget::Link => BlockKind::Link,
            ConversionTarget::Image => BlockKind::Image,
            ConversionTarget::File => BlockKind::File,
        }
    }
}

impl FromStr for ConversionTarget {
    type Err = BlockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConversionTarget::parse(s)
    }
}

impl fmt::Display for ConversionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
