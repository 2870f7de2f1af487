//! Type conversion between block payloads
//!
//! A conversion only ever sees what the source can give it: its style runs
//! if it has any, its plain text, and for list sources the level and the
//! ordered value. Everything else on the target is defaulted.

use crate::payload::{CodeData, FileData, HeaderData, ImageData, LinkData, ListData, QuoteData};
use crate::{BlockError, BlockPayload, ConversionTarget, ListKind};
use rich_text::StyledText;

/// Source content handed to the conversion engine
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionSource<'a> {
    /// Style runs, when the source carries them
    pub runs: Option<&'a StyledText>,
    /// Style-stripped content
    pub plain: String,
    /// List indent level carried to list targets
    pub level: u64,
    /// Ordered-list value carried to an ordered target; zero means unset
    pub ordered_value: i64,
}

impl<'a> ConversionSource<'a> {
    pub fn plain(plain: impl Into<String>) -> Self {
        Self {
            plain: plain.into(),
            ..Self::default()
        }
    }

    pub fn with_runs(runs: &'a StyledText) -> Self {
        Self {
            runs: Some(runs),
            plain: runs.plain_text(),
            ..Self::default()
        }
    }

    /// Runs carried verbatim, or one default run built from the plain text
    fn styled(&self) -> StyledText {
        match self.runs {
            Some(runs) => runs.clone(),
            None => StyledText::from_plain(&self.plain),
        }
    }
}

/// Converts `source` to the payload named by `new_type`
pub fn convert(source: &ConversionSource<'_>, new_type: &str) -> Result<BlockPayload, BlockError> {
    let target = ConversionTarget::parse(new_type)?;
    Ok(convert_to(source, target))
}

/// Converts `source` to `target`
pub fn convert_to(source: &ConversionSource<'_>, target: ConversionTarget) -> BlockPayload {
    let ordered_value = if source.ordered_value == 0 {
        1
    } else {
        source.ordered_value
    };

    let header = |level| {
        BlockPayload::Header(HeaderData {
            text: Some(source.styled()),
            level,
        })
    };
    let list = |kind, value| {
        BlockPayload::List(ListData {
            text: Some(source.styled()),
            level: source.level,
            kind,
            value,
        })
    };

    let payload = match target {
        ConversionTarget::Text => BlockPayload::Text(source.styled()),
        ConversionTarget::Header1 => header(1),
        ConversionTarget::Header2 => header(2),
        ConversionTarget::Header3 => header(3),
        ConversionTarget::Todo => list(ListKind::Todo, 0),
        ConversionTarget::Unordered => list(ListKind::Unordered, 0),
        ConversionTarget::Ordered => list(ListKind::Ordered, ordered_value),
        ConversionTarget::Code => BlockPayload::Code(CodeData {
            text: source.plain.clone(),
            lang: String::new(),
        }),
        ConversionTarget::Quote => BlockPayload::Quote(QuoteData {
            text: source.plain.clone(),
        }),
        ConversionTarget::Link => BlockPayload::Link(LinkData {
            text: source.plain.clone(),
            url: String::new(),
        }),
        ConversionTarget::Image => BlockPayload::Image(ImageData {
            src: String::new(),
            alt: source.plain.clone(),
        }),
        ConversionTarget::File => BlockPayload::File(FileData::default()),
    };

    log::debug!("converted block content to {}", target);
    payload
}
