//! Drivers for kinds made of plain scalar fields

use crate::driver::{decode, replace_payload, BlockDriver};
use crate::ops::{ensure_supported, CodeOp, FileOp, ImageOp, LinkOp, QuoteOp};
use block_types::{
    detect_language, Block, BlockError, BlockKind, CodeData, ConversionSource, FileData,
    ImageData, LinkData, QuoteData,
};
use rich_text::DataMap;

/// Preview shown for file blocks
pub const FILE_PREVIEW: &str = "file";

/// Text a file block hands to the conversion engine
pub const FILE_CONVERSION_TEXT: &str = "from file";

/// Source code with a detected language
#[derive(Debug, Clone, Copy, Default)]
pub struct CodeDriver;

impl BlockDriver for CodeDriver {
    fn kind(&self) -> BlockKind {
        BlockKind::Code
    }

    fn create(&self, data: &DataMap) -> Result<DataMap, BlockError> {
        let mut code = CodeData::from_map(data)?;
        code.lang = detect_language(&code.text).to_string();
        Ok(code.to_map())
    }

    fn op(
        &self,
        block: &Block,
        op_name: &str,
        data: &DataMap,
    ) -> Result<Option<DataMap>, BlockError> {
        ensure_supported(CodeOp::NAMES, op_name)?;
        let Some(mut code) = decode(block, CodeData::from_map)? else {
            return Ok(None);
        };
        if let CodeOp::ChangeText(req) = CodeOp::parse(op_name, data)? {
            code.text = req.new_text;
        }
        code.lang = detect_language(&code.text).to_string();
        Ok(Some(code.to_map()))
    }

    fn get_as_first(&self, block: &Block) -> String {
        match decode(block, CodeData::from_map) {
            Ok(Some(code)) => code.text,
            _ => String::new(),
        }
    }

    fn change_type(&self, block: &mut Block, new_type: &str) -> Result<(), BlockError> {
        let code = decode(block, CodeData::from_map)?.unwrap_or_default();
        replace_payload(block, &ConversionSource::plain(code.text), new_type)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct QuoteDriver;

impl BlockDriver for QuoteDriver {
    fn kind(&self) -> BlockKind {
        BlockKind::Quote
    }

    fn create(&self, data: &DataMap) -> Result<DataMap, BlockError> {
        Ok(QuoteData::from_map(data)?.to_map())
    }

    fn op(
        &self,
        block: &Block,
        op_name: &str,
        data: &DataMap,
    ) -> Result<Option<DataMap>, BlockError> {
        ensure_supported(QuoteOp::NAMES, op_name)?;
        let Some(mut quote) = decode(block, QuoteData::from_map)? else {
            return Ok(None);
        };
        let QuoteOp::ChangeText(req) = QuoteOp::parse(op_name, data)?;
        quote.text = req.new_text;
        Ok(Some(quote.to_map()))
    }

    fn get_as_first(&self, block: &Block) -> String {
        match decode(block, QuoteData::from_map) {
            Ok(Some(quote)) => quote.text,
            _ => String::new(),
        }
    }

    fn change_type(&self, block: &mut Block, new_type: &str) -> Result<(), BlockError> {
        let quote = decode(block, QuoteData::from_map)?.unwrap_or_default();
        replace_payload(block, &ConversionSource::plain(quote.text), new_type)
    }
}

/// Labelled hyperlink
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkDriver;

impl BlockDriver for LinkDriver {
    fn kind(&self) -> BlockKind {
        BlockKind::Link
    }

    fn create(&self, data: &DataMap) -> Result<DataMap, BlockError> {
        Ok(LinkData::from_map(data)?.to_map())
    }

    fn op(
        &self,
        block: &Block,
        op_name: &str,
        data: &DataMap,
    ) -> Result<Option<DataMap>, BlockError> {
        ensure_supported(LinkOp::NAMES, op_name)?;
        let Some(mut link) = decode(block, LinkData::from_map)? else {
            return Ok(None);
        };
        match LinkOp::parse(op_name, data)? {
            LinkOp::ChangeText(req) => link.text = req.new_text,
            LinkOp::ChangeUrl(req) => link.url = req.new_url,
        }
        Ok(Some(link.to_map()))
    }

    fn get_as_first(&self, block: &Block) -> String {
        match decode(block, LinkData::from_map) {
            Ok(Some(link)) => link.text,
            _ => String::new(),
        }
    }

    fn change_type(&self, block: &mut Block, new_type: &str) -> Result<(), BlockError> {
        let link = decode(block, LinkData::from_map)?.unwrap_or_default();
        replace_payload(block, &ConversionSource::plain(link.text), new_type)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ImageDriver;

impl BlockDriver for ImageDriver {
    fn kind(&self) -> BlockKind {
        BlockKind::Image
    }

    fn create(&self, data: &DataMap) -> Result<DataMap, BlockError> {
        Ok(ImageData::from_map(data)?.to_map())
    }

    fn op(
        &self,
        block: &Block,
        op_name: &str,
        data: &DataMap,
    ) -> Result<Option<DataMap>, BlockError> {
        ensure_supported(ImageOp::NAMES, op_name)?;
        let Some(mut image) = decode(block, ImageData::from_map)? else {
            return Ok(None);
        };
        match ImageOp::parse(op_name, data)? {
            ImageOp::ChangeSrc(req) => image.src = req.new_src,
            ImageOp::ChangeAlt(req) => image.alt = req.new_alt,
        }
        Ok(Some(image.to_map()))
    }

    fn get_as_first(&self, block: &Block) -> String {
        match decode(block, ImageData::from_map) {
            Ok(Some(image)) => image.alt,
            _ => String::new(),
        }
    }

    fn change_type(&self, block: &mut Block, new_type: &str) -> Result<(), BlockError> {
        let image = decode(block, ImageData::from_map)?.unwrap_or_default();
        replace_payload(block, &ConversionSource::plain(image.alt), new_type)
    }
}

/// Attached file; it has no text of its own
#[derive(Debug, Clone, Copy, Default)]
pub struct FileDriver;

impl BlockDriver for FileDriver {
    fn kind(&self) -> BlockKind {
        BlockKind::File
    }

    fn create(&self, data: &DataMap) -> Result<DataMap, BlockError> {
        Ok(FileData::from_map(data)?.to_map())
    }

    fn op(
        &self,
        block: &Block,
        op_name: &str,
        data: &DataMap,
    ) -> Result<Option<DataMap>, BlockError> {
        ensure_supported(FileOp::NAMES, op_name)?;
        let Some(mut file) = decode(block, FileData::from_map)? else {
            return Ok(None);
        };
        let FileOp::ChangeSrc(req) = FileOp::parse(op_name, data)?;
        file.src = req.new_src;
        Ok(Some(file.to_map()))
    }

    fn get_as_first(&self, block: &Block) -> String {
        match decode(block, FileData::from_map) {
            Ok(Some(_)) => FILE_PREVIEW.to_string(),
            _ => String::new(),
        }
    }

    fn change_type(&self, block: &mut Block, new_type: &str) -> Result<(), BlockError> {
        decode(block, FileData::from_map)?;
        replace_payload(block, &ConversionSource::plain(FILE_CONVERSION_TEXT), new_type)
    }
}
