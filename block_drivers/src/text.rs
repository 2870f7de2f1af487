//! Drivers for the style-run kinds: text, header and list

use crate::driver::{decode, replace_payload, BlockDriver};
use crate::ops::{ensure_supported, HeaderOp, ListOp, TextOp};
use block_types::{
    Block, BlockError, BlockKind, ConversionSource, HeaderData, ListData, ListKind,
};
use rich_text::{DataMap, MergeConfig, StyledText};

fn text_from_map(map: &DataMap) -> Result<StyledText, BlockError> {
    Ok(StyledText::from_map(map)?.unwrap_or_default())
}

/// Plain paragraph of styled text
#[derive(Debug, Clone, Default)]
pub struct TextDriver {
    config: MergeConfig,
}

impl TextDriver {
    pub fn new(config: MergeConfig) -> Self {
        Self { config }
    }
}

impl BlockDriver for TextDriver {
    fn kind(&self) -> BlockKind {
        BlockKind::Text
    }

    fn create(&self, data: &DataMap) -> Result<DataMap, BlockError> {
        Ok(text_from_map(data)?.to_map())
    }

    fn op(
        &self,
        block: &Block,
        op_name: &str,
        data: &DataMap,
    ) -> Result<Option<DataMap>, BlockError> {
        ensure_supported(TextOp::NAMES, op_name)?;
        let Some(mut text) = decode(block, text_from_map)? else {
            return Ok(None);
        };
        TextOp::parse(op_name, data)?.apply(&mut text, &self.config)?;
        Ok(Some(text.to_map()))
    }

    fn get_as_first(&self, block: &Block) -> String {
        match decode(block, text_from_map) {
            Ok(Some(text)) => text.plain_text(),
            _ => String::new(),
        }
    }

    fn change_type(&self, block: &mut Block, new_type: &str) -> Result<(), BlockError> {
        let text = decode(block, text_from_map)?;
        let source = match &text {
            Some(runs) => ConversionSource::with_runs(runs),
            None => ConversionSource::default(),
        };
        replace_payload(block, &source, new_type)
    }
}

/// Leveled heading
#[derive(Debug, Clone, Default)]
pub struct HeaderDriver {
    config: MergeConfig,
}

impl HeaderDriver {
    pub fn new(config: MergeConfig) -> Self {
        Self { config }
    }
}

impl BlockDriver for HeaderDriver {
    fn kind(&self) -> BlockKind {
        BlockKind::Header
    }

    fn create(&self, data: &DataMap) -> Result<DataMap, BlockError> {
        let mut header = HeaderData::from_map(data)?;
        header.text.get_or_insert_with(StyledText::new);
        Ok(header.to_map())
    }

    fn op(
        &self,
        block: &Block,
        op_name: &str,
        data: &DataMap,
    ) -> Result<Option<DataMap>, BlockError> {
        ensure_supported(HeaderOp::NAMES, op_name)?;
        let Some(mut header) = decode(block, HeaderData::from_map)? else {
            return Ok(None);
        };
        if header.text.is_none() && TextOp::is_text_op(op_name) {
            return Ok(None);
        }

        match HeaderOp::parse(op_name, data)? {
            HeaderOp::Text(op) => {
                if let Some(text) = header.text.as_mut() {
                    op.apply(text, &self.config)?;
                }
            }
            HeaderOp::ChangeLevel(req) => header.level = req.new_level.max(0) as u64,
        }
        Ok(Some(header.to_map()))
    }

    fn get_as_first(&self, block: &Block) -> String {
        match decode(block, HeaderData::from_map) {
            Ok(Some(HeaderData {
                text: Some(text), ..
            })) => text.plain_text(),
            _ => String::new(),
        }
    }

    fn change_type(&self, block: &mut Block, new_type: &str) -> Result<(), BlockError> {
        let header = decode(block, HeaderData::from_map)?;
        let source = match header.as_ref().and_then(|h| h.text.as_ref()) {
            Some(runs) => ConversionSource::with_runs(runs),
            None => ConversionSource::default(),
        };
        replace_payload(block, &source, new_type)
    }
}

/// Todo, bulleted or numbered list item
#[derive(Debug, Clone, Default)]
pub struct ListDriver {
    config: MergeConfig,
}

impl ListDriver {
    pub fn new(config: MergeConfig) -> Self {
        Self { config }
    }
}

impl BlockDriver for ListDriver {
    fn kind(&self) -> BlockKind {
        BlockKind::List
    }

    fn create(&self, data: &DataMap) -> Result<DataMap, BlockError> {
        let mut list = ListData::from_map(data)?;
        list.text.get_or_insert_with(StyledText::new);
        Ok(list.to_map())
    }

    fn op(
        &self,
        block: &Block,
        op_name: &str,
        data: &DataMap,
    ) -> Result<Option<DataMap>, BlockError> {
        ensure_supported(ListOp::NAMES, op_name)?;
        let Some(mut list) = decode(block, ListData::from_map)? else {
            return Ok(None);
        };
        if list.text.is_none() && TextOp::is_text_op(op_name) {
            return Ok(None);
        }

        match ListOp::parse(op_name, data)? {
            ListOp::Text(op) => {
                if let Some(text) = list.text.as_mut() {
                    op.apply(text, &self.config)?;
                }
            }
            ListOp::ChangeLevel(req) => list.level = req.new_level.max(0) as u64,
            ListOp::ChangeValue(req) => list.value = list.kind.clamp_value(req.new_value),
            ListOp::ChangeType(req) => {
                let kind: ListKind = req.new_type.parse()?;
                list.value = match kind {
                    ListKind::Ordered => req.ordered_value,
                    ListKind::Todo | ListKind::Unordered => 0,
                };
                list.kind = kind;
            }
        }
        Ok(Some(list.to_map()))
    }

    fn get_as_first(&self, block: &Block) -> String {
        match decode(block, ListData::from_map) {
            Ok(Some(ListData {
                text: Some(text), ..
            })) => text.plain_text(),
            _ => String::new(),
        }
    }

    fn change_type(&self, block: &mut Block, new_type: &str) -> Result<(), BlockError> {
        let list = decode(block, ListData::from_map)?;
        let source = match &list {
            Some(list) => ConversionSource {
                level: list.level,
                ordered_value: if list.kind == ListKind::Ordered {
                    list.value
                } else {
                    0
                },
                ..list
                    .text
                    .as_ref()
                    .map(ConversionSource::with_runs)
                    .unwrap_or_default()
            },
            None => ConversionSource::default(),
        };
        replace_payload(block, &source, new_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::{APPLY_STYLE, CHANGE_LEVEL, CHANGE_TYPE, CHANGE_VALUE, INSERT_TEXT};
    use core_types::NoteId;
    use rich_text::Run;
    use serde_json::{json, Value};

    fn data(value: Value) -> DataMap {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {}", other),
        }
    }

    fn block(kind: BlockKind, value: Value) -> Block {
        Block::new(kind, NoteId::new(), Some(data(value)))
    }

    fn config() -> MergeConfig {
        MergeConfig::sequential()
    }

    #[test]
    fn test_text_create_defaults_to_empty_runs() {
        let created = TextDriver::new(config()).create(&DataMap::new()).unwrap();
        assert_eq!(Value::Object(created), json!({"text": []}));
    }

    #[test]
    fn test_text_create_rejects_malformed_runs() {
        let err = TextDriver::new(config())
            .create(&data(json!({"text": [{"style": "a"}]})))
            .unwrap_err();
        assert!(matches!(err, BlockError::Decode(_)));
    }

    #[test]
    fn test_text_apply_style_op() {
        let driver = TextDriver::new(config());
        let b = block(
            BlockKind::Text,
            json!({"text": [{"style": "default", "string": "hello world"}]}),
        );
        let updated = driver
            .op(&b, APPLY_STYLE, &data(json!({"start": 6, "end": 11, "style": "bold"})))
            .unwrap()
            .unwrap();
        assert_eq!(
            Value::Object(updated),
            json!({"text": [
                {"style": "default", "string": "hello "},
                {"style": "bold", "string": "world"}
            ]})
        );
    }

    #[test]
    fn test_text_op_on_absent_payload_is_noop() {
        let driver = TextDriver::new(config());
        let b = Block::new(BlockKind::Text, NoteId::new(), None);
        assert_eq!(
            driver.op(&b, INSERT_TEXT, &data(json!({"pos": 0, "new_text": "x"}))),
            Ok(None)
        );
    }

    #[test]
    fn test_malformed_request_on_absent_payload_is_noop() {
        let driver = TextDriver::new(config());
        let b = Block::new(BlockKind::Text, NoteId::new(), None);
        assert_eq!(
            driver.op(&b, INSERT_TEXT, &data(json!({"pos": "zero"}))),
            Ok(None)
        );

        let header = block(BlockKind::Header, json!({"level": 1}));
        assert_eq!(
            HeaderDriver::new(config()).op(&header, APPLY_STYLE, &data(json!({"start": "a"}))),
            Ok(None)
        );

        let list = Block::new(BlockKind::List, NoteId::new(), None);
        assert_eq!(
            ListDriver::new(config()).op(&list, CHANGE_TYPE, &data(json!({"new_type": 7}))),
            Ok(None)
        );
    }

    #[test]
    fn test_malformed_request_on_payload_is_decode_error() {
        let b = block(
            BlockKind::Text,
            json!({"text": [{"style": "default", "string": "abc"}]}),
        );
        assert!(matches!(
            TextDriver::new(config()).op(&b, INSERT_TEXT, &data(json!({"pos": "zero"}))),
            Err(BlockError::Decode(_))
        ));

        let header = block(BlockKind::Header, json!({"level": 1}));
        assert!(matches!(
            HeaderDriver::new(config()).op(&header, CHANGE_LEVEL, &data(json!({"new_level": "2"}))),
            Err(BlockError::Decode(_))
        ));
    }

    #[test]
    fn test_text_unknown_op_even_without_payload() {
        let driver = TextDriver::new(config());
        let b = Block::new(BlockKind::Text, NoteId::new(), None);
        assert!(matches!(
            driver.op(&b, CHANGE_LEVEL, &DataMap::new()),
            Err(BlockError::UnsupportedType(_))
        ));

        let header = block(BlockKind::Header, json!({"level": 1}));
        assert!(matches!(
            HeaderDriver::new(config()).op(&header, CHANGE_VALUE, &data(json!({"new_value": "x"}))),
            Err(BlockError::UnsupportedType(_))
        ));
    }

    #[test]
    fn test_text_invalid_range_propagates() {
        let driver = TextDriver::new(config());
        let b = block(
            BlockKind::Text,
            json!({"text": [{"style": "default", "string": "abc"}]}),
        );
        assert_eq!(
            driver.op(&b, APPLY_STYLE, &data(json!({"start": 2, "end": 1, "style": "b"}))),
            Err(BlockError::InvalidRange { start: 2, end: 1 })
        );
    }

    #[test]
    fn test_text_get_as_first() {
        let driver = TextDriver::new(config());
        let b = block(
            BlockKind::Text,
            json!({"text": [
                {"style": "a", "string": "Hello"},
                {"style": "b", "string": " there"}
            ]}),
        );
        assert_eq!(driver.get_as_first(&b), "Hello there");
        let broken = block(BlockKind::Text, json!({"text": 5}));
        assert_eq!(driver.get_as_first(&broken), "");
    }

    #[test]
    fn test_text_change_type_to_header_keeps_runs() {
        let driver = TextDriver::new(config());
        let mut b = block(
            BlockKind::Text,
            json!({"text": [{"style": "bold", "string": "Title"}]}),
        );
        driver.change_type(&mut b, "header_1").unwrap();
        assert_eq!(b.kind, BlockKind::Header);
        assert_eq!(
            Value::Object(b.data.clone().unwrap()),
            json!({
                "level": 1,
                "text_data": {"text": [{"style": "bold", "string": "Title"}]}
            })
        );
    }

    #[test]
    fn test_change_type_unknown_target_leaves_block() {
        let driver = TextDriver::new(config());
        let mut b = block(
            BlockKind::Text,
            json!({"text": [{"style": "bold", "string": "Title"}]}),
        );
        let before = b.clone();
        assert!(matches!(
            driver.change_type(&mut b, "table"),
            Err(BlockError::UnsupportedType(_))
        ));
        assert_eq!(b, before);
    }

    #[test]
    fn test_header_change_level_clamps_negative() {
        let driver = HeaderDriver::new(config());
        let b = block(BlockKind::Header, json!({"level": 2}));
        let updated = driver
            .op(&b, CHANGE_LEVEL, &data(json!({"new_level": -4})))
            .unwrap()
            .unwrap();
        assert_eq!(updated["level"], json!(0));

        let updated = driver
            .op(&b, CHANGE_LEVEL, &data(json!({"new_level": 9})))
            .unwrap()
            .unwrap();
        assert_eq!(updated["level"], json!(9));
    }

    #[test]
    fn test_header_text_op_without_text_data_is_noop() {
        let driver = HeaderDriver::new(config());
        let b = block(BlockKind::Header, json!({"level": 1}));
        assert_eq!(
            driver.op(&b, INSERT_TEXT, &data(json!({"pos": 0, "new_text": "x"}))),
            Ok(None)
        );
    }

    #[test]
    fn test_header_create_fills_text_data() {
        let created = HeaderDriver::new(config())
            .create(&data(json!({"level": 2})))
            .unwrap();
        assert_eq!(
            Value::Object(created),
            json!({"level": 2, "text_data": {"text": []}})
        );
    }

    #[test]
    fn test_header_insert_into_empty_text() {
        let driver = HeaderDriver::new(config());
        let b = block(BlockKind::Header, json!({"level": 1, "text_data": {"text": []}}));
        let updated = driver
            .op(&b, INSERT_TEXT, &data(json!({"pos": 0, "new_text": "Hello"})))
            .unwrap()
            .unwrap();
        assert_eq!(
            updated["text_data"],
            json!({"text": [{"style": "default", "string": "Hello"}]})
        );
    }

    #[test]
    fn test_list_change_value_by_kind() {
        let driver = ListDriver::new(config());
        let cases = [
            ("todo", -5, 0),
            ("todo", 5, 1),
            ("unordered", 5, 0),
            ("ordered", 0, 1),
            ("ordered", 4, 4),
        ];
        for (kind, requested, expected) in cases {
            let b = block(BlockKind::List, json!({"type": kind, "value": 0}));
            let updated = driver
                .op(&b, CHANGE_VALUE, &data(json!({"new_value": requested})))
                .unwrap()
                .unwrap();
            assert_eq!(updated["value"], json!(expected), "{} {}", kind, requested);
        }
    }

    #[test]
    fn test_list_change_type_op() {
        let driver = ListDriver::new(config());
        let b = block(BlockKind::List, json!({"type": "todo", "value": 1}));

        let updated = driver
            .op(&b, CHANGE_TYPE, &data(json!({"new_type": "ordered", "ordered_value": 3})))
            .unwrap()
            .unwrap();
        assert_eq!(updated["type"], json!("ordered"));
        assert_eq!(updated["value"], json!(3));

        let updated = driver
            .op(&b, CHANGE_TYPE, &data(json!({"new_type": "unordered"})))
            .unwrap()
            .unwrap();
        assert_eq!(updated["value"], json!(0));

        let updated = driver
            .op(&b, CHANGE_TYPE, &data(json!({"new_type": "ordered"})))
            .unwrap()
            .unwrap();
        assert_eq!(updated["type"], json!("ordered"));
        assert_eq!(updated["value"], json!(0));

        assert!(matches!(
            driver.op(&b, CHANGE_TYPE, &data(json!({"new_type": "bullets"}))),
            Err(BlockError::UnsupportedType(_))
        ));
    }

    #[test]
    fn test_ordered_list_change_type_carries_value() {
        let driver = ListDriver::new(config());
        let mut b = block(
            BlockKind::List,
            json!({
                "type": "ordered",
                "value": 5,
                "level": 2,
                "text_data": {"text": [{"style": "i", "string": "step"}]}
            }),
        );
        driver.change_type(&mut b, "ordered").unwrap();
        let list = ListData::from_map(b.data.as_ref().unwrap()).unwrap();
        assert_eq!(list.value, 5);
        assert_eq!(list.level, 2);
        assert_eq!(
            list.text,
            Some(StyledText::from_runs(vec![Run::new("i", "step")]))
        );
    }

    #[test]
    fn test_todo_list_change_type_does_not_carry_value() {
        let driver = ListDriver::new(config());
        let mut b = block(BlockKind::List, json!({"type": "todo", "value": 1}));
        driver.change_type(&mut b, "ordered").unwrap();
        let list = ListData::from_map(b.data.as_ref().unwrap()).unwrap();
        assert_eq!(list.value, 1);
        assert_eq!(list.kind, ListKind::Ordered);
    }
}
