//! Block note service contract tests
//!
//! These tests define the stable contract for the block-content service:
//! envelope actions, the schema version, request fields, type tags, op
//! names and the payload wire shape of every block kind.

use ipc::SchemaVersion;

// ===== Block Note Contract Version =====
#[allow(dead_code)]
const BLOCKNOTE_CONTRACT_VERSION: SchemaVersion = SchemaVersion::new(1, 0);

// ===== Contract Tests =====

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use block_drivers::ops;
    use block_types::{
        BlockKind, BlockPayload, CodeData, ConversionTarget, FileData, HeaderData, ImageData,
        LinkData, ListData, ListKind, QuoteData,
    };
    use core_types::{BlockId, NoteId, ServiceId};
    use ipc::{
        BlockRequest, BlockResponse, ChangeTypeRequest, CreateBlockRequest, ErrorCode,
        GetAsFirstRequest, MessageId, OpBlockRequest, ResponseError, BLOCKNOTE_SCHEMA_VERSION,
    };
    use rich_text::{Run, StyledText};
    use serde_json::{json, Map, Value};

    #[test]
    fn test_schema_version_is_stable() {
        assert_eq!(BLOCKNOTE_SCHEMA_VERSION, BLOCKNOTE_CONTRACT_VERSION);
        assert_eq!(BLOCKNOTE_SCHEMA_VERSION.major, 1);
        assert_eq!(BLOCKNOTE_SCHEMA_VERSION.minor, 0);
    }

    #[test]
    fn test_action_identifiers_are_stable() {
        assert_eq!(ipc::CREATE_BLOCK_ACTION, "blocknote.block.create");
        assert_eq!(ipc::OP_BLOCK_ACTION, "blocknote.block.op");
        assert_eq!(ipc::GET_AS_FIRST_ACTION, "blocknote.block.first");
        assert_eq!(ipc::CHANGE_TYPE_ACTION, "blocknote.block.change_type");
        assert_eq!(ipc::GET_BLOCK_ACTION, "blocknote.block.get");
        assert_eq!(ipc::REGISTERED_TYPES_ACTION, "blocknote.block.types");
        assert_eq!(ipc::BLOCK_RESPONSE_ACTION, "blocknote.block.response");
    }

    #[test]
    fn test_create_block_contract() {
        let service_id = ServiceId::new();
        let note_id = NoteId::new();
        let request = CreateBlockRequest {
            block_type: "text".to_string(),
            note_id,
            data: Map::new(),
        };

        let envelope = request.into_envelope(service_id).unwrap();
        assert_envelope(&envelope, ipc::CREATE_BLOCK_ACTION, BLOCKNOTE_CONTRACT_VERSION);
        assert_eq!(envelope.destination, service_id);

        let raw = payload_json(&envelope);
        assert_eq!(field_names(&raw), vec!["block_type", "data", "note_id"]);
        assert_eq!(
            raw,
            json!({"block_type": "text", "note_id": note_id, "data": {}})
        );
    }

    #[test]
    fn test_op_block_contract() {
        let service_id = ServiceId::new();
        let block_id = BlockId::new();
        let raw = json!({
            "block_id": block_id,
            "op_name": "insert_text",
            "data": {"pos": 0, "new_text": "hi"}
        });

        let envelope =
            raw_envelope(service_id, ipc::OP_BLOCK_ACTION, BLOCKNOTE_CONTRACT_VERSION, &raw);
        assert_envelope(&envelope, OpBlockRequest::ACTION, BLOCKNOTE_CONTRACT_VERSION);

        let request: OpBlockRequest = envelope.payload.deserialize().unwrap();
        assert_eq!(request.block_id, block_id);
        assert_eq!(request.op_name, ops::INSERT_TEXT);
        assert_eq!(request.data.get("new_text"), Some(&json!("hi")));
    }

    #[test]
    fn test_block_id_requests_contract() {
        let block_id = BlockId::new();

        let first = serde_json::to_value(GetAsFirstRequest { block_id }).unwrap();
        assert_eq!(first, json!({"block_id": block_id}));

        let change = serde_json::to_value(ChangeTypeRequest {
            block_id,
            new_type: "header_2".to_string(),
        })
        .unwrap();
        assert_eq!(change, json!({"block_id": block_id, "new_type": "header_2"}));
    }

    #[test]
    fn test_response_contract() {
        let request_id = MessageId::new();
        let reply = BlockResponse::ok(json!("preview"))
            .into_envelope(ServiceId::new(), request_id)
            .unwrap();
        assert_envelope(&reply, ipc::BLOCK_RESPONSE_ACTION, BLOCKNOTE_CONTRACT_VERSION);
        assert_eq!(reply.correlation_id, Some(request_id));

        let ok = payload_json(&reply);
        assert_eq!(field_names(&ok), vec!["output", "status", "version"]);
        assert_eq!(
            ok,
            json!({"version": {"major": 1, "minor": 0}, "status": "Ok", "output": "preview"})
        );

        let err = serde_json::to_value(BlockResponse::error(ResponseError::new(
            ErrorCode::InvalidRange,
            "invalid range 3..3",
        )))
        .unwrap();
        assert_eq!(
            err["status"],
            json!({"Error": {"code": "InvalidRange", "message": "invalid range 3..3", "details": null}})
        );
    }

    #[test]
    fn test_error_codes_are_stable() {
        let codes = [
            (ErrorCode::InvalidRange, "InvalidRange"),
            (ErrorCode::UnsupportedType, "UnsupportedType"),
            (ErrorCode::Decode, "Decode"),
            (ErrorCode::NotFound, "NotFound"),
            (ErrorCode::AlreadyInUse, "AlreadyInUse"),
            (ErrorCode::Internal, "Internal"),
        ];
        for (code, name) in codes {
            assert_eq!(serde_json::to_value(code).unwrap(), json!(name));
        }
    }

    #[test]
    fn test_type_tags_are_stable() {
        let tags: Vec<&str> = BlockKind::ALL.iter().map(|kind| kind.as_str()).collect();
        assert_eq!(
            tags,
            vec!["text", "header", "list", "code", "quote", "link", "img", "file"]
        );
        for kind in BlockKind::ALL {
            assert_eq!(serde_json::to_value(kind).unwrap(), json!(kind.as_str()));
        }
    }

    #[test]
    fn test_conversion_targets_are_stable() {
        let targets: Vec<&str> = ConversionTarget::ALL.iter().map(|t| t.as_str()).collect();
        assert_eq!(
            targets,
            vec![
                "text", "header_1", "header_2", "header_3", "todo", "unordered", "ordered",
                "code", "quote", "link", "img", "file"
            ]
        );
    }

    #[test]
    fn test_op_names_are_stable() {
        assert_eq!(ops::APPLY_STYLE, "apply_style");
        assert_eq!(ops::INSERT_TEXT, "insert_text");
        assert_eq!(ops::DELETE_RANGE, "delete_range");
        assert_eq!(ops::CHANGE_LEVEL, "change_level");
        assert_eq!(ops::CHANGE_VALUE, "change_value");
        assert_eq!(ops::CHANGE_TYPE, "change_type");
        assert_eq!(ops::CHANGE_TEXT, "change_text");
        assert_eq!(ops::CHANGE_URL, "change_url");
        assert_eq!(ops::CHANGE_SRC, "change_src");
        assert_eq!(ops::CHANGE_ALT, "change_alt");
        assert_eq!(ops::ANALYSE_LANG, "analyse_lang");
    }

    #[test]
    fn test_payload_wire_shapes_are_stable() {
        let runs = StyledText::from_runs(vec![Run::new("bold", "Hi")]);
        let runs_json = json!([{"style": "bold", "string": "Hi"}]);

        let cases = [
            (BlockPayload::Text(runs.clone()), json!({"text": runs_json})),
            (
                BlockPayload::Header(HeaderData {
                    text: Some(runs.clone()),
                    level: 2,
                }),
                json!({"level": 2, "text_data": {"text": runs_json}}),
            ),
            (
                BlockPayload::List(ListData {
                    text: Some(runs.clone()),
                    level: 1,
                    kind: ListKind::Ordered,
                    value: 3,
                }),
                json!({"level": 1, "type": "ordered", "value": 3, "text_data": {"text": runs_json}}),
            ),
            (
                BlockPayload::Code(CodeData {
                    text: "fn main() {}".to_string(),
                    lang: "Rust".to_string(),
                }),
                json!({"text": "fn main() {}", "lang": "Rust"}),
            ),
            (
                BlockPayload::Quote(QuoteData {
                    text: "q".to_string(),
                }),
                json!({"text": "q"}),
            ),
            (
                BlockPayload::Link(LinkData {
                    text: "home".to_string(),
                    url: "https://example.org".to_string(),
                }),
                json!({"text": "home", "url": "https://example.org"}),
            ),
            (
                BlockPayload::Image(ImageData {
                    src: "a.png".to_string(),
                    alt: "a".to_string(),
                }),
                json!({"src": "a.png", "alt": "a"}),
            ),
            (
                BlockPayload::File(FileData {
                    src: "a.pdf".to_string(),
                }),
                json!({"src": "a.pdf"}),
            ),
        ];

        for (payload, expected) in cases {
            let kind = payload.kind();
            assert_eq!(Value::Object(payload.to_map()), expected, "{}", kind);
        }
    }
}
