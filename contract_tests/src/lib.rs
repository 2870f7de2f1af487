//! # Block Note Contract Tests
//!
//! Golden tests for the block-content service contract, so the wire
//! surface cannot drift by accident.
//!
//! ## What is pinned
//!
//! - Envelope action identifiers and the schema version
//! - Request and response field names
//! - Block type tags, conversion targets and op names
//! - The payload map of every block kind
//!
//! Changing any of these is a breaking change for stored blocks or for
//! callers and needs a schema version bump.

pub mod blocknote;

/// Helpers shared by contract modules
pub mod test_helpers {
    use core_types::ServiceId;
    use ipc::{MessageEnvelope, MessagePayload, SchemaVersion};
    use serde::Serialize;
    use serde_json::Value;

    /// Builds a request envelope from a raw payload value, bypassing the
    /// typed request structs
    pub fn raw_envelope<T: Serialize>(
        destination: ServiceId,
        action: &str,
        version: SchemaVersion,
        payload: &T,
    ) -> MessageEnvelope {
        let payload = MessagePayload::new(payload).expect("payload serializes");
        MessageEnvelope::new(destination, action, version, payload)
    }

    /// Asserts the envelope travels under `action` at `version`
    pub fn assert_envelope(envelope: &MessageEnvelope, action: &str, version: SchemaVersion) {
        assert_eq!(
            envelope.action, action,
            "action identifier changed for {}",
            action
        );
        assert_eq!(
            envelope.schema_version, version,
            "schema version changed for {}: {}",
            action, envelope.schema_version
        );
    }

    /// Payload of an envelope as untyped JSON
    pub fn payload_json(envelope: &MessageEnvelope) -> Value {
        envelope.payload.deserialize().expect("payload is JSON")
    }

    /// Sorted key names of a JSON object
    pub fn field_names(value: &Value) -> Vec<String> {
        let mut names: Vec<String> = value
            .as_object()
            .map(|map| map.keys().cloned().collect())
            .unwrap_or_default();
        names.sort();
        names
    }
}
