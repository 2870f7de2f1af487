//! Message envelope, payload and schema versioning

use core_types::{ServiceId, TaskId};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(Uuid);

impl MessageId {
    pub fn new() -> Self {
        Self(core_types::new_uuid())
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Msg({})", self.0)
    }
}

/// Schema version of a message payload
///
/// Minor bumps only add optional fields; major bumps break readers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SchemaVersion {
    pub major: u32,
    pub minor: u32,
}

impl SchemaVersion {
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}.{}", self.major, self.minor)
    }
}

/// Outcome of checking an incoming version against a [`VersionPolicy`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compatibility {
    Compatible,
    /// Sender is older than the oldest accepted major version
    UpgradeRequired,
    /// Sender is newer than this service
    Unsupported,
}

/// Range of schema versions a service accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionPolicy {
    current: SchemaVersion,
    min_major: u32,
}

impl VersionPolicy {
    /// Accepts only the major version of `current`
    pub const fn current(current: SchemaVersion) -> Self {
        Self {
            current,
            min_major: current.major,
        }
    }

    /// Also accepts older major versions down to `min_major`
    pub const fn with_min_major(mut self, min_major: u32) -> Self {
        self.min_major = min_major;
        self
    }

    pub fn check_compatibility(&self, incoming: &SchemaVersion) -> Compatibility {
        if incoming.major > self.current.major {
            Compatibility::Unsupported
        } else if incoming.major < self.min_major {
            Compatibility::UpgradeRequired
        } else {
            Compatibility::Compatible
        }
    }

    /// Checks `incoming` and names `service` in the error
    pub fn require(
        &self,
        service: ServiceId,
        incoming: SchemaVersion,
    ) -> Result<(), SchemaMismatchError> {
        match self.check_compatibility(&incoming) {
            Compatibility::Compatible => Ok(()),
            Compatibility::UpgradeRequired => Err(SchemaMismatchError::UpgradeRequired {
                service,
                expected_min: self.min_version(),
                received: incoming,
            }),
            Compatibility::Unsupported => Err(SchemaMismatchError::Unsupported {
                service,
                supported: (self.min_version(), self.current),
                received: incoming,
            }),
        }
    }

    pub fn min_version(&self) -> SchemaVersion {
        SchemaVersion::new(self.min_major, 0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaMismatchError {
    #[error("schema version too old for service {service}: received {received}, expected at least {expected_min}")]
    UpgradeRequired {
        service: ServiceId,
        expected_min: SchemaVersion,
        received: SchemaVersion,
    },

    #[error("schema version not supported by service {service}: received {received}, supported range {}-{}", .supported.0, .supported.1)]
    Unsupported {
        service: ServiceId,
        supported: (SchemaVersion, SchemaVersion),
        received: SchemaVersion,
    },
}

/// Routing and metadata around a serialized payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageEnvelope {
    pub id: MessageId,
    pub destination: ServiceId,
    /// Sending task, set on requests that expect a reply
    pub source: Option<TaskId>,
    pub action: String,
    pub schema_version: SchemaVersion,
    /// Id of the request this message answers
    pub correlation_id: Option<MessageId>,
    pub payload: MessagePayload,
}

impl MessageEnvelope {
    pub fn new(
        destination: ServiceId,
        action: impl Into<String>,
        schema_version: SchemaVersion,
        payload: MessagePayload,
    ) -> Self {
        Self {
            id: MessageId::new(),
            destination,
            source: None,
            action: action.into(),
            schema_version,
            correlation_id: None,
            payload,
        }
    }

    pub fn with_source(mut self, source: TaskId) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with_correlation(mut self, correlation_id: MessageId) -> Self {
        self.correlation_id = Some(correlation_id);
        self
    }

    pub fn is_response(&self) -> bool {
        self.correlation_id.is_some()
    }
}

/// JSON-encoded payload bytes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagePayload {
    data: Vec<u8>,
}

impl MessagePayload {
    pub fn new<T: Serialize>(data: &T) -> Result<Self, serde_json::Error> {
        Ok(Self {
            data: serde_json::to_vec(data)?,
        })
    }

    pub fn deserialize<T: for<'de> Deserialize<'de>>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.data)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}
