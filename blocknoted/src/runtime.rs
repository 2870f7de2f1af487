//! # Daemon Runtime
//!
//! Replays a request script against an in-process block service. Each
//! request is wrapped in a versioned envelope, handled, and its response
//! written to the output as one JSON line.

use crate::config::{ConfigError, DaemonConfig};
use crate::request_script::{BlockRef, RequestScript, RequestScriptError, ScriptedRequest};
use block_drivers::DriverRegistry;
use core_types::{BlockId, NoteId, TaskId};
use ipc::{
    BlockRequest, BlockResponse, ChangeTypeRequest, CreateBlockRequest, GetAsFirstRequest,
    GetBlockRequest, MessageEnvelope, OpBlockRequest, RegisteredTypesRequest,
};
use services_blocknote::{BlockNoteService, ServiceError};
use std::io::{self, Write};
use thiserror::Error;

/// Daemon runtime error types
#[derive(Debug, Error)]
pub enum DaemonError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Script error: {0}")]
    Parse(#[from] RequestScriptError),

    #[error("Script error at line {line}: {message}")]
    Script { line: usize, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Payload error: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("Service error: {0}")]
    Service(#[from] ServiceError),
}

/// Daemon runtime
pub struct DaemonRuntime {
    service: BlockNoteService,
    script: RequestScript,
    /// Sender recorded on every request envelope
    task: TaskId,
    /// Note every scripted block is created in
    note: NoteId,
    /// Ids of created blocks, in creation order
    created: Vec<BlockId>,
    max_steps: usize,
    steps: usize,
}

impl DaemonRuntime {
    /// Creates a runtime for `script_text` using `config`
    pub fn new(config: &DaemonConfig, script_text: &str) -> Result<Self, DaemonError> {
        let registry = DriverRegistry::with_defaults(config.merge_config());
        let service = BlockNoteService::in_memory(registry);
        log::info!(
            "block service {} started with types: {}",
            service.service_id(),
            service.registered_types().join(", ")
        );

        Ok(Self {
            service,
            script: RequestScript::from_text(script_text)?,
            task: TaskId::new(),
            note: NoteId::new(),
            created: Vec::new(),
            max_steps: config.max_steps,
            steps: 0,
        })
    }

    /// Replays the script, writing one response line per request.
    ///
    /// Returns when the script is exhausted or max steps is reached.
    pub fn run<W: Write>(&mut self, out: &mut W) -> Result<(), DaemonError> {
        while !self.script.is_empty() {
            if self.max_steps > 0 && self.steps >= self.max_steps {
                log::info!("stopping after {} requests", self.steps);
                break;
            }
            self.step(out)?;
        }
        out.flush()?;
        log::info!("block service {} stopped", self.service.service_id());
        Ok(())
    }

    /// Replays the next request, if any
    pub fn step<W: Write>(&mut self, out: &mut W) -> Result<(), DaemonError> {
        let Some((line, request)) = self.script.next_request() else {
            return Ok(());
        };

        let response = self.execute(line, request)?;
        serde_json::to_writer(&mut *out, &response)?;
        writeln!(out)?;
        self.steps += 1;
        Ok(())
    }

    /// Sends one scripted request through the service
    pub fn execute(
        &mut self,
        line: usize,
        request: ScriptedRequest,
    ) -> Result<BlockResponse, DaemonError> {
        let dest = self.service.service_id();
        let is_create = matches!(request, ScriptedRequest::Create { .. });

        let envelope = match request {
            ScriptedRequest::Create { block_type, data } => CreateBlockRequest {
                block_type,
                note_id: self.note,
                data,
            }
            .into_envelope(dest)?,
            ScriptedRequest::Op {
                block,
                op_name,
                data,
            } => OpBlockRequest {
                block_id: self.resolve(line, block)?,
                op_name,
                data,
            }
            .into_envelope(dest)?,
            ScriptedRequest::First { block } => GetAsFirstRequest {
                block_id: self.resolve(line, block)?,
            }
            .into_envelope(dest)?,
            ScriptedRequest::ChangeType { block, new_type } => ChangeTypeRequest {
                block_id: self.resolve(line, block)?,
                new_type,
            }
            .into_envelope(dest)?,
            ScriptedRequest::Get { block } => GetBlockRequest {
                block_id: self.resolve(line, block)?,
            }
            .into_envelope(dest)?,
            ScriptedRequest::Types => RegisteredTypesRequest {}.into_envelope(dest)?,
        };

        let response = self.send(&envelope.with_source(self.task))?;
        if is_create {
            self.record_created(&response)?;
        }
        Ok(response)
    }

    fn send(&mut self, envelope: &MessageEnvelope) -> Result<BlockResponse, DaemonError> {
        log::debug!(
            "sending {} {} ({} bytes)",
            envelope.action,
            envelope.id,
            envelope.payload.as_bytes().len()
        );
        let reply = self.service.handle(envelope)?;
        Ok(reply.payload.deserialize()?)
    }

    fn record_created(&mut self, response: &BlockResponse) -> Result<(), DaemonError> {
        if !response.is_ok() {
            return Ok(());
        }
        if let Some(id) = response.output.as_ref().and_then(|output| output.get("id")) {
            self.created.push(serde_json::from_value(id.clone())?);
        }
        Ok(())
    }

    fn resolve(&self, line: usize, block: BlockRef) -> Result<BlockId, DaemonError> {
        let resolved = match block {
            BlockRef::Last => self.created.last().copied(),
            BlockRef::Nth(n) => n
                .checked_sub(1)
                .and_then(|index| self.created.get(index))
                .copied(),
            BlockRef::Id(id) => Some(id),
        };
        resolved.ok_or_else(|| DaemonError::Script {
            line,
            message: match block {
                BlockRef::Nth(n) => format!("No block ${} has been created", n),
                _ => "No block has been created".to_string(),
            },
        })
    }

    /// Note the scripted blocks live in
    pub fn note_id(&self) -> NoteId {
        self.note
    }

    /// Ids of the blocks created so far
    pub fn created_blocks(&self) -> &[BlockId] {
        &self.created
    }

    /// Returns the step count
    pub fn step_count(&self) -> usize {
        self.steps
    }

    /// Returns the hosted service (for testing)
    pub fn service(&self) -> &BlockNoteService {
        &self.service
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ipc::ResponseStatus;
    use serde_json::json;

    fn runtime(script: &str) -> DaemonRuntime {
        DaemonRuntime::new(&DaemonConfig::default(), script).unwrap()
    }

    #[test]
    fn test_runtime_creation() {
        let runtime = runtime("types");
        assert_eq!(runtime.step_count(), 0);
        assert!(runtime.created_blocks().is_empty());
    }

    #[test]
    fn test_runtime_rejects_bad_script() {
        assert!(matches!(
            DaemonRuntime::new(&DaemonConfig::default(), "rename $"),
            Err(DaemonError::Parse(_))
        ));
    }

    #[test]
    fn test_runtime_writes_one_line_per_request() {
        let mut runtime = runtime(
            r#"
            create text
            op $ insert_text {"pos": 0, "new_text": "hello"}
            first $
            "#,
        );
        let mut out = Vec::new();
        runtime.run(&mut out).unwrap();

        let lines: Vec<BlockResponse> = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(lines.len(), 3);
        assert!(lines.iter().all(BlockResponse::is_ok));
        assert_eq!(lines[2].output, Some(json!("hello")));
        assert_eq!(runtime.step_count(), 3);
    }

    #[test]
    fn test_runtime_max_steps() {
        let config = DaemonConfig {
            max_steps: 2,
            ..DaemonConfig::default()
        };
        let mut runtime = DaemonRuntime::new(&config, "create text\ncreate code\ncreate quote").unwrap();
        runtime.run(&mut Vec::new()).unwrap();
        assert_eq!(runtime.step_count(), 2);
        assert_eq!(runtime.created_blocks().len(), 2);
    }

    #[test]
    fn test_failed_create_records_nothing() {
        let mut runtime = runtime("create table\nfirst $");
        let mut out = Vec::new();
        runtime.step(&mut out).unwrap();
        assert!(runtime.created_blocks().is_empty());

        let err = runtime.step(&mut out).unwrap_err();
        assert!(matches!(err, DaemonError::Script { line: 2, .. }));
    }

    #[test]
    fn test_service_errors_are_responses() {
        let mut runtime = runtime("types");
        let response = runtime
            .execute(
                1,
                ScriptedRequest::First {
                    block: BlockRef::Id(BlockId::new()),
                },
            )
            .unwrap();
        assert!(matches!(response.status, ResponseStatus::Error(_)));
    }
}
