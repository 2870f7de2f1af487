//! Driver registry
//!
//! Maps each block kind to the driver that implements it. The registry is
//! built once at startup and then handed to whoever dispatches block calls.

use crate::driver::BlockDriver;
use crate::scalar::{CodeDriver, FileDriver, ImageDriver, LinkDriver, QuoteDriver};
use crate::text::{HeaderDriver, ListDriver, TextDriver};
use block_types::BlockKind;
use rich_text::MergeConfig;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("driver already registered for {0}")]
    AlreadyRegistered(BlockKind),

    #[error("no driver registered for {0}")]
    NotRegistered(BlockKind),

    #[error("unknown block type: {0}")]
    UnknownType(String),
}

/// Block kind to driver lookup
pub struct DriverRegistry {
    drivers: HashMap<BlockKind, Box<dyn BlockDriver>>,
}

impl DriverRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self {
            drivers: HashMap::new(),
        }
    }

    /// Registry holding the driver for every built-in kind
    pub fn with_defaults(config: MergeConfig) -> Self {
        let drivers: [Box<dyn BlockDriver>; 8] = [
            Box::new(TextDriver::new(config)),
            Box::new(HeaderDriver::new(config)),
            Box::new(ListDriver::new(config)),
            Box::new(CodeDriver),
            Box::new(QuoteDriver),
            Box::new(LinkDriver),
            Box::new(ImageDriver),
            Box::new(FileDriver),
        ];

        let mut registry = Self::new();
        for driver in drivers {
            registry.drivers.insert(driver.kind(), driver);
        }
        registry
    }

    /// Registers a driver for its kind
    pub fn register(&mut self, driver: Box<dyn BlockDriver>) -> Result<(), RegistryError> {
        let kind = driver.kind();
        if self.drivers.contains_key(&kind) {
            return Err(RegistryError::AlreadyRegistered(kind));
        }
        self.drivers.insert(kind, driver);
        Ok(())
    }

    /// Removes the driver for `kind`
    pub fn unregister(&mut self, kind: BlockKind) -> Result<(), RegistryError> {
        self.drivers
            .remove(&kind)
            .map(|_| ())
            .ok_or(RegistryError::NotRegistered(kind))
    }

    /// Looks up the driver for `kind`
    pub fn driver(&self, kind: BlockKind) -> Result<&dyn BlockDriver, RegistryError> {
        self.drivers
            .get(&kind)
            .map(|driver| &**driver)
            .ok_or(RegistryError::NotRegistered(kind))
    }

    /// Looks up a driver by type tag
    pub fn driver_for_tag(&self, tag: &str) -> Result<&dyn BlockDriver, RegistryError> {
        let kind: BlockKind = tag
            .parse()
            .map_err(|_| RegistryError::UnknownType(tag.to_string()))?;
        self.driver(kind)
            .map_err(|_| RegistryError::UnknownType(tag.to_string()))
    }

    /// Sorted type tags of every registered driver
    pub fn registered_types(&self) -> Vec<&'static str> {
        let mut tags: Vec<&'static str> = self.drivers.keys().map(BlockKind::as_str).collect();
        tags.sort_unstable();
        tags
    }

    pub fn len(&self) -> usize {
        self.drivers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drivers.is_empty()
    }
}

impl Default for DriverRegistry {
    fn default() -> Self {
        Self::new()
    }
}
