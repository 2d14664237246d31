use crate::error::Result;
use crate::types::NormalizedRow;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Sink trait for persisting the normalized schedule table
#[async_trait]
pub trait ScheduleSink: Send + Sync {
    /// Replace the named table's contents with the given rows, preserving
    /// their order
    async fn replace_table(&self, table: &str, rows: &[NormalizedRow]) -> Result<()>;
}

/// In-memory sink implementation for development/testing
pub struct InMemorySink {
    tables: Arc<Mutex<HashMap<String, Vec<NormalizedRow>>>>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self {
            tables: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Returns a copy of a table's rows, if the table has been loaded
    pub fn rows(&self, table: &str) -> Option<Vec<NormalizedRow>> {
        let tables = self.tables.lock().unwrap();
        tables.get(table).cloned()
    }
}

impl Default for InMemorySink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ScheduleSink for InMemorySink {
    async fn replace_table(&self, table: &str, rows: &[NormalizedRow]) -> Result<()> {
        let mut tables = self.tables.lock().unwrap();
        tables.insert(table.to_string(), rows.to_vec());

        debug!("Replaced in-memory table {} with {} rows", table, rows.len());
        Ok(())
    }
}
