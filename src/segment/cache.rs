use std::collections::{HashMap, hash_map::Entry};

use tracing::debug;

use super::{SegmentReader, SegmentTable};
use crate::{error::Result, types::Value};

/// Opt-in caching layer over a [`SegmentReader`].
///
/// Parsed segment tables are kept keyed by (state, segment) until invalidated,
/// so several fields from one segment only parse the file once.
#[derive(Debug)]
pub struct CachedSegmentReader {
    reader: SegmentReader,
    tables: HashMap<(String, String), SegmentTable>,
}

impl CachedSegmentReader {
    pub fn new(reader: SegmentReader) -> Self {
        Self { reader, tables: HashMap::new() }
    }

    #[inline] pub fn reader(&self) -> &SegmentReader { &self.reader }

    /// Read `code`, parsing its segment file only if it is not already cached.
    pub fn read(&mut self, code: &str, as_number: bool) -> Result<HashMap<u32, Value>> {
        let location = self.reader.dictionary().lookup(code)?.clone();
        self.table(&location.segment)?.field(location.column, as_number)
    }

    /// Read `code` as numbers, parsing its segment file only if it is not already cached.
    pub fn read_numbers(&mut self, code: &str) -> Result<HashMap<u32, f64>> {
        let location = self.reader.dictionary().lookup(code)?.clone();
        self.table(&location.segment)?.numbers(location.column)
    }

    fn table(&mut self, segment: &str) -> Result<&SegmentTable> {
        let key = (self.reader.state().to_string(), segment.to_string());
        let table: &SegmentTable = match self.tables.entry(key) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(self.reader.load_segment(segment)?),
        };
        Ok(table)
    }

    /// Whether the given segment is currently cached.
    pub fn is_cached(&self, segment: &str) -> bool {
        self.tables.contains_key(&(self.reader.state().to_string(), segment.to_string()))
    }

    /// Drop one segment from the cache; the next read reparses it.
    pub fn invalidate(&mut self, segment: &str) -> bool {
        let removed = self.tables.remove(&(self.reader.state().to_string(), segment.to_string())).is_some();
        if removed { debug!("[segment] invalidated segment {} for {}", segment, self.reader.state()) }
        removed
    }

    /// Drop every cached segment.
    pub fn clear(&mut self) { self.tables.clear() }
}
