mod cache;
mod reader;
mod table;

pub use cache::CachedSegmentReader;
pub use reader::{LOGRECNO_COLUMN, SegmentReader};
pub use table::SegmentTable;

#[cfg(test)]
pub(crate) use reader::tests::{make_dictionary, write_segment};
