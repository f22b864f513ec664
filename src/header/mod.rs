mod column;
mod header;
pub mod layout;

pub use column::{extract_column, extract_text_column};
pub use header::{CollisionPolicy, GeoHeader};
pub use layout::GeoField;

#[cfg(test)]
pub(crate) use header::tests::block_record;
