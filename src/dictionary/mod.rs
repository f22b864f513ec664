mod dictionary;

pub use dictionary::{DataDictionary, DescriptorRow, FieldLocation, HeadingEntry, FIRST_DATA_COLUMN};
