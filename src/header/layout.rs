//! Census 2010 SF1 geographic header record layout.
//!
//! Offsets are 1-based byte positions as published in the SF1 technical documentation
//! and must match the dissemination files exactly.

use super::column::{extract_column, extract_text_column};
use crate::types::Value;

/// A fixed-width field of the geographic header record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeoField {
    pub name: &'static str,
    pub start: usize, // 1-based
    pub width: usize,
    pub numeric: bool,
}

impl GeoField {
    const fn text(name: &'static str, start: usize, width: usize) -> Self {
        Self { name, start, width, numeric: false }
    }

    const fn number(name: &'static str, start: usize, width: usize) -> Self {
        Self { name, start, width, numeric: true }
    }

    /// Extract this field from every record, numeric or text per the layout.
    pub fn extract<R: AsRef<[u8]>>(&self, records: &[R]) -> Vec<Value> {
        extract_column(records, self.start, self.width, self.numeric)
    }

    /// Extract this field from every record as text.
    pub fn extract_text<R: AsRef<[u8]>>(&self, records: &[R]) -> Vec<String> {
        extract_text_column(records, self.start, self.width)
    }
}

pub const SUMLEV: GeoField = GeoField::text("SUMLEV", 9, 3);
pub const LOGRECNO: GeoField = GeoField::number("LOGRECNO", 19, 7);
pub const STATE_COUNTY: GeoField = GeoField::text("STATE+COUNTY", 28, 5);
pub const TRACT: GeoField = GeoField::text("TRACT", 55, 6);
pub const BLKGRP: GeoField = GeoField::text("BLKGRP", 61, 1);
pub const BLOCK: GeoField = GeoField::text("BLOCK", 62, 4);
pub const AREALAND: GeoField = GeoField::number("AREALAND", 199, 14);
pub const AREAWATR: GeoField = GeoField::number("AREAWATR", 213, 14);
pub const POP100: GeoField = GeoField::number("POP100", 319, 9);
pub const HU100: GeoField = GeoField::number("HU100", 328, 9);
pub const INTPTLAT: GeoField = GeoField::number("INTPTLAT", 337, 11);
pub const INTPTLON: GeoField = GeoField::number("INTPTLON", 348, 12);

/// Every field extracted from the header, in record order.
pub const ALL: [GeoField; 12] = [
    SUMLEV, LOGRECNO, STATE_COUNTY, TRACT, BLKGRP, BLOCK,
    AREALAND, AREAWATR, POP100, HU100, INTPTLAT, INTPTLON,
];
