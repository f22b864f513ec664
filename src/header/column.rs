use crate::types::Value;

/// Slice bytes `start .. start + width` (1-based `start`) out of every record.
///
/// When `as_number` is set each slice is parsed as a number, falling back per row
/// to the raw text; otherwise every element is text. Short records yield short or
/// empty slices rather than failing.
pub fn extract_column<R: AsRef<[u8]>>(records: &[R], start: usize, width: usize, as_number: bool) -> Vec<Value> {
    let begin = start.saturating_sub(1);
    records.iter()
        .map(|record| {
            let record = record.as_ref();
            let range = begin.min(record.len())..(begin + width).min(record.len());
            let raw = String::from_utf8_lossy(&record[range]);
            if as_number { Value::parse(&raw) } else { Value::Text(raw.into_owned()) }
        })
        .collect()
}

/// Text-only variant of [`extract_column`].
pub fn extract_text_column<R: AsRef<[u8]>>(records: &[R], start: usize, width: usize) -> Vec<String> {
    extract_column(records, start, width, false).into_iter()
        .map(|value| match value {
            Value::Text(s) => s,
            Value::Number(n) => n.to_string(),
        })
        .collect()
}
