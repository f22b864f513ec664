//! Fixed-width record reading.

use std::{fs::File, io::{BufRead, BufReader}, path::Path};

use crate::error::{Result, Sf1Error};

/// Reads every non-blank line of `path` as a raw fixed-width record.
///
/// Records are kept as bytes since the Census files are Latin-1 and the layout
/// offsets count bytes. A record wrapped in double quotes is unwrapped first.
pub(crate) fn read_records(path: &Path) -> Result<Vec<Vec<u8>>> {
    if !path.is_file() {
        return Err(Sf1Error::MissingFile(path.to_path_buf()));
    }
    let reader = BufReader::new(File::open(path)?);

    let mut records = Vec::new();
    for line in reader.split(b'\n') {
        let mut line = line?;
        if line.last() == Some(&b'\r') { line.pop(); }
        if line.is_empty() { continue }
        records.push(unquote(line));
    }
    Ok(records)
}

/// Strip one layer of surrounding double quotes, collapsing escaped `""` pairs.
pub(crate) fn unquote(record: Vec<u8>) -> Vec<u8> {
    if record.len() < 2 || record[0] != b'"' || record[record.len() - 1] != b'"' {
        return record;
    }

    let inner = &record[1..record.len() - 1];
    let mut out = Vec::with_capacity(inner.len());
    let mut i = 0;
    while i < inner.len() {
        out.push(inner[i]);
        if inner[i] == b'"' && inner.get(i + 1) == Some(&b'"') { i += 1 }
        i += 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn unquote_plain_record_is_noop() {
        assert_eq!(unquote(b"SF1ST NY 040".to_vec()), b"SF1ST NY 040".to_vec());
        assert_eq!(unquote(b"\"".to_vec()), b"\"".to_vec());
    }

    #[test]
    fn unquote_strips_and_unescapes() {
        assert_eq!(unquote(b"\"SF1ST \"\"A\"\" 040\"".to_vec()), b"SF1ST \"A\" 040".to_vec());
    }

    #[test]
    fn read_records_skips_blank_lines_and_crlf() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"first record\r\n\nsecond \xe9record\n").unwrap();

        let records = read_records(file.path()).unwrap();
        assert_eq!(records, vec![b"first record".to_vec(), b"second \xe9record".to_vec()]);
    }
}
