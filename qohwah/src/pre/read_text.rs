use crate::error::{PersistError, PersistResult};
use std::fs;
use std::path::Path;

const BOM: char = '\u{feff}';

/// decode_text turns the raw bytes of a text file into a string. Invalid UTF-8 sequences (e.g.
/// Windows-1252 umlauts) are replaced instead of failing the whole file, a leading byte order
/// mark is removed.
pub fn decode_text(bytes: &[u8]) -> String {
    let content = String::from_utf8_lossy(bytes);

    match content.strip_prefix(BOM) {
        Some(stripped) => stripped.to_owned(),
        None => content.into_owned(),
    }
}

/// read_text reads a text file leniently, see `decode_text`.
pub fn read_text(filepath: &Path) -> PersistResult<String> {
    let bytes = fs::read(filepath).map_err(|e| PersistError::from_io(filepath, e))?;
    Ok(decode_text(&bytes))
}
