//! JSON encoding of extracted packages.

use std::io::Write;

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::error::{SourceError, SourceResult};

/// Write `value` as indented JSON followed by a newline.
pub fn write_json<W: Write, T: Serialize>(
    mut writer: W,
    value: &T,
    indent: &str,
) -> SourceResult<()> {
    {
        let formatter = PrettyFormatter::with_indent(indent.as_bytes());
        let mut serializer = Serializer::with_formatter(&mut writer, formatter);
        value
            .serialize(&mut serializer)
            .map_err(|source| SourceError::Encode { source })?;
    }
    writer
        .write_all(b"\n")
        .and_then(|()| writer.flush())
        .map_err(|e| SourceError::Encode {
            source: serde_json::Error::io(e),
        })
}

/// Indented JSON as a string, newline included.
pub fn to_json_string<T: Serialize>(value: &T, indent: &str) -> SourceResult<String> {
    let mut buffer = Vec::new();
    write_json(&mut buffer, value, indent)?;
    // serde_json only emits UTF-8
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
