//! # Content Inspection
//!
//! Light checks on the contents of an investigation's tidy and sidecar
//! files. Each check yields at most one message; problems are reported,
//! never raised.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::parser::SidecarParser;

/// Message reported when no sidecar parser is available.
pub const PARSER_UNAVAILABLE_MESSAGE: &str =
    "YAML support is not available. Cannot check sidecar YAML files.";

/// Check that a tidy file's header line is UTF-8 and tab-separated.
///
/// Only the first line is read, so the rest of the file never affects the
/// outcome. A line ends at `\n`, `\r\n` or a lone `\r`.
pub fn inspect_tidy(path: &Path, file_name: &str) -> Option<String> {
    let first_line = match read_first_line(path) {
        Ok(line) => line,
        Err(e) => return Some(format!("Error reading tidy data file '{file_name}': {e}")),
    };
    match String::from_utf8(first_line) {
        Ok(header) if header.contains('\t') => None,
        Ok(_) => Some(format!(
            "Tidy data file '{file_name}' does not appear to be tab-separated."
        )),
        Err(_) => Some(format!("Tidy data file '{file_name}' is not encoded in UTF-8.")),
    }
}

/// Check that a sidecar file parses.
///
/// Without a parser the check cannot run and a fixed message is returned
/// instead.
pub fn inspect_sidecar(
    path: &Path,
    file_name: &str,
    parser: Option<&dyn SidecarParser>,
) -> Option<String> {
    let Some(parser) = parser else {
        return Some(PARSER_UNAVAILABLE_MESSAGE.to_string());
    };
    // Read and decode failures are reported the same way as syntax errors.
    let result = std::fs::read(path)
        .map_err(|e| e.to_string())
        .and_then(|bytes| String::from_utf8(bytes).map_err(|e| e.to_string()))
        .and_then(|text| parser.parse_str(&text));
    result.err().map(|detail| {
        format!(
            "Sidecar file '{file_name}' is not valid {}: {detail}",
            parser.format_name()
        )
    })
}

/// Bytes up to the first `\r` or `\n`, whichever comes first.
fn read_first_line(path: &Path) -> std::io::Result<Vec<u8>> {
    let mut reader = BufReader::new(File::open(path)?);
    let mut line = Vec::new();
    loop {
        let available = match reader.fill_buf() {
            Ok(buf) => buf,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        if available.is_empty() {
            return Ok(line);
        }
        if let Some(end) = available.iter().position(|b| *b == b'\r' || *b == b'\n') {
            line.extend_from_slice(&available[..end]);
            return Ok(line);
        }
        line.extend_from_slice(available);
        let consumed = available.len();
        reader.consume(consumed);
    }
}
