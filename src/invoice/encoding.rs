//! Byte-to-text decoding for invoice XML.
//!
//! CFDI files are normally UTF-8, but older generators emit ISO-8859-1 or
//! UTF-16. The encoding is taken from the byte order mark when there is one,
//! otherwise from the `encoding` pseudo-attribute of the XML declaration,
//! otherwise UTF-8.

use encoding_rs::{Encoding, UTF_8};

const DECLARATION_START: &[u8] = b"<?xml";
const DECLARATION_END: &[u8] = b"?>";
/// Declarations longer than this are not looked at.
const DECLARATION_LIMIT: usize = 512;

/// Decode raw invoice bytes to text, dropping any byte order mark.
pub fn decode_xml(bytes: &[u8]) -> Result<String, String> {
    let (encoding, body) = match Encoding::for_bom(bytes) {
        Some((encoding, bom_length)) => (encoding, &bytes[bom_length..]),
        None => (declared_encoding(bytes)?, bytes),
    };

    let (text, had_errors) = encoding.decode_without_bom_handling(body);
    if had_errors {
        return Err(format!("not valid {}: malformed byte sequence", encoding.name()));
    }
    Ok(text.into_owned())
}

/// Encoding named by the XML declaration, UTF-8 when there is none.
///
/// A declaration readable as ASCII means the bytes are ASCII-compatible, so a
/// UTF-16 label without a byte order mark falls back to UTF-8.
fn declared_encoding(bytes: &[u8]) -> Result<&'static Encoding, String> {
    let Some(label) = declaration_encoding_label(bytes) else {
        return Ok(UTF_8);
    };
    let encoding = Encoding::for_label(label.as_bytes())
        .ok_or_else(|| format!("unsupported encoding '{label}' in XML declaration"))?;
    Ok(encoding.output_encoding())
}

fn declaration_encoding_label(bytes: &[u8]) -> Option<&str> {
    if !bytes.starts_with(DECLARATION_START) {
        return None;
    }
    let window = &bytes[..bytes.len().min(DECLARATION_LIMIT)];
    let end = window
        .windows(DECLARATION_END.len())
        .position(|candidate| candidate == DECLARATION_END)?;
    let declaration = std::str::from_utf8(&window[..end]).ok()?;

    let after_key = &declaration[declaration.find("encoding")? + "encoding".len()..];
    let after_equals = after_key.trim_start().strip_prefix('=')?.trim_start();
    let quote = after_equals.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    let value = &after_equals[1..];
    value.find(quote).map(|close| value[..close].trim())
}
