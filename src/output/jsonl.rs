use serde::Serialize;
use std::io::Write;

/// Write JSONL records to an output stream (one JSON object per line).
pub fn write_jsonl<T: Serialize>(out: &mut dyn Write, records: &[T]) -> Result<(), String> {
    for record in records {
        serde_json::to_writer(&mut *out, record)
            .map_err(|error| format!("failed to serialize JSON record: {error}"))?;
        out.write_all(b"\n")
            .map_err(|error| format!("failed to write JSONL newline: {error}"))?;
    }

    out.flush()
        .map_err(|error| format!("failed to flush JSONL output: {error}"))?;

    Ok(())
}

/// Render records to JSONL bytes and return them with their blake3 digest.
pub fn render_jsonl<T: Serialize>(records: &[T]) -> Result<(Vec<u8>, String), String> {
    let mut buffer = Vec::new();
    write_jsonl(&mut buffer, records)?;
    let hash = format!("blake3:{}", blake3::hash(&buffer).to_hex());
    Ok((buffer, hash))
}
