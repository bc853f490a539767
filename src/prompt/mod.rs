use std::io::{BufRead, Write};
use std::path::PathBuf;

/// Ask `question` on `output` and read one line from `input`, trimmed.
///
/// End of input before any line is an error so a closed stdin cannot be
/// mistaken for an empty answer.
pub fn ask(input: &mut dyn BufRead, output: &mut dyn Write, question: &str) -> Result<String, String> {
    output
        .write_all(question.as_bytes())
        .and_then(|()| output.flush())
        .map_err(|error| format!("failed to write prompt: {error}"))?;

    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .map_err(|error| format!("failed to read answer: {error}"))?;
    if read == 0 {
        return Err("no answer given (end of input)".to_owned());
    }
    Ok(line.trim().to_owned())
}

/// Trim whitespace and any surrounding quotes from a pasted folder path.
pub fn clean_folder_input(raw: &str) -> PathBuf {
    PathBuf::from(
        raw.trim()
            .trim_matches('"')
            .trim_matches('\'')
            .trim(),
    )
}
