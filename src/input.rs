//! Input text acquisition: a file on disk or console lines.

use std::io::BufRead;
use std::path::Path;
use tokio::fs;

use crate::error::{PipelineError, Result};

/// Raw text handed to the script generator, with where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct InputText {
    pub content: String,
    pub source: String,
}

impl InputText {
    pub fn new(content: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            source: source.into(),
        }
    }

    pub fn char_count(&self) -> usize {
        self.content.chars().count()
    }
}

/// Read and trim a text file. Missing files and blank content are errors.
pub async fn read_input_file(path: &Path) -> Result<InputText> {
    match fs::try_exists(path).await {
        Ok(true) => {}
        Ok(false) => return Err(PipelineError::NotFound(path.to_path_buf())),
        Err(e) => {
            return Err(PipelineError::FileSystem(format!(
                "Error checking file {}: {}",
                path.display(),
                e
            )));
        }
    }

    let raw = fs::read_to_string(path).await.map_err(|e| {
        PipelineError::FileSystem(format!("Error reading file {}: {}", path.display(), e))
    })?;
    let content = raw.trim();
    if content.is_empty() {
        return Err(PipelineError::EmptyInput(
            "File is empty or contains only whitespace.".to_string(),
        ));
    }

    tracing::debug!(path = %path.display(), chars = content.len(), "read input file");
    Ok(InputText::new(content, path.display().to_string()))
}

/// Collect lines until two consecutive blank lines or end of stream.
pub fn read_console_input<R: BufRead>(reader: R) -> Result<InputText> {
    let mut lines: Vec<String> = Vec::new();
    let mut blank_run = 0;

    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            blank_run += 1;
            if blank_run >= 2 {
                break;
            }
        } else {
            blank_run = 0;
        }
        lines.push(line);
    }

    let content = lines.join("\n").trim().to_string();
    if content.is_empty() {
        return Err(PipelineError::EmptyInput("No text entered.".to_string()));
    }
    Ok(InputText::new(content, "Console Input"))
}
