use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

/// Error type for document I/O
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("line {line} is out of range: {path} has {total} lines")]
    LineOutOfRange {
        path: PathBuf,
        line: usize,
        total: usize,
    },
}

/// A text document held as lines, the host-side carrier for the
/// "replace line N with text T" primitive. Only the touched line changes on
/// write-back; every other line, the trailing-newline presence, and the
/// file's line-ending style (LF or CRLF) are preserved.
#[derive(Debug, Clone)]
pub struct Document {
    path: PathBuf,
    lines: Vec<String>,
    trailing_newline: bool,
    crlf: bool,
}

impl Document {
    pub fn read(path: &Path) -> Result<Document, DocumentError> {
        let text = fs::read_to_string(path).map_err(|e| DocumentError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        let trailing_newline = text.ends_with('\n');
        // Lines are held bare; the separator style is restored on write
        let crlf = text.contains("\r\n");
        let mut lines: Vec<String> = text
            .split('\n')
            .map(|l| l.strip_suffix('\r').unwrap_or(l).to_string())
            .collect();
        if trailing_newline {
            lines.pop();
        }
        Ok(Document {
            path: path.to_path_buf(),
            lines,
            trailing_newline,
            crlf,
        })
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Get a line by 1-based number
    pub fn line(&self, number: usize) -> Result<&str, DocumentError> {
        self.check_range(number)?;
        Ok(&self.lines[number - 1])
    }

    /// Replace a line by 1-based number
    pub fn set_line(&mut self, number: usize, text: String) -> Result<(), DocumentError> {
        self.check_range(number)?;
        self.lines[number - 1] = text;
        Ok(())
    }

    /// Write the document back atomically: the new content lands in a temp
    /// file in the same directory, then replaces the original in one rename.
    pub fn write(&self) -> Result<(), DocumentError> {
        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        let write_err = |e: std::io::Error| DocumentError::Write {
            path: self.path.clone(),
            source: e,
        };

        let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
        let sep = if self.crlf { "\r\n" } else { "\n" };
        let mut text = self.lines.join(sep);
        if self.trailing_newline {
            text.push_str(sep);
        }
        tmp.write_all(text.as_bytes()).map_err(write_err)?;
        tmp.persist(&self.path).map_err(|e| write_err(e.error))?;
        Ok(())
    }

    fn check_range(&self, number: usize) -> Result<(), DocumentError> {
        if number == 0 || number > self.lines.len() {
            return Err(DocumentError::LineOutOfRange {
                path: self.path.clone(),
                line: number,
                total: self.lines.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn read_splits_lines_and_notes_trailing_newline() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "notes.md", "- a\n- b\n");
        let doc = Document::read(&path).unwrap();
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.line(1).unwrap(), "- a");
        assert_eq!(doc.line(2).unwrap(), "- b");
    }

    #[test]
    fn replace_line_preserves_everything_else() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "notes.md", "# Title\n\n- TODO buy milk\n- other\n");
        let mut doc = Document::read(&path).unwrap();
        doc.set_line(3, "- DOING buy milk".to_string()).unwrap();
        doc.write().unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, "# Title\n\n- DOING buy milk\n- other\n");
    }

    #[test]
    fn no_trailing_newline_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "notes.md", "- a\n- b");
        let mut doc = Document::read(&path).unwrap();
        assert_eq!(doc.len(), 2);
        doc.set_line(1, "- c".to_string()).unwrap();
        doc.write().unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "- c\n- b");
    }

    #[test]
    fn line_numbers_are_one_based() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "notes.md", "- a\n");
        let doc = Document::read(&path).unwrap();
        assert!(matches!(
            doc.line(0),
            Err(DocumentError::LineOutOfRange { line: 0, total: 1, .. })
        ));
        assert!(matches!(
            doc.line(2),
            Err(DocumentError::LineOutOfRange { line: 2, total: 1, .. })
        ));
    }

    #[test]
    fn missing_file_is_read_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.md");
        assert!(matches!(
            Document::read(&path),
            Err(DocumentError::Read { .. })
        ));
    }

    #[test]
    fn crlf_endings_are_stripped_from_lines_and_restored_on_write() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "notes.md", "- a\r\n- TODO buy milk\r\n");
        let mut doc = Document::read(&path).unwrap();
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.line(2).unwrap(), "- TODO buy milk");

        doc.set_line(2, "- DOING buy milk".to_string()).unwrap();
        doc.write().unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "- a\r\n- DOING buy milk\r\n"
        );
    }

    #[test]
    fn blank_lines_survive_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "notes.md", "a\n\n\nb\n");
        let mut doc = Document::read(&path).unwrap();
        assert_eq!(doc.len(), 4);
        doc.set_line(4, "c".to_string()).unwrap();
        doc.write().unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "a\n\n\nc\n");
    }
}
