use std::fmt;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::{ConvertError, ConvertResult};
use crate::record::Record;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Where the JSON document goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    File(PathBuf),
    Stdout,
}

impl OutputTarget {
    /// `-` selects stdout, anything else is a file path
    pub fn from_path(path: &Path) -> Self {
        if path == Path::new("-") {
            OutputTarget::Stdout
        } else {
            OutputTarget::File(path.to_path_buf())
        }
    }
}

impl fmt::Display for OutputTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputTarget::File(path) => write!(f, "{}", path.display()),
            OutputTarget::Stdout => write!(f, "<stdout>"),
        }
    }
}

/// Renders the dataset as a JSON array with 2-space indentation.
/// No trailing newline is added.
pub fn render_json(records: &[Record], write_bom: bool) -> ConvertResult<Vec<u8>> {
    let mut buf = Vec::new();
    if write_bom {
        buf.extend_from_slice(UTF8_BOM);
    }
    serde_json::to_writer_pretty(&mut buf, records)?;
    Ok(buf)
}

/// Writes a fully rendered document in one go.
/// Files are written to a temporary sibling and renamed over the target, so
/// an existing file is either fully replaced or left as it was.
pub fn write_output(document: &[u8], target: &OutputTarget) -> ConvertResult<()> {
    match target {
        OutputTarget::File(path) => write_file(document, path),
        OutputTarget::Stdout => {
            let mut writer = BufWriter::new(std::io::stdout());
            writer.write_all(document).map_err(ConvertError::Write)?;
            writer.flush().map_err(ConvertError::Write)
        }
    }
}

fn write_file(document: &[u8], path: &Path) -> ConvertResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir).map_err(|source| ConvertError::Create {
        path: path.to_path_buf(),
        source,
    })?;

    {
        let mut writer = BufWriter::new(file.as_file_mut());
        writer.write_all(document).map_err(ConvertError::Write)?;
        writer.flush().map_err(ConvertError::Write)?;
    }
    file.as_file().sync_all().map_err(ConvertError::Write)?;

    file.persist(path).map_err(|err| ConvertError::Write(err.error))?;

    Ok(())
}
