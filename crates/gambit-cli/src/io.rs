use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;

/// Reads a JSON artifact; `file_kind` names it in error messages.
pub fn read_json<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {} file: {}", file_kind, path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse {} file: {}", file_kind, path.display()))
}

/// Writes a value as pretty JSON to `path`, or to stdout when no path is
/// given.
pub fn write_json<T>(file_kind: &str, value: &T, path: Option<&PathBuf>) -> anyhow::Result<()>
where
    T: serde::Serialize,
{
    match path {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create output directory: {}", parent.display())
                })?;
            }
            let file = File::create(path).with_context(|| {
                format!("Failed to create {} file: {}", file_kind, path.display())
            })?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, value)
                .with_context(|| format!("Failed to write {} to {}", file_kind, path.display()))?;
            writeln!(writer)?;
            writer.flush()?;
        }
        None => {
            let mut stdout = io::stdout().lock();
            serde_json::to_writer_pretty(&mut stdout, value)
                .with_context(|| format!("Failed to write {file_kind} to stdout"))?;
            writeln!(stdout)?;
        }
    }
    Ok(())
}
