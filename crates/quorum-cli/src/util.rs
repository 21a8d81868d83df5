use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use anyhow::Context as _;
use serde::Serialize;

/// Writes `value` as pretty-printed JSON plus a trailing newline to `path`,
/// or to stdout when no path is given.
pub fn save_json<T: Serialize>(value: &T, path: Option<&Path>) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot create {}", path.display()))?;
            write_pretty(BufWriter::new(file), value)
                .with_context(|| format!("cannot write {}", path.display()))
        }
        None => write_pretty(io::stdout().lock(), value).context("cannot write to stdout"),
    }
}

fn write_pretty<W: Write, T: Serialize>(mut writer: W, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
