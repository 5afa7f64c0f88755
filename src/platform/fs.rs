// PriceLens - platform/fs.rs
//
// Filesystem helpers that sit below the app layer.

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Creation mode for new files, narrowed by the process umask.
#[cfg(unix)]
const NEW_FILE_MODE: u32 = 0o644;

/// Replace `path` with the bytes produced by `write`.
///
/// Content goes to a temporary file in the target's directory and is renamed
/// over `path` only after `write` succeeds and the data is flushed, so readers
/// never observe a half-written file. On any error the temporary file is
/// removed and the previous content of `path` is left untouched.
///
/// A new file gets ordinary permissions (0644 on Unix, less the umask); an
/// existing file keeps the permissions it had.
///
/// `write` may return its own error type; I/O failures of the surrounding
/// steps are mapped into it with `map_io`.
pub fn write_atomically<T, E, F, M>(path: &Path, write: F, map_io: M) -> Result<T, E>
where
    F: FnOnce(&mut BufWriter<&mut tempfile::NamedTempFile>) -> Result<T, E>,
    M: Fn(io::Error) -> E,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut builder = tempfile::Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(NEW_FILE_MODE));
    }
    let mut temp = builder.tempfile_in(dir).map_err(&map_io)?;

    if let Ok(existing) = fs::metadata(path) {
        temp.as_file()
            .set_permissions(existing.permissions())
            .map_err(&map_io)?;
    }

    let value = {
        let mut writer = BufWriter::new(&mut temp);
        let value = write(&mut writer)?;
        writer.flush().map_err(&map_io)?;
        value
    };

    temp.as_file().sync_all().map_err(&map_io)?;
    temp.persist(path).map_err(|e| map_io(e.error))?;

    tracing::debug!(path = %path.display(), "File written atomically");
    Ok(value)
}
