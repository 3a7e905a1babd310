//! Writing rendered source to `<output_dir>/<Base>.<ext>`.
//!
//! The default mode appends, so generating twice into the same file without
//! clearing it leaves two copies of every declaration. `WriteMode::Truncate`
//! replaces the file instead.
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::OutputError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    #[default]
    Append,
    Truncate,
}

pub fn output_path(output_dir: &Path, base_name: &str, extension: &str) -> PathBuf {
    output_dir.join(format!("{base_name}.{extension}"))
}

/// Write an already-rendered file in one `write_all`. The output directory must
/// exist; it is never created here.
pub fn write_generated(path: &Path, source: &str, mode: WriteMode) -> Result<(), OutputError> {
    let io_err = |source| OutputError::Io { path: path.to_path_buf(), source };

    let mut options = OpenOptions::new();
    options.create(true);
    match mode {
        WriteMode::Append => options.append(true),
        WriteMode::Truncate => options.write(true).truncate(true),
    };

    let mut file = options.open(path).map_err(io_err)?;
    file.write_all(source.as_bytes()).map_err(io_err)?;
    file.flush().map_err(io_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_is_base_name_with_extension() {
        let path = output_path(Path::new("out"), "Expr", "cpp");
        assert_eq!(path, Path::new("out").join("Expr.cpp"));
    }

    #[test]
    fn append_mode_duplicates_on_rerun() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Expr.cpp");
        write_generated(&path, "struct A;\n", WriteMode::Append).unwrap();
        write_generated(&path, "struct A;\n", WriteMode::Append).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "struct A;\nstruct A;\n");
    }

    #[test]
    fn truncate_mode_replaces() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Expr.cpp");
        write_generated(&path, "old contents that are longer\n", WriteMode::Truncate).unwrap();
        write_generated(&path, "struct A;\n", WriteMode::Truncate).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "struct A;\n");
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("Expr.cpp");
        let err = write_generated(&path, "struct A;\n", WriteMode::Append).unwrap_err();
        let OutputError::Io { path: reported, .. } = &err;
        assert_eq!(reported, &path);
        assert!(!path.parent().unwrap().exists());
    }
}
