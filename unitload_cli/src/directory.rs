//! Reads unit definitions from the files in a directory.

use std::path::{Path, PathBuf};
use unitload::error::InvalidNameError;
use unitload::UnitName;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("could not read {path:?}: {source}")]
    Io { path: PathBuf, source: std::io::Error },
    #[error("the file {path:?} is not named after a valid unit: {source}")]
    InvalidName { path: PathBuf, source: InvalidNameError },
    #[error("the name of the file {path:?} is not valid UTF-8")]
    NonUtf8Name { path: PathBuf },
}

/// Reads every regular file in a directory, using the file name as the unit name and the contents as the definition.
///
/// Entries are returned sorted by name.
pub fn read_definitions(directory: &Path) -> Result<Vec<(UnitName, Vec<u8>)>, Error> {
    let io_error = |path: &Path| {
        let path = path.to_path_buf();
        move |source| Error::Io { path, source }
    };

    let mut definitions = Vec::new();
    for entry in std::fs::read_dir(directory).map_err(io_error(directory))? {
        let entry = entry.map_err(io_error(directory))?;
        let path = entry.path();
        if !entry.file_type().map_err(io_error(&path))?.is_file() {
            continue;
        }

        let file_name = entry.file_name();
        let name = match file_name.to_str() {
            Some(name) => UnitName::try_from_str(name).map_err(|source| Error::InvalidName { path: path.clone(), source })?,
            None => return Err(Error::NonUtf8Name { path }),
        };
        let definition = std::fs::read(&path).map_err(io_error(&path))?;
        definitions.push((name, definition));
    }

    definitions.sort_by(|(a, _), (b, _)| a.cmp(b));
    Ok(definitions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn files_become_definitions() {
        let directory = tempfile::tempdir().unwrap();
        std::fs::write(directory.path().join("user.Foo"), b"foo").unwrap();
        std::fs::write(directory.path().join("Bar"), b"bar").unwrap();
        std::fs::create_dir(directory.path().join("nested")).unwrap();

        let definitions = read_definitions(directory.path()).unwrap();
        let names: Vec<_> = definitions.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, ["Bar", "user.Foo"]);
        assert_eq!(definitions[1].1, b"foo");
    }

    #[test]
    fn invalid_file_names_are_rejected() {
        let directory = tempfile::tempdir().unwrap();
        std::fs::write(directory.path().join("bad name"), b"x").unwrap();

        assert!(matches!(
            read_definitions(directory.path()),
            Err(Error::InvalidName { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_file_names_are_rejected() {
        use std::os::unix::ffi::OsStrExt;

        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join(std::ffi::OsStr::from_bytes(b"A\xff"));
        // Some file systems only accept UTF-8 names
        if std::fs::write(&path, b"second").is_err() {
            return;
        }
        std::fs::write(directory.path().join("A"), b"first").unwrap();

        match read_definitions(directory.path()) {
            Err(Error::NonUtf8Name { path: rejected }) => assert_eq!(rejected, path),
            result => panic!("unexpected result {:?}", result),
        }
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let directory = tempfile::tempdir().unwrap();
        assert!(matches!(
            read_definitions(&directory.path().join("missing")),
            Err(Error::Io { .. })
        ));
    }
}
