//! Writing generated sketches

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::sanitize::folder_name;
use crate::Result;

/// Writes `sketch` to `<dir>/<base>/<base>.ino`, where `<base>` is the [`folder_name`] of the device, and returns the
/// folder path.
///
/// The Arduino IDE requires a sketch to live in a folder of the same name. An existing folder is reused and an
/// existing sketch in it is overwritten.
pub fn write_sketch(dir: &Path, name: &str, address: &str, sketch: &str) -> Result<PathBuf> {
    let base = folder_name(name, address);
    let folder = dir.join(&base);
    fs::create_dir_all(&folder)?;

    let path = folder.join(format!("{base}.ino"));
    fs::write(&path, sketch)?;
    debug!("wrote {} bytes to {}", sketch.len(), path.display());

    Ok(folder)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sketch_lands_in_a_folder_of_the_same_name() {
        let dir = tempfile::tempdir().unwrap();
        let folder = write_sketch(dir.path(), "Heart Rate", "C4:7C:8D:6A:3E:11", "void setup() {}\n").unwrap();

        assert_eq!(folder, dir.path().join("heart-rate-c47c8d6a3e11"));
        let written = fs::read_to_string(folder.join("heart-rate-c47c8d6a3e11.ino")).unwrap();
        assert_eq!(written, "void setup() {}\n");
    }

    #[test]
    fn existing_sketch_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        write_sketch(dir.path(), "Thermo", "AA:BB", "old").unwrap();
        let folder = write_sketch(dir.path(), "Thermo", "AA:BB", "new").unwrap();
        assert_eq!(fs::read_to_string(folder.join("thermo-aabb.ino")).unwrap(), "new");
    }
}
