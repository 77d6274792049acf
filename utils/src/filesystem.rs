/*
 * Copyright (c):
 * 2025 zephyrj
 * zephyrj@protonmail.com
 *
 * This file is part of qdrive-charts.
 *
 * qdrive-charts is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * qdrive-charts is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with qdrive-charts. If not, see <https://www.gnu.org/licenses/>.
 */

use std::{fs, io};
use std::path::{Path, PathBuf};

pub fn ensure_directory(path: &Path) -> io::Result<()> {
    if path.is_dir() {
        return Ok(());
    }
    fs::create_dir_all(path)
}

/// Takes a name and turns it into a filename in the provided path that is free of any
/// characters that would be illegal in a filesystem path. Spaces are replaced with underscores.
///
/// Unlike a fresh export the path is stable between runs; an existing file is overwritten
/// so regenerated charts replace the previous ones.
pub fn output_path(dir: &Path, name: &str, extension: &str) -> PathBuf {
    let sanitized_name = sanitize_filename::sanitize(name).replace(" ", "_");
    dir.join(format!("{}.{}", sanitized_name, extension))
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use crate::filesystem::{ensure_directory, output_path};

    #[test]
    fn output_paths_are_sanitised() {
        let dir = Path::new("results");
        assert_eq!(output_path(dir, "res1", "png"), dir.join("res1.png"));
        assert_eq!(output_path(dir, "size 1/alt", "svg"), dir.join("size_1alt.svg"));
    }

    #[test]
    fn creates_missing_directories() {
        let dir = std::env::temp_dir().join("qdrive_charts_utils_test").join("nested");
        let _ = std::fs::remove_dir_all(&dir);
        ensure_directory(&dir).unwrap();
        assert!(dir.is_dir());
        ensure_directory(&dir).unwrap();
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
