use crate::models::error::WError;
use camino::Utf8Path;
use walkdir::WalkDir;

pub struct FileUtils;

impl FileUtils {
    /// Recursively copies a directory tree from source to destination.
    /// Creates all necessary directories and overwrites existing files.
    /// Returns the number of files copied.
    pub fn copy_recursive(src: &Utf8Path, dst: &Utf8Path) -> Result<u32, WError> {
        std::fs::create_dir_all(dst)?;

        let mut copied = 0;
        for entry in WalkDir::new(src).into_iter().filter_map(|e| e.ok()) {
            let src_path = Utf8Path::from_path(entry.path()).ok_or_else(|| {
                WError::Parse(format!("Invalid UTF-8 path: {:?}", entry.path()))
            })?;

            let rel_path = src_path
                .strip_prefix(src)
                .map_err(|e| WError::Parse(e.to_string()))?;
            let dst_path = dst.join(rel_path);

            if entry.file_type().is_dir() {
                std::fs::create_dir_all(&dst_path)?;
            } else {
                if let Some(parent) = dst_path.parent() {
                    if !parent.exists() {
                        std::fs::create_dir_all(parent)?;
                    }
                }
                std::fs::copy(src_path, &dst_path)?;
                copied += 1;
            }
        }

        Ok(copied)
    }
}
