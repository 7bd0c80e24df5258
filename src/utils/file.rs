use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use log::{debug, warn};
use crate::models::file::{Entry, ImageFile};
use crate::models::format::{SourceFormat, TargetFormat};

/// 判斷路徑屬於哪一類走訪項目
pub fn classify_entry(path: &Path, target: TargetFormat) -> io::Result<Entry> {
    let metadata = fs::metadata(path)?;
    if metadata.is_dir() {
        return Ok(Entry::Directory(path.to_path_buf()));
    }

    let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");
    if target.matches_extension(extension) {
        return Ok(Entry::AlreadyTarget(path.to_path_buf()));
    }
    match SourceFormat::from_extension(extension) {
        Some(format) if metadata.is_file() => Ok(Entry::RegularImageFile(ImageFile {
            path: path.to_path_buf(),
            format,
            size: metadata.len(),
        })),
        _ => Ok(Entry::UnsupportedFile(path.to_path_buf())),
    }
}

/// 列出目錄下的直接子項目，順序依檔案系統而定；指向目錄的符號連結不會被展開
pub fn list_directory(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type()?.is_symlink() && path.is_dir() {
            debug!("略過指向目錄的符號連結：{}", path.display());
            continue;
        }
        entries.push(path);
    }
    Ok(entries)
}

pub fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            extensions.iter().any(|allowed| *allowed == ext)
        })
        .unwrap_or(false)
}

/// 遞迴收集根目錄下符合副檔名的文字檔
pub fn collect_text_files(root: &Path, extensions: &[String]) -> io::Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("原始碼目錄 '{}' 不存在", root.display())
        ));
    }
    let mut files = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("無法讀取 {}：{}", root.display(), e);
                continue;
            }
        };
        if entry.file_type().is_file() && has_extension(entry.path(), extensions) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}
