use std::path::{Path, PathBuf};
use crate::models::format::{SourceFormat, TargetFormat};

// 待轉換的圖片檔案
#[derive(Clone, Debug)]
pub struct ImageFile {
    pub path: PathBuf,
    pub format: SourceFormat,
    pub size: u64,
}

impl ImageFile {
    /// 轉換後的同名檔案路徑，僅替換副檔名
    pub fn converted_path(&self, target: TargetFormat) -> PathBuf {
        self.path.with_extension(target.extension())
    }

    pub fn file_name(&self) -> String {
        file_name_of(&self.path)
    }
}

// 走訪時遇到的項目
#[derive(Debug)]
pub enum Entry {
    Directory(PathBuf),
    RegularImageFile(ImageFile),
    AlreadyTarget(PathBuf),
    UnsupportedFile(PathBuf),
}

pub fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default()
}
