use std::cell::RefCell;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use log::{debug, info, warn};
use regex::Regex;
use tempfile::NamedTempFile;
use crate::models::reference::ReferenceEdit;
use crate::service::traits::i_service::ReferenceServiceTrait;
use crate::utils::file::collect_text_files;

// 文字檔清單在同一批次內只收集一次，之後重複使用
pub struct ReferenceService {
    extensions: Vec<String>,
    text_files: RefCell<Option<(PathBuf, Vec<PathBuf>)>>,
}

impl ReferenceService {
    pub fn new(extensions: Vec<String>) -> Self {
        ReferenceService {
            extensions,
            text_files: RefCell::new(None),
        }
    }

    fn text_files(&self, root: &Path) -> io::Result<Vec<PathBuf>> {
        if let Some((cached_root, files)) = self.text_files.borrow().as_ref() {
            if cached_root == root {
                return Ok(files.clone());
            }
        }
        let files = collect_text_files(root, &self.extensions)?;
        debug!("在 {} 中找到 {} 個文字檔", root.display(), files.len());
        *self.text_files.borrow_mut() = Some((root.to_path_buf(), files.clone()));
        Ok(files)
    }
}

impl ReferenceServiceTrait for ReferenceService {
    fn rewrite_references(
        &self,
        old_name: &str,
        new_name: &str,
        root: &Path,
    ) -> io::Result<Vec<ReferenceEdit>> {
        let pattern = whole_word_pattern(old_name)?;
        let files = self.text_files(root)?;

        let mut edits = Vec::new();
        for file_path in &files {
            match rewrite_file(file_path, &pattern, new_name) {
                Ok(edit) if edit.replacements > 0 => {
                    let shown = pathdiff::diff_paths(file_path, root).unwrap_or_else(|| file_path.clone());
                    info!("> 已更新 {}（{} 處）", shown.display(), edit.replacements);
                    edits.push(edit);
                }
                Ok(_) => {}
                Err(e) => warn!("替換 {} 中的引用失敗：{}", file_path.display(), e),
            }
        }
        Ok(edits)
    }
}

/// 建立完整單字比對的正規表示式，檔名前後必須是非單字字元或字串邊界
pub fn whole_word_pattern(name: &str) -> io::Result<Regex> {
    Regex::new(&format!(r"\b{}\b", regex::escape(name)))
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, format!("無效的檔名模式 {}: {}", name, e)))
}

/// 替換內容中的所有完整單字比對，回傳新內容與替換次數
pub fn replace_whole_word(content: &str, pattern: &Regex, new_name: &str) -> (String, usize) {
    let count = pattern.find_iter(content).count();
    if count == 0 {
        return (content.to_string(), 0);
    }
    let replaced = pattern.replace_all(content, regex::NoExpand(new_name)).into_owned();
    (replaced, count)
}

/// 改寫單一檔案；無任何比對時不寫入
pub fn rewrite_file(path: &Path, pattern: &Regex, new_name: &str) -> io::Result<ReferenceEdit> {
    let bytes = fs::read(path)?;
    let content = match String::from_utf8(bytes) {
        Ok(content) => content,
        Err(_) => {
            debug!("略過非 UTF-8 檔案：{}", path.display());
            return Ok(ReferenceEdit { path: path.to_path_buf(), replacements: 0 });
        }
    };

    let (replaced, replacements) = replace_whole_word(&content, pattern, new_name);
    if replacements > 0 {
        write_atomically(path, replaced.as_bytes())?;
    }
    Ok(ReferenceEdit { path: path.to_path_buf(), replacements })
}

fn write_atomically(path: &Path, data: &[u8]) -> io::Result<()> {
    let parent = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let permissions = fs::metadata(path)?.permissions();
    let mut temp = NamedTempFile::new_in(parent)?;
    temp.write_all(data)?;
    temp.as_file().sync_all()?;
    fs::set_permissions(temp.path(), permissions)?;
    temp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
