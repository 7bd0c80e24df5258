use std::path::PathBuf;

// 單一文字檔的引用替換結果
#[derive(Clone, Debug, PartialEq)]
pub struct ReferenceEdit {
    pub path: PathBuf,
    pub replacements: usize,
}
