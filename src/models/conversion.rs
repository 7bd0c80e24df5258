use crate::models::format::TargetFormat;
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct ConversionInput {
    pub input_path: PathBuf,
    pub target_format: TargetFormat,
    pub delete_original: bool,
    pub source_code_dir: Option<PathBuf>,
    pub jpeg_quality: u8,
    pub no_progress: bool,
}

// 單一檔案的轉換結果
#[derive(Clone, Debug)]
pub struct ConversionResult {
    pub origin: PathBuf,
    pub destination: PathBuf,
    pub original_size: u64,
    pub converted_size: u64,
}

impl ConversionResult {
    pub fn saved_percentage(&self) -> Option<f64> {
        saved_percentage(self.original_size, self.converted_size)
    }
}

/// 計算節省空間百分比，原始大小為 0 時無意義
pub fn saved_percentage(original_size: u64, converted_size: u64) -> Option<f64> {
    if original_size == 0 {
        return None;
    }
    Some(100.0 * (1.0 - converted_size as f64 / original_size as f64))
}

// 批次轉換統計，由每層走訪回傳後再合併
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BatchSummary {
    pub converted: usize,
    pub skipped: usize,
    pub unsupported: usize,
    pub failed: usize,
    pub deleted: usize,
    pub delete_failures: usize,
    pub original_bytes: u64,
    pub converted_bytes: u64,
    pub edited_files: usize,
    pub replacements: usize,
}

impl BatchSummary {
    pub fn record_conversion(&mut self, result: &ConversionResult) {
        self.converted += 1;
        self.original_bytes += result.original_size;
        self.converted_bytes += result.converted_size;
    }

    pub fn merge(&mut self, other: BatchSummary) {
        self.converted += other.converted;
        self.skipped += other.skipped;
        self.unsupported += other.unsupported;
        self.failed += other.failed;
        self.deleted += other.deleted;
        self.delete_failures += other.delete_failures;
        self.original_bytes += other.original_bytes;
        self.converted_bytes += other.converted_bytes;
        self.edited_files += other.edited_files;
        self.replacements += other.replacements;
    }

    pub fn saved_percentage(&self) -> Option<f64> {
        saved_percentage(self.original_bytes, self.converted_bytes)
    }

    pub fn processed(&self) -> usize {
        self.converted + self.skipped + self.unsupported + self.failed
    }
}
