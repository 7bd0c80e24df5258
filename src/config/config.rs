use clap::Parser;
use std::io;
use std::path::Path;
use crate::models::format::TargetFormat;

// 引用替換時預設掃描的文字檔副檔名
pub const DEFAULT_TEXT_EXTENSIONS: &[&str] = &[
    "html", "htm", "css", "scss", "sass", "less", "js", "jsx", "mjs", "cjs", "ts", "tsx", "vue",
    "svelte", "astro", "json", "md", "markdown", "mdx", "xml", "svg", "yml", "yaml", "toml", "txt",
    "php",
];

pub const DEFAULT_JPEG_QUALITY: u8 = 90;

#[derive(Parser, Clone, Debug)]
#[command(
    name = "image_converter",
    about = "將 JPEG/PNG 圖片批次轉換為 WebP、JPEG 或 PNG 格式",
    long_about = "一個批次轉換圖片格式的工具，可遞迴處理目錄，並可在轉換後刪除原始檔案，或將原始碼目錄中對舊檔名的引用替換為新檔名。\n不帶任何參數執行時進入互動模式。\n使用 `--help` 查看詳細用法。",
    arg_required_else_help = true
)]
pub struct Cli {
    /// 要轉換的檔案或目錄
    pub path: String,
    /// 轉換成功後刪除原始檔案
    #[arg(short, long, default_value_t = false)]
    pub delete_original: bool,
    /// 需替換圖片引用的原始碼目錄
    #[arg(short, long)]
    pub source_code_dir: Option<String>,
    /// 目標格式
    #[arg(short, long, value_enum, default_value_t = TargetFormat::Webp)]
    pub format: TargetFormat,
    /// 略過確認提示
    #[arg(short, long, default_value_t = false)]
    pub no_confirm: bool,
    /// 引用替換時掃描的副檔名，以逗號分隔
    #[arg(short, long, value_delimiter = ',')]
    pub extensions: Option<Vec<String>>,
    /// JPEG 輸出品質（1-100）；WebP 一律無損編碼，不受此參數影響，輸出可能比原檔大
    #[arg(short, long, default_value_t = DEFAULT_JPEG_QUALITY, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub quality: u8,
    #[arg(long, default_value_t = false)]
    pub no_progress: bool,
    #[arg(long, default_value = "info", value_parser = ["debug", "info", "warn", "error"])]
    pub log_level: String,
}

pub fn default_text_extensions() -> Vec<String> {
    DEFAULT_TEXT_EXTENSIONS.iter().map(|ext| ext.to_string()).collect()
}

pub fn validate_input_path(input: &str) -> io::Result<&Path> {
    let path = Path::new(input);
    if !path.exists() {
        log::error!("無效的檔案或目錄路徑：{}", input);
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("輸入路徑 '{}' 不存在", input)
        ));
    }
    Ok(path)
}

pub fn validate_source_code_dir(dir: &str) -> io::Result<&Path> {
    let path = Path::new(dir);
    if !path.is_dir() {
        log::error!("原始碼目錄不存在或不是目錄：{}", dir);
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("原始碼目錄 '{}' 不存在或不是目錄", dir)
        ));
    }
    Ok(path)
}

pub fn is_valid_extension(ext: &str) -> bool {
    let invalid_chars = ['/', '\\', ':', '*', '?', '"', '<', '>', '|', ' '];
    !ext.is_empty() && !ext.contains(&invalid_chars[..])
}

/// 正規化副檔名清單：去除前導的點並轉為小寫
pub fn normalize_extensions(extensions: &[String]) -> io::Result<Vec<String>> {
    let mut normalized = Vec::with_capacity(extensions.len());
    for ext in extensions {
        let ext = ext.trim().trim_start_matches('.').to_ascii_lowercase();
        if !is_valid_extension(&ext) {
            return Err(io::Error::new(io::ErrorKind::InvalidInput, format!("無效的副檔名: {}", ext)));
        }
        if !normalized.contains(&ext) {
            normalized.push(ext);
        }
    }
    Ok(normalized)
}
