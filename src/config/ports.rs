use std::io;
use crate::models::conversion::BatchSummary;
use crate::models::format::TargetFormat;

// 應用配置結構體，封裝所有參數
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub input: String,
    pub target_format: TargetFormat,
    pub delete_original: bool,
    pub source_code_dir: Option<String>,
    pub text_extensions: Vec<String>,
    pub jpeg_quality: u8,
    pub no_confirm: bool,
    pub no_progress: bool,
}

// 配置來源的 Port
pub trait ConfigPort {
    fn get_config(&self) -> io::Result<AppConfig>;
}

// 轉換執行的 Port
pub trait ConversionPort {
    fn execute(&self, config: AppConfig) -> io::Result<BatchSummary>;
}
