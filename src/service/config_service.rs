use std::io;
use crate::config::config::{default_text_extensions, DEFAULT_JPEG_QUALITY};
use crate::config::ports::{AppConfig, ConfigPort};
use crate::models::format::TargetFormat;

// 配置服務，負責選擇適當的配置適配器
pub struct ConfigService {
    config_port: Box<dyn ConfigPort>,
}

impl ConfigService {
    pub fn new(config_port: Box<dyn ConfigPort>) -> Self {
        ConfigService { config_port }
    }

    pub fn get_config(&self) -> io::Result<AppConfig> {
        self.config_port.get_config()
    }
}

// 預設配置適配器：轉為 webp，保留原始檔案，不替換引用
pub struct DefaultConfigAdapter {
    input: String,
}

impl DefaultConfigAdapter {
    pub fn new(input: String) -> Self {
        DefaultConfigAdapter { input }
    }
}

impl ConfigPort for DefaultConfigAdapter {
    fn get_config(&self) -> io::Result<AppConfig> {
        Ok(AppConfig {
            input: self.input.clone(),
            target_format: TargetFormat::Webp,
            delete_original: false,
            source_code_dir: None,
            text_extensions: default_text_extensions(),
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            no_confirm: false,
            no_progress: false,
        })
    }
}
