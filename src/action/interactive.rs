use dialoguer::{Confirm, Input, Select};
use std::io;
use std::path::Path;

use crate::action::cli::run_conversion;
use crate::config::config::{default_text_extensions, validate_source_code_dir, DEFAULT_JPEG_QUALITY};
use crate::config::ports::{AppConfig, ConfigPort};
use crate::models::conversion::BatchSummary;
use crate::models::format::TargetFormat;
use crate::service::config_service::{ConfigService, DefaultConfigAdapter};
use crate::utils::utils::setup_logging;

pub fn process_interactive_mode() -> io::Result<Option<BatchSummary>> {
    setup_logging("info")?;
    println!("=== 歡迎使用互動模式 ===");
    let use_default_config = get_default_config_option()?;
    let input = get_input_path()?;

    let config_port: Box<dyn ConfigPort> = if use_default_config {
        println!("使用預設配置：轉換為 webp，保留原始檔案，不替換引用");
        Box::new(DefaultConfigAdapter::new(input))
    } else {
        Box::new(InteractiveConfigAdapter::new(input))
    };

    let config = ConfigService::new(config_port).get_config()?;
    run_conversion(config)
}

/// 轉換前的確認提示，直接按 Enter 視為同意
pub fn confirm_conversion(config: &AppConfig) -> io::Result<bool> {
    let resolved = Path::new(&config.input)
        .canonicalize()
        .unwrap_or_else(|_| Path::new(&config.input).to_path_buf());
    Confirm::new()
        .with_prompt(format!(
            "確定要將 '{}' 中的圖片轉換為 {} 格式嗎？",
            resolved.display(),
            config.target_format
        ))
        .default(true)
        .interact()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("確認輸入失敗: {}", e)))
}

pub fn get_default_config_option() -> io::Result<bool> {
    Confirm::new()
        .with_prompt("是否使用預設配置？（轉換為 webp、保留原始檔案、不替換引用）")
        .default(true)
        .interact()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("預設配置選擇失敗: {}", e)))
}

pub fn get_input_path() -> io::Result<String> {
    Input::new()
        .with_prompt("請輸入圖片檔案或目錄路徑（例如：./logo.png 或 ./assets）")
        .validate_with(|input: &String| -> Result<(), String> {
            if Path::new(input).exists() { Ok(()) } else { Err(format!("路徑 '{}' 不存在", input)) }
        })
        .interact_text()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))
}

pub fn get_target_format() -> io::Result<TargetFormat> {
    let format = Select::new()
        .with_prompt("選擇目標格式（使用方向鍵選擇，按 Enter 確認）")
        .items(&["webp（預設）", "jpeg", "png"])
        .default(0)
        .interact()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("目標格式選擇失敗: {}", e)))?;

    Ok(match format {
        0 => TargetFormat::Webp,
        1 => TargetFormat::Jpeg,
        2 => TargetFormat::Png,
        _ => unreachable!(),
    })
}

pub fn get_delete_original_option() -> io::Result<bool> {
    Confirm::new()
        .with_prompt("轉換成功後是否刪除原始檔案？")
        .default(false)
        .interact()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("刪除選項輸入失敗: {}", e)))
}

pub fn get_source_code_dir() -> io::Result<Option<String>> {
    let dir: String = Input::new()
        .with_prompt("輸入需替換圖片引用的原始碼目錄（留空則不替換）")
        .allow_empty(true)
        .validate_with(|input: &String| -> Result<(), String> {
            if input.trim().is_empty() || Path::new(input.trim()).is_dir() {
                Ok(())
            } else {
                Err(format!("目錄 '{}' 不存在", input))
            }
        })
        .interact_text()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("原始碼目錄輸入失敗: {}", e)))?;

    let dir = dir.trim();
    Ok(if dir.is_empty() { None } else { Some(dir.to_string()) })
}

pub fn get_jpeg_quality(target_format: TargetFormat) -> io::Result<u8> {
    if target_format != TargetFormat::Jpeg {
        return Ok(DEFAULT_JPEG_QUALITY);
    }
    Input::new()
        .with_prompt("輸入 JPEG 品質（1-100）")
        .default(DEFAULT_JPEG_QUALITY)
        .validate_with(|quality: &u8| -> Result<(), String> {
            if (1..=100).contains(quality) { Ok(()) } else { Err("品質必須介於 1 到 100".to_string()) }
        })
        .interact_text()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("品質輸入失敗: {}", e)))
}

// 交互配置適配器
pub struct InteractiveConfigAdapter {
    input: String,
}

impl InteractiveConfigAdapter {
    pub fn new(input: String) -> Self {
        InteractiveConfigAdapter { input }
    }
}

impl ConfigPort for InteractiveConfigAdapter {
    fn get_config(&self) -> io::Result<AppConfig> {
        let target_format = get_target_format()?;
        let jpeg_quality = get_jpeg_quality(target_format)?;
        let delete_original = get_delete_original_option()?;
        let source_code_dir = get_source_code_dir()?;
        if let Some(dir) = &source_code_dir {
            validate_source_code_dir(dir)?;
        }

        Ok(AppConfig {
            input: self.input.clone(),
            target_format,
            delete_original,
            source_code_dir,
            text_extensions: default_text_extensions(),
            jpeg_quality,
            no_confirm: false,
            no_progress: false,
        })
    }
}
