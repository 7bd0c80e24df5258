use std::io;
use std::time::Instant;
use clap::Parser;
use log::info;
use crate::action::interactive::{confirm_conversion, process_interactive_mode};
use crate::config::config::{
    default_text_extensions, normalize_extensions, validate_input_path, validate_source_code_dir, Cli,
};
use crate::config::ports::{AppConfig, ConfigPort, ConversionPort};
use crate::facade::conversion_facade::ConversionAdapter;
use crate::models::conversion::BatchSummary;
use crate::service::config_service::ConfigService;
use crate::utils::utils::{setup_logging, summary_lines};

/// 無參數時進入互動模式，否則解析命令列
pub fn process_args(args: Vec<String>) -> io::Result<Option<BatchSummary>> {
    if args.len() == 1 {
        process_interactive_mode()
    } else {
        process_cli_mode()
    }
}

pub fn process_cli_mode() -> io::Result<Option<BatchSummary>> {
    let cli = Cli::parse();
    setup_logging(&cli.log_level)?;

    let config_service = ConfigService::new(Box::new(CliConfigAdapter::new(cli)));
    let config = config_service.get_config()?;
    run_conversion(config)
}

/// 確認後執行轉換並輸出摘要；使用者取消時返回 None
pub fn run_conversion(config: AppConfig) -> io::Result<Option<BatchSummary>> {
    if !config.no_confirm && !confirm_conversion(&config)? {
        info!("已取消轉換");
        return Ok(None);
    }

    let start = Instant::now();
    let conversion_port: Box<dyn ConversionPort> = Box::new(ConversionAdapter);
    let summary = conversion_port.execute(config)?;
    for line in summary_lines(&summary, start.elapsed()) {
        info!("{}", line);
    }
    info!("轉換完成");
    Ok(Some(summary))
}

// CLI 配置適配器
pub struct CliConfigAdapter {
    cli: Cli,
}

impl CliConfigAdapter {
    pub fn new(cli: Cli) -> Self {
        CliConfigAdapter { cli }
    }
}

impl ConfigPort for CliConfigAdapter {
    fn get_config(&self) -> io::Result<AppConfig> {
        validate_input_path(&self.cli.path)?;
        if let Some(dir) = &self.cli.source_code_dir {
            validate_source_code_dir(dir)?;
        }
        let text_extensions = match &self.cli.extensions {
            Some(extensions) => normalize_extensions(extensions)?,
            None => default_text_extensions(),
        };

        Ok(AppConfig {
            input: self.cli.path.clone(),
            target_format: self.cli.format,
            delete_original: self.cli.delete_original,
            source_code_dir: self.cli.source_code_dir.clone(),
            text_extensions,
            jpeg_quality: self.cli.quality,
            no_confirm: self.cli.no_confirm,
            no_progress: self.cli.no_progress,
        })
    }
}
