use std::io;
use std::time::{Duration, Instant};
use indicatif::{ProgressBar, ProgressStyle};
use crate::models::conversion::BatchSummary;

pub fn setup_logging(log_level: &str) -> io::Result<()> {
    let log_level_filter = match log_level {
        "debug" => log::LevelFilter::Debug,
        "info" => log::LevelFilter::Info,
        "warn" => log::LevelFilter::Warn,
        "error" => log::LevelFilter::Error,
        _ => log::LevelFilter::Info,
    };
    env_logger::Builder::new()
        .filter_level(log_level_filter)
        .format_timestamp(None)
        .format_target(false)
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("日誌初始化失敗: {}", e)))
}

pub struct ProgressManager {
    pb: ProgressBar,
    no_progress: bool,
    start: Instant,
}

impl ProgressManager {
    pub fn new(no_progress: bool) -> Self {
        let pb = if no_progress {
            ProgressBar::hidden()
        } else {
            let pb = ProgressBar::new_spinner();
            let style = ProgressStyle::default_spinner()
                .template("{spinner} 已處理 {pos} 個檔案 {wide_msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner());
            pb.set_style(style);
            pb.enable_steady_tick(Duration::from_millis(120));
            pb
        };
        ProgressManager {
            pb,
            no_progress,
            start: Instant::now(),
        }
    }

    pub fn update(&self, file_name: &str) {
        if self.no_progress {
            return;
        }
        self.pb.inc(1);
        self.pb.set_message(file_name.to_string());
    }

    /// 暫停進度列並執行 f，避免與日誌輸出交錯
    pub fn suspend<F: FnOnce() -> R, R>(&self, f: F) -> R {
        if self.no_progress {
            return f();
        }
        self.pb.suspend(f)
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn finish(&self, summary: &BatchSummary) {
        if self.no_progress {
            return;
        }
        self.pb.finish_and_clear();
        log::debug!("共處理 {} 個項目，耗時 {:.2} 秒", summary.processed(), self.elapsed().as_secs_f64());
    }
}

pub fn format_file_size(size: u64) -> String {
    if size < 1024 * 1024 {
        format!("{:.2} KB", size as f64 / 1024.0)
    } else {
        format!("{:.2} MB", size as f64 / (1024.0 * 1024.0))
    }
}

pub fn format_saved(saved: Option<f64>) -> String {
    match saved {
        Some(percent) => format!("{:.2}%", percent),
        None => "N/A".to_string(),
    }
}

/// 產生批次完成後的統計摘要
pub fn summary_lines(summary: &BatchSummary, elapsed: Duration) -> Vec<String> {
    let mut lines = vec![
        format!("已轉換：{} 個檔案", summary.converted),
        format!("已略過（已是目標格式）：{} 個檔案", summary.skipped),
        format!("不支援的格式：{} 個檔案", summary.unsupported),
        format!("失敗：{} 個檔案", summary.failed),
    ];
    if summary.converted > 0 {
        lines.push(format!("轉換前總大小：{}", format_file_size(summary.original_bytes)));
        lines.push(format!("轉換後總大小：{}", format_file_size(summary.converted_bytes)));
        lines.push(format!("節省空間：{}", format_saved(summary.saved_percentage())));
    }
    if summary.deleted > 0 || summary.delete_failures > 0 {
        lines.push(format!("已刪除原始檔案：{} 個，刪除失敗：{} 個", summary.deleted, summary.delete_failures));
    }
    if summary.edited_files > 0 {
        lines.push(format!("已更新引用：{} 個檔案，共 {} 處", summary.edited_files, summary.replacements));
    }
    lines.push(format!("耗時：{:.2} 秒", elapsed.as_secs_f64()));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suspend_returns_closure_result() {
        assert_eq!(ProgressManager::new(true).suspend(|| 7), 7);
        assert_eq!(ProgressManager::new(false).suspend(|| "done"), "done");
    }

    #[test]
    fn file_size_switches_to_megabytes() {
        assert_eq!(format_file_size(512), "0.50 KB");
        assert_eq!(format_file_size(3 * 1024 * 1024), "3.00 MB");
    }

    #[test]
    fn saved_percentage_formats_two_decimals() {
        assert_eq!(format_saved(Some(60.0)), "60.00%");
        assert_eq!(format_saved(None), "N/A");
    }

    #[test]
    fn summary_lines_skip_empty_sections() {
        let summary = BatchSummary { unsupported: 2, ..BatchSummary::default() };
        let lines = summary_lines(&summary, Duration::from_millis(1500));
        assert!(lines.iter().any(|l| l == "不支援的格式：2 個檔案"));
        assert!(!lines.iter().any(|l| l.starts_with("節省空間")));
        assert!(!lines.iter().any(|l| l.starts_with("已更新引用")));
        assert_eq!(lines.last().unwrap(), "耗時：1.50 秒");
    }

    #[test]
    fn summary_lines_report_savings() {
        let summary = BatchSummary {
            converted: 1,
            original_bytes: 1000,
            converted_bytes: 400,
            edited_files: 1,
            replacements: 2,
            ..BatchSummary::default()
        };
        let lines = summary_lines(&summary, Duration::ZERO);
        assert!(lines.iter().any(|l| l == "節省空間：60.00%"));
        assert!(lines.iter().any(|l| l == "已更新引用：1 個檔案，共 2 處"));
    }
}
