use std::io;
use std::path::PathBuf;
use thiserror::Error;

// 單一檔案轉換失敗的原因，不會中斷整批處理
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("無法讀取檔案 {}：{source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("無法解碼圖片 {}：{source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("無法編碼圖片 {}：{source}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("寫入檔案 {} 失敗：{source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("刪除原始檔案 {} 失敗：{source}", .path.display())]
    Delete {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
