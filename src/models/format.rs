use clap::ValueEnum;
use std::fmt;
use std::path::Path;

// 轉換目標格式
#[derive(Clone, Copy, ValueEnum, PartialEq, Eq, Debug)]
pub enum TargetFormat {
    Webp,
    #[value(alias = "jpg")]
    Jpeg,
    Png,
}

impl TargetFormat {
    /// 輸出檔案使用的副檔名（不含點）
    pub fn extension(self) -> &'static str {
        match self {
            TargetFormat::Webp => "webp",
            TargetFormat::Jpeg => "jpg",
            TargetFormat::Png => "png",
        }
    }

    /// 判斷副檔名是否已是目標格式，JPEG 同時接受 jpg 與 jpeg
    pub fn matches_extension(self, ext: &str) -> bool {
        let ext = ext.to_ascii_lowercase();
        match self {
            TargetFormat::Webp => ext == "webp",
            TargetFormat::Jpeg => ext == "jpg" || ext == "jpeg",
            TargetFormat::Png => ext == "png",
        }
    }
}

impl fmt::Display for TargetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TargetFormat::Webp => "webp",
            TargetFormat::Jpeg => "jpeg",
            TargetFormat::Png => "png",
        };
        write!(f, "{}", name)
    }
}

// 可作為輸入的圖片格式
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SourceFormat {
    Jpeg,
    Png,
    Webp,
}

impl SourceFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(SourceFormat::Jpeg),
            "png" => Some(SourceFormat::Png),
            "webp" => Some(SourceFormat::Webp),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }
}
