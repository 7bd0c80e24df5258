use std::io;
use std::path::Path;
use crate::error::ConvertError;
use crate::models::conversion::ConversionResult;
use crate::models::file::ImageFile;
use crate::models::format::TargetFormat;
use crate::models::reference::ReferenceEdit;

// Image 服務接口，負責圖片解碼與重新編碼
pub trait ImageServiceTrait {
    /// 將單一圖片轉換為目標格式，寫入同目錄下的同名檔案
    /// # 參數
    /// - image: 待轉換的圖片
    /// - target: 目標格式
    /// - jpeg_quality: 目標為 JPEG 時的品質
    /// # 回傳
    /// - 成功時返回轉換前後的大小，失敗時返回轉換錯誤，且不留下不完整的輸出檔
    fn convert(
        &self,
        image: &ImageFile,
        target: TargetFormat,
        jpeg_quality: u8,
    ) -> Result<ConversionResult, ConvertError>;
}

// Reference 服務接口，負責替換文字檔中的圖片檔名
pub trait ReferenceServiceTrait {
    /// 掃描根目錄下的文字檔，將完整單字的舊檔名替換為新檔名
    /// # 參數
    /// - old_name: 原始檔名（含副檔名，不含路徑）
    /// - new_name: 新檔名
    /// - root: 掃描的根目錄
    /// # 回傳
    /// - 實際被修改的檔案及其替換次數
    fn rewrite_references(
        &self,
        old_name: &str,
        new_name: &str,
        root: &Path,
    ) -> io::Result<Vec<ReferenceEdit>>;
}
