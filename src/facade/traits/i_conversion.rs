use std::io;
use crate::models::conversion::{BatchSummary, ConversionInput};

// Facade 接口，負責協調圖片轉換與引用替換流程
pub trait ConversionFacadeTrait {
    /// 執行批次轉換
    /// # 參數
    /// - input: 轉換所需的輸入參數
    /// # 回傳
    /// - 成功時返回整批統計；只有根路徑不存在時才返回錯誤
    fn execute_conversion(&self, input: ConversionInput) -> io::Result<BatchSummary>;
}
