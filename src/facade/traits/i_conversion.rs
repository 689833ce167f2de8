use crate::models::conversion::{ConversionRequest, ConversionResult};

// Facade 接口，負責依模式協調轉換鏈
pub trait ConversionFacadeTrait: Send + Sync {
    /// 執行單一檔案的轉換
    /// # 參數
    /// - request: 轉換模式、輸入檔案與輸出目錄
    /// # 回傳
    /// - 轉換結果；所有錯誤都會轉為 success = false 的結果，不會向外傳遞
    fn execute_conversion(&self, request: &ConversionRequest) -> ConversionResult;
}
