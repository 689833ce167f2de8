use std::io;
use std::path::{Path, PathBuf};
use crate::error::ConversionError;
use crate::models::file::{FileCollectInput, FileCollectOutput};

// File 服務接口，負責檔案收集
pub trait FileServiceTrait: Send + Sync {
    /// 收集符合條件的來源檔案
    /// # 參數
    /// - input: 檔案收集的輸入參數
    /// # 回傳
    /// - 成功時返回依路徑排序的檔案列表，失敗時返回 IO 錯誤
    fn collect_files(&self, input: FileCollectInput) -> io::Result<FileCollectOutput>;
}

// 轉換器接口，每個實作包裝一個外部工具
pub trait ConverterTrait: Send + Sync {
    /// 外部工具名稱，用於日誌與錯誤訊息
    fn name(&self) -> &str;

    /// 在派送前檢查工具是否可用
    /// # 回傳
    /// - 工具缺失時返回 ExternalTool 錯誤，平台不支援時返回 UnsupportedPlatform 錯誤
    fn check_available(&self) -> Result<(), ConversionError>;

    /// 將一個檔案轉換後寫入目標目錄
    /// # 參數
    /// - input: 來源檔案的絕對路徑
    /// - output_dir: 已存在的目標目錄
    /// # 回傳
    /// - 成功時返回產生的檔案路徑
    fn convert(&self, input: &Path, output_dir: &Path) -> Result<PathBuf, ConversionError>;
}
