use std::io;
use std::path::Path;
use thiserror::Error;

/// 轉換流程中可能發生的錯誤
#[derive(Debug, Error)]
pub enum ConversionError {
    /// 輸入路徑不存在或副檔名與模式不符
    #[error("輸入無效：{0}")]
    InvalidInput(String),

    /// 無法建立或寫入輸出目錄
    #[error("檔案系統錯誤：{message}")]
    Filesystem {
        message: String,
        #[source]
        source: io::Error,
    },

    /// 外部工具不存在、執行失敗或未產生輸出
    #[error("外部工具 {tool} 失敗：{message}")]
    ExternalTool { tool: String, message: String },

    /// 目前平台缺少所需的文書處理器自動化功能
    #[error("此平台不支援：{0}")]
    UnsupportedPlatform(String),
}

/// 不含內容的錯誤分類，供結果回報與結束碼使用
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    Filesystem,
    ExternalTool,
    UnsupportedPlatform,
}

impl ConversionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConversionError::InvalidInput(_) => ErrorKind::InvalidInput,
            ConversionError::Filesystem { .. } => ErrorKind::Filesystem,
            ConversionError::ExternalTool { .. } => ErrorKind::ExternalTool,
            ConversionError::UnsupportedPlatform(_) => ErrorKind::UnsupportedPlatform,
        }
    }

    pub fn filesystem(path: &Path, action: &str, source: io::Error) -> Self {
        ConversionError::Filesystem {
            message: format!("{} '{}' 失敗：{}", action, path.display(), source),
            source,
        }
    }

    pub fn tool(tool: &str, message: impl Into<String>) -> Self {
        ConversionError::ExternalTool {
            tool: tool.to_string(),
            message: message.into(),
        }
    }

    pub fn missing_output(tool: &str, expected: &Path) -> Self {
        Self::tool(tool, format!("未產生輸出檔案 '{}'", expected.display()))
    }
}
