use crate::config::config::Mode;
use crate::error::{ConversionError, ErrorKind};
use std::path::PathBuf;

/// 單一檔案的轉換請求，建立後不再變更
#[derive(Clone, Debug)]
pub struct ConversionRequest {
    pub mode: Mode,
    pub input_path: PathBuf,
    pub output_dir: PathBuf,
    pub keep_intermediate: bool,
}

impl ConversionRequest {
    pub fn new(mode: Mode, input_path: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        ConversionRequest {
            mode,
            input_path: input_path.into(),
            output_dir: output_dir.into(),
            keep_intermediate: false,
        }
    }

    pub fn keep_intermediate(mut self, keep: bool) -> Self {
        self.keep_intermediate = keep;
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ConversionResult {
    pub input_path: PathBuf,
    pub success: bool,
    pub output_path: Option<PathBuf>,
    pub error_message: Option<String>,
    pub error_kind: Option<ErrorKind>,
}

impl ConversionResult {
    pub fn succeeded(input_path: PathBuf, output_path: PathBuf) -> Self {
        ConversionResult {
            input_path,
            success: true,
            output_path: Some(output_path),
            error_message: None,
            error_kind: None,
        }
    }

    pub fn failed(input_path: PathBuf, error: &ConversionError) -> Self {
        ConversionResult {
            input_path,
            success: false,
            output_path: None,
            error_message: Some(error.to_string()),
            error_kind: Some(error.kind()),
        }
    }
}

/// 一次執行（單檔或整個目錄）的彙總結果
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub output_dir: PathBuf,
    pub succeeded: usize,
    pub failed: usize,
    pub results: Vec<ConversionResult>,
}

impl BatchSummary {
    pub fn new(output_dir: PathBuf) -> Self {
        BatchSummary { output_dir, ..Default::default() }
    }

    pub fn record(&mut self, result: ConversionResult) {
        if result.success {
            self.succeeded += 1;
        } else {
            self.failed += 1;
        }
        self.results.push(result);
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// 至少有一個檔案且全部成功
    pub fn all_succeeded(&self) -> bool {
        !self.is_empty() && self.failed == 0
    }
}
