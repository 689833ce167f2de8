use std::io;
use crate::config::config::{Mode, DEFAULT_EXCLUDE_PATTERNS, DEFAULT_OUTPUT_DIR, DEFAULT_PYTHON};
use crate::models::conversion::BatchSummary;

// 外部工具設定
#[derive(Debug, Clone)]
pub struct ToolConfig {
    pub latex_engine: String,
    pub latex_passes: u8,
    pub pdf2docx_program: String,
    pub python: String,
}

impl Default for ToolConfig {
    fn default() -> Self {
        ToolConfig {
            latex_engine: "pdflatex".to_string(),
            latex_passes: 2,
            pdf2docx_program: "pdf2docx".to_string(),
            python: DEFAULT_PYTHON.to_string(),
        }
    }
}

// 應用配置結構體，封裝所有參數
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub mode: Mode,
    pub input: String,
    pub output: String,
    pub keep_intermediate: bool,
    pub recursive: bool,
    pub exclude: Vec<String>,
    pub tools: ToolConfig,
    pub install_missing: bool,
    pub no_progress: bool,
}

impl AppConfig {
    pub fn new(mode: Mode, input: String, output: Option<String>) -> Self {
        AppConfig {
            mode,
            input,
            output: output.unwrap_or_else(|| DEFAULT_OUTPUT_DIR.to_string()),
            keep_intermediate: false,
            recursive: false,
            exclude: DEFAULT_EXCLUDE_PATTERNS.iter().map(|p| p.to_string()).collect(),
            tools: ToolConfig::default(),
            install_missing: false,
            no_progress: false,
        }
    }
}

// 配置來源的 Port
pub trait ConfigPort {
    fn get_config(&self) -> io::Result<AppConfig>;
}

// 轉換執行的 Port
pub trait ConversionPort {
    fn execute(&self, config: AppConfig) -> io::Result<BatchSummary>;
}
