use clap::{Parser, ValueEnum};
use std::fmt;
use std::io;

/// 未指定輸出目錄時使用的預設值（相對於目前工作目錄）
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// 批次模式下預設排除的檔名片段
pub const DEFAULT_EXCLUDE_PATTERNS: [&str; 3] = ["_style", "_temp", ".backup"];

pub const DEFAULT_PYTHON: &str = if cfg!(windows) { "python" } else { "python3" };

#[derive(Parser, Clone, Debug)]
#[command(
    name = "dochameleon",
    about = "文件格式轉換工具：LaTeX ↔ PDF ↔ DOCX",
    long_about = "透過外部工具在 LaTeX、PDF 與 Word (DOCX) 之間轉換文件。\n未指定 --mode 或 --input 時會進入互動模式補齊缺少的選項。\n輸入為目錄時，會轉換目錄中所有符合模式來源格式的檔案。"
)]
pub struct Cli {
    /// 轉換模式
    #[arg(short, long, value_enum)]
    pub mode: Option<Mode>,
    /// 輸入檔案或目錄
    #[arg(short, long)]
    pub input: Option<String>,
    /// 輸出目錄（預設為 ./output）
    #[arg(short, long)]
    pub output: Option<String>,
    /// 強制使用文字介面（本工具僅提供文字介面，保留此旗標以維持相容）
    #[arg(long, default_value_t = false)]
    pub cli: bool,
    /// 保留 tex2docx 過程中產生的中間 PDF
    #[arg(long, default_value_t = false)]
    pub keep_intermediate: bool,
    /// 輸入為目錄時遞迴搜尋子目錄
    #[arg(long, default_value_t = false)]
    pub recursive: bool,
    /// 批次模式下排除檔名包含這些片段的檔案（支援 * 萬用字元）
    #[arg(long, value_delimiter = ',')]
    pub exclude: Option<Vec<String>>,
    #[arg(long, env = "DOCHAMELEON_LATEX", default_value = "pdflatex")]
    pub latex_engine: String,
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u8).range(1..=5))]
    pub latex_passes: u8,
    #[arg(long = "pdf2docx", env = "DOCHAMELEON_PDF2DOCX", default_value = "pdf2docx")]
    pub pdf2docx_program: String,
    #[arg(long, env = "DOCHAMELEON_PYTHON", default_value = DEFAULT_PYTHON)]
    pub python: String,
    /// 缺少 pdf2docx 時嘗試透過 pip 安裝
    #[arg(long, default_value_t = false)]
    pub install_missing: bool,
    #[arg(long, default_value_t = false)]
    pub no_progress: bool,
    #[arg(long, default_value = "info", value_parser = ["debug", "info", "warn", "error"])]
    pub log_level: String,
}

#[derive(Clone, Copy, ValueEnum, PartialEq, Eq, Debug, Hash)]
pub enum Mode {
    #[value(name = "tex2pdf")]
    Tex2pdf,
    #[value(name = "tex2docx")]
    Tex2docx,
    #[value(name = "pdf2docx")]
    Pdf2docx,
    #[value(name = "docx2pdf")]
    Docx2pdf,
}

/// 轉換鏈中的單一步驟，每個步驟對應一個外部工具
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Step {
    Latex,
    PdfToDocx,
    Word,
}

impl Mode {
    pub const ALL: [Mode; 4] = [Mode::Tex2pdf, Mode::Tex2docx, Mode::Pdf2docx, Mode::Docx2pdf];

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Tex2pdf => "tex2pdf",
            Mode::Tex2docx => "tex2docx",
            Mode::Pdf2docx => "pdf2docx",
            Mode::Docx2pdf => "docx2pdf",
        }
    }

    pub fn source_ext(self) -> &'static str {
        match self {
            Mode::Tex2pdf | Mode::Tex2docx => "tex",
            Mode::Pdf2docx => "pdf",
            Mode::Docx2pdf => "docx",
        }
    }

    pub fn target_ext(self) -> &'static str {
        match self {
            Mode::Tex2pdf | Mode::Docx2pdf => "pdf",
            Mode::Tex2docx | Mode::Pdf2docx => "docx",
        }
    }

    /// 依序執行的轉換步驟
    pub fn chain(self) -> &'static [Step] {
        match self {
            Mode::Tex2pdf => &[Step::Latex],
            Mode::Tex2docx => &[Step::Latex, Step::PdfToDocx],
            Mode::Pdf2docx => &[Step::PdfToDocx],
            Mode::Docx2pdf => &[Step::Word],
        }
    }

    /// 互動選單中顯示的說明
    pub fn label(self) -> &'static str {
        match self {
            Mode::Tex2pdf => "TEX  → PDF   (LaTeX 轉 PDF)",
            Mode::Tex2docx => "TEX  → DOCX  (LaTeX 轉 Word，經由 PDF)",
            Mode::Pdf2docx => "PDF  → DOCX  (PDF 轉 Word)",
            Mode::Docx2pdf => "DOCX → PDF   (Word 轉 PDF，需要 Microsoft Word)",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn is_valid_pattern(pattern: &str) -> bool {
    let invalid_chars = ['/', '\\', ':', '?', '"', '<', '>', '|'];
    !pattern.is_empty() && !pattern.contains(&invalid_chars[..])
}

pub fn validate_exclude_patterns(exclude: &[String]) -> io::Result<()> {
    for pattern in exclude {
        if !is_valid_pattern(pattern) {
            return Err(io::Error::new(io::ErrorKind::InvalidInput, format!("無效的排除模式: {}", pattern)));
        }
    }
    Ok(())
}
