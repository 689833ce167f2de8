use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::process::Command;
use log::{debug, info, warn};
use zip::ZipArchive;
use crate::error::ConversionError;
use crate::service::path::{file_stem, remove_stale_output};
use crate::service::process::{describe_failure, locate, run_command};
use crate::service::traits::i_service::ConverterTrait;

/// 每個 DOCX 都必須包含的主文件部件
const DOCX_MAIN_PART: &str = "word/document.xml";

/// 附加在 `pdf2docx convert` 之後的版面參數
pub const LAYOUT_ARGS: [&str; 9] = [
    "--connected_border_tolerance=1.0",
    "--min_section_height=30",
    "--line_overlap_threshold=0.9",
    "--line_break_width_ratio=0.5",
    "--line_break_free_space_ratio=0.15",
    "--new_paragraph_free_space_ratio=0.85",
    "--float_image_ignorable_gap=10",
    "--page_margin_factor_top=0.0",
    "--page_margin_factor_bottom=0.0",
];

/// PDF 服務，透過 pdf2docx 命令列工具將 PDF 轉為 DOCX
pub struct PdfService {
    program: String,
}

impl PdfService {
    pub fn new(program: impl Into<String>) -> Self {
        PdfService { program: program.into() }
    }
}

impl ConverterTrait for PdfService {
    fn name(&self) -> &str {
        &self.program
    }

    fn check_available(&self) -> Result<(), ConversionError> {
        locate(&self.program).map(|path| debug!("pdf2docx：{}", path.display()))
    }

    fn convert(&self, input: &Path, output_dir: &Path) -> Result<PathBuf, ConversionError> {
        let stem = file_stem(input)?;
        let docx_path = output_dir.join(format!("{}.docx", stem));
        info!("轉換 {} → {}", input.display(), docx_path.display());
        remove_stale_output(&docx_path)?;

        let output = run_command(
            &self.program,
            Command::new(&self.program).arg("convert").arg(input).arg(&docx_path).args(LAYOUT_ARGS),
        )?;
        if !output.status.success() {
            return Err(ConversionError::tool(&self.program, describe_failure(&output)));
        }
        if !docx_path.is_file() {
            return Err(ConversionError::missing_output(&self.program, &docx_path));
        }

        if let Err(reason) = validate_docx(&docx_path) {
            if let Err(e) = fs::remove_file(&docx_path) {
                warn!("無法刪除損壞的輸出 {}：{}", docx_path.display(), e);
            }
            return Err(ConversionError::tool(&self.program, format!("產生的 DOCX 無效：{}", reason)));
        }
        Ok(docx_path)
    }
}

/// 確認檔案是可讀的 ZIP 封裝並含有主文件部件
pub fn validate_docx(path: &Path) -> Result<(), String> {
    let file = File::open(path).map_err(|e| format!("無法開啟 {}：{}", path.display(), e))?;
    let mut archive = ZipArchive::new(file).map_err(|e| format!("不是有效的 ZIP 封裝：{}", e))?;
    archive
        .by_name(DOCX_MAIN_PART)
        .map(|_| ())
        .map_err(|_| format!("缺少 {}", DOCX_MAIN_PART))
}
