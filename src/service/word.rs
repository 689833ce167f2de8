use std::path::{Path, PathBuf};
use std::process::Command;
use log::{debug, info};
use crate::error::ConversionError;
use crate::service::path::{file_stem, remove_stale_output};
use crate::service::process::{describe_failure, run_command};
use crate::service::traits::i_service::ConverterTrait;

const TOOL_NAME: &str = "Microsoft Word";
const POWERSHELL: &str = "powershell";
/// Word 的 wdFormatPDF 存檔格式代碼
const WD_FORMAT_PDF: u32 = 17;

/// Word 服務，透過 PowerShell 驅動 Word COM 自動化匯出 PDF（僅限 Windows）
pub struct WordService {
    powershell: String,
}

impl WordService {
    pub fn new() -> Self {
        WordService { powershell: POWERSHELL.to_string() }
    }

    fn word_registered(&self) -> bool {
        Command::new("reg")
            .args(["query", r"HKEY_CLASSES_ROOT\Word.Application"])
            .output()
            .map(|output| output.status.success())
            .unwrap_or(false)
    }
}

impl Default for WordService {
    fn default() -> Self {
        Self::new()
    }
}

impl ConverterTrait for WordService {
    fn name(&self) -> &str {
        TOOL_NAME
    }

    fn check_available(&self) -> Result<(), ConversionError> {
        if !cfg!(windows) {
            return Err(ConversionError::UnsupportedPlatform(
                "DOCX → PDF 需要 Microsoft Word 自動化，僅支援 Windows".to_string(),
            ));
        }
        if which::which(&self.powershell).is_err() {
            return Err(ConversionError::UnsupportedPlatform("找不到 PowerShell，無法驅動 Microsoft Word".to_string()));
        }
        if !self.word_registered() {
            return Err(ConversionError::UnsupportedPlatform("未偵測到已安裝的 Microsoft Word".to_string()));
        }
        debug!("已偵測到 Microsoft Word");
        Ok(())
    }

    fn convert(&self, input: &Path, output_dir: &Path) -> Result<PathBuf, ConversionError> {
        let stem = file_stem(input)?;
        let pdf_path = output_dir.join(format!("{}.pdf", stem));
        info!("以 Word 匯出 {} → {}", input.display(), pdf_path.display());
        remove_stale_output(&pdf_path)?;

        let script = export_script(input, &pdf_path);
        let output = run_command(
            TOOL_NAME,
            Command::new(&self.powershell)
                .args(["-NoProfile", "-NonInteractive", "-ExecutionPolicy", "Bypass", "-Command"])
                .arg(script),
        )?;
        if !output.status.success() {
            return Err(ConversionError::tool(TOOL_NAME, describe_failure(&output)));
        }
        if !pdf_path.is_file() {
            return Err(ConversionError::missing_output(TOOL_NAME, &pdf_path));
        }
        Ok(pdf_path)
    }
}

/// PowerShell 單引號字串中的單引號需重複一次
fn ps_quote(path: &Path) -> String {
    path.display().to_string().replace('\'', "''")
}

/// 產生以唯讀方式開啟文件並另存為 PDF 的腳本，無論成功與否都會關閉 Word
pub fn export_script(input: &Path, output: &Path) -> String {
    format!(
        "$ErrorActionPreference = 'Stop'\n\
         $word = New-Object -ComObject Word.Application\n\
         $word.Visible = $false\n\
         $word.DisplayAlerts = 0\n\
         try {{\n\
         \x20   $doc = $word.Documents.Open('{input}', $false, $true)\n\
         \x20   try {{ $doc.SaveAs2('{output}', {format}) }} finally {{ $doc.Close($false) }}\n\
         }} finally {{\n\
         \x20   $word.Quit()\n\
         }}\n",
        input = ps_quote(input),
        output = ps_quote(output),
        format = WD_FORMAT_PDF,
    )
}
