use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use log::{debug, info, warn};
use crate::error::ConversionError;
use crate::service::path::{file_stem, remove_stale_output};
use crate::service::process::{describe_failure, locate, run_command};
use crate::service::traits::i_service::ConverterTrait;

/// 編譯後移除的 LaTeX 輔助檔副檔名，只含 LaTeX 引擎本身會寫出的檔案（.bbl/.blg 由 BibTeX 產生，可能是使用者提供的來源）
pub const AUXILIARY_EXTENSIONS: [&str; 11] = [
    "aux", "log", "out", "toc", "lof", "lot", "fls", "fdb_latexmk", "synctex.gz", "nav", "snm",
];

/// LaTeX 服務，呼叫 LaTeX 引擎將 .tex 編譯為 PDF
pub struct LatexService {
    engine: String,
    passes: u8,
}

impl LatexService {
    pub fn new(engine: impl Into<String>, passes: u8) -> Self {
        LatexService {
            engine: engine.into(),
            passes: passes.max(1),
        }
    }
}

impl ConverterTrait for LatexService {
    fn name(&self) -> &str {
        &self.engine
    }

    fn check_available(&self) -> Result<(), ConversionError> {
        locate(&self.engine).map(|path| debug!("LaTeX 引擎：{}", path.display()))
    }

    fn convert(&self, input: &Path, output_dir: &Path) -> Result<PathBuf, ConversionError> {
        let stem = file_stem(input)?;
        let pdf_path = output_dir.join(format!("{}.pdf", stem));
        // 在來源目錄執行，讓 \input 與圖片的相對路徑可以解析
        let work_dir = input.parent().unwrap_or_else(|| Path::new("."));
        let mut output_arg = std::ffi::OsString::from("-output-directory=");
        output_arg.push(output_dir);
        remove_stale_output(&pdf_path)?;

        for pass in 1..=self.passes {
            info!("編譯 {}（第 {}/{} 次）", input.display(), pass, self.passes);
            let output = run_command(
                &self.engine,
                Command::new(&self.engine)
                    .arg("-interaction=nonstopmode")
                    .arg("-halt-on-error")
                    .arg(&output_arg)
                    .arg(input)
                    .current_dir(work_dir),
            )?;

            if !output.status.success() {
                let log_path = output_dir.join(format!("{}.log", stem));
                let detail = fs::read_to_string(&log_path)
                    .ok()
                    .and_then(|log| extract_latex_error(&log))
                    .unwrap_or_else(|| describe_failure(&output));
                clean_auxiliary_files(output_dir, &stem);
                return Err(ConversionError::tool(&self.engine, format!("第 {} 次編譯失敗：{}", pass, detail)));
            }
        }

        if !pdf_path.is_file() {
            clean_auxiliary_files(output_dir, &stem);
            return Err(ConversionError::missing_output(&self.engine, &pdf_path));
        }
        clean_auxiliary_files(output_dir, &stem);
        Ok(pdf_path)
    }
}

/// 從 LaTeX 日誌中取出第一個錯誤（以 `!` 開頭的行，連同其後的行號提示）
pub fn extract_latex_error(log: &str) -> Option<String> {
    let mut lines = log.lines();
    let first = lines.find(|line| line.starts_with('!'))?;
    let mut message = first.trim_start_matches('!').trim().to_string();
    if let Some(location) = lines.take(6).find(|line| line.starts_with("l.")) {
        message.push_str(&format!("（{}）", location.trim()));
    }
    Some(message)
}

/// 刪除與 stem 同名的輔助檔，只記錄失敗不中斷流程
pub fn clean_auxiliary_files(dir: &Path, stem: &str) {
    for ext in AUXILIARY_EXTENSIONS {
        let path = dir.join(format!("{}.{}", stem, ext));
        if path.is_file() {
            match fs::remove_file(&path) {
                Ok(()) => debug!("已刪除輔助檔：{}", path.display()),
                Err(e) => warn!("無法刪除輔助檔 {}：{}", path.display(), e),
            }
        }
    }
}
