use std::fs;
use std::path::{Path, PathBuf};
use log::{debug, error, info};
use crate::config::config::Mode;
use crate::error::ConversionError;

/// 比對副檔名（不分大小寫）
pub fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case(extension))
        .unwrap_or(false)
}

/// 取得檔名主體，供組成輸出檔名
pub fn file_stem(path: &Path) -> Result<String, ConversionError> {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .filter(|stem| !stem.is_empty())
        .ok_or_else(|| ConversionError::InvalidInput(format!("無法取得檔名：'{}'", path.display())))
}

/// 驗證輸入檔案存在、為一般檔案，且副檔名符合模式的來源格式
pub fn resolve_input(input: &Path, mode: Mode) -> Result<PathBuf, ConversionError> {
    if !input.exists() {
        error!("輸入路徑不存在：{}", input.display());
        return Err(ConversionError::InvalidInput(format!("輸入路徑 '{}' 不存在", input.display())));
    }
    if !input.is_file() {
        return Err(ConversionError::InvalidInput(format!("輸入路徑 '{}' 不是一般檔案", input.display())));
    }
    if !has_extension(input, mode.source_ext()) {
        return Err(ConversionError::InvalidInput(format!(
            "模式 {} 需要 .{} 檔案，收到 '{}'",
            mode,
            mode.source_ext(),
            input.display()
        )));
    }
    std::path::absolute(input).map_err(|e| ConversionError::filesystem(input, "解析路徑", e))
}

/// 確保輸出目錄存在（含缺少的上層目錄），返回其絕對路徑
pub fn prepare_output_dir(output_dir: &Path) -> Result<PathBuf, ConversionError> {
    if output_dir.exists() && !output_dir.is_dir() {
        return Err(ConversionError::filesystem(
            output_dir,
            "建立輸出目錄",
            std::io::Error::new(std::io::ErrorKind::AlreadyExists, "同名檔案已存在"),
        ));
    }
    if !output_dir.exists() {
        fs::create_dir_all(output_dir).map_err(|e| ConversionError::filesystem(output_dir, "建立輸出目錄", e))?;
        info!("已建立輸出目錄：{}", output_dir.display());
    } else {
        debug!("輸出目錄已存在：{}", output_dir.display());
    }
    std::path::absolute(output_dir).map_err(|e| ConversionError::filesystem(output_dir, "解析路徑", e))
}

/// 執行外部工具前刪除同名的舊輸出，之後找到的檔案必定是這次產生的
pub fn remove_stale_output(target: &Path) -> Result<(), ConversionError> {
    if target.is_file() {
        fs::remove_file(target).map_err(|e| ConversionError::filesystem(target, "刪除舊的輸出檔", e))?;
        debug!("已刪除舊的輸出檔：{}", target.display());
    }
    Ok(())
}
