use std::io;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};
use log::debug;
use crate::error::ConversionError;

const FAILURE_TAIL_LINES: usize = 5;

/// 在 PATH 中尋找外部工具（亦接受直接給定的路徑）
pub fn locate(program: &str) -> Result<PathBuf, ConversionError> {
    which::which(program).map_err(|e| {
        ConversionError::tool(program, format!("找不到可執行檔（{}），請確認已安裝並加入 PATH", e))
    })
}

/// 執行外部工具並等待結束，stdin 一律關閉以免工具等待輸入
pub fn run_command(tool: &str, command: &mut Command) -> Result<Output, ConversionError> {
    debug!("執行外部工具：{:?}", command);
    let output = command.stdin(Stdio::null()).output().map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ConversionError::tool(tool, "找不到可執行檔，請確認已安裝"),
        _ => ConversionError::tool(tool, format!("無法啟動：{}", e)),
    })?;
    debug!("{} 結束，狀態：{}", tool, output.status);
    Ok(output)
}

/// 將失敗的執行結果整理成簡短訊息：結束碼加上輸出的最後幾行
pub fn describe_failure(output: &Output) -> String {
    let code = output
        .status
        .code()
        .map(|c| c.to_string())
        .unwrap_or_else(|| "被訊號終止".to_string());
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let source = if stderr.trim().is_empty() { stdout } else { stderr };
    let tail = tail_lines(&source, FAILURE_TAIL_LINES);
    if tail.is_empty() {
        format!("結束碼 {}", code)
    } else {
        format!("結束碼 {}：{}", code, tail)
    }
}

pub fn tail_lines(text: &str, count: usize) -> String {
    let lines: Vec<&str> = text.lines().map(str::trim_end).filter(|l| !l.trim().is_empty()).collect();
    let start = lines.len().saturating_sub(count);
    lines[start..].join(" | ")
}
