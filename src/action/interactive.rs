use dialoguer::{Confirm, Input, Select};
use std::io;
use std::path::Path;

use crate::action::cli::apply_cli_options;
use crate::config::config::{Cli, Mode, DEFAULT_OUTPUT_DIR};
use crate::config::ports::{AppConfig, ConfigPort};

/// 選單索引對應的模式；最後一項為離開
pub fn mode_from_selection(index: usize) -> Option<Mode> {
    Mode::ALL.get(index).copied()
}

/// 顯示轉換選單，選擇離開時返回 `None`
pub fn prompt_mode() -> io::Result<Option<Mode>> {
    let mut items: Vec<&str> = Mode::ALL.iter().map(|mode| mode.label()).collect();
    items.push("離開");
    let index = Select::new()
        .with_prompt("選擇轉換方式（使用方向鍵選擇，按 Enter 確認）")
        .items(&items)
        .default(0)
        .interact()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("轉換方式選擇失敗: {}", e)))?;
    Ok(mode_from_selection(index))
}

pub fn get_input_path(mode: Mode) -> io::Result<String> {
    Input::new()
        .with_prompt(format!("請輸入 .{} 檔案或目錄路徑", mode.source_ext()))
        .validate_with(|input: &String| -> Result<(), String> {
            if Path::new(input.trim()).exists() { Ok(()) } else { Err(format!("路徑 '{}' 不存在", input)) }
        })
        .interact_text()
        .map(|input: String| input.trim().to_string())
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))
}

pub fn get_output_path() -> io::Result<String> {
    Input::new()
        .with_prompt(format!("輸入輸出目錄（預設為 {}）", DEFAULT_OUTPUT_DIR))
        .default(DEFAULT_OUTPUT_DIR.to_string())
        .interact_text()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))
}

pub fn get_keep_intermediate_option() -> io::Result<bool> {
    Confirm::new()
        .with_prompt("是否保留中間產生的 PDF？")
        .default(false)
        .interact()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("中間檔選項輸入失敗: {}", e)))
}

// 互動配置適配器：命令列已提供的值直接使用，缺少的再詢問
pub struct InteractiveConfigAdapter {
    cli: Cli,
    mode: Mode,
}

impl InteractiveConfigAdapter {
    pub fn new(cli: Cli, mode: Mode) -> Self {
        InteractiveConfigAdapter { cli, mode }
    }
}

impl ConfigPort for InteractiveConfigAdapter {
    fn get_config(&self) -> io::Result<AppConfig> {
        let input = match &self.cli.input {
            Some(input) => input.clone(),
            None => get_input_path(self.mode)?,
        };
        let output = match &self.cli.output {
            Some(output) => output.clone(),
            None => get_output_path()?,
        };

        let mut config = AppConfig::new(self.mode, input, Some(output));
        apply_cli_options(&mut config, &self.cli);
        if self.mode == Mode::Tex2docx && !self.cli.keep_intermediate {
            config.keep_intermediate = get_keep_intermediate_option()?;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn menu_indices_map_to_modes() {
        assert_eq!(mode_from_selection(0), Some(Mode::Tex2pdf));
        assert_eq!(mode_from_selection(1), Some(Mode::Tex2docx));
        assert_eq!(mode_from_selection(2), Some(Mode::Pdf2docx));
        assert_eq!(mode_from_selection(3), Some(Mode::Docx2pdf));
        assert_eq!(mode_from_selection(4), None);
    }

    #[test]
    fn prefilled_values_skip_prompts() {
        let cli = Cli::try_parse_from(["dochameleon", "-i", "a.pdf", "-o", "out"]).unwrap();
        let config = InteractiveConfigAdapter::new(cli, Mode::Pdf2docx).get_config().unwrap();
        assert_eq!(config.mode, Mode::Pdf2docx);
        assert_eq!(config.input, "a.pdf");
        assert_eq!(config.output, "out");
    }
}
