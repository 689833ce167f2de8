use std::io;
use clap::Parser;
use log::{debug, error, info, warn};
use crate::action::interactive::{prompt_mode, InteractiveConfigAdapter};
use crate::config::config::Cli;
use crate::config::ports::{AppConfig, ConfigPort, ConversionPort};
use crate::models::conversion::BatchSummary;
use crate::service::config_service::ConfigService;
use crate::service::requirements::RequirementsService;
use crate::service::runner::ConversionRunner;
use crate::utils::utils::{print_header, setup_logging};

/// 解析命令列；缺少模式或輸入時改由互動提示補齊。
/// 使用者在選單中選擇離開時返回 `None`。
pub fn process_args(args: Vec<String>) -> io::Result<Option<BatchSummary>> {
    let cli = Cli::parse_from(args);
    setup_logging(&cli.log_level)?;
    print_header();
    if cli.cli {
        debug!("--cli：使用文字介面");
    }

    // 檢查是否已透過旗標提供模式與輸入
    let config_port: Box<dyn ConfigPort> = match (cli.mode, cli.input.as_ref()) {
        (Some(_), Some(_)) => Box::new(CliConfigAdapter::new(cli.clone())),
        _ => {
            let mode = match cli.mode {
                Some(mode) => mode,
                None => match prompt_mode()? {
                    Some(mode) => mode,
                    None => {
                        println!("\n再見！");
                        return Ok(None);
                    }
                },
            };
            Box::new(InteractiveConfigAdapter::new(cli.clone(), mode))
        }
    };

    let config = ConfigService::new(config_port).get_config()?;
    run_conversion(config).map(Some)
}

/// 檢查外部工具後執行轉換並印出摘要
pub fn run_conversion(config: AppConfig) -> io::Result<BatchSummary> {
    println!("檢查需求...");
    let report = RequirementsService::new(config.tools.clone()).ensure_for_mode(config.mode, config.install_missing);
    for line in report.status_lines(&config.tools) {
        println!("{}", line);
    }
    if !report.satisfies(config.mode) {
        warn!("模式 {} 所需的工具不完整，轉換將會失敗", config.mode);
    }
    println!();
    println!("輸入路徑：{}", config.input);
    println!("輸出目錄：{}", config.output);
    println!("{}", "-".repeat(50));

    let conversion_port: Box<dyn ConversionPort> = Box::new(ConversionRunner::from_config(&config));
    let summary = conversion_port.execute(config)?;

    println!("{}", "-".repeat(50));
    println!("完成：{} 個成功，{} 個失敗", summary.succeeded, summary.failed);
    println!("輸出：{}", summary.output_dir.display());
    Ok(summary)
}

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_FAILURE: u8 = 1;

/// 程式結束碼：選單中離開，或至少一個檔案轉換成功且沒有失敗時為 0
pub fn exit_status(outcome: &io::Result<Option<BatchSummary>>) -> u8 {
    match outcome {
        Ok(None) => EXIT_SUCCESS,
        Ok(Some(summary)) if summary.all_succeeded() => EXIT_SUCCESS,
        Ok(Some(_)) | Err(_) => EXIT_FAILURE,
    }
}

/// 印出最終結果並返回結束碼
pub fn finish(outcome: io::Result<Option<BatchSummary>>) -> u8 {
    match &outcome {
        Ok(None) => {}
        Ok(Some(summary)) if summary.all_succeeded() => {
            info!("程式執行完成，輸出目錄：{}", summary.output_dir.display());
            println!("轉換完成！輸出檔案位於：{}", summary.output_dir.display());
        }
        Ok(Some(summary)) => error!("轉換未全部成功：{} 個失敗", summary.failed),
        Err(e) => {
            error!("{}", e);
            eprintln!("錯誤：{}", e);
        }
    }
    exit_status(&outcome)
}

/// 將模式與輸入以外的命令列選項套用到配置
pub fn apply_cli_options(config: &mut AppConfig, cli: &Cli) {
    config.keep_intermediate = cli.keep_intermediate;
    config.recursive = cli.recursive;
    if let Some(exclude) = &cli.exclude {
        config.exclude = exclude.clone();
    }
    config.tools.latex_engine = cli.latex_engine.clone();
    config.tools.latex_passes = cli.latex_passes;
    config.tools.pdf2docx_program = cli.pdf2docx_program.clone();
    config.tools.python = cli.python.clone();
    config.install_missing = cli.install_missing;
    config.no_progress = cli.no_progress;
}

// CLI 配置適配器
pub struct CliConfigAdapter {
    cli: Cli,
}

impl CliConfigAdapter {
    pub fn new(cli: Cli) -> Self {
        CliConfigAdapter { cli }
    }
}

impl ConfigPort for CliConfigAdapter {
    fn get_config(&self) -> io::Result<AppConfig> {
        let (Some(mode), Some(input)) = (self.cli.mode, self.cli.input.clone()) else {
            return Err(io::Error::new(io::ErrorKind::InvalidInput, "命令列模式需要同時指定 --mode 與 --input"));
        };
        let mut config = AppConfig::new(mode, input, self.cli.output.clone());
        apply_cli_options(&mut config, &self.cli);
        Ok(config)
    }
}
