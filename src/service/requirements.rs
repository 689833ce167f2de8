use std::process::{Command, Stdio};
use log::{info, warn};
use crate::config::config::{Mode, Step};
use crate::config::ports::ToolConfig;
use crate::service::traits::i_service::ConverterTrait;
use crate::service::word::WordService;

const PDF2DOCX_PACKAGE: &str = "pdf2docx";

/// 各外部工具的可用狀態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequirementsReport {
    pub latex: bool,
    pub pdf2docx: bool,
    pub word: bool,
}

impl RequirementsReport {
    /// 模式所需的工具是否全部可用
    pub fn satisfies(&self, mode: Mode) -> bool {
        mode.chain().iter().all(|step| match step {
            Step::Latex => self.latex,
            Step::PdfToDocx => self.pdf2docx,
            Step::Word => self.word,
        })
    }

    pub fn status_lines(&self, tools: &ToolConfig) -> Vec<String> {
        let mark = |ok: bool| if ok { "✓" } else { "⚠" };
        vec![
            format!(
                "  {} LaTeX ({}){}",
                mark(self.latex),
                tools.latex_engine,
                if self.latex { " 可用" } else { " 未找到（.tex 檔案需要，請安裝 MiKTeX 或 TeX Live）" }
            ),
            format!(
                "  {} pdf2docx ({}){}",
                mark(self.pdf2docx),
                tools.pdf2docx_program,
                if self.pdf2docx { " 可用" } else { " 未找到（PDF → DOCX 需要，可使用 --install-missing 安裝）" }
            ),
            format!(
                "  {} Microsoft Word{}",
                mark(self.word),
                if self.word { " 可用" } else { " 不可用（DOCX → PDF 需要 Windows 與 Word）" }
            ),
        ]
    }
}

/// 需求檢查服務：確認外部工具是否存在，必要時透過 pip 安裝 pdf2docx
pub struct RequirementsService {
    tools: ToolConfig,
}

impl RequirementsService {
    pub fn new(tools: ToolConfig) -> Self {
        RequirementsService { tools }
    }

    pub fn check(&self) -> RequirementsReport {
        RequirementsReport {
            latex: which::which(&self.tools.latex_engine).is_ok(),
            pdf2docx: which::which(&self.tools.pdf2docx_program).is_ok(),
            word: WordService::new().check_available().is_ok(),
        }
    }

    /// 檢查模式所需的工具；允許安裝時，缺少的 pdf2docx 會先嘗試安裝再重新檢查
    pub fn ensure_for_mode(&self, mode: Mode, install_missing: bool) -> RequirementsReport {
        let mut report = self.check();
        let needs_pdf2docx = mode.chain().contains(&Step::PdfToDocx);
        if needs_pdf2docx && !report.pdf2docx && install_missing {
            println!("  正在安裝 {}...", PDF2DOCX_PACKAGE);
            if self.install_package(PDF2DOCX_PACKAGE) {
                report.pdf2docx = which::which(&self.tools.pdf2docx_program).is_ok();
            }
            if report.pdf2docx {
                println!("  ✓ {} 已安裝", PDF2DOCX_PACKAGE);
            } else {
                println!("  ✗ {} 安裝失敗", PDF2DOCX_PACKAGE);
            }
        }
        report
    }

    fn install_package(&self, package: &str) -> bool {
        info!("執行 {} -m pip install {}", self.tools.python, package);
        match Command::new(&self.tools.python)
            .args(["-m", "pip", "install", package, "-q"])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
        {
            Ok(status) if status.success() => true,
            Ok(status) => {
                warn!("pip 安裝 {} 失敗，狀態：{}", package, status);
                false
            }
            Err(e) => {
                warn!("無法執行 {}：{}", self.tools.python, e);
                false
            }
        }
    }
}
