use std::path::PathBuf;
use log::{error, info, warn};
use crate::config::config::Step;
use crate::config::ports::ToolConfig;
use crate::error::ConversionError;
use crate::facade::traits::i_conversion::ConversionFacadeTrait;
use crate::models::conversion::{ConversionRequest, ConversionResult};
use crate::service::latex::LatexService;
use crate::service::path::{prepare_output_dir, resolve_input};
use crate::service::pdf::PdfService;
use crate::service::traits::i_service::ConverterTrait;
use crate::service::word::WordService;

/// 中間檔暫存目錄的前綴，批次模式的預設排除規則會略過它
pub const STAGING_PREFIX: &str = "_temp_";

pub struct ConversionFacade {
    latex: Box<dyn ConverterTrait>,
    pdf: Box<dyn ConverterTrait>,
    word: Box<dyn ConverterTrait>,
}

impl ConversionFacade {
    pub fn new(
        latex: Box<dyn ConverterTrait>,
        pdf: Box<dyn ConverterTrait>,
        word: Box<dyn ConverterTrait>,
    ) -> Self {
        ConversionFacade { latex, pdf, word }
    }

    pub fn from_tools(tools: &ToolConfig) -> Self {
        Self::new(
            Box::new(LatexService::new(tools.latex_engine.clone(), tools.latex_passes)),
            Box::new(PdfService::new(tools.pdf2docx_program.clone())),
            Box::new(WordService::new()),
        )
    }

    fn converter(&self, step: Step) -> &dyn ConverterTrait {
        match step {
            Step::Latex => self.latex.as_ref(),
            Step::PdfToDocx => self.pdf.as_ref(),
            Step::Word => self.word.as_ref(),
        }
    }

    fn run_chain(&self, request: &ConversionRequest) -> Result<PathBuf, ConversionError> {
        // 驗證輸入與檢查工具都在建立輸出目錄之前完成，失敗時不留下任何副作用
        let input = resolve_input(&request.input_path, request.mode)?;
        let steps = request.mode.chain();
        for step in steps {
            self.converter(*step).check_available()?;
        }
        let output_dir = prepare_output_dir(&request.output_dir)?;

        // 暫存目錄在離開作用域時自動刪除，包含中途失敗的情況
        let mut staging = None;
        let mut current = input;
        for (index, step) in steps.iter().enumerate() {
            let is_last = index + 1 == steps.len();
            let target_dir = if is_last || request.keep_intermediate {
                output_dir.clone()
            } else {
                let dir = tempfile::Builder::new()
                    .prefix(STAGING_PREFIX)
                    .tempdir_in(&output_dir)
                    .map_err(|e| ConversionError::filesystem(&output_dir, "建立暫存目錄", e))?;
                let path = dir.path().to_path_buf();
                staging = Some(dir);
                path
            };

            let converter = self.converter(*step);
            info!("步驟 {}/{}：{} 處理 {}", index + 1, steps.len(), converter.name(), current.display());
            current = converter.convert(&current, &target_dir)?;
        }

        if let Some(dir) = staging {
            let path = dir.path().to_path_buf();
            if let Err(e) = dir.close() {
                warn!("無法刪除暫存目錄 {}：{}", path.display(), e);
            }
        }
        Ok(current)
    }
}

impl ConversionFacadeTrait for ConversionFacade {
    fn execute_conversion(&self, request: &ConversionRequest) -> ConversionResult {
        info!(
            "開始轉換，模式：{}，輸入：{}，輸出目錄：{}",
            request.mode,
            request.input_path.display(),
            request.output_dir.display()
        );
        match self.run_chain(request) {
            Ok(output_path) => {
                info!("轉換完成：{}", output_path.display());
                ConversionResult::succeeded(request.input_path.clone(), output_path)
            }
            Err(e) => {
                error!("轉換 {} 失敗：{}", request.input_path.display(), e);
                ConversionResult::failed(request.input_path.clone(), &e)
            }
        }
    }
}
