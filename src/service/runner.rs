use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use log::{info, warn};
use crate::config::ports::{AppConfig, ConversionPort};
use crate::error::ConversionError;
use crate::facade::conversion_facade::ConversionFacade;
use crate::facade::traits::i_conversion::ConversionFacadeTrait;
use crate::models::conversion::{BatchSummary, ConversionRequest, ConversionResult};
use crate::models::file::FileCollectInput;
use crate::service::file::FileService;
use crate::service::traits::i_service::FileServiceTrait;
use crate::utils::utils::create_progress_bar;

/// 轉換執行器：單一檔案直接派送，目錄則逐檔派送並彙總結果
pub struct ConversionRunner {
    facade: Box<dyn ConversionFacadeTrait>,
    file_service: Box<dyn FileServiceTrait>,
}

impl ConversionRunner {
    pub fn new(facade: Box<dyn ConversionFacadeTrait>, file_service: Box<dyn FileServiceTrait>) -> Self {
        ConversionRunner { facade, file_service }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            Box::new(ConversionFacade::from_tools(&config.tools)),
            Box::new(FileService::new()),
        )
    }

    fn collect_sources(&self, config: &AppConfig, input_path: &Path) -> io::Result<Vec<PathBuf>> {
        if !input_path.is_dir() {
            // 單一檔案（或不存在的路徑）交由 facade 驗證
            return Ok(vec![input_path.to_path_buf()]);
        }
        let output = self.file_service.collect_files(FileCollectInput {
            input_path: input_path.to_path_buf(),
            extension: config.mode.source_ext().to_string(),
            exclude_patterns: config.exclude.clone(),
            recursive: config.recursive,
            skip_dir: Some(PathBuf::from(&config.output)),
        })?;
        Ok(output.files)
    }
}

/// 所有來源共用同一個輸出目錄，檔名主體（不分大小寫）相同者只有第一個能寫出
/// 返回後到者與先佔用該名稱的來源
fn find_stem_collisions(sources: &[PathBuf]) -> HashMap<PathBuf, PathBuf> {
    let mut claimed: HashMap<String, &PathBuf> = HashMap::new();
    let mut collisions = HashMap::new();
    for source in sources {
        let Some(stem) = source.file_stem() else { continue };
        let key = stem.to_string_lossy().to_lowercase();
        match claimed.get(&key) {
            Some(first) => {
                collisions.insert(source.clone(), (*first).clone());
            }
            None => {
                claimed.insert(key, source);
            }
        }
    }
    collisions
}

impl ConversionPort for ConversionRunner {
    fn execute(&self, config: AppConfig) -> io::Result<BatchSummary> {
        let input_path = PathBuf::from(&config.input);
        let output_dir = PathBuf::from(&config.output);
        let sources = self.collect_sources(&config, &input_path)?;
        let mut summary = BatchSummary::new(output_dir.clone());

        if sources.is_empty() {
            warn!("在 {} 中找不到 .{} 檔案", input_path.display(), config.mode.source_ext());
            println!("✗ 在 {} 中找不到 .{} 檔案", input_path.display(), config.mode.source_ext());
            return Ok(summary);
        }

        let total = sources.len();
        info!(
            "轉換 {} 個 .{} 檔案為 .{}，輸出目錄：{}",
            total,
            config.mode.source_ext(),
            config.mode.target_ext(),
            output_dir.display()
        );

        let collisions = find_stem_collisions(&sources);
        let pm = create_progress_bar(total as u64, config.no_progress);
        for (index, source) in sources.iter().enumerate() {
            pm.start_file(index, total, source);
            let result = match collisions.get(source) {
                Some(first) => {
                    let err = ConversionError::InvalidInput(format!(
                        "輸出檔名與 '{}' 相同，略過 '{}'",
                        first.display(),
                        source.display()
                    ));
                    warn!("{}", err);
                    ConversionResult::failed(source.clone(), &err)
                }
                None => {
                    let request = ConversionRequest::new(config.mode, source, &output_dir)
                        .keep_intermediate(config.keep_intermediate);
                    self.facade.execute_conversion(&request)
                }
            };

            match (&result.output_path, &result.error_message) {
                (Some(output_path), _) => pm.println(format!("✓ {} → {}", source.display(), output_path.display())),
                (None, Some(message)) => pm.println(format!("✗ {}：{}", source.display(), message)),
                (None, None) => pm.println(format!("✗ {}", source.display())),
            }
            summary.record(result);
            pm.advance();
        }
        pm.finish(summary.succeeded, summary.failed);
        Ok(summary)
    }
}
