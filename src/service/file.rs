use std::io;
use std::path::Path;
use log::{debug, warn};
use walkdir::WalkDir;
use crate::models::file::{FileCollectInput, FileCollectOutput};
use crate::service::path::has_extension;
use crate::service::traits::i_service::FileServiceTrait;
use crate::utils::utils::create_regex_set;

/// 檔案服務，負責在輸入目錄中收集來源檔案
pub struct FileService;

impl FileService {
    pub fn new() -> Self {
        FileService
    }
}

impl Default for FileService {
    fn default() -> Self {
        Self::new()
    }
}

fn is_skipped(path: &Path, skip_dir: Option<&Path>) -> bool {
    let Some(skip) = skip_dir else {
        return false;
    };
    if path == skip {
        return true;
    }
    match (path.canonicalize(), skip.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

impl FileServiceTrait for FileService {
    fn collect_files(&self, input: FileCollectInput) -> io::Result<FileCollectOutput> {
        if !input.input_path.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("輸入目錄 '{}' 不存在", input.input_path.display()),
            ));
        }
        let exclude_set = create_regex_set(&input.exclude_patterns);
        let max_depth = if input.recursive { usize::MAX } else { 1 };
        let skip_dir = input.skip_dir.as_deref();

        let mut files = Vec::new();
        let walker = WalkDir::new(&input.input_path)
            .max_depth(max_depth)
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !(entry.file_type().is_dir() && is_skipped(entry.path(), skip_dir)));
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("無法讀取目錄項目，跳過：{}", e);
                    continue;
                }
            };
            if !entry.file_type().is_file() || !has_extension(entry.path(), &input.extension) {
                continue;
            }
            let stem = entry.path().file_stem().map(|s| s.to_string_lossy().to_string()).unwrap_or_default();
            if exclude_set.is_match(&stem) {
                debug!("符合排除模式，跳過：{}", entry.path().display());
                continue;
            }
            files.push(entry.into_path());
        }
        files.sort();
        Ok(FileCollectOutput { files })
    }
}
