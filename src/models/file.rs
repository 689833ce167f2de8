use std::path::PathBuf;

#[derive(Clone)]
pub struct FileCollectInput {
    pub input_path: PathBuf,
    pub extension: String,
    pub exclude_patterns: Vec<String>,
    pub recursive: bool,
    /// 搜尋時跳過的目錄（通常是輸出目錄本身）
    pub skip_dir: Option<PathBuf>,
}

#[derive(Debug)]
pub struct FileCollectOutput {
    pub files: Vec<PathBuf>,
}
