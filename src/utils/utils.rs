use std::io;
use std::path::Path;
use std::time::{Duration, Instant};
use indicatif::{ProgressBar, ProgressStyle};
use regex::RegexSet;

pub fn setup_logging(log_level: &str) -> io::Result<()> {
    let log_level_filter = match log_level {
        "debug" => log::LevelFilter::Debug,
        "info" => log::LevelFilter::Info,
        "warn" => log::LevelFilter::Warn,
        "error" => log::LevelFilter::Error,
        _ => log::LevelFilter::Info,
    };
    env_logger::Builder::new()
        .filter_level(log_level_filter)
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("日誌初始化失敗: {}", e)))
}

pub struct ProgressManager {
    pb: ProgressBar,
    no_progress: bool,
    start: Instant,
}

impl ProgressManager {
    pub fn new(total: u64, no_progress: bool) -> Self {
        let pb = if no_progress {
            ProgressBar::hidden()
        } else if total <= 1 {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner} {msg} [{elapsed}]")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            pb
        } else {
            let pb = ProgressBar::new(total);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{msg} [{bar:40}] {pos}/{len} ETA: {eta_precise}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("##-"),
            );
            pb
        };
        // 外部工具執行期間畫面仍持續更新
        pb.enable_steady_tick(Duration::from_millis(120));
        ProgressManager {
            pb,
            no_progress,
            start: Instant::now(),
        }
    }

    pub fn start_file(&self, index: usize, total: usize, path: &Path) {
        let name = path.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_default();
        self.pb.set_message(format!("轉換檔案 {}/{}：{}", index + 1, total, name));
    }

    pub fn advance(&self) {
        self.pb.inc(1);
    }

    /// 輸出一行訊息而不破壞進度列
    pub fn println(&self, message: impl AsRef<str>) {
        if self.no_progress {
            println!("{}", message.as_ref());
        } else {
            self.pb.println(message.as_ref());
        }
    }

    pub fn finish(&self, succeeded: usize, failed: usize) {
        if self.no_progress {
            return;
        }
        self.pb.finish_with_message(format!(
            "完成，{} 個成功，{} 個失敗，耗時 {}",
            succeeded,
            failed,
            format_duration(self.start.elapsed())
        ));
    }
}

pub fn create_progress_bar(total: u64, no_progress: bool) -> ProgressManager {
    ProgressManager::new(total, no_progress)
}

pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs_f64();
    if secs < 60.0 {
        format!("{:.1} 秒", secs)
    } else {
        format!("{} 分 {} 秒", duration.as_secs() / 60, duration.as_secs() % 60)
    }
}

/// 將排除模式轉為 RegexSet：一般字元按字面比對，`*` 代表任意字串，比對位置不限
pub fn create_regex_set(patterns: &[String]) -> RegexSet {
    let regex_patterns: Vec<_> = patterns
        .iter()
        .map(|p| regex::escape(p).replace("\\*", ".*"))
        .collect();

    RegexSet::new(&regex_patterns).unwrap_or_else(|e| {
        log::warn!("無效的排除模式: {}，使用空集作為回退", e);
        RegexSet::empty()
    })
}

pub fn print_header() {
    println!();
    println!("╔{}╗", "═".repeat(58));
    println!("║{:^58}║", "Dochameleon - 文件格式轉換工具");
    println!("║{:^58}║", "LaTeX ↔ PDF ↔ DOCX");
    println!("╚{}╝", "═".repeat(58));
    println!();
}
