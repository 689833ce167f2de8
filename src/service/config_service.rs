use std::io;
use crate::config::config::validate_exclude_patterns;
use crate::config::ports::{AppConfig, ConfigPort};

// 配置服務，負責從選定的配置適配器取得並檢查配置
pub struct ConfigService {
    config_port: Box<dyn ConfigPort>,
}

impl ConfigService {
    pub fn new(config_port: Box<dyn ConfigPort>) -> Self {
        ConfigService { config_port }
    }

    pub fn get_config(&self) -> io::Result<AppConfig> {
        let config = self.config_port.get_config()?;
        if config.input.trim().is_empty() {
            return Err(io::Error::new(io::ErrorKind::InvalidInput, "未指定輸入路徑"));
        }
        validate_exclude_patterns(&config.exclude)?;
        log::debug!("使用配置：{:?}", config);
        Ok(config)
    }
}
