// config.rs
// 分发器配置：分布式模式下读取槽位索引所用的环境变量名，支持从 JSON 文件加载。
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// 默认的偏移量环境变量名
pub const DEFAULT_OFFSET_VAR: &str = "BATCH_JOB_ARRAY_INDEX_OFFSET";
/// 默认的“索引变量名”环境变量名
pub const DEFAULT_INDEX_NAME_VAR: &str = "BATCH_JOB_ARRAY_INDEX_VAR_NAME";

/// 分发器配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatcherConfig {
    /// 保存偏移量的环境变量名
    pub offset_var: String,
    /// 保存“原始索引变量名”的环境变量名
    pub index_name_var: String,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            offset_var: DEFAULT_OFFSET_VAR.to_string(),
            index_name_var: DEFAULT_INDEX_NAME_VAR.to_string(),
        }
    }
}

impl DispatcherConfig {
    /// 从 JSON 文件读取配置，缺省字段使用默认值
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::Configuration(format!(
                "配置文件 {} 不存在",
                path.display()
            )));
        }
        let contents = fs::read_to_string(path)?;
        let config: DispatcherConfig = serde_json::from_str(&contents)?;
        if config.offset_var.is_empty() || config.index_name_var.is_empty() {
            return Err(Error::Configuration("环境变量名不能为空".to_string()));
        }
        Ok(config)
    }
}
