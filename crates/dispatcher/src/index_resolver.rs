// index_resolver.rs
// 索引解析器：根据环境变量快照计算当前分布式实例负责的绝对槽位索引。
use crate::config::DispatcherConfig;
use crate::error::{Error, Result};
use std::collections::HashMap;
use tracing::debug;

/// 分布式模式下的环境变量快照
///
/// 在进程边界通过 [`ArrayJobEnv::from_env`] 构造一次，测试中用
/// [`ArrayJobEnv::from_vars`] 注入。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArrayJobEnv {
    config: DispatcherConfig,
    vars: HashMap<String, String>,
}

impl ArrayJobEnv {
    /// 读取当前进程的环境变量
    pub fn from_env(config: DispatcherConfig) -> Self {
        Self {
            config,
            vars: std::env::vars().collect(),
        }
    }

    /// 从任意键值对构造快照
    pub fn from_vars<I, K, V>(config: DispatcherConfig, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            config,
            vars: vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }

    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    /// 计算绝对槽位索引：偏移量 + 原始索引
    pub fn resolve(&self) -> Result<usize> {
        let offset = self.offset()?;

        let index_var = self.vars.get(&self.config.index_name_var).ok_or_else(|| {
            Error::Configuration(format!("未设置环境变量 {}", self.config.index_name_var))
        })?;
        let raw = self
            .vars
            .get(index_var)
            .ok_or_else(|| Error::Configuration(format!("未设置索引环境变量 {}", index_var)))?;
        let raw_index = parse_index(index_var, raw)?;

        let index = i64::try_from(raw_index)
            .ok()
            .and_then(|raw| offset.checked_add(raw))
            .ok_or_else(|| {
                Error::Configuration(format!("槽位索引溢出: {} + {}", offset, raw_index))
            })?;
        let index = usize::try_from(index).map_err(|_| {
            Error::Configuration(format!("槽位索引为负数: {} + {}", offset, raw_index))
        })?;
        debug!(offset, raw_index, index, index_var = %index_var, "resolved array job index");
        Ok(index)
    }

    /// 偏移量缺失或为空时为 0，允许为负数，只要相加后的索引非负
    fn offset(&self) -> Result<i64> {
        match self.vars.get(&self.config.offset_var) {
            Some(v) if !v.is_empty() => v.trim().parse::<i64>().map_err(|e| {
                Error::Configuration(format!(
                    "环境变量 {} 的值 {:?} 不是有效的整数: {}",
                    self.config.offset_var, v, e
                ))
            }),
            _ => Ok(0),
        }
    }
}

fn parse_index(var: &str, value: &str) -> Result<usize> {
    value.trim().parse::<usize>().map_err(|e| {
        Error::Configuration(format!("环境变量 {} 的值 {:?} 不是有效的非负整数: {}", var, value, e))
    })
}
