// params.rs
// 分发参数：并发度和最小成功比例，只做范围校验，转交给外部编排器。
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// 数组任务的声明式参数，本地不做任何限制
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawArrayJobParams")]
pub struct ArrayJobParams {
    concurrency: Option<u32>,
    min_success_ratio: Option<f64>,
}

/// 反序列化的中间形式，经过 [`ArrayJobParams::new`] 校验
#[derive(Deserialize)]
struct RawArrayJobParams {
    #[serde(default)]
    concurrency: Option<u32>,
    #[serde(default)]
    min_success_ratio: Option<f64>,
}

impl TryFrom<RawArrayJobParams> for ArrayJobParams {
    type Error = Error;

    fn try_from(raw: RawArrayJobParams) -> Result<Self> {
        ArrayJobParams::new(raw.concurrency, raw.min_success_ratio)
    }
}

impl ArrayJobParams {
    /// 创建参数，最小成功比例必须在 (0, 1] 内
    pub fn new(concurrency: Option<u32>, min_success_ratio: Option<f64>) -> Result<Self> {
        if let Some(ratio) = min_success_ratio {
            if !ratio.is_finite() || ratio <= 0.0 || ratio > 1.0 {
                return Err(Error::InvalidParameter(format!(
                    "最小成功比例 {} 不在 (0, 1] 范围内",
                    ratio
                )));
            }
        }
        Ok(Self {
            concurrency,
            min_success_ratio,
        })
    }

    pub fn concurrency(&self) -> Option<u32> {
        self.concurrency
    }

    pub fn min_success_ratio(&self) -> Option<f64> {
        self.min_success_ratio
    }

    pub fn to_job_descriptor(&self) -> ArrayJobDescriptor {
        ArrayJobDescriptor {
            parallelism: self.concurrency.map(u64::from),
            min_success_ratio: self.min_success_ratio,
        }
    }
}

/// 交给外部作业描述序列化器的数组作业描述
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrayJobDescriptor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parallelism: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_success_ratio: Option<f64>,
}

impl ArrayJobDescriptor {
    pub fn to_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}
