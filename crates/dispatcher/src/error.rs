// error.rs
// 定义分发器通用的错误类型（配置、元素任务类型、元素执行、索引越界等）和Result类型。
use thiserror::Error;

/// 分发器通用错误类型
///
/// 所有错误都直接返回给调用者，分发器内部不做任何重试或恢复。
#[derive(Debug, Error)]
pub enum Error {
    /// 环境变量提供的索引数据缺失或无效，或配置文件无法解析
    #[error("配置错误: {0}")]
    Configuration(String),

    /// 传入 `map_task` 的计算不满足标量接口/执行约定，在构造时立即报错
    #[error("不支持的元素任务: {0}")]
    UnsupportedElementKind(String),

    /// 元素任务执行失败，原样透传
    #[error(transparent)]
    ElementExecution(anyhow::Error),

    /// 解析出的槽位索引超出输入集合长度
    #[error("槽位索引 {index} 超出范围 [0, {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// 批量输入/输出形状不一致
    #[error("形状不匹配: {0}")]
    ShapeMismatch(String),

    /// 分发参数超出允许范围
    #[error("无效参数: {0}")]
    InvalidParameter(String),

    /// IO错误
    #[error("IO错误: {0}")]
    Io(#[from] std::io::Error),

    /// JSON 序列化/反序列化错误
    #[error("JSON错误: {0}")]
    Json(#[from] serde_json::Error),
}

/// 通用结果类型
pub type Result<T> = std::result::Result<T, Error>;
