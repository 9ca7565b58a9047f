// context.rs
// 执行模式选择：由调用者显式传入运行时上下文，决定走单槽位执行还是本地批量模拟。
use crate::index_resolver::ArrayJobEnv;
use std::fmt;

/// 调用者提供的运行时上下文
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionContext {
    /// 当前进程是分布式数组作业中的一个实例，只负责一个槽位
    DistributedSlot(ArrayJobEnv),
    /// 本地直接调用任务
    LocalTask,
    /// 本地模拟整个工作流
    LocalWorkflow,
}

/// 实际执行拓扑
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
    DistributedSlot,
    LocalEmulation,
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Topology::DistributedSlot => write!(f, "distributed_slot"),
            Topology::LocalEmulation => write!(f, "local_emulation"),
        }
    }
}

impl ExecutionContext {
    pub fn topology(&self) -> Topology {
        match self {
            ExecutionContext::DistributedSlot(_) => Topology::DistributedSlot,
            ExecutionContext::LocalTask | ExecutionContext::LocalWorkflow => Topology::LocalEmulation,
        }
    }

    /// 是否处于本地工作流模拟中，决定调用者看到的输出接口形状
    pub fn is_local_workflow(&self) -> bool {
        matches!(self, ExecutionContext::LocalWorkflow)
    }
}
