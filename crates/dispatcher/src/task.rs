// task.rs
// 元素任务约定：单元素计算需要暴露的标量接口和执行方法，以及基于闭包的实现。
use crate::types::{LiteralMap, TypedInterface, Value};
use std::fmt;

/// 元素任务的种类，只有普通函数任务可以被批量包装
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    /// 普通的单元素函数计算
    Function,
    /// 已经是批量任务（不支持嵌套包装）
    ArrayTask,
    /// 外部容器任务，没有可在进程内调用的执行方法
    Container,
}

/// 被批量包装的单元素计算
pub trait ElementTask: Send + Sync {
    /// 声明该计算的命名空间（例如模块路径）
    fn namespace(&self) -> &str;

    /// 计算本身的名字
    fn name(&self) -> &str;

    fn kind(&self) -> ElementKind {
        ElementKind::Function
    }

    /// 标量输入/输出接口
    fn interface(&self) -> &TypedInterface;

    /// 执行一次计算，输出按接口声明的顺序排列
    fn execute(&self, inputs: &LiteralMap) -> anyhow::Result<Vec<Value>>;
}

type ElementFn = dyn Fn(&LiteralMap) -> anyhow::Result<Vec<Value>> + Send + Sync;

/// 基于闭包的元素任务
pub struct FnTask {
    namespace: String,
    name: String,
    interface: TypedInterface,
    func: Box<ElementFn>,
}

impl FnTask {
    pub fn new<F>(
        namespace: impl Into<String>,
        name: impl Into<String>,
        interface: TypedInterface,
        func: F,
    ) -> Self
    where
        F: Fn(&LiteralMap) -> anyhow::Result<Vec<Value>> + Send + Sync + 'static,
    {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            interface,
            func: Box::new(func),
        }
    }
}

impl fmt::Debug for FnTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnTask")
            .field("namespace", &self.namespace)
            .field("name", &self.name)
            .field("interface", &self.interface)
            .finish_non_exhaustive()
    }
}

impl ElementTask for FnTask {
    fn namespace(&self) -> &str {
        &self.namespace
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn interface(&self) -> &TypedInterface {
        &self.interface
    }

    fn execute(&self, inputs: &LiteralMap) -> anyhow::Result<Vec<Value>> {
        (self.func)(inputs)
    }
}
