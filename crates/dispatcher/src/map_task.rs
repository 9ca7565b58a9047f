// map_task.rs
// 数组分发任务：把单元素计算包装为批量任务，按运行时上下文选择单槽位执行或本地批量模拟。
use crate::batch_emulator::LocalBatchEmulator;
use crate::context::{ExecutionContext, Topology};
use crate::error::{Error, Result};
use crate::interface::{mapper_name, to_collection_interface};
use crate::params::{ArrayJobDescriptor, ArrayJobParams};
use crate::slot_executor::SingleSlotExecutor;
use crate::task::{ElementKind, ElementTask};
use crate::types::{DispatchOutput, LiteralMap, LiteralType, TypedInterface, Variable};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use tracing::info_span;

/// 提交给编排器的任务类型
pub const ARRAY_TASK_TYPE: &str = "container_array";
/// 任务类型版本
pub const ARRAY_TASK_TYPE_VERSION: u32 = 1;

/// 批量任务，构造后不再修改
pub struct ArrayDispatchTask {
    name: String,
    element: Arc<dyn ElementTask>,
    interface: TypedInterface,
    params: ArrayJobParams,
}

/// 将元素任务包装为批量任务
///
/// 只接受普通函数任务，且接口至少声明一个输入、参数名不重复。
pub fn map_task(element: Arc<dyn ElementTask>, params: ArrayJobParams) -> Result<ArrayDispatchTask> {
    ArrayDispatchTask::new(element, params)
}

impl ArrayDispatchTask {
    pub fn new(element: Arc<dyn ElementTask>, params: ArrayJobParams) -> Result<Self> {
        validate_element(element.as_ref())?;
        let interface = to_collection_interface(element.interface());
        let name = mapper_name(element.namespace(), element.name());
        Ok(Self {
            name,
            element,
            interface,
            params,
        })
    }

    /// `<namespace>.mapper_<name>`
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 批量形状的集合接口
    pub fn interface(&self) -> &TypedInterface {
        &self.interface
    }

    /// 被包装的元素任务
    pub fn run_task(&self) -> &Arc<dyn ElementTask> {
        &self.element
    }

    pub fn params(&self) -> &ArrayJobParams {
        &self.params
    }

    pub fn task_type(&self) -> &'static str {
        ARRAY_TASK_TYPE
    }

    pub fn task_type_version(&self) -> u32 {
        ARRAY_TASK_TYPE_VERSION
    }

    /// 交给作业描述序列化器的自定义字段
    pub fn custom(&self) -> ArrayJobDescriptor {
        self.params.to_job_descriptor()
    }

    /// 执行批量任务
    ///
    /// 分布式模式返回本槽位的标量输出，本地模式返回完整的输出集合。
    pub fn execute(&self, ctx: &ExecutionContext, batch: &LiteralMap) -> Result<DispatchOutput> {
        let topology = ctx.topology();
        let span = info_span!("array_task", task = %self.name, topology = %topology);
        let _guard = span.enter();

        match ctx {
            ExecutionContext::DistributedSlot(env) => {
                let outputs = SingleSlotExecutor::new(self.element.as_ref()).execute_slot(env, batch)?;
                Ok(DispatchOutput::Slot(outputs))
            }
            ExecutionContext::LocalTask | ExecutionContext::LocalWorkflow => {
                debug_assert_eq!(topology, Topology::LocalEmulation);
                LocalBatchEmulator::new(self.element.as_ref()).execute_all(batch)
            }
        }
    }

    /// 调用者应观察到的输出接口
    ///
    /// 本地工作流模拟中使用批量任务自己的集合接口，其余情况使用元素任务的标量接口，
    /// 因为分布式模式下由外部插件把各槽位的标量输出汇总成集合。
    pub fn output_interface(&self, ctx: &ExecutionContext) -> &[Variable] {
        if ctx.is_local_workflow() {
            &self.interface.outputs
        } else {
            &self.element.interface().outputs
        }
    }

    /// 按名字查询输出类型，规则同 [`ArrayDispatchTask::output_interface`]
    pub fn output_type_of(&self, ctx: &ExecutionContext, name: &str) -> Option<&LiteralType> {
        self.output_interface(ctx)
            .iter()
            .find(|v| v.name == name)
            .map(|v| &v.ty)
    }
}

impl fmt::Debug for ArrayDispatchTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayDispatchTask")
            .field("name", &self.name)
            .field("interface", &self.interface)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

fn validate_element(element: &dyn ElementTask) -> Result<()> {
    if element.kind() != ElementKind::Function {
        return Err(Error::UnsupportedElementKind(format!(
            "{}.{} 的类型为 {:?}，目前只支持普通函数任务",
            element.namespace(),
            element.name(),
            element.kind()
        )));
    }

    let interface = element.interface();
    if interface.inputs.is_empty() {
        return Err(Error::UnsupportedElementKind(format!(
            "{}.{} 没有声明输入，无法按集合展开",
            element.namespace(),
            element.name()
        )));
    }

    let mut seen = HashSet::new();
    for name in interface.input_names().chain(interface.output_names()) {
        if !seen.insert(name) {
            return Err(Error::UnsupportedElementKind(format!(
                "{}.{} 的接口中参数名 {} 重复",
                element.namespace(),
                element.name(),
                name
            )));
        }
    }
    Ok(())
}
