// slot_executor.rs
// 单槽位执行器：分布式模式下只取出本实例槽位上的输入，调用一次元素任务。
use crate::batch_inputs::{check_output_arity, BatchInputs};
use crate::error::{Error, Result};
use crate::index_resolver::ArrayJobEnv;
use crate::task::ElementTask;
use crate::types::{LiteralMap, Value};
use tracing::debug;

/// 分布式模式下的单槽位执行器
///
/// 各槽位的结果由外部的数组作业插件汇总成集合，这里只返回本槽位的标量输出。
pub struct SingleSlotExecutor<'a> {
    element: &'a dyn ElementTask,
}

impl<'a> SingleSlotExecutor<'a> {
    pub fn new(element: &'a dyn ElementTask) -> Self {
        Self { element }
    }

    /// 解析槽位索引，取出各输入集合在该位置的值并执行元素任务
    pub fn execute_slot(&self, env: &ArrayJobEnv, batch: &LiteralMap) -> Result<Vec<Value>> {
        let slot = env.resolve()?;
        let interface = self.element.interface();
        let inputs = BatchInputs::new(interface, batch)?;
        let scalar_inputs = inputs.scalar_inputs_at(slot)?;
        debug!(slot, batch_len = inputs.len(), "executing array job slot");
        let outputs = self
            .element
            .execute(&scalar_inputs)
            .map_err(Error::ElementExecution)?;
        // 没有声明输出时只执行副作用，与本地模拟一致
        if interface.outputs.is_empty() {
            return Ok(Vec::new());
        }
        check_output_arity(interface, &outputs)?;
        Ok(outputs)
    }
}
