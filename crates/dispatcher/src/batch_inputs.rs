// batch_inputs.rs
// 批量输入视图：按元素任务声明的输入顺序取出每个参数的集合，并在执行前检查等长约束。
use crate::error::{Error, Result};
use crate::types::{LiteralMap, TypedInterface, Value};

/// 一次调用的批量输入，所有集合等长
#[derive(Debug)]
pub(crate) struct BatchInputs<'a> {
    columns: Vec<(&'a str, &'a [Value])>,
    len: usize,
}

impl<'a> BatchInputs<'a> {
    /// 按标量接口的输入顺序收集集合，批大小由第一个声明的输入决定
    pub(crate) fn new(interface: &'a TypedInterface, batch: &'a LiteralMap) -> Result<Self> {
        let mut columns = Vec::with_capacity(interface.inputs.len());
        for var in &interface.inputs {
            let value = batch
                .get(&var.name)
                .ok_or_else(|| Error::ShapeMismatch(format!("缺少批量输入 {}", var.name)))?;
            let items = value.as_collection().ok_or_else(|| {
                Error::ShapeMismatch(format!(
                    "批量输入 {} 必须是集合，实际为 {}",
                    var.name,
                    value.kind_name()
                ))
            })?;
            columns.push((var.name.as_str(), items));
        }

        let len = columns.first().map(|(_, items)| items.len()).unwrap_or(0);
        for (name, items) in &columns {
            if items.len() != len {
                return Err(Error::ShapeMismatch(format!(
                    "批量输入 {} 的长度 {} 与其他输入的长度 {} 不一致",
                    name,
                    items.len(),
                    len
                )));
            }
        }
        Ok(Self { columns, len })
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// 取出第 index 个位置的标量输入
    pub(crate) fn scalar_inputs_at(&self, index: usize) -> Result<LiteralMap> {
        if index >= self.len {
            return Err(Error::IndexOutOfRange {
                index,
                len: self.len,
            });
        }
        Ok(self
            .columns
            .iter()
            .map(|(name, items)| (*name, items[index].clone()))
            .collect())
    }
}

/// 检查元素任务返回的输出个数与接口声明一致
pub(crate) fn check_output_arity(
    interface: &TypedInterface,
    outputs: &[Value],
) -> Result<()> {
    if outputs.len() != interface.outputs.len() {
        return Err(Error::ShapeMismatch(format!(
            "元素任务返回 {} 个输出，接口声明了 {} 个",
            outputs.len(),
            interface.outputs.len()
        )));
    }
    Ok(())
}
