// batch_emulator.rs
// 本地批量模拟器：单进程内顺序遍历整个集合，逐个执行元素任务并组装完整的输出集合。
use crate::batch_inputs::{check_output_arity, BatchInputs};
use crate::error::{Error, Result};
use crate::task::ElementTask;
use crate::types::{DispatchOutput, LiteralMap, Value};
use tracing::{debug, info};

/// 本地模式下的批量执行器
pub struct LocalBatchEmulator<'a> {
    element: &'a dyn ElementTask,
}

impl<'a> LocalBatchEmulator<'a> {
    pub fn new(element: &'a dyn ElementTask) -> Self {
        Self { element }
    }

    /// 顺序执行每个位置，第 i 个输入对应第 i 个输出
    ///
    /// 任一元素失败立即返回该错误，不返回部分结果。
    pub fn execute_all(&self, batch: &LiteralMap) -> Result<DispatchOutput> {
        let interface = self.element.interface();
        let inputs = BatchInputs::new(interface, batch)?;
        let count = inputs.len();
        let outputs_expected = !interface.outputs.is_empty();

        // 每个声明的输出一个累加器，顺序与接口一致
        let mut accumulators: Vec<Vec<Value>> = interface
            .outputs
            .iter()
            .map(|_| Vec::with_capacity(count))
            .collect();

        for i in 0..count {
            let scalar_inputs = inputs.scalar_inputs_at(i)?;
            let outputs = self
                .element
                .execute(&scalar_inputs)
                .map_err(Error::ElementExecution)?;
            if outputs_expected {
                check_output_arity(interface, &outputs)?;
                for (acc, value) in accumulators.iter_mut().zip(outputs) {
                    acc.push(value);
                }
            }
            debug!(position = i, count, "element finished");
        }
        info!(count, outputs = accumulators.len(), "local batch finished");

        Ok(normalize(accumulators))
    }
}

/// 0 个输出返回空，1 个输出直接返回集合，多个输出按声明顺序返回
fn normalize(mut accumulators: Vec<Vec<Value>>) -> DispatchOutput {
    match accumulators.len() {
        0 => DispatchOutput::Empty,
        1 => DispatchOutput::Collection(accumulators.remove(0)),
        _ => DispatchOutput::Collections(accumulators),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::FnTask;
    use crate::types::{LiteralType, TypedInterface};
    use proptest::prelude::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn int_input(inputs: &LiteralMap, name: &str) -> anyhow::Result<i64> {
        inputs
            .get(name)
            .and_then(Value::as_integer)
            .ok_or_else(|| anyhow::anyhow!("缺少整数输入 {}", name))
    }

    fn double_task() -> FnTask {
        let interface = TypedInterface::default()
            .with_input("a", LiteralType::Integer)
            .with_output("o0", LiteralType::Integer);
        FnTask::new("tests", "double", interface, |inputs| {
            Ok(vec![Value::Integer(int_input(inputs, "a")? * 2)])
        })
    }

    #[test]
    fn test_double_returns_bare_collection() {
        let task = double_task();
        let batch = LiteralMap::new().with("a", vec![1i64, 2, 3]);

        let result = LocalBatchEmulator::new(&task).execute_all(&batch).unwrap();
        assert_eq!(result, DispatchOutput::Collection(vec![2i64, 4, 6].into_iter().map(Value::from).collect()));
    }

    #[test]
    fn test_two_outputs_return_pair_of_collections() {
        let interface = TypedInterface::default()
            .with_input("a", LiteralType::Integer)
            .with_output("o0", LiteralType::Integer)
            .with_output("o1", LiteralType::String);
        let task = FnTask::new("tests", "split", interface, |inputs| {
            let a = int_input(inputs, "a")?;
            Ok(vec![Value::Integer(a + 1), Value::String(format!("n{}", a))])
        });
        let batch = LiteralMap::new().with("a", vec![1i64, 2, 3]);

        let result = LocalBatchEmulator::new(&task).execute_all(&batch).unwrap();
        let DispatchOutput::Collections(collections) = result else {
            panic!("expected two collections");
        };
        assert_eq!(collections.len(), 2);
        assert_eq!(collections[0], vec![Value::Integer(2), Value::Integer(3), Value::Integer(4)]);
        assert_eq!(collections[1], vec![Value::from("n1"), Value::from("n2"), Value::from("n3")]);
    }

    #[test]
    fn test_no_outputs_runs_side_effects_only() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let interface = TypedInterface::default().with_input("a", LiteralType::Integer);
        let task = FnTask::new("tests", "touch", interface, move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(Vec::new())
        });
        let batch = LiteralMap::new().with("a", vec![1i64, 2, 3, 4]);

        let result = LocalBatchEmulator::new(&task).execute_all(&batch).unwrap();
        assert!(result.is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn test_empty_collection() {
        let task = double_task();
        let batch = LiteralMap::new().with("a", Vec::<i64>::new());
        let result = LocalBatchEmulator::new(&task).execute_all(&batch).unwrap();
        assert_eq!(result, DispatchOutput::Collection(Vec::new()));
    }

    #[test]
    fn test_first_failure_stops_batch() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let interface = TypedInterface::default()
            .with_input("a", LiteralType::Integer)
            .with_output("o0", LiteralType::Integer);
        let task = FnTask::new("tests", "fail_on_two", interface, move |inputs| {
            counter.fetch_add(1, Ordering::SeqCst);
            let a = int_input(inputs, "a")?;
            if a == 2 {
                anyhow::bail!("元素 {} 执行失败", a);
            }
            Ok(vec![Value::Integer(a)])
        });
        let batch = LiteralMap::new().with("a", vec![1i64, 2, 3]);

        let err = LocalBatchEmulator::new(&task).execute_all(&batch).unwrap_err();
        assert!(matches!(err, Error::ElementExecution(_)));
        assert_eq!(err.to_string(), "元素 2 执行失败");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_mismatched_lengths_fail_before_execution() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let interface = TypedInterface::default()
            .with_input("a", LiteralType::Integer)
            .with_input("b", LiteralType::Integer)
            .with_output("o0", LiteralType::Integer);
        let task = FnTask::new("tests", "add", interface, move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(vec![Value::Integer(0)])
        });
        let batch = LiteralMap::new()
            .with("a", vec![1i64, 2, 3])
            .with("b", vec![1i64, 2]);

        let err = LocalBatchEmulator::new(&task).execute_all(&batch).unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch(_)));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_wrong_output_arity() {
        let interface = TypedInterface::default()
            .with_input("a", LiteralType::Integer)
            .with_output("o0", LiteralType::Integer)
            .with_output("o1", LiteralType::Integer);
        let task = FnTask::new("tests", "short", interface, |_| Ok(vec![Value::Integer(1)]));
        let batch = LiteralMap::new().with("a", vec![1i64]);

        let err = LocalBatchEmulator::new(&task).execute_all(&batch).unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch(_)));
    }

    proptest! {
        #[test]
        fn prop_outputs_mirror_input_order(values in proptest::collection::vec(-1000i64..1000, 0..64)) {
            let interface = TypedInterface::default()
                .with_input("a", LiteralType::Integer)
                .with_output("o0", LiteralType::Integer)
                .with_output("o1", LiteralType::Integer);
            let task = FnTask::new("tests", "pair", interface, |inputs| {
                let a = int_input(inputs, "a")?;
                Ok(vec![Value::Integer(a), Value::Integer(a * 3)])
            });
            let batch = LiteralMap::new().with("a", values.clone());

            let result = LocalBatchEmulator::new(&task).execute_all(&batch).unwrap();
            let DispatchOutput::Collections(collections) = result else {
                panic!("expected collections");
            };
            prop_assert_eq!(collections.len(), 2);
            for acc in &collections {
                prop_assert_eq!(acc.len(), values.len());
            }
            let echoed: Vec<i64> = collections[0].iter().filter_map(Value::as_integer).collect();
            let tripled: Vec<i64> = collections[1].iter().filter_map(Value::as_integer).collect();
            prop_assert_eq!(echoed, values.clone());
            prop_assert_eq!(tripled, values.iter().map(|v| v * 3).collect::<Vec<_>>());
        }
    }
}
