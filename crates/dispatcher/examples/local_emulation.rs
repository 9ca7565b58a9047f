//! local_emulation.rs
//!
//! 本地模拟示例：把单元素计算包装为批量任务，在一个进程内跑完整个集合。
//! 1. 单输出任务返回一个集合。
//! 2. 双输出任务按声明顺序返回两个集合。
//! 3. 用表格打印每个位置的输入和输出。

use dispatcher::{
    map_task, ArrayJobParams, DispatchOutput, ExecutionContext, FnTask, LiteralMap, LiteralType,
    Result, TypedInterface, Value,
};
use prettytable::{cell, row, Table};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn int_input(inputs: &LiteralMap, name: &str) -> anyhow::Result<i64> {
    inputs
        .get(name)
        .and_then(Value::as_integer)
        .ok_or_else(|| anyhow::anyhow!("缺少整数输入 {}", name))
}

fn main() -> Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();

    println!("=== 本地模拟批量任务 ===");

    // ---- 1. 单输出：翻倍 ----
    let double = FnTask::new(
        "demos.math",
        "double",
        TypedInterface::default()
            .with_input("a", LiteralType::Integer)
            .with_output("o0", LiteralType::Integer),
        |inputs| Ok(vec![Value::Integer(int_input(inputs, "a")? * 2)]),
    );
    let double_task = map_task(Arc::new(double), ArrayJobParams::new(Some(2), None)?)?;
    println!("批量任务: {} ({})", double_task.name(), double_task.task_type());

    let batch = LiteralMap::new().with("a", vec![1i64, 2, 3]);
    let result = double_task.execute(&ExecutionContext::LocalTask, &batch)?;
    println!("翻倍结果: {:?}", result);

    // ---- 2. 双输出：平方和奇偶 ----
    let square_parity = FnTask::new(
        "demos.math",
        "square_parity",
        TypedInterface::default()
            .with_input("a", LiteralType::Integer)
            .with_output("square", LiteralType::Integer)
            .with_output("even", LiteralType::Boolean),
        |inputs| {
            let a = int_input(inputs, "a")?;
            Ok(vec![Value::Integer(a * a), Value::Boolean(a % 2 == 0)])
        },
    );
    let square_task = map_task(Arc::new(square_parity), ArrayJobParams::default())?;

    let values: Vec<i64> = (1..=5).collect();
    let batch = LiteralMap::new().with("a", values.clone());
    let result = square_task.execute(&ExecutionContext::LocalWorkflow, &batch)?;

    // ---- 3. 打印结果 ----
    let columns = match result {
        DispatchOutput::Collections(columns) => columns,
        other => {
            println!("意外的输出形状: {:?}", other);
            return Ok(());
        }
    };
    let mut table = Table::new();
    table.add_row(row!["位置", "输入 a", "square", "even"]);
    for (i, a) in values.iter().enumerate() {
        table.add_row(row![i, a, format!("{:?}", columns[0][i]), format!("{:?}", columns[1][i])]);
    }
    table.printstd();

    for var in square_task.output_interface(&ExecutionContext::LocalWorkflow) {
        println!("输出 {}: {}", var.name, var.ty);
    }

    Ok(())
}
