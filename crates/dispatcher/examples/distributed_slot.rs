//! distributed_slot.rs
//!
//! 分布式单槽位示例：模拟数组作业中的一个实例。
//! 槽位索引从环境变量读取（可选地通过第一个命令行参数指定 JSON 配置文件）；
//! 如果环境中没有索引变量，则使用模拟的环境变量快照。

use dispatcher::config::{DispatcherConfig, DEFAULT_INDEX_NAME_VAR, DEFAULT_OFFSET_VAR};
use dispatcher::{
    map_task, ArrayJobEnv, ArrayJobParams, ExecutionContext, FnTask, LiteralMap, LiteralType,
    Result, TypedInterface, Value,
};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();

    println!("=== 分布式单槽位执行 ===");

    let config = match std::env::args().nth(1) {
        Some(path) => DispatcherConfig::from_json_file(path)?,
        None => DispatcherConfig::default(),
    };

    let mut env = ArrayJobEnv::from_env(config.clone());
    if env.resolve().is_err() {
        println!("环境中没有数组作业索引，使用模拟环境变量进行测试");
        env = ArrayJobEnv::from_vars(
            config,
            [
                (DEFAULT_OFFSET_VAR, "2"),
                (DEFAULT_INDEX_NAME_VAR, "AWS_BATCH_JOB_ARRAY_INDEX"),
                ("AWS_BATCH_JOB_ARRAY_INDEX", "1"),
            ],
        );
    }
    println!("槽位索引: {}", env.resolve()?);

    let greet = FnTask::new(
        "demos.text",
        "greet",
        TypedInterface::default()
            .with_input("name", LiteralType::String)
            .with_input("times", LiteralType::Integer)
            .with_output("greeting", LiteralType::String),
        |inputs| {
            let name = match inputs.get("name") {
                Some(Value::String(s)) => s.clone(),
                _ => anyhow::bail!("缺少字符串输入 name"),
            };
            let times = inputs.get("times").and_then(Value::as_integer).unwrap_or(1);
            let repeat = usize::try_from(times).unwrap_or(0);
            Ok(vec![Value::String(format!("hello {}", name).repeat(repeat))])
        },
    );
    let params = ArrayJobParams::new(Some(4), Some(0.8))?;
    let task = map_task(Arc::new(greet), params)?;
    println!("批量任务: {}", task.name());
    println!("作业描述: {}", task.custom().to_json()?);

    let batch = LiteralMap::new()
        .with("name", vec!["ada", "grace", "linus", "barbara", "ken"])
        .with("times", vec![1i64, 1, 2, 1, 3]);

    let ctx = ExecutionContext::DistributedSlot(env);
    let output = task.execute(&ctx, &batch)?;
    println!("本槽位输出: {}", serde_json::to_string(&output)?);
    for var in task.output_interface(&ctx) {
        println!("输出 {}: {}", var.name, var.ty);
    }

    Ok(())
}
