// lib.rs
// 导出数组任务分发器的公共接口。
pub use dispatcher::*;
