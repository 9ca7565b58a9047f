// lib.rs
// 数组任务分发器入口，声明并导出各子模块。
pub mod batch_emulator;
mod batch_inputs;
pub mod config;
pub mod context;
pub mod error;
pub mod index_resolver;
pub mod interface;
pub mod map_task;
pub mod params;
pub mod slot_executor;
pub mod task;
pub mod types;

pub use context::{ExecutionContext, Topology};
pub use error::{Error, Result};
pub use index_resolver::ArrayJobEnv;
pub use map_task::{map_task, ArrayDispatchTask};
pub use params::{ArrayJobDescriptor, ArrayJobParams};
pub use task::{ElementKind, ElementTask, FnTask};
pub use types::{DispatchOutput, LiteralMap, LiteralType, TypedInterface, Value, Variable};
