//! 控制台交互与采集流程

pub mod input;   // 交互式输入
pub mod summary; // 采集流程

pub use input::collect_input;
pub use summary::run_summary;
