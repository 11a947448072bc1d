//! # Kup Common
//!
//! 这个 crate 提供了 Kup 依赖注入容器的公共类型和工具。
//!
//! ## 核心内容
//!
//! - [`TypeIdentity`] - 类型标识，容器中所有映射的键
//! - [`Lifetime`] - 组件生命周期
//! - [`DependencyError`] - 解析错误
//! - [`init_logging`] - 日志初始化

pub mod errors;
pub mod lifecycle;
pub mod logging;
pub mod metadata;

pub use errors::*;
pub use lifecycle::*;
pub use logging::*;
pub use metadata::*;
