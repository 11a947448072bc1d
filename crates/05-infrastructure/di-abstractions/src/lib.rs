//! # Dependency Injection Abstractions
//!
//! 依赖注入抽象层，定义组件注册和依赖解析的核心接口。
//!
//! ## 核心接口
//!
//! - [`DiContainer`] - 容器接口
//! - [`Injectable`] / [`Implements`] - 具体类型的构造与向抽象类型的转换
//! - [`ComponentResolver`] - 构造过程中解析依赖
//! - [`TypeCatalog`] - 代替类路径扫描的组件注册表

pub mod container;
pub mod factory;
pub mod instance;
pub mod registry;
pub mod resolver;
pub mod scanner;

pub use container::*;
pub use factory::*;
pub use instance::*;
pub use registry::*;
pub use resolver::*;
pub use scanner::*;

pub use kup_common::{DependencyError, DependencyResult, Lifetime, TypeIdentity};
