//! # 依赖注入具体实现
//!
//! 提供具体的依赖注入容器、绑定注册表、单例缓存、命名空间扫描器和解析器实现。
//!
//! ```ignore
//! use kup_di::KupContainer;
//! use kup_di_abstractions::DiContainer;
//!
//! let container = KupContainer::with_scope("my_app::services");
//! container.singleton_type::<dyn Repository, SqlRepository>();
//!
//! let repository = container.get().instance_of::<dyn Repository>()?;
//! ```

pub mod container;
pub mod listeners;
pub mod registry;
pub mod resolver;
pub mod scanner;
pub mod singletons;

pub use container::{Access, KupContainer, Resolved};
pub use listeners::{ListenerFn, ListenerRegistry};
pub use registry::BindingRegistry;
pub use resolver::Resolver;
pub use scanner::{ScopeIndex, ScopeScanner};
pub use singletons::SingletonCache;
