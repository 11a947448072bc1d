//! 组件注册表
//!
//! Rust 没有类路径扫描，这里用启动时构建的注册表代替：每一项记录
//! 一个具体类型直接实现的一个抽象类型，以及对应的构造函数。
//! 注册表可以手写，也可以由 `#[component]` 宏在程序启动时自动提交到全局注册表。

use crate::factory::{construct, ConstructorFn, Implements};
use kup_common::TypeIdentity;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::fmt;
use tracing::debug;

/// 全局组件注册表
static GLOBAL_CATALOG: Lazy<RwLock<TypeCatalog>> = Lazy::new(|| RwLock::new(TypeCatalog::new()));

/// 注册表中的一项实现关系
#[derive(Clone)]
pub struct Implementation {
    abstract_type: TypeIdentity,
    concrete_type: TypeIdentity,
    constructor: ConstructorFn,
}

impl Implementation {
    /// 创建 `C` 实现 `I` 的注册项
    pub fn of<I, C>() -> Self
    where
        I: ?Sized + Send + Sync + 'static,
        C: Implements<I>,
    {
        Self {
            abstract_type: TypeIdentity::of::<I>(),
            concrete_type: TypeIdentity::of::<C>(),
            constructor: construct::<I, C>,
        }
    }

    /// 抽象类型
    pub fn abstract_type(&self) -> &TypeIdentity {
        &self.abstract_type
    }

    /// 具体类型
    pub fn concrete_type(&self) -> &TypeIdentity {
        &self.concrete_type
    }

    /// 构造函数
    pub fn constructor(&self) -> ConstructorFn {
        self.constructor
    }

    fn same_pair(&self, other: &Self) -> bool {
        self.abstract_type == other.abstract_type && self.concrete_type == other.concrete_type
    }
}

impl fmt::Debug for Implementation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Implementation")
            .field("abstract_type", &self.abstract_type)
            .field("concrete_type", &self.concrete_type)
            .finish()
    }
}

/// 组件注册表
#[derive(Debug, Clone, Default)]
pub struct TypeCatalog {
    implementations: Vec<Implementation>,
}

impl TypeCatalog {
    /// 创建空的注册表
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加 `C` 实现 `I` 的注册项
    pub fn with<I, C>(mut self) -> Self
    where
        I: ?Sized + Send + Sync + 'static,
        C: Implements<I>,
    {
        self.register(Implementation::of::<I, C>());
        self
    }

    /// 注册实现关系，相同的抽象/具体类型对只保留第一次注册
    pub fn register(&mut self, implementation: Implementation) {
        if self
            .implementations
            .iter()
            .any(|existing| existing.same_pair(&implementation))
        {
            return;
        }

        debug!(
            "注册实现: {} -> {}",
            implementation.abstract_type, implementation.concrete_type
        );
        self.implementations.push(implementation);
    }

    /// 所有注册项，按注册顺序
    pub fn implementations(&self) -> &[Implementation] {
        &self.implementations
    }

    /// 具体类型位于指定命名空间内的注册项
    pub fn within<'a>(&'a self, namespace: &'a str) -> impl Iterator<Item = &'a Implementation> + 'a {
        self.implementations
            .iter()
            .filter(move |implementation| implementation.concrete_type.is_within(namespace))
    }

    /// 注册项数量
    pub fn len(&self) -> usize {
        self.implementations.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.implementations.is_empty()
    }

    /// 提交到全局注册表
    pub fn submit(implementation: Implementation) {
        GLOBAL_CATALOG.write().register(implementation);
    }

    /// 全局注册表的快照
    pub fn global() -> Self {
        GLOBAL_CATALOG.read().clone()
    }
}
