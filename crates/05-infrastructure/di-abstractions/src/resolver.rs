//! 组件解析器抽象接口
//!
//! 提供依赖解析和组件实例化的能力

use crate::instance::Instance;
use kup_common::{DependencyError, DependencyResult, TypeIdentity};
use std::sync::Arc;

/// 组件解析器 trait
///
/// 在一次解析调用内部传递给 [`crate::Injectable::inject`] 和 `bind_with` /
/// `singleton_with` 注册的闭包，负责递归解析依赖。
pub trait ComponentResolver {
    /// 解析指定类型标识的组件
    fn resolve_instance(&mut self, identity: &TypeIdentity) -> DependencyResult<Instance>;
}

impl dyn ComponentResolver + '_ {
    /// 解析指定类型的组件
    pub fn resolve<I>(&mut self) -> DependencyResult<Arc<I>>
    where
        I: ?Sized + Send + Sync + 'static,
    {
        let identity = TypeIdentity::of::<I>();
        self.resolve_instance(&identity)?.downcast::<I>()
    }
}

/// 解析上下文
#[derive(Debug, Clone)]
pub struct ResolveContext {
    /// 当前解析链，用于检测循环依赖
    resolution_chain: Vec<TypeIdentity>,
    /// 最大递归深度
    max_depth: usize,
}

impl ResolveContext {
    /// 默认最大递归深度
    pub const DEFAULT_MAX_DEPTH: usize = 100;

    /// 创建新的解析上下文
    pub fn new(max_depth: usize) -> Self {
        Self {
            resolution_chain: Vec::new(),
            max_depth,
        }
    }

    /// 添加类型到解析链
    pub fn push_type(&mut self, identity: &TypeIdentity) -> DependencyResult<()> {
        if self.resolution_chain.contains(identity) {
            let chain = self
                .resolution_chain
                .iter()
                .chain(std::iter::once(identity))
                .map(TypeIdentity::simple_name)
                .collect::<Vec<_>>()
                .join(" -> ");

            return Err(DependencyError::CircularDependency {
                dependency_chain: chain,
            });
        }

        if self.resolution_chain.len() >= self.max_depth {
            return Err(DependencyError::MaxDepthExceeded {
                type_name: identity.to_string(),
                max_depth: self.max_depth,
            });
        }

        self.resolution_chain.push(identity.clone());
        Ok(())
    }

    /// 从解析链中移除类型
    pub fn pop_type(&mut self) {
        self.resolution_chain.pop();
    }

    /// 当前解析深度
    pub fn depth(&self) -> usize {
        self.resolution_chain.len()
    }
}

impl Default for ResolveContext {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_DEPTH)
    }
}
