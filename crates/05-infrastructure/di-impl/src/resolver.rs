//! 依赖解析器

use crate::container::KupContainer;
use kup_di_abstractions::{
    ComponentResolver, DependencyResult, Instance, Lifetime, ResolveContext, TypeIdentity,
};
use tracing::debug;

/// 一次顶层解析调用的解析器
///
/// 持有当前解析链和已解析实例的队列。顶层解析成功后，
/// 按解析完成的顺序（依赖在前）通知监听器；失败时不通知任何监听器。
pub struct Resolver<'c> {
    container: &'c KupContainer,
    context: ResolveContext,
    resolved: Vec<(TypeIdentity, Instance)>,
}

impl<'c> Resolver<'c> {
    /// 创建解析器
    pub fn new(container: &'c KupContainer) -> Self {
        Self {
            container,
            context: ResolveContext::new(container.max_resolution_depth()),
            resolved: Vec::new(),
        }
    }

    /// 解析顶层请求并通知监听器
    pub fn resolve_root(mut self, identity: &TypeIdentity) -> DependencyResult<Instance> {
        let instance = self.resolve_instance(identity)?;

        for (identity, instance) in &self.resolved {
            let fired = self.container.listeners().notify(identity, instance);
            if fired > 0 {
                debug!("通知 {} 个监听器: {}", fired, identity);
            }
        }

        Ok(instance)
    }

    fn build(&mut self, identity: &TypeIdentity) -> DependencyResult<Instance> {
        let container = self.container;
        let binding = container.binding_for(identity)?;

        match binding.lifetime() {
            Lifetime::Singleton => {
                let (instance, created) = container
                    .singletons()
                    .get_or_try_init(identity, || binding.produce(self))?;

                if created {
                    debug!("创建单例: {}", identity);
                }
                Ok(instance)
            }
            Lifetime::Transient => {
                debug!("创建瞬时实例: {}", identity);
                binding.produce(self)
            }
        }
    }
}

impl ComponentResolver for Resolver<'_> {
    fn resolve_instance(&mut self, identity: &TypeIdentity) -> DependencyResult<Instance> {
        self.context.push_type(identity)?;
        let result = self.build(identity);
        self.context.pop_type();

        let instance = result?;
        self.resolved.push((identity.clone(), instance.clone()));
        Ok(instance)
    }
}
