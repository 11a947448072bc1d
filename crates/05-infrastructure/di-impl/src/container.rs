//! 依赖注入容器实现

use crate::listeners::ListenerRegistry;
use crate::registry::BindingRegistry;
use crate::resolver::Resolver;
use crate::scanner::ScopeScanner;
use crate::singletons::SingletonCache;
use kup_di_abstractions::{
    Binding, ComponentResolver, ContainerConfig, ContainerStats, DependencyError,
    DependencyResult, DiContainer, Implements, Instance, Lifetime, ResolveContext, TypeCatalog,
    TypeIdentity,
};
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// 访问容器的方式
///
/// 只是调用方的意图标记，生命周期完全由绑定决定。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// `create()`
    Create,
    /// `get()`
    Get,
}

/// `create()` / `get()` 返回的解析视图
#[derive(Debug, Clone, Copy)]
pub struct Resolved<'a> {
    container: &'a KupContainer,
    access: Access,
}

impl<'a> Resolved<'a> {
    /// 访问方式
    pub fn access(&self) -> Access {
        self.access
    }

    /// 按类型解析
    pub fn instance_of<I>(&self) -> DependencyResult<Arc<I>>
    where
        I: ?Sized + Send + Sync + 'static,
    {
        self.container.resolve::<I>()
    }

    /// 按类型解析，通常用于单例绑定
    pub fn singleton_of<I>(&self) -> DependencyResult<Arc<I>>
    where
        I: ?Sized + Send + Sync + 'static,
    {
        self.container.resolve::<I>()
    }

    /// 按名称解析，名称可以是完全限定名或简单名
    pub fn instance_of_name(&self, name: &str) -> DependencyResult<Instance> {
        self.container.resolve_by_name(name)
    }

    /// 按名称解析并还原为 `Arc<I>`
    pub fn instance_of_name_as<I>(&self, name: &str) -> DependencyResult<Arc<I>>
    where
        I: ?Sized + Send + Sync + 'static,
    {
        self.instance_of_name(name)?.downcast::<I>()
    }
}

/// Kup 依赖注入容器
///
/// 绑定、单例、监听器和扫描结果都归容器实例所有，不同容器之间互不影响。
/// 容器是 `Send + Sync` 的，可以放进 `Arc` 在线程间共享。
#[derive(Debug)]
pub struct KupContainer {
    scope: Option<String>,
    max_resolution_depth: usize,
    registry: BindingRegistry,
    singletons: SingletonCache,
    listeners: ListenerRegistry,
    scanner: ScopeScanner,
    resolved_count: AtomicUsize,
    error_count: AtomicUsize,
}

impl KupContainer {
    /// 创建只使用显式绑定的容器
    pub fn new() -> Self {
        Self::build(None, ScopeScanner::new())
    }

    /// 创建在指定命名空间内自动绑定的容器，使用全局组件注册表
    pub fn with_scope(scope: impl Into<String>) -> Self {
        Self::build(Some(scope.into()), ScopeScanner::new())
    }

    /// 创建在指定命名空间内自动绑定的容器，使用给定的组件注册表
    pub fn with_catalog(scope: impl Into<String>, catalog: TypeCatalog) -> Self {
        Self::build(Some(scope.into()), ScopeScanner::with_catalog(catalog))
    }

    /// 从配置创建容器
    pub fn from_config(config: &ContainerConfig) -> Self {
        Self::build(config.scope.clone(), ScopeScanner::new())
            .with_max_resolution_depth(config.max_resolution_depth)
    }

    fn build(scope: Option<String>, scanner: ScopeScanner) -> Self {
        match &scope {
            Some(scope) => info!("创建依赖注入容器，扫描命名空间: {}", scope),
            None => info!("创建依赖注入容器"),
        }

        Self {
            scope,
            max_resolution_depth: ResolveContext::DEFAULT_MAX_DEPTH,
            registry: BindingRegistry::new(),
            singletons: SingletonCache::new(),
            listeners: ListenerRegistry::new(),
            scanner,
            resolved_count: AtomicUsize::new(0),
            error_count: AtomicUsize::new(0),
        }
    }

    /// 设置最大解析深度
    pub fn with_max_resolution_depth(mut self, max_resolution_depth: usize) -> Self {
        self.max_resolution_depth = max_resolution_depth;
        self
    }

    /// 创建实例的入口
    pub fn create(&self) -> Resolved<'_> {
        Resolved {
            container: self,
            access: Access::Create,
        }
    }

    /// 获取实例的入口，与 `create()` 行为相同
    pub fn get(&self) -> Resolved<'_> {
        Resolved {
            container: self,
            access: Access::Get,
        }
    }

    /// 自动绑定的命名空间
    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    /// 最大解析深度
    pub fn max_resolution_depth(&self) -> usize {
        self.max_resolution_depth
    }

    /// 获取统计信息
    pub fn stats(&self) -> ContainerStats {
        ContainerStats {
            registered_bindings: self.registry.len(),
            resolved_components: self.resolved_count.load(Ordering::Relaxed),
            resolution_errors: self.error_count.load(Ordering::Relaxed),
            active_singletons: self.singletons.len(),
            scanned_scopes: self.scanner.scanned_count(),
        }
    }

    /// 将名称解析为类型标识
    ///
    /// 完全限定名精确匹配优先，否则按不含附加约束的路径或简单名匹配；
    /// 多个类型同时匹配时报错。
    pub fn find_type(&self, name: &str) -> DependencyResult<TypeIdentity> {
        let requested = TypeIdentity::from_type_name(name);
        let known = self.known_types();

        if let Some(identity) = known
            .iter()
            .find(|identity| identity.qualified_name() == requested.qualified_name())
        {
            return Ok(identity.clone());
        }

        let mut matches: Vec<TypeIdentity> = known
            .into_iter()
            .filter(|identity| identity.matches_name(requested.qualified_name()))
            .collect();

        match matches.len() {
            0 => Err(DependencyError::type_not_found(name)),
            1 => Ok(matches.remove(0)),
            _ => Err(DependencyError::AmbiguousTypeName {
                name: name.to_string(),
                candidates: matches.iter().map(ToString::to_string).collect(),
            }),
        }
    }

    fn known_types(&self) -> BTreeSet<TypeIdentity> {
        let mut known: BTreeSet<TypeIdentity> = self.registry.identities().into_iter().collect();

        if let Some(scope) = &self.scope {
            known.extend(self.scanner.scan(scope).abstract_types().cloned());
        }
        known
    }

    pub(crate) fn listeners(&self) -> &ListenerRegistry {
        &self.listeners
    }

    pub(crate) fn singletons(&self) -> &SingletonCache {
        &self.singletons
    }

    /// 查找绑定，未绑定时尝试在命名空间内自动绑定
    pub(crate) fn binding_for(&self, identity: &TypeIdentity) -> DependencyResult<Binding> {
        match self.registry.lookup(identity) {
            Some(binding) => Ok(binding),
            None => self.auto_bind(identity),
        }
    }

    fn auto_bind(&self, identity: &TypeIdentity) -> DependencyResult<Binding> {
        let Some(scope) = &self.scope else {
            return Err(DependencyError::NoImplementationFound {
                type_name: identity.to_string(),
            });
        };

        let index = self.scanner.scan(scope);
        match index.candidates(identity) {
            [] => Err(DependencyError::NoImplementationFound {
                type_name: identity.to_string(),
            }),
            [implementation] => {
                info!(
                    "自动绑定: {} -> {}",
                    identity,
                    implementation.concrete_type()
                );
                let binding = Binding::from_implementation(implementation, Lifetime::Transient);
                Ok(self.registry.register_if_absent(binding))
            }
            candidates => Err(DependencyError::MultipleAbstractImplementations {
                simple_name: identity.simple_name().to_string(),
                candidates: candidates
                    .iter()
                    .map(|implementation| implementation.concrete_type().to_string())
                    .collect(),
            }),
        }
    }

    fn register(&self, binding: Binding) {
        let target = binding.target().clone();
        info!("注册绑定: {} ({})", target, binding.lifetime());

        self.registry.register(binding);
        if self.singletons.evict(&target) {
            debug!("移除旧单例: {}", target);
        }
    }

    fn resolve_identity(&self, identity: &TypeIdentity) -> DependencyResult<Instance> {
        match Resolver::new(self).resolve_root(identity) {
            Ok(instance) => {
                self.resolved_count.fetch_add(1, Ordering::Relaxed);
                Ok(instance)
            }
            Err(error) => {
                self.error_count.fetch_add(1, Ordering::Relaxed);
                warn!("解析 {} 失败: {}", identity, error);
                Err(error)
            }
        }
    }
}

impl Default for KupContainer {
    fn default() -> Self {
        Self::new()
    }
}

impl DiContainer for KupContainer {
    fn bind<I, F>(&self, factory: F)
    where
        I: ?Sized + Send + Sync + 'static,
        F: Fn() -> Arc<I> + Send + Sync + 'static,
    {
        self.register(Binding::from_factory::<I, F>(Lifetime::Transient, factory));
    }

    fn bind_with<I, F>(&self, factory: F)
    where
        I: ?Sized + Send + Sync + 'static,
        F: Fn(&mut dyn ComponentResolver) -> DependencyResult<Arc<I>> + Send + Sync + 'static,
    {
        self.register(Binding::from_resolver_factory::<I, F>(
            Lifetime::Transient,
            factory,
        ));
    }

    fn bind_type<I, C>(&self)
    where
        I: ?Sized + Send + Sync + 'static,
        C: Implements<I>,
    {
        self.register(Binding::from_type::<I, C>(Lifetime::Transient));
    }

    fn singleton<I, F>(&self, factory: F)
    where
        I: ?Sized + Send + Sync + 'static,
        F: Fn() -> Arc<I> + Send + Sync + 'static,
    {
        self.register(Binding::from_factory::<I, F>(Lifetime::Singleton, factory));
    }

    fn singleton_with<I, F>(&self, factory: F)
    where
        I: ?Sized + Send + Sync + 'static,
        F: Fn(&mut dyn ComponentResolver) -> DependencyResult<Arc<I>> + Send + Sync + 'static,
    {
        self.register(Binding::from_resolver_factory::<I, F>(
            Lifetime::Singleton,
            factory,
        ));
    }

    fn singleton_type<I, C>(&self)
    where
        I: ?Sized + Send + Sync + 'static,
        C: Implements<I>,
    {
        self.register(Binding::from_type::<I, C>(Lifetime::Singleton));
    }

    fn singleton_instance<I>(&self, instance: Arc<I>)
    where
        I: ?Sized + Send + Sync + 'static,
    {
        self.register(Binding::from_instance::<I>(instance));
    }

    fn listen_for<I, F>(&self, callback: F)
    where
        I: ?Sized + Send + Sync + 'static,
        F: Fn(&Arc<I>) + Send + Sync + 'static,
    {
        let identity = TypeIdentity::of::<I>();
        debug!("添加监听器: {}", identity);

        self.listeners.listen(
            identity,
            Arc::new(move |instance: &Instance| match instance.downcast::<I>() {
                Ok(component) => callback(&component),
                Err(error) => warn!("监听器类型不匹配: {}", error),
            }),
        );
    }

    fn resolve<I>(&self) -> DependencyResult<Arc<I>>
    where
        I: ?Sized + Send + Sync + 'static,
    {
        self.resolve_identity(&TypeIdentity::of::<I>())?
            .downcast::<I>()
    }

    fn resolve_by_name(&self, name: &str) -> DependencyResult<Instance> {
        let identity = self.find_type(name).map_err(|error| {
            self.error_count.fetch_add(1, Ordering::Relaxed);
            warn!("按名称解析 {} 失败: {}", name, error);
            error
        })?;
        self.resolve_identity(&identity)
    }

    fn is_bound<I>(&self) -> bool
    where
        I: ?Sized + 'static,
    {
        self.registry.contains(&TypeIdentity::of::<I>())
    }

    fn registered_types(&self) -> Vec<TypeIdentity> {
        self.registry.identities()
    }
}
