//! 组件绑定信息

use crate::factory::{construct, ComponentFactoryFn, Implements};
use crate::instance::Instance;
use crate::resolver::ComponentResolver;
use crate::scanner::Implementation;
use kup_common::{DependencyResult, Lifetime, TypeIdentity};
use std::fmt;
use std::sync::Arc;

/// 组件绑定
///
/// 抽象类型与其实例创建方式之间的关联。工厂要么是调用方提供的闭包，
/// 要么是由具体类型的 [`crate::Injectable`] 实现合成的构造函数。
#[derive(Clone)]
pub struct Binding {
    /// 绑定的抽象类型
    target: TypeIdentity,
    /// 绑定的具体类型（闭包工厂为 `None`）
    concrete: Option<TypeIdentity>,
    /// 生命周期
    lifetime: Lifetime,
    /// 组件工厂
    factory: ComponentFactoryFn,
}

impl Binding {
    /// 使用调用方提供的闭包创建绑定
    pub fn from_factory<I, F>(lifetime: Lifetime, factory: F) -> Self
    where
        I: ?Sized + Send + Sync + 'static,
        F: Fn() -> Arc<I> + Send + Sync + 'static,
    {
        Self {
            target: TypeIdentity::of::<I>(),
            concrete: None,
            lifetime,
            factory: Arc::new(
                move |_: &mut dyn ComponentResolver| -> DependencyResult<Instance> {
                    Ok(Instance::new::<I>(factory()))
                },
            ),
        }
    }

    /// 使用接收解析器的闭包创建绑定
    ///
    /// 闭包通过传入的解析器获取依赖，这些依赖与当前请求共享解析链，
    /// 因此闭包之间的循环依赖同样会被检测到。
    pub fn from_resolver_factory<I, F>(lifetime: Lifetime, factory: F) -> Self
    where
        I: ?Sized + Send + Sync + 'static,
        F: Fn(&mut dyn ComponentResolver) -> DependencyResult<Arc<I>> + Send + Sync + 'static,
    {
        Self {
            target: TypeIdentity::of::<I>(),
            concrete: None,
            lifetime,
            factory: Arc::new(
                move |resolver: &mut dyn ComponentResolver| -> DependencyResult<Instance> {
                    factory(resolver).map(Instance::new::<I>)
                },
            ),
        }
    }

    /// 使用具体类型创建绑定，依赖由容器递归解析
    pub fn from_type<I, C>(lifetime: Lifetime) -> Self
    where
        I: ?Sized + Send + Sync + 'static,
        C: Implements<I>,
    {
        Self {
            target: TypeIdentity::of::<I>(),
            concrete: Some(TypeIdentity::of::<C>()),
            lifetime,
            factory: Arc::new(construct::<I, C>),
        }
    }

    /// 使用注册表中的实现创建绑定
    pub fn from_implementation(implementation: &Implementation, lifetime: Lifetime) -> Self {
        Self {
            target: implementation.abstract_type().clone(),
            concrete: Some(implementation.concrete_type().clone()),
            lifetime,
            factory: Arc::new(implementation.constructor()),
        }
    }

    /// 使用已创建的实例创建单例绑定
    pub fn from_instance<I>(instance: Arc<I>) -> Self
    where
        I: ?Sized + Send + Sync + 'static,
    {
        let instance = Instance::new::<I>(instance);
        Self {
            target: instance.abstract_type().clone(),
            concrete: None,
            lifetime: Lifetime::Singleton,
            factory: Arc::new(
                move |_: &mut dyn ComponentResolver| -> DependencyResult<Instance> {
                    Ok(instance.clone())
                },
            ),
        }
    }

    /// 绑定的抽象类型
    pub fn target(&self) -> &TypeIdentity {
        &self.target
    }

    /// 绑定的具体类型
    pub fn concrete(&self) -> Option<&TypeIdentity> {
        self.concrete.as_ref()
    }

    /// 生命周期
    pub fn lifetime(&self) -> Lifetime {
        self.lifetime
    }

    /// 调用工厂创建实例
    pub fn produce(&self, resolver: &mut dyn ComponentResolver) -> DependencyResult<Instance> {
        (self.factory)(resolver)
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("target", &self.target)
            .field("concrete", &self.concrete)
            .field("lifetime", &self.lifetime)
            .field("factory", &"<function>")
            .finish()
    }
}
