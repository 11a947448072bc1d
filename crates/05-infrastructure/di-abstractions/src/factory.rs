//! 组件工厂抽象接口
//!
//! 用显式注册的构造函数代替运行时反射：每个具体类型实现 [`Injectable`]，
//! 在构造时通过 [`ComponentResolver`] 解析自己的依赖。

use crate::instance::Instance;
use crate::resolver::ComponentResolver;
use kup_common::{DependencyResult, TypeIdentity};
use std::sync::Arc;

/// 可注入组件 trait
///
/// `inject` 是组件唯一的规范构造函数，依赖按字段顺序深度优先解析。
/// 通常由 `#[derive(Injectable)]` 生成。
pub trait Injectable: Send + Sync + Sized + 'static {
    /// 使用依赖注入构建组件实例
    fn inject(resolver: &mut dyn ComponentResolver) -> DependencyResult<Self>;
}

/// 具体类型与抽象类型之间的实现关系
///
/// 抽象类型通常是 `dyn Trait`。`upcast` 完成 `Arc<Self>` 到 `Arc<I>` 的转换。
pub trait Implements<I>: Injectable
where
    I: ?Sized + Send + Sync + 'static,
{
    /// 转换为抽象类型
    fn upcast(self: Arc<Self>) -> Arc<I>;
}

impl<T: Injectable> Implements<T> for T {
    fn upcast(self: Arc<Self>) -> Arc<T> {
        self
    }
}

/// 绑定工厂函数类型
pub type ComponentFactoryFn =
    Arc<dyn Fn(&mut dyn ComponentResolver) -> DependencyResult<Instance> + Send + Sync>;

/// 构造函数指针类型
pub type ConstructorFn = fn(&mut dyn ComponentResolver) -> DependencyResult<Instance>;

/// 构造具体类型 `C` 并以抽象类型 `I` 包装
pub fn construct<I, C>(resolver: &mut dyn ComponentResolver) -> DependencyResult<Instance>
where
    I: ?Sized + Send + Sync + 'static,
    C: Implements<I>,
{
    let component = C::inject(resolver)?;
    let instance = <C as Implements<I>>::upcast(Arc::new(component));

    Ok(Instance::new::<I>(instance).with_concrete_type(TypeIdentity::of::<C>()))
}
