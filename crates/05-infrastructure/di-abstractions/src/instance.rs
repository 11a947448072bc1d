//! 类型擦除的组件实例

use kup_common::{DependencyError, DependencyResult, TypeIdentity};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// 解析得到的组件实例
///
/// 内部保存抽象类型 `I` 的 `Arc<I>`，通过 [`Instance::downcast`] 做带检查的还原。
/// 克隆只增加引用计数，单例缓存返回的克隆与缓存中的是同一个实例。
#[derive(Clone)]
pub struct Instance {
    abstract_type: TypeIdentity,
    concrete_type: Option<TypeIdentity>,
    value: Arc<dyn Any + Send + Sync>,
}

impl Instance {
    /// 包装抽象类型的实例
    pub fn new<I>(value: Arc<I>) -> Self
    where
        I: ?Sized + Send + Sync + 'static,
    {
        Self {
            abstract_type: TypeIdentity::of::<I>(),
            concrete_type: None,
            value: Arc::new(value),
        }
    }

    /// 记录具体类型
    pub fn with_concrete_type(mut self, concrete_type: TypeIdentity) -> Self {
        self.concrete_type = Some(concrete_type);
        self
    }

    /// 实例对应的抽象类型
    pub fn abstract_type(&self) -> &TypeIdentity {
        &self.abstract_type
    }

    /// 实例的具体类型；由调用方工厂闭包创建的实例无法得知
    pub fn concrete_type(&self) -> Option<&TypeIdentity> {
        self.concrete_type.as_ref()
    }

    /// 是否可以还原为 `Arc<I>`
    pub fn is<I>(&self) -> bool
    where
        I: ?Sized + Send + Sync + 'static,
    {
        self.value.is::<Arc<I>>()
    }

    /// 还原为 `Arc<I>`
    pub fn downcast<I>(&self) -> DependencyResult<Arc<I>>
    where
        I: ?Sized + Send + Sync + 'static,
    {
        self.value
            .downcast_ref::<Arc<I>>()
            .cloned()
            .ok_or_else(|| DependencyError::TypeMismatch {
                expected: TypeIdentity::of::<I>().to_string(),
                actual: self.abstract_type.to_string(),
            })
    }

    /// 是否与另一个句柄指向同一个实例
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.value, &other.value)
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("abstract_type", &self.abstract_type)
            .field("concrete_type", &self.concrete_type)
            .field("value", &"<instance>")
            .finish()
    }
}
