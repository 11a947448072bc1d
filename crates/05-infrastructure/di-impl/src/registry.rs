//! 绑定注册表

use kup_di_abstractions::{Binding, TypeIdentity};
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::debug;

/// 绑定注册表
///
/// 抽象类型到绑定的映射。注册表自身从不扫描，未命中时由解析器负责自动绑定。
#[derive(Debug, Default)]
pub struct BindingRegistry {
    bindings: RwLock<HashMap<TypeIdentity, Binding>>,
}

impl BindingRegistry {
    /// 创建新的绑定注册表
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册绑定，返回被覆盖的旧绑定
    pub fn register(&self, binding: Binding) -> Option<Binding> {
        let target = binding.target().clone();
        let previous = self.bindings.write().insert(target, binding);

        if let Some(previous) = &previous {
            debug!("覆盖绑定: {} ({})", previous.target(), previous.lifetime());
        }
        previous
    }

    /// 仅在尚未绑定时注册，返回最终生效的绑定
    pub fn register_if_absent(&self, binding: Binding) -> Binding {
        self.bindings
            .write()
            .entry(binding.target().clone())
            .or_insert(binding)
            .clone()
    }

    /// 查找绑定
    pub fn lookup(&self, identity: &TypeIdentity) -> Option<Binding> {
        self.bindings.read().get(identity).cloned()
    }

    /// 是否已绑定
    pub fn contains(&self, identity: &TypeIdentity) -> bool {
        self.bindings.read().contains_key(identity)
    }

    /// 所有已绑定的抽象类型，按完全限定名排序
    pub fn identities(&self) -> Vec<TypeIdentity> {
        let mut identities: Vec<TypeIdentity> = self.bindings.read().keys().cloned().collect();
        identities.sort();
        identities
    }

    /// 绑定数量
    pub fn len(&self) -> usize {
        self.bindings.read().len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.bindings.read().is_empty()
    }
}
