//! 解析监听器注册表

use kup_di_abstractions::{Instance, TypeIdentity};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// 监听器回调类型
pub type ListenerFn = Arc<dyn Fn(&Instance) + Send + Sync>;

/// 监听器注册表
///
/// 每个抽象类型一个只追加的回调列表，按注册顺序调用，重复注册的回调都会触发。
#[derive(Default)]
pub struct ListenerRegistry {
    listeners: RwLock<HashMap<TypeIdentity, Vec<ListenerFn>>>,
}

impl ListenerRegistry {
    /// 创建新的监听器注册表
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加监听器
    pub fn listen(&self, identity: TypeIdentity, listener: ListenerFn) {
        self.listeners
            .write()
            .entry(identity)
            .or_default()
            .push(listener);
    }

    /// 通知指定类型的所有监听器，返回触发的数量
    ///
    /// 回调在释放锁之后执行，回调内部可以再次访问容器。
    pub fn notify(&self, identity: &TypeIdentity, instance: &Instance) -> usize {
        let listeners = self
            .listeners
            .read()
            .get(identity)
            .cloned()
            .unwrap_or_default();

        for listener in &listeners {
            listener(instance);
        }
        listeners.len()
    }

    /// 指定类型的监听器数量
    pub fn count(&self, identity: &TypeIdentity) -> usize {
        self.listeners.read().get(identity).map_or(0, Vec::len)
    }
}

impl fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts: HashMap<String, usize> = self
            .listeners
            .read()
            .iter()
            .map(|(identity, listeners)| (identity.to_string(), listeners.len()))
            .collect();

        f.debug_struct("ListenerRegistry")
            .field("listeners", &counts)
            .finish()
    }
}
