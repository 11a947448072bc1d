//! 单例缓存

use dashmap::DashMap;
use kup_di_abstractions::{DependencyError, DependencyResult, Instance, TypeIdentity};
use once_cell::sync::OnceCell;
use std::cell::RefCell;
use std::sync::Arc;

thread_local! {
    /// 当前线程正在初始化的单例（缓存地址, 类型）
    static INITIALIZING: RefCell<Vec<(usize, TypeIdentity)>> = RefCell::new(Vec::new());
}

/// 初始化期间占用 `INITIALIZING` 中的一项，离开作用域时移除
struct InitGuard;

impl InitGuard {
    fn enter(cache: usize, identity: &TypeIdentity) -> DependencyResult<Self> {
        INITIALIZING.with(|initializing| {
            let mut initializing = initializing.borrow_mut();
            if initializing
                .iter()
                .any(|(owner, pending)| *owner == cache && pending == identity)
            {
                let chain = initializing
                    .iter()
                    .filter(|(owner, _)| *owner == cache)
                    .map(|(_, pending)| pending)
                    .skip_while(|pending| *pending != identity)
                    .chain(std::iter::once(identity))
                    .map(TypeIdentity::simple_name)
                    .collect::<Vec<_>>()
                    .join(" -> ");

                return Err(DependencyError::CircularDependency {
                    dependency_chain: chain,
                });
            }

            initializing.push((cache, identity.clone()));
            Ok(InitGuard)
        })
    }
}

impl Drop for InitGuard {
    fn drop(&mut self) {
        INITIALIZING.with(|initializing| {
            initializing.borrow_mut().pop();
        });
    }
}

/// 单例缓存
///
/// 每个类型一个 `OnceCell`，并发的首次解析只会有一个执行工厂，其余等待并共享结果。
/// 工厂失败时不写入缓存。
#[derive(Debug, Default)]
pub struct SingletonCache {
    cells: DashMap<TypeIdentity, Arc<OnceCell<Instance>>>,
}

impl SingletonCache {
    /// 创建新的单例缓存
    pub fn new() -> Self {
        Self::default()
    }

    /// 获取缓存实例，不存在时调用 `init` 创建
    ///
    /// 返回值的第二项表示本次调用是否创建了实例。同一线程在 `init`
    /// 内部再次请求正在初始化的类型时返回 `CircularDependency`。
    pub fn get_or_try_init<F>(
        &self,
        identity: &TypeIdentity,
        init: F,
    ) -> DependencyResult<(Instance, bool)>
    where
        F: FnOnce() -> DependencyResult<Instance>,
    {
        // 分片锁在这里释放，init 期间不持有 DashMap 的锁
        let cell = Arc::clone(&self.cells.entry(identity.clone()).or_default());
        if let Some(instance) = cell.get() {
            return Ok((instance.clone(), false));
        }

        let _guard = InitGuard::enter(self as *const Self as usize, identity)?;
        let mut created = false;
        let instance = cell.get_or_try_init(|| {
            created = true;
            init()
        })?;

        Ok((instance.clone(), created))
    }

    /// 获取已缓存的实例
    pub fn get(&self, identity: &TypeIdentity) -> Option<Instance> {
        self.cells
            .get(identity)
            .and_then(|entry| entry.value().get().cloned())
    }

    /// 移除缓存（重新绑定时使用）
    pub fn evict(&self, identity: &TypeIdentity) -> bool {
        self.cells
            .remove(identity)
            .is_some_and(|(_, cell)| cell.get().is_some())
    }

    /// 已创建的单例数量
    pub fn len(&self) -> usize {
        self.cells
            .iter()
            .filter(|entry| entry.value().get().is_some())
            .count()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
