//! 命名空间扫描器

use kup_di_abstractions::{Implementation, TypeCatalog, TypeIdentity};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// 单个命名空间的扫描结果：抽象类型到其直接实现的索引
#[derive(Debug, Clone, Default)]
pub struct ScopeIndex {
    namespace: String,
    implementations: HashMap<TypeIdentity, Vec<Implementation>>,
}

impl ScopeIndex {
    /// 从注册表构建指定命名空间的索引
    pub fn build(namespace: &str, catalog: &TypeCatalog) -> Self {
        let mut implementations: HashMap<TypeIdentity, Vec<Implementation>> = HashMap::new();

        for implementation in catalog.within(namespace) {
            implementations
                .entry(implementation.abstract_type().clone())
                .or_default()
                .push(implementation.clone());
        }

        Self {
            namespace: namespace.to_string(),
            implementations,
        }
    }

    /// 扫描的命名空间
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// 指定抽象类型在该命名空间内的候选实现
    pub fn candidates(&self, abstract_type: &TypeIdentity) -> &[Implementation] {
        self.implementations
            .get(abstract_type)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// 索引中出现的所有抽象类型
    pub fn abstract_types(&self) -> impl Iterator<Item = &TypeIdentity> {
        self.implementations.keys()
    }

    /// 索引中实现关系的数量
    pub fn len(&self) -> usize {
        self.implementations.values().map(Vec::len).sum()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.implementations.is_empty()
    }
}

/// 命名空间扫描器
///
/// 每个命名空间只扫描一次，结果缓存在扫描器内部。
/// 未指定注册表时，首次扫描时读取全局注册表的快照。
#[derive(Debug, Default)]
pub struct ScopeScanner {
    catalog: Option<Arc<TypeCatalog>>,
    scan_cache: RwLock<HashMap<String, Arc<ScopeIndex>>>,
}

impl ScopeScanner {
    /// 使用全局注册表创建扫描器
    pub fn new() -> Self {
        Self::default()
    }

    /// 使用指定注册表创建扫描器
    pub fn with_catalog(catalog: TypeCatalog) -> Self {
        Self {
            catalog: Some(Arc::new(catalog)),
            scan_cache: RwLock::new(HashMap::new()),
        }
    }

    /// 扫描命名空间
    pub fn scan(&self, namespace: &str) -> Arc<ScopeIndex> {
        if let Some(index) = self.scan_cache.read().get(namespace) {
            debug!("使用缓存的扫描结果: {}", namespace);
            return index.clone();
        }

        let mut cache = self.scan_cache.write();
        if let Some(index) = cache.get(namespace) {
            return index.clone();
        }

        let index = match &self.catalog {
            Some(catalog) => ScopeIndex::build(namespace, catalog),
            None => ScopeIndex::build(namespace, &TypeCatalog::global()),
        };

        if index.is_empty() {
            warn!("命名空间 {} 中没有发现任何组件", namespace);
        } else {
            info!("扫描命名空间 {} 完成，发现 {} 个实现关系", namespace, index.len());
        }

        let index = Arc::new(index);
        cache.insert(namespace.to_string(), index.clone());
        index
    }

    /// 已扫描的命名空间数量
    pub fn scanned_count(&self) -> usize {
        self.scan_cache.read().len()
    }
}
