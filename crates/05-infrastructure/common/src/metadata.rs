//! 类型元数据定义
//!
//! 提供容器内部统一使用的类型标识

use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// 类型标识
///
/// 由完全限定名和简单名组成，两个标识当且仅当完全限定名相同时相等。
/// trait object 的 `dyn ` 前缀会被去掉，因此 `dyn crate::shapes::Shape`
/// 的完全限定名为 `crate::shapes::Shape`，简单名为 `Shape`。
#[derive(Debug, Clone, Serialize)]
pub struct TypeIdentity {
    qualified_name: String,
    simple_name: String,
}

impl TypeIdentity {
    /// 从类型获取类型标识
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self::from_type_name(std::any::type_name::<T>())
    }

    /// 从类型名称创建类型标识
    pub fn from_type_name(type_name: &str) -> Self {
        let qualified_name = type_name.trim();
        let qualified_name = qualified_name
            .strip_prefix("dyn ")
            .unwrap_or(qualified_name)
            .to_string();

        let base = qualified_name.split(" + ").next().unwrap_or(&qualified_name);
        let base = base.split('<').next().unwrap_or(base);
        let simple_name = base.rsplit("::").next().unwrap_or(base).to_string();

        Self {
            qualified_name,
            simple_name,
        }
    }

    /// 完全限定名
    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    /// 去掉 trait object 附加约束（如 `+ Send + Sync`）后的路径
    pub fn base_name(&self) -> &str {
        self.qualified_name
            .split(" + ")
            .next()
            .unwrap_or(&self.qualified_name)
    }

    /// 简单名（不包含模块路径）
    pub fn simple_name(&self) -> &str {
        &self.simple_name
    }

    /// 名称是否指向此类型（完全限定名、不含附加约束的路径或简单名）
    pub fn matches_name(&self, name: &str) -> bool {
        self.qualified_name == name || self.base_name() == name || self.simple_name == name
    }

    /// 是否位于指定命名空间内（包含子模块）
    pub fn is_within(&self, namespace: &str) -> bool {
        let namespace = namespace.trim().trim_end_matches("::");
        if namespace.is_empty() {
            return true;
        }

        self.qualified_name == namespace
            || self
                .qualified_name
                .strip_prefix(namespace)
                .is_some_and(|rest| rest.starts_with("::"))
    }
}

impl PartialEq for TypeIdentity {
    fn eq(&self, other: &Self) -> bool {
        self.qualified_name == other.qualified_name
    }
}

impl Eq for TypeIdentity {}

impl Hash for TypeIdentity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.qualified_name.hash(state);
    }
}

impl PartialOrd for TypeIdentity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TypeIdentity {
    fn cmp(&self, other: &Self) -> Ordering {
        self.qualified_name.cmp(&other.qualified_name)
    }
}

impl fmt::Display for TypeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.qualified_name)
    }
}
