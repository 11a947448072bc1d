//! 依赖注入容器抽象接口
//!
//! 提供依赖注入容器的核心抽象

use crate::factory::Implements;
use crate::instance::Instance;
use crate::resolver::{ComponentResolver, ResolveContext};
use kup_common::{ConfigError, ConfigResult, DependencyResult, LoggingConfig, TypeIdentity};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// 依赖注入容器 trait
///
/// 所有注册方法都只需要共享引用，容器可以在线程间共享。
/// 重复绑定同一个抽象类型时后者覆盖前者。
pub trait DiContainer: Send + Sync {
    /// 绑定瞬时工厂
    fn bind<I, F>(&self, factory: F)
    where
        I: ?Sized + Send + Sync + 'static,
        F: Fn() -> Arc<I> + Send + Sync + 'static;

    /// 绑定瞬时工厂，工厂通过解析器获取依赖
    fn bind_with<I, F>(&self, factory: F)
    where
        I: ?Sized + Send + Sync + 'static,
        F: Fn(&mut dyn ComponentResolver) -> DependencyResult<Arc<I>> + Send + Sync + 'static;

    /// 绑定瞬时具体类型
    fn bind_type<I, C>(&self)
    where
        I: ?Sized + Send + Sync + 'static,
        C: Implements<I>;

    /// 绑定单例工厂
    fn singleton<I, F>(&self, factory: F)
    where
        I: ?Sized + Send + Sync + 'static,
        F: Fn() -> Arc<I> + Send + Sync + 'static;

    /// 绑定单例工厂，工厂通过解析器获取依赖
    fn singleton_with<I, F>(&self, factory: F)
    where
        I: ?Sized + Send + Sync + 'static,
        F: Fn(&mut dyn ComponentResolver) -> DependencyResult<Arc<I>> + Send + Sync + 'static;

    /// 绑定单例具体类型
    fn singleton_type<I, C>(&self)
    where
        I: ?Sized + Send + Sync + 'static,
        C: Implements<I>;

    /// 绑定已创建的单例实例
    fn singleton_instance<I>(&self, instance: Arc<I>)
    where
        I: ?Sized + Send + Sync + 'static;

    /// 监听指定类型的解析
    fn listen_for<I, F>(&self, callback: F)
    where
        I: ?Sized + Send + Sync + 'static,
        F: Fn(&Arc<I>) + Send + Sync + 'static;

    /// 解析组件
    fn resolve<I>(&self) -> DependencyResult<Arc<I>>
    where
        I: ?Sized + Send + Sync + 'static;

    /// 解析组件（使用名称）
    fn resolve_by_name(&self, name: &str) -> DependencyResult<Instance>;

    /// 检查是否已显式绑定
    fn is_bound<I>(&self) -> bool
    where
        I: ?Sized + 'static;

    /// 获取所有已绑定的抽象类型
    fn registered_types(&self) -> Vec<TypeIdentity>;
}

/// 容器配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerConfig {
    /// 自动绑定扫描的命名空间
    pub scope: Option<String>,
    /// 最大解析深度
    pub max_resolution_depth: usize,
    /// 日志配置
    pub logging: LoggingConfig,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            scope: None,
            max_resolution_depth: ResolveContext::DEFAULT_MAX_DEPTH,
            logging: LoggingConfig::default(),
        }
    }
}

impl ContainerConfig {
    /// 环境变量前缀
    pub const ENV_PREFIX: &'static str = "KUP";

    /// 加载配置
    ///
    /// 先读取可选的配置文件，再用 `KUP__` 前缀的环境变量覆盖，
    /// 例如 `KUP__SCOPE`、`KUP__LOGGING__LEVEL`。
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            if !path.exists() {
                return Err(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                });
            }
            builder = builder.add_source(config::File::from(path));
        }

        let settings = builder
            .add_source(
                config::Environment::with_prefix(Self::ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let container_config: Self = settings.try_deserialize()?;
        container_config.validate()?;
        Ok(container_config)
    }

    /// 设置扫描命名空间
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// 设置最大解析深度
    pub fn with_max_resolution_depth(mut self, max_resolution_depth: usize) -> Self {
        self.max_resolution_depth = max_resolution_depth;
        self
    }

    /// 验证配置
    pub fn validate(&self) -> ConfigResult<()> {
        if self.max_resolution_depth == 0 {
            return Err(ConfigError::ValidationError {
                message: "max_resolution_depth 必须大于 0".to_string(),
            });
        }

        if matches!(&self.scope, Some(scope) if scope.trim().is_empty()) {
            return Err(ConfigError::ValidationError {
                message: "scope 不能为空字符串".to_string(),
            });
        }

        Ok(())
    }
}

/// 容器统计信息
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContainerStats {
    /// 已注册绑定数量
    pub registered_bindings: usize,
    /// 成功解析次数（每次顶层调用计一次）
    pub resolved_components: usize,
    /// 解析错误数量
    pub resolution_errors: usize,
    /// 活跃单例数量
    pub active_singletons: usize,
    /// 已扫描的命名空间数量
    pub scanned_scopes: usize,
}
