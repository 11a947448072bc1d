//! 错误类型定义

use thiserror::Error;

/// 依赖注入错误类型
///
/// 所有错误都在解析调用时同步返回，整个解析链立即中止，不做重试。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DependencyError {
    #[error("类型未找到: {name}")]
    TypeNotFound { name: String },

    #[error("类型名称不唯一: {name}, 候选: {candidates:?}")]
    AmbiguousTypeName { name: String, candidates: Vec<String> },

    #[error("未找到实现: {type_name}")]
    NoImplementationFound { type_name: String },

    #[error("Type[{simple_name}] has multiple instances")]
    MultipleAbstractImplementations {
        simple_name: String,
        candidates: Vec<String>,
    },

    #[error("无法解析参数: {type_name}.{parameter} ({parameter_type})")]
    UnresolvableParameter {
        type_name: String,
        parameter: String,
        parameter_type: String,
    },

    #[error("循环依赖检测到: {dependency_chain}")]
    CircularDependency { dependency_chain: String },

    #[error("解析深度超出限制: {type_name}, 最大深度 {max_depth}")]
    MaxDepthExceeded { type_name: String, max_depth: usize },

    #[error("类型不匹配: 期望 {expected}, 实际 {actual}")]
    TypeMismatch { expected: String, actual: String },
}

impl DependencyError {
    /// 创建类型未找到错误
    pub fn type_not_found(name: impl Into<String>) -> Self {
        Self::TypeNotFound { name: name.into() }
    }

    /// 创建参数无法解析错误
    pub fn unresolvable_parameter(
        type_name: impl Into<String>,
        parameter: impl Into<String>,
        parameter_type: impl Into<String>,
    ) -> Self {
        Self::UnresolvableParameter {
            type_name: type_name.into(),
            parameter: parameter.into(),
            parameter_type: parameter_type.into(),
        }
    }
}

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件不存在: {path}")]
    FileNotFound { path: String },

    #[error("配置加载失败: {source}")]
    LoadError {
        #[from]
        source: config::ConfigError,
    },

    #[error("配置验证失败: {message}")]
    ValidationError { message: String },
}

/// 基础设施错误类型
#[derive(Error, Debug)]
pub enum InfrastructureError {
    #[error("配置错误: {source}")]
    ConfigError {
        #[from]
        source: ConfigError,
    },

    #[error("依赖注入错误: {source}")]
    DependencyError {
        #[from]
        source: DependencyError,
    },

    #[error("基础设施启动失败: {message}")]
    BootstrapFailed { message: String },
}

/// 结果类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
pub type DependencyResult<T> = Result<T, DependencyError>;
pub type InfrastructureResult<T> = Result<T, InfrastructureError>;
