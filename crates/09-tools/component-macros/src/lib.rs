//! # Kup Macros
//!
//! 这个 crate 提供了用于依赖注入组件声明和自动注册的过程宏。
//!
//! ## 核心宏
//!
//! - [`Injectable`] - 生成组件的注入构造函数
//! - [`component`] - 声明组件实现的抽象类型，并在启动时提交到全局组件注册表
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use kup_macros::{component, Injectable};
//! use std::sync::Arc;
//!
//! pub trait Fuel: Send + Sync {}
//! pub trait Engine: Send + Sync {}
//!
//! #[component(dyn Fuel)]
//! #[derive(Injectable)]
//! pub struct Diesel;
//!
//! impl Fuel for Diesel {}
//!
//! #[component(dyn Engine)]
//! #[derive(Injectable)]
//! pub struct DieselEngine {
//!     fuel: Arc<dyn Fuel>,
//!     #[inject(default)]
//!     cylinders: u32,
//! }
//!
//! impl Engine for DieselEngine {}
//! ```
//!
//! 使用 `#[component]` 的 crate 需要依赖 `ctor` 和 `kup-di-abstractions`。

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod component;
mod injectable;
mod utils;

/// 组件注册宏
///
/// 参数是组件直接实现的抽象类型列表，通常是 `dyn Trait`。宏会为每个抽象类型生成
/// `Implements` 实现，并在程序启动时把组件自身和这些实现关系提交到全局组件注册表。
/// 需要写在 `#[derive(Injectable)]` 之前。
///
/// # 示例
///
/// ```rust,ignore
/// #[component(dyn Shape, dyn Drawable)]
/// #[derive(Injectable)]
/// pub struct Circle;
/// ```
#[proc_macro_attribute]
pub fn component(args: TokenStream, input: TokenStream) -> TokenStream {
    component::component_impl(args, input)
}

/// 可注入组件派生宏
///
/// 按字段顺序生成 `Injectable::inject`：
///
/// - `Arc<T>` 字段从容器解析 `T`
/// - `#[inject(default)]` 字段使用 `Default::default()`
/// - 其他字段在该位置返回 `UnresolvableParameter` 错误
#[proc_macro_derive(Injectable, attributes(inject))]
pub fn derive_injectable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    injectable::derive_injectable_impl(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
