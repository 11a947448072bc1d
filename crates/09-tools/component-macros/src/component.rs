//! 组件注册宏实现

use crate::utils::to_snake_case;
use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{
    parse::Parse, parse::ParseStream, parse_macro_input, punctuated::Punctuated, Ident,
    ItemStruct, Result, Token, Type,
};

/// 组件参数：组件直接实现的抽象类型列表
#[derive(Debug, Clone, Default)]
pub struct ComponentArgs {
    pub abstractions: Vec<Type>,
}

impl Parse for ComponentArgs {
    fn parse(input: ParseStream) -> Result<Self> {
        let parsed = Punctuated::<Type, Token![,]>::parse_terminated(input)?;

        Ok(Self {
            abstractions: parsed.into_iter().collect(),
        })
    }
}

/// 实现 #[component] 宏
pub fn component_impl(args: TokenStream, input: TokenStream) -> TokenStream {
    let component_args = parse_macro_input!(args as ComponentArgs);
    let input_struct = parse_macro_input!(input as ItemStruct);

    if !input_struct.generics.params.is_empty() {
        return syn::Error::new_spanned(
            &input_struct.generics,
            "#[component] 不支持泛型结构体",
        )
        .to_compile_error()
        .into();
    }

    let struct_name = &input_struct.ident;
    let abstractions = &component_args.abstractions;

    let implements = abstractions.iter().map(|abstraction| {
        quote! {
            impl ::kup_di_abstractions::Implements<#abstraction> for #struct_name {
                fn upcast(self: ::std::sync::Arc<Self>) -> ::std::sync::Arc<#abstraction> {
                    self
                }
            }
        }
    });

    let registration_code = generate_registration_code(struct_name, abstractions);

    let expanded = quote! {
        #input_struct

        #(#implements)*

        #registration_code
    };

    TokenStream::from(expanded)
}

/// 生成启动时提交到全局注册表的代码
fn generate_registration_code(struct_name: &Ident, abstractions: &[Type]) -> proc_macro2::TokenStream {
    let registration_fn_name = Ident::new(
        &format!(
            "__kup_register_{}",
            to_snake_case(&struct_name.to_string())
        ),
        Span::call_site(),
    );

    quote! {
        #[::ctor::ctor]
        fn #registration_fn_name() {
            ::kup_di_abstractions::TypeCatalog::submit(
                ::kup_di_abstractions::Implementation::of::<#struct_name, #struct_name>(),
            );
            #(
                ::kup_di_abstractions::TypeCatalog::submit(
                    ::kup_di_abstractions::Implementation::of::<#abstractions, #struct_name>(),
                );
            )*
        }
    }
}
