//! 可注入组件派生宏实现

use crate::utils::{arc_inner_type, has_inject_default};
use proc_macro2::TokenStream;
use quote::{format_ident, quote, ToTokens};
use syn::{Data, DeriveInput, Fields, Result};

/// 字段的注入方式
enum Injection {
    /// `Arc<T>`：由容器解析 `T`
    Resolve(TokenStream),
    /// `#[inject(default)]`：使用 `Default::default()`
    Default(TokenStream),
    /// 其他类型：无法注入
    Unresolvable { parameter: String, ty: String },
}

/// 实现 #[derive(Injectable)] 宏
pub fn derive_injectable_impl(input: DeriveInput) -> Result<TokenStream> {
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "Injectable 只能派生在结构体上",
        ));
    };

    let mut injections = Vec::new();
    for (index, field) in data.fields.iter().enumerate() {
        let injection = if has_inject_default(field)? {
            Injection::Default(field.ty.to_token_stream())
        } else if let Some(inner) = arc_inner_type(&field.ty) {
            Injection::Resolve(inner.to_token_stream())
        } else {
            Injection::Unresolvable {
                parameter: field
                    .ident
                    .as_ref()
                    .map_or_else(|| index.to_string(), ToString::to_string),
                ty: field.ty.to_token_stream().to_string(),
            }
        };
        injections.push(injection);
    }

    let body = generate_body(&data.fields, &injections);

    Ok(quote! {
        impl #impl_generics ::kup_di_abstractions::Injectable for #struct_name #ty_generics #where_clause {
            fn inject(
                resolver: &mut dyn ::kup_di_abstractions::ComponentResolver,
            ) -> ::kup_di_abstractions::DependencyResult<Self> {
                #body
            }
        }
    })
}

/// 按字段顺序解析依赖，遇到无法注入的字段时在该位置返回错误
fn generate_body(fields: &Fields, injections: &[Injection]) -> TokenStream {
    let mut statements = Vec::new();
    let mut values = Vec::new();

    for (index, injection) in injections.iter().enumerate() {
        let binding = format_ident!("__field_{}", index);
        match injection {
            Injection::Resolve(inner) => {
                statements.push(quote! {
                    let #binding = resolver.resolve::<#inner>()?;
                });
            }
            Injection::Default(ty) => {
                statements.push(quote! {
                    let #binding: #ty = ::core::default::Default::default();
                });
            }
            Injection::Unresolvable { parameter, ty } => {
                // 之前的依赖已经解析，这里直接返回，后面的字段不再解析
                let resolved = statements;
                return quote! {
                    let _ = &resolver;
                    #(#resolved)*
                    ::core::result::Result::Err(
                        ::kup_di_abstractions::DependencyError::unresolvable_parameter(
                            ::std::any::type_name::<Self>(),
                            #parameter,
                            #ty,
                        ),
                    )
                };
            }
        }
        values.push(binding);
    }

    let construct = match fields {
        Fields::Named(named) => {
            let names = named.named.iter().map(|field| &field.ident);
            quote! { Self { #(#names: #values),* } }
        }
        Fields::Unnamed(_) => quote! { Self(#(#values),*) },
        Fields::Unit => quote! { Self },
    };

    quote! {
        let _ = &resolver;
        #(#statements)*
        ::core::result::Result::Ok(#construct)
    }
}
