//! 宏工具函数

use syn::{Field, GenericArgument, PathArguments, Result, Type};

/// 如果类型是 `Arc<T>`，返回 `T`
pub fn arc_inner_type(ty: &Type) -> Option<&Type> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    if type_path.qself.is_some() {
        return None;
    }

    let segment = type_path.path.segments.last()?;
    if segment.ident != "Arc" {
        return None;
    }

    match &segment.arguments {
        PathArguments::AngleBracketed(args) if args.args.len() == 1 => match args.args.first() {
            Some(GenericArgument::Type(inner_type)) => Some(inner_type),
            _ => None,
        },
        _ => None,
    }
}

/// 字段是否标注了 `#[inject(default)]`
pub fn has_inject_default(field: &Field) -> Result<bool> {
    let mut default = false;

    for attr in &field.attrs {
        if attr.path().is_ident("inject") {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("default") {
                    default = true;
                    Ok(())
                } else {
                    Err(meta.error("不支持的 inject 参数，只允许 `default`"))
                }
            })?;
        }
    }

    Ok(default)
}

/// 把类型名转换为注册函数名使用的蛇形命名
pub fn to_snake_case(name: &str) -> String {
    let mut snake = String::with_capacity(name.len() + 4);
    for (index, ch) in name.chars().enumerate() {
        if ch.is_uppercase() {
            if index > 0 {
                snake.push('_');
            }
            snake.extend(ch.to_lowercase());
        } else {
            snake.push(ch);
        }
    }
    snake
}
