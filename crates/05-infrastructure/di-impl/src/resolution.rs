//! 参数解析
//!
//! 将调用签名中的每个参数解析为存储值，全部解析成功后才会调用函数

use crate::coercion;
use inject_abstractions::{Mapper, NamedMapper};
use inject_common::{InjectError, InjectResult, Signature, UsageError, Value};
use tracing::trace;

/// 按参数类型解析全部实参
pub fn resolve_arguments<M>(mapper: &M, signature: &Signature) -> InjectResult<Vec<Value>>
where
    M: Mapper + ?Sized,
{
    signature
        .params
        .iter()
        .enumerate()
        .map(|(position, type_info)| {
            let value = mapper
                .get_value(type_info)
                .ok_or_else(|| InjectError::missing_type(position, type_info))?;
            trace!(position, type_name = type_info.name, "按类型解析参数");
            Ok(value)
        })
        .collect()
}

/// 按参数名称解析全部实参
///
/// 空名称的位置按类型解析；按名称找到的值类型不一致时进行类型转换
pub fn resolve_named_arguments<M>(
    mapper: &M,
    signature: &Signature,
    names: &[&str],
) -> InjectResult<Vec<Value>>
where
    M: Mapper + NamedMapper + ?Sized,
{
    if names.len() != signature.arity() {
        return Err(UsageError::NameCountMismatch {
            expected: signature.arity(),
            actual: names.len(),
        }
        .into());
    }

    signature
        .params
        .iter()
        .zip(names)
        .enumerate()
        .map(|(position, (type_info, name))| {
            if name.is_empty() {
                let value = mapper
                    .get_value(type_info)
                    .ok_or_else(|| InjectError::missing_type(position, type_info))?;
                trace!(position, type_name = type_info.name, "按类型解析参数");
                return Ok(value);
            }

            let value = mapper
                .get_named_value(name)
                .ok_or_else(|| InjectError::missing_named(position, *name))?;
            trace!(position, name = *name, type_name = type_info.name, "按名称解析参数");
            coercion::coerce(&value, type_info)
        })
        .collect()
}
