//! 值类型转换
//!
//! 按名称查找到的值类型与参数类型不一致时使用。转换只在同一种类内进行：
//! 整数之间按数值转换（超出范围视为失败），浮点数之间按数值转换
//! （有限值收窄后溢出同样视为失败），字符串与字节序列只做内容透传。其余组合一律返回
//! [`InjectError::UnsupportedConversion`]。

use inject_common::{InjectError, InjectResult, TypeInfo, Value, ValueKind};
use once_cell::sync::Lazy;
use std::any::TypeId;
use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{trace, warn};

/// 转换的中间表示
#[derive(Debug, Clone, PartialEq)]
enum Scalar {
    Integer(i128),
    Float(f64),
    Text(Cow<'static, str>),
    Bytes(Cow<'static, [u8]>),
}

type Reader = fn(&Value) -> Option<Scalar>;
type Writer = fn(Scalar) -> Result<Value, String>;

/// 转换表条目
struct Conversion {
    kind: ValueKind,
    read: Reader,
    write: Writer,
}

/// 可转换类型表，封闭集合
static CONVERSIONS: Lazy<HashMap<TypeId, Conversion>> = Lazy::new(|| {
    let mut table = HashMap::new();

    macro_rules! integers {
        ($($ty:ty),*) => {
            $(
                table.insert(
                    TypeId::of::<$ty>(),
                    Conversion {
                        kind: ValueKind::Integer,
                        read: read_integer::<$ty>,
                        write: write_integer::<$ty>,
                    },
                );
            )*
        };
    }
    integers!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

    table.insert(
        TypeId::of::<f32>(),
        Conversion {
            kind: ValueKind::Float,
            read: |value| value.downcast_ref::<f32>().map(|v| Scalar::Float(f64::from(*v))),
            write: |scalar| match scalar {
                Scalar::Float(v) => {
                    let narrowed = v as f32;
                    if narrowed.is_finite() || !v.is_finite() {
                        Ok(Value::new(narrowed))
                    } else {
                        Err(format!("数值 {} 超出目标类型范围", v))
                    }
                }
                other => Err(kind_error(&other)),
            },
        },
    );
    table.insert(
        TypeId::of::<f64>(),
        Conversion {
            kind: ValueKind::Float,
            read: |value| value.downcast_ref::<f64>().map(|v| Scalar::Float(*v)),
            write: |scalar| match scalar {
                Scalar::Float(v) => Ok(Value::new(v)),
                other => Err(kind_error(&other)),
            },
        },
    );

    table.insert(
        TypeId::of::<String>(),
        Conversion {
            kind: ValueKind::String,
            read: |value| {
                value
                    .downcast_ref::<String>()
                    .map(|v| Scalar::Text(Cow::Owned(v.clone())))
            },
            write: |scalar| match scalar {
                Scalar::Text(text) => Ok(Value::new(text.into_owned())),
                other => Err(kind_error(&other)),
            },
        },
    );
    table.insert(
        TypeId::of::<&'static str>(),
        Conversion {
            kind: ValueKind::String,
            read: |value| {
                value
                    .downcast_ref::<&'static str>()
                    .map(|v| Scalar::Text(Cow::Borrowed(*v)))
            },
            write: |scalar| match scalar {
                Scalar::Text(Cow::Borrowed(text)) => Ok(Value::new(text)),
                Scalar::Text(Cow::Owned(_)) => Err("静态字符串只能由静态字符串转换".to_string()),
                other => Err(kind_error(&other)),
            },
        },
    );
    table.insert(
        TypeId::of::<Box<str>>(),
        Conversion {
            kind: ValueKind::String,
            read: |value| {
                value
                    .downcast_ref::<Box<str>>()
                    .map(|v| Scalar::Text(Cow::Owned(v.to_string())))
            },
            write: |scalar| match scalar {
                Scalar::Text(text) => Ok(Value::new(Box::<str>::from(text.as_ref()))),
                other => Err(kind_error(&other)),
            },
        },
    );
    table.insert(
        TypeId::of::<Arc<str>>(),
        Conversion {
            kind: ValueKind::String,
            read: |value| {
                value
                    .downcast_ref::<Arc<str>>()
                    .map(|v| Scalar::Text(Cow::Owned(v.to_string())))
            },
            write: |scalar| match scalar {
                Scalar::Text(text) => Ok(Value::new(Arc::<str>::from(text.as_ref()))),
                other => Err(kind_error(&other)),
            },
        },
    );

    table.insert(
        TypeId::of::<Vec<u8>>(),
        Conversion {
            kind: ValueKind::Bytes,
            read: |value| {
                value
                    .downcast_ref::<Vec<u8>>()
                    .map(|v| Scalar::Bytes(Cow::Owned(v.clone())))
            },
            write: |scalar| match scalar {
                Scalar::Bytes(bytes) => Ok(Value::new(bytes.into_owned())),
                other => Err(kind_error(&other)),
            },
        },
    );
    table.insert(
        TypeId::of::<&'static [u8]>(),
        Conversion {
            kind: ValueKind::Bytes,
            read: |value| {
                value
                    .downcast_ref::<&'static [u8]>()
                    .map(|v| Scalar::Bytes(Cow::Borrowed(*v)))
            },
            write: |scalar| match scalar {
                Scalar::Bytes(Cow::Borrowed(bytes)) => Ok(Value::new(bytes)),
                Scalar::Bytes(Cow::Owned(_)) => Err("静态字节切片只能由静态字节切片转换".to_string()),
                other => Err(kind_error(&other)),
            },
        },
    );
    table.insert(
        TypeId::of::<Box<[u8]>>(),
        Conversion {
            kind: ValueKind::Bytes,
            read: |value| {
                value
                    .downcast_ref::<Box<[u8]>>()
                    .map(|v| Scalar::Bytes(Cow::Owned(v.to_vec())))
            },
            write: |scalar| match scalar {
                Scalar::Bytes(bytes) => Ok(Value::new(Box::<[u8]>::from(bytes.as_ref()))),
                other => Err(kind_error(&other)),
            },
        },
    );
    table.insert(
        TypeId::of::<Arc<[u8]>>(),
        Conversion {
            kind: ValueKind::Bytes,
            read: |value| {
                value
                    .downcast_ref::<Arc<[u8]>>()
                    .map(|v| Scalar::Bytes(Cow::Owned(v.to_vec())))
            },
            write: |scalar| match scalar {
                Scalar::Bytes(bytes) => Ok(Value::new(Arc::<[u8]>::from(bytes.as_ref()))),
                other => Err(kind_error(&other)),
            },
        },
    );

    table
});

fn read_integer<T>(value: &Value) -> Option<Scalar>
where
    T: Copy + 'static,
    i128: TryFrom<T>,
{
    value
        .downcast_ref::<T>()
        .and_then(|v| i128::try_from(*v).ok())
        .map(Scalar::Integer)
}

fn write_integer<T>(scalar: Scalar) -> Result<Value, String>
where
    T: TryFrom<i128> + Send + Sync + 'static,
{
    match scalar {
        Scalar::Integer(n) => T::try_from(n)
            .map(Value::new)
            .map_err(|_| format!("数值 {} 超出目标类型范围", n)),
        other => Err(kind_error(&other)),
    }
}

fn kind_error(scalar: &Scalar) -> String {
    let kind = match scalar {
        Scalar::Integer(_) => ValueKind::Integer,
        Scalar::Float(_) => ValueKind::Float,
        Scalar::Text(_) => ValueKind::String,
        Scalar::Bytes(_) => ValueKind::Bytes,
    };
    format!("无法从{}写入", kind)
}

/// 获取类型的值种类
pub fn kind_of(type_info: &TypeInfo) -> ValueKind {
    CONVERSIONS
        .get(&type_info.id)
        .map_or(ValueKind::Other, |conversion| conversion.kind)
}

/// 将值转换为目标类型
///
/// 类型已一致时直接返回原值
pub fn coerce(value: &Value, target: &TypeInfo) -> InjectResult<Value> {
    let source = value.type_info();
    if source == *target {
        return Ok(value.clone());
    }

    let Some(to) = CONVERSIONS.get(&target.id) else {
        warn!(from = source.name, to = target.name, "目标类型不支持转换");
        return Err(InjectError::unsupported_conversion(
            &source,
            target,
            "目标类型必须是字符串、字节序列、整数或浮点数",
        ));
    };
    let from_kind = kind_of(&source);
    if from_kind != to.kind {
        warn!(from = source.name, to = target.name, "值种类不同，拒绝转换");
        return Err(InjectError::unsupported_conversion(
            &source,
            target,
            format!("值种类不同: {} -> {}", from_kind, to.kind),
        ));
    }

    let scalar = CONVERSIONS
        .get(&source.id)
        .and_then(|from| (from.read)(value))
        .ok_or_else(|| InjectError::unsupported_conversion(&source, target, "无法读取源值"))?;
    let converted = (to.write)(scalar)
        .map_err(|reason| InjectError::unsupported_conversion(&source, target, reason))?;

    trace!(from = source.name, to = target.name, "值类型转换完成");
    Ok(converted)
}
