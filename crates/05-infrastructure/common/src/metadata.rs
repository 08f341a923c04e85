//! 元数据定义
//!
//! 提供类型标识、值种类与调用签名信息

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

/// 类型信息
///
/// 注册表的类型键。相等性与哈希只取决于 `TypeId`，名称仅用于日志和错误信息。
#[derive(Debug, Clone, Copy)]
pub struct TypeInfo {
    /// 类型ID
    pub id: TypeId,
    /// 完整类型名称
    pub name: &'static str,
}

impl TypeInfo {
    /// 从类型获取类型信息
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// 是否为指定类型
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }

    /// 获取简短的类型名称（去掉所有模块路径，保留泛型结构）
    pub fn short_name(&self) -> String {
        let mut short = String::with_capacity(self.name.len());
        let mut segment_start = 0;
        for (index, ch) in self.name.char_indices() {
            if matches!(ch, '<' | '>' | ',' | ' ' | '(' | ')' | '[' | ']' | ';' | '&' | '*') {
                short.push_str(last_segment(&self.name[segment_start..index]));
                short.push(ch);
                segment_start = index + ch.len_utf8();
            }
        }
        short.push_str(last_segment(&self.name[segment_start..]));
        short
    }
}

fn last_segment(path: &str) -> &str {
    path.rsplit("::").next().unwrap_or(path)
}

impl PartialEq for TypeInfo {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeInfo {}

impl Hash for TypeInfo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// 值种类
///
/// 类型转换只在同一种类内部进行
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// 整数
    Integer,
    /// 浮点数
    Float,
    /// 字符串
    String,
    /// 字节序列
    Bytes,
    /// 不参与转换的其他类型
    Other,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Integer => "整数",
            Self::Float => "浮点数",
            Self::String => "字符串",
            Self::Bytes => "字节序列",
            Self::Other => "其他",
        };
        f.write_str(name)
    }
}

/// 调用签名
///
/// 参数按声明顺序排列；多个返回值以元组形式体现在 `output` 中
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    /// 参数类型列表
    pub params: Vec<TypeInfo>,
    /// 返回类型
    pub output: TypeInfo,
}

impl Signature {
    /// 创建新的调用签名
    pub fn new(params: Vec<TypeInfo>, output: TypeInfo) -> Self {
        Self { params, output }
    }

    /// 参数个数
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params = self
            .params
            .iter()
            .map(TypeInfo::short_name)
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "fn({}) -> {}", params, self.output.short_name())
    }
}
