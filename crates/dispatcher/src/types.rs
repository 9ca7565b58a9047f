// types.rs
// 定义通用类型：字面量类型、值、带名字的变量、有序类型接口以及输入映射。
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// 参数的类型描述
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LiteralType {
    Integer,
    Float,
    String,
    Boolean,
    Blob,
    /// 元素类型为 T 的有序集合
    Collection(Box<LiteralType>),
    /// 键为字符串、值类型为 T 的映射
    Map(Box<LiteralType>),
}

impl LiteralType {
    /// 将类型 T 包装为 collection-of-T
    pub fn collection_of(inner: LiteralType) -> Self {
        LiteralType::Collection(Box::new(inner))
    }

    pub fn is_collection(&self) -> bool {
        matches!(self, LiteralType::Collection(_))
    }
}

impl fmt::Display for LiteralType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralType::Integer => write!(f, "int"),
            LiteralType::Float => write!(f, "float"),
            LiteralType::String => write!(f, "str"),
            LiteralType::Boolean => write!(f, "bool"),
            LiteralType::Blob => write!(f, "blob"),
            LiteralType::Collection(inner) => write!(f, "List[{}]", inner),
            LiteralType::Map(inner) => write!(f, "Dict[str, {}]", inner),
        }
    }
}

/// 参数值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    None,
    Integer(i64),
    Float(f64),
    String(String),
    Boolean(bool),
    Blob(Vec<u8>),
    Collection(Vec<Value>),
    Map(HashMap<String, Value>),
}

impl Value {
    /// 以集合视图访问值，非集合返回 None
    pub fn as_collection(&self) -> Option<&[Value]> {
        match self {
            Value::Collection(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// 值的简短类型名，用于错误信息
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::None => "none",
            Value::Integer(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "str",
            Value::Boolean(_) => "bool",
            Value::Blob(_) => "blob",
            Value::Collection(_) => "list",
            Value::Map(_) => "dict",
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Collection(items.into_iter().map(Into::into).collect())
    }
}

/// 带名字的变量，接口中的一项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
    pub ty: LiteralType,
}

impl Variable {
    pub fn new(name: impl Into<String>, ty: LiteralType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// 有序的输入/输出类型接口，保持声明顺序
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypedInterface {
    pub inputs: Vec<Variable>,
    pub outputs: Vec<Variable>,
}

impl TypedInterface {
    pub fn new(inputs: Vec<Variable>, outputs: Vec<Variable>) -> Self {
        Self { inputs, outputs }
    }

    /// 追加一个输入参数
    pub fn with_input(mut self, name: impl Into<String>, ty: LiteralType) -> Self {
        self.inputs.push(Variable::new(name, ty));
        self
    }

    /// 追加一个输出参数
    pub fn with_output(mut self, name: impl Into<String>, ty: LiteralType) -> Self {
        self.outputs.push(Variable::new(name, ty));
        self
    }

    pub fn input_names(&self) -> impl Iterator<Item = &str> {
        self.inputs.iter().map(|v| v.name.as_str())
    }

    pub fn output_names(&self) -> impl Iterator<Item = &str> {
        self.outputs.iter().map(|v| v.name.as_str())
    }

    /// 按名字查找输出类型
    pub fn output_type(&self, name: &str) -> Option<&LiteralType> {
        self.outputs.iter().find(|v| v.name == name).map(|v| &v.ty)
    }
}

/// 参数名到值的映射，作为元素任务和批量任务的输入
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LiteralMap {
    values: HashMap<String, Value>,
}

impl LiteralMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(name.into(), value.into());
    }

    /// 链式插入，便于构造测试输入
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for LiteralMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = LiteralMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

/// 批量任务一次调用的结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DispatchOutput {
    /// 分布式模式：本槽位元素任务的标量输出，原样返回
    Slot(Vec<Value>),
    /// 元素任务没有声明输出
    Empty,
    /// 只有一个输出时直接返回该输出的集合
    Collection(Vec<Value>),
    /// 多个输出时按声明顺序返回各自的集合
    Collections(Vec<Vec<Value>>),
}

impl DispatchOutput {
    pub fn is_empty(&self) -> bool {
        matches!(self, DispatchOutput::Empty)
    }
}
