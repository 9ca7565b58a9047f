// interface.rs
// 集合接口适配器：从元素任务的标量接口推导出批量任务的集合接口，并生成批量任务名。
use crate::types::{LiteralType, TypedInterface, Variable};

/// 批量任务名中固定的区分段
pub const MAPPER_PREFIX: &str = "mapper_";

/// 将标量接口转换为集合接口：名字和顺序不变，每个类型 T 变为 collection-of-T
pub fn to_collection_interface(interface: &TypedInterface) -> TypedInterface {
    TypedInterface {
        inputs: interface.inputs.iter().map(to_collection_variable).collect(),
        outputs: interface.outputs.iter().map(to_collection_variable).collect(),
    }
}

fn to_collection_variable(var: &Variable) -> Variable {
    Variable::new(var.name.clone(), LiteralType::collection_of(var.ty.clone()))
}

/// 生成批量任务名: `<namespace>.mapper_<name>`
pub fn mapper_name(namespace: &str, name: &str) -> String {
    format!("{}.{}{}", namespace, MAPPER_PREFIX, name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_inputs_one_output() {
        let scalar = TypedInterface::default()
            .with_input("a", LiteralType::Integer)
            .with_input("b", LiteralType::String)
            .with_output("o0", LiteralType::Float);

        let batch = to_collection_interface(&scalar);

        assert_eq!(batch.inputs.len(), 2);
        assert_eq!(batch.outputs.len(), 1);
        assert_eq!(batch.input_names().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(batch.inputs[0].ty, LiteralType::collection_of(LiteralType::Integer));
        assert_eq!(batch.inputs[1].ty, LiteralType::collection_of(LiteralType::String));
        assert_eq!(batch.outputs[0].name, "o0");
        assert_eq!(batch.outputs[0].ty, LiteralType::collection_of(LiteralType::Float));
    }

    #[test]
    fn test_nested_collection_is_wrapped_again() {
        let scalar = TypedInterface::default()
            .with_input("xs", LiteralType::collection_of(LiteralType::Integer));
        let batch = to_collection_interface(&scalar);
        assert_eq!(batch.inputs[0].ty.to_string(), "List[List[int]]");
        assert!(batch.outputs.is_empty());
    }

    #[test]
    fn test_mapper_name() {
        assert_eq!(mapper_name("workflows.math", "double"), "workflows.math.mapper_double");
    }
}
