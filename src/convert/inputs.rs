//! Turning input slots and fields into expressions.

use super::{ConvertContext, TreeNode};
use crate::ast::{ExpressionNode, LiteralType, StatementNode};
use crate::blocks::{expression_from_block, statement_chain};
use crate::prelude::*;
use crate::sb3::{BlockArray, Field, Input, InputPayload, VarVal};
use itertools::Itertools;

/// Stands in for a slot that holds nothing we can read. An error instead when
/// inputs are strict.
fn unrecognised(
    ctx: &ConvertContext<'_>,
    node: &TreeNode<'_>,
    key: &str,
    what: &dyn fmt::Debug,
) -> ConvResult<ExpressionNode> {
    if ctx.flags.strict_inputs.is_on() {
        conv_bail!(
            MalformedInput,
            "input {key} of block {} ({}) holds {what:?}",
            node.id(),
            node.opcode()
        )
    }
    Ok(ExpressionNode::unknown())
}

pub fn literal_from_array(array: &BlockArray) -> ExpressionNode {
    match array {
        BlockArray::Number(value) => ExpressionNode::literal(LiteralType::Number, value.clone()),
        BlockArray::Color(value) => ExpressionNode::literal(LiteralType::Color, value.clone()),
        BlockArray::Text(value) => ExpressionNode::literal(LiteralType::String, value.clone()),
        BlockArray::Broadcast { name, .. }
        | BlockArray::Variable { name, .. }
        | BlockArray::List { name, .. } => ExpressionNode::variable(name.clone()),
    }
}

pub fn resolve(
    ctx: &ConvertContext<'_>,
    node: &TreeNode<'_>,
    key: &str,
    input: &Input,
) -> ConvResult<ExpressionNode> {
    match input.payload() {
        Some(InputPayload::Block(id)) => {
            let child = ctx.tree.child(node, id)?;
            expression_from_block(ctx, child)
        }
        Some(InputPayload::Array(array)) => Ok(literal_from_array(array)),
        Some(empty @ InputPayload::Empty) => unrecognised(ctx, node, key, empty),
        Some(InputPayload::Unrecognised(value)) => unrecognised(ctx, node, key, value),
        None => unrecognised(ctx, node, key, input),
    }
}

/// The expression in input `key`, or the unknown literal if there's no such input.
pub fn resolve_input(
    ctx: &ConvertContext<'_>,
    node: &TreeNode<'_>,
    key: &str,
) -> ConvResult<ExpressionNode> {
    match node.info().inputs.get(key) {
        Some(input) => resolve(ctx, node, key, input),
        None => unrecognised(ctx, node, key, &"nothing"),
    }
}

/// A plain field is a string literal. One that names a variable, list or
/// broadcast is a reference to it.
pub fn resolve_field(node: &TreeNode<'_>, key: &str, field: &Field) -> ConvResult<ExpressionNode> {
    match field {
        Field::Value(value) => Ok(ExpressionNode::literal(
            LiteralType::String,
            value.to_string(),
        )),
        Field::Reference { name, .. } => Ok(ExpressionNode::variable(name.to_string())),
        Field::Malformed(value) => conv_bail!(
            MalformedFieldShape,
            "field {key} of block {} ({}) is {value}",
            node.id(),
            node.opcode()
        ),
    }
}

fn get_field<'a>(node: &TreeNode<'a>, key: &str) -> ConvResult<&'a Field> {
    node.info().fields.get(key).ok_or_else(|| {
        make_conv_err!(
            MalformedFieldShape,
            "block {} ({}) is missing field {key}",
            node.id(),
            node.opcode()
        )
    })
}

pub fn field(node: &TreeNode<'_>, key: &str) -> ConvResult<ExpressionNode> {
    resolve_field(node, key, get_field(node, key)?)
}

/// the raw value of a field, whether or not it names something
pub fn field_value<'a>(node: &TreeNode<'a>, key: &str) -> ConvResult<&'a VarVal> {
    let field = get_field(node, key)?;
    field.value().ok_or_else(|| {
        make_conv_err!(
            MalformedFieldShape,
            "field {key} of block {} ({}) is malformed",
            node.id(),
            node.opcode()
        )
    })
}

/// Every input, sorted by key, then every field, sorted by name.
pub fn arguments(ctx: &ConvertContext<'_>, node: &TreeNode<'_>) -> ConvResult<Vec<ExpressionNode>> {
    let info = node.info();
    let inputs = info
        .inputs
        .iter()
        .sorted_by(|(a, _), (b, _)| a.cmp(b))
        .map(|(key, input)| resolve(ctx, node, key, input));
    let fields = info
        .fields
        .iter()
        .sorted_by(|(a, _), (b, _)| a.cmp(b))
        .map(|(key, field)| resolve_field(node, key, field));
    inputs.chain(fields).collect()
}

/// The statements nested in input `key`. An empty or absent substack is an
/// empty sequence.
pub fn substack(
    ctx: &ConvertContext<'_>,
    node: &TreeNode<'_>,
    key: &str,
) -> ConvResult<StatementNode> {
    match node.info().inputs.get(key).and_then(Input::payload) {
        Some(InputPayload::Block(id)) => {
            let first = ctx.tree.child(node, id)?;
            statement_chain(ctx, Some(first))
        }
        _ => Ok(StatementNode::empty()),
    }
}

/// The `CONDITION` input. Scratch leaves an unfilled boolean slot out of
/// `inputs` altogether, which reads as false; a slot that is there resolves
/// like any other input.
pub fn condition(ctx: &ConvertContext<'_>, node: &TreeNode<'_>) -> ConvResult<ExpressionNode> {
    match node.info().inputs.get("CONDITION") {
        Some(input) => resolve(ctx, node, "CONDITION", input),
        None => Ok(ExpressionNode::boolean(false)),
    }
}
