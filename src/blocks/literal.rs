//! Shadow blocks that only hold a typed value. Scratch normally compresses
//! these into `[tag, value]` input arrays, but they survive as real blocks when
//! a project was saved by an older editor or a third-party tool.

use crate::ast::{ExpressionNode, LiteralType};
use crate::convert::inputs::field_value;
use crate::convert::{ConvertContext, TreeNode};
use crate::prelude::*;

opcode_family! {
    pub enum LiteralExpression {
        Number => "math_number",
        PositiveNumber => "math_positive_number",
        WholeNumber => "math_whole_number",
        Integer => "math_integer",
        Angle => "math_angle",
        ColourPicker => "colour_picker",
        Text => "text",
        Note => "note",
    }
}

pub fn expression(
    _ctx: &ConvertContext<'_>,
    node: &TreeNode<'_>,
    opcode: LiteralExpression,
) -> ConvResult<ExpressionNode> {
    let (key, literal_type) = match opcode {
        LiteralExpression::Number
        | LiteralExpression::PositiveNumber
        | LiteralExpression::WholeNumber
        | LiteralExpression::Integer
        | LiteralExpression::Angle => ("NUM", LiteralType::Number),
        LiteralExpression::ColourPicker => ("COLOUR", LiteralType::Color),
        LiteralExpression::Text => ("TEXT", LiteralType::String),
        LiteralExpression::Note => ("NOTE", LiteralType::Number),
    };
    Ok(ExpressionNode::literal(
        literal_type,
        field_value(node, key)?.to_string(),
    ))
}
