use super::utilities::operator;
use crate::ast::ExpressionNode;
use crate::convert::{ConvertContext, TreeNode};
use crate::prelude::*;

opcode_family! {
    pub enum OperatorExpression {
        Add => "operator_add",
        Subtract => "operator_subtract",
        Multiply => "operator_multiply",
        Divide => "operator_divide",
        Lt => "operator_lt",
        Equals => "operator_equals",
        Gt => "operator_gt",
        And => "operator_and",
        Or => "operator_or",
        Not => "operator_not",
        Random => "operator_random",
        Join => "operator_join",
        LetterOf => "operator_letter_of",
        Length => "operator_length",
        Contains => "operator_contains",
        Mod => "operator_mod",
        Round => "operator_round",
        MathOp => "operator_mathop",
    }
}

pub fn expression(
    ctx: &ConvertContext<'_>,
    node: &TreeNode<'_>,
    opcode: OperatorExpression,
) -> ConvResult<ExpressionNode> {
    operator(ctx, node, opcode.opcode())
}
