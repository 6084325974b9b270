use super::utilities::{accessor, call, call_expression, menu};
use crate::ast::{ExpressionNode, StatementNode};
use crate::convert::{ConvertContext, TreeNode};
use crate::prelude::*;

opcode_family! {
    pub enum SensingCode {
        AskAndWait => "sensing_askandwait",
        SetDragMode => "sensing_setdragmode",
        ResetTimer => "sensing_resettimer",
    }
}

opcode_family! {
    pub enum SensingExpression {
        TouchingObject => "sensing_touchingobject",
        TouchingColor => "sensing_touchingcolor",
        ColorIsTouchingColor => "sensing_coloristouchingcolor",
        DistanceTo => "sensing_distanceto",
        KeyPressed => "sensing_keypressed",
        Of => "sensing_of",
        Current => "sensing_current",
        Timer => "sensing_timer",
        MouseX => "sensing_mousex",
        MouseY => "sensing_mousey",
        MouseDown => "sensing_mousedown",
        Loudness => "sensing_loudness",
        Loud => "sensing_loud",
        Answer => "sensing_answer",
        Username => "sensing_username",
        UserId => "sensing_userid",
        DaysSince2000 => "sensing_dayssince2000",
        TouchingObjectMenu => "sensing_touchingobjectmenu",
        DistanceToMenu => "sensing_distancetomenu",
        KeyOptions => "sensing_keyoptions",
        OfObjectMenu => "sensing_of_object_menu",
    }
}

pub fn statements(
    ctx: &ConvertContext<'_>,
    node: &TreeNode<'_>,
    opcode: SensingCode,
) -> ConvResult<Vec<StatementNode>> {
    call(ctx, node, opcode.opcode())
}

pub fn expression(
    ctx: &ConvertContext<'_>,
    node: &TreeNode<'_>,
    opcode: SensingExpression,
) -> ConvResult<ExpressionNode> {
    match opcode {
        SensingExpression::TouchingObject
        | SensingExpression::TouchingColor
        | SensingExpression::ColorIsTouchingColor
        | SensingExpression::DistanceTo
        | SensingExpression::KeyPressed
        | SensingExpression::Of
        | SensingExpression::Current => call_expression(ctx, node, opcode.opcode()),
        SensingExpression::Timer
        | SensingExpression::MouseX
        | SensingExpression::MouseY
        | SensingExpression::MouseDown
        | SensingExpression::Loudness
        | SensingExpression::Loud
        | SensingExpression::Answer
        | SensingExpression::Username
        | SensingExpression::UserId
        | SensingExpression::DaysSince2000 => Ok(accessor(opcode.opcode())),
        SensingExpression::TouchingObjectMenu
        | SensingExpression::DistanceToMenu
        | SensingExpression::KeyOptions
        | SensingExpression::OfObjectMenu => menu(node),
    }
}
