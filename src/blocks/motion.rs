use super::utilities::{accessor, call, menu};
use crate::ast::{ExpressionNode, StatementNode};
use crate::convert::{ConvertContext, TreeNode};
use crate::prelude::*;

opcode_family! {
    pub enum MotionCode {
        MoveSteps => "motion_movesteps",
        GoToXY => "motion_gotoxy",
        GoTo => "motion_goto",
        TurnRight => "motion_turnright",
        TurnLeft => "motion_turnleft",
        PointInDirection => "motion_pointindirection",
        PointTowards => "motion_pointtowards",
        GlideSecsToXY => "motion_glidesecstoxy",
        GlideTo => "motion_glideto",
        IfOnEdgeBounce => "motion_ifonedgebounce",
        SetRotationStyle => "motion_setrotationstyle",
        ChangeXBy => "motion_changexby",
        SetX => "motion_setx",
        ChangeYBy => "motion_changeyby",
        SetY => "motion_sety",
        ScrollRight => "motion_scroll_right",
        ScrollUp => "motion_scroll_up",
        AlignScene => "motion_align_scene",
    }
}

opcode_family! {
    pub enum MotionExpression {
        XPosition => "motion_xposition",
        YPosition => "motion_yposition",
        Direction => "motion_direction",
        XScroll => "motion_xscroll",
        YScroll => "motion_yscroll",
        GoToMenu => "motion_goto_menu",
        GlideToMenu => "motion_glideto_menu",
        PointTowardsMenu => "motion_pointtowards_menu",
    }
}

pub fn statements(
    ctx: &ConvertContext<'_>,
    node: &TreeNode<'_>,
    opcode: MotionCode,
) -> ConvResult<Vec<StatementNode>> {
    call(ctx, node, opcode.opcode())
}

pub fn expression(
    _ctx: &ConvertContext<'_>,
    node: &TreeNode<'_>,
    opcode: MotionExpression,
) -> ConvResult<ExpressionNode> {
    match opcode {
        MotionExpression::XPosition
        | MotionExpression::YPosition
        | MotionExpression::Direction
        | MotionExpression::XScroll
        | MotionExpression::YScroll => Ok(accessor(opcode.opcode())),
        MotionExpression::GoToMenu
        | MotionExpression::GlideToMenu
        | MotionExpression::PointTowardsMenu => menu(node),
    }
}
