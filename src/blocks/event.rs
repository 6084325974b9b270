use super::utilities::{call, menu};
use crate::ast::{ExpressionNode, StatementNode};
use crate::convert::{ConvertContext, TreeNode};
use crate::prelude::*;

opcode_family! {
    pub enum EventHat {
        WhenFlagClicked => "event_whenflagclicked",
        WhenKeyPressed => "event_whenkeypressed",
        WhenThisSpriteClicked => "event_whenthisspriteclicked",
        WhenStageClicked => "event_whenstageclicked",
        WhenTouchingObject => "event_whentouchingobject",
        WhenBackdropSwitchesTo => "event_whenbackdropswitchesto",
        WhenGreaterThan => "event_whengreaterthan",
        WhenBroadcastReceived => "event_whenbroadcastreceived",
    }
}

opcode_family! {
    pub enum EventCode {
        Broadcast => "event_broadcast",
        BroadcastAndWait => "event_broadcastandwait",
    }
}

opcode_family! {
    pub enum EventExpression {
        BroadcastMenu => "event_broadcast_menu",
        TouchingObjectMenu => "event_touchingobjectmenu",
    }
}

pub fn statements(
    ctx: &ConvertContext<'_>,
    node: &TreeNode<'_>,
    opcode: EventCode,
) -> ConvResult<Vec<StatementNode>> {
    match opcode {
        EventCode::Broadcast | EventCode::BroadcastAndWait => call(ctx, node, opcode.opcode()),
    }
}

pub fn expression(
    _ctx: &ConvertContext<'_>,
    node: &TreeNode<'_>,
    opcode: EventExpression,
) -> ConvResult<ExpressionNode> {
    match opcode {
        EventExpression::BroadcastMenu | EventExpression::TouchingObjectMenu => menu(node),
    }
}
