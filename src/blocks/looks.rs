use super::utilities::{accessor, call, call_expression, menu};
use crate::ast::{ExpressionNode, StatementNode};
use crate::convert::{ConvertContext, TreeNode};
use crate::prelude::*;

opcode_family! {
    pub enum LooksCode {
        Say => "looks_say",
        SayForSecs => "looks_sayforsecs",
        Think => "looks_think",
        ThinkForSecs => "looks_thinkforsecs",
        Show => "looks_show",
        Hide => "looks_hide",
        HideAllSprites => "looks_hideallsprites",
        SwitchCostumeTo => "looks_switchcostumeto",
        SwitchBackdropTo => "looks_switchbackdropto",
        SwitchBackdropToAndWait => "looks_switchbackdroptoandwait",
        NextCostume => "looks_nextcostume",
        NextBackdrop => "looks_nextbackdrop",
        ChangeEffectBy => "looks_changeeffectby",
        SetEffectTo => "looks_seteffectto",
        ClearGraphicEffects => "looks_cleargraphiceffects",
        ChangeSizeBy => "looks_changesizeby",
        SetSizeTo => "looks_setsizeto",
        ChangeStretchBy => "looks_changestretchby",
        SetStretchTo => "looks_setstretchto",
        GoToFrontBack => "looks_gotofrontback",
        GoForwardBackwardLayers => "looks_goforwardbackwardlayers",
    }
}

opcode_family! {
    pub enum LooksExpression {
        Size => "looks_size",
        CostumeNumberName => "looks_costumenumbername",
        BackdropNumberName => "looks_backdropnumbername",
        Costume => "looks_costume",
        Backdrops => "looks_backdrops",
    }
}

pub fn statements(
    ctx: &ConvertContext<'_>,
    node: &TreeNode<'_>,
    opcode: LooksCode,
) -> ConvResult<Vec<StatementNode>> {
    call(ctx, node, opcode.opcode())
}

pub fn expression(
    ctx: &ConvertContext<'_>,
    node: &TreeNode<'_>,
    opcode: LooksExpression,
) -> ConvResult<ExpressionNode> {
    match opcode {
        LooksExpression::Size => Ok(accessor(opcode.opcode())),
        LooksExpression::CostumeNumberName | LooksExpression::BackdropNumberName => {
            call_expression(ctx, node, opcode.opcode())
        }
        LooksExpression::Costume | LooksExpression::Backdrops => menu(node),
    }
}
