use super::utilities::{accessor, call, menu};
use crate::ast::{ExpressionNode, StatementNode};
use crate::convert::{ConvertContext, TreeNode};
use crate::prelude::*;

opcode_family! {
    pub enum SoundCode {
        Play => "sound_play",
        PlayUntilDone => "sound_playuntildone",
        StopAllSounds => "sound_stopallsounds",
        SetEffectTo => "sound_seteffectto",
        ChangeEffectBy => "sound_changeeffectby",
        ClearEffects => "sound_cleareffects",
        SetVolumeTo => "sound_setvolumeto",
        ChangeVolumeBy => "sound_changevolumeby",
    }
}

opcode_family! {
    pub enum SoundExpression {
        Volume => "sound_volume",
        SoundsMenu => "sound_sounds_menu",
    }
}

pub fn statements(
    ctx: &ConvertContext<'_>,
    node: &TreeNode<'_>,
    opcode: SoundCode,
) -> ConvResult<Vec<StatementNode>> {
    call(ctx, node, opcode.opcode())
}

pub fn expression(
    _ctx: &ConvertContext<'_>,
    node: &TreeNode<'_>,
    opcode: SoundExpression,
) -> ConvResult<ExpressionNode> {
    match opcode {
        SoundExpression::Volume => Ok(accessor(opcode.opcode())),
        SoundExpression::SoundsMenu => menu(node),
    }
}
