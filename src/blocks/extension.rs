//! Blocks from the built-in scratch extensions, plus the bridge for
//! third-party extension opcodes shaped `<extension>_<category>_<name>`.

use super::utilities::{accessor, call, call_expression, menu};
use crate::ast::{ExpressionNode, StatementNode};
use crate::convert::classify::Extension;
use crate::convert::{ConvertContext, TreeNode};
use crate::prelude::*;

opcode_family! {
    pub enum ExtensionHat {
        MakeyKeyPressed => "makeymakey_whenMakeyKeyPressed",
        MakeyCodePressed => "makeymakey_whenCodePressed",
        VideoMotionGreaterThan => "videoSensing_whenMotionGreaterThan",
    }
}

opcode_family! {
    pub enum ExtensionCode {
        PenClear => "pen_clear",
        PenStamp => "pen_stamp",
        PenDown => "pen_penDown",
        PenUp => "pen_penUp",
        PenSetColorTo => "pen_setPenColorToColor",
        PenChangeColorParamBy => "pen_changePenColorParamBy",
        PenSetColorParamTo => "pen_setPenColorParamTo",
        PenChangeSizeBy => "pen_changePenSizeBy",
        PenSetSizeTo => "pen_setPenSizeTo",
        PenSetShadeTo => "pen_setPenShadeToNumber",
        PenChangeShadeBy => "pen_changePenShadeBy",
        PenSetHueTo => "pen_setPenHueToNumber",
        PenChangeHueBy => "pen_changePenHueBy",
        MusicPlayDrum => "music_playDrumForBeats",
        MusicRest => "music_restForBeats",
        MusicPlayNote => "music_playNoteForBeats",
        MusicSetInstrument => "music_setInstrument",
        MusicSetTempo => "music_setTempo",
        MusicChangeTempo => "music_changeTempo",
        VideoToggle => "videoSensing_videoToggle",
        VideoSetTransparency => "videoSensing_setVideoTransparency",
        SpeakAndWait => "text2speech_speakAndWait",
        SetVoice => "text2speech_setVoice",
        SetLanguage => "text2speech_setLanguage",
    }
}

opcode_family! {
    pub enum ExtensionExpression {
        PenColorParamMenu => "pen_menu_colorParam",
        MusicGetTempo => "music_getTempo",
        MusicDrumMenu => "music_menu_DRUM",
        MusicInstrumentMenu => "music_menu_INSTRUMENT",
        VideoAttributeMenu => "videoSensing_menu_ATTRIBUTE",
        VideoSubjectMenu => "videoSensing_menu_SUBJECT",
        VideoStateMenu => "videoSensing_menu_VIDEO_STATE",
        VideoOn => "videoSensing_videoOn",
        VoicesMenu => "text2speech_menu_voices",
        LanguagesMenu => "text2speech_menu_languages",
        MakeyKeyMenu => "makeymakey_menu_KEY",
        MakeySequenceMenu => "makeymakey_menu_SEQUENCE",
        Translate => "translate_getTranslate",
        ViewerLanguage => "translate_getViewerLanguage",
        TranslateLanguagesMenu => "translate_menu_languages",
    }
}

pub fn statements(
    ctx: &ConvertContext<'_>,
    node: &TreeNode<'_>,
    opcode: &Extension<ExtensionCode>,
) -> ConvResult<Vec<StatementNode>> {
    let Extension::Known(known) = opcode else {
        return call(ctx, node, opcode.name());
    };
    match known {
        // the converted program has no camera
        ExtensionCode::VideoToggle | ExtensionCode::VideoSetTransparency => Ok(vec![]),
        _ => call(ctx, node, known.opcode()),
    }
}

pub fn expression(
    ctx: &ConvertContext<'_>,
    node: &TreeNode<'_>,
    opcode: &Extension<ExtensionExpression>,
) -> ConvResult<ExpressionNode> {
    let Extension::Known(known) = opcode else {
        return call_expression(ctx, node, opcode.name());
    };
    match known {
        ExtensionExpression::MusicGetTempo | ExtensionExpression::ViewerLanguage => {
            Ok(accessor(known.opcode()))
        }
        ExtensionExpression::VideoOn | ExtensionExpression::Translate => {
            call_expression(ctx, node, known.opcode())
        }
        ExtensionExpression::PenColorParamMenu
        | ExtensionExpression::MusicDrumMenu
        | ExtensionExpression::MusicInstrumentMenu
        | ExtensionExpression::VideoAttributeMenu
        | ExtensionExpression::VideoSubjectMenu
        | ExtensionExpression::VideoStateMenu
        | ExtensionExpression::VoicesMenu
        | ExtensionExpression::LanguagesMenu
        | ExtensionExpression::MakeyKeyMenu
        | ExtensionExpression::MakeySequenceMenu
        | ExtensionExpression::TranslateLanguagesMenu => menu(node),
    }
}
