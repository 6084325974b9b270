//! Sorting opcodes into the position they take in a script.

use crate::blocks::control::{ControlCode, ControlExpression, ControlHat};
use crate::blocks::data::{DataCode, DataExpression};
use crate::blocks::event::{EventCode, EventExpression, EventHat};
use crate::blocks::extension::{ExtensionCode, ExtensionExpression, ExtensionHat};
use crate::blocks::literal::LiteralExpression;
use crate::blocks::looks::{LooksCode, LooksExpression};
use crate::blocks::motion::{MotionCode, MotionExpression};
use crate::blocks::operator::OperatorExpression;
use crate::blocks::procedures::{ProceduresCode, ProceduresExpression, DEFINITION};
use crate::blocks::sensing::{SensingCode, SensingExpression};
use crate::blocks::sound::{SoundCode, SoundExpression};
use crate::blocks::Opcode;
use crate::prelude::*;
use lazy_regex::{lazy_regex, Lazy};
use regex::Regex;

/// `<extension>_<category>_<name>`
static BRIDGE_REGEX: Lazy<Regex> =
    lazy_regex!(r#"^([A-Za-z0-9]+)_(hat|event|command|reporter|boolean|Boolean)_(\w+)$"#);

/// An opcode from an extension: either one we know, or a third-party opcode
/// which is passed through under its bridged name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Extension<T> {
    Known(T),
    /// `<extension>_<block>`, with the category token dropped
    Bridged(Box<str>),
}

impl<T: Opcode> Extension<T> {
    pub fn name(&self) -> &str {
        match self {
            Extension::Known(opcode) => opcode.opcode(),
            Extension::Bridged(bridged) => &**bridged,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HatBlock {
    Event(EventHat),
    Control(ControlHat),
    ProcedureDefinition,
    Extension(Extension<ExtensionHat>),
}

impl HatBlock {
    /// the event this hat listens for. Definitions aren't events, so have none.
    pub fn event(&self) -> Option<&str> {
        match self {
            HatBlock::Event(hat) => Some(hat.opcode()),
            HatBlock::Control(hat) => Some(hat.opcode()),
            HatBlock::ProcedureDefinition => None,
            HatBlock::Extension(hat) => Some(hat.name()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CodeBlock {
    Control(ControlCode),
    Data(DataCode),
    Event(EventCode),
    Looks(LooksCode),
    Motion(MotionCode),
    Procedures(ProceduresCode),
    Sensing(SensingCode),
    Sound(SoundCode),
    Extension(Extension<ExtensionCode>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExpressionBlock {
    Control(ControlExpression),
    Data(DataExpression),
    Event(EventExpression),
    Looks(LooksExpression),
    Motion(MotionExpression),
    Operator(OperatorExpression),
    Procedures(ProceduresExpression),
    Sensing(SensingExpression),
    Sound(SoundExpression),
    Literal(LiteralExpression),
    Extension(Extension<ExtensionExpression>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BlockKind {
    Hat(HatBlock),
    Code(CodeBlock),
    Expression(ExpressionBlock),
}

impl BlockKind {
    pub fn is_hat_block(&self) -> bool {
        matches!(self, BlockKind::Hat(_))
    }

    pub fn is_code_block(&self) -> bool {
        matches!(self, BlockKind::Code(_))
    }

    pub fn is_expression_block(&self) -> bool {
        matches!(self, BlockKind::Expression(_))
    }
}

fn bridge(opcode: &str) -> Option<BlockKind> {
    let captures = BRIDGE_REGEX.captures(opcode)?;
    let bridged = format!("{}_{}", &captures[1], &captures[3]).into_boxed_str();
    Some(match &captures[2] {
        "hat" | "event" => BlockKind::Hat(HatBlock::Extension(Extension::Bridged(bridged))),
        "command" => BlockKind::Code(CodeBlock::Extension(Extension::Bridged(bridged))),
        _ => BlockKind::Expression(ExpressionBlock::Extension(Extension::Bridged(bridged))),
    })
}

fn hat(opcode: &str) -> Option<HatBlock> {
    if opcode == DEFINITION {
        return Some(HatBlock::ProcedureDefinition);
    }
    EventHat::from_opcode(opcode)
        .map(HatBlock::Event)
        .or_else(|| ControlHat::from_opcode(opcode).map(HatBlock::Control))
        .or_else(|| {
            ExtensionHat::from_opcode(opcode).map(|hat| HatBlock::Extension(Extension::Known(hat)))
        })
}

fn code(opcode: &str) -> Option<CodeBlock> {
    ControlCode::from_opcode(opcode)
        .map(CodeBlock::Control)
        .or_else(|| DataCode::from_opcode(opcode).map(CodeBlock::Data))
        .or_else(|| EventCode::from_opcode(opcode).map(CodeBlock::Event))
        .or_else(|| LooksCode::from_opcode(opcode).map(CodeBlock::Looks))
        .or_else(|| MotionCode::from_opcode(opcode).map(CodeBlock::Motion))
        .or_else(|| ProceduresCode::from_opcode(opcode).map(CodeBlock::Procedures))
        .or_else(|| SensingCode::from_opcode(opcode).map(CodeBlock::Sensing))
        .or_else(|| SoundCode::from_opcode(opcode).map(CodeBlock::Sound))
        .or_else(|| {
            ExtensionCode::from_opcode(opcode)
                .map(|code| CodeBlock::Extension(Extension::Known(code)))
        })
}

fn expression(opcode: &str) -> Option<ExpressionBlock> {
    ControlExpression::from_opcode(opcode)
        .map(ExpressionBlock::Control)
        .or_else(|| DataExpression::from_opcode(opcode).map(ExpressionBlock::Data))
        .or_else(|| EventExpression::from_opcode(opcode).map(ExpressionBlock::Event))
        .or_else(|| LooksExpression::from_opcode(opcode).map(ExpressionBlock::Looks))
        .or_else(|| MotionExpression::from_opcode(opcode).map(ExpressionBlock::Motion))
        .or_else(|| OperatorExpression::from_opcode(opcode).map(ExpressionBlock::Operator))
        .or_else(|| ProceduresExpression::from_opcode(opcode).map(ExpressionBlock::Procedures))
        .or_else(|| SensingExpression::from_opcode(opcode).map(ExpressionBlock::Sensing))
        .or_else(|| SoundExpression::from_opcode(opcode).map(ExpressionBlock::Sound))
        .or_else(|| LiteralExpression::from_opcode(opcode).map(ExpressionBlock::Literal))
        .or_else(|| {
            ExtensionExpression::from_opcode(opcode)
                .map(|expr| ExpressionBlock::Extension(Extension::Known(expr)))
        })
}

pub fn classify(opcode: &str) -> ConvResult<BlockKind> {
    if let Some(hat) = hat(opcode) {
        return Ok(BlockKind::Hat(hat));
    }
    if let Some(code) = code(opcode) {
        return Ok(BlockKind::Code(code));
    }
    if let Some(expression) = expression(opcode) {
        return Ok(BlockKind::Expression(expression));
    }
    bridge(opcode).ok_or_else(|| make_conv_err!(UnknownOpcode, "unknown opcode {opcode}"))
}
