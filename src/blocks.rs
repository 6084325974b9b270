//! Per-family block converters, and dispatch to them by classified opcode.

#[macro_use]
mod utilities;
pub use utilities::Opcode;

pub mod control;
pub mod data;
pub mod event;
pub mod extension;
pub mod literal;
pub mod looks;
pub mod motion;
pub mod operator;
pub mod procedures;
pub mod sensing;
pub mod sound;

use crate::ast::{EventCondition, EventListenerNode, ExpressionNode, StatementNode};
use crate::convert::classify::{BlockKind, CodeBlock, ExpressionBlock};
use crate::convert::inputs::arguments;
use crate::convert::{ConvertContext, TreeNode};
use crate::prelude::*;
use itertools::Itertools;

/// Converts a block in statement position. Most blocks become one statement,
/// but some (editor-only blocks) become none.
pub fn statements_from_block(
    ctx: &ConvertContext<'_>,
    node: &TreeNode<'_>,
) -> ConvResult<Vec<StatementNode>> {
    let BlockKind::Code(code) = node.kind() else {
        conv_bail!(
            UnknownOpcode,
            "{} ({}) can't be used as a statement",
            node.opcode(),
            node.id()
        )
    };
    match code {
        CodeBlock::Control(opcode) => control::statements(ctx, node, *opcode),
        CodeBlock::Data(opcode) => data::statements(ctx, node, *opcode),
        CodeBlock::Event(opcode) => event::statements(ctx, node, *opcode),
        CodeBlock::Looks(opcode) => looks::statements(ctx, node, *opcode),
        CodeBlock::Motion(opcode) => motion::statements(ctx, node, *opcode),
        CodeBlock::Procedures(opcode) => procedures::statements(ctx, node, *opcode),
        CodeBlock::Sensing(opcode) => sensing::statements(ctx, node, *opcode),
        CodeBlock::Sound(opcode) => sound::statements(ctx, node, *opcode),
        CodeBlock::Extension(opcode) => extension::statements(ctx, node, opcode),
    }
}

pub fn expression_from_block(
    ctx: &ConvertContext<'_>,
    node: &TreeNode<'_>,
) -> ConvResult<ExpressionNode> {
    let BlockKind::Expression(expression) = node.kind() else {
        conv_bail!(
            UnknownOpcode,
            "{} ({}) can't be used as an expression",
            node.opcode(),
            node.id()
        )
    };
    match expression {
        ExpressionBlock::Control(opcode) => control::expression(ctx, node, *opcode),
        ExpressionBlock::Data(opcode) => data::expression(ctx, node, *opcode),
        ExpressionBlock::Event(opcode) => event::expression(ctx, node, *opcode),
        ExpressionBlock::Looks(opcode) => looks::expression(ctx, node, *opcode),
        ExpressionBlock::Motion(opcode) => motion::expression(ctx, node, *opcode),
        ExpressionBlock::Operator(opcode) => operator::expression(ctx, node, *opcode),
        ExpressionBlock::Procedures(opcode) => procedures::expression(ctx, node, *opcode),
        ExpressionBlock::Sensing(opcode) => sensing::expression(ctx, node, *opcode),
        ExpressionBlock::Sound(opcode) => sound::expression(ctx, node, *opcode),
        ExpressionBlock::Literal(opcode) => literal::expression(ctx, node, *opcode),
        ExpressionBlock::Extension(opcode) => extension::expression(ctx, node, opcode),
    }
}

/// `first` and the blocks after it, as one sequence. No first block is an
/// empty sequence.
pub fn statement_chain(
    ctx: &ConvertContext<'_>,
    first: Option<&TreeNode<'_>>,
) -> ConvResult<StatementNode> {
    let Some(first) = first else {
        return Ok(StatementNode::empty());
    };
    let statements = ctx
        .tree
        .chain(first)?
        .into_iter()
        .map(|node| statements_from_block(ctx, node))
        .flatten_ok()
        .collect::<ConvResult<Vec<_>>>()?;
    Ok(StatementNode::sequence(statements))
}

pub fn event_listener(
    ctx: &ConvertContext<'_>,
    hat: &TreeNode<'_>,
) -> ConvResult<EventListenerNode> {
    let BlockKind::Hat(hat_block) = hat.kind() else {
        conv_bug!("{} ({}) isn't a hat block", hat.opcode(), hat.id())
    };
    let Some(event) = hat_block.event() else {
        conv_bug!("procedure definition {} treated as an event listener", hat.id())
    };
    Ok(EventListenerNode {
        condition: EventCondition {
            event: event.into(),
            parameters: arguments(ctx, hat)?,
        },
        action: statement_chain(ctx, ctx.tree.next(hat))?,
    })
}
