//! Fixtures for converter tests: block maps written as `json!` literals.

use crate::ast::{ActorNode, ExpressionNode, StatementNode};
use crate::convert::actor_from_target;
use crate::flags::ConvertFlags;
use crate::prelude::*;
use crate::sb3::Target;
use serde_json::{json, Value};

pub fn target(blocks: Value) -> Target {
    serde_json::from_value(json!({
        "isStage": false,
        "name": "Sprite1",
        "blocks": blocks
    }))
    .unwrap()
}

pub fn actor(blocks: Value) -> ConvResult<ActorNode> {
    actor_with_flags(blocks, &ConvertFlags::new())
}

pub fn actor_with_flags(blocks: Value, flags: &ConvertFlags) -> ConvResult<ActorNode> {
    actor_from_target(&target(blocks), flags)
}

/// Puts a green flag hat in front of the first block of `blocks`.
pub fn flag_script(blocks: Value) -> Value {
    let Value::Object(blocks) = blocks else {
        panic!("expected a block map");
    };
    let first = blocks.keys().next().cloned();
    let mut script = serde_json::Map::new();
    script.insert(
        "flag".into(),
        json!({
            "opcode": "event_whenflagclicked",
            "topLevel": true,
            "next": first
        }),
    );
    for (id, mut block) in blocks {
        if Some(&id) == first.as_ref() && block.get("parent").is_none() {
            block["parent"] = json!("flag");
        }
        script.insert(id, block);
    }
    Value::Object(script)
}

/// the action of the first event listener
pub fn listener_action(blocks: Value) -> ConvResult<StatementNode> {
    let mut actor = actor(blocks)?;
    assert!(!actor.event_listeners.is_empty(), "no event listeners");
    Ok(actor.event_listeners.swap_remove(0).action)
}

/// the only statement a single block converts to
pub fn single_statement(block: Value) -> ConvResult<StatementNode> {
    match listener_action(flag_script(json!({ "block": block })))? {
        StatementNode::Sequence { mut statements } if statements.len() == 1 => {
            Ok(statements.remove(0))
        }
        other => panic!("expected exactly one statement, got {other:?}"),
    }
}

/// the expression a single block converts to, read back out of a `looks_say`
pub fn expression_of(mut block: Value) -> ConvResult<ExpressionNode> {
    block["parent"] = json!("say");
    let action = listener_action(flag_script(json!({
        "say": {"opcode": "looks_say", "inputs": {"MESSAGE": [3, "e", [10, ""]]}},
        "e": block
    })))?;
    match action {
        StatementNode::Sequence { statements } => match statements.as_slice() {
            [StatementNode::FunctionCall { arguments, .. }] if arguments.len() == 1 => {
                Ok(arguments[0].clone())
            }
            other => panic!("expected a single say block, got {other:?}"),
        },
        other => panic!("expected a sequence, got {other:?}"),
    }
}
