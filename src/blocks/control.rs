use super::operator::OperatorExpression;
use super::utilities::{accessor, call, menu};
use crate::ast::{ExpressionNode, StatementNode};
use crate::convert::inputs::{condition, resolve_input, substack};
use crate::convert::{ConvertContext, TreeNode};
use crate::prelude::*;

/// the synthetic call marking a loop that runs a fixed number of times
pub const LOOP_COUNT_SMALLER_THAN: &str = "loop_count_smaller_than";

opcode_family! {
    pub enum ControlHat {
        StartAsClone => "control_start_as_clone",
    }
}

opcode_family! {
    pub enum ControlCode {
        Forever => "control_forever",
        Repeat => "control_repeat",
        RepeatUntil => "control_repeat_until",
        While => "control_while",
        If => "control_if",
        IfElse => "control_if_else",
        AllAtOnce => "control_all_at_once",
        Wait => "control_wait",
        WaitUntil => "control_wait_until",
        Stop => "control_stop",
        CreateCloneOf => "control_create_clone_of",
        DeleteThisClone => "control_delete_this_clone",
        IncrCounter => "control_incr_counter",
        ClearCounter => "control_clear_counter",
    }
}

opcode_family! {
    pub enum ControlExpression {
        CreateCloneOfMenu => "control_create_clone_of_menu",
        GetCounter => "control_get_counter",
    }
}

pub fn statements(
    ctx: &ConvertContext<'_>,
    node: &TreeNode<'_>,
    opcode: ControlCode,
) -> ConvResult<Vec<StatementNode>> {
    let body = || substack(ctx, node, "SUBSTACK");
    Ok(vec![match opcode {
        ControlCode::Forever => StatementNode::looped(ExpressionNode::boolean(true), body()?),
        ControlCode::Repeat => StatementNode::looped(
            ExpressionNode::call(
                LOOP_COUNT_SMALLER_THAN,
                vec![resolve_input(ctx, node, "TIMES")?],
            ),
            body()?,
        ),
        // scratch checks the condition before each iteration, so this is a
        // while loop over the negated condition
        ControlCode::RepeatUntil => StatementNode::looped(
            ExpressionNode::operator(
                OperatorExpression::Not.opcode(),
                vec![condition(ctx, node)?],
            ),
            body()?,
        ),
        ControlCode::While => StatementNode::looped(condition(ctx, node)?, body()?),
        ControlCode::If => {
            StatementNode::condition(condition(ctx, node)?, body()?, StatementNode::empty())
        }
        ControlCode::IfElse => StatementNode::condition(
            condition(ctx, node)?,
            body()?,
            substack(ctx, node, "SUBSTACK2")?,
        ),
        ControlCode::AllAtOnce => body()?,
        ControlCode::Wait
        | ControlCode::WaitUntil
        | ControlCode::Stop
        | ControlCode::CreateCloneOf
        | ControlCode::DeleteThisClone
        | ControlCode::IncrCounter
        | ControlCode::ClearCounter => return call(ctx, node, opcode.opcode()),
    }])
}

pub fn expression(
    _ctx: &ConvertContext<'_>,
    node: &TreeNode<'_>,
    opcode: ControlExpression,
) -> ConvResult<ExpressionNode> {
    match opcode {
        ControlExpression::CreateCloneOfMenu => menu(node),
        ControlExpression::GetCounter => Ok(accessor(opcode.opcode())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::LiteralType;
    use crate::test_utils::{flag_script, listener_action, single_statement};
    use serde_json::json;

    fn number(value: &str) -> ExpressionNode {
        ExpressionNode::literal(LiteralType::Number, value)
    }

    fn show() -> StatementNode {
        StatementNode::call("looks_show", vec![])
    }

    #[test]
    fn forever_loops_on_true() {
        let action = listener_action(flag_script(json!({
            "loop": {"opcode": "control_forever", "inputs": {"SUBSTACK": [2, "body"]}},
            "body": {"opcode": "looks_show", "parent": "loop"}
        })))
        .unwrap();
        assert_eq!(
            action,
            StatementNode::sequence(vec![StatementNode::looped(
                ExpressionNode::boolean(true),
                StatementNode::sequence(vec![show()]),
            )])
        );
    }

    #[test]
    fn repeat_is_a_bounded_loop_call() {
        let statement = single_statement(json!({
            "opcode": "control_repeat",
            "inputs": {"TIMES": [1, [6, "10"]]}
        }))
        .unwrap();
        assert_eq!(
            statement,
            StatementNode::looped(
                ExpressionNode::call(LOOP_COUNT_SMALLER_THAN, vec![number("10")]),
                StatementNode::empty(),
            )
        );
    }

    #[test]
    fn repeat_until_negates_its_condition() {
        let action = listener_action(flag_script(json!({
            "loop": {"opcode": "control_repeat_until", "inputs": {"CONDITION": [2, "cond"]}},
            "cond": {"opcode": "sensing_mousedown", "parent": "loop"}
        })))
        .unwrap();
        assert_eq!(
            action,
            StatementNode::sequence(vec![StatementNode::looped(
                ExpressionNode::operator(
                    "operator_not",
                    vec![ExpressionNode::variable("sensing_mousedown")]
                ),
                StatementNode::empty(),
            )])
        );
    }

    #[test]
    fn if_without_else_has_an_empty_false_branch() {
        let action = listener_action(flag_script(json!({
            "if": {"opcode": "control_if", "inputs": {
                "CONDITION": [2, "cond"],
                "SUBSTACK": [2, "body"]
            }},
            "cond": {"opcode": "sensing_mousedown", "parent": "if"},
            "body": {"opcode": "looks_show", "parent": "if"}
        })))
        .unwrap();
        assert_eq!(
            action,
            StatementNode::sequence(vec![StatementNode::condition(
                ExpressionNode::variable("sensing_mousedown"),
                StatementNode::sequence(vec![show()]),
                StatementNode::empty(),
            )])
        );
    }

    #[test]
    fn if_else_takes_both_substacks() {
        let action = listener_action(flag_script(json!({
            "if": {"opcode": "control_if_else", "inputs": {
                "SUBSTACK": [2, "then"],
                "SUBSTACK2": [2, "else"]
            }},
            "then": {"opcode": "looks_show", "parent": "if"},
            "else": {"opcode": "looks_hide", "parent": "if"}
        })))
        .unwrap();
        assert_eq!(
            action,
            StatementNode::sequence(vec![StatementNode::condition(
                ExpressionNode::boolean(false),
                StatementNode::sequence(vec![show()]),
                StatementNode::sequence(vec![StatementNode::call("looks_hide", vec![])]),
            )])
        );
    }

    #[test]
    fn stop_passes_its_option_as_a_literal() {
        let statement = single_statement(json!({
            "opcode": "control_stop",
            "fields": {"STOP_OPTION": ["all", null]},
            "mutation": {"tagName": "mutation", "children": [], "hasnext": "false"}
        }))
        .unwrap();
        assert_eq!(
            statement,
            StatementNode::call(
                "control_stop",
                vec![ExpressionNode::literal(LiteralType::String, "all")]
            )
        );
    }

    #[test]
    fn clone_menu_is_a_literal_argument() {
        let action = listener_action(flag_script(json!({
            "clone": {"opcode": "control_create_clone_of", "inputs": {"CLONE_OPTION": [1, "menu"]}},
            "menu": {
                "opcode": "control_create_clone_of_menu",
                "parent": "clone",
                "shadow": true,
                "fields": {"CLONE_OPTION": ["_myself_", null]}
            }
        })))
        .unwrap();
        assert_eq!(
            action,
            StatementNode::sequence(vec![StatementNode::call(
                "control_create_clone_of",
                vec![ExpressionNode::literal(LiteralType::String, "_myself_")]
            )])
        );
    }

    #[test]
    fn nesting_mirrors_the_source_graph() {
        let action = listener_action(flag_script(json!({
            "outer": {
                "opcode": "control_repeat",
                "inputs": {"TIMES": [1, [6, "3"]], "SUBSTACK": [2, "if"]},
                "next": "after"
            },
            "if": {
                "opcode": "control_if",
                "parent": "outer",
                "inputs": {"CONDITION": [2, "cond"], "SUBSTACK": [2, "inner"]},
                "next": "hide"
            },
            "cond": {"opcode": "sensing_mousedown", "parent": "if"},
            "inner": {"opcode": "control_forever", "parent": "if", "inputs": {"SUBSTACK": [2, "move"]}},
            "move": {"opcode": "motion_movesteps", "parent": "inner", "inputs": {"STEPS": [1, [4, "10"]]}},
            "hide": {"opcode": "looks_hide", "parent": "if"},
            "after": {"opcode": "looks_show", "parent": "outer"}
        })))
        .unwrap();
        let expected = StatementNode::sequence(vec![
            StatementNode::looped(
                ExpressionNode::call(LOOP_COUNT_SMALLER_THAN, vec![number("3")]),
                StatementNode::sequence(vec![
                    StatementNode::condition(
                        ExpressionNode::variable("sensing_mousedown"),
                        StatementNode::sequence(vec![StatementNode::looped(
                            ExpressionNode::boolean(true),
                            StatementNode::sequence(vec![StatementNode::call(
                                "motion_movesteps",
                                vec![number("10")],
                            )]),
                        )]),
                        StatementNode::empty(),
                    ),
                    StatementNode::call("looks_hide", vec![]),
                ]),
            ),
            show(),
        ]);
        assert_eq!(action, expected);
    }

    #[test]
    fn all_at_once_inlines_its_body_as_a_sequence() {
        let action = listener_action(flag_script(json!({
            "warp": {"opcode": "control_all_at_once", "inputs": {"SUBSTACK": [2, "body"]}},
            "body": {"opcode": "looks_show", "parent": "warp"}
        })))
        .unwrap();
        assert_eq!(
            action,
            StatementNode::sequence(vec![StatementNode::sequence(vec![show()])])
        );
    }
}
