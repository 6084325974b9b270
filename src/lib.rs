//! Converts scratch projects into a language-agnostic program tree: one actor
//! per sprite, holding its event listeners and custom block declarations.

#![recursion_limit = "256"]

#[macro_use]
mod error;

pub mod ast;
#[macro_use]
pub mod blocks;
pub mod cli;
pub mod convert;
pub mod flags;
pub mod sb3;

#[cfg(test)]
mod test_utils;

/// commonly used types, re-exported for convenience
pub mod prelude {
    pub use crate::{ConvResult, ConvertError, ConvertErrorKind};
    pub use core::fmt;
    pub use indexmap::IndexMap;
    pub use std::collections::{BTreeMap, BTreeSet};
}

pub use ast::GeneralAst;
pub use convert::{actor_from_target, general_ast_from_project};
pub use error::{ConvResult, ConvertError, ConvertErrorKind};
pub use flags::{ConvertFlags, Switch};
pub use sb3::Sb3Project;

/// Parses a `project.json` and converts every target in it.
pub fn sb3_to_general_ast(json: &str, flags: &ConvertFlags) -> ConvResult<GeneralAst> {
    let project = Sb3Project::try_from(json)?;
    general_ast_from_project(&project, flags)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{
        ActorNode, EventCondition, EventListenerNode, ExpressionNode, FunctionDeclarationNode,
        LiteralType, StatementNode,
    };
    use indoc::indoc;
    use serde_json::json;

    const PROJECT: &str = indoc! {r#"
        {
          "targets": [
            {
              "isStage": true,
              "name": "Stage",
              "variables": {"v1": ["score", 0]},
              "blocks": {}
            },
            {
              "isStage": false,
              "name": "Sprite1",
              "blocks": {
                "__start__": {
                  "opcode": "event_whenflagclicked",
                  "next": "set", "parent": null, "inputs": {}, "fields": {},
                  "shadow": false, "topLevel": true, "x": 0, "y": 0
                },
                "set": {
                  "opcode": "data_setvariableto",
                  "next": "loop", "parent": "__start__", "inputs": {"VALUE": [1, [10, "0"]]},
                  "fields": {"VARIABLE": ["score", "v1"]}, "shadow": false, "topLevel": false
                },
                "loop": {
                  "opcode": "control_repeat",
                  "next": null, "parent": "set",
                  "inputs": {"TIMES": [1, [6, "10"]], "SUBSTACK": [2, "change"]},
                  "fields": {}, "shadow": false, "topLevel": false
                },
                "change": {
                  "opcode": "data_changevariableby",
                  "next": "greet", "parent": "loop", "inputs": {"VALUE": [1, [4, "1"]]},
                  "fields": {"VARIABLE": ["score", "v1"]}, "shadow": false, "topLevel": false
                },
                "greet": {
                  "opcode": "procedures_call",
                  "next": null, "parent": "change",
                  "inputs": {"arg1": [3, [12, "score", "v1"], [10, ""]]},
                  "fields": {}, "shadow": false, "topLevel": false,
                  "mutation": {"tagName": "mutation", "children": [], "proccode": "greet %s",
                               "argumentids": "[\"arg1\"]", "warp": "false"}
                },
                "def": {
                  "opcode": "procedures_definition",
                  "next": "say", "parent": null, "inputs": {"custom_block": [1, "proto"]},
                  "fields": {}, "shadow": false, "topLevel": true
                },
                "proto": {
                  "opcode": "procedures_prototype",
                  "next": null, "parent": "def", "inputs": {"arg1": [1, "reporter"]},
                  "fields": {}, "shadow": true, "topLevel": false,
                  "mutation": {"tagName": "mutation", "children": [], "proccode": "greet %s",
                               "argumentids": "[\"arg1\"]", "argumentnames": "[\"who\"]",
                               "argumentdefaults": "[\"\"]", "warp": "false"}
                },
                "reporter": {
                  "opcode": "argument_reporter_string_number",
                  "next": null, "parent": "proto", "inputs": {},
                  "fields": {"VALUE": ["who", null]}, "shadow": true, "topLevel": false
                },
                "say": {
                  "opcode": "looks_say",
                  "next": null, "parent": "def", "inputs": {"MESSAGE": [3, "who", [10, "Hello!"]]},
                  "fields": {}, "shadow": false, "topLevel": false
                },
                "who": {
                  "opcode": "argument_reporter_string_number",
                  "next": null, "parent": "say", "inputs": {},
                  "fields": {"VALUE": ["who", null]}, "shadow": false, "topLevel": false
                }
              }
            }
          ],
          "meta": {"semver": "3.0.0", "vm": "0.2.0"}
        }
    "#};

    fn expected() -> GeneralAst {
        let score = || ExpressionNode::variable("score");
        vec![
            ActorNode::default(),
            ActorNode {
                event_listeners: vec![EventListenerNode {
                    condition: EventCondition {
                        event: "event_whenflagclicked".into(),
                        parameters: vec![],
                    },
                    action: StatementNode::sequence(vec![
                        StatementNode::call(
                            "data_setvariableto",
                            vec![ExpressionNode::literal(LiteralType::String, "0"), score()],
                        ),
                        StatementNode::looped(
                            ExpressionNode::call(
                                "loop_count_smaller_than",
                                vec![ExpressionNode::literal(LiteralType::Number, "10")],
                            ),
                            StatementNode::sequence(vec![
                                StatementNode::call(
                                    "data_changevariableby",
                                    vec![ExpressionNode::literal(LiteralType::Number, "1"), score()],
                                ),
                                StatementNode::call("greet %s", vec![score()]),
                            ]),
                        ),
                    ]),
                }],
                function_declarations: vec![FunctionDeclarationNode {
                    name: "greet %s".into(),
                    parameter_names: vec!["who".into()],
                    body: Box::new(StatementNode::sequence(vec![StatementNode::call(
                        "looks_say",
                        vec![ExpressionNode::variable("who")],
                    )])),
                }],
            },
        ]
    }

    #[test]
    fn converts_a_whole_project() {
        let ast = sb3_to_general_ast(PROJECT, &ConvertFlags::new()).unwrap();
        assert_eq!(ast, expected());
    }

    #[test]
    fn strict_flags_accept_a_well_formed_project() {
        assert_eq!(
            sb3_to_general_ast(PROJECT, &ConvertFlags::strict()).unwrap(),
            expected()
        );
    }

    #[test]
    fn conversion_is_repeatable() {
        let first = sb3_to_general_ast(PROJECT, &ConvertFlags::new()).unwrap();
        let second = sb3_to_general_ast(PROJECT, &ConvertFlags::new()).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn output_json_shape() {
        let ast = sb3_to_general_ast(PROJECT, &ConvertFlags::new()).unwrap();
        let value = serde_json::to_value(&ast).unwrap();
        assert_eq!(
            value[1]["functionDeclarations"][0],
            json!({
                "name": "greet %s",
                "parameterNames": ["who"],
                "body": {
                    "kind": "sequence",
                    "statements": [{
                        "kind": "functionCall",
                        "name": "looks_say",
                        "arguments": [{"kind": "variable", "name": "who"}]
                    }]
                }
            })
        );
        assert_eq!(
            value[1]["eventListeners"][0]["action"]["statements"][1]["condition"],
            json!({
                "kind": "functionCall",
                "name": "loop_count_smaller_than",
                "arguments": [{"kind": "literal", "type": "number", "value": "10"}]
            })
        );
    }

    #[test]
    fn malformed_json_is_a_malformed_project() {
        let err = sb3_to_general_ast("{\"targets\": [", &ConvertFlags::new()).unwrap_err();
        assert_eq!(err.kind, ConvertErrorKind::MalformedProject);
    }

    #[test]
    fn a_hat_inside_a_stack_is_rejected() {
        let project = json!({
            "targets": [{
                "isStage": true,
                "name": "Stage",
                "blocks": {
                    "a": {"opcode": "event_whenflagclicked", "next": "b", "topLevel": true},
                    "b": {"opcode": "event_whenflagclicked", "parent": "a"}
                }
            }]
        });
        let err = sb3_to_general_ast(&project.to_string(), &ConvertFlags::new()).unwrap_err();
        assert_eq!(err.kind, ConvertErrorKind::InvalidNextTarget);
    }
}
