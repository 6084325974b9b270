//! The language-agnostic program tree produced by the converter.
//!
//! Nodes serialize as internally tagged JSON objects (`{"kind": "loop", ...}`)
//! with camelCase field names.

use serde::{Deserialize, Serialize};

/// One actor per sprite/stage target, in source order.
pub type GeneralAst = Vec<ActorNode>;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ActorNode {
    pub event_listeners: Vec<EventListenerNode>,
    pub function_declarations: Vec<FunctionDeclarationNode>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct EventListenerNode {
    pub condition: EventCondition,
    pub action: StatementNode,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct EventCondition {
    pub event: Box<str>,
    pub parameters: Vec<ExpressionNode>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FunctionDeclarationNode {
    pub name: Box<str>,
    pub parameter_names: Vec<Box<str>>,
    pub body: Box<StatementNode>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum StatementNode {
    Sequence {
        statements: Vec<StatementNode>,
    },
    Loop {
        condition: ExpressionNode,
        body: Box<StatementNode>,
    },
    #[serde(rename_all = "camelCase")]
    Condition {
        condition: ExpressionNode,
        when_true: Box<StatementNode>,
        when_false: Box<StatementNode>,
    },
    FunctionCall {
        name: Box<str>,
        arguments: Vec<ExpressionNode>,
    },
    FunctionDeclaration(FunctionDeclarationNode),
}

impl StatementNode {
    pub fn sequence(statements: Vec<StatementNode>) -> Self {
        Self::Sequence { statements }
    }

    pub fn empty() -> Self {
        Self::sequence(vec![])
    }

    pub fn looped(condition: ExpressionNode, body: StatementNode) -> Self {
        Self::Loop {
            condition,
            body: Box::new(body),
        }
    }

    pub fn condition(
        condition: ExpressionNode,
        when_true: StatementNode,
        when_false: StatementNode,
    ) -> Self {
        Self::Condition {
            condition,
            when_true: Box::new(when_true),
            when_false: Box::new(when_false),
        }
    }

    pub fn call(name: impl Into<Box<str>>, arguments: Vec<ExpressionNode>) -> Self {
        Self::FunctionCall {
            name: name.into(),
            arguments,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum LiteralType {
    Number,
    Color,
    String,
    Boolean,
    /// an input slot whose contents couldn't be decoded
    Unknown,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ExpressionNode {
    Literal {
        #[serde(rename = "type")]
        literal_type: LiteralType,
        value: Box<str>,
    },
    Variable {
        name: Box<str>,
    },
    Operator {
        operator: Box<str>,
        operands: Vec<ExpressionNode>,
    },
    FunctionCall {
        name: Box<str>,
        arguments: Vec<ExpressionNode>,
    },
}

impl ExpressionNode {
    pub fn literal(literal_type: LiteralType, value: impl Into<Box<str>>) -> Self {
        Self::Literal {
            literal_type,
            value: value.into(),
        }
    }

    pub fn boolean(value: bool) -> Self {
        Self::literal(LiteralType::Boolean, if value { "true" } else { "false" })
    }

    pub fn unknown() -> Self {
        Self::literal(LiteralType::Unknown, "")
    }

    pub fn variable(name: impl Into<Box<str>>) -> Self {
        Self::Variable { name: name.into() }
    }

    pub fn operator(operator: impl Into<Box<str>>, operands: Vec<ExpressionNode>) -> Self {
        Self::Operator {
            operator: operator.into(),
            operands,
        }
    }

    pub fn call(name: impl Into<Box<str>>, arguments: Vec<ExpressionNode>) -> Self {
        Self::FunctionCall {
            name: name.into(),
            arguments,
        }
    }
}
