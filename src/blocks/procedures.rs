use super::statement_chain;
use crate::ast::{ExpressionNode, FunctionDeclarationNode, StatementNode};
use crate::convert::inputs::{arguments, field_value};
use crate::convert::{BlockTree, ConvertContext, TreeNode};
use crate::prelude::*;
use crate::sb3::{InputPayload, Mutation};
use lazy_regex::{lazy_regex, Lazy};
use regex::Regex;
use tracing::warn;

opcode_family! {
    pub enum ProceduresCode {
        Call => "procedures_call",
    }
}

opcode_family! {
    pub enum ProceduresExpression {
        Prototype => "procedures_prototype",
        ArgumentReporterStringNumber => "argument_reporter_string_number",
        ArgumentReporterBoolean => "argument_reporter_boolean",
    }
}

pub const DEFINITION: &str = "procedures_definition";

/// the input of a definition block holding its prototype
const CUSTOM_BLOCK: &str = "custom_block";

static ARG_REGEX: Lazy<Regex> = lazy_regex!(r#"\\?%[nbs]"#);

/// The signature of a custom block, as declared by its prototype.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProcedurePrototype {
    pub proccode: Box<str>,
    pub parameter_names: Box<[Box<str>]>,
}

/// custom blocks of one target, keyed by proccode
pub type ProcedureMap = IndexMap<Box<str>, ProcedurePrototype>;

fn mutation<'a>(node: &TreeNode<'a>) -> ConvResult<&'a Mutation> {
    node.info().mutation.as_ref().ok_or_else(|| {
        make_conv_err!(
            MalformedMutation,
            "{} block {} has no mutation",
            node.opcode(),
            node.id()
        )
    })
}

/// the number of argument placeholders in a proccode. `\%s` is an escaped
/// percent sign rather than a placeholder.
pub fn placeholder_count(proccode: &str) -> usize {
    ARG_REGEX
        .find_iter(proccode)
        .filter(|found| !found.as_str().starts_with('\\'))
        .count()
}

impl ProcedurePrototype {
    pub fn from_mutation(mutation: &Mutation) -> ConvResult<Self> {
        let proccode: Box<str> = mutation.string("proccode")?.into();
        let parameter_names = mutation.string_array("argumentnames")?;
        let placeholders = placeholder_count(&proccode);
        if placeholders != parameter_names.len() {
            warn!(
                proccode = &*proccode,
                placeholders,
                parameters = parameter_names.len(),
                "proccode placeholders don't match the declared parameters"
            );
        }
        Ok(ProcedurePrototype {
            proccode,
            parameter_names,
        })
    }

    /// Reads the prototype held in a `procedures_definition`'s `custom_block` input.
    pub fn from_definition(tree: &BlockTree<'_>, definition: &TreeNode<'_>) -> ConvResult<Self> {
        let Some(InputPayload::Block(id)) = definition
            .info()
            .inputs
            .get(CUSTOM_BLOCK)
            .and_then(|input| input.payload())
        else {
            conv_bail!(
                MalformedMutation,
                "procedure definition {} has no prototype",
                definition.id()
            )
        };
        let prototype = tree.child(definition, id)?;
        conv_assert!(
            MalformedMutation,
            ProceduresExpression::from_opcode(prototype.opcode())
                == Some(ProceduresExpression::Prototype),
            "procedure definition {} holds a {} block rather than a prototype",
            definition.id(),
            prototype.opcode()
        );
        Self::from_mutation(mutation(prototype)?)
    }
}

pub fn declaration(
    ctx: &ConvertContext<'_>,
    definition: &TreeNode<'_>,
    prototype: &ProcedurePrototype,
) -> ConvResult<FunctionDeclarationNode> {
    Ok(FunctionDeclarationNode {
        name: prototype.proccode.clone(),
        parameter_names: prototype.parameter_names.to_vec(),
        body: Box::new(statement_chain(ctx, ctx.tree.next(definition))?),
    })
}

fn check_call(
    ctx: &ConvertContext<'_>,
    node: &TreeNode<'_>,
    call_mutation: &Mutation,
    proccode: &str,
) -> ConvResult<()> {
    let Some(prototype) = ctx.procedures.get(proccode) else {
        conv_bail!(
            UnmatchedProcedureCall,
            "block {} calls \"{proccode}\", which isn't defined in this target",
            node.id()
        )
    };
    let argument_count = call_mutation.string_array("argumentids")?.len();
    conv_assert!(
        ProcedureArityMismatch,
        argument_count == prototype.parameter_names.len(),
        "block {} calls \"{proccode}\" with {argument_count} arguments, but it takes {}",
        node.id(),
        prototype.parameter_names.len()
    );
    Ok(())
}

pub fn statements(
    ctx: &ConvertContext<'_>,
    node: &TreeNode<'_>,
    opcode: ProceduresCode,
) -> ConvResult<Vec<StatementNode>> {
    match opcode {
        ProceduresCode::Call => {
            let call_mutation = mutation(node)?;
            let proccode = call_mutation.string("proccode")?;
            if ctx.flags.check_procedure_calls.is_on() {
                check_call(ctx, node, call_mutation, proccode)?;
            }
            Ok(vec![StatementNode::call(proccode, arguments(ctx, node)?)])
        }
    }
}

pub fn expression(
    _ctx: &ConvertContext<'_>,
    node: &TreeNode<'_>,
    opcode: ProceduresExpression,
) -> ConvResult<ExpressionNode> {
    match opcode {
        ProceduresExpression::ArgumentReporterStringNumber
        | ProceduresExpression::ArgumentReporterBoolean => {
            Ok(ExpressionNode::variable(field_value(node, "VALUE")?.to_string()))
        }
        ProceduresExpression::Prototype => {
            let prototype = ProcedurePrototype::from_mutation(mutation(node)?)?;
            Ok(ExpressionNode::call(
                prototype.proccode,
                prototype
                    .parameter_names
                    .iter()
                    .map(|name| ExpressionNode::variable(name.clone()))
                    .collect(),
            ))
        }
    }
}
