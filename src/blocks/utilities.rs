use crate::ast::{ExpressionNode, StatementNode};
use crate::convert::inputs;
use crate::convert::{ConvertContext, TreeNode};
use crate::prelude::*;

/// A closed set of opcodes which can be turned back into their scratch name.
pub trait Opcode: Copy + fmt::Debug {
    fn opcode(self) -> &'static str;
}

/// Declares the opcodes of one block family in one position (hat, statement or
/// expression) as a fieldless enum, along with the mappings to and from the
/// scratch opcode string. Each converter matches on these enums exhaustively,
/// so adding a variant here without handling it is a compile error.
#[macro_export]
macro_rules! opcode_family {
    ($(#[$meta:meta])* $vis:vis enum $name:ident { $($variant:ident => $opcode:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
        $vis enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            pub fn from_opcode(opcode: &str) -> Option<Self> {
                match opcode {
                    $($opcode => Some(Self::$variant),)+
                    _ => None,
                }
            }

            pub const fn opcode(self) -> &'static str {
                match self {
                    $(Self::$variant => $opcode),+
                }
            }
        }

        impl $crate::blocks::Opcode for $name {
            fn opcode(self) -> &'static str {
                $name::opcode(self)
            }
        }
    };
}

/// `functionCall{name, arguments}` in statement position, arguments in canonical order
pub fn call(
    ctx: &ConvertContext<'_>,
    node: &TreeNode<'_>,
    name: &str,
) -> ConvResult<Vec<StatementNode>> {
    Ok(vec![StatementNode::call(name, inputs::arguments(ctx, node)?)])
}

/// `functionCall{name, arguments}` in expression position
pub fn call_expression(
    ctx: &ConvertContext<'_>,
    node: &TreeNode<'_>,
    name: &str,
) -> ConvResult<ExpressionNode> {
    Ok(ExpressionNode::call(name, inputs::arguments(ctx, node)?))
}

pub fn operator(
    ctx: &ConvertContext<'_>,
    node: &TreeNode<'_>,
    name: &str,
) -> ConvResult<ExpressionNode> {
    Ok(ExpressionNode::operator(name, inputs::arguments(ctx, node)?))
}

/// zero-argument reporters read like a variable named after the opcode
pub fn accessor(name: &str) -> ExpressionNode {
    ExpressionNode::variable(name)
}

/// A dropdown menu shadow. Its only field is its value.
pub fn menu(node: &TreeNode<'_>) -> ConvResult<ExpressionNode> {
    let fields = &node.info().fields;
    let Some((key, field)) = fields.first() else {
        conv_bail!(
            MalformedFieldShape,
            "menu block {} ({}) has no field",
            node.id(),
            node.opcode()
        )
    };
    conv_assert!(
        MalformedFieldShape,
        fields.len() == 1,
        "menu block {} ({}) has {} fields",
        node.id(),
        node.opcode(),
        fields.len()
    );
    inputs::resolve_field(node, key, field)
}
