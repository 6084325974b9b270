use super::utilities::{call, call_expression};
use crate::ast::{ExpressionNode, StatementNode};
use crate::convert::inputs::field;
use crate::convert::{ConvertContext, TreeNode};
use crate::prelude::*;

opcode_family! {
    pub enum DataCode {
        SetVariableTo => "data_setvariableto",
        ChangeVariableBy => "data_changevariableby",
        ShowVariable => "data_showvariable",
        HideVariable => "data_hidevariable",
        AddToList => "data_addtolist",
        DeleteOfList => "data_deleteoflist",
        DeleteAllOfList => "data_deletealloflist",
        InsertAtList => "data_insertatlist",
        ReplaceItemOfList => "data_replaceitemoflist",
        ShowList => "data_showlist",
        HideList => "data_hidelist",
    }
}

opcode_family! {
    pub enum DataExpression {
        Variable => "data_variable",
        ListContents => "data_listcontents",
        ItemOfList => "data_itemoflist",
        ItemNumOfList => "data_itemnumoflist",
        LengthOfList => "data_lengthoflist",
        ListContainsItem => "data_listcontainsitem",
    }
}

pub fn statements(
    ctx: &ConvertContext<'_>,
    node: &TreeNode<'_>,
    opcode: DataCode,
) -> ConvResult<Vec<StatementNode>> {
    match opcode {
        // monitor visibility only matters to the editor
        DataCode::ShowVariable
        | DataCode::HideVariable
        | DataCode::ShowList
        | DataCode::HideList => Ok(vec![]),
        DataCode::SetVariableTo
        | DataCode::ChangeVariableBy
        | DataCode::AddToList
        | DataCode::DeleteOfList
        | DataCode::DeleteAllOfList
        | DataCode::InsertAtList
        | DataCode::ReplaceItemOfList => call(ctx, node, opcode.opcode()),
    }
}

pub fn expression(
    ctx: &ConvertContext<'_>,
    node: &TreeNode<'_>,
    opcode: DataExpression,
) -> ConvResult<ExpressionNode> {
    match opcode {
        DataExpression::Variable => field(node, "VARIABLE"),
        DataExpression::ListContents => field(node, "LIST"),
        DataExpression::ItemOfList
        | DataExpression::ItemNumOfList
        | DataExpression::LengthOfList
        | DataExpression::ListContainsItem => call_expression(ctx, node, opcode.opcode()),
    }
}
