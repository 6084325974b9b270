//! Converting targets into actors.

pub mod classify;
pub mod inputs;
mod tree;

pub use tree::{BlockTree, TreeNode};

use crate::ast::{ActorNode, GeneralAst};
use crate::blocks::procedures::{declaration, ProcedureMap, ProcedurePrototype};
use crate::blocks::event_listener;
use crate::flags::ConvertFlags;
use crate::prelude::*;
use crate::sb3::{Sb3Project, Target};
use classify::{BlockKind, HatBlock};
use tracing::{debug, instrument, warn};

/// Everything a block converter can see besides the block itself.
#[derive(Clone, Copy, Debug)]
pub struct ConvertContext<'a> {
    pub tree: &'a BlockTree<'a>,
    pub flags: ConvertFlags,
    pub procedures: &'a ProcedureMap,
}

/// The scripts of a target, split by what starts them.
#[derive(Debug, Default)]
pub struct Roots<'t, 'a> {
    pub listeners: Vec<&'t TreeNode<'a>>,
    pub definitions: Vec<&'t TreeNode<'a>>,
}

/// Sorts the parentless blocks of a target into event listeners and custom
/// block definitions. Anything else (a loose reporter, or a stack without a
/// hat) can't be run, so is rejected.
pub fn partition_roots<'t, 'a>(tree: &'t BlockTree<'a>) -> ConvResult<Roots<'t, 'a>> {
    let mut roots = Roots {
        listeners: vec![],
        definitions: vec![],
    };
    for root in tree.roots() {
        match root.kind() {
            BlockKind::Hat(HatBlock::ProcedureDefinition) => roots.definitions.push(root),
            BlockKind::Hat(_) => roots.listeners.push(root),
            BlockKind::Code(_) | BlockKind::Expression(_) => conv_bail!(
                UnexpectedTopLevelBlock,
                "top-level block {} ({}) isn't a hat block",
                root.id(),
                root.opcode()
            ),
        }
    }
    Ok(roots)
}

fn prototypes<'t, 'a>(
    tree: &'t BlockTree<'a>,
    definitions: &[&'t TreeNode<'a>],
) -> ConvResult<(ProcedureMap, Vec<ProcedurePrototype>)> {
    let mut procedures = ProcedureMap::with_capacity(definitions.len());
    let mut in_order = Vec::with_capacity(definitions.len());
    for definition in definitions {
        let prototype = ProcedurePrototype::from_definition(tree, definition)?;
        if procedures.contains_key(&prototype.proccode) {
            warn!(
                proccode = &*prototype.proccode,
                "custom block is defined more than once; calls link to the first definition"
            );
        } else {
            procedures.insert(prototype.proccode.clone(), prototype.clone());
        }
        in_order.push(prototype);
    }
    Ok((procedures, in_order))
}

#[instrument(level = "debug", skip_all, fields(sprite = &*target.name))]
pub fn actor_from_target(target: &Target, flags: &ConvertFlags) -> ConvResult<ActorNode> {
    let tree = BlockTree::build(&target.blocks)?;
    let roots = partition_roots(&tree)?;
    debug!(
        blocks = tree.len(),
        listeners = roots.listeners.len(),
        definitions = roots.definitions.len(),
        "built block tree"
    );
    let (procedures, declared) = prototypes(&tree, &roots.definitions)?;
    let ctx = ConvertContext {
        tree: &tree,
        flags: *flags,
        procedures: &procedures,
    };

    let event_listeners = roots
        .listeners
        .iter()
        .map(|hat| {
            debug!(id = hat.id(), event = hat.opcode(), "converting event listener");
            event_listener(&ctx, hat)
        })
        .collect::<ConvResult<Vec<_>>>()?;
    let function_declarations = roots
        .definitions
        .iter()
        .zip(&declared)
        .map(|(definition, prototype)| {
            debug!(id = definition.id(), proccode = &*prototype.proccode, "converting custom block");
            declaration(&ctx, definition, prototype)
        })
        .collect::<ConvResult<Vec<_>>>()?;

    Ok(ActorNode {
        event_listeners,
        function_declarations,
    })
}

/// One actor per target, in the order the targets appear in the project.
pub fn general_ast_from_project(
    project: &Sb3Project,
    flags: &ConvertFlags,
) -> ConvResult<GeneralAst> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        project
            .targets
            .par_iter()
            .map(|target| actor_from_target(target, flags))
            .collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        project
            .targets
            .iter()
            .map(|target| actor_from_target(target, flags))
            .collect()
    }
}
