use super::classify::{classify, BlockKind};
use crate::prelude::*;
use crate::sb3::{BlockInfo, BlockMap, Input};
use tracing::trace;

/// A block with its links to the rest of the script resolved.
#[derive(Clone, Debug)]
pub struct TreeNode<'a> {
    id: &'a str,
    info: &'a BlockInfo,
    kind: BlockKind,
    /// blocks nested inside this one (inputs and substacks), in source order
    children: Vec<&'a str>,
    next: Option<&'a str>,
}

impl<'a> TreeNode<'a> {
    pub fn id(&self) -> &'a str {
        self.id
    }

    pub fn info(&self) -> &'a BlockInfo {
        self.info
    }

    pub fn opcode(&self) -> &'a str {
        &self.info.opcode
    }

    pub fn kind(&self) -> &BlockKind {
        &self.kind
    }

    pub fn children(&self) -> &[&'a str] {
        &self.children
    }

    pub fn next_id(&self) -> Option<&'a str> {
        self.next
    }
}

/// Every true block of a target, keyed by id. Variable and list literals
/// stored directly in the block map are left out, since they can't be linked.
#[derive(Clone, Debug, Default)]
pub struct BlockTree<'a> {
    nodes: IndexMap<&'a str, TreeNode<'a>>,
    roots: Vec<&'a str>,
}

impl<'a> BlockTree<'a> {
    pub fn build(blocks: &'a BlockMap) -> ConvResult<Self> {
        let mut nodes: IndexMap<&'a str, TreeNode<'a>> = IndexMap::with_capacity(blocks.len());
        for (id, block) in blocks {
            let id: &'a str = id;
            let Some(info) = block.block_info() else {
                trace!(id, "skipping top-level literal");
                continue;
            };
            trace!(id, opcode = &*info.opcode, "classifying block");
            nodes.insert(
                id,
                TreeNode {
                    id,
                    info,
                    kind: classify(&info.opcode)?,
                    children: vec![],
                    next: None,
                },
            );
        }

        for (id, block) in blocks {
            let id: &'a str = id;
            let Some(info) = block.block_info() else {
                continue;
            };
            if let Some(next) = info.next.as_deref() {
                let Some(target) = nodes.get(next) else {
                    conv_bail!(
                        InvalidNextTarget,
                        "block {id} is followed by {next}, which doesn't exist"
                    )
                };
                conv_assert!(
                    InvalidNextTarget,
                    target.kind.is_code_block(),
                    "block {id} is followed by {next} ({}), which isn't a statement",
                    target.opcode()
                );
                let next: &'a str = target.id;
                if let Some(node) = nodes.get_mut(id) {
                    node.next = Some(next);
                }
            }

            let Some(parent) = info.parent.as_deref() else {
                continue;
            };
            let Some(node) = nodes.get(id) else {
                continue;
            };
            conv_assert!(
                HatBlockHasParent,
                !node.kind.is_hat_block(),
                "hat block {id} ({}) has parent {parent}",
                node.opcode()
            );
            let child: &'a str = node.id;
            let Some(parent_node) = nodes.get_mut(parent) else {
                conv_bail!(
                    ChildNotFound,
                    "block {id} has parent {parent}, which doesn't exist"
                )
            };
            // a block's parent is also the block before it in a stack
            if parent_node.info.next.as_deref() != Some(child) {
                parent_node.children.push(child);
            }
        }

        let roots = nodes
            .values()
            .filter(|node| node.info.parent.is_none())
            .map(|node| node.id)
            .collect();

        let tree = BlockTree { nodes, roots };
        tree.check_attached()?;
        Ok(tree)
    }

    /// Every block has to be reachable from a root, through `next` links or
    /// the inputs of the block it sits in.
    fn check_attached(&self) -> ConvResult<()> {
        let mut seen: BTreeSet<&'a str> = BTreeSet::new();
        let mut stack: Vec<&'a str> = self.roots.clone();
        while let Some(id) = stack.pop() {
            if !seen.insert(id) {
                continue;
            }
            let Some(node) = self.nodes.get(id) else {
                continue;
            };
            stack.extend(node.next);
            for child in node.info.inputs.values().flat_map(Input::block_ids) {
                stack.push(self.child(node, child)?.id);
            }
        }
        match self.nodes.values().find(|node| !seen.contains(node.id)) {
            Some(unreached) => self.unreachable(unreached, &seen),
            None => Ok(()),
        }
    }

    /// Explains why `node` can't be reached, by following its parents up to
    /// either a reachable block that doesn't refer to it, or a loop.
    fn unreachable<'t>(
        &'t self,
        node: &'t TreeNode<'a>,
        seen: &BTreeSet<&'a str>,
    ) -> ConvResult<()> {
        let mut path = BTreeSet::new();
        let mut current = node;
        loop {
            let Some(parent) = current.info.parent.as_deref().and_then(|id| self.nodes.get(id))
            else {
                conv_bug!("unreachable block {} has no parent", current.id)
            };
            if !path.insert(current.id) {
                if parent.next == Some(current.id) {
                    conv_bail!(
                        InvalidNextTarget,
                        "the stack through block {} loops back on itself",
                        current.id
                    )
                }
                conv_bail!(
                    ChildNotFound,
                    "block {} is nested inside itself, through block {}",
                    current.id,
                    parent.id
                )
            }
            if seen.contains(parent.id) {
                conv_bail!(
                    UnexpectedTopLevelBlock,
                    "block {} ({}) has parent {} ({}), which neither contains nor precedes it",
                    current.id,
                    current.opcode(),
                    parent.id,
                    parent.opcode()
                )
            }
            current = parent;
        }
    }

    pub fn node(&self, id: &str) -> Option<&TreeNode<'a>> {
        self.nodes.get(id)
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    /// parentless blocks, in source order
    pub fn roots(&self) -> impl Iterator<Item = &TreeNode<'a>> + '_ {
        self.roots.iter().filter_map(|id| self.nodes.get(id))
    }

    pub fn next(&self, node: &TreeNode<'a>) -> Option<&TreeNode<'a>> {
        node.next.and_then(|id| self.nodes.get(id))
    }

    /// Looks up a block that `parent` refers to through one of its inputs.
    pub fn child(&self, parent: &TreeNode<'a>, id: &str) -> ConvResult<&TreeNode<'a>> {
        if !parent.children.iter().any(|child| *child == id) {
            conv_bail!(
                ChildNotFound,
                "block {} ({}) refers to {id}, which isn't one of its children",
                parent.id,
                parent.opcode()
            )
        }
        self.nodes
            .get(id)
            .ok_or_else(|| make_conv_err!(ChildNotFound, "block {id} doesn't exist"))
    }

    /// `first` and every block after it in its stack
    pub fn chain<'t>(&'t self, first: &'t TreeNode<'a>) -> ConvResult<Vec<&'t TreeNode<'a>>> {
        let mut seen = BTreeSet::new();
        let mut chain = vec![];
        let mut current = Some(first);
        while let Some(node) = current {
            conv_assert!(
                InvalidNextTarget,
                seen.insert(node.id),
                "the stack starting at {} loops back to {}",
                first.id,
                node.id
            );
            chain.push(node);
            current = self.next(node);
        }
        Ok(chain)
    }
}
