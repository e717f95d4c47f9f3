//! Admission checks for untrusted trees.

use rulex_ir::Node;

/// A tree rejected by [`check_depth`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DepthError {
    #[error("expression nesting exceeds the limit of {limit}")]
    TooDeep { limit: usize },
}

/// Fail if any root-to-leaf path of `node` has more than `limit` nodes.
///
/// Walks iteratively and stops at the first path over the limit, so it is
/// safe to run on arbitrarily deep input before evaluating it.
pub fn check_depth(node: &Node, limit: usize) -> Result<(), DepthError> {
    let mut pending = vec![(node, 1)];
    while let Some((node, depth)) = pending.pop() {
        if depth > limit {
            return Err(DepthError::TooDeep { limit });
        }
        pending.extend(node.args().iter().map(|arg| (arg, depth + 1)));
    }
    Ok(())
}
