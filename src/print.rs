//! Debug rendering of a subtree.

use std::fmt::Debug;

use crate::{parented::Forest, NodeId};

impl<T> Forest<T>
where
    T: Debug,
{
    /// Renders the subtree rooted at `from`, one node per line with its children indented below
    /// it as `L=` and `R=`. Missing children (and a stale `from`) are drawn as `∅`.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::parented::Forest;
    ///
    /// let mut forest = Forest::new();
    /// let root = forest.new_node(2);
    /// forest.insert(root, 3).unwrap();
    ///
    /// assert_eq!(
    ///     forest.print(root),
    ///     "Node { 2 }\nL=∅\nR=Node { 3 }\n  L=∅\n  R=∅"
    /// );
    /// ```
    pub fn print(&self, from: NodeId) -> String {
        let mut out = String::new();
        // (node, level, label). Children of a node at level `n` sit at level `n + 1` and are
        // indented by two spaces per level above the first.
        let mut stack = vec![(Some(from), 0usize, "")];
        while let Some((id, level, label)) = stack.pop() {
            if level > 0 {
                out.push('\n');
                out.extend(std::iter::repeat(' ').take(2 * (level - 1)));
                out.push_str(label);
            }

            match id.and_then(|id| self.get(id)) {
                None => out.push('∅'),
                Some(node) => {
                    out.push_str(&format!("Node {{ {:?} }}", node.value()));
                    // Right first so the left subtree is printed first.
                    stack.push((node.right(), level + 1, "R="));
                    stack.push((node.left(), level + 1, "L="));
                }
            }
        }
        out
    }
}
