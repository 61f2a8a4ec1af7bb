use linked_bst::parented::Forest;
use linked_bst::NodeId;

use std::collections::HashSet;

use quickcheck_macros::quickcheck;

use crate::init_logging;

/// Builds a tree by inserting `xs` in order. Returns `None` for no values.
fn build(xs: &[i8]) -> (Forest<i8>, Option<NodeId>) {
    let mut forest = Forest::new();
    let mut root = None;
    for x in xs {
        match root {
            Some(root) => {
                forest.insert(root, *x).unwrap();
            }
            None => root = Some(forest.new_node(*x)),
        }
    }
    (forest, root)
}

fn in_order(forest: &Forest<i8>, root: Option<NodeId>) -> Vec<i8> {
    root.map(|root| forest.in_order(root).copied().collect())
        .unwrap_or_default()
}

#[quickcheck]
fn in_order_is_sorted(xs: Vec<i8>) -> bool {
    init_logging();
    let (forest, root) = build(&xs);

    let mut sorted = xs;
    sorted.sort();
    in_order(&forest, root) == sorted
}

#[quickcheck]
fn contains(xs: Vec<i8>) -> bool {
    init_logging();
    let (forest, root) = build(&xs);

    xs.iter().all(|x| {
        root.and_then(|root| forest.search(root, x))
            .and_then(|id| forest.value(id))
            == Some(x)
    })
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    init_logging();
    let (forest, root) = build(&xs);
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| root.and_then(|root| forest.search(root, x)).is_none())
}

#[quickcheck]
fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    init_logging();
    let (mut forest, mut root) = build(&xs);

    let mut still_present = xs;
    for delete in &deletes {
        // Only one node goes per delete even when the value was inserted several times.
        let Some(found) = root.and_then(|root| forest.search(root, delete)) else {
            continue;
        };
        let removed = forest.delete(found).unwrap();
        if root == Some(found) {
            root = removed.replacement;
        }
        let pos = still_present.iter().position(|x| x == delete).unwrap();
        still_present.swap_remove(pos);
    }
    still_present.sort();

    forest.len() == still_present.len()
        && in_order(&forest, root) == still_present
        && root.map_or(true, |root| forest.validate(root).is_ok())
        && deletes
            .iter()
            .filter(|x| !still_present.contains(x))
            .all(|x| root.and_then(|root| forest.search(root, x)).is_none())
}

#[quickcheck]
fn parent_links_round_trip(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    init_logging();
    let (mut forest, mut root) = build(&xs);
    for delete in &deletes {
        if let Some(found) = root.and_then(|root| forest.search(root, delete)) {
            let removed = forest.delete(found).unwrap();
            if root == Some(found) {
                root = removed.replacement;
            }
        }
    }

    // Every node reachable from the root agrees with its parent, and depth matches the walk.
    let mut stack: Vec<(NodeId, usize)> = root.map(|root| (root, 0)).into_iter().collect();
    while let Some((id, depth)) = stack.pop() {
        let node = forest.get(id).unwrap();
        if forest.depth(id) != Some(depth) || forest.root_of(id) != root {
            return false;
        }
        if let Some(parent) = node.parent() {
            let parent = forest.get(parent).unwrap();
            if parent.left() != Some(id) && parent.right() != Some(id) {
                return false;
            }
        }
        stack.extend(
            [node.left(), node.right()]
                .into_iter()
                .flatten()
                .map(|child| (child, depth + 1)),
        );
    }
    true
}

#[quickcheck]
fn minimum_and_maximum(xs: Vec<i8>) -> bool {
    init_logging();
    let (forest, root) = build(&xs);
    let Some(root) = root else {
        return true;
    };

    forest.minimum_value(root) == xs.iter().min() && forest.maximum_value(root) == xs.iter().max()
}
