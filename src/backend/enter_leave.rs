use ahash::HashSet;

use super::host::HostNode;

/// Derives "entered the whole region" / "left the whole region" edges from per-node
/// enter/leave events.
///
/// Hosts fire one enter/leave pair per crossed node boundary, so moving from a parent into
/// one of its children produces a leave on the parent even though the pointer never left.
/// Tracking the set of currently entered nodes (by identity) filters that noise out.
#[derive(Debug)]
pub struct EnterLeaveCounter<N: HostNode> {
    entered: HashSet<N>,
}

impl<N: HostNode> Default for EnterLeaveCounter<N> {
    fn default() -> Self {
        Self {
            entered: HashSet::default(),
        }
    }
}

impl<N: HostNode> EnterLeaveCounter<N> {
    /// Record an enter on `node`; returns `true` for the first enter into the region.
    ///
    /// Entered nodes that don't contain `node` are forgotten, which recovers from a missed
    /// leave on a sibling.
    pub fn enter(&mut self, node: N) -> bool {
        let previous_depth = self.entered.len();
        self.prune_detached();
        self.entered
            .retain(|entered| *entered == node || entered.contains(&node));
        self.entered.insert(node);
        previous_depth == 0 && !self.entered.is_empty()
    }

    /// Record a leave from `node`; returns `true` once the pointer left the outermost entered node.
    pub fn leave(&mut self, node: &N) -> bool {
        let previous_depth = self.entered.len();
        self.prune_detached();
        self.entered.remove(node);
        previous_depth > 0 && self.entered.is_empty()
    }

    /// Forget everything; the next enter is a first enter again.
    pub fn reset(&mut self) {
        self.entered.clear();
    }

    pub fn depth(&self) -> usize {
        self.entered.len()
    }

    // Nodes removed from the document never get their leave event.
    fn prune_detached(&mut self) {
        self.entered.retain(HostNode::is_attached);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use egui::Rect;

    use super::*;

    #[derive(Clone, Debug)]
    struct Node {
        id: u32,
        attached: Rc<Cell<bool>>,

        /// `None`: the host can't tell containment.
        ancestors: Option<Vec<u32>>,
    }

    impl Node {
        fn new(id: u32) -> Self {
            Self {
                id,
                attached: Rc::new(Cell::new(true)),
                ancestors: None,
            }
        }

        fn in_tree(id: u32, ancestors: &[u32]) -> Self {
            Self {
                ancestors: Some(ancestors.to_vec()),
                ..Self::new(id)
            }
        }
    }

    impl PartialEq for Node {
        fn eq(&self, other: &Self) -> bool {
            self.id == other.id
        }
    }

    impl Eq for Node {}

    impl std::hash::Hash for Node {
        fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
            self.id.hash(state);
        }
    }

    impl HostNode for Node {
        fn client_rect(&self) -> Option<Rect> {
            None
        }

        fn is_attached(&self) -> bool {
            self.attached.get()
        }

        fn has_draggable_attribute(&self) -> bool {
            false
        }

        fn set_draggable(&self, _draggable: bool) {}

        fn contains(&self, other: &Self) -> bool {
            match &other.ancestors {
                Some(ancestors) => self.id == other.id || ancestors.contains(&self.id),
                None => true,
            }
        }
    }

    #[test]
    fn missed_sibling_leave_is_recovered_on_next_enter() {
        let parent = Node::in_tree(1, &[]);
        let (first, second) = (Node::in_tree(2, &[1]), Node::in_tree(3, &[1]));
        let mut counter = EnterLeaveCounter::default();
        counter.enter(parent.clone());
        counter.enter(first);

        // No leave for `first` before entering its sibling.
        assert!(!counter.enter(second.clone()));
        assert_eq!(counter.depth(), 2);

        assert!(!counter.leave(&second));
        assert!(counter.leave(&parent));
    }

    #[test]
    fn nested_enters_only_report_first() {
        let mut counter = EnterLeaveCounter::default();
        assert!(counter.enter(Node::new(1)));
        assert!(!counter.enter(Node::new(2)));
        assert!(!counter.enter(Node::new(3)));
        assert_eq!(counter.depth(), 3);
    }

    #[test]
    fn only_the_outermost_leave_is_last() {
        let (a, b, c) = (Node::new(1), Node::new(2), Node::new(3));
        let mut counter = EnterLeaveCounter::default();
        counter.enter(a.clone());
        counter.enter(b.clone());
        counter.enter(c.clone());

        assert!(!counter.leave(&c));
        assert!(!counter.leave(&b));
        assert!(counter.leave(&a));
        assert_eq!(counter.depth(), 0);
    }

    #[test]
    fn balanced_sequence_allows_a_new_first_enter() {
        let (a, b) = (Node::new(1), Node::new(2));
        let mut counter = EnterLeaveCounter::default();
        for _ in 0..3 {
            assert!(counter.enter(a.clone()));
            assert!(!counter.enter(b.clone()));
            assert!(!counter.leave(&a));
            assert!(counter.leave(&b));
        }
    }

    #[test]
    fn reentering_the_same_node_does_not_deepen() {
        let a = Node::new(1);
        let mut counter = EnterLeaveCounter::default();
        assert!(counter.enter(a.clone()));
        assert!(!counter.enter(a.clone()));
        assert!(counter.leave(&a));
    }

    #[test]
    fn leave_without_enter_is_not_last() {
        let mut counter = EnterLeaveCounter::default();
        assert!(!counter.leave(&Node::new(7)));
        assert_eq!(counter.depth(), 0);
    }

    #[test]
    fn reset_forgets_entered_nodes() {
        let mut counter = EnterLeaveCounter::default();
        counter.enter(Node::new(1));
        counter.enter(Node::new(2));
        counter.reset();
        assert_eq!(counter.depth(), 0);
        assert!(counter.enter(Node::new(3)));
    }

    #[test]
    fn detached_nodes_are_dropped_on_next_event() {
        let (a, b) = (Node::new(1), Node::new(2));
        let mut counter = EnterLeaveCounter::default();
        counter.enter(a.clone());
        counter.enter(b.clone());

        b.attached.set(false);
        assert!(counter.leave(&a), "b was removed without a leave event");
    }
}
