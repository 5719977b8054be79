use crate::model::EventModel;

/// Recompute `subordinates` over a whole subtree, post-order.
///
/// A node's count is the total number of events in its subtree excluding
/// itself. Persisted or canvas-carried counts are never trusted; every
/// structural change (add, remove, reparent) runs through here before the
/// tree is considered consistent.
pub fn set_subordinates(mut event: EventModel) -> EventModel {
    event.children = event.children.into_iter().map(set_subordinates).collect();
    event.subordinates = event.children.iter().map(|c| c.subordinates + 1).sum();
    event
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(name: &str, children: Vec<EventModel>) -> EventModel {
        let mut e = EventModel::new(name, "page_view");
        e.children = children;
        // poison the stored count to prove it is recomputed
        e.subordinates = 99;
        e
    }

    #[test]
    fn test_leaf_has_zero_subordinates() {
        let e = set_subordinates(event("leaf", vec![]));
        assert_eq!(e.subordinates, 0);
    }

    #[test]
    fn test_chain() {
        let e = set_subordinates(event("a", vec![event("b", vec![event("c", vec![])])]));
        assert_eq!(e.subordinates, 2);
        assert_eq!(e.children[0].subordinates, 1);
        assert_eq!(e.children[0].children[0].subordinates, 0);
    }

    #[test]
    fn test_branching() {
        let e = set_subordinates(event(
            "root",
            vec![
                event("a", vec![event("a1", vec![]), event("a2", vec![])]),
                event("b", vec![]),
            ],
        ));
        assert_eq!(e.subordinates, 4);
        assert_eq!(e.children[0].subordinates, 2);
        assert_eq!(e.children[1].subordinates, 0);
    }
}
