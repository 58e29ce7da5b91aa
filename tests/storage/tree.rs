//! Preorder tree invariants through the public API.

use morphkit::foundation::EntityId;
use morphkit::storage::EntityStore;

#[test]
fn root_child_grandchild_chain() {
    let mut store = EntityStore::new();
    let r = store.insert("R", None, None).unwrap();
    let a = store.insert("A", Some(r), None).unwrap();
    let b = store.insert("B", Some(a), None).unwrap();

    let names: Vec<&str> = store.iter().map(|e| e.name()).collect();
    let depths: Vec<usize> = store.iter().map(|e| e.depth()).collect();
    assert_eq!(names, vec!["R", "A", "B"]);
    assert_eq!(depths, vec![0, 1, 2]);
    assert_eq!(store.children_of(r).unwrap(), vec![a]);
    assert_eq!(store.children_of(a).unwrap(), vec![b]);
    assert_eq!(store.subtree_of(r).unwrap(), vec![r, a, b]);
}

#[test]
fn depth_follows_parent_across_moves() {
    let mut store = EntityStore::new();
    let r1 = store.insert("r1", None, None).unwrap();
    let r2 = store.insert("r2", None, None).unwrap();
    let kid = store.insert("kid", Some(r1), None).unwrap();
    let grandkid = store.insert("grandkid", Some(kid), None).unwrap();

    store.move_to(kid, Some(r2), None).unwrap();

    for entity in store.iter() {
        match store.parent_of(entity.id()).unwrap() {
            Some(parent) => {
                assert_eq!(entity.depth(), store.get(parent).unwrap().depth() + 1);
            }
            None => assert_eq!(entity.depth(), 0),
        }
    }
    assert_eq!(store.parent_of(grandkid).unwrap(), Some(kid));
}

#[test]
fn subtree_sizes_add_up() {
    let mut store = EntityStore::new();
    let root = store.insert("root", None, None).unwrap();
    let left = store.insert("left", Some(root), None).unwrap();
    let right = store.insert("right", Some(root), None).unwrap();
    store.insert("ll", Some(left), None).unwrap();
    store.insert("lr", Some(left), None).unwrap();
    store.insert("rl", Some(right), None).unwrap();

    let total = store.subtree_of(root).unwrap().len();
    let sum: usize = store
        .children_of(root)
        .unwrap()
        .iter()
        .map(|c| store.subtree_of(*c).unwrap().len())
        .sum();
    assert_eq!(total, 1 + sum);
}

#[test]
fn structural_failures_leave_no_partial_state() {
    let mut store = EntityStore::new();
    let root = store.insert("root", None, None).unwrap();
    let child = store.insert("child", Some(root), None).unwrap();

    let before: Vec<(EntityId, usize)> = store.iter().map(|e| (e.id(), e.depth())).collect();

    assert!(store.move_to(root, Some(child), None).is_err());
    assert!(store.insert("child", None, None).is_err());
    assert!(store.remove(EntityId(999)).is_err());

    let after: Vec<(EntityId, usize)> = store.iter().map(|e| (e.id(), e.depth())).collect();
    assert_eq!(before, after);
}

#[test]
fn stale_ids_resolve_to_lookup_failures() {
    let mut store = EntityStore::new();
    let root = store.insert("root", None, None).unwrap();
    let child = store.insert("child", Some(root), None).unwrap();
    store.remove(child).unwrap();

    assert!(store.get(child).unwrap_err().is_lookup_failure());
    assert!(store.index_of(child).is_err());
    // Ids are never reused by later inserts.
    let next = store.insert("next", Some(root), None).unwrap();
    assert_ne!(next, child);
}
