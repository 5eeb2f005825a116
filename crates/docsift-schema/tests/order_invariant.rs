//! Property tests: `order` stays dense under any sequence of edits

use docsift_domain::{NewVariable, VariableType};
use docsift_schema::SchemaDraft;
use docsift_store::MemoryStore;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Add,
    Delete(usize),
    Duplicate(usize),
    Reorder(usize, usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Add),
        (0usize..12).prop_map(Op::Delete),
        (0usize..12).prop_map(Op::Duplicate),
        (0usize..12, 0usize..12).prop_map(|(a, b)| Op::Reorder(a, b)),
    ]
}

proptest! {
    /// Property: after every operation, order equals position
    #[test]
    fn test_order_is_dense(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let mut draft = SchemaDraft::open(MemoryStore::new()).unwrap();
        let mut counter = 0;

        for op in ops {
            let len = draft.variables().len();
            let result = match op {
                Op::Add => {
                    counter += 1;
                    draft.add(NewVariable::new(format!("v{}", counter), VariableType::Text)).map(|_| ())
                }
                Op::Delete(i) => draft.delete(i).map(|_| ()),
                Op::Duplicate(i) => draft.duplicate(i).map(|_| ()),
                Op::Reorder(a, b) => draft.reorder(a, b),
            };

            // Out-of-range indices are rejected, in-range ones succeed
            let in_range = match op {
                Op::Add => true,
                Op::Delete(i) | Op::Duplicate(i) => i < len,
                Op::Reorder(a, b) => a < len && b < len,
            };
            prop_assert_eq!(result.is_ok(), in_range);

            for (position, v) in draft.variables().iter().enumerate() {
                prop_assert_eq!(v.order, position);
            }
        }
    }

    /// Property: ids stay unique through duplicates
    #[test]
    fn test_ids_unique(dups in prop::collection::vec(0usize..4, 0..10)) {
        let mut draft = SchemaDraft::open(MemoryStore::new()).unwrap();
        for name in ["a", "b", "c", "d"] {
            draft.add(NewVariable::new(name, VariableType::Text)).unwrap();
        }
        for i in dups {
            draft.duplicate(i).unwrap();
        }

        let mut ids: Vec<_> = draft.variables().iter().map(|v| v.id.clone()).collect();
        let total = ids.len();
        ids.sort();
        ids.dedup();
        prop_assert_eq!(ids.len(), total);
    }
}

#[test]
fn test_load_draft_twice_is_idempotent() {
    let mut draft = SchemaDraft::open(MemoryStore::new()).unwrap();
    let p1 = docsift_domain::ProjectId::from("p1");

    draft.load_draft(&p1).unwrap();
    draft.add(NewVariable::new("Date", VariableType::Date)).unwrap();
    let after_first = draft.state().clone();

    draft.load_draft(&p1).unwrap();
    assert_eq!(draft.state(), &after_first);
}
