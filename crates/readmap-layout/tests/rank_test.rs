use readmap_layout::{Book, Error, assign_levels};

fn book(id: &str, key: u64, prerequisites: &[u64]) -> Book {
    Book::new(id, key).with_prerequisites(prerequisites.iter().copied())
}

fn diamond() -> Vec<Book> {
    vec![
        book("A", 1, &[]),
        book("B", 2, &[1]),
        book("C", 3, &[1]),
        book("D", 4, &[2, 3]),
    ]
}

#[test]
fn levels_follow_the_longest_prerequisite_chain() {
    let levels = assign_levels(&diamond()).unwrap();
    assert_eq!(levels.get("A"), Some(1));
    assert_eq!(levels.get("B"), Some(2));
    assert_eq!(levels.get("C"), Some(2));
    assert_eq!(levels.get("D"), Some(3));
    assert_eq!(levels.max_level(), 3);
}

#[test]
fn levels_keep_collection_order() {
    let levels = assign_levels(&diamond()).unwrap();
    let ids: Vec<&str> = levels.iter().map(|(id, _)| id).collect();
    assert_eq!(ids, ["A", "B", "C", "D"]);
}

#[test]
fn levels_use_the_deepest_prerequisite_not_the_first() {
    let books = vec![
        book("D", 4, &[1, 3]),
        book("A", 1, &[]),
        book("B", 2, &[1]),
        book("C", 3, &[2]),
    ];
    let levels = assign_levels(&books).unwrap();
    assert_eq!(levels.get("C"), Some(3));
    assert_eq!(levels.get("D"), Some(4));
}

#[test]
fn levels_are_invariant_to_input_order() {
    let forward = assign_levels(&diamond()).unwrap();
    let mut reversed_books = diamond();
    reversed_books.reverse();
    let reversed = assign_levels(&reversed_books).unwrap();
    for (id, level) in forward.iter() {
        assert_eq!(reversed.get(id), Some(level), "level mismatch for {id}");
    }
}

#[test]
fn dangling_prerequisites_are_ignored() {
    let books = vec![book("X", 10, &[99])];
    let levels = assign_levels(&books).unwrap();
    assert_eq!(levels.get("X"), Some(1));
}

#[test]
fn dangling_prerequisites_do_not_affect_resolved_ones() {
    let books = vec![book("A", 1, &[]), book("B", 2, &[77, 1, 88])];
    let levels = assign_levels(&books).unwrap();
    assert_eq!(levels.get("B"), Some(2));
}

#[test]
fn empty_collection_yields_empty_levels() {
    let levels = assign_levels(&[]).unwrap();
    assert!(levels.is_empty());
    assert_eq!(levels.max_level(), 0);
}

#[test]
fn long_chains_do_not_exhaust_the_stack() {
    let n: u64 = 20_000;
    let books: Vec<Book> = (0..n)
        .rev()
        .map(|i| {
            let pre: Vec<u64> = if i == 0 { Vec::new() } else { vec![i - 1] };
            book(&format!("b{i}"), i, &pre)
        })
        .collect();
    let levels = assign_levels(&books).unwrap();
    assert_eq!(levels.get("b0"), Some(1));
    assert_eq!(levels.get(&format!("b{}", n - 1)), Some(n as usize));
}

#[test]
fn wide_diamond_stacks_are_evaluated_once_per_node() {
    // Each layer depends on both nodes of the previous layer: 2^40 paths, 80 nodes.
    let mut books = vec![book("l0a", 0, &[]), book("l0b", 1, &[])];
    for layer in 1..40u64 {
        let prev = [(layer - 1) * 2, (layer - 1) * 2 + 1];
        books.push(book(&format!("l{layer}a"), layer * 2, &prev));
        books.push(book(&format!("l{layer}b"), layer * 2 + 1, &prev));
    }
    let levels = assign_levels(&books).unwrap();
    assert_eq!(levels.get("l39b"), Some(40));
}

#[test]
fn two_book_cycle_is_rejected_with_its_path() {
    let books = vec![book("A", 1, &[2]), book("B", 2, &[1])];
    let err = assign_levels(&books).unwrap_err();
    assert_eq!(
        err,
        Error::Cycle {
            path: vec!["A".into(), "B".into(), "A".into()]
        }
    );
    assert_eq!(err.to_string(), "prerequisite cycle: A -> B -> A");
}

#[test]
fn self_prerequisite_is_a_cycle() {
    let books = vec![book("A", 1, &[1])];
    let err = assign_levels(&books).unwrap_err();
    assert_eq!(
        err,
        Error::Cycle {
            path: vec!["A".into(), "A".into()]
        }
    );
}

#[test]
fn cycle_path_excludes_the_acyclic_prefix() {
    let books = vec![
        book("R", 1, &[]),
        book("X", 2, &[1, 4]),
        book("Y", 3, &[2]),
        book("Z", 4, &[3]),
    ];
    let err = assign_levels(&books).unwrap_err();
    assert_eq!(
        err,
        Error::Cycle {
            path: vec!["X".into(), "Z".into(), "Y".into(), "X".into()]
        }
    );
}

#[test]
fn malformed_identity_fails_fast() {
    let missing = vec![book("A", 1, &[]), book("  ", 2, &[])];
    assert_eq!(
        assign_levels(&missing).unwrap_err(),
        Error::MissingId { index: 1 }
    );

    let dup_id = vec![book("A", 1, &[]), book("A", 2, &[])];
    assert_eq!(
        assign_levels(&dup_id).unwrap_err(),
        Error::DuplicateId { id: "A".into() }
    );

    let dup_key = vec![book("A", 7, &[]), book("B", 7, &[])];
    assert_eq!(
        assign_levels(&dup_key).unwrap_err(),
        Error::DuplicateExternalKey {
            key: 7,
            first: "A".into(),
            second: "B".into(),
        }
    );
}
