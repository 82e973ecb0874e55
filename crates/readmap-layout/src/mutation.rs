//! Book removal with orphan cascade.
//!
//! Deleting a book also removes every book that loses its last in-collection prerequisite
//! because of that deletion, transitively. Books that had no resolvable prerequisite before
//! the call (roots, or books whose prerequisites were all dangling) are never cascaded.

use crate::model::{Book, ExternalKey};
use rustc_hash::FxHashMap as HashMap;
use serde::Serialize;
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Deletion {
    /// Remaining books, in their input order.
    pub books: Vec<Book>,
    /// Ids removed by this call: the target first, then cascaded books in removal order.
    pub removed: Vec<String>,
}

impl Deletion {
    pub fn is_noop(&self) -> bool {
        self.removed.is_empty()
    }

    pub fn was_removed(&self, id: &str) -> bool {
        self.removed.iter().any(|r| r == id)
    }

    /// Whether the caller must clear its current selection.
    pub fn clears_selection(&self, selected: Option<&str>) -> bool {
        selected.is_some_and(|id| self.was_removed(id))
    }
}

/// Removes `target_id` and cascades to orphaned dependents. Returns the new collection.
///
/// Deleting an id that is not present returns the collection unchanged. Duplicate ids are not
/// supported: only the first book with `target_id` is removed.
pub fn delete_book(books: &[Book], target_id: &str) -> Vec<Book> {
    delete_book_tracked(books, target_id).books
}

pub fn delete_book_tracked(books: &[Book], target_id: &str) -> Deletion {
    let Some(target) = books.iter().position(|b| b.id == target_id) else {
        return Deletion {
            books: books.to_vec(),
            removed: Vec::new(),
        };
    };

    // First book wins on duplicate keys; identity is validated at layout time, not here.
    let mut by_key: HashMap<ExternalKey, usize> = HashMap::default();
    for (ix, book) in books.iter().enumerate() {
        by_key.entry(book.external_key).or_insert(ix);
    }
    let resolved: Vec<Vec<usize>> = books
        .iter()
        .map(|b| {
            b.prerequisites
                .iter()
                .filter_map(|k| by_key.get(k).copied())
                .collect()
        })
        .collect();
    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); books.len()];
    for (dep, pres) in resolved.iter().enumerate() {
        for pre in pres {
            if dependents[*pre].last() != Some(&dep) {
                dependents[*pre].push(dep);
            }
        }
    }

    let mut removed_flag = vec![false; books.len()];
    let mut removed: Vec<usize> = vec![target];
    removed_flag[target] = true;
    let mut work: VecDeque<usize> = VecDeque::from([target]);

    // Each book enters the worklist at most once, when it is removed.
    while let Some(gone) = work.pop_front() {
        for dep in &dependents[gone] {
            let dep = *dep;
            if removed_flag[dep] {
                continue;
            }
            let still_anchored = resolved[dep].iter().any(|p| !removed_flag[*p]);
            if !still_anchored {
                removed_flag[dep] = true;
                removed.push(dep);
                work.push_back(dep);
            }
        }
    }

    tracing::debug!(
        id = %target_id,
        cascaded = removed.len() - 1,
        "deleted book"
    );

    Deletion {
        books: books
            .iter()
            .enumerate()
            .filter(|(ix, _)| !removed_flag[*ix])
            .map(|(_, b)| b.clone())
            .collect(),
        removed: removed.into_iter().map(|ix| books[ix].id.clone()).collect(),
    }
}
