//! Level assignment (longest prerequisite chain).
//!
//! A book's level is `1` when none of its prerequisites resolve inside the collection and
//! `1 + max(level(p))` over the resolved ones otherwise. Dangling prerequisite keys are
//! ignored. The traversal is an explicit-stack DFS: finished books are memoized, books on
//! the current path are tracked so that a prerequisite cycle surfaces as [`Error::Cycle`].

use crate::index::BookIndex;
use crate::model::Book;
use crate::{Error, Result};
use indexmap::IndexMap;
use serde::Serialize;

/// Level per book id, in collection order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LevelMap(IndexMap<String, usize>);

impl LevelMap {
    pub fn get(&self, id: &str) -> Option<usize> {
        self.0.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.0.iter().map(|(id, level)| (id.as_str(), *level))
    }

    /// Deepest level, or `0` for an empty map.
    pub fn max_level(&self) -> usize {
        self.0.values().copied().max().unwrap_or(0)
    }
}

impl FromIterator<(String, usize)> for LevelMap {
    fn from_iter<T: IntoIterator<Item = (String, usize)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    Unvisited,
    InProgress,
    Done(usize),
}

struct Frame {
    ix: usize,
    prerequisites: Vec<usize>,
    cursor: usize,
    deepest: usize,
}

impl Frame {
    fn new(ix: usize, index: &BookIndex<'_>) -> Self {
        Self {
            ix,
            prerequisites: index.prerequisites_of(ix).collect(),
            cursor: 0,
            deepest: 0,
        }
    }
}

pub fn assign_levels(books: &[Book]) -> Result<LevelMap> {
    let index = BookIndex::new(books)?;
    let levels = levels_by_position(&index)?;

    let map: LevelMap = books
        .iter()
        .zip(levels.iter().copied())
        .map(|(book, level)| (book.id.clone(), level))
        .collect();
    tracing::debug!(
        books = books.len(),
        max_level = map.max_level(),
        "assigned levels"
    );
    Ok(map)
}

/// Levels indexed by collection position.
pub(crate) fn levels_by_position(index: &BookIndex<'_>) -> Result<Vec<usize>> {
    let books = index.books();
    let mut state: Vec<Visit> = vec![Visit::Unvisited; books.len()];

    for (ix, book) in books.iter().enumerate() {
        for key in &book.prerequisites {
            if index.resolve(*key).is_none() {
                tracing::trace!(book = %book.id, key, "ignoring dangling prerequisite");
            }
        }
        if state[ix] != Visit::Unvisited {
            continue;
        }

        state[ix] = Visit::InProgress;
        let mut stack: Vec<Frame> = vec![Frame::new(ix, index)];
        loop {
            let Some(frame) = stack.last_mut() else {
                break;
            };
            match frame.prerequisites.get(frame.cursor).copied() {
                Some(pre) => {
                    frame.cursor += 1;
                    match state[pre] {
                        Visit::Done(level) => frame.deepest = frame.deepest.max(level),
                        Visit::InProgress => return Err(cycle_error(books, &stack, pre)),
                        Visit::Unvisited => {
                            state[pre] = Visit::InProgress;
                            stack.push(Frame::new(pre, index));
                        }
                    }
                }
                None => {
                    let level = frame.deepest + 1;
                    let done = frame.ix;
                    stack.pop();
                    state[done] = Visit::Done(level);
                    if let Some(parent) = stack.last_mut() {
                        parent.deepest = parent.deepest.max(level);
                    }
                }
            }
        }
    }

    Ok(state
        .into_iter()
        .map(|v| match v {
            Visit::Done(level) => level,
            // Unreachable: every traversal above runs until its stack is empty.
            Visit::Unvisited | Visit::InProgress => 1,
        })
        .collect())
}

/// Builds the cycle path from the stack: the dependent chain from `reentered` back to itself.
fn cycle_error(books: &[Book], stack: &[Frame], reentered: usize) -> Error {
    let start = stack
        .iter()
        .position(|f| f.ix == reentered)
        .unwrap_or(0);
    let mut path: Vec<String> = stack[start..]
        .iter()
        .map(|f| books[f.ix].id.clone())
        .collect();
    path.push(books[reentered].id.clone());
    tracing::debug!(cycle = ?path, "prerequisite cycle detected");
    Error::Cycle { path }
}
