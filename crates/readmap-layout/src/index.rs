//! Identity resolution for a book collection.

use crate::model::{Book, ExternalKey};
use crate::{Error, Result};
use rustc_hash::FxHashMap as HashMap;

/// Lookup table from external key to the book's position in the collection.
///
/// Construction validates identity: every book must have a non-empty id, and both ids and
/// external keys must be unique.
#[derive(Debug, Clone)]
pub struct BookIndex<'a> {
    books: &'a [Book],
    by_key: HashMap<ExternalKey, usize>,
}

impl<'a> BookIndex<'a> {
    pub fn new(books: &'a [Book]) -> Result<Self> {
        let mut by_id: HashMap<&'a str, usize> = HashMap::default();
        let mut by_key: HashMap<ExternalKey, usize> = HashMap::default();
        by_id.reserve(books.len());
        by_key.reserve(books.len());

        for (ix, book) in books.iter().enumerate() {
            if book.id.trim().is_empty() {
                return Err(Error::MissingId { index: ix });
            }
            if by_id.insert(book.id.as_str(), ix).is_some() {
                return Err(Error::DuplicateId {
                    id: book.id.clone(),
                });
            }
            if let Some(prev) = by_key.insert(book.external_key, ix) {
                return Err(Error::DuplicateExternalKey {
                    key: book.external_key,
                    first: books[prev].id.clone(),
                    second: book.id.clone(),
                });
            }
        }

        Ok(Self { books, by_key })
    }

    pub fn books(&self) -> &'a [Book] {
        self.books
    }

    pub fn resolve(&self, key: ExternalKey) -> Option<usize> {
        self.by_key.get(&key).copied()
    }

    /// Positions of the in-collection prerequisites of the book at `ix`, in list order.
    ///
    /// Dangling keys are skipped. A key listed twice resolves twice.
    pub fn prerequisites_of(&self, ix: usize) -> impl Iterator<Item = usize> + '_ {
        self.books[ix]
            .prerequisites
            .iter()
            .filter_map(move |key| self.resolve(*key))
    }

    /// Dependents of every book, indexed by position. Computed in one pass.
    pub fn dependents(&self) -> Vec<Vec<usize>> {
        let mut out: Vec<Vec<usize>> = vec![Vec::new(); self.books.len()];
        for (dep_ix, book) in self.books.iter().enumerate() {
            for key in &book.prerequisites {
                let Some(pre_ix) = self.resolve(*key) else {
                    continue;
                };
                if out[pre_ix].last() != Some(&dep_ix) {
                    out[pre_ix].push(dep_ix);
                }
            }
        }
        out
    }
}
