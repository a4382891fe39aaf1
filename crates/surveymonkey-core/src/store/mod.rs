use crate::error::Result;
use crate::models::Survey;

mod memory;
mod sqlite;

pub use memory::MemorySurveyStore;
pub use sqlite::SqliteSurveyStore;

/// Document store for surveys, keyed by survey code.
///
/// Not-found is reported as `Ok(None)` / `Ok(false)`, never as an error.
pub trait SurveyStore: Send + Sync {
    /// Insert or replace the document with the same code.
    fn save(&self, survey: &Survey) -> Result<()>;

    /// Insert a new document; `Conflict` if the code is already taken.
    fn insert_new(&self, survey: &Survey) -> Result<()>;

    fn find_by_code(&self, code: &str) -> Result<Option<Survey>>;

    /// Returns whether a document was removed.
    fn delete(&self, code: &str) -> Result<bool>;

    /// All documents in insertion order.
    fn find_all(&self) -> Result<Vec<Survey>>;

    fn count(&self) -> Result<usize>;

    /// Atomic read-modify-write of one document.
    ///
    /// `apply` runs with the store serialized; if it fails nothing is written.
    /// Returns the updated document, or `None` when the code is unknown.
    fn modify(
        &self,
        code: &str,
        apply: &mut dyn FnMut(&mut Survey) -> Result<()>,
    ) -> Result<Option<Survey>>;

    /// Flush and release resources at shutdown.
    fn close(&self) -> Result<()> {
        Ok(())
    }
}
