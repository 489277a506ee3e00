//! Read-only document lookup used by processing events

use crate::record::Record;

/// Keyed access to guidance documents. Absence is reported as `None` or an
/// empty list; callers decide whether that is an error.
pub trait DocumentLookup {
    /// Top-level record by id.
    fn get_record(&self, id: &str) -> Option<&Record>;

    /// Child record `child_id` of the record `parent_id`.
    fn get_sub_record(&self, parent_id: &str, child_id: &str) -> Option<Record>;

    /// Records attached to `id`, in document order.
    fn get_related_records(&self, id: &str) -> Vec<Record>;
}
