//! Explicit handle on the latest summary.
//!
//! Holds the current immutable `Response` behind an `RwLock<Arc<_>>`, so a
//! reader clones the `Arc` and never blocks an editor for long. Edits go
//! through the minimal-diff `replace_component`. Callers bracket their
//! persistence round-trip with `begin_edit`; exporting is refused while any
//! ticket is alive.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use thiserror::Error;

use crate::export::{export_document, Artifact, ExportError, ExportOptions};
use crate::models::{Card, Response, ResponseError};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Summary store lock poisoned")]
    LockPoisoned,

    #[error(transparent)]
    Response(#[from] ResponseError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

pub struct SummaryStore {
    current: RwLock<Arc<Response>>,
    pending_edits: AtomicUsize,
}

/// Marks one edit as in progress until dropped.
#[must_use = "the edit counts as finished as soon as the ticket is dropped"]
pub struct EditTicket<'a> {
    store: &'a SummaryStore,
}

impl Drop for EditTicket<'_> {
    fn drop(&mut self) {
        self.store.pending_edits.fetch_sub(1, Ordering::SeqCst);
    }
}

impl SummaryStore {
    pub fn new(response: Response) -> Self {
        Self {
            current: RwLock::new(Arc::new(response)),
            pending_edits: AtomicUsize::new(0),
        }
    }

    /// Latest response. Cheap: clones the `Arc`.
    pub fn current(&self) -> Result<Arc<Response>, StoreError> {
        let guard = self.current.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(Arc::clone(&guard))
    }

    pub fn begin_edit(&self) -> EditTicket<'_> {
        self.pending_edits.fetch_add(1, Ordering::SeqCst);
        EditTicket { store: self }
    }

    pub fn pending_edits(&self) -> usize {
        self.pending_edits.load(Ordering::SeqCst)
    }

    /// Replace one card; every other node stays shared with the previous
    /// response.
    pub fn apply_edit(
        &self,
        section_index: usize,
        component_index: usize,
        card: Card,
    ) -> Result<Arc<Response>, StoreError> {
        let mut guard = self.current.write().map_err(|_| StoreError::LockPoisoned)?;
        let updated = Arc::new(guard.replace_component(section_index, component_index, card)?);
        *guard = Arc::clone(&updated);
        tracing::debug!(
            section = section_index,
            component = component_index,
            "Applied card edit"
        );
        Ok(updated)
    }

    /// Swap in a response returned by the persistence layer.
    pub fn replace(&self, response: Response) -> Result<(), StoreError> {
        let mut guard = self.current.write().map_err(|_| StoreError::LockPoisoned)?;
        *guard = Arc::new(response);
        Ok(())
    }

    pub fn export_current(&self, options: &ExportOptions) -> Result<Artifact, StoreError> {
        let pending = self.pending_edits();
        if pending > 0 {
            tracing::warn!(pending, "Export refused while edits are in progress");
            return Err(ExportError::EditsInProgress { pending }.into());
        }
        let response = self.current()?;
        Ok(export_document(&response, options)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::ExportKind;
    use crate::models::Section;
    use serde_json::json;

    fn sample() -> Response {
        Response::new(
            "P",
            vec![
                Section::new(
                    "A",
                    vec![
                        Card::new("symptoms_card", "Sintomas", json!({})),
                        Card::new("allergies_card", "Alergias", json!({})),
                    ],
                ),
                Section::new(
                    "B",
                    vec![Card::new("medications_card", "Medicamentos", json!({}))],
                ),
            ],
        )
    }

    #[test]
    fn apply_edit_updates_current_with_shared_nodes() {
        let store = SummaryStore::new(sample());
        let before = store.current().unwrap();
        let after = store
            .apply_edit(0, 1, Card::new("allergies_card", "Alergias", json!({"items": [{"primary": "Dipirona"}]})))
            .unwrap();
        assert!(Arc::ptr_eq(&after, &store.current().unwrap()));
        assert!(Arc::ptr_eq(&before.sections[1], &after.sections[1]));
        assert!(Arc::ptr_eq(&before.sections[0].components[0], &after.sections[0].components[0]));
        assert!(!Arc::ptr_eq(&before.sections[0].components[1], &after.sections[0].components[1]));
    }

    #[test]
    fn rejected_edit_keeps_current() {
        let store = SummaryStore::new(sample());
        let before = store.current().unwrap();
        let err = store
            .apply_edit(0, 0, Card::new("exams_card", "Exames", json!({})))
            .unwrap_err();
        assert!(matches!(err, StoreError::Response(ResponseError::TypeChanged { .. })));
        assert!(Arc::ptr_eq(&before, &store.current().unwrap()));
    }

    #[test]
    fn export_blocked_while_ticket_alive() {
        let store = SummaryStore::new(sample());
        let options = ExportOptions::new(ExportKind::Prontuario);
        {
            let _ticket = store.begin_edit();
            assert_eq!(store.pending_edits(), 1);
            let err = store.export_current(&options).unwrap_err();
            assert!(matches!(
                err,
                StoreError::Export(ExportError::EditsInProgress { pending: 1 })
            ));
        }
        assert_eq!(store.pending_edits(), 0);
        let artifact = store.export_current(&options).unwrap();
        assert_eq!(&artifact.bytes[0..4], b"%PDF");
    }

    #[test]
    fn replace_swaps_whole_response() {
        let store = SummaryStore::new(sample());
        store.replace(Response::new("Novo", vec![])).unwrap();
        assert_eq!(store.current().unwrap().page_title, "Novo");
    }
}
