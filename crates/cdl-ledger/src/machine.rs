//! Document status state machine.
//!
//! The machine is monotone and forward-only: once a requirement is
//! satisfied it is never un-satisfied, and no event moves a status
//! backward. Amendments arrive as REVISION events, which do not regress
//! status. The whole policy lives in [`transition`] so it is visible and
//! changeable in one place.

use cdl_types::{BlockchainEvent, DocumentStatus, EventKind};

/// Apply one event to a document status.
///
/// | Current           | Event kind   | Next      |
/// |-------------------|--------------|-----------|
/// | DRAFT             | APPROVAL     | APPROVED  |
/// | DRAFT or APPROVED | SIGNATURE    | SIGNED    |
/// | any               | RECORDED     | RECORDED  |
/// | any               | UPLOAD, VIEW, NOTARIZATION, REVISION | unchanged |
///
/// Deliberately permissive: any event kind is admissible from any
/// non-terminal state. SIGNATURE straight from DRAFT is allowed
/// (approval gating is advisory at this layer), and an APPROVAL arriving
/// after SIGNED leaves the status SIGNED rather than regressing it.
/// RECORDED is terminal; no event changes it.
pub fn transition(current: DocumentStatus, kind: EventKind) -> DocumentStatus {
    if current.is_terminal() {
        return current;
    }
    match (current, kind) {
        (DocumentStatus::Draft, EventKind::Approval) => DocumentStatus::Approved,
        (DocumentStatus::Draft | DocumentStatus::Approved, EventKind::Signature) => {
            DocumentStatus::Signed
        }
        (_, EventKind::Recorded) => DocumentStatus::Recorded,
        (current, _) => current,
    }
}

/// Derive a document's status by replaying its event sequence from DRAFT.
///
/// A document's stored status must always equal this replay; the
/// validator checks exactly that.
pub fn replay_status<'a>(events: impl IntoIterator<Item = &'a BlockchainEvent>) -> DocumentStatus {
    events
        .into_iter()
        .fold(DocumentStatus::Draft, |status, event| {
            transition(status, event.kind)
        })
}
