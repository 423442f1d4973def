//! Shared helpers for the use cases.

use crate::session_store::SessionStore;
use folio_core::error::FolioError;

/// Funnel for authenticated-call failures. A 401 means the backend rejected
/// the stored token, so the session is torn down (memory and storage) before
/// the error continues to the caller; any other failure is logged so the
/// notice stream surfaces it as a dismissible message.
pub(crate) fn surface_failure(session: &SessionStore, err: FolioError) -> FolioError {
    if err.is_unauthorized() {
        tracing::warn!("Backend rejected the session token, logging out");
        session.logout();
    } else {
        tracing::warn!(error = %err, "Request failed");
    }
    err
}
