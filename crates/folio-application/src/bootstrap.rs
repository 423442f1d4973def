//! Wiring for a ready-to-use client.

use crate::auth_usecase::AuthUseCase;
use crate::blog_usecase::BlogUseCase;
use crate::comment_usecase::CommentUseCase;
use crate::profile_usecase::ProfileUseCase;
use crate::session_store::SessionStore;
use folio_api::{ApiClient, ApiConfig};
use folio_core::error::Result;
use folio_events::{Notice, notice_channel};
use folio_infrastructure::TomlCredentialRepository;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing_subscriber::layer::SubscriberExt;

/// Installs the global tracing subscriber: console logging plus the notice
/// bridge. Returns the receiver the view layer drains to render dismissible
/// notices for every WARN/ERROR logged anywhere in the client.
///
/// Safe to call more than once; later calls keep the existing subscriber
/// and still return a (then silent) receiver.
pub fn init_notices() -> mpsc::UnboundedReceiver<Notice> {
    let (layer, receiver) = notice_channel();
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .with(layer);
    let _ = tracing::subscriber::set_global_default(subscriber);
    receiver
}

/// A fully wired Folio client: session store, REST client, and the use
/// cases a view layer drives.
///
/// Construction restores any persisted session, so
/// `client.session.is_authenticated()` is accurate immediately, with no
/// network call.
pub struct FolioClient {
    pub session: Arc<SessionStore>,
    pub auth: AuthUseCase,
    pub blogs: BlogUseCase,
    pub comments: CommentUseCase,
    pub profiles: ProfileUseCase,
}

impl FolioClient {
    /// Wires a client against the default storage location and the
    /// environment-configured backend URL.
    pub fn from_env() -> Result<Self> {
        let repository = Arc::new(TomlCredentialRepository::default_location()?);
        Self::with_parts(ApiConfig::from_env(), repository)
    }

    /// Wires a client from explicit parts (tests pass a temp-dir-backed
    /// repository and a local base URL).
    pub fn with_parts(
        config: ApiConfig,
        repository: Arc<TomlCredentialRepository>,
    ) -> Result<Self> {
        let session = Arc::new(SessionStore::new(repository));
        session.initialize()?;

        let api = Arc::new(ApiClient::new(config, session.clone())?);

        Ok(Self {
            auth: AuthUseCase::new(api.clone(), session.clone()),
            blogs: BlogUseCase::new(api.clone(), session.clone()),
            comments: CommentUseCase::new(api.clone(), session.clone()),
            profiles: ProfileUseCase::new(api, session.clone()),
            session,
        })
    }
}
