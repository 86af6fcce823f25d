//! Test context for unified test setup

use std::sync::{Arc, Once};

use kinship::concepts::Concepts;
use kinship::config::Settings;
use kinship::database::{MemoryStore, SharedStore};
use kinship::models::UserId;
use kinship::{App, Session};

static INIT: Once = Once::new();

/// Initialize logging for tests (called once)
pub fn init_test_logging() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("kinship=debug")
            .with_test_writer()
            .try_init();
    });
}

/// An application over its own store, isolated from every other test
pub struct TestContext {
    pub app: App,
    pub settings: Settings,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_store(Arc::new(MemoryStore::new()))
    }

    pub fn with_store(store: SharedStore) -> Self {
        Self::with_store_and_settings(store, Self::test_settings())
    }

    pub fn with_store_and_settings(store: SharedStore, settings: Settings) -> Self {
        init_test_logging();
        let concepts = Concepts::new(store, &settings);
        Self {
            app: App::new(concepts),
            settings,
        }
    }

    /// Default settings with limits suited to tests
    pub fn test_settings() -> Settings {
        let mut settings = Settings::default();
        settings.concepts.min_password_length = 4;
        settings.store.max_update_retries = 64;
        settings
    }

    pub fn concepts(&self) -> &Concepts {
        self.app.concepts()
    }

    /// The raw store under every concept, for asserting on stored documents
    pub fn store(&self) -> &SharedStore {
        self.concepts().store()
    }

    /// A session for `user` that skips the login recipe, so no badge record is created
    pub fn session_for(&self, user: UserId) -> Session {
        let mut session = Session::new();
        self.concepts()
            .sessioning
            .start(&mut session, user)
            .expect("fresh session is logged out");
        session
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
