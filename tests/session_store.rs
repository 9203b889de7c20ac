#[cfg(test)]
mod tests {
    use serde_json::json;
    use std::fs;
    use std::time::Duration;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};
    use todosync::libs::data_storage::DataStorage;
    use todosync::libs::session::{FileStore, KeyValueStore, MemoryStore, Session, SessionStore, SESSION_KEY};

    struct StoreTestContext {
        temp_dir: TempDir,
    }

    impl TestContext for StoreTestContext {
        fn setup() -> Self {
            StoreTestContext {
                temp_dir: tempfile::tempdir().unwrap(),
            }
        }
    }

    impl StoreTestContext {
        fn file_store(&self) -> FileStore {
            FileStore::with_storage(DataStorage::at(self.temp_dir.path()))
        }

        fn session_file(&self) -> std::path::PathBuf {
            self.temp_dir.path().join(format!(".{}", SESSION_KEY))
        }
    }

    fn session() -> Session {
        Session::new(json!({"email": "x@x.com", "name": "X"}), Some("sid=abc".to_string()))
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_file_store_persists_encrypted(ctx: &mut StoreTestContext) {
        let sessions = SessionStore::new(ctx.file_store(), Duration::from_secs(3600));
        sessions.set_session(&session()).unwrap();

        let raw = fs::read_to_string(ctx.session_file()).unwrap();
        assert!(!raw.contains("x@x.com"));
        assert!(!raw.contains("sid=abc"));

        let reopened = SessionStore::new(ctx.file_store(), Duration::from_secs(3600));
        assert_eq!(reopened.get_session(), Some(session()));
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_file_store_overwrites(ctx: &mut StoreTestContext) {
        let sessions = SessionStore::new(ctx.file_store(), Duration::from_secs(3600));
        sessions.set_session(&session()).unwrap();

        let other = Session::new(json!({"email": "y@y.com"}), None);
        sessions.set_session(&other).unwrap();

        assert_eq!(sessions.get_session(), Some(other));
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_file_store_expired_entry_is_removed(ctx: &mut StoreTestContext) {
        let store = ctx.file_store();
        store.put(SESSION_KEY, "{}", Duration::ZERO).unwrap();

        assert_eq!(store.get(SESSION_KEY).unwrap(), None);
        assert!(!ctx.session_file().exists());
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_file_store_discards_corrupted_file(ctx: &mut StoreTestContext) {
        let store = ctx.file_store();
        store.put(SESSION_KEY, "{}", Duration::from_secs(60)).unwrap();
        fs::write(ctx.session_file(), "not a ciphertext").unwrap();

        let sessions = SessionStore::new(store, Duration::from_secs(60));
        assert_eq!(sessions.get_session(), None);
        assert!(!ctx.session_file().exists());
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_clear_session_is_idempotent(ctx: &mut StoreTestContext) {
        let sessions = SessionStore::new(ctx.file_store(), Duration::from_secs(60));
        sessions.clear_session().unwrap();

        sessions.set_session(&session()).unwrap();
        assert!(sessions.has_session());

        sessions.clear_session().unwrap();
        sessions.clear_session().unwrap();
        assert!(!sessions.has_session());
        assert!(!ctx.session_file().exists());
    }

    #[test]
    fn test_memory_store_expiry() {
        let sessions = SessionStore::new(MemoryStore::new(), Duration::ZERO);
        sessions.set_session(&session()).unwrap();
        assert_eq!(sessions.get_session(), None);
    }

    #[test]
    fn test_malformed_session_reads_as_none() {
        let store = MemoryStore::new();
        store.put(SESSION_KEY, "not json", Duration::from_secs(60)).unwrap();

        let sessions = SessionStore::new(store, Duration::from_secs(60));
        assert!(!sessions.has_session());
    }
}
