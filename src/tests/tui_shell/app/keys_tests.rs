    use super::*;
    use crate::sync::fake_store::{Call, FakeStore, USER, task};

    fn settings() -> EngineSettings {
        EngineSettings {
            user_id: USER,
            notice_ttl: Duration::from_secs(3),
            exclusive_item_ops: false,
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text<S: TodoStore>(app: &mut App, engine: &SyncEngine<S>, text: &str) {
        for c in text.chars() {
            assert!(handle_key(app, engine, key(KeyCode::Char(c))).is_none());
        }
    }

    async fn loaded(store: &FakeStore) -> SyncEngine<&FakeStore> {
        let engine = SyncEngine::new(store, settings());
        engine.load().await;
        engine
    }

    fn list_app<S: TodoStore>(engine: &SyncEngine<S>) -> App {
        let mut app = App::new("http://127.0.0.1:8080", USER);
        app.sync_with(engine, &engine.view());
        app.focus = Focus::List;
        app
    }

    #[tokio::test]
    async fn typing_then_enter_adds_through_the_engine() {
        let store = FakeStore::new(vec![task(1, "milk", false)]);
        let engine = loaded(&store).await;
        let mut app = App::new("http://127.0.0.1:8080", USER);

        type_text(&mut app, &engine, "bread");
        assert_eq!(engine.input(), "bread");

        let op = handle_key(&mut app, &engine, key(KeyCode::Enter)).expect("add started");
        let settled = op.await;
        assert!(!settled.failed);
        assert_eq!(settled.action, "add");

        let titles: Vec<String> = engine.tasks().into_iter().map(|t| t.title).collect();
        assert_eq!(titles, ["milk", "bread"]);
        assert_eq!(engine.input(), "");
    }

    #[tokio::test]
    async fn enter_waits_for_the_initial_load() {
        let store = FakeStore::new(vec![task(1, "milk", false)]);
        let engine = SyncEngine::new(&store, settings());
        let mut app = App::new("http://127.0.0.1:8080", USER);

        type_text(&mut app, &engine, "bread");
        assert!(handle_key(&mut app, &engine, key(KeyCode::Enter)).is_none());
        assert_eq!(store.calls(), Vec::<Call>::new());

        engine.load().await;
        let op = handle_key(&mut app, &engine, key(KeyCode::Enter)).expect("add started");
        op.await;
        let titles: Vec<String> = engine.tasks().into_iter().map(|t| t.title).collect();
        assert_eq!(titles, ["milk", "bread"]);
    }

    #[tokio::test]
    async fn list_keys_toggle_and_delete_the_selected_row() {
        let store = FakeStore::new(vec![task(1, "milk", false), task(2, "eggs", false)]);
        let engine = loaded(&store).await;
        let mut app = list_app(&engine);

        let op = handle_key(&mut app, &engine, key(KeyCode::Char(' '))).expect("toggle started");
        op.await;
        assert!(engine.task(TaskId(1)).expect("still there").completed);

        assert!(handle_key(&mut app, &engine, key(KeyCode::Char('j'))).is_none());
        assert_eq!(app.selected, 1);

        let op = handle_key(&mut app, &engine, key(KeyCode::Char('d'))).expect("delete started");
        op.await;
        assert!(engine.task(TaskId(2)).is_none());

        app.sync_with(&engine, &engine.view());
        assert_eq!(app.focus, Focus::Composer);
        assert_eq!(app.selected, 0);
    }

    #[tokio::test]
    async fn rename_commits_on_tab() {
        let store = FakeStore::new(vec![task(1, "milk", false)]);
        let engine = loaded(&store).await;
        let mut app = list_app(&engine);

        assert!(handle_key(&mut app, &engine, key(KeyCode::Char('e'))).is_none());
        assert_eq!(engine.editing(), Some((TaskId(1), "milk".to_string())));

        for _ in 0..4 {
            assert!(handle_key(&mut app, &engine, key(KeyCode::Backspace)).is_none());
        }
        type_text(&mut app, &engine, "cream");
        assert_eq!(engine.editing(), Some((TaskId(1), "cream".to_string())));

        let op = handle_key(&mut app, &engine, key(KeyCode::Tab)).expect("rename started");
        let settled = op.await;
        assert_eq!(settled.summary, "ok");
        assert_eq!(engine.task(TaskId(1)).expect("renamed").title, "cream");
        assert_eq!(engine.editing(), None);
    }

    #[tokio::test]
    async fn escape_cancels_rename_without_a_remote_call() {
        let store = FakeStore::new(vec![task(1, "milk", false)]);
        let engine = loaded(&store).await;
        let mut app = list_app(&engine);

        handle_key(&mut app, &engine, key(KeyCode::Enter));
        type_text(&mut app, &engine, "zzz");
        assert!(handle_key(&mut app, &engine, key(KeyCode::Esc)).is_none());

        assert_eq!(engine.editing(), None);
        assert_eq!(engine.task(TaskId(1)).expect("kept").title, "milk");
        assert_eq!(store.calls(), vec![Call::List]);
    }

    #[tokio::test]
    async fn busy_rows_ignore_further_keys() {
        let store = FakeStore::gated(vec![task(1, "milk", false)]);
        store.release(1);
        let engine = loaded(&store).await;
        let mut app = list_app(&engine);

        let mut op = handle_key(&mut app, &engine, key(KeyCode::Char(' '))).expect("toggle started");
        assert!(futures::poll!(op.as_mut()).is_pending());
        assert!(engine.is_busy(TaskId(1)));

        assert!(handle_key(&mut app, &engine, key(KeyCode::Char(' '))).is_none());
        assert!(handle_key(&mut app, &engine, key(KeyCode::Char('d'))).is_none());
        assert!(handle_key(&mut app, &engine, key(KeyCode::Char('e'))).is_none());
        assert_eq!(engine.editing(), None);

        store.release(1);
        op.await;
        assert!(!engine.is_busy(TaskId(1)));
    }

    #[tokio::test]
    async fn filter_keys_and_quit() {
        let store = FakeStore::new(vec![task(1, "milk", true)]);
        let engine = loaded(&store).await;
        let mut app = list_app(&engine);

        handle_key(&mut app, &engine, key(KeyCode::Char('f')));
        assert_eq!(engine.filter(), Filter::Active);
        handle_key(&mut app, &engine, key(KeyCode::Char('3')));
        assert_eq!(engine.filter(), Filter::Completed);

        app.focus = Focus::Composer;
        type_text(&mut app, &engine, "q");
        assert!(!app.quit);

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(handle_key(&mut app, &engine, ctrl_c).is_none());
        assert!(app.quit);
    }

    #[test]
    fn settled_summaries() {
        let report = BatchReport {
            attempted: 3,
            succeeded: 2,
            failed: 1,
            skipped: 0,
        };
        let settled = Settled::from_batch("clear completed", report);
        assert_eq!(settled.summary, "2/3 done, 1 failed");
        assert!(settled.failed);

        let settled = Settled::from_outcome("toggle #4", Outcome::Missing);
        assert_eq!(settled.summary, "no such todo");
        assert!(!settled.failed);
    }
