    use ratatui::backend::TestBackend;

    use super::*;
    use crate::sync::fake_store::{FakeStore, USER, task};

    fn settings() -> EngineSettings {
        EngineSettings {
            user_id: USER,
            notice_ttl: Duration::from_secs(3),
            exclusive_item_ops: false,
        }
    }

    fn screen<S: TodoStore>(engine: &SyncEngine<S>, app: &mut App) -> String {
        let view = engine.view();
        app.sync_with(engine, &view);
        let mut terminal = Terminal::new(TestBackend::new(72, 18)).expect("terminal");
        terminal.draw(|f| draw(f, app, &view)).expect("draw");
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[tokio::test]
    async fn draws_rows_footer_and_toggle_all_hint() {
        let store = FakeStore::new(vec![task(1, "milk", false), task(2, "eggs", true)]);
        let engine = SyncEngine::new(&store, settings());
        engine.load().await;
        let mut app = App::new("http://127.0.0.1:8080", USER);

        let text = screen(&engine, &mut app);
        assert!(text.contains("[ ]    1 milk"));
        assert!(text.contains("[x]    2 eggs"));
        assert!(text.contains("1 items left"));
        assert!(text.contains("(a: mark all complete)"));
        assert!(text.contains("c: clear completed"));
    }

    #[tokio::test]
    async fn load_failure_shows_banner_and_empty_list() {
        let store = FakeStore::new(vec![task(1, "milk", false)]);
        store.fail_list();
        let engine = SyncEngine::new(&store, settings());
        engine.load().await;
        let mut app = App::new("http://127.0.0.1:8080", USER);

        let text = screen(&engine, &mut app);
        assert!(text.contains("Unable to load todos"));
        assert!(text.contains("Nothing here."));
        assert!(!text.contains("items left"));
    }

    #[tokio::test]
    async fn editing_row_shows_the_draft() {
        let store = FakeStore::new(vec![task(1, "milk", false)]);
        let engine = SyncEngine::new(&store, settings());
        engine.load().await;
        engine.start_edit(TaskId(1));
        engine.set_edit_draft("oat milk");
        let mut app = App::new("http://127.0.0.1:8080", USER);

        let text = screen(&engine, &mut app);
        assert!(text.contains("> oat milk"));
        assert!(text.contains("enter: save"));
    }
