use super::*;

pub(in crate::tui_shell) fn run(opts: crate::tui::TuiRunOptions) -> Result<()> {
    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        anyhow::bail!("TUI requires an interactive terminal (TTY)");
    }

    let config = opts.config;
    let client = RemoteClient::new(&config).context("build http client")?;
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("build tokio runtime")?;

    let mut stdout = io::stdout();
    enable_raw_mode().context("enable raw mode")?;
    execute!(stdout, EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;
    terminal.clear().ok();

    tracing::info!(url = %client.base_url(), user = %config.user_id, "starting tui");
    let mut app = App::new(client.base_url(), config.user_id);
    let engine = SyncEngine::new(client, EngineSettings::from(&config));
    let res = rt.block_on(event_loop::run_loop(&mut terminal, &mut app, &engine));
    engine.shutdown();

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    res
}
