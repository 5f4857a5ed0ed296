use futures::StreamExt;
use futures::stream::FuturesUnordered;
use tokio::time::MissedTickBehavior;

use super::*;

const TICK: Duration = Duration::from_millis(50);

/// Draws, then waits for either an operation to settle or the next input tick.
///
/// Operations borrow the engine and run concurrently on this task; quitting
/// drops whatever is still in flight.
pub(super) async fn run_loop<S: TodoStore>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    engine: &SyncEngine<S>,
) -> Result<()> {
    let mut inflight: FuturesUnordered<Pending<'_>> = FuturesUnordered::new();
    inflight.push(actions::load(engine));

    let mut tick = tokio::time::interval(TICK);
    tick.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        engine.expire_notice();
        let view = engine.view();
        app.sync_with(engine, &view);

        terminal
            .draw(|f| super::render::draw(f, app, &view))
            .context("draw")?;
        if app.quit {
            break;
        }

        tokio::select! {
            Some(settled) = inflight.next(), if !inflight.is_empty() => app.record(settled),
            _ = tick.tick() => {
                // Stop draining once a key starts an operation so it reads
                // the state those keys produced before more input arrives.
                while !app.quit && event::poll(Duration::ZERO).context("poll")? {
                    let Event::Key(k) = event::read().context("read event")? else {
                        continue;
                    };
                    if k.kind != KeyEventKind::Press {
                        continue;
                    }
                    if let Some(op) = keys::handle_key(app, engine, k) {
                        inflight.push(op);
                        break;
                    }
                }
            }
        }
    }

    if !inflight.is_empty() {
        tracing::debug!(pending = inflight.len(), "dropping in-flight operations on exit");
    }
    Ok(())
}
