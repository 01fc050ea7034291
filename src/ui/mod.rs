//! Terminal front end.
//!
//! A full-screen view with the keypad and the AI solver as two modes, plus a
//! history overlay. Input handling is synchronous; solves run on the
//! [`AiWorker`] thread and their results are picked up between frames.

mod app;
mod keys;
mod render;

pub use app::App;
pub use keys::{Command, Mode, command_for};

use std::io::stdout;
use std::time::Duration;

use anyhow::Context;
use crossterm::{
    ExecutableCommand,
    event::{self, Event},
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::ai::{AiError, AiWorker, SolveDone, SolveOutcome};

/// How long to wait for input before checking for finished solves.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Run the UI until the user quits.
pub fn run(mut app: App, worker: AiWorker) -> anyhow::Result<()> {
    terminal::enable_raw_mode().context("failed to enable raw mode")?;
    stdout()
        .execute(EnterAlternateScreen)
        .context("failed to enter alternate screen")?;

    struct Cleanup;
    impl Drop for Cleanup {
        fn drop(&mut self) {
            let _ = stdout().execute(LeaveAlternateScreen);
            let _ = terminal::disable_raw_mode();
        }
    }
    let _cleanup = Cleanup;

    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

    loop {
        loop {
            match worker.try_recv() {
                Ok(Some(done)) => app.finish_solve(done),
                Ok(None) => break,
                Err(e) => {
                    app.abandon_solve(e);
                    break;
                }
            }
        }

        terminal
            .draw(|frame| render::draw(frame, &app))
            .context("draw error")?;

        if event::poll(POLL_INTERVAL).context("event poll error")?
            && let Event::Key(key) = event::read().context("event read error")?
            && let Some(command) = command_for(key, app.mode())
            && let Some(job) = app.handle_command(command)
            && let Err(job) = worker.submit(job)
        {
            tracing::error!("AI worker is gone, dropping prompt");
            app.finish_solve(SolveDone {
                prompt: job.prompt,
                outcome: SolveOutcome::Failed(AiError::WorkerStopped),
            });
        }

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}
