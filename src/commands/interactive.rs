//! Interactive command implementation
//!
//! Runs the estimator form in the terminal until the user quits.

use anyhow::Result;
use cost_simulator::{config, form::EstimatorApp, session::EstimatorSession};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{io, path::Path};

/// Execute the interactive command
pub fn execute(config_path: &Path) -> Result<()> {
    // Load before touching the terminal so errors print normally
    let scenario = config::load_scenario(config_path)?;
    let session = EstimatorSession::new(scenario)?;

    run_form(EstimatorApp::new(session))
}

fn run_form(mut app: EstimatorApp) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    terminal.clear()?;

    // Main loop: redraw after every event, each input change has already recomputed
    let result = loop {
        if let Err(e) = terminal.draw(|f| app.render(f)) {
            break Err(e.into());
        }

        match event::read() {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                if app.handle_key(key) {
                    break Ok(());
                }
            }
            Ok(_) => {}
            Err(e) => break Err(e.into()),
        }
    };

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}
