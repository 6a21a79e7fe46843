//! Terminal event handling, dispatched by page.

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

use veneer_engine::{
    App, FilePicker,
    types::{Model, Page},
};

/// Handle terminal events.
/// Returns true if the app should quit.
pub async fn handle_events(app: &mut App) -> Result<bool> {
    // Poll for events with a timeout
    if event::poll(Duration::from_millis(100))?
        && let Event::Key(key) = event::read()?
    {
        // Only handle key press events (not release) - important for Windows
        if key.kind != KeyEventKind::Press {
            return Ok(app.should_quit());
        }

        // Handle Ctrl+C globally
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Ok(true);
        }

        // The preview modal captures input while it is open.
        if app.open_preview().is_some() {
            handle_preview_modal(app, key).await;
            return Ok(app.should_quit());
        }

        match app.page() {
            Page::Welcome => handle_welcome(app, key),
            Page::Upload => handle_upload(app, key).await,
            Page::Analyze => handle_analyze(app, key).await,
            Page::Results => handle_results(app, key).await,
        }
    }

    Ok(app.should_quit())
}

/// Rescan the working directory and move to the upload page.
fn open_picker(app: &mut App) {
    let scanned = std::env::current_dir().and_then(|dir| FilePicker::scan(&dir));
    match scanned {
        Ok(picker) => {
            app.set_picker(picker);
            app.navigate(Page::Upload);
            app.clear_status();
        }
        Err(e) => app.set_status(format!("Failed to list directory: {e}")),
    }
}

fn handle_welcome(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.request_quit(),
        KeyCode::Char('n') | KeyCode::Enter => open_picker(app),
        _ => {}
    }
}

async fn handle_upload(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.request_quit(),
        KeyCode::Esc => app.navigate(Page::Welcome),
        KeyCode::Char('k') | KeyCode::Up => app.picker_mut().move_up(),
        KeyCode::Char('j') | KeyCode::Down => app.picker_mut().move_down(),
        KeyCode::Char(' ') => app.picker_mut().toggle_current(),
        KeyCode::Char('u') | KeyCode::Enter => {
            if let Err(e) = app.upload_selected().await {
                app.report_error(&e);
            }
        }
        _ => {}
    }
}

async fn handle_analyze(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.request_quit(),
        KeyCode::Esc => app.navigate(Page::Welcome),
        KeyCode::Char('u') => open_picker(app),
        KeyCode::Char(c @ '1'..='4') => {
            let index = (c as usize) - ('1' as usize);
            if let Some(model) = Model::all().get(index) {
                app.toggle_model(*model);
            }
        }
        KeyCode::Char('a') | KeyCode::Enter => {
            if let Err(e) = app.analyze().await {
                app.report_error(&e);
            }
        }
        KeyCode::Char('r') => app.navigate(Page::Results),
        _ => {}
    }
}

async fn handle_results(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.request_quit(),
        KeyCode::Esc => app.navigate(Page::Analyze),
        KeyCode::Char('k') | KeyCode::Up => app.cursor_up(),
        KeyCode::Char('j') | KeyCode::Down => app.cursor_down(),
        KeyCode::Char('p') | KeyCode::Enter => request_preview_for_selected(app).await,
        KeyCode::Char('n') => app.start_new(),
        _ => {}
    }
}

async fn request_preview_for_selected(app: &mut App) {
    let Some(flat) = app.selected_issue() else {
        return;
    };
    if let Err(e) = app.preview(flat.issue.id, flat.model).await {
        app.report_error(&e);
    }
}

async fn handle_preview_modal(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.close_preview(),
        KeyCode::Char('d') => app.discard_preview(),
        // Re-issue: replaces the record for the same issue.
        KeyCode::Char('p') => {
            let reissue = app.open_preview().map(|(id, _)| id.clone()).and_then(|id| {
                app.issues()
                    .into_iter()
                    .find(|flat| flat.issue.id == id)
                    .map(|flat| (id, flat.model))
            });
            if let Some((id, model)) = reissue
                && let Err(e) = app.preview(id, model).await
            {
                app.report_error(&e);
            }
        }
        _ => {}
    }
}
