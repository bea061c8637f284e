//! Application main loop.
//!
//! Enters raw mode and the alternate screen, polls keyboard events, translates
//! them into worker commands, and redraws each frame from the latest manager
//! snapshots. Tab switches between the chat and library views; each view's
//! input affordances are disabled while its manager has a request in flight.

use std::io::{self, Stdout};
use std::path::PathBuf;

use crossterm::event::KeyCode;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::{mpsc, watch};

use pdf_qa_client::{ChatSession, Library};

use crate::event::{AppEvent, EventHandler};
use crate::render::{self, Screen, View};
use crate::workers::{ChatCommand, LibraryCommand};

/// View-local input state; the managers hold everything else.
#[derive(Debug, Default)]
struct ViewState {
    view: View,
    chat_input: String,
    chat_scroll: usize,
    selected: usize,
    upload_path: String,
    entering_path: bool,
}

/// Run the TUI until quit: poll events, dispatch commands, render each frame,
/// restore the terminal on exit.
pub async fn run_app(
    chat_rx: watch::Receiver<ChatSession>,
    lib_rx: watch::Receiver<Library>,
    chat_tx: mpsc::UnboundedSender<ChatCommand>,
    lib_tx: mpsc::UnboundedSender<LibraryCommand>,
) -> anyhow::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // The library view shows server truth from the start.
    let _ = lib_tx.send(LibraryCommand::Refresh);

    let event_handler = EventHandler::new();
    let mut vs = ViewState::default();
    let mut last_turns = 0usize;
    let mut upload_in_flight = false;

    loop {
        let chat = chat_rx.borrow().clone();
        let library = lib_rx.borrow().clone();

        if chat.transcript().len() != last_turns {
            last_turns = chat.transcript().len();
            vs.chat_scroll = usize::MAX;
        }
        vs.selected = vs
            .selected
            .min(library.documents().len().saturating_sub(1));

        // A finished upload clears the typed path only on success, so a
        // failed attempt can be retried without retyping.
        if library.is_uploading() {
            upload_in_flight = true;
        } else if upload_in_flight {
            upload_in_flight = false;
            if library.success().is_some() {
                vs.upload_path.clear();
            }
        }

        if let Ok(Some(ev)) = event_handler.poll() {
            match ev {
                AppEvent::Quit => break,
                AppEvent::Key(key) => {
                    handle_key(key.code, &mut vs, &chat, &library, &chat_tx, &lib_tx)
                }
            }
        }

        let mut scroll_info = (0usize, 0usize);
        terminal.draw(|f| {
            let screen = Screen {
                view: vs.view,
                chat: &chat,
                library: &library,
                chat_input: &vs.chat_input,
                chat_scroll: vs.chat_scroll,
                selected: vs.selected,
                upload_path: &vs.upload_path,
                entering_path: vs.entering_path,
            };
            render::draw(f, &screen, &mut scroll_info);
        })?;
        let (total_lines, viewport_height) = scroll_info;
        if vs.view == View::Chat {
            vs.chat_scroll = vs.chat_scroll.min(total_lines.saturating_sub(viewport_height));
        }

        tokio::task::yield_now().await;
    }

    restore_terminal(&mut terminal)?;
    Ok(())
}

fn handle_key(
    code: KeyCode,
    vs: &mut ViewState,
    chat: &ChatSession,
    library: &Library,
    chat_tx: &mpsc::UnboundedSender<ChatCommand>,
    lib_tx: &mpsc::UnboundedSender<LibraryCommand>,
) {
    if code == KeyCode::Tab {
        vs.view = match vs.view {
            View::Chat => View::Library,
            View::Library => View::Chat,
        };
        return;
    }

    match vs.view {
        View::Chat => match code {
            KeyCode::Enter => {
                if !chat.is_pending() && !vs.chat_input.trim().is_empty() {
                    let _ = chat_tx.send(ChatCommand::Submit(std::mem::take(&mut vs.chat_input)));
                }
            }
            KeyCode::Backspace => {
                if !chat.is_pending() {
                    vs.chat_input.pop();
                }
            }
            KeyCode::Char(c) => {
                if !chat.is_pending() {
                    vs.chat_input.push(c);
                }
            }
            KeyCode::Up => vs.chat_scroll = vs.chat_scroll.saturating_sub(1),
            KeyCode::Down => vs.chat_scroll = vs.chat_scroll.saturating_add(1),
            KeyCode::PageUp => vs.chat_scroll = vs.chat_scroll.saturating_sub(10),
            KeyCode::PageDown => vs.chat_scroll = vs.chat_scroll.saturating_add(10),
            KeyCode::Home => vs.chat_scroll = 0,
            KeyCode::End => vs.chat_scroll = usize::MAX,
            _ => {}
        },
        View::Library => {
            if vs.entering_path {
                match code {
                    KeyCode::Enter => {
                        let path = vs.upload_path.trim().to_string();
                        if !path.is_empty() && !library.is_uploading() {
                            let _ = lib_tx.send(LibraryCommand::Upload(PathBuf::from(path)));
                        }
                        vs.entering_path = false;
                    }
                    KeyCode::Esc => vs.entering_path = false,
                    KeyCode::Backspace => {
                        vs.upload_path.pop();
                    }
                    KeyCode::Char(c) => vs.upload_path.push(c),
                    _ => {}
                }
                return;
            }
            match code {
                KeyCode::Up => vs.selected = vs.selected.saturating_sub(1),
                KeyCode::Down => {
                    vs.selected = (vs.selected + 1)
                        .min(library.documents().len().saturating_sub(1));
                }
                KeyCode::Enter => {
                    if let Some(record) = library.documents().get(vs.selected) {
                        let _ = lib_tx.send(LibraryCommand::Inspect(record.id.clone()));
                    }
                }
                KeyCode::Char('d') => {
                    if let Some(record) = library.documents().get(vs.selected) {
                        let _ = lib_tx.send(LibraryCommand::Delete(record.id.clone()));
                    }
                }
                KeyCode::Char('u') => vs.entering_path = true,
                KeyCode::Char('r') => {
                    let _ = lib_tx.send(LibraryCommand::Refresh);
                }
                KeyCode::Esc => {
                    if library.detail().is_some() {
                        let _ = lib_tx.send(LibraryCommand::CloseDetail);
                    }
                }
                _ => {}
            }
        }
    }
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> anyhow::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
