//! Frame drawing for the two views.
//!
//! Chat: transcript with role prefixes on top, input box below; the input
//! title doubles as the pending/error indicator. Library: document rows with
//! a selection marker, an optional detail panel for the inspected PDF, and a
//! status box that switches to a path prompt while an upload target is typed.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap},
    Frame,
};

use pdf_qa_client::{ChatSession, Library, Role};

/// Which of the two routes is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Chat,
    Library,
}

/// Everything one frame needs: manager snapshots plus view-local input state.
pub struct Screen<'a> {
    pub view: View,
    pub chat: &'a ChatSession,
    pub library: &'a Library,
    pub chat_input: &'a str,
    pub chat_scroll: usize,
    pub selected: usize,
    pub upload_path: &'a str,
    pub entering_path: bool,
}

/// Wrap content by width, counting chars so UTF-8 never splits mid-sequence.
fn wrap_text(s: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![s.to_string()];
    }
    let mut lines = Vec::new();
    for para in s.split('\n') {
        let mut line = String::new();
        for ch in para.chars() {
            if line.chars().count() >= width {
                lines.push(std::mem::take(&mut line));
            }
            line.push(ch);
        }
        if !line.is_empty() {
            lines.push(line);
        }
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Draw one frame; writes (total transcript lines, viewport height) into `out`
/// so the caller can clamp the chat scroll offset.
pub fn draw(f: &mut Frame, screen: &Screen, out: &mut (usize, usize)) {
    match screen.view {
        View::Chat => draw_chat(f, screen, out),
        View::Library => draw_library(f, screen),
    }
}

fn draw_chat(f: &mut Frame, screen: &Screen, out: &mut (usize, usize)) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(4)])
        .split(f.area());

    let conv_area = chunks[0];
    let content_width = conv_area.width.saturating_sub(3) as usize; // border + scrollbar

    let block = Block::default()
        .title(" PDF Q&A │ Chat ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let mut text_lines: Vec<Line> = Vec::new();
    for (idx, turn) in screen.chat.transcript().iter().enumerate() {
        if idx > 0 {
            text_lines.push(Line::from(Span::raw("")));
        }
        let (prefix, color) = match turn.role {
            Role::User => ("You ", Color::Cyan),
            Role::Bot => ("Bot ", Color::Green),
        };
        let wrapped = wrap_text(&turn.text, content_width.max(40));
        for (i, line) in wrapped.into_iter().enumerate() {
            let pref = if i == 0 { prefix } else { "    " };
            text_lines.push(Line::from(vec![
                Span::styled(pref, Style::default().fg(color).add_modifier(Modifier::BOLD)),
                Span::raw(line),
            ]));
        }
    }
    if screen.chat.is_pending() {
        if !text_lines.is_empty() {
            text_lines.push(Line::from(Span::raw("")));
        }
        text_lines.push(Line::from(Span::styled(
            "Loading...",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let content_height = conv_area.height.saturating_sub(2) as usize;
    let total_lines = text_lines.len();
    let scroll_offset = screen.chat_scroll.min(total_lines.saturating_sub(content_height));

    let inner = block.inner(conv_area);
    let paragraph = Paragraph::new(Text::from(text_lines))
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((scroll_offset as u16, 0));
    f.render_widget(paragraph, conv_area);

    if total_lines > content_height {
        let mut scrollbar_state = ScrollbarState::new(total_lines)
            .position(scroll_offset)
            .viewport_content_length(content_height);
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .thumb_symbol("█")
            .track_symbol(Some("░"));
        f.render_stateful_widget(scrollbar, inner, &mut scrollbar_state);
    }

    let input_title = if let Some(err) = screen.chat.error() {
        format!(" Error: {} ", err.chars().take(48).collect::<String>())
    } else if screen.chat.is_pending() {
        " Waiting for reply… ".to_string()
    } else {
        " Ask a question ".to_string()
    };
    let border_color = if screen.chat.error().is_some() {
        Color::Red
    } else {
        Color::Blue
    };
    let hint = " Enter send │ Tab library │ ↑↓ scroll │ Ctrl+Q quit ";
    let input_block = Block::default()
        .title(input_title)
        .title_bottom(Line::from(Span::styled(hint, Style::default().fg(Color::DarkGray))))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let input = Paragraph::new(screen.chat_input)
        .block(input_block)
        .wrap(Wrap { trim: false })
        .style(if screen.chat.is_pending() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        });
    f.render_widget(input, chunks[1]);

    out.0 = total_lines;
    out.1 = content_height;
}

fn draw_library(f: &mut Frame, screen: &Screen) {
    let library = screen.library;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(4), Constraint::Length(3)])
        .split(f.area());

    if let Some(detail) = library.detail() {
        let halves = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(chunks[0]);
        draw_document_rows(f, screen, halves[0]);

        let width = halves[1].width.saturating_sub(2) as usize;
        let mut lines: Vec<Line> = Vec::new();
        for chunk in &detail.chunks {
            if !lines.is_empty() {
                lines.push(Line::from(Span::raw("")));
            }
            lines.push(Line::from(Span::styled(
                format!("Chunk {}:", chunk.chunk_index + 1),
                Style::default().add_modifier(Modifier::BOLD),
            )));
            for line in wrap_text(&chunk.text, width.max(40)) {
                lines.push(Line::from(Span::raw(line)));
            }
        }
        let block = Block::default()
            .title(format!(" PDF: {} ", detail.filename))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow));
        f.render_widget(
            Paragraph::new(Text::from(lines)).block(block).wrap(Wrap { trim: false }),
            halves[1],
        );
    } else {
        draw_document_rows(f, screen, chunks[0]);
    }

    draw_library_status(f, screen, chunks[1]);
}

fn draw_document_rows(f: &mut Frame, screen: &Screen, area: Rect) {
    let library = screen.library;
    let title = if library.is_loading() {
        " PDF Q&A │ Library │ loading… ".to_string()
    } else {
        format!(" PDF Q&A │ Library ({} PDFs) ", library.documents().len())
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(
        format!("  {:<28} {:<26} {}", "Filename", "ID", "Uploaded"),
        Style::default().fg(Color::DarkGray),
    )));
    for (idx, record) in library.documents().iter().enumerate() {
        let marker = if idx == screen.selected { "> " } else { "  " };
        let style = if idx == screen.selected {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(
            format!(
                "{}{:<28} {:<26} {}",
                marker,
                record.filename,
                record.id,
                record.upload_date.as_deref().unwrap_or("-")
            ),
            style,
        )));
    }
    if library.documents().is_empty() && !library.is_loading() {
        lines.push(Line::from(Span::styled(
            "  No PDFs uploaded.",
            Style::default().fg(Color::DarkGray),
        )));
    }

    f.render_widget(
        Paragraph::new(Text::from(lines)).block(block),
        area,
    );
}

fn draw_library_status(f: &mut Frame, screen: &Screen, area: Rect) {
    let library = screen.library;

    if screen.entering_path {
        let block = Block::default()
            .title(" Upload path (Enter to upload, Esc to cancel) ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow));
        f.render_widget(Paragraph::new(screen.upload_path).block(block), area);
        return;
    }

    let (message, color) = if library.is_uploading() {
        ("Uploading...".to_string(), Color::Yellow)
    } else if let Some(err) = library.error() {
        (err.to_string(), Color::Red)
    } else if let Some(msg) = library.success() {
        (msg.to_string(), Color::Green)
    } else {
        (
            "u upload │ Enter view │ d delete │ r refresh │ Esc close │ Tab chat".to_string(),
            Color::DarkGray,
        )
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue));
    f.render_widget(
        Paragraph::new(Span::styled(message, Style::default().fg(color))).block(block),
        area,
    );
}
