//! Picker rendering and the TUI loop.

use std::io::{self, stdout, Stdout};
use std::panic;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Once;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    cursor, event, execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};

use super::app::{App, AppMode};
use super::input::handle_event;
use super::layout::{centered_rect_fixed, PickerLayout};
use super::theme::Theme;
use crate::filter::get_match_indices;
use crate::select::Choice;

/// Blink interval for cursor (in milliseconds).
const CURSOR_BLINK_MS: u64 = 530;

/// Global flag to track if terminal is in raw mode.
static TERMINAL_RAW_MODE: AtomicBool = AtomicBool::new(false);

/// The restoring panic hook is installed once per process.
static PANIC_HOOK: Once = Once::new();

#[cfg(test)]
static PANIC_HOOK_INSTALLS: std::sync::atomic::AtomicUsize = std::sync::atomic::AtomicUsize::new(0);

/// RAII guard for terminal state.
/// Ensures terminal is properly restored even on panic.
pub struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalGuard {
    /// Create a new terminal guard, setting up the terminal for the picker.
    pub fn new() -> Result<Self> {
        setup_panic_hook();

        enable_raw_mode().context("Failed to enable raw mode")?;
        TERMINAL_RAW_MODE.store(true, Ordering::SeqCst);

        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)
            .context("Failed to enter alternate screen")?;

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend).context("Failed to create terminal")?;

        Ok(Self { terminal })
    }

    /// Get a mutable reference to the terminal.
    pub fn terminal(&mut self) -> &mut Terminal<CrosstermBackend<Stdout>> {
        &mut self.terminal
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        TERMINAL_RAW_MODE.store(false, Ordering::SeqCst);
        let _ = execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        );
    }
}

/// Set up a panic hook that restores the terminal. Later calls do nothing.
fn setup_panic_hook() {
    PANIC_HOOK.call_once(|| {
        #[cfg(test)]
        PANIC_HOOK_INSTALLS.fetch_add(1, Ordering::SeqCst);

        let original_hook = panic::take_hook();
        panic::set_hook(Box::new(move |panic_info| {
            if TERMINAL_RAW_MODE.load(Ordering::SeqCst) {
                let _ = disable_raw_mode();
                let _ = execute!(stdout(), LeaveAlternateScreen, cursor::Show);
            }

            original_hook(panic_info);
        }));
    });
}

/// Run the picker until the user chooses or cancels.
///
/// Returns the index of the chosen entry in the app's original choices.
///
/// # Errors
///
/// Returns an error if the terminal cannot be set up or drawn to.
pub fn run_picker(mut app: App, theme: &Theme) -> Result<Option<usize>> {
    let mut guard = TerminalGuard::new()?;

    let result = run_loop(guard.terminal(), &mut app, theme);

    // Restore the terminal before anything else is printed
    drop(guard);

    result?;
    Ok(app.chosen())
}

/// Main picker loop.
fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    theme: &Theme,
) -> Result<()> {
    let mut last_blink = Instant::now();
    let mut blink_state = true;
    let mut page_rows = 1;

    loop {
        if last_blink.elapsed() >= Duration::from_millis(CURSOR_BLINK_MS) {
            blink_state = !blink_state;
            last_blink = Instant::now();
        }

        terminal.draw(|frame| {
            page_rows = render(frame, app, theme, blink_state);
        })?;

        if event::poll(Duration::from_millis(50))? {
            let event = event::read()?;
            if handle_event(app, event, page_rows) {
                break;
            }
            // Reset blink on input
            blink_state = true;
            last_blink = Instant::now();
        }

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}

/// Render the complete picker.
///
/// Returns the number of list rows, used for paging.
pub fn render(frame: &mut Frame, app: &mut App, theme: &Theme, blink_state: bool) -> usize {
    let layout = PickerLayout::new(frame.area());
    let rows = layout.list_rows();
    app.ensure_visible(rows);

    render_header(frame, app, theme, layout.header);
    render_filter(frame, app, theme, layout.filter, blink_state);
    render_list(frame, app, theme, layout.list);
    render_detail(frame, app, theme, layout.detail);
    if layout.footer.height > 0 {
        render_footer(frame, app, theme, layout.footer);
    }

    if app.mode() == &AppMode::Help {
        render_help_overlay(frame, theme);
    }

    rows
}

/// Render the prompt line with the match count.
fn render_header(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let count = if app.visible_count() == app.total_count() {
        format!("{}", app.total_count())
    } else {
        format!("{}/{}", app.visible_count(), app.total_count())
    };

    let line = Line::from(vec![
        Span::styled(format!(" {} ", app.title()), theme.header()),
        Span::styled(format!(" ({count}) "), theme.header()),
    ]);
    frame.render_widget(Paragraph::new(line).style(theme.header()), area);
}

/// Render the filter bar.
fn render_filter(frame: &mut Frame, app: &App, theme: &Theme, area: Rect, blink_state: bool) {
    let line = match app.mode() {
        AppMode::Filter => {
            let cursor = if blink_state { "█" } else { " " };
            Line::from(vec![
                Span::styled(" / ", theme.key()),
                Span::styled(app.filter_text().to_string(), theme.filter_active()),
                Span::styled(cursor, theme.filter_active()),
            ])
        }
        _ if app.filter_text().is_empty() => Line::from(Span::styled(
            " Press / to filter",
            theme.filter_placeholder(),
        )),
        _ => Line::from(vec![
            Span::styled(" / ", theme.key()),
            Span::styled(app.filter_text().to_string(), theme.filter()),
        ]),
    };
    frame.render_widget(Paragraph::new(line), area);
}

/// Render the choice list.
fn render_list(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let visible = app.visible_choices();

    if visible.is_empty() {
        let message = if app.total_count() == 0 {
            "Nothing to choose from"
        } else {
            "No matches"
        };
        let empty = Paragraph::new(Line::from(Span::styled(message, theme.filter_placeholder())))
            .alignment(Alignment::Center);
        frame.render_widget(empty, area);
        return;
    }

    let lines: Vec<Line> = visible
        .iter()
        .enumerate()
        .skip(app.scroll_offset())
        .take(area.height as usize)
        .map(|(position, choice)| {
            choice_line(
                choice,
                position,
                position == app.selected_index(),
                app.filter_text(),
                theme,
            )
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), area);
}

/// Build one list row: quick-select number, then the label with matches highlighted.
fn choice_line<'a>(
    choice: &'a Choice,
    position: usize,
    selected: bool,
    query: &str,
    theme: &Theme,
) -> Line<'a> {
    let number = if position < 9 {
        format!(" {} ", position + 1)
    } else {
        "   ".to_string()
    };

    let base = if selected { theme.selected() } else { theme.choice() };
    let mut spans = vec![Span::styled(number, theme.number()), Span::styled(" ", base)];
    spans.extend(highlight(&choice.label, query, base, theme.matched().patch(base_bg(base))));

    let line = Line::from(spans);
    if selected {
        line.style(base)
    } else {
        line
    }
}

/// Background of `style` as a standalone style, so matches keep the selection bar.
fn base_bg(style: Style) -> Style {
    match style.bg {
        Some(bg) => Style::default().bg(bg),
        None => Style::default(),
    }
}

/// Split `text` into spans, styling characters matched by `query`.
fn highlight<'a>(text: &'a str, query: &str, base: Style, matched: Style) -> Vec<Span<'a>> {
    let indices = get_match_indices(query, text);
    if indices.is_empty() {
        return vec![Span::styled(text, base)];
    }

    text.chars()
        .enumerate()
        .map(|(i, c)| {
            let style = if indices.contains(&i) { matched } else { base };
            Span::styled(c.to_string(), style)
        })
        .collect()
}

/// Render the separator and the selected choice's detail.
fn render_detail(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let detail = app
        .selected_choice()
        .and_then(|choice| choice.detail.as_deref())
        .unwrap_or("");
    let detail_line = Line::from(Span::styled(format!(" {detail}"), theme.detail()));

    let lines = if area.height >= 2 {
        let separator = "─".repeat(area.width as usize);
        vec![
            Line::from(Span::styled(separator, theme.separator())),
            detail_line,
        ]
    } else {
        vec![detail_line]
    };
    frame.render_widget(Paragraph::new(lines), area);
}

/// Render key hints for the current mode.
fn render_footer(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let hints: &[(&str, &str)] = match app.mode() {
        AppMode::Filter => &[("Enter", "run"), ("Esc", "clear"), ("↑↓", "move")],
        _ => &[
            ("Enter", "run"),
            ("1-9", "quick"),
            ("/", "filter"),
            ("?", "help"),
            ("q", "cancel"),
        ],
    };

    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (key, action) in hints {
        spans.push(Span::styled(format!(" {key}"), theme.key()));
        spans.push(Span::styled(format!(" {action} "), theme.footer()));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render the help overlay.
fn render_help_overlay(frame: &mut Frame, theme: &Theme) {
    let area = frame.area();
    let help_area = centered_rect_fixed(44, 14, area);

    frame.render_widget(Clear, help_area);

    let entry = |key: &'static str, text: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {key:<9}"), theme.key()),
            Span::styled(text, theme.detail()),
        ])
    };

    let help_lines = vec![
        Line::from(Span::styled("Keyboard Shortcuts", theme.bold())),
        Line::from(""),
        entry("j/k", "Move down/up"),
        entry("g/G", "First/last item"),
        entry("PgUp/Dn", "Move by a page"),
        Line::from(""),
        entry("Enter", "Run selected"),
        entry("1-9", "Run numbered entry"),
        entry("/", "Filter"),
        entry("q/Esc", "Cancel"),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to close",
            theme.filter_placeholder(),
        )),
    ];

    let help = Paragraph::new(help_lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Help ")
            .border_style(theme.separator()),
    );

    frame.render_widget(help, help_area);
}
