use crate::{
    config,
    state::{AppData, FetchStatus, SharedState, UIStateGuard},
    taxonomy,
    view::SortMode,
};
use anyhow::{Context as _, Result};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Paragraph, Wrap},
    Frame,
};

type Terminal = ratatui::Terminal<ratatui::backend::CrosstermBackend<std::io::Stdout>>;

mod page;
mod player;
mod popup;
mod utils;

const TITLE: &str = "The Pantry";
const SUBTITLE: &str = "A collection of handpicked playlists";

/// runs the application UI rendering loop until the application quits
pub fn run(state: &SharedState) -> Result<()> {
    let mut terminal = init_ui().context("failed to initialize the terminal UI")?;
    let ui_refresh_duration = config::get_config().app_config.app_refresh_duration();

    loop {
        if !state.ui.lock().is_running {
            clean_up(&mut terminal)?;
            return Ok(());
        }

        if let Err(err) = terminal.draw(|frame| render_application(frame, state)) {
            tracing::error!("Failed to render the application: {err:#}");
        }

        std::thread::sleep(ui_refresh_duration);
    }
}

// initializes the application's terminal UI
fn init_ui() -> Result<Terminal> {
    let mut stdout = std::io::stdout();
    crossterm::terminal::enable_raw_mode()?;
    crossterm::execute!(stdout, crossterm::terminal::EnterAlternateScreen)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;
    terminal.clear()?;
    Ok(terminal)
}

/// restores the terminal to its state before the application started
pub fn clean_up(terminal: &mut Terminal) -> Result<()> {
    crossterm::terminal::disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        crossterm::terminal::LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;
    Ok(())
}

/// renders the application
fn render_application(frame: &mut Frame, state: &SharedState) {
    let rect = frame.area();
    let mut ui = state.ui.lock();
    let data = state.data.read();

    // set the background and foreground colors for the application
    frame.render_widget(Block::default().style(ui.theme().app_style()), rect);

    let player_height = if ui.selected_playlist(&data).is_some() {
        6
    } else {
        0
    };
    let [header_rect, chips_rect, page_rect, player_rect] = Layout::vertical([
        Constraint::Length(4),
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(player_height),
    ])
    .areas(rect);

    render_header(frame, &ui, &data, header_rect);
    render_category_chips(frame, &ui, &data, chips_rect);
    if !render_fetch_status(frame, &ui, &data, page_rect) {
        match ui.mode {
            SortMode::Carousel => page::render_carousel(frame, &ui, &data, page_rect),
            SortMode::Category => page::render_grouped(frame, &mut ui, &data, page_rect),
            SortMode::Alphabetical => page::render_alphabetical(frame, &mut ui, &data, page_rect),
        }
    }
    player::render_player(frame, &ui, &data, player_rect);

    if ui.popup.is_some() {
        popup::render_popup(frame, &ui, rect);
    }
}

fn render_header(frame: &mut Frame, ui: &UIStateGuard, data: &AppData, rect: Rect) {
    let theme = ui.theme();

    let mut status = vec![
        Span::styled(ui.mode.label(), theme.accent_style()),
        Span::styled(
            if ui.dark_mode { " • dark" } else { " • light" },
            theme.comment_style(),
        ),
    ];
    if let Some(last_updated) = data.last_updated {
        status.push(Span::styled(
            format!(" • updated {}", last_updated.format("%H:%M")),
            theme.comment_style(),
        ));
    }
    match &data.status {
        FetchStatus::Loading if !data.playlists.is_empty() => {
            status.push(Span::styled(" • refreshing...", theme.comment_style()));
        }
        FetchStatus::Failed(err) if !data.playlists.is_empty() => {
            status.push(Span::styled(format!(" • {err}"), theme.error_style()));
        }
        _ => {}
    }

    let lines = vec![
        Line::styled(TITLE, theme.title_style()),
        Line::styled(SUBTITLE, theme.comment_style()),
        Line::from(status),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), rect);
}

fn render_category_chips(frame: &mut Frame, ui: &UIStateGuard, data: &AppData, rect: Rect) {
    let theme = ui.theme();
    let spans = taxonomy::category_counts(&data.playlists)
        .into_iter()
        .flat_map(|chip| {
            let active = chip.filter() == ui.category_filter;
            [
                Span::styled(
                    format!(" {} {} ({}) ", chip.emoji, chip.name, chip.count),
                    theme.chip_style(active),
                ),
                Span::raw(" "),
            ]
        })
        .collect::<Vec<_>>();
    frame.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        rect,
    );
}

/// renders the loading, error or empty state in place of the page,
/// returns false if there are playlists to render instead
fn render_fetch_status(frame: &mut Frame, ui: &UIStateGuard, data: &AppData, rect: Rect) -> bool {
    let theme = ui.theme();
    let n_visible = ui.visible_playlists(data).len();

    let (message, style) = match &data.status {
        FetchStatus::Idle | FetchStatus::Loading if data.playlists.is_empty() => {
            ("Loading playlists...".to_string(), theme.comment_style())
        }
        FetchStatus::Failed(err) if data.playlists.is_empty() => {
            (format!("Error loading playlists: {err}"), theme.error_style())
        }
        _ if n_visible == 0 => (
            "No playlists found".to_string(),
            theme.comment_style().add_modifier(Modifier::ITALIC),
        ),
        _ => return false,
    };

    let [_, message_rect, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(2),
        Constraint::Fill(1),
    ])
    .areas(rect);
    frame.render_widget(
        Paragraph::new(Line::styled(message, style))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        message_rect,
    );
    true
}
