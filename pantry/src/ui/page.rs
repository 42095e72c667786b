use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph, Wrap},
    Frame,
};

use super::utils::{construct_block, key_hint};
use crate::{
    carousel::{self, SlotTransform},
    command::Command,
    config::Theme,
    state::{AppData, CategorizedPlaylist, UIStateGuard},
    taxonomy,
    view::{self, GroupedRow, SortMode},
};

const PLAYING_ICON: &str = "▶";

/// style of a carousel card, fading with the card's distance from the focus
fn card_style(theme: &Theme, transform: &SlotTransform) -> Style {
    if transform.opacity >= 1.0 {
        Style::default().add_modifier(Modifier::BOLD)
    } else if transform.opacity >= 0.5 {
        Style::default()
    } else {
        theme.comment_style().add_modifier(Modifier::DIM)
    }
}

fn render_card(
    frame: &mut Frame,
    theme: &Theme,
    playlist: &CategorizedPlaylist,
    transform: &SlotTransform,
    is_playing: bool,
    rect: Rect,
) {
    let is_focused = transform.layer == 2;
    let block = construct_block(playlist.name().to_string(), theme, is_focused);

    let mut lines = vec![
        Line::from(format!("{} {}", playlist.category_emoji, playlist.category)),
        Line::from(""),
        Line::from(playlist.playlist.description.clone()),
        Line::styled(
            format!("{} tracks", playlist.playlist.track_count),
            theme.comment_style(),
        ),
    ];
    if is_playing {
        lines.push(Line::from(""));
        lines.push(Line::styled(
            format!("{PLAYING_ICON} playing"),
            theme.accent_style(),
        ));
    }

    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .style(card_style(theme, transform))
            .wrap(Wrap { trim: true }),
        rect,
    );
}

/// renders the carousel: the focused playlist in the middle, its neighbors
/// shrinking and fading towards both sides
pub fn render_carousel(frame: &mut Frame, ui: &UIStateGuard, data: &AppData, rect: Rect) {
    let theme = ui.theme();
    let playlists = ui.visible_playlists(data);
    let slots = carousel::visible_slots(playlists.len(), ui.carousel_index);
    let transforms = slots
        .iter()
        .map(|slot| SlotTransform::for_offset(slot.offset))
        .collect::<Vec<_>>();

    let [cards_rect, footer_rect] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(rect);
    let columns = Layout::horizontal(
        transforms
            .iter()
            .map(|transform| Constraint::Fill((transform.scale * 100.0) as u16)),
    )
    .spacing(1)
    .split(cards_rect);

    for ((slot, transform), column) in slots.iter().zip(&transforms).zip(columns.iter()) {
        let playlist = playlists[slot.index];
        // cards away from the focus sit lower and are shorter
        let top = (transform.translate_y / 25) as u16;
        let height = (f32::from(column.height) * transform.scale) as u16;
        let [_, card_rect, _] = Layout::vertical([
            Constraint::Length(top),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .areas(*column);

        let is_playing = ui.selected_playlist.as_deref() == Some(playlist.id());
        render_card(frame, theme, playlist, transform, is_playing, card_rect);
    }

    if !playlists.is_empty() {
        let footer = format!(
            "{} {} / {} {}",
            key_hint(Command::PreviousPlaylist),
            ui.carousel_index % playlists.len() + 1,
            playlists.len(),
            key_hint(Command::NextPlaylist),
        );
        frame.render_widget(
            Paragraph::new(Line::styled(footer, theme.comment_style()))
                .alignment(Alignment::Center),
            footer_rect,
        );
    }
}

fn playlist_item<'a>(
    theme: &Theme,
    playlist: &CategorizedPlaylist,
    is_playing: bool,
    indent: &'a str,
    show_category: bool,
) -> ListItem<'a> {
    let mut spans = vec![
        Span::raw(indent),
        Span::styled(
            if is_playing {
                format!("{PLAYING_ICON} ")
            } else {
                "  ".to_string()
            },
            theme.accent_style(),
        ),
    ];
    if show_category {
        spans.push(Span::raw(format!("{} ", playlist.category_emoji)));
    }
    spans.push(Span::raw(playlist.name().to_string()));
    spans.push(Span::styled(
        format!(" • {}", playlist.summary()),
        theme.comment_style(),
    ));
    ListItem::new(Line::from(spans))
}

fn render_list(
    frame: &mut Frame,
    ui: &mut UIStateGuard,
    items: Vec<ListItem<'_>>,
    title: String,
    rect: Rect,
) {
    let theme = ui.theme();
    let n_items = items.len();
    if ui.list_state.selected().is_some_and(|id| id >= n_items) {
        ui.list_state.select(Some(n_items.saturating_sub(1)));
    }

    let list = List::new(items)
        .highlight_style(theme.selection_style())
        .block(construct_block(title, theme, true));
    frame.render_stateful_widget(list, rect, &mut ui.list_state);
}

/// renders playlists grouped by category, each category collapsible
pub fn render_grouped(frame: &mut Frame, ui: &mut UIStateGuard, data: &AppData, rect: Rect) {
    let theme = ui.theme();
    let groups = taxonomy::group_playlists_by_category(ui.visible_playlists(data));
    let rows = view::grouped_rows(&groups, &ui.collapsed_categories);

    let items = rows
        .iter()
        .map(|row| match *row {
            GroupedRow::Category {
                name,
                emoji,
                count,
                collapsed,
            } => ListItem::new(Line::from(vec![
                Span::styled(if collapsed { "▸ " } else { "▾ " }, theme.comment_style()),
                Span::styled(format!("{emoji} {name}"), theme.title_style()),
                Span::styled(format!(" ({count})"), theme.comment_style()),
            ])),
            GroupedRow::Playlist(p) => {
                let is_playing = ui.selected_playlist.as_deref() == Some(p.id());
                playlist_item(theme, p, is_playing, "  ", false)
            }
        })
        .collect::<Vec<_>>();

    render_list(frame, ui, items, SortMode::Category.label().to_string(), rect);
}

/// renders playlists sorted by name
pub fn render_alphabetical(frame: &mut Frame, ui: &mut UIStateGuard, data: &AppData, rect: Rect) {
    let theme = ui.theme();
    let items = ui
        .visible_playlists(data)
        .into_iter()
        .map(|p| {
            let is_playing = ui.selected_playlist.as_deref() == Some(p.id());
            playlist_item(theme, p, is_playing, "", true)
        })
        .collect::<Vec<_>>();

    render_list(
        frame,
        ui,
        items,
        SortMode::Alphabetical.label().to_string(),
        rect,
    );
}
