// Rendering - a pure view of the session; the only thing it reports back
// is where each board cell ended up, for mouse hit-testing.

use crate::app::{App, SIZE_KEYS};
use crate::board::Cell;
use crate::display::{consumed_colors, ui_colors, CellDisplay, CellVisual, ThemeMode, UiColors};
use crate::score_store::KeyValueStore;
use crate::session::{GameState, Preferences};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const SIDE_PANEL_WIDTH: u16 = 30;

/// Draw the whole screen; returns the board cell areas in row-major order
pub fn render<S: KeyValueStore>(f: &mut Frame, app: &App<S>) -> Vec<Rect> {
    let game = app.game();
    let prefs = game.preferences();
    let colors = ui_colors(ThemeMode::from_dark(prefs.dark_mode));

    let area = f.area();
    f.render_widget(
        Block::default().style(Style::default().bg(colors.base).fg(colors.text)),
        area,
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(8),    // Board + side panel
            Constraint::Length(1), // Key hints
        ])
        .split(area);

    render_header(f, chunks[0], app, &colors);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(SIDE_PANEL_WIDTH)])
        .split(chunks[1]);

    let cell_areas = render_board(f, body[0], app, &colors);
    render_side_panel(f, body[1], app, &colors);
    render_hints(f, chunks[2], app.sizes(), &colors);

    if app.show_help() {
        render_help(f, &colors);
        // Cells are covered by the popup
        return Vec::new();
    }
    cell_areas
}

/// Square-ish cell rectangles (two columns per row of height), centered in `area`
pub fn board_layout(area: Rect, size: usize) -> Vec<Rect> {
    if size == 0 {
        return Vec::new();
    }
    let n = size as u16;
    let cell_height = (area.height / n).min(area.width / (2 * n));
    if cell_height == 0 {
        return Vec::new();
    }
    let cell_width = cell_height * 2;
    let offset_x = area.x + (area.width - cell_width * n) / 2;
    let offset_y = area.y + (area.height - cell_height * n) / 2;

    (0..size * size)
        .map(|index| {
            let row = (index / size) as u16;
            let col = (index % size) as u16;
            Rect::new(
                offset_x + col * cell_width,
                offset_y + row * cell_height,
                cell_width,
                cell_height,
            )
        })
        .collect()
}

/// Index of the cell area containing the terminal position
pub fn hit_test(areas: &[Rect], column: u16, row: u16) -> Option<usize> {
    areas.iter().position(|area| {
        column >= area.x
            && column < area.x.saturating_add(area.width)
            && row >= area.y
            && row < area.y.saturating_add(area.height)
    })
}

fn render_header<S: KeyValueStore>(f: &mut Frame, area: Rect, app: &App<S>, colors: &UiColors) {
    let game = app.game();
    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let status = app.status().unwrap_or(match game.state() {
        GameState::Ready => "Study the board, then start",
        GameState::Playing => "Find the numbers in order",
        GameState::Finished => "Board cleared",
    });

    let title = Paragraph::new(vec![
        Line::from(vec![Span::styled(
            "Schulte Table",
            Style::default()
                .fg(colors.accent)
                .add_modifier(Modifier::BOLD),
        )]),
        Line::from(vec![Span::styled(status, Style::default().fg(colors.muted))]),
    ])
    .block(bordered("Status", colors));
    f.render_widget(title, header_chunks[0]);

    let button = Paragraph::new(vec![Line::from(vec![
        Span::styled("[s] ", Style::default().fg(colors.muted)),
        Span::styled(
            game.button_label(),
            Style::default()
                .fg(colors.accent)
                .add_modifier(Modifier::BOLD),
        ),
    ])])
    .alignment(Alignment::Center)
    .block(bordered("Game", colors));
    f.render_widget(button, header_chunks[1]);
}

fn render_board<S: KeyValueStore>(
    f: &mut Frame,
    area: Rect,
    app: &App<S>,
    colors: &UiColors,
) -> Vec<Rect> {
    let game = app.game();
    let block = bordered(&format!("{} board", game.grid_size()), colors);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let cell_areas = board_layout(inner, game.grid_size().get());
    if cell_areas.is_empty() {
        let msg = Paragraph::new("Area too small for the board")
            .style(Style::default().fg(colors.error));
        f.render_widget(msg, inner);
        return cell_areas;
    }

    let cursor_index = game
        .grid_size()
        .index_of(app.cursor().0, app.cursor().1)
        .ok();
    for (index, (cell, cell_area)) in game.board().cells().iter().zip(&cell_areas).enumerate() {
        render_cell(
            f,
            *cell_area,
            cell,
            game.preferences(),
            colors,
            cursor_index == Some(index),
        );
    }
    cell_areas
}

fn cell_style(cell: &Cell, prefs: &Preferences, colors: &UiColors) -> Style {
    match cell.visual() {
        CellVisual::Open => Style::default().bg(colors.base).fg(colors.text),
        CellVisual::Consumed => {
            let consumed = consumed_colors(prefs);
            Style::default().bg(consumed.background).fg(consumed.foreground)
        }
        CellVisual::Flagged => Style::default().bg(colors.error).fg(Color::White),
    }
}

fn render_cell(
    f: &mut Frame,
    area: Rect,
    cell: &Cell,
    prefs: &Preferences,
    colors: &UiColors,
    is_cursor: bool,
) {
    let style = cell_style(cell, prefs, colors);
    let border_style = if is_cursor {
        Style::default()
            .fg(colors.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(colors.border)
    };

    if area.height >= 3 {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .style(style);
        let inner = block.inner(area);
        f.render_widget(block, area);
        // Vertically center the label
        let mut lines = vec![Line::from(""); (inner.height.saturating_sub(1) / 2) as usize];
        lines.push(Line::from(cell.label()));
        f.render_widget(
            Paragraph::new(lines).alignment(Alignment::Center).style(style),
            inner,
        );
    } else {
        let style = if is_cursor {
            style.add_modifier(Modifier::REVERSED | Modifier::BOLD)
        } else {
            style
        };
        f.render_widget(
            Paragraph::new(cell.label()).alignment(Alignment::Center).style(style),
            area,
        );
    }
}

fn render_side_panel<S: KeyValueStore>(f: &mut Frame, area: Rect, app: &App<S>, colors: &UiColors) {
    let game = app.game();
    let prefs = game.preferences();
    let label = Style::default().fg(colors.muted);
    let value = Style::default().fg(colors.text).add_modifier(Modifier::BOLD);

    let mut size_spans = vec![Span::styled("Size   ", label)];
    for &size in app.sizes() {
        let text = format!(" {}x{} ", size, size);
        if size == game.grid_size().get() {
            size_spans.push(Span::styled(
                text,
                Style::default()
                    .fg(colors.base)
                    .bg(colors.accent)
                    .add_modifier(Modifier::BOLD),
            ));
        } else {
            size_spans.push(Span::styled(text, Style::default().fg(colors.text)));
        }
    }

    let swatch = consumed_colors(&Preferences {
        show_colors: true,
        ..*prefs
    });
    let on_off = |flag: bool| if flag { "on" } else { "off" };

    let lines = vec![
        Line::from(vec![
            Span::styled("Target ", label),
            Span::styled(
                game.target_display(),
                Style::default()
                    .fg(colors.accent)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Time   ", label),
            Span::styled(game.timer_display(), value),
        ]),
        Line::from(vec![
            Span::styled("Best   ", label),
            Span::styled(game.best_display(), value),
        ]),
        Line::from(""),
        Line::from(size_spans),
        Line::from(vec![
            Span::styled("Color  ", label),
            Span::styled(
                format!(" {} ", prefs.click_color),
                Style::default().bg(swatch.background).fg(swatch.foreground),
            ),
        ]),
        Line::from(vec![
            Span::styled("Tint   ", label),
            Span::styled(on_off(prefs.show_colors), value),
        ]),
        Line::from(vec![
            Span::styled("Dark   ", label),
            Span::styled(on_off(prefs.dark_mode), value),
        ]),
    ];

    let panel = Paragraph::new(lines)
        .block(bordered("Score", colors))
        .wrap(Wrap { trim: false });
    f.render_widget(panel, area);
}

/// Size keys that select an offered size: `3-6` when contiguous, else `3/5/9`
pub fn size_key_hint(sizes: &[usize]) -> String {
    let mut keys: Vec<usize> = sizes
        .iter()
        .copied()
        .filter(|size| SIZE_KEYS.contains(size))
        .collect();
    keys.sort_unstable();
    keys.dedup();
    match (keys.first(), keys.last()) {
        (Some(first), Some(last)) if keys.len() > 2 && last - first + 1 == keys.len() => {
            format!("{}-{}", first, last)
        }
        _ => keys
            .iter()
            .map(|size| size.to_string())
            .collect::<Vec<_>>()
            .join("/"),
    }
}

fn render_hints(f: &mut Frame, area: Rect, sizes: &[usize], colors: &UiColors) {
    let hints = Paragraph::new(format!(
        "s start/reset  arrows+enter or mouse click  {} size  c color  v tint  d dark  h help  q quit",
        size_key_hint(sizes)
    ))
    .style(Style::default().fg(colors.muted));
    f.render_widget(hints, area);
}

fn render_help(f: &mut Frame, colors: &UiColors) {
    let area = f.area();
    let popup_area = centered_rect(70, 70, area);
    f.render_widget(Clear, popup_area);

    let help_text = vec![
        Line::from("Schulte Table - Help"),
        Line::from(""),
        Line::from("Click the numbers in ascending order as fast as you can."),
        Line::from("The clock starts at your first correct click, so take"),
        Line::from("your time studying the board after pressing start."),
        Line::from(""),
        Line::from("Keyboard Commands:"),
        Line::from("  s            - Start / reset / play again"),
        Line::from("  arrows       - Move the cursor"),
        Line::from("  enter, space - Click the cell under the cursor"),
        Line::from("  3-9          - Pick a grid size (if offered)"),
        Line::from("  c / C        - Next / previous click color"),
        Line::from("  v            - Toggle colored cells"),
        Line::from("  d            - Toggle dark mode"),
        Line::from("  h, ?         - Toggle this help screen"),
        Line::from("  q, esc       - Quit"),
        Line::from(""),
        Line::from("Best times are kept per grid size."),
        Line::from(""),
        Line::from("Press 'h' again to close this help screen"),
    ];

    let help_widget = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Help")
                .title_style(Style::default().fg(colors.accent))
                .border_style(Style::default().fg(colors.border)),
        )
        .wrap(Wrap { trim: true })
        .style(Style::default().bg(colors.base).fg(colors.text));
    f.render_widget(help_widget, popup_area);
}

fn bordered<'a>(title: &str, colors: &UiColors) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .title(title.to_string())
        .border_style(Style::default().fg(colors.border))
        .title_style(Style::default().fg(colors.muted))
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
