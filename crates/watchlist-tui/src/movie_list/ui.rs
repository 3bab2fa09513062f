//! TUI rendering logic for the movie list.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use super::pagination::PageSlot;
use super::projection::{Card, GridContent, HEADING, LOADING_TEXT, Projection, rating_stars};

/// Cards per grid row.
const COLUMNS: usize = 3;

/// Height of one card including its border.
const CARD_HEIGHT: u16 = 5;

/// Draws the movie list. Returns the largest useful grid scroll offset.
#[allow(clippy::indexing_slicing)]
pub fn draw(frame: &mut Frame, projection: &Projection<'_>, scroll: usize) -> usize {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // heading
            Constraint::Length(3), // filter bar
            Constraint::Min(CARD_HEIGHT),
            Constraint::Length(1), // pagination
            Constraint::Length(3), // footer
        ])
        .split(frame.area());

    let heading = Paragraph::new(HEADING)
        .alignment(Alignment::Center)
        .style(Style::default().add_modifier(Modifier::BOLD));
    frame.render_widget(heading, chunks[0]);

    draw_filter_bar(frame, chunks[1], projection);
    let max_scroll = draw_grid(frame, chunks[2], &projection.grid, scroll);
    draw_pagination(frame, chunks[3], projection);
    draw_footer(frame, chunks[4]);

    max_scroll
}

/// Draws the selector labels.
fn draw_filter_bar(frame: &mut Frame, area: Rect, projection: &Projection<'_>) {
    let label = Style::default().fg(Color::Yellow);
    let filters = &projection.filters;
    let line = Line::from(vec![
        Span::styled("Genre: ", label),
        Span::raw(filters.genre.as_str()),
        Span::raw("   "),
        Span::styled("Watched: ", label),
        Span::raw(filters.watched),
        Span::raw("   "),
        Span::styled("Rating: ", label),
        Span::raw(filters.rating.as_str()),
        Span::raw("   "),
        Span::styled("Per page: ", label),
        Span::raw(filters.page_size.to_string()),
    ]);

    let block = Block::default().borders(Borders::ALL).title(" Filters ");
    frame.render_widget(Paragraph::new(line).block(block), area);
}

/// Draws the grid region. Returns the largest useful scroll offset.
fn draw_grid(frame: &mut Frame, area: Rect, grid: &GridContent<'_>, scroll: usize) -> usize {
    let cards = match grid {
        GridContent::Loading => {
            let loading = Paragraph::new(LOADING_TEXT)
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Cyan));
            frame.render_widget(loading, area);
            return 0;
        }
        GridContent::Error(message) => {
            let error = Paragraph::new(*message)
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Red))
                .wrap(Wrap { trim: true });
            frame.render_widget(error, area);
            return 0;
        }
        GridContent::Cards(cards) => cards,
    };

    if cards.is_empty() {
        let empty = Paragraph::new("No movies found")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, area);
        return 0;
    }

    let rows: Vec<&[Card<'_>]> = cards.chunks(COLUMNS).collect();
    let visible = area
        .height
        .checked_div(CARD_HEIGHT)
        .map_or(1, usize::from)
        .max(1);
    let max_scroll = rows.len().saturating_sub(visible);
    let scroll = scroll.min(max_scroll);

    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(CARD_HEIGHT); visible])
        .split(area);
    let column_constraints = vec![Constraint::Ratio(1, 3); COLUMNS];

    for (row, row_area) in rows.iter().skip(scroll).zip(row_areas.iter()) {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(column_constraints.clone())
            .split(*row_area);
        for (card, cell) in row.iter().zip(cells.iter()) {
            draw_card(frame, *cell, card);
        }
    }

    max_scroll
}

/// Draws one movie card.
fn draw_card(frame: &mut Frame, area: Rect, card: &Card<'_>) {
    let movie = card.movie;
    let border_style = if movie.watched {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    };

    let genre = movie.genre.as_deref().unwrap_or("--");
    let year = movie
        .year
        .map_or_else(|| String::from("--"), |y| y.to_string());
    let watched = if movie.watched {
        Span::styled("\u{2713} Watched", Style::default().fg(Color::Green))
    } else {
        Span::styled("\u{25cb} Not watched", Style::default().fg(Color::DarkGray))
    };

    let lines = vec![
        Line::from(format!("{genre} \u{b7} {year}")),
        Line::from(watched),
        Line::from(Span::styled(
            rating_stars(movie.rating),
            Style::default().fg(Color::Yellow),
        )),
    ];

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", movie.title))
            .border_style(border_style),
    );
    frame.render_widget(widget, area);
}

/// Draws the page strip: `< Prev  1 … 4 [5] 6 … 20  Next >`.
fn draw_pagination(frame: &mut Frame, area: Rect, projection: &Projection<'_>) {
    let control = &projection.pagination;
    let current = control.current().get();
    let enabled = Style::default();
    let disabled = Style::default().fg(Color::DarkGray);

    let mut spans = vec![Span::styled(
        "\u{2039} Prev ",
        if control.previous().is_some() {
            enabled
        } else {
            disabled
        },
    )];
    for slot in control.slots() {
        spans.push(match slot {
            PageSlot::Page(page) if page == current => Span::styled(
                format!(" {page} "),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED),
            ),
            PageSlot::Page(page) => Span::raw(format!(" {page} ")),
            PageSlot::Gap => Span::styled(" \u{2026} ", disabled),
        });
    }
    spans.push(Span::styled(
        " Next \u{203a}",
        if control.next().is_some() {
            enabled
        } else {
            disabled
        },
    ));

    let strip = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    frame.render_widget(strip, area);
}

/// Draws the footer with key hints.
fn draw_footer(frame: &mut Frame, area: Rect) {
    let help_text = Line::from(vec![Span::raw(
        "g/G: genre  w/W: watched  s/S: rating  +/-: per page  \u{2190}\u{2192}/h/l: page  \
         Home/End  1-9: jump  \u{2191}\u{2193}: scroll  r: refresh  q: quit",
    )]);

    let footer = Paragraph::new(help_text).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Cell;
    use watchlist_api::movies::{FetchError, Movie, MovieFilter, MoviePage};

    use super::*;
    use crate::movie_list::projection::project;
    use crate::movie_list::state::{FetchOutcome, MovieListView};

    fn movie(id: &str, title: &str, watched: bool, rating: Option<u8>) -> Movie {
        Movie {
            id: String::from(id),
            title: String::from(title),
            genre: Some(String::from("Action")),
            watched,
            rating,
            year: Some(2015),
            review: None,
        }
    }

    fn render(view: &MovieListView, scroll: usize) -> (String, usize) {
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        let mut max_scroll = 0;
        terminal
            .draw(|frame| {
                max_scroll = draw(frame, &project(view), scroll);
            })
            .unwrap();
        let buffer = terminal.backend().buffer();
        let text = buffer
            .content()
            .chunks(usize::from(buffer.area.width))
            .map(|row| row.iter().map(Cell::symbol).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n");
        (text, max_scroll)
    }

    fn loaded(movies: Vec<Movie>, pages: u32) -> MovieListView {
        let mut view = MovieListView::new(MovieFilter::default());
        let ticket = view.mount();
        view.apply_outcome(FetchOutcome::new(
            ticket.seq(),
            Ok(MoviePage { movies, pages }),
        ));
        view
    }

    #[test]
    fn test_draw_cards_and_pagination() {
        // Arrange
        let view = loaded(
            vec![
                movie("m1", "Mad Max: Fury Road", true, Some(5)),
                movie("m2", "Superbad", false, None),
            ],
            3,
        );

        // Act
        let (text, max_scroll) = render(&view, 0);

        // Assert
        assert!(text.contains("Movie Watchlist"));
        assert!(text.contains("Mad Max: Fury Road"));
        assert!(text.contains("Superbad"));
        assert!(text.contains("All Genres"));
        assert!(text.contains("Prev"));
        assert!(text.contains("Next"));
        assert_eq!(max_scroll, 0);
    }

    #[test]
    fn test_footer_lists_both_cycle_directions() {
        // Arrange
        let view = loaded(vec![movie("m1", "Superbad", false, None)], 1);

        // Act
        let (text, _) = render(&view, 0);

        // Assert
        assert!(text.contains("g/G: genre"));
        assert!(text.contains("w/W: watched"));
        assert!(text.contains("s/S: rating"));
    }

    #[test]
    fn test_draw_loading_placeholder() {
        // Arrange
        let mut view = loaded(vec![movie("m1", "Superbad", false, None)], 2);
        let _ticket = view.refresh();

        // Act
        let (text, _) = render(&view, 0);

        // Assert
        assert!(text.contains("Loading movies..."));
        assert!(!text.contains("Superbad"));
    }

    #[test]
    fn test_draw_error_message() {
        // Arrange
        let mut view = MovieListView::new(MovieFilter::default());
        let ticket = view.mount();
        view.apply_outcome(FetchOutcome::new(
            ticket.seq(),
            Err(FetchError::Network(String::from("Network error"))),
        ));

        // Act
        let (text, _) = render(&view, 0);

        // Assert
        assert!(text.contains("Network error"));
    }

    #[test]
    fn test_grid_scroll_is_bounded() {
        // Arrange: 20 cards make 7 rows, more than fit in 30 lines
        let movies = (1..=20)
            .map(|i| movie(&format!("m{i}"), &format!("Film {i}"), false, Some(3)))
            .collect();
        let view = loaded(movies, 1);

        // Act
        let (_, max_scroll) = render(&view, 100);

        // Assert
        assert!(max_scroll > 0);
        assert!(max_scroll < 7);
    }
}
