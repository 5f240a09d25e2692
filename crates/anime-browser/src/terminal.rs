//! Line-oriented terminal surface.
//!
//! Keeps a [`Page`] and prints each change as it is applied. While the detail
//! overlay holds the scroll lock, grid output is held back; when the lock is
//! released the grid is printed again in full if anything changed meanwhile.

use crate::page::{Grid, Page, PageUpdate, Surface};
use crate::view::{CardView, DetailView};
use std::io::Write;
use tracing::warn;

const LOAD_MORE_HINT: &str = "-- more results: type `more` --";

pub struct TerminalSurface<W: Write> {
    page: Page,
    out: W,
    /// Grid changed while scrolling was locked
    grid_dirty: bool,
}

/// `  3. Sousou no Frieren  [TV]  * 9.3`
pub fn card_line(number: usize, card: &CardView) -> String {
    format!(
        "{:>3}. {}  [{}]  * {}",
        number, card.title, card.kind, card.score
    )
}

/// Overlay contents as printable lines
pub fn detail_lines(view: &DetailView) -> Vec<String> {
    let mut lines = vec![
        format!("+-- {} (#{})", view.title, view.mal_id),
        format!("|  {}", view.meta.join(" | ")),
    ];

    let mut score = format!("|  * {}", view.score);
    if let Some(votes) = &view.votes {
        score.push(' ');
        score.push_str(votes);
    }
    lines.push(score);
    lines.push(format!("|  Poster: {}", view.poster));
    lines.push("|".to_string());
    lines.push("|  Synopsis".to_string());
    lines.extend(view.synopsis.lines().map(|l| format!("|    {}", l)));
    lines.push("|".to_string());

    let width = view
        .rows
        .iter()
        .map(|(label, _)| label.len())
        .max()
        .unwrap_or(0);
    for (label, value) in &view.rows {
        lines.push(format!("|  {:<width$}  {}", label, value, width = width));
    }

    if let Some(trailer) = &view.trailer {
        lines.push("|".to_string());
        lines.push(format!("|  Trailer: {}", trailer));
    }
    lines.push("+-- type `close` to return to the list".to_string());
    lines
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W) -> Self {
        Self {
            page: Page::default(),
            out,
            grid_dirty: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, text: &str) {
        let result = writeln!(self.out, "{}", text).and_then(|_| self.out.flush());
        if let Err(e) = result {
            warn!(error = %e, "Failed to write to terminal");
        }
    }

    fn print_cards(&mut self, first_number: usize, cards: &[CardView]) {
        for (offset, card) in cards.iter().enumerate() {
            let line = card_line(first_number + offset, card);
            self.emit(&line);
        }
    }

    fn print_grid(&mut self) {
        let title = format!("\n== {} ==", self.page.title);
        self.emit(&title);
        match self.page.grid.clone() {
            Grid::Cards(cards) => self.print_cards(1, &cards),
            Grid::Message(message) => self.emit(&message),
        }
        if self.page.load_more_visible {
            self.emit(LOAD_MORE_HINT);
        }
    }

    /// Print a grid-area change unless the overlay holds the scroll lock
    fn grid_output(&mut self, update: &PageUpdate, cards_before: usize) {
        if self.page.scroll_locked {
            self.grid_dirty = true;
            return;
        }
        match update {
            PageUpdate::SetTitle(title) => {
                let heading = format!("\n== {} ==", title);
                self.emit(&heading);
            }
            PageUpdate::AppendCards(cards) => self.print_cards(cards_before + 1, cards),
            PageUpdate::ReplaceGrid(message) => self.emit(message),
            PageUpdate::SetLoadMore(true) => self.emit(LOAD_MORE_HINT),
            PageUpdate::SetLoading(true) => self.emit("Loading..."),
            _ => {}
        }
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn apply(&mut self, update: PageUpdate) {
        let cards_before = self.page.cards().len();
        let overlay_was_open = self.page.overlay.is_open();
        self.page.apply(update.clone());

        match &update {
            PageUpdate::SetTitle(_)
            | PageUpdate::ClearGrid
            | PageUpdate::AppendCards(_)
            | PageUpdate::ReplaceGrid(_)
            | PageUpdate::SetLoadMore(_)
            | PageUpdate::SetLoading(_) => self.grid_output(&update, cards_before),
            PageUpdate::ShowNotice(message) => {
                let line = format!("! {}", message);
                self.emit(&line);
            }
            PageUpdate::ClearNotice => {}
            PageUpdate::OpenOverlay => {
                if !overlay_was_open {
                    self.emit("Loading details...");
                }
            }
            PageUpdate::ShowDetail(view) => {
                for line in detail_lines(view) {
                    self.emit(&line);
                }
            }
            PageUpdate::DetailFailed(message) => {
                let line = format!("! {}", message);
                self.emit(&line);
            }
            PageUpdate::CloseOverlay => {
                if overlay_was_open {
                    self.emit("(details closed)");
                }
            }
            PageUpdate::LockScroll(false) => {
                if self.grid_dirty {
                    self.grid_dirty = false;
                    self.print_grid();
                }
            }
            PageUpdate::LockScroll(true) => {}
        }
    }

    fn page(&self) -> &Page {
        &self.page
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::NOT_AVAILABLE;

    fn card(mal_id: u32, title: &str) -> CardView {
        CardView {
            mal_id,
            title: title.to_string(),
            kind: "TV".to_string(),
            score: "9.3".to_string(),
            image: "https://via.placeholder.com/300x450".to_string(),
        }
    }

    fn output(surface: TerminalSurface<Vec<u8>>) -> String {
        String::from_utf8(surface.into_inner()).unwrap()
    }

    #[test]
    fn test_card_line() {
        assert_eq!(
            card_line(3, &card(52991, "Sousou no Frieren")),
            "  3. Sousou no Frieren  [TV]  * 9.3"
        );
    }

    #[test]
    fn test_appended_cards_continue_numbering() {
        let mut surface = TerminalSurface::new(Vec::new());
        surface.apply(PageUpdate::SetTitle("Top Anime".to_string()));
        surface.apply(PageUpdate::AppendCards(vec![card(1, "One"), card(2, "Two")]));
        surface.apply(PageUpdate::AppendCards(vec![card(3, "Three")]));
        surface.apply(PageUpdate::SetLoadMore(true));

        let text = output(surface);
        assert!(text.contains("== Top Anime =="));
        assert!(text.contains("  1. One"));
        assert!(text.contains("  3. Three"));
        assert!(text.contains(LOAD_MORE_HINT));
    }

    #[test]
    fn test_detail_lines() {
        let view = DetailView {
            mal_id: 20,
            title: "Naruto".to_string(),
            poster: "https://cdn.example/naruto.jpg".to_string(),
            meta: vec![
                "TV".to_string(),
                "Finished Airing".to_string(),
                "220 eps".to_string(),
                "23 min per ep".to_string(),
            ],
            score: "8".to_string(),
            votes: Some("(2,046,353 votes)".to_string()),
            synopsis: "Ninja.".to_string(),
            rows: vec![
                ("Genres", "Action".to_string()),
                ("Source", NOT_AVAILABLE.to_string()),
            ],
            trailer: None,
        };

        let lines = detail_lines(&view);
        assert_eq!(lines[0], "+-- Naruto (#20)");
        assert_eq!(lines[1], "|  TV | Finished Airing | 220 eps | 23 min per ep");
        assert_eq!(lines[2], "|  * 8 (2,046,353 votes)");
        assert!(lines.contains(&"|  Genres  Action".to_string()));
        assert!(lines.contains(&"|  Source  N/A".to_string()));
        assert!(!lines.iter().any(|l| l.contains("Trailer")));
    }

    #[test]
    fn test_grid_output_held_while_scroll_locked() {
        let mut surface = TerminalSurface::new(Vec::new());
        surface.apply(PageUpdate::SetTitle("Top Anime".to_string()));
        surface.apply(PageUpdate::OpenOverlay);
        surface.apply(PageUpdate::LockScroll(true));
        surface.apply(PageUpdate::AppendCards(vec![card(7, "Held Back")]));

        assert_eq!(surface.page().cards().len(), 1);
        let before_unlock = String::from_utf8(surface.out.clone()).unwrap();
        assert!(!before_unlock.contains("Held Back"));

        surface.apply(PageUpdate::CloseOverlay);
        surface.apply(PageUpdate::LockScroll(false));

        let text = output(surface);
        assert!(text.contains("(details closed)"));
        assert!(text.contains("  1. Held Back"));
    }

    #[test]
    fn test_notices_are_printed() {
        let mut surface = TerminalSurface::new(Vec::new());
        surface.apply(PageUpdate::ShowNotice("No card #9".to_string()));
        assert!(output(surface).contains("! No card #9"));
    }
}
