//! In-memory page model and the surface abstraction.
//!
//! The controller never draws directly: it emits [`PageUpdate`]s, and a
//! [`Surface`] applies them. [`Page`] is itself a surface, which is what the
//! tests drive; the terminal wraps a `Page` and prints as it applies.

use crate::view::{CardView, DetailView};

/// Result area below the heading
#[derive(Debug, Clone, PartialEq)]
pub enum Grid {
    Cards(Vec<CardView>),
    /// A single notice in place of cards (empty result or failure)
    Message(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Overlay {
    Hidden,
    Loading,
    Ready(DetailView),
    Failed(String),
}

impl Overlay {
    pub fn is_open(&self) -> bool {
        !matches!(self, Overlay::Hidden)
    }
}

/// Everything the user can see
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub title: String,
    pub grid: Grid,
    pub loading_visible: bool,
    pub load_more_visible: bool,
    /// Inline notice for rejected input
    pub notice: Option<String>,
    pub overlay: Overlay,
    pub scroll_locked: bool,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            title: String::new(),
            grid: Grid::Cards(Vec::new()),
            loading_visible: false,
            load_more_visible: false,
            notice: None,
            overlay: Overlay::Hidden,
            scroll_locked: false,
        }
    }
}

/// One change to the page
#[derive(Debug, Clone, PartialEq)]
pub enum PageUpdate {
    SetTitle(String),
    ClearGrid,
    AppendCards(Vec<CardView>),
    ReplaceGrid(String),
    SetLoading(bool),
    SetLoadMore(bool),
    ShowNotice(String),
    ClearNotice,
    OpenOverlay,
    ShowDetail(DetailView),
    DetailFailed(String),
    CloseOverlay,
    LockScroll(bool),
}

impl Page {
    pub fn cards(&self) -> &[CardView] {
        match &self.grid {
            Grid::Cards(cards) => cards,
            Grid::Message(_) => &[],
        }
    }

    /// Card by its 1-based on-screen number
    pub fn card(&self, number: usize) -> Option<&CardView> {
        number.checked_sub(1).and_then(|i| self.cards().get(i))
    }

    pub fn apply(&mut self, update: PageUpdate) {
        match update {
            PageUpdate::SetTitle(title) => self.title = title,
            PageUpdate::ClearGrid => self.grid = Grid::Cards(Vec::new()),
            PageUpdate::AppendCards(new_cards) => match &mut self.grid {
                Grid::Cards(cards) => cards.extend(new_cards),
                Grid::Message(_) => self.grid = Grid::Cards(new_cards),
            },
            PageUpdate::ReplaceGrid(message) => self.grid = Grid::Message(message),
            PageUpdate::SetLoading(visible) => self.loading_visible = visible,
            PageUpdate::SetLoadMore(visible) => self.load_more_visible = visible,
            PageUpdate::ShowNotice(message) => self.notice = Some(message),
            PageUpdate::ClearNotice => self.notice = None,
            PageUpdate::OpenOverlay => self.overlay = Overlay::Loading,
            PageUpdate::ShowDetail(view) => self.overlay = Overlay::Ready(view),
            PageUpdate::DetailFailed(message) => self.overlay = Overlay::Failed(message),
            PageUpdate::CloseOverlay => self.overlay = Overlay::Hidden,
            PageUpdate::LockScroll(locked) => self.scroll_locked = locked,
        }
    }
}

/// Where page updates are applied
pub trait Surface {
    fn apply(&mut self, update: PageUpdate);

    /// Current page contents
    fn page(&self) -> &Page;
}

impl Surface for Page {
    fn apply(&mut self, update: PageUpdate) {
        Page::apply(self, update);
    }

    fn page(&self) -> &Page {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(mal_id: u32) -> CardView {
        CardView {
            mal_id,
            title: format!("Anime {}", mal_id),
            kind: "TV".to_string(),
            score: "8.5".to_string(),
            image: "https://via.placeholder.com/300x450".to_string(),
        }
    }

    #[test]
    fn test_cards_append_in_order() {
        let mut page = Page::default();
        page.apply(PageUpdate::AppendCards(vec![card(1), card(2)]));
        page.apply(PageUpdate::AppendCards(vec![card(3)]));

        let ids: Vec<u32> = page.cards().iter().map(|c| c.mal_id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(page.card(3).map(|c| c.mal_id), Some(3));
        assert!(page.card(0).is_none());
        assert!(page.card(4).is_none());
    }

    #[test]
    fn test_message_replaces_cards_and_is_replaced_by_cards() {
        let mut page = Page::default();
        page.apply(PageUpdate::AppendCards(vec![card(1)]));
        page.apply(PageUpdate::ReplaceGrid("Failed".to_string()));
        assert!(page.cards().is_empty());
        assert_eq!(page.grid, Grid::Message("Failed".to_string()));

        page.apply(PageUpdate::AppendCards(vec![card(2)]));
        assert_eq!(page.cards().len(), 1);

        page.apply(PageUpdate::ClearGrid);
        assert!(page.cards().is_empty());
    }

    #[test]
    fn test_overlay_lifecycle() {
        let mut page = Page::default();
        assert!(!page.overlay.is_open());

        page.apply(PageUpdate::OpenOverlay);
        page.apply(PageUpdate::LockScroll(true));
        assert_eq!(page.overlay, Overlay::Loading);
        assert!(page.scroll_locked);

        page.apply(PageUpdate::DetailFailed("boom".to_string()));
        assert!(page.overlay.is_open());

        page.apply(PageUpdate::CloseOverlay);
        page.apply(PageUpdate::LockScroll(false));
        assert_eq!(page.overlay, Overlay::Hidden);
        assert!(!page.scroll_locked);
    }
}
