//! Client-side pagination of rendered folder listings.
//!
//! The listing markup carries every entry; pagination happens in the
//! browser by hiding items. The algorithm is a pure state machine so it can
//! be tested without a browser:
//!
//! ```text
//! (Pager, Event) → (Pager, Vec<Effect>)
//! ```
//!
//! The host environment (a DOM binding, a headless test double) applies the
//! [`Effect`]s: show a range of items, toggle the prev/next buttons,
//! re-render the page-number window, scroll the block into view.
//!
//! # Page-Number Windows
//!
//! Page numbers are shown five at a time. The window holding page `p`
//! starts at `floor((p-1)/5)*5 + 1`. When the window ends before the last
//! page a truncation marker follows the numbers.
//!
//! The prev/next buttons move by whole windows, not by single pages:
//!
//! ```text
//! prev: max(1, floor((p-2)/5)*5 + 5)
//! next: min(total, floor(p/5)*5 + 6)
//! ```
//!
//! "next" always lands on the first page of the following window. "prev"
//! only lands on the end of the preceding window from a window's first
//! page; from pages 2-5 it moves forward to page 5, and from other pages it
//! lands on the end of the current window. A target past the last page is
//! dropped like any other out-of-range page.
//!
//! # Lifecycle
//!
//! [`PaginationRuntime`] rescans the host on every [`Signal`] (initial load
//! and each soft navigation) and drops all previously bound state, so a
//! page swap never leaves stale controllers behind. Blocks are independent.

use std::ops::Range;

/// Page numbers per window.
pub const WINDOW_SIZE: usize = 5;

/// CSS selectors and attributes shared with the markup in [`crate::render`].
pub mod selectors {
    pub const BLOCK: &str = ".page-listing-wrapper[data-items-per-page]";
    pub const ITEMS_PER_PAGE_ATTR: &str = "data-items-per-page";
    pub const TOTAL_ITEMS_ATTR: &str = "data-total-items";
    pub const CONTENT: &str = ".paginated-content";
    pub const ITEM: &str = ".section-li";
    pub const PAGINATION: &str = ".pagination";
    pub const PREV: &str = ".pagination-prev";
    pub const NEXT: &str = ".pagination-next";
    pub const NUMBERS: &str = ".pagination-numbers";
}

/// Number of pages for `items` at `per_page` per page; 1 when paging is off.
pub fn total_pages(items: usize, per_page: usize) -> usize {
    if per_page == 0 {
        1
    } else {
        items.div_ceil(per_page)
    }
}

/// Parse the items-per-page attribute. Missing or malformed means off.
pub fn parse_items_per_page(attr: Option<&str>) -> usize {
    attr.and_then(|v| v.trim().parse().ok()).unwrap_or(0)
}

/// Contiguous run of page numbers rendered as buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub start: usize,
    /// Inclusive.
    pub end: usize,
    /// More pages follow `end`.
    pub truncated: bool,
}

impl PageWindow {
    /// Window containing `page` (1-based).
    pub fn containing(page: usize, total_pages: usize) -> Self {
        let start = window_start(page);
        let end = (start + WINDOW_SIZE - 1).min(total_pages);
        Self {
            start,
            end,
            truncated: end < total_pages,
        }
    }

    pub fn pages(&self) -> std::ops::RangeInclusive<usize> {
        self.start..=self.end
    }
}

fn window_start(page: usize) -> usize {
    (page.saturating_sub(1) / WINDOW_SIZE) * WINDOW_SIZE + 1
}

/// Target of the "prev" button from `page` (> 1). Not clamped to the last
/// page.
pub fn prev_group_target(page: usize) -> usize {
    ((page.saturating_sub(2) / WINDOW_SIZE) * WINDOW_SIZE + WINDOW_SIZE).max(1)
}

/// Target of the "next" button: first page of the following window,
/// clamped to the last page.
pub fn next_group_target(page: usize, total_pages: usize) -> usize {
    ((page / WINDOW_SIZE) * WINDOW_SIZE + WINDOW_SIZE + 1).min(total_pages)
}

/// What the host found when scanning one listing block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockScan {
    pub items_per_page: usize,
    pub item_count: usize,
    pub has_pagination: bool,
    pub has_numbers: bool,
    pub has_prev: bool,
    pub has_next: bool,
}

/// Why a block was left alone at init.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inert {
    /// `data-items-per-page` is 0 or missing.
    Disabled,
    /// Everything fits on one page.
    SinglePage,
    /// A required control is missing from the markup.
    MissingControl(&'static str),
}

/// Input to the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    GoTo(usize),
    PrevGroup,
    NextGroup,
}

/// One rendered page-number button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageButton {
    pub page: usize,
    /// The current page; rendered active and disabled.
    pub active: bool,
}

/// Side effect for the host to apply, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Show items in this range, hide every other item.
    ShowItems(Range<usize>),
    SetPrevDisabled(bool),
    SetNextDisabled(bool),
    /// Replace the numbers container contents.
    RenderNumbers {
        buttons: Vec<PageButton>,
        truncated: bool,
    },
    ScrollIntoView,
}

/// Pagination state of one listing block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    items_per_page: usize,
    total_items: usize,
    total_pages: usize,
    current_page: usize,
}

impl Pager {
    /// Initialise from a scanned block, showing page 1.
    ///
    /// The initial render does not scroll.
    pub fn init(scan: &BlockScan) -> Result<(Self, Vec<Effect>), Inert> {
        if scan.items_per_page == 0 {
            return Err(Inert::Disabled);
        }
        let total_pages = total_pages(scan.item_count, scan.items_per_page);
        if total_pages <= 1 {
            return Err(Inert::SinglePage);
        }
        let missing = [
            (scan.has_pagination, selectors::PAGINATION),
            (scan.has_numbers, selectors::NUMBERS),
            (scan.has_prev, selectors::PREV),
            (scan.has_next, selectors::NEXT),
        ]
        .into_iter()
        .find_map(|(present, name)| (!present).then_some(name));
        if let Some(name) = missing {
            return Err(Inert::MissingControl(name));
        }

        let pager = Self {
            items_per_page: scan.items_per_page,
            total_items: scan.item_count,
            total_pages,
            current_page: 1,
        };
        Ok((pager, pager.show_effects()))
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn total_items(&self) -> usize {
        self.total_items
    }

    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    /// Zero-based indices of the items visible on the current page.
    pub fn visible_range(&self) -> Range<usize> {
        let start = (self.current_page - 1) * self.items_per_page;
        let end = (start + self.items_per_page).min(self.total_items);
        start..end
    }

    pub fn window(&self) -> PageWindow {
        PageWindow::containing(self.current_page, self.total_pages)
    }

    /// Apply an event. Out-of-range targets leave the state untouched and
    /// produce no effects.
    pub fn transition(self, event: Event) -> (Self, Vec<Effect>) {
        let target = match event {
            Event::GoTo(page) => page,
            Event::PrevGroup if self.current_page > 1 => prev_group_target(self.current_page),
            Event::NextGroup if self.current_page < self.total_pages => {
                next_group_target(self.current_page, self.total_pages)
            }
            Event::PrevGroup | Event::NextGroup => return (self, Vec::new()),
        };
        if target < 1 || target > self.total_pages {
            return (self, Vec::new());
        }

        let next = Self {
            current_page: target,
            ..self
        };
        let mut effects = next.show_effects();
        effects.push(Effect::ScrollIntoView);
        (next, effects)
    }

    fn show_effects(&self) -> Vec<Effect> {
        let window = self.window();
        vec![
            Effect::ShowItems(self.visible_range()),
            Effect::SetPrevDisabled(self.current_page == 1),
            Effect::SetNextDisabled(self.current_page == self.total_pages),
            Effect::RenderNumbers {
                buttons: window
                    .pages()
                    .map(|page| PageButton {
                        page,
                        active: page == self.current_page,
                    })
                    .collect(),
                truncated: window.truncated,
            },
        ]
    }
}

// ============================================================================
// Host runtime
// ============================================================================

/// Lifecycle signal that triggers a rescan of the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// Initial page load.
    Load,
    /// Client-side navigation finished and swapped in new markup.
    Nav,
}

/// A clickable pagination control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Prev,
    Next,
    Number(usize),
}

impl From<Control> for Event {
    fn from(control: Control) -> Self {
        match control {
            Control::Prev => Event::PrevGroup,
            Control::Next => Event::NextGroup,
            Control::Number(page) => Event::GoTo(page),
        }
    }
}

/// The rendering substrate the runtime drives.
pub trait PaginationHost {
    /// Handle to one listing block in the current document.
    type Block: Clone + PartialEq;

    /// All blocks matching [`selectors::BLOCK`], in document order.
    fn blocks(&self) -> Vec<Self::Block>;

    fn scan(&self, block: &Self::Block) -> BlockScan;

    fn apply(&mut self, block: &Self::Block, effect: &Effect);
}

/// Binds one [`Pager`] per qualifying block and routes clicks to it.
#[derive(Debug)]
pub struct PaginationRuntime<B> {
    bound: Vec<(B, Pager)>,
}

impl<B> Default for PaginationRuntime<B> {
    fn default() -> Self {
        Self { bound: Vec::new() }
    }
}

impl<B: Clone + PartialEq> PaginationRuntime<B> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all bound state, rescan the host and initialise every block.
    ///
    /// Returns the number of blocks that ended up paginated.
    pub fn on_signal<H>(&mut self, host: &mut H, signal: Signal) -> usize
    where
        H: PaginationHost<Block = B>,
    {
        self.bound.clear();
        for block in host.blocks() {
            let scan = host.scan(&block);
            match Pager::init(&scan) {
                Ok((pager, effects)) => {
                    for effect in &effects {
                        host.apply(&block, effect);
                    }
                    self.bound.push((block, pager));
                }
                Err(Inert::MissingControl(name)) => {
                    tracing::debug!(?signal, control = name, "pagination block missing control");
                }
                Err(reason) => {
                    tracing::trace!(?signal, ?reason, "pagination block left inert");
                }
            }
        }
        self.bound.len()
    }

    /// Route a click on `block`. Returns false when the block is not bound.
    pub fn click<H>(&mut self, host: &mut H, block: &B, control: Control) -> bool
    where
        H: PaginationHost<Block = B>,
    {
        let Some((_, pager)) = self.bound.iter_mut().find(|(b, _)| b == block) else {
            return false;
        };
        let (next, effects) = pager.transition(control.into());
        *pager = next;
        for effect in &effects {
            host.apply(block, effect);
        }
        true
    }

    pub fn pager(&self, block: &B) -> Option<&Pager> {
        self.bound.iter().find(|(b, _)| b == block).map(|(_, p)| p)
    }

    pub fn bound_count(&self) -> usize {
        self.bound.len()
    }
}
