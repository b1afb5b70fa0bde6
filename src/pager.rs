//! Pagination of an event's posts. A [`PagePlan`] splits an ordered list of
//! posts into fixed-size pages and links every page to its neighbours.
//!
//! The plan is built in two phases over an arena of pages indexed by page
//! number: first every page gets its number, file name, and slice of posts;
//! then links are resolved by looking up the neighbouring entries in the
//! arena. Resolving a page's forward link needs the next page's file name,
//! which doesn't exist yet during the first phase.

use std::num::NonZeroUsize;

/// The base name of the first page of every event.
pub const INDEX_STEM: &str = "index";

/// Returns the number of pages needed to hold `total_posts` posts at
/// `per_page` posts per page. Always at least 1 so that an event never ends
/// up without an index page.
pub fn page_count(total_posts: usize, per_page: NonZeroUsize) -> usize {
    total_posts.div_ceil(per_page.get()).max(1)
}

/// Returns the items belonging to page `page_number` (1-based). Returns an
/// empty slice for pages past the end.
pub fn slice_for_page<T>(
    items: &[T],
    page_number: usize,
    per_page: NonZeroUsize,
) -> &[T] {
    let per_page = per_page.get();
    let start = page_number.saturating_sub(1).saturating_mul(per_page);
    if start >= items.len() {
        return &[];
    }
    // inclusive end, clamped to the last item
    let end = (start + per_page - 1).min(items.len() - 1);
    &items[start..=end]
}

/// Returns the output file name for a page: `index{ext}` for page 1 and
/// `page{N}{ext}` for every other page.
pub fn page_file_name(page_number: usize, extension: &str) -> String {
    match page_number {
        0 | 1 => format!("{}{}", INDEX_STEM, extension),
        n => format!("page{}{}", n, extension),
    }
}

/// The links from one page to its neighbours. Missing neighbours have no
/// number and an empty path.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Links {
    pub previous_page: Option<usize>,
    pub previous_page_path: String,
    pub next_page: Option<usize>,
    pub next_page_path: String,
}

/// Computes the [`Links`] for `page_number` out of `total_pages`. `paths`
/// holds the file name of every page, indexed by `page_number - 1`.
pub fn link_plan(page_number: usize, total_pages: usize, paths: &[String]) -> Links {
    let previous_page = (page_number > 1).then(|| page_number - 1);
    let next_page = (page_number < total_pages).then(|| page_number + 1);
    let path_of = |page: Option<usize>| {
        page.and_then(|n| paths.get(n - 1)).cloned().unwrap_or_default()
    };

    Links {
        previous_page,
        previous_page_path: path_of(previous_page),
        next_page,
        next_page_path: path_of(next_page),
    }
}

/// The pagination record for a single page. This is what templates see as
/// `paginator`.
#[derive(Clone, Debug, PartialEq)]
pub struct Pager<'a, T> {
    /// The page number, starting at 1.
    pub page: usize,

    /// The configured number of posts per page.
    pub per_page: usize,

    /// The posts shown on this page.
    pub posts: &'a [T],

    /// The number of posts across all of the event's pages.
    pub total_posts: usize,

    /// The number of pages for the event.
    pub total_pages: usize,

    /// The file name of this page (`index.html`, `page2.html`, ...).
    pub file_name: String,

    /// The links to the adjacent pages.
    pub links: Links,
}

impl<T> Pager<'_, T> {
    pub fn previous_page(&self) -> Option<usize> {
        self.links.previous_page
    }

    pub fn previous_page_path(&self) -> &str {
        &self.links.previous_page_path
    }

    pub fn next_page(&self) -> Option<usize> {
        self.links.next_page
    }

    pub fn next_page_path(&self) -> &str {
        &self.links.next_page_path
    }
}

// An arena entry from the first phase: everything about a page except its
// links.
struct Slot<'a, T> {
    page: usize,
    file_name: String,
    posts: &'a [T],
}

/// The complete pagination plan for one event's posts.
#[derive(Clone, Debug, PartialEq)]
pub struct PagePlan<'a, T> {
    pages: Vec<Pager<'a, T>>,
}

impl<'a, T> PagePlan<'a, T> {
    /// Splits `posts` into pages of `per_page` posts. Output file names use
    /// `extension` (e.g., `.html`).
    pub fn new(posts: &'a [T], per_page: NonZeroUsize, extension: &str) -> Self {
        let total_pages = page_count(posts.len(), per_page);

        // Phase one: identity, path, and slice of every page.
        let slots: Vec<Slot<'a, T>> = (1..=total_pages)
            .map(|page| Slot {
                page,
                file_name: page_file_name(page, extension),
                posts: slice_for_page(posts, page, per_page),
            })
            .collect();

        // Phase two: links, now that every path is known.
        let paths: Vec<String> =
            slots.iter().map(|slot| slot.file_name.clone()).collect();
        let pages = slots
            .into_iter()
            .map(|slot| Pager {
                links: link_plan(slot.page, total_pages, &paths),
                page: slot.page,
                per_page: per_page.get(),
                posts: slot.posts,
                total_posts: posts.len(),
                total_pages,
                file_name: slot.file_name,
            })
            .collect();

        PagePlan { pages }
    }

    pub fn total_pages(&self) -> usize {
        self.pages.len()
    }

    /// Returns the record for `page_number` (1-based), if it exists.
    pub fn page(&self, page_number: usize) -> Option<&Pager<'a, T>> {
        page_number.checked_sub(1).and_then(|i| self.pages.get(i))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pager<'a, T>> {
        self.pages.iter()
    }
}

impl<'a, T> IntoIterator for PagePlan<'a, T> {
    type Item = Pager<'a, T>;
    type IntoIter = std::vec::IntoIter<Pager<'a, T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.pages.into_iter()
    }
}
