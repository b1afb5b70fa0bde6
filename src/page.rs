//! Builds the index pages for each event. An [`EventPage`] is either a
//! [`EventPage::Single`] page holding all of an event's posts or one of the
//! [`EventPage::Paginated`] pages of a [`PagePlan`]. The variant is decided
//! when the page is built, so a page can never claim pagination data it
//! doesn't have.

use crate::config::Pagination;
use crate::event::EventGroups;
use crate::layout::Layout;
use crate::pager::{page_file_name, PagePlan, Pager};
use crate::post::Post;
use std::collections::HashMap;
use tracing::{debug, warn};

/// The per-event pagination record.
pub type EventPager<'a> = Pager<'a, &'a Post>;

/// Options shared by every event page in a run.
#[derive(Clone, Debug)]
pub struct PageOptions<'a> {
    /// The base output directory for event pages, e.g. `event`.
    pub event_path: &'a str,

    pub pagination: Pagination,

    /// The extension of page files, including the leading dot.
    pub output_extension: &'a str,

    /// Maps event names to directory names. Applied the same way whether or
    /// not pagination is enabled.
    pub slugify: fn(&str) -> String,
}

/// The data common to every event page.
#[derive(Clone, Debug)]
pub struct IndexPage<'a> {
    /// The event this page belongs to.
    pub event: &'a str,

    /// The page's directory, relative to the output directory
    /// (`{event_path}/{slug}`).
    pub dir: String,

    /// The page's file name (`index.html`, `page2.html`, ...).
    pub name: String,

    /// The layout the page is rendered with.
    pub layout: &'a Layout,

    /// All of the event's posts, not just the ones on this page.
    pub posts: &'a [&'a Post],
}

impl IndexPage<'_> {
    /// The page's path relative to the output directory.
    pub fn path(&self) -> String {
        format!("{}/{}", self.dir, self.name)
    }

    /// The number of posts in the whole event.
    pub fn total_posts(&self) -> usize {
        self.posts.len()
    }
}

/// A generated event index page, ready to be rendered.
#[derive(Clone, Debug)]
pub enum EventPage<'a> {
    /// The only page of an event when pagination is disabled.
    Single(IndexPage<'a>),

    /// One page of a paginated event.
    Paginated {
        page: IndexPage<'a>,
        pager: EventPager<'a>,
    },
}

impl<'a> EventPage<'a> {
    pub fn index(&self) -> &IndexPage<'a> {
        match self {
            EventPage::Single(page) => page,
            EventPage::Paginated { page, .. } => page,
        }
    }

    pub fn pager(&self) -> Option<&EventPager<'a>> {
        match self {
            EventPage::Single(_) => None,
            EventPage::Paginated { pager, .. } => Some(pager),
        }
    }

    /// The posts shown on this page: the pager's slice when paginated, all of
    /// the event's posts otherwise.
    pub fn visible_posts(&self) -> &'a [&'a Post] {
        match self {
            EventPage::Single(page) => page.posts,
            EventPage::Paginated { pager, .. } => pager.posts,
        }
    }
}

/// Builds the pages for a single event, in ascending page order.
pub fn build_event_pages<'a>(
    event: &'a str,
    posts: &'a [&'a Post],
    options: &PageOptions<'_>,
    layout: &'a Layout,
) -> Vec<EventPage<'a>> {
    debug_assert!(!posts.is_empty(), "event `{}` has no posts", event);
    let dir = format!("{}/{}", options.event_path, (options.slugify)(event));
    let index_page = |name: String| IndexPage {
        event,
        dir: dir.clone(),
        name,
        layout,
        posts,
    };

    match options.pagination {
        Pagination::Disabled => vec![EventPage::Single(index_page(page_file_name(
            1,
            options.output_extension,
        )))],
        Pagination::Enabled(per_page) => {
            PagePlan::new(posts, per_page, options.output_extension)
                .into_iter()
                .map(|pager| EventPage::Paginated {
                    page: index_page(pager.file_name.clone()),
                    pager,
                })
                .collect()
        }
    }
}

/// Builds the pages for every event in `groups` and appends them to `out`,
/// in event order and then page order. Returns the number of events
/// processed.
pub fn generate<'a>(
    groups: &'a EventGroups<'a>,
    options: &PageOptions<'_>,
    layout: &'a Layout,
    out: &mut Vec<EventPage<'a>>,
) -> usize {
    let events = groups.sorted_events();
    let mut dirs: HashMap<String, &str> = HashMap::new();

    for &event in events.iter() {
        let posts = groups.posts(event);
        let pages = build_event_pages(event, posts, options, layout);
        if let Some(first) = pages.first() {
            let dir = &first.index().dir;
            if let Some(other) = dirs.insert(dir.clone(), event) {
                warn!(event, other, dir = %dir, "events share an output directory");
            }
        }
        debug!(event, pages = pages.len(), posts = posts.len(), "built event pages");
        out.extend(pages);
    }

    debug!(
        events = events.len(),
        paginated = options.pagination != Pagination::Disabled,
        "processed event index pages"
    );
    events.len()
}
