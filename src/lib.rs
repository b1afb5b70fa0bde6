//! The library code for `event-pages`, which generates per-event index pages
//! for a blog. Every post may list any number of events (arbitrary labels,
//! much like tags); for each distinct event, one or more index pages are
//! generated listing that event's posts.
//!
//! The work breaks down into three steps:
//!
//! 1. Parsing posts from source files on disk ([`crate::parser`])
//! 2. Building event pages ([`crate::event`], [`crate::pager`],
//!    [`crate::page`])
//! 3. Rendering the pages to disk ([`crate::write`])
//!
//! The second step is the interesting one. Posts are grouped by event, the
//! events are sorted, and each event's posts are either put on a single
//! `index.html` page or, when pagination is enabled, split across
//! `index.html`, `page2.html`, `page3.html`, and so on with links between
//! neighbouring pages.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]

pub mod build;
pub mod config;
pub mod event;
pub mod layout;
pub mod page;
pub mod pager;
pub mod parser;
pub mod post;
pub mod util;
pub mod value;
pub mod write;
