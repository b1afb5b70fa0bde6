//! Exports the [`build_site`] function which stitches together the high-level
//! steps of building event pages: parsing the posts ([`crate::parser`]),
//! grouping them by event ([`crate::event`]), resolving the layout
//! ([`crate::layout`]), building the pages ([`crate::page`]), and rendering
//! them to disk ([`crate::write`]).

use crate::config::Config;
use crate::event::EventGroups;
use crate::layout::{Error as LayoutError, Layout};
use crate::page::{generate, EventPage, PageOptions};
use crate::parser::{Error as ParseError, Parser as PostParser};
use crate::util::slugify;
use crate::write::{Error as WriteError, Writer};
use std::path::{Path, PathBuf};
use tracing::info;

/// Builds the event pages for the site described by `config` and returns the
/// paths of the files written. The layout is resolved before anything is
/// generated, so a missing layout never leaves partial output behind.
pub fn build_site(config: &Config) -> Result<Vec<PathBuf>> {
    let layout_path = Layout::locate(
        &config.source_directory,
        config.theme_root.as_deref(),
        &config.layouts_directory,
        &config.event_layout,
    )?;
    let layout = Layout::load(&layout_path)?;
    let template = layout.template()?;
    info!(layout = %layout_path.display(), "using event layout");

    let posts = PostParser::new(&config.posts_url).parse_posts(&config.posts_directory)?;
    let groups = EventGroups::from_posts(&posts);

    let options = PageOptions {
        event_path: &config.event_path,
        pagination: config.pagination,
        output_extension: &config.output_extension,
        slugify,
    };
    let mut pages: Vec<EventPage> = Vec::new();
    let events = generate(&groups, &options, &layout, &mut pages);

    // Stale pages from a previous build must not survive this one.
    rmdir(&config.output_directory.join(&config.event_path))?;

    let written = Writer {
        template: &template,
        output_directory: &config.output_directory,
        site_root: &config.site_root,
    }
    .write_pages(&pages)?;

    info!(
        posts = posts.len(),
        events,
        pages = written.len(),
        output = %config.output_directory.display(),
        "built event pages"
    );
    Ok(written)
}

fn rmdir(dir: &Path) -> Result<()> {
    match std::fs::remove_dir_all(dir) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(Error::Clean {
            path: dir.to_owned(),
            err,
        }),
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// The error type for building a site. Errors can occur locating the layout,
/// parsing posts, cleaning old output, or writing pages.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Returned when the layout is missing or malformed.
    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// Returned for errors during parsing.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Returned when the previous event output can't be removed.
    #[error("cleaning output directory `{}`: {err}", path.display())]
    Clean {
        path: PathBuf,
        err: std::io::Error,
    },

    /// Returned for errors writing pages to disk.
    #[error(transparent)]
    Write(#[from] WriteError),
}
