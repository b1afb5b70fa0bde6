//! Defines the [`Parser`] and [`Error`] types: the logic for reading
//! [`Post`]s from the posts directory into memory.

use crate::post::Post;
use crate::util::{open, split_front_matter, FrontMatterError};
use chrono::NaiveDate;
use pulldown_cmark::{html, Parser as MarkdownParser};
use serde::Deserialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;
use url::Url;
use walkdir::WalkDir;

const MARKDOWN_EXTENSION: &str = "md";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses [`Post`] objects from source files.
pub struct Parser<'a> {
    /// The base URL for post pages. A post's URL is
    /// `{posts_url}/{post_id}.html`.
    posts_url: &'a Url,
}

impl<'a> Parser<'a> {
    pub fn new(posts_url: &'a Url) -> Parser<'a> {
        Parser { posts_url }
    }

    /// Searches `source_directory` recursively for post files (extension
    /// `.md`) and returns them sorted most recent first. Each post file must
    /// be structured as follows:
    ///
    /// 1. Initial frontmatter fence (`---`)
    /// 2. YAML frontmatter with fields `Title`, `Date`, and optionally
    ///    `Events`
    /// 3. Terminal frontmatter fence (`---`)
    /// 4. Post body
    ///
    /// For example:
    ///
    /// ```md
    /// ---
    /// Title: Welcome to the plugin
    /// Date: 2017-12-13
    /// Events: [jekyll, Event Pages Plugin]
    /// ---
    /// # Hello
    /// ```
    pub fn parse_posts(&self, source_directory: &Path) -> Result<Vec<Post>> {
        let mut posts = Vec::new();
        for result in WalkDir::new(source_directory).sort_by_file_name() {
            let entry = result?;
            if entry.file_type().is_file()
                && entry.path().extension().and_then(|e| e.to_str()) == Some(MARKDOWN_EXTENSION)
            {
                // strip_prefix() should never fail; every entry is beneath
                // `source_directory`
                let relative_path = entry
                    .path()
                    .strip_prefix(source_directory)
                    .unwrap_or_else(|_| entry.path());
                posts.push(self.parse_post(source_directory, relative_path)?);
            }
        }

        posts.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id)));
        debug!(posts = posts.len(), dir = %source_directory.display(), "parsed posts");
        Ok(posts)
    }

    fn parse_post(&self, source_directory: &Path, relative_path: &Path) -> Result<Post> {
        let mut contents = String::new();
        open(&source_directory.join(relative_path), "post")?
            .read_to_string(&mut contents)?;

        self.parse_str(relative_path, &contents)
            .map_err(|err| Error::Annotated {
                path: relative_path.to_owned(),
                err: Box::new(err),
            })
    }

    /// Parses a single [`Post`] from its path relative to the posts directory
    /// and its contents.
    pub fn parse_str(&self, relative_path: &Path, input: &str) -> Result<Post> {
        let (yaml, body) = split_front_matter(input)?;
        let frontmatter: Frontmatter = serde_yaml::from_str(yaml)?;

        let id = post_id(relative_path)?;
        let date = NaiveDate::parse_from_str(&frontmatter.date, DATE_FORMAT).map_err(|err| {
            Error::InvalidDate {
                date: frontmatter.date.clone(),
                err,
            }
        })?;

        let mut events: Vec<String> = Vec::new();
        for event in frontmatter.events.into_vec() {
            if !events.contains(&event) {
                events.push(event);
            }
        }

        let mut html_body = String::new();
        html::push_html(&mut html_body, MarkdownParser::new(body));

        Ok(Post {
            url: self.posts_url.join(&format!("{}.html", id))?,
            id,
            title: frontmatter.title,
            date,
            events,
            body: html_body,
        })
    }
}

// `foo/bar.md` → `foo/bar`, with `/` separators on every platform.
fn post_id(relative_path: &Path) -> Result<String> {
    let without_extension = relative_path.with_extension("");
    let parts: Option<Vec<&str>> = without_extension
        .components()
        .map(|c| c.as_os_str().to_str())
        .collect();
    match parts {
        Some(parts) if !parts.is_empty() => Ok(parts.join("/")),
        _ => Err(Error::InvalidFileName(relative_path.to_owned())),
    }
}

#[derive(Deserialize)]
struct Frontmatter {
    #[serde(rename = "Title", alias = "title")]
    title: String,

    #[serde(rename = "Date", alias = "date")]
    date: String,

    #[serde(default, rename = "Events", alias = "events")]
    events: Events,
}

/// The `Events` field accepts either a single event or a list of them.
#[derive(Deserialize)]
#[serde(untagged)]
enum Events {
    One(String),
    Many(Vec<String>),
}

impl Default for Events {
    fn default() -> Self {
        Events::Many(Vec::new())
    }
}

impl Events {
    fn into_vec(self) -> Vec<String> {
        match self {
            Events::One(event) => vec![event],
            Events::Many(events) => events,
        }
    }
}

/// Represents the result of a [`Post`]-parse operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error parsing a [`Post`] object.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Returned when a post source file is missing a frontmatter fence.
    #[error("Post {0}")]
    FrontMatter(#[from] FrontMatterError),

    /// Returned when there was an error parsing the frontmatter as YAML.
    #[error(transparent)]
    DeserializeYaml(#[from] serde_yaml::Error),

    /// Returned when the `Date` field isn't `YYYY-MM-DD`.
    #[error("invalid date `{date}`: {err}")]
    InvalidDate {
        date: String,
        err: chrono::ParseError,
    },

    /// Returned when there is a problem building the post URL.
    #[error(transparent)]
    UrlParse(#[from] url::ParseError),

    /// Returned when a source file name isn't valid UTF-8.
    #[error("invalid file name: {0:?}")]
    InvalidFileName(PathBuf),

    /// Returned for other I/O errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Returned for WalkDir I/O errors.
    #[error(transparent)]
    WalkDir(#[from] walkdir::Error),

    /// An error annotated with the post it occurred in.
    #[error("parsing post `{}`: {err}", path.display())]
    Annotated { path: PathBuf, err: Box<Error> },
}
