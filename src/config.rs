//! Site configuration. A `site.yaml` project file is deserialized into a raw
//! [`Project`] and then resolved into a [`Config`] with absolute paths and
//! validated pagination settings.

use crate::util::open;
use serde::Deserialize;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use url::Url;

/// The name of the project file searched for by [`Config::from_directory`].
pub const PROJECT_FILE: &str = "site.yaml";

fn default_event_path() -> String {
    String::from("event")
}

fn default_event_layout() -> String {
    String::from("event_index")
}

fn default_posts_directory() -> PathBuf {
    PathBuf::from("_posts")
}

fn default_layouts_directory() -> PathBuf {
    PathBuf::from("_layouts")
}

fn default_output_extension() -> String {
    String::from(".html")
}

#[derive(Deserialize)]
struct Project {
    pub site_root: Url,

    #[serde(default = "default_event_path")]
    pub event_path: String,

    #[serde(default = "default_event_layout")]
    pub event_layout: String,

    #[serde(default)]
    pub paginate: Option<PaginateSetting>,

    #[serde(default)]
    pub theme_root: Option<PathBuf>,

    #[serde(default = "default_posts_directory")]
    pub posts_directory: PathBuf,

    #[serde(default = "default_layouts_directory")]
    pub layouts_directory: PathBuf,

    #[serde(default = "default_output_extension")]
    pub output_extension: String,
}

/// The raw `paginate` value: either a page size or a flag. `false` disables
/// pagination; `true` names no page size and is rejected.
#[derive(Deserialize)]
#[serde(untagged)]
enum PaginateSetting {
    Flag(bool),
    Count(usize),
}

/// Whether event index pages are split into several pages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pagination {
    Disabled,
    Enabled(NonZeroUsize),
}

impl Pagination {
    /// Validates a raw `paginate` setting. Absent means disabled; zero is
    /// rejected.
    pub fn from_setting(paginate: Option<usize>) -> Result<Pagination> {
        match paginate {
            None => Ok(Pagination::Disabled),
            Some(n) => NonZeroUsize::new(n)
                .map(Pagination::Enabled)
                .ok_or(Error::InvalidPageSize),
        }
    }

    fn from_project_setting(paginate: Option<PaginateSetting>) -> Result<Pagination> {
        match paginate {
            None | Some(PaginateSetting::Flag(false)) => Ok(Pagination::Disabled),
            Some(PaginateSetting::Flag(true)) => Err(Error::InvalidPageSize),
            Some(PaginateSetting::Count(n)) => Pagination::from_setting(Some(n)),
        }
    }
}

/// The resolved site configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// The site's source directory (the directory holding `site.yaml`).
    pub source_directory: PathBuf,

    /// The directory the generated site is written to.
    pub output_directory: PathBuf,

    /// The base URL of the generated site.
    pub site_root: Url,

    /// The directory containing post sources.
    pub posts_directory: PathBuf,

    /// The URL prefix for rendered posts.
    pub posts_url: Url,

    /// The base output path (relative to `output_directory`) for event
    /// pages.
    pub event_path: String,

    /// The name of the layout used for event pages.
    pub event_layout: String,

    /// The layouts directory name, relative to both the source directory
    /// and the theme root.
    pub layouts_directory: PathBuf,

    /// A secondary directory searched for layouts.
    pub theme_root: Option<PathBuf>,

    pub pagination: Pagination,

    /// The extension of generated page files, including the leading dot.
    pub output_extension: String,
}

impl Config {
    /// Searches `dir` and its ancestors for `site.yaml` and loads the first
    /// one found.
    pub fn from_directory(dir: &Path, output_directory: &Path) -> Result<Config> {
        let path = dir.join(PROJECT_FILE);
        if path.exists() {
            Config::from_project_file(&path, output_directory)
        } else {
            match dir.parent() {
                Some(parent) => Config::from_directory(parent, output_directory),
                None => Err(Error::ProjectFileNotFound),
            }
        }
    }

    /// Loads configuration from the project file at `path`. Relative paths in
    /// the file are resolved against the file's directory.
    pub fn from_project_file(path: &Path, output_directory: &Path) -> Result<Config> {
        let project: Project = serde_yaml::from_reader(open(path, "project")?)
            .map_err(|err| Error::DeserializeYaml {
                path: path.to_owned(),
                err,
            })?;
        let project_root = path
            .parent()
            .ok_or_else(|| Error::NoParentDirectory(path.to_owned()))?;
        Config::from_project(project, project_root, output_directory)
    }

    fn from_project(
        project: Project,
        project_root: &Path,
        output_directory: &Path,
    ) -> Result<Config> {
        let posts_dir_name = project
            .posts_directory
            .to_string_lossy()
            .trim_start_matches('_')
            .to_owned();
        Ok(Config {
            source_directory: project_root.to_owned(),
            output_directory: output_directory.to_owned(),
            posts_url: project.site_root.join(&format!("{}/", posts_dir_name))?,
            site_root: project.site_root,
            posts_directory: project_root.join(&project.posts_directory),
            event_path: project.event_path,
            event_layout: project.event_layout,
            layouts_directory: project.layouts_directory,
            theme_root: project.theme_root.map(|theme| project_root.join(theme)),
            pagination: Pagination::from_project_setting(project.paginate)?,
            output_extension: project.output_extension,
        })
    }

    /// Applies command-line pagination flags on top of the project file.
    /// `no_paginate` wins; otherwise a given page size replaces the
    /// configured one and is validated the same way.
    pub fn override_pagination(
        &mut self,
        paginate: Option<usize>,
        no_paginate: bool,
    ) -> Result<()> {
        if no_paginate {
            self.pagination = Pagination::Disabled;
        } else if paginate.is_some() {
            self.pagination = Pagination::from_setting(paginate)?;
        }
        Ok(())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("could not find `site.yaml` in any parent directory")]
    ProjectFileNotFound,

    #[error("can't get parent directory for project file `{}`", .0.display())]
    NoParentDirectory(PathBuf),

    #[error("loading `{}`: {err}", path.display())]
    DeserializeYaml {
        path: PathBuf,
        err: serde_yaml::Error,
    },

    /// `paginate` must be a positive number of posts per page.
    #[error("`paginate` must be a number of posts per page, at least 1")]
    InvalidPageSize,

    #[error("invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
