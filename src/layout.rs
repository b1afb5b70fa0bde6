//! Locates and loads the layout used to render event index pages. A layout
//! is looked up first in the site's own layouts directory and then in the
//! theme's; if neither has it, the build fails before any page is produced.

use crate::util::{open, split_front_matter, FrontMatterError};
use gtmpl::Template;
use serde_yaml::Mapping;
use std::io::Read;
use std::path::{Path, PathBuf};

/// The extension appended to layout names that don't carry one.
pub const DEFAULT_LAYOUT_EXTENSION: &str = "html";

/// A loaded layout: the optional YAML front matter plus the unrendered
/// template body.
#[derive(Clone, Debug)]
pub struct Layout {
    /// The file the layout was loaded from.
    pub path: PathBuf,

    /// The layout's front matter, or an empty mapping if it has none.
    pub front_matter: Mapping,

    /// The template body, prior to substitution.
    pub content: String,
}

impl Layout {
    /// Returns the path of layout `name`, searching
    /// `{source}/{layouts_directory}` before
    /// `{theme_root}/{layouts_directory}`.
    pub fn locate(
        source: &Path,
        theme_root: Option<&Path>,
        layouts_directory: &Path,
        name: &str,
    ) -> Result<PathBuf> {
        let file_name = layout_file_name(name);
        let searched: Vec<PathBuf> = std::iter::once(source)
            .chain(theme_root)
            .map(|root| root.join(layouts_directory).join(&file_name))
            .collect();

        match searched.iter().find(|candidate| candidate.is_file()) {
            Some(found) => Ok(found.clone()),
            None => Err(Error::NotFound {
                name: name.to_owned(),
                searched,
            }),
        }
    }

    /// Reads and splits the layout file at `path`.
    pub fn load(path: &Path) -> Result<Layout> {
        let mut contents = String::new();
        open(path, "layout")?.read_to_string(&mut contents)?;

        let (front_matter, content) = match split_front_matter(&contents) {
            Ok((yaml, body)) => (parse_front_matter(path, yaml)?, body.to_owned()),
            Err(FrontMatterError::MissingStartFence) => (Mapping::new(), contents.clone()),
            Err(err) => {
                return Err(Error::FrontMatter {
                    path: path.to_owned(),
                    err,
                })
            }
        };

        Ok(Layout {
            path: path.to_owned(),
            front_matter,
            content,
        })
    }

    /// Parses the layout body into a [`Template`].
    pub fn template(&self) -> Result<Template> {
        let mut template = Template::default();
        template
            .parse(&self.content)
            .map_err(|err| Error::ParseTemplate {
                path: self.path.clone(),
                err,
            })?;
        Ok(template)
    }
}

fn layout_file_name(name: &str) -> PathBuf {
    let file_name = PathBuf::from(name);
    match file_name.extension() {
        Some(_) => file_name,
        None => file_name.with_extension(DEFAULT_LAYOUT_EXTENSION),
    }
}

fn parse_front_matter(path: &Path, yaml: &str) -> Result<Mapping> {
    if yaml.trim().is_empty() {
        return Ok(Mapping::new());
    }
    serde_yaml::from_str(yaml).map_err(|err| Error::DeserializeYaml {
        path: path.to_owned(),
        err,
    })
}

pub type Result<T> = std::result::Result<T, Error>;

/// Errors locating or loading a layout.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The layout exists in neither the site nor the theme.
    #[error("layout `{name}` not found (searched {searched:?})")]
    NotFound { name: String, searched: Vec<PathBuf> },

    #[error("layout `{}`: {err}", path.display())]
    FrontMatter {
        path: PathBuf,
        err: FrontMatterError,
    },

    #[error("layout `{}`: {err}", path.display())]
    DeserializeYaml {
        path: PathBuf,
        err: serde_yaml::Error,
    },

    #[error("parsing layout `{}`: {err}", path.display())]
    ParseTemplate { path: PathBuf, err: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
