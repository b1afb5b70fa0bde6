use crate::page::EventPage;
use crate::value::page_value;
use gtmpl::Template;
use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;
use url::Url;

/// Responsible for templating event pages and writing them to disk.
pub struct Writer<'a> {
    /// The template for event index pages.
    pub template: &'a Template,

    /// The directory in which the generated site is written. An event page
    /// whose path is `event/jekyll/page2.html` ends up at
    /// `{output_directory}/event/jekyll/page2.html`.
    pub output_directory: &'a Path,

    /// The base URL of the site, used for each page's `url`.
    pub site_root: &'a Url,
}

impl Writer<'_> {
    /// Returns the file a page is written to.
    pub fn file_path(&self, page: &EventPage<'_>) -> PathBuf {
        let index = page.index();
        self.output_directory.join(&index.dir).join(&index.name)
    }

    /// Takes a single [`EventPage`], templates it, and writes it to disk.
    fn write_page(&self, page: &EventPage<'_>, file_path: &Path) -> Result<()> {
        let context = gtmpl::Context::from(page_value(page, self.site_root))?;
        self.template
            .execute(&mut std::fs::File::create(file_path)?, &context)?;
        debug!(path = %file_path.display(), "wrote event page");
        Ok(())
    }

    /// Writes every page in order and returns the paths written.
    pub fn write_pages(&self, pages: &[EventPage<'_>]) -> Result<Vec<PathBuf>> {
        let mut seen_dirs: HashSet<PathBuf> = HashSet::new();
        pages
            .iter()
            .map(|page| {
                let file_path = self.file_path(page);
                if let Some(dir) = file_path.parent() {
                    if seen_dirs.insert(dir.to_owned()) {
                        std::fs::create_dir_all(dir)?;
                    }
                }
                self.write_page(page, &file_path)?;
                Ok(file_path)
            })
            .collect()
    }
}

/// The result of a fallible page-writing operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error in a page-writing operation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An error during templating.
    #[error("rendering template: {0}")]
    Template(String),

    /// An error writing the output files.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl From<String> for Error {
    /// Converts a template error message ([`String`]) into an [`Error`]. This
    /// allows us to use the `?` operator for fallible template operations.
    fn from(err: String) -> Error {
        Error::Template(err)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::Pagination;
    use crate::layout::Layout;
    use crate::page::{build_event_pages, PageOptions};
    use crate::post::test::post;
    use crate::post::Post;
    use crate::util::slugify;
    use serde_yaml::Mapping;
    use std::num::NonZeroUsize;
    use tempfile::TempDir;

    #[test]
    fn test_write_pages() -> Result<()> {
        let out = TempDir::new()?;
        let layout = Layout {
            path: PathBuf::from("_layouts/event_index.html"),
            front_matter: Mapping::new(),
            content: String::from(
                "{{.event}} {{.paginator.page}}/{{.paginator.total_pages}}:\
                 {{range .paginator.posts}} {{.title}}{{end}}",
            ),
        };
        let template = layout.template().map_err(|e| Error::Template(e.to_string()))?;
        let posts = vec![
            post("A", &["Great < & Greater"]),
            post("B", &["Great < & Greater"]),
            post("C", &["Great < & Greater"]),
        ];
        let refs: Vec<&Post> = posts.iter().collect();
        let options = PageOptions {
            event_path: "event",
            pagination: Pagination::Enabled(NonZeroUsize::new(2).unwrap()),
            output_extension: ".html",
            slugify,
        };
        let pages = build_event_pages("Great < & Greater", &refs, &options, &layout);
        let site_root = Url::parse("https://example.com/").unwrap();
        let writer = Writer {
            template: &template,
            output_directory: out.path(),
            site_root: &site_root,
        };

        let written = writer.write_pages(&pages)?;
        assert_eq!(
            vec![
                out.path().join("event/great-greater/index.html"),
                out.path().join("event/great-greater/page2.html"),
            ],
            written
        );
        assert_eq!(
            "Great < & Greater 1/2: A B",
            std::fs::read_to_string(&written[0])?
        );
        assert_eq!(
            "Great < & Greater 2/2: C",
            std::fs::read_to_string(&written[1])?
        );
        Ok(())
    }
}
