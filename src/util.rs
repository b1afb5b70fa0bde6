use regex::Regex;
use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::LazyLock;

/// The fence delimiting YAML front matter in posts and layouts.
pub const FENCE: &str = "---";

static NON_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^\p{M}\p{L}\p{Nd}]+").expect("valid slug pattern")
});

/// Maps an event name onto a URL- and filesystem-safe path segment. Runs of
/// anything other than letters, marks, and digits become a single `-`; the
/// result is lowercased and trimmed of `-`. Non-ASCII letters are kept as
/// they are, so `好的主意` stays `好的主意`.
pub fn slugify(event: &str) -> String {
    NON_WORD
        .replace_all(event, "-")
        .trim_matches('-')
        .to_lowercase()
}

/// Opens `path`, annotating any error with the kind of file and its path.
pub fn open(path: &Path, kind: &str) -> io::Result<File> {
    File::open(path).map_err(|e| {
        io::Error::new(
            e.kind(),
            format!("Opening {} file `{}`: {}", kind, path.display(), e),
        )
    })
}

/// Why [`split_front_matter`] failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FrontMatterError {
    #[error("must begin with `---`")]
    MissingStartFence,

    #[error("missing closing `---`")]
    MissingEndFence,
}

/// Splits `input` into its YAML front matter and its body.
pub fn split_front_matter(input: &str) -> Result<(&str, &str), FrontMatterError> {
    let rest = input
        .strip_prefix(FENCE)
        .ok_or(FrontMatterError::MissingStartFence)?;
    match rest.find(FENCE) {
        None => Err(FrontMatterError::MissingEndFence),
        Some(offset) => Ok((&rest[..offset], &rest[offset + FENCE.len()..])),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_split_front_matter() {
        let (yaml, body) = split_front_matter("---\nTitle: x\n---\nbody").unwrap();
        assert_eq!("\nTitle: x\n", yaml);
        assert_eq!("\nbody", body);
    }

    #[test]
    fn test_split_front_matter_errors() {
        assert_eq!(
            Err(FrontMatterError::MissingStartFence),
            split_front_matter("body")
        );
        assert_eq!(
            Err(FrontMatterError::MissingEndFence),
            split_front_matter("---\nTitle: x\n")
        );
    }

    #[test]
    fn test_slugify_events() {
        assert_eq!("books-publications", slugify("Books & Publications"));
        assert_eq!("great-greater", slugify("Great < & Greater"));
        assert_eq!("event-pages-plugin", slugify("Event Pages Plugin"));
        assert_eq!("jekyll", slugify("Jekyll"));
        assert_eq!("rust-2024", slugify("  Rust 2024! "));
    }

    #[test]
    fn test_slugify_keeps_unicode_letters() {
        assert_eq!("好的主意", slugify("好的主意"));
        assert_eq!("café-crème", slugify("Café Crème"));
        assert_eq!("好的-主意", slugify("好的 / 主意"));
    }

    #[test]
    fn test_slugify_homophones_stay_distinct() {
        assert_eq!("是", slugify("是"));
        assert_eq!("事", slugify("事"));
        assert_ne!(slugify("是"), slugify("事"));
    }
}
