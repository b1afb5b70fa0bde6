//! Defines the [`Post`] type. Posts are owned by the caller; grouping and
//! pagination only ever borrow them.

use chrono::NaiveDate;
use url::Url;

/// The marker separating a post's summary from the rest of its body.
pub const FOLD_TAG: &str = "<!-- more -->";

/// A dated content item.
#[derive(Clone, Debug, PartialEq)]
pub struct Post {
    /// The path of the source file relative to the posts directory, less the
    /// extension (e.g., `2017/welcome`).
    pub id: String,

    /// The title of the post.
    pub title: String,

    /// The publication date of the post.
    pub date: NaiveDate,

    /// The URL of the rendered post.
    pub url: Url,

    /// The names of the events the post belongs to, in front-matter order
    /// and without duplicates.
    pub events: Vec<String>,

    /// The HTML body of the post.
    pub body: String,
}

impl Post {
    /// Returns the part of the body above the fold and whether the body was
    /// actually folded.
    pub fn summary(&self) -> (&str, bool) {
        match self.body.find(FOLD_TAG) {
            Some(i) => (&self.body[..i], true),
            None => (&self.body, false),
        }
    }
}

#[cfg(test)]
pub(crate) mod test {
    use super::*;

    /// Builds a post with the given title and events, dated 2017-12-13.
    pub(crate) fn post(title: &str, events: &[&str]) -> Post {
        let id = crate::util::slugify(title);
        Post {
            url: Url::parse("https://example.com/posts/")
                .unwrap()
                .join(&format!("{}.html", id))
                .unwrap(),
            id,
            title: title.to_owned(),
            date: NaiveDate::from_ymd_opt(2017, 12, 13).unwrap(),
            events: events.iter().map(|e| e.to_string()).collect(),
            body: String::new(),
        }
    }

    #[test]
    fn test_summary_folded() {
        let mut p = post("Folded", &[]);
        p.body = format!("<p>above</p>{}<p>below</p>", FOLD_TAG);
        assert_eq!(("<p>above</p>", true), p.summary());
    }

    #[test]
    fn test_summary_unfolded() {
        let mut p = post("Plain", &[]);
        p.body = String::from("<p>all</p>");
        assert_eq!(("<p>all</p>", false), p.summary());
    }
}
