//! Conversions from pages and posts into template [`Value`]s. These are the
//! only places where the statically typed page records become the loosely
//! typed objects templates see.

use crate::page::{EventPage, EventPager, IndexPage};
use crate::post::Post;
use gtmpl_value::Value;
use std::collections::HashMap;
use url::Url;

fn number(n: usize) -> Value {
    Value::from(n as u64)
}

fn optional_number(n: Option<usize>) -> Value {
    match n {
        Some(n) => number(n),
        None => Value::Nil,
    }
}

fn string(s: &str) -> Value {
    Value::String(s.to_owned())
}

fn posts(posts: &[&Post]) -> Value {
    Value::Array(posts.iter().map(|&p| Value::from(p)).collect())
}

impl From<&Post> for Value {
    /// Converts a [`Post`] into an object with `id`, `title`, `date`, `url`,
    /// `events`, `body`, `summary`, and `summarized` fields.
    fn from(p: &Post) -> Value {
        let (summary, summarized) = p.summary();
        let mut m: HashMap<String, Value> = HashMap::new();
        m.insert("id".to_owned(), string(&p.id));
        m.insert("title".to_owned(), string(&p.title));
        m.insert(
            "date".to_owned(),
            Value::String(p.date.format("%Y-%m-%d").to_string()),
        );
        m.insert("url".to_owned(), Value::String(p.url.to_string()));
        m.insert(
            "events".to_owned(),
            Value::Array(p.events.iter().map(|e| string(e)).collect()),
        );
        m.insert("body".to_owned(), string(&p.body));
        m.insert("summary".to_owned(), string(summary));
        m.insert("summarized".to_owned(), Value::Bool(summarized));
        Value::Object(m)
    }
}

impl From<&EventPager<'_>> for Value {
    /// Converts a pager into the `paginator` object. Missing neighbours are
    /// `nil` numbers and empty paths.
    fn from(pager: &EventPager<'_>) -> Value {
        let mut m: HashMap<String, Value> = HashMap::new();
        m.insert("page".to_owned(), number(pager.page));
        m.insert("per_page".to_owned(), number(pager.per_page));
        m.insert("posts".to_owned(), posts(pager.posts));
        m.insert("total_posts".to_owned(), number(pager.total_posts));
        m.insert("total_pages".to_owned(), number(pager.total_pages));
        m.insert(
            "previous_page".to_owned(),
            optional_number(pager.previous_page()),
        );
        m.insert(
            "previous_page_path".to_owned(),
            string(pager.previous_page_path()),
        );
        m.insert("next_page".to_owned(), optional_number(pager.next_page()));
        m.insert("next_page_path".to_owned(), string(pager.next_page_path()));
        Value::Object(m)
    }
}

/// Converts YAML front matter into a template value.
pub fn yaml_to_value(yaml: &serde_yaml::Value) -> Value {
    use serde_yaml::Value as Yaml;
    match yaml {
        Yaml::Null => Value::Nil,
        Yaml::Bool(b) => Value::Bool(*b),
        Yaml::Number(n) => {
            if let Some(u) = n.as_u64() {
                Value::from(u)
            } else if let Some(i) = n.as_i64() {
                Value::from(i)
            } else {
                Value::from(n.as_f64().unwrap_or_default())
            }
        }
        Yaml::String(s) => string(s),
        Yaml::Sequence(items) => Value::Array(items.iter().map(yaml_to_value).collect()),
        Yaml::Mapping(mapping) => Value::Object(
            mapping
                .iter()
                .filter_map(|(k, v)| k.as_str().map(|k| (k.to_owned(), yaml_to_value(v))))
                .collect(),
        ),
    }
}

/// Builds the full rendering context for a page. The layout's front matter
/// comes first so the page's own fields win on conflicts.
pub fn page_value(page: &EventPage<'_>, site_root: &Url) -> Value {
    let index: &IndexPage<'_> = page.index();
    let path = index.path();

    let mut m: HashMap<String, Value> = HashMap::new();
    for (key, value) in index.layout.front_matter.iter() {
        if let Some(key) = key.as_str() {
            m.insert(key.to_owned(), yaml_to_value(value));
        }
    }

    m.insert("event".to_owned(), string(index.event));
    m.insert("title".to_owned(), string(index.event));
    m.insert("posts".to_owned(), posts(index.posts));
    m.insert("total_posts".to_owned(), number(index.total_posts()));
    m.insert("dir".to_owned(), string(&index.dir));
    m.insert("name".to_owned(), string(&index.name));
    m.insert(
        "url".to_owned(),
        match site_root.join(&path) {
            Ok(url) => Value::String(url.to_string()),
            Err(_) => string(&path),
        },
    );
    m.insert("path".to_owned(), Value::String(path));
    m.insert("content".to_owned(), string(&index.layout.content));
    m.insert(
        "paginator".to_owned(),
        match page.pager() {
            Some(pager) => Value::from(pager),
            None => Value::Nil,
        },
    );
    Value::Object(m)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::Pagination;
    use crate::layout::Layout;
    use crate::page::{build_event_pages, PageOptions};
    use crate::post::test::post;
    use crate::util::slugify;
    use std::num::NonZeroUsize;
    use std::path::PathBuf;

    fn render(template: &str, value: Value) -> String {
        gtmpl::template(template, value).unwrap()
    }

    fn layout(front_matter: &str) -> Layout {
        Layout {
            path: PathBuf::from("_layouts/event_index.html"),
            front_matter: serde_yaml::from_str(front_matter).unwrap(),
            content: String::from("{{.event}}"),
        }
    }

    fn options(pagination: Pagination) -> PageOptions<'static> {
        PageOptions {
            event_path: "event",
            pagination,
            output_extension: ".html",
            slugify,
        }
    }

    #[test]
    fn test_page_value_paginated() {
        let posts = vec![
            post("First", &["jekyll"]),
            post("Second", &["jekyll"]),
            post("Third", &["jekyll"]),
        ];
        let refs: Vec<&Post> = posts.iter().collect();
        let layout = layout("layout: default\ntitle: overridden");
        let options = options(Pagination::Enabled(NonZeroUsize::new(2).unwrap()));
        let pages = build_event_pages("jekyll", &refs, &options, &layout);
        let site_root = Url::parse("https://example.com/").unwrap();

        let value = page_value(&pages[1], &site_root);
        assert_eq!(
            "jekyll|default|3|event/jekyll/page2.html|https://example.com/event/jekyll/page2.html",
            render(
                "{{.title}}|{{.layout}}|{{.total_posts}}|{{.path}}|{{.url}}",
                value.clone()
            )
        );
        assert_eq!(
            "2/2|1:index.html|none:|Third;",
            render(
                "{{with .paginator}}{{.page}}/{{.total_pages}}\
                 |{{.previous_page}}:{{.previous_page_path}}\
                 |{{if .next_page}}{{.next_page}}{{else}}none{{end}}:{{.next_page_path}}\
                 |{{range .posts}}{{.title}};{{end}}{{end}}",
                value
            )
        );
    }

    #[test]
    fn test_page_value_unpaginated_has_no_paginator() {
        let posts = vec![post("First", &["jekyll"]), post("Second", &["jekyll"])];
        let refs: Vec<&Post> = posts.iter().collect();
        let layout = layout("{}");
        let pages = build_event_pages("jekyll", &refs, &options(Pagination::Disabled), &layout);
        let value = page_value(&pages[0], &Url::parse("https://example.com/").unwrap());
        assert_eq!(
            "single|First;Second;",
            render(
                "{{if .paginator}}paged{{else}}single{{end}}|{{range .posts}}{{.title}};{{end}}",
                value
            )
        );
    }

    #[test]
    fn test_post_value() {
        let p = post("Welcome to Jekyll!", &["jekyll", "好的主意"]);
        assert_eq!(
            "Welcome to Jekyll!|2017-12-13|jekyll,好的主意,",
            render(
                "{{.title}}|{{.date}}|{{range .events}}{{.}},{{end}}",
                Value::from(&p)
            )
        );
    }

    #[test]
    fn test_yaml_to_value() {
        let yaml: serde_yaml::Value =
            serde_yaml::from_str("nav: [home, about]\ncount: 2\nflag: true").unwrap();
        assert_eq!(
            "home about |2|true",
            render(
                "{{range .nav}}{{.}} {{end}}|{{.count}}|{{.flag}}",
                yaml_to_value(&yaml)
            )
        );
    }
}
