//! Groups [`Post`]s by event. An event is an arbitrary label attached to a
//! post (much like a tag); every distinct event gets its own set of index
//! pages.

use crate::post::Post;
use std::collections::HashMap;

/// Returns every distinct key exactly once, sorted in byte order. This is the
/// order in which events are processed and their pages emitted.
pub fn sorted_distinct_events<'k, I>(keys: I) -> Vec<&'k str>
where
    I: IntoIterator<Item = &'k str>,
{
    let mut events: Vec<&str> = keys.into_iter().collect();
    events.sort_unstable();
    events.dedup();
    events
}

/// A mapping from event name to the posts belonging to that event. The order
/// of each post list is whatever order the posts were added in; it is
/// preserved through pagination.
#[derive(Debug, Default)]
pub struct EventGroups<'a> {
    groups: HashMap<String, Vec<&'a Post>>,
}

impl<'a> EventGroups<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Indexes `posts` by event, keeping the relative order of `posts` within
    /// each event. An event listed twice on one post still files the post
    /// only once.
    pub fn from_posts(posts: &'a [Post]) -> Self {
        let mut groups = Self::new();
        for post in posts {
            for event in sorted_distinct_events(post.events.iter().map(String::as_str)) {
                groups.insert(event, post);
            }
        }
        groups
    }

    /// Appends `post` to `event`'s group, creating the group if needed.
    pub fn insert(&mut self, event: &str, post: &'a Post) {
        match self.groups.get_mut(event) {
            None => {
                self.groups.insert(event.to_owned(), vec![post]);
            }
            Some(posts) => posts.push(post),
        }
    }

    /// Returns the posts for `event`, or an empty slice for unknown events.
    pub fn posts(&self, event: &str) -> &[&'a Post] {
        self.groups.get(event).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns the event names in processing order. See
    /// [`sorted_distinct_events`].
    pub fn sorted_events(&self) -> Vec<&str> {
        sorted_distinct_events(self.groups.keys().map(String::as_str))
    }
}
