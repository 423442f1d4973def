//! The comment tree composer.
//!
//! The backend delivers comments for an article as a flat, newest-first
//! list; the reply hierarchy is encoded in each record's
//! `parent_comment_id`. [`CommentForest`] materializes that list into a
//! nested reply forest and applies incremental updates (new replies,
//! deletions, like toggles) without refetching.
//!
//! Ownership is direct: each node is exclusively owned by its parent's
//! `replies` vector, and the forest's root list owns all top-level nodes.

use super::model::Comment;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Depth past which the interactive "Reply" affordance is suppressed.
///
/// This is a view-layer concern: the composer itself accepts arbitrary
/// nesting present in the data and never rejects a deeply nested comment.
pub const MAX_REPLY_DEPTH: usize = 3;

/// Where [`CommentForest::insert_reply`] placed a new comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyPlacement {
    /// Prepended to the requested parent's replies.
    UnderParent,
    /// Prepended to the root list (no parent requested).
    TopLevel,
    /// The requested parent was not found; the comment was surfaced as a
    /// top-level node instead of being dropped.
    Orphaned,
}

/// A comment with its materialized replies.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommentNode {
    pub comment: Comment,
    pub replies: Vec<CommentNode>,
}

impl CommentNode {
    fn leaf(comment: Comment) -> Self {
        Self {
            comment,
            replies: Vec::new(),
        }
    }
}

/// A forest of threaded comments for one article.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CommentForest {
    roots: Vec<CommentNode>,
}

impl CommentForest {
    /// Builds a forest from the flat list delivered by the backend.
    ///
    /// Siblings preserve the relative order of the input (newest first, as
    /// fetched). Comments whose declared parent is absent from the list are
    /// orphans: they are surfaced as top-level nodes after the genuine
    /// top-level comments, in input order, rather than silently dropped.
    /// Replies *to* an orphan still attach beneath it.
    pub fn build(flat: Vec<Comment>) -> Self {
        let known: HashSet<String> = flat.iter().map(|comment| comment.id.clone()).collect();

        let mut children: HashMap<String, Vec<Comment>> = HashMap::new();
        let mut top_level = Vec::new();
        let mut orphans = Vec::new();
        for comment in flat {
            match comment.parent_comment_id.clone() {
                None => top_level.push(comment),
                Some(parent_id) if known.contains(&parent_id) => {
                    children.entry(parent_id).or_default().push(comment);
                }
                Some(_) => orphans.push(comment),
            }
        }

        let roots = top_level
            .into_iter()
            .chain(orphans)
            .map(|comment| attach_replies(comment, &mut children))
            .collect();

        Self { roots }
    }

    /// The top-level nodes, in display order.
    pub fn roots(&self) -> &[CommentNode] {
        &self.roots
    }

    /// Total number of comments in the forest, replies included.
    pub fn len(&self) -> usize {
        fn count(nodes: &[CommentNode]) -> usize {
            nodes.iter().map(|node| 1 + count(&node.replies)).sum()
        }
        count(&self.roots)
    }

    /// Returns true if the forest holds no comments.
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Finds the node with the given comment id, anywhere in the forest.
    pub fn find(&self, comment_id: &str) -> Option<&CommentNode> {
        find_in(&self.roots, comment_id)
    }

    /// Returns true if a comment with the given id is reachable.
    pub fn contains(&self, comment_id: &str) -> bool {
        self.find(comment_id).is_some()
    }

    /// Nesting depth of the given comment (top-level comments are depth 0).
    pub fn depth_of(&self, comment_id: &str) -> Option<usize> {
        fn depth_in(nodes: &[CommentNode], id: &str, depth: usize) -> Option<usize> {
            for node in nodes {
                if node.comment.id == id {
                    return Some(depth);
                }
                if let Some(found) = depth_in(&node.replies, id, depth + 1) {
                    return Some(found);
                }
            }
            None
        }
        depth_in(&self.roots, comment_id, 0)
    }

    /// Inserts a freshly confirmed comment.
    ///
    /// With no `parent_id` the comment becomes the first top-level node.
    /// Otherwise the parent is located depth-first anywhere in the forest
    /// and the comment is prepended to its replies. A parent that cannot
    /// be found does not lose the comment: it is surfaced top-level and the
    /// returned placement says so.
    pub fn insert_reply(&mut self, comment: Comment, parent_id: Option<&str>) -> ReplyPlacement {
        match parent_id {
            None => {
                self.roots.insert(0, CommentNode::leaf(comment));
                ReplyPlacement::TopLevel
            }
            Some(parent_id) => match find_in_mut(&mut self.roots, parent_id) {
                Some(parent) => {
                    parent.replies.insert(0, CommentNode::leaf(comment));
                    ReplyPlacement::UnderParent
                }
                None => {
                    self.roots.insert(0, CommentNode::leaf(comment));
                    ReplyPlacement::Orphaned
                }
            },
        }
    }

    /// Removes the comment with the given id and its entire subtree.
    ///
    /// The cascade is intentional: the backend deletes replies of a deleted
    /// comment, and the local view must match.
    ///
    /// # Returns
    ///
    /// `true` if a node was removed.
    pub fn remove(&mut self, comment_id: &str) -> bool {
        remove_from(&mut self.roots, comment_id)
    }

    /// Toggles `user_id`'s like on the given comment.
    ///
    /// # Returns
    ///
    /// `Some(now_liked)` if the comment was found, `None` otherwise.
    pub fn toggle_like(&mut self, comment_id: &str, user_id: &str) -> Option<bool> {
        let node = find_in_mut(&mut self.roots, comment_id)?;
        Some(node.comment.toggle_like(user_id))
    }

    /// Applies a confirmed like state from the backend. Idempotent.
    ///
    /// # Returns
    ///
    /// `true` if the comment was found.
    pub fn set_liked(&mut self, comment_id: &str, user_id: &str, liked: bool) -> bool {
        match find_in_mut(&mut self.roots, comment_id) {
            Some(node) => {
                node.comment.set_liked(user_id, liked);
                true
            }
            None => false,
        }
    }

    /// Applies a confirmed content edit to the given comment.
    ///
    /// # Returns
    ///
    /// `true` if the comment was found.
    pub fn apply_edit(
        &mut self,
        comment_id: &str,
        content: String,
        edited_at: DateTime<Utc>,
    ) -> bool {
        match find_in_mut(&mut self.roots, comment_id) {
            Some(node) => {
                node.comment.content = content;
                node.comment.is_edited = true;
                node.comment.edited_at = Some(edited_at);
                node.comment.updated_at = edited_at;
                true
            }
            None => false,
        }
    }

    /// Flattens the forest back to a flat list via pre-order traversal.
    ///
    /// This is the inverse of [`CommentForest::build`]: rebuilding from the
    /// flattened form yields an equivalent forest.
    pub fn flatten(&self) -> Vec<Comment> {
        fn walk(nodes: &[CommentNode], out: &mut Vec<Comment>) {
            for node in nodes {
                out.push(node.comment.clone());
                walk(&node.replies, out);
            }
        }

        let mut flat = Vec::with_capacity(self.len());
        walk(&self.roots, &mut flat);
        flat
    }
}

fn attach_replies(comment: Comment, children: &mut HashMap<String, Vec<Comment>>) -> CommentNode {
    let replies = children
        .remove(&comment.id)
        .unwrap_or_default()
        .into_iter()
        .map(|reply| attach_replies(reply, children))
        .collect();
    CommentNode { comment, replies }
}

fn find_in<'a>(nodes: &'a [CommentNode], id: &str) -> Option<&'a CommentNode> {
    for node in nodes {
        if node.comment.id == id {
            return Some(node);
        }
        if let Some(found) = find_in(&node.replies, id) {
            return Some(found);
        }
    }
    None
}

fn find_in_mut<'a>(nodes: &'a mut [CommentNode], id: &str) -> Option<&'a mut CommentNode> {
    for node in nodes.iter_mut() {
        if node.comment.id == id {
            return Some(node);
        }
        if let Some(found) = find_in_mut(&mut node.replies, id) {
            return Some(found);
        }
    }
    None
}

fn remove_from(nodes: &mut Vec<CommentNode>, id: &str) -> bool {
    if let Some(index) = nodes.iter().position(|node| node.comment.id == id) {
        nodes.remove(index);
        return true;
    }
    nodes
        .iter_mut()
        .any(|node| remove_from(&mut node.replies, id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comment::CommentAuthor;

    fn comment(id: &str, parent: Option<&str>) -> Comment {
        Comment {
            id: id.to_string(),
            blog_id: "b1".to_string(),
            author: CommentAuthor {
                id: "user-1".to_string(),
                username: "jdoe".to_string(),
                first_name: None,
                last_name: None,
            },
            content: format!("comment {}", id),
            parent_comment_id: parent.map(|p| p.to_string()),
            likes: Vec::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            is_edited: false,
            edited_at: None,
        }
    }

    fn ids(nodes: &[CommentNode]) -> Vec<&str> {
        nodes.iter().map(|node| node.comment.id.as_str()).collect()
    }

    #[test]
    fn test_build_depth_two_chain() {
        let forest = CommentForest::build(vec![
            comment("a", None),
            comment("b", Some("a")),
            comment("c", Some("b")),
        ]);

        assert_eq!(forest.roots().len(), 1);
        let a = &forest.roots()[0];
        assert_eq!(a.comment.id, "a");
        assert_eq!(a.replies.len(), 1);
        let b = &a.replies[0];
        assert_eq!(b.comment.id, "b");
        assert_eq!(b.replies.len(), 1);
        assert_eq!(b.replies[0].comment.id, "c");
    }

    #[test]
    fn test_build_preserves_sibling_order() {
        // Newest-first input order must survive threading.
        let forest = CommentForest::build(vec![
            comment("newest", None),
            comment("older", None),
            comment("r2", Some("older")),
            comment("r1", Some("older")),
        ]);

        assert_eq!(ids(forest.roots()), vec!["newest", "older"]);
        assert_eq!(ids(&forest.roots()[1].replies), vec!["r2", "r1"]);
    }

    #[test]
    fn test_build_surfaces_orphans_as_top_level() {
        let forest = CommentForest::build(vec![
            comment("a", None),
            comment("lost", Some("missing-parent")),
        ]);

        assert_eq!(ids(forest.roots()), vec!["a", "lost"]);
        assert_eq!(forest.len(), 2);
    }

    #[test]
    fn test_build_attaches_replies_beneath_orphans() {
        let forest = CommentForest::build(vec![
            comment("lost", Some("missing-parent")),
            comment("child-of-lost", Some("lost")),
        ]);

        assert_eq!(forest.roots().len(), 1);
        assert_eq!(forest.roots()[0].comment.id, "lost");
        assert_eq!(ids(&forest.roots()[0].replies), vec!["child-of-lost"]);
    }

    #[test]
    fn test_build_tolerates_nesting_past_reply_depth_cap() {
        let flat = vec![
            comment("d0", None),
            comment("d1", Some("d0")),
            comment("d2", Some("d1")),
            comment("d3", Some("d2")),
            comment("d4", Some("d3")),
            comment("d5", Some("d4")),
        ];
        let forest = CommentForest::build(flat);

        assert_eq!(forest.len(), 6);
        assert_eq!(forest.depth_of("d5"), Some(5));
        assert!(forest.depth_of("d5").unwrap() > MAX_REPLY_DEPTH);
    }

    #[test]
    fn test_round_trip_law() {
        let flat = vec![
            comment("a", None),
            comment("b", Some("a")),
            comment("c", Some("b")),
            comment("d", None),
            comment("e", Some("a")),
        ];
        let forest = CommentForest::build(flat);
        let rebuilt = CommentForest::build(forest.flatten());

        assert_eq!(forest, rebuilt);
    }

    #[test]
    fn test_insert_reply_prepends_top_level() {
        let mut forest = CommentForest::build(vec![comment("a", None)]);

        let placement = forest.insert_reply(comment("new", None), None);

        assert_eq!(placement, ReplyPlacement::TopLevel);
        assert_eq!(ids(forest.roots()), vec!["new", "a"]);
    }

    #[test]
    fn test_insert_reply_prepends_under_nested_parent() {
        let mut forest = CommentForest::build(vec![
            comment("a", None),
            comment("b", Some("a")),
            comment("c", Some("b")),
        ]);

        let placement = forest.insert_reply(comment("new", Some("b")), Some("b"));

        assert_eq!(placement, ReplyPlacement::UnderParent);
        let b = forest.find("b").unwrap();
        assert_eq!(ids(&b.replies), vec!["new", "c"]);
        // Inserted exactly once.
        assert_eq!(forest.flatten().iter().filter(|c| c.id == "new").count(), 1);
    }

    #[test]
    fn test_insert_reply_with_unknown_parent_surfaces_top_level() {
        let mut forest = CommentForest::build(vec![comment("a", None)]);

        let placement = forest.insert_reply(comment("new", Some("ghost")), Some("ghost"));

        assert_eq!(placement, ReplyPlacement::Orphaned);
        assert_eq!(ids(forest.roots()), vec!["new", "a"]);
    }

    #[test]
    fn test_remove_cascades_to_descendants() {
        let mut forest = CommentForest::build(vec![
            comment("a", None),
            comment("b", Some("a")),
            comment("c", Some("b")),
            comment("d", None),
        ]);

        assert!(forest.remove("a"));

        assert_eq!(ids(forest.roots()), vec!["d"]);
        assert!(!forest.contains("a"));
        assert!(!forest.contains("b"));
        assert!(!forest.contains("c"));
    }

    #[test]
    fn test_remove_nested_node_keeps_siblings() {
        let mut forest = CommentForest::build(vec![
            comment("a", None),
            comment("b", Some("a")),
            comment("c", Some("a")),
        ]);

        assert!(forest.remove("b"));

        assert_eq!(ids(&forest.roots()[0].replies), vec!["c"]);
        assert_eq!(forest.len(), 2);
    }

    #[test]
    fn test_remove_missing_id_is_noop() {
        let mut forest = CommentForest::build(vec![comment("a", None)]);

        assert!(!forest.remove("ghost"));
        assert_eq!(forest.len(), 1);
    }

    #[test]
    fn test_toggle_like_twice_restores_set() {
        let mut forest = CommentForest::build(vec![comment("a", None), comment("b", Some("a"))]);

        assert_eq!(forest.toggle_like("b", "user-9"), Some(true));
        assert!(forest.find("b").unwrap().comment.is_liked_by("user-9"));

        assert_eq!(forest.toggle_like("b", "user-9"), Some(false));
        assert!(!forest.find("b").unwrap().comment.is_liked_by("user-9"));
    }

    #[test]
    fn test_toggle_like_unknown_comment() {
        let mut forest = CommentForest::default();
        assert_eq!(forest.toggle_like("ghost", "user-9"), None);
    }

    #[test]
    fn test_set_liked_applies_confirmed_state() {
        let mut forest = CommentForest::build(vec![comment("a", None)]);

        assert!(forest.set_liked("a", "user-9", true));
        assert!(forest.set_liked("a", "user-9", true));
        assert_eq!(forest.find("a").unwrap().comment.like_count(), 1);
    }

    #[test]
    fn test_apply_edit_marks_comment_edited() {
        let mut forest = CommentForest::build(vec![comment("a", None)]);
        let edited_at = Utc::now();

        assert!(forest.apply_edit("a", "updated".to_string(), edited_at));

        let a = &forest.find("a").unwrap().comment;
        assert_eq!(a.content, "updated");
        assert!(a.is_edited);
        assert_eq!(a.edited_at, Some(edited_at));
    }

    #[test]
    fn test_depth_of_top_level_is_zero() {
        let forest = CommentForest::build(vec![comment("a", None), comment("b", Some("a"))]);
        assert_eq!(forest.depth_of("a"), Some(0));
        assert_eq!(forest.depth_of("b"), Some(1));
        assert_eq!(forest.depth_of("ghost"), None);
    }
}
