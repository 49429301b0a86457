//! In-memory fixture implementations of the driven ports.
//!
//! [`FixtureStore`] backs every repository port with a single mutex-guarded
//! state bag. It serves integration tests and DB-less operation: when no
//! database is configured, the server wires its services over a fixture
//! store instead of Diesel adapters.
//!
//! Semantics mirror the PostgreSQL adapters: feeds order newest first,
//! follow edges are unique, and a self-referencing edge violates a
//! constraint here just as it would in the database.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::comment::Comment;
use crate::domain::feed::{AuthorRef, CommentEntry, GroupRef, PostEntry};
use crate::domain::group::{Group, GroupId, GroupSlug};
use crate::domain::post::{Post, PostChanges, PostId};
use crate::domain::user::{User, UserId, Username};

use super::comment_repository::{CommentPersistenceError, CommentRepository};
use super::follow_repository::{FollowPersistenceError, FollowRepository};
use super::group_repository::{GroupPersistenceError, GroupRepository};
use super::post_repository::{FeedFilter, PostPersistenceError, PostRepository};
use super::user_repository::{UserPersistenceError, UserRepository};

const POISONED: &str = "fixture store lock poisoned";

#[derive(Debug, Clone)]
struct StoredPost {
    post: Post,
    seq: u64,
}

#[derive(Debug, Clone)]
struct StoredComment {
    comment: Comment,
    seq: u64,
}

#[derive(Debug, Default)]
struct FixtureState {
    users: Vec<User>,
    groups: Vec<Group>,
    posts: Vec<StoredPost>,
    comments: Vec<StoredComment>,
    follows: HashSet<(UserId, UserId)>,
    seq: u64,
}

impl FixtureState {
    fn next_seq(&mut self) -> u64 {
        self.seq += 1;
        self.seq
    }

    fn author_ref(&self, id: UserId) -> Option<AuthorRef> {
        self.users
            .iter()
            .find(|user| user.id == id)
            .map(|user| AuthorRef {
                id: user.id,
                username: user.username.clone(),
            })
    }

    fn group_ref(&self, id: GroupId) -> Option<GroupRef> {
        self.groups
            .iter()
            .find(|group| group.id == id)
            .map(|group| GroupRef {
                id: group.id,
                title: group.title.clone(),
                slug: group.slug.clone(),
            })
    }

    fn entry_for(&self, stored: &StoredPost) -> Option<PostEntry> {
        let author = self.author_ref(stored.post.author)?;
        let group = match stored.post.group {
            Some(group_id) => Some(self.group_ref(group_id)?),
            None => None,
        };
        Some(PostEntry {
            id: stored.post.id,
            author,
            group,
            text: stored.post.text.clone(),
            has_image: stored.post.image.is_some(),
            created_at: stored.post.created_at,
        })
    }

    fn matches(&self, stored: &StoredPost, filter: &FeedFilter) -> bool {
        match filter {
            FeedFilter::All => true,
            FeedFilter::Group(group_id) => stored.post.group == Some(*group_id),
            FeedFilter::Author(author_id) => stored.post.author == *author_id,
            FeedFilter::AuthorsAmong(authors) => authors.contains(&stored.post.author),
        }
    }
}

/// Mutex-guarded in-memory backing store for every repository port.
#[derive(Debug, Default)]
pub struct FixtureStore {
    state: Mutex<FixtureState>,
}

impl FixtureStore {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a group, returning the stored record.
    ///
    /// # Panics
    /// Panics on invalid input; seeding data is test/bootstrap authored.
    pub fn seed_group(&self, title: &str, slug: &str, description: &str) -> Group {
        let slug = GroupSlug::new(slug).expect("seed slug must be valid");
        let group = Group::create(title, slug, description).expect("seed group must be valid");
        let mut state = self.state.lock().expect(POISONED);
        state.groups.push(group.clone());
        group
    }

    /// Seed a user, returning the stored record.
    ///
    /// # Panics
    /// Panics on invalid input; seeding data is test/bootstrap authored.
    pub fn seed_user(&self, username: &str) -> User {
        let username = Username::new(username).expect("seed username must be valid");
        let user = User::register(username);
        let mut state = self.state.lock().expect(POISONED);
        state.users.push(user.clone());
        user
    }
}

#[async_trait]
impl UserRepository for FixtureStore {
    async fn resolve_or_register(
        &self,
        username: &Username,
    ) -> Result<User, UserPersistenceError> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| UserPersistenceError::query(POISONED))?;
        if let Some(user) = state.users.iter().find(|user| &user.username == username) {
            return Ok(user.clone());
        }
        let user = User::register(username.clone());
        state.users.push(user.clone());
        Ok(user)
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError> {
        let state = self
            .state
            .lock()
            .map_err(|_| UserPersistenceError::query(POISONED))?;
        Ok(state
            .users
            .iter()
            .find(|user| &user.username == username)
            .cloned())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let state = self
            .state
            .lock()
            .map_err(|_| UserPersistenceError::query(POISONED))?;
        Ok(state.users.iter().find(|user| &user.id == id).cloned())
    }
}

#[async_trait]
impl GroupRepository for FixtureStore {
    async fn insert(&self, group: &Group) -> Result<(), GroupPersistenceError> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| GroupPersistenceError::query(POISONED))?;
        if state.groups.iter().any(|stored| stored.slug == group.slug) {
            return Err(GroupPersistenceError::query("duplicate group slug"));
        }
        state.groups.push(group.clone());
        Ok(())
    }

    async fn find_by_slug(
        &self,
        slug: &GroupSlug,
    ) -> Result<Option<Group>, GroupPersistenceError> {
        let state = self
            .state
            .lock()
            .map_err(|_| GroupPersistenceError::query(POISONED))?;
        Ok(state.groups.iter().find(|group| &group.slug == slug).cloned())
    }

    async fn find_by_id(&self, id: &GroupId) -> Result<Option<Group>, GroupPersistenceError> {
        let state = self
            .state
            .lock()
            .map_err(|_| GroupPersistenceError::query(POISONED))?;
        Ok(state.groups.iter().find(|group| &group.id == id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Group>, GroupPersistenceError> {
        let state = self
            .state
            .lock()
            .map_err(|_| GroupPersistenceError::query(POISONED))?;
        let mut groups = state.groups.clone();
        groups.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(groups)
    }
}

#[async_trait]
impl PostRepository for FixtureStore {
    async fn insert(&self, post: &Post) -> Result<(), PostPersistenceError> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| PostPersistenceError::query(POISONED))?;
        let seq = state.next_seq();
        state.posts.push(StoredPost {
            post: post.clone(),
            seq,
        });
        Ok(())
    }

    async fn apply_changes(
        &self,
        id: &PostId,
        changes: &PostChanges,
    ) -> Result<bool, PostPersistenceError> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| PostPersistenceError::query(POISONED))?;
        let Some(stored) = state.posts.iter_mut().find(|stored| &stored.post.id == id) else {
            return Ok(false);
        };
        stored.post.text = changes.text.clone();
        stored.post.group = changes.group;
        if let Some(image) = &changes.image {
            stored.post.image = Some(image.clone());
        }
        Ok(true)
    }

    async fn find_entry(&self, id: &PostId) -> Result<Option<PostEntry>, PostPersistenceError> {
        let state = self
            .state
            .lock()
            .map_err(|_| PostPersistenceError::query(POISONED))?;
        let Some(stored) = state.posts.iter().find(|stored| &stored.post.id == id) else {
            return Ok(None);
        };
        state
            .entry_for(stored)
            .map(Some)
            .ok_or_else(|| PostPersistenceError::query("post references a missing author"))
    }

    async fn count(&self, filter: &FeedFilter) -> Result<usize, PostPersistenceError> {
        let state = self
            .state
            .lock()
            .map_err(|_| PostPersistenceError::query(POISONED))?;
        Ok(state
            .posts
            .iter()
            .filter(|stored| state.matches(stored, filter))
            .count())
    }

    async fn list_page(
        &self,
        filter: &FeedFilter,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<PostEntry>, PostPersistenceError> {
        let state = self
            .state
            .lock()
            .map_err(|_| PostPersistenceError::query(POISONED))?;
        let mut matching: Vec<&StoredPost> = state
            .posts
            .iter()
            .filter(|stored| state.matches(stored, filter))
            .collect();
        matching.sort_by(|a, b| b.seq.cmp(&a.seq));
        matching
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(|stored| {
                state
                    .entry_for(stored)
                    .ok_or_else(|| PostPersistenceError::query("post references a missing author"))
            })
            .collect()
    }
}

#[async_trait]
impl CommentRepository for FixtureStore {
    async fn insert(&self, comment: &Comment) -> Result<(), CommentPersistenceError> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| CommentPersistenceError::query(POISONED))?;
        let seq = state.next_seq();
        state.comments.push(StoredComment {
            comment: comment.clone(),
            seq,
        });
        Ok(())
    }

    async fn list_for_post(
        &self,
        post: &PostId,
    ) -> Result<Vec<CommentEntry>, CommentPersistenceError> {
        let state = self
            .state
            .lock()
            .map_err(|_| CommentPersistenceError::query(POISONED))?;
        let mut matching: Vec<&StoredComment> = state
            .comments
            .iter()
            .filter(|stored| &stored.comment.post == post)
            .collect();
        matching.sort_by(|a, b| a.seq.cmp(&b.seq));
        matching
            .into_iter()
            .map(|stored| {
                let author = state
                    .author_ref(stored.comment.author)
                    .ok_or_else(|| {
                        CommentPersistenceError::query("comment references a missing author")
                    })?;
                Ok(CommentEntry {
                    id: stored.comment.id,
                    author,
                    text: stored.comment.text.clone(),
                    created_at: stored.comment.created_at,
                })
            })
            .collect()
    }
}

#[async_trait]
impl FollowRepository for FixtureStore {
    async fn create(&self, user: &UserId, author: &UserId) -> Result<(), FollowPersistenceError> {
        if user == author {
            // Mirrors the database CHECK constraint on the edge table.
            return Err(FollowPersistenceError::query(
                "follow edge must not be self-referencing",
            ));
        }
        let mut state = self
            .state
            .lock()
            .map_err(|_| FollowPersistenceError::query(POISONED))?;
        state.follows.insert((*user, *author));
        Ok(())
    }

    async fn delete(&self, user: &UserId, author: &UserId) -> Result<(), FollowPersistenceError> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| FollowPersistenceError::query(POISONED))?;
        state.follows.remove(&(*user, *author));
        Ok(())
    }

    async fn exists(
        &self,
        user: &UserId,
        author: &UserId,
    ) -> Result<bool, FollowPersistenceError> {
        let state = self
            .state
            .lock()
            .map_err(|_| FollowPersistenceError::query(POISONED))?;
        Ok(state.follows.contains(&(*user, *author)))
    }

    async fn authors_followed_by(
        &self,
        user: &UserId,
    ) -> Result<Vec<UserId>, FollowPersistenceError> {
        let state = self
            .state
            .lock()
            .map_err(|_| FollowPersistenceError::query(POISONED))?;
        Ok(state
            .follows
            .iter()
            .filter(|(follower, _)| follower == user)
            .map(|(_, author)| *author)
            .collect())
    }
}
