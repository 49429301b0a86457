//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations exactly; Diesel uses them for
//! compile-time query validation and type-safe SQL generation. When a
//! migration changes the schema, regenerate with `diesel print-schema` or
//! update by hand.

diesel::table! {
    /// Registered users.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Unique author handle.
        #[max_length = 150]
        username -> Varchar,
        /// Registration timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Administrator-curated post groups.
    groups (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Display title.
        title -> Varchar,
        /// Unique URL-safe identifier.
        #[max_length = 64]
        slug -> Varchar,
        /// Free-form description.
        description -> Text,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// User posts, optionally grouped, optionally carrying an image.
    posts (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Owning author.
        author_id -> Uuid,
        /// Optional group membership.
        group_id -> Nullable<Uuid>,
        /// Body text.
        text -> Text,
        /// Optional image attachment bytes.
        image -> Nullable<Bytea>,
        /// Creation timestamp; never updated.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Comments on posts; append-only.
    comments (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Commented post.
        post_id -> Uuid,
        /// Commenting user.
        author_id -> Uuid,
        /// Body text.
        text -> Text,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Directed follow edges; the composite key enforces uniqueness and a
    /// CHECK constraint in the migration forbids self-referencing rows.
    follows (user_id, author_id) {
        /// Following user.
        user_id -> Uuid,
        /// Followed author.
        author_id -> Uuid,
        /// Edge creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(posts -> users (author_id));
diesel::joinable!(posts -> groups (group_id));
diesel::joinable!(comments -> posts (post_id));
diesel::joinable!(comments -> users (author_id));

diesel::allow_tables_to_appear_in_same_query!(users, groups, posts, comments, follows);
