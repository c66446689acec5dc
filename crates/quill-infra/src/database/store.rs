//! The data access layer: translates domain operations into relational
//! queries and reshapes relational results into nested domain objects.
//!
//! Multi-statement operations (create_post, update_post) run with no
//! transaction: each statement commits independently, and a failure
//! mid-sequence propagates loudly rather than rolling back or returning a
//! partially built object.

use async_trait::async_trait;
use futures::{StreamExt, TryStreamExt, stream};
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbConn, DbErr, EntityTrait, ModelTrait, QueryFilter,
    QuerySelect, Set, Unchanged,
};

use quill_core::domain::{
    NewPost, NewUser, PostPatch, PostView, Profile, ProfileWithPosts, Tag, User, UserPatch,
};
use quill_core::error::RepoError;
use quill_core::ports::{PostStore, TagStore, UserStore};

use super::entity::{post, post_tag, tag, user};

/// How many posts are assembled concurrently by the listing operations.
/// Each assembly is three sequential lookups; the bound keeps a large
/// result set from exhausting the connection pool.
const ASSEMBLY_WIDTH: usize = 8;

/// SeaORM-backed store over a pooled connection. One instance is shared by
/// every handler; the pool inside `DbConn` scopes acquisition per statement.
pub struct BlogStore {
    pub(crate) db: DbConn,
}

impl BlogStore {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    /// Assemble many posts by id with bounded concurrency. Completion order
    /// is not meaningful; callers treat the result as a set.
    async fn assemble_posts(&self, ids: Vec<i64>) -> Result<Vec<PostView>, RepoError> {
        let views: Vec<Option<PostView>> = stream::iter(ids)
            .map(|id| self.post_by_id(id))
            .buffer_unordered(ASSEMBLY_WIDTH)
            .try_collect()
            .await?;

        // Ids come from the statement just before assembly, so a hole means
        // a concurrent hard delete; skip it rather than fail the listing.
        Ok(views.into_iter().flatten().collect())
    }
}

fn query_err(context: &'static str) -> impl FnOnce(DbErr) -> RepoError {
    move |e| {
        tracing::error!(error = %e, "{context}");
        RepoError::Query(e.to_string())
    }
}

#[async_trait]
impl UserStore for BlogStore {
    async fn all_users(&self) -> Result<Vec<Profile>, RepoError> {
        let rows = user::Entity::find()
            .all(&self.db)
            .await
            .map_err(query_err("error getting all users"))?;

        Ok(rows.into_iter().map(Profile::from).collect())
    }

    async fn create_user(&self, new: NewUser) -> Result<Option<User>, RepoError> {
        let row = user::ActiveModel {
            username: Set(new.username),
            password_hash: Set(new.password_hash),
            name: Set(new.name),
            location: Set(new.location),
            ..Default::default()
        };

        let inserted = user::Entity::insert(row)
            .on_conflict(
                OnConflict::column(user::Column::Username)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_with_returning(&self.db)
            .await;

        match inserted {
            Ok(model) => Ok(Some(model.into())),
            // Conflict-ignore insert: the username is taken, nothing was
            // created. The caller turns this into a domain conflict.
            Err(DbErr::RecordNotInserted) => Ok(None),
            Err(e) => Err(query_err("error creating a user")(e)),
        }
    }

    async fn update_user(&self, id: i64, patch: UserPatch) -> Result<Option<User>, RepoError> {
        if patch.is_empty() {
            return Ok(None);
        }

        let mut row = user::ActiveModel {
            id: Unchanged(id),
            ..Default::default()
        };
        if let Some(username) = patch.username {
            row.username = Set(username);
        }
        if let Some(password_hash) = patch.password_hash {
            row.password_hash = Set(password_hash);
        }
        if let Some(name) = patch.name {
            row.name = Set(name);
        }
        if let Some(location) = patch.location {
            row.location = Set(location);
        }
        if let Some(active) = patch.active {
            row.active = Set(active);
        }

        match row.update(&self.db).await {
            Ok(model) => Ok(Some(model.into())),
            // Zero rows affected is a no-op, not an error.
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(query_err("error updating a user")(e)),
        }
    }

    async fn user_by_id(&self, id: i64) -> Result<Option<ProfileWithPosts>, RepoError> {
        let Some(row) = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_err("error getting a user by id"))?
        else {
            return Ok(None);
        };

        let posts = self.posts_by_author(id).await?;

        Ok(Some(ProfileWithPosts {
            profile: row.into(),
            posts,
        }))
    }

    async fn user_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let row = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(query_err("error getting a user by username"))?;

        Ok(row.map(User::from))
    }
}

#[async_trait]
impl PostStore for BlogStore {
    async fn create_post(&self, new: NewPost) -> Result<PostView, RepoError> {
        let row = post::ActiveModel {
            author_id: Set(new.author_id),
            title: Set(new.title),
            content: Set(new.content),
            ..Default::default()
        };

        let inserted = post::Entity::insert(row)
            .exec_with_returning(&self.db)
            .await
            .map_err(query_err("error creating a post"))?;

        let tags = self.create_tags(&new.tags).await?;
        self.link_tags(inserted.id, &tags).await?;

        self.post_by_id(inserted.id)
            .await?
            .ok_or_else(|| RepoError::Query(format!("post {} vanished during assembly", inserted.id)))
    }

    async fn update_post(&self, id: i64, patch: PostPatch) -> Result<Option<PostView>, RepoError> {
        if patch.has_scalar_fields() {
            let mut row = post::ActiveModel {
                id: Unchanged(id),
                ..Default::default()
            };
            if let Some(title) = patch.title {
                row.title = Set(title);
            }
            if let Some(content) = patch.content {
                row.content = Set(content);
            }
            if let Some(active) = patch.active {
                row.active = Set(active);
            }

            match row.update(&self.db).await {
                Ok(_) => {}
                Err(DbErr::RecordNotUpdated) => return Ok(None),
                Err(e) => return Err(query_err("error updating a post")(e)),
            }
        } else if patch.tags.is_some() {
            // Tag-only patches still need the row to exist before touching
            // the association table.
            let exists = post::Entity::find_by_id(id)
                .one(&self.db)
                .await
                .map_err(query_err("error updating a post"))?;
            if exists.is_none() {
                return Ok(None);
            }
        }

        if let Some(names) = patch.tags {
            // Three-step reconciliation: resolve the desired set, delete
            // links outside it, insert the missing ones. The delete is
            // issued even when no rows qualify.
            let tags = self.create_tags(&names).await?;
            let keep: Vec<i64> = tags.iter().map(|t| t.id).collect();

            post_tag::Entity::delete_many()
                .filter(post_tag::Column::PostId.eq(id))
                .filter(post_tag::Column::TagId.is_not_in(keep))
                .exec(&self.db)
                .await
                .map_err(query_err("error pruning post tags"))?;

            self.link_tags(id, &tags).await?;
        }

        self.post_by_id(id).await
    }

    async fn all_posts(&self) -> Result<Vec<PostView>, RepoError> {
        let ids: Vec<i64> = post::Entity::find()
            .select_only()
            .column(post::Column::Id)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(query_err("error getting posts"))?;

        self.assemble_posts(ids).await
    }

    async fn posts_by_author(&self, author_id: i64) -> Result<Vec<PostView>, RepoError> {
        let ids: Vec<i64> = post::Entity::find()
            .filter(post::Column::AuthorId.eq(author_id))
            .select_only()
            .column(post::Column::Id)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(query_err("error getting posts by author"))?;

        self.assemble_posts(ids).await
    }

    async fn posts_by_tag_name(&self, name: &str) -> Result<Vec<PostView>, RepoError> {
        let Some(tag_row) = tag::Entity::find()
            .filter(tag::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(query_err("error getting posts by tag name"))?
        else {
            return Ok(Vec::new());
        };

        let ids: Vec<i64> = tag_row
            .find_related(post::Entity)
            .select_only()
            .column(post::Column::Id)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(query_err("error getting posts by tag name"))?;

        self.assemble_posts(ids).await
    }

    async fn post_by_id(&self, id: i64) -> Result<Option<PostView>, RepoError> {
        let Some(row) = post::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_err("error getting a post by id"))?
        else {
            return Ok(None);
        };

        let tags = row
            .find_related(tag::Entity)
            .all(&self.db)
            .await
            .map_err(query_err("error getting a post's tags"))?;

        // The FK makes the author row a given; a miss here means the schema
        // itself is broken.
        let author = user::Entity::find_by_id(row.author_id)
            .one(&self.db)
            .await
            .map_err(query_err("error getting a post's author"))?
            .ok_or_else(|| {
                RepoError::Query(format!("author {} missing for post {}", row.author_id, row.id))
            })?;

        Ok(Some(PostView {
            id: row.id,
            title: row.title,
            content: row.content,
            active: row.active,
            author: author.into(),
            tags: tags.into_iter().map(Tag::from).collect(),
        }))
    }
}

#[async_trait]
impl TagStore for BlogStore {
    async fn create_tags(&self, names: &[String]) -> Result<Vec<Tag>, RepoError> {
        let mut names: Vec<String> = names.to_vec();
        names.sort();
        names.dedup();

        if names.is_empty() {
            return Ok(Vec::new());
        }

        let rows = names.iter().map(|name| tag::ActiveModel {
            name: Set(name.clone()),
            ..Default::default()
        });

        tag::Entity::insert_many(rows)
            .on_conflict(OnConflict::column(tag::Column::Name).do_nothing().to_owned())
            .do_nothing()
            .exec(&self.db)
            .await
            .map_err(query_err("error creating tags"))?;

        // Select back the whole set; conflicted names resolve to their
        // existing rows.
        let rows = tag::Entity::find()
            .filter(tag::Column::Name.is_in(names))
            .all(&self.db)
            .await
            .map_err(query_err("error creating tags"))?;

        Ok(rows.into_iter().map(Tag::from).collect())
    }

    async fn link_tags(&self, post_id: i64, tags: &[Tag]) -> Result<(), RepoError> {
        if tags.is_empty() {
            return Ok(());
        }

        let links = tags.iter().map(|t| post_tag::ActiveModel {
            post_id: Set(post_id),
            tag_id: Set(t.id),
        });

        post_tag::Entity::insert_many(links)
            .on_conflict(
                OnConflict::columns([post_tag::Column::PostId, post_tag::Column::TagId])
                    .do_nothing()
                    .to_owned(),
            )
            .do_nothing()
            .exec(&self.db)
            .await
            .map_err(query_err("error linking tags to a post"))?;

        Ok(())
    }

    async fn all_tags(&self) -> Result<Vec<Tag>, RepoError> {
        let rows = tag::Entity::find()
            .all(&self.db)
            .await
            .map_err(query_err("error getting all tags"))?;

        Ok(rows.into_iter().map(Tag::from).collect())
    }
}
