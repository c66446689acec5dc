#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Value};

    use quill_core::domain::{PostPatch, Tag, UserPatch};
    use quill_core::ports::{PostStore, TagStore, UserStore};

    use crate::database::BlogStore;
    use crate::database::entity::{post, tag, user};

    fn user_model(id: i64, username: &str) -> user::Model {
        user::Model {
            id,
            username: username.to_owned(),
            password_hash: "$argon2id$stub".to_owned(),
            name: "Al Bert".to_owned(),
            location: "Sidney, Australia".to_owned(),
            active: true,
        }
    }

    fn post_model(id: i64, author_id: i64, active: bool) -> post::Model {
        post::Model {
            id,
            author_id,
            title: "First Post".to_owned(),
            content: "This is my first post.".to_owned(),
            active,
        }
    }

    fn tag_model(id: i64, name: &str) -> tag::Model {
        tag::Model {
            id,
            name: name.to_owned(),
        }
    }

    #[tokio::test]
    async fn all_users_maps_rows_to_profiles() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![
                user_model(1, "albert"),
                user_model(2, "sandra"),
            ]])
            .into_connection();

        let store = BlogStore::new(db);
        let users = store.all_users().await.unwrap();

        assert_eq!(users.len(), 2);
        assert_eq!(users[0].username, "albert");
        assert_eq!(users[1].id, 2);
    }

    #[tokio::test]
    async fn create_user_returns_created_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![user_model(7, "glamgal")]])
            .into_connection();

        let store = BlogStore::new(db);
        let created = store
            .create_user(quill_core::domain::NewUser {
                username: "glamgal".to_owned(),
                password_hash: "$argon2id$stub".to_owned(),
                name: "Joshua".to_owned(),
                location: "Upper East Side".to_owned(),
            })
            .await
            .unwrap();

        let user = created.expect("insert should return the new row");
        assert_eq!(user.id, 7);
        assert_eq!(user.username, "glamgal");
    }

    #[tokio::test]
    async fn create_user_conflict_returns_none() {
        // ON CONFLICT DO NOTHING suppresses the insert, so RETURNING yields
        // no row and the operation reports "nothing created".
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<user::Model>::new()])
            .into_connection();

        let store = BlogStore::new(db);
        let created = store
            .create_user(quill_core::domain::NewUser {
                username: "albert".to_owned(),
                password_hash: "$argon2id$stub".to_owned(),
                name: "Imposter Al".to_owned(),
                location: "Nowhere".to_owned(),
            })
            .await
            .unwrap();

        assert!(created.is_none());
    }

    #[tokio::test]
    async fn update_user_empty_patch_issues_no_query() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let store = BlogStore::new(db);
        let updated = store.update_user(1, UserPatch::default()).await.unwrap();

        assert!(updated.is_none());
        let log = store.db.into_transaction_log();
        assert!(log.is_empty(), "empty patch must not touch the database");
    }

    #[tokio::test]
    async fn update_user_missing_row_returns_none() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<user::Model>::new()])
            .into_connection();

        let store = BlogStore::new(db);
        let patch = UserPatch {
            location: Some("Chicago, IL".to_owned()),
            ..Default::default()
        };
        let updated = store.update_user(999, patch).await.unwrap();

        assert!(updated.is_none());
    }

    /// The id-listing statements select a single column, so their mock rows
    /// carry just that column.
    fn id_row(id: i64) -> BTreeMap<&'static str, Value> {
        BTreeMap::from([("id", Value::from(id))])
    }

    #[tokio::test]
    async fn user_by_id_attaches_authored_posts() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            // user row
            .append_query_results(vec![vec![user_model(1, "albert")]])
            // post ids authored by the user
            .append_query_results(vec![vec![id_row(10)]])
            // assembly of post 10: row, tags, author
            .append_query_results(vec![vec![post_model(10, 1, true)]])
            .append_query_results(vec![vec![tag_model(1, "#happy")]])
            .append_query_results(vec![vec![user_model(1, "albert")]])
            .into_connection();

        let store = BlogStore::new(db);
        let found = store.user_by_id(1).await.unwrap().expect("user exists");

        assert_eq!(found.profile.username, "albert");
        assert_eq!(found.posts.len(), 1);
        assert_eq!(found.posts[0].author.id, 1);
    }

    #[tokio::test]
    async fn user_by_id_missing_returns_none() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<user::Model>::new()])
            .into_connection();

        let store = BlogStore::new(db);
        assert!(store.user_by_id(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn post_by_id_assembles_author_and_tags() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![post_model(10, 1, true)]])
            .append_query_results(vec![vec![
                tag_model(1, "#happy"),
                tag_model(2, "#youcandoanything"),
            ]])
            .append_query_results(vec![vec![user_model(1, "albert")]])
            .into_connection();

        let store = BlogStore::new(db);
        let view = store.post_by_id(10).await.unwrap().expect("post exists");

        assert_eq!(view.id, 10);
        assert_eq!(view.author.username, "albert");
        let names: Vec<&str> = view.tags.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["#happy", "#youcandoanything"]);
    }

    #[tokio::test]
    async fn all_posts_assembles_each_listed_id() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![id_row(10)]])
            .append_query_results(vec![vec![post_model(10, 1, true)]])
            .append_query_results(vec![vec![tag_model(1, "#happy")]])
            .append_query_results(vec![vec![user_model(1, "albert")]])
            .into_connection();

        let store = BlogStore::new(db);
        let posts = store.all_posts().await.unwrap();

        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].id, 10);
        assert_eq!(posts[0].author.username, "albert");
    }

    #[tokio::test]
    async fn post_by_id_missing_returns_none() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<post::Model>::new()])
            .into_connection();

        let store = BlogStore::new(db);
        assert!(store.post_by_id(404).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_post_without_fields_only_refetches() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![post_model(10, 1, true)]])
            .append_query_results(vec![vec![tag_model(1, "#happy")]])
            .append_query_results(vec![vec![user_model(1, "albert")]])
            .into_connection();

        let store = BlogStore::new(db);
        let view = store
            .update_post(10, PostPatch::default())
            .await
            .unwrap()
            .expect("post exists");

        assert_eq!(view.id, 10);

        let log = format!("{:?}", store.db.into_transaction_log());
        assert!(!log.contains("UPDATE"), "no scalar fields, no UPDATE");
        assert!(!log.contains("DELETE"), "no tags key, no reconciliation");
        assert!(!log.contains("INSERT"), "no tags key, no new links");
    }

    #[tokio::test]
    async fn update_post_replaces_tag_set() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            // existence check for the tag-only patch
            .append_query_results(vec![vec![post_model(10, 1, true)]])
            // create_tags: conflict-ignore insert, then select back
            .append_query_results(vec![vec![tag_model(3, "#x")]])
            .append_query_results(vec![vec![tag_model(3, "#x")]])
            // prune links outside the resolved set
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 2,
            }])
            // link_tags conflict-ignore insert: the composite primary key is
            // fully set, so sea-orm executes the statement instead of
            // querying RETURNING rows.
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            // reassembly: row, tags, author
            .append_query_results(vec![vec![post_model(10, 1, true)]])
            .append_query_results(vec![vec![tag_model(3, "#x")]])
            .append_query_results(vec![vec![user_model(1, "albert")]])
            .into_connection();

        let store = BlogStore::new(db);
        let patch = PostPatch {
            tags: Some(vec!["#x".to_owned()]),
            ..Default::default()
        };
        let view = store.update_post(10, patch).await.unwrap().expect("post exists");

        assert_eq!(view.tags, vec![Tag { id: 3, name: "#x".to_owned() }]);

        let log = format!("{:?}", store.db.into_transaction_log());
        assert!(
            log.contains("NOT IN"),
            "reconciliation must prune links outside the resolved set"
        );
    }

    #[tokio::test]
    async fn soft_delete_keeps_row_intact() {
        let deleted = post_model(10, 1, false);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            // UPDATE ... RETURNING
            .append_query_results(vec![vec![deleted.clone()]])
            // reassembly
            .append_query_results(vec![vec![deleted]])
            .append_query_results(vec![vec![tag_model(1, "#happy")]])
            .append_query_results(vec![vec![user_model(1, "albert")]])
            .into_connection();

        let store = BlogStore::new(db);
        let patch = PostPatch {
            active: Some(false),
            ..Default::default()
        };
        let view = store.update_post(10, patch).await.unwrap().expect("post exists");

        assert!(!view.active);
        assert_eq!(view.title, "First Post");
        assert_eq!(view.tags.len(), 1);
    }

    #[tokio::test]
    async fn posts_by_tag_name_unknown_tag_yields_empty_set() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<tag::Model>::new()])
            .into_connection();

        let store = BlogStore::new(db);
        let posts = store.posts_by_tag_name("#nope").await.unwrap();

        assert!(posts.is_empty());
    }

    #[tokio::test]
    async fn create_tags_empty_input_short_circuits() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let store = BlogStore::new(db);
        let tags = store.create_tags(&[]).await.unwrap();

        assert!(tags.is_empty());
        assert!(store.db.into_transaction_log().is_empty());
    }

    #[tokio::test]
    async fn create_tags_dedups_repeated_names() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![tag_model(1, "#a"), tag_model(2, "#b")]])
            .append_query_results(vec![vec![tag_model(1, "#a"), tag_model(2, "#b")]])
            .into_connection();

        let store = BlogStore::new(db);
        let names = vec!["#a".to_owned(), "#b".to_owned(), "#a".to_owned()];
        let tags = store.create_tags(&names).await.unwrap();

        assert_eq!(tags.len(), 2);

        // Two placeholders in the insert, not three.
        let log = format!("{:?}", store.db.into_transaction_log());
        assert!(!log.contains("$3"), "repeated names must collapse before insert");
    }

    #[tokio::test]
    async fn create_tags_existing_name_resolves_to_existing_row() {
        // All names conflicted: the insert returns nothing, the select-back
        // still resolves each name to its existing row.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<tag::Model>::new()])
            .append_query_results(vec![vec![tag_model(1, "#happy")]])
            .into_connection();

        let store = BlogStore::new(db);
        let tags = store.create_tags(&["#happy".to_owned()]).await.unwrap();

        assert_eq!(tags, vec![Tag { id: 1, name: "#happy".to_owned() }]);
    }

    #[tokio::test]
    async fn link_tags_empty_list_is_noop() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let store = BlogStore::new(db);
        store.link_tags(10, &[]).await.unwrap();

        assert!(store.db.into_transaction_log().is_empty());
    }
}
