mod common;

use common::TestDb;
use skeleton_service::domain::authentication::errors::AuthenticationError;
use skeleton_service::domain::authentication::models::LoginIdentifier;
use skeleton_service::domain::authentication::ports::AuthenticationRepository;
use skeleton_service::domain::pagination::Pagination;
use skeleton_service::domain::post::errors::PostError;
use skeleton_service::domain::post::models::NewPost;
use skeleton_service::domain::post::models::Post;
use skeleton_service::domain::post::models::PostId;
use skeleton_service::domain::post::ports::PostRepository;
use skeleton_service::domain::user::errors::UserError;
use skeleton_service::domain::user::models::EmailAddress;
use skeleton_service::domain::user::models::NewUser;
use skeleton_service::domain::user::models::OAuthProfile;
use skeleton_service::domain::user::models::Origin;
use skeleton_service::domain::user::models::Role;
use skeleton_service::domain::user::models::User;
use skeleton_service::domain::user::models::UserId;
use skeleton_service::domain::user::models::Username;
use skeleton_service::domain::user::ports::UserRepository;
use skeleton_service::outbound::repositories::PostgresPostRepository;
use skeleton_service::outbound::repositories::PostgresUserRepository;

fn native(email: &str, username: &str, role: Role) -> NewUser {
    NewUser {
        email: EmailAddress::new(email.to_string()).unwrap(),
        username: Some(Username::new(username.to_string()).unwrap()),
        password_hash: Some("$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string()),
        role,
        origin: Origin::Native,
        profile: OAuthProfile::default(),
    }
}

fn google(email: &str) -> NewUser {
    NewUser {
        email: EmailAddress::new(email.to_string()).unwrap(),
        username: None,
        password_hash: None,
        role: Role::User,
        origin: Origin::Google,
        profile: OAuthProfile {
            first_name: Some("Grace".to_string()),
            last_name: Some("Hopper".to_string()),
            picture_url: None,
            refresh_token: Some("refresh-1".to_string()),
        },
    }
}

fn new_post(user: &User, title: &str, content: &str) -> NewPost {
    NewPost {
        user_id: user.id,
        title: title.to_string(),
        content: content.to_string(),
    }
}

fn ids(users: &[User]) -> Vec<UserId> {
    users.iter().map(|u| u.id).collect()
}

fn post_ids(posts: &[Post]) -> Vec<PostId> {
    posts.iter().map(|p| p.id).collect()
}

#[tokio::test]
async fn test_create_maps_unique_constraints_to_conflicts() {
    let Some(db) = TestDb::try_new().await else {
        return;
    };
    let repository = PostgresUserRepository::new(db.pool.clone());

    let alice = repository
        .create(native("alice@example.com", "alice", Role::User))
        .await
        .unwrap();
    assert_eq!(alice.email.as_str(), "alice@example.com");
    assert_eq!(alice.role, Role::User);
    assert_eq!(alice.origin, Origin::Native);

    let same_email = repository
        .create(native("alice@example.com", "other", Role::User))
        .await;
    assert!(matches!(same_email, Err(UserError::EmailAlreadyExists(_))));

    let same_username = repository
        .create(native("other@example.com", "alice", Role::User))
        .await;
    assert!(matches!(
        same_username,
        Err(UserError::UsernameAlreadyExists(_))
    ));

    let provisioned = repository.create_user(google("alice@example.com")).await;
    assert!(matches!(
        provisioned,
        Err(AuthenticationError::AlreadyExists(_))
    ));
}

#[tokio::test]
async fn test_find_by_role_orders_by_id_and_windows() {
    let Some(db) = TestDb::try_new().await else {
        return;
    };
    let repository = PostgresUserRepository::new(db.pool.clone());

    let mut users = Vec::new();
    for name in ["user1", "user2", "user3"] {
        let email = format!("{}@example.com", name);
        users.push(
            repository
                .create(native(&email, name, Role::User))
                .await
                .unwrap(),
        );
    }
    let admin = repository
        .create(native("root@example.com", "root", Role::Admin))
        .await
        .unwrap();

    let all = repository
        .find_by_role(Role::User, Pagination::unbounded())
        .await
        .unwrap();
    assert_eq!(ids(&all), ids(&users));

    let window = repository
        .find_by_role(Role::User, Pagination::new(2, 1))
        .await
        .unwrap();
    assert_eq!(ids(&window), ids(&users[1..]));

    let zero_limit = repository
        .find_by_role(Role::User, Pagination::new(0, 2))
        .await
        .unwrap();
    assert_eq!(ids(&zero_limit), ids(&users[2..]));

    let past_end = repository
        .find_by_role(Role::User, Pagination::new(5, 10))
        .await
        .unwrap();
    assert!(past_end.is_empty());

    let admins = repository
        .find_by_role(Role::Admin, Pagination::unbounded())
        .await
        .unwrap();
    assert_eq!(ids(&admins), vec![admin.id]);
}

#[tokio::test]
async fn test_search_by_username_matches_fragment_literally() {
    let Some(db) = TestDb::try_new().await else {
        return;
    };
    let repository = PostgresUserRepository::new(db.pool.clone());

    let mut created = Vec::new();
    for name in ["alice", "malice", "a_b1", "axb1"] {
        let email = format!("{}@example.com", name);
        created.push(
            repository
                .create(native(&email, name, Role::User))
                .await
                .unwrap(),
        );
    }

    let found = repository
        .search_by_username("lic", Pagination::unbounded())
        .await
        .unwrap();
    assert_eq!(ids(&found), ids(&created[..2]));

    let underscore = repository
        .search_by_username("_", Pagination::unbounded())
        .await
        .unwrap();
    assert_eq!(ids(&underscore), vec![created[2].id]);

    let paged = repository
        .search_by_username("lic", Pagination::new(1, 1))
        .await
        .unwrap();
    assert_eq!(ids(&paged), vec![created[1].id]);
}

#[tokio::test]
async fn test_find_by_login_prefers_email_match() {
    let Some(db) = TestDb::try_new().await else {
        return;
    };
    let repository = PostgresUserRepository::new(db.pool.clone());

    let by_username = repository
        .create(native("first@example.com", "shared", Role::User))
        .await
        .unwrap();
    let by_email = repository
        .create(native("second@example.com", "second", Role::User))
        .await
        .unwrap();

    let both = LoginIdentifier::new(
        Some("second@example.com".to_string()),
        Some("shared".to_string()),
    )
    .unwrap();
    let found = repository.find_by_login(&both).await.unwrap().unwrap();
    assert_eq!(found.id, by_email.id);

    let username_only = LoginIdentifier::new(None, Some("shared".to_string())).unwrap();
    let found = repository
        .find_by_login(&username_only)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, by_username.id);

    let unknown_email = LoginIdentifier::new(
        Some("nobody@example.com".to_string()),
        Some("shared".to_string()),
    )
    .unwrap();
    let found = repository
        .find_by_login(&unknown_email)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, by_username.id);

    let missing = LoginIdentifier::new(Some("nobody@example.com".to_string()), None).unwrap();
    assert!(repository.find_by_login(&missing).await.unwrap().is_none());
}

#[tokio::test]
async fn test_google_user_is_found_by_email() {
    let Some(db) = TestDb::try_new().await else {
        return;
    };
    let repository = PostgresUserRepository::new(db.pool.clone());

    let created = repository
        .create_user(google("grace@example.com"))
        .await
        .unwrap();
    assert_eq!(created.origin, Origin::Google);
    assert_eq!(created.password_hash, None);
    assert_eq!(created.profile.refresh_token.as_deref(), Some("refresh-1"));

    let email = EmailAddress::new("grace@example.com".to_string()).unwrap();
    let found = repository.find_by_email(&email).await.unwrap().unwrap();
    assert_eq!(found.id, created.id);
    assert_eq!(found.profile.last_name.as_deref(), Some("Hopper"));
}

#[tokio::test]
async fn test_update_conflicts_and_missing_rows() {
    let Some(db) = TestDb::try_new().await else {
        return;
    };
    let repository = PostgresUserRepository::new(db.pool.clone());

    let alice = repository
        .create(native("alice@example.com", "alice", Role::User))
        .await
        .unwrap();
    repository
        .create(native("bob@example.com", "bob", Role::User))
        .await
        .unwrap();

    let mut renamed = alice.clone();
    renamed.email = EmailAddress::new("alice@new.example.com".to_string()).unwrap();
    let updated = repository.update(renamed).await.unwrap();
    assert_eq!(updated.email.as_str(), "alice@new.example.com");
    assert!(updated.updated_at >= alice.updated_at);

    let mut taken = updated.clone();
    taken.username = Some(Username::new("bob".to_string()).unwrap());
    assert!(matches!(
        repository.update(taken).await,
        Err(UserError::UsernameAlreadyExists(_))
    ));

    let mut ghost = updated;
    ghost.id = UserId(9999);
    assert!(matches!(
        repository.update(ghost).await,
        Err(UserError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_delete_is_hard_and_cascades_to_posts() {
    let Some(db) = TestDb::try_new().await else {
        return;
    };
    let users = PostgresUserRepository::new(db.pool.clone());
    let posts = PostgresPostRepository::new(db.pool.clone());

    let alice = users
        .create(native("alice@example.com", "alice", Role::User))
        .await
        .unwrap();
    posts
        .create(new_post(&alice, "Hello", "First post"))
        .await
        .unwrap();

    users.delete(&alice.id).await.unwrap();

    assert!(users.find_by_id(&alice.id).await.unwrap().is_none());
    assert!(posts.find_by_user(&alice.id).await.unwrap().is_empty());
    assert!(matches!(
        users.delete(&alice.id).await,
        Err(UserError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_create_post_for_unknown_owner() {
    let Some(db) = TestDb::try_new().await else {
        return;
    };
    let posts = PostgresPostRepository::new(db.pool.clone());

    let result = posts
        .create(NewPost {
            user_id: UserId(9999),
            title: "Hello".to_string(),
            content: "Nobody home".to_string(),
        })
        .await;
    assert!(matches!(result, Err(PostError::OwnerNotFound(_))));
}

#[tokio::test]
async fn test_find_by_user_returns_newest_first() {
    let Some(db) = TestDb::try_new().await else {
        return;
    };
    let users = PostgresUserRepository::new(db.pool.clone());
    let posts = PostgresPostRepository::new(db.pool.clone());

    let alice = users
        .create(native("alice@example.com", "alice", Role::User))
        .await
        .unwrap();
    let bob = users
        .create(native("bob@example.com", "bob", Role::User))
        .await
        .unwrap();

    let mut created = Vec::new();
    for title in ["one", "two", "three"] {
        created.push(
            posts
                .create(new_post(&alice, title, "body"))
                .await
                .unwrap(),
        );
    }
    created.reverse();

    let listed = posts.find_by_user(&alice.id).await.unwrap();
    assert_eq!(post_ids(&listed), post_ids(&created));
    assert!(posts.find_by_user(&bob.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_full_text_ranks_best_match_first_and_windows() {
    let Some(db) = TestDb::try_new().await else {
        return;
    };
    let users = PostgresUserRepository::new(db.pool.clone());
    let posts = PostgresPostRepository::new(db.pool.clone());

    let alice = users
        .create(native("alice@example.com", "alice", Role::User))
        .await
        .unwrap();

    let ownership = posts
        .create(new_post(&alice, "Rust ownership", "Borrowing explained"))
        .await
        .unwrap();
    let sauce = posts
        .create(new_post(&alice, "Cooking", "A rust colored sauce"))
        .await
        .unwrap();
    let async_rust = posts
        .create(new_post(
            &alice,
            "Rust async rust",
            "Rust tasks and rust futures",
        ))
        .await
        .unwrap();
    let garden = posts
        .create(new_post(&alice, "Gardening", "Tomatoes in spring"))
        .await
        .unwrap();

    let ranked = posts
        .search_full_text("rust", Pagination::unbounded())
        .await
        .unwrap();
    assert_eq!(ranked.len(), 3);
    assert_eq!(ranked[0].id, async_rust.id);
    assert!(!post_ids(&ranked).contains(&garden.id));

    let first = posts
        .search_full_text("rust", Pagination::new(1, 0))
        .await
        .unwrap();
    assert_eq!(post_ids(&first), vec![async_rust.id]);

    let rest = posts
        .search_full_text("rust", Pagination::new(10, 1))
        .await
        .unwrap();
    assert_eq!(post_ids(&rest), post_ids(&ranked[1..]));

    let mut excluded = post_ids(
        &posts
            .search_full_text("rust -cooking", Pagination::unbounded())
            .await
            .unwrap(),
    );
    excluded.sort();
    assert_eq!(excluded, vec![ownership.id, async_rust.id]);
    assert!(!excluded.contains(&sauce.id));

    let stemmed = posts
        .search_full_text("gardens", Pagination::unbounded())
        .await
        .unwrap();
    assert_eq!(post_ids(&stemmed), vec![garden.id]);
}
