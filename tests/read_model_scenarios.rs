//! Read-model pipelines run end to end against the in-memory store.

use serde_json::{json, Value};

use vidtube::adapters::InMemoryDocumentStore;
use vidtube::domain::comment::video_comments;
use vidtube::domain::foundation::{UserId, VideoId};
use vidtube::domain::read_model::{
    Collection, Filter, JoinSpec, PageRequest, Projection, ReadModelBuilder, Row, SortSpec,
    ID_FIELD,
};
use vidtube::domain::user::channel_profile;
use vidtube::ports::DocumentStore;

fn row(value: Value) -> Row {
    value.as_object().cloned().expect("object literal")
}

async fn insert(store: &InMemoryDocumentStore, collection: Collection, value: Value) -> String {
    store
        .create(collection, row(value))
        .await
        .expect("create")
        .id()
        .to_string()
}

async fn insert_user(store: &InMemoryDocumentStore, username: &str) -> String {
    insert(
        store,
        Collection::Users,
        json!({
            "username": username,
            "email": format!("{}@example.com", username),
            "fullName": username.to_uppercase(),
            "avatar": format!("/media/{}.png", username),
            "password": "$2b$10$hash",
            "refreshToken": "secret-refresh",
        }),
    )
    .await
}

#[tokio::test]
async fn second_page_of_twenty_five_documents() {
    let store = InMemoryDocumentStore::new();
    for n in 1..=25 {
        insert(&store, Collection::Tweets, json!({ "n": n, "content": format!("t{}", n) })).await;
    }

    let page = ReadModelBuilder::new(Collection::Tweets)
        .sort(SortSpec::ascending("n"))
        .fetch_page(&store, PageRequest::new(2, 10))
        .await
        .unwrap();

    let numbers: Vec<i64> = page
        .items
        .iter()
        .map(|r| r["n"].as_i64().unwrap())
        .collect();
    assert_eq!(numbers, (11..=20).collect::<Vec<_>>());
    assert_eq!(page.total_items, 25);
    assert_eq!(page.total_pages, 3);
    assert!(page.has_next);
    assert!(page.has_prev);
}

#[tokio::test]
async fn empty_collection_yields_empty_page() {
    let store = InMemoryDocumentStore::new();

    let page = ReadModelBuilder::new(Collection::Videos)
        .sort(SortSpec::newest_first())
        .fetch_page(&store, PageRequest::default())
        .await
        .unwrap();

    assert!(page.items.is_empty());
    assert_eq!(page.total_items, 0);
    assert_eq!(page.total_pages, 0);
    assert!(!page.has_next);
    assert!(!page.has_prev);
}

#[tokio::test]
async fn deleted_author_joins_as_null() {
    let store = InMemoryDocumentStore::new();
    let video = VideoId::new();
    let author = insert_user(&store, "ana").await;
    insert(
        &store,
        Collection::Comments,
        json!({ "content": "hello", "video": video.to_string(), "owner": author }),
    )
    .await;
    store
        .delete_many(Collection::Users, &Filter::all())
        .await
        .unwrap();

    let page = video_comments(video)
        .fetch_page(&store, PageRequest::default())
        .await
        .unwrap();

    assert_eq!(page.total_items, 1);
    assert_eq!(page.items[0]["owner"], Value::Null);
    assert_eq!(page.items[0]["content"], json!("hello"));
}

#[tokio::test]
async fn is_subscribed_tracks_caller_membership() {
    let store = InMemoryDocumentStore::new();
    let channel = insert_user(&store, "chan").await;
    let fan = insert_user(&store, "fan").await;
    let stranger = UserId::new();

    let view = |caller: UserId| channel_profile("CHAN", caller).fetch_one(&store);

    // no subscriptions at all
    let profile = view(stranger).await.unwrap().unwrap();
    assert_eq!(profile["isSubscribed"], json!(false));
    assert_eq!(profile["subscribersCount"], json!(0));

    insert(
        &store,
        Collection::Subscriptions,
        json!({ "subscriber": fan, "channel": channel }),
    )
    .await;

    let fan_id = UserId::parse(&fan).unwrap();
    let profile = view(fan_id).await.unwrap().unwrap();
    assert_eq!(profile["isSubscribed"], json!(true));
    assert_eq!(profile["subscribersCount"], json!(1));

    let profile = view(stranger).await.unwrap().unwrap();
    assert_eq!(profile["isSubscribed"], json!(false));
}

#[tokio::test]
async fn user_joins_never_expose_secrets() {
    let store = InMemoryDocumentStore::new();
    let owner = insert_user(&store, "ana").await;
    insert(
        &store,
        Collection::Tweets,
        json!({ "content": "hi", "owner": owner }),
    )
    .await;

    // Even a join without a projection drops credential fields.
    let rows = ReadModelBuilder::new(Collection::Tweets)
        .join(JoinSpec::one(Collection::Users, "owner", ID_FIELD, "owner"))
        .project(Projection::new().fields(["content", "owner"]))
        .fetch_all(&store)
        .await
        .unwrap();

    let owner = rows[0]["owner"].as_object().unwrap();
    assert_eq!(owner["username"], json!("ana"));
    assert!(!owner.contains_key("password"));
    assert!(!owner.contains_key("refreshToken"));
}

#[tokio::test]
async fn identical_queries_return_identical_results() {
    let store = InMemoryDocumentStore::new();
    for n in 0..5 {
        insert(&store, Collection::Tweets, json!({ "content": "same", "n": n % 2 })).await;
    }
    let query = || {
        ReadModelBuilder::new(Collection::Tweets)
            .sort(SortSpec::ascending("n"))
            .fetch_page(&store, PageRequest::new(1, 3))
    };

    let first = query().await.unwrap();
    let second = query().await.unwrap();
    assert_eq!(first, second);
}
