// tests/api_tests.rs
//
// End-to-end tests against a real Postgres. They need DATABASE_URL and are
// ignored by default; run them with `cargo test -- --ignored`.

use photogram::{config::Config, routes, state::AppState, utils::jwt::verify_jwt};
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use sqlx::postgres::PgPoolOptions;

const SECRET: &str = "test_secret_for_integration_tests";

/// Spawns the app on a random port and returns its base URL.
async fn spawn_app() -> String {
    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for end-to-end tests");

    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&database_url)
        .await
        .expect("Failed to connect to Postgres for testing. Make sure DATABASE_URL is set.");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to migrate database");

    let config = Config {
        database_url,
        jwt_secret: SECRET.to_string(),
        rust_log: "error".to_string(),
        host: "127.0.0.1".to_string(),
        port: 0,
        database_max_connections: 2,
        cors_origins: vec![],
    };

    let app = routes::create_router(AppState::new(pool, config));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://127.0.0.1:{}", port)
}

fn unique(prefix: &str) -> String {
    format!("{}_{}", prefix, &uuid::Uuid::new_v4().simple().to_string()[..10])
}

fn registration(username: &str) -> Value {
    json!({
        "email": format!("{}@mail.com", username),
        "full_name": "A B",
        "username": username,
        "password": "pw123456",
        "profile_image_url": "http://x.com/p.png",
        "age": 20,
        "phone_number": "0811"
    })
}

/// Registers a fresh user and logs in. Returns (token, user id).
async fn register_and_login(client: &Client, address: &str) -> (String, i64) {
    let username = unique("u");
    let body = registration(&username);

    let res = client
        .post(format!("{}/users/register", address))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let login = client
        .post(format!("{}/users/login", address))
        .json(&json!({"email": body["email"], "password": "pw123456"}))
        .send()
        .await
        .unwrap()
        .json::<Value>()
        .await
        .unwrap();

    let token = login["token"].as_str().expect("Token not found").to_string();
    let id = verify_jwt(&token, SECRET).unwrap().id.unwrap();
    (token, id)
}

async fn create_photo(client: &Client, address: &str, token: &str, title: &str) -> i64 {
    let res = client
        .post(format!("{}/photos", address))
        .header("token", token)
        .json(&json!({
            "title": title,
            "caption": "a caption",
            "poster_image_url": "http://image.com/photo.png"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    res.json::<Value>().await.unwrap()["id"].as_i64().unwrap()
}

#[tokio::test]
#[ignore = "requires a Postgres DATABASE_URL"]
async fn register_returns_profile_without_password() {
    let address = spawn_app().await;
    let client = Client::new();
    let username = unique("ab");
    let body = registration(&username);

    let res = client
        .post(format!("{}/users/register", address))
        .json(&body)
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::CREATED);
    let json = res.json::<Value>().await.unwrap();
    assert_eq!(
        json,
        json!({
            "user": {
                "email": body["email"],
                "full_name": "A B",
                "username": username,
                "profile_image_url": "http://x.com/p.png",
                "age": 20,
                "phone_number": "0811"
            }
        })
    );
}

#[tokio::test]
#[ignore = "requires a Postgres DATABASE_URL"]
async fn duplicate_email_or_username_is_400() {
    let address = spawn_app().await;
    let client = Client::new();
    let username = unique("dup");
    let body = registration(&username);

    let first = client
        .post(format!("{}/users/register", address))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);

    // Same email, new username
    let mut same_email = body.clone();
    same_email["username"] = json!(unique("other"));
    let res = client
        .post(format!("{}/users/register", address))
        .json(&same_email)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        res.json::<Value>().await.unwrap()["message"],
        "Email is already registered"
    );

    // Same username, new email
    let mut same_username = body.clone();
    same_username["email"] = json!(format!("{}@mail.com", unique("other")));
    let res = client
        .post(format!("{}/users/register", address))
        .json(&same_username)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        res.json::<Value>().await.unwrap()["message"],
        "Username is already taken"
    );
}

#[tokio::test]
#[ignore = "requires a Postgres DATABASE_URL"]
async fn login_with_wrong_password_is_400() {
    let address = spawn_app().await;
    let client = Client::new();
    let body = registration(&unique("lw"));

    client
        .post(format!("{}/users/register", address))
        .json(&body)
        .send()
        .await
        .unwrap();

    let res = client
        .post(format!("{}/users/login", address))
        .json(&json!({"email": body["email"], "password": "not-the-password"}))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        res.json::<Value>().await.unwrap(),
        json!({"message": "Fail, your password is incorrect"})
    );
}

#[tokio::test]
#[ignore = "requires a Postgres DATABASE_URL"]
async fn photo_ownership_is_enforced() {
    let address = spawn_app().await;
    let client = Client::new();
    let (token_a, id_a) = register_and_login(&client, &address).await;
    let (token_b, _) = register_and_login(&client, &address).await;

    let photo_id = create_photo(&client, &address, &token_a, "mine").await;
    let edit = json!({
        "title": "edited",
        "caption": "edited caption",
        "poster_image_url": "http://image.com/edit.png"
    });

    // No token
    let res = client
        .put(format!("{}/photos/{}", address, photo_id))
        .json(&edit)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    // Garbage token
    let res = client
        .put(format!("{}/photos/{}", address, photo_id))
        .header("token", "wrong.token.input")
        .json(&edit)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    // Someone else's token
    let res = client
        .put(format!("{}/photos/{}", address, photo_id))
        .header("token", &token_b)
        .json(&edit)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // Unknown id
    let res = client
        .delete(format!("{}/photos/{}", address, i64::MAX))
        .header("token", &token_a)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // Owner
    let res = client
        .put(format!("{}/photos/{}", address, photo_id))
        .header("token", &token_a)
        .json(&edit)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let photo = &res.json::<Value>().await.unwrap()["photo"];
    assert_eq!(photo["title"], "edited");
    assert_eq!(photo["UserId"], id_a);

    let res = client
        .delete(format!("{}/photos/{}", address, photo_id))
        .header("token", &token_a)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "requires a Postgres DATABASE_URL"]
async fn comment_on_unknown_photo_is_400() {
    let address = spawn_app().await;
    let client = Client::new();
    let (token, _) = register_and_login(&client, &address).await;

    let res = client
        .post(format!("{}/comments", address))
        .header("token", &token)
        .json(&json!({"comment": "hello", "PhotoId": i64::MAX}))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        res.json::<Value>().await.unwrap()["message"],
        "Fail to create comment. Can't find photo"
    );
}

#[tokio::test]
#[ignore = "requires a Postgres DATABASE_URL"]
async fn comment_lifecycle_and_listing() {
    let address = spawn_app().await;
    let client = Client::new();
    let (token_a, id_a) = register_and_login(&client, &address).await;
    let (token_b, _) = register_and_login(&client, &address).await;
    let photo_id = create_photo(&client, &address, &token_a, "commented").await;

    let res = client
        .post(format!("{}/comments", address))
        .header("token", &token_a)
        .json(&json!({"comment": "first!", "PhotoId": photo_id}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let comment = res.json::<Value>().await.unwrap()["comment"].clone();
    let comment_id = comment["id"].as_i64().unwrap();
    assert_eq!(comment["UserId"], id_a);
    assert_eq!(comment["PhotoId"], photo_id);

    let listed = client
        .get(format!("{}/comments", address))
        .header("token", &token_b)
        .send()
        .await
        .unwrap()
        .json::<Value>()
        .await
        .unwrap();
    let item = listed["comments"]
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["id"] == comment_id)
        .expect("comment listed");
    assert_eq!(item["Photo"]["id"], photo_id);
    assert_eq!(item["User"]["id"], id_a);

    let photos = client
        .get(format!("{}/photos", address))
        .header("token", &token_b)
        .send()
        .await
        .unwrap()
        .json::<Value>()
        .await
        .unwrap();
    let photo = photos["photos"]
        .as_array()
        .unwrap()
        .iter()
        .find(|p| p["id"] == photo_id)
        .expect("photo listed");
    assert_eq!(photo["Comments"][0]["comment"], "first!");

    let res = client
        .put(format!("{}/comments/{}", address, comment_id))
        .header("token", &token_b)
        .json(&json!({"comment": "hijack"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = client
        .put(format!("{}/comments/{}", address, comment_id))
        .header("token", &token_a)
        .json(&json!({"comment": "edited"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await.unwrap()["comment"]["comment"], "edited");

    let res = client
        .delete(format!("{}/comments/{}", address, comment_id))
        .header("token", &token_a)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "requires a Postgres DATABASE_URL"]
async fn free_text_round_trips_verbatim() {
    let address = spawn_app().await;
    let client = Client::new();
    let (token, _) = register_and_login(&client, &address).await;
    let text = "Tom & Jerry <3";

    let res = client
        .post(format!("{}/photos", address))
        .header("token", &token)
        .json(&json!({
            "title": text,
            "caption": text,
            "poster_image_url": "http://image.com/photo.png"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let photo = res.json::<Value>().await.unwrap();
    assert_eq!(photo["title"], text);
    assert_eq!(photo["caption"], text);
    let photo_id = photo["id"].as_i64().unwrap();

    let res = client
        .post(format!("{}/comments", address))
        .header("token", &token)
        .json(&json!({"comment": text, "PhotoId": photo_id}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    assert_eq!(res.json::<Value>().await.unwrap()["comment"]["comment"], text);

    let photos = client
        .get(format!("{}/photos", address))
        .header("token", &token)
        .send()
        .await
        .unwrap()
        .json::<Value>()
        .await
        .unwrap();
    let listed = photos["photos"]
        .as_array()
        .unwrap()
        .iter()
        .find(|p| p["id"] == photo_id)
        .expect("photo listed");
    assert_eq!(listed["caption"], text);
    assert_eq!(listed["Comments"][0]["comment"], text);
}

#[tokio::test]
#[ignore = "requires a Postgres DATABASE_URL"]
async fn social_media_crud() {
    let address = spawn_app().await;
    let client = Client::new();
    let (token, id) = register_and_login(&client, &address).await;

    let res = client
        .post(format!("{}/socialmedias", address))
        .header("token", &token)
        .json(&json!({"name": "instagram", "social_media_url": "https://instagram.com/ab"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let created = res.json::<Value>().await.unwrap()["social_media"].clone();
    let sm_id = created["id"].as_i64().unwrap();
    assert_eq!(created["UserId"], id);

    let res = client
        .put(format!("{}/socialmedias/{}", address, sm_id))
        .header("token", &token)
        .json(&json!({"name": "github", "social_media_url": "https://github.com/ab"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.json::<Value>().await.unwrap()["social_media"]["name"],
        "github"
    );

    let res = client
        .delete(format!("{}/socialmedias/{}", address, sm_id))
        .header("token", &token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.json::<Value>().await.unwrap()["message"],
        "Your social media has been successfully deleted"
    );

    let res = client
        .delete(format!("{}/socialmedias/{}", address, sm_id))
        .header("token", &token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires a Postgres DATABASE_URL"]
async fn deleting_user_cascades_to_photos_and_comments() {
    let address = spawn_app().await;
    let client = Client::new();
    let (token_a, id_a) = register_and_login(&client, &address).await;
    let (token_b, id_b) = register_and_login(&client, &address).await;

    let photo_id = create_photo(&client, &address, &token_a, "doomed").await;
    client
        .post(format!("{}/comments", address))
        .header("token", &token_b)
        .json(&json!({"comment": "bye", "PhotoId": photo_id}))
        .send()
        .await
        .unwrap();

    // B may not delete A
    let res = client
        .delete(format!("{}/users/{}", address, id_a))
        .header("token", &token_b)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = client
        .delete(format!("{}/users/{}", address, id_a))
        .header("token", &token_a)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let photos = client
        .get(format!("{}/photos", address))
        .header("token", &token_b)
        .send()
        .await
        .unwrap()
        .json::<Value>()
        .await
        .unwrap();
    assert!(
        photos["photos"]
            .as_array()
            .unwrap()
            .iter()
            .all(|p| p["UserId"] != id_a)
    );

    let comments = client
        .get(format!("{}/comments", address))
        .header("token", &token_b)
        .send()
        .await
        .unwrap()
        .json::<Value>()
        .await
        .unwrap();
    assert!(
        comments["comments"]
            .as_array()
            .unwrap()
            .iter()
            .all(|c| c["PhotoId"] != photo_id && c["UserId"] != id_a)
    );

    // B still exists and may update their own profile
    let mut update = registration(&unique("renamed"));
    update.as_object_mut().unwrap().remove("password");
    let res = client
        .put(format!("{}/users/{}", address, id_b))
        .header("token", &token_b)
        .json(&update)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let user = &res.json::<Value>().await.unwrap()["user"];
    assert_eq!(user["id"], id_b);
    assert!(user.get("password").is_none());
}
