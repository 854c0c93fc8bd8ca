#[cfg(test)]
mod integration_tests {
    use crate::handlers::auth::{LoginRequest, RegisterRequest};
    use crate::handlers::comments::CreateCommentRequest;
    use crate::handlers::genres::CreateGenreRequest;
    use crate::handlers::posts::CreatePostRequest;
    use crate::router::create_router;
    use crate::schemas::{ApiResponse, ErrorResponse};
    use crate::test_utils::test_utils::{setup_test_app, setup_test_app_state};
    use axum::http::{header::AUTHORIZATION, HeaderValue, StatusCode};
    use axum_test::TestServer;
    use model::entities::prelude::{Genre, Session, User};
    use model::entities::{session, user};
    use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};

    fn register_request(name: &str, home_town: i32, password: &str) -> RegisterRequest {
        RegisterRequest {
            name: name.to_string(),
            home_town,
            bio: format!("{} says hi", name),
            password: password.to_string(),
            password_confirmation: password.to_string(),
        }
    }

    fn bearer(token: &str) -> HeaderValue {
        HeaderValue::from_str(&format!("Bearer {token}")).unwrap()
    }

    /// Register a member through the API and return the session data
    /// (token plus user object).
    async fn register_member(server: &TestServer, name: &str, home_town: i32) -> serde_json::Value {
        let response = server
            .post("/api/v1/auth/register")
            .json(&register_request(name, home_town, "letmein"))
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: ApiResponse<serde_json::Value> = response.json();
        body.data
    }

    /// Register an artist through the API and return the session data.
    async fn register_artist(server: &TestServer, name: &str, home_town: i32) -> serde_json::Value {
        let response = server
            .post("/api/v1/auth/register/artist")
            .json(&register_request(name, home_town, "letmein"))
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: ApiResponse<serde_json::Value> = response.json();
        body.data
    }

    /// Create a genre through the API and return its ID.
    async fn create_genre(server: &TestServer, name: &str) -> i32 {
        let response = server
            .post("/api/v1/genres")
            .json(&CreateGenreRequest {
                name: name.to_string(),
            })
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: ApiResponse<serde_json::Value> = response.json();
        body.data["id"].as_i64().unwrap() as i32
    }

    /// Create a post through the API and return its ID.
    async fn create_post(server: &TestServer, token: &str, genre_id: i32, name: &str) -> i32 {
        let response = server
            .post("/api/v1/posts")
            .add_header(AUTHORIZATION, bearer(token))
            .json(&CreatePostRequest {
                genre_id,
                name: name.to_string(),
                content: format!("{} body", name),
            })
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: ApiResponse<serde_json::Value> = response.json();
        body.data["id"].as_i64().unwrap() as i32
    }

    #[tokio::test]
    async fn test_health_check() {
        // Setup test server
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        // Send GET request to health endpoint
        let response = server.get("/health").await;

        // Verify response
        response.assert_status(StatusCode::OK);
        let body: serde_json::Value = response.json();
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["database"], "connected");
    }

    #[tokio::test]
    async fn test_service_info() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server.get("/").await;

        response.assert_status(StatusCode::OK);
        let body: serde_json::Value = response.json();
        assert_eq!(body["name"], "TuneBoard");
        assert_eq!(body["docs_url"], "/swagger-ui");
    }

    #[tokio::test]
    async fn test_register_member() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server
            .post("/api/v1/auth/register")
            .json(&register_request("alice", 10001, "s3cret"))
            .await;

        response.assert_status(StatusCode::CREATED);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert!(body.success);
        assert_eq!(body.message, "Registration successful");

        // Registration logs the member straight in
        let token = body.data["token"].as_str().unwrap();
        assert_eq!(token.len(), 64);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));

        let member = &body.data["user"];
        assert_eq!(member["name"], "alice");
        assert_eq!(member["home_town"], 10001);
        assert_eq!(member["is_musician"], false);
        assert!(member["id"].as_i64().unwrap() > 0);
        // The hash stays server-side
        assert!(member.get("password_hash").is_none());
    }

    #[tokio::test]
    async fn test_register_artist_sets_flag() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let data = register_artist(&server, "anna", 10001).await;

        assert_eq!(data["user"]["name"], "anna");
        assert_eq!(data["user"]["is_musician"], true);
    }

    #[tokio::test]
    async fn test_register_password_mismatch() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let mut request = register_request("alice", 10001, "s3cret");
        request.password_confirmation = "something else".to_string();

        let response = server.post("/api/v1/auth/register").json(&request).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: ErrorResponse = response.json();
        assert!(!body.success);
        assert_eq!(body.code, "PASSWORD_MISMATCH");
    }

    #[tokio::test]
    async fn test_register_rejects_blank_name() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server
            .post("/api/v1/auth/register")
            .json(&register_request("", 10001, "s3cret"))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_duplicate_registration_conflict() {
        // Keep a handle on the state to inspect the table afterwards
        let state = setup_test_app_state().await;
        let app = create_router(state.clone());
        let server = TestServer::new(app).unwrap();

        let first = server
            .post("/api/v1/auth/register")
            .json(&register_request("alice", 10001, "s3cret"))
            .await;
        first.assert_status(StatusCode::CREATED);

        // Same name again, even as an artist, must lose
        let second = server
            .post("/api/v1/auth/register/artist")
            .json(&register_request("alice", 20002, "other"))
            .await;
        second.assert_status(StatusCode::CONFLICT);
        let body: ErrorResponse = second.json();
        assert!(!body.success);
        assert_eq!(body.code, "NAME_TAKEN");

        // Exactly one row survived
        let members = User::find().all(&state.db).await.unwrap();
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].name, "alice");
        assert!(!members[0].is_musician);
    }

    #[tokio::test]
    async fn test_login_issues_fresh_token() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let registered = server
            .post("/api/v1/auth/register")
            .json(&register_request("a@b.com", 10001, "pw"))
            .await;
        registered.assert_status(StatusCode::CREATED);
        let registered_body: ApiResponse<serde_json::Value> = registered.json();

        let response = server
            .post("/api/v1/auth/login")
            .json(&LoginRequest {
                name: "a@b.com".to_string(),
                password: "pw".to_string(),
            })
            .await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert!(body.success);
        assert_eq!(body.message, "Login successful");
        assert_eq!(body.data["user"]["name"], "a@b.com");

        // Every login opens its own session
        assert_ne!(body.data["token"], registered_body.data["token"]);

        // The fresh token carries an identity of its own
        let me = server
            .get("/api/v1/me")
            .add_header(AUTHORIZATION, bearer(body.data["token"].as_str().unwrap()))
            .await;
        me.assert_status(StatusCode::OK);
        let me_body: ApiResponse<serde_json::Value> = me.json();
        assert_eq!(me_body.data["user"]["name"], "a@b.com");
    }

    #[tokio::test]
    async fn test_login_rejects_bad_credentials() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        register_member(&server, "alice", 10001).await;

        // Wrong password
        let wrong_password = server
            .post("/api/v1/auth/login")
            .json(&LoginRequest {
                name: "alice".to_string(),
                password: "not it".to_string(),
            })
            .await;
        wrong_password.assert_status(StatusCode::UNAUTHORIZED);
        let wrong_password_body: ErrorResponse = wrong_password.json();
        assert_eq!(wrong_password_body.code, "INVALID_CREDENTIALS");

        // Unknown name answers identically
        let unknown_name = server
            .post("/api/v1/auth/login")
            .json(&LoginRequest {
                name: "mallory".to_string(),
                password: "letmein".to_string(),
            })
            .await;
        unknown_name.assert_status(StatusCode::UNAUTHORIZED);
        let unknown_name_body: ErrorResponse = unknown_name.json();
        assert_eq!(unknown_name_body.code, "INVALID_CREDENTIALS");
        assert_eq!(unknown_name_body.error, wrong_password_body.error);
    }

    #[tokio::test]
    async fn test_logout_keeps_session_row() {
        let state = setup_test_app_state().await;
        let app = create_router(state.clone());
        let server = TestServer::new(app).unwrap();

        let registered = register_member(&server, "alice", 10001).await;
        let token = registered["token"].as_str().unwrap().to_string();
        let user_id = registered["user"]["id"].as_i64().unwrap() as i32;

        let response = server
            .post("/api/v1/auth/logout")
            .add_header(AUTHORIZATION, bearer(&token))
            .await;
        response.assert_status(StatusCode::OK);

        // The session row survives with its user link; only the flag drops
        let session_row = Session::find()
            .filter(session::Column::Token.eq(token.clone()))
            .one(&state.db)
            .await
            .unwrap()
            .expect("session row should still exist");
        assert!(!session_row.logged_in);
        assert_eq!(session_row.user_id, user_id);

        // The token no longer resolves to an identity
        let gated = server
            .get("/api/v1/me")
            .add_header(AUTHORIZATION, bearer(&token))
            .await;
        gated.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_logout_without_session_is_noop() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        // No token at all
        let bare = server.post("/api/v1/auth/logout").await;
        bare.assert_status(StatusCode::OK);

        // A token nobody issued
        let unknown = server
            .post("/api/v1/auth/logout")
            .add_header(AUTHORIZATION, bearer(&"0".repeat(64)))
            .await;
        unknown.assert_status(StatusCode::OK);
    }

    #[tokio::test]
    async fn test_create_genre() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server
            .post("/api/v1/genres")
            .json(&CreateGenreRequest {
                name: "Rock".to_string(),
            })
            .await;

        response.assert_status(StatusCode::CREATED);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert!(body.success);
        assert_eq!(body.data["name"], "Rock");
        assert!(body.data["id"].as_i64().unwrap() > 0);
    }

    #[tokio::test]
    async fn test_duplicate_genre_conflict() {
        let state = setup_test_app_state().await;
        let app = create_router(state.clone());
        let server = TestServer::new(app).unwrap();

        create_genre(&server, "Rock").await;

        let duplicate = server
            .post("/api/v1/genres")
            .json(&CreateGenreRequest {
                name: "Rock".to_string(),
            })
            .await;
        duplicate.assert_status(StatusCode::CONFLICT);
        let body: ErrorResponse = duplicate.json();
        assert!(!body.success);
        assert_eq!(body.code, "GENRE_ALREADY_EXISTS");

        // Exactly one row survived
        let genres = Genre::find().all(&state.db).await.unwrap();
        assert_eq!(genres.len(), 1);
    }

    #[tokio::test]
    async fn test_get_genres_sorted_by_name() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        create_genre(&server, "Rock").await;
        create_genre(&server, "Ambient").await;
        create_genre(&server, "Jazz").await;

        let response = server.get("/api/v1/genres").await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<Vec<serde_json::Value>> = response.json();
        let names: Vec<&str> = body.data.iter().map(|g| g["name"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["Ambient", "Jazz", "Rock"]);
    }

    #[tokio::test]
    async fn test_genre_board_lists_posts_with_authors() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let registered = register_member(&server, "bob", 10001).await;
        let token = registered["token"].as_str().unwrap();
        let rock = create_genre(&server, "Rock").await;
        let jazz = create_genre(&server, "Jazz").await;

        create_post(&server, token, rock, "First post").await;
        create_post(&server, token, rock, "Second post").await;

        let response = server.get(&format!("/api/v1/genres/{rock}")).await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert_eq!(body.data["genre"]["name"], "Rock");

        // Posts come back in the order they were written, each with the
        // author's name resolved
        let posts = body.data["posts"].as_array().unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0]["name"], "First post");
        assert_eq!(posts[1]["name"], "Second post");
        assert_eq!(posts[0]["author_name"], "bob");

        // The other board stays empty
        let empty = server.get(&format!("/api/v1/genres/{jazz}")).await;
        empty.assert_status(StatusCode::OK);
        let empty_body: ApiResponse<serde_json::Value> = empty.json();
        assert_eq!(empty_body.data["posts"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_genre_board_not_found() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server.get("/api/v1/genres/999").await;

        response.assert_status(StatusCode::NOT_FOUND);
        let body: ErrorResponse = response.json();
        assert_eq!(body.code, "GENRE_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_create_post_requires_login() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let rock = create_genre(&server, "Rock").await;

        let response = server
            .post("/api/v1/posts")
            .json(&CreatePostRequest {
                genre_id: rock,
                name: "Hello".to_string(),
                content: "World".to_string(),
            })
            .await;

        response.assert_status(StatusCode::UNAUTHORIZED);
        let body: ErrorResponse = response.json();
        assert_eq!(body.code, "AUTHENTICATION_REQUIRED");
    }

    #[tokio::test]
    async fn test_create_post_rejects_unknown_genre() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let registered = register_member(&server, "bob", 10001).await;
        let token = registered["token"].as_str().unwrap();

        let response = server
            .post("/api/v1/posts")
            .add_header(AUTHORIZATION, bearer(token))
            .json(&CreatePostRequest {
                genre_id: 999,
                name: "Hello".to_string(),
                content: "World".to_string(),
            })
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: ErrorResponse = response.json();
        assert_eq!(body.code, "INVALID_GENRE_ID");
    }

    #[tokio::test]
    async fn test_post_is_attributed_to_the_session() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let registered = register_member(&server, "alice", 10001).await;
        let token = registered["token"].as_str().unwrap();
        let user_id = registered["user"]["id"].as_i64().unwrap();
        let rock = create_genre(&server, "Rock").await;

        let response = server
            .post("/api/v1/posts")
            .add_header(AUTHORIZATION, bearer(token))
            .json(&CreatePostRequest {
                genre_id: rock,
                name: "Hello".to_string(),
                content: "World".to_string(),
            })
            .await;

        response.assert_status(StatusCode::CREATED);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert!(body.success);
        assert_eq!(body.data["name"], "Hello");
        assert_eq!(body.data["content"], "World");
        assert_eq!(body.data["genre_id"], rock);
        // Attribution comes from the session, not the request body
        assert_eq!(body.data["user_id"], user_id);
    }

    #[tokio::test]
    async fn test_post_detail_with_comments() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let alice = register_member(&server, "alice", 10001).await;
        let bob = register_member(&server, "bob", 20002).await;
        let rock = create_genre(&server, "Rock").await;
        let post_id = create_post(&server, alice["token"].as_str().unwrap(), rock, "Hello").await;

        let comment = server
            .post(&format!("/api/v1/posts/{post_id}/comments"))
            .add_header(AUTHORIZATION, bearer(bob["token"].as_str().unwrap()))
            .json(&CreateCommentRequest {
                content: "Nice one".to_string(),
            })
            .await;
        comment.assert_status(StatusCode::CREATED);
        let comment_body: ApiResponse<serde_json::Value> = comment.json();
        assert_eq!(comment_body.data["author_name"], "bob");
        assert_eq!(comment_body.data["post_id"], post_id);

        let response = server.get(&format!("/api/v1/posts/{post_id}")).await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert_eq!(body.data["post"]["name"], "Hello");
        assert_eq!(body.data["genre_name"], "Rock");
        assert_eq!(body.data["author_name"], "alice");

        let comments = body.data["comments"].as_array().unwrap();
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0]["content"], "Nice one");
        assert_eq!(comments[0]["author_name"], "bob");
    }

    #[tokio::test]
    async fn test_post_not_found() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server.get("/api/v1/posts/999").await;

        response.assert_status(StatusCode::NOT_FOUND);
        let body: ErrorResponse = response.json();
        assert_eq!(body.code, "POST_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_comment_requires_login_and_existing_post() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let registered = register_member(&server, "bob", 10001).await;
        let token = registered["token"].as_str().unwrap();
        let rock = create_genre(&server, "Rock").await;
        let post_id = create_post(&server, token, rock, "Hello").await;

        // No token
        let anonymous = server
            .post(&format!("/api/v1/posts/{post_id}/comments"))
            .json(&CreateCommentRequest {
                content: "Nice one".to_string(),
            })
            .await;
        anonymous.assert_status(StatusCode::UNAUTHORIZED);
        let anonymous_body: ErrorResponse = anonymous.json();
        assert_eq!(anonymous_body.code, "AUTHENTICATION_REQUIRED");

        // Missing post
        let missing = server
            .post("/api/v1/posts/999/comments")
            .add_header(AUTHORIZATION, bearer(token))
            .json(&CreateCommentRequest {
                content: "Nice one".to_string(),
            })
            .await;
        missing.assert_status(StatusCode::NOT_FOUND);
        let missing_body: ErrorResponse = missing.json();
        assert_eq!(missing_body.code, "POST_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_comment_author_name_survives_rename() {
        let state = setup_test_app_state().await;
        let app = create_router(state.clone());
        let server = TestServer::new(app).unwrap();

        let carol = register_member(&server, "carol", 10001).await;
        let token = carol["token"].as_str().unwrap();
        let rock = create_genre(&server, "Rock").await;
        let post_id = create_post(&server, token, rock, "Hello").await;

        let comment = server
            .post(&format!("/api/v1/posts/{post_id}/comments"))
            .add_header(AUTHORIZATION, bearer(token))
            .json(&CreateCommentRequest {
                content: "First!".to_string(),
            })
            .await;
        comment.assert_status(StatusCode::CREATED);

        // Rename the member behind the API's back
        let member = User::find()
            .filter(user::Column::Name.eq("carol".to_string()))
            .one(&state.db)
            .await
            .unwrap()
            .unwrap();
        let mut active: user::ActiveModel = member.into();
        active.name = Set("caroline".to_string());
        active.update(&state.db).await.unwrap();

        let response = server.get(&format!("/api/v1/posts/{post_id}")).await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();

        // The post resolves the author live; the comment keeps its snapshot
        assert_eq!(body.data["author_name"], "caroline");
        assert_eq!(body.data["comments"][0]["author_name"], "carol");
    }

    #[tokio::test]
    async fn test_my_page_lists_own_posts() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let dave = register_member(&server, "dave", 10001).await;
        let erin = register_member(&server, "erin", 10001).await;
        let rock = create_genre(&server, "Rock").await;

        create_post(&server, dave["token"].as_str().unwrap(), rock, "Dave one").await;
        create_post(&server, erin["token"].as_str().unwrap(), rock, "Erin one").await;
        create_post(&server, dave["token"].as_str().unwrap(), rock, "Dave two").await;

        let response = server
            .get("/api/v1/me")
            .add_header(AUTHORIZATION, bearer(dave["token"].as_str().unwrap()))
            .await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert_eq!(body.data["user"]["name"], "dave");

        // Only dave's posts, in the order he wrote them
        let posts = body.data["posts"].as_array().unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0]["name"], "Dave one");
        assert_eq!(posts[1]["name"], "Dave two");
    }

    #[tokio::test]
    async fn test_my_page_requires_login() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server.get("/api/v1/me").await;

        response.assert_status(StatusCode::UNAUTHORIZED);
        let body: ErrorResponse = response.json();
        assert_eq!(body.code, "AUTHENTICATION_REQUIRED");
    }

    #[tokio::test]
    async fn test_artist_directory() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        register_artist(&server, "zoe", 20002).await;
        register_artist(&server, "anna", 10001).await;
        let bob = register_member(&server, "bob", 10001).await;

        let response = server
            .get("/api/v1/artists")
            .add_header(AUTHORIZATION, bearer(bob["token"].as_str().unwrap()))
            .await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();

        // Every artist, by name
        let artists = body.data["artists"].as_array().unwrap();
        let artist_names: Vec<&str> = artists.iter().map(|a| a["name"].as_str().unwrap()).collect();
        assert_eq!(artist_names, vec!["anna", "zoe"]);

        // Local means artists from the viewer's home town: zoe lives
        // elsewhere and bob, though local, is no artist
        let locals = body.data["local_artists"].as_array().unwrap();
        let local_names: Vec<&str> = locals.iter().map(|a| a["name"].as_str().unwrap()).collect();
        assert_eq!(local_names, vec!["anna"]);
    }

    #[tokio::test]
    async fn test_artist_directory_requires_login() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server.get("/api/v1/artists").await;

        response.assert_status(StatusCode::UNAUTHORIZED);
        let body: ErrorResponse = response.json();
        assert_eq!(body.code, "AUTHENTICATION_REQUIRED");
    }

    #[tokio::test]
    async fn test_artist_page_by_name() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let anna = register_artist(&server, "anna", 10001).await;
        let rock = create_genre(&server, "Rock").await;
        create_post(&server, anna["token"].as_str().unwrap(), rock, "My demo").await;

        // The artist page is public
        let response = server.get("/api/v1/artists/anna").await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert_eq!(body.data["artist"]["name"], "anna");
        assert_eq!(body.data["artist"]["is_musician"], true);

        let posts = body.data["posts"].as_array().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0]["name"], "My demo");
    }

    #[tokio::test]
    async fn test_artist_page_not_found() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server.get("/api/v1/artists/nobody").await;

        response.assert_status(StatusCode::NOT_FOUND);
        let body: ErrorResponse = response.json();
        assert_eq!(body.code, "ARTIST_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_unknown_route_answers_json() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server.get("/api/v1/nonexistent").await;

        response.assert_status(StatusCode::NOT_FOUND);
        let body: ErrorResponse = response.json();
        assert!(!body.success);
        assert_eq!(body.code, "ROUTE_NOT_FOUND");
    }
}
