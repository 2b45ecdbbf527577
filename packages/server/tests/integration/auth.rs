use serde_json::json;

use crate::common::{ADMIN_EMAIL, ADMIN_PASSWORD, TestApp, routes};

mod login {
    use super::*;

    #[tokio::test]
    async fn admin_can_sign_in_and_read_the_session() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(
                routes::LOGIN,
                &json!({"email": "Admin@Example.com", "password": ADMIN_PASSWORD}),
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["email"], ADMIN_EMAIL);
        assert_eq!(res.body["role"], "admin");
        let cookie = res.header("set-cookie").expect("session cookie");
        assert!(cookie.starts_with("venus_session="));
        assert!(cookie.contains("HttpOnly"));

        let token = res.body["token"].as_str().unwrap();
        let me = app.get_with_token(routes::ME, token).await;
        assert_eq!(me.status, 200);
        assert_eq!(me.body["email"], ADMIN_EMAIL);
    }

    #[tokio::test]
    async fn wrong_password_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(
                routes::LOGIN,
                &json!({"email": ADMIN_EMAIL, "password": "nope"}),
            )
            .await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "INVALID_CREDENTIALS");
    }

    #[tokio::test]
    async fn unknown_email_gets_the_same_error_as_a_wrong_password() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(
                routes::LOGIN,
                &json!({"email": "ghost@example.com", "password": ADMIN_PASSWORD}),
            )
            .await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "INVALID_CREDENTIALS");
    }

    #[tokio::test]
    async fn malformed_email_is_a_validation_error() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(
                routes::LOGIN,
                &json!({"email": "not-an-email", "password": "x"}),
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn repeated_attempts_are_rate_limited() {
        let app = TestApp::spawn().await;
        let body = json!({"email": ADMIN_EMAIL, "password": "wrong"});

        for _ in 0..5 {
            let res = app.post_without_token(routes::LOGIN, &body).await;
            assert_eq!(res.status, 401);
        }

        let res = app.post_without_token(routes::LOGIN, &body).await;
        assert_eq!(res.status, 429);
        assert_eq!(res.body["code"], "RATE_LIMITED");
        let retry_after: u64 = res
            .header("retry-after")
            .expect("Retry-After header")
            .parse()
            .unwrap();
        assert!(retry_after >= 1);
    }
}

mod sessions {
    use super::*;

    #[tokio::test]
    async fn session_cookie_authenticates_admin_requests() {
        let app = TestApp::spawn().await;
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .unwrap();

        let res = client
            .post(app.url(routes::LOGIN))
            .json(&json!({"email": ADMIN_EMAIL, "password": ADMIN_PASSWORD}))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), 200);

        let res = client
            .get(app.url(routes::ADMIN_DASHBOARD))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), 200);

        let res = client.post(app.url(routes::LOGOUT)).send().await.unwrap();
        assert_eq!(res.status(), 200);

        let res = client.get(app.url(routes::ME)).send().await.unwrap();
        assert_eq!(res.status(), 401);
    }

    #[tokio::test]
    async fn garbage_token_is_invalid() {
        let app = TestApp::spawn().await;

        let res = app.get_with_token(routes::ME, "not.a.jwt").await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_INVALID");
    }
}

mod admin_guard {
    use super::*;

    #[tokio::test]
    async fn api_clients_without_a_session_get_401() {
        let app = TestApp::spawn().await;

        let res = app.get_without_token(routes::ADMIN_MESSAGES).await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_MISSING");
    }

    #[tokio::test]
    async fn browsers_without_a_session_are_sent_to_login() {
        let app = TestApp::spawn().await;

        let res = app.browse("/api/v1/admin/messages?unread=true", None).await;

        assert_eq!(res.status, 303);
        assert_eq!(
            res.header("location"),
            Some("/login?next=%2Fapi%2Fv1%2Fadmin%2Fmessages%3Funread%3Dtrue")
        );
    }

    #[tokio::test]
    async fn mutations_without_a_session_are_rejected() {
        let app = TestApp::spawn().await;

        let res = app
            .delete_without_token(&routes::admin_work("01936f0e-1234-7abc-8000-000000000001"))
            .await;

        assert_eq!(res.status, 401);
    }

    #[tokio::test]
    async fn non_admin_profiles_are_forbidden() {
        let app = TestApp::spawn().await;
        let token = app.login_editor().await;

        let res = app.get_with_token(routes::ADMIN_DASHBOARD, &token).await;
        assert_eq!(res.status, 403);
        assert_eq!(res.body["code"], "PERMISSION_DENIED");

        let res = app.browse(routes::ADMIN_DASHBOARD, Some(&token)).await;
        assert_eq!(res.status, 303);
        assert_eq!(res.header("location"), Some("/unauthorized"));
    }

    #[tokio::test]
    async fn non_admin_can_still_read_their_session() {
        let app = TestApp::spawn().await;
        let token = app.login_editor().await;

        let res = app.get_with_token(routes::ME, &token).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["role"], "editor");
    }
}
