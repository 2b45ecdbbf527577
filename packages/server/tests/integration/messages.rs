use serde_json::json;

use crate::common::{TestApp, routes};

async fn submit(app: &TestApp, name: &str, email: &str, message: &str) -> crate::common::TestResponse {
    app.post_without_token(
        routes::CONTACT,
        &json!({"name": name, "email": email, "message": message}),
    )
    .await
}

mod contact_form {
    use super::*;

    #[tokio::test]
    async fn visitor_message_is_stored_unread() {
        let app = TestApp::spawn().await;

        let res = submit(&app, "Chidi", "chidi@example.com", "I'd love a commission.").await;
        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["success"], true);
        assert_eq!(res.body["message"], "Your message has been sent successfully!");

        let token = app.login_admin().await;
        let inbox = app.get_with_token(routes::ADMIN_MESSAGES, &token).await;
        assert_eq!(inbox.body["total"], 1);
        assert_eq!(inbox.body["unread"], 1);
        assert_eq!(inbox.body["messages"][0]["name"], "Chidi");
        assert_eq!(inbox.body["messages"][0]["read"], false);
    }

    #[tokio::test]
    async fn first_failing_field_is_reported() {
        let app = TestApp::spawn().await;

        let res = submit(&app, "", "bad", "").await;
        assert_eq!(res.status, 400);
        assert_eq!(res.body["message"], "Name is required.");

        let res = submit(&app, "Chidi", "bad", "").await;
        assert_eq!(res.status, 400);
        assert_eq!(res.body["message"], "Invalid email address.");

        let res = submit(&app, "Chidi", "chidi@example.com", "   ").await;
        assert_eq!(res.status, 400);
        assert_eq!(res.body["message"], "Message cannot be empty.");
    }

    #[tokio::test]
    async fn missing_fields_are_treated_as_empty() {
        let app = TestApp::spawn().await;

        let res = app.post_without_token(routes::CONTACT, &json!({})).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["message"], "Name is required.");
    }
}

mod inbox {
    use super::*;

    #[tokio::test]
    async fn mark_read_filter_and_delete() {
        let app = TestApp::spawn().await;
        submit(&app, "First", "a@example.com", "Hello there").await;
        submit(&app, "Second", "b@example.com", "Hello again").await;
        let token = app.login_admin().await;

        let inbox = app.get_with_token(routes::ADMIN_MESSAGES, &token).await;
        assert_eq!(inbox.body["messages"][0]["name"], "Second");
        let id = inbox.body["messages"][1]["id"].as_str().unwrap().to_string();

        let res = app
            .patch_with_token(&routes::admin_message(&id), &json!({"read": true}), &token)
            .await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["message"], "Message marked as read");
        assert_eq!(res.body["data"]["read"], true);

        let unread = app
            .get_with_token(&format!("{}?unread=true", routes::ADMIN_MESSAGES), &token)
            .await;
        assert_eq!(unread.body["total"], 1);
        assert_eq!(unread.body["unread"], 1);
        assert_eq!(unread.body["messages"][0]["name"], "Second");

        let res = app
            .delete_with_token(&routes::admin_message(&id), &token)
            .await;
        assert_eq!(res.status, 200);
        let res = app.get_with_token(&routes::admin_message(&id), &token).await;
        assert_eq!(res.status, 404);

        let stats = app.get_with_token(routes::ADMIN_DASHBOARD, &token).await;
        assert_eq!(stats.body["messages"], 1);
        assert_eq!(stats.body["unread_messages"], 1);
    }
}
