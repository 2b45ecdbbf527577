use serde_json::json;

use crate::common::{TestApp, routes};

fn public_names(res: &crate::common::TestResponse) -> Vec<String> {
    res.body["testimonials"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap().to_string())
        .collect()
}

mod create {
    use super::*;

    #[tokio::test]
    async fn admin_adds_a_testimonial() {
        let app = TestApp::spawn().await;
        let token = app.login_admin().await;

        let res = app
            .post_with_token(
                routes::ADMIN_TESTIMONIALS,
                &json!({"name": "Ada Obi", "role": "  ", "text": "Stunning work.", "rating": 4}),
                &token,
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["message"], "Testimonial added successfully");
        let data = &res.body["data"];
        assert_eq!(data["name"], "Ada Obi");
        assert!(data["role"].is_null());
        assert_eq!(data["rating"], 4);
        assert_eq!(data["approved"], false);
        assert_eq!(data["avatar"], "AO");
    }

    #[tokio::test]
    async fn validation_messages_name_the_failing_field() {
        let app = TestApp::spawn().await;
        let token = app.login_admin().await;

        let res = app
            .post_with_token(
                routes::ADMIN_TESTIMONIALS,
                &json!({"name": "", "text": "Nice"}),
                &token,
            )
            .await;
        assert_eq!(res.status, 400);
        assert_eq!(res.body["message"], "Client name is required.");

        let res = app
            .post_with_token(
                routes::ADMIN_TESTIMONIALS,
                &json!({"name": "Ada", "text": "Nice", "rating": 6}),
                &token,
            )
            .await;
        assert_eq!(res.status, 400);
        assert_eq!(res.body["message"], "Rating must be between 1 and 5.");
    }
}

mod approval {
    use super::*;

    #[tokio::test]
    async fn only_approved_testimonials_are_public() {
        let app = TestApp::spawn().await;
        let token = app.login_admin().await;
        app.create_testimonial(&token, "Approved Client", true).await;
        let pending = app.create_testimonial(&token, "Pending Client", false).await;

        let res = app.get_without_token(routes::TESTIMONIALS).await;
        assert_eq!(public_names(&res), ["Approved Client"]);

        let res = app
            .post_with_token(
                &routes::toggle_approval(&pending),
                &json!({"current": false}),
                &token,
            )
            .await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["message"], "Testimonial approved");
        assert_eq!(res.body["data"]["approved"], true);

        let res = app.get_without_token(routes::TESTIMONIALS).await;
        assert_eq!(public_names(&res), ["Pending Client", "Approved Client"]);
    }

    #[tokio::test]
    async fn unapproving_hides_without_deleting() {
        let app = TestApp::spawn().await;
        let token = app.login_admin().await;
        let id = app.create_testimonial(&token, "Client", true).await;

        let res = app
            .put_with_token(
                &routes::admin_testimonial(&id),
                &json!({"name": "Client", "text": "Wonderful to work with.", "approved": false}),
                &token,
            )
            .await;
        assert_eq!(res.status, 200, "{}", res.text);

        let public = app.get_without_token(routes::TESTIMONIALS).await;
        assert_eq!(public.body["total"], 0);

        let all = app
            .get_with_token(routes::ADMIN_TESTIMONIALS, &token)
            .await;
        assert_eq!(all.body["total"], 1);
        assert_eq!(all.body["testimonials"][0]["approved"], false);
    }

    #[tokio::test]
    async fn stale_toggle_is_a_conflict() {
        let app = TestApp::spawn().await;
        let token = app.login_admin().await;
        let id = app.create_testimonial(&token, "Client", false).await;

        let first = app
            .post_with_token(&routes::toggle_approval(&id), &json!({"current": false}), &token)
            .await;
        assert_eq!(first.status, 200);

        // A second tab still believes the testimonial is unapproved.
        let second = app
            .post_with_token(&routes::toggle_approval(&id), &json!({"current": false}), &token)
            .await;
        assert_eq!(second.status, 409);
        assert_eq!(second.body["code"], "CONFLICT");

        let all = app
            .get_with_token(routes::ADMIN_TESTIMONIALS, &token)
            .await;
        assert_eq!(all.body["testimonials"][0]["approved"], true);
    }

    #[tokio::test]
    async fn toggling_an_unknown_testimonial_is_404() {
        let app = TestApp::spawn().await;
        let token = app.login_admin().await;

        let res = app
            .post_with_token(
                &routes::toggle_approval("01936f0e-1234-7abc-8000-000000000001"),
                &json!({"current": true}),
                &token,
            )
            .await;

        assert_eq!(res.status, 404);
    }
}

mod delete {
    use super::*;

    #[tokio::test]
    async fn delete_removes_the_row() {
        let app = TestApp::spawn().await;
        let token = app.login_admin().await;
        let id = app.create_testimonial(&token, "Client", true).await;

        let res = app
            .delete_with_token(&routes::admin_testimonial(&id), &token)
            .await;
        assert_eq!(res.status, 200);

        let all = app
            .get_with_token(routes::ADMIN_TESTIMONIALS, &token)
            .await;
        assert_eq!(all.body["total"], 0);

        let res = app
            .delete_with_token(&routes::admin_testimonial(&id), &token)
            .await;
        assert_eq!(res.status, 404);
    }
}
