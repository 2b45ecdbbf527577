use reqwest::multipart::Form;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

use venus::entity::content_setting;

use crate::common::{TestApp, png_part, routes};

async fn rows_for(app: &TestApp, key: &str) -> u64 {
    content_setting::Entity::find()
        .filter(content_setting::Column::Key.eq(key))
        .count(&app.db)
        .await
        .expect("count settings")
}

#[tokio::test]
async fn upserting_the_same_key_keeps_one_row() {
    let app = TestApp::spawn().await;
    let token = app.login_admin().await;
    let path = routes::admin_setting("home_hero_title");

    let res = app
        .put_form(&path, Form::new().text("value_text", "First"), Some(&token))
        .await;
    assert_eq!(res.status, 200, "{}", res.text);
    let res = app
        .put_form(&path, Form::new().text("value_text", "Second"), Some(&token))
        .await;
    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["message"], "Content setting saved successfully");
    assert_eq!(res.body["data"]["value_text"], "Second");

    assert_eq!(rows_for(&app, "home_hero_title").await, 1);

    let list = app.get_without_token(routes::SETTINGS).await;
    assert_eq!(list.body["settings"]["home_hero_title"]["value_text"], "Second");
}

#[tokio::test]
async fn image_override_replaces_and_removes_objects() {
    let app = TestApp::spawn().await;
    let token = app.login_admin().await;
    let path = routes::admin_setting("about_me_portrait_image");

    let res = app
        .put_form(&path, Form::new().part("image", png_part(30, 40)), Some(&token))
        .await;
    assert_eq!(res.status, 200, "{}", res.text);
    let first_url = res.body["data"]["value_image_url"].as_str().unwrap().to_string();
    assert!(first_url.contains("/storage/content-images/content_settings/"));
    assert_eq!(res.body["data"]["value_image_width"], 30);

    let res = app
        .put_form(&path, Form::new().part("image", png_part(10, 10)), Some(&token))
        .await;
    assert_eq!(res.status, 200, "{}", res.text);
    let second_url = res.body["data"]["value_image_url"].as_str().unwrap().to_string();
    assert_ne!(first_url, second_url);
    assert_eq!(app.fetch(&first_url).await.status, 404);
    assert_eq!(app.fetch(&second_url).await.status, 200);

    let res = app
        .put_form(&path, Form::new().text("remove_image", "true"), Some(&token))
        .await;
    assert_eq!(res.status, 200, "{}", res.text);
    assert!(res.body["data"]["value_image_url"].is_null());
    assert_eq!(app.fetch(&second_url).await.status, 404);
}

#[tokio::test]
async fn omitting_text_keeps_it_and_sending_empty_clears_it() {
    let app = TestApp::spawn().await;
    let token = app.login_admin().await;
    let path = routes::admin_setting("services_cultural_photography_heading");

    app.put_form(&path, Form::new().text("value_text", "Portraits"), Some(&token))
        .await;

    let res = app
        .put_form(&path, Form::new().part("image", png_part(5, 5)), Some(&token))
        .await;
    assert_eq!(res.body["data"]["value_text"], "Portraits");

    let res = app
        .put_form(&path, Form::new().text("value_text", ""), Some(&token))
        .await;
    assert!(res.body["data"]["value_text"].is_null());
}

#[tokio::test]
async fn reset_removes_the_override() {
    let app = TestApp::spawn().await;
    let token = app.login_admin().await;
    let path = routes::admin_setting("home_hero_title");

    app.put_form(&path, Form::new().text("value_text", "Custom"), Some(&token))
        .await;
    let res = app.delete_with_token(&path, &token).await;
    assert_eq!(res.status, 200);
    assert_eq!(rows_for(&app, "home_hero_title").await, 0);

    let res = app.delete_with_token(&path, &token).await;
    assert_eq!(res.status, 404);
}

#[tokio::test]
async fn malformed_keys_are_rejected() {
    let app = TestApp::spawn().await;
    let token = app.login_admin().await;

    let res = app
        .put_form(
            &routes::admin_setting("Bad-Key"),
            Form::new().text("value_text", "x"),
            Some(&token),
        )
        .await;

    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
}
