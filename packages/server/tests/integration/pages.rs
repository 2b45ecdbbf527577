use reqwest::multipart::Form;

use crate::common::{TestApp, routes};

#[tokio::test]
async fn home_page_falls_back_to_default_copy() {
    let app = TestApp::spawn().await;

    let res = app.get_without_token(routes::HOME_PAGE).await;

    assert_eq!(res.status, 200);
    let title = &res.body["content"]["home_hero_title"];
    assert_eq!(title["text"], "Divine Ameh");
    assert_eq!(title["is_default"], true);
    assert_eq!(title["kind"], "text");
    assert!(res.body["content"].get("about_me_cta_heading").is_none());
    assert_eq!(res.body["favorites"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn stored_override_wins_over_default() {
    let app = TestApp::spawn().await;
    let token = app.login_admin().await;

    app.put_form(
        &routes::admin_setting("about_me_cta_heading"),
        Form::new().text("value_text", "Work with me"),
        Some(&token),
    )
    .await;

    let res = app.get_without_token(routes::ABOUT_PAGE).await;
    let heading = &res.body["content"]["about_me_cta_heading"];
    assert_eq!(heading["text"], "Work with me");
    assert_eq!(heading["is_default"], false);

    let portrait = &res.body["content"]["about_me_portrait_image"];
    assert_eq!(portrait["kind"], "image");
    assert_eq!(portrait["image_url"], "/images/divine-ameh-portrait.png");
    assert_eq!(portrait["is_default"], true);
}

#[tokio::test]
async fn services_page_only_has_services_keys() {
    let app = TestApp::spawn().await;

    let res = app.get_without_token(routes::SERVICES_PAGE).await;

    let content = res.body["content"].as_object().unwrap();
    assert!(!content.is_empty());
    assert!(content.keys().all(|k| k.starts_with("services_")));
}

#[tokio::test]
async fn home_favorites_are_newest_first_and_capped_at_six() {
    let app = TestApp::spawn().await;
    let token = app.login_admin().await;

    let mut ids = Vec::new();
    for i in 0..7 {
        let work = app.create_image_work(&token, &format!("Favourite {i}"), true).await;
        ids.push(work["id"].clone());
    }
    app.create_image_work(&token, "Not a favourite", false).await;

    let res = app.get_without_token(routes::HOME_PAGE).await;
    let favorites = res.body["favorites"].as_array().unwrap();

    assert_eq!(favorites.len(), 6);
    let expected: Vec<_> = ids.iter().rev().take(6).cloned().collect();
    let actual: Vec<_> = favorites.iter().map(|w| w["id"].clone()).collect();
    assert_eq!(actual, expected);
}

#[tokio::test]
async fn works_page_lists_distinct_categories() {
    let app = TestApp::spawn().await;
    let token = app.login_admin().await;
    app.create_image_work(&token, "One", false).await;
    app.create_image_work(&token, "Two", false).await;

    let res = app.get_without_token(routes::WORKS_PAGE).await;

    assert_eq!(res.body["works"].as_array().unwrap().len(), 2);
    assert_eq!(res.body["categories"], serde_json::json!(["Painting"]));
}
