use reqwest::multipart::{Form, Part};

use crate::common::{TestApp, png_part, routes};

#[tokio::test]
async fn upload_returns_public_url_and_dimensions() {
    let app = TestApp::spawn().await;
    let token = app.login_admin().await;

    let form = Form::new()
        .text("bucket", "content-images")
        .part("file", png_part(12, 9));
    let res = app.post_form(routes::ADMIN_UPLOADS, form, Some(&token)).await;

    assert_eq!(res.status, 201, "{}", res.text);
    let data = &res.body["data"];
    assert_eq!(data["width"], 12);
    assert_eq!(data["height"], 9);
    assert_eq!(data["content_type"], "image/png");
    assert!(data["path"].as_str().unwrap().starts_with("content_settings/artwork-"));

    let object = app.fetch(data["url"].as_str().unwrap()).await;
    assert_eq!(object.status, 200);
    assert!(object.header("etag").is_some());
}

#[tokio::test]
async fn non_image_files_are_accepted_without_dimensions() {
    let app = TestApp::spawn().await;
    let token = app.login_admin().await;

    let file = Part::bytes(b"plain notes".to_vec())
        .file_name("notes.txt")
        .mime_str("text/plain")
        .unwrap();
    let form = Form::new().text("folder", "documents").part("file", file);
    let res = app.post_form(routes::ADMIN_UPLOADS, form, Some(&token)).await;

    assert_eq!(res.status, 201, "{}", res.text);
    assert!(res.body["data"]["width"].is_null());
    assert!(res.body["data"]["path"].as_str().unwrap().ends_with(".txt"));
}

#[tokio::test]
async fn unknown_bucket_and_missing_file_are_rejected() {
    let app = TestApp::spawn().await;
    let token = app.login_admin().await;

    let form = Form::new()
        .text("bucket", "somewhere-else")
        .part("file", png_part(2, 2));
    let res = app.post_form(routes::ADMIN_UPLOADS, form, Some(&token)).await;
    assert_eq!(res.status, 400);

    let res = app
        .post_form(routes::ADMIN_UPLOADS, Form::new().text("bucket", "works-images"), Some(&token))
        .await;
    assert_eq!(res.status, 400);
    assert_eq!(res.body["message"], "Missing 'file' field");
}

#[tokio::test]
async fn uploads_require_an_admin() {
    let app = TestApp::spawn().await;

    let form = Form::new().part("file", png_part(2, 2));
    let res = app.post_form(routes::ADMIN_UPLOADS, form, None).await;

    assert_eq!(res.status, 401);
}

#[tokio::test]
async fn missing_objects_are_404() {
    let app = TestApp::spawn().await;

    let res = app
        .get_without_token("/storage/works-images/works/nothing-here.png")
        .await;

    assert_eq!(res.status, 404);
}

#[tokio::test]
async fn folder_paths_are_404() {
    let app = TestApp::spawn().await;
    let token = app.login_admin().await;
    app.create_image_work(&token, "Fills The Folder", false).await;

    let res = app.get_without_token("/storage/works-images/works").await;

    assert_eq!(res.status, 404, "{}", res.text);
    assert_eq!(res.body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn markup_uploads_download_in_a_sandbox() {
    let app = TestApp::spawn().await;
    let token = app.login_admin().await;

    let file = Part::bytes(b"<?xml version=\"1.0\"?><page><script>1</script></page>".to_vec())
        .file_name("page.xml")
        .mime_str("application/xml")
        .unwrap();
    let form = Form::new().part("file", file);
    let res = app.post_form(routes::ADMIN_UPLOADS, form, Some(&token)).await;
    assert_eq!(res.status, 201, "{}", res.text);

    let object = app.fetch(res.body["data"]["url"].as_str().unwrap()).await;
    assert_eq!(object.status, 200);
    assert!(object.header("content-disposition").unwrap().starts_with("attachment;"));
    assert_eq!(object.header("content-security-policy"), Some("sandbox"));
}
