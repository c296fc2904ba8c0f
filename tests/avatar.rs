use std::io::Cursor;
use std::time::Duration;

use git_stare::avatar::{download_avatar_pixels, load_avatar};
use image::{ImageFormat, Rgba, RgbaImage};
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let image = RgbaImage::from_pixel(width, height, Rgba([200, 120, 40, 255]));
    let mut bytes = Cursor::new(Vec::new());
    image
        .write_to(&mut bytes, ImageFormat::Png)
        .expect("encode png");
    bytes.into_inner()
}

#[tokio::test]
async fn downloads_and_resizes_avatar() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/u/583231"))
        .and(query_param("s", "16"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(png_bytes(40, 40), "image/png"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = reqwest::Client::new();
    let url = format!("{}/u/583231?v=4", server.uri());
    let avatar = download_avatar_pixels(&client, &url, 16)
        .await
        .expect("avatar decodes");

    assert_eq!((avatar.width, avatar.height), (16, 16));
    assert_eq!(avatar.rgba.len(), 16 * 16 * 4);
    server.verify().await;
}

#[tokio::test]
async fn missing_or_undecodable_avatar_yields_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/garbage"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(b"not an image".to_vec(), "image/png"))
        .mount(&server)
        .await;

    let client = reqwest::Client::new();
    assert!(download_avatar_pixels(&client, &format!("{}/missing", server.uri()), 16)
        .await
        .is_none());
    assert!(download_avatar_pixels(&client, &format!("{}/garbage", server.uri()), 16)
        .await
        .is_none());
}

#[tokio::test]
async fn stalled_avatar_gives_up_when_lookup_is_cancelled() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stalled"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(png_bytes(8, 8), "image/png")
                .set_delay(Duration::from_secs(60)),
        )
        .mount(&server)
        .await;

    let client = reqwest::Client::new();
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        trigger.cancel();
    });

    let url = format!("{}/stalled", server.uri());
    let avatar = tokio::time::timeout(
        Duration::from_secs(5),
        load_avatar(&client, &url, 16, &cancel),
    )
    .await
    .expect("avatar load returns once cancelled");
    assert!(avatar.is_none());
}

#[tokio::test]
async fn avatar_loads_while_lookup_is_live() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/u/1"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(png_bytes(20, 20), "image/png"))
        .mount(&server)
        .await;

    let client = reqwest::Client::new();
    let avatar = load_avatar(
        &client,
        &format!("{}/u/1", server.uri()),
        8,
        &CancellationToken::new(),
    )
    .await
    .expect("avatar decodes");
    assert_eq!((avatar.width, avatar.height), (8, 8));
}
