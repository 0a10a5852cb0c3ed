//! Tests for gallery loading, previews and deletion.

mod common;

use std::sync::atomic::Ordering;

use common::{drawing, stroke, FakeApi};
use scribble_core::render::{self, PREVIEW_HEIGHT, PREVIEW_WIDTH};
use scribble_studio::gallery::{Gallery, GalleryStatus};

#[tokio::test]
async fn load_fetches_drawings() {
    let api = FakeApi::with_drawings(vec![
        drawing("Second", None, vec![]),
        drawing("First", Some("Ada"), vec![]),
    ]);
    let mut gallery = Gallery::new();
    assert_eq!(*gallery.status(), GalleryStatus::Loading);

    assert_eq!(*gallery.load(&api).await, GalleryStatus::Loaded);
    let titles: Vec<&str> = gallery.drawings().iter().map(|d| d.title.as_str()).collect();
    assert_eq!(titles, vec!["Second", "First"]);
}

#[tokio::test]
async fn load_failure_is_reported() {
    let api = FakeApi::failing(500, "An internal error occurred");
    let mut gallery = Gallery::new();

    let status = gallery.load(&api).await.clone();
    assert_eq!(
        status,
        GalleryStatus::Failed("Failed to load drawings: An internal error occurred".into())
    );
    assert!(gallery.drawings().is_empty());
}

#[tokio::test]
async fn previews_are_scaled_and_captioned() {
    let api = FakeApi::with_drawings(vec![drawing(
        "Line",
        Some("Ada"),
        vec![stroke(&[(0.0, 300.0), (800.0, 300.0)])],
    )]);
    let mut gallery = Gallery::new();
    gallery.load(&api).await;

    let previews = gallery.previews();
    assert_eq!(previews.len(), 1);
    let preview = &previews[0];
    assert_eq!(preview.image.dimensions(), (PREVIEW_WIDTH, PREVIEW_HEIGHT));
    // y = 300 on the canvas lands on y = 100 in the preview.
    assert_ne!(*preview.image.get_pixel(150, 100), render::BACKGROUND);
    assert_eq!(*preview.image.get_pixel(150, 20), render::BACKGROUND);

    assert_eq!(preview.caption.title, "Line");
    assert_eq!(preview.caption.author.as_deref(), Some("Ada"));
    assert_eq!(preview.caption.stroke_count, 1);
    let text = preview.caption.to_string();
    assert!(text.starts_with("Line · "));
    assert!(text.ends_with(" · by Ada · 1 stroke"));
}

#[tokio::test]
async fn confirmed_delete_removes_drawing() {
    let keep = drawing("Keep", None, vec![]);
    let remove = drawing("Remove", None, vec![]);
    let api = FakeApi::with_drawings(vec![keep.clone(), remove.clone()]);
    let mut gallery = Gallery::new();
    gallery.load(&api).await;

    let deleted = gallery.delete(&api, &remove.id, |d| d.title == "Remove").await.unwrap();

    assert!(deleted);
    assert_eq!(gallery.drawings(), &[keep]);
    assert_eq!(api.delete_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn declined_delete_sends_no_request() {
    let target = drawing("Target", None, vec![]);
    let api = FakeApi::with_drawings(vec![target.clone()]);
    let mut gallery = Gallery::new();
    gallery.load(&api).await;

    let deleted = gallery.delete(&api, &target.id, |_| false).await.unwrap();

    assert!(!deleted);
    assert_eq!(gallery.drawings().len(), 1);
    assert_eq!(api.delete_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn failed_delete_keeps_drawing_listed() {
    let target = drawing("Target", None, vec![]);
    let api = FakeApi::with_drawings(vec![target.clone()]);
    let mut gallery = Gallery::new();
    gallery.load(&api).await;

    *api.fail_with.lock().unwrap() = Some((404, "Drawing not found".into()));
    let err = gallery.delete(&api, &target.id, |_| true).await.unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(gallery.drawings(), &[target]);
}
