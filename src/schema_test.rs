use serde_json::json;

use super::*;

fn urls() -> ImageUrls {
    ImageUrls { uploads_url: "/uploads".into(), placeholder: "/images/placeholder.png".into() }
}

#[test]
fn carousel_config_parses_images() {
    let cfg = CarouselConfig::from_value(&json!({ "images": ["a.png", "c.png"] }));
    assert_eq!(cfg.images, vec!["a.png", "c.png"]);
}

#[test]
fn carousel_config_truncates_to_three() {
    let cfg = CarouselConfig::from_value(&json!({ "images": ["a.png", "b.png", "c.png", "d.png"] }));
    assert_eq!(cfg.images, vec!["a.png", "b.png", "c.png"]);
}

#[test]
fn carousel_config_keeps_positions_of_sparse_entries() {
    let cfg = CarouselConfig::from_value(&json!({ "images": ["a.png", null, "c.png"] }));
    assert_eq!(cfg.images, vec!["a.png", "", "c.png"]);

    let cfg = CarouselConfig::from_value(&json!({ "images": [7, "b.png"] }));
    assert_eq!(cfg.images, vec!["", "b.png"]);
}

#[test]
fn carousel_config_without_images_is_empty() {
    assert_eq!(CarouselConfig::from_value(&json!({ "other": 1 })), CarouselConfig::default());
    assert_eq!(CarouselConfig::from_value(&json!(["a.png"])), CarouselConfig::default());
    assert_eq!(CarouselConfig::from_value(&Value::Null), CarouselConfig::default());
}

#[test]
fn carousel_config_to_value_matches_storage_shape() {
    let cfg = CarouselConfig { images: vec!["a.png".into()] };
    assert_eq!(cfg.to_value(), json!({ "images": ["a.png"] }));
}

#[test]
fn carousel_slides_resolve_uploads_and_placeholders() {
    let cfg = CarouselConfig { images: vec!["a.png".into(), String::new()] };
    let slides = cfg.slides(&urls());
    assert_eq!(slides.len(), 2);
    assert_eq!(slides[0].source, "/uploads/a.png");
    assert_eq!(slides[0].alt_text.as_deref(), Some("Slide 1"));
    assert_eq!(slides[1].source, "/images/placeholder.png");
}

#[test]
fn course_categories_parse_valid_entries() {
    let value = json!([
        { "id": "web", "title": "Web Development", "imageRef": "web.png", "link": "/courses/web" },
        { "id": "data", "title": "Data Science", "link": "https://learn.example.test/data" }
    ]);
    let categories = parse_course_categories(&value);
    assert_eq!(categories.len(), 2);
    assert_eq!(categories[0].image_ref.as_deref(), Some("web.png"));
    assert!(categories[1].image_ref.is_none());
}

#[test]
fn course_categories_accept_image_alias() {
    let value = json!([{ "id": "ux", "title": "UX", "image": "ux.png", "link": "/courses/ux" }]);
    let categories = parse_course_categories(&value);
    assert_eq!(categories[0].image_ref.as_deref(), Some("ux.png"));
}

#[test]
fn course_categories_drop_malformed_entries() {
    let value = json!([
        { "id": "ok", "title": "Fine", "link": "/courses/ok" },
        { "id": "", "title": "No id", "link": "/courses/x" },
        { "id": "no-title", "title": "  ", "link": "/courses/y" },
        { "id": "bad-link", "title": "Bad", "link": "javascript:alert(1)" },
        { "title": "Missing id", "link": "/courses/z" },
        "just a string",
        42
    ]);
    let categories = parse_course_categories(&value);
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].id, "ok");
}

#[test]
fn course_categories_drop_duplicate_ids() {
    let value = json!([
        { "id": "web", "title": "First", "link": "/a" },
        { "id": "web", "title": "Second", "link": "/b" }
    ]);
    let categories = parse_course_categories(&value);
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].title, "First");
}

#[test]
fn course_categories_non_array_is_empty() {
    assert!(parse_course_categories(&json!({ "id": "web" })).is_empty());
    assert!(parse_course_categories(&Value::Null).is_empty());
}

#[test]
fn resolve_image_handles_each_reference_form() {
    let urls = urls();
    assert_eq!(resolve_image(None, &urls), "/images/placeholder.png");
    assert_eq!(resolve_image(Some("  "), &urls), "/images/placeholder.png");
    assert_eq!(resolve_image(Some("cat.png"), &urls), "/uploads/cat.png");
    assert_eq!(resolve_image(Some("/static/logo.svg"), &urls), "/static/logo.svg");
    assert_eq!(resolve_image(Some("https://cdn.test/x.jpg"), &urls), "https://cdn.test/x.jpg");
}
