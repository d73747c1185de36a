use folio_core::{ContentLoadError, ContentValidationError, PortfolioContent, DEFAULT_ABOUT_ROLE};
use serde_json::json;

fn minimal() -> serde_json::Value {
    json!({
        "about": {
            "name": "Ada",
            "role": "Designer",
            "main_photo": "/a.jpg",
            "secondary_photo": "/b.jpg",
            "skills_by_category": {
                "Tools": ["Figma"],
                "Frontend": ["HTML", "CSS"]
            }
        },
        "projects": [
            { "title": "Site", "image": "/site.png" }
        ]
    })
}

fn load(value: serde_json::Value) -> Result<PortfolioContent, ContentLoadError> {
    PortfolioContent::from_json_str(&value.to_string())
}

#[test]
fn minimal_document_fills_defaults() {
    let content = load(minimal()).expect("minimal document loads");
    let project = &content.projects[0];
    assert_eq!(project.href, "");
    assert!(project.tags.is_empty());
    assert_eq!(project.gallery_images(), vec!["/site.png"]);
    assert!(content.education.is_empty());
    assert_eq!(content.resume_href, None);
}

#[test]
fn skill_catalog_preserves_document_order_through_serialization() {
    // Raw text: `json!` objects are key-sorted and would hide ordering bugs.
    let raw = r#"{
        "about": {
            "name": "Ada", "role": "Designer",
            "main_photo": "/a.jpg", "secondary_photo": "/b.jpg",
            "skills_by_category": { "Tools": ["Figma"], "Frontend": ["HTML", "CSS"] }
        }
    }"#;
    let content = PortfolioContent::from_json_str(raw).expect("document loads");
    let catalog = &content.about.skills_by_category;
    assert_eq!(catalog.categories()[0].name, "Tools");
    assert_eq!(catalog.get("Frontend"), Some(&["HTML".to_string(), "CSS".to_string()][..]));

    let json = serde_json::to_string(&content).expect("serialize");
    assert!(json.find("\"Tools\"") < json.find("\"Frontend\""));
}

#[test]
fn unknown_fields_are_rejected() {
    let mut value = minimal();
    value["projects"][0]["stars"] = json!(5);
    let err = load(value).expect_err("unknown project field must fail");
    assert!(matches!(err, ContentLoadError::Json(_)));
    assert!(err.to_string().contains("stars"), "unexpected error: {err}");
}

#[test]
fn blank_required_fields_are_named_in_error() {
    let mut value = minimal();
    value["projects"][0]["title"] = json!("   ");
    let err = load(value).expect_err("blank title must fail");
    match err {
        ContentLoadError::Validation(ContentValidationError::BlankField { record, field }) => {
            assert_eq!(record, "projects[0]");
            assert_eq!(field, "title");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_required_fields_fail_to_parse() {
    let mut value = minimal();
    value["education"] = json!([{ "school": "RUPP", "start": "2021", "end": "2024" }]);
    let err = load(value).expect_err("missing degree must fail");
    assert!(err.to_string().contains("degree"), "unexpected error: {err}");
}

#[test]
fn duplicate_skill_categories_are_rejected() {
    let raw = r#"{
        "about": {
            "name": "Ada", "role": "Designer",
            "main_photo": "/a.jpg", "secondary_photo": "/b.jpg",
            "skills_by_category": { "Tools": ["Figma"], "Tools": ["Git"] }
        }
    }"#;
    let err = PortfolioContent::from_json_str(raw).expect_err("duplicate category must fail");
    assert!(err.to_string().contains("duplicate skill category"));
}

#[test]
fn blank_skill_names_are_rejected() {
    let mut value = minimal();
    value["about"]["skills_by_category"]["Tools"] = json!(["Figma", ""]);
    let err = load(value).expect_err("blank skill must fail");
    assert!(matches!(
        err,
        ContentLoadError::Validation(ContentValidationError::BlankSkill { .. })
    ));
}

#[test]
fn about_role_is_optional_and_defaults() {
    let mut value = minimal();
    value["about"].as_object_mut().expect("about object").remove("role");
    let content = load(value).expect("document without role loads");
    assert_eq!(content.about.role, None);
    assert_eq!(content.about.role(), DEFAULT_ABOUT_ROLE);

    let content = load(minimal()).expect("minimal document loads");
    assert_eq!(content.about.role(), "Designer");
}

#[test]
fn flat_skills_apply_only_without_categories() {
    let value = json!({
        "about": {
            "name": "Ada",
            "main_photo": "/a.jpg",
            "secondary_photo": "/b.jpg",
            "skills": ["HTML", "CSS"]
        }
    });
    let content = load(value).expect("flat skill list loads");
    assert_eq!(content.about.flat_skills(), ["HTML".to_string(), "CSS".to_string()]);

    let mut value = minimal();
    value["about"]["skills"] = json!(["HTML"]);
    let content = load(value).expect("both skill shapes load");
    assert!(content.about.flat_skills().is_empty());
    assert_eq!(content.about.skills_by_category.len(), 2);
}

#[test]
fn blank_flat_skill_is_rejected() {
    let mut value = minimal();
    value["about"]["skills"] = json!(["HTML", " "]);
    let err = load(value).expect_err("blank flat skill must fail");
    assert!(err.to_string().contains("about.skills"), "unexpected error: {err}");
}
