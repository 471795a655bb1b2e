//! End-to-end pipeline coverage: session in, localized prompt out.

use promptloom::{
    CategoryId, EditIntent, Format, Gender, Language, ReferenceImage, SectionKind, Session,
    SubjectType, TaskMode, generate,
};

fn reference(id: &str, intent: EditIntent) -> ReferenceImage {
    ReferenceImage {
        id: id.to_string(),
        url: format!("https://example.com/{id}.png"),
        intent,
    }
}

#[test]
fn fresh_session_produces_headline_quality_and_negative() {
    let session = Session::default();
    let result = generate(&session, Language::En, Format::Text);

    assert!(result.full_text.starts_with("A woman, "));
    assert!(result.full_text.contains("masterpiece, best quality, 8k"));
    assert!(result.full_text.contains("\n\n--no nsfw"));
}

#[test]
fn generation_text_follows_slot_order() {
    let mut session = Session::default();
    session.toggle_subject_value(0, CategoryId::Nationality, "Taiwanese");
    session.toggle_subject_value(0, CategoryId::Age, "20 years old");
    session.toggle_subject_value(0, CategoryId::Action, "sitting");
    session.toggle_global_value(CategoryId::Environment, "coffee shop");
    session.toggle_subject_value(0, CategoryId::Clothing, "summer floral dress");
    session.toggle_global_value(CategoryId::Lighting, "golden hour");

    let text = generate(&session, Language::En, Format::Text).full_text;
    let headline = text.find("A Taiwanese 20 years old woman").unwrap();
    let action = text.find("sitting").unwrap();
    let env = text.find("coffee shop").unwrap();
    let clothing = text.find("summer floral dress").unwrap();
    let lighting = text.find("golden hour").unwrap();

    assert!(headline < action && action < env && env < clothing && clothing < lighting);
}

#[test]
fn pipeline_is_idempotent() {
    let mut session = Session::default();
    session.toggle_subject_value(0, CategoryId::HairColor, "pink hair");
    session.toggle_global_value(CategoryId::ArtStyle, "Anime style, cel shaded");

    for format in [Format::Text, Format::Markdown, Format::Json, Format::Yaml] {
        let first = generate(&session, Language::En, format);
        let second = generate(&session, Language::En, format);
        assert_eq!(first.full_text, second.full_text);
        assert_eq!(first.sections, second.sections);
    }
}

#[test]
fn zh_output_localizes_terms_and_separators() {
    let mut session = Session::default();
    session.toggle_subject_value(0, CategoryId::Nationality, "Taiwanese");
    session.toggle_subject_value(0, CategoryId::HairColor, "black hair");
    session.toggle_subject_value(0, CategoryId::HairColor, "pink hair");

    let text = generate(&session, Language::Zh, Format::Text).full_text;
    assert!(text.contains("一個台灣女性"));
    assert!(text.contains("黑色，粉紅色"));
    assert!(!text.contains("black hair"));
}

#[test]
fn random_values_render_the_zh_placeholder() {
    let mut session = Session::default();
    session.replace_subject_value(0, CategoryId::HairColor, "random hair color");

    let zh = generate(&session, Language::Zh, Format::Text).full_text;
    assert!(zh.contains("隨機 (Random)"));

    let en = generate(&session, Language::En, Format::Text).full_text;
    assert!(en.contains("random hair color"));
}

#[test]
fn video_mode_gains_camera_movement_and_drops_aspect_ratio() {
    let mut session = Session::default();
    session.set_task_mode(TaskMode::VideoGeneration);
    session.replace_global_value(CategoryId::CameraMovement, "camera dolly in");
    session.replace_global_value(CategoryId::MotionStrength, "slow motion");
    // Stale from a previous mode; must not leak into video output.
    session.global.aspect_ratio = "aspect ratio 16:9".to_string();

    let text = generate(&session, Language::En, Format::Text).full_text;
    assert!(text.starts_with("camera dolly in, "));
    assert!(text.contains("slow motion"));
    assert!(!text.contains("aspect ratio 16:9"));
}

#[test]
fn generation_mode_ignores_stale_video_fields() {
    let mut session = Session::default();
    session.global.camera_movement = "camera dolly in".to_string();
    session.global.motion_strength = "slow motion".to_string();

    let text = generate(&session, Language::En, Format::Text).full_text;
    assert!(!text.contains("camera dolly in"));
    assert!(!text.contains("slow motion"));
}

#[test]
fn gender_constrained_values_drop_after_gender_change() {
    let mut session = Session::default();
    session.toggle_subject_value(0, CategoryId::Clothing, "bikini");
    session.toggle_gender(0, Gender::Female);
    session.toggle_gender(0, Gender::Male);

    let text = generate(&session, Language::En, Format::Text).full_text;
    assert!(!text.contains("bikini"));
    assert!(text.starts_with("A man"));
}

#[test]
fn editing_mode_emits_instructions_with_preservation_gating() {
    let mut session = Session::default();
    session.set_task_mode(TaskMode::Editing);
    session.add_reference_image(reference("r1", EditIntent::KeepComposition));
    session.toggle_global_value(CategoryId::Preservation, "facial features");
    session.toggle_subject_value(0, CategoryId::Nationality, "Japanese");
    session.toggle_subject_value(0, CategoryId::Role, "doctor");
    session.toggle_subject_value(0, CategoryId::HairColor, "silver white hair");

    let text = generate(&session, Language::En, Format::Text).full_text;
    assert!(text.starts_with("Retain the original composition and pose."));
    assert!(text.contains("Ensure the facial features remain unchanged."));
    // Demographic change suppressed by the facial-features flag.
    assert!(!text.contains("Japanese"));
    // Role and hair are not facial features.
    assert!(text.contains("Change the role to a doctor."));
    assert!(text.contains("Change hair to silver white hair."));
}

#[test]
fn editing_zh_instructions_are_localized() {
    let mut session = Session::default();
    session.set_task_mode(TaskMode::Editing);
    session.add_reference_image(reference("r1", EditIntent::KeepSubject));
    session.toggle_subject_value(0, CategoryId::Clothing, "traditional kimono");

    let text = generate(&session, Language::Zh, Format::Text).full_text;
    assert!(text.contains("保持臉部特徵不變。"));
    assert!(text.contains("將服裝更換為和服。"));
}

#[test]
fn general_intent_contributes_no_sentence() {
    let mut session = Session::default();
    session.set_task_mode(TaskMode::Editing);
    session.add_reference_image(reference("r1", EditIntent::General));
    session.global.use_negative_prompt = false;
    session.subjects[0].clear_attributes();

    let result = generate(&session, Language::En, Format::Text);
    let body = result.full_text.split("\n\n").next().unwrap();
    assert_eq!(body, "");
}

#[test]
fn multi_subject_blocks_join_with_and() {
    let mut session = Session::default();
    session.toggle_subject_value(0, CategoryId::Nationality, "Taiwanese");
    session.add_subject(SubjectType::Animal);
    session.toggle_subject_value(1, CategoryId::AnimalFur, "white fur");
    session.toggle_subject_value(1, CategoryId::AnimalSpecies, "cat");
    session.set_interaction("walking side by side");

    let text = generate(&session, Language::En, Format::Text).full_text;
    assert!(text.starts_with("walking side by side, "));
    assert!(text.contains("A Taiwanese woman AND A white fur cat"));
}

#[test]
fn interaction_is_ignored_for_a_single_subject() {
    let mut session = Session::default();
    session.set_interaction("dancing together");

    let text = generate(&session, Language::En, Format::Text).full_text;
    assert!(!text.contains("dancing together"));
}

#[test]
fn scenery_only_session_suppresses_portrait_framings() {
    let mut session = Session::default();
    session.subjects[0] = promptloom::SubjectConfig::new("subject-1", SubjectType::Scenery);
    session.replace_global_value(CategoryId::Composition, "close-up portrait");
    session.replace_global_value(CategoryId::Camera, "85mm lens");
    session.toggle_global_value(CategoryId::Lighting, "golden hour");

    let text = generate(&session, Language::En, Format::Text).full_text;
    assert!(text.starts_with("A landscape"));
    assert!(!text.contains("close-up portrait"));
    assert!(!text.contains("85mm lens"));
    assert!(text.contains("golden hour"));
}

#[test]
fn vehicle_headline_combines_paint_and_type() {
    let mut session = Session::default();
    session.subjects[0] = promptloom::SubjectConfig::new("subject-1", SubjectType::Vehicle);
    session.replace_subject_value(0, CategoryId::VehicleColor, "matte black finish");
    session.replace_subject_value(0, CategoryId::VehicleType, "sports car");

    let text = generate(&session, Language::En, Format::Text).full_text;
    assert!(text.starts_with("A matte black finish sports car"));
}

#[test]
fn infographic_headline_includes_topic() {
    let mut session = Session::default();
    session.subjects[0] = promptloom::SubjectConfig::new("subject-1", SubjectType::Infographic);
    session.replace_subject_value(0, CategoryId::ChartType, "pie chart");
    session.subjects[0].content = "global coffee consumption".to_string();

    let text = generate(&session, Language::En, Format::Text).full_text;
    assert!(text.starts_with("A pie chart about global coffee consumption"));
}

#[test]
fn sections_cover_subjects_scene_and_negative() {
    let mut session = Session::default();
    session.toggle_subject_value(0, CategoryId::Nationality, "Taiwanese");
    session.toggle_global_value(CategoryId::Lighting, "neon lighting");

    let result = generate(&session, Language::En, Format::Markdown);
    let kinds: Vec<SectionKind> = result.sections.iter().map(|s| s.kind).collect();
    assert_eq!(kinds, vec![SectionKind::Subject, SectionKind::Global, SectionKind::Negative]);
    assert_eq!(result.sections[0].label, "Subject 1");
    assert_eq!(result.sections[1].label, "Scene & Style");
}

#[test]
fn reference_section_label_tracks_task_mode() {
    let mut session = Session::default();
    session.add_reference_image(reference("r1", EditIntent::General));

    let generation = generate(&session, Language::En, Format::Markdown);
    assert!(generation.sections.iter().any(|s| s.label == "References"));

    session.set_task_mode(TaskMode::Editing);
    let editing = generate(&session, Language::En, Format::Markdown);
    assert!(editing.sections.iter().any(|s| s.label == "Input Images"));

    session.set_task_mode(TaskMode::VideoGeneration);
    let video = generate(&session, Language::En, Format::Markdown);
    assert!(video.sections.iter().all(|s| s.kind != SectionKind::Reference));
}

#[test]
fn disabling_the_negative_gate_removes_it_everywhere() {
    let mut session = Session::default();
    session.toggle_use_negative();

    for format in [Format::Text, Format::Markdown, Format::Json, Format::Yaml] {
        let result = generate(&session, Language::En, format);
        assert!(!result.full_text.contains("nsfw"), "{format:?} leaked the negative prompt");
        assert!(result.sections.iter().all(|s| s.kind != SectionKind::Negative));
    }
}
