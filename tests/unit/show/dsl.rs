use super::*;

#[test]
fn full_layout_has_every_scene_and_control() {
    let show = ShowBuilder::full(["1s", "1s", "1s", "1s", "1s"])
        .seed(9)
        .build()
        .unwrap();
    let def = show.def();
    assert_eq!(def.seed, 9);
    assert_eq!(def.stage.scenes, SceneId::ALL.to_vec());
    assert_eq!(def.stage.controls.len(), ControlId::ALL.len());
    assert!(def.stage.modal.is_some());
    assert_eq!(def.stage.cake.chain.len(), 5);
    assert_eq!(def.stage.cake.chain.last().map(String::as_str), Some("frosting"));
    assert_eq!(def.stage.cake.elements[1].dur.as_deref(), Some("1s"));
}

#[test]
fn build_validates() {
    let err = ShowBuilder::new()
        .without_scene(SceneId::Intro)
        .build()
        .unwrap_err();
    assert!(err.to_string().contains("scene 'intro' is required"));

    let err = ShowBuilder::new()
        .control(ControlId::SeeGifts)
        .control(ControlId::SeeGifts)
        .build()
        .unwrap_err();
    assert!(err.to_string().contains("duplicate control 'see-gifts'"));
}

#[test]
fn removal_helpers_drop_markup() {
    let show = ShowBuilder::full(["1s", "1s", "1s", "1s", "1s"])
        .without_scene(SceneId::Cake)
        .without_control(ControlId::BalloonCta)
        .without_modal()
        .without_element("frosting")
        .build()
        .unwrap();
    let stage = &show.def().stage;
    assert!(!stage.scenes.contains(&SceneId::Cake));
    assert!(stage.controls.iter().all(|c| c.id != ControlId::BalloonCta));
    assert!(stage.modal.is_none());
    assert!(stage.cake.elements.iter().all(|e| e.id != "frosting"));
}

#[test]
fn json_round_trip_preserves_definition() {
    let show = ShowBuilder::full(["1.2s", "0.5s", "800ms", "1s", "1.5s"])
        .without_control(ControlId::SeeGifts)
        .unfocusable_control(ControlId::SeeGifts)
        .native_end_events(true)
        .balloons_finish_after_ms(Some(6_000))
        .build()
        .unwrap();
    let json = show.to_json_pretty().unwrap();
    let back = Show::from_json_str(&json).unwrap();
    assert_eq!(back, show);
}
