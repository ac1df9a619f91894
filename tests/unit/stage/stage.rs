use super::*;
use crate::show::dsl::ShowBuilder;
use crate::show::model::ModalDef;

fn full_stage() -> Stage {
    let show = ShowBuilder::full(["1s", "1s", "1s", "1s", "1s"])
        .build()
        .unwrap();
    Stage::from_def(&show.def().stage).unwrap()
}

#[test]
fn markup_state_hides_ctas() {
    let stage = full_stage();
    assert!(stage.control(ControlId::SeeGifts).unwrap().hidden);
    assert!(stage.control(ControlId::BalloonCta).unwrap().hidden);
    assert!(!stage.control(ControlId::LetterClose).unwrap().hidden);
    assert_eq!(stage.scenes().active(), None);
    assert_eq!(stage.chain().first_id(), Some("sponge-1"));
    assert_eq!(stage.chain().final_id(), Some("frosting"));
    assert_eq!(stage.animations().len(), 5);
}

#[test]
fn hidden_controls_cannot_take_focus() {
    let mut stage = full_stage();
    assert!(stage.focus_control(ControlId::SeeGifts).is_err());
    assert_eq!(stage.focused(), None);

    stage.set_hidden(ControlId::SeeGifts, false);
    stage.focus_control(ControlId::SeeGifts).unwrap();
    assert_eq!(stage.focused(), Some(FocusTarget::Control(ControlId::SeeGifts)));

    stage.set_hidden(ControlId::SeeGifts, true);
    assert_eq!(stage.focused(), None);
}

#[test]
fn unfocusable_and_missing_controls_fail_focus() {
    let show = ShowBuilder::new()
        .unfocusable_control(ControlId::SeeGifts)
        .build()
        .unwrap();
    let mut stage = Stage::from_def(&show.def().stage).unwrap();
    stage.set_hidden(ControlId::SeeGifts, false);
    assert!(stage.focus_control(ControlId::SeeGifts).is_err());
    assert!(stage.focus_control(ControlId::MusicToggle).is_err());
    assert!(!stage.set_hidden(ControlId::MusicToggle, false));
}

#[test]
fn letter_focus_needs_visible_focusable_modal() {
    let mut stage = full_stage();
    assert!(stage.focus_letter_inner().is_err());
    stage.modal_mut().unwrap().open();
    stage.focus_letter_inner().unwrap();
    assert_eq!(stage.focused(), Some(FocusTarget::LetterInner));
    stage.blur_letter();
    assert_eq!(stage.focused(), None);

    let show = ShowBuilder::new()
        .modal(ModalDef {
            inner_focusable: false,
        })
        .build()
        .unwrap();
    let mut stage = Stage::from_def(&show.def().stage).unwrap();
    stage.modal_mut().unwrap().open();
    assert!(stage.focus_letter_inner().is_err());
}

#[test]
fn balloon_surface_is_created_once_behind_overlay() {
    let mut stage = full_stage();
    assert!(stage.ensure_balloon_surface().unwrap());
    assert!(!stage.ensure_balloon_surface().unwrap());
    let s = stage.balloon_surface().unwrap();
    assert_eq!(s.id, BALLOON_SURFACE_ID);
    assert_eq!(s.placement, SurfacePlacement::BehindOverlay);
}

#[test]
fn balloon_surface_is_appended_without_overlay() {
    let show = ShowBuilder::new().build().unwrap();
    let mut stage = Stage::from_def(&show.def().stage).unwrap();
    stage.ensure_balloon_surface().unwrap();
    assert_eq!(
        stage.balloon_surface().unwrap().placement,
        SurfacePlacement::Appended
    );
}
