use super::*;

fn all_scenes() -> SceneSwitcher {
    SceneSwitcher::new(SceneId::ALL).unwrap()
}

#[test]
fn nothing_is_active_before_first_switch() {
    let s = all_scenes();
    assert_eq!(s.active(), None);
    assert_eq!(s.active_count(), 0);
}

#[test]
fn exactly_one_scene_is_active_after_every_switch() {
    let mut s = all_scenes();
    for id in [
        SceneId::Intro,
        SceneId::Balloons,
        SceneId::Cake,
        SceneId::Gifts,
        SceneId::Intro,
        SceneId::Gifts,
    ] {
        s.show_scene(id).unwrap();
        assert_eq!(s.active_count(), 1);
        assert_eq!(s.active(), Some(id));
    }
}

#[test]
fn unregistered_scene_is_rejected_and_state_kept() {
    let mut s = SceneSwitcher::new([SceneId::Intro, SceneId::Balloons]).unwrap();
    s.show_scene(SceneId::Intro).unwrap();
    let err = s.show_scene(SceneId::Cake).unwrap_err();
    assert!(err.to_string().contains("scene 'cake' is not registered"));
    assert_eq!(s.active(), Some(SceneId::Intro));
    assert_eq!(s.active_count(), 1);
}

#[test]
fn duplicate_registration_is_rejected() {
    assert!(SceneSwitcher::new([SceneId::Intro, SceneId::Intro]).is_err());
}

#[test]
fn leaving_flag_is_cleared_by_next_switch() {
    let mut s = all_scenes();
    assert!(!s.begin_leave(SceneId::Intro));
    s.show_scene(SceneId::Intro).unwrap();
    assert!(s.begin_leave(SceneId::Intro));
    assert!(s.is_leaving(SceneId::Intro));
    assert_eq!(s.active(), Some(SceneId::Intro));

    s.show_scene(SceneId::Balloons).unwrap();
    assert!(!s.is_leaving(SceneId::Intro));
    assert_eq!(s.active(), Some(SceneId::Balloons));
}
