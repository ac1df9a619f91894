use super::*;
use crate::show::dsl::ShowBuilder;

fn birthday() -> Presentation {
    let show = ShowBuilder::full(["400ms"; 5])
        .seed(7)
        .balloons_finish_after_ms(Some(5000))
        .build()
        .unwrap();
    Presentation::simulated(show).unwrap()
}

#[test]
fn must_start_once_before_running() {
    let mut p = birthday();
    assert!(p.run_until(Millis(10)).is_err());
    assert!(p.run_until_idle(Millis(10)).is_err());
    assert!(
        p.dispatch(Input::KeyDown {
            key: "Escape".to_owned()
        })
        .is_err()
    );

    p.start().unwrap();
    assert!(p.is_started());
    assert!(p.start().is_err());
}

#[test]
fn invalid_show_is_rejected() {
    let mut def = ShowBuilder::new().build().unwrap().def().clone();
    def.version = "9".to_owned();
    let err = Presentation::simulated(Show::from_def(def)).unwrap_err();
    assert!(err.to_string().contains("version"));
}

#[test]
fn start_shows_intro_and_hides_the_toggle() {
    let mut p = birthday();
    p.start().unwrap();
    assert_eq!(p.stage().scenes().active(), Some(SceneId::Intro));
    let toggle = p.stage().control(ControlId::MusicToggle).unwrap();
    assert!(toggle.hidden);
    assert_eq!(toggle.label.as_deref(), Some("Pause music"));
    assert!(p.state().hearts_running);
    assert_eq!(p.now(), Millis::ZERO);
}

#[test]
fn show_scene_failure_is_logged_not_raised() {
    let show = ShowBuilder::new().build().unwrap();
    let mut p = Presentation::simulated(show).unwrap();
    let mut cx = cx!(p);
    assert!(!cx.show_scene(SceneId::Cake));
    assert!(p.trace().events().is_empty());
}

#[test]
fn run_until_never_moves_backwards() {
    let mut p = birthday();
    p.start().unwrap();
    p.run_until(Millis(3000)).unwrap();
    p.run_until(Millis(1000)).unwrap();
    assert_eq!(p.now(), Millis(3000));
    p.run_for(Millis(500)).unwrap();
    assert_eq!(p.now(), Millis(3500));
}

#[test]
fn run_until_idle_drains_the_queue() {
    let mut p = birthday();
    p.start().unwrap();
    assert!(!p.run_until_idle(Millis(5000)).unwrap());
    assert_eq!(p.now(), Millis(5000));

    assert!(p.run_until_idle(Millis(120_000)).unwrap());
    assert!(p.state().cake_revealed);
    assert_eq!(p.hearts().live_count(), 0);
}

#[test]
fn duplicate_signals_are_recorded_and_dropped() {
    let mut p = birthday();
    p.start().unwrap();
    assert!(p.publish(Signal::BalloonsFinished).unwrap());
    assert!(!p.publish(Signal::BalloonsFinished).unwrap());
    assert_eq!(
        p.trace()
            .count(|k| matches!(k, TraceKind::SignalIgnored { .. })),
        1
    );
}

#[test]
fn publish_before_start_is_rejected_and_keeps_the_signal() {
    let mut p = birthday();
    assert!(p.publish(Signal::BalloonsFinished).is_err());
    assert!(p.trace().events().is_empty());
    assert_eq!(p.cake_state(), CakeState::Idle);

    p.start().unwrap();
    assert!(p.publish(Signal::BalloonsFinished).unwrap());
    p.run_until(Millis(60_000)).unwrap();
    assert_eq!(p.cake_state(), CakeState::Revealed);
    assert!(p.state().cake_revealed);
}

#[test]
fn clicks_on_hidden_controls_do_nothing() {
    let mut p = birthday();
    p.start().unwrap();
    p.dispatch(Input::Click {
        control: ControlId::SeeGifts,
    })
    .unwrap();
    assert_eq!(p.stage().modal().map(|m| m.state()), Some(ModalState::Hidden));
}

#[test]
fn snapshot_reflects_the_page() {
    let mut p = birthday();
    p.start().unwrap();
    p.run_until(Millis(1000)).unwrap();
    let snap = p.snapshot();
    assert_eq!(snap.at, Millis(1000));
    assert_eq!(snap.active_scene, Some(SceneId::Intro));
    assert_eq!(snap.cake, CakeState::Idle);
    assert_eq!(snap.modal, Some(ModalState::Hidden));
    assert_eq!(snap.focused, None);
    assert_eq!(
        snap.visible_controls,
        vec![ControlId::LetterClose, ControlId::OpenGift]
    );
    assert_eq!(snap.live_particles, p.hearts().live_count());
    assert!(snap.music_playing);
}

#[test]
fn teardown_clears_hearts() {
    let mut p = birthday();
    p.start().unwrap();
    p.run_until(Millis(2000)).unwrap();
    p.teardown();
    assert_eq!(p.hearts().live_count(), 0);
    assert!(!p.state().hearts_running);
}
