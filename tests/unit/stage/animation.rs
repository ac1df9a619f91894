use super::*;

fn elements(defs: &[(&str, Option<&str>)]) -> BTreeMap<String, AnimationElement> {
    defs.iter()
        .map(|(id, dur)| {
            (
                (*id).to_owned(),
                AnimationElement::new(*id, dur.map(str::to_owned), true),
            )
        })
        .collect()
}

fn chain() -> AnimationChain {
    AnimationChain::new(["sponge-1", "filling-1", "sponge-2", "sponge-3", "frosting"])
}

#[test]
fn clock_values_parse() {
    assert_eq!(parse_clock_value("1.2s"), Some(1.2));
    assert_eq!(parse_clock_value("1.5"), Some(1.5));
    assert_eq!(parse_clock_value(" 800ms "), Some(0.8));
    assert_eq!(parse_clock_value("2min"), Some(120.0));
    assert_eq!(parse_clock_value("1h"), Some(3600.0));
    assert_eq!(parse_clock_value("02:03.5"), Some(123.5));
    assert_eq!(parse_clock_value("01:00:01"), Some(3601.0));
    assert_eq!(parse_clock_value(".5s"), Some(0.5));
}

#[test]
fn invalid_clock_values_are_rejected() {
    for bad in [
        "", "indefinite", "abc", "1.2.3s", "-1s", "1e3", "s", "01:75", "1:2:3:4", "NaN",
    ] {
        assert_eq!(parse_clock_value(bad), None, "{bad:?}");
    }
}

#[test]
fn summed_durations_plus_buffer() {
    let els = elements(&[
        ("sponge-1", Some("1.2s")),
        ("sponge-2", Some("0.8s")),
        ("frosting", Some("1.5s")),
    ]);
    let d = fallback_deadline(&chain(), &els);
    assert_eq!(d.delay, Millis(3_800));
    assert_eq!(
        d.basis,
        FallbackBasis::ChainSum {
            declared: Millis(3_500)
        }
    );
}

#[test]
fn missing_final_element_uses_fixed_three_seconds() {
    let els = elements(&[("sponge-1", Some("1.2s")), ("sponge-2", Some("9s"))]);
    let d = fallback_deadline(&chain(), &els);
    assert_eq!(d.delay, Millis(3_000));
    assert_eq!(d.basis, FallbackBasis::MissingFinal);
}

#[test]
fn final_without_any_duration_uses_4500() {
    let els = elements(&[("sponge-1", None), ("frosting", None)]);
    let d = fallback_deadline(&chain(), &els);
    assert_eq!(d.delay, Millis(4_500));
    assert_eq!(d.basis, FallbackBasis::NoDurations);
}

#[test]
fn zero_and_unparseable_durations_count_as_absent() {
    let els = elements(&[("sponge-1", Some("0s")), ("frosting", Some("soon"))]);
    assert_eq!(fallback_deadline(&chain(), &els).delay, Millis(4_500));
}

#[test]
fn elements_outside_chain_are_ignored() {
    let els = elements(&[("frosting", Some("1s")), ("candles", Some("30s"))]);
    assert_eq!(fallback_deadline(&chain(), &els).delay, Millis(1_300));
}

#[test]
fn empty_chain_counts_as_missing_final() {
    let els = elements(&[("frosting", Some("1s"))]);
    let d = fallback_deadline(&AnimationChain::default(), &els);
    assert_eq!(d.basis, FallbackBasis::MissingFinal);
}

#[test]
fn begin_records_time_or_fails_when_unsupported() {
    let mut ok = AnimationElement::new("a", Some("1s".to_owned()), true);
    ok.begin(Millis(450)).unwrap();
    assert_eq!(ok.began_at(), Some(Millis(450)));

    let mut no = AnimationElement::new("b", None, false);
    assert!(no.begin(Millis(450)).is_err());
    assert_eq!(no.began_at(), None);
}

#[test]
fn raw_dur_is_kept_even_when_it_does_not_parse() {
    let el = AnimationElement::new("frosting", Some("soon".to_owned()), true);
    assert_eq!(el.dur_attr(), Some("soon"));
    assert_eq!(el.declared_duration(), None);
    assert_eq!(AnimationElement::new("x", None, true).dur_attr(), None);
}
