use super::*;
use std::cell::RefCell;
use std::rc::Rc;
use urano_core::{millis_to_nanos, Runtime};

fn quick() -> TypewriterConfig {
    TypewriterConfig {
        char_interval_millis: 10,
        pause_millis: 100,
        start_delay_millis: 0,
        repeat: true,
    }
}

fn phrases(list: &[&str]) -> Vec<String> {
    list.iter().map(|phrase| phrase.to_string()).collect()
}

#[test]
fn types_pauses_then_moves_to_the_next_phrase() {
    let runtime = Runtime::new();
    let writer = Typewriter::new(runtime.handle(), phrases(&["ab", "xyz"]), quick());
    assert_eq!(writer.phase(), TypewriterPhase::Idle);

    writer.start();
    assert_eq!(writer.phase(), TypewriterPhase::Typing);
    assert_eq!(writer.text(), "");

    runtime.advance_to(millis_to_nanos(10));
    assert_eq!(writer.text(), "a");
    runtime.advance_to(millis_to_nanos(20));
    assert_eq!(writer.text(), "ab");
    assert_eq!(writer.phase(), TypewriterPhase::Pausing);

    runtime.advance_to(millis_to_nanos(119));
    assert_eq!(writer.text(), "ab");
    runtime.advance_to(millis_to_nanos(120));
    assert_eq!(writer.phrase_index(), 1);
    assert_eq!(writer.text(), "");
    assert_eq!(writer.phase(), TypewriterPhase::Typing);

    runtime.advance_to(millis_to_nanos(150));
    assert_eq!(writer.text(), "xyz");
    assert_eq!(writer.phase(), TypewriterPhase::Pausing);
}

#[test]
fn wraps_around_when_repeating() {
    let runtime = Runtime::new();
    let writer = Typewriter::new(runtime.handle(), phrases(&["ab", "xyz"]), quick());
    writer.start();
    runtime.advance_to(millis_to_nanos(260));
    assert_eq!(writer.phrase_index(), 0);
    assert_eq!(writer.text(), "a");
}

#[test]
fn stops_on_the_last_phrase_without_repeat() {
    let runtime = Runtime::new();
    let config = TypewriterConfig {
        repeat: false,
        ..quick()
    };
    let writer = Typewriter::new(runtime.handle(), phrases(&["ab", "xyz"]), config);
    writer.start();
    runtime.advance_to(millis_to_nanos(1_000));
    assert_eq!(writer.phase(), TypewriterPhase::Finished);
    assert_eq!(writer.phrase_index(), 1);
    assert_eq!(writer.text(), "xyz");
    assert_eq!(runtime.pending_timer_count(), 0);
}

#[test]
fn counts_characters_not_bytes() {
    let runtime = Runtime::new();
    let writer = Typewriter::new(runtime.handle(), phrases(&["héllo"]), quick());
    writer.start();
    runtime.advance_to(millis_to_nanos(20));
    assert_eq!(writer.text(), "hé");
}

#[test]
fn empty_phrase_goes_straight_to_pause() {
    let runtime = Runtime::new();
    let writer = Typewriter::new(runtime.handle(), phrases(&["", "a"]), quick());
    writer.start();
    runtime.advance_to(millis_to_nanos(10));
    assert_eq!(writer.phase(), TypewriterPhase::Pausing);
    runtime.advance_to(millis_to_nanos(120));
    assert_eq!(writer.phrase_index(), 1);
    assert_eq!(writer.text(), "a");
}

#[test]
fn no_phrases_stays_idle() {
    let runtime = Runtime::new();
    let writer = Typewriter::new(runtime.handle(), Vec::new(), quick());
    writer.start();
    assert_eq!(writer.phase(), TypewriterPhase::Idle);
    assert_eq!(runtime.pending_timer_count(), 0);
}

#[test]
fn start_delay_holds_the_first_character() {
    let runtime = Runtime::new();
    let config = TypewriterConfig {
        start_delay_millis: 500,
        ..quick()
    };
    let writer = Typewriter::new(runtime.handle(), phrases(&["ab"]), config);
    writer.start();
    runtime.advance_to(millis_to_nanos(509));
    assert_eq!(writer.text(), "");
    runtime.advance_to(millis_to_nanos(510));
    assert_eq!(writer.text(), "a");
}

#[test]
fn stop_freezes_text_and_restart_begins_again() {
    let runtime = Runtime::new();
    let writer = Typewriter::new(runtime.handle(), phrases(&["abc"]), quick());
    writer.start();
    runtime.advance_to(millis_to_nanos(20));
    writer.stop();
    assert_eq!(writer.phase(), TypewriterPhase::Idle);
    assert_eq!(runtime.pending_timer_count(), 0);
    runtime.advance_to(millis_to_nanos(200));
    assert_eq!(writer.text(), "ab");

    writer.start();
    assert_eq!(writer.text(), "");
    assert_eq!(runtime.pending_timer_count(), 1);
}

#[test]
fn state_publishes_each_step() {
    let runtime = Runtime::new();
    let writer = Typewriter::new(runtime.handle(), phrases(&["ab"]), quick());
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    let _sub = writer
        .state()
        .subscribe(move |snapshot: &TypewriterSnapshot| sink.borrow_mut().push(snapshot.text.clone()));

    writer.start();
    runtime.advance_to(millis_to_nanos(20));
    assert_eq!(*seen.borrow(), vec!["", "a", "ab"]);
}

#[test]
fn dropping_the_writer_cancels_its_timer() {
    let runtime = Runtime::new();
    let writer = Typewriter::new(runtime.handle(), phrases(&["ab"]), quick());
    writer.start();
    assert_eq!(runtime.pending_timer_count(), 1);
    drop(writer);
    assert_eq!(runtime.pending_timer_count(), 0);
}
