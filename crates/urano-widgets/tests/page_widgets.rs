use urano_core::{millis_to_nanos, Runtime};
use urano_widgets::{
    CopyFeedback, FaqAccordion, MemoryClipboard, MenuConfig, MenuController, MenuKey, Typewriter,
    TypewriterConfig, TypewriterPhase, WidgetError,
};

#[test]
fn widgets_share_one_runtime_without_interfering() {
    let runtime = Runtime::new();
    let menu = MenuController::new(runtime.handle(), MenuConfig::default());
    let feedback = CopyFeedback::new(runtime.handle());
    let writer = Typewriter::new(
        runtime.handle(),
        vec!["Build".into(), "Ship".into()],
        TypewriterConfig::default(),
    );

    writer.start();
    menu.on_trigger_enter(MenuKey::Community);
    menu.on_trigger_leave();
    feedback
        .copy(&mut MemoryClipboard::new(), "contact@example.com")
        .unwrap();

    runtime.advance_to(millis_to_nanos(400));
    assert_eq!(menu.open_key(), None);
    assert!(feedback.is_copied());
    assert_eq!(writer.text(), "Build");
    assert_eq!(writer.phase(), TypewriterPhase::Pausing);

    runtime.advance_to(millis_to_nanos(2_000));
    assert!(!feedback.is_copied());
}

#[test]
fn faq_rejects_duplicate_ids() {
    let err = FaqAccordion::new(vec!["a".into(), "a".into()], None).err();
    assert_eq!(err, Some(WidgetError::DuplicateId("a".into())));
}
