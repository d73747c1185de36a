use folio_core::{
    GalleryCommand, IntersectionEvent, NavConfig, PageError, PageEvent, PageSession,
    PortfolioContent, SignalHub, SignalKind,
};

fn mount(hub: &SignalHub) -> PageSession {
    let content = PortfolioContent::builtin().expect("builtin content");
    PageSession::mount(hub, content, &NavConfig::default()).expect("mount")
}

fn intersect(section_id: &str, is_intersecting: bool) -> PageEvent {
    PageEvent::Intersection(IntersectionEvent::new(section_id, is_intersecting))
}

#[test]
fn mount_subscribes_every_signal_kind() {
    let hub = SignalHub::new();
    let session = mount(&hub);
    assert!(session.is_mounted());
    for kind in [
        SignalKind::Scroll,
        SignalKind::Intersection,
        SignalKind::HashChange,
        SignalKind::Command,
    ] {
        assert_eq!(hub.listener_count_for(kind), 1, "{kind:?}");
    }
}

#[test]
fn hub_signals_drive_snapshot() {
    let hub = SignalHub::new();
    let session = mount(&hub);

    for position in [0.0, 50.0, 120.0] {
        hub.dispatch(&PageEvent::Scroll { position });
    }
    hub.dispatch(&intersect("about", true));
    hub.dispatch(&intersect("experience", true));
    hub.dispatch(&intersect("about", false));
    hub.dispatch(&PageEvent::MenuToggle);

    let snapshot = session.snapshot();
    assert!(!snapshot.header_visible);
    assert_eq!(snapshot.active_section, "experience");
    assert!(snapshot.menu_open);

    hub.dispatch(&PageEvent::HashChange);
    hub.dispatch(&PageEvent::Scroll { position: 60.0 });
    let snapshot = session.snapshot();
    assert!(snapshot.header_visible);
    assert!(!snapshot.menu_open);
}

#[test]
fn project_gallery_wraps_and_closes() {
    let hub = SignalHub::new();
    let session = mount(&hub);

    assert_eq!(session.open_project_gallery(1), Ok(0));
    let gallery = session.snapshot().gallery.expect("gallery open");
    assert_eq!(gallery.len, 3);
    assert_eq!(gallery.image, "/cake.png");

    hub.dispatch(&PageEvent::Gallery(GalleryCommand::Previous));
    assert_eq!(session.snapshot().gallery.map(|g| g.index), Some(2));
    session
        .gallery_command(GalleryCommand::Next)
        .expect("next on open gallery");
    assert_eq!(session.snapshot().gallery.map(|g| g.image), Some("/cake.png".to_string()));

    hub.dispatch(&PageEvent::Gallery(GalleryCommand::Close));
    hub.dispatch(&PageEvent::Gallery(GalleryCommand::Close));
    assert_eq!(session.snapshot().gallery, None);
}

#[test]
fn rejected_transitions_keep_previous_state() {
    let hub = SignalHub::new();
    let session = mount(&hub);

    let err = session.open_project_gallery(42).expect_err("out of range");
    assert_eq!(err, PageError::ProjectOutOfRange { index: 42, len: 4 });

    let err = session
        .gallery_command(GalleryCommand::Next)
        .expect_err("closed gallery");
    assert!(matches!(err, PageError::Gallery(_)));

    // Delivered through the hub the same rejection is logged, not raised.
    assert_eq!(hub.dispatch(&PageEvent::Gallery(GalleryCommand::Next)), 1);
    assert_eq!(session.snapshot().gallery, None);
}

#[test]
fn unmount_releases_subscriptions_and_stops_updates() {
    let hub = SignalHub::new();
    let mut session = mount(&hub);
    session.open_project_gallery(0).expect("open gallery");
    hub.dispatch(&intersect("about", true));

    session.unmount();
    assert!(!session.is_mounted());
    assert_eq!(hub.listener_count(), 0);
    assert_eq!(hub.dispatch(&intersect("education", true)), 0);

    let snapshot = session.snapshot();
    assert_eq!(snapshot.active_section, "about");
    assert_eq!(snapshot.gallery, None);
    assert_eq!(
        session.open_project_gallery(0),
        Err(PageError::Unmounted)
    );
    session.unmount();
}

#[test]
fn dropping_session_on_error_path_releases_subscriptions() {
    fn mount_then_fail(hub: &SignalHub) -> Result<(), PageError> {
        let session = mount(hub);
        session.open_project_gallery(usize::MAX)?;
        Ok(())
    }

    let hub = SignalHub::new();
    assert!(mount_then_fail(&hub).is_err());
    assert_eq!(hub.listener_count(), 0);
}

#[test]
fn mount_rejects_invalid_nav_config() {
    let hub = SignalHub::new();
    let content = PortfolioContent::builtin().expect("builtin content");
    let config = NavConfig {
        default_section: "work".to_string(),
        ..NavConfig::default()
    };
    let err = PageSession::mount(&hub, content, &config)
        .err()
        .expect("invalid default section must fail");
    assert!(matches!(err, PageError::Nav(_)));
    assert_eq!(hub.listener_count(), 0);
}

#[test]
fn sessions_on_one_hub_are_independent() {
    let hub = SignalHub::new();
    let first = mount(&hub);
    let second = mount(&hub);
    assert_ne!(first.id(), second.id());

    first.open_project_gallery(0).expect("open gallery");
    assert!(second.snapshot().gallery.is_none());

    drop(first);
    hub.dispatch(&intersect("education", true));
    assert_eq!(second.snapshot().active_section, "education");
    assert_eq!(hub.listener_count(), 4);
}
