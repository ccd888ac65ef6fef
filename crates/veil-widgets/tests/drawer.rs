//! Drawer behavior: structure, portal placement, dismissal, header.
//!
//! Everything else about the drawer is covered by the overlay tests.

use std::cell::Cell;
use std::rc::Rc;

use veil_core::event::KeyEvent;
use veil_core::{Document, ElementId, event::Event, keys};
use veil_widgets::classes;
use veil_widgets::{
    Button, Child, CloseReason, Drawer, DrawerProps, El, Heading, Icon, IconSize, child,
};

fn drawer_contents() -> Vec<Child> {
    vec![
        child(
            El::div()
                .class(classes::DRAWER_HEADER)
                .child(Icon::new("inbox").size(IconSize::Large))
                .child(Heading::h4("Drawer header")),
        ),
        child(
            El::div().class(classes::DRAWER_BODY).child(El::p().text(
                "Lorem ipsum dolor sit amet, consectetur adipisicing elit, sed do eiusmod \
                 tempor incididunt ut labore et dolore magna alqua.",
            )),
        ),
        child(
            El::div().class(classes::DRAWER_FOOTER).child(
                El::div()
                    .class(classes::DRAWER_FOOTER_ACTIONS)
                    .child(Button::new().text("Secondary"))
                    .child(
                        Button::new()
                            .class(classes::INTENT_PRIMARY)
                            .kind("submit")
                            .text("Primary"),
                    ),
            ),
        ),
    ]
}

fn close_spy() -> (Rc<Cell<u32>>, impl Fn(CloseReason) + 'static) {
    let calls = Rc::new(Cell::new(0));
    let sink = Rc::clone(&calls);
    (calls, move |_| sink.set(sink.get() + 1))
}

fn header_buttons(doc: &Document, scope: ElementId) -> usize {
    doc.query_class(scope, classes::DRAWER_HEADER)
        .into_iter()
        .map(|header| doc.query_class(header, classes::BUTTON).len())
        .sum()
}

#[test]
fn renders_its_content_correctly() {
    let mut doc = Document::new();
    let body = doc.body();
    let mut drawer = Drawer::new();
    drawer.render(
        &mut doc,
        body,
        DrawerProps::new()
            .is_open(true)
            .use_portal(false)
            .children(drawer_contents()),
    );
    for class in [
        classes::DRAWER,
        classes::DRAWER_BODY,
        classes::DRAWER_FOOTER,
        classes::DRAWER_HEADER,
        classes::OVERLAY_BACKDROP,
    ] {
        assert_eq!(doc.query_class(body, class).len(), 1, "missing {class}");
    }
}

#[test]
fn portal_class_name_appears_on_portal() {
    let mut doc = Document::new();
    let body = doc.body();
    let mut drawer = Drawer::new();
    drawer.render(
        &mut doc,
        body,
        DrawerProps::new()
            .is_open(true)
            .portal_class_name("test-class")
            .children(drawer_contents()),
    );
    let portals = doc.query_selector_all(body, "div.veil-portal.test-class");
    assert_eq!(portals.len(), 1);
    assert_eq!(doc.query_class(body, "test-class"), portals);
    drawer.unmount(&mut doc);
    assert!(doc.query_class(body, classes::PORTAL).is_empty());
}

#[test]
fn renders_contents_to_specified_container() {
    let mut doc = Document::new();
    let body = doc.body();
    let container = doc.create_element("div");
    doc.append_child(body, container).unwrap();
    let mut drawer = Drawer::new();
    drawer.render(
        &mut doc,
        body,
        DrawerProps::new()
            .is_open(true)
            .portal_container(container)
            .children(drawer_contents()),
    );
    assert_eq!(doc.query_class(container, classes::DRAWER).len(), 1);
    let portal = drawer.overlay().portal_root().unwrap();
    assert_eq!(doc.parent(portal), Some(container));
    assert!(drawer.overlay().diagnostics().is_empty());
    drawer.unmount(&mut doc);
    doc.remove(container).unwrap();
}

#[test]
fn attempts_to_close_when_backdrop_is_moused_down() {
    let mut doc = Document::new();
    let body = doc.body();
    let (calls, on_close) = close_spy();
    let mut drawer = Drawer::new();
    drawer.render(
        &mut doc,
        body,
        DrawerProps::new()
            .is_open(true)
            .use_portal(false)
            .on_close(on_close)
            .children(drawer_contents()),
    );
    let backdrop = doc.query_class(body, classes::OVERLAY_BACKDROP)[0];
    assert!(drawer
        .handle_event(&mut doc, &Event::pointer_down(backdrop))
        .is_consumed());
    assert_eq!(calls.get(), 1);
}

#[test]
fn does_not_close_on_backdrop_when_outside_click_disabled() {
    let mut doc = Document::new();
    let body = doc.body();
    let (calls, on_close) = close_spy();
    let mut drawer = Drawer::new();
    drawer.render(
        &mut doc,
        body,
        DrawerProps::new()
            .can_outside_click_close(false)
            .is_open(true)
            .use_portal(false)
            .on_close(on_close)
            .children(drawer_contents()),
    );
    let backdrop = doc.query_class(body, classes::OVERLAY_BACKDROP)[0];
    for _ in 0..3 {
        drawer.handle_event(&mut doc, &Event::pointer_down(backdrop));
    }
    assert_eq!(calls.get(), 0);
}

#[test]
fn does_not_close_on_escape_when_escape_disabled() {
    let mut doc = Document::new();
    let body = doc.body();
    let (calls, on_close) = close_spy();
    let mut drawer = Drawer::new();
    drawer.render(
        &mut doc,
        body,
        DrawerProps::new()
            .can_escape_key_close(false)
            .is_open(true)
            .use_portal(false)
            .on_close(on_close)
            .children(drawer_contents()),
    );
    let panel = drawer.element().unwrap();
    let escape = Event::Key(KeyEvent::from_which(keys::ESCAPE, panel));
    drawer.handle_event(&mut doc, &escape);
    assert_eq!(calls.get(), 0);
}

#[test]
fn escape_closes_once_per_keypress() {
    let mut doc = Document::new();
    let body = doc.body();
    let (calls, on_close) = close_spy();
    let mut drawer = Drawer::new();
    drawer.render(
        &mut doc,
        body,
        DrawerProps::new()
            .is_open(true)
            .use_portal(false)
            .on_close(on_close)
            .children(drawer_contents()),
    );
    let panel = drawer.element().unwrap();
    let escape = Event::Key(KeyEvent::from_which(keys::ESCAPE, panel));
    assert!(drawer.handle_event(&mut doc, &escape).is_consumed());
    assert_eq!(calls.get(), 1);
    drawer.handle_event(&mut doc, &escape);
    assert_eq!(calls.get(), 2);
}

#[test]
fn supports_overlay_lifecycle_props() {
    let mut doc = Document::new();
    let body = doc.body();
    let opening = Rc::new(Cell::new(0));
    let sink = Rc::clone(&opening);
    let mut drawer = Drawer::new();
    drawer.render(
        &mut doc,
        body,
        DrawerProps::new()
            .is_open(true)
            .on_opening(move |_| sink.set(sink.get() + 1))
            .child("body"),
    );
    assert_eq!(opening.get(), 1);
}

#[test]
fn renders_header_if_title_given() {
    let mut doc = Document::new();
    let body = doc.body();
    let mut drawer = Drawer::new();
    drawer.render(
        &mut doc,
        body,
        DrawerProps::new()
            .is_open(true)
            .title("Hello!")
            .use_portal(false)
            .child("dialog body"),
    );
    let header = doc.query_class(body, classes::DRAWER_HEADER);
    assert_eq!(header.len(), 1);
    assert!(doc.text_content(header[0]).starts_with("Hello!"));
}

#[test]
fn close_button_follows_is_close_button_shown() {
    let mut doc = Document::new();
    let body = doc.body();
    let props = |shown| {
        DrawerProps::new()
            .is_close_button_shown(shown)
            .is_open(true)
            .title("Hello!")
            .use_portal(false)
            .child("dialog body")
    };
    let mut drawer = Drawer::new();
    drawer.render(&mut doc, body, props(true));
    assert_eq!(header_buttons(&doc, body), 1);
    let header = doc.query_class(body, classes::DRAWER_HEADER)[0];
    let with_button = doc.children(header).len();

    drawer.render(&mut doc, body, props(false));
    assert_eq!(header_buttons(&doc, body), 0);
    let header = doc.query_class(body, classes::DRAWER_HEADER)[0];
    assert_eq!(doc.children(header).len(), with_button - 1);
    assert!(drawer.close_button().is_none());
}

#[test]
fn clicking_close_button_triggers_on_close() {
    let mut doc = Document::new();
    let body = doc.body();
    let reason = Rc::new(Cell::new(None));
    let sink = Rc::clone(&reason);
    let (calls, spy) = close_spy();
    let mut drawer = Drawer::new();
    drawer.render(
        &mut doc,
        body,
        DrawerProps::new()
            .is_close_button_shown(true)
            .is_open(true)
            .on_close(move |why| {
                spy(why);
                sink.set(Some(why));
            })
            .title("Hello!")
            .use_portal(false)
            .child("dialog body"),
    );
    let header = doc.query_class(body, classes::DRAWER_HEADER)[0];
    let button = doc.query_class(header, classes::BUTTON)[0];
    assert!(drawer
        .handle_event(&mut doc, &Event::click(button))
        .is_consumed());
    assert_eq!(calls.get(), 1);
    assert_eq!(reason.get(), Some(CloseReason::CloseButton));
}

#[test]
fn only_adds_its_class_name_in_one_location() {
    let mut doc = Document::new();
    let body = doc.body();
    let mut drawer = Drawer::new();
    drawer.render(
        &mut doc,
        body,
        DrawerProps::new()
            .class_name("foo")
            .is_open(true)
            .title("title")
            .use_portal(false),
    );
    assert_eq!(doc.query_class(body, "foo"), vec![drawer.element().unwrap()]);
}

#[test]
fn class_name_stays_single_with_portal() {
    let mut doc = Document::new();
    let body = doc.body();
    let mut drawer = Drawer::new();
    drawer.render(
        &mut doc,
        body,
        DrawerProps::new()
            .class_name("foo")
            .portal_class_name("bar")
            .is_open(true)
            .title("title"),
    );
    assert_eq!(doc.query_class(body, "foo").len(), 1);
    assert_eq!(doc.query_class(body, "bar").len(), 1);
}
