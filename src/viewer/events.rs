//! Pointer handlers for drawn blocks.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, MouseEvent};

use crate::render::classes;

/// Handlers attached to live elements; dropping them detaches the callbacks.
pub(crate) type Handlers = Vec<Closure<dyn FnMut(MouseEvent)>>;

/// Toggle the `hover` class while the pointer is over `element`.
pub(crate) fn attach_hover(element: &HtmlElement, handlers: &mut Handlers) {
    {
        let target = element.clone();
        let closure = Closure::wrap(Box::new(move |_event: MouseEvent| {
            let _ = target.class_list().add_1(classes::HOVER);
        }) as Box<dyn FnMut(MouseEvent)>);
        element
            .add_event_listener_with_callback("mouseenter", closure.as_ref().unchecked_ref())
            .ok();
        handlers.push(closure);
    }

    {
        let target = element.clone();
        let closure = Closure::wrap(Box::new(move |_event: MouseEvent| {
            let _ = target.class_list().remove_1(classes::HOVER);
        }) as Box<dyn FnMut(MouseEvent)>);
        element
            .add_event_listener_with_callback("mouseleave", closure.as_ref().unchecked_ref())
            .ok();
        handlers.push(closure);
    }
}

/// Navigate to `link` when `element` is clicked.
pub(crate) fn attach_link(element: &HtmlElement, link: &str, handlers: &mut Handlers) {
    let link = link.to_string();
    let closure = Closure::wrap(Box::new(move |_event: MouseEvent| {
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href(&link);
        }
    }) as Box<dyn FnMut(MouseEvent)>);
    element
        .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
        .ok();
    handlers.push(closure);
}
