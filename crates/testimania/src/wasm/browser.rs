//! The real page, through web-sys
//!
//! Nodes are created with `createElement`/`createTextNode`; testimonial text
//! never passes through `innerHTML`.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{console, Document, Element, HtmlElement};

use crate::carousel::{CarouselController, NavControl, BUTTON_CLASS, STRIP_CLASS};
use crate::config::{AttributeSource, RENDER_TARGET_ID};
use crate::dom::{DomElement, Fragment, Node};
use crate::host::Host;
use crate::style::{self, Stylesheet};

/// Selector of the embed tag carrying the widget attributes
pub const SCRIPT_SELECTOR: &str = "script[data-slug]";

/// [`Host`] backed by the browser document
#[derive(Debug)]
pub struct BrowserHost {
    document: Document,
    script: Option<Element>,
    target: Option<Element>,
    origin: Option<String>,
}

impl BrowserHost {
    /// Binds to the current window's document
    pub fn from_window() -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        let script = document.query_selector(SCRIPT_SELECTOR).ok().flatten();
        let target = document.get_element_by_id(RENDER_TARGET_ID);
        let origin = window.location().origin().ok();
        Some(Self {
            document,
            script,
            target,
            origin,
        })
    }

    fn build(&self, node: &Node) -> Result<web_sys::Node, JsValue> {
        match node {
            Node::Text(text) => Ok(self.document.create_text_node(text).into()),
            Node::Element(el) => self.build_element(el).map(Into::into),
        }
    }

    fn build_element(&self, el: &DomElement) -> Result<Element, JsValue> {
        let element = self.document.create_element(&el.tag)?;
        if !el.classes.is_empty() {
            element.set_class_name(&el.classes.join(" "));
        }
        for (name, value) in &el.attributes {
            element.set_attribute(name, value)?;
        }
        for child in &el.children {
            element.append_child(&self.build(child)?)?;
        }
        Ok(element)
    }

    fn try_mount(&self, target: &Element, fragment: &Fragment) -> Result<(), JsValue> {
        target.set_text_content(None);
        for node in &fragment.nodes {
            target.append_child(&self.build(node)?)?;
        }
        Ok(())
    }

    fn try_inject(&self, sheet: &Stylesheet) -> Result<(), JsValue> {
        if let Some(existing) = self.document.get_element_by_id(sheet.id) {
            existing.set_text_content(Some(&sheet.css));
            return Ok(());
        }
        let style = self.document.create_element("style")?;
        style.set_id(sheet.id);
        style.set_text_content(Some(&sheet.css));
        match self.document.head() {
            Some(head) => head.append_child(&style)?,
            None => self
                .document
                .document_element()
                .ok_or_else(|| JsValue::from_str("document has no root element"))?
                .append_child(&style)?,
        };
        Ok(())
    }

    fn try_attach(target: &Element, controller: CarouselController) -> Result<(), JsValue> {
        let Some(strip) = target
            .query_selector(&format!(".{STRIP_CLASS}"))?
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        else {
            return Ok(());
        };
        let state = Rc::new(RefCell::new(controller));

        for control in [NavControl::Prev, NavControl::Next] {
            let selector = format!(".{BUTTON_CLASS}.{}", control.class());
            let Some(button) = target.query_selector(&selector)? else {
                continue;
            };
            let state = Rc::clone(&state);
            let strip = strip.clone();
            let on_click = Closure::<dyn FnMut()>::new(move || {
                let transform = {
                    let mut carousel = state.borrow_mut();
                    carousel.press(control);
                    carousel.transform()
                };
                if let Err(err) = strip.style().set_property("transform", &transform) {
                    console::error_2(&"Testimania: could not move carousel".into(), &err);
                }
            });
            button.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
            // Handlers live as long as the page.
            on_click.forget();
        }
        Ok(())
    }

    fn log_dom_error(&self, action: &str, err: &JsValue) {
        tracing::error!(action, "dom operation failed");
        console::error_2(&format!("Testimania: could not {action}").into(), err);
    }
}

impl AttributeSource for BrowserHost {
    fn attribute(&self, name: &str) -> Option<String> {
        self.script.as_ref()?.get_attribute(name)
    }
}

impl Host for BrowserHost {
    fn has_render_target(&self) -> bool {
        self.target.is_some()
    }

    fn origin(&self) -> Option<String> {
        self.origin.clone()
    }

    fn inject_stylesheet(&mut self, sheet: &Stylesheet) {
        if let Err(err) = self.try_inject(sheet) {
            self.log_dom_error("inject styles", &err);
        }
    }

    fn set_target_classes(&mut self, classes: &[String]) {
        let Some(target) = &self.target else { return };
        let list = target.class_list();
        let stale: Vec<String> = (0..list.length())
            .filter_map(|i| list.item(i))
            .filter(|class| style::is_variant_class(class))
            .collect();
        for class in &stale {
            if let Err(err) = list.remove_1(class) {
                self.log_dom_error("set container classes", &err);
            }
        }
        for class in classes {
            if let Err(err) = list.add_1(class) {
                self.log_dom_error("set container classes", &err);
            }
        }
    }

    fn mount(&mut self, fragment: Fragment) {
        let Some(target) = &self.target else { return };
        if let Err(err) = self.try_mount(target, &fragment) {
            self.log_dom_error("render testimonials", &err);
        }
    }

    fn attach_carousel(&mut self, controller: CarouselController) {
        let Some(target) = &self.target else { return };
        if let Err(err) = Self::try_attach(target, controller) {
            self.log_dom_error("bind carousel controls", &err);
        }
    }

    fn report(&mut self, message: &str) {
        console::error_1(&message.into());
    }
}
