#![forbid(unsafe_code)]

//! [`ElementTree`] over the live browser DOM.

use formcue_core::{ElementTree, Selector};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

const DATA_PREFIX: &str = "data-";

/// Browser document binding. Nodes are `web_sys::Element` handles.
#[derive(Debug, Clone)]
pub struct WebDom {
    document: Document,
}

impl WebDom {
    /// Bind to the window's document. `None` outside a window context.
    #[must_use]
    pub fn from_window() -> Option<Self> {
        let document = web_sys::window()?.document()?;
        Some(Self { document })
    }

    #[must_use]
    pub fn with_document(document: Document) -> Self {
        Self { document }
    }

    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }
}

fn html(node: &Element) -> Option<&HtmlElement> {
    node.dyn_ref::<HtmlElement>()
}

impl ElementTree for WebDom {
    type Node = Element;

    fn create_element(&mut self, tag: &str) -> Option<Element> {
        self.document.create_element(tag).ok()
    }

    fn append_child(&mut self, parent: &Element, child: &Element) {
        if let Err(err) = parent.append_child(child) {
            formcue_core::trace!(?err, "append_child rejected by the document");
        }
    }

    fn remove(&mut self, node: &Element) {
        node.remove();
    }

    fn tag_name(&self, node: &Element) -> String {
        node.tag_name().to_ascii_lowercase()
    }

    fn class_name(&self, node: &Element) -> String {
        node.class_name()
    }

    fn add_class(&mut self, node: &Element, class_list: &str) {
        let classes = node.class_list();
        for class in class_list.split_whitespace() {
            if let Err(err) = classes.add_1(class) {
                formcue_core::trace!(?err, class, "classList.add rejected");
            }
        }
    }

    fn remove_class(&mut self, node: &Element, class_list: &str) {
        let classes = node.class_list();
        for class in class_list.split_whitespace() {
            if let Err(err) = classes.remove_1(class) {
                formcue_core::trace!(?err, class, "classList.remove rejected");
            }
        }
    }

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn set_text(&mut self, node: &Element, text: &str) {
        node.set_text_content(Some(text));
    }

    fn text(&self, node: &Element) -> String {
        node.text_content().unwrap_or_default()
    }

    fn parent(&self, node: &Element) -> Option<Element> {
        node.parent_element()
    }

    fn children(&self, node: &Element) -> Vec<Element> {
        let collection = node.children();
        (0..collection.length())
            .filter_map(|i| collection.item(i))
            .collect()
    }

    fn style(&self, node: &Element, property: &str) -> Option<String> {
        html(node)?
            .style()
            .get_property_value(property)
            .ok()
            .filter(|value| !value.is_empty())
    }

    fn set_style(&mut self, node: &Element, property: &str, value: Option<&str>) {
        let Some(element) = html(node) else {
            return;
        };
        let style = element.style();
        let result = match value {
            Some(value) => style.set_property(property, value),
            None => style.remove_property(property).map(drop),
        };
        if let Err(err) = result {
            formcue_core::trace!(?err, property, "style update rejected");
        }
    }

    fn data(&self, node: &Element, key: &str) -> Option<String> {
        node.get_attribute(&format!("{DATA_PREFIX}{key}"))
    }

    fn set_data(&mut self, node: &Element, key: &str, value: &str) {
        if let Err(err) = node.set_attribute(&format!("{DATA_PREFIX}{key}"), value) {
            formcue_core::trace!(?err, key, "data attribute rejected");
        }
    }

    fn find_descendants(&self, node: &Element, selector: &Selector) -> Vec<Element> {
        let Ok(list) = node.query_selector_all(&selector.to_string()) else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|found| found.dyn_into::<Element>().ok())
            .collect()
    }
}
