use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement, HtmlTextAreaElement};

use crate::error::PageError;

pub trait TextField {
    fn value(&self) -> String;
    fn set_value(&self, value: &str);
}

pub trait Region {
    /// Hidden to visible. Revealing twice is harmless.
    fn reveal(&self);
}

pub trait HtmlTarget {
    fn set_html(&self, html: &str);
}

/// A form control with a text value.
#[derive(Clone, Debug)]
pub enum FormField {
    Input(HtmlInputElement),
    TextArea(HtmlTextAreaElement),
}

impl FormField {
    pub fn from_element(element: Element) -> Option<Self> {
        let element = match element.dyn_into::<HtmlTextAreaElement>() {
            Ok(area) => return Some(Self::TextArea(area)),
            Err(element) => element,
        };
        element.dyn_into::<HtmlInputElement>().ok().map(Self::Input)
    }

    pub fn html_element(&self) -> &HtmlElement {
        match self {
            Self::Input(input) => input.as_ref(),
            Self::TextArea(area) => area.as_ref(),
        }
    }
}

impl TextField for FormField {
    fn value(&self) -> String {
        match self {
            Self::Input(input) => input.value(),
            Self::TextArea(area) => area.value(),
        }
    }

    fn set_value(&self, value: &str) {
        match self {
            Self::Input(input) => input.set_value(value),
            Self::TextArea(area) => area.set_value(value),
        }
    }
}

#[derive(Clone, Debug)]
pub struct PageRegion(pub HtmlElement);

impl Region for PageRegion {
    fn reveal(&self) {
        let _ = self.0.style().set_property("display", "block");
    }
}

impl HtmlTarget for PageRegion {
    fn set_html(&self, html: &str) {
        self.0.set_inner_html(html);
    }
}

pub fn optional_field(document: &Document, id: &str) -> Option<FormField> {
    document
        .get_element_by_id(id)
        .and_then(FormField::from_element)
}

pub fn field(document: &Document, role: &'static str, id: &str) -> Result<FormField, PageError> {
    let element = document
        .get_element_by_id(id)
        .ok_or_else(|| PageError::MissingElement {
            role,
            id: id.to_string(),
        })?;
    FormField::from_element(element).ok_or_else(|| PageError::WrongElementType {
        role,
        id: id.to_string(),
        expected: "text field",
    })
}

pub fn region(document: &Document, role: &'static str, id: &str) -> Result<PageRegion, PageError> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| PageError::MissingElement {
            role,
            id: id.to_string(),
        })?
        .dyn_into::<HtmlElement>()
        .map(PageRegion)
        .map_err(|_| PageError::WrongElementType {
            role,
            id: id.to_string(),
            expected: "html element",
        })
}

#[cfg(test)]
pub(crate) mod memory {
    //! In-memory stand-ins for form fields and page regions.

    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use super::{HtmlTarget, Region, TextField};

    #[derive(Clone, Debug, Default)]
    pub struct MemoryField(Rc<RefCell<String>>);

    impl MemoryField {
        pub fn with_value(value: &str) -> Self {
            Self(Rc::new(RefCell::new(value.to_string())))
        }

        pub fn get(&self) -> String {
            self.0.borrow().clone()
        }
    }

    impl TextField for MemoryField {
        fn value(&self) -> String {
            self.get()
        }

        fn set_value(&self, value: &str) {
            *self.0.borrow_mut() = value.to_string();
        }
    }

    #[derive(Debug, Default)]
    struct RegionState {
        visible: Cell<bool>,
        html: RefCell<String>,
        writes: Cell<usize>,
    }

    #[derive(Clone, Debug, Default)]
    pub struct MemoryRegion(Rc<RegionState>);

    impl MemoryRegion {
        pub fn is_visible(&self) -> bool {
            self.0.visible.get()
        }

        pub fn html(&self) -> String {
            self.0.html.borrow().clone()
        }

        pub fn writes(&self) -> usize {
            self.0.writes.get()
        }
    }

    impl Region for MemoryRegion {
        fn reveal(&self) {
            self.0.visible.set(true);
        }
    }

    impl HtmlTarget for MemoryRegion {
        fn set_html(&self, html: &str) {
            *self.0.html.borrow_mut() = html.to_string();
            self.0.writes.set(self.0.writes.get() + 1);
        }
    }
}
