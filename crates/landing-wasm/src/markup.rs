#![forbid(unsafe_code)]

//! Views as element trees.
//!
//! [`render_markup`] turns a [`View`] into a small platform-neutral tree
//! that the browser host materializes into DOM nodes. Keeping this step
//! pure means the exact structure (class names, copy, iframe attributes)
//! is testable without a browser.

use landing_core::ViewportClass;
use landing_core::view::{ConfirmationView, EmbeddedView, Icon, LoadingView, View};

/// A node of the rendered tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: &'static str,
    /// Attributes in the order they are applied.
    pub attrs: Vec<(&'static str, String)>,
    pub children: Vec<Node>,
}

impl Element {
    fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    fn class(self, value: impl Into<String>) -> Self {
        self.attr("class", value)
    }

    fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    fn text(self, text: &str) -> Self {
        self.child(Node::Text(text.to_owned()))
    }

    /// Value of the first attribute called `name`.
    #[must_use]
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

impl Node {
    /// Concatenated text content, depth first.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Self::Text(text) => out.push_str(text),
            Self::Element(element) => {
                for child in &element.children {
                    child.collect_text(out);
                }
            }
        }
    }

    /// First element (depth first, self included) with tag `tag`.
    #[must_use]
    pub fn find_tag(&self, tag: &str) -> Option<&Element> {
        match self {
            Self::Text(_) => None,
            Self::Element(element) if element.tag == tag => Some(element),
            Self::Element(element) => element.children.iter().find_map(|c| c.find_tag(tag)),
        }
    }

    /// Serialize as HTML. Text and attribute values are escaped.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Self::Text(text) => escape_into(text, out),
            Self::Element(element) => {
                out.push('<');
                out.push_str(element.tag);
                for (name, value) in &element.attrs {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    escape_into(value, out);
                    out.push('"');
                }
                out.push('>');
                for child in &element.children {
                    child.write_html(out);
                }
                out.push_str("</");
                out.push_str(element.tag);
                out.push('>');
            }
        }
    }
}

fn escape_into(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
}

fn icon(icon: Icon) -> Element {
    Element::new("span")
        .class(format!("icon icon-{}", icon.name()))
        .attr("data-icon", icon.name())
        .attr("aria-hidden", "true")
}

/// Build the element tree for `view`.
#[must_use]
pub fn render_markup(view: &View) -> Node {
    match view {
        View::Loading(view) => loading(view),
        View::Confirming(view) => confirming(view),
        View::Embedded(view) => embedded(view),
    }
    .into()
}

fn loading(view: &LoadingView) -> Element {
    let fill = Element::new("div")
        .class("progress-fill")
        .attr("style", format!("width: {}%", view.percent));
    let content = Element::new("div")
        .class("landing-content")
        .child(icon(LoadingView::ICON))
        .child(Element::new("h1").text(LoadingView::HEADLINE))
        .child(Element::new("p").class("subtitle").text(LoadingView::SUBTITLE))
        .child(Element::new("div").class("progress-track").child(fill))
        .child(Element::new("div").class("caption").text(view.caption.text()));
    Element::new("div")
        .class("landing landing-loading")
        .child(content)
}

fn confirming(view: &ConfirmationView) -> Element {
    let mut detected = Element::new("div")
        .class(format!("detected detected-{}", view.class.as_str()))
        .child(Element::new("p").class("detected-line").text(view.copy.detected))
        .child(Element::new("p").class("detected-body").text(view.copy.body));
    if let Some(hint) = view.copy.hint {
        detected = detected.child(Element::new("p").class("detected-hint").text(hint));
    }

    let card = Element::new("div")
        .class("card entrance")
        .attr("data-class", view.class.as_str())
        .child(icon(view.copy.icon))
        .child(Element::new("h1").text(ConfirmationView::HEADING))
        .child(detected)
        .child(
            Element::new("div")
                .class("call-out")
                .text(ConfirmationView::CALL_OUT)
                .child(icon(Icon::ArrowRight)),
        )
        .child(Element::new("div").class("footer").text(ConfirmationView::FOOTER));

    let theme = match view.class {
        ViewportClass::Mobile => "landing landing-confirming theme-mobile",
        ViewportClass::Desktop => "landing landing-confirming theme-desktop",
    };
    Element::new("div").class(theme).child(card)
}

// `sandbox` goes on before `src` so the grant applies to the first load.
fn embedded(view: &EmbeddedView) -> Element {
    let frame = Element::new("iframe")
        .class("embedded-frame")
        .attr("sandbox", view.permissions.sandbox_attr())
        .attr("title", view.title)
        .attr("src", view.url.clone());
    Element::new("div").class("landing-embedded").child(frame)
}
