//! A small typed view tree.
//!
//! Renderers build [`ViewNode`]s; [`super::html`] serializes them. The tree
//! also serializes to JSON so clients can consume it without parsing HTML.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "node", rename_all = "camelCase")]
pub enum ViewNode {
    Element(Element),
    Text { text: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Element {
    pub tag: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub styles: Vec<(String, String)>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attrs: Vec<(String, String)>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ViewNode>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            classes: Vec::new(),
            styles: Vec::new(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Add whitespace-separated class names.
    pub fn class(mut self, classes: &str) -> Self {
        self.classes
            .extend(classes.split_whitespace().map(str::to_string));
        self
    }

    pub fn class_if(self, cond: bool, classes: &str) -> Self {
        if cond {
            self.class(classes)
        } else {
            self
        }
    }

    pub fn style(mut self, property: &str, value: impl Into<String>) -> Self {
        self.styles.push((property.to_string(), value.into()));
        self
    }

    /// Add a declaration only when `value` is present.
    pub fn style_opt(self, property: &str, value: Option<&str>) -> Self {
        match value {
            Some(v) => self.style(property, v),
            None => self,
        }
    }

    pub fn styles(mut self, declarations: Vec<(&'static str, String)>) -> Self {
        self.styles
            .extend(declarations.into_iter().map(|(k, v)| (k.to_string(), v)));
        self
    }

    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attrs.push((name.to_string(), value.into()));
        self
    }

    /// Boolean attribute such as `controls` or `disabled`.
    pub fn flag(self, name: &str) -> Self {
        self.attr(name, "")
    }

    pub fn child(mut self, node: impl Into<ViewNode>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn child_opt(self, node: Option<impl Into<ViewNode>>) -> Self {
        match node {
            Some(n) => self.child(n),
            None => self,
        }
    }

    pub fn children<I, N>(mut self, nodes: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<ViewNode>,
    {
        self.children.extend(nodes.into_iter().map(Into::into));
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(ViewNode::text(text))
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn attr_value(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn style_value(&self, property: &str) -> Option<&str> {
        self.styles
            .iter()
            .find(|(k, _)| k == property)
            .map(|(_, v)| v.as_str())
    }
}

impl From<Element> for ViewNode {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

impl ViewNode {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(e) => Some(e),
            Self::Text { .. } => None,
        }
    }

    /// Concatenated text of this node and its descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Self::Text { text } => out.push_str(text),
            Self::Element(e) => e.children.iter().for_each(|c| c.collect_text(out)),
        }
    }

    /// Depth-first search for the first element matching `pred`.
    pub fn find(&self, pred: impl Fn(&Element) -> bool) -> Option<&Element> {
        self.find_with(&pred)
    }

    fn find_with<F: Fn(&Element) -> bool>(&self, pred: &F) -> Option<&Element> {
        let element = self.as_element()?;
        if pred(element) {
            return Some(element);
        }
        element.children.iter().find_map(|c| c.find_with(pred))
    }

    /// Every element matching `pred`, in document order.
    pub fn find_all(&self, pred: impl Fn(&Element) -> bool) -> Vec<&Element> {
        let mut found = Vec::new();
        self.collect_matching(&pred, &mut found);
        found
    }

    fn collect_matching<'a, F: Fn(&Element) -> bool>(
        &'a self,
        pred: &F,
        found: &mut Vec<&'a Element>,
    ) {
        if let Self::Element(e) = self {
            if pred(e) {
                found.push(e);
            }
            for child in &e.children {
                child.collect_matching(pred, found);
            }
        }
    }

    pub fn find_by_attr(&self, name: &str, value: &str) -> Option<&Element> {
        self.find(|e| e.attr_value(name) == Some(value))
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.text_content().contains(needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_collects_classes_and_children() {
        let node: ViewNode = Element::new("div")
            .class("flex  flex-col")
            .class_if(false, "hidden")
            .attr("data-role", "root")
            .child(Element::new("p").text("Hello"))
            .text(" world")
            .into();

        let root = node.as_element().unwrap();
        assert_eq!(root.classes, vec!["flex", "flex-col"]);
        assert_eq!(node.text_content(), "Hello world");
        assert!(node.find(|e| e.tag == "p").is_some());
        assert_eq!(
            node.find_by_attr("data-role", "root").map(|e| e.tag),
            Some("div")
        );
    }
}
