//! Markup fragment tree spliced into the host document in place of a URL

use markdown_it::{Node, NodeValue, Renderer};

/// An element with ordered attributes and ordered children
///
/// Builders return an owned fragment; callers extend it with
/// [`Fragment::push_child`] and [`Fragment::set_attr`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    tag: &'static str,
    attrs: Vec<(&'static str, String)>,
    children: Vec<Fragment>,
}

impl Fragment {
    /// Create an empty element
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder form of [`Fragment::set_attr`]
    pub fn with_attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Set an attribute, keeping its position if it already exists
    pub fn set_attr(&mut self, name: &'static str, value: impl Into<String>) {
        let value = value.into();
        match self.attrs.iter_mut().find(|(key, _)| *key == name) {
            Some((_, existing)) => *existing = value,
            None => self.attrs.push((name, value)),
        }
    }

    /// Append a child element after the existing ones
    pub fn push_child(&mut self, child: Fragment) {
        self.children.push(child);
    }

    pub fn tag(&self) -> &'static str {
        self.tag
    }

    pub fn attrs(&self) -> &[(&'static str, String)] {
        &self.attrs
    }

    /// Look up an attribute value by name
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn children(&self) -> &[Fragment] {
        &self.children
    }

    /// Write this element and its children through a markdown-it renderer
    ///
    /// The renderer escapes attribute values, so `&` in a `src` comes out as
    /// `&amp;`.
    pub fn render(&self, fmt: &mut dyn Renderer) {
        fmt.open(self.tag, &self.attrs);
        for child in &self.children {
            child.render(fmt);
        }
        fmt.close(self.tag);
    }

    /// Serialize this fragment on its own as HTML
    pub fn to_html(&self) -> String {
        Node::new(FragmentNode(self.clone())).render()
    }
}

/// Standalone node used to serialize a fragment outside a document
#[derive(Debug)]
struct FragmentNode(Fragment);

impl NodeValue for FragmentNode {
    fn render(&self, _node: &Node, fmt: &mut dyn Renderer) {
        self.0.render(fmt);
    }
}
