//! Labelled element tree.
//!
//! Views are pure projections of state into a small tree of elements that
//! carries exactly what a user (or a test) needs to locate things: tags,
//! accessible labels, test ids, disabled flags, text, and the id of the
//! thing an affordance acts on. Two renderings are provided: markup via
//! [`Display`](std::fmt::Display) and a plain-text layout for terminals.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Write as _};

/// Accessible role of an element, derived from its tag
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// A labelled `section`
    Region,
    /// `h1` through `h6`
    Heading,
    /// `form`
    Form,
    /// A text `input`
    TextBox,
    /// `button`
    Button,
    /// `ul` or `ol`
    List,
    /// `li`
    ListItem,
}

/// One node of a rendered view
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    /// Tag name (`section`, `form`, `button`, ...)
    pub tag: String,
    /// Accessible label (`aria-label`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Test identifier (`data-testid`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_id: Option<String>,
    /// Remaining attributes in declaration order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<(String, String)>,
    /// Whether the control rejects activation
    #[serde(default)]
    pub disabled: bool,
    /// Own text, rendered before children
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Identifier of the entity this control acts on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    /// Child elements
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Element>,
}

impl Element {
    /// Create an empty element with the given tag
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Set the accessible label
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the test identifier
    #[must_use]
    pub fn test_id(mut self, test_id: impl Into<String>) -> Self {
        self.test_id = Some(test_id.into());
        self
    }

    /// Append an attribute
    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Set the disabled flag
    #[must_use]
    pub const fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Set the element's own text
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set the id of the entity this control acts on
    #[must_use]
    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Append one child
    #[must_use]
    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Append several children
    #[must_use]
    pub fn children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(children);
        self
    }

    /// Look up an attribute by name
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Accessible role, if the tag has one
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        match self.tag.as_str() {
            "section" if self.label.is_some() => Some(Role::Region),
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => Some(Role::Heading),
            "form" => Some(Role::Form),
            "input" if matches!(self.attribute("type"), None | Some("text")) => {
                Some(Role::TextBox)
            },
            "button" => Some(Role::Button),
            "ul" | "ol" => Some(Role::List),
            "li" => Some(Role::ListItem),
            _ => None,
        }
    }

    /// Concatenated text of this element and all descendants
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        if let Some(text) = &self.text {
            out.push_str(text);
        }
        for child in &self.children {
            child.collect_text(out);
        }
    }

    /// Label if present, otherwise text content
    #[must_use]
    pub fn accessible_name(&self) -> String {
        self.label.clone().unwrap_or_else(|| self.text_content())
    }

    /// First element in pre-order (self included) matching the predicate
    pub fn find<P>(&self, predicate: P) -> Option<&Element>
    where
        P: Fn(&Element) -> bool,
    {
        self.find_ref(&predicate)
    }

    fn find_ref<P>(&self, predicate: &P) -> Option<&Element>
    where
        P: Fn(&Element) -> bool,
    {
        if predicate(self) {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find_ref(predicate))
    }

    /// Every element in pre-order (self included) matching the predicate
    pub fn find_all<P>(&self, predicate: P) -> Vec<&Element>
    where
        P: Fn(&Element) -> bool,
    {
        let mut found = Vec::new();
        self.collect_matching(&predicate, &mut found);
        found
    }

    fn collect_matching<'a, P>(&'a self, predicate: &P, found: &mut Vec<&'a Element>)
    where
        P: Fn(&Element) -> bool,
    {
        if predicate(self) {
            found.push(self);
        }
        for child in &self.children {
            child.collect_matching(predicate, found);
        }
    }

    /// Plain-text layout for terminals
    ///
    /// Headings get their own line, list items are numbered within their
    /// list, and buttons render as `[name]` (`[name: disabled]` when
    /// disabled).
    #[must_use]
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        self.write_block(&mut out, 0, None);
        out
    }

    fn write_block(&self, out: &mut String, depth: usize, ordinal: Option<usize>) {
        let indent = "  ".repeat(depth);
        match self.tag.as_str() {
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                let _ = writeln!(out, "{indent}{}", self.text_content());
            },
            "ul" | "ol" => {
                for (index, child) in self.children.iter().enumerate() {
                    child.write_block(out, depth + 1, Some(index + 1));
                }
            },
            "li" => {
                let number = ordinal.map(|n| format!("{n}. ")).unwrap_or_default();
                let _ = writeln!(out, "{indent}{number}{}", self.inline_children());
            },
            "form" => {
                let _ = writeln!(out, "{indent}> {}", self.inline_children());
            },
            _ if self.children.is_empty() => {
                let inline = self.inline();
                if !inline.is_empty() {
                    let _ = writeln!(out, "{indent}{inline}");
                }
            },
            _ => {
                for child in &self.children {
                    child.write_block(out, depth, None);
                }
            },
        }
    }

    fn inline_children(&self) -> String {
        self.children
            .iter()
            .map(Element::inline)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("  ")
    }

    fn inline(&self) -> String {
        match self.tag.as_str() {
            "button" => {
                let name = self.accessible_name();
                if self.disabled {
                    format!("[{name}: disabled]")
                } else {
                    format!("[{name}]")
                }
            },
            "input" => format!("{}_", self.attribute("value").unwrap_or_default()),
            _ => self.text_content(),
        }
    }

    fn write_html(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.tag)?;
        for (name, value) in &self.attributes {
            write!(f, " {name}=\"{}\"", escape(value))?;
        }
        if let Some(label) = &self.label {
            write!(f, " aria-label=\"{}\"", escape(label))?;
        }
        if let Some(test_id) = &self.test_id {
            write!(f, " data-testid=\"{}\"", escape(test_id))?;
        }
        if let Some(target) = &self.target {
            write!(f, " data-id=\"{}\"", escape(target))?;
        }
        if self.disabled {
            f.write_str(" disabled")?;
        }
        f.write_str(">")?;
        if is_void(&self.tag) {
            return Ok(());
        }
        if let Some(text) = &self.text {
            f.write_str(&escape(text))?;
        }
        for child in &self.children {
            child.write_html(f)?;
        }
        write!(f, "</{}>", self.tag)
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_html(f)
    }
}

fn is_void(tag: &str) -> bool {
    matches!(tag, "input" | "br" | "hr" | "img" | "meta" | "link")
}

fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
