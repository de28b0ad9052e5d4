//! In-memory document and host for tests (feature `testing`).
//!
//! [`FakeDom`] is a small element tree with window state (scroll offset,
//! viewport width, path) and a notification log. Trees are built with
//! [`el`], and `set_inner_html` parses real fragment markup with `scraper`,
//! so loader output can be driven through the controller end to end.
//!
//! [`FakeHost`] plays the browser: it keeps the bindings a controller hands
//! out, dispatches events with bubbling, and queues deferred actions until
//! [`FakeHost::run_timers`] fires them.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::future::{Future, ready};
use std::rc::Rc;

use scraper::{ElementRef, Html};

use crate::contract::Query;
use crate::dom::Dom;
use crate::error::LoadError;
use crate::loader::{FetchResponse, Fetcher};
use crate::nav::{Action, Binding, Deferred, EventContext, EventKind, ListenTarget, NavController};

const ROOT: usize = 0;
const BODY: usize = 1;

/// Handle to a node of a [`FakeDom`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FakeNode(usize);

#[derive(Debug, Default)]
struct NodeData {
    /// `None` for text nodes
    tag: Option<String>,
    text: String,
    attrs: BTreeMap<String, String>,
    classes: Vec<String>,
    style: BTreeMap<String, String>,
    value: String,
    scroll_height: f64,
    parent: Option<usize>,
    children: Vec<usize>,
}

impl NodeData {
    fn element(tag: &str) -> Self {
        Self {
            tag: Some(tag.to_ascii_lowercase()),
            ..Default::default()
        }
    }

    fn text(text: &str) -> Self {
        Self {
            text: text.to_string(),
            ..Default::default()
        }
    }

    fn attr(&self, name: &str) -> Option<String> {
        match name {
            "class" if !self.classes.is_empty() => Some(self.classes.join(" ")),
            "class" => None,
            "style" if !self.style.is_empty() => Some(
                self.style
                    .iter()
                    .map(|(k, v)| format!("{k}: {v}"))
                    .collect::<Vec<_>>()
                    .join("; "),
            ),
            _ => self.attrs.get(name).cloned(),
        }
    }

    fn set_attr(&mut self, name: &str, value: &str) {
        match name {
            "class" => {
                self.classes = value.split_whitespace().map(str::to_string).collect();
            }
            "value" => {
                self.value = value.to_string();
                self.attrs.insert(name.to_string(), value.to_string());
            }
            _ => {
                self.attrs.insert(name.to_string(), value.to_string());
            }
        }
    }

    fn matches(&self, query: Query<'_>) -> bool {
        let Some(tag) = &self.tag else {
            return false;
        };
        match query {
            Query::Id(id) => self.attrs.get("id").is_some_and(|v| v == id),
            Query::Class(class) => self.classes.iter().any(|c| c == class),
            Query::Attr(attr) => self.attr(attr).is_some(),
            Query::AttrEq(attr, value) => self.attr(attr).is_some_and(|v| v == value),
            Query::Tag(t) => tag.eq_ignore_ascii_case(t),
            Query::TagAttrEq(t, attr, value) => {
                tag.eq_ignore_ascii_case(t) && self.attr(attr).is_some_and(|v| v == value)
            }
        }
    }
}

/// Builder for fake elements. Start with [`el`].
#[derive(Debug, Clone, Default)]
pub struct ElementSpec {
    tag: String,
    attrs: Vec<(String, String)>,
    text: Option<String>,
    scroll_height: f64,
    children: Vec<ElementSpec>,
}

/// New element spec with `tag`.
pub fn el(tag: &str) -> ElementSpec {
    ElementSpec {
        tag: tag.to_string(),
        ..Default::default()
    }
}

impl ElementSpec {
    /// Set `id`.
    pub fn id(self, id: &str) -> Self {
        self.attr("id", id)
    }

    /// Add a class.
    pub fn class(mut self, class: &str) -> Self {
        match self.attrs.iter_mut().find(|(k, _)| k == "class") {
            Some((_, value)) => {
                value.push(' ');
                value.push_str(class);
            }
            None => self.attrs.push(("class".into(), class.into())),
        }
        self
    }

    /// Set an attribute.
    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    /// Add a text child.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Natural content height reported by `scroll_height`.
    pub fn scroll_height(mut self, height: f64) -> Self {
        self.scroll_height = height;
        self
    }

    /// Add an element child.
    pub fn child(mut self, child: ElementSpec) -> Self {
        self.children.push(child);
        self
    }
}

#[derive(Debug)]
struct Tree {
    nodes: Vec<NodeData>,
}

impl Tree {
    fn new() -> Self {
        let mut root = NodeData::element("html");
        root.children.push(BODY);
        let mut body = NodeData::element("body");
        body.parent = Some(ROOT);
        Self {
            nodes: vec![root, body],
        }
    }

    fn push(&mut self, parent: usize, data: NodeData) -> usize {
        let id = self.nodes.len();
        let mut data = data;
        data.parent = Some(parent);
        self.nodes.push(data);
        self.nodes[parent].children.push(id);
        id
    }

    fn insert_spec(&mut self, parent: usize, spec: &ElementSpec) -> usize {
        let mut data = NodeData::element(&spec.tag);
        for (name, value) in &spec.attrs {
            data.set_attr(name, value);
        }
        data.scroll_height = spec.scroll_height;
        let id = self.push(parent, data);
        if let Some(text) = &spec.text {
            self.push(id, NodeData::text(text));
        }
        for child in &spec.children {
            self.insert_spec(id, child);
        }
        id
    }

    fn insert_children(&mut self, parent: usize, element: ElementRef<'_>) {
        for child in element.children() {
            if let Some(child_element) = ElementRef::wrap(child) {
                let mut data = NodeData::element(child_element.value().name());
                for (name, value) in child_element.value().attrs() {
                    data.set_attr(name, value);
                }
                let id = self.push(parent, data);
                self.insert_children(id, child_element);
            } else if let Some(text) = child.value().as_text() {
                self.push(parent, NodeData::text(text));
            }
        }
    }

    fn clear_children(&mut self, node: usize) {
        for child in std::mem::take(&mut self.nodes[node].children) {
            self.nodes[child].parent = None;
        }
    }

    /// Descendants of `node` in document order, excluding `node`.
    fn descendants(&self, node: usize) -> Vec<usize> {
        let mut out = Vec::new();
        let mut stack: Vec<usize> = self.nodes[node].children.iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.nodes[next].children.iter().rev().copied());
        }
        out
    }

    fn serialize(&self, node: usize, out: &mut String) {
        let data = &self.nodes[node];
        let Some(tag) = &data.tag else {
            out.push_str(&data.text);
            return;
        };
        out.push('<');
        out.push_str(tag);
        if let Some(class) = data.attr("class") {
            out.push_str(&format!(" class=\"{class}\""));
        }
        for (name, value) in &data.attrs {
            out.push_str(&format!(" {name}=\"{value}\""));
        }
        out.push('>');
        for &child in &data.children {
            self.serialize(child, out);
        }
        out.push_str(&format!("</{tag}>"));
    }
}

/// In-memory [`Dom`]. Clones share the same document.
#[derive(Debug, Clone)]
pub struct FakeDom {
    tree: Rc<RefCell<Tree>>,
    scroll_y: Rc<Cell<f64>>,
    width: Rc<Cell<f64>>,
    pathname: Rc<RefCell<String>>,
    notifications: Rc<RefCell<Vec<String>>>,
}

impl Default for FakeDom {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeDom {
    /// Empty document: `<html><body></body></html>` at `/index.html`, 375px wide.
    pub fn new() -> Self {
        Self {
            tree: Rc::new(RefCell::new(Tree::new())),
            scroll_y: Rc::new(Cell::new(0.0)),
            width: Rc::new(Cell::new(375.0)),
            pathname: Rc::new(RefCell::new("/index.html".into())),
            notifications: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Document with `html` parsed into `<body>`.
    pub fn from_body_html(html: &str) -> Self {
        let dom = Self::new();
        dom.set_inner_html(&FakeNode(BODY), html);
        dom
    }

    /// The `<body>` node.
    pub fn body_node(&self) -> FakeNode {
        FakeNode(BODY)
    }

    /// Append a built element under `parent`.
    pub fn append(&self, parent: &FakeNode, spec: ElementSpec) -> FakeNode {
        FakeNode(self.tree.borrow_mut().insert_spec(parent.0, &spec))
    }

    /// `node` and its ancestors, innermost first.
    pub fn ancestors(&self, node: &FakeNode) -> Vec<FakeNode> {
        let tree = self.tree.borrow();
        let mut out = vec![*node];
        let mut current = tree.nodes[node.0].parent;
        while let Some(parent) = current {
            out.push(FakeNode(parent));
            current = tree.nodes[parent].parent;
        }
        out
    }

    /// Serialized children of the element with `id`; empty if absent.
    pub fn inner_html_of(&self, id: &str) -> String {
        let Some(node) = self.find(Query::Id(id)) else {
            return String::new();
        };
        let tree = self.tree.borrow();
        let mut out = String::new();
        for &child in &tree.nodes[node.0].children {
            tree.serialize(child, &mut out);
        }
        out
    }

    /// Inline style property of `node`.
    pub fn style(&self, node: &FakeNode, property: &str) -> Option<String> {
        self.tree.borrow().nodes[node.0].style.get(property).cloned()
    }

    /// Set the natural height of `node`.
    pub fn set_scroll_height(&self, node: &FakeNode, height: f64) {
        self.tree.borrow_mut().nodes[node.0].scroll_height = height;
    }

    /// Set the vertical scroll offset.
    pub fn set_scroll_y(&self, y: f64) {
        self.scroll_y.set(y);
    }

    /// Set the viewport width.
    pub fn set_viewport_width(&self, width: f64) {
        self.width.set(width);
    }

    /// Set the location path.
    pub fn set_pathname(&self, path: &str) {
        *self.pathname.borrow_mut() = path.to_string();
    }

    /// Messages passed to `notify`, oldest first.
    pub fn notifications(&self) -> Vec<String> {
        self.notifications.borrow().clone()
    }

    fn is_attached(tree: &Tree, node: usize) -> bool {
        let mut current = node;
        loop {
            if current == ROOT {
                return true;
            }
            match tree.nodes[current].parent {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }
}

impl Dom for FakeDom {
    type Node = FakeNode;

    fn find_all(&self, query: Query<'_>) -> Vec<FakeNode> {
        let tree = self.tree.borrow();
        let mut out = Vec::new();
        if tree.nodes[ROOT].matches(query) {
            out.push(FakeNode(ROOT));
        }
        out.extend(
            tree.descendants(ROOT)
                .into_iter()
                .filter(|&n| tree.nodes[n].matches(query))
                .map(FakeNode),
        );
        out
    }

    fn find_within(&self, root: &FakeNode, query: Query<'_>) -> Vec<FakeNode> {
        let tree = self.tree.borrow();
        tree.descendants(root.0)
            .into_iter()
            .filter(|&n| tree.nodes[n].matches(query))
            .map(FakeNode)
            .collect()
    }

    fn closest(&self, node: &FakeNode, query: Query<'_>) -> Option<FakeNode> {
        let found = self.ancestors(node);
        let tree = self.tree.borrow();
        found.into_iter().find(|n| tree.nodes[n.0].matches(query))
    }

    fn contains(&self, ancestor: &FakeNode, node: &FakeNode) -> bool {
        self.ancestors(node).contains(ancestor)
    }

    fn body(&self) -> Option<FakeNode> {
        Some(FakeNode(BODY))
    }

    fn set_inner_html(&self, node: &FakeNode, html: &str) {
        let fragment = Html::parse_fragment(html);
        let mut tree = self.tree.borrow_mut();
        tree.clear_children(node.0);
        tree.insert_children(node.0, fragment.root_element());
    }

    fn has_class(&self, node: &FakeNode, class: &str) -> bool {
        self.tree.borrow().nodes[node.0]
            .classes
            .iter()
            .any(|c| c == class)
    }

    fn set_class(&self, node: &FakeNode, class: &str, on: bool) {
        let mut tree = self.tree.borrow_mut();
        let classes = &mut tree.nodes[node.0].classes;
        let present = classes.iter().any(|c| c == class);
        if on && !present {
            classes.push(class.to_string());
        } else if !on {
            classes.retain(|c| c != class);
        }
    }

    fn attribute(&self, node: &FakeNode, name: &str) -> Option<String> {
        self.tree.borrow().nodes[node.0].attr(name)
    }

    fn set_attribute(&self, node: &FakeNode, name: &str, value: &str) {
        self.tree.borrow_mut().nodes[node.0].set_attr(name, value);
    }

    fn remove_attribute(&self, node: &FakeNode, name: &str) {
        let mut tree = self.tree.borrow_mut();
        let data = &mut tree.nodes[node.0];
        if name == "class" {
            data.classes.clear();
        } else {
            data.attrs.remove(name);
        }
    }

    fn set_style(&self, node: &FakeNode, property: &str, value: &str) {
        self.tree.borrow_mut().nodes[node.0]
            .style
            .insert(property.to_string(), value.to_string());
    }

    fn scroll_height(&self, node: &FakeNode) -> f64 {
        let tree = self.tree.borrow();
        let data = &tree.nodes[node.0];
        // Like browsers, hidden elements measure zero.
        if data.style.get("display").is_some_and(|d| d == "none") || !Self::is_attached(&tree, node.0)
        {
            return 0.0;
        }
        data.scroll_height
    }

    fn value(&self, node: &FakeNode) -> String {
        self.tree.borrow().nodes[node.0].value.clone()
    }

    fn set_value(&self, node: &FakeNode, value: &str) {
        self.tree.borrow_mut().nodes[node.0].value = value.to_string();
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y.get()
    }

    fn viewport_width(&self) -> f64 {
        self.width.get()
    }

    fn pathname(&self) -> String {
        self.pathname.borrow().clone()
    }

    fn notify(&self, message: &str) {
        self.notifications.borrow_mut().push(message.to_string());
    }
}

/// [`Fetcher`] answering from a script. Unknown URLs fail as network errors.
#[derive(Debug, Default)]
pub struct ScriptedFetcher {
    routes: BTreeMap<String, Result<FetchResponse, String>>,
    requests: RefCell<Vec<String>>,
}

impl ScriptedFetcher {
    /// Fetcher with no routes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `url` with `status` and `body`.
    pub fn respond(mut self, url: &str, status: u16, body: &str) -> Self {
        self.routes.insert(
            url.to_string(),
            Ok(FetchResponse {
                status,
                body: body.to_string(),
            }),
        );
        self
    }

    /// Fail `url` with a network error.
    pub fn fail(mut self, url: &str, message: &str) -> Self {
        self.routes.insert(url.to_string(), Err(message.to_string()));
        self
    }

    /// URLs requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

impl Fetcher for ScriptedFetcher {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<FetchResponse, LoadError>> {
        self.requests.borrow_mut().push(url.to_string());
        let result = match self.routes.get(url) {
            Some(Ok(response)) => Ok(response.clone()),
            Some(Err(message)) => Err(LoadError::Network {
                url: url.to_string(),
                message: message.clone(),
            }),
            None => Err(LoadError::Network {
                url: url.to_string(),
                message: "no route".into(),
            }),
        };
        ready(result)
    }
}

/// Browser stand-in that dispatches events to a controller's bindings.
pub struct FakeHost {
    /// The controller under test
    pub controller: NavController<FakeDom>,
    bindings: Vec<Binding<FakeNode>>,
    timers: Vec<Deferred<FakeNode>>,
}

impl FakeHost {
    /// Host around `controller` with no bindings yet.
    pub fn new(controller: NavController<FakeDom>) -> Self {
        Self {
            controller,
            bindings: Vec::new(),
            timers: Vec::new(),
        }
    }

    /// The controller's document.
    pub fn dom(&self) -> FakeDom {
        self.controller.dom().clone()
    }

    /// Register bindings.
    pub fn bind(&mut self, bindings: Vec<Binding<FakeNode>>) {
        self.bindings.extend(bindings);
    }

    /// Drop every binding, as tearing down subscriptions would.
    pub fn unbind_all(&mut self) {
        self.bindings.clear();
    }

    /// Registered bindings.
    pub fn bindings(&self) -> &[Binding<FakeNode>] {
        &self.bindings
    }

    /// Pending deferred actions.
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Click `node`; returns whether default was prevented.
    pub fn click(&mut self, node: &FakeNode) -> bool {
        let path = self.dom().ancestors(node);
        let mut targets: Vec<ListenTarget<FakeNode>> =
            path.into_iter().map(ListenTarget::Element).collect();
        targets.push(ListenTarget::Document);
        targets.push(ListenTarget::Window);
        self.dispatch(&targets, EventKind::Click, EventContext::at(*node))
    }

    /// Submit `form`; returns whether default was prevented.
    pub fn submit(&mut self, form: &FakeNode) -> bool {
        let path = self.dom().ancestors(form);
        let mut targets: Vec<ListenTarget<FakeNode>> =
            path.into_iter().map(ListenTarget::Element).collect();
        targets.push(ListenTarget::Document);
        self.dispatch(&targets, EventKind::Submit, EventContext::at(*form))
    }

    /// Press `key` with focus on the body.
    pub fn key(&mut self, key: &str) {
        let targets = [ListenTarget::Document, ListenTarget::Window];
        self.dispatch(&targets, EventKind::KeyDown, EventContext::key(key));
    }

    /// Scroll the viewport to `y`.
    pub fn scroll_to(&mut self, y: f64) {
        self.dom().set_scroll_y(y);
        self.dispatch(&[ListenTarget::Window], EventKind::Scroll, EventContext::none());
    }

    /// Resize the viewport to `width`.
    pub fn resize(&mut self, width: f64) {
        self.dom().set_viewport_width(width);
        self.dispatch(&[ListenTarget::Window], EventKind::Resize, EventContext::none());
    }

    /// Fire every pending deferred action, in scheduling order.
    pub fn run_timers(&mut self) {
        for deferred in std::mem::take(&mut self.timers) {
            self.run(&deferred.action, &EventContext::none());
        }
    }

    fn dispatch(
        &mut self,
        targets: &[ListenTarget<FakeNode>],
        event: EventKind,
        context: EventContext<FakeNode>,
    ) -> bool {
        let mut prevented = false;
        for target in targets {
            let actions: Vec<Action<FakeNode>> = self
                .bindings
                .iter()
                .filter(|b| b.event == event && &b.target == target)
                .map(|b| b.action.clone())
                .collect();
            for action in actions {
                prevented |= self.run(&action, &context);
            }
        }
        prevented
    }

    fn run(&mut self, action: &Action<FakeNode>, context: &EventContext<FakeNode>) -> bool {
        let effects = self.controller.handle(action, context);
        self.timers.extend(effects.deferred);
        effects.prevent_default
    }
}
