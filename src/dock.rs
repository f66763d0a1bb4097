use crate::constants::{DOCK_HIDDEN_CLASS, DOCK_ID, LABEL_VISIBLE_CLASS};
use crate::core::dock::{DockAction, DockConfig, DockItem, DockState};
use crate::core::mascot::MascotKind;
use crate::subscription::Listener;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

struct ItemView {
    el: web::HtmlElement,
    label: web::HtmlElement,
    action: DockAction,
}

/// DOM side of the dock: one element per item, sized from [`DockState`].
pub struct DockView {
    root: web::HtmlElement,
    panel: web::HtmlElement,
    items: Vec<ItemView>,
    state: DockState,
    visible: bool,
}

fn create_html(document: &web::Document, tag: &str, class: &str) -> anyhow::Result<web::HtmlElement> {
    let el = document
        .create_element(tag)
        .map_err(|e| anyhow::anyhow!("create {}: {:?}", tag, e))?
        .dyn_into::<web::HtmlElement>()
        .map_err(|_| anyhow::anyhow!("{} is not an HtmlElement", tag))?;
    el.set_class_name(class);
    Ok(el)
}

impl DockView {
    /// Build the dock under `#dock` from the page-supplied items.
    pub fn build(document: &web::Document, items: &[DockItem], cfg: DockConfig) -> anyhow::Result<Self> {
        let root = document
            .get_element_by_id(DOCK_ID)
            .ok_or_else(|| anyhow::anyhow!("#{} not found", DOCK_ID))?
            .dyn_into::<web::HtmlElement>()
            .map_err(|_| anyhow::anyhow!("#{} is not an HtmlElement", DOCK_ID))?;
        root.set_inner_html("");
        let panel = create_html(document, "div", "dock-panel")?;
        _ = panel.set_attribute("role", "toolbar");
        _ = panel.set_attribute("aria-label", "Application dock");

        let mut views = Vec::with_capacity(items.len());
        for item in items {
            let el = create_html(document, "div", "dock-item")?;
            _ = el.set_attribute("role", "button");
            _ = el.set_attribute("tabindex", "0");
            _ = el.set_attribute("aria-label", &item.label);
            let icon = create_html(document, "span", "dock-icon")?;
            icon.set_inner_html(item.icon);
            let label = create_html(document, "span", "dock-label")?;
            _ = label.set_attribute("role", "tooltip");
            label.set_inner_text(&item.label);
            _ = el.append_child(&icon);
            _ = el.append_child(&label);
            _ = panel.append_child(&el);
            views.push(ItemView {
                el,
                label,
                action: item.action,
            });
        }
        _ = root.append_child(&panel);

        let mut view = Self {
            root,
            panel,
            state: DockState::new(cfg, views.len()),
            items: views,
            visible: true,
        };
        view.apply(0.0);
        view.measure();
        Ok(view)
    }

    pub fn config(&self) -> &DockConfig {
        self.state.config()
    }

    /// Take item anchors from the live layout.
    pub fn measure(&mut self) {
        let half = self.state.config().base_size / 2.0;
        let lefts: Vec<f32> = self
            .items
            .iter()
            .map(|item| {
                let rect = item.el.get_bounding_client_rect();
                (rect.left() + rect.width() / 2.0) as f32 - half
            })
            .collect();
        self.state.set_anchors(lefts);
    }

    pub fn set_pointer(&mut self, client_x: f32) {
        self.measure();
        self.state.set_pointer(client_x);
    }

    pub fn clear_pointer(&mut self) {
        self.state.clear_pointer();
    }

    /// Advance the size springs and write sizes to the DOM.
    pub fn apply(&mut self, dt_sec: f32) {
        self.state.step(dt_sec);
        for (item, size) in self.items.iter().zip(self.state.sizes()) {
            let px = format!("{:.2}px", size);
            let style = item.el.style();
            _ = style.set_property("width", &px);
            _ = style.set_property("height", &px);
        }
        _ = self
            .root
            .style()
            .set_property("height", &format!("{:.2}px", self.state.height()));
        _ = self.panel.style().set_property(
            "height",
            &format!("{:.2}px", self.state.config().panel_height),
        );
    }

    pub fn set_visible(&mut self, visible: bool) {
        if visible == self.visible {
            return;
        }
        self.visible = visible;
        let classes = self.root.class_list();
        _ = if visible {
            classes.remove_1(DOCK_HIDDEN_CLASS)
        } else {
            classes.add_1(DOCK_HIDDEN_CLASS)
        };
        _ = self
            .root
            .set_attribute("aria-hidden", if visible { "false" } else { "true" });
    }

    /// Relabel the mascot toggle so it names the variant it switches to.
    pub fn set_toggle_label(&self, current: MascotKind) {
        let text = current.switch_label();
        for item in self.items.iter().filter(|i| i.action == DockAction::ToggleMascot) {
            item.label.set_inner_text(&text);
            _ = item.el.set_attribute("aria-label", &text);
        }
    }
}

fn set_label_visible(label: &web::HtmlElement, visible: bool) {
    let classes = label.class_list();
    _ = if visible {
        classes.add_1(LABEL_VISIBLE_CLASS)
    } else {
        classes.remove_1(LABEL_VISIBLE_CLASS)
    };
}

/// Hover tracking, labels and activation for every item. `on_action` runs
/// the item's bound action.
pub fn wire_dock(view: &Rc<RefCell<DockView>>, on_action: Rc<dyn Fn(DockAction)>) -> Vec<Listener> {
    let mut listeners = Vec::new();
    let (panel, items): (web::HtmlElement, Vec<(web::HtmlElement, web::HtmlElement, DockAction)>) = {
        let v = view.borrow();
        (
            v.panel.clone(),
            v.items
                .iter()
                .map(|i| (i.el.clone(), i.label.clone(), i.action))
                .collect(),
        )
    };

    let v = view.clone();
    listeners.push(Listener::new(panel.as_ref(), "pointermove", move |ev: web::PointerEvent| {
        v.borrow_mut().set_pointer(ev.client_x() as f32);
    }));
    let v = view.clone();
    listeners.push(Listener::new(panel.as_ref(), "pointerleave", move |_: web::PointerEvent| {
        v.borrow_mut().clear_pointer();
    }));

    for (el, label, action) in items {
        for (event, show) in [("mouseenter", true), ("focus", true), ("mouseleave", false), ("blur", false)] {
            let label = label.clone();
            listeners.push(Listener::new(el.as_ref(), event, move |_: web::Event| {
                set_label_visible(&label, show);
            }));
        }
        let run = on_action.clone();
        listeners.push(Listener::new(el.as_ref(), "click", move |_: web::MouseEvent| run(action)));
        let run = on_action.clone();
        listeners.push(Listener::new(el.as_ref(), "keydown", move |ev: web::KeyboardEvent| {
            if matches!(ev.key().as_str(), "Enter" | " ") {
                ev.prevent_default();
                ev.stop_propagation();
                run(action);
            }
        }));
    }
    listeners
}
