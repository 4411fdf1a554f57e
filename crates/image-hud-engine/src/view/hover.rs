use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::models::HudId;

/// What the host found on one element of the pointer target's ancestor chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementMarker {
    /// Inline mark over a reference span.
    LinkMark(HudId),
    /// A widget's container element.
    WidgetContainer(HudId),
    Other,
}

/// Which widget's controls are shown.
///
/// Written only by [`on_pointer_move`](Self::on_pointer_move); every widget
/// holds a visibility flag registered here. Flags of dropped widgets are
/// pruned on the next update.
#[derive(Debug, Default)]
pub struct HoverState {
    active: RefCell<Option<HudId>>,
    widgets: RefCell<Vec<(HudId, Weak<Cell<bool>>)>>,
}

impl HoverState {
    /// Registers a widget and returns its visibility flag.
    pub fn register(&self, id: HudId) -> Rc<Cell<bool>> {
        let visible = self.active.borrow().as_ref() == Some(&id);
        let flag = Rc::new(Cell::new(visible));
        self.widgets.borrow_mut().push((id, Rc::downgrade(&flag)));
        flag
    }

    /// Handles a pointer move. `path` runs from the event target outwards.
    ///
    /// The nearest reference mark wins, then the nearest widget container. No
    /// identity on the path hides every widget.
    pub fn on_pointer_move(&self, path: &[ElementMarker]) {
        let link = path.iter().find_map(|m| match m {
            ElementMarker::LinkMark(id) => Some(id),
            _ => None,
        });
        let container = path.iter().find_map(|m| match m {
            ElementMarker::WidgetContainer(id) => Some(id),
            _ => None,
        });

        match link.or(container) {
            Some(id) => self.show(id),
            None => self.hide_all(),
        }
    }

    /// Shows exactly the widgets registered under `id`.
    pub fn show(&self, id: &HudId) {
        *self.active.borrow_mut() = Some(id.clone());
        self.apply(|widget_id| widget_id == id);
    }

    pub fn hide_all(&self) {
        *self.active.borrow_mut() = None;
        self.apply(|_| false);
    }

    pub fn active(&self) -> Option<HudId> {
        self.active.borrow().clone()
    }

    /// Number of live registered widgets.
    pub fn tracked(&self) -> usize {
        self.widgets
            .borrow()
            .iter()
            .filter(|(_, flag)| flag.strong_count() > 0)
            .count()
    }

    fn apply(&self, visible: impl Fn(&HudId) -> bool) {
        self.widgets.borrow_mut().retain(|(widget_id, flag)| match flag.upgrade() {
            Some(flag) => {
                flag.set(visible(widget_id));
                true
            }
            None => false,
        });
    }
}
