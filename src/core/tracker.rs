use super::pose::{Pose, SectionDescriptor, FOOTER_ID, SECTIONS};
use smallvec::SmallVec;

/// Vertical extent of an element in document coordinates (pixels).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Span {
    pub top: f32,
    pub bottom: f32,
}

impl Span {
    pub fn new(top: f32, height: f32) -> Self {
        Self {
            top,
            bottom: top + height.max(0.0),
        }
    }
}

/// Where the scroll position sits relative to a trigger window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Before,
    Active,
    After,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriggerEvent {
    Enter,
    EnterBack,
    Leave,
    LeaveBack,
}

impl TriggerEvent {
    fn from_phases(prev: Phase, next: Phase) -> Option<Self> {
        match (prev, next) {
            (Phase::Before, Phase::Active) => Some(Self::Enter),
            (Phase::After, Phase::Active) => Some(Self::EnterBack),
            (Phase::Active, Phase::After) => Some(Self::Leave),
            (Phase::Active, Phase::Before) => Some(Self::LeaveBack),
            // Jumped over the whole window, or no change
            _ => None,
        }
    }
}

/// Scroll-position range `[start, end)` during which a trigger is active.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TriggerWindow {
    pub start: f32,
    pub end: f32,
}

impl TriggerWindow {
    /// Active while the element spans the vertical center of the viewport.
    pub fn centered(span: Span, viewport_height: f32) -> Self {
        let half = viewport_height * 0.5;
        Self {
            start: span.top - half,
            end: span.bottom - half,
        }
    }

    /// Active from the moment the element's top reaches the viewport bottom,
    /// with no end.
    pub fn from_viewport_bottom(span: Span, viewport_height: f32) -> Self {
        Self {
            start: span.top - viewport_height,
            end: f32::INFINITY,
        }
    }

    pub fn phase(&self, scroll_y: f32) -> Phase {
        if scroll_y < self.start {
            Phase::Before
        } else if scroll_y >= self.end {
            Phase::After
        } else {
            Phase::Active
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Trigger {
    window: Option<TriggerWindow>,
    phase: Phase,
}

impl Trigger {
    const UNRESOLVED: Self = Self {
        window: None,
        phase: Phase::Before,
    };

    fn advance(&mut self, scroll_y: f32) -> Option<TriggerEvent> {
        let window = self.window?;
        let next = window.phase(scroll_y);
        let ev = TriggerEvent::from_phases(self.phase, next);
        self.phase = next;
        ev
    }
}

/// Maps scroll position onto the fixed section table and reports the pose
/// of the section the visitor scrolls into.
///
/// The tracker is pure: the page feeds it layout via [`refresh`] and scroll
/// positions via [`update`], and it reports target poses through a callback.
///
/// [`refresh`]: SectionTracker::refresh
/// [`update`]: SectionTracker::update
pub struct SectionTracker {
    sections: &'static [SectionDescriptor],
    triggers: SmallVec<[Trigger; 8]>,
    footer: Trigger,
    current: Option<Pose>,
    missing: SmallVec<[&'static str; 8]>,
    pending_fallback: bool,
}

impl SectionTracker {
    pub fn new() -> Self {
        Self::with_sections(&SECTIONS)
    }

    pub fn with_sections(sections: &'static [SectionDescriptor]) -> Self {
        Self {
            sections,
            triggers: sections.iter().map(|_| Trigger::UNRESOLVED).collect(),
            footer: Trigger::UNRESOLVED,
            current: None,
            missing: SmallVec::new(),
            pending_fallback: false,
        }
    }

    /// Recompute trigger windows from the current layout. `resolve` returns
    /// the span of an anchor id, or `None` if it is not on the page.
    pub fn refresh(&mut self, viewport_height: f32, resolve: impl Fn(&str) -> Option<Span>) {
        self.missing.clear();
        let sections = self.sections;
        for (desc, trig) in sections.iter().zip(self.triggers.iter_mut()) {
            trig.window = resolve(desc.id).map(|s| TriggerWindow::centered(s, viewport_height));
            trig.phase = Phase::Before;
            if trig.window.is_none() {
                self.missing.push(desc.id);
            }
        }
        self.footer.window =
            resolve(FOOTER_ID).map(|s| TriggerWindow::from_viewport_bottom(s, viewport_height));
        // Windows moved; the next update re-derives every phase from scratch
        self.footer.phase = Phase::Before;
        if !self.missing.is_empty() {
            log::warn!("[tracker] missing section anchors: {:?}", self.missing);
        }
        self.pending_fallback = !self.missing.is_empty();
    }

    /// Section ids that did not resolve on the last refresh.
    pub fn missing(&self) -> &[&'static str] {
        &self.missing
    }

    /// Feed a scroll position. Invokes `on_pose` at most once, with the pose
    /// of the last section entered by this update.
    pub fn update(&mut self, scroll_y: f32, mut on_pose: impl FnMut(&Pose)) {
        if !scroll_y.is_finite() {
            return;
        }
        let footer_event = self.footer.advance(scroll_y);

        let mut entered: Option<Pose> = None;
        let sections = self.sections;
        for (desc, trig) in sections.iter().zip(self.triggers.iter_mut()) {
            if let Some(TriggerEvent::Enter | TriggerEvent::EnterBack) = trig.advance(scroll_y) {
                entered = Some(desc.pose());
            }
        }

        let pick = if self.footer.phase == Phase::Active {
            // Footer overrides every section while it is on screen
            (footer_event == Some(TriggerEvent::Enter)).then(Pose::neutral)
        } else {
            match (entered, footer_event) {
                (Some(p), _) => Some(p),
                (None, Some(TriggerEvent::LeaveBack)) => Some(self.last_section_pose()),
                (None, _) => None,
            }
        };

        let pick = match pick {
            Some(p) => Some(p),
            None if self.pending_fallback && self.current.is_none() => Some(Pose::fallback()),
            None => None,
        };
        self.pending_fallback = false;

        if let Some(pose) = pick {
            on_pose(&pose);
            self.current = Some(pose);
        }
    }

    /// The active target pose, if any has been emitted.
    pub fn current(&self) -> Option<&Pose> {
        self.current.as_ref()
    }

    /// Pose restored when scrolling back up out of the footer.
    pub fn last_section_pose(&self) -> Pose {
        self.sections
            .last()
            .map(SectionDescriptor::pose)
            .unwrap_or_else(Pose::fallback)
    }
}

impl Default for SectionTracker {
    fn default() -> Self {
        Self::new()
    }
}
