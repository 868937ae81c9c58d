use std::collections::BTreeMap;
use std::time::Instant;

use super::controls::{ControlButton, Controls};
use super::events::{WindowCallbacks, WindowEvent};
use super::record::{GestureVisual, Surface, VisualState, WindowRecord};
use super::WindowId;
use crate::config::{ConfigError, WmConfig};
use crate::constants::DEFAULT_TITLE;
use crate::geometry::{Bounds, Geometry, Length, Point, Size};
use crate::icons::{IconResolver, ThemeIcons};
use crate::input::{PointerButton, PointerEvent, PointerKind};
use crate::layout::drag::{self, Cursor, DragHandle, DragState, ResizeHandle};
use crate::layout::hit_test::{HitTarget, hit_test_window};
use crate::layout::snap::{SnapOverlay, SnapZone, SnapZoneDetector};
use crate::style::StyleOverrides;

/// Everything needed to open a window.
pub struct WindowRequest<C> {
    pub title: Option<String>,
    pub icon: Option<String>,
    pub css: StyleOverrides,
    pub above: bool,
    pub buttons: Option<Vec<ControlButton>>,
    pub events: WindowCallbacks<C>,
    pub content: C,
}

impl<C> WindowRequest<C> {
    pub fn new(content: C) -> Self {
        Self {
            title: None,
            icon: None,
            css: StyleOverrides::default(),
            above: false,
            buttons: None,
            events: WindowCallbacks::default(),
            content,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn css(mut self, css: StyleOverrides) -> Self {
        self.css = css;
        self
    }

    pub fn above(mut self, above: bool) -> Self {
        self.above = above;
        self
    }

    pub fn buttons(mut self, buttons: impl IntoIterator<Item = ControlButton>) -> Self {
        self.buttons = Some(buttons.into_iter().collect());
        self
    }

    pub fn events(mut self, events: WindowCallbacks<C>) -> Self {
        self.events = events;
        self
    }
}

struct WindowEntry<C> {
    record: WindowRecord<C>,
    callbacks: WindowCallbacks<C>,
}

/// One visible window in paint order, as produced by
/// [`WindowManager::render_plan`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowDraw {
    pub id: WindowId,
    /// Absolute rectangle.
    pub rect: Bounds,
    pub visual: VisualState,
    pub gesture: GestureVisual,
    pub focused: bool,
    pub above: bool,
}

pub struct WindowManager<C> {
    config: WmConfig,
    container: Bounds,
    windows: BTreeMap<WindowId, WindowEntry<C>>,
    // bottom to top; above windows are lifted out of it at render time
    stack: Vec<WindowId>,
    focused: Option<WindowId>,
    last_id: u64,
    drag: Option<DragState>,
    detector: SnapZoneDetector,
    overlay: SnapOverlay,
    cursor: Option<Cursor>,
    no_select: bool,
    last_heading_press: Option<(WindowId, Instant)>,
    icons: Box<dyn IconResolver>,
}

impl<C> WindowManager<C> {
    pub fn new(container: Bounds) -> Self {
        let config = WmConfig::default();
        Self {
            detector: SnapZoneDetector::new(config.snap),
            config,
            container,
            windows: BTreeMap::new(),
            stack: Vec::new(),
            focused: None,
            last_id: 0,
            drag: None,
            overlay: SnapOverlay::default(),
            cursor: None,
            no_select: false,
            last_heading_press: None,
            icons: Box::new(ThemeIcons::default()),
        }
    }

    pub fn with_config(config: WmConfig, container: Bounds) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut wm = Self::new(container);
        wm.detector = SnapZoneDetector::new(config.snap);
        wm.config = config;
        Ok(wm)
    }

    pub fn set_icon_resolver(&mut self, icons: Box<dyn IconResolver>) {
        self.icons = icons;
    }

    pub fn config(&self) -> &WmConfig {
        &self.config
    }

    pub fn container(&self) -> Bounds {
        self.container
    }

    pub fn set_container(&mut self, container: Bounds) {
        self.container = container;
    }

    fn container_size(&self) -> Size {
        Size::new(self.container.width, self.container.height)
    }

    pub fn create_window(&mut self, request: WindowRequest<C>) -> WindowId {
        self.last_id += 1;
        let id = WindowId::new(self.last_id);

        let cascade = self
            .config
            .cascade_step
            .saturating_mul(i32::try_from(self.last_id).unwrap_or(i32::MAX));
        let mut geometry = Geometry {
            left: Some(Length::Px(cascade)),
            top: Some(Length::Px(cascade)),
            ..Geometry::default()
        };
        let attributes = request.css.apply(&mut geometry);
        let surface = Surface {
            geometry,
            attributes,
            ..Surface::default()
        };

        let title = request
            .title
            .filter(|title| !title.is_empty())
            .unwrap_or_else(|| DEFAULT_TITLE.to_string());
        let icon = self.icons.render_icon(request.icon.as_deref());
        let controls = request.buttons.map(Controls::new).unwrap_or_default();
        let record = WindowRecord::new(id, surface, title, icon, controls, request.content);
        tracing::debug!(window_id = %id, title = record.title(), above = request.above, "created window");

        self.windows.insert(
            id,
            WindowEntry {
                record,
                callbacks: request.events,
            },
        );
        self.stack.push(id);

        if request.above {
            self.window_above(id, None);
        } else {
            let others: Vec<WindowId> = self.ids().into_iter().filter(|w| *w != id).collect();
            for other in others {
                self.blur_window(other, None);
            }
            self.focus_window(id, None);
        }
        id
    }

    pub fn window(&self, id: WindowId) -> Option<&WindowRecord<C>> {
        self.windows.get(&id).map(|entry| &entry.record)
    }

    pub fn window_mut(&mut self, id: WindowId) -> Option<&mut WindowRecord<C>> {
        self.windows.get_mut(&id).map(|entry| &mut entry.record)
    }

    pub fn contains(&self, id: WindowId) -> bool {
        self.windows.contains_key(&id)
    }

    /// Ids in creation order.
    pub fn ids(&self) -> Vec<WindowId> {
        self.windows.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn title(&self, id: WindowId) -> Option<&str> {
        self.window(id).map(WindowRecord::title)
    }

    pub fn set_title(&mut self, id: WindowId, title: impl Into<String>) -> bool {
        match self.window_mut(id) {
            Some(record) => {
                record.set_title(title);
                true
            }
            None => false,
        }
    }

    pub fn focused(&self) -> Option<WindowId> {
        self.focused
    }

    pub fn is_focused(&self, id: WindowId) -> bool {
        self.focused == Some(id)
    }

    pub fn drag(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }

    /// Cursor the container should show while a resize is live.
    pub fn cursor(&self) -> Option<Cursor> {
        self.cursor
    }

    /// Whether text selection in the container should be suppressed.
    pub fn no_select(&self) -> bool {
        self.no_select
    }

    pub fn snap_overlay(&self) -> Option<SnapZone> {
        self.overlay.current()
    }

    /// Absolute rectangle a window would dock into if released now.
    pub fn snap_preview(&self) -> Option<Bounds> {
        self.overlay
            .current()
            .filter(SnapZone::is_dockable)
            .map(|zone| self.container.absolute(zone.dock_rect(self.container)))
    }

    /// Absolute rendered rectangle of a window.
    pub fn layout(&self, id: WindowId) -> Option<Bounds> {
        self.window(id)
            .map(|record| self.container.absolute(self.local_layout(record)))
    }

    fn local_layout(&self, record: &WindowRecord<C>) -> Bounds {
        record.layout(self.container, self.config.default_size)
    }

    fn emit(&mut self, id: WindowId, event: WindowEvent, input: Option<&PointerEvent>) {
        if let Some(entry) = self.windows.get_mut(&id) {
            let WindowEntry { record, callbacks } = entry;
            callbacks.dispatch(record, &event, input);
        }
    }

    fn is_above(&self, id: WindowId) -> bool {
        self.window(id).is_some_and(|record| record.flags.above)
    }

    fn raise(&mut self, id: WindowId) {
        if let Some(pos) = self.stack.iter().position(|w| *w == id) {
            let id = self.stack.remove(pos);
            self.stack.push(id);
        }
    }

    /// Give `id` the focus, blurring whichever window held it. Above windows
    /// never take focus.
    pub fn focus_window(&mut self, id: WindowId, input: Option<&PointerEvent>) -> bool {
        if !self.contains(id) || self.is_above(id) {
            return false;
        }
        self.raise(id);
        if self.focused == Some(id) {
            return true;
        }
        if let Some(previous) = self.focused {
            self.blur_window(previous, input);
        }
        self.focused = Some(id);
        self.emit(id, WindowEvent::Focus, input);
        true
    }

    pub fn blur_window(&mut self, id: WindowId, input: Option<&PointerEvent>) -> bool {
        if self.focused != Some(id) || self.is_above(id) {
            return false;
        }
        self.focused = None;
        self.emit(id, WindowEvent::Blur, input);
        true
    }

    /// Click-to-focus: blur every other window first, then focus `id`.
    pub fn click_window(&mut self, id: WindowId, input: Option<&PointerEvent>) {
        if !self.contains(id) {
            return;
        }
        let others: Vec<WindowId> = self.ids().into_iter().filter(|w| *w != id).collect();
        for other in others {
            self.blur_window(other, input);
        }
        self.raise(id);
        self.focus_window(id, input);
    }

    pub fn window_above(&mut self, id: WindowId, input: Option<&PointerEvent>) -> bool {
        if !self.contains(id) || self.is_above(id) {
            return false;
        }
        self.blur_window(id, input);
        if let Some(record) = self.window_mut(id) {
            record.flags.above = true;
        }
        self.raise(id);
        self.emit(id, WindowEvent::Above, input);
        true
    }

    pub fn window_below(&mut self, id: WindowId, input: Option<&PointerEvent>) -> bool {
        if !self.is_above(id) {
            return false;
        }
        if let Some(record) = self.window_mut(id) {
            record.flags.above = false;
        }
        self.emit(id, WindowEvent::Below, input);
        true
    }

    pub fn minimize(&mut self, id: WindowId, input: Option<&PointerEvent>) -> bool {
        match self.window_mut(id) {
            Some(record) if !record.flags.minimized => record.flags.minimized = true,
            _ => return false,
        }
        if self.drag.is_some_and(|drag| drag.window == id) {
            self.abort_gesture();
        }
        tracing::debug!(window_id = %id, "minimized window");
        self.emit(id, WindowEvent::Minimize { minimized: true }, input);
        if self.blur_window(id, input)
            && let Some(next) = self.topmost_focusable()
        {
            self.focus_window(next, input);
        }
        true
    }

    fn topmost_focusable(&self) -> Option<WindowId> {
        self.stack.iter().rev().copied().find(|id| {
            self.window(*id)
                .is_some_and(|record| !record.flags.above && !record.flags.minimized)
        })
    }

    /// Toggle button / heading double-click.
    ///
    /// A minimized window is restored (reported as `Minimize { minimized:
    /// false }`); otherwise the maximized flag flips. `Toggle` follows either
    /// way.
    pub fn toggle(&mut self, id: WindowId, input: Option<&PointerEvent>) -> bool {
        let Some(record) = self.window_mut(id) else {
            return false;
        };
        let event = if record.flags.minimized {
            record.flags.minimized = false;
            WindowEvent::Minimize { minimized: false }
        } else {
            let maximized = !record.flags.maximized;
            record.flags.maximized = maximized;
            record.controls.sync_toggle(maximized);
            WindowEvent::Maximize { maximized }
        };
        tracing::debug!(window_id = %id, ?event, "toggled window");
        self.emit(id, event, input);
        self.emit(id, WindowEvent::Toggle, input);
        true
    }

    pub fn close(&mut self, id: WindowId, input: Option<&PointerEvent>) -> bool {
        if !self.contains(id) {
            return false;
        }
        if self.drag.is_some_and(|drag| drag.window == id) {
            self.abort_gesture();
        }
        if self.last_heading_press.is_some_and(|(press, _)| press == id) {
            self.last_heading_press = None;
        }
        self.stack.retain(|w| *w != id);
        if self.focused == Some(id) {
            self.focused = None;
        }
        if let Some(mut entry) = self.windows.remove(&id) {
            tracing::debug!(window_id = %id, "closing window");
            entry
                .callbacks
                .dispatch(&entry.record, &WindowEvent::Close, input);
        }
        true
    }

    /// Press a control button. Buttons the window does not show are ignored.
    pub fn activate_control(
        &mut self,
        id: WindowId,
        button: ControlButton,
        input: Option<&PointerEvent>,
    ) -> bool {
        let offered = self
            .window(id)
            .is_some_and(|record| record.controls().has(button));
        if !offered {
            return false;
        }
        match button {
            ControlButton::Minimize => self.minimize(id, input),
            ControlButton::Toggle => self.toggle(id, input),
            ControlButton::Close => self.close(id, input),
        }
    }

    /// Visible windows bottom to top: normal windows in stacking order, then
    /// above windows.
    pub fn render_order(&self) -> Vec<WindowId> {
        let (above, normal): (Vec<WindowId>, Vec<WindowId>) =
            self.stack.iter().copied().partition(|id| self.is_above(*id));
        normal.into_iter().chain(above).collect()
    }

    pub fn render_plan(&self) -> Vec<WindowDraw> {
        self.render_order()
            .into_iter()
            .filter_map(|id| {
                let record = self.window(id)?;
                let visual = record.visual_state();
                if visual == VisualState::Hidden {
                    return None;
                }
                Some(WindowDraw {
                    id,
                    rect: self.container.absolute(self.local_layout(record)),
                    visual,
                    gesture: record.surface.gesture,
                    focused: self.focused == Some(id),
                    above: record.flags.above,
                })
            })
            .collect()
    }

    /// Topmost visible window under an absolute point and the part of it
    /// that was hit.
    pub fn hit_test(&self, point: Point) -> Option<(WindowId, HitTarget)> {
        self.render_plan().into_iter().rev().find_map(|draw| {
            let record = self.window(draw.id)?;
            hit_test_window(
                &self.config.chrome,
                draw.rect,
                record.controls.buttons(),
                draw.visual != VisualState::Maximized,
                point,
            )
            .map(|target| (draw.id, target))
        })
    }

    /// Route one pointer event. Returns whether the manager consumed it.
    pub fn handle_pointer(&mut self, event: &PointerEvent) -> bool {
        match event.kind {
            PointerKind::Down(button) => self.pointer_down(event, button),
            PointerKind::Move => self.pointer_move(event),
            PointerKind::Up(_) => self.pointer_up(event),
        }
    }

    fn pointer_down(&mut self, event: &PointerEvent, button: PointerButton) -> bool {
        if self.drag.is_some() {
            return true;
        }
        let Some((id, target)) = self.hit_test(event.position) else {
            return false;
        };
        self.click_window(id, Some(event));
        if button != PointerButton::Primary {
            return true;
        }
        match target {
            HitTarget::Control(control) => {
                self.last_heading_press = None;
                self.activate_control(id, control, Some(event));
            }
            HitTarget::Heading => {
                let interval = self.config.double_click_interval;
                let double = self.last_heading_press.is_some_and(|(prev_id, prev_at)| {
                    prev_id == id && event.at.saturating_duration_since(prev_at) <= interval
                });
                if double {
                    self.last_heading_press = None;
                    self.toggle(id, Some(event));
                } else {
                    self.last_heading_press = Some((id, event.at));
                    self.begin_move(id, event);
                }
            }
            HitTarget::Resize(handle) => {
                self.begin_resize(id, handle, event);
            }
            HitTarget::Content => {}
        }
        true
    }

    /// Start a move gesture on `id`. Refused while another gesture is live.
    pub fn begin_move(&mut self, id: WindowId, event: &PointerEvent) -> bool {
        if self.drag.is_some() {
            return false;
        }
        let Some(record) = self.window(id) else {
            return false;
        };
        if record.flags.minimized {
            return false;
        }
        let rect = self.local_layout(record);
        self.drag = Some(DragState {
            window: id,
            handle: DragHandle::Heading,
            pointer_origin: self.container.relative(event.position),
            window_origin: Point::new(rect.x, rect.y),
            start_rect: rect,
            start_geometry: record.surface.geometry,
            start_dock: record.surface.dock,
        });
        tracing::debug!(window_id = %id, x = rect.x, y = rect.y, "move started");
        self.emit(id, WindowEvent::MoveStart, Some(event));
        true
    }

    /// Start a resize gesture on `id` from `handle`.
    ///
    /// Switches the surface to the inset box model so every edge is pinned
    /// explicitly. Maximized and minimized windows cannot be resized.
    pub fn begin_resize(&mut self, id: WindowId, handle: ResizeHandle, event: &PointerEvent) -> bool {
        if self.drag.is_some() {
            return false;
        }
        let Some(record) = self.window(id) else {
            return false;
        };
        if record.flags.minimized || record.flags.maximized {
            return false;
        }
        let rect = self.local_layout(record);
        let size = self.container_size();
        let pointer_origin = self.container.relative(event.position);
        let Some(record) = self.window_mut(id) else {
            return false;
        };
        let drag = DragState {
            window: id,
            handle: DragHandle::Resize(handle),
            pointer_origin,
            window_origin: Point::new(rect.x, rect.y),
            start_rect: rect,
            start_geometry: record.surface.geometry,
            start_dock: record.surface.dock,
        };
        record.surface.geometry = Geometry::to_insets(rect, size);
        record.surface.dock = None;
        record.surface.gesture = GestureVisual::Resizing;
        self.drag = Some(drag);
        self.cursor = Some(handle.cursor());
        self.no_select = true;
        tracing::debug!(window_id = %id, handle = handle.name(), "resize started");
        true
    }

    fn pointer_move(&mut self, event: &PointerEvent) -> bool {
        let Some(drag) = self.drag else {
            return false;
        };
        if !self.contains(drag.window) {
            self.abort_gesture();
            return false;
        }
        let pointer = self.container.relative(event.position);
        match drag.handle {
            DragHandle::Heading => self.drag_move(drag, pointer, event),
            DragHandle::Resize(handle) => self.drag_resize(drag, handle, pointer, event),
        }
        true
    }

    fn drag_move(&mut self, drag: DragState, pointer: Point, event: &PointerEvent) {
        let id = drag.window;
        // a press that turned into a drag no longer counts toward a double-click
        self.last_heading_press = None;
        if self.window(id).is_some_and(|record| record.flags.maximized) {
            self.toggle(id, Some(event));
        }
        let origin = drag::move_origin(drag.window_origin, drag.delta(pointer));
        let container = self.container;
        let fallback = self.config.default_size;
        let Some(record) = self.window_mut(id) else {
            return;
        };
        let rect = record.layout(container, fallback);
        let geometry = &mut record.surface.geometry;
        geometry.right = None;
        geometry.bottom = None;
        geometry.width.get_or_insert(Length::Px(rect.width));
        geometry.height.get_or_insert(Length::Px(rect.height));
        geometry.left = Some(Length::Px(origin.x));
        geometry.top = Some(Length::Px(origin.y));
        record.surface.dock = None;
        record.surface.gesture = GestureVisual::Moving;
        tracing::trace!(window_id = %id, x = origin.x, y = origin.y, "moving");
        self.emit(id, WindowEvent::Move, Some(event));
        self.overlay
            .update(&self.detector, event.position, self.container);
    }

    fn drag_resize(
        &mut self,
        drag: DragState,
        handle: ResizeHandle,
        pointer: Point,
        event: &PointerEvent,
    ) {
        let rect = drag::resize_rect(
            drag.start_rect,
            handle,
            drag.delta(pointer),
            &self.config.resize,
        );
        let size = self.container_size();
        let Some(record) = self.window_mut(drag.window) else {
            return;
        };
        drag::apply_resize(&mut record.surface.geometry, handle, rect, size);
        tracing::trace!(window_id = %drag.window, width = rect.width, height = rect.height, "resizing");
        self.emit(drag.window, WindowEvent::Resize, Some(event));
    }

    fn pointer_up(&mut self, event: &PointerEvent) -> bool {
        let Some(drag) = self.drag.take() else {
            return false;
        };
        match drag.handle {
            DragHandle::Heading => self.finish_move(drag, event),
            DragHandle::Resize(_) => self.finish_resize(drag),
        }
        true
    }

    fn finish_move(&mut self, drag: DragState, event: &PointerEvent) {
        let id = drag.window;
        let zone = self.overlay.take_dockable();
        self.overlay.reset();
        let Some(record) = self.window_mut(id) else {
            return;
        };
        record.surface.gesture = GestureVisual::Idle;
        if let Some(zone) = zone {
            record.surface.dock = Some(zone);
            tracing::debug!(window_id = %id, ?zone, "docked window");
            self.emit(id, WindowEvent::Resize, Some(event));
        }
        self.emit(id, WindowEvent::MoveEnd, Some(event));
    }

    fn finish_resize(&mut self, drag: DragState) {
        self.cursor = None;
        self.no_select = false;
        if let Some(record) = self.window_mut(drag.window) {
            record.surface.gesture = GestureVisual::Idle;
        }
        tracing::debug!(window_id = %drag.window, "resize finished");
    }

    /// End the live gesture without committing it: the window returns to the
    /// geometry and dock zone it had when the gesture started.
    pub fn cancel_gesture(&mut self) -> bool {
        let Some(drag) = self.drag.take() else {
            return false;
        };
        self.overlay.reset();
        self.cursor = None;
        self.no_select = false;
        if let Some(record) = self.window_mut(drag.window) {
            record.surface.geometry = drag.start_geometry;
            record.surface.dock = drag.start_dock;
            record.surface.gesture = GestureVisual::Idle;
        }
        tracing::debug!(window_id = %drag.window, "gesture cancelled");
        if drag.is_move() {
            self.emit(drag.window, WindowEvent::MoveEnd, None);
        }
        true
    }

    // Drop gesture state without touching geometry or firing events.
    fn abort_gesture(&mut self) {
        if let Some(drag) = self.drag.take()
            && let Some(record) = self.window_mut(drag.window)
        {
            record.surface.gesture = GestureVisual::Idle;
        }
        self.overlay.reset();
        self.cursor = None;
        self.no_select = false;
    }
}
