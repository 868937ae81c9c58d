use std::collections::BTreeMap;
use std::fmt;

use crate::input::PointerEvent;
use crate::window::record::WindowRecord;

/// Lifecycle notification delivered to a window's handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    Focus,
    Blur,
    Above,
    Below,
    MoveStart,
    Move,
    MoveEnd,
    Resize,
    /// `minimized` is false when a toggle restored the window.
    Minimize { minimized: bool },
    Maximize { maximized: bool },
    Toggle,
    Close,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WindowEventKind {
    Focus,
    Blur,
    Above,
    Below,
    MoveStart,
    Move,
    MoveEnd,
    Resize,
    Minimize,
    Maximize,
    Toggle,
    Close,
}

impl WindowEvent {
    pub fn kind(&self) -> WindowEventKind {
        match self {
            WindowEvent::Focus => WindowEventKind::Focus,
            WindowEvent::Blur => WindowEventKind::Blur,
            WindowEvent::Above => WindowEventKind::Above,
            WindowEvent::Below => WindowEventKind::Below,
            WindowEvent::MoveStart => WindowEventKind::MoveStart,
            WindowEvent::Move => WindowEventKind::Move,
            WindowEvent::MoveEnd => WindowEventKind::MoveEnd,
            WindowEvent::Resize => WindowEventKind::Resize,
            WindowEvent::Minimize { .. } => WindowEventKind::Minimize,
            WindowEvent::Maximize { .. } => WindowEventKind::Maximize,
            WindowEvent::Toggle => WindowEventKind::Toggle,
            WindowEvent::Close => WindowEventKind::Close,
        }
    }
}

pub type WindowHandler<C> = Box<dyn FnMut(&WindowRecord<C>, &WindowEvent, Option<&PointerEvent>)>;

/// Per-window event handlers. Events without a handler are dropped.
pub struct WindowCallbacks<C> {
    handlers: BTreeMap<WindowEventKind, WindowHandler<C>>,
}

impl<C> Default for WindowCallbacks<C> {
    fn default() -> Self {
        Self {
            handlers: BTreeMap::new(),
        }
    }
}

impl<C> fmt::Debug for WindowCallbacks<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.handlers.keys()).finish()
    }
}

impl<C> WindowCallbacks<C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on<F>(mut self, kind: WindowEventKind, handler: F) -> Self
    where
        F: FnMut(&WindowRecord<C>, &WindowEvent, Option<&PointerEvent>) + 'static,
    {
        self.handlers.insert(kind, Box::new(handler));
        self
    }

    /// Register one handler for several kinds.
    pub fn on_each<F>(mut self, kinds: &[WindowEventKind], handler: F) -> Self
    where
        F: FnMut(&WindowRecord<C>, &WindowEvent, Option<&PointerEvent>) + Clone + 'static,
    {
        for kind in kinds {
            self.handlers.insert(*kind, Box::new(handler.clone()));
        }
        self
    }

    pub fn handles(&self, kind: WindowEventKind) -> bool {
        self.handlers.contains_key(&kind)
    }

    pub(crate) fn dispatch(
        &mut self,
        record: &WindowRecord<C>,
        event: &WindowEvent,
        input: Option<&PointerEvent>,
    ) {
        if let Some(handler) = self.handlers.get_mut(&event.kind()) {
            handler(record, event, input);
        }
    }
}
