//! In-memory collaborators for testing and headless use.

use super::{
    BoxFuture, EditorHost, Listener, OverlaySurface, Platform, PlatformResult, Subscription,
    TimerId,
};
use crate::overlay::HandleKind;
use crate::selection::{EditRange, HitTarget, Position, SelectionSnapshot, WordRange};
use kurbo::{Point, Rect};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

/// Character cell width of [`MemoryEditor`] in pixels.
pub const MEMORY_CHAR_WIDTH: f64 = 10.0;
/// Line height of [`MemoryEditor`] in pixels.
pub const MEMORY_LINE_HEIGHT: f64 = 20.0;

#[derive(Default)]
struct ListenerTable {
    next_id: u64,
    entries: Vec<(u64, Listener)>,
}

/// Listener registry that tolerates (un)subscribing from inside a callback.
#[derive(Default)]
struct ListenerSet {
    table: Rc<RefCell<ListenerTable>>,
}

impl ListenerSet {
    fn subscribe(&self, listener: Listener) -> Subscription {
        let id = {
            let mut table = self.table.borrow_mut();
            table.next_id += 1;
            let id = table.next_id;
            table.entries.push((id, listener));
            id
        };
        let table = Rc::downgrade(&self.table);
        Subscription::new(move || {
            if let Some(table) = table.upgrade() {
                table.borrow_mut().entries.retain(|(entry, _)| *entry != id);
            }
        })
    }

    fn notify(&self) {
        let listeners: Vec<Listener> = self
            .table
            .borrow()
            .entries
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in listeners {
            listener();
        }
    }

    fn len(&self) -> usize {
        self.table.borrow().entries.len()
    }
}

/// An edit applied through [`EditorHost::apply_edit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditRecord {
    pub range: EditRange,
    pub text: String,
    pub move_markers: bool,
}

/// A monospaced in-memory editor widget.
///
/// Text is laid out on a fixed character grid inside `viewport`, shifted up by
/// the scroll offset. Change notifications fire synchronously from inside the
/// mutating call, the way the browser widget behaves.
pub struct MemoryEditor {
    lines: RefCell<Vec<String>>,
    selection: Cell<Option<SelectionSnapshot>>,
    scroll_top: Cell<f64>,
    viewport: Rect,
    edits: RefCell<Vec<EditRecord>>,
    focus_count: Cell<u32>,
    context_menu_count: Cell<u32>,
    selection_listeners: ListenerSet,
    scroll_listeners: ListenerSet,
    content_listeners: ListenerSet,
}

impl MemoryEditor {
    /// Create an editor holding `text`, with the cursor at the document start.
    pub fn new(text: &str) -> Self {
        Self {
            lines: RefCell::new(text.split('\n').map(str::to_string).collect()),
            selection: Cell::new(Some(SelectionSnapshot::cursor(Position::new(1, 1)))),
            scroll_top: Cell::new(0.0),
            viewport: Rect::new(0.0, 0.0, 400.0, 600.0),
            edits: RefCell::new(Vec::new()),
            focus_count: Cell::new(0),
            context_menu_count: Cell::new(0),
            selection_listeners: ListenerSet::default(),
            scroll_listeners: ListenerSet::default(),
            content_listeners: ListenerSet::default(),
        }
    }

    /// Set the on-screen area the text is laid out in.
    pub fn with_viewport(mut self, viewport: Rect) -> Self {
        self.viewport = viewport;
        self
    }

    /// Full document text.
    pub fn text(&self) -> String {
        self.lines.borrow().join("\n")
    }

    /// Text of a 1-based line.
    pub fn line(&self, line: u32) -> Option<String> {
        let index = line.checked_sub(1)? as usize;
        self.lines.borrow().get(index).cloned()
    }

    /// Scroll so that `top` pixels of content are above the viewport.
    pub fn scroll_to(&self, top: f64) {
        self.scroll_top.set(top.max(0.0));
        self.scroll_listeners.notify();
    }

    pub fn scroll_top(&self) -> f64 {
        self.scroll_top.get()
    }

    /// Every edit applied so far.
    pub fn edits(&self) -> Vec<EditRecord> {
        self.edits.borrow().clone()
    }

    pub fn focus_count(&self) -> u32 {
        self.focus_count.get()
    }

    pub fn context_menu_count(&self) -> u32 {
        self.context_menu_count.get()
    }

    /// Number of live notification subscriptions.
    pub fn listener_count(&self) -> usize {
        self.selection_listeners.len() + self.scroll_listeners.len() + self.content_listeners.len()
    }

    /// Replace the selection without notifying listeners.
    pub fn set_selection_silently(&self, selection: Option<SelectionSnapshot>) {
        self.selection.set(selection);
    }

    fn notify_selection(&self) {
        self.selection_listeners.notify();
    }
}

/// Word token touching `column`: the character under the caret or the one
/// just before it.
fn word_at(text: &str, column: u32) -> Option<WordRange> {
    let chars: Vec<char> = text.chars().collect();
    let is_word = |c: char| c.is_alphanumeric() || c == '_';
    let index = column.saturating_sub(1) as usize;

    let seed = if index < chars.len() && is_word(chars[index]) {
        index
    } else if index > 0 && index <= chars.len() && is_word(chars[index - 1]) {
        index - 1
    } else {
        return None;
    };

    let mut start = seed;
    while start > 0 && is_word(chars[start - 1]) {
        start -= 1;
    }
    let mut end = seed + 1;
    while end < chars.len() && is_word(chars[end]) {
        end += 1;
    }
    Some(WordRange::new(start as u32 + 1, end as u32 + 1))
}

/// Where the cursor lands after inserting `text` at `start`.
fn end_of_insert(start: Position, text: &str) -> Position {
    let newlines = text.matches('\n').count() as u32;
    let last_segment = text.rsplit('\n').next().unwrap_or("");
    let width = last_segment.chars().count() as u32;
    if newlines == 0 {
        Position::new(start.line, start.column + width)
    } else {
        Position::new(start.line + newlines, width + 1)
    }
}

impl EditorHost for MemoryEditor {
    fn selection(&self) -> Option<SelectionSnapshot> {
        self.selection.get()
    }

    fn position_to_screen(&self, position: Position) -> Option<Point> {
        let row = position.line.saturating_sub(1) as f64;
        let y = self.viewport.y0 + row * MEMORY_LINE_HEIGHT - self.scroll_top.get();
        if y < self.viewport.y0 || y >= self.viewport.y1 {
            return None;
        }
        let x = self.viewport.x0 + position.column.saturating_sub(1) as f64 * MEMORY_CHAR_WIDTH;
        Some(Point::new(x, y))
    }

    fn hit_test(&self, point: Point) -> Option<HitTarget> {
        if !self.viewport.contains(point) {
            return None;
        }
        let row = ((point.y - self.viewport.y0 + self.scroll_top.get()) / MEMORY_LINE_HEIGHT).floor();
        let lines = self.lines.borrow();
        if row < 0.0 || row as usize >= lines.len() {
            return None;
        }
        let text = &lines[row as usize];
        let max_column = text.chars().count() as u32 + 1;
        let column = (((point.x - self.viewport.x0) / MEMORY_CHAR_WIDTH).round() as u32 + 1).min(max_column);
        Some(HitTarget {
            position: Position::new(row as u32 + 1, column),
            word: word_at(text, column),
        })
    }

    fn set_selection(&self, selection: SelectionSnapshot) {
        if self.selection.replace(Some(selection)) == Some(selection) {
            return;
        }
        self.notify_selection();
    }

    fn set_cursor(&self, position: Position) {
        self.set_selection(SelectionSnapshot::cursor(position));
    }

    fn apply_edit(&self, range: EditRange, text: &str, move_markers: bool) {
        {
            let mut lines = self.lines.borrow_mut();
            let start_index = range.start.line.saturating_sub(1) as usize;
            let end_index = range.end.line.saturating_sub(1) as usize;
            if end_index >= lines.len() {
                log::warn!("Edit range {:?} is outside the document", range);
                return;
            }
            let prefix: String = lines[start_index]
                .chars()
                .take(range.start.column.saturating_sub(1) as usize)
                .collect();
            let suffix: String = lines[end_index]
                .chars()
                .skip(range.end.column.saturating_sub(1) as usize)
                .collect();
            let replaced = format!("{prefix}{text}{suffix}");
            let new_lines: Vec<String> = replaced.split('\n').map(str::to_string).collect();
            lines.splice(start_index..=end_index, new_lines);
        }

        self.edits.borrow_mut().push(EditRecord {
            range,
            text: text.to_string(),
            move_markers,
        });
        self.content_listeners.notify();

        let cursor = if move_markers {
            end_of_insert(range.start, text)
        } else {
            range.start
        };
        self.set_cursor(cursor);
    }

    fn line_height(&self) -> f64 {
        MEMORY_LINE_HEIGHT
    }

    fn focus(&self) {
        self.focus_count.set(self.focus_count.get() + 1);
    }

    fn trigger_context_menu(&self) {
        self.context_menu_count.set(self.context_menu_count.get() + 1);
    }

    fn on_selection_changed(&self, listener: Listener) -> Subscription {
        self.selection_listeners.subscribe(listener)
    }

    fn on_scroll_changed(&self, listener: Listener) -> Subscription {
        self.scroll_listeners.subscribe(listener)
    }

    fn on_content_changed(&self, listener: Listener) -> Subscription {
        self.content_listeners.subscribe(listener)
    }
}

/// Records what the overlay last rendered.
pub struct MemorySurface {
    viewport_width: Cell<f64>,
    handles: Cell<[Option<Point>; 2]>,
    toolbar: Cell<Option<Point>>,
    toasts: RefCell<Vec<String>>,
}

impl MemorySurface {
    pub fn new(viewport_width: f64) -> Self {
        Self {
            viewport_width: Cell::new(viewport_width),
            handles: Cell::new([None, None]),
            toolbar: Cell::new(None),
            toasts: RefCell::new(Vec::new()),
        }
    }

    pub fn set_viewport_width(&self, width: f64) {
        self.viewport_width.set(width);
    }

    /// Where the handle is drawn, if visible.
    pub fn handle(&self, kind: HandleKind) -> Option<Point> {
        self.handles.get()[kind.index()]
    }

    /// Where the toolbar is drawn, if visible.
    pub fn toolbar(&self) -> Option<Point> {
        self.toolbar.get()
    }

    pub fn toasts(&self) -> Vec<String> {
        self.toasts.borrow().clone()
    }
}

impl OverlaySurface for MemorySurface {
    fn place_handle(&self, kind: HandleKind, position: Option<Point>) {
        let mut handles = self.handles.get();
        handles[kind.index()] = position;
        self.handles.set(handles);
    }

    fn place_toolbar(&self, anchor: Option<Point>) {
        self.toolbar.set(anchor);
    }

    fn viewport_width(&self) -> f64 {
        self.viewport_width.get()
    }

    fn show_toast(&self, message: &str) {
        self.toasts.borrow_mut().push(message.to_string());
    }
}

struct PendingTask {
    id: TimerId,
    due: Duration,
    task: Box<dyn FnOnce()>,
}

/// Platform with a manually advanced clock and scripted clipboard.
pub struct ManualPlatform {
    now: Cell<Duration>,
    next_id: Cell<u32>,
    tasks: RefCell<Vec<PendingTask>>,
    clipboard: RefCell<PlatformResult<String>>,
    copy_result: RefCell<PlatformResult<()>>,
    copies: Cell<u32>,
    vibrations: RefCell<Vec<Duration>>,
}

impl Default for ManualPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualPlatform {
    pub fn new() -> Self {
        Self {
            now: Cell::new(Duration::ZERO),
            next_id: Cell::new(0),
            tasks: RefCell::new(Vec::new()),
            clipboard: RefCell::new(Ok(String::new())),
            copy_result: RefCell::new(Ok(())),
            copies: Cell::new(0),
            vibrations: RefCell::new(Vec::new()),
        }
    }

    /// Set what the next clipboard reads resolve to.
    pub fn set_clipboard(&self, result: PlatformResult<String>) {
        *self.clipboard.borrow_mut() = result;
    }

    /// Set what the copy command returns.
    pub fn set_copy_result(&self, result: PlatformResult<()>) {
        *self.copy_result.borrow_mut() = result;
    }

    /// Time elapsed on the manual clock.
    pub fn now(&self) -> Duration {
        self.now.get()
    }

    pub fn pending_timers(&self) -> usize {
        self.tasks.borrow().len()
    }

    pub fn copies(&self) -> u32 {
        self.copies.get()
    }

    pub fn vibrations(&self) -> Vec<Duration> {
        self.vibrations.borrow().clone()
    }

    /// Move the clock forward, running every task that comes due in order.
    pub fn advance(&self, by: Duration) {
        let target = self.now.get() + by;
        loop {
            let next = {
                let mut tasks = self.tasks.borrow_mut();
                let due = tasks
                    .iter()
                    .enumerate()
                    .filter(|(_, pending)| pending.due <= target)
                    .min_by_key(|(_, pending)| (pending.due, pending.id.0))
                    .map(|(index, _)| index);
                due.map(|index| tasks.remove(index))
            };
            let Some(pending) = next else {
                break;
            };
            self.now.set(pending.due);
            (pending.task)();
        }
        self.now.set(target);
    }
}

impl Platform for ManualPlatform {
    fn copy_selection(&self) -> PlatformResult<()> {
        self.copies.set(self.copies.get() + 1);
        self.copy_result.borrow().clone()
    }

    fn read_clipboard_text(&self) -> BoxFuture<'static, PlatformResult<String>> {
        let result = self.clipboard.borrow().clone();
        Box::pin(std::future::ready(result))
    }

    fn vibrate(&self, duration: Duration) {
        self.vibrations.borrow_mut().push(duration);
    }

    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> TimerId {
        let id = TimerId(self.next_id.get() + 1);
        self.next_id.set(id.0);
        self.tasks.borrow_mut().push(PendingTask {
            id,
            due: self.now.get() + delay,
            task,
        });
        id
    }

    fn cancel(&self, id: TimerId) {
        self.tasks.borrow_mut().retain(|pending| pending.id != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_at_boundaries() {
        let text = "the quick brown";
        assert_eq!(word_at(text, 5), Some(WordRange::new(5, 10)));
        assert_eq!(word_at(text, 7), Some(WordRange::new(5, 10)));
        // Caret right after the word still touches it.
        assert_eq!(word_at(text, 10), Some(WordRange::new(5, 10)));
        assert_eq!(word_at("a    b", 4), None);
    }

    #[test]
    fn test_hit_test_and_screen_roundtrip() {
        let editor = MemoryEditor::new("the quick brown\nsecond line");
        let target = editor.hit_test(Point::new(60.0, 25.0)).unwrap();
        assert_eq!(target.position, Position::new(2, 7));
        assert_eq!(target.word, Some(WordRange::new(1, 7)));
        assert_eq!(
            editor.position_to_screen(target.position),
            Some(Point::new(60.0, 20.0))
        );
    }

    #[test]
    fn test_hit_test_misses_outside_text() {
        let editor = MemoryEditor::new("one line");
        assert!(editor.hit_test(Point::new(10.0, 100.0)).is_none());
        assert!(editor.hit_test(Point::new(-5.0, 5.0)).is_none());
    }

    #[test]
    fn test_scrolled_out_position() {
        let editor = MemoryEditor::new("a\nb\nc");
        editor.scroll_to(30.0);
        assert_eq!(editor.scroll_top(), 30.0);
        assert!(editor.position_to_screen(Position::new(1, 1)).is_none());
        assert_eq!(
            editor.position_to_screen(Position::new(3, 1)),
            Some(Point::new(0.0, 10.0))
        );
    }

    #[test]
    fn test_apply_edit_moves_cursor_after_insert() {
        let editor = MemoryEditor::new("the quick brown");
        let range = EditRange {
            start: Position::new(1, 5),
            end: Position::new(1, 10),
        };
        editor.apply_edit(range, "slow\nand", true);
        assert_eq!(editor.text(), "the slow\nand brown");
        assert_eq!(editor.line(2).as_deref(), Some("and brown"));
        assert_eq!(editor.line(3), None);
        assert_eq!(
            editor.selection(),
            Some(SelectionSnapshot::cursor(Position::new(2, 4)))
        );
    }

    #[test]
    fn test_listeners_fire_and_unsubscribe() {
        let editor = MemoryEditor::new("text");
        let count = Rc::new(Cell::new(0));
        let counter = count.clone();
        let sub = editor.on_selection_changed(Rc::new(move || counter.set(counter.get() + 1)));

        editor.set_cursor(Position::new(1, 3));
        assert_eq!(count.get(), 1);

        drop(sub);
        editor.set_cursor(Position::new(1, 2));
        assert_eq!(count.get(), 1);
        assert_eq!(editor.listener_count(), 0);
    }

    #[test]
    fn test_unchanged_selection_is_not_notified() {
        let editor = MemoryEditor::new("the quick brown");
        let count = Rc::new(Cell::new(0));
        let counter = count.clone();
        let _sub = editor.on_selection_changed(Rc::new(move || counter.set(counter.get() + 1)));
        let word = SelectionSnapshot::new(Position::new(1, 5), Position::new(1, 10));

        editor.set_selection(word);
        editor.set_selection(word);
        assert_eq!(count.get(), 1);

        editor.set_cursor(Position::new(1, 2));
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn test_manual_platform_runs_due_tasks_in_order() {
        let platform = ManualPlatform::new();
        let fired = Rc::new(RefCell::new(Vec::new()));

        let late = fired.clone();
        platform.schedule(Duration::from_millis(300), Box::new(move || late.borrow_mut().push("late")));
        let early = fired.clone();
        platform.schedule(Duration::from_millis(100), Box::new(move || early.borrow_mut().push("early")));
        let cancelled = fired.clone();
        let id = platform.schedule(Duration::from_millis(200), Box::new(move || cancelled.borrow_mut().push("cancelled")));
        platform.cancel(id);

        platform.advance(Duration::from_millis(250));
        assert_eq!(*fired.borrow(), vec!["early"]);
        assert_eq!(platform.pending_timers(), 1);

        platform.advance(Duration::from_millis(100));
        assert_eq!(*fired.borrow(), vec!["early", "late"]);
        assert_eq!(platform.now(), Duration::from_millis(350));
    }
}
