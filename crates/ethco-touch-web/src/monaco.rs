//! Monaco bindings and the `EditorHost` built on them.

use ethco_touch_core::{
    EditRange, EditorHost, HitTarget, Listener, Position, SelectionSnapshot, Subscription,
    WordRange,
};
use kurbo::Point;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

/// Line height used when the editor option cannot be read.
const FALLBACK_LINE_HEIGHT: f64 = 19.0;
const PASTE_SOURCE: &str = "paste";
const CONTEXT_MENU_ACTION: &str = "editor.action.showContextMenu";

#[wasm_bindgen]
extern "C" {
    /// `monaco.editor.ICodeEditor`
    #[derive(Clone)]
    pub type CodeEditor;

    #[wasm_bindgen(method, js_name = getSelection)]
    fn get_selection(this: &CodeEditor) -> Option<Selection>;

    #[wasm_bindgen(method, js_name = setSelection)]
    fn set_selection(this: &CodeEditor, selection: &Selection);

    #[wasm_bindgen(method, js_name = setPosition)]
    fn set_position(this: &CodeEditor, position: &MonacoPosition);

    #[wasm_bindgen(method, js_name = getScrolledVisiblePosition)]
    fn get_scrolled_visible_position(
        this: &CodeEditor,
        position: &MonacoPosition,
    ) -> Option<VisiblePosition>;

    #[wasm_bindgen(method, js_name = getTargetAtClientPoint)]
    fn get_target_at_client_point(this: &CodeEditor, x: f64, y: f64) -> Option<MouseTarget>;

    #[wasm_bindgen(method, js_name = getModel)]
    fn get_model(this: &CodeEditor) -> Option<TextModel>;

    #[wasm_bindgen(method, js_name = getOption)]
    fn get_option(this: &CodeEditor, id: &JsValue) -> JsValue;

    #[wasm_bindgen(method, js_name = executeEdits)]
    fn execute_edits(this: &CodeEditor, source: &str, edits: &js_sys::Array) -> bool;

    #[wasm_bindgen(method)]
    fn focus(this: &CodeEditor);

    #[wasm_bindgen(method)]
    fn trigger(this: &CodeEditor, source: &str, handler_id: &str, payload: &JsValue);

    #[wasm_bindgen(method, js_name = onDidChangeCursorSelection)]
    fn on_did_change_cursor_selection(
        this: &CodeEditor,
        listener: &js_sys::Function,
    ) -> Disposable;

    #[wasm_bindgen(method, js_name = onDidScrollChange)]
    fn on_did_scroll_change(this: &CodeEditor, listener: &js_sys::Function) -> Disposable;

    #[wasm_bindgen(method, js_name = onDidChangeModelContent)]
    fn on_did_change_model_content(this: &CodeEditor, listener: &js_sys::Function)
    -> Disposable;

    /// `monaco.IDisposable`
    pub type Disposable;

    #[wasm_bindgen(method)]
    fn dispose(this: &Disposable);

    #[wasm_bindgen(js_namespace = monaco)]
    type Selection;

    #[wasm_bindgen(constructor, js_namespace = monaco)]
    fn new(
        selection_start_line: u32,
        selection_start_column: u32,
        position_line: u32,
        position_column: u32,
    ) -> Selection;

    #[wasm_bindgen(method, getter, js_name = selectionStartLineNumber)]
    fn selection_start_line_number(this: &Selection) -> u32;

    #[wasm_bindgen(method, getter, js_name = selectionStartColumn)]
    fn selection_start_column(this: &Selection) -> u32;

    #[wasm_bindgen(method, getter, js_name = positionLineNumber)]
    fn position_line_number(this: &Selection) -> u32;

    #[wasm_bindgen(method, getter, js_name = positionColumn)]
    fn position_column(this: &Selection) -> u32;

    #[wasm_bindgen(js_namespace = monaco, js_name = Position)]
    type MonacoPosition;

    #[wasm_bindgen(constructor, js_namespace = monaco, js_class = "Position")]
    fn new(line_number: u32, column: u32) -> MonacoPosition;

    #[wasm_bindgen(method, getter, js_name = lineNumber)]
    fn line_number(this: &MonacoPosition) -> u32;

    #[wasm_bindgen(method, getter)]
    fn column(this: &MonacoPosition) -> u32;

    #[wasm_bindgen(js_namespace = monaco)]
    type Range;

    #[wasm_bindgen(constructor, js_namespace = monaco)]
    fn new(
        start_line_number: u32,
        start_column: u32,
        end_line_number: u32,
        end_column: u32,
    ) -> Range;

    type VisiblePosition;

    #[wasm_bindgen(method, getter)]
    fn top(this: &VisiblePosition) -> f64;

    #[wasm_bindgen(method, getter)]
    fn left(this: &VisiblePosition) -> f64;

    type MouseTarget;

    #[wasm_bindgen(method, getter)]
    fn position(this: &MouseTarget) -> Option<MonacoPosition>;

    type TextModel;

    #[wasm_bindgen(method, js_name = getWordAtPosition)]
    fn get_word_at_position(this: &TextModel, position: &MonacoPosition) -> Option<WordAtPosition>;

    type WordAtPosition;

    #[wasm_bindgen(method, getter, js_name = startColumn)]
    fn start_column(this: &WordAtPosition) -> u32;

    #[wasm_bindgen(method, getter, js_name = endColumn)]
    fn end_column(this: &WordAtPosition) -> u32;
}

impl From<&MonacoPosition> for Position {
    fn from(position: &MonacoPosition) -> Self {
        Position::new(position.line_number(), position.column())
    }
}

impl From<Position> for MonacoPosition {
    fn from(position: Position) -> Self {
        MonacoPosition::new(position.line, position.column)
    }
}

/// Look up `monaco.editor.EditorOption.lineHeight`.
fn line_height_option() -> Option<JsValue> {
    let global = js_sys::global();
    let monaco = js_sys::Reflect::get(&global, &"monaco".into()).ok()?;
    let editor = js_sys::Reflect::get(&monaco, &"editor".into()).ok()?;
    let options = js_sys::Reflect::get(&editor, &"EditorOption".into()).ok()?;
    let id = js_sys::Reflect::get(&options, &"lineHeight".into()).ok()?;
    (!id.is_undefined()).then_some(id)
}

/// Wrap a listener for a Monaco event and hand back the disposer.
fn subscribe(
    listener: Listener,
    register: impl FnOnce(&js_sys::Function) -> Disposable,
) -> Subscription {
    let closure = Closure::<dyn FnMut(JsValue)>::new(move |_event: JsValue| listener());
    let disposable = register(closure.as_ref().unchecked_ref());
    Subscription::new(move || {
        disposable.dispose();
        drop(closure);
    })
}

/// [`EditorHost`] backed by a live Monaco editor.
pub struct MonacoHost {
    editor: CodeEditor,
}

impl MonacoHost {
    pub fn new(editor: CodeEditor) -> Self {
        Self { editor }
    }
}

impl EditorHost for MonacoHost {
    fn selection(&self) -> Option<SelectionSnapshot> {
        let selection = self.editor.get_selection()?;
        Some(SelectionSnapshot::new(
            Position::new(
                selection.selection_start_line_number(),
                selection.selection_start_column(),
            ),
            Position::new(selection.position_line_number(), selection.position_column()),
        ))
    }

    fn position_to_screen(&self, position: Position) -> Option<Point> {
        let visible = self
            .editor
            .get_scrolled_visible_position(&MonacoPosition::from(position))?;
        Some(Point::new(visible.left(), visible.top()))
    }

    fn hit_test(&self, point: Point) -> Option<HitTarget> {
        let target = self.editor.get_target_at_client_point(point.x, point.y)?;
        let monaco_position = target.position()?;
        let word = self
            .editor
            .get_model()
            .and_then(|model| model.get_word_at_position(&monaco_position))
            .map(|word| WordRange::new(word.start_column(), word.end_column()));
        Some(HitTarget {
            position: Position::from(&monaco_position),
            word,
        })
    }

    fn set_selection(&self, selection: SelectionSnapshot) {
        self.editor.set_selection(&Selection::new(
            selection.anchor.line,
            selection.anchor.column,
            selection.active.line,
            selection.active.column,
        ));
    }

    fn set_cursor(&self, position: Position) {
        self.editor.set_position(&MonacoPosition::from(position));
    }

    fn apply_edit(&self, range: EditRange, text: &str, move_markers: bool) {
        let op = js_sys::Object::new();
        let range = Range::new(
            range.start.line,
            range.start.column,
            range.end.line,
            range.end.column,
        );
        let fields = [
            ("range", JsValue::from(range)),
            ("text", JsValue::from_str(text)),
            ("forceMoveMarkers", JsValue::from_bool(move_markers)),
        ];
        for (key, value) in fields {
            if js_sys::Reflect::set(&op, &key.into(), &value).is_err() {
                log::error!("Failed to build edit operation field {}", key);
                return;
            }
        }
        let edits = js_sys::Array::of1(&op);
        if !self.editor.execute_edits(PASTE_SOURCE, &edits) {
            log::warn!("Editor rejected the edit");
        }
    }

    fn line_height(&self) -> f64 {
        line_height_option()
            .and_then(|id| self.editor.get_option(&id).as_f64())
            .unwrap_or(FALLBACK_LINE_HEIGHT)
    }

    fn focus(&self) {
        self.editor.focus();
    }

    fn trigger_context_menu(&self) {
        self.editor
            .trigger("source", CONTEXT_MENU_ACTION, &JsValue::NULL);
    }

    fn on_selection_changed(&self, listener: Listener) -> Subscription {
        subscribe(listener, |f| self.editor.on_did_change_cursor_selection(f))
    }

    fn on_scroll_changed(&self, listener: Listener) -> Subscription {
        subscribe(listener, |f| self.editor.on_did_scroll_change(f))
    }

    fn on_content_changed(&self, listener: Listener) -> Subscription {
        subscribe(listener, |f| self.editor.on_did_change_model_content(f))
    }
}
