use gloo::timers::callback::Timeout;
use wasm_bindgen::JsCast;
use shared::{KeyInput, KeyOutcome, PhoneField, Selection};
use web_sys::{ClipboardEvent, FocusEvent, HtmlInputElement, InputEvent, KeyboardEvent};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct PhoneInputProps {
    pub field: PhoneField,
    pub on_change: Callback<PhoneField>,
    #[prop_or_default]
    pub invalid: bool,
    #[prop_or(AttrValue::Static("phone"))]
    pub name: AttrValue,
    #[prop_or_default]
    pub id: Option<AttrValue>,
}

fn selection_of(input: &HtmlInputElement) -> Selection {
    let start = input.selection_start().ok().flatten().unwrap_or(0) as usize;
    let end = input.selection_end().ok().flatten().unwrap_or(start as u32) as usize;
    Selection::range(start, end)
}

fn place_caret(input: &HtmlInputElement, caret: usize) {
    let caret = caret as u32;
    if let Err(e) = input.set_selection_range(caret, caret) {
        log::debug!("setSelectionRange failed: {:?}", e);
    }
}

/// Push the masked value and caret into the element right away, before the
/// next render, so the browser never shows an unmasked intermediate
fn write_back(input: &HtmlInputElement, field: &PhoneField) {
    input.set_value(field.value());
    place_caret(input, field.caret());
}

fn is_focused(input: &HtmlInputElement) -> bool {
    web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.active_element())
        .is_some_and(|active| active == ***input)
}

#[function_component(PhoneInput)]
pub fn phone_input(props: &PhoneInputProps) -> Html {
    let input_ref = use_node_ref();

    {
        let input_ref = input_ref.clone();
        use_effect_with(props.field.clone(), move |field| {
            if let Some(input) = input_ref.cast::<HtmlInputElement>() {
                if is_focused(&input) {
                    place_caret(&input, field.caret());
                }
            }
            || ()
        });
    }

    let onkeydown = {
        let field = props.field.clone();
        let on_change = props.on_change.clone();
        let input_ref = input_ref.clone();
        Callback::from(move |e: KeyboardEvent| {
            let Some(input) = input_ref.cast::<HtmlInputElement>() else {
                return;
            };
            let key = e.key();
            let key_input = KeyInput {
                key: &key,
                ctrl: e.ctrl_key(),
                meta: e.meta_key(),
                shift: e.shift_key(),
            };

            let mut next = field.clone();
            match next.handle_key(key_input, selection_of(&input)) {
                KeyOutcome::PassThrough => {}
                KeyOutcome::Suppress => e.prevent_default(),
                KeyOutcome::Handled => {
                    e.prevent_default();
                    write_back(&input, &next);
                    on_change.emit(next);
                }
            }
        })
    };

    let oninput = {
        let field = props.field.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = field.clone();
            next.apply_input(&input.value());
            write_back(&input, &next);
            on_change.emit(next);
        })
    };

    let onpaste = {
        let field = props.field.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            e.prevent_default();
            let input: HtmlInputElement = e.target_unchecked_into();
            let text = e
                .dyn_ref::<ClipboardEvent>()
                .and_then(ClipboardEvent::clipboard_data)
                .and_then(|data| data.get_data("text").ok())
                .unwrap_or_default();

            let mut next = field.clone();
            next.insert(&text, selection_of(&input));
            write_back(&input, &next);
            on_change.emit(next);
        })
    };

    let onfocus = {
        let field = props.field.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |e: FocusEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = field.clone();
            next.focus();
            // A click lands the caret after focus fires; move it on the next tick
            let caret = next.caret();
            Timeout::new(0, move || place_caret(&input, caret)).forget();
            on_change.emit(next);
        })
    };

    let onblur = {
        let field = props.field.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |_: FocusEvent| {
            let mut next = field.clone();
            next.blur();
            if next != field {
                on_change.emit(next);
            }
        })
    };

    let class = classes!(
        "phone-input",
        props.field.style().css_class(),
        props.invalid.then_some("input-error"),
    );

    html! {
        <input
            ref={input_ref}
            type="tel"
            inputmode="tel"
            autocomplete="tel"
            id={props.id.clone()}
            name={props.name.clone()}
            {class}
            value={props.field.value().to_string()}
            {onkeydown}
            {oninput}
            {onpaste}
            {onfocus}
            {onblur}
        />
    }
}
