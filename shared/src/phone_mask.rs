//! Input mask for Kazakhstan phone numbers.
//!
//! The field always shows the full `+7 (___) ___-__-__` skeleton. Every edit
//! is reduced to the digits it leaves behind, normalized, and rendered back
//! into the skeleton, after which the caret sits on the next empty position.
//! Positions are character offsets; rendered values are pure ASCII.

/// Skeleton every rendered value follows
pub const TEMPLATE: &str = "+7 (___) ___-__-__";

/// Length of the fixed `+7 (` prefix; the caret never goes left of it on delete
pub const PREFIX_LEN: usize = 4;

const MAX_DIGITS: usize = 11;

const SEPARATORS: [char; 4] = [' ', '(', ')', '-'];

/// Muted placeholder text vs. text the visitor typed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldStyle {
    Placeholder,
    Filled,
}

impl FieldStyle {
    pub fn css_class(&self) -> &'static str {
        match self {
            FieldStyle::Placeholder => "phone-placeholder",
            FieldStyle::Filled => "phone-filled",
        }
    }
}

/// Caret or selected range inside the field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    pub fn caret(position: usize) -> Self {
        Self {
            start: position,
            end: position,
        }
    }

    pub fn range(start: usize, end: usize) -> Self {
        Self {
            start: start.min(end),
            end: start.max(end),
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }
}

/// A keydown as the mask sees it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyInput<'a> {
    pub key: &'a str,
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
}

impl<'a> KeyInput<'a> {
    pub fn plain(key: &'a str) -> Self {
        Self {
            key,
            ctrl: false,
            meta: false,
            shift: false,
        }
    }

    pub fn with_ctrl(key: &'a str) -> Self {
        Self {
            ctrl: true,
            ..Self::plain(key)
        }
    }

    fn is_delete(&self) -> bool {
        matches!(self.key, "Backspace" | "Delete")
    }

    /// Digits, navigation and the clipboard/select-all shortcuts
    pub fn is_allowed(&self) -> bool {
        match self.key {
            "Backspace" | "Delete" | "Tab" | "Escape" | "Enter" | "Home" | "End" | "ArrowLeft"
            | "ArrowRight" | "ArrowUp" | "ArrowDown" => true,
            key if self.ctrl || self.meta => {
                matches!(key.to_ascii_lowercase().as_str(), "a" | "c" | "v" | "x")
            }
            key => !self.shift && key.len() == 1 && key.chars().all(|c| c.is_ascii_digit()),
        }
    }
}

/// What the caller has to do with the native event after `handle_key`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Let the browser apply the key; an input event follows
    PassThrough,
    /// Cancel the event, nothing changed
    Suppress,
    /// Cancel the event and write the field's value and caret back
    Handled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneField {
    value: String,
    caret: usize,
    style: FieldStyle,
}

impl Default for PhoneField {
    fn default() -> Self {
        Self::new()
    }
}

impl PhoneField {
    pub fn new() -> Self {
        Self {
            value: TEMPLATE.to_string(),
            caret: PREFIX_LEN,
            style: FieldStyle::Placeholder,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    pub fn style(&self) -> FieldStyle {
        self.style
    }

    pub fn is_placeholder(&self) -> bool {
        self.style == FieldStyle::Placeholder
    }

    pub fn is_complete(&self) -> bool {
        is_complete_phone(&self.value)
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Re-mask after the browser changed the text to `raw`
    pub fn apply_input(&mut self, raw: &str) {
        // The skeleton's "+7" is the country code, everything after it was typed
        let (typed, fresh) = match raw.strip_prefix("+7") {
            Some(rest) => (digits_of(rest), self.is_placeholder()),
            None => (digits_of(raw), true),
        };
        let national = if fresh {
            strip_country_code(&typed)
        } else {
            typed.as_str()
        };
        self.set_digits(&format!("7{national}"));
    }

    /// Type or paste `text` over `selection`
    pub fn insert(&mut self, text: &str, selection: Selection) {
        let (start, end) = self.clamp(selection);
        let raw = format!("{}{}{}", &self.value[..start], text, &self.value[end..]);
        self.apply_input(&raw);
    }

    pub fn focus(&mut self) {
        if self.value.is_empty() || self.value == TEMPLATE {
            self.value = TEMPLATE.to_string();
            self.style = FieldStyle::Placeholder;
            self.caret = PREFIX_LEN;
        } else if let Some(index) = self.value.find('_') {
            self.caret = index;
        }
    }

    /// Leaving the field with at most the country code resets it
    pub fn blur(&mut self) {
        if digits_of(&self.value).len() <= 1 {
            self.reset();
        }
    }

    pub fn handle_key(&mut self, key: KeyInput<'_>, selection: Selection) -> KeyOutcome {
        if key.is_delete() {
            let (start, end) = self.clamp(selection);
            if start <= PREFIX_LEN {
                self.caret = PREFIX_LEN;
            } else if start != end {
                self.delete_selection(Selection::range(start, end));
            } else if key.key == "Backspace" {
                self.backspace_at(start);
            } else {
                self.delete_forward_at(start);
            }
            return KeyOutcome::Handled;
        }

        if key.is_allowed() {
            KeyOutcome::PassThrough
        } else {
            KeyOutcome::Suppress
        }
    }

    /// Remove exactly the digits covered by `selection`
    pub fn delete_selection(&mut self, selection: Selection) {
        let (start, end) = self.clamp(selection);
        if start <= PREFIX_LEN {
            self.caret = PREFIX_LEN;
            return;
        }
        if start == end {
            return;
        }

        let digits = format!(
            "{}{}",
            digits_of(&self.value[..start]),
            digits_of(&self.value[end..])
        );
        self.set_digits(&digits);
    }

    fn backspace_at(&mut self, position: usize) {
        let Some(previous) = self.char_at(position - 1) else {
            return;
        };

        if SEPARATORS.contains(&previous) {
            // Jump over punctuation and blanks to the digit before them
            let mut cursor = position - 1;
            while cursor > PREFIX_LEN
                && self
                    .char_at(cursor - 1)
                    .is_some_and(|c| SEPARATORS.contains(&c) || c == '_')
            {
                cursor -= 1;
            }
            if cursor > PREFIX_LEN && self.char_at(cursor - 1).is_some_and(|c| c.is_ascii_digit()) {
                self.remove_char(cursor - 1);
            }
            return;
        }

        self.remove_char(position - 1);
    }

    fn delete_forward_at(&mut self, position: usize) {
        if position < self.value.len() {
            self.remove_char(position);
        }
    }

    fn remove_char(&mut self, index: usize) {
        let mut raw = self.value.clone();
        raw.remove(index);
        self.set_digits(&digits_of(&raw));
    }

    fn set_digits(&mut self, digits: &str) {
        let digits = normalize_digits(digits);
        // Nothing left past the country code
        if digits.len() <= 1 {
            self.reset();
            return;
        }

        self.value = render(&digits);
        self.style = FieldStyle::Filled;
        self.caret = caret_for(&self.value);
    }

    fn char_at(&self, index: usize) -> Option<char> {
        self.value.as_bytes().get(index).map(|b| *b as char)
    }

    fn clamp(&self, selection: Selection) -> (usize, usize) {
        let len = self.value.len();
        (selection.start.min(len), selection.end.min(len))
    }
}

pub fn digits_of(text: &str) -> String {
    text.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// A number entered into an empty field may bring its own trunk 8, or a
/// country code when all eleven digits arrive at once
fn strip_country_code(digits: &str) -> &str {
    let full_number = digits.len() >= MAX_DIGITS && digits.starts_with(['7', '8']);
    if full_number || digits.starts_with('8') {
        &digits[1..]
    } else {
        digits
    }
}

/// Leading 8 becomes 7, a missing country code is added, extra digits dropped
pub fn normalize_digits(digits: &str) -> String {
    let mut digits = digits_of(digits);
    match digits.chars().next() {
        Some('8') => digits.replace_range(0..1, "7"),
        Some('7') | None => {}
        Some(_) => digits.insert(0, '7'),
    }
    digits.truncate(MAX_DIGITS);
    digits
}

/// Fill the template with normalized digits; the first digit is the country code
pub fn render(digits: &str) -> String {
    if digits.is_empty() {
        return TEMPLATE.to_string();
    }

    let mut national = digits.chars().skip(1);
    TEMPLATE
        .chars()
        .map(|c| match c {
            '_' => national.next().unwrap_or('_'),
            other => other,
        })
        .collect()
}

/// First free position, or the end once the number is complete
pub fn caret_for(value: &str) -> usize {
    value.find('_').unwrap_or(value.len())
}

/// The only check forms use before submitting a phone number
pub fn is_complete_phone(value: &str) -> bool {
    value.len() == TEMPLATE.len()
        && value.chars().zip(TEMPLATE.chars()).all(|(actual, expected)| match expected {
            '_' => actual.is_ascii_digit(),
            '7' => actual == '7',
            other => actual == other,
        })
}
