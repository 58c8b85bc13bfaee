//! # Input Components
//!
//! Styled inputs used by the field editor and the settings panel:
//! - **TextInput**: Single-line text input
//! - **TextArea**: Multi-line text input
//! - **Select**: Dropdown selection
//! - **Toggle**: Boolean switch card
//! - **ColorInput**: Color swatch plus hex text
//! - **ButtonGroup**: Mutually exclusive choices
//! - **FormGroup**: Labelled wrapper for custom content
//!

use dioxus::prelude::*;

// ============================================================================
// Text Input Component
// ============================================================================

#[derive(Props, Clone, PartialEq)]
pub struct TextInputProps {
    pub value: String,

    #[props(default)]
    pub label: Option<String>,

    #[props(default)]
    pub placeholder: Option<String>,

    #[props(default)]
    pub help_text: Option<String>,

    /// Error message (shows error state)
    #[props(default)]
    pub error: Option<String>,

    #[props(default = false)]
    pub required: bool,

    #[props(default = false)]
    pub disabled: bool,

    /// Input type (text, url, email, ...)
    #[props(default = "text".to_string())]
    pub input_type: String,

    #[props(default)]
    pub on_change: EventHandler<String>,

    /// Fired on Enter with the current value
    #[props(default)]
    pub on_enter: EventHandler<String>,
}

/// Single-line text input
#[component]
pub fn TextInput(props: TextInputProps) -> Element {
    let input_class = input_class(props.error.is_some(), props.disabled);

    rsx! {
        div {
            class: "input-group",

            if let Some(label) = &props.label {
                InputLabel { text: label.clone(), required: props.required }
            }

            input {
                class: "{input_class}",
                r#type: "{props.input_type}",
                value: "{props.value}",
                placeholder: props.placeholder.as_deref().unwrap_or(""),
                disabled: props.disabled,
                oninput: move |e| props.on_change.call(e.value()),
                onkeydown: move |e| {
                    if e.key() == Key::Enter {
                        props.on_enter.call(props.value.clone());
                    }
                },
            }

            HelpOrError { help: props.help_text.clone(), error: props.error.clone() }
        }
    }
}

// ============================================================================
// Text Area Component
// ============================================================================

#[derive(Props, Clone, PartialEq)]
pub struct TextAreaProps {
    pub value: String,

    #[props(default)]
    pub label: Option<String>,

    #[props(default)]
    pub placeholder: Option<String>,

    #[props(default)]
    pub help_text: Option<String>,

    #[props(default)]
    pub error: Option<String>,

    #[props(default = 3)]
    pub rows: usize,

    #[props(default = false)]
    pub disabled: bool,

    #[props(default)]
    pub on_change: EventHandler<String>,
}

/// Multi-line text input
#[component]
pub fn TextArea(props: TextAreaProps) -> Element {
    let class = format!(
        "{} textarea",
        input_class(props.error.is_some(), props.disabled)
    );

    rsx! {
        div {
            class: "input-group",

            if let Some(label) = &props.label {
                InputLabel { text: label.clone(), required: false }
            }

            textarea {
                class: "{class}",
                rows: "{props.rows}",
                value: "{props.value}",
                placeholder: props.placeholder.as_deref().unwrap_or(""),
                disabled: props.disabled,
                oninput: move |e| props.on_change.call(e.value()),
            }

            HelpOrError { help: props.help_text.clone(), error: props.error.clone() }
        }
    }
}

// ============================================================================
// Select Component
// ============================================================================

/// One entry of a `Select` or `ButtonGroup`
#[derive(Debug, Clone, PartialEq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub disabled: bool,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            disabled: false,
        }
    }

    pub fn disabled(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            disabled: true,
            ..Self::new(value, label)
        }
    }
}

#[derive(Props, Clone, PartialEq)]
pub struct SelectProps {
    /// Selected value
    pub value: String,

    pub options: Vec<SelectOption>,

    #[props(default)]
    pub label: Option<String>,

    #[props(default)]
    pub help_text: Option<String>,

    #[props(default = false)]
    pub disabled: bool,

    #[props(default)]
    pub on_change: EventHandler<String>,
}

/// Dropdown select
#[component]
pub fn Select(props: SelectProps) -> Element {
    let class = format!("{} select", input_class(false, props.disabled));

    rsx! {
        div {
            class: "input-group",

            if let Some(label) = &props.label {
                InputLabel { text: label.clone(), required: false }
            }

            select {
                class: "{class}",
                disabled: props.disabled,
                onchange: move |e| props.on_change.call(e.value()),

                for option in &props.options {
                    option {
                        key: "{option.value}",
                        value: "{option.value}",
                        disabled: option.disabled,
                        selected: props.value == option.value,
                        "{option.label}"
                    }
                }
            }

            HelpOrError { help: props.help_text.clone(), error: None }
        }
    }
}

// ============================================================================
// Toggle Component
// ============================================================================

#[derive(Props, Clone, PartialEq)]
pub struct ToggleProps {
    pub checked: bool,

    #[props(default)]
    pub label: Option<String>,

    #[props(default)]
    pub help_text: Option<String>,

    #[props(default = false)]
    pub disabled: bool,

    #[props(default)]
    pub on_change: EventHandler<bool>,
}

/// Switch styled as a clickable card
#[component]
pub fn Toggle(props: ToggleProps) -> Element {
    let class = toggle_class(props.checked, props.disabled);

    rsx! {
        div {
            class: "{class}",
            role: "switch",
            "aria-checked": "{props.checked}",
            onclick: move |_| {
                if !props.disabled {
                    props.on_change.call(!props.checked);
                }
            },

            span { class: "toggle-track", span { class: "toggle-thumb" } }

            div {
                class: "toggle-text",
                if let Some(label) = &props.label {
                    span { class: "toggle-label", "{label}" }
                }
                if let Some(help) = &props.help_text {
                    span { class: "help-text", "{help}" }
                }
            }
        }
    }
}

// ============================================================================
// Color Input Component
// ============================================================================

#[derive(Props, Clone, PartialEq)]
pub struct ColorInputProps {
    /// CSS color, normally `#rrggbb`
    pub value: String,

    #[props(default)]
    pub label: Option<String>,

    #[props(default)]
    pub error: Option<String>,

    #[props(default)]
    pub on_change: EventHandler<String>,
}

/// Native color swatch next to a free-text field
///
/// The swatch only understands `#rrggbb`; other CSS colors can still be
/// typed into the text field.
#[component]
pub fn ColorInput(props: ColorInputProps) -> Element {
    let swatch = swatch_value(&props.value);
    let class = input_class(props.error.is_some(), false);

    rsx! {
        div {
            class: "input-group",

            if let Some(label) = &props.label {
                InputLabel { text: label.clone(), required: false }
            }

            div {
                class: "color-input",
                input {
                    class: "color-swatch",
                    r#type: "color",
                    value: "{swatch}",
                    oninput: move |e| props.on_change.call(e.value()),
                }
                input {
                    class: "{class}",
                    r#type: "text",
                    value: "{props.value}",
                    oninput: move |e| props.on_change.call(e.value()),
                }
            }

            HelpOrError { help: None, error: props.error.clone() }
        }
    }
}

// ============================================================================
// Button Group Component
// ============================================================================

#[derive(Props, Clone, PartialEq)]
pub struct ButtonGroupProps {
    pub value: String,

    pub options: Vec<SelectOption>,

    #[props(default = false)]
    pub disabled: bool,

    #[props(default)]
    pub on_change: EventHandler<String>,
}

/// Segmented control for mutually exclusive options
#[component]
pub fn ButtonGroup(props: ButtonGroupProps) -> Element {
    rsx! {
        div {
            class: "button-group",

            for option in props.options.iter() {
                button {
                    key: "{option.value}",
                    class: if props.value == option.value { "segment active" } else { "segment" },
                    disabled: props.disabled || option.disabled,
                    onclick: {
                        let value = option.value.clone();
                        move |_| props.on_change.call(value.clone())
                    },
                    "{option.label}"
                }
            }
        }
    }
}

// ============================================================================
// Form Group Component
// ============================================================================

#[derive(Props, Clone, PartialEq)]
pub struct FormGroupProps {
    #[props(default)]
    pub label: Option<String>,

    #[props(default)]
    pub description: Option<String>,

    pub children: Element,
}

/// Labelled wrapper around arbitrary content
#[component]
pub fn FormGroup(props: FormGroupProps) -> Element {
    rsx! {
        div {
            class: "form-group",
            if let Some(label) = &props.label {
                InputLabel { text: label.clone(), required: false }
            }
            if let Some(desc) = &props.description {
                p { class: "help-text", "{desc}" }
            }
            {props.children}
        }
    }
}

// ============================================================================
// Shared pieces
// ============================================================================

#[component]
fn InputLabel(text: String, required: bool) -> Element {
    rsx! {
        label {
            class: "input-label",
            "{text}"
            if required {
                span { class: "required-mark", "*" }
            }
        }
    }
}

#[component]
fn HelpOrError(help: Option<String>, error: Option<String>) -> Element {
    if let Some(error) = error {
        rsx! { p { class: "error-text", "{error}" } }
    } else if let Some(help) = help {
        rsx! { p { class: "help-text", "{help}" } }
    } else {
        rsx! {}
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

fn input_class(has_error: bool, disabled: bool) -> String {
    let mut classes = vec!["input"];
    if has_error {
        classes.push("input-error");
    }
    if disabled {
        classes.push("disabled");
    }
    classes.join(" ")
}

fn toggle_class(checked: bool, disabled: bool) -> String {
    let mut classes = vec!["toggle-card"];
    if checked {
        classes.push("checked");
    }
    if disabled {
        classes.push("disabled");
    }
    classes.join(" ")
}

/// Value for `<input type="color">`, which rejects anything but `#rrggbb`
fn swatch_value(color: &str) -> String {
    let hex = color.trim();
    let is_full_hex = hex.len() == 7
        && hex.starts_with('#')
        && hex[1..].chars().all(|c| c.is_ascii_hexdigit());
    let is_short_hex = hex.len() == 4
        && hex.starts_with('#')
        && hex[1..].chars().all(|c| c.is_ascii_hexdigit());

    if is_full_hex {
        hex.to_lowercase()
    } else if is_short_hex {
        hex[1..]
            .chars()
            .fold(String::from("#"), |mut out, c| {
                out.push(c);
                out.push(c);
                out
            })
            .to_lowercase()
    } else {
        "#000000".to_string()
    }
}

// ============================================================================
// Tests
// ============================================================================
