//! # UI Components
//!
//! ```text
//! Fields panel
//! ├── FieldPalette   (add a field by type)
//! ├── FieldList      (order, move up/down, remove)
//! └── FieldEditor    (label, type, placeholder, required, options)
//!
//! Settings panel
//! └── FormSettings   (type, copy, branding, theme, template)
//!
//! Embed panel
//! └── EmbedPanel     (host config, export)
//!
//! PreviewPane        (FormPreview markup)
//! ```

pub mod field_editor;
pub mod field_list;
pub mod inputs;
pub mod palette;
pub mod preview;
pub mod settings;

pub use field_editor::FieldEditor;
pub use field_list::FieldList;
pub use inputs::{
    ButtonGroup, ColorInput, FormGroup, Select, SelectOption, TextArea, TextInput, Toggle,
};
pub use palette::FieldPalette;
pub use preview::{EmbedPanel, PreviewPane};
pub use settings::FormSettings;
