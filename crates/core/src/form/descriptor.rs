// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Field values keyed by field name.
pub type FieldMap = BTreeMap<String, FieldValue>;

/// The pending result of an option loader.
pub type OptionsFuture = BoxFuture<'static, Result<Vec<FieldOption>, String>>;

/// Loads the options of a dependent field from the current values of the
/// fields it depends on.
pub type OptionLoader = Arc<dyn Fn(FieldMap) -> OptionsFuture + Send + Sync>;

/// The kind of input a field renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldKind {
    /// Single-line text.
    Text,
    /// Numeric input.
    Number,
    /// Email address.
    Email,
    /// Masked text.
    Password,
    /// Single choice from a dropdown.
    Select,
    /// Several choices from a dropdown.
    Multiselect,
    /// Single choice from radio buttons.
    Radio,
    /// A checkbox.
    Checkbox,
    /// An on/off switch.
    Toggle,
    /// File upload.
    File,
    /// Calendar date.
    Date,
    /// Slider.
    Range,
    /// Colour picker.
    Color,
    /// Free-form tag list.
    Tags,
    /// Formatted text.
    Richtext,
    /// Dropdown whose options are loaded from other field values.
    DynamicSelect,
    /// A list of sub-records.
    Repeatable,
    /// A visual heading with no value.
    Section,
    /// Multi-line text.
    Textarea,
}

impl FieldKind {
    /// Every kind, in declaration order.
    pub const ALL: [Self; 19] = [
        Self::Text,
        Self::Number,
        Self::Email,
        Self::Password,
        Self::Select,
        Self::Multiselect,
        Self::Radio,
        Self::Checkbox,
        Self::Toggle,
        Self::File,
        Self::Date,
        Self::Range,
        Self::Color,
        Self::Tags,
        Self::Richtext,
        Self::DynamicSelect,
        Self::Repeatable,
        Self::Section,
        Self::Textarea,
    ];

    /// Returns the kind name used in form schemas.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Email => "email",
            Self::Password => "password",
            Self::Select => "select",
            Self::Multiselect => "multiselect",
            Self::Radio => "radio",
            Self::Checkbox => "checkbox",
            Self::Toggle => "toggle",
            Self::File => "file",
            Self::Date => "date",
            Self::Range => "range",
            Self::Color => "color",
            Self::Tags => "tags",
            Self::Richtext => "richtext",
            Self::DynamicSelect => "dynamic-select",
            Self::Repeatable => "repeatable",
            Self::Section => "section",
            Self::Textarea => "textarea",
        }
    }

    /// Parses a kind name. Matching is case-insensitive.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        let name: String = name.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }

    /// Returns whether fields of this kind hold no value.
    #[must_use]
    pub const fn is_decorative(self) -> bool {
        matches!(self, Self::Section)
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One choice of a select-like field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOption {
    /// Text shown to the user.
    pub label: String,
    /// Value stored when chosen.
    pub value: String,
}

impl FieldOption {
    /// Creates an option.
    #[must_use]
    pub fn new(label: &str, value: &str) -> Self {
        Self {
            label: label.to_owned(),
            value: value.to_owned(),
        }
    }
}

/// The current value of a field.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Nothing entered.
    #[default]
    Empty,
    /// A checkbox or toggle.
    Bool(bool),
    /// A number.
    Number(f64),
    /// Text, or the value of a single choice.
    Text(String),
    /// Several choices or tags.
    List(Vec<String>),
    /// The sub-records of a repeatable group.
    Group(Vec<FieldMap>),
}

impl FieldValue {
    /// Creates a text value.
    #[must_use]
    pub fn text(value: &str) -> Self {
        Self::Text(value.to_owned())
    }

    /// Returns whether nothing meaningful was entered.
    ///
    /// Blank text and empty lists count as empty. `false` does not.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Bool(_) | Self::Number(_) => false,
            Self::Text(s) => s.trim().is_empty(),
            Self::List(items) => items.is_empty(),
            Self::Group(items) => items.is_empty(),
        }
    }

    /// Returns the text, if this is text.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the numeric value of numbers and numeric text.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        }
    }

    /// Returns the boolean value, if this is a flag.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the sub-records, if this is a repeatable group.
    #[must_use]
    pub fn as_group(&self) -> Option<&[FieldMap]> {
        match self {
            Self::Group(items) => Some(items),
            _ => None,
        }
    }

    /// Number of entries in a list or group.
    #[must_use]
    pub fn item_count(&self) -> usize {
        match self {
            Self::List(items) => items.len(),
            Self::Group(items) => items.len(),
            _ => 0,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Configuration of a repeatable group.
#[derive(Debug, Clone)]
pub struct RepeatableSpec {
    /// The sub-fields of every item.
    pub fields: Vec<FieldDescriptor>,
    /// The group never shrinks below this many items.
    pub min_items: usize,
    /// The group never grows beyond this many items.
    pub max_items: Option<usize>,
}

impl RepeatableSpec {
    /// Creates a group with no lower or upper bound.
    #[must_use]
    pub const fn new(fields: Vec<FieldDescriptor>) -> Self {
        Self {
            fields,
            min_items: 0,
            max_items: None,
        }
    }

    /// Sets the bounds on the number of items.
    #[must_use]
    pub const fn with_bounds(mut self, min_items: usize, max_items: Option<usize>) -> Self {
        self.min_items = min_items;
        self.max_items = max_items;
        self
    }

    /// Returns whether a group of `count` items is within the bounds.
    #[must_use]
    pub fn allows(&self, count: usize) -> bool {
        count >= self.min_items && self.max_items.is_none_or(|max| count <= max)
    }

    /// Finds a sub-field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Builds a new item pre-filled with the sub-field defaults.
    #[must_use]
    pub fn default_item(&self) -> FieldMap {
        self.fields
            .iter()
            .filter(|field| !field.kind.is_decorative())
            .map(|field| (field.name.clone(), field.default.clone()))
            .collect()
    }
}

/// How a derived field combines its inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DerivedOp {
    /// Multiply every input.
    Product,
    /// Add every input.
    Sum,
}

impl DerivedOp {
    /// Combines the inputs.
    #[must_use]
    pub fn apply(self, inputs: &[f64]) -> f64 {
        match self {
            Self::Product => inputs.iter().product(),
            Self::Sum => inputs.iter().sum(),
        }
    }
}

/// A read-only field computed from sibling fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedSpec {
    /// Names of the sibling fields read.
    pub inputs: Vec<String>,
    /// How the inputs are combined.
    pub op: DerivedOp,
}

impl DerivedSpec {
    /// Creates a derived computation.
    #[must_use]
    pub fn new(inputs: &[&str], op: DerivedOp) -> Self {
        Self {
            inputs: inputs.iter().map(|name| (*name).to_owned()).collect(),
            op,
        }
    }

    /// Computes the value from sibling `values`.
    ///
    /// Yields a number only when every input is present and numeric.
    #[must_use]
    pub fn compute(&self, values: &FieldMap) -> FieldValue {
        if self.inputs.is_empty() {
            return FieldValue::Empty;
        }
        let numbers: Option<Vec<f64>> = self
            .inputs
            .iter()
            .map(|name| values.get(name).and_then(FieldValue::as_number))
            .collect();
        numbers.map_or(FieldValue::Empty, |numbers| {
            FieldValue::Number(self.op.apply(&numbers))
        })
    }
}

/// Declares one field of a form.
#[derive(Clone)]
pub struct FieldDescriptor {
    /// Stable identifier, used as the DOM id by renderers.
    pub id: String,
    /// Key of the value in the form data.
    pub name: String,
    /// Input kind.
    pub kind: FieldKind,
    /// Label text.
    pub label: String,
    /// Placeholder text.
    pub placeholder: Option<String>,
    /// Static options of select-like fields.
    pub options: Vec<FieldOption>,
    /// Initial value.
    pub default: FieldValue,
    /// Fields whose changes reload this field's options.
    pub depends_on: Vec<String>,
    /// Option loader of a dynamic field.
    pub loader: Option<OptionLoader>,
    /// Number of grid columns the field spans.
    pub grid: Option<u8>,
    /// Sub-field configuration of a repeatable group.
    pub repeatable: Option<RepeatableSpec>,
    /// Computation of a derived field.
    pub derived: Option<DerivedSpec>,
    /// Whether the user can edit the value.
    pub read_only: bool,
}

impl FieldDescriptor {
    /// Creates a field whose id equals its name.
    #[must_use]
    pub fn new(name: &str, kind: FieldKind, label: &str) -> Self {
        Self {
            id: name.to_owned(),
            name: name.to_owned(),
            kind,
            label: label.to_owned(),
            placeholder: None,
            options: Vec::new(),
            default: FieldValue::Empty,
            depends_on: Vec::new(),
            loader: None,
            grid: None,
            repeatable: None,
            derived: None,
            read_only: false,
        }
    }

    /// Sets the placeholder text.
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = Some(placeholder.to_owned());
        self
    }

    /// Sets the static options.
    #[must_use]
    pub fn with_options(mut self, options: Vec<FieldOption>) -> Self {
        self.options = options;
        self
    }

    /// Sets the initial value.
    #[must_use]
    pub fn with_default(mut self, default: FieldValue) -> Self {
        self.default = default;
        self
    }

    /// Sets the number of grid columns the field spans.
    #[must_use]
    pub const fn with_grid(mut self, columns: u8) -> Self {
        self.grid = Some(columns);
        self
    }

    /// Loads the options with `loader` whenever one of `fields` changes.
    #[must_use]
    pub fn depends_on<F>(mut self, fields: &[&str], loader: F) -> Self
    where
        F: Fn(FieldMap) -> OptionsFuture + Send + Sync + 'static,
    {
        self.depends_on = fields.iter().map(|name| (*name).to_owned()).collect();
        self.loader = Some(Arc::new(loader));
        self
    }

    /// Makes the field a repeatable group of sub-records.
    #[must_use]
    pub fn repeatable(mut self, spec: RepeatableSpec) -> Self {
        self.repeatable = Some(spec);
        self
    }

    /// Computes the value from sibling fields. Derived fields are read-only.
    #[must_use]
    pub fn derived(mut self, spec: DerivedSpec) -> Self {
        self.derived = Some(spec);
        self.read_only = true;
        self
    }

    /// Makes the field read-only.
    #[must_use]
    pub const fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }
}

impl std::fmt::Debug for FieldDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("label", &self.label)
            .field("placeholder", &self.placeholder)
            .field("options", &self.options)
            .field("default", &self.default)
            .field("depends_on", &self.depends_on)
            .field("loader", &self.loader.is_some())
            .field("grid", &self.grid)
            .field("repeatable", &self.repeatable)
            .field("derived", &self.derived)
            .field("read_only", &self.read_only)
            .finish()
    }
}
