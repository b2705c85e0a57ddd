// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::descriptor::FieldKind;
use serde::Serialize;
use std::collections::HashMap;
use tracing::warn;

/// Describes how a renderer draws a field kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Widget {
    /// The kind this widget renders.
    pub kind: FieldKind,
    /// Name of the renderer component.
    pub component: &'static str,
    /// The HTML input type, for widgets backed by an `<input>`.
    pub input_type: Option<&'static str>,
    /// Whether the widget holds several values.
    pub multiple: bool,
    /// Whether the widget shows an option list.
    pub has_options: bool,
}

impl Widget {
    /// The single-line text widget, also used for unknown kinds.
    #[must_use]
    pub const fn text() -> Self {
        Self::input(FieldKind::Text, "text")
    }

    const fn input(kind: FieldKind, input_type: &'static str) -> Self {
        Self {
            kind,
            component: "input",
            input_type: Some(input_type),
            multiple: false,
            has_options: false,
        }
    }

    const fn component(kind: FieldKind, component: &'static str) -> Self {
        Self {
            kind,
            component,
            input_type: None,
            multiple: false,
            has_options: false,
        }
    }

    const fn choice(kind: FieldKind, component: &'static str, multiple: bool) -> Self {
        Self {
            kind,
            component,
            input_type: None,
            multiple,
            has_options: true,
        }
    }
}

/// Maps field kinds to widgets.
#[derive(Debug, Clone, Default)]
pub struct WidgetRegistry {
    widgets: HashMap<FieldKind, Widget>,
}

impl WidgetRegistry {
    /// Creates a registry with no widgets. Every kind resolves to text.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a registry with a widget for every [`FieldKind`].
    #[must_use]
    pub fn standard() -> Self {
        let mut registry: Self = Self::empty();
        for widget in [
            Widget::text(),
            Widget::input(FieldKind::Number, "number"),
            Widget::input(FieldKind::Email, "email"),
            Widget::input(FieldKind::Password, "password"),
            Widget::choice(FieldKind::Select, "select", false),
            Widget::choice(FieldKind::Multiselect, "select", true),
            Widget::choice(FieldKind::Radio, "radio-group", false),
            Widget::input(FieldKind::Checkbox, "checkbox"),
            Widget::component(FieldKind::Toggle, "switch"),
            Widget::input(FieldKind::File, "file"),
            Widget::input(FieldKind::Date, "date"),
            Widget::input(FieldKind::Range, "range"),
            Widget::input(FieldKind::Color, "color"),
            Widget {
                multiple: true,
                ..Widget::component(FieldKind::Tags, "tag-input")
            },
            Widget::component(FieldKind::Richtext, "rich-text-editor"),
            Widget::choice(FieldKind::DynamicSelect, "select", false),
            Widget {
                multiple: true,
                ..Widget::component(FieldKind::Repeatable, "repeatable-group")
            },
            Widget::component(FieldKind::Section, "section-heading"),
            Widget::component(FieldKind::Textarea, "textarea"),
        ] {
            registry.register(widget);
        }
        registry
    }

    /// Registers `widget` for its kind, replacing any previous widget.
    pub fn register(&mut self, widget: Widget) {
        self.widgets.insert(widget.kind, widget);
    }

    /// Returns the widget registered for `kind`, if any.
    #[must_use]
    pub fn widget(&self, kind: FieldKind) -> Option<&Widget> {
        self.widgets.get(&kind)
    }

    /// Returns the widget for `kind`, or the text widget when none is
    /// registered.
    #[must_use]
    pub fn resolve_kind(&self, kind: FieldKind) -> Widget {
        if let Some(widget) = self.widgets.get(&kind) {
            return *widget;
        }
        warn!(kind = %kind, "No widget registered, rendering as text");
        self.widgets
            .get(&FieldKind::Text)
            .copied()
            .unwrap_or_else(Widget::text)
    }

    /// Resolves a kind name to a widget.
    ///
    /// Unknown names fall back to the text widget.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Widget {
        match FieldKind::parse(name) {
            Some(kind) => self.resolve_kind(kind),
            None => {
                warn!(kind = name, "Unknown field kind, rendering as text");
                self.widgets
                    .get(&FieldKind::Text)
                    .copied()
                    .unwrap_or_else(Widget::text)
            }
        }
    }
}
