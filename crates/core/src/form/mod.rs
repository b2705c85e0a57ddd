// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Schema-driven forms.
//!
//! A form is a list of [`FieldDescriptor`]s plus a [`ValidationSchema`].
//! The [`FormEngine`] holds values, option lists and errors, and a
//! [`WidgetRegistry`] tells renderers how to draw each field kind.

mod descriptor;
mod engine;
mod registry;
mod schema;

pub use descriptor::{
    DerivedOp, DerivedSpec, FieldDescriptor, FieldKind, FieldMap, FieldOption, FieldValue,
    OptionLoader, OptionsFuture, RepeatableSpec,
};
pub use engine::{FormEngine, OptionLoadRequest, RenderedField};
pub use registry::{Widget, WidgetRegistry};
pub use schema::{FieldErrors, ValidationRule, ValidationSchema};
