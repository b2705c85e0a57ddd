// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::descriptor::{
    FieldDescriptor, FieldMap, FieldOption, FieldValue, OptionsFuture, RepeatableSpec,
};
use super::registry::{Widget, WidgetRegistry};
use super::schema::{FieldErrors, ValidationRule, ValidationSchema};
use crate::error::SubmitError;
use crate::generation::{Generation, GenerationToken};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::future::Future;
use tracing::{debug, warn};

/// An option load the caller must run for a dependent field.
///
/// Pass the result back through [`FormEngine::apply_options`]; it is applied
/// only if no newer load for the same field has started since.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptionLoadRequest {
    /// The field whose options are loaded.
    pub field: String,
    /// Identifies this load among the loads of the field.
    pub token: GenerationToken,
    /// The current values of the fields it depends on.
    pub dependencies: FieldMap,
}

/// A field ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedField {
    /// DOM identifier.
    pub id: String,
    /// Value path. Sub-fields use `group.<index>.sub`.
    pub name: String,
    /// Label text.
    pub label: String,
    /// The resolved widget.
    pub widget: Widget,
    /// Placeholder text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Current value.
    pub value: FieldValue,
    /// Current options of select-like widgets.
    pub options: Vec<FieldOption>,
    /// Whether options are being loaded.
    pub loading: bool,
    /// Whether the user can edit the value.
    pub read_only: bool,
    /// Grid column span.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid: Option<u8>,
    /// Visible validation message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Rendered sub-fields, one list per item of a repeatable group.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<Vec<RenderedField>>,
}

#[derive(Debug, Clone, Default)]
struct OptionState {
    options: Vec<FieldOption>,
    loading: bool,
    generation: Generation,
}

/// Clears the submitting flag even if the submit future is dropped.
struct SubmittingGuard<'a>(&'a mut bool);

impl Drop for SubmittingGuard<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}

/// State of one form built from field descriptors.
///
/// The engine never performs I/O. Option loads are handed to the caller as
/// [`OptionLoadRequest`]s, and [`FormEngine::load_dependents`] is provided
/// for callers that simply want to await them.
#[derive(Debug, Clone)]
pub struct FormEngine {
    fields: Vec<FieldDescriptor>,
    schema: ValidationSchema,
    registry: WidgetRegistry,
    values: FieldMap,
    touched: BTreeSet<String>,
    errors: FieldErrors,
    option_state: BTreeMap<String, OptionState>,
    submit_attempted: bool,
    submitting: bool,
}

impl FormEngine {
    /// Creates a form using the standard widget registry.
    ///
    /// # Arguments
    ///
    /// * `fields` - The field descriptors in display order
    /// * `schema` - The validation rules
    /// * `defaults` - Initial values; fields absent here use their own default
    #[must_use]
    pub fn new(fields: Vec<FieldDescriptor>, schema: ValidationSchema, defaults: FieldMap) -> Self {
        let mut values: FieldMap = FieldMap::new();
        let mut option_state: BTreeMap<String, OptionState> = BTreeMap::new();

        for field in &fields {
            if field.kind.is_decorative() {
                continue;
            }
            let value: FieldValue = defaults
                .get(&field.name)
                .cloned()
                .unwrap_or_else(|| initial_value(field));
            values.insert(field.name.clone(), value);
            option_state.insert(
                field.name.clone(),
                OptionState {
                    options: field.options.clone(),
                    ..OptionState::default()
                },
            );
        }

        let mut engine: Self = Self {
            fields,
            schema,
            registry: WidgetRegistry::standard(),
            values,
            touched: BTreeSet::new(),
            errors: FieldErrors::new(),
            option_state,
            submit_attempted: false,
            submitting: false,
        };
        engine.refresh();
        engine
    }

    /// Replaces the widget registry.
    #[must_use]
    pub fn with_registry(mut self, registry: WidgetRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Returns the field descriptors.
    #[must_use]
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    fn descriptor(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Returns the current value of `name`.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    /// Returns a copy of every value.
    #[must_use]
    pub fn snapshot(&self) -> FieldMap {
        self.values.clone()
    }

    /// Returns the current options of `name`.
    #[must_use]
    pub fn options(&self, name: &str) -> &[FieldOption] {
        self.option_state
            .get(name)
            .map(|state| state.options.as_slice())
            .unwrap_or_default()
    }

    /// Returns whether options of `name` are being loaded.
    #[must_use]
    pub fn is_loading(&self, name: &str) -> bool {
        self.option_state.get(name).is_some_and(|state| state.loading)
    }

    /// Starts the first load of every field that has a loader.
    pub fn initial_loads(&mut self) -> Vec<OptionLoadRequest> {
        let names: Vec<String> = self
            .fields
            .iter()
            .filter(|field| field.loader.is_some())
            .map(|field| field.name.clone())
            .collect();
        names
            .iter()
            .filter_map(|name| self.request_load(name))
            .collect()
    }

    /// Stores a value entered by the user.
    ///
    /// Fields depending on `name`, directly or through another dependent
    /// field, are reset to their default and their options reloaded. Unknown
    /// and read-only fields are ignored.
    ///
    /// # Returns
    ///
    /// The loads the caller must run.
    pub fn set_value(&mut self, name: &str, value: FieldValue) -> Vec<OptionLoadRequest> {
        match self.descriptor(name) {
            None => {
                warn!(field = name, "Ignoring value for unknown field");
                return Vec::new();
            }
            Some(field) if field.read_only || field.kind.is_decorative() => {
                debug!(field = name, "Ignoring value for read-only field");
                return Vec::new();
            }
            Some(field)
                if field
                    .repeatable
                    .as_ref()
                    .is_some_and(|spec| !spec.allows(value.item_count())) =>
            {
                warn!(
                    field = name,
                    items = value.item_count(),
                    "Ignoring group outside its item bounds"
                );
                return Vec::new();
            }
            Some(_) => {}
        }

        self.values.insert(name.to_owned(), value);
        self.touched.insert(name.to_owned());

        let mut requests: Vec<OptionLoadRequest> = Vec::new();
        for dependent in self.dependents_of(name) {
            if let Some(default) = self.descriptor(&dependent).map(initial_value) {
                self.values.insert(dependent.clone(), default);
            }
            if let Some(request) = self.request_load(&dependent) {
                requests.push(request);
            }
        }

        self.refresh();
        requests
    }

    /// Collects the transitive dependents of `name` in declaration order.
    fn dependents_of(&self, name: &str) -> Vec<String> {
        let mut found: Vec<String> = Vec::new();
        let mut visited: BTreeSet<String> = BTreeSet::from([name.to_owned()]);
        let mut pending: Vec<String> = vec![name.to_owned()];

        while let Some(current) = pending.pop() {
            for field in &self.fields {
                if field.depends_on.iter().any(|dep| *dep == current)
                    && visited.insert(field.name.clone())
                {
                    found.push(field.name.clone());
                    pending.push(field.name.clone());
                }
            }
        }

        found
    }

    /// Starts a load for `name`, superseding any load still in flight.
    ///
    /// Current options are cleared until the result arrives.
    fn request_load(&mut self, name: &str) -> Option<OptionLoadRequest> {
        let field: &FieldDescriptor = self.descriptor(name)?;
        field.loader.as_ref()?;
        let dependencies: FieldMap = field
            .depends_on
            .iter()
            .map(|dep| {
                (
                    dep.clone(),
                    self.values.get(dep).cloned().unwrap_or_default(),
                )
            })
            .collect();

        let state: &mut OptionState = self.option_state.entry(name.to_owned()).or_default();
        let token: GenerationToken = state.generation.advance();
        state.loading = true;
        state.options.clear();
        debug!(field = name, token = token.value(), "Loading options");

        Some(OptionLoadRequest {
            field: name.to_owned(),
            token,
            dependencies,
        })
    }

    /// Marks a field as touched, making its error visible.
    pub fn touch(&mut self, name: &str) {
        self.touched.insert(name.to_owned());
    }

    /// Returns the future of a load request, or `None` if the field has no
    /// loader.
    #[must_use]
    pub fn start_load(&self, request: &OptionLoadRequest) -> Option<OptionsFuture> {
        self.descriptor(&request.field)
            .and_then(|field| field.loader.as_ref())
            .map(|loader| loader(request.dependencies.clone()))
    }

    /// Applies the outcome of a load.
    ///
    /// A failed load leaves the options empty.
    ///
    /// # Returns
    ///
    /// `false` if a newer load of the same field was started after
    /// `request`, in which case the outcome is discarded.
    pub fn apply_options(
        &mut self,
        request: &OptionLoadRequest,
        result: Result<Vec<FieldOption>, String>,
    ) -> bool {
        let Some(state) = self.option_state.get_mut(&request.field) else {
            return false;
        };
        if !state.generation.is_current(request.token) {
            debug!(
                field = %request.field,
                token = request.token.value(),
                "Discarding superseded option load"
            );
            return false;
        }

        state.loading = false;
        match result {
            Ok(options) => state.options = options,
            Err(message) => {
                warn!(field = %request.field, error = %message, "Option load failed");
                state.options.clear();
            }
        }
        true
    }

    /// Runs `requests` concurrently and applies their results.
    pub async fn load_dependents(&mut self, requests: Vec<OptionLoadRequest>) {
        let mut pending: Vec<(OptionLoadRequest, OptionsFuture)> = Vec::new();
        for request in requests {
            if let Some(future) = self.start_load(&request) {
                pending.push((request, future));
            }
        }

        let (requests, futures): (Vec<OptionLoadRequest>, Vec<OptionsFuture>) =
            pending.into_iter().unzip();
        let results: Vec<Result<Vec<FieldOption>, String>> =
            futures::future::join_all(futures).await;

        for (request, result) in requests.iter().zip(results) {
            self.apply_options(request, result);
        }
    }

    fn group_spec(&self, group: &str) -> Option<&RepeatableSpec> {
        self.descriptor(group)
            .and_then(|field| field.repeatable.as_ref())
    }

    fn group_items_mut(&mut self, group: &str) -> Option<&mut Vec<FieldMap>> {
        match self.values.get_mut(group) {
            Some(FieldValue::Group(items)) => Some(items),
            _ => None,
        }
    }

    /// Returns the items of a repeatable group.
    #[must_use]
    pub fn items(&self, group: &str) -> &[FieldMap] {
        self.values
            .get(group)
            .and_then(FieldValue::as_group)
            .unwrap_or_default()
    }

    /// Appends an item pre-filled with the sub-field defaults.
    ///
    /// Does nothing if the group already holds its maximum.
    ///
    /// # Returns
    ///
    /// Whether an item was added.
    pub fn add_item(&mut self, group: &str) -> bool {
        let Some(spec) = self.group_spec(group) else {
            return false;
        };
        let max_items: Option<usize> = spec.max_items;
        let item: FieldMap = spec.default_item();

        if self.group_items_mut(group).is_none() {
            self.values
                .insert(group.to_owned(), FieldValue::Group(Vec::new()));
        }
        let Some(items) = self.group_items_mut(group) else {
            return false;
        };
        if max_items.is_some_and(|max| items.len() >= max) {
            debug!(group, "Group is full");
            return false;
        }
        items.push(item);
        self.refresh();
        true
    }

    /// Removes the item at `index`.
    ///
    /// Does nothing if the group holds its minimum or `index` is out of range.
    ///
    /// # Returns
    ///
    /// Whether an item was removed.
    pub fn remove_item(&mut self, group: &str, index: usize) -> bool {
        let Some(min_items) = self.group_spec(group).map(|spec| spec.min_items) else {
            return false;
        };
        let Some(items) = self.group_items_mut(group) else {
            return false;
        };
        if items.len() <= min_items || index >= items.len() {
            debug!(group, index, "Item not removed");
            return false;
        }
        items.remove(index);
        self.refresh();
        true
    }

    /// Stores a value inside one item of a repeatable group.
    ///
    /// # Returns
    ///
    /// Whether the value was stored.
    pub fn set_item_value(
        &mut self,
        group: &str,
        index: usize,
        sub_field: &str,
        value: FieldValue,
    ) -> bool {
        let editable: bool = self
            .group_spec(group)
            .and_then(|spec| spec.field(sub_field))
            .is_some_and(|field| !field.read_only && !field.kind.is_decorative());
        if !editable {
            return false;
        }
        let Some(item) = self
            .group_items_mut(group)
            .and_then(|items| items.get_mut(index))
        else {
            return false;
        };
        item.insert(sub_field.to_owned(), value);
        self.touched.insert(format!("{group}.{index}.{sub_field}"));
        self.refresh();
        true
    }

    /// Recomputes derived fields and validation.
    fn refresh(&mut self) {
        for field in &self.fields {
            if let Some(spec) = &field.derived {
                let value: FieldValue = spec.compute(&self.values);
                self.values.insert(field.name.clone(), value);
            }
            if let Some(spec) = &field.repeatable {
                let Some(FieldValue::Group(items)) = self.values.get_mut(&field.name) else {
                    continue;
                };
                for item in items.iter_mut() {
                    for sub in &spec.fields {
                        if let Some(derived) = &sub.derived {
                            let value: FieldValue = derived.compute(item);
                            item.insert(sub.name.clone(), value);
                        }
                    }
                }
            }
        }
        self.errors = self.schema.validate(&self.values);
        self.check_group_bounds();
    }

    /// Reports repeatable groups whose item count is outside their bounds.
    ///
    /// Defaults are never clamped.
    fn check_group_bounds(&mut self) {
        for field in &self.fields {
            let Some(spec) = &field.repeatable else {
                continue;
            };
            if self.errors.contains_key(&field.name) {
                continue;
            }
            let value: &FieldValue = self.values.get(&field.name).unwrap_or(&FieldValue::Empty);
            let mut rules: Vec<ValidationRule> = vec![ValidationRule::MinItems(spec.min_items)];
            if let Some(max) = spec.max_items {
                rules.push(ValidationRule::MaxItems(max));
            }
            if let Some(message) = rules.iter().find_map(|rule| rule.check(value)) {
                self.errors.insert(field.name.clone(), message);
            }
        }
    }

    /// Returns every current validation error, visible or not.
    #[must_use]
    pub const fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    fn is_visible(&self, path: &str) -> bool {
        if self.submit_attempted || self.touched.contains(path) {
            return true;
        }
        path.split_once('.')
            .is_some_and(|(group, _)| self.touched.contains(group))
    }

    /// Returns the errors of touched fields, or all errors after a submit
    /// attempt.
    #[must_use]
    pub fn visible_errors(&self) -> FieldErrors {
        self.errors
            .iter()
            .filter(|(path, _)| self.is_visible(path))
            .map(|(path, message)| (path.clone(), message.clone()))
            .collect()
    }

    /// Returns the visible error of `path`.
    #[must_use]
    pub fn error_for(&self, path: &str) -> Option<&str> {
        if !self.is_visible(path) {
            return None;
        }
        self.errors.get(path).map(String::as_str)
    }

    /// Returns whether an async submission is pending.
    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Returns whether submit was attempted at least once.
    #[must_use]
    pub const fn submit_attempted(&self) -> bool {
        self.submit_attempted
    }

    fn validate_for_submit(&mut self) -> Result<FieldMap, SubmitError> {
        self.submit_attempted = true;
        self.refresh();
        if self.errors.is_empty() {
            Ok(self.snapshot())
        } else {
            debug!(fields = self.errors.len(), "Form submission rejected");
            Err(SubmitError::Invalid(self.errors.clone()))
        }
    }

    /// Validates every value and hands the data to `on_submit`.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError::Invalid`] with every field error if validation
    /// fails. `on_submit` is not called in that case.
    pub fn submit<R, F>(&mut self, on_submit: F) -> Result<R, SubmitError>
    where
        F: FnOnce(FieldMap) -> R,
    {
        let data: FieldMap = self.validate_for_submit()?;
        Ok(on_submit(data))
    }

    /// Async variant of [`FormEngine::submit`].
    ///
    /// [`FormEngine::is_submitting`] reports `true` while the returned future
    /// is pending.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError::Invalid`] if validation fails.
    pub async fn submit_async<R, F, Fut>(&mut self, on_submit: F) -> Result<R, SubmitError>
    where
        F: FnOnce(FieldMap) -> Fut,
        Fut: Future<Output = R>,
    {
        let data: FieldMap = self.validate_for_submit()?;
        self.submitting = true;
        let _guard: SubmittingGuard<'_> = SubmittingGuard(&mut self.submitting);
        Ok(on_submit(data).await)
    }

    /// Renders every field in declaration order.
    #[must_use]
    pub fn render(&self) -> Vec<RenderedField> {
        self.fields
            .iter()
            .map(|field| self.render_field(field))
            .collect()
    }

    fn render_field(&self, field: &FieldDescriptor) -> RenderedField {
        let items: Vec<Vec<RenderedField>> = field
            .repeatable
            .as_ref()
            .map(|spec| {
                self.items(&field.name)
                    .iter()
                    .enumerate()
                    .map(|(index, item)| {
                        spec.fields
                            .iter()
                            .map(|sub| {
                                let path: String = format!("{}.{index}.{}", field.name, sub.name);
                                RenderedField {
                                    id: format!("{}-{index}-{}", field.id, sub.id),
                                    label: sub.label.clone(),
                                    widget: self.registry.resolve_kind(sub.kind),
                                    placeholder: sub.placeholder.clone(),
                                    value: item.get(&sub.name).cloned().unwrap_or_default(),
                                    options: sub.options.clone(),
                                    loading: false,
                                    read_only: sub.read_only,
                                    grid: sub.grid,
                                    error: self.error_for(&path).map(str::to_owned),
                                    items: Vec::new(),
                                    name: path,
                                }
                            })
                            .collect()
                    })
                    .collect()
            })
            .unwrap_or_default();

        RenderedField {
            id: field.id.clone(),
            name: field.name.clone(),
            label: field.label.clone(),
            widget: self.registry.resolve_kind(field.kind),
            placeholder: field.placeholder.clone(),
            value: self.values.get(&field.name).cloned().unwrap_or_default(),
            options: self.options(&field.name).to_vec(),
            loading: self.is_loading(&field.name),
            read_only: field.read_only,
            grid: field.grid,
            error: self.error_for(&field.name).map(str::to_owned),
            items,
        }
    }
}

/// The value a field starts with: its default, or for an empty repeatable
/// group, `min_items` default items.
fn initial_value(field: &FieldDescriptor) -> FieldValue {
    match (&field.repeatable, &field.default) {
        (Some(spec), FieldValue::Empty) => {
            FieldValue::Group((0..spec.min_items).map(|_| spec.default_item()).collect())
        }
        _ => field.default.clone(),
    }
}

