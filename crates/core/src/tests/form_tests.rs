// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    DerivedOp, DerivedSpec, FieldDescriptor, FieldErrors, FieldKind, FieldMap, FieldOption,
    FieldValue, FormEngine, OptionLoadRequest, RenderedField, SubmitError, ValidationRule,
    ValidationSchema, Widget, WidgetRegistry,
};

use super::helpers::{
    city_options, create_location_fields, create_pack_fields, create_pack_schema,
};

fn create_location_form() -> FormEngine {
    FormEngine::new(
        create_location_fields(),
        ValidationSchema::new()
            .field("country", vec![ValidationRule::Required])
            .field("city", vec![ValidationRule::Required]),
        FieldMap::new(),
    )
}

fn create_pack_form() -> FormEngine {
    FormEngine::new(create_pack_fields(), create_pack_schema(), FieldMap::new())
}

fn option_values(engine: &FormEngine, field: &str) -> Vec<String> {
    engine
        .options(field)
        .iter()
        .map(|option| option.value.clone())
        .collect()
}

fn single_request(mut requests: Vec<OptionLoadRequest>) -> OptionLoadRequest {
    assert_eq!(requests.len(), 1);
    requests.remove(0)
}

#[test]
fn test_every_kind_has_a_standard_widget() {
    let registry: WidgetRegistry = WidgetRegistry::standard();

    for kind in FieldKind::ALL {
        assert_eq!(registry.widget(kind).map(|w| w.kind), Some(kind));
    }
    assert!(registry.resolve("dynamic-select").has_options);
    assert!(registry.resolve("multiselect").multiple);
}

#[test]
fn test_unknown_kind_names_resolve_to_text() {
    let registry: WidgetRegistry = WidgetRegistry::standard();

    let widget: Widget = registry.resolve("wysiwyg-3000");

    assert_eq!(widget, Widget::text());
    assert_eq!(FieldKind::parse("Dynamic-Select"), Some(FieldKind::DynamicSelect));
    assert_eq!(FieldKind::parse("wysiwyg-3000"), None);
}

#[test]
fn test_empty_registry_renders_everything_as_text() {
    let engine: FormEngine = create_location_form().with_registry(WidgetRegistry::empty());

    let fields: Vec<RenderedField> = engine.render();

    assert!(fields.iter().all(|field| field.widget.kind == FieldKind::Text));
}

#[test]
fn test_changing_a_dependency_starts_a_load() {
    let mut engine: FormEngine = create_location_form();

    let request: OptionLoadRequest =
        single_request(engine.set_value("country", FieldValue::text("A")));

    assert_eq!(request.field, "city");
    assert_eq!(
        request.dependencies.get("country"),
        Some(&FieldValue::text("A"))
    );
    assert!(engine.is_loading("city"));
    assert!(engine.options("city").is_empty());
}

#[test]
fn test_only_the_latest_load_is_applied_when_results_arrive_out_of_order() {
    let mut engine: FormEngine = create_location_form();
    let first: OptionLoadRequest =
        single_request(engine.set_value("country", FieldValue::text("A")));
    let second: OptionLoadRequest =
        single_request(engine.set_value("country", FieldValue::text("B")));

    assert!(engine.apply_options(&second, Ok(city_options(&second.dependencies))));
    assert!(!engine.apply_options(&first, Ok(city_options(&first.dependencies))));

    assert_eq!(option_values(&engine, "city"), vec!["B-n", "B-s"]);
    assert!(!engine.is_loading("city"));
}

#[test]
fn test_only_the_latest_load_is_applied_when_results_arrive_in_order() {
    let mut engine: FormEngine = create_location_form();
    let first: OptionLoadRequest =
        single_request(engine.set_value("country", FieldValue::text("A")));
    let second: OptionLoadRequest =
        single_request(engine.set_value("country", FieldValue::text("B")));

    assert!(!engine.apply_options(&first, Ok(city_options(&first.dependencies))));
    assert!(engine.is_loading("city"));
    assert!(engine.apply_options(&second, Ok(city_options(&second.dependencies))));

    assert_eq!(option_values(&engine, "city"), vec!["B-n", "B-s"]);
}

#[tokio::test]
async fn test_load_dependents_runs_the_loader() {
    let mut engine: FormEngine = create_location_form();
    let mut requests: Vec<OptionLoadRequest> = engine.set_value("country", FieldValue::text("A"));
    requests.extend(engine.set_value("country", FieldValue::text("B")));

    engine.load_dependents(requests).await;

    assert_eq!(option_values(&engine, "city"), vec!["B-n", "B-s"]);
    assert!(!engine.is_loading("city"));
}

#[test]
fn test_failed_load_clears_loading_and_leaves_no_options() {
    let mut engine: FormEngine = create_location_form();
    let request: OptionLoadRequest =
        single_request(engine.set_value("country", FieldValue::text("A")));

    assert!(engine.apply_options(&request, Err(String::from("timeout"))));

    assert!(!engine.is_loading("city"));
    assert!(engine.options("city").is_empty());
}

#[test]
fn test_changing_a_dependency_resets_the_dependent_value() {
    let mut engine: FormEngine = create_location_form();
    engine.set_value("country", FieldValue::text("A"));
    engine.set_value("city", FieldValue::text("A-n"));

    engine.set_value("country", FieldValue::text("B"));

    assert_eq!(engine.value("city"), Some(&FieldValue::Empty));
}

#[test]
fn test_initial_loads_cover_every_loader() {
    let mut engine: FormEngine = create_location_form();

    let request: OptionLoadRequest = single_request(engine.initial_loads());

    assert_eq!(request.field, "city");
    assert!(engine.is_loading("city"));
}

#[test]
fn test_values_for_unknown_fields_are_ignored() {
    let mut engine: FormEngine = create_location_form();

    let requests: Vec<OptionLoadRequest> = engine.set_value("planet", FieldValue::text("Mars"));

    assert!(requests.is_empty());
    assert!(engine.value("planet").is_none());
}

#[test]
fn test_repeatable_group_starts_with_min_items() {
    let engine: FormEngine = create_pack_form();

    assert_eq!(engine.items("pack_sizes").len(), 1);
    assert_eq!(
        engine.items("pack_sizes")[0].get("units_per_pack"),
        Some(&FieldValue::Number(1.0))
    );
}

#[test]
fn test_add_item_at_max_items_is_a_noop() {
    let mut engine: FormEngine = create_pack_form();

    assert!(engine.add_item("pack_sizes"));
    assert!(engine.add_item("pack_sizes"));
    assert!(!engine.add_item("pack_sizes"));

    assert_eq!(engine.items("pack_sizes").len(), 3);
}

#[test]
fn test_remove_item_at_min_items_is_a_noop() {
    let mut engine: FormEngine = create_pack_form();

    assert!(!engine.remove_item("pack_sizes", 0));
    assert_eq!(engine.items("pack_sizes").len(), 1);

    engine.add_item("pack_sizes");
    assert!(!engine.remove_item("pack_sizes", 5));
    assert!(engine.remove_item("pack_sizes", 1));
    assert_eq!(engine.items("pack_sizes").len(), 1);
}

fn pack_items(count: usize) -> FieldValue {
    FieldValue::Group(
        (0..count)
            .map(|i| {
                FieldMap::from([(String::from("label"), FieldValue::text(&format!("Pack {i}")))])
            })
            .collect(),
    )
}

#[test]
fn test_set_value_rejects_group_outside_bounds() {
    let mut engine: FormEngine = create_pack_form();

    engine.set_value("pack_sizes", pack_items(4));
    assert_eq!(engine.items("pack_sizes").len(), 1);

    engine.set_value("pack_sizes", pack_items(0));
    assert_eq!(engine.items("pack_sizes").len(), 1);

    engine.set_value("pack_sizes", pack_items(3));
    assert_eq!(engine.items("pack_sizes").len(), 3);
}

#[test]
fn test_oversized_default_group_fails_submit() {
    let defaults: FieldMap = FieldMap::from([
        (String::from("name"), FieldValue::text("Cardiol")),
        (String::from("pack_sizes"), pack_items(5)),
    ]);
    let mut engine: FormEngine =
        FormEngine::new(create_pack_fields(), create_pack_schema(), defaults);
    let mut called: bool = false;

    let result: Result<(), SubmitError> = engine.submit(|_| called = true);

    match result {
        Err(SubmitError::Invalid(errors)) => {
            assert_eq!(errors["pack_sizes"], "Add at most 3 items");
        }
        other => panic!("expected validation errors, got {other:?}"),
    }
    assert!(!called);
}

#[test]
fn test_undersized_default_group_fails_validation() {
    let defaults: FieldMap =
        FieldMap::from([(String::from("pack_sizes"), FieldValue::Group(Vec::new()))]);
    let engine: FormEngine = FormEngine::new(create_pack_fields(), create_pack_schema(), defaults);

    assert_eq!(engine.errors()["pack_sizes"], "Add at least 1 item");
}

#[test]
fn test_derived_sub_field_tracks_its_inputs() {
    let mut engine: FormEngine = create_pack_form();

    assert_eq!(
        engine.items("pack_sizes")[0].get("units_per_carton"),
        Some(&FieldValue::Empty)
    );

    engine.set_item_value("pack_sizes", 0, "units_per_pack", FieldValue::Number(10.0));
    engine.set_item_value("pack_sizes", 0, "packs_per_carton", FieldValue::text("20"));

    assert_eq!(
        engine.items("pack_sizes")[0].get("units_per_carton"),
        Some(&FieldValue::Number(200.0))
    );
}

#[test]
fn test_derived_fields_cannot_be_set() {
    let mut engine: FormEngine = create_pack_form();

    assert!(!engine.set_item_value(
        "pack_sizes",
        0,
        "units_per_carton",
        FieldValue::Number(5.0)
    ));
}

#[test]
fn test_top_level_derived_sum() {
    let fields: Vec<FieldDescriptor> = vec![
        FieldDescriptor::new("doctors", FieldKind::Number, "Doctors"),
        FieldDescriptor::new("chemists", FieldKind::Number, "Chemists"),
        FieldDescriptor::new("total", FieldKind::Number, "Total calls")
            .derived(DerivedSpec::new(&["doctors", "chemists"], DerivedOp::Sum)),
    ];
    let mut engine: FormEngine = FormEngine::new(fields, ValidationSchema::new(), FieldMap::new());

    engine.set_value("doctors", FieldValue::Number(6.0));
    assert_eq!(engine.value("total"), Some(&FieldValue::Empty));
    engine.set_value("chemists", FieldValue::Number(4.0));
    assert_eq!(engine.value("total"), Some(&FieldValue::Number(10.0)));

    engine.set_value("total", FieldValue::Number(99.0));
    assert_eq!(engine.value("total"), Some(&FieldValue::Number(10.0)));
}

#[test]
fn test_errors_stay_hidden_until_touched() {
    let mut engine: FormEngine = create_pack_form();

    assert!(engine.errors().contains_key("name"));
    assert!(engine.visible_errors().is_empty());

    engine.touch("name");

    assert_eq!(engine.error_for("name"), Some("This field is required"));
    assert!(engine.error_for("pack_sizes.0.label").is_none());
}

#[test]
fn test_failed_submit_reports_errors_without_calling_handler() {
    let mut engine: FormEngine = create_pack_form();
    let mut calls: u32 = 0;

    let result: Result<(), SubmitError> = engine.submit(|_| calls += 1);

    assert_eq!(calls, 0);
    let Err(SubmitError::Invalid(errors)) = result else {
        panic!("expected validation failure");
    };
    let paths: Vec<&str> = errors.keys().map(String::as_str).collect();
    assert_eq!(paths, vec!["name", "pack_sizes.0.label"]);
    assert_eq!(engine.visible_errors().len(), 2);
}

#[test]
fn test_successful_submit_calls_handler_once_with_data() {
    let mut engine: FormEngine = create_pack_form();
    engine.set_value("name", FieldValue::text("Cardiol"));
    engine.set_item_value("pack_sizes", 0, "label", FieldValue::text("10 tablets"));
    let mut calls: u32 = 0;

    let name: FieldValue = engine
        .submit(|data: FieldMap| {
            calls += 1;
            data.get("name").cloned().unwrap_or_default()
        })
        .unwrap();

    assert_eq!(calls, 1);
    assert_eq!(name, FieldValue::text("Cardiol"));
}

#[tokio::test]
async fn test_async_submit_clears_the_submitting_flag() {
    let mut engine: FormEngine = create_pack_form();
    engine.set_value("name", FieldValue::text("Cardiol"));
    engine.set_item_value("pack_sizes", 0, "label", FieldValue::text("Strip"));

    let saved: usize = engine
        .submit_async(|data: FieldMap| async move { data.len() })
        .await
        .unwrap();

    assert_eq!(saved, 2);
    assert!(!engine.is_submitting());
    assert!(engine.submit_attempted());
}

#[test]
fn test_validation_rules() {
    let schema: ValidationSchema = ValidationSchema::new()
        .field("email", vec![ValidationRule::Email])
        .field(
            "code",
            vec![ValidationRule::pattern("^[A-Z]{3}-[0-9]+$", "Use a code like CAR-10").unwrap()],
        )
        .field("launch", vec![ValidationRule::Date])
        .field("price", vec![ValidationRule::Min(0.0), ValidationRule::Max(1000.0)])
        .field("name", vec![ValidationRule::MinLength(2), ValidationRule::MaxLength(5)])
        .field("tags", vec![ValidationRule::MinItems(1)])
        .field("sizes", vec![ValidationRule::MaxItems(2)]);

    let mut values: FieldMap = FieldMap::new();
    values.insert(String::from("email"), FieldValue::text("rep@"));
    values.insert(String::from("code"), FieldValue::text("car10"));
    values.insert(String::from("launch"), FieldValue::text("2026-02-30"));
    values.insert(String::from("price"), FieldValue::Number(-1.0));
    values.insert(String::from("name"), FieldValue::text("x"));
    values.insert(String::from("tags"), FieldValue::List(vec![]));
    values.insert(
        String::from("sizes"),
        FieldValue::List(vec![String::from("S"), String::from("M"), String::from("L")]),
    );

    let errors: FieldErrors = schema.validate(&values);

    assert_eq!(errors["email"], "Enter a valid email address");
    assert_eq!(errors["code"], "Use a code like CAR-10");
    assert_eq!(errors["launch"], "Enter a date as YYYY-MM-DD");
    assert_eq!(errors["price"], "Must be at least 0");
    assert_eq!(errors["name"], "Must be at least 2 characters");
    assert_eq!(errors["tags"], "Add at least 1 item");
    assert_eq!(errors["sizes"], "Add at most 2 items");

    values.insert(String::from("email"), FieldValue::text("rep@ceutro.in"));
    values.insert(String::from("code"), FieldValue::text("CAR-10"));
    values.insert(String::from("launch"), FieldValue::text("2026-02-28"));
    values.insert(String::from("price"), FieldValue::text("12.5"));
    values.insert(String::from("name"), FieldValue::text("Pens"));
    values.insert(
        String::from("tags"),
        FieldValue::List(vec![String::from("cardio")]),
    );
    values.insert(String::from("sizes"), FieldValue::List(vec![String::from("S")]));

    assert!(schema.validate(&values).is_empty());
}

#[test]
fn test_optional_rules_accept_empty_values() {
    let schema: ValidationSchema = ValidationSchema::new()
        .field("email", vec![ValidationRule::Email, ValidationRule::MinLength(3)]);

    assert!(schema.validate(&FieldMap::new()).is_empty());
}

#[test]
fn test_render_includes_options_errors_and_group_items() {
    let mut engine: FormEngine = create_pack_form();
    engine.add_item("pack_sizes");
    engine.touch("pack_sizes");

    let fields: Vec<RenderedField> = engine.render();

    assert_eq!(fields.len(), 2);
    let group: &RenderedField = &fields[1];
    assert_eq!(group.widget.kind, FieldKind::Repeatable);
    assert_eq!(group.items.len(), 2);
    assert_eq!(group.items[1][0].name, "pack_sizes.1.label");
    assert_eq!(
        group.items[1][0].error.as_deref(),
        Some("This field is required")
    );
    assert!(group.items[1][3].read_only);
    assert!(fields[0].error.is_none());
}

#[test]
fn test_rendered_field_serializes_kind_names() {
    let engine: FormEngine = FormEngine::new(
        vec![
            FieldDescriptor::new("region", FieldKind::DynamicSelect, "Region")
                .with_options(vec![FieldOption::new("West", "west")]),
        ],
        ValidationSchema::new(),
        FieldMap::new(),
    );

    let json: serde_json::Value = serde_json::to_value(engine.render()).unwrap();

    assert_eq!(json[0]["widget"]["kind"], "dynamic-select");
    assert_eq!(json[0]["options"][0]["value"], "west");
    assert_eq!(json[0]["value"], serde_json::Value::Null);
}
