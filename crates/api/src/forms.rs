// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The product and doctor forms.

use crate::backend::DashboardBackend;
use crate::catalog::CatalogCache;
use crate::error::ApiError;
use crate::request_response::{
    CreateDoctorRequest, CreateProductRequest, FormPageResponse, SubmitFormResponse,
};
use ceutro::{
    DerivedOp, DerivedSpec, FieldDescriptor, FieldKind, FieldMap, FieldOption, FieldValue,
    FormEngine, OptionLoadRequest, OptionsFuture, RepeatableSpec, ValidationRule,
    ValidationSchema,
};
use ceutro_domain::{Doctor, PackSize, Product};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::info;

/// Most pack configurations a product may list.
pub const MAX_PACK_SIZES: usize = 5;

const CATEGORIES: [&str; 5] = [
    "Cardiology",
    "Dermatology",
    "Diabetology",
    "Endocrinology",
    "Respiratory",
];

const SPECIALITIES: [&str; 6] = [
    "Cardiology",
    "Dermatology",
    "Endocrinology",
    "General Practice",
    "Paediatrics",
    "Pulmonology",
];

/// The forms the dashboard offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    /// Create a product.
    Product,
    /// Create a doctor.
    Doctor,
}

impl FormKind {
    /// Parses a form name from a URL.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::ResourceNotFound` for unknown names.
    pub fn parse(name: &str) -> Result<Self, ApiError> {
        match name {
            "product" => Ok(Self::Product),
            "doctor" => Ok(Self::Doctor),
            other => Err(ApiError::ResourceNotFound {
                resource_type: String::from("Form"),
                message: format!("No form named '{other}'"),
            }),
        }
    }

    /// Returns the form name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Product => "product",
            Self::Doctor => "doctor",
        }
    }

    /// Returns the form title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Product => "Add product",
            Self::Doctor => "Add doctor",
        }
    }
}

fn static_options(values: &[&str]) -> Vec<FieldOption> {
    values
        .iter()
        .map(|value| FieldOption::new(value, value))
        .collect()
}

/// Builds the product form.
///
/// # Errors
///
/// Returns `ApiError::Internal` if the product code pattern does not compile.
pub fn product_form(defaults: FieldMap) -> Result<FormEngine, ApiError> {
    let pack_fields: Vec<FieldDescriptor> = vec![
        FieldDescriptor::new("label", FieldKind::Text, "Pack label")
            .with_placeholder("10 tablets")
            .with_grid(4),
        FieldDescriptor::new("units_per_pack", FieldKind::Number, "Units per pack")
            .with_default(FieldValue::Number(1.0))
            .with_grid(2),
        FieldDescriptor::new("packs_per_carton", FieldKind::Number, "Packs per carton")
            .with_default(FieldValue::Number(1.0))
            .with_grid(2),
        FieldDescriptor::new("units_per_carton", FieldKind::Number, "Units per carton")
            .derived(DerivedSpec::new(
                &["units_per_pack", "packs_per_carton"],
                DerivedOp::Product,
            ))
            .with_grid(2),
    ];

    let fields: Vec<FieldDescriptor> = vec![
        FieldDescriptor::new("details", FieldKind::Section, "Product details"),
        FieldDescriptor::new("code", FieldKind::Text, "Code")
            .with_placeholder("CAR-10")
            .with_grid(4),
        FieldDescriptor::new("name", FieldKind::Text, "Name").with_grid(8),
        FieldDescriptor::new("category", FieldKind::Select, "Category")
            .with_options(static_options(&CATEGORIES))
            .with_grid(6),
        FieldDescriptor::new("price", FieldKind::Number, "Price").with_grid(6),
        FieldDescriptor::new("pack_sizes", FieldKind::Repeatable, "Pack sizes").repeatable(
            RepeatableSpec::new(pack_fields).with_bounds(0, Some(MAX_PACK_SIZES)),
        ),
    ];

    let code_pattern: ValidationRule =
        ValidationRule::pattern("^[A-Za-z0-9-]+$", "Use letters, digits and '-' only").map_err(
            |e| ApiError::Internal {
                message: format!("Invalid product code pattern: {e}"),
            },
        )?;

    let schema: ValidationSchema = ValidationSchema::new()
        .field("code", vec![ValidationRule::Required, code_pattern])
        .field("name", vec![ValidationRule::Required, ValidationRule::MinLength(2)])
        .field("category", vec![ValidationRule::Required])
        .field("price", vec![ValidationRule::Required, ValidationRule::Min(0.0)])
        .field("pack_sizes", vec![ValidationRule::MaxItems(MAX_PACK_SIZES)])
        .field("pack_sizes.label", vec![ValidationRule::Required])
        .field("pack_sizes.units_per_pack", vec![ValidationRule::Min(1.0)])
        .field("pack_sizes.packs_per_carton", vec![ValidationRule::Min(1.0)]);

    Ok(FormEngine::new(fields, schema, defaults))
}

/// Form values describing an existing product.
#[must_use]
pub fn product_values(product: &Product) -> FieldMap {
    let packs: Vec<FieldMap> = product
        .pack_sizes
        .iter()
        .map(|pack| {
            FieldMap::from([
                (String::from("label"), FieldValue::text(&pack.label)),
                (
                    String::from("units_per_pack"),
                    FieldValue::Number(f64::from(pack.units_per_pack)),
                ),
                (
                    String::from("packs_per_carton"),
                    FieldValue::Number(f64::from(pack.packs_per_carton)),
                ),
            ])
        })
        .collect();

    FieldMap::from([
        (String::from("code"), FieldValue::text(&product.code)),
        (String::from("name"), FieldValue::text(&product.name)),
        (String::from("category"), FieldValue::text(&product.category)),
        (String::from("price"), FieldValue::Number(product.price)),
        (String::from("pack_sizes"), FieldValue::Group(packs)),
    ])
}

/// Builds the doctor form.
///
/// The territory options are loaded from `backend` for the chosen region.
#[must_use]
pub fn doctor_form<B>(backend: Arc<B>, regions: &[String], defaults: FieldMap) -> FormEngine
where
    B: DashboardBackend + 'static,
{
    let region_options: Vec<FieldOption> = regions
        .iter()
        .map(|region| FieldOption::new(region, region))
        .collect();

    let fields: Vec<FieldDescriptor> = vec![
        FieldDescriptor::new("name", FieldKind::Text, "Name").with_grid(6),
        FieldDescriptor::new("speciality", FieldKind::Select, "Speciality")
            .with_options(static_options(&SPECIALITIES))
            .with_grid(6),
        FieldDescriptor::new("region", FieldKind::Select, "Region")
            .with_options(region_options)
            .with_grid(4),
        FieldDescriptor::new("territory", FieldKind::DynamicSelect, "Territory")
            .depends_on(&["region"], move |dependencies: FieldMap| {
                territory_options(Arc::clone(&backend), dependencies)
            })
            .with_grid(4),
        FieldDescriptor::new("city", FieldKind::Text, "City").with_grid(4),
        FieldDescriptor::new("patients_per_day", FieldKind::Number, "Patients per day")
            .with_default(FieldValue::Number(0.0)),
    ];

    let schema: ValidationSchema = ValidationSchema::new()
        .field("name", vec![ValidationRule::Required, ValidationRule::MinLength(2)])
        .field("speciality", vec![ValidationRule::Required])
        .field("territory", vec![ValidationRule::Required])
        .field("city", vec![ValidationRule::Required])
        .field(
            "patients_per_day",
            vec![ValidationRule::Min(0.0), ValidationRule::Max(500.0)],
        );

    FormEngine::new(fields, schema, defaults)
}

fn territory_options<B>(backend: Arc<B>, dependencies: FieldMap) -> OptionsFuture
where
    B: DashboardBackend + 'static,
{
    Box::pin(async move {
        let Some(region) = dependencies
            .get("region")
            .and_then(FieldValue::as_text)
            .filter(|region| !region.trim().is_empty())
            .map(str::to_owned)
        else {
            return Ok(Vec::new());
        };
        let territories = backend
            .list_territories(Some(region))
            .await
            .map_err(|e| e.to_string())?;
        Ok(territories
            .iter()
            .map(|t| FieldOption::new(&t.name, &t.name))
            .collect())
    })
}

/// Builds a form with its dynamic options loaded.
///
/// # Errors
///
/// Returns an error if the catalog needed by the form cannot be read.
pub async fn build_form<B>(
    cache: &CatalogCache<B>,
    form: FormKind,
    defaults: FieldMap,
) -> Result<FormEngine, ApiError>
where
    B: DashboardBackend + 'static,
{
    let mut engine: FormEngine = match form {
        FormKind::Product => product_form(defaults)?,
        FormKind::Doctor => {
            let regions: Vec<String> = cache
                .territories()
                .await?
                .iter()
                .map(|t| t.region.clone())
                .collect::<BTreeSet<String>>()
                .into_iter()
                .collect();
            doctor_form(cache.backend_handle(), &regions, defaults)
        }
    };
    let requests: Vec<OptionLoadRequest> = engine.initial_loads();
    engine.load_dependents(requests).await;
    Ok(engine)
}

/// Renders a form page.
///
/// # Errors
///
/// Returns an error if the form cannot be built.
pub async fn render_form<B>(
    cache: &CatalogCache<B>,
    form: FormKind,
    defaults: FieldMap,
) -> Result<FormPageResponse, ApiError>
where
    B: DashboardBackend + 'static,
{
    let engine: FormEngine = build_form(cache, form, defaults).await?;
    Ok(FormPageResponse {
        form: String::from(form.as_str()),
        title: String::from(form.title()),
        fields: engine.render(),
    })
}

/// Validates submitted values and creates the record.
///
/// # Errors
///
/// Returns `ApiError::ValidationFailed` with every field error, or the
/// backend's error.
pub async fn submit_form<B>(
    cache: &CatalogCache<B>,
    form: FormKind,
    values: FieldMap,
) -> Result<SubmitFormResponse, ApiError>
where
    B: DashboardBackend + 'static,
{
    let mut engine: FormEngine = build_form(cache, form, values).await?;
    let backend: &B = cache.backend();

    let created: Result<SubmitFormResponse, ApiError> = engine
        .submit_async(|data: FieldMap| create_record(backend, form, data))
        .await?;

    if created.is_ok() {
        info!(form = form.as_str(), "Form submitted");
        cache.refresh().await;
    }
    created
}

async fn create_record<B: DashboardBackend>(
    backend: &B,
    form: FormKind,
    data: FieldMap,
) -> Result<SubmitFormResponse, ApiError> {
    match form {
        FormKind::Product => {
            let product: Product = backend.create_product(product_request(&data)).await?;
            Ok(SubmitFormResponse {
                id: product.id,
                message: format!("Product '{}' created", product.name),
            })
        }
        FormKind::Doctor => {
            let doctor: Doctor = backend.create_doctor(doctor_request(&data)).await?;
            Ok(SubmitFormResponse {
                id: doctor.id,
                message: format!("Doctor '{}' created", doctor.name),
            })
        }
    }
}

fn text(data: &FieldMap, name: &str) -> String {
    data.get(name)
        .and_then(FieldValue::as_text)
        .map(|s| s.trim().to_owned())
        .unwrap_or_default()
}

fn number(data: &FieldMap, name: &str) -> f64 {
    data.get(name)
        .and_then(FieldValue::as_number)
        .unwrap_or_default()
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn count(data: &FieldMap, name: &str) -> u32 {
    number(data, name).clamp(0.0, f64::from(u32::MAX)) as u32
}

fn product_request(data: &FieldMap) -> CreateProductRequest {
    let pack_sizes: Vec<PackSize> = data
        .get("pack_sizes")
        .and_then(FieldValue::as_group)
        .unwrap_or_default()
        .iter()
        .map(|item| PackSize {
            label: text(item, "label"),
            units_per_pack: count(item, "units_per_pack"),
            packs_per_carton: count(item, "packs_per_carton"),
        })
        .collect();

    CreateProductRequest {
        code: text(data, "code"),
        name: text(data, "name"),
        category: text(data, "category"),
        price: number(data, "price"),
        pack_sizes,
    }
}

fn doctor_request(data: &FieldMap) -> CreateDoctorRequest {
    CreateDoctorRequest {
        name: text(data, "name"),
        speciality: text(data, "speciality"),
        city: text(data, "city"),
        territory: text(data, "territory"),
        patients_per_day: count(data, "patients_per_day"),
    }
}
