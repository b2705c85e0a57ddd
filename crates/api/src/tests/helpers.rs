// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use std::sync::Arc;

use ceutro::{FieldMap, FieldValue};

use crate::{CatalogCache, CatalogFixture, InMemoryBackend, PageQuery};

pub fn create_test_backend() -> Arc<InMemoryBackend> {
    Arc::new(InMemoryBackend::new(CatalogFixture::demo()))
}

pub fn create_test_cache() -> CatalogCache<InMemoryBackend> {
    CatalogCache::new(create_test_backend())
}

pub fn query() -> PageQuery {
    PageQuery::default()
}

pub fn values(pairs: &[(&str, FieldValue)]) -> FieldMap {
    pairs
        .iter()
        .map(|(name, value)| ((*name).to_owned(), value.clone()))
        .collect()
}

pub fn valid_product_values(code: &str) -> FieldMap {
    values(&[
        ("code", FieldValue::text(code)),
        ("name", FieldValue::text("Respira")),
        ("category", FieldValue::text("Respiratory")),
        ("price", FieldValue::Number(45.0)),
        (
            "pack_sizes",
            FieldValue::Group(vec![values(&[
                ("label", FieldValue::text("Inhaler")),
                ("units_per_pack", FieldValue::Number(1.0)),
                ("packs_per_carton", FieldValue::Number(24.0)),
            ])]),
        ),
    ])
}

pub fn valid_doctor_values() -> FieldMap {
    values(&[
        ("name", FieldValue::text("Dr. Sen")),
        ("speciality", FieldValue::text("Cardiology")),
        ("region", FieldValue::text("East")),
        ("territory", FieldValue::text("Kolkata North")),
        ("city", FieldValue::text("Kolkata")),
        ("patients_per_day", FieldValue::Number(30.0)),
    ])
}
