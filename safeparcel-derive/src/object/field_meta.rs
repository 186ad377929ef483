// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Parsing of `#[safeparcel(...)]` attributes.
//!
//! Field attributes:
//! - `id = N`: wire field id, required unless the field is skipped
//! - `nullable`: write a zero-length marker for `None` instead of omitting it
//! - `since = G`: version gate, the minimum versionCode the field is meaningful at
//! - `version_code = V`: marks the record's versionCode field; `V` is the local schema version
//! - `direct_list`: primitive vectors are written as a raw array
//! - `value_list`: vectors are written as a host generic list
//! - `skip`: field is not serialized and holds its `Default` value
//!
//! Struct attributes:
//! - `name = "..."`: type name used in diagnostics and host values
//! - `crate = "..."`: path of the core crate in generated code

use std::collections::HashMap;
use syn::spanned::Spanned;
use syn::{Attribute, Field, LitInt, LitStr};

const ATTR: &str = "safeparcel";
const MAGIC_ID: u32 = 20293;

/// Represents parsed `#[safeparcel(...)]` field attributes
#[derive(Debug, Clone, Default)]
pub struct ParcelFieldMeta {
    pub id: Option<u32>,
    pub nullable: bool,
    pub since: Option<u32>,
    pub version_code: Option<i64>,
    pub direct_list: bool,
    pub value_list: bool,
    pub skip: bool,
}

/// Represents parsed struct level `#[safeparcel(...)]` attributes
#[derive(Default)]
pub struct RecordMeta {
    pub name: Option<String>,
    pub crate_path: Option<syn::Path>,
}

/// Parse `#[safeparcel(...)]` attributes from a field
pub fn parse_field_meta(field: &Field) -> syn::Result<ParcelFieldMeta> {
    let mut meta = ParcelFieldMeta::default();

    for attr in &field.attrs {
        if !attr.path().is_ident(ATTR) {
            continue;
        }

        attr.parse_nested_meta(|nested| {
            if nested.path.is_ident("id") {
                let lit: LitInt = nested.value()?.parse()?;
                let id: u32 = lit.base10_parse()?;
                if id > u16::MAX as u32 {
                    return Err(syn::Error::new(lit.span(), "id must be in 0..=65535"));
                }
                if id == MAGIC_ID {
                    return Err(syn::Error::new(
                        lit.span(),
                        "id 20293 is reserved for the object header",
                    ));
                }
                meta.id = Some(id);
            } else if nested.path.is_ident("nullable") {
                meta.nullable = parse_bool_or_flag(&nested)?;
            } else if nested.path.is_ident("since") {
                let lit: LitInt = nested.value()?.parse()?;
                meta.since = Some(lit.base10_parse()?);
            } else if nested.path.is_ident("version_code") {
                let lit: LitInt = nested.value()?.parse()?;
                meta.version_code = Some(lit.base10_parse()?);
            } else if nested.path.is_ident("direct_list") {
                meta.direct_list = parse_bool_or_flag(&nested)?;
            } else if nested.path.is_ident("value_list") {
                meta.value_list = parse_bool_or_flag(&nested)?;
            } else if nested.path.is_ident("skip") {
                meta.skip = true;
            } else {
                return Err(nested.error("unknown safeparcel field attribute"));
            }
            Ok(())
        })?;
    }

    if meta.direct_list && meta.value_list {
        return Err(syn::Error::new(
            field.span(),
            "direct_list and value_list are mutually exclusive",
        ));
    }
    if !meta.skip && meta.id.is_none() {
        return Err(syn::Error::new(
            field.span(),
            "missing #[safeparcel(id = N)]; add an id or #[safeparcel(skip)]",
        ));
    }

    Ok(meta)
}

/// Parse struct level attributes
pub fn parse_record_meta(attrs: &[Attribute]) -> syn::Result<RecordMeta> {
    let mut meta = RecordMeta::default();

    for attr in attrs {
        if !attr.path().is_ident(ATTR) {
            continue;
        }

        attr.parse_nested_meta(|nested| {
            if nested.path.is_ident("name") {
                let lit: LitStr = nested.value()?.parse()?;
                meta.name = Some(lit.value());
            } else if nested.path.is_ident("crate") {
                let lit: LitStr = nested.value()?.parse()?;
                meta.crate_path = Some(lit.parse()?);
            } else {
                return Err(nested.error("unknown safeparcel struct attribute"));
            }
            Ok(())
        })?;
    }

    Ok(meta)
}

/// Parse a boolean value or treat standalone flag as true
fn parse_bool_or_flag(meta: &syn::meta::ParseNestedMeta) -> syn::Result<bool> {
    if meta.input.is_empty() || meta.input.peek(syn::Token![,]) {
        Ok(true)
    } else {
        let lit: syn::LitBool = meta.value()?.parse()?;
        Ok(lit.value)
    }
}

/// Validates that field ids are unique and at most one versionCode field exists
pub fn validate_field_metas(fields_with_meta: &[(&Field, ParcelFieldMeta)]) -> syn::Result<()> {
    let mut id_to_field: HashMap<u32, String> = HashMap::new();
    let mut version_field: Option<String> = None;

    for (field, meta) in fields_with_meta {
        if meta.skip {
            continue;
        }
        let field_name = field_label(field);

        if let Some(id) = meta.id {
            if let Some(existing) = id_to_field.get(&id) {
                return Err(syn::Error::new(
                    field.span(),
                    format!(
                        "duplicate safeparcel field id={} on fields '{}' and '{}'",
                        id, existing, field_name
                    ),
                ));
            }
            id_to_field.insert(id, field_name.clone());
        }

        if meta.version_code.is_some() {
            if let Some(existing) = &version_field {
                return Err(syn::Error::new(
                    field.span(),
                    format!(
                        "version_code declared on both '{}' and '{}'",
                        existing, field_name
                    ),
                ));
            }
            version_field = Some(field_name);
        }
    }

    Ok(())
}

/// Parse field metadata for all fields and validate
pub fn parse_and_validate_fields<'a>(
    fields: &[&'a Field],
) -> syn::Result<Vec<(&'a Field, ParcelFieldMeta)>> {
    let fields_with_meta: Vec<_> = fields
        .iter()
        .map(|f| {
            let meta = parse_field_meta(f)?;
            Ok((*f, meta))
        })
        .collect::<syn::Result<_>>()?;

    validate_field_metas(&fields_with_meta)?;

    Ok(fields_with_meta)
}

fn field_label(field: &Field) -> String {
    field
        .ident
        .as_ref()
        .map(|ident| ident.to_string())
        .unwrap_or_default()
}
