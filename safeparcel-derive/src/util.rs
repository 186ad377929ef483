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

use crate::object::field_meta::{parse_and_validate_fields, ParcelFieldMeta};
use proc_macro2::{Literal, TokenStream};
use quote::quote;
use syn::spanned::Spanned;
use syn::{Data, DeriveInput, Field, Fields, Ident, Type};

/// A struct field with its parsed attributes, in declaration order.
pub struct SourceField<'a> {
    pub field: &'a Field,
    pub meta: ParcelFieldMeta,
}

impl<'a> SourceField<'a> {
    pub fn ident(&self) -> &'a Ident {
        // source_fields only accepts named fields
        self.field.ident.as_ref().expect("named field")
    }

    pub fn ty(&self) -> &'a Type {
        &self.field.ty
    }

    pub fn name(&self) -> String {
        self.ident().to_string()
    }

    /// Field id as an unsuffixed literal, usable in `u16` match arms.
    pub fn id_literal(&self) -> TokenStream {
        let id = self.meta.id.unwrap_or_default() as u16;
        let lit = Literal::u16_unsuffixed(id);
        quote! { #lit }
    }
}

/// Returns the fields of a record struct with their metadata.
///
/// Only structs with named fields, or no fields at all, are records.
pub fn source_fields(ast: &DeriveInput) -> syn::Result<Vec<SourceField<'_>>> {
    let data = match &ast.data {
        Data::Struct(data) => data,
        Data::Enum(_) => {
            return Err(syn::Error::new(
                ast.ident.span(),
                "SafeParcelable can only be derived for structs",
            ))
        }
        Data::Union(_) => {
            return Err(syn::Error::new(
                ast.ident.span(),
                "SafeParcelable cannot be derived for unions",
            ))
        }
    };
    let fields: Vec<&Field> = match &data.fields {
        Fields::Named(named) => named.named.iter().collect(),
        Fields::Unit => Vec::new(),
        Fields::Unnamed(unnamed) => {
            return Err(syn::Error::new(
                unnamed.span(),
                "SafeParcelable fields need names; tuple structs are not supported",
            ))
        }
    };
    Ok(parse_and_validate_fields(&fields)?
        .into_iter()
        .map(|(field, meta)| SourceField { field, meta })
        .collect())
}

/// Fields that take part in serialization.
pub fn serialized_fields<'a, 'b>(
    fields: &'b [SourceField<'a>],
) -> impl Iterator<Item = &'b SourceField<'a>> {
    fields.iter().filter(|sf| !sf.meta.skip)
}
