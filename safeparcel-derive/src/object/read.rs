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

use proc_macro2::TokenStream;
use quote::quote;

use crate::util::{serialized_fields, SourceField};

/// Builds `Self` with every field at its default. Skipped fields use
/// `Default`, the rest `ParcelDefault`.
pub fn gen_parcel_default(core: &TokenStream, fields: &[SourceField<'_>]) -> TokenStream {
    let inits = fields.iter().map(|sf| {
        let ident = sf.ident();
        let ty = sf.ty();
        if sf.meta.skip {
            quote! { #ident: <#ty as ::std::default::Default>::default() }
        } else {
            quote! { #ident: <#ty as #core::ParcelDefault>::parcel_default() }
        }
    });
    quote! {
        Self { #(#inits),* }
    }
}

pub fn gen_decode_field(core: &TokenStream, fields: &[SourceField<'_>]) -> TokenStream {
    let arms = serialized_fields(fields).map(|sf| {
        let id = sf.id_literal();
        let ident = sf.ident();
        let ty = sf.ty();
        quote! {
            #id => {
                self.#ident = <#ty as #core::ParcelField>::read_field(context, field, tag)?;
            }
        }
    });
    quote! {
        match field.id {
            #(#arms)*
            _ => {}
        }
        ::std::result::Result::Ok(())
    }
}

pub fn gen_reset_field(core: &TokenStream, fields: &[SourceField<'_>]) -> TokenStream {
    let arms = serialized_fields(fields).map(|sf| {
        let id = sf.id_literal();
        let ident = sf.ident();
        let ty = sf.ty();
        quote! {
            #id => self.#ident = <#ty as #core::ParcelDefault>::parcel_default(),
        }
    });
    quote! {
        match id {
            #(#arms)*
            _ => {}
        }
    }
}
