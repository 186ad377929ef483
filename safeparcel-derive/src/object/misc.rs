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

use proc_macro2::{Literal, TokenStream};
use quote::quote;

use crate::util::{serialized_fields, SourceField};

/// Generates the body of `describe_fields`: one descriptor per serialized
/// field, in declaration order.
pub fn gen_describe_fields(core: &TokenStream, fields: &[SourceField<'_>]) -> TokenStream {
    let descriptors = serialized_fields(fields).map(|sf| {
        let ty = sf.ty();
        let id = sf.id_literal();
        let name = sf.name();
        let meta = &sf.meta;

        let policy = if meta.direct_list {
            quote! { #core::ListPolicy::Direct }
        } else if meta.value_list {
            quote! { #core::ListPolicy::Value }
        } else {
            quote! { #core::ListPolicy::Default }
        };

        let mut builders = Vec::new();
        if meta.nullable {
            builders.push(quote! { .nullable(true) });
        }
        if let Some(gate) = meta.since {
            let gate = Literal::u32_unsuffixed(gate);
            builders.push(quote! { .since(#gate) });
        }
        if meta.direct_list {
            builders.push(quote! { .direct_list(true) });
        }
        if meta.value_list {
            builders.push(quote! { .value_list(true) });
        }
        if let Some(version) = meta.version_code {
            let version = Literal::i64_unsuffixed(version);
            builders.push(quote! { .version_code(#version) });
        }

        quote! {
            #core::FieldDescriptor::new(
                #id,
                #name,
                <#ty as #core::ParcelField>::field_kind(#policy),
            )
            #(#builders)*
        }
    });

    quote! {
        ::std::vec![#(#descriptors),*]
    }
}

/// Generates `version_code` for records with a versionCode field.
pub fn gen_version_code(core: &TokenStream, fields: &[SourceField<'_>]) -> TokenStream {
    match serialized_fields(fields).find(|sf| sf.meta.version_code.is_some()) {
        Some(sf) => {
            let ident = sf.ident();
            quote! {
                fn version_code(&self) -> ::std::option::Option<i64> {
                    #core::VersionCode::as_version_code(&self.#ident)
                }
            }
        }
        None => quote! {},
    }
}
