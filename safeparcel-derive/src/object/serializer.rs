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

use proc_macro::TokenStream;
use quote::quote;

use crate::object::field_meta::parse_record_meta;
use crate::object::{misc, read, write};
use crate::util::source_fields;

pub fn derive_safeparcelable(ast: &syn::DeriveInput) -> TokenStream {
    match expand(ast) {
        Ok(ts) => ts.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(ast: &syn::DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let record_meta = parse_record_meta(&ast.attrs)?;
    let fields = source_fields(ast)?;

    let core = match &record_meta.crate_path {
        Some(path) => quote! { #path },
        None => quote! { ::safeparcel_core },
    };
    let name = &ast.ident;
    let type_name = record_meta.name.unwrap_or_else(|| name.to_string());
    let (impl_generics, ty_generics, where_clause) = ast.generics.split_for_impl();

    let default_ts = read::gen_parcel_default(&core, &fields);
    let describe_fields_ts = misc::gen_describe_fields(&core, &fields);
    let version_code_ts = misc::gen_version_code(&core, &fields);
    let encode_field_ts = write::gen_encode_field(&core, &fields);
    let decode_field_ts = read::gen_decode_field(&core, &fields);
    let reset_field_ts = read::gen_reset_field(&core, &fields);
    let record_traits_ts = write::gen_record_traits(&core, ast);

    Ok(quote! {
        impl #impl_generics #core::ParcelDefault for #name #ty_generics #where_clause {
            fn parcel_default() -> Self {
                #default_ts
            }
        }

        impl #impl_generics #core::SafeParcelable for #name #ty_generics #where_clause {
            fn type_name() -> &'static str {
                #type_name
            }

            fn describe_fields() -> ::std::vec::Vec<#core::FieldDescriptor> {
                #describe_fields_ts
            }

            #[allow(unused_variables)]
            fn encode_field(
                &self,
                context: &mut #core::WriteContext,
                field: &#core::FieldDescriptor,
            ) -> ::std::result::Result<(), #core::Error> {
                #encode_field_ts
            }

            #[allow(unused_variables)]
            fn decode_field(
                &mut self,
                context: &mut #core::ReadContext,
                field: &#core::FieldDescriptor,
                tag: #core::Tag,
            ) -> ::std::result::Result<(), #core::Error> {
                #decode_field_ts
            }

            #[allow(unused_variables)]
            fn reset_field(&mut self, id: u16) {
                #reset_field_ts
            }

            #version_code_ts
        }

        #record_traits_ts
    })
}
