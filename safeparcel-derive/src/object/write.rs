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

pub fn gen_encode_field(core: &TokenStream, fields: &[SourceField<'_>]) -> TokenStream {
    let arms = serialized_fields(fields).map(|sf| {
        let id = sf.id_literal();
        let ident = sf.ident();
        quote! {
            #id => #core::ParcelField::write_field(&self.#ident, context, field),
        }
    });
    quote! {
        match field.id {
            #(#arms)*
            _ => ::std::result::Result::Ok(()),
        }
    }
}

/// Field, element and host value impls of a record, all routed through the
/// shared record helpers.
pub fn gen_record_traits(core: &TokenStream, ast: &syn::DeriveInput) -> TokenStream {
    let name = &ast.ident;
    let (impl_generics, ty_generics, where_clause) = ast.generics.split_for_impl();
    let record = quote! { #core::serializer::record };

    quote! {
        impl #impl_generics #core::ParcelField for #name #ty_generics #where_clause {
            fn field_kind(_: #core::ListPolicy) -> #core::FieldKind {
                #record::record_kind::<Self>()
            }

            fn write_field(
                &self,
                context: &mut #core::WriteContext,
                field: &#core::FieldDescriptor,
            ) -> ::std::result::Result<(), #core::Error> {
                #record::write_record_field(self, context, field)
            }

            fn read_field(
                context: &mut #core::ReadContext,
                field: &#core::FieldDescriptor,
                tag: #core::Tag,
            ) -> ::std::result::Result<Self, #core::Error> {
                #record::read_record_field(context, field, tag)
            }
        }

        impl #impl_generics #core::ParcelElement for #name #ty_generics #where_clause {
            fn element_kind() -> #core::FieldKind {
                #record::record_kind::<Self>()
            }

            fn write_element(
                &self,
                context: &mut #core::WriteContext,
            ) -> ::std::result::Result<(), #core::Error> {
                #record::write_record_element(self, context)
            }

            fn read_element(
                context: &mut #core::ReadContext,
            ) -> ::std::result::Result<Self, #core::Error> {
                #record::read_required_record_element(context)
            }
        }

        impl #impl_generics #core::ParcelValue for #name #ty_generics #where_clause {
            fn value_kind() -> #core::FieldKind {
                #record::record_kind::<Self>()
            }

            fn write_value(
                &self,
                context: &mut #core::WriteContext,
            ) -> ::std::result::Result<(), #core::Error> {
                #record::write_record_value(self, context)
            }

            fn read_value_data(
                context: &mut #core::ReadContext,
                tag: #core::ValueTag,
            ) -> ::std::result::Result<Self, #core::Error> {
                #record::read_record_value_data(context, tag)
            }
        }
    }
}
