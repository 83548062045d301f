use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ParcelStruct;
use crate::path;

/// Generate `Parcelable`, `StateType` and `ArrayElement` implementations.
///
/// The two value traits delegate to the `parcel_*` helpers of the bundle
/// crate, so a derived type can be saved as a single value, in a `Vec`,
/// or in a sparse `BTreeMap<i32, _>`.
pub(crate) fn impl_parcelable(data: &ParcelStruct) -> TokenStream {
    let state_path = &data.state_path;
    let bundle_ = path::bundle_(state_path);
    let vec_ = path::vec_(state_path);

    let ident = &data.ast.ident;
    let generics = &data.ast.generics;
    let (impl_generics, ty_generics, _) = generics.split_for_impl();

    let class = match &data.attrs.class {
        Some(lit) => quote!(#lit),
        None => {
            let name = ident.to_string();
            quote!(::core::concat!(::core::module_path!(), "::", #name))
        }
    };

    // `CLASS` is shared by every instantiation, the full type name is not.
    let class_tag = (data.attrs.class.is_none() && data.impl_with_generic()).then(|| {
        quote! {
            #[inline]
            fn class_tag() -> &'static str {
                ::core::any::type_name::<Self>()
            }
        }
    });

    let mut writes = Vec::new();
    let mut reads = Vec::new();
    let mut bounds = Vec::new();

    for field in &data.fields {
        let member = field.ident;
        let ty = field.ty;
        if field.skip {
            reads.push(quote! {
                #member: ::core::default::Default::default()
            });
            bounds.push(quote!(#ty: ::core::default::Default));
        } else {
            let key = field.key();
            writes.push(quote! {
                dest.put(#key, &self.#member);
            });
            reads.push(quote! {
                #member: source.read_required::<#ty>(#key)?
            });
            bounds.push(quote!(#ty: #bundle_::StateType));
        }
    }

    // Concrete types need no extra bounds, keep the output tidy.
    if !data.impl_with_generic() {
        bounds.clear();
    }
    let where_clause = crate::utils::extend_where_clause(generics, bounds);

    let unused_dest = writes.is_empty().then(|| quote!(let _ = dest;));
    let unused_source = data
        .fields
        .iter()
        .all(|f| f.skip)
        .then(|| quote!(let _ = source;));

    quote! {
        impl #impl_generics #bundle_::Parcelable for #ident #ty_generics #where_clause {
            const CLASS: &'static str = #class;

            #class_tag

            fn write_to_parcel(&self, dest: &mut #bundle_::Bundle) {
                #unused_dest
                #(#writes)*
            }

            fn create_from_parcel(
                source: &#bundle_::Bundle,
            ) -> ::core::result::Result<Self, #bundle_::BundleError> {
                #unused_source
                ::core::result::Result::Ok(Self {
                    #(#reads,)*
                })
            }
        }

        impl #impl_generics #bundle_::StateType for #ident #ty_generics #where_clause {
            #[inline]
            fn to_value(&self) -> ::core::option::Option<#bundle_::BundleValue> {
                #bundle_::parcel_to_value(self)
            }

            #[inline]
            fn from_value(
                value: &#bundle_::BundleValue,
            ) -> ::core::result::Result<Self, #bundle_::BundleError> {
                #bundle_::parcel_from_value(value)
            }
        }

        impl #impl_generics #bundle_::ArrayElement for #ident #ty_generics #where_clause {
            #[inline]
            fn array_to_value(items: &[Self]) -> #bundle_::BundleValue {
                #bundle_::parcel_array_to_value(items)
            }

            #[inline]
            fn array_from_value(
                value: &#bundle_::BundleValue,
            ) -> ::core::result::Result<#vec_<Self>, #bundle_::BundleError> {
                #bundle_::parcel_array_from_value(value)
            }
        }
    }
}
