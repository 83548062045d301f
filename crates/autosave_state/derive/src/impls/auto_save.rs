use proc_macro2::{Ident, TokenStream};
use quote::quote;

use crate::derive_data::StateStruct;
use crate::path;

/// Generate the pair of accessors reaching `field` from a `&dyn Any` of `Self`.
///
/// ```ignore
/// FieldAccess::new(
///     |obj| Some(&obj.downcast_ref::<Self>()?.field as &dyn Any),
///     |obj| Some(&mut obj.downcast_mut::<Self>()?.field as &mut dyn Any),
/// )
/// ```
fn field_access(info_: &TokenStream, member: &Ident) -> TokenStream {
    quote! {
        #info_::FieldAccess::new(
            |__obj| ::core::option::Option::Some(
                &__obj.downcast_ref::<Self>()?.#member as &dyn ::core::any::Any
            ),
            |__obj| ::core::option::Option::Some(
                &mut __obj.downcast_mut::<Self>()?.#member as &mut dyn ::core::any::Any
            ),
        )
    }
}

/// Generate `AutoSave` implementation.
pub(crate) fn impl_auto_save(data: &StateStruct) -> TokenStream {
    let state_path = &data.state_path;
    let auto_save_ = path::auto_save_(state_path);
    let info_ = path::info_(state_path);
    let exports_ = path::macro_exports_(state_path);

    let ident = &data.ast.ident;
    let generics = &data.ast.generics;
    let (impl_generics, ty_generics, _) = generics.split_for_impl();

    let mut bounds: Vec<TokenStream> = Vec::new();

    let parent = data.parent().map(|field| {
        let ty = field.ty;
        let access = field_access(&info_, field.ident);
        bounds.push(quote!(#ty: #auto_save_));
        quote! {
            builder.parent::<#ty>(#access);
        }
    });

    let generic = generics.type_params().next().is_some();

    let fields: Vec<TokenStream> = data
        .saved()
        .map(|field| {
            let ty = field.ty;
            let name = field.name();
            let access = field_access(&info_, field.ident);
            let with_key = field.key.as_ref().map(|key| quote!(.with_key(#key)));
            let with_ignore = field
                .ignore_invalid_type
                .then(|| quote!(.with_ignore_invalid_type(true)));
            if generic {
                bounds.push(quote!(#ty: ::core::any::Any));
            }
            quote! {
                builder.field(
                    #info_::FieldDeclaration::new::<Self, #ty>(#name, #access)
                        #with_key
                        #with_ignore
                        .with_codec((&#exports_::CodecOf::<#ty>::new()).__codec())
                );
            }
        })
        .collect();

    let unused = (parent.is_none() && fields.is_empty()).then(|| quote!(let _ = builder;));
    let codec_traits = (!fields.is_empty()).then(|| {
        quote! {
            #[allow(unused_imports, reason = "only one of them resolves per field")]
            use #exports_::{__KnownCodec as _, __UnknownCodec as _};
        }
    });

    let where_clause = crate::utils::extend_where_clause(generics, bounds);

    quote! {
        impl #impl_generics #auto_save_ for #ident #ty_generics #where_clause {
            #[allow(clippy::needless_borrow)]
            fn declare_fields(builder: &mut #info_::StateInfoBuilder) {
                #codec_traits
                #unused
                #parent
                #(#fields)*
            }
        }
    }
}
