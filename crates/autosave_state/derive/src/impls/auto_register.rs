#[cfg(feature = "auto_register")]
use quote::quote_spanned;

use crate::derive_data::ParcelStruct;

/// Generate `auto_register` implementation
#[cfg(feature = "auto_register")]
pub(crate) fn get_auto_register_impl(data: &ParcelStruct) -> proc_macro2::TokenStream {
    if let Some(span) = data.attrs.auto_register {
        // Invalid for generic types.
        if data.impl_with_generic() {
            return crate::utils::empty();
        }

        let auto_register_ = crate::path::auto_register_(&data.state_path);
        let ident = &data.ast.ident;

        quote_spanned! { span =>
            #auto_register_::inventory::submit!{
                #auto_register_::__AutoRegisterFunc(
                    <#ident as #auto_register_::__RegisterParcelable>::__register
                )
            }
        }
    } else {
        crate::utils::empty()
    }
}

/// Generate `auto_register` implementation
#[cfg(not(feature = "auto_register"))]
pub(crate) fn get_auto_register_impl(_: &ParcelStruct) -> proc_macro2::TokenStream {
    crate::utils::empty()
}
