use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::Generics;

#[inline(always)]
pub(crate) fn empty() -> TokenStream {
    TokenStream::new()
}

/// Build a `where` clause from the user's predicates, a `'static` bound for
/// every type parameter, and `extra`.
///
/// Returns an empty stream if there is nothing to bound.
pub(crate) fn extend_where_clause(
    generics: &Generics,
    extra: impl IntoIterator<Item = TokenStream>,
) -> TokenStream {
    let mut predicates: Vec<TokenStream> = generics
        .where_clause
        .iter()
        .flat_map(|clause| clause.predicates.iter())
        .map(ToTokens::to_token_stream)
        .collect();

    for param in generics.type_params() {
        let ident = &param.ident;
        predicates.push(quote!(#ident: 'static));
    }

    predicates.extend(extra);

    if predicates.is_empty() {
        empty()
    } else {
        quote!(where #(#predicates,)*)
    }
}
