use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, DeriveInput, ItemTrait};

/// Derive `Construct<()>` through `Default`, for types registered into a `NameRegistry`
/// without constructor arguments.
/// Adds a `Default` bound to all generic parameters
#[proc_macro_derive(Construct)]
pub fn construct_derive(input: TokenStream) -> TokenStream {
    let mut input = parse_macro_input!(input as DeriveInput);

    for param in &mut input.generics.params {
        if let syn::GenericParam::Type(type_param) = param {
            type_param
                .bounds
                .push(syn::parse_quote!(::core::default::Default));
        }
    }
    derive_construct(input)
}

/// Generate the implementation of `Construct<()>`
fn derive_construct(input: DeriveInput) -> TokenStream {
    let name = &input.ident;
    let (impl_generics, type_generics, where_clause) = &input.generics.split_for_impl();
    quote! {impl #impl_generics ::al_factory::Construct<()> for #name #type_generics #where_clause {
        fn construct(_: ()) -> Self {
            ::core::default::Default::default()
        }
    }}
    .into()
}

/// Attribute macro to mark a trait as a factory interface, implementing `Interface<C>` for
/// `dyn Trait` over every implementor `C` so they can be registered with `register_type`.
///
/// Generic traits aren't supported, as the implementation can't name their parameters.
#[proc_macro_attribute]
pub fn interface(attr: TokenStream, item: TokenStream) -> TokenStream {
    if !attr.is_empty() {
        return syn::Error::new(
            proc_macro2::Span::call_site(),
            "`#[interface]` takes no arguments",
        )
        .to_compile_error()
        .into();
    }

    let item = parse_macro_input!(item as ItemTrait);
    if !item.generics.params.is_empty() {
        return syn::Error::new_spanned(
            &item.generics,
            "`#[interface]` can't be used on generic traits",
        )
        .to_compile_error()
        .into();
    }

    let name = &item.ident;
    quote! {
        #item

        impl<C: #name + 'static> ::al_factory::Interface<C> for dyn #name {
            fn upcast(concrete: ::std::boxed::Box<C>) -> ::std::boxed::Box<Self> {
                concrete
            }
        }
    }
    .into()
}
