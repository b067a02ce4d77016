use proc_macro::TokenStream;
use syn::DeriveInput;
use quote::quote;

pub fn impl_component(ast: &DeriveInput) -> TokenStream {
    let name = &ast.ident;

    // Ids live in a per-type static, which generic types cannot have.
    if !ast.generics.params.is_empty() {
        return syn::Error::new_spanned(&ast.generics, "#[derive(Component)] does not support generic types")
            .to_compile_error()
            .into();
    }

    let name_str = name.to_string();

    let gen = quote! {
        impl orchard_ecs::components::Component for #name {
            #[inline(always)]
            fn component_id() -> orchard_ecs::components::ComponentId {
                orchard_ecs::lazy_static! {
                    static ref ID: orchard_ecs::components::ComponentId =
                        orchard_ecs::components::component_id::register(#name_str);
                }
                *ID
            }

            #[inline(always)]
            fn component_name() -> &'static str {
                #name_str
            }
        }
    };
    gen.into()
}
