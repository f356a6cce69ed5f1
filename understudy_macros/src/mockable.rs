mod method;

use darling::FromMeta;
use quote::{format_ident, quote};

use method::Method;

#[derive(Default, FromMeta)]
#[darling(default)]
pub struct Args {
    double: Option<syn::Ident>,
    recorder: Option<syn::Ident>,
}

pub struct Mockable {
    // the trait as the user wrote it, minus our helper attributes
    original: syn::ItemTrait,
    double: syn::Ident,
    recorder: syn::Ident,
    methods: Vec<Method>,
}

impl Mockable {
    pub fn new(mut original: syn::ItemTrait, args: Args) -> darling::Result<Self> {
        let mut errors = darling::Error::accumulator();

        if !original.generics.params.is_empty() || original.generics.where_clause.is_some() {
            errors.push(
                darling::Error::custom("understudy cannot mock generic traits")
                    .with_span(&original.generics),
            );
        }

        for bound in &original.supertraits {
            if !is_derived_bound(bound) {
                errors.push(
                    darling::Error::custom(
                        "understudy can only mock traits whose supertraits the double already implements: Send, Sync, Clone, Debug",
                    )
                    .with_span(bound),
                );
            }
        }

        let methods = original
            .items
            .iter_mut()
            .filter_map(|item| match item {
                syn::TraitItem::Fn(func) => errors.handle(Method::new(func)),
                syn::TraitItem::Type(ty) => {
                    errors.push(
                        darling::Error::custom("understudy cannot mock associated types")
                            .with_span(ty),
                    );
                    None
                }
                syn::TraitItem::Const(konst) => {
                    errors.push(
                        darling::Error::custom("understudy cannot mock associated consts")
                            .with_span(konst),
                    );
                    None
                }
                _ => None,
            })
            .collect();

        errors.finish()?;

        let ident = &original.ident;
        let double = args
            .double
            .unwrap_or_else(|| format_ident!("{}Double", ident));
        let recorder = args
            .recorder
            .unwrap_or_else(|| format_ident!("{}Recorder", ident));

        Ok(Mockable {
            original,
            double,
            recorder,
            methods,
        })
    }
}

impl From<Mockable> for proc_macro::TokenStream {
    fn from(mockable: Mockable) -> Self {
        let Mockable {
            original,
            double,
            recorder,
            methods,
        } = mockable;

        let vis = &original.vis;
        let unsafety = &original.unsafety;
        let trait_ident = &original.ident;
        let name = trait_ident.to_string();

        let double_doc = format!(
            "Test double for [`{}`]. Every call is answered by the mock it came from.",
            trait_ident
        );
        let recorder_doc = format!(
            "Records member expressions of [`{}`] for setup and verification.",
            trait_ident
        );

        let recorded = methods.iter().map(Method::recorder);
        let forwarders = methods.iter().map(Method::forwarder);

        proc_macro::TokenStream::from(quote! {
            #original

            #[doc = #double_doc]
            #[derive(Clone, Debug)]
            #vis struct #double(::understudy::Dispatcher);

            #[doc = #recorder_doc]
            #[derive(Clone, Copy, Debug, Default)]
            #vis struct #recorder;

            impl ::understudy::Mockable for #double {
                type Recorder = #recorder;
                const NAME: &'static str = #name;

                fn from_dispatcher(dispatcher: ::understudy::Dispatcher) -> Self {
                    #double(dispatcher)
                }
            }

            #[allow(dead_code)]
            impl #recorder {
                #(#recorded)*
            }

            #unsafety impl #trait_ident for #double {
                #(#forwarders)*
            }
        })
    }
}

fn is_derived_bound(bound: &syn::TypeParamBound) -> bool {
    match bound {
        syn::TypeParamBound::Lifetime(lt) => lt.ident == "static",
        syn::TypeParamBound::Trait(t) => t.path.segments.last().map_or(false, |segment| {
            ["Send", "Sync", "Clone", "Debug"]
                .iter()
                .any(|name| segment.ident == name)
        }),
        _ => false,
    }
}
