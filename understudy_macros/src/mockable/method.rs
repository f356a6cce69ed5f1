use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::ext::IdentExt;

pub struct Method {
    // signature of the trait method with its arguments renamed
    sig: syn::Signature,
    member: String,
    is_property: bool,
    params: Vec<Param>,
    output: syn::Type,
}

struct Param {
    // name shown on the recorder method
    name: syn::Ident,
    // name bound in the forwarding method
    forwarded: syn::Ident,
    // type given to `Arg` on the recorder
    ty: syn::Type,
    passing: Passing,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Passing {
    Value,
    Ref,
    MutRef,
    // unsized referent: compared through its owned form
    ToOwned,
}

impl Method {
    pub fn new(func: &mut syn::TraitItemFn) -> darling::Result<Self> {
        let mut errors = darling::Error::accumulator();
        let is_property = take_property_attr(&mut func.attrs);
        let mut sig = func.sig.clone();

        if !sig.generics.params.is_empty() {
            errors.push(
                darling::Error::custom("understudy cannot mock generic methods")
                    .with_span(&sig.generics),
            );
        }

        if let Some(asyncness) = &sig.asyncness {
            errors.push(
                darling::Error::custom(
                    "understudy cannot mock async methods; return a future type such as `futures::future::Ready<T>` instead",
                )
                .with_span(asyncness),
            );
        }

        match sig.receiver() {
            None => errors.push(
                darling::Error::custom("understudy can only mock methods with a `self` receiver")
                    .with_span(&sig.ident),
            ),
            Some(receiver) if receiver.colon_token.is_some() => errors.push(
                darling::Error::custom("understudy cannot mock methods with an explicit `self` type")
                    .with_span(receiver),
            ),
            Some(_) => {}
        }

        let mut params = vec![];
        let typed = sig.inputs.iter_mut().filter_map(|input| match input {
            syn::FnArg::Typed(arg) => Some(arg),
            syn::FnArg::Receiver(_) => None,
        });

        for (index, arg) in typed.enumerate() {
            let name = match arg.pat.as_ref() {
                syn::Pat::Ident(pat) => pat.ident.clone(),
                _ => format_ident!("arg{}", index),
            };
            let forwarded = format_ident!("_arg{}", index);

            if let Some(param) = errors.handle(Param::new(name, forwarded.clone(), &arg.ty)) {
                params.push(param);
            }
            arg.pat = Box::new(syn::parse_quote! { #forwarded });
        }

        let output = match &sig.output {
            syn::ReturnType::Default => syn::parse_quote! { () },
            syn::ReturnType::Type(_, ty) => {
                if let Err(e) = validate_output(ty) {
                    errors.push(e);
                }
                ty.as_ref().clone()
            }
        };

        if is_property && !params.is_empty() {
            errors.push(
                darling::Error::custom("a #[property] cannot take arguments besides `self`")
                    .with_span(&sig.inputs),
            );
        }

        errors.finish()?;

        Ok(Method {
            member: sig.ident.unraw().to_string(),
            sig,
            is_property,
            params,
            output,
        })
    }

    /// The recorder method: same name, `Arg`s in, `Member` out.
    pub fn recorder(&self) -> TokenStream {
        let ident = &self.sig.ident;
        let member = &self.member;
        let output = &self.output;

        if self.is_property {
            return quote! {
                pub fn #ident(&self) -> ::understudy::Member<#output> {
                    ::understudy::Member::property(#member)
                }
            };
        }

        let names: Vec<_> = self.params.iter().map(|p| &p.name).collect();
        let tys: Vec<_> = self.params.iter().map(|p| &p.ty).collect();

        quote! {
            pub fn #ident(
                &self,
                #(#names: impl ::core::convert::Into<::understudy::Arg<#tys>>),*
            ) -> ::understudy::Member<#output> {
                ::understudy::Member::operation(
                    #member,
                    (#(::core::convert::Into::<::understudy::Arg<#tys>>::into(#names),)*),
                )
            }
        }
    }

    /// The trait method of the double, forwarding to its dispatcher.
    pub fn forwarder(&self) -> TokenStream {
        let sig = &self.sig;
        let member = &self.member;
        let output = &self.output;

        if self.is_property {
            return quote! {
                #sig {
                    self.0.forward_property::<#output>(#member)
                }
            };
        }

        let owned = self
            .params
            .iter()
            .filter(|p| p.passing == Passing::ToOwned)
            .map(|p| {
                let forwarded = &p.forwarded;
                quote! { let #forwarded = ::std::borrow::ToOwned::to_owned(#forwarded); }
            });

        let args = self.params.iter().map(|p| {
            let forwarded = &p.forwarded;
            match p.passing {
                Passing::Value | Passing::ToOwned => quote! { &#forwarded },
                Passing::Ref => quote! { #forwarded },
                Passing::MutRef => quote! { &*#forwarded },
            }
        });

        quote! {
            #sig {
                #(#owned)*
                self.0.forward::<#output, _>(#member, (#(#args,)*))
            }
        }
    }
}

impl Param {
    fn new(name: syn::Ident, forwarded: syn::Ident, ty: &syn::Type) -> darling::Result<Self> {
        let referent = match ty {
            syn::Type::Reference(reference) => reference.elem.as_ref(),
            ty => ty,
        };

        match referent {
            syn::Type::ImplTrait(_) => {
                return Err(
                    darling::Error::custom("understudy cannot mock `impl Trait` arguments")
                        .with_span(ty),
                )
            }
            syn::Type::TraitObject(_) => {
                return Err(darling::Error::custom(
                    "understudy cannot mock `dyn Trait` arguments; take a concrete type",
                )
                .with_span(ty))
            }
            referent if borrows(referent) => {
                return Err(darling::Error::custom(
                    "understudy cannot mock arguments holding borrows; take an owned or `'static` type",
                )
                .with_span(ty))
            }
            _ => {}
        }

        let (ty, passing) = match ty {
            syn::Type::Reference(reference) if is_unsized(&reference.elem) => {
                let elem = &reference.elem;
                (
                    syn::parse_quote! { <#elem as ::std::borrow::ToOwned>::Owned },
                    Passing::ToOwned,
                )
            }
            syn::Type::Reference(reference) => {
                let passing = if reference.mutability.is_some() {
                    Passing::MutRef
                } else {
                    Passing::Ref
                };
                (reference.elem.as_ref().clone(), passing)
            }
            ty => (ty.clone(), Passing::Value),
        };

        Ok(Param {
            name,
            forwarded,
            ty,
            passing,
        })
    }
}

// whether recording the type would keep a non-'static borrow alive
fn borrows(ty: &syn::Type) -> bool {
    match ty {
        syn::Type::Reference(reference) => {
            !reference.lifetime.as_ref().map_or(false, is_static) || borrows(&reference.elem)
        }
        syn::Type::Path(path) => {
            path.qself.as_ref().map_or(false, |qself| borrows(&qself.ty))
                || path.path.segments.iter().any(|segment| match &segment.arguments {
                    syn::PathArguments::AngleBracketed(generics) => {
                        generics.args.iter().any(|arg| match arg {
                            syn::GenericArgument::Lifetime(lifetime) => !is_static(lifetime),
                            syn::GenericArgument::Type(ty) => borrows(ty),
                            _ => false,
                        })
                    }
                    _ => false,
                })
        }
        syn::Type::Tuple(tuple) => tuple.elems.iter().any(borrows),
        syn::Type::Array(array) => borrows(&array.elem),
        syn::Type::Slice(slice) => borrows(&slice.elem),
        syn::Type::Paren(paren) => borrows(&paren.elem),
        syn::Type::Group(group) => borrows(&group.elem),
        _ => false,
    }
}

fn is_static(lifetime: &syn::Lifetime) -> bool {
    lifetime.ident == "static"
}

fn validate_output(ty: &syn::Type) -> darling::Result<()> {
    match ty {
        syn::Type::Reference(_) => Err(darling::Error::custom(
            "understudy cannot mock methods returning references; return an owned value",
        )
        .with_span(ty)),
        syn::Type::ImplTrait(_) => {
            Err(darling::Error::custom("understudy cannot mock methods returning `impl Trait`")
                .with_span(ty))
        }
        syn::Type::Path(path) if path.qself.is_none() && path.path.is_ident("Self") => {
            Err(darling::Error::custom("understudy cannot mock methods returning `Self`")
                .with_span(ty))
        }
        _ => Ok(()),
    }
}

fn is_unsized(ty: &syn::Type) -> bool {
    match ty {
        syn::Type::Slice(_) => true,
        syn::Type::Path(path) if path.qself.is_none() => path
            .path
            .segments
            .last()
            .map_or(false, |segment| {
                ["str", "Path", "OsStr", "CStr"]
                    .iter()
                    .any(|name| segment.ident == name)
            }),
        _ => false,
    }
}

fn take_property_attr(attrs: &mut Vec<syn::Attribute>) -> bool {
    let before = attrs.len();
    attrs.retain(|attr| !attr.path().is_ident("property"));
    attrs.len() != before
}
