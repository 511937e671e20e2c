//! Controller-related macros.
//!
//! This module contains:
//! - `#[controller]` - Attribute macro deriving a `Controller` implementation
//!   from an inherent `impl` block

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use restive_core::{ActionTable, ConfigurationError};
use syn::{
    Attribute, FnArg, Ident, ImplItem, ImplItemFn, ItemImpl, Token, Type, Visibility,
    parse::{Parse, ParseStream},
    parse_macro_input,
};

/// Arguments for the `#[controller]` macro.
pub(crate) struct ControllerArgs {
    pub output: Option<Type>,
}

impl Parse for ControllerArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut output = None;

        while !input.is_empty() {
            let ident: Ident = input.parse()?;
            input.parse::<Token![=]>()?;

            match ident.to_string().as_str() {
                "output" => {
                    let ty: Type = input.parse()?;
                    output = Some(ty);
                }
                other => {
                    return Err(syn::Error::new(
                        ident.span(),
                        format!("unknown attribute: {}", other),
                    ));
                }
            }

            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
        }

        Ok(ControllerArgs { output })
    }
}

/// One method exposed as an action.
struct Action {
    ident: Ident,
    name: String,
    is_async: bool,
    takes_params: bool,
}

/// Implementation of the `#[controller]` macro.
pub fn controller_impl(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(attr as ControllerArgs);
    let mut input = parse_macro_input!(item as ItemImpl);

    match expand(args, &mut input) {
        Ok(expanded) => TokenStream::from(expanded),
        Err(err) => {
            let err = err.to_compile_error();
            TokenStream::from(quote! {
                #input
                #err
            })
        }
    }
}

fn expand(args: ControllerArgs, input: &mut ItemImpl) -> syn::Result<TokenStream2> {
    if let Some((_, path, _)) = &input.trait_ {
        return Err(syn::Error::new_spanned(
            path,
            "#[controller] must be placed on an inherent impl block",
        ));
    }

    let Some(output) = args.output else {
        return Err(syn::Error::new_spanned(
            &input.self_ty,
            "#[controller] requires the action output type: #[controller(output = T)]",
        ));
    };

    let mut actions = Vec::new();
    for item in &mut input.items {
        let ImplItem::Fn(method) = item else {
            continue;
        };
        if take_skip(&mut method.attrs)? {
            continue;
        }
        if let Some(action) = action(method)? {
            actions.push(action);
        }
    }

    check_versions(&actions)?;

    let self_ty = &input.self_ty;
    let (impl_generics, _, where_clause) = input.generics.split_for_impl();

    // Collisions are rejected above, so registration cannot fail at runtime.
    let registrations = actions.iter().map(|action| {
        let name = &action.name;
        quote! {
            let _ = table.register(#name);
        }
    });

    let arms = actions.iter().map(|action| {
        let name = &action.name;
        let ident = &action.ident;
        let args = action.takes_params.then(|| quote!(params));
        let call = if action.is_async {
            quote!(self.#ident(#args).await)
        } else {
            quote!(self.#ident(#args))
        };
        quote! {
            #name => #call.map_err(|err| {
                ::restive::DispatchError::Controller(::core::convert::Into::into(err))
            }),
        }
    });

    Ok(quote! {
        #input

        impl #impl_generics ::restive::Controller for #self_ty #where_clause {
            type Output = #output;

            fn actions(&self) -> &::restive::ActionTable {
                static ACTIONS: ::std::sync::OnceLock<::restive::ActionTable> =
                    ::std::sync::OnceLock::new();
                ACTIONS.get_or_init(|| {
                    let mut table = ::restive::ActionTable::new();
                    #(#registrations)*
                    table
                })
            }

            async fn invoke(
                &self,
                method: &str,
                params: &::restive::Params,
            ) -> ::core::result::Result<Self::Output, ::restive::DispatchError> {
                let _ = params;
                match method {
                    #(#arms)*
                    other => ::core::result::Result::Err(
                        ::restive::DispatchError::ActionNotFound(::std::string::ToString::to_string(other)),
                    ),
                }
            }
        }
    })
}

/// Remove a `#[controller(skip)]` marker, reporting whether one was present.
fn take_skip(attrs: &mut Vec<Attribute>) -> syn::Result<bool> {
    let mut skip = false;
    let mut error = None;

    attrs.retain(|attr| {
        if !attr.path().is_ident("controller") {
            return true;
        }
        match attr.parse_args::<Ident>() {
            Ok(ident) if ident == "skip" => skip = true,
            Ok(ident) => {
                error = Some(syn::Error::new_spanned(
                    &ident,
                    format!("unknown method attribute: {}", ident),
                ));
            }
            Err(err) => error = Some(err),
        }
        false
    });

    match error {
        Some(err) => Err(err),
        None => Ok(skip),
    }
}

/// Read a method as an action: public, taking `&self` and optionally `&Params`.
fn action(method: &ImplItemFn) -> syn::Result<Option<Action>> {
    if !matches!(method.vis, Visibility::Public(_)) {
        return Ok(None);
    }

    let sig = &method.sig;
    let mut inputs = sig.inputs.iter();
    match inputs.next() {
        Some(FnArg::Receiver(receiver))
            if receiver.reference.is_some() && receiver.mutability.is_none() => {}
        Some(FnArg::Receiver(receiver)) => {
            return Err(syn::Error::new_spanned(
                receiver,
                "controller actions must take `&self`",
            ));
        }
        _ => return Ok(None),
    }

    let takes_params = match inputs.next() {
        None => false,
        Some(FnArg::Typed(arg)) if matches!(&*arg.ty, Type::Reference(_)) => true,
        Some(arg) => {
            return Err(syn::Error::new_spanned(
                arg,
                "controller actions take at most one argument: `params: &Params`",
            ));
        }
    };
    if let Some(extra) = inputs.next() {
        return Err(syn::Error::new_spanned(
            extra,
            "controller actions take at most one argument: `params: &Params`",
        ));
    }

    Ok(Some(Action {
        ident: sig.ident.clone(),
        name: sig.ident.to_string(),
        is_async: sig.asyncness.is_some(),
        takes_params,
    }))
}

/// Reject method names that implement the same action version twice.
fn check_versions(actions: &[Action]) -> syn::Result<()> {
    let mut table = ActionTable::new();
    for action in actions {
        if let Err(ConfigurationError::DuplicateVersion {
            action: base,
            version,
            existing,
            ..
        }) = table.register(action.name.as_str())
        {
            return Err(syn::Error::new_spanned(
                &action.ident,
                format!(
                    "`{}` implements `{}` version {}, which `{}` already implements",
                    action.name, base, version, existing
                ),
            ));
        }
    }
    Ok(())
}
