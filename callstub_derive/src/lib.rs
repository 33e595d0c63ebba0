// vim: tw=80
//! Proc Macros for use with callstub
//!
//! You probably don't want to use this crate directly.  Instead, use its
//! reexports via the [`callstub`](../callstub/index.html) crate.

#![cfg_attr(test, deny(warnings))]
extern crate proc_macro;

use proc_macro2::TokenStream;
use quote::quote;
use syn::{
    *,
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    spanned::Spanned
};

/// One argument of a `call!` invocation
enum Arg {
    Positional(Expr),
    Keyword(Ident, Expr),
}

impl Parse for Arg {
    fn parse(input: ParseStream) -> Result<Self> {
        // `x = 1` is a keyword argument, but `x == 1` is a positional one.
        if input.peek(Ident) && input.peek2(Token![=]) &&
            !input.peek2(Token![==])
        {
            let name: Ident = input.parse()?;
            input.parse::<Token![=]>()?;
            let value: Expr = input.parse()?;
            Ok(Arg::Keyword(name, value))
        } else {
            input.parse().map(Arg::Positional)
        }
    }
}

struct Args(Punctuated<Arg, Token![,]>);

impl Parse for Args {
    fn parse(input: ParseStream) -> Result<Self> {
        Punctuated::parse_terminated(input).map(Args)
    }
}

fn do_call(input: TokenStream) -> TokenStream {
    let args: Args = match parse2(input) {
        Ok(args) => args,
        Err(e) => return e.to_compile_error()
    };
    let mut positional = Vec::new();
    let mut names: Vec<Ident> = Vec::new();
    let mut values = Vec::new();
    for arg in args.0.into_iter() {
        match arg {
            Arg::Positional(e) => {
                if !names.is_empty() {
                    return Error::new(e.span(),
                        "positional argument follows keyword argument")
                        .to_compile_error();
                }
                positional.push(e);
            },
            Arg::Keyword(name, value) => {
                if names.iter().any(|n| *n == name) {
                    let msg = format!("keyword argument repeated: {}", name);
                    return Error::new(name.span(), msg).to_compile_error();
                }
                names.push(name);
                values.push(value);
            }
        }
    }
    let names = names.iter().map(|n| n.to_string());
    quote!(
        ::callstub::Call::new()
            #( .arg(#positional) )*
            #( .kwarg(#names, #values) )*
    )
}

/// Build a [`Call`](../callstub/struct.Call.html) from positional and keyword
/// arguments.
///
/// Positional arguments are arbitrary expressions.  Keyword arguments are
/// written `name = expr` and must follow every positional argument.  Each
/// argument is converted with `Into<Value>`, so literals, strings, vectors and
/// matchers can all be used.
///
/// # Examples
/// ```ignore
/// use callstub::*;
/// let c = call!("hello", 42, retries = 3);
/// assert_eq!(c, Call::new().arg("hello").arg(42).kwarg("retries", 3));
/// assert_eq!(c, call!(Any::new(), 42, retries = Any::of(Kind::Int)));
/// ```
#[proc_macro]
pub fn call(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    do_call(input.into()).into()
}
