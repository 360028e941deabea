use quote::quote;
use syn::parse::Parser;

mod log;

/// Logs a message at the `Info` level.
///
/// The first argument is a context implementing `HasLogger`. It is followed by string literals,
/// which are added verbatim, and expressions, which are added using their `Debug` representation.
/// An expression can be labeled with `name = expr`, or with its own source text with `= expr`.
#[proc_macro]
pub fn info(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    expand_log("Info", input)
}

/// Logs a message at the `Verbose` level, see [`info!`].
#[proc_macro]
pub fn verbose(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    expand_log("Verbose", input)
}

/// Logs a message at the `Debug` level, see [`info!`].
#[proc_macro]
pub fn debug(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    expand_log("Debug", input)
}

/// Logs a message at the `Trace` level, see [`info!`].
#[proc_macro]
pub fn trace(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    expand_log("Trace", input)
}

fn expand_log(level: &str, input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let parser = |input: syn::parse::ParseStream| log::log(level, input);
    match parser.parse(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn crate_path(name: &str) -> syn::Result<proc_macro2::TokenStream> {
    let found_crate = proc_macro_crate::crate_name(name)
        .map_err(|err| syn::Error::new(proc_macro2::Span::call_site(), err.to_string()))?;
    Ok(match found_crate {
        proc_macro_crate::FoundCrate::Itself => quote!(crate),
        proc_macro_crate::FoundCrate::Name(name) => {
            let ident = syn::Ident::new(&name, proc_macro2::Span::call_site());
            quote!( ::#ident )
        }
    })
}
