use proc_macro2::{Span, TokenStream};
use quote::{quote, ToTokens};
use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    Expr, ExprLit, Ident, Lit, LitStr, Token,
};

use crate::crate_path;

/// A single comma separated argument of a logging macro.
#[allow(clippy::large_enum_variant)]
enum LogArg {
    /// A string literal, added verbatim.
    Text(String),
    /// An expression with an optional label, added via `Debug`.
    Value { label: Option<String>, expr: Expr },
}

/// Parses the optional `label =` prefix of an argument.
///
/// A bare `=` labels the value with its own source text, which is handled by the caller.
fn parse_label(input: ParseStream) -> syn::Result<Option<String>> {
    if !input.peek2(Token![=]) {
        return Ok(None);
    }
    let label = if input.peek(Ident) {
        input.parse::<Ident>()?.to_string()
    } else if input.peek(LitStr) {
        input.parse::<LitStr>()?.value()
    } else {
        return Ok(None);
    };
    input.parse::<Token![=]>()?;
    Ok(Some(label))
}

impl Parse for LogArg {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        if input.parse::<Option<Token![=]>>()?.is_some() {
            let expr: Expr = input.parse()?;
            let label = Some(expr.to_token_stream().to_string());
            return Ok(LogArg::Value { label, expr });
        }

        let label = parse_label(input)?;
        let expr: Expr = input.parse()?;

        match &expr {
            Expr::Lit(ExprLit {
                attrs,
                lit: Lit::Str(text),
            }) if attrs.is_empty() && label.is_none() => Ok(LogArg::Text(text.value())),
            _ => Ok(LogArg::Value { label, expr }),
        }
    }
}

/// Builds the closure that adds all arguments to a log message.
///
/// Adjacent text pieces, including value labels, are joined so they are written with a single
/// `add_message` call.
fn log_items(input: ParseStream) -> syn::Result<TokenStream> {
    let args = Punctuated::<LogArg, Token![,]>::parse_terminated(input)?;

    let target = Ident::new("target", Span::mixed_site());
    let mut steps = TokenStream::default();
    let mut text = String::new();

    let flush_text = |text: &mut String, steps: &mut TokenStream| {
        if !text.is_empty() {
            let message = std::mem::take(text);
            steps.extend(quote! { #target.add_message(#message); });
        }
    };

    for arg in args {
        let (label, expr) = match arg {
            LogArg::Text(piece) => (Some(piece), None),
            LogArg::Value { label, expr } => (label.map(|label| label + ":"), Some(expr)),
        };
        if let Some(piece) = label {
            if !text.is_empty() {
                text.push(' ');
            }
            text.push_str(&piece);
        }
        if let Some(expr) = expr {
            flush_text(&mut text, &mut steps);
            steps.extend(quote! { #target.add_value(&(#expr)); });
        }
    }
    flush_text(&mut text, &mut steps);

    Ok(quote!(|#target| { #steps }))
}

/// Expands a logging macro invocation for the given `LogLevel` variant.
pub fn log(level: &str, input: ParseStream) -> syn::Result<TokenStream> {
    let ctx: Ident = input.parse()?;
    if !input.is_empty() {
        input.parse::<Token![,]>()?;
    }

    let items = log_items(input)?;

    let cnfstream = crate_path("cnfstream")?;
    let level = Ident::new(level, Span::call_site());
    Ok(quote! {{
        use #cnfstream::log::HasLogger as _;
        #ctx.logger().log(#cnfstream::log::LogLevel::#level, #items)
    }})
}
