use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod to_record;

#[proc_macro_derive(ToRecord, attributes(record, field))]
pub fn derive_to_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match to_record::expand_to_record(&input) {
        Ok(tokens) => tokens,
        Err(err) => err.to_compile_error().into(),
    }
}
