// src/macros.rs

/// `s!()` is an empty `String`; `s!(x)` is `String::from(x)`.
#[macro_export]
macro_rules! s {
    () => { ::std::string::String::new() };
    ($expr:expr) => { ::std::string::String::from($expr) };
}

/// Concatenate string-likes into a new `String`: `join!(stem, ".json")`.
#[macro_export]
macro_rules! join {
    ($first:expr $(, $rest:expr)+ $(,)?) => {{
        let mut out = ::std::string::String::from($first);
        $( out.push_str($rest); )+
        out
    }};
}
