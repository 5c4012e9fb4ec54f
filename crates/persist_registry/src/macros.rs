//! Declaration macro for preference schemas

/// Declare a [`Schema`](crate::Schema) from a compact table.
///
/// Each field is bound to its store key; the type is one of `String`,
/// `Bool`, `Int` or `Float`. Expands to `Result<Schema, SchemaError>`.
///
/// # Example
/// ```ignore
/// let schema = define_prefs! {
///     Currency {
///         Coin: Int => "_coin",
///         Gem: Int => "_gem",
///     }
///     Setting {
///         Music: Bool => "_music",
///     }
/// }?;
/// ```
#[macro_export]
macro_rules! define_prefs {
    ($($category:ident { $($field:ident : $ty:ident => $key:expr),+ $(,)? })+) => {
        $crate::Schema::builder()
            $(
                .category(stringify!($category), |category| {
                    category
                        $(.entry(stringify!($field), $key, $crate::DataType::$ty))+
                })
            )+
            .build()
    };
}
