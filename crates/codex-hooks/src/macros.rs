//! Convenience macros for declaring hook manifests.

/// Builds a [`HookTable`](crate::parser::HookTable) of public regular
/// methods, optionally with type-level markers.
///
/// # Example
/// ```rust,ignore
/// let table = hook_table! {
///     class: [Marker::action("admin_init")],
///     "init" => [Marker::action("init"), Marker::action("wp_loaded").with_priority(20)],
///     "title" => [Marker::filter("the_title").with_id("sample/title")],
/// };
/// ```
#[macro_export]
macro_rules! hook_table {
    (
        class: [$($class_marker:expr),* $(,)?]
        $(, $method:literal => [$($marker:expr),* $(,)?])* $(,)?
    ) => {{
        let table = $crate::parser::HookTable::new();
        $(
            let table = table.on_class($class_marker);
        )*
        $(
            let table = table.method($method, vec![$($marker),*]);
        )*
        table
    }};
    ($($method:literal => [$($marker:expr),* $(,)?]),* $(,)?) => {{
        let table = $crate::parser::HookTable::new();
        $(
            let table = table.method($method, vec![$($marker),*]);
        )*
        table
    }};
}
