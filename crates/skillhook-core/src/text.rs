//! Text helpers for advisory output.

/// Human-facing form of a rule name: every `-` becomes a space.
///
/// `"database-expert"` → `"database expert"`.
pub fn display_name(name: &str) -> String {
    name.replace('-', " ")
}

/// Display names joined with `", "`, in the order given.
pub fn join_display_names<'a, I>(names: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    names
        .into_iter()
        .map(display_name)
        .collect::<Vec<_>>()
        .join(", ")
}
