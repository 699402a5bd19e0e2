/// Display colors for common languages, keyed by GitHub's `language` field.
///
/// Non-authoritative hint for rendering repo cards; lookups miss for
/// anything not in the table.
const LANGUAGE_COLORS: &[(&str, &str)] = &[
    ("C", "#555555"),
    ("C#", "#178600"),
    ("C++", "#f34b7d"),
    ("CSS", "#563d7c"),
    ("Clojure", "#db5855"),
    ("Dart", "#00B4AB"),
    ("Dockerfile", "#384d54"),
    ("Elixir", "#6e4a7e"),
    ("Go", "#00ADD8"),
    ("HTML", "#e34c26"),
    ("Haskell", "#5e5086"),
    ("Java", "#b07219"),
    ("JavaScript", "#f1e05a"),
    ("Kotlin", "#A97BFF"),
    ("Lua", "#000080"),
    ("MDX", "#fcb32c"),
    ("OCaml", "#ef7a08"),
    ("Objective-C", "#438eff"),
    ("PHP", "#4F5D95"),
    ("Python", "#3572A5"),
    ("R", "#198CE7"),
    ("Ruby", "#701516"),
    ("Rust", "#dea584"),
    ("Scala", "#c22d40"),
    ("Shell", "#89e051"),
    ("Svelte", "#ff3e00"),
    ("Swift", "#F05138"),
    ("TypeScript", "#3178c6"),
    ("Vue", "#41b883"),
    ("Zig", "#ec915c"),
];

/// Look up the display color for a language name. Case-sensitive, as
/// GitHub's API reports canonical names.
pub fn language_color(language: &str) -> Option<&'static str> {
    LANGUAGE_COLORS
        .iter()
        .find(|(name, _)| *name == language)
        .map(|(_, color)| *color)
}
