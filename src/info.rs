use std::fmt::Write;

static ENTRY_DELIMITER: char = ';';
static PART_DELIMITER: char = ':';

/// Renders an info response for humans.
///
/// The output starts with `title`, followed by one block per `;`-separated entry. Every
/// `:`-separated part of an entry goes on its own tab-indented line and each block ends with an
/// empty line. Trailing delimiters do not produce empty entries or parts.
///
/// ```rust
/// use aerospike_profile_demo::info::format_info;
///
/// let text = format_info("udf-list", "filename=profile.lua,hash=abc,type=LUA;");
/// assert_eq!(text, "udf-list\n\tfilename=profile.lua,hash=abc,type=LUA\n\n");
/// ```
#[must_use]
pub fn format_info(title: &str, info: &str) -> String {
    let mut text = String::new();
    writeln!(text, "{title}").ok();

    let info = info.trim_end_matches(ENTRY_DELIMITER);
    if info.is_empty() {
        return text;
    }

    for entry in info.split(ENTRY_DELIMITER) {
        for part in entry.trim_end_matches(PART_DELIMITER).split(PART_DELIMITER) {
            writeln!(text, "\t{part}").ok();
        }
        text.push('\n');
    }

    text
}
