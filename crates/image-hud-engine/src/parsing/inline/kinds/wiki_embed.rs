/// Wiki-style image embed `![[target]]`.
pub struct WikiEmbed;

impl WikiEmbed {
    pub const OPEN: &'static [u8; 3] = b"![[";
    pub const CLOSE: &'static [u8; 2] = b"]]";
    /// Starts an alias or size hint: `![[a.png|200]]`.
    pub const ALIAS: char = '|';
    /// Starts a heading or block anchor: `![[a.png#section]]`.
    pub const ANCHOR: char = '#';

    /// Splits an embed target at the earliest `|` or `#`.
    ///
    /// Returns `(raw_target, suffix)`; the suffix keeps its leading delimiter
    /// and is empty when neither delimiter occurs.
    pub fn split_suffix(target: &str) -> (&str, &str) {
        match target.find([Self::ALIAS, Self::ANCHOR]) {
            Some(at) => target.split_at(at),
            None => (target, ""),
        }
    }

    /// Formats a wiki embed for `path`, reattaching a preserved suffix.
    pub fn format(path: &str, suffix: &str) -> String {
        format!("![[{path}{suffix}]]")
    }
}
