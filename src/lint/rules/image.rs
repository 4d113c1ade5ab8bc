//! Image reference helpers shared by stage rules.

/// An image reference split into its parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageRef<'a> {
    /// Repository, including any registry host and port.
    pub name: &'a str,
    /// Tag, `None` when absent or empty.
    pub tag: Option<&'a str>,
    pub has_digest: bool,
}

impl<'a> ImageRef<'a> {
    /// Split `reference`. A `:` only starts a tag when no `/` follows it, so
    /// a registry port is not mistaken for one.
    pub fn parse(reference: &'a str) -> Self {
        let (without_digest, has_digest) = match reference.split_once('@') {
            Some((name, _)) => (name, true),
            None => (reference, false),
        };
        match without_digest.rfind(':') {
            Some(idx) if !without_digest[idx..].contains('/') => {
                let tag = &without_digest[idx + 1..];
                Self {
                    name: &without_digest[..idx],
                    tag: (!tag.is_empty()).then_some(tag),
                    has_digest,
                }
            }
            _ => Self {
                name: without_digest,
                tag: None,
                has_digest,
            },
        }
    }

    /// The tag, with the implicit `latest` filled in.
    pub fn effective_tag(&self) -> &'a str {
        self.tag.unwrap_or("latest")
    }

    /// Whether two references name the same image once the implicit
    /// `latest` tag is taken into account.
    pub fn same_image(a: &str, b: &str) -> bool {
        let (a, b) = (ImageRef::parse(a), ImageRef::parse(b));
        a.name == b.name && a.effective_tag() == b.effective_tag()
    }
}
