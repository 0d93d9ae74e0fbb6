use rustc_hash::FxHashSet;

/// Ordered set of trusted token ids.
///
/// Membership drives volume/liquidity attribution and iteration order drives
/// the token price search, where the first sufficiently liquid pair wins.
#[derive(Debug, Clone, Default)]
pub struct Whitelist {
    ordered: Vec<String>,
    members: FxHashSet<String>,
}

impl Whitelist {
    /// Build a whitelist, keeping the first occurrence of duplicated ids.
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut whitelist = Self::default();
        for token in tokens {
            let token = token.as_ref().to_lowercase();
            if whitelist.members.insert(token.clone()) {
                whitelist.ordered.push(token);
            }
        }
        whitelist
    }

    #[inline]
    pub fn contains(&self, token: &str) -> bool {
        self.members.contains(token)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ordered.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }
}
