use std::collections::BTreeSet;

/// Which locations a caller wants sessions for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LocationFilter {
    /// Every observed location.
    #[default]
    All,
    /// Only these places. An empty set matches nothing.
    Only(BTreeSet<String>),
}

impl LocationFilter {
    /// Build a filter from caller-supplied names; no names means [`LocationFilter::All`].
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: BTreeSet<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            Self::All
        } else {
            Self::Only(names)
        }
    }

    #[must_use]
    pub fn matches(&self, place: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(places) => places.contains(place),
        }
    }
}
