//! Name membership lookups
//!
//! All comparisons are exact, case-sensitive string equality. No wildcards.

use ahash::AHashSet;

/// Something that can answer "is this name present?"
pub trait Membership {
    fn contains_name(&self, name: &str) -> bool;

    /// True if any of `names` is present
    fn contains_any<'n, I>(&self, names: I) -> bool
    where
        I: IntoIterator<Item = &'n str>,
    {
        names.into_iter().any(|name| self.contains_name(name))
    }
}

impl Membership for [String] {
    fn contains_name(&self, name: &str) -> bool {
        self.iter().any(|candidate| candidate == name)
    }
}

impl Membership for Vec<String> {
    fn contains_name(&self, name: &str) -> bool {
        self.as_slice().contains_name(name)
    }
}

/// Hashed set of borrowed names
#[derive(Debug, Clone, Default)]
pub struct NameSet<'a> {
    names: AHashSet<&'a str>,
}

impl<'a> NameSet<'a> {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = &'a S>,
        S: AsRef<str> + ?Sized + 'a,
    {
        NameSet {
            names: names.into_iter().map(<S as AsRef<str>>::as_ref).collect(),
        }
    }

    /// Add one more name (e.g. a username next to its groups)
    pub fn insert(&mut self, name: &'a str) {
        self.names.insert(name);
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Membership for NameSet<'_> {
    fn contains_name(&self, name: &str) -> bool {
        self.names.contains(name)
    }
}

/// True iff any of the rule's `wanted` names is bound to the requester
pub fn intersects<M>(wanted: &[String], bound: &M) -> bool
where
    M: Membership + ?Sized,
{
    bound.contains_any(wanted.iter().map(String::as_str))
}
