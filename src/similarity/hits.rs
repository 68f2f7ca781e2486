use std::fmt::{self, Debug, Display};

use serde::Serialize;

use crate::catalog::CatalogItem;

/// One recommended item and its similarity to the query item
#[derive(Clone, PartialEq, Serialize)]
pub struct HitEntry<'a> {
    pub item: &'a CatalogItem,
    pub score: f32,
}

/// Ranked query results, best first
#[derive(Clone, PartialEq, Serialize)]
pub struct Hits<'a> {
    pub list: Vec<HitEntry<'a>>,
}

impl<'a> Hits<'a> {
    pub fn new(list: Vec<HitEntry<'a>>) -> Self {
        Hits { list }
    }

    /// Sort by descending score.
    /// The sort is stable: equal scores keep their current order.
    pub fn sort_by_score_desc(&mut self) -> &mut Self {
        // Remove NaN scores
        self.list.retain(|e| !e.score.is_nan());
        self.list.sort_by(|a, b| b.score.total_cmp(&a.score));
        self
    }

    pub fn truncate(&mut self, top_n: usize) -> &mut Self {
        self.list.truncate(top_n);
        self
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HitEntry<'a>> {
        self.list.iter()
    }

    /// Names of the hits in rank order
    pub fn names(&self) -> Vec<&'a str> {
        self.list.iter().map(|e| e.item.name.as_str()).collect()
    }
}

impl<'a> IntoIterator for Hits<'a> {
    type Item = HitEntry<'a>;
    type IntoIter = std::vec::IntoIter<HitEntry<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.list.into_iter()
    }
}

impl Debug for HitEntry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {:.6}", self.item.name, self.score)
    }
}

impl Debug for Hits<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            writeln!(f, "Hits [")?;
            for entry in &self.list {
                writeln!(f, "    {:?}", entry)?;
            }
            write!(f, "]")
        } else {
            f.debug_list().entries(&self.list).finish()
        }
    }
}

impl Display for Hits<'_> {
    /// one line per hit: `<score>\t<name>\t<artists>\t<album>`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.list {
            writeln!(
                f,
                "{:.6}\t{}\t{}\t{}",
                entry.score,
                entry.item.name,
                entry.item.artists.join(", "),
                entry.item.album
            )?;
        }
        Ok(())
    }
}
