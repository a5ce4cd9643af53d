use serde::{Deserialize, Serialize};
use crate::{Error, Result};

/// Ordered sequence of part identifiers; a bijection over the input batch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permutation {
    ids: Vec<String>,
}

impl Permutation {
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Apply an index order to the identifiers it ranges over.
    ///
    /// `order` must mention every index of `ids` exactly once.
    pub fn from_order<S: AsRef<str>>(ids: &[S], order: &[usize]) -> Result<Self> {
        if order.len() != ids.len() {
            return Err(Error::InvalidPermutation(format!(
                "order has {} entries for {} identifiers",
                order.len(),
                ids.len()
            )));
        }

        let mut seen = vec![false; ids.len()];
        let mut out = Vec::with_capacity(ids.len());
        for &idx in order {
            match seen.get_mut(idx) {
                Some(slot) if !*slot => {
                    *slot = true;
                    out.push(ids[idx].as_ref().to_string());
                }
                Some(_) => {
                    return Err(Error::InvalidPermutation(format!("index {} repeated", idx)));
                }
                None => {
                    return Err(Error::InvalidPermutation(format!("index {} out of range", idx)));
                }
            }
        }

        Ok(Self { ids: out })
    }

    #[must_use]
    pub fn identity<S: AsRef<str>>(ids: &[S]) -> Self {
        Self {
            ids: ids.iter().map(|s| s.as_ref().to_string()).collect(),
        }
    }

    #[inline]
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.ids.iter()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.ids
    }

    /// True when this permutation holds exactly the identifiers in `ids`
    pub fn is_permutation_of<S: AsRef<str>>(&self, ids: &[S]) -> bool {
        if ids.len() != self.ids.len() {
            return false;
        }
        let mut expected: Vec<&str> = ids.iter().map(|s| s.as_ref()).collect();
        let mut actual: Vec<&str> = self.ids.iter().map(String::as_str).collect();
        expected.sort_unstable();
        actual.sort_unstable();
        expected == actual && actual.windows(2).all(|w| w[0] != w[1])
    }
}

impl<'a> IntoIterator for &'a Permutation {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.iter()
    }
}
