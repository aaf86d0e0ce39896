//! Sample labels and the binding of labels to data columns.
//!
//! A [`SampleLabels`] is established once, when a source is opened, and fixes the
//! column each sample's values come from. Loads then resolve a requested subset of
//! names against it with [`SampleLabels::resolve()`].

use indexmap::IndexSet;
use log::warn;

use crate::error::CoverageError;
use crate::ranges::GenomicRegion;

/// An ordered set of distinct sample names. The position of a name is the data
/// column it is bound to.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SampleLabels {
    labels: IndexSet<String>,
}

/// The outcome of resolving requested sample names against a [`SampleLabels`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedSamples {
    /// `(label, column)` pairs, in source order.
    pub columns: Vec<(String, usize)>,
    /// Requested names that the source does not have.
    pub dropped: Vec<String>,
}

impl SampleLabels {
    /// Build a label set, rejecting duplicated names.
    pub fn new<I, S>(labels: I) -> Result<Self, CoverageError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = IndexSet::new();
        for label in labels {
            let label = label.into();
            if set.contains(&label) {
                return Err(CoverageError::DuplicateLabel(label));
            }
            set.insert(label);
        }
        Ok(Self { labels: set })
    }

    /// The default labels for `n` data columns: `"1"`, `"2"`, ..., `"n"`.
    pub fn numbered(n: usize) -> Self {
        Self {
            labels: (1..=n).map(|i| i.to_string()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels.contains(label)
    }

    /// The data column of `label`, if present.
    pub fn column(&self, label: &str) -> Option<usize> {
        self.labels.get_index_of(label)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.labels.iter().map(|x| x.as_str())
    }

    /// Resolve `requested` names to `(label, column)` pairs, in the order of this label
    /// set (not the order requested). `None` or an empty request selects every label.
    ///
    /// Requested names that are not labels are dropped rather than treated as errors;
    /// they are returned in [`ResolvedSamples::dropped`] so callers can report them.
    ///
    /// # Errors
    /// Returns [`CoverageError::EmptyLabelSet`] if nothing is left to load, either
    /// because there are no labels at all or because `requested` shares no name with
    /// them.
    pub fn resolve(
        &self,
        requested: Option<&[String]>,
        region: &GenomicRegion,
    ) -> Result<ResolvedSamples, CoverageError> {
        let requested = requested.filter(|x| !x.is_empty());

        let (columns, dropped) = match requested {
            None => (
                self.labels
                    .iter()
                    .enumerate()
                    .map(|(i, x)| (x.clone(), i))
                    .collect::<Vec<_>>(),
                Vec::new(),
            ),
            Some(requested) => {
                let columns = self
                    .labels
                    .iter()
                    .enumerate()
                    .filter(|(_, x)| requested.contains(*x))
                    .map(|(i, x)| (x.clone(), i))
                    .collect::<Vec<_>>();
                let dropped = requested
                    .iter()
                    .filter(|x| !self.contains(x))
                    .cloned()
                    .collect::<Vec<_>>();
                (columns, dropped)
            }
        };

        if columns.is_empty() {
            return Err(CoverageError::EmptyLabelSet {
                region: region.to_string(),
                requested: requested.map(|x| x.to_vec()).unwrap_or_default(),
            });
        }
        if !dropped.is_empty() {
            warn!(
                "samples {:?} are not in this source and will not be loaded",
                dropped
            );
        }
        Ok(ResolvedSamples { columns, dropped })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranges::Strand;

    fn region() -> GenomicRegion {
        GenomicRegion::new("chr1", 100, 200, Strand::Unknown).unwrap()
    }

    fn names(x: &[&str]) -> Vec<String> {
        x.iter().map(|x| x.to_string()).collect()
    }

    #[test]
    fn test_numbered_labels() {
        let labels = SampleLabels::numbered(3);
        assert_eq!(labels.iter().collect::<Vec<_>>(), vec!["1", "2", "3"]);
        assert_eq!(labels.column("2"), Some(1));
    }

    #[test]
    fn test_duplicate_labels() {
        let result = SampleLabels::new(["a", "b", "a"]);
        assert!(matches!(result, Err(CoverageError::DuplicateLabel(x)) if x == "a"));
    }

    #[test]
    fn test_resolve_all() {
        let labels = SampleLabels::new(["s1", "s2"]).unwrap();
        let resolved = labels.resolve(None, &region()).unwrap();
        assert_eq!(
            resolved.columns,
            vec![("s1".to_string(), 0), ("s2".to_string(), 1)]
        );
        assert!(resolved.dropped.is_empty());

        // an empty request means "everything", like no request
        let resolved = labels.resolve(Some(&[]), &region()).unwrap();
        assert_eq!(resolved.columns.len(), 2);
    }

    #[test]
    fn test_resolve_keeps_source_order() {
        let labels = SampleLabels::new(["s1", "s2", "s3"]).unwrap();
        let requested = names(&["s3", "s1"]);
        let resolved = labels.resolve(Some(&requested), &region()).unwrap();
        assert_eq!(
            resolved.columns,
            vec![("s1".to_string(), 0), ("s3".to_string(), 2)]
        );
    }

    // Unknown names are dropped on purpose; this is not an error path.
    #[test]
    fn test_resolve_drops_unknown_names() {
        let labels = SampleLabels::new(["s1", "s2"]).unwrap();
        let requested = names(&["s2", "nope"]);
        let resolved = labels.resolve(Some(&requested), &region()).unwrap();
        assert_eq!(resolved.columns, vec![("s2".to_string(), 1)]);
        assert_eq!(resolved.dropped, names(&["nope"]));
    }

    #[test]
    fn test_resolve_disjoint_is_error() {
        let labels = SampleLabels::new(["s1", "s2"]).unwrap();
        let requested = names(&["x", "y"]);
        let result = labels.resolve(Some(&requested), &region());
        match result {
            Err(CoverageError::EmptyLabelSet { region, requested }) => {
                assert_eq!(region, "chr1:100-200");
                assert_eq!(requested, names(&["x", "y"]));
            }
            _ => panic!("expected EmptyLabelSet"),
        }
    }

    #[test]
    fn test_resolve_no_labels_is_error() {
        let labels = SampleLabels::default();
        assert!(matches!(
            labels.resolve(None, &region()),
            Err(CoverageError::EmptyLabelSet { .. })
        ));
    }
}
