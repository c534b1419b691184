use crate::error::PlotError;

/// Input orderings produced by the patterns benchmark.
///
/// Variant order is the canonical display order: `Shuffled` is drawn at the
/// top of every chart and `Alternating16Values` at the bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Distribution {
    Shuffled,
    Shuffled16Values,
    AllEqual,
    Ascending,
    Descending,
    PipeOrgan,
    PushFront,
    PushMiddle,
    AscendingSawtooth,
    DescendingSawtooth,
    Alternating,
    Alternating16Values,
}

impl Distribution {
    pub fn all() -> &'static [Distribution] {
        &[
            Distribution::Shuffled,
            Distribution::Shuffled16Values,
            Distribution::AllEqual,
            Distribution::Ascending,
            Distribution::Descending,
            Distribution::PipeOrgan,
            Distribution::PushFront,
            Distribution::PushMiddle,
            Distribution::AscendingSawtooth,
            Distribution::DescendingSawtooth,
            Distribution::Alternating,
            Distribution::Alternating16Values,
        ]
    }

    /// Identifier as written by the benchmark into result files
    pub fn key(&self) -> &'static str {
        match self {
            Distribution::Shuffled => "shuffled",
            Distribution::Shuffled16Values => "shuffled_16_values",
            Distribution::AllEqual => "all_equal",
            Distribution::Ascending => "ascending",
            Distribution::Descending => "descending",
            Distribution::PipeOrgan => "pipe_organ",
            Distribution::PushFront => "push_front",
            Distribution::PushMiddle => "push_middle",
            Distribution::AscendingSawtooth => "ascending_sawtooth",
            Distribution::DescendingSawtooth => "descending_sawtooth",
            Distribution::Alternating => "alternating",
            Distribution::Alternating16Values => "alternating_16_values",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Distribution::Shuffled => "Shuffled",
            Distribution::Shuffled16Values => "Shuffled (16 values)",
            Distribution::AllEqual => "All equal",
            Distribution::Ascending => "Ascending",
            Distribution::Descending => "Descending",
            Distribution::PipeOrgan => "Pipe organ",
            Distribution::PushFront => "Push front",
            Distribution::PushMiddle => "Push middle",
            Distribution::AscendingSawtooth => "Ascending sawtooth",
            Distribution::DescendingSawtooth => "Descending sawtooth",
            Distribution::Alternating => "Alternating",
            Distribution::Alternating16Values => "Alternating (16 values)",
        }
    }

    pub fn from_key(key: &str) -> Option<Distribution> {
        Distribution::all().iter().copied().find(|d| d.key() == key)
    }
}

/// Algorithms known to the patterns benchmark, in chart order
pub const DEFAULT_ALGORITHM_ORDER: &[&str] = &[
    "heap_sort",
    "pdq_sort",
    "quick_sort",
    "spread_sort",
    "std_sort",
    "verge_sort",
];

/// Canonical left-to-right order of algorithms in every chart and legend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlgorithmOrder {
    names: Vec<String>,
}

impl AlgorithmOrder {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn index_of(&self, algorithm: &str) -> Option<usize> {
        self.names.iter().position(|name| name == algorithm)
    }

    /// Sort `algorithms` by their position in this order.
    ///
    /// Fails on the first algorithm the order does not know about.
    pub fn sort<'a, I>(&self, algorithms: I) -> Result<Vec<&'a str>, PlotError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut ranked = algorithms
            .into_iter()
            .map(|algo| {
                self.index_of(algo)
                    .map(|idx| (idx, algo))
                    .ok_or_else(|| PlotError::UnknownAlgorithm {
                        algorithm: algo.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        ranked.sort_by_key(|(idx, _)| *idx);
        Ok(ranked.into_iter().map(|(_, algo)| algo).collect())
    }
}

impl Default for AlgorithmOrder {
    fn default() -> Self {
        Self::new(DEFAULT_ALGORITHM_ORDER.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_catalog_round_trips_every_key() {
        assert_eq!(Distribution::all().len(), 12);
        for distribution in Distribution::all() {
            assert_eq!(Distribution::from_key(distribution.key()), Some(*distribution));
        }
        assert_eq!(Distribution::from_key("Shuffled"), None);
        assert_eq!(Distribution::from_key("inversions"), None);
    }

    #[test]
    fn test_variant_order_matches_display_order() {
        let mut sorted = Distribution::all().to_vec();
        sorted.sort();
        assert_eq!(sorted, Distribution::all());
        assert_eq!(Distribution::all()[0].display_name(), "Shuffled");
        assert_eq!(
            Distribution::all()[11].display_name(),
            "Alternating (16 values)"
        );
    }

    #[test]
    fn test_sort_uses_canonical_order() {
        let order = AlgorithmOrder::default();
        let sorted = order.sort(["quick_sort", "heap_sort"]).unwrap();
        assert_eq!(sorted, vec!["heap_sort", "quick_sort"]);
    }

    #[test]
    fn test_sort_rejects_unknown_algorithm() {
        let order = AlgorithmOrder::default();
        let err = order.sort(["heap_sort", "bogo_sort"]).unwrap_err();
        assert!(matches!(
            err,
            PlotError::UnknownAlgorithm { ref algorithm } if algorithm == "bogo_sort"
        ));
    }

    #[test]
    fn test_custom_order() {
        let order = AlgorithmOrder::new(["b", "a"]);
        assert_eq!(order.sort(["a", "b"]).unwrap(), vec!["b", "a"]);
        assert_eq!(order.index_of("c"), None);
    }

    proptest! {
        #[test]
        fn prop_sort_ignores_input_order(
            shuffled in Just(DEFAULT_ALGORITHM_ORDER.to_vec()).prop_shuffle(),
            keep in 1usize..=6,
        ) {
            let subset: Vec<&str> = shuffled.into_iter().take(keep).collect();
            let sorted = AlgorithmOrder::default().sort(subset.iter().copied()).unwrap();

            let mut expected = subset.clone();
            expected.sort_by_key(|a| DEFAULT_ALGORITHM_ORDER.iter().position(|b| b == a));
            prop_assert_eq!(sorted, expected);
        }
    }
}
