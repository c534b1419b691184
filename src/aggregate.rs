use crate::catalog::Distribution;
use crate::error::PlotError;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// algorithm name -> raw measurements, in repetition order
pub type AlgorithmData = BTreeMap<String, Vec<u64>>;

/// Everything measured for one input size
pub type SizeData = BTreeMap<Distribution, AlgorithmData>;

/// One line of a result file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRecord {
    pub size: u64,
    pub distribution: Distribution,
    pub algorithm: String,
    pub measurements: Vec<u64>,
}

/// size -> distribution -> algorithm -> measurements
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MeasurementIndex {
    sizes: BTreeMap<u64, SizeData>,
}

impl MeasurementIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a record, replacing any earlier record for the same triple.
    pub fn insert(&mut self, record: ResultRecord) {
        self.sizes
            .entry(record.size)
            .or_default()
            .entry(record.distribution)
            .or_default()
            .insert(record.algorithm, record.measurements);
    }

    pub fn measurements(
        &self,
        size: u64,
        distribution: Distribution,
        algorithm: &str,
    ) -> Option<&[u64]> {
        self.sizes
            .get(&size)?
            .get(&distribution)?
            .get(algorithm)
            .map(Vec::as_slice)
    }

    /// Sizes in ascending order
    pub fn sizes(&self) -> impl Iterator<Item = u64> + '_ {
        self.sizes.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u64, &SizeData)> {
        self.sizes.iter().map(|(size, data)| (*size, data))
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }
}

/// Reads a directory of patterns benchmark result files.
pub struct Aggregator {
    verbose: bool,
}

impl Aggregator {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Load every file directly inside `root` into one index.
    ///
    /// Subdirectories are skipped. Files are read in path order; when the
    /// same (size, distribution, algorithm) appears twice the later line wins.
    pub fn load(&self, root: &Path) -> Result<MeasurementIndex, PlotError> {
        let entries = std::fs::read_dir(root).map_err(|e| PlotError::io(root, e))?;

        let mut files: Vec<PathBuf> = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| PlotError::io(root, e))?;
            let path = entry.path();
            if path.is_file() {
                files.push(path);
            }
        }
        files.sort();

        let mut index = MeasurementIndex::new();
        for path in &files {
            let count = self.load_file(path, &mut index)?;
            if self.verbose {
                println!("  Loaded {} records from {}", count, path.display());
            }
        }

        Ok(index)
    }

    /// Parse one file into `index`, returning the number of records read.
    pub fn load_file(&self, path: &Path, index: &mut MeasurementIndex) -> Result<usize, PlotError> {
        let file = File::open(path).map_err(|e| PlotError::io(path, e))?;
        let reader = BufReader::new(file);

        let mut count = 0;
        for (line_idx, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| PlotError::io(path, e))?;
            if line.trim().is_empty() {
                continue;
            }
            let record = Self::parse_line(&line, path, line_idx + 1)?;
            index.insert(record);
            count += 1;
        }

        Ok(count)
    }

    /// Parse `size, distribution, algorithm, measurement[, measurement...]`.
    ///
    /// `path` and `line` are only used to locate errors.
    pub fn parse_line(text: &str, path: &Path, line: usize) -> Result<ResultRecord, PlotError> {
        let malformed = |reason: String| PlotError::MalformedRecord {
            reason,
            path: path.to_path_buf(),
            line,
        };

        let fields: Vec<&str> = text.split(',').map(str::trim).collect();
        if fields.len() < 4 {
            return Err(malformed(format!(
                "expected at least 4 fields, found {}",
                fields.len()
            )));
        }

        let size = fields[0]
            .parse::<u64>()
            .ok()
            .filter(|&size| size > 0)
            .ok_or_else(|| malformed(format!("invalid size '{}'", fields[0])))?;

        let distribution =
            Distribution::from_key(fields[1]).ok_or_else(|| PlotError::UnknownDistribution {
                key: fields[1].to_string(),
                path: path.to_path_buf(),
                line,
            })?;

        let algorithm = fields[2].to_string();

        let measurements = fields[3..]
            .iter()
            .map(|field| {
                field
                    .parse::<u64>()
                    .map_err(|_| malformed(format!("invalid measurement '{}'", field)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ResultRecord {
            size,
            distribution,
            algorithm,
            measurements,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::collection::vec as prop_vec;
    use proptest::prelude::*;
    use std::fs;
    use tempfile::TempDir;

    fn parse(text: &str) -> Result<ResultRecord, PlotError> {
        Aggregator::parse_line(text, Path::new("results.csv"), 1)
    }

    #[test]
    fn test_parse_trims_fields() {
        let record = parse(" 1000 , shuffled ,  pdq_sort , 12, 13 ,11").unwrap();
        assert_eq!(record.size, 1000);
        assert_eq!(record.distribution, Distribution::Shuffled);
        assert_eq!(record.algorithm, "pdq_sort");
        assert_eq!(record.measurements, vec![12, 13, 11]);
    }

    #[test]
    fn test_parse_unknown_distribution() {
        let err = Aggregator::parse_line("1000,inversions,pdq_sort,1", Path::new("a.csv"), 7)
            .unwrap_err();
        match err {
            PlotError::UnknownDistribution { key, path, line } => {
                assert_eq!(key, "inversions");
                assert_eq!(path, PathBuf::from("a.csv"));
                assert_eq!(line, 7);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_malformed_records() {
        for text in [
            "1000,shuffled,pdq_sort",
            "1000,shuffled,pdq_sort,abc",
            "1000,shuffled,pdq_sort,1,-2",
            "1000,shuffled,pdq_sort,1,",
            "big,shuffled,pdq_sort,1",
            "0,shuffled,pdq_sort,1",
        ] {
            assert!(
                matches!(parse(text), Err(PlotError::MalformedRecord { .. })),
                "expected malformed record for {text:?}"
            );
        }
    }

    #[test]
    fn test_error_message_names_file_and_line() {
        let err = Aggregator::parse_line("1,shuffled,x", Path::new("dir/run.txt"), 3).unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("dir/run.txt:3:"), "{message}");
    }

    #[test]
    fn test_load_merges_files_and_skips_blank_lines() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("a.txt"),
            "1000,shuffled,heap_sort,5,6,7\n\n1000,ascending,heap_sort,1\n",
        )
        .unwrap();
        fs::write(dir.path().join("b.txt"), "10,shuffled,pdq_sort,9\n").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();

        let index = Aggregator::new(false).load(dir.path()).unwrap();
        assert_eq!(index.sizes().collect::<Vec<_>>(), vec![10, 1000]);
        assert_eq!(
            index.measurements(1000, Distribution::Shuffled, "heap_sort"),
            Some(&[5, 6, 7][..])
        );
        assert_eq!(
            index.measurements(1000, Distribution::Ascending, "heap_sort"),
            Some(&[1][..])
        );
        assert_eq!(
            index.measurements(10, Distribution::Shuffled, "pdq_sort"),
            Some(&[9][..])
        );
    }

    #[test]
    fn test_last_write_wins() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.txt"), "100,shuffled,std_sort,1,2\n").unwrap();
        fs::write(dir.path().join("b.txt"), "100,shuffled,std_sort,3\n").unwrap();

        let index = Aggregator::new(false).load(dir.path()).unwrap();
        assert_eq!(
            index.measurements(100, Distribution::Shuffled, "std_sort"),
            Some(&[3][..])
        );
    }

    #[test]
    fn test_load_is_idempotent() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("run.txt"),
            "100,shuffled,std_sort,1,2\n100,descending,std_sort,4\n",
        )
        .unwrap();

        let aggregator = Aggregator::new(false);
        assert_eq!(
            aggregator.load(dir.path()).unwrap(),
            aggregator.load(dir.path()).unwrap()
        );
    }

    #[test]
    fn test_missing_directory() {
        let dir = TempDir::new().unwrap();
        let err = Aggregator::new(false)
            .load(&dir.path().join("does-not-exist"))
            .unwrap_err();
        assert!(matches!(err, PlotError::Io { .. }));
    }

    #[test]
    fn test_bad_line_reports_file_line() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("run.txt");
        fs::write(&path, "100,shuffled,std_sort,1\n100,bogus,std_sort,1\n").unwrap();

        let err = Aggregator::new(false).load(dir.path()).unwrap_err();
        match err {
            PlotError::UnknownDistribution { line, path: p, .. } => {
                assert_eq!(line, 2);
                assert_eq!(p, path);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    proptest! {
        #[test]
        fn prop_loaded_measurements_match_source(
            size in 1u64..10_000_000,
            dist_idx in 0usize..12,
            measurements in prop_vec(any::<u64>(), 1..20),
        ) {
            let distribution = Distribution::all()[dist_idx];
            let line = format!(
                "{}, {}, verge_sort, {}",
                size,
                distribution.key(),
                measurements
                    .iter()
                    .map(|m| m.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            );

            let dir = TempDir::new().unwrap();
            fs::write(dir.path().join("run.txt"), line).unwrap();

            let index = Aggregator::new(false).load(dir.path()).unwrap();
            prop_assert_eq!(
                index.measurements(size, distribution, "verge_sort"),
                Some(measurements.as_slice())
            );
        }
    }
}
