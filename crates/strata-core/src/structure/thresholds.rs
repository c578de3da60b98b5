use crate::error::StrataError;
use crate::structure::histogram::FontHistogram;
use serde::{Deserialize, Serialize};

/// Minimum font size for each heading level. A value of 0 means the level
/// does not occur in the document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ThresholdSet {
    pub title: f64,
    pub section: f64,
    pub subsection: f64,
}

impl ThresholdSet {
    pub fn new(title: f64, section: f64, subsection: f64) -> Self {
        ThresholdSet {
            title,
            section,
            subsection,
        }
    }

    /// Number of heading levels present.
    pub fn levels(&self) -> usize {
        [self.title, self.section, self.subsection]
            .iter()
            .filter(|t| **t > 0.0)
            .count()
    }
}

/// Pick the three largest distinct sizes of a complete histogram as the
/// Title, Section and Subsection thresholds. Smaller sizes are body text.
pub fn select_thresholds(hist: &FontHistogram) -> Result<ThresholdSet, StrataError> {
    let top: Vec<f64> = hist.sizes_descending().take(3).map(|s| s as f64).collect();

    match top.as_slice() {
        [] => Err(StrataError::NoTextDetected),
        [title] => Ok(ThresholdSet::new(*title, 0.0, 0.0)),
        [title, section] => Ok(ThresholdSet::new(*title, *section, 0.0)),
        [title, section, subsection, ..] => Ok(ThresholdSet::new(*title, *section, *subsection)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Block, Line, Page};
    use crate::structure::histogram::bucket;

    fn hist_of(sizes: &[f64]) -> FontHistogram {
        let lines = sizes.iter().map(|s| Line::new("x", *s)).collect();
        let mut hist = FontHistogram::new();
        hist.observe_pages(&[Page::new(vec![Block::text(lines)])]);
        hist
    }

    #[test]
    fn test_empty_histogram_is_no_text() {
        let err = select_thresholds(&FontHistogram::new()).unwrap_err();
        assert!(matches!(err, StrataError::NoTextDetected));
    }

    #[test]
    fn test_single_size() {
        let t = select_thresholds(&hist_of(&[11.0, 11.0, 11.0])).unwrap();
        assert_eq!(t, ThresholdSet::new(12.0, 0.0, 0.0));
        assert_eq!(t.levels(), 1);
    }

    #[test]
    fn test_two_sizes() {
        let t = select_thresholds(&hist_of(&[20.0, 10.0, 10.0])).unwrap();
        assert_eq!(t, ThresholdSet::new(21.0, 11.0, 0.0));
    }

    #[test]
    fn test_smaller_sizes_ignored_regardless_of_frequency() {
        let mut sizes = vec![24.0, 18.0, 14.0];
        sizes.extend(std::iter::repeat(10.0).take(50));
        sizes.extend(std::iter::repeat(8.0).take(20));
        let t = select_thresholds(&hist_of(&sizes)).unwrap();
        assert_eq!(t, ThresholdSet::new(25.0, 19.0, 15.0));
    }

    #[test]
    fn test_thresholds_strictly_descending_and_present() {
        let samples: &[&[f64]] = &[
            &[9.0, 9.4, 12.0, 30.0, 7.2],
            &[10.0, 10.1, 10.2],
            &[5.5, 6.5, 7.5, 8.5, 9.5],
            &[40.0, 12.0],
        ];
        for sizes in samples {
            let hist = hist_of(sizes);
            let t = select_thresholds(&hist).unwrap();
            let populated: Vec<f64> = [t.title, t.section, t.subsection]
                .into_iter()
                .filter(|v| *v > 0.0)
                .collect();
            for pair in populated.windows(2) {
                assert!(pair[0] > pair[1], "{populated:?} not descending");
            }
            for v in populated {
                assert!(hist.count(v as i64) > 0, "{v} is not a histogram key");
            }
        }
    }

    #[test]
    fn test_near_sizes_collapse_into_one_level() {
        // 10.0 and 10.4 share bucket 11, so only one level exists.
        let t = select_thresholds(&hist_of(&[10.0, 10.4])).unwrap();
        assert_eq!(t.title, bucket(10.0) as f64);
        assert_eq!(t.section, 0.0);
    }
}
