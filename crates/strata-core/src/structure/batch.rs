use crate::cancel::CancelToken;
use crate::error::StrataError;
use crate::extraction::PageSource;
use crate::model::Page;
use std::path::Path;
use std::vec::IntoIter;

/// A decoded, contiguous page range.
#[derive(Debug)]
pub struct PageBatch {
    /// 1-based number of the first page in `pages`.
    pub first_page: usize,
    pub pages: Vec<Page>,
}

impl PageBatch {
    /// Pages paired with their absolute 1-based page number.
    pub fn numbered(&self) -> impl Iterator<Item = (usize, &Page)> {
        self.pages
            .iter()
            .enumerate()
            .map(move |(i, p)| (self.first_page + i, p))
    }
}

/// Lazy, finite sequence of page batches over `1..=page_count`.
///
/// Each `next()` checks the cancel token, then asks the source for the next
/// range. Decode failures are wrapped with the pass number and range. After the
/// first error the iterator is exhausted.
pub struct PageBatches<'a> {
    source: &'a dyn PageSource,
    path: &'a Path,
    cancel: &'a CancelToken,
    pass: u8,
    ranges: IntoIter<(usize, usize)>,
    done: bool,
}

impl<'a> PageBatches<'a> {
    pub fn new(
        source: &'a dyn PageSource,
        path: &'a Path,
        cancel: &'a CancelToken,
        pass: u8,
        page_count: usize,
        batch_size: usize,
    ) -> Self {
        PageBatches {
            source,
            path,
            cancel,
            pass,
            ranges: batch_ranges(page_count, batch_size).into_iter(),
            done: false,
        }
    }
}

/// Inclusive 1-based ranges covering `1..=page_count` in steps of `batch_size`.
pub fn batch_ranges(page_count: usize, batch_size: usize) -> Vec<(usize, usize)> {
    let step = batch_size.max(1);
    (1..=page_count)
        .step_by(step)
        .map(|from| (from, (from + step - 1).min(page_count)))
        .collect()
}

impl Iterator for PageBatches<'_> {
    type Item = Result<PageBatch, StrataError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let (from, to) = self.ranges.next()?;
        if self.cancel.is_cancelled() {
            self.done = true;
            return Some(Err(StrataError::Cancelled));
        }

        log::debug!("pass {}: decoding pages {}-{}", self.pass, from, to);
        match self.source.decode_pages(self.path, from, to) {
            Ok(pages) => Some(Ok(PageBatch {
                first_page: from,
                pages,
            })),
            Err(e) => {
                self.done = true;
                Some(Err(wrap_decode_error(e, self.pass, from, to)))
            }
        }
    }
}

fn wrap_decode_error(err: StrataError, pass: u8, from: usize, to: usize) -> StrataError {
    match err {
        StrataError::AdapterUnavailable(_) | StrataError::Cancelled => err,
        other => StrataError::BatchDecode {
            pass,
            from,
            to,
            source: Box::new(other),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct RecordingSource {
        calls: Mutex<Vec<(usize, usize)>>,
        fail_from: Option<usize>,
    }

    impl PageSource for RecordingSource {
        fn page_count(&self, _path: &Path) -> Result<usize, StrataError> {
            Ok(0)
        }

        fn decode_pages(
            &self,
            _path: &Path,
            from: usize,
            to: usize,
        ) -> Result<Vec<Page>, StrataError> {
            self.calls.lock().unwrap().push((from, to));
            if self.fail_from == Some(from) {
                return Err(StrataError::MalformedStext("truncated".into()));
            }
            Ok(vec![Page::default(); to - from + 1])
        }

        fn backend_name(&self) -> &str {
            "recording"
        }
    }

    fn source(fail_from: Option<usize>) -> RecordingSource {
        RecordingSource {
            calls: Mutex::new(Vec::new()),
            fail_from,
        }
    }

    #[test]
    fn test_batch_ranges() {
        assert!(batch_ranges(0, 100).is_empty());
        assert_eq!(batch_ranges(3, 100), vec![(1, 3)]);
        assert_eq!(batch_ranges(250, 100), vec![(1, 100), (101, 200), (201, 250)]);
        assert_eq!(batch_ranges(3, 1), vec![(1, 1), (2, 2), (3, 3)]);
        assert_eq!(batch_ranges(2, 0), vec![(1, 1), (2, 2)]);
    }

    #[test]
    fn test_iterates_requested_ranges() {
        let src = source(None);
        let cancel = CancelToken::new();
        let batches: Vec<PageBatch> =
            PageBatches::new(&src, Path::new("doc.pdf"), &cancel, 1, 5, 2)
                .collect::<Result<_, _>>()
                .unwrap();

        assert_eq!(*src.calls.lock().unwrap(), vec![(1, 2), (3, 4), (5, 5)]);
        let numbers: Vec<usize> = batches
            .iter()
            .flat_map(|b| b.numbered().map(|(n, _)| n).collect::<Vec<_>>())
            .collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_failure_names_pass_and_range_and_stops() {
        let src = source(Some(3));
        let cancel = CancelToken::new();
        let mut it = PageBatches::new(&src, Path::new("doc.pdf"), &cancel, 2, 6, 2);
        assert!(it.next().unwrap().is_ok());
        let err = it.next().unwrap().unwrap_err();
        assert!(matches!(
            err,
            StrataError::BatchDecode {
                pass: 2,
                from: 3,
                to: 4,
                ..
            }
        ));
        assert!(err.to_string().contains("pass 2"));
        assert!(err.to_string().contains("3-4"));
        assert!(it.next().is_none());
    }

    #[test]
    fn test_cancelled_before_request() {
        let src = source(None);
        let cancel = CancelToken::new();
        cancel.cancel();
        let mut it = PageBatches::new(&src, Path::new("doc.pdf"), &cancel, 1, 5, 2);
        assert!(matches!(it.next(), Some(Err(StrataError::Cancelled))));
        assert!(it.next().is_none());
        assert!(src.calls.lock().unwrap().is_empty());
    }
}
