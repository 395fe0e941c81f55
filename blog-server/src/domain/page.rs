use super::error::DomainError;

pub(crate) const DEFAULT_PAGE: u32 = 1;
pub(crate) const DEFAULT_LIMIT: u32 = 10;
pub(crate) const MAX_LIMIT: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Pagination {
    pub(crate) page: u32,
    pub(crate) limit: u32,
}

impl Pagination {
    pub(crate) fn new(page: Option<u32>, limit: Option<u32>) -> Result<Self, DomainError> {
        let page = page.unwrap_or(DEFAULT_PAGE);
        let limit = limit.unwrap_or(DEFAULT_LIMIT);

        if page == 0 {
            return Err(DomainError::Validation {
                field: "page",
                message: "must be >= 1",
            });
        }
        if limit == 0 || limit > MAX_LIMIT {
            return Err(DomainError::Validation {
                field: "limit",
                message: "must be 1..100",
            });
        }
        Ok(Self { page, limit })
    }

    pub(crate) fn offset(&self) -> usize {
        (self.page as usize - 1).saturating_mul(self.limit as usize)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Одна страница выборки вместе с общими счётчиками.
#[derive(Debug, Clone)]
pub(crate) struct Page<T> {
    pub(crate) data: Vec<T>,
    pub(crate) total: usize,
    pub(crate) page: u32,
    pub(crate) last_page: u32,
}

impl<T> Page<T> {
    /// Slices an already filtered and ordered sequence.
    pub(crate) fn paginate<I>(items: I, pagination: Pagination) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        let items = items.into_iter();
        let total = items.len();
        let data = items
            .skip(pagination.offset())
            .take(pagination.limit as usize)
            .collect();

        Self {
            data,
            total,
            page: pagination.page,
            last_page: total.div_ceil(pagination.limit as usize) as u32,
        }
    }

    pub(crate) fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            data: self.data.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            last_page: self.last_page,
        }
    }
}
