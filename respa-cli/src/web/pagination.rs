//! Page-number pagination over a counted collection

use serde::Serialize;

/// Why a requested page cannot be shown
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageError {
    /// The page parameter is neither a number nor "last"
    NotANumber(String),
    /// The page number is outside 1..=num_pages
    Empty(i64),
}

impl std::fmt::Display for PageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PageError::NotANumber(value) => write!(f, "Page '{}' is not a number", value),
            PageError::Empty(number) => write!(f, "Page {} contains no results", number),
        }
    }
}

impl std::error::Error for PageError {}

/// Splits `count` items into pages of `per_page`
///
/// An empty collection still has one (empty) page.
#[derive(Debug, Clone, Copy)]
pub struct Paginator {
    count: i64,
    per_page: i64,
}

/// One page of a `Paginator`, serialized into templates as `page_obj`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    pub number: i64,
    pub num_pages: i64,
    pub count: i64,
    /// 1-based index of the first item on the page (0 when empty)
    pub start_index: i64,
    /// 1-based index of the last item on the page
    pub end_index: i64,
    pub has_previous: bool,
    pub has_next: bool,
    pub previous_page_number: Option<i64>,
    pub next_page_number: Option<i64>,
}

impl Page {
    /// Rows to skip before this page
    pub fn offset(&self) -> i64 {
        (self.start_index - 1).max(0)
    }

    /// Number of items on this page
    pub fn item_count(&self) -> i64 {
        if self.start_index == 0 {
            0
        } else {
            self.end_index - self.start_index + 1
        }
    }
}

impl Paginator {
    pub fn new(count: i64, per_page: i64) -> Self {
        Paginator {
            count: count.max(0),
            per_page: per_page.max(1),
        }
    }

    pub fn count(&self) -> i64 {
        self.count
    }

    pub fn num_pages(&self) -> i64 {
        if self.count == 0 {
            1
        } else {
            (self.count + self.per_page - 1) / self.per_page
        }
    }

    /// Resolve a page parameter ("3", "last") to a page number
    pub fn validate_number(&self, value: &str) -> Result<i64, PageError> {
        let value = value.trim();
        let number = if value == "last" {
            self.num_pages()
        } else {
            value
                .parse::<i64>()
                .map_err(|_| PageError::NotANumber(value.to_string()))?
        };

        if number < 1 || number > self.num_pages() {
            return Err(PageError::Empty(number));
        }
        Ok(number)
    }

    /// Page for a page parameter
    pub fn page(&self, value: &str) -> Result<Page, PageError> {
        let number = self.validate_number(value)?;
        let num_pages = self.num_pages();

        let bottom = (number - 1) * self.per_page;
        let top = (bottom + self.per_page).min(self.count);
        let (start_index, end_index) = if self.count == 0 {
            (0, 0)
        } else {
            (bottom + 1, top)
        };

        Ok(Page {
            number,
            num_pages,
            count: self.count,
            start_index,
            end_index,
            has_previous: number > 1,
            has_next: number < num_pages,
            previous_page_number: (number > 1).then(|| number - 1),
            next_page_number: (number < num_pages).then(|| number + 1),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_num_pages() {
        assert_eq!(Paginator::new(0, 10).num_pages(), 1);
        assert_eq!(Paginator::new(10, 10).num_pages(), 1);
        assert_eq!(Paginator::new(11, 10).num_pages(), 2);
        assert_eq!(Paginator::new(25, 10).num_pages(), 3);
    }

    #[test]
    fn test_middle_page() {
        let page = Paginator::new(25, 10).page("2").unwrap();
        assert_eq!(page.start_index, 11);
        assert_eq!(page.end_index, 20);
        assert_eq!(page.offset(), 10);
        assert_eq!(page.item_count(), 10);
        assert_eq!(page.previous_page_number, Some(1));
        assert_eq!(page.next_page_number, Some(3));
    }

    #[test]
    fn test_last_page() {
        let page = Paginator::new(25, 10).page("last").unwrap();
        assert_eq!(page.number, 3);
        assert_eq!(page.item_count(), 5);
        assert!(!page.has_next);
    }

    #[test]
    fn test_empty_collection_has_first_page() {
        let page = Paginator::new(0, 10).page("1").unwrap();
        assert_eq!(page.item_count(), 0);
        assert_eq!(page.offset(), 0);
        assert!(!page.has_previous && !page.has_next);
    }

    #[test]
    fn test_invalid_pages() {
        let paginator = Paginator::new(25, 10);
        assert_eq!(paginator.page("4"), Err(PageError::Empty(4)));
        assert_eq!(paginator.page("0"), Err(PageError::Empty(0)));
        assert_eq!(
            paginator.page("first"),
            Err(PageError::NotANumber("first".to_string()))
        );
    }
}
