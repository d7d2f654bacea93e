//! Search and pagination over the fetched country list.
//!
//! `filter` and `paginate` are pure derivations; `ViewModel` owns the
//! canonical state (records, search term, current page) and recomputes the
//! derived values on every read.

use crate::model::Country;

pub const PAGE_SIZE: usize = 9;

pub fn filter<'a>(records: &'a [Country], term: &str) -> Vec<&'a Country> {
    let needle = term.to_lowercase();
    if needle.is_empty() {
        return records.iter().collect();
    }
    records.iter().filter(|c| matches(c, &needle)).collect()
}

fn matches(country: &Country, needle: &str) -> bool {
    if country.name.to_lowercase().contains(needle) {
        return true;
    }
    if let Some(capital) = country.capital.as_deref() {
        if capital.to_lowercase().contains(needle) {
            return true;
        }
    }
    !country.region.is_empty() && country.region.to_lowercase().contains(needle)
}

pub fn total_pages(count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    count.div_ceil(page_size).max(1)
}

#[derive(Clone, Debug, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub total_pages: usize,
}

/// Slices `items` into the 1-based `page` of `page_size` entries.
///
/// Out-of-range pages (including page 0) produce an empty slice; callers are
/// expected to keep `page` clamped.
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Page<T> {
    let total_pages = total_pages(items.len(), page_size);
    let slice: &[T] = if page == 0 || page_size == 0 {
        &[]
    } else {
        let start = (page - 1).saturating_mul(page_size).min(items.len());
        let end = page.saturating_mul(page_size).min(items.len());
        &items[start..end]
    };
    Page {
        items: slice.to_vec(),
        page,
        total_pages,
    }
}

#[derive(Clone, Debug)]
pub struct ViewModel {
    records: Vec<Country>,
    search_term: String,
    page: usize,
    page_size: usize,
}

impl Default for ViewModel {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewModel {
    pub fn new() -> Self {
        Self::with_page_size(PAGE_SIZE)
    }

    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            records: Vec::new(),
            search_term: String::new(),
            page: 1,
            page_size: if page_size == 0 { PAGE_SIZE } else { page_size },
        }
    }

    pub fn records(&self) -> &[Country] {
        &self.records
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn set_records(&mut self, records: Vec<Country>) {
        self.records = records;
        self.page = 1;
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.page = 1;
    }

    pub fn filtered(&self) -> Vec<&Country> {
        filter(&self.records, &self.search_term)
    }

    pub fn filtered_count(&self) -> usize {
        self.filtered().len()
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.filtered_count(), self.page_size)
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn next_page(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.page += 1;
        true
    }

    pub fn prev_page(&mut self) -> bool {
        if !self.has_prev() {
            return false;
        }
        self.page -= 1;
        true
    }

    pub fn go_to_page(&mut self, target: usize) {
        self.page = 1;
        while self.page < target && self.next_page() {}
    }

    pub fn visible(&self) -> Page<&Country> {
        paginate(&self.filtered(), self.page, self.page_size)
    }
}
