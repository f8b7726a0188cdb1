use crate::model::RecipeCandidate;

/// One page of filtered results
#[derive(Debug, Clone, PartialEq)]
pub struct PagedView {
    /// 1-based
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub total_filtered: usize,
    pub items: Vec<RecipeCandidate>,
}

impl PagedView {
    pub fn is_empty(&self) -> bool {
        self.total_filtered == 0
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Number of pages for `len` items; never less than one
pub fn total_pages(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1)).max(1)
}

/// Clamp `page` into `[1, total_pages]`
pub fn clamp_page(page: usize, len: usize, page_size: usize) -> usize {
    page.clamp(1, total_pages(len, page_size))
}

pub fn paginate(filtered: &[RecipeCandidate], page: usize, page_size: usize) -> PagedView {
    let page_size = page_size.max(1);
    let page = clamp_page(page, filtered.len(), page_size);
    let start = (page - 1) * page_size;
    let end = (start + page_size).min(filtered.len());

    PagedView {
        page,
        page_size,
        total_pages: total_pages(filtered.len(), page_size),
        total_filtered: filtered.len(),
        items: filtered.get(start..end).unwrap_or_default().to_vec(),
    }
}
