//! Окно пагинации: срез страницы, число страниц, кнопки страниц.
//!
//! Страницы нумеруются с 1.

pub const DEFAULT_PAGE_SIZE: usize = 5;
pub const DEFAULT_MAX_VISIBLE_PAGES: usize = 5;

/// `max(1, ceil(count / page_size))`
pub fn total_pages(count: usize, page_size: usize) -> usize {
    let page_size = page_size.max(1);
    count.div_ceil(page_size).max(1)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    pub current_page: usize,
    pub page_size: usize,
}

impl Default for PageState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl PageState {
    pub fn new(page_size: usize) -> Self {
        Self {
            current_page: 1,
            page_size: page_size.max(1),
        }
    }

    /// Переход на страницу; возвращает `true`, если страница сменилась
    pub fn go_to(&mut self, page: usize, total_pages: usize) -> bool {
        if page < 1 || page > total_pages.max(1) || page == self.current_page {
            return false;
        }
        self.current_page = page;
        true
    }

    /// Прижимает текущую страницу к `[1, total_pages]`; `true`, если пришлось сдвинуть
    pub fn clamp(&mut self, total_pages: usize) -> bool {
        let clamped = self.current_page.clamp(1, total_pages.max(1));
        let changed = clamped != self.current_page;
        self.current_page = clamped;
        changed
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.current_page = 1;
    }

    pub fn first(&mut self) {
        self.current_page = 1;
    }
}

/// Одна страница отфильтрованного списка
#[derive(Debug, Clone, PartialEq)]
pub struct PageWindow<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub total_items: usize,
    /// Индекс первой записи страницы (с 0)
    pub start_index: usize,
    /// Индекс за последней записью страницы (с 0, не включая)
    pub end_index: usize,
}

impl<T> PageWindow<T> {
    /// Номер первой показанной записи (с 1); 0 для пустого списка
    pub fn display_start(&self) -> usize {
        if self.total_items == 0 {
            0
        } else {
            self.start_index + 1
        }
    }

    pub fn display_end(&self) -> usize {
        (self.page * self.page_size).min(self.total_items)
    }

    /// Подпись вида "11-12 of 12"
    pub fn range_label(&self) -> String {
        format!(
            "{}-{} of {}",
            self.display_start(),
            self.display_end(),
            self.total_items
        )
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Всё, что нужно панели пагинации, без самих записей
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageSummary {
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub display_start: usize,
    pub display_end: usize,
    pub numbers: Vec<usize>,
}

impl PageSummary {
    /// "Showing 11-12 of 12 items"; `noun` во множественном числе с `s` на конце
    pub fn showing_label(&self, noun: &str) -> String {
        let noun = if self.total_items == 1 {
            noun.strip_suffix('s').unwrap_or(noun)
        } else {
            noun
        };
        format!(
            "Showing {}-{} of {} {}",
            self.display_start, self.display_end, self.total_items, noun
        )
    }

    /// Панель не показывается, когда показывать нечего
    pub fn is_hidden(&self) -> bool {
        self.total_pages <= 1 && self.total_items == 0
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

impl<T> PageWindow<T> {
    pub fn summary(&self, max_visible: usize) -> PageSummary {
        PageSummary {
            page: self.page,
            total_pages: self.total_pages,
            total_items: self.total_items,
            display_start: self.display_start(),
            display_end: self.display_end(),
            numbers: page_numbers(self.page, self.total_pages, max_visible),
        }
    }
}

pub fn paginate<T: Clone>(records: &[T], page: usize, page_size: usize) -> PageWindow<T> {
    let page = page.max(1);
    let page_size = page_size.max(1);
    let start_index = (page - 1) * page_size;
    let from = start_index.min(records.len());
    let to = (start_index + page_size).min(records.len());
    PageWindow {
        items: records[from..to].to_vec(),
        page,
        page_size,
        total_pages: total_pages(records.len(), page_size),
        total_items: records.len(),
        start_index,
        end_index: to,
    }
}

/// Номера кнопок страниц: не больше `max_visible`, окно вокруг текущей страницы,
/// у краёв окно сдвигается, чтобы число кнопок не менялось.
pub fn page_numbers(current: usize, total: usize, max_visible: usize) -> Vec<usize> {
    let total = total.max(1);
    let max_visible = max_visible.max(1);
    let current = current.clamp(1, total);
    let mut start = current.saturating_sub(max_visible / 2).max(1);
    let end = (start + max_visible - 1).min(total);
    if end - start < max_visible - 1 {
        start = (end + 1).saturating_sub(max_visible).max(1);
    }
    (start..=end).collect()
}
