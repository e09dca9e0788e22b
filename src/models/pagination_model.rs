//! models/pagination_model.rs
//! Paginación offset: skip = (page - 1) * page_size, limit = page_size.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: u64 = 10;
pub const MAX_PAGE_SIZE: u64 = 100;
/// Tope de página; con MAX_PAGE_SIZE el skip queda muy lejos de u64::MAX.
pub const MAX_PAGE: u64 = 1_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: u64,
    pub page_size: u64,
}

impl Pagination {
    /// page se acota a [1, MAX_PAGE] y page_size a [1, MAX_PAGE_SIZE].
    pub fn new(page: u64, page_size: u64) -> Self {
        Self {
            page: page.clamp(1, MAX_PAGE),
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    pub fn first_page(page_size: u64) -> Self {
        Self::new(1, page_size)
    }

    pub fn skip(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.page_size)
    }

    pub fn limit(&self) -> u64 {
        self.page_size
    }

    /// Misma página de tamaño, de vuelta a la página 1.
    pub fn reset(&self) -> Self {
        Self::first_page(self.page_size)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::first_page(DEFAULT_PAGE_SIZE)
    }
}

/// Query string `?page=&page_size=` de los endpoints de la consola.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

impl PageQuery {
    /// Completa los valores ausentes con la paginación actual.
    pub fn merge_into(&self, current: Pagination) -> Pagination {
        Pagination::new(
            self.page.unwrap_or(current.page),
            self.page_size.unwrap_or(current.page_size),
        )
    }
}
