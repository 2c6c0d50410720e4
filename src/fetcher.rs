//! Paginated contract reader.
//!
//! Pages are requested strictly in order, starting at index 0, with calldata
//! `selector ++ uint256(page_index) ++ uint256(page_size)`. The first page
//! holding fewer than `page_size` items ends the read. A page of exactly
//! `page_size` items is never terminal, so an item count that is an exact
//! multiple of the page size costs one extra, empty page.
//!
//! Any transport or decode failure aborts the whole read; items collected
//! from earlier pages are dropped with it.

use std::num::NonZeroU64;

use knapsack_offchain_types::encoding::{word_from_u64, SELECTOR_SIZE};
use knapsack_offchain_types::WORD_SIZE;
use knapsack_transport::CallTransport;
use tracing::debug;

use crate::abi::{decode_page_hex, Page};
use crate::error::UnitError;

/// Selector of the paged `(uint256[] values, uint256[] weights)` accessor.
pub const DEFAULT_SELECTOR: [u8; SELECTOR_SIZE] = [0xcb, 0xba, 0x95, 0x9b];

/// Items requested per page.
pub const DEFAULT_PAGE_SIZE: NonZeroU64 = match NonZeroU64::new(100) {
    Some(size) => size,
    None => panic!("page size must be non-zero"),
};

/// Build the calldata for one page request.
pub fn encode_page_request(
    selector: [u8; SELECTOR_SIZE],
    page_index: u64,
    page_size: u64,
) -> Vec<u8> {
    let mut data = Vec::with_capacity(SELECTOR_SIZE + 2 * WORD_SIZE);
    data.extend_from_slice(&selector);
    data.extend_from_slice(&word_from_u64(page_index));
    data.extend_from_slice(&word_from_u64(page_size));
    data
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchConfig {
    pub selector: [u8; SELECTOR_SIZE],
    pub page_size: NonZeroU64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            selector: DEFAULT_SELECTOR,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// All items read from the contract, in storage order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Items {
    pub values: Vec<u64>,
    pub weights: Vec<u64>,
}

impl Items {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn extend(&mut self, page: Page) {
        self.values.extend(page.values);
        self.weights.extend(page.weights);
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchStats {
    /// Page requests issued, including the terminal one.
    pub pages: u64,
    pub items: usize,
}

pub struct PageFetcher<T> {
    transport: T,
    config: FetchConfig,
}

impl<T: CallTransport> PageFetcher<T> {
    pub fn new(transport: T, config: FetchConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Request and decode a single page.
    pub fn fetch_page(&self, contract: &str, page_index: u64) -> Result<Page, UnitError> {
        let data = encode_page_request(
            self.config.selector,
            page_index,
            self.config.page_size.get(),
        );
        let result = self
            .transport
            .call(contract, &data)
            .map_err(|source| UnitError::Transport {
                page: page_index,
                source,
            })?;
        decode_page_hex(&result).map_err(|source| UnitError::Decode {
            page: page_index,
            source,
        })
    }

    /// Read every page until a short page is seen.
    pub fn fetch_all(&self, contract: &str) -> Result<Items, UnitError> {
        self.fetch_all_with_stats(contract).map(|(items, _)| items)
    }

    pub fn fetch_all_with_stats(&self, contract: &str) -> Result<(Items, FetchStats), UnitError> {
        let page_size = self.config.page_size.get();
        let mut items = Items::default();
        let mut page_index = 0u64;

        loop {
            let page = self.fetch_page(contract, page_index)?;
            let count = page.len() as u64;
            debug!(page = page_index, items = count, "fetched page");
            items.extend(page);

            if count < page_size {
                break;
            }
            page_index += 1;
        }

        let stats = FetchStats {
            pages: page_index + 1,
            items: items.len(),
        };
        Ok((items, stats))
    }
}
