use crate::config::AddressSpaceConfig;
use crate::error::Result;
use crate::memory::PageTable;
use crate::rng::FrameSource;
use crate::translation::{translate, translate_batch, Translation};

/// Owns one address-space configuration and the table built for it.
///
/// The table is built once in `new` and only read afterwards, so a shared
/// `&VmManager` can serve translations from several threads.
#[derive(Debug, Clone)]
pub struct VmManager {
    config: AddressSpaceConfig,
    page_table: PageTable,
}

impl VmManager {
    pub fn new(config: AddressSpaceConfig, source: &mut impl FrameSource) -> Result<Self> {
        let page_table = PageTable::build(&config, source)?;
        Ok(VmManager { config, page_table })
    }

    pub fn config(&self) -> &AddressSpaceConfig {
        &self.config
    }

    pub fn page_table(&self) -> &PageTable {
        &self.page_table
    }

    pub fn translate(&self, virtual_address: u64) -> Result<Translation> {
        translate(virtual_address, &self.page_table, self.config.page_size())
    }

    pub fn translate_batch(&self, addresses: &[u64]) -> Vec<Result<Translation>> {
        translate_batch(addresses, &self.page_table, self.config.page_size())
    }

    /// Full physical address, or None when the page is on backing store
    pub fn physical_address(&self, virtual_address: u64) -> Result<Option<u64>> {
        let t = self.translate(virtual_address)?;
        Ok(t.physical_address(self.config.offset_bits()))
    }
}
