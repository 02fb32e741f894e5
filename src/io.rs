use std::io::{self, Write};

use crate::config::AddressSpaceConfig;
use crate::memory::PageTable;
use crate::translation::Translation;

/// Write one translation as `<frame-or--1>|<offset>`
pub fn write_translation<W: Write>(out: &mut W, translation: &Translation) -> io::Result<()> {
    writeln!(out, "{}", translation)
}

/// Write the translation with its page number and offset, one field per line
pub fn write_translation_verbose<W: Write>(
    out: &mut W,
    virtual_address: u64,
    translation: &Translation,
) -> io::Result<()> {
    writeln!(out, "Virtual address: {}", virtual_address)?;
    writeln!(out, "Lower offset: {}", translation.offset)?;
    writeln!(out, "VPN: {}", translation.vpn)?;
    write_translation(out, translation)
}

/// Sizes derived from the configuration plus how much of the table got a frame
pub fn write_summary<W: Write>(
    out: &mut W,
    config: &AddressSpaceConfig,
    table: &PageTable,
) -> io::Result<()> {
    writeln!(out, "Configuration:      {}", config)?;
    writeln!(out, "Offset bits:        {}", config.offset_bits())?;
    writeln!(out, "Page table entries: {}", table.len())?;
    writeln!(out, "Physical frames:    {}", config.pool_size())?;
    writeln!(out, "Resident pages:     {}", table.resident_count())?;
    writeln!(out, "Pages on disk:      {}", table.not_resident_count())
}
