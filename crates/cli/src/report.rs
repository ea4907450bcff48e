//! Human-readable dumps of cache and memory contents.

use std::io::{self, Write};

use cachesim_core::Cache;
use cachesim_core::memory::BackingStore;

/// Writes every set, one line per way: the data words in hex, then the state bits.
///
/// ```text
/// 0: 00000000 0000002A v:1 d:1
///    00000000 00000000 v:0 d:0
/// ```
pub fn write_cache<W: Write>(out: &mut W, cache: &Cache) -> io::Result<()> {
    for (index, set) in cache.sets().enumerate() {
        write!(out, "{index}: ")?;
        for (way, line) in set.iter().enumerate() {
            if way != 0 {
                write!(out, "   ")?;
            }
            for word in line.words() {
                write!(out, "{word:08X} ")?;
            }
            writeln!(out, "v:{} d:{}", u8::from(line.valid()), u8::from(line.dirty()))?;
        }
    }
    Ok(())
}

/// Writes the backing store in address order, one word per line, with a blank
/// line after every `words_per_line` entries.
pub fn write_memory<W: Write>(
    out: &mut W,
    memory: &BackingStore,
    words_per_line: usize,
) -> io::Result<()> {
    for (n, (addr, word)) in memory.iter_ordered().enumerate() {
        writeln!(out, "Address: {addr:020} --> DATA: {word}")?;
        if words_per_line != 0 && (n + 1) % words_per_line == 0 {
            writeln!(out)?;
        }
    }
    Ok(())
}
