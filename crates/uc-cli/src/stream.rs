use std::io::{BufRead, Write};

use uc_config::ConfigStore;
use uc_core::Cleaner;

#[derive(Debug, Clone, Copy, Default)]
pub struct StreamOptions {
    /// Echo inputs that were not cleaned.
    pub keep_unchanged: bool,
    /// Re-check the config file before every line.
    pub watch: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamStats {
    pub lines: usize,
    pub cleaned: usize,
    pub reloads: usize,
}

/// Clean each item against one snapshot and write the results, one per line.
pub fn clean_items<'a, W: Write>(
    store: &ConfigStore,
    items: impl IntoIterator<Item = &'a str>,
    out: &mut W,
    options: StreamOptions,
) -> Result<StreamStats, String> {
    let config = store.snapshot();
    let cleaner = Cleaner::new(&config);

    let mut stats = StreamStats::default();
    for item in items {
        clean_one(&cleaner, item, out, options, &mut stats)?;
    }
    Ok(stats)
}

/// Clean lines from `input` until EOF, flushing after each line so the
/// output can feed another process interactively.
///
/// A `Cleaner` is built per snapshot and only rebuilt after a reload.
pub fn clean_lines<R: BufRead, W: Write>(
    store: &ConfigStore,
    input: R,
    out: &mut W,
    options: StreamOptions,
) -> Result<StreamStats, String> {
    let mut stats = StreamStats::default();
    let mut lines = input.lines();
    let mut next = lines.next();

    while next.is_some() {
        if options.watch && store.reload_if_changed() {
            stats.reloads += 1;
        }
        let config = store.snapshot();
        let cleaner = Cleaner::new(&config);

        while let Some(line) = next.take() {
            let line = line.map_err(|e| format!("Failed to read input: {}", e))?;
            clean_one(&cleaner, &line, out, options, &mut stats)?;
            out.flush().map_err(|e| format!("Failed to write output: {}", e))?;

            next = lines.next();
            if options.watch && next.is_some() && store.reload_if_changed() {
                stats.reloads += 1;
                break;
            }
        }
    }
    Ok(stats)
}

fn clean_one<W: Write>(
    cleaner: &Cleaner<'_>,
    text: &str,
    out: &mut W,
    options: StreamOptions,
    stats: &mut StreamStats,
) -> Result<(), String> {
    stats.lines += 1;
    let written = match cleaner.clean(text) {
        Some(cleaned) => {
            stats.cleaned += 1;
            Some(cleaned)
        }
        None if options.keep_unchanged => Some(text.to_string()),
        None => None,
    };

    if let Some(line) = written {
        writeln!(out, "{}", line).map_err(|e| format!("Failed to write output: {}", e))?;
    }
    Ok(())
}
