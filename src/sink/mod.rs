//! Where packs go once built: a local JSON file, then optional remotes.

pub mod digest_file;
pub mod site;
pub mod table;
pub mod writer_api;

pub use digest_file::DigestWriter;
pub use site::{SiteConfig, SiteExport};
pub use table::{TableConfig, TableSink};
pub use writer_api::{ForwardConfig, ForwardOutcome, WriterApi};

pub const SNIPPET_CHARS: usize = 200;

/// First 200 characters of a response body, for diagnostics.
pub fn snippet(body: &str) -> String {
    crate::normalizer::text::truncate_chars(body, SNIPPET_CHARS)
}
